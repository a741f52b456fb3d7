//! Builder para `FlowEngine`.
//!
//! Acumula los steps en el orden declarado y valida la definición al final
//! (`build`): una definición vacía o con nombres repetidos se rechaza antes de
//! tocar el checkpoint.
//!
//! ```ignore
//! let mut engine = FlowEngine::new()
//!     .step(FnStep::new("update_packages", |_| StepRunResult::Success))
//!     .step(FnStep::new("create_user", |_| StepRunResult::Success))
//!     .build()?;
//! ```

use crate::checkpoint::CheckpointStore;
use crate::engine::FlowEngine;
use crate::errors::CoreEngineError;
use crate::event::EventStore;
use crate::repo::FlowDefinition;
use crate::step::StepDefinition;

/// Builder que contiene las stores y la lista de pasos.
pub struct EngineBuilder<C: CheckpointStore, E: EventStore> {
    /// Almacenamiento del checkpoint.
    pub checkpoint_store: C,
    /// Journal de eventos.
    pub event_store: E,
    steps: Vec<Box<dyn StepDefinition>>,
}

impl<C: CheckpointStore, E: EventStore> EngineBuilder<C, E> {
    pub(crate) fn new(checkpoint_store: C, event_store: E) -> Self {
        Self { checkpoint_store,
               event_store,
               steps: Vec::new() }
    }

    /// Añade un paso al final de la secuencia.
    #[inline]
    pub fn step<S>(mut self, step: S) -> Self
        where S: StepDefinition + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Añade varios pasos ya encapsulados (p. ej. cargados desde un plan).
    pub fn steps<I>(mut self, steps: I) -> Self
        where I: IntoIterator<Item = Box<dyn StepDefinition>>
    {
        self.steps.extend(steps);
        self
    }

    /// Construye el `FlowEngine` validando la definición.
    pub fn build(self) -> Result<FlowEngine<C, E>, CoreEngineError> {
        let definition = FlowDefinition::new(self.steps)?;
        Ok(FlowEngine::with_definition(self.checkpoint_store, self.event_store, definition))
    }
}
