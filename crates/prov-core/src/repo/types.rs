//! Tipos de repositorio: definición validada del flow (`FlowDefinition`) y
//! estado reconstruido a partir del checkpoint (`FlowInstance`).
//!
//! La definición se valida una sola vez al construirse (no vacía, nombres
//! únicos, sin sentinelas) y mantiene un índice nombre → ordinal para que toda
//! consulta posterior sea O(1).
use indexmap::IndexSet;
use serde::Serialize;

use crate::checkpoint::Checkpoint;
use crate::constants::RESERVED_STEP_NAMES;
use crate::errors::CoreEngineError;
use crate::hashing::definition_hash;
use crate::step::{StepDefinition, StepKind, StepStatus};

/// Definición inmutable del Flow.
pub struct FlowDefinition {
    pub steps: Vec<Box<dyn StepDefinition>>,
    pub definition_hash: String,
    names: IndexSet<String>,
}

impl std::fmt::Debug for FlowDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("steps", &self.names)
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

impl FlowDefinition {
    pub fn new(steps: Vec<Box<dyn StepDefinition>>) -> Result<Self, CoreEngineError> {
        if steps.is_empty() {
            return Err(CoreEngineError::EmptyDefinition);
        }
        let mut names = IndexSet::with_capacity(steps.len());
        for step in &steps {
            let id = step.id();
            validate_step_name(id)?;
            if !names.insert(id.to_string()) {
                return Err(CoreEngineError::DuplicateStep(id.to_string()));
            }
        }
        let definition_hash = definition_hash(names.iter().map(String::as_str));
        Ok(Self { steps,
                  definition_hash,
                  names })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Siempre `false` para una definición construida con `new`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Ordinal de un step por nombre.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Cantidad de steps ya completados según el checkpoint.
    ///
    /// `start` → 0, `complete` → todos, un step → su ordinal + 1. Un nombre
    /// que no pertenece a la definición es un error: no se asume ni "nada
    /// hecho" ni "todo hecho".
    pub fn completed_count(&self, checkpoint: &Checkpoint) -> Result<usize, CoreEngineError> {
        match checkpoint {
            Checkpoint::Start => Ok(0),
            Checkpoint::Complete => Ok(self.len()),
            Checkpoint::Step(name) => self.position(name)
                                          .map(|idx| idx + 1)
                                          .ok_or_else(|| CoreEngineError::UnknownCheckpoint(name.clone())),
        }
    }

    /// `true` si el ordinal de `name` es <= al ordinal del checkpoint.
    pub fn is_step_completed(&self, checkpoint: &Checkpoint, name: &str) -> Result<bool, CoreEngineError> {
        let done = self.completed_count(checkpoint)?;
        let idx = self.position(name)
                      .ok_or_else(|| CoreEngineError::UnknownStep(name.to_string()))?;
        Ok(idx < done)
    }

    /// Checkpoint que corresponde a haber completado el step `index`.
    pub(crate) fn checkpoint_for(&self, index: usize) -> Checkpoint {
        Checkpoint::Step(self.steps[index].id().to_string())
    }
}

fn validate_step_name(name: &str) -> Result<(), CoreEngineError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CoreEngineError::InvalidStepName(name.to_string()));
    }
    if RESERVED_STEP_NAMES.contains(&name) {
        return Err(CoreEngineError::ReservedStepName(name.to_string()));
    }
    Ok(())
}

/// Construye y valida una definición a partir de los steps en orden.
pub fn build_flow_definition(steps: Vec<Box<dyn StepDefinition>>) -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::new(steps)
}

/// Estado de un step en la instancia.
#[derive(Debug, Clone, Serialize)]
pub struct StepSlot {
    pub index: usize,
    pub step_id: String,
    pub kind: StepKind,
    pub status: StepStatus,
}

/// Snapshot del flow reconstruido desde (definición, checkpoint).
#[derive(Debug, Clone, Serialize)]
pub struct FlowInstance {
    pub definition_hash: String,
    pub checkpoint: String,
    pub steps: Vec<StepSlot>,
    /// Índice del primer step pendiente (`steps.len()` si no queda ninguno).
    pub cursor: usize,
    pub completed: bool,
}

impl FlowInstance {
    pub fn from_checkpoint(definition: &FlowDefinition, checkpoint: &Checkpoint) -> Result<Self, CoreEngineError> {
        let done = definition.completed_count(checkpoint)?;
        let steps = definition.steps
                              .iter()
                              .enumerate()
                              .map(|(index, s)| StepSlot { index,
                                                           step_id: s.id().to_string(),
                                                           kind: s.kind(),
                                                           status: if index < done {
                                                               StepStatus::FinishedOk
                                                           } else {
                                                               StepStatus::Pending
                                                           } })
                              .collect();
        Ok(Self { definition_hash: definition.definition_hash.clone(),
                  checkpoint: checkpoint.to_string(),
                  steps,
                  cursor: done,
                  completed: checkpoint.is_complete() })
    }

    /// Steps que ejecutaría el próximo run (incluye el `Failed`).
    pub fn pending(&self) -> impl Iterator<Item = &StepSlot> {
        self.steps.iter().filter(|s| s.status != StepStatus::FinishedOk)
    }

    /// Marca como `Failed` el primer step pendiente si se llama `step_id`.
    /// Un fallo que no coincide con el cursor (checkpoint movido después del
    /// fallo) se ignora y devuelve `false`.
    pub fn mark_failed(&mut self, step_id: &str) -> bool {
        match self.steps.get_mut(self.cursor) {
            Some(slot) if slot.step_id == step_id => {
                slot.status = StepStatus::Failed;
                true
            }
            _ => false,
        }
    }
}
