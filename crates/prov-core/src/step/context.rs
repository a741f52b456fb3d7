use uuid::Uuid;

use crate::checkpoint::Checkpoint;
use crate::errors::CoreEngineError;
use crate::repo::FlowDefinition;

/// Contexto de ejecución entregado a `StepDefinition::run`.
pub struct StepContext<'a> {
    pub run_id: Uuid,
    pub step_index: usize,
    pub step_id: &'a str,
    /// Checkpoint vigente al iniciar el step (el del último step completado).
    pub checkpoint: &'a Checkpoint,
    pub(crate) definition: &'a FlowDefinition,
}

impl<'a> StepContext<'a> {
    /// Doble comprobación para acciones que pueden invocarse fuera del engine:
    /// permite a un step retornar temprano si ya figura como completado.
    pub fn is_step_completed(&self, name: &str) -> Result<bool, CoreEngineError> {
        self.definition.is_step_completed(self.checkpoint, name)
    }

    pub fn step_count(&self) -> usize {
        self.definition.len()
    }
}
