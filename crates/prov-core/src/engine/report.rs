use serde::Serialize;
use uuid::Uuid;

use crate::checkpoint::Checkpoint;

/// Resumen de un run exitoso (o detenido con `run_until`).
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Checkpoint leído al iniciar el run.
    pub initial_checkpoint: Checkpoint,
    /// Steps completados en runs anteriores.
    pub skipped: Vec<String>,
    /// Steps ejecutados en este run, en orden.
    pub executed: Vec<String>,
    pub final_checkpoint: Checkpoint,
    /// El run encontró el checkpoint terminal y no hizo nada.
    pub already_complete: bool,
}

impl RunReport {
    pub(crate) fn new(run_id: Uuid, initial: &Checkpoint) -> Self {
        Self { run_id,
               initial_checkpoint: initial.clone(),
               skipped: Vec::new(),
               executed: Vec::new(),
               final_checkpoint: initial.clone(),
               already_complete: false }
    }

    pub fn is_complete(&self) -> bool {
        self.final_checkpoint.is_complete()
    }
}
