//! Tipos de evento del journal y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada run del `FlowEngine` emite eventos a un `EventStore` append-only.
//! - El journal es un registro de auditoría: el estado de reanudación vive en
//!   el checkpoint, no se reconstruye desde aquí.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StepError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Inicio de un run. `checkpoint` es el valor leído del almacenamiento.
    RunStarted {
        definition_hash: String,
        step_count: usize,
        checkpoint: String,
    },
    /// Step completado en un run anterior; no se ejecuta.
    StepSkipped { step_index: usize, step_id: String },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    /// Señal ligera emitida por el step (no altera el checkpoint).
    StepSignal {
        step_index: usize,
        step_id: String,
        signal: String,
        data: serde_json::Value,
    },
    /// Step terminado con éxito y checkpoint escrito.
    StepFinished {
        step_index: usize,
        step_id: String,
        checkpoint: String,
    },
    /// Step fallido. `checkpoint` es el último valor bueno, donde reanuda el
    /// siguiente run.
    StepFailed {
        step_index: usize,
        step_id: String,
        error: StepError,
        checkpoint: String,
    },
    /// Checkpoint terminal escrito.
    FlowCompleted { definition_hash: String },
    /// El operador descartó el checkpoint.
    CheckpointReset { previous: Option<String> },
}

impl FlowEventKind {
    /// Nombre estable en minúsculas (útil para logs y filtros).
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "runstarted",
            Self::StepSkipped { .. } => "stepskipped",
            Self::StepStarted { .. } => "stepstarted",
            Self::StepSignal { .. } => "stepsignal",
            Self::StepFinished { .. } => "stepfinished",
            Self::StepFailed { .. } => "stepfailed",
            Self::FlowCompleted { .. } => "flowcompleted",
            Self::CheckpointReset { .. } => "checkpointreset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub run_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
