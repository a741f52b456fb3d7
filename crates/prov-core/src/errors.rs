//! Errores del core.
//!
//! - `StepError`: fallo de la acción de un step. Es serializable porque viaja
//!   dentro del evento `StepFailed` del journal.
//! - `StoreError`: fallo del almacenamiento del checkpoint.
//! - `CoreEngineError`: errores del motor (definición inválida, checkpoint
//!   desconocido o corrupto, step fallido, almacenamiento).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallo reportado por la acción de un step.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    #[error("command `{program}` failed (status: {}): {stderr}", status_text(.status))]
    Command {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error("io error while {context}: {message}")]
    Io { context: String, message: String },
    #[error("{0}")]
    Message(String),
}

impl StepError {
    pub fn io(context: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io { context: context.into(),
                   message: err.to_string() }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "killed by signal".to_string(),
    }
}

/// Fallo del `CheckpointStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("checkpoint storage io error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("checkpoint storage error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(),
                   source }
    }
}

#[derive(Debug, Error)]
pub enum CoreEngineError {
    #[error("flow definition has no steps")]
    EmptyDefinition,
    #[error("duplicate step name: {0}")]
    DuplicateStep(String),
    #[error("step name `{0}` is reserved")]
    ReservedStepName(String),
    #[error("invalid step name {0:?}: names must be non-empty and contain no whitespace")]
    InvalidStepName(String),
    #[error("unknown checkpoint `{0}`: it names no step of the current definition")]
    UnknownCheckpoint(String),
    #[error("corrupt checkpoint: {0}")]
    CorruptCheckpoint(String),
    #[error("unknown step: {0}")]
    UnknownStep(String),
    #[error("step `{step_id}` failed: {error} (checkpoint: {checkpoint}, next run resumes at `{step_id}`)")]
    StepFailed {
        step_id: String,
        checkpoint: String,
        error: StepError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("flow already completed")]
    FlowCompleted,
    #[error("internal: {0}")]
    Internal(String),
}

impl CoreEngineError {
    /// Errores de definición detectados al construir el flow.
    pub fn is_definition_error(&self) -> bool {
        matches!(self,
                 Self::EmptyDefinition | Self::DuplicateStep(_) | Self::ReservedStepName(_) | Self::InvalidStepName(_))
    }

    /// Errores del checkpoint persistido (contenido o almacenamiento). Se
    /// distinguen de "nunca iniciado" para no repetir ni saltar steps en
    /// silencio.
    pub fn is_checkpoint_error(&self) -> bool {
        matches!(self, Self::UnknownCheckpoint(_) | Self::CorruptCheckpoint(_) | Self::Store(_))
    }
}
