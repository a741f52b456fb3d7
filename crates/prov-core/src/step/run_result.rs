use serde::{Deserialize, Serialize};

use crate::errors::StepError;

/// Señal ligera emitida por un step (no altera el checkpoint), p. ej. que un
/// guard ya estaba satisfecho. Se registra en el journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSignal {
    pub signal: String,
    pub data: serde_json::Value,
}

impl StepSignal {
    pub fn new(signal: impl Into<String>, data: serde_json::Value) -> Self {
        Self { signal: signal.into(),
               data }
    }
}

/// Resultado abstracto de ejecutar un step.
#[derive(Debug)]
pub enum StepRunResult {
    Success,
    SuccessWithSignals { signals: Vec<StepSignal> },
    Failure { error: StepError },
}

impl StepRunResult {
    pub fn failure(error: StepError) -> Self {
        Self::Failure { error }
    }
}

impl From<Result<(), StepError>> for StepRunResult {
    fn from(res: Result<(), StepError>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(error) => Self::Failure { error },
        }
    }
}
