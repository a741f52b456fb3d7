//! `Checkpoint` como objeto valor.
//!
//! Formato persistido: una sola línea con el nombre del step. Los sentinelas
//! `start` y `complete` delimitan la secuencia. La ausencia de almacenamiento
//! equivale a `Start`; un contenido vacío o con varias líneas es un checkpoint
//! corrupto, nunca "empezar de cero".
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{COMPLETE_SENTINEL, START_SENTINEL};
use crate::errors::CoreEngineError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Checkpoint {
    /// Nada completado todavía.
    Start,
    /// Último step completado con éxito.
    Step(String),
    /// Todos los steps completados (absorbente).
    Complete,
}

impl Checkpoint {
    /// Interpreta el contenido crudo del almacenamiento.
    ///
    /// No valida contra una definición: un nombre desconocido se detecta al
    /// resolverlo con `FlowDefinition::completed_count`.
    pub fn parse(raw: &str) -> Result<Self, CoreEngineError> {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines.next()
                         .ok_or_else(|| CoreEngineError::CorruptCheckpoint("checkpoint is empty".into()))?;
        if lines.next().is_some() {
            return Err(CoreEngineError::CorruptCheckpoint(format!("expected a single line, got {raw:?}")));
        }
        Ok(match first {
               START_SENTINEL => Self::Start,
               COMPLETE_SENTINEL => Self::Complete,
               name => Self::Step(name.to_string()),
           })
    }

    /// Lectura opcional: `None` (sin almacenamiento) equivale a `Start`.
    pub fn from_stored(raw: Option<&str>) -> Result<Self, CoreEngineError> {
        match raw {
            None => Ok(Self::Start),
            Some(raw) => Self::parse(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => START_SENTINEL,
            Self::Step(name) => name,
            Self::Complete => COMPLETE_SENTINEL,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::Start
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
