//! Errores de persistencia.
//! Mapea errores de IO / serialización a variantes semánticas y los traduce
//! al `StoreError` del core.

use prov_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(),
                   source }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io { context, source } => StoreError::Io { context, source },
            other => StoreError::Other(other.to_string()),
        }
    }
}
