//! prov-persistence
//!
//! Almacenamiento durable para el orquestador: implementaciones sobre el
//! sistema de archivos de `CheckpointStore` y `EventStore`.
//!
//! Módulos:
//! - `fs`: checkpoint de una línea (write-then-rename) y journal JSONL.
//! - `config`: carga de rutas desde el entorno / `.env`.
//! - `error`: errores de persistencia y su traducción al core.

pub mod config;
pub mod error;
pub mod fs;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use fs::{write_atomic, FileCheckpointStore, JsonlEventStore};
