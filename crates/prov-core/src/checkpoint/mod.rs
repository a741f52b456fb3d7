//! Checkpoint: valor persistido con el nombre del último step completado, y
//! el trait de almacenamiento que lo lee/escribe.

mod store;
mod value;

pub use store::{CheckpointStore, InMemoryCheckpointStore};
pub use value::Checkpoint;
