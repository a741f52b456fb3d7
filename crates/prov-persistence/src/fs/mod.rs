//! Implementaciones sobre el sistema de archivos de los traits del core.
//!
//! - `FileCheckpointStore`: una línea de texto con el nombre del step,
//!   escrita con write-then-rename para que un crash nunca deje un checkpoint
//!   a medio escribir.
//! - `JsonlEventStore`: journal append-only, un `FlowEvent` JSON por línea.
//!   Un fallo de escritura del journal se registra con `error!` y no aborta el
//!   run; el checkpoint es el único estado que gobierna la reanudación.

mod atomic;
mod checkpoint;
mod journal;

pub use atomic::write_atomic;
pub use checkpoint::FileCheckpointStore;
pub use journal::JsonlEventStore;
