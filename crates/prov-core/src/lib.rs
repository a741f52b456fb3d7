//! prov-core: orquestador lineal de steps con checkpoint reanudable.
//!
//! Un `FlowEngine` ejecuta una secuencia fija de steps de aprovisionamiento,
//! persiste tras cada éxito el nombre del último step completado y, en un
//! run posterior, salta los ya completados y reanuda en el primero pendiente.
pub mod checkpoint;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod repo;
pub mod step;

pub use checkpoint::{Checkpoint, CheckpointStore, InMemoryCheckpointStore};
pub use engine::{EngineBuilder, FlowEngine, RunReport};
pub use errors::{CoreEngineError, StepError, StoreError};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use repo::{build_flow_definition, FlowDefinition, FlowInstance, StepSlot};
pub use step::{FnStep, StepContext, StepDefinition, StepKind, StepRunResult, StepSignal, StepStatus};
