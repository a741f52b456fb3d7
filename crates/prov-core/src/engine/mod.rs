//! Engine module for FlowEngine implementation
//!
//! Provides the checkpointed orchestrator, its builder and the run report.

pub mod builder;
pub mod core;
mod report;

pub use builder::EngineBuilder;
pub use core::FlowEngine;
pub use report::RunReport;

pub use crate::checkpoint::{Checkpoint, CheckpointStore, InMemoryCheckpointStore};
pub use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use crate::repo::{FlowDefinition, FlowInstance};
pub use crate::step::{StepRunResult, StepStatus};
