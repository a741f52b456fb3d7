//! prov-adapters: acciones concretas sobre el host.
//!
//! Este crate provee:
//! - Steps reutilizables: `CommandStep` (programa externo con guard de
//!   idempotencia), `WriteFileStep` y `EnsureDirStep`.
//! - El cargador de planes JSON que convierte una lista declarativa de steps
//!   en una `FlowDefinition` validada.
//!
//! Nota: el core sólo conoce `StepDefinition`; aquí viven los efectos
//! secundarios (procesos, archivos, permisos).

pub mod plan;
pub mod steps;

pub use plan::{load_plan, parse_plan, PlanFile, PlanFileError, StepSpec};
pub use steps::{CommandSpec, CommandStep, EnsureDirStep, WriteFileStep};
