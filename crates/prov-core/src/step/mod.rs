//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de aprovisionamiento con efectos sobre el host
//! (instalar paquetes, crear usuarios, escribir configuración). Este módulo
//! define:
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `StepContext`: contexto entregado a `StepDefinition::run`.
//! - `StepRunResult` y señales (`StepSignal`).
//! - `FnStep` para declarar steps como datos (nombre + closure).

mod context;
pub mod definition;
mod fn_step;
mod run_result;
mod status;

pub use context::StepContext;
pub use definition::{StepDefinition, StepKind};
pub use fn_step::FnStep;
pub use run_result::{StepRunResult, StepSignal};
pub use status::StepStatus;
