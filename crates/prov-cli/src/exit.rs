//! Códigos de salida.
//!
//! - 0: éxito.
//! - 1: step fallido, operación abortada o `check` no completado.
//! - 2: crítico. Checkpoint desconocido o corrupto, plan inválido o fallo del
//!   almacenamiento. Requiere intervención del operador antes de reintentar.

use std::process::ExitCode;

use prov_adapters::PlanFileError;
use prov_core::{CoreEngineError, StoreError};
use prov_persistence::PersistenceError;

pub const FAILURE: u8 = 1;
pub const CRITICAL: u8 = 2;

fn core_code(err: &CoreEngineError) -> u8 {
    if err.is_checkpoint_error() || err.is_definition_error() {
        CRITICAL
    } else {
        FAILURE
    }
}

/// Clasifica el error buscando la causa conocida más cercana en la cadena.
pub fn code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CoreEngineError>() {
            return core_code(e);
        }
        if let Some(e) = cause.downcast_ref::<PlanFileError>() {
            return match e {
                PlanFileError::Definition(core) => core_code(core),
                _ => CRITICAL,
            };
        }
        if cause.is::<StoreError>() || cause.is::<PersistenceError>() {
            return CRITICAL;
        }
    }
    FAILURE
}

pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(code_for(err))
}
