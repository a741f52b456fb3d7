//! provflow
//!
//! Orquestador de instalación reanudable por checkpoint. Este crate reúne los
//! crates del workspace para usarlos como librería:
//! - `flow`: `FlowEngine`, `Checkpoint`, definición de steps y errores.
//! - `persistence`: checkpoint en archivo y journal JSONL.
//! - `adapters`: steps concretos (comandos, archivos, directorios) y planes JSON.
//!
//! El binario `provision` vive en `crates/prov-cli`.

use std::path::Path;

use thiserror::Error;

pub use prov_adapters as adapters;
pub use prov_core as flow;
pub use prov_persistence as persistence;

pub use prov_adapters::{load_plan, PlanFileError};
pub use prov_core::{Checkpoint, CoreEngineError, FlowDefinition, FlowEngine, RunReport, StepDefinition};
pub use prov_persistence::{FileCheckpointStore, JsonlEventStore, StoreConfig};

/// Engine sobre las stores de archivos.
pub type FileFlowEngine = FlowEngine<FileCheckpointStore, JsonlEventStore>;

#[derive(Debug, Error)]
pub enum PlanRunError {
    #[error(transparent)]
    Plan(#[from] PlanFileError),
    #[error(transparent)]
    Engine(#[from] CoreEngineError),
}

/// Engine con checkpoint y journal en las rutas de `cfg`.
pub fn file_engine(cfg: &StoreConfig, definition: FlowDefinition) -> FileFlowEngine {
    FlowEngine::with_definition(FileCheckpointStore::new(&cfg.checkpoint_path),
                                JsonlEventStore::new(&cfg.journal_path),
                                definition)
}

/// Carga `plan` y lo ejecuta hasta el final (o hasta el primer fallo).
pub fn run_plan(cfg: &StoreConfig, plan: &Path) -> Result<RunReport, PlanRunError> {
    let definition = load_plan(plan)?;
    Ok(file_engine(cfg, definition).run()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_plan_surfaces_as_plan_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = StoreConfig::in_dir(dir.path());
        let err = run_plan(&cfg, &dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PlanRunError::Plan(PlanFileError::Read { .. })));
        assert!(!cfg.checkpoint_path.exists());
    }
}
