//! WriteFileStep
//!
//! Escribe un archivo de configuración o credenciales de forma atómica. Si el
//! contenido actual ya coincide, no reescribe (señal `unchanged`) pero sí
//! reaplica el modo pedido.

use std::path::{Path, PathBuf};

use log::info;
use prov_core::{StepContext, StepDefinition, StepError, StepKind, StepRunResult, StepSignal};
use prov_persistence::write_atomic;
use serde_json::json;

use super::set_mode;

#[derive(Debug, Clone)]
pub struct WriteFileStep {
    id: String,
    kind: StepKind,
    path: PathBuf,
    contents: Vec<u8>,
    mode: Option<u32>,
}

impl WriteFileStep {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self { id: id.into(),
               kind: StepKind::Filesystem,
               path: path.into(),
               contents: contents.into(),
               mode: None }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn apply(&self) -> Result<bool, StepError> {
        let unchanged = std::fs::read(&self.path).map(|current| current == self.contents)
                                                 .unwrap_or(false);
        if unchanged {
            if let Some(mode) = self.mode {
                set_mode(&self.path, mode).map_err(|e| StepError::io(format!("setting mode on {}", self.path.display()), &e))?;
            }
            return Ok(false);
        }
        write_atomic(&self.path, &self.contents, self.mode).map_err(|e| StepError::Io { context: format!("writing {}",
                                                                                                          self.path.display()),
                                                                                         message: e.to_string() })?;
        Ok(true)
    }
}

impl StepDefinition for WriteFileStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StepKind {
        self.kind
    }

    fn run(&self, _ctx: &StepContext<'_>) -> StepRunResult {
        match self.apply() {
            Ok(true) => {
                info!("`{}`: wrote {}", self.id, self.path.display());
                StepRunResult::Success
            }
            Ok(false) => StepRunResult::SuccessWithSignals { signals: vec![StepSignal::new("unchanged",
                                                                                           json!({ "path": self.path.display().to_string() }))] },
            Err(error) => StepRunResult::failure(error),
        }
    }
}
