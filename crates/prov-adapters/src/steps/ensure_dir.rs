//! EnsureDirStep: `create_dir_all` + modo opcional. Re-ejecutable.

use std::path::{Path, PathBuf};

use log::info;
use prov_core::{StepContext, StepDefinition, StepError, StepKind, StepRunResult};

use super::set_mode;

#[derive(Debug, Clone)]
pub struct EnsureDirStep {
    id: String,
    path: PathBuf,
    mode: Option<u32>,
}

impl EnsureDirStep {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { id: id.into(),
               path: path.into(),
               mode: None }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn apply(&self) -> Result<(), StepError> {
        std::fs::create_dir_all(&self.path).map_err(|e| StepError::io(format!("creating {}", self.path.display()), &e))?;
        if let Some(mode) = self.mode {
            set_mode(&self.path, mode).map_err(|e| StepError::io(format!("setting mode on {}", self.path.display()), &e))?;
        }
        Ok(())
    }
}

impl StepDefinition for EnsureDirStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StepKind {
        StepKind::Filesystem
    }

    fn run(&self, _ctx: &StepContext<'_>) -> StepRunResult {
        let res = self.apply();
        if res.is_ok() {
            info!("`{}`: {} present", self.id, self.path.display());
        }
        res.into()
    }
}
