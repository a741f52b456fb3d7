//! Planes declarativos en JSON.
//!
//! ```json
//! {
//!   "name": "preview-host",
//!   "steps": [
//!     { "type": "command", "id": "update_packages", "kind": "package",
//!       "program": "apt-get", "args": ["update"] },
//!     { "type": "command", "id": "create_preview_user", "kind": "account",
//!       "program": "useradd", "args": ["--create-home", "preview"],
//!       "skip_if": { "program": "id", "args": ["-u", "preview"] } },
//!     { "type": "ensure_dir", "id": "previews_dir", "path": "/var/www/previews", "mode": "0755" },
//!     { "type": "write_file", "id": "motd", "path": "/etc/motd", "contents": "preview host\n" }
//!   ]
//! }
//! ```
//!
//! El orden del arreglo `steps` es el orden de ejecución. Cambiarlo después de
//! un run parcial es responsabilidad del operador (ver `reset`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prov_core::{CoreEngineError, FlowDefinition, StepDefinition, StepKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::steps::{CommandSpec, CommandStep, EnsureDirStep, WriteFileStep};

#[derive(Debug, Error)]
pub enum PlanFileError {
    #[error("cannot read plan {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid plan JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step `{step}`: invalid mode {value:?} (expected octal such as \"0644\")")]
    InvalidMode { step: String, value: String },
    #[error(transparent)]
    Definition(#[from] CoreEngineError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepSpec {
    Command {
        id: String,
        #[serde(default)]
        kind: StepKind,
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        skip_if: Option<CommandSpec>,
        #[serde(default)]
        env: BTreeMap<String, String>,
        #[serde(default)]
        cwd: Option<PathBuf>,
    },
    WriteFile {
        id: String,
        #[serde(default)]
        kind: Option<StepKind>,
        path: PathBuf,
        contents: String,
        #[serde(default)]
        mode: Option<String>,
    },
    EnsureDir {
        id: String,
        path: PathBuf,
        #[serde(default)]
        mode: Option<String>,
    },
}

impl StepSpec {
    pub fn id(&self) -> &str {
        match self {
            Self::Command { id, .. } | Self::WriteFile { id, .. } | Self::EnsureDir { id, .. } => id,
        }
    }

    pub fn into_step(self) -> Result<Box<dyn StepDefinition>, PlanFileError> {
        Ok(match self {
               Self::Command { id,
                               kind,
                               program,
                               args,
                               skip_if,
                               env,
                               cwd, } => {
                   let mut step = CommandStep::new(id, CommandSpec { program, args }).with_kind(kind);
                   if let Some(guard) = skip_if {
                       step = step.skip_if(guard);
                   }
                   for (k, v) in env {
                       step = step.env(k, v);
                   }
                   if let Some(dir) = cwd {
                       step = step.current_dir(dir);
                   }
                   Box::new(step)
               }
               Self::WriteFile { id,
                                 kind,
                                 path,
                                 contents,
                                 mode, } => {
                   let mode = parse_mode(&id, mode.as_deref())?;
                   let mut step = WriteFileStep::new(id, path, contents);
                   if let Some(kind) = kind {
                       step = step.with_kind(kind);
                   }
                   if let Some(mode) = mode {
                       step = step.with_mode(mode);
                   }
                   Box::new(step)
               }
               Self::EnsureDir { id, path, mode } => {
                   let mode = parse_mode(&id, mode.as_deref())?;
                   let mut step = EnsureDirStep::new(id, path);
                   if let Some(mode) = mode {
                       step = step.with_mode(mode);
                   }
                   Box::new(step)
               }
           })
    }
}

/// Modo unix en octal ("0600", "600" o "0o600").
fn parse_mode(step: &str, raw: Option<&str>) -> Result<Option<u32>, PlanFileError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let digits = raw.trim().trim_start_matches("0o");
    u32::from_str_radix(digits, 8).ok()
                                  .filter(|m| *m <= 0o7777)
                                  .map(Some)
                                  .ok_or_else(|| PlanFileError::InvalidMode { step: step.to_string(),
                                                                              value: raw.to_string() })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<StepSpec>,
}

impl PlanFile {
    pub fn into_steps(self) -> Result<Vec<Box<dyn StepDefinition>>, PlanFileError> {
        self.steps.into_iter().map(StepSpec::into_step).collect()
    }

    /// Convierte el plan en una definición validada (no vacía, ids únicos).
    pub fn into_definition(self) -> Result<FlowDefinition, PlanFileError> {
        Ok(FlowDefinition::new(self.into_steps()?)?)
    }
}

pub fn parse_plan(json: &str) -> Result<PlanFile, PlanFileError> {
    Ok(serde_json::from_str(json)?)
}

/// Lee, parsea y valida un plan desde disco.
pub fn load_plan(path: &Path) -> Result<FlowDefinition, PlanFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PlanFileError::Read { path: path.to_path_buf(),
                                                                                   source })?;
    parse_plan(&raw)?.into_definition()
}
