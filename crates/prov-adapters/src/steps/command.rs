//! CommandStep
//!
//! - Ejecuta un programa externo (gestor de paquetes, gestor de servicios,
//!   cliente de certificados...) y falla si el código de salida no es 0.
//! - `skip_if`: comando guard opcional. Si termina con 0, el efecto ya está
//!   presente y el step termina con éxito sin ejecutar el comando principal
//!   (señal `guard-satisfied`).
//! - No se pasa por un shell: `program` y `args` llegan tal cual a `exec`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use log::{debug, info};
use prov_core::{StepContext, StepDefinition, StepError, StepKind, StepRunResult, StepSignal};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Máximo de bytes de stderr que se conservan en el error.
const STDERR_TAIL_BYTES: usize = 2048;

/// Programa + argumentos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { program: program.into(),
               args: args.into_iter().map(Into::into).collect() }
    }

    /// Forma legible para logs y mensajes.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
                                              .collect::<Vec<_>>()
                                              .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct CommandStep {
    id: String,
    kind: StepKind,
    command: CommandSpec,
    skip_if: Option<CommandSpec>,
    env: BTreeMap<String, String>,
    current_dir: Option<PathBuf>,
}

impl CommandStep {
    pub fn new(id: impl Into<String>, command: CommandSpec) -> Self {
        Self { id: id.into(),
               kind: StepKind::Generic,
               command,
               skip_if: None,
               env: BTreeMap::new(),
               current_dir: None }
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn skip_if(mut self, guard: CommandSpec) -> Self {
        self.skip_if = Some(guard);
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).envs(&self.env).stdin(Stdio::null());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn output_of(&self, spec: &CommandSpec) -> Result<Output, StepError> {
        self.build(spec)
            .output()
            .map_err(|e| StepError::io(format!("spawning `{}`", spec.display()), &e))
    }

    fn guard_satisfied(&self) -> Result<Option<String>, StepError> {
        let Some(guard) = &self.skip_if else {
            return Ok(None);
        };
        let out = self.output_of(guard)?;
        debug!("guard `{}` exited with {:?}", guard.display(), out.status.code());
        Ok(out.status.success().then(|| guard.display()))
    }
}

fn stderr_tail(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.len() <= STDERR_TAIL_BYTES {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}

impl StepDefinition for CommandStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StepKind {
        self.kind
    }

    fn run(&self, _ctx: &StepContext<'_>) -> StepRunResult {
        match self.guard_satisfied() {
            Ok(Some(guard)) => {
                info!("`{}`: guard `{guard}` already satisfied, skipping command", self.id);
                return StepRunResult::SuccessWithSignals { signals: vec![StepSignal::new("guard-satisfied",
                                                                                         json!({ "guard": guard }))] };
            }
            Ok(None) => {}
            Err(error) => return StepRunResult::failure(error),
        }

        info!("`{}`: {}", self.id, self.command.display());
        let out = match self.output_of(&self.command) {
            Ok(out) => out,
            Err(error) => return StepRunResult::failure(error),
        };
        if out.status.success() {
            debug!("`{}` stdout: {}", self.id, String::from_utf8_lossy(&out.stdout).trim());
            StepRunResult::Success
        } else {
            StepRunResult::failure(StepError::Command { program: self.command.program.clone(),
                                                        status: out.status.code(),
                                                        stderr: stderr_tail(&out.stderr) })
        }
    }
}
