use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{error, warn};
use prov_core::{EventStore, FlowEvent, FlowEventKind};
use uuid::Uuid;

use crate::error::PersistenceError;

/// Journal JSONL append-only.
///
/// `seq` se asigna por run en memoria: el primer evento de un `run_id` recibe
/// 0 (los `run_id` son UUID v4 nuevos, nunca presentes en el archivo). Append
/// no lee el archivo. Las líneas ilegibles se ignoran al leer (con `warn!`).
#[derive(Debug)]
pub struct JsonlEventStore {
    path: PathBuf,
    next_seq: HashMap<Uuid, u64>,
}

impl JsonlEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(),
               next_seq: HashMap::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, event: &FlowEvent) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(format!("creating {}", parent.display()), e))?;
        }
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = OpenOptions::new().create(true)
                                         .append(true)
                                         .open(&self.path)
                                         .map_err(|e| PersistenceError::io(format!("opening journal {}", self.path.display()), e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| PersistenceError::io(format!("appending to journal {}", self.path.display()), e))
    }

    /// Todos los eventos del journal, en orden de escritura.
    pub fn read_all(&self) -> Result<Vec<FlowEvent>, PersistenceError> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(format!("opening journal {}", self.path.display()), e)),
        };
        let mut events = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PersistenceError::io(format!("reading journal {}", self.path.display()), e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FlowEvent>(&line) {
                Ok(ev) => events.push(ev),
                Err(e) => warn!("skipping unreadable journal line {} in {}: {e}", lineno + 1, self.path.display()),
            }
        }
        Ok(events)
    }

    /// Último evento registrado (de cualquier run).
    pub fn last_event(&self) -> Result<Option<FlowEvent>, PersistenceError> {
        Ok(self.read_all()?.pop())
    }
}

impl EventStore for JsonlEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: FlowEventKind) -> FlowEvent {
        let next = self.next_seq.entry(run_id).or_insert(0);
        let seq = *next;
        *next += 1;
        let ev = FlowEvent { seq,
                             run_id,
                             kind,
                             ts: Utc::now() };
        if let Err(e) = self.append_line(&ev) {
            error!("journal write failed for {} ({}): {e}", ev.kind.variant_name(), self.path.display());
        }
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<FlowEvent> {
        match self.read_all() {
            Ok(events) => events.into_iter().filter(|e| e.run_id == run_id).collect(),
            Err(e) => {
                error!("journal read failed: {e}");
                Vec::new()
            }
        }
    }
}
