use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use prov_core::{CheckpointStore, StoreError};

use super::atomic::write_atomic;
use crate::error::PersistenceError;

/// Checkpoint en un archivo de una línea. La ausencia del archivo equivale a
/// `start`. Se escribe con permisos 0600.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn read_current(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no checkpoint at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(PersistenceError::io(format!("reading checkpoint {}", self.path.display()), e).into()),
        }
    }

    fn write_new(&mut self, value: &str) -> Result<(), StoreError> {
        write_atomic(&self.path, format!("{value}\n").as_bytes(), Some(0o600))?;
        debug!("checkpoint -> {value}");
        Ok(())
    }

    fn clear(&mut self) -> Result<Option<String>, StoreError> {
        let previous = self.read_current()?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("removed checkpoint {}", self.path.display());
                Ok(previous)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(format!("removing checkpoint {}", self.path.display()), e).into()),
        }
    }
}
