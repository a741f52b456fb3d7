use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::PersistenceError;

/// Modo para archivos nuevos escritos sin modo explícito.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

#[cfg(unix)]
fn set_mode(file: &File, path: &Path, mode: u32) -> Result<(), PersistenceError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| PersistenceError::io(format!("setting mode on {}", path.display()), e))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _path: &Path, _mode: u32) -> Result<(), PersistenceError> {
    Ok(())
}

/// Modo final: el pedido, el del destino existente o `DEFAULT_FILE_MODE`.
#[cfg(unix)]
fn effective_mode(path: &Path, mode: Option<u32>) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    mode.unwrap_or_else(|| {
            fs::symlink_metadata(path).ok()
                                      .filter(|m| m.is_file())
                                      .map(|m| m.permissions().mode() & 0o7777)
                                      .unwrap_or(DEFAULT_FILE_MODE)
        })
}

#[cfg(not(unix))]
fn effective_mode(_path: &Path, mode: Option<u32>) -> u32 {
    mode.unwrap_or(DEFAULT_FILE_MODE)
}

// fsync del directorio para que el rename sobreviva a un reinicio.
#[cfg(unix)]
fn sync_parent_dir(parent: &Path) {
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) {}

/// Escribe `contents` en `path` de forma atómica.
///
/// El temporal se crea junto al destino con `NamedTempFile` (nombre aleatorio,
/// `O_EXCL`, 0600), así que el contenido nunca es legible por otros antes de
/// aplicar el modo final. Luego `fsync`, modo y `persist` (rename) sobre el
/// destino. Un symlink en `path` se reemplaza, no se sigue.
pub fn write_atomic(path: &Path, contents: &[u8], mode: Option<u32>) -> Result<(), PersistenceError> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(format!("creating {}", parent.display()), e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| PersistenceError::io(format!("creating temporary file in {}",
                                                                                            parent.display()),
                                                                                    e))?;
    tmp.write_all(contents)
       .map_err(|e| PersistenceError::io(format!("writing {}", tmp.path().display()), e))?;
    tmp.as_file()
       .sync_all()
       .map_err(|e| PersistenceError::io(format!("syncing {}", tmp.path().display()), e))?;
    set_mode(tmp.as_file(), tmp.path(), effective_mode(path, mode))?;

    tmp.persist(path)
       .map_err(|e| PersistenceError::io(format!("renaming temporary file onto {}", path.display()), e.error))?;

    sync_parent_dir(parent);

    debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
