//! Carga de configuración de almacenamiento desde variables de entorno.
//! Usa `PROVISION_STATE_DIR` y, opcionalmente, rutas explícitas para el
//! checkpoint y el journal.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_STATE_DIR: &str = "/var/lib/provision";
pub const CHECKPOINT_FILE_NAME: &str = "checkpoint";
pub const JOURNAL_FILE_NAME: &str = "journal.jsonl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub state_dir: PathBuf,
    pub checkpoint_path: PathBuf,
    pub journal_path: PathBuf,
}

impl StoreConfig {
    /// Configuración con rutas derivadas de `state_dir`.
    pub fn in_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self { checkpoint_path: state_dir.join(CHECKPOINT_FILE_NAME),
               journal_path: state_dir.join(JOURNAL_FILE_NAME),
               state_dir }
    }

    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let state_dir = lookup("PROVISION_STATE_DIR").filter(|v| !v.is_empty())
                                                     .unwrap_or_else(|| DEFAULT_STATE_DIR.to_string());
        let mut cfg = Self::in_dir(state_dir);
        if let Some(p) = lookup("PROVISION_CHECKPOINT_FILE").filter(|v| !v.is_empty()) {
            cfg.checkpoint_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("PROVISION_JOURNAL_FILE").filter(|v| !v.is_empty()) {
            cfg.journal_path = PathBuf::from(p);
        }
        cfg
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
