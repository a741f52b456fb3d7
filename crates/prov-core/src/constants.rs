//! Constantes del motor core.
//!
//! Los sentinelas delimitan la secuencia de steps: `start` (nada completado
//! todavía) y `complete` (todos los steps completados). Ningún step puede
//! usar estos nombres.

/// Sentinela inicial: ningún step se ha completado.
pub const START_SENTINEL: &str = "start";

/// Sentinela terminal: todos los steps se completaron. Estado absorbente.
pub const COMPLETE_SENTINEL: &str = "complete";

/// Nombres reservados que un step no puede usar como id.
pub const RESERVED_STEP_NAMES: &[&str] = &[START_SENTINEL, COMPLETE_SENTINEL];

/// Versión lógica del motor. Se registra en el journal al inicio de cada run.
pub const ENGINE_VERSION: &str = "P1.0";
