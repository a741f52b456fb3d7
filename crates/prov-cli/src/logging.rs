//! Subscriber de logs del binario.
//!
//! Las librerías emiten con `log`; el subscriber de `tracing-subscriber`
//! recoge esos registros (puente `tracing-log`) y los escribe en stderr para
//! no mezclarse con la salida de `status --json`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` tiene prioridad; si no está, `-v` sube el nivel a debug.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))
                                                  .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_writer(std::io::stderr)
                                                    .with_target(verbose)
                                                    .compact())
                                  .try_init()?;
    Ok(())
}
