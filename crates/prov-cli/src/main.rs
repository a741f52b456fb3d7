//! `provision`: ejecuta un plan de steps con checkpoint, reanudando desde el
//! último step completado.

mod cli;
mod commands;
mod exit;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use prov_core::CoreEngineError;
use prov_persistence::StoreConfig;

use crate::cli::{Cli, Command};

fn store_config(cli: &Cli) -> StoreConfig {
    let mut cfg = StoreConfig::from_env();
    if let Some(path) = &cli.checkpoint {
        cfg.checkpoint_path = path.clone();
    }
    if let Some(path) = &cli.journal {
        cfg.journal_path = path.clone();
    }
    cfg
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    let cfg = store_config(&cli);
    let result = match cli.command {
        Command::Run(args) => commands::run(&cfg, args),
        Command::Status(args) => commands::status(&cfg, args),
        Command::Check(args) => commands::check(&cfg, args),
        Command::Reset(args) => commands::reset(&cfg, args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(CoreEngineError::StepFailed { checkpoint, .. }) = err.downcast_ref::<CoreEngineError>() {
                eprintln!("checkpoint stays at `{checkpoint}`; fix the problem and re-run to resume");
            }
            exit::exit_code_for(&err)
        }
    }
}
