//! Argumentos de línea de comandos.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Ejecuta planes de aprovisionamiento reanudables.
#[derive(Debug, Parser)]
#[command(name = "provision", version, about)]
pub struct Cli {
    /// Archivo de checkpoint (por defecto `$PROVISION_STATE_DIR/checkpoint`).
    #[arg(long, global = true, value_name = "PATH")]
    pub checkpoint: Option<PathBuf>,

    /// Journal JSONL (por defecto `$PROVISION_STATE_DIR/journal.jsonl`).
    #[arg(long, global = true, value_name = "PATH")]
    pub journal: Option<PathBuf>,

    /// Logs de depuración (equivale a `RUST_LOG=debug`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ejecuta los steps pendientes del plan.
    Run(RunArgs),
    /// Muestra el estado de cada step según el checkpoint.
    Status(StatusArgs),
    /// Sale con 0 si el step ya está completado, 1 si no.
    Check(CheckArgs),
    /// Borra el checkpoint: el siguiente run empieza desde el primer step.
    Reset(ResetArgs),
}

#[derive(Debug, Args)]
pub struct PlanArg {
    /// Plan JSON con la lista ordenada de steps.
    #[arg(long, value_name = "FILE")]
    pub plan: PathBuf,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArg,

    /// Se detiene después de este step.
    #[arg(long, value_name = "STEP")]
    pub until: Option<String>,

    /// Lista los steps que se ejecutarían, sin ejecutarlos.
    #[arg(long)]
    pub dry_run: bool,

    /// Descarta el checkpoint antes de ejecutar.
    #[arg(long)]
    pub fresh: bool,

    /// No pide confirmación.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub plan: PlanArg,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub plan: PlanArg,

    pub step: String,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    #[arg(short = 'y', long)]
    pub yes: bool,
}
