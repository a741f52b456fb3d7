//! Implementación de los subcomandos.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use prov_adapters::load_plan;
use prov_core::{CheckpointStore, CoreEngineError, EventStore, FlowEngine, FlowEventKind, FlowInstance, StepStatus};
use prov_persistence::{FileCheckpointStore, JsonlEventStore, StoreConfig};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::{CheckArgs, ResetArgs, RunArgs, StatusArgs};

type FileEngine = FlowEngine<FileCheckpointStore, JsonlEventStore>;

fn open_engine(cfg: &StoreConfig, plan: &Path) -> Result<FileEngine> {
    let definition = load_plan(plan).with_context(|| format!("loading plan {}", plan.display()))?;
    info!("plan {} loaded: {} steps (hash {})",
          plan.display(),
          definition.len(),
          definition.definition_hash.get(..12).unwrap_or(definition.definition_hash.as_str()));
    Ok(FlowEngine::with_definition(FileCheckpointStore::new(&cfg.checkpoint_path),
                                   JsonlEventStore::new(&cfg.journal_path),
                                   definition))
}

/// Pregunta `[y/N]` en stderr y lee una línea de `input`. EOF cuenta como no.
pub fn confirm(question: &str, mut input: impl BufRead) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush().ok();
    let mut answer = String::new();
    input.read_line(&mut answer).context("reading confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn confirmed(yes: bool, question: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    confirm(question, io::stdin().lock())
}

pub fn run(cfg: &StoreConfig, args: RunArgs) -> Result<ExitCode> {
    let mut engine = open_engine(cfg, &args.plan.plan)?;

    if let Some(step) = &args.until {
        if engine.definition().position(step).is_none() {
            return Err(CoreEngineError::UnknownStep(step.clone()).into());
        }
    }

    if args.dry_run {
        let checkpoint = engine.current_checkpoint()?;
        let pending = engine.pending_steps()?;
        println!("checkpoint: {checkpoint}");
        if pending.is_empty() {
            println!("nothing to do");
        }
        for step in &pending {
            println!("would run: {step}");
            if args.until.as_deref() == Some(step.as_str()) {
                break;
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    if args.fresh {
        let question = format!("Discard checkpoint {} and start from the first step?",
                               cfg.checkpoint_path.display());
        if !confirmed(args.yes, &question)? {
            bail!("aborted by operator; checkpoint left untouched");
        }
        engine.reset()?;
    }

    let report = match &args.until {
        Some(step) => engine.run_until(step)?,
        None => engine.run()?,
    };

    if report.already_complete {
        println!("already complete; nothing to do");
    } else {
        for step in &report.executed {
            println!("done: {step}");
        }
        println!("checkpoint: {}", report.final_checkpoint);
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct StatusView<'a> {
    checkpoint_file: &'a Path,
    journal_file: &'a Path,
    #[serde(flatten)]
    instance: &'a FlowInstance,
    last_event: Option<&'a str>,
}

pub fn status(cfg: &StoreConfig, args: StatusArgs) -> Result<ExitCode> {
    let engine = open_engine(cfg, &args.plan.plan)?;
    let mut instance = engine.instance()?;
    let last_event = match engine.event_store().last_event() {
        Ok(ev) => ev.map(|e| e.kind),
        Err(e) => {
            warn!("journal unreadable: {e}");
            None
        }
    };
    if let Some(FlowEventKind::StepFailed { step_id, .. }) = &last_event {
        instance.mark_failed(step_id);
    }

    if args.json {
        let view = StatusView { checkpoint_file: &cfg.checkpoint_path,
                                journal_file: &cfg.journal_path,
                                instance: &instance,
                                last_event: last_event.as_ref().map(FlowEventKind::variant_name) };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("checkpoint: {} ({})", instance.checkpoint, cfg.checkpoint_path.display());
    for slot in &instance.steps {
        let mark = match slot.status {
            StepStatus::FinishedOk => "x",
            StepStatus::Failed => "!",
            StepStatus::Pending => " ",
        };
        println!("[{mark}] {:>2}. {} ({})",
                 slot.index + 1,
                 slot.step_id,
                 format!("{:?}", slot.kind).to_lowercase());
    }
    if instance.completed {
        println!("all steps complete");
    } else {
        println!("{}/{} steps complete", instance.cursor, instance.steps.len());
    }
    if let Some(FlowEventKind::StepFailed { step_id, error, .. }) = &last_event {
        println!("last run failed at `{step_id}`: {error}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn check(cfg: &StoreConfig, args: CheckArgs) -> Result<ExitCode> {
    let engine = open_engine(cfg, &args.plan.plan)?;
    if engine.is_step_completed(&args.step)? {
        println!("{}: completed", args.step);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: not completed", args.step);
        Ok(ExitCode::from(1))
    }
}

pub fn reset(cfg: &StoreConfig, args: ResetArgs) -> Result<ExitCode> {
    let mut store = FileCheckpointStore::new(&cfg.checkpoint_path);
    let mut journal = JsonlEventStore::new(&cfg.journal_path);
    if !store.exists() {
        println!("no checkpoint at {}", cfg.checkpoint_path.display());
        return Ok(ExitCode::SUCCESS);
    }
    let question = format!("Delete checkpoint {}? The next run starts from the first step.",
                           cfg.checkpoint_path.display());
    if !confirmed(args.yes, &question)? {
        bail!("aborted by operator; checkpoint left untouched");
    }
    let previous = store.discard()?;
    journal.append_kind(Uuid::new_v4(),
                        FlowEventKind::CheckpointReset { previous: previous.clone() });
    println!("checkpoint removed (was: {})", previous.as_deref().unwrap_or("<none>"));
    Ok(ExitCode::SUCCESS)
}
