//! Core FlowEngine implementation

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::checkpoint::{Checkpoint, CheckpointStore, InMemoryCheckpointStore};
use crate::constants::{COMPLETE_SENTINEL, ENGINE_VERSION};
use crate::engine::{EngineBuilder, RunReport};
use crate::errors::CoreEngineError;
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::repo::{FlowDefinition, FlowInstance};
use crate::step::{StepContext, StepRunResult};

/// Orquestador de steps con checkpoint.
///
/// Ejecuta una secuencia fija de steps exactamente una vez cada uno a lo
/// largo de uno o varios runs. Tras cada step exitoso escribe el checkpoint
/// antes de avanzar; ante el primer fallo se detiene sin avanzarlo.
pub struct FlowEngine<C, E>
    where C: CheckpointStore,
          E: EventStore
{
    checkpoint_store: C,
    event_store: E,
    definition: FlowDefinition,
    run_id: Option<Uuid>,
}

impl FlowEngine<InMemoryCheckpointStore, InMemoryEventStore> {
    /// Crea un builder con stores en memoria
    #[inline]
    pub fn new() -> EngineBuilder<InMemoryCheckpointStore, InMemoryEventStore> {
        EngineBuilder::new(InMemoryCheckpointStore::new(), InMemoryEventStore::default())
    }
}

impl<C, E> FlowEngine<C, E>
    where C: CheckpointStore,
          E: EventStore
{
    /// Crea un nuevo builder para configurar el engine
    #[inline]
    pub fn builder(checkpoint_store: C, event_store: E) -> EngineBuilder<C, E> {
        EngineBuilder::new(checkpoint_store, event_store)
    }

    /// Crea un motor a partir de una definición ya validada.
    pub fn with_definition(checkpoint_store: C, event_store: E, definition: FlowDefinition) -> Self {
        Self { checkpoint_store,
               event_store,
               definition,
               run_id: None }
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn checkpoint_store(&self) -> &C {
        &self.checkpoint_store
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Devuelve las stores (p. ej. para simular un reinicio del proceso).
    pub fn into_stores(self) -> (C, E) {
        (self.checkpoint_store, self.event_store)
    }

    /// Checkpoint persistido. Sin almacenamiento equivale a `start`.
    pub fn current_checkpoint(&self) -> Result<Checkpoint, CoreEngineError> {
        let raw = self.checkpoint_store.read_current()?;
        Checkpoint::from_stored(raw.as_deref())
    }

    /// `true` si `name` está en o antes del checkpoint persistido.
    pub fn is_step_completed(&self, name: &str) -> Result<bool, CoreEngineError> {
        let checkpoint = self.current_checkpoint()?;
        self.definition.is_step_completed(&checkpoint, name)
    }

    /// Snapshot del estado del flow según el checkpoint.
    pub fn instance(&self) -> Result<FlowInstance, CoreEngineError> {
        let checkpoint = self.current_checkpoint()?;
        FlowInstance::from_checkpoint(&self.definition, &checkpoint)
    }

    /// Steps que ejecutaría un `run()` (dry-run).
    pub fn pending_steps(&self) -> Result<Vec<String>, CoreEngineError> {
        Ok(self.instance()?
               .pending()
               .map(|s| s.step_id.clone())
               .collect())
    }

    /// Ejecuta todos los steps pendientes hasta el checkpoint terminal.
    pub fn run(&mut self) -> Result<RunReport, CoreEngineError> {
        self.run_bounded(None)
    }

    /// Ejecuta los steps pendientes hasta `name` inclusive.
    pub fn run_until(&mut self, name: &str) -> Result<RunReport, CoreEngineError> {
        let stop = self.definition
                       .position(name)
                       .ok_or_else(|| CoreEngineError::UnknownStep(name.to_string()))?;
        self.run_bounded(Some(stop))
    }

    fn run_bounded(&mut self, stop_after: Option<usize>) -> Result<RunReport, CoreEngineError> {
        let run_id = Uuid::new_v4();
        self.run_id = Some(run_id);

        let checkpoint = self.current_checkpoint()?;
        let done = self.definition.completed_count(&checkpoint)?;

        self.event_store.append_kind(run_id,
                                     FlowEventKind::RunStarted { definition_hash: self.definition
                                                                                      .definition_hash
                                                                                      .clone(),
                                                                 step_count: self.definition.len(),
                                                                 checkpoint: checkpoint.to_string() });
        info!("run {run_id} started (engine {ENGINE_VERSION}): checkpoint `{checkpoint}`, {done}/{} steps done",
              self.definition.len());

        let mut report = RunReport::new(run_id, &checkpoint);
        if checkpoint.is_complete() {
            info!("flow already complete; nothing to do");
            report.already_complete = true;
            return Ok(report);
        }

        for idx in 0..done {
            let step_id = self.definition.steps[idx].id().to_string();
            debug!("skipping `{step_id}` (completed in a previous run)");
            self.event_store.append_kind(run_id,
                                         FlowEventKind::StepSkipped { step_index: idx,
                                                                      step_id: step_id.clone() });
            report.skipped.push(step_id);
        }

        let mut current = checkpoint;
        for idx in done..self.definition.len() {
            if stop_after.is_some_and(|stop| idx > stop) {
                break;
            }
            current = self.execute_step(run_id, idx, &current)?;
            report.executed.push(self.definition.steps[idx].id().to_string());
        }

        report.final_checkpoint = self.complete_if_exhausted(run_id, current)?;
        Ok(report)
    }

    /// Avanza un único step pendiente. Devuelve `FlowCompleted` si no queda
    /// ninguno.
    pub fn next(&mut self) -> Result<Checkpoint, CoreEngineError> {
        let run_id = *self.run_id.get_or_insert_with(Uuid::new_v4);
        let checkpoint = self.current_checkpoint()?;
        if checkpoint.is_complete() {
            return Err(CoreEngineError::FlowCompleted);
        }
        let done = self.definition.completed_count(&checkpoint)?;
        let current = if done < self.definition.len() {
            self.execute_step(run_id, done, &checkpoint)?
        } else {
            checkpoint
        };
        self.complete_if_exhausted(run_id, current)
    }

    /// Ejecuta el step `idx` y, si tiene éxito, escribe el checkpoint que lo
    /// nombra. Devuelve el nuevo checkpoint.
    fn execute_step(&mut self, run_id: Uuid, idx: usize, current: &Checkpoint) -> Result<Checkpoint, CoreEngineError> {
        let step_def = &self.definition.steps[idx];
        let step_id = step_def.id().to_string();

        self.event_store.append_kind(run_id,
                                     FlowEventKind::StepStarted { step_index: idx,
                                                                  step_id: step_id.clone() });
        info!("[{}/{}] running `{step_id}`", idx + 1, self.definition.len());

        let ctx = StepContext { run_id,
                                step_index: idx,
                                step_id: &step_id,
                                checkpoint: current,
                                definition: &self.definition };

        match step_def.run(&ctx) {
            StepRunResult::Success => {}
            StepRunResult::SuccessWithSignals { signals } => {
                for s in signals {
                    debug!("`{step_id}` signalled {}", s.signal);
                    self.event_store.append_kind(run_id,
                                                 FlowEventKind::StepSignal { step_index: idx,
                                                                             step_id: step_id.clone(),
                                                                             signal: s.signal,
                                                                             data: s.data });
                }
            }
            StepRunResult::Failure { error } => {
                error!("step `{step_id}` failed: {error}; checkpoint stays at `{current}`");
                self.event_store.append_kind(run_id,
                                             FlowEventKind::StepFailed { step_index: idx,
                                                                         step_id: step_id.clone(),
                                                                         error: error.clone(),
                                                                         checkpoint: current.to_string() });
                return Err(CoreEngineError::StepFailed { step_id,
                                                         checkpoint: current.to_string(),
                                                         error });
            }
        }

        let next = self.definition.checkpoint_for(idx);
        if let Err(e) = self.checkpoint_store.write_new(next.as_str()) {
            error!("step `{step_id}` succeeded but the checkpoint could not be written: {e}; \
                    it will run again on the next run");
            return Err(e.into());
        }
        self.event_store.append_kind(run_id,
                                     FlowEventKind::StepFinished { step_index: idx,
                                                                   step_id: step_id.clone(),
                                                                   checkpoint: next.to_string() });
        info!("`{step_id}` done, checkpoint advanced");
        Ok(next)
    }

    /// Escribe el checkpoint terminal si ya no quedan steps pendientes.
    fn complete_if_exhausted(&mut self, run_id: Uuid, checkpoint: Checkpoint) -> Result<Checkpoint, CoreEngineError> {
        if checkpoint.is_complete() || self.definition.completed_count(&checkpoint)? < self.definition.len() {
            return Ok(checkpoint);
        }
        self.checkpoint_store.write_new(COMPLETE_SENTINEL)?;
        self.event_store.append_kind(run_id,
                                     FlowEventKind::FlowCompleted { definition_hash: self.definition
                                                                                         .definition_hash
                                                                                         .clone() });
        info!("all {} steps complete", self.definition.len());
        Ok(Checkpoint::Complete)
    }

    /// Descarta el checkpoint (acción del operador). El siguiente run empieza
    /// desde el primer step.
    pub fn reset(&mut self) -> Result<Option<String>, CoreEngineError> {
        let run_id = *self.run_id.get_or_insert_with(Uuid::new_v4);
        let previous = self.checkpoint_store.discard()?;
        warn!("checkpoint reset (previous: {})", previous.as_deref().unwrap_or("<none>"));
        self.event_store.append_kind(run_id,
                                     FlowEventKind::CheckpointReset { previous: previous.clone() });
        Ok(previous)
    }

    /// Eventos del último run
    pub fn events(&self) -> Option<Vec<FlowEvent>> {
        self.run_id.map(|rid| self.event_store.list(rid))
    }

    /// Variante compacta de eventos del último run
    pub fn event_variants(&self) -> Option<Vec<&'static str>> {
        self.events().map(|events| {
                         events.iter()
                               .map(|e| match e.kind {
                                   FlowEventKind::RunStarted { .. } => "I",
                                   FlowEventKind::StepSkipped { .. } => "K",
                                   FlowEventKind::StepStarted { .. } => "S",
                                   FlowEventKind::StepSignal { .. } => "G",
                                   FlowEventKind::StepFinished { .. } => "F",
                                   FlowEventKind::StepFailed { .. } => "X",
                                   FlowEventKind::FlowCompleted { .. } => "C",
                                   FlowEventKind::CheckpointReset { .. } => "R",
                               })
                               .collect()
                     })
    }
}
