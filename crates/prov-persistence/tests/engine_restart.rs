//! Reanudación entre procesos usando las stores de archivos.
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use prov_core::{Checkpoint, CoreEngineError, FlowEngine, FlowEventKind, FnStep, StepError, StepRunResult};
use prov_persistence::{FileCheckpointStore, JsonlEventStore, StoreConfig};

struct Counters {
    a: Rc<Cell<u32>>,
    b: Rc<Cell<u32>>,
    c: Rc<Cell<u32>>,
}

impl Counters {
    fn new() -> Self {
        Self { a: Rc::default(),
               b: Rc::default(),
               c: Rc::default() }
    }
}

fn engine(cfg: &StoreConfig, counters: &Counters, fail_b: bool) -> FlowEngine<FileCheckpointStore, JsonlEventStore> {
    let (a, b, c) = (Rc::clone(&counters.a), Rc::clone(&counters.b), Rc::clone(&counters.c));
    FlowEngine::builder(FileCheckpointStore::new(&cfg.checkpoint_path),
                        JsonlEventStore::new(&cfg.journal_path)).step(FnStep::new("a", move |_| {
                                                                    a.set(a.get() + 1);
                                                                    StepRunResult::Success
                                                                }))
                                                                .step(FnStep::new("b", move |_| {
                                                                    b.set(b.get() + 1);
                                                                    if fail_b {
                                                                        StepRunResult::failure(StepError::msg("disk full"))
                                                                    } else {
                                                                        StepRunResult::Success
                                                                    }
                                                                }))
                                                                .step(FnStep::new("c", move |_| {
                                                                    c.set(c.get() + 1);
                                                                    StepRunResult::Success
                                                                }))
                                                                .build()
                                                                .expect("valid definition")
}

fn read_checkpoint(path: &Path) -> String {
    std::fs::read_to_string(path).expect("checkpoint file")
}

#[test]
fn failed_run_resumes_in_a_new_process() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = StoreConfig::in_dir(dir.path());
    let counters = Counters::new();

    let err = engine(&cfg, &counters, true).run().expect_err("b fails");
    assert!(matches!(err, CoreEngineError::StepFailed { ref step_id, ref checkpoint, .. } if step_id == "b" && checkpoint == "a"));
    assert_eq!(read_checkpoint(&cfg.checkpoint_path), "a\n");

    let mut second = engine(&cfg, &counters, false);
    let report = second.run().expect("second run");
    assert_eq!(report.executed, vec!["b", "c"]);
    assert_eq!(report.final_checkpoint, Checkpoint::Complete);
    assert_eq!((counters.a.get(), counters.b.get(), counters.c.get()), (1, 2, 1));
    assert_eq!(read_checkpoint(&cfg.checkpoint_path), "complete\n");

    let journal = JsonlEventStore::new(&cfg.journal_path);
    let all = journal.read_all().unwrap();
    assert!(all.iter().any(|e| matches!(&e.kind, FlowEventKind::StepFailed { step_id, .. } if step_id == "b")));
    assert!(matches!(all.last().map(|e| &e.kind), Some(FlowEventKind::FlowCompleted { .. })));

    // Tercer proceso: no-op.
    let report = engine(&cfg, &counters, false).run().expect("third run");
    assert!(report.already_complete);
    assert_eq!((counters.a.get(), counters.b.get(), counters.c.get()), (1, 2, 1));
}

#[test]
fn stale_checkpoint_from_an_edited_plan_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = StoreConfig::in_dir(dir.path());
    std::fs::write(&cfg.checkpoint_path, "b_old\n").unwrap();
    let counters = Counters::new();

    let err = engine(&cfg, &counters, false).run().expect_err("unknown checkpoint");
    assert!(matches!(err, CoreEngineError::UnknownCheckpoint(ref n) if n == "b_old"));
    assert_eq!(counters.a.get(), 0);
    assert_eq!(read_checkpoint(&cfg.checkpoint_path), "b_old\n");
}
