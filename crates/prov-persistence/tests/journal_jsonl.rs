use prov_core::{EventStore, FlowEventKind};
use prov_persistence::JsonlEventStore;
use uuid::Uuid;

#[test]
fn events_are_appended_per_run_with_sequential_seq() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("journal.jsonl");
    let mut journal = JsonlEventStore::new(&path);
    let run_a = Uuid::new_v4();
    let run_b = Uuid::new_v4();

    let e0 = journal.append_kind(run_a, FlowEventKind::StepStarted { step_index: 0, step_id: "a".into() });
    let e1 = journal.append_kind(run_b, FlowEventKind::StepStarted { step_index: 0, step_id: "a".into() });
    let e2 = journal.append_kind(run_a, FlowEventKind::StepFinished { step_index: 0,
                                                                        step_id: "a".into(),
                                                                        checkpoint: "a".into() });
    assert_eq!((e0.seq, e1.seq, e2.seq), (0, 0, 1));

    let listed = journal.list(run_a);
    assert_eq!(listed, vec![e0, e2]);
    assert_eq!(journal.read_all().unwrap().len(), 3);

    // Cada proceso abre runs nuevos: la numeración empieza en 0 aunque el
    // archivo ya tenga eventos de otros runs.
    let mut reopened = JsonlEventStore::new(&path);
    let run_c = Uuid::new_v4();
    let e3 = reopened.append_kind(run_c, FlowEventKind::FlowCompleted { definition_hash: "h".into() });
    assert_eq!(e3.seq, 0);
    assert_eq!(reopened.last_event().unwrap(), Some(e3));
    assert_eq!(reopened.read_all().unwrap().len(), 4);
}

#[test]
fn appending_does_not_depend_on_reading_the_journal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("journal.jsonl");
    // Contenido previo que no es UTF-8: `read_all` falla, el append no.
    std::fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();
    let mut journal = JsonlEventStore::new(&path);
    let run = Uuid::new_v4();

    let e0 = journal.append_kind(run, FlowEventKind::CheckpointReset { previous: None });
    let e1 = journal.append_kind(run, FlowEventKind::CheckpointReset { previous: Some("a".into()) });

    assert_eq!((e0.seq, e1.seq), (0, 1));
    assert!(journal.read_all().is_err());
    assert!(std::fs::metadata(&path).unwrap().len() > 3);
}

#[test]
fn unreadable_lines_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("journal.jsonl");
    let mut journal = JsonlEventStore::new(&path);
    let run = Uuid::new_v4();
    journal.append_kind(run, FlowEventKind::CheckpointReset { previous: None });

    let mut raw = std::fs::read_to_string(&path).unwrap();
    raw.push_str("{not json\n\n");
    std::fs::write(&path, raw).unwrap();

    assert_eq!(journal.read_all().unwrap().len(), 1);
}

#[test]
fn missing_journal_lists_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = JsonlEventStore::new(dir.path().join("absent.jsonl"));
    assert!(journal.list(Uuid::new_v4()).is_empty());
    assert_eq!(journal.last_event().unwrap(), None);
}
