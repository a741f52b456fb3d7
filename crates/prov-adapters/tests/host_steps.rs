//! Steps concretos ejecutados a través del engine.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;

use prov_adapters::{CommandSpec, CommandStep, EnsureDirStep, WriteFileStep};
use prov_core::{Checkpoint, CoreEngineError, FlowEngine, FlowEventKind, StepError};

#[test]
fn failing_command_stops_the_flow_with_its_exit_status() {
    let mut engine = FlowEngine::new().step(CommandStep::new("ok", CommandSpec::new("true", Vec::<String>::new())))
                                      .step(CommandStep::new("boom",
                                                             CommandSpec::new("sh", ["-c", "echo nope >&2; exit 3"])))
                                      .step(CommandStep::new("never", CommandSpec::new("true", Vec::<String>::new())))
                                      .build()
                                      .unwrap();

    let err = engine.run().expect_err("boom fails");
    match err {
        CoreEngineError::StepFailed { step_id, checkpoint, error } => {
            assert_eq!(step_id, "boom");
            assert_eq!(checkpoint, "ok");
            assert_eq!(error,
                       StepError::Command { program: "sh".into(),
                                            status: Some(3),
                                            stderr: "nope".into() });
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(engine.current_checkpoint().unwrap(), Checkpoint::Step("ok".into()));
}

#[test]
fn missing_program_is_an_io_failure() {
    let mut engine = FlowEngine::new().step(CommandStep::new("ghost",
                                                             CommandSpec::new("/nonexistent/provision-test-binary",
                                                                              Vec::<String>::new())))
                                      .build()
                                      .unwrap();
    let err = engine.run().unwrap_err();
    assert!(matches!(err, CoreEngineError::StepFailed { error: StepError::Io { .. }, .. }));
    assert_eq!(engine.current_checkpoint().unwrap(), Checkpoint::Start);
}

#[test]
fn satisfied_guard_skips_the_main_command() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let step = CommandStep::new("guarded",
                                CommandSpec::new("touch", [marker.display().to_string()])).skip_if(CommandSpec::new("true",
                                                                                                                    Vec::<String>::new()));
    let mut engine = FlowEngine::new().step(step).build().unwrap();

    engine.run().unwrap();

    assert!(!marker.exists());
    let events = engine.events().unwrap();
    assert!(events.iter()
                  .any(|e| matches!(&e.kind, FlowEventKind::StepSignal { signal, .. } if signal == "guard-satisfied")));
}

#[test]
fn unsatisfied_guard_runs_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let step = CommandStep::new("guarded",
                                CommandSpec::new("touch", [marker.display().to_string()])).skip_if(CommandSpec::new("false",
                                                                                                                    Vec::<String>::new()));
    let mut engine = FlowEngine::new().step(step).build().unwrap();
    engine.run().unwrap();
    assert!(marker.exists());
}

#[test]
fn command_env_and_cwd_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let step = CommandStep::new("env", CommandSpec::new("sh", ["-c", "printf %s \"$GREETING\" > out.txt"])).env("GREETING", "hola")
                                                                                                        .current_dir(dir.path());
    let mut engine = FlowEngine::new().step(step).build().unwrap();
    engine.run().unwrap();
    assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hola");
}

#[test]
fn write_file_and_ensure_dir_apply_modes() {
    let dir = tempfile::tempdir().unwrap();
    let conf_dir = dir.path().join("etc/app");
    let conf = conf_dir.join("app.conf");

    let mut engine = FlowEngine::new().step(EnsureDirStep::new("conf_dir", &conf_dir).with_mode(0o750))
                                      .step(WriteFileStep::new("conf", &conf, "key=value\n").with_mode(0o600))
                                      .build()
                                      .unwrap();
    engine.run().unwrap();

    assert_eq!(std::fs::read_to_string(&conf).unwrap(), "key=value\n");
    let dir_mode = std::fs::metadata(&conf_dir).unwrap().permissions().mode() & 0o7777;
    let file_mode = std::fs::metadata(&conf).unwrap().permissions().mode() & 0o7777;
    assert_eq!(dir_mode, 0o750);
    assert_eq!(file_mode, 0o600);
}

#[test]
fn rewriting_identical_contents_signals_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd");
    std::fs::write(&path, "hello\n").unwrap();

    let mut engine = FlowEngine::new().step(WriteFileStep::new("motd", &path, "hello\n")).build().unwrap();
    engine.run().unwrap();

    let events = engine.events().unwrap();
    assert!(events.iter()
                  .any(|e| matches!(&e.kind, FlowEventKind::StepSignal { signal, .. } if signal == "unchanged")));
}
