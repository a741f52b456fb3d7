//! El binario `provision` de punta a punta: salida, códigos de salida y
//! reanudación sobre archivos temporales.
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn checkpoint(&self) -> PathBuf {
        self.path("state/checkpoint")
    }

    /// Plan a, b, c donde `b` sólo pasa si existe el archivo `gate`.
    fn gated_plan(&self) -> PathBuf {
        let plan = format!(r#"{{ "steps": [
                {{ "type": "command", "id": "a", "program": "true" }},
                {{ "type": "command", "id": "b", "program": "test", "args": ["-e", "{gate}"] }},
                {{ "type": "command", "id": "c", "program": "true" }}
            ] }}"#,
                           gate = self.path("gate").display());
        let path = self.path("plan.json");
        std::fs::write(&path, plan).unwrap();
        path
    }

    fn provision(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_provision")).args(["--checkpoint",
                                                            self.checkpoint().to_str().unwrap(),
                                                            "--journal",
                                                            self.path("state/journal.jsonl").to_str().unwrap()])
                                                     .args(args)
                                                     .env_remove("RUST_LOG")
                                                     .stdin(Stdio::null())
                                                     .output()
                                                     .expect("spawn provision")
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn plan_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn failure_then_resume_then_noop() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();

    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(fx.checkpoint()).unwrap(), "a\n");

    let out = fx.provision(&["check", "--plan", plan_arg(&plan), "a"]);
    assert_eq!(out.status.code(), Some(0));
    let out = fx.provision(&["check", "--plan", plan_arg(&plan), "b"]);
    assert_eq!(out.status.code(), Some(1));

    std::fs::write(fx.path("gate"), "").unwrap();
    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("done: b"));
    assert!(!stdout(&out).contains("done: a"));
    assert_eq!(std::fs::read_to_string(fx.checkpoint()).unwrap(), "complete\n");

    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("already complete"));
}

#[test]
fn unknown_checkpoint_is_critical() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();
    std::fs::create_dir_all(fx.path("state")).unwrap();
    std::fs::write(fx.checkpoint(), "b_old\n").unwrap();

    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("b_old"));
    assert_eq!(std::fs::read_to_string(fx.checkpoint()).unwrap(), "b_old\n");
}

#[test]
fn empty_plan_is_critical() {
    let fx = Fixture::new();
    let plan = fx.path("empty.json");
    std::fs::write(&plan, r#"{ "steps": [] }"#).unwrap();
    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!fx.checkpoint().exists());
}

#[test]
fn status_json_reports_progress() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();
    fx.provision(&["run", "--plan", plan_arg(&plan)]);

    let out = fx.provision(&["status", "--plan", plan_arg(&plan), "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json on stdout");
    assert_eq!(v["checkpoint"], "a");
    assert_eq!(v["cursor"], 1);
    assert_eq!(v["completed"], false);
    assert_eq!(v["steps"][0]["status"], "finished_ok");
    assert_eq!(v["steps"][1]["status"], "failed");
    assert_eq!(v["steps"][2]["status"], "pending");
    assert_eq!(v["last_event"], "stepfailed");
}

#[test]
fn unreadable_checkpoint_storage_is_critical() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();
    std::fs::create_dir_all(fx.checkpoint()).unwrap();
    std::fs::write(fx.path("gate"), "").unwrap();

    let out = fx.provision(&["run", "--plan", plan_arg(&plan)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!stdout(&out).contains("done:"));
    assert!(fx.checkpoint().is_dir());
}

#[test]
fn dry_run_lists_pending_without_executing() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();
    let out = fx.provision(&["run", "--plan", plan_arg(&plan), "--dry-run", "--until", "b"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("would run: a"));
    assert!(text.contains("would run: b"));
    assert!(!text.contains("would run: c"));
    assert!(!fx.checkpoint().exists());
}

#[test]
fn reset_without_confirmation_keeps_the_checkpoint() {
    let fx = Fixture::new();
    let plan = fx.gated_plan();
    fx.provision(&["run", "--plan", plan_arg(&plan)]);

    let out = fx.provision(&["reset"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(fx.checkpoint().exists());

    let out = fx.provision(&["reset", "--yes"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(!fx.checkpoint().exists());
}
