use prov_core::{Checkpoint, CheckpointStore, InMemoryCheckpointStore};
use prov_persistence::FileCheckpointStore;

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileCheckpointStore::new(dir.path().join("checkpoint"));
    assert_eq!(store.read_current().expect("read"), None);
    assert!(!store.exists());
}

#[test]
fn written_value_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state").join("checkpoint");

    let mut writer = FileCheckpointStore::new(&path);
    writer.write_new("install_packages").expect("write");
    drop(writer);

    // Nueva instancia == nuevo proceso leyendo el mismo archivo.
    let reader = FileCheckpointStore::new(&path);
    let raw = reader.read_current().expect("read").expect("present");
    assert_eq!(raw, "install_packages\n");
    assert_eq!(Checkpoint::parse(&raw).unwrap(), Checkpoint::Step("install_packages".into()));
}

#[test]
fn clear_removes_file_and_returns_previous() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileCheckpointStore::new(dir.path().join("checkpoint"));
    store.write_new("complete").unwrap();

    assert_eq!(store.clear().unwrap().as_deref(), Some("complete\n"));
    assert!(!store.exists());
    assert_eq!(store.clear().unwrap(), None);
}

#[test]
fn discard_returns_the_same_value_as_the_in_memory_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut file = FileCheckpointStore::new(dir.path().join("checkpoint"));
    let mut memory = InMemoryCheckpointStore::new();
    file.write_new("b").unwrap();
    memory.write_new("b").unwrap();

    assert_eq!(file.discard().unwrap(), memory.discard().unwrap());
    assert_eq!(file.discard().unwrap(), None);
}

#[cfg(unix)]
#[test]
fn checkpoint_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileCheckpointStore::new(dir.path().join("checkpoint"));
    store.write_new("a").unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
