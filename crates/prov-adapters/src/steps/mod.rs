//! Steps concretos.

pub mod command;
pub mod ensure_dir;
pub mod write_file;

pub use command::{CommandSpec, CommandStep};
pub use ensure_dir::EnsureDirStep;
pub use write_file::WriteFileStep;

#[cfg(unix)]
pub(crate) fn set_mode(path: &std::path::Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &std::path::Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
