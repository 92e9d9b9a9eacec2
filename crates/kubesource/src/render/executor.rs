use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs external commands and resolves binaries on `PATH`.
pub trait CommandExecutor {
    fn exec(&self, program: &str, args: &[&OsStr]) -> std::io::Result<Output>;

    fn look_path(&self, program: &str) -> Option<PathBuf>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn exec(&self, program: &str, args: &[&OsStr]) -> std::io::Result<Output> {
        (**self).exec(program, args)
    }

    fn look_path(&self, program: &str) -> Option<PathBuf> {
        (**self).look_path(program)
    }
}

/// Executor backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn exec(&self, program: &str, args: &[&OsStr]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }

    fn look_path(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }

        let paths = std::env::var_os("PATH")?;
        std::env::split_paths(&paths)
            .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
            .find(|path| is_executable(path))
    }
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".cmd", ".bat"]
        .into_iter()
        .map(move |ext| format!("{}{}", program, ext))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
