use crate::command::CommandLine;
use crate::env::Environment;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Capability to replace the current process with a composed command line.
///
/// On success `replace` does not return: the process becomes the launched
/// program, keeping its pid, descriptors and environment. It therefore only
/// ever hands back the reason it failed.
pub trait ProcessReplacer {
    fn replace(&self, command: &CommandLine, env: &Environment) -> anyhow::Error;
}

/// Replaces the process through the platform's exec primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecReplacer;

impl ProcessReplacer for ExecReplacer {
    fn replace(&self, command: &CommandLine, env: &Environment) -> anyhow::Error {
        let err = exec(command);
        let program = Path::new(command.program());
        let search_paths = env.get_var("PATH").unwrap_or_default();
        match locate_interpreter(search_paths, program) {
            Some(found) => {
                anyhow::Error::new(err).context(format!("failed to execute {}", found.display()))
            }
            None => {
                anyhow::Error::new(err).context(format!("{} not found in PATH", program.display()))
            }
        }
    }
}

/// `execvp`: PATH lookup is done on our behalf and only returns on failure.
#[cfg(unix)]
fn exec(command: &CommandLine) -> std::io::Error {
    use std::os::unix::process::CommandExt;
    Command::new(command.program()).args(command.args()).exec()
}

/// No exec here, so run the interpreter as a child and exit with its status.
/// The launched program gets a new pid, but the caller sees the same exit code.
#[cfg(not(unix))]
fn exec(command: &CommandLine) -> std::io::Error {
    match Command::new(command.program()).args(command.args()).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => err,
    }
}

/// Where `execvp` would have looked for `program`, if it exists at all.
///
/// A name containing a separator is taken as a path as is; a bare name is
/// looked up in each directory of `search_paths`, first hit wins. Only used to
/// explain a failed exec, so existence is all that is checked.
pub fn locate_interpreter(search_paths: &OsStr, program: &Path) -> Option<PathBuf> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.components().nth(1).is_some() || program.is_absolute() {
        return program.exists().then(|| program.to_path_buf());
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.exists())
}
