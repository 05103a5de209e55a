use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use tracing::debug;

/// Overrides the interpreter used to run the bootstrap script.
pub const PYTHON_VAR: &str = "VEE_PYTHON";
/// When present (with any value), skip the exec and only print the command line.
pub const NO_EXEC_VAR: &str = "VEE_BOOTSTRAP_NOEXEC";
/// Interpreter used when [`PYTHON_VAR`] is unset or empty.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Read-only view of the process environment, as seen by the launcher.
///
/// The variables are captured once; the launcher never writes to them and
/// the launched process inherits the real environment untouched.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<OsString, OsString>,
}

impl Environment {
    /// Capture the variables of the current process.
    pub fn new() -> Self {
        Self::from_vars(stdenv::vars_os())
    }

    /// Build an environment from an explicit table of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get the value of an environment variable.
    pub fn get_var(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// Interpreter to launch: `$VEE_PYTHON` if it is non-empty, `python` otherwise.
    ///
    /// Nothing checks that the value names an executable; that only shows up
    /// when the exec is attempted.
    pub fn resolve_interpreter(&self) -> OsString {
        match self.get_var(PYTHON_VAR) {
            Some(python) if !python.is_empty() => {
                debug!(interpreter = ?python, "using VEE_PYTHON override");
                python.to_owned()
            }
            _ => OsString::from(DEFAULT_INTERPRETER),
        }
    }

    /// True iff `$VEE_BOOTSTRAP_NOEXEC` is present. The value is ignored, even when empty.
    pub fn is_no_exec_set(&self) -> bool {
        self.get_var(NO_EXEC_VAR).is_some()
    }
}
