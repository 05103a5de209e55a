use std::ffi::OsString;

/// Location of the bootstrap script, fixed when the crate is built.
///
/// Set from `$VEE_SRC_BIN/_vee_bootstrap.py` by the build script, falling back to
/// the `bin` directory next to this crate's manifest.
pub const BOOTSTRAP_SCRIPT: &str = env!("VEE_BOOTSTRAP_SCRIPT");

/// Build-time configuration of a single entry point.
///
/// One binary, one flavor: the primary `vee` command prepends nothing, while
/// subcommand-flavored binaries such as `dev` prepend the subcommand name so the
/// shared bootstrap script knows which of them was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Script handed to the interpreter as its first argument.
    pub script: OsString,
    /// Literal arguments inserted between the script and the forwarded arguments.
    pub prepend: Vec<OsString>,
}

impl LaunchConfig {
    pub fn new<S, I, A>(script: S, prepend: I) -> Self
    where
        S: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            script: script.into(),
            prepend: prepend.into_iter().map(Into::into).collect(),
        }
    }

    /// Configuration of the primary `vee` command.
    pub fn primary() -> Self {
        Self::new(BOOTSTRAP_SCRIPT, Vec::<OsString>::new())
    }

    /// Configuration of a binary that stands for a `vee` subcommand, e.g. `dev`.
    pub fn subcommand<I, A>(prepend: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self::new(BOOTSTRAP_SCRIPT, prepend)
    }
}
