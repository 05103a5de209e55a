use crate::command::{CommandLine, ExitCode, FAILURE_EXIT_CODE};
use crate::config::LaunchConfig;
use crate::env::Environment;
use crate::external::{ExecReplacer, ProcessReplacer};
use std::ffi::OsString;
use std::io::Write;
use tracing::debug;

/// Why the launcher is still running after composing its command line.
#[derive(Debug)]
pub enum Fallback {
    /// `VEE_BOOTSTRAP_NOEXEC` is set; no exec was attempted.
    NoExec,
    /// The exec was attempted and failed.
    Failed(anyhow::Error),
}

impl Fallback {
    /// Label printed in front of the composed command line.
    pub fn label(&self) -> &'static str {
        match self {
            Fallback::NoExec => "VEE bootstrap skipped: ",
            Fallback::Failed(_) => "ERROR during VEE bootstrap: ",
        }
    }
}

/// Turns the launcher's own invocation into an invocation of the bootstrap script.
///
/// The sequence is resolve, compose, then either replace the process or fall
/// back to printing what would have been run.
///
/// Example
/// ```
/// use std::ffi::OsString;
/// use vee_bootstrap::{env::Environment, external::ExecReplacer, LaunchConfig, Launcher};
///
/// let env = Environment::from_vars([("VEE_BOOTSTRAP_NOEXEC", "")]);
/// let launcher = Launcher::new(LaunchConfig::new("boot.py", ["dev"]), env, ExecReplacer);
/// let mut stderr = Vec::new();
/// let code = launcher.run(["dev", "build"].map(OsString::from), &mut stderr);
///
/// assert_ne!(code, 0);
/// assert_eq!(stderr, b"VEE bootstrap skipped: python boot.py dev build\n");
/// ```
pub struct Launcher {
    config: LaunchConfig,
    env: Environment,
    replacer: Box<dyn ProcessReplacer>,
}

impl Launcher {
    pub fn new(
        config: LaunchConfig,
        env: Environment,
        replacer: impl ProcessReplacer + 'static,
    ) -> Self {
        Self {
            config,
            env,
            replacer: Box::new(replacer),
        }
    }

    /// Launcher for a real entry point: live environment, real exec.
    pub fn from_process(config: LaunchConfig) -> Self {
        Self::new(config, Environment::new(), ExecReplacer)
    }

    /// Build the command line for `original` (the launcher's own arguments,
    /// program name first).
    pub fn compose<I>(&self, original: I) -> CommandLine
    where
        I: IntoIterator<Item = OsString>,
    {
        let interpreter = self.env.resolve_interpreter();
        debug!(interpreter = ?interpreter, "resolved");
        let command = CommandLine::compose(interpreter, &self.config, original);
        debug!(argv = ?command.as_slice(), "composed");
        command
    }

    /// Replace the current process with the composed command line.
    ///
    /// Only returns when the launcher must fall back, either because
    /// `VEE_BOOTSTRAP_NOEXEC` is set or because the exec failed.
    pub fn launch(&self, command: &CommandLine) -> Fallback {
        if self.env.is_no_exec_set() {
            debug!("VEE_BOOTSTRAP_NOEXEC is set; not replacing the process");
            return Fallback::NoExec;
        }
        let err = self.replacer.replace(command, &self.env);
        debug!("process replacement failed: {err:#}");
        Fallback::Failed(err)
    }

    /// Run the whole sequence. Returns the exit code to use if the process
    /// was not replaced, after printing the composed command line to `diagnostics`.
    pub fn run<I>(&self, original: I, diagnostics: &mut dyn Write) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let command = self.compose(original);
        let fallback = self.launch(&command);
        // Nothing left to report to if stderr itself is broken.
        let _ = command.write_diagnostic(fallback.label(), diagnostics);
        FAILURE_EXIT_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{NO_EXEC_VAR, PYTHON_VAR};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Records every command it is asked to exec, then fails like a missing binary.
    struct RecordingReplacer {
        calls: Rc<RefCell<Vec<Vec<OsString>>>>,
    }

    impl RecordingReplacer {
        fn with_handle() -> (Self, Rc<RefCell<Vec<Vec<OsString>>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let replacer = Self {
                calls: Rc::clone(&calls),
            };
            (replacer, calls)
        }
    }

    impl ProcessReplacer for RecordingReplacer {
        fn replace(&self, command: &CommandLine, _env: &Environment) -> anyhow::Error {
            self.calls.borrow_mut().push(command.as_slice().to_vec());
            anyhow::Error::new(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn launcher(
        prepend: &[&str],
        vars: &[(&str, &str)],
    ) -> (Launcher, Rc<RefCell<Vec<Vec<OsString>>>>) {
        let (replacer, calls) = RecordingReplacer::with_handle();
        let launcher = Launcher::new(
            LaunchConfig::new("/vee/bin/_vee_bootstrap.py", prepend.iter().copied()),
            Environment::from_vars(vars.iter().copied()),
            replacer,
        );
        (launcher, calls)
    }

    fn run(launcher: &Launcher, original: &[&str]) -> (ExitCode, String) {
        let mut stderr = Vec::new();
        let code = launcher.run(os(original), &mut stderr);
        (code, String::from_utf8(stderr).unwrap())
    }

    #[test]
    fn exec_receives_the_full_vector() {
        let (launcher, calls) = launcher(&["dev"], &[]);
        run(&launcher, &["prog", "build", "--fast"]);

        assert_eq!(
            *calls.borrow(),
            vec![os(&["python", "/vee/bin/_vee_bootstrap.py", "dev", "build", "--fast"])]
        );
    }

    #[test]
    fn python_override_becomes_program() {
        let (launcher, calls) = launcher(&["dev"], &[(PYTHON_VAR, "python3.11")]);
        run(&launcher, &["prog", "build", "--fast"]);

        assert_eq!(calls.borrow()[0][0], OsString::from("python3.11"));
    }

    #[test]
    fn failed_exec_prints_error_line() {
        let (launcher, _) = launcher(&[], &[]);
        let (code, stderr) = run(&launcher, &["prog", "status"]);

        assert_eq!(code, FAILURE_EXIT_CODE);
        assert_eq!(
            stderr,
            "ERROR during VEE bootstrap: python /vee/bin/_vee_bootstrap.py status\n"
        );
    }

    #[test]
    fn no_exec_skips_replacement() {
        let (launcher, calls) = launcher(&["dev"], &[(NO_EXEC_VAR, "")]);
        let (code, stderr) = run(&launcher, &["prog", "build"]);

        assert!(calls.borrow().is_empty());
        assert_eq!(code, FAILURE_EXIT_CODE);
        assert_eq!(
            stderr,
            "VEE bootstrap skipped: python /vee/bin/_vee_bootstrap.py dev build\n"
        );
    }

    #[test]
    fn no_exec_output_is_deterministic() {
        let (launcher, _) = launcher(&["dev"], &[(NO_EXEC_VAR, "1")]);
        let first = run(&launcher, &["prog", "a b", "", "c"]);
        let second = run(&launcher, &["prog", "a b", "", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn launch_reports_why_it_returned() {
        let (launcher, _) = launcher(&[], &[]);
        let command = launcher.compose(os(&["prog"]));
        match launcher.launch(&command) {
            Fallback::Failed(err) => {
                let io_err = err.downcast_ref::<io::Error>().expect("io error");
                assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
            }
            Fallback::NoExec => panic!("exec should have been attempted"),
        }
    }
}
