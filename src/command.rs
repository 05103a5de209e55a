use crate::config::LaunchConfig;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Exit code of the launcher whenever it does not hand over to the interpreter.
pub const FAILURE_EXIT_CODE: ExitCode = 255;

/// The argument vector handed to the interpreter.
///
/// Laid out as `[interpreter, script, prepend..., forwarded...]`. Element 0 is
/// both the program to look up and the `argv[0]` it receives. The trailing
/// NULL of a C `argv` is left to `std::process::Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<OsString>,
}

impl CommandLine {
    /// Compose the vector from the resolved interpreter, the entry point's
    /// configuration and the launcher's own arguments.
    ///
    /// `original` is the launcher's full argument list, program name included;
    /// the program name is dropped and everything after it is forwarded
    /// verbatim. Arguments are never inspected, reordered or deduplicated.
    pub fn compose<I>(interpreter: OsString, config: &LaunchConfig, original: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut original = original.into_iter();
        // Our own program name.
        let _ = original.next();

        let mut args = Vec::with_capacity(2 + config.prepend.len() + original.size_hint().0);
        args.push(interpreter);
        args.push(config.script.clone());
        args.extend(config.prepend.iter().cloned());
        args.extend(original);
        Self { args }
    }

    /// Executable to locate, which is also the first element.
    pub fn program(&self) -> &OsStr {
        &self.args[0]
    }

    /// Everything after the program.
    pub fn args(&self) -> &[OsString] {
        &self.args[1..]
    }

    /// The whole vector, program first.
    pub fn as_slice(&self) -> &[OsString] {
        &self.args
    }

    /// Number of elements, program included.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Always false; a composed vector holds at least the interpreter and the script.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Write `prefix`, then every element separated by a single space, then a newline.
    ///
    /// The rendering is for humans: an argument that contains a space cannot be
    /// told apart from two arguments.
    pub fn write_diagnostic(&self, prefix: &str, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(prefix.as_bytes())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write_os_str(out, arg)?;
        }
        out.write_all(b"\n")?;
        out.flush()
    }
}

#[cfg(unix)]
fn write_os_str(out: &mut dyn Write, s: &OsStr) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(s.as_bytes())
}

#[cfg(not(unix))]
fn write_os_str(out: &mut dyn Write, s: &OsStr) -> io::Result<()> {
    out.write_all(s.to_string_lossy().as_bytes())
}
