//! A tiny launcher that hands its command line over to the vee bootstrap script.
//!
//! Every compiled entry point (`vee`, `dev`, ...) does the same thing: it resolves
//! which Python interpreter to use, builds a new argument vector of the form
//! `[python, <bootstrap script>, <prepended args>..., <forwarded args>...]` and
//! replaces the current process with it. The entry points only differ in the
//! [`LaunchConfig`] they are built with.
//!
//! When the replacement fails, or `VEE_BOOTSTRAP_NOEXEC` is set, the composed
//! command line is printed to standard error and the process exits with
//! [`FAILURE_EXIT_CODE`].

pub mod command;
pub mod config;
pub mod env;
pub mod external;
mod launcher;

pub use command::{CommandLine, ExitCode, FAILURE_EXIT_CODE};
pub use config::LaunchConfig;
pub use launcher::{Fallback, Launcher};

use tracing_subscriber::EnvFilter;

/// Name of the variable holding the log filter for the launcher itself.
pub const LOG_FILTER_VAR: &str = "VEE_BOOTSTRAP_LOG";

/// Install a stderr `tracing` subscriber.
///
/// The filter is read from [`LOG_FILTER_VAR`] and defaults to `warn`; the
/// launcher only logs at `debug`, so by default stderr holds nothing but the
/// fallback line. Events carry no timestamp or colour.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
