//! `dev` is `vee dev`, as its own binary.

use vee_bootstrap::{LaunchConfig, Launcher};

fn main() {
    vee_bootstrap::init_tracing();
    let launcher = Launcher::from_process(LaunchConfig::subcommand(["dev"]));
    let code = launcher.run(std::env::args_os(), &mut std::io::stderr().lock());
    std::process::exit(code);
}
