use std::io;
use std::process::ExitCode;

use bindo::registry::{self, Registry};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut commands = Registry::with_default_commands();

    let code = registry::run(
        &mut commands,
        &args,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(code)
}
