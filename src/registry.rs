use std::fmt::Write as _;
use std::io::Write;

use log::debug;

use crate::command::Command;
use crate::error::{Result, UsageError};
use crate::github::GitHubCommand;
use crate::help::HelpCommand;

/// The fixed set of subcommands, assembled once at startup.
pub struct Registry {
    commands: Vec<Box<dyn Command>>,
    help: HelpCommand,
    usage: String,
}

impl Registry {
    /// Registry over `commands`; `help` is always added.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        let usage = render_usage(&commands);
        Self {
            help: HelpCommand::new(usage.clone()),
            commands,
            usage,
        }
    }

    /// Registry with every built-in subcommand.
    pub fn with_default_commands() -> Self {
        Self::new(vec![Box::new(GitHubCommand::new())])
    }

    /// Usage text printed by `help` and after every error.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Run the subcommand named by `args[0]` with the remaining arguments.
    ///
    /// No subcommand means help; an unknown one is a usage error.
    pub fn dispatch(&mut self, args: &[String], out: &mut dyn Write) -> Result<()> {
        let Some((subcommand, rest)) = args.split_first() else {
            return execute(&mut self.help, &[], out);
        };

        if self.help.name() == subcommand {
            return execute(&mut self.help, rest, out);
        }

        match self
            .commands
            .iter_mut()
            .find(|cmd| cmd.name() == subcommand)
        {
            Some(cmd) => execute(cmd.as_mut(), rest, out),
            None => Err(UsageError::UnknownSubcommand(subcommand.clone()).into()),
        }
    }
}

fn execute(cmd: &mut dyn Command, args: &[String], out: &mut dyn Write) -> Result<()> {
    debug!("running {} with {args:?}", cmd.name());
    cmd.initialize(args)?;
    cmd.run(out)
}

fn render_usage(commands: &[Box<dyn Command>]) -> String {
    let help = HelpCommand::new(String::new());
    let mut entries: Vec<(&str, &str)> = commands
        .iter()
        .map(|cmd| (cmd.name(), cmd.summary()))
        .collect();
    entries.push((help.name(), help.summary()));
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut usage = String::from("Usage: bindo <subcommand> [flags]\n\nSubcommands:\n");
    for (name, summary) in entries {
        let _ = writeln!(usage, "  {name:<width$}  {summary}");
    }
    for cmd in commands.iter().filter(|cmd| !cmd.flags().is_empty()) {
        let _ = write!(usage, "\nFlags for {}:\n{}", cmd.name(), cmd.flags().usage());
    }
    usage
}

/// Process entry point: dispatch `args` and turn the outcome into an exit
/// status. On failure the error goes to `err` and the usage text to `out`.
pub fn run(registry: &mut Registry, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    match registry.dispatch(args, out) {
        Ok(()) => 0,
        Err(e) => {
            debug!("{e:?}");
            let _ = writeln!(err, "{e}");
            let _ = out.write_all(registry.usage().as_bytes());
            1
        }
    }
}
