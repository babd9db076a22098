use std::io::Write;

use crate::command::Command;
use crate::error::Result;
use crate::flags::FlagSet;

/// `bindo help`: prints the usage text it was built with.
pub struct HelpCommand {
    flags: FlagSet,
    usage: String,
}

impl HelpCommand {
    /// Help command printing `usage`.
    pub fn new(usage: String) -> Self {
        Self {
            flags: FlagSet::new(),
            usage,
        }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn summary(&self) -> &str {
        "show this help"
    }

    fn flags(&self) -> &FlagSet {
        &self.flags
    }

    // Topics such as `bindo help github` are accepted and ignored.
    fn initialize(&mut self, args: &[String]) -> Result<()> {
        self.flags.parse(args)?;
        Ok(())
    }

    fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        out.write_all(self.usage.as_bytes())?;
        Ok(())
    }
}
