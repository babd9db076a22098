use std::io::Write;

use crate::error::Result;
use crate::flags::FlagSet;

/// A subcommand of `bindo`.
///
/// The registry calls [`initialize`](Command::initialize) with the arguments
/// that follow the subcommand name, then [`run`](Command::run).
pub trait Command {
    /// Name the subcommand is invoked by.
    fn name(&self) -> &str;

    /// One-line description for the usage text.
    fn summary(&self) -> &str;

    /// Declared flags, used to render usage.
    fn flags(&self) -> &FlagSet;

    /// Bind `args` into the command's configuration.
    fn initialize(&mut self, args: &[String]) -> Result<()>;

    /// Execute, writing user-facing output to `out`.
    ///
    /// Commands that block on I/O return [`Error::Runtime`](crate::Error::Runtime)
    /// when called from inside an async runtime.
    fn run(&mut self, out: &mut dyn Write) -> Result<()>;
}
