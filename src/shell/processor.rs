//! Line tokenization and command dispatch.

use heapless::Vec;

use crate::error::Error;

use super::output::OutputBuffer;
use super::registry::CommandRegistry;

/// Maximum length of an input command line, in bytes.
pub const MAX_LINE_LENGTH: usize = 256;

/// Maximum number of whitespace-separated tokens per line.
///
/// The first token is always the command name.
pub const MAX_TOKENS: usize = 16;

/// Name of the built-in help command handled by the processor itself.
const HELP_COMMAND: &str = "help";

/// Separator between name and help text in the full help listing.
const HELP_SEPARATOR: &str = "\t\t";

/// Tokenizes input lines and dispatches them through a [`CommandRegistry`].
///
/// # Dispatch algorithm
///
/// The raw line is split on whitespace — no quoting support. Token 0 selects
/// the command; an unknown name fails with `NotFound`. If the remaining
/// token count exceeds the command's `max_args` bound, dispatch fails with
/// `TooManyArguments` *before* the handler runs, so the handler observes no
/// side effects on that path. Otherwise the handler runs with the argument
/// tokens and the caller's bounded sink.
///
/// On any non-success result the sink's contents are undefined beyond the
/// last successful write and must be discarded by the caller.
///
/// # Examples
///
/// ```rust
/// use libacq::error::Error;
/// use libacq::shell::{CommandLineProcessor, CommandRegistry, OutputBuffer};
///
/// let processor = CommandLineProcessor::new(CommandRegistry::new());
/// let mut response = [0u8; 32];
/// let mut out = OutputBuffer::new(&mut response);
///
/// assert_eq!(processor.dispatch("reboot", &mut out), Err(Error::NotFound));
/// ```
#[derive(Debug)]
pub struct CommandLineProcessor<'h> {
    registry: CommandRegistry<'h>,
    help_enabled: bool,
}

impl<'h> CommandLineProcessor<'h> {
    /// Create a processor over a populated registry.
    pub fn new(registry: CommandRegistry<'h>) -> Self {
        Self {
            registry,
            help_enabled: true,
        }
    }

    /// Access the underlying registry.
    pub fn registry(&self) -> &CommandRegistry<'h> {
        &self.registry
    }

    /// Register further commands.
    ///
    /// Registration is expected to occur only during the single-threaded
    /// startup phase, before dispatch begins.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry<'h> {
        &mut self.registry
    }

    /// Enable or disable the built-in `help` command.
    ///
    /// When enabled (the default), a line whose command name is `help` and
    /// does not match a registered command is answered by the processor:
    /// without arguments it lists every registered command with its help
    /// text, with one argument it prints that command's help text.
    pub fn set_help(&mut self, enabled: bool) {
        self.help_enabled = enabled;
    }

    /// Tokenize `line` and run the selected command against `out`.
    pub fn dispatch(&self, line: &str, out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        if line.len() > MAX_LINE_LENGTH {
            return Err(Error::BufferOverflow);
        }

        let mut tokens: Vec<&str, MAX_TOKENS> = Vec::new();
        for token in line.split_whitespace() {
            tokens.push(token).map_err(|_| Error::TooManyArguments)?;
        }

        // A blank line selects nothing and is not an error.
        let Some(&name) = tokens.first() else {
            return Ok(());
        };
        let arguments = &tokens[1..];

        match self.registry.lookup(name) {
            Ok(definition) => {
                if arguments.len() > definition.max_args {
                    return Err(Error::TooManyArguments);
                }
                definition.handler.invoke(arguments, out)
            }
            Err(Error::NotFound) if self.help_enabled && name == HELP_COMMAND => {
                self.help(arguments, out)
            }
            Err(error) => Err(error),
        }
    }

    fn help(&self, arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        if arguments.len() > 1 {
            return Err(Error::TooManyArguments);
        }
        match arguments.first() {
            None => {
                for definition in self.registry.iter() {
                    out.append_str(definition.name)?;
                    out.append_str(HELP_SEPARATOR)?;
                    out.append_str(definition.help)?;
                }
                Ok(())
            }
            Some(&name) => {
                let definition = self.registry.lookup(name)?;
                out.append_str(definition.help)
            }
        }
    }
}
