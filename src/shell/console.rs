//! Byte-wise console front end over a serial transport.

use crate::error::Error;
use crate::transport::Transport;

use super::output::OutputBuffer;
use super::processor::{CommandLineProcessor, MAX_LINE_LENGTH};

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// Capacity of the response buffer a dispatched command writes into.
pub const RESPONSE_CAPACITY: usize = 1024;

/// Prefix of the diagnostic line sent when a command fails.
const ERROR_PREFIX: &str = "error: ";

/// Interactive console: line editing, echo and dispatch over a [`Transport`].
///
/// Input is processed byte by byte: printable ASCII accumulates in a bounded
/// line buffer (with optional echo), backspace and delete remove the last
/// character with visual feedback, and CR or LF dispatches the assembled
/// line through the [`CommandLineProcessor`]. Successful responses are sent
/// as-is; on failure the partial response is discarded — never surfaced —
/// and a one-line diagnostic is sent instead.
pub struct Console<'h, T: Transport> {
    processor: CommandLineProcessor<'h>,
    transport: T,
    line: [u8; MAX_LINE_LENGTH],
    line_len: usize,
    echo_enabled: bool,
}

impl<T: Transport> core::fmt::Debug for Console<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Console")
            .field("line_len", &self.line_len)
            .field("echo_enabled", &self.echo_enabled)
            .finish()
    }
}

impl<'h, T: Transport> Console<'h, T> {
    /// Create a console over a populated processor and a transport.
    pub fn new(processor: CommandLineProcessor<'h>, transport: T) -> Self {
        Self {
            processor,
            transport,
            line: [0; MAX_LINE_LENGTH],
            line_len: 0,
            echo_enabled: true,
        }
    }

    /// Enable or disable input echoing.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo_enabled = enabled;
    }

    /// Access the processor behind the console.
    pub fn processor(&self) -> &CommandLineProcessor<'h> {
        &self.processor
    }

    /// Access the transport behind the console.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Block for transport input and feed it through the console.
    pub fn service(&mut self) -> Result<(), Error> {
        let mut chunk = [0u8; 32];
        let received = self.transport.receive(&mut chunk)?;
        self.feed(&chunk[..received])
    }

    /// Process input bytes: echo, line editing and dispatch on CR/LF.
    pub fn feed(&mut self, data: &[u8]) -> Result<(), Error> {
        for &byte in data {
            match byte {
                ASCII_CR | ASCII_LF => {
                    if self.echo_enabled {
                        self.transport.send_str("\r\n")?;
                    }
                    let result = self.run_line();
                    self.line_len = 0;
                    result?;
                }
                ASCII_BACKSPACE | ASCII_DEL => {
                    if self.line_len > 0 {
                        self.line_len -= 1;
                        if self.echo_enabled {
                            // Backspace, space, backspace.
                            self.transport.send_str("\x08 \x08")?;
                        }
                    }
                }
                0x20..=0x7E => {
                    if self.line_len >= MAX_LINE_LENGTH {
                        return Err(Error::BufferOverflow);
                    }
                    self.line[self.line_len] = byte;
                    self.line_len += 1;
                    if self.echo_enabled {
                        self.transport.send_bytes(&[byte])?;
                    }
                }
                // Other control characters are ignored.
                _ => {}
            }
        }
        Ok(())
    }

    fn run_line(&mut self) -> Result<(), Error> {
        let line =
            core::str::from_utf8(&self.line[..self.line_len]).map_err(|_| Error::IoFailure)?;

        let mut response = [0u8; RESPONSE_CAPACITY];
        let mut out = OutputBuffer::new(&mut response);

        match self.processor.dispatch(line, &mut out) {
            Ok(()) => self.transport.send_bytes(out.as_bytes()).map_err(Error::from),
            Err(error) => {
                self.transport.send_str(ERROR_PREFIX)?;
                self.transport.send_str(error.describe())?;
                self.transport.send_str("\r\n")?;
                Ok(())
            }
        }
    }
}
