//! Serial transport collaborator interface.
//!
//! The console talks to the operator over a serial link (USART on the
//! reference board). The transport implementation is external; this module
//! defines the blocking receive and send primitives the console consumes and
//! the hardware status codes the peripheral reports.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Status codes reported by the serial hardware.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// The operation completed successfully.
    Ok,
    /// The peripheral is busy with a previous transfer.
    Busy,
    /// Receive data was lost because the input register was not read in time.
    Overrun,
    /// A framing error was detected on the line.
    FramingError,
    /// A parity error was detected on the line.
    ParityError,
    /// Noise was detected on the line.
    NoiseError,
    /// The transfer did not complete within the peripheral's wait bound.
    Timeout,
    /// The peripheral reported an unrecoverable fault.
    PeripheralFault,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Status::Ok => defmt::write!(f, "Ok"),
            Status::Busy => defmt::write!(f, "Busy"),
            Status::Overrun => defmt::write!(f, "Overrun"),
            Status::FramingError => defmt::write!(f, "FramingError"),
            Status::ParityError => defmt::write!(f, "ParityError"),
            Status::NoiseError => defmt::write!(f, "NoiseError"),
            Status::Timeout => defmt::write!(f, "Timeout"),
            Status::PeripheralFault => defmt::write!(f, "PeripheralFault"),
        }
    }
}

/// A serial byte transport.
///
/// `receive` blocks until at least one byte is available and returns how many
/// bytes were written into the buffer. Send primitives block until the data
/// has been handed to the peripheral.
pub trait Transport {
    /// Receive available bytes into `buffer`, blocking for at least one.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Status>;

    /// Send raw bytes.
    fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Status>;

    /// Send a string.
    fn send_str(&mut self, text: &str) -> Result<(), Status> {
        self.send_bytes(text.as_bytes())
    }
}
