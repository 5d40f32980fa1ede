//! Canonical error classification for the acquisition supervisor.
//!
//! Every subsystem in the firmware historically reported failures through its
//! own status-code set: the filesystem speaks FRESULT-shaped codes, the
//! scheduler speaks task-creation results, the serial hardware speaks
//! peripheral status flags. This module defines the one [`Error`] type the
//! core operates on and a total adapter per subsystem, so `?` converts a
//! subsystem status into the canonical classification at the call site:
//!
//! ```rust
//! use libacq::error::Error;
//! use libacq::fs;
//!
//! fn open(status: fs::Status) -> Result<(), Error> {
//!     match status {
//!         fs::Status::Ok => Ok(()),
//!         failure => Err(failure.into()),
//!     }
//! }
//!
//! assert_eq!(open(fs::Status::NoPath), Err(Error::NotFound));
//! ```
//!
//! Success is carried by `Ok(())` of `Result<(), Error>`; the adapters only
//! ever see codes that arrived on a failure path. Every legal subsystem code
//! maps to exactly one [`Error`]; codes with no direct counterpart resolve to
//! [`Error::IoFailure`], which is the documented default rather than a
//! silently ignored case.

use crate::fs;
use crate::sched;
use crate::transport;

/// A canonical error for core operations.
///
/// This enum is the single failure vocabulary shared by the command shell,
/// the driver layer and the subsystem adapters. It is designed to be simple
/// and portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A named entity (command, file, directory) does not exist.
    NotFound,
    /// A command line carried more arguments than the command allows.
    TooManyArguments,
    /// A bounded sink refused a write that would have exceeded its capacity.
    BufferOverflow,
    /// A bounded table or scratch allocation could not be satisfied.
    AllocationFailure,
    /// A bounded wait elapsed without the expected completion.
    Timeout,
    /// An operation was attempted in a state that does not permit it.
    InvalidState,
    /// An input/output failure, or a subsystem code with no direct mapping.
    IoFailure,
    /// No driver implementation exists for the requested name/strategy pair.
    UnsupportedDriver,
    /// A command with the same name is already registered.
    DuplicateCommand,
}

impl Error {
    /// Short fixed description used for console diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Error::NotFound => "not found",
            Error::TooManyArguments => "too many arguments",
            Error::BufferOverflow => "buffer overflow",
            Error::AllocationFailure => "allocation failure",
            Error::Timeout => "timeout",
            Error::InvalidState => "invalid state",
            Error::IoFailure => "i/o failure",
            Error::UnsupportedDriver => "unsupported driver",
            Error::DuplicateCommand => "duplicate command",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotFound => defmt::write!(f, "NotFound"),
            Error::TooManyArguments => defmt::write!(f, "TooManyArguments"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::AllocationFailure => defmt::write!(f, "AllocationFailure"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::InvalidState => defmt::write!(f, "InvalidState"),
            Error::IoFailure => defmt::write!(f, "IoFailure"),
            Error::UnsupportedDriver => defmt::write!(f, "UnsupportedDriver"),
            Error::DuplicateCommand => defmt::write!(f, "DuplicateCommand"),
        }
    }
}

impl From<fs::Status> for Error {
    /// Adapt a filesystem status code arriving on an error path.
    ///
    /// `fs::Status::Ok` in error position is itself a contract violation by
    /// the filesystem implementation and resolves to the `IoFailure` default.
    fn from(status: fs::Status) -> Self {
        match status {
            fs::Status::Ok => Error::IoFailure,
            fs::Status::DiskError => Error::IoFailure,
            fs::Status::InternalError => Error::IoFailure,
            fs::Status::NotReady => Error::InvalidState,
            fs::Status::NoFile => Error::NotFound,
            fs::Status::NoPath => Error::NotFound,
            fs::Status::InvalidName => Error::NotFound,
            fs::Status::Denied => Error::IoFailure,
            fs::Status::AlreadyExists => Error::IoFailure,
            fs::Status::InvalidObject => Error::InvalidState,
            fs::Status::WriteProtected => Error::IoFailure,
            fs::Status::NotEnabled => Error::InvalidState,
            fs::Status::NoFilesystem => Error::IoFailure,
            fs::Status::Timeout => Error::Timeout,
            fs::Status::Locked => Error::InvalidState,
            fs::Status::NotEnoughCore => Error::AllocationFailure,
        }
    }
}

impl From<sched::Status> for Error {
    /// Adapt a scheduler status code arriving on an error path.
    fn from(status: sched::Status) -> Self {
        match status {
            sched::Status::Passed => Error::IoFailure,
            sched::Status::CouldNotAllocateMemory => Error::AllocationFailure,
            sched::Status::QueueBlocked => Error::Timeout,
            sched::Status::QueueYield => Error::IoFailure,
        }
    }
}

impl From<transport::Status> for Error {
    /// Adapt a hardware status code arriving on an error path.
    fn from(status: transport::Status) -> Self {
        match status {
            transport::Status::Ok => Error::IoFailure,
            transport::Status::Busy => Error::InvalidState,
            transport::Status::Overrun => Error::BufferOverflow,
            transport::Status::FramingError => Error::IoFailure,
            transport::Status::ParityError => Error::IoFailure,
            transport::Status::NoiseError => Error::IoFailure,
            transport::Status::Timeout => Error::Timeout,
            transport::Status::PeripheralFault => Error::IoFailure,
        }
    }
}
