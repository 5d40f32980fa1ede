//! Filesystem collaborator interface.
//!
//! The acquisition supervisor mounts a FAT filesystem on an SD card; the
//! implementation lives outside this crate. Command handlers only need to
//! walk directory listings, so the seam is two operations: open a directory
//! and read its entries one at a time until the listing ends.

#![allow(missing_docs)]
#![deny(unsafe_code)]

use heapless::String;

/// Maximum length of a directory entry name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Status codes reported by the external filesystem.
///
/// Shaped after the FRESULT codes of a FAT filesystem implementation. The
/// canonical mapping onto [`crate::error::Error`] lives in the error module.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// The operation completed successfully.
    Ok,
    /// A hard error occurred in the low-level disk I/O layer.
    DiskError,
    /// An assertion failed inside the filesystem.
    InternalError,
    /// The physical drive is not ready.
    NotReady,
    /// The file could not be found.
    NoFile,
    /// The path could not be found.
    NoPath,
    /// The path name format is invalid.
    InvalidName,
    /// Access denied or the directory is full.
    Denied,
    /// The object already exists.
    AlreadyExists,
    /// The file or directory object is invalid.
    InvalidObject,
    /// The physical drive is write protected.
    WriteProtected,
    /// The volume has no work area.
    NotEnabled,
    /// There is no valid FAT volume on the drive.
    NoFilesystem,
    /// The operation timed out waiting for drive access.
    Timeout,
    /// The operation was rejected by the file sharing policy.
    Locked,
    /// The filesystem could not allocate a working buffer.
    NotEnoughCore,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Status::Ok => defmt::write!(f, "Ok"),
            Status::DiskError => defmt::write!(f, "DiskError"),
            Status::InternalError => defmt::write!(f, "InternalError"),
            Status::NotReady => defmt::write!(f, "NotReady"),
            Status::NoFile => defmt::write!(f, "NoFile"),
            Status::NoPath => defmt::write!(f, "NoPath"),
            Status::InvalidName => defmt::write!(f, "InvalidName"),
            Status::Denied => defmt::write!(f, "Denied"),
            Status::AlreadyExists => defmt::write!(f, "AlreadyExists"),
            Status::InvalidObject => defmt::write!(f, "InvalidObject"),
            Status::WriteProtected => defmt::write!(f, "WriteProtected"),
            Status::NotEnabled => defmt::write!(f, "NotEnabled"),
            Status::NoFilesystem => defmt::write!(f, "NoFilesystem"),
            Status::Timeout => defmt::write!(f, "Timeout"),
            Status::Locked => defmt::write!(f, "Locked"),
            Status::NotEnoughCore => defmt::write!(f, "NotEnoughCore"),
        }
    }
}

/// A single directory entry.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DirEntry {
    /// Entry name, without any path prefix.
    pub name: String<MAX_NAME_LENGTH>,
    /// Whether the entry is itself a directory.
    pub is_directory: bool,
}

/// Directory access provided by the external filesystem.
///
/// Implementations wrap the board's filesystem library. `read_next_entry`
/// returns `Ok(None)` when the listing is exhausted; every failure surfaces
/// as a [`Status`] for the caller to adapt into the canonical error type.
pub trait Filesystem {
    /// Directory handle produced by [`open_directory`](Self::open_directory).
    type Dir;

    /// Open the directory at `path`.
    fn open_directory(&mut self, path: &str) -> Result<Self::Dir, Status>;

    /// Read the next entry of an open directory.
    ///
    /// Returns `Ok(None)` at the end of the listing.
    fn read_next_entry(&mut self, dir: &mut Self::Dir) -> Result<Option<DirEntry>, Status>;
}
