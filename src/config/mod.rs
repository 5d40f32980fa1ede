//! Startup configuration parsed from JSON.
//!
//! The supervisor keeps a small JSON configuration blob alongside the
//! firmware (on the SD card of the reference board). It is parsed once
//! during the single-threaded startup phase, before the scheduler starts,
//! and drives console behavior and driver creation.
//!
//! Parsing is zero-copy: string fields borrow from the input buffer.
//!
//! # Examples
//!
//! ```rust
//! # fn main() -> Result<(), libacq::error::Error> {
//! use libacq::driver::Strategy;
//!
//! let raw = br#"{"device_name":"acq-01","echo":false,"drivers":[{"name":"uart","strategy":"random","timeout":250}]}"#;
//! let config = libacq::config::from_json(raw)?;
//!
//! assert_eq!(config.device_name, "acq-01");
//! assert!(!config.echo);
//! assert_eq!(config.drivers[0].strategy, Strategy::Random);
//! assert_eq!(config.drivers[0].timeout, 250);
//! # Ok(())
//! # }
//! ```

use heapless::Vec;
use serde::Deserialize;

use crate::driver::{Configuration, DEFAULT_TIMEOUT, Strategy};
use crate::error::Error;

/// Maximum number of driver entries in a configuration.
pub const MAX_CONFIGURED_DRIVERS: usize = 4;

/// One driver to create at startup.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct DriverEntry<'a> {
    /// Driver name passed to the factory.
    pub name: &'a str,
    /// Completion strategy of the instance.
    pub strategy: Strategy,
    /// Receive timeout in ticks; defaults to [`DEFAULT_TIMEOUT`].
    #[serde(default = "default_timeout")]
    pub timeout: u32,
}

impl<'a> DriverEntry<'a> {
    /// The factory configuration this entry describes.
    pub fn configuration(&self) -> Configuration<'a> {
        Configuration {
            name: self.name,
            strategy: self.strategy,
        }
    }
}

/// Device configuration.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct DeviceConfig<'a> {
    /// Name the device reports on the console.
    pub device_name: &'a str,
    /// Whether the console echoes input; defaults to enabled.
    #[serde(default = "default_echo")]
    pub echo: bool,
    /// Drivers to create during startup.
    #[serde(borrow, default)]
    pub drivers: Vec<DriverEntry<'a>, MAX_CONFIGURED_DRIVERS>,
}

fn default_echo() -> bool {
    true
}

fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT
}

/// Parse a device configuration from a JSON blob.
///
/// Malformed input fails with [`Error::IoFailure`]; nothing is partially
/// applied.
pub fn from_json(input: &[u8]) -> Result<DeviceConfig<'_>, Error> {
    match serde_json_core::de::from_slice(input) {
        Ok((config, _length)) => Ok(config),
        Err(_) => Err(Error::IoFailure),
    }
}
