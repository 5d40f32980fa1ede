//! # libacq - acquisition supervisor core
//!
//! The portable core of a microcontroller-based acquisition-supervisor
//! firmware. The device brings up clocks, power and peripherals, mounts a
//! filesystem on an SD card and runs a command shell over a serial transport
//! while a real-time scheduler drives background tasks. This crate contains
//! the parts of that firmware that are independent of any particular board
//! and is designed for embedded systems and `no_std` environments.
//!
//! ## Features
//!
//! ### Command shell
//! - **Command registry**: named command definitions with argument bounds and
//!   help text, resolved at dispatch time
//! - **Line processor**: whitespace tokenization and dispatch into
//!   capacity-checked output buffers
//! - **Console**: byte-wise input processing with echo and line editing over
//!   any serial transport
//!
//! ### Error taxonomy
//! - One canonical [`error::Error`] type shared by every subsystem
//! - Total adapters from filesystem, scheduler and hardware status codes
//!
//! ### Drivers
//! - Capability-based [`driver::Driver`] abstraction over byte-stream
//!   channels
//! - Pluggable I/O completion strategies: `Immediate`, `Random`, `Search`
//! - [`driver::DriverFactory`] building configured instances
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libacq = "0.1.0"
//! ```
//!
//! ### Registering and dispatching a command
//!
//! ```rust
//! # fn main() -> Result<(), libacq::error::Error> {
//! use libacq::error::Error;
//! use libacq::shell::{
//!     CommandDefinition, CommandLineProcessor, CommandRegistry, Handler, OutputBuffer,
//! };
//!
//! struct UptimeCommand;
//!
//! impl Handler for UptimeCommand {
//!     fn invoke(&self, _arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
//!         out.append_str("uptime: 12345 s\r\n")
//!     }
//! }
//!
//! let handler = UptimeCommand;
//! let mut registry = CommandRegistry::new();
//! registry.register(CommandDefinition {
//!     name: "uptime",
//!     max_args: 0,
//!     handler: &handler,
//!     help: "uptime: prints seconds since boot\r\n",
//! })?;
//!
//! let processor = CommandLineProcessor::new(registry);
//! let mut response = [0u8; 64];
//! let mut out = OutputBuffer::new(&mut response);
//! processor.dispatch("uptime", &mut out)?;
//! assert_eq!(out.as_str(), Some("uptime: 12345 s\r\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Creating a driver
//!
//! ```rust
//! # fn main() -> Result<(), libacq::error::Error> {
//! use libacq::driver::{Configuration, Driver, DriverFactory, Strategy};
//!
//! fn ticks() -> u32 {
//!     0 // wire to a hardware timer on the target
//! }
//!
//! let mut factory = DriverFactory::new(ticks);
//! let mut channel = factory.create(&Configuration {
//!     name: "uart",
//!     strategy: Strategy::Immediate,
//! })?;
//!
//! channel.init(16)?;
//! channel.send(b'x')?;
//! assert_eq!(channel.receive()?, b'x');
//! channel.release()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! Board-specific collaborators (filesystem, scheduler instrumentation,
//! serial transport) are supplied by the firmware through the traits in
//! [`fs`], [`sched`] and [`transport`].
//!
//! ## Optional features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Canonical error classification shared by every subsystem.
///
/// Contains the [`error::Error`] type and the adapters that map
/// independently-evolving subsystem status codes onto it.
pub mod error;

/// Filesystem collaborator interface.
///
/// Narrow seam through which command handlers read directory listings from
/// the external filesystem implementation.
pub mod fs;

/// Scheduler collaborator interface.
///
/// Instrumentation queries, tick source and yield hook supplied by the
/// external real-time scheduler.
pub mod sched;

/// Serial transport collaborator interface.
///
/// Blocking receive and send primitives consumed by the console.
pub mod transport;

/// Capability-based driver abstraction for byte-stream channels.
///
/// Contains the [`driver::Driver`] trait, the completion strategies and the
/// factory that builds configured channel instances.
pub mod driver;

/// Command shell for the serial console.
///
/// Command registry, line processor, bounded output sink, the standard
/// command handlers and the byte-wise console front end.
pub mod shell;

/// Startup configuration parsed from JSON.
pub mod config;
