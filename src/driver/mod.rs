//! Capability-based driver abstraction for byte-stream channels.
//!
//! A driver wraps a byte-stream-capable peripheral or software channel behind
//! one capability per operation: initialize, release, send, receive, flush
//! and output redirection. How `send` and `receive` complete is governed by
//! the channel's [`Strategy`], so the same interface covers polled
//! peripherals, interrupt/DMA-backed transfers and framed line protocols.
//!
//! # Lifecycle
//!
//! Every channel walks one state machine:
//!
//! ```text
//! Uninitialized --init--> Ready <--redirect_output/stop_redirect--> Redirecting
//!                           |                                           |
//!                           +-------------------release----------------+
//!                                               |
//!                                               v
//!                                           Released (terminal)
//! ```
//!
//! `send`, `receive` and `flush` are legal only in `Ready` and `Redirecting`;
//! anything issued outside those states fails with
//! [`Error::InvalidState`](crate::error::Error::InvalidState). A released
//! channel stays released — there is no resurrection.
//!
//! # Ownership
//!
//! Channels are built by the [`DriverFactory`] and are exclusively owned by
//! the task that created them. Redirect mode borrows the caller's sink for as
//! long as the channel lives and has no automatic timeout; the owner ends it
//! with `stop_redirect`.
//!
//! # Usage
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
//! channel.init(32)?;
//! channel.send(b'?')?;
//! assert_eq!(channel.receive()?, b'?');
//! channel.flush()?;
//! channel.release()?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sched::{TickFn, YieldFn};

pub mod channel;

pub use channel::{AnyDriver, ImmediateChannel, RandomChannel, SearchChannel};

/// Backing store size of a channel's internal byte queue.
///
/// [`Driver::init`] may request any capacity up to this bound; larger
/// requests fail with [`Error::AllocationFailure`].
pub const MAX_CHANNEL_CAPACITY: usize = 256;

/// Default receive timeout, in ticks of the factory's tick source.
pub const DEFAULT_TIMEOUT: u32 = 1000;

/// Default frame delimiter of `Search`-strategy channels.
pub const DEFAULT_DELIMITER: u8 = b'\n';

/// I/O completion policy governing how a channel fulfils `send`/`receive`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every operation completes synchronously, no queuing delay; for polled
    /// peripherals. `receive` on an empty channel reports exhaustion
    /// immediately as `Timeout`.
    Immediate,
    /// Completion is non-deterministic in latency, modeling interrupt/DMA
    /// backed transfer; `receive` waits up to the configured timeout,
    /// yielding to the scheduler between polls, then fails with `Timeout`.
    /// The timeout is the only cancellation mechanism.
    Random,
    /// `receive` accumulates buffered input and scans for a delimiter before
    /// returning; for framed or line-oriented protocols. The wait is bounded
    /// by the same timeout.
    Search,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Strategy {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Strategy::Immediate => defmt::write!(f, "Immediate"),
            Strategy::Random => defmt::write!(f, "Random"),
            Strategy::Search => defmt::write!(f, "Search"),
        }
    }
}

/// Lifecycle state of a channel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Created but not initialized; only `init` is legal.
    Uninitialized,
    /// Initialized and operating on its internal queue.
    Ready,
    /// Operating with incoming bytes diverted into an external sink.
    Redirecting,
    /// Released; every operation fails. Terminal.
    Released,
}

#[cfg(feature = "defmt")]
impl defmt::Format for State {
    fn format(&self, f: defmt::Formatter) {
        match self {
            State::Uninitialized => defmt::write!(f, "Uninitialized"),
            State::Ready => defmt::write!(f, "Ready"),
            State::Redirecting => defmt::write!(f, "Redirecting"),
            State::Released => defmt::write!(f, "Released"),
        }
    }
}

/// Requested driver identity and completion policy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Configuration<'a> {
    /// Driver name; see [`DriverFactory::create`] for the supported names.
    pub name: &'a str,
    /// Completion strategy the instance should use.
    pub strategy: Strategy,
}

/// A byte-stream channel, one method per capability.
///
/// The `'buf` lifetime bounds the external sink a channel may borrow while
/// redirecting; a channel that never redirects can use any lifetime.
pub trait Driver<'buf> {
    /// Acquire resources and bound the internal queue to `buffer_capacity`
    /// bytes. Legal only once, from `Uninitialized`.
    fn init(&mut self, buffer_capacity: usize) -> Result<(), Error>;

    /// Release everything `init` acquired. Terminal; legal from `Ready` and
    /// `Redirecting`.
    fn release(&mut self) -> Result<(), Error>;

    /// Feed one byte into the channel: into the internal queue when `Ready`,
    /// into the redirect sink when `Redirecting`.
    fn send(&mut self, byte: u8) -> Result<(), Error>;

    /// Take the next byte out of the channel, per the active strategy.
    fn receive(&mut self) -> Result<u8, Error>;

    /// Discard pending bytes; while redirecting, also rewind the sink cursor.
    fn flush(&mut self) -> Result<(), Error>;

    /// Divert incoming bytes into `sink` until [`stop_redirect`](Self::stop_redirect).
    fn redirect_output(&mut self, sink: &'buf mut [u8]) -> Result<(), Error>;

    /// End redirect mode and drop the borrowed sink.
    fn stop_redirect(&mut self) -> Result<(), Error>;

    /// Current lifecycle state.
    fn state(&self) -> State;

    /// Completion strategy of this instance.
    fn strategy(&self) -> Strategy;

    /// Instance identity assigned by the factory.
    fn id(&self) -> u8;

    /// Receive timeout, in ticks.
    fn timeout(&self) -> u32;

    /// Set the receive timeout, in ticks.
    fn set_timeout(&mut self, ticks: u32);
}

/// Builds channel instances from a [`Configuration`].
///
/// The factory owns the platform hooks shared by the channels it creates:
/// the tick source that bounds waits and an optional yield hook invoked
/// between polls so the scheduler can run other tasks.
///
/// Supported name/strategy pairs:
///
/// | name       | strategies                     |
/// |------------|--------------------------------|
/// | `uart`     | `Immediate`, `Random`, `Search` |
/// | `loopback` | `Immediate`                    |
///
/// Any other pair fails with [`Error::UnsupportedDriver`].
#[derive(Debug)]
pub struct DriverFactory {
    ticks: TickFn,
    yield_hook: Option<YieldFn>,
    next_id: u8,
}

impl DriverFactory {
    /// Create a factory with the given tick source and no yield hook.
    pub fn new(ticks: TickFn) -> Self {
        Self {
            ticks,
            yield_hook: None,
            next_id: 1,
        }
    }

    /// Set the yield hook invoked between polls of a bounded wait.
    pub fn set_yield_hook(&mut self, hook: YieldFn) {
        self.yield_hook = Some(hook);
    }

    /// Build the channel described by `configuration`.
    ///
    /// Fails with [`Error::UnsupportedDriver`] when no implementation exists
    /// for the requested name/strategy pair.
    pub fn create<'buf>(
        &mut self,
        configuration: &Configuration<'_>,
    ) -> Result<AnyDriver<'buf>, Error> {
        let driver = match (configuration.name, configuration.strategy) {
            ("uart", Strategy::Immediate) => {
                AnyDriver::Immediate(ImmediateChannel::new(self.next_id))
            }
            ("uart", Strategy::Random) => {
                AnyDriver::Random(RandomChannel::new(self.next_id, self.ticks, self.yield_hook))
            }
            ("uart", Strategy::Search) => {
                AnyDriver::Search(SearchChannel::new(self.next_id, self.ticks, self.yield_hook))
            }
            ("loopback", Strategy::Immediate) => {
                AnyDriver::Immediate(ImmediateChannel::new(self.next_id))
            }
            _ => return Err(Error::UnsupportedDriver),
        };

        self.next_id = self.next_id.wrapping_add(1);

        Ok(driver)
    }
}
