//! Concrete channel implementations, one per completion strategy.
//!
//! All three channels share the same lifecycle plumbing: a bounded internal
//! byte queue, the state machine and the optional redirect sink. They differ
//! only in how `receive` completes.

use heapless::Deque;

use crate::error::Error;
use crate::sched::{TickFn, YieldFn};

use super::{
    DEFAULT_DELIMITER, DEFAULT_TIMEOUT, Driver, MAX_CHANNEL_CAPACITY, State, Strategy,
};

/// Borrowed external sink, held only while redirecting.
struct Redirect<'buf> {
    sink: &'buf mut [u8],
    cursor: usize,
}

/// Lifecycle plumbing shared by every channel.
struct Core<'buf> {
    id: u8,
    state: State,
    timeout: u32,
    capacity: usize,
    queue: Deque<u8, MAX_CHANNEL_CAPACITY>,
    redirect: Option<Redirect<'buf>>,
}

impl core::fmt::Debug for Core<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Core")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("timeout", &self.timeout)
            .field("capacity", &self.capacity)
            .field("pending", &self.queue.len())
            .field("redirecting", &self.redirect.is_some())
            .finish()
    }
}

impl<'buf> Core<'buf> {
    fn new(id: u8) -> Self {
        Self {
            id,
            state: State::Uninitialized,
            timeout: DEFAULT_TIMEOUT,
            capacity: 0,
            queue: Deque::new(),
            redirect: None,
        }
    }

    fn init(&mut self, buffer_capacity: usize) -> Result<(), Error> {
        if self.state != State::Uninitialized {
            return Err(Error::InvalidState);
        }
        if buffer_capacity > MAX_CHANNEL_CAPACITY {
            return Err(Error::AllocationFailure);
        }
        self.capacity = buffer_capacity;
        self.state = State::Ready;
        Ok(())
    }

    fn release(&mut self) -> Result<(), Error> {
        match self.state {
            State::Ready | State::Redirecting => {
                self.queue.clear();
                self.redirect = None;
                self.capacity = 0;
                self.state = State::Released;
                Ok(())
            }
            _ => Err(Error::InvalidState),
        }
    }

    fn require_open(&self) -> Result<(), Error> {
        match self.state {
            State::Ready | State::Redirecting => Ok(()),
            _ => Err(Error::InvalidState),
        }
    }

    fn write(&mut self, byte: u8) -> Result<(), Error> {
        match self.state {
            State::Ready => {
                if self.queue.len() >= self.capacity {
                    return Err(Error::BufferOverflow);
                }
                self.queue.push_back(byte).map_err(|_| Error::BufferOverflow)
            }
            State::Redirecting => {
                let redirect = self.redirect.as_mut().ok_or(Error::InvalidState)?;
                match redirect.sink.get_mut(redirect.cursor) {
                    Some(slot) => {
                        *slot = byte;
                        redirect.cursor += 1;
                        Ok(())
                    }
                    None => Err(Error::BufferOverflow),
                }
            }
            _ => Err(Error::InvalidState),
        }
    }

    fn pop(&mut self) -> Option<u8> {
        self.queue.pop_front()
    }

    fn contains(&self, byte: u8) -> bool {
        self.queue.iter().any(|&pending| pending == byte)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.require_open()?;
        self.queue.clear();
        if let Some(redirect) = self.redirect.as_mut() {
            redirect.cursor = 0;
        }
        Ok(())
    }

    fn redirect_output(&mut self, sink: &'buf mut [u8]) -> Result<(), Error> {
        if self.state != State::Ready {
            return Err(Error::InvalidState);
        }
        self.redirect = Some(Redirect { sink, cursor: 0 });
        self.state = State::Redirecting;
        Ok(())
    }

    fn stop_redirect(&mut self) -> Result<(), Error> {
        if self.state != State::Redirecting {
            return Err(Error::InvalidState);
        }
        self.redirect = None;
        self.state = State::Ready;
        Ok(())
    }
}

/// Wait on the tick source until `pop` yields a byte or `timeout` elapses.
fn bounded_wait<'buf>(
    core: &mut Core<'buf>,
    ticks: TickFn,
    yield_hook: Option<YieldFn>,
    ready: fn(&Core<'buf>, u8) -> bool,
    marker: u8,
) -> Result<u8, Error> {
    let timeout = core.timeout;
    let started = ticks();
    loop {
        if ready(core, marker) {
            return core.pop().ok_or(Error::IoFailure);
        }
        if ticks().wrapping_sub(started) >= timeout {
            return Err(Error::Timeout);
        }
        if let Some(yield_now) = yield_hook {
            yield_now();
        }
    }
}

fn any_pending(core: &Core<'_>, _marker: u8) -> bool {
    !core.queue.is_empty()
}

fn delimiter_pending(core: &Core<'_>, delimiter: u8) -> bool {
    core.contains(delimiter)
}

macro_rules! delegate_lifecycle {
    () => {
        fn init(&mut self, buffer_capacity: usize) -> Result<(), Error> {
            self.core.init(buffer_capacity)
        }

        fn release(&mut self) -> Result<(), Error> {
            self.core.release()
        }

        fn send(&mut self, byte: u8) -> Result<(), Error> {
            self.core.write(byte)
        }

        fn flush(&mut self) -> Result<(), Error> {
            self.core.flush()
        }

        fn redirect_output(&mut self, sink: &'buf mut [u8]) -> Result<(), Error> {
            self.core.redirect_output(sink)
        }

        fn stop_redirect(&mut self) -> Result<(), Error> {
            self.core.stop_redirect()
        }

        fn state(&self) -> State {
            self.core.state
        }

        fn id(&self) -> u8 {
            self.core.id
        }

        fn timeout(&self) -> u32 {
            self.core.timeout
        }

        fn set_timeout(&mut self, ticks: u32) {
            self.core.timeout = ticks;
        }
    };
}

/// Channel with synchronous completion, for polled peripherals.
#[derive(Debug)]
pub struct ImmediateChannel<'buf> {
    core: Core<'buf>,
}

impl ImmediateChannel<'_> {
    pub(crate) fn new(id: u8) -> Self {
        Self { core: Core::new(id) }
    }
}

impl<'buf> Driver<'buf> for ImmediateChannel<'buf> {
    delegate_lifecycle!();

    fn receive(&mut self) -> Result<u8, Error> {
        self.core.require_open()?;
        // Zero-wait bound: an empty channel is exhausted right away.
        self.core.pop().ok_or(Error::Timeout)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Immediate
    }
}

/// Channel modeling interrupt/DMA-backed transfer with bounded waits.
#[derive(Debug)]
pub struct RandomChannel<'buf> {
    core: Core<'buf>,
    ticks: TickFn,
    yield_hook: Option<YieldFn>,
}

impl RandomChannel<'_> {
    pub(crate) fn new(id: u8, ticks: TickFn, yield_hook: Option<YieldFn>) -> Self {
        Self {
            core: Core::new(id),
            ticks,
            yield_hook,
        }
    }
}

impl<'buf> Driver<'buf> for RandomChannel<'buf> {
    delegate_lifecycle!();

    fn receive(&mut self) -> Result<u8, Error> {
        self.core.require_open()?;
        bounded_wait(&mut self.core, self.ticks, self.yield_hook, any_pending, 0)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Random
    }
}

/// Channel for framed protocols: `receive` waits for a complete frame.
#[derive(Debug)]
pub struct SearchChannel<'buf> {
    core: Core<'buf>,
    ticks: TickFn,
    yield_hook: Option<YieldFn>,
    delimiter: u8,
}

impl SearchChannel<'_> {
    pub(crate) fn new(id: u8, ticks: TickFn, yield_hook: Option<YieldFn>) -> Self {
        Self {
            core: Core::new(id),
            ticks,
            yield_hook,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Frame delimiter `receive` scans for.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Set the frame delimiter.
    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }
}

impl<'buf> Driver<'buf> for SearchChannel<'buf> {
    delegate_lifecycle!();

    fn receive(&mut self) -> Result<u8, Error> {
        self.core.require_open()?;
        bounded_wait(
            &mut self.core,
            self.ticks,
            self.yield_hook,
            delimiter_pending,
            self.delimiter,
        )
    }

    fn strategy(&self) -> Strategy {
        Strategy::Search
    }
}

/// Owned channel of any strategy, as built by the factory.
#[derive(Debug)]
pub enum AnyDriver<'buf> {
    /// A [`Strategy::Immediate`] channel.
    Immediate(ImmediateChannel<'buf>),
    /// A [`Strategy::Random`] channel.
    Random(RandomChannel<'buf>),
    /// A [`Strategy::Search`] channel.
    Search(SearchChannel<'buf>),
}

macro_rules! dispatch {
    ($self:ident, $channel:ident => $body:expr) => {
        match $self {
            AnyDriver::Immediate($channel) => $body,
            AnyDriver::Random($channel) => $body,
            AnyDriver::Search($channel) => $body,
        }
    };
}

impl<'buf> Driver<'buf> for AnyDriver<'buf> {
    fn init(&mut self, buffer_capacity: usize) -> Result<(), Error> {
        dispatch!(self, channel => channel.init(buffer_capacity))
    }

    fn release(&mut self) -> Result<(), Error> {
        dispatch!(self, channel => channel.release())
    }

    fn send(&mut self, byte: u8) -> Result<(), Error> {
        dispatch!(self, channel => channel.send(byte))
    }

    fn receive(&mut self) -> Result<u8, Error> {
        dispatch!(self, channel => channel.receive())
    }

    fn flush(&mut self) -> Result<(), Error> {
        dispatch!(self, channel => channel.flush())
    }

    fn redirect_output(&mut self, sink: &'buf mut [u8]) -> Result<(), Error> {
        dispatch!(self, channel => channel.redirect_output(sink))
    }

    fn stop_redirect(&mut self) -> Result<(), Error> {
        dispatch!(self, channel => channel.stop_redirect())
    }

    fn state(&self) -> State {
        dispatch!(self, channel => channel.state())
    }

    fn strategy(&self) -> Strategy {
        dispatch!(self, channel => channel.strategy())
    }

    fn id(&self) -> u8 {
        dispatch!(self, channel => channel.id())
    }

    fn timeout(&self) -> u32 {
        dispatch!(self, channel => channel.timeout())
    }

    fn set_timeout(&mut self, ticks: u32) {
        dispatch!(self, channel => channel.set_timeout(ticks))
    }
}
