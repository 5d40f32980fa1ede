//! Scheduler collaborator interface.
//!
//! The real-time scheduler lives outside this crate. The core consumes three
//! narrow services from it: a monotonic tick source and a yield hook used to
//! bound driver waits, and the instrumentation queries behind the
//! `runtimestats` and `tasklist` shell commands.
//!
//! Instrumentation reports are rendered into scratch memory owned by the
//! scheduler side. The [`Instrumentation::Report`] guard keeps that scratch
//! alive while the handler copies it out and releases it on drop, so the
//! scratch is returned on every exit path — success, overflow or error.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Monotonic tick source, in milliseconds since an arbitrary origin.
///
/// Wrap-around is tolerated; elapsed time is computed with wrapping
/// subtraction.
pub type TickFn = fn() -> u32;

/// Cooperative yield hook.
///
/// Called between polls of a bounded wait so the scheduler can run other
/// tasks instead of the driver spinning.
pub type YieldFn = fn();

/// Status codes reported by the external scheduler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// The operation completed successfully.
    Passed,
    /// The scheduler could not allocate the required memory.
    CouldNotAllocateMemory,
    /// A queue operation blocked beyond its wait bound.
    QueueBlocked,
    /// A queue operation yielded instead of completing.
    QueueYield,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Status::Passed => defmt::write!(f, "Passed"),
            Status::CouldNotAllocateMemory => defmt::write!(f, "CouldNotAllocateMemory"),
            Status::QueueBlocked => defmt::write!(f, "QueueBlocked"),
            Status::QueueYield => defmt::write!(f, "QueueYield"),
        }
    }
}

/// Runtime instrumentation provided by the external scheduler.
pub trait Instrumentation {
    /// Scratch-backed report text.
    ///
    /// Dropping the report releases the scratch memory it was rendered into.
    type Report: AsRef<str>;

    /// Render per-task runtime statistics.
    fn runtime_stats(&mut self) -> Result<Self::Report, Status>;

    /// Render the task list with state, priority and stack information.
    fn task_list(&mut self) -> Result<Self::Report, Status>;
}
