//! Standard command handlers of the acquisition supervisor.
//!
//! These are the commands the reference firmware registers at startup:
//! `dir` walks an SD-card directory listing, `runtimestats` and `tasklist`
//! copy scheduler instrumentation reports behind fixed headers. Each handler
//! reads its external collaborator through the narrow traits in
//! [`crate::fs`] and [`crate::sched`] and writes through the bounded sink
//! only.

use core::cell::RefCell;

use crate::error::Error;
use crate::fs::Filesystem;
use crate::sched::Instrumentation;

use super::output::OutputBuffer;
use super::registry::Handler;

/// Path listed by `dir` when no argument is given.
const ROOT_PATH: &str = "/";

/// Line terminator of listing output.
const LINE_TERMINATOR: &str = "\r\n";

/// Header prepended to `runtimestats` output.
pub const RUNTIME_STATS_HEADER: &str =
    "Task\t\tAbs Time\t% Time\r\n--------------------------------------\r\n";

/// Header prepended to `tasklist` output.
pub const TASK_LIST_HEADER: &str =
    "Task\t\tState\tPri.\tStack\t##\r\n------------------------------------------\r\n";

/// `dir [path]`: prints the contents of a directory.
///
/// Walks the listing entry by entry, appending the entry name, a trailing
/// `/` for directories and a line terminator. The remaining sink capacity is
/// checked before each entry is appended; an entry that does not fit aborts
/// the command with `BufferOverflow`. The end of the listing yields success.
pub struct DirCommand<F: Filesystem> {
    filesystem: RefCell<F>,
}

impl<F: Filesystem> DirCommand<F> {
    /// Wrap the filesystem collaborator.
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem: RefCell::new(filesystem),
        }
    }
}

impl<F: Filesystem> core::fmt::Debug for DirCommand<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DirCommand")
    }
}

impl<F: Filesystem> Handler for DirCommand<F> {
    fn invoke(&self, arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        let path = arguments.first().copied().unwrap_or(ROOT_PATH);

        let mut filesystem = self
            .filesystem
            .try_borrow_mut()
            .map_err(|_| Error::InvalidState)?;

        let mut dir = filesystem.open_directory(path)?;

        loop {
            let Some(entry) = filesystem.read_next_entry(&mut dir)? else {
                return Ok(());
            };

            let needed =
                entry.name.len() + usize::from(entry.is_directory) + LINE_TERMINATOR.len();
            if needed > out.remaining() {
                return Err(Error::BufferOverflow);
            }

            out.append_str(entry.name.as_str())?;
            if entry.is_directory {
                out.append_str("/")?;
            }
            out.append_str(LINE_TERMINATOR)?;
        }
    }
}

/// Copy a header plus an instrumentation report into the sink.
///
/// The report is copied only if header and body fit together with room to
/// spare; otherwise the command aborts with `BufferOverflow`. The report
/// guard is dropped on every exit path, returning its scratch memory.
fn copy_report(header: &str, body: &str, out: &mut OutputBuffer<'_>) -> Result<(), Error> {
    if header.len() + body.len() < out.remaining() {
        out.append_str(header)?;
        out.append_str(body)
    } else {
        Err(Error::BufferOverflow)
    }
}

/// `runtimestats`: lists all tasks with their runtime statistics.
pub struct RuntimeStatsCommand<I: Instrumentation> {
    instrumentation: RefCell<I>,
}

impl<I: Instrumentation> RuntimeStatsCommand<I> {
    /// Wrap the scheduler instrumentation collaborator.
    pub fn new(instrumentation: I) -> Self {
        Self {
            instrumentation: RefCell::new(instrumentation),
        }
    }
}

impl<I: Instrumentation> core::fmt::Debug for RuntimeStatsCommand<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RuntimeStatsCommand")
    }
}

impl<I: Instrumentation> Handler for RuntimeStatsCommand<I> {
    fn invoke(&self, _arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        let mut instrumentation = self
            .instrumentation
            .try_borrow_mut()
            .map_err(|_| Error::InvalidState)?;

        let report = instrumentation.runtime_stats()?;
        copy_report(RUNTIME_STATS_HEADER, report.as_ref(), out)
    }
}

/// `tasklist`: lists all tasks with their state, priority and stack info.
pub struct TaskListCommand<I: Instrumentation> {
    instrumentation: RefCell<I>,
}

impl<I: Instrumentation> TaskListCommand<I> {
    /// Wrap the scheduler instrumentation collaborator.
    pub fn new(instrumentation: I) -> Self {
        Self {
            instrumentation: RefCell::new(instrumentation),
        }
    }
}

impl<I: Instrumentation> core::fmt::Debug for TaskListCommand<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TaskListCommand")
    }
}

impl<I: Instrumentation> Handler for TaskListCommand<I> {
    fn invoke(&self, _arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        let mut instrumentation = self
            .instrumentation
            .try_borrow_mut()
            .map_err(|_| Error::InvalidState)?;

        let report = instrumentation.task_list()?;
        copy_report(TASK_LIST_HEADER, report.as_ref(), out)
    }
}

/// Help text registered with `dir`.
pub const DIR_HELP: &str =
    "dir: prints contents of selected directory on SD card\r\n\t\tusage: dir [path]\r\n";

/// Help text registered with `runtimestats`.
pub const RUNTIME_STATS_HELP: &str = "runtimestats: lists all tasks with their runtime stats\r\n";

/// Help text registered with `tasklist`.
pub const TASK_LIST_HELP: &str = "tasklist: lists all tasks with their info\r\n";
