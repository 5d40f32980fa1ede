use std::cell::Cell;
use std::rc::Rc;

use libacq::error::Error;
use libacq::fs::{DirEntry, Filesystem, MAX_NAME_LENGTH, Status as FsStatus};
use libacq::sched::{Instrumentation, Status as SchedStatus};
use libacq::shell::commands::{
    DIR_HELP, DirCommand, RUNTIME_STATS_HEADER, RUNTIME_STATS_HELP, RuntimeStatsCommand,
    TASK_LIST_HEADER, TASK_LIST_HELP, TaskListCommand,
};
use libacq::shell::{
    CommandDefinition, CommandLineProcessor, CommandRegistry, Handler, MAX_COMMANDS, OutputBuffer,
};

/// Handler that records invocations and writes a fixed response.
struct CountingHandler {
    invocations: Cell<usize>,
    text: &'static str,
}

impl CountingHandler {
    fn new(text: &'static str) -> Self {
        Self {
            invocations: Cell::new(0),
            text,
        }
    }
}

impl Handler for CountingHandler {
    fn invoke(&self, _arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        self.invocations.set(self.invocations.get() + 1);
        out.append_str(self.text)
    }
}

/// Handler that writes partial output before failing.
struct PoisonedHandler;

impl Handler for PoisonedHandler {
    fn invoke(&self, _arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        out.append_str("partial junk")?;
        Err(Error::IoFailure)
    }
}

/// Handler that captures the argument tokens it was invoked with.
struct CapturingHandler {
    captured: Rc<Cell<Option<Vec<String>>>>,
}

impl Handler for CapturingHandler {
    fn invoke(&self, arguments: &[&str], _out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        let tokens = arguments.iter().map(|token| token.to_string()).collect();
        self.captured.set(Some(tokens));
        Ok(())
    }
}

/// Directory listing served from a fixed entry table.
struct MockFilesystem {
    entries: Vec<(&'static str, bool)>,
}

impl Filesystem for MockFilesystem {
    type Dir = usize;

    fn open_directory(&mut self, path: &str) -> Result<Self::Dir, FsStatus> {
        match path {
            "/" | "/logs" => Ok(0),
            _ => Err(FsStatus::NoPath),
        }
    }

    fn read_next_entry(&mut self, cursor: &mut usize) -> Result<Option<DirEntry>, FsStatus> {
        let Some(&(name, is_directory)) = self.entries.get(*cursor) else {
            return Ok(None);
        };
        *cursor += 1;
        let name: heapless::String<MAX_NAME_LENGTH> =
            heapless::String::try_from(name).map_err(|_| FsStatus::InvalidName)?;
        Ok(Some(DirEntry { name, is_directory }))
    }
}

fn listing() -> MockFilesystem {
    MockFilesystem {
        entries: vec![("a.txt", false), ("sub", true)],
    }
}

/// Instrumentation report whose drop releases the scheduler scratch.
struct MockReport {
    text: &'static str,
    releases: Rc<Cell<usize>>,
}

impl AsRef<str> for MockReport {
    fn as_ref(&self) -> &str {
        self.text
    }
}

impl Drop for MockReport {
    fn drop(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

struct MockInstrumentation {
    body: &'static str,
    failure: Option<SchedStatus>,
    releases: Rc<Cell<usize>>,
}

impl MockInstrumentation {
    fn new(body: &'static str) -> (Self, Rc<Cell<usize>>) {
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                body,
                failure: None,
                releases: Rc::clone(&releases),
            },
            releases,
        )
    }

    fn report(&self) -> Result<MockReport, SchedStatus> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        Ok(MockReport {
            text: self.body,
            releases: Rc::clone(&self.releases),
        })
    }
}

impl Instrumentation for MockInstrumentation {
    type Report = MockReport;

    fn runtime_stats(&mut self) -> Result<Self::Report, SchedStatus> {
        self.report()
    }

    fn task_list(&mut self) -> Result<Self::Report, SchedStatus> {
        self.report()
    }
}

#[test]
fn lookup_returns_registered_definitions() {
    let dir_handler = CountingHandler::new("");
    let tasklist_handler = CountingHandler::new("");

    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &dir_handler,
            help: DIR_HELP,
        })
        .unwrap();
    registry
        .register(CommandDefinition {
            name: "tasklist",
            max_args: 0,
            handler: &tasklist_handler,
            help: TASK_LIST_HELP,
        })
        .unwrap();

    let dir = registry.lookup("dir").unwrap();
    assert_eq!(dir.name, "dir");
    assert_eq!(dir.max_args, 1);

    let tasklist = registry.lookup("tasklist").unwrap();
    assert_eq!(tasklist.name, "tasklist");
    assert_eq!(tasklist.max_args, 0);

    assert_eq!(registry.lookup("runtimestats").err(), Some(Error::NotFound));
}

#[test]
fn duplicate_registration_is_rejected() {
    let handler = CountingHandler::new("");
    let mut registry = CommandRegistry::new();

    let definition = CommandDefinition {
        name: "dir",
        max_args: 1,
        handler: &handler,
        help: DIR_HELP,
    };

    assert_eq!(registry.register(definition), Ok(()));
    assert_eq!(registry.register(definition), Err(Error::DuplicateCommand));
    assert_eq!(registry.len(), 1);
}

#[test]
fn full_registry_refuses_further_registration() {
    const NAMES: [&str; MAX_COMMANDS] = [
        "c00", "c01", "c02", "c03", "c04", "c05", "c06", "c07", "c08", "c09", "c10", "c11", "c12",
        "c13", "c14", "c15",
    ];

    let handler = CountingHandler::new("");
    let mut registry = CommandRegistry::new();

    for name in NAMES {
        let result = registry.register(CommandDefinition {
            name,
            max_args: 0,
            handler: &handler,
            help: "",
        });
        assert_eq!(result, Ok(()));
    }

    let overflow = registry.register(CommandDefinition {
        name: "overflow",
        max_args: 0,
        handler: &handler,
        help: "",
    });
    assert_eq!(overflow, Err(Error::AllocationFailure));
    assert_eq!(registry.len(), MAX_COMMANDS);
}

#[test]
fn unknown_command_is_not_found() {
    let processor = CommandLineProcessor::new(CommandRegistry::new());
    let mut response = [0u8; 32];
    let mut out = OutputBuffer::new(&mut response);

    assert_eq!(processor.dispatch("reboot now", &mut out), Err(Error::NotFound));
}

#[test]
fn argument_flood_never_reaches_the_handler() {
    let handler = CountingHandler::new("should not appear");
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "tasklist",
            max_args: 0,
            handler: &handler,
            help: TASK_LIST_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(
        processor.dispatch("tasklist extra", &mut out),
        Err(Error::TooManyArguments)
    );
    assert_eq!(handler.invocations.get(), 0);
    assert!(out.is_empty());
}

#[test]
fn arguments_up_to_the_bound_are_passed_through() {
    let captured = Rc::new(Cell::new(None));
    let handler = CapturingHandler {
        captured: Rc::clone(&captured),
    };
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &handler,
            help: DIR_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 16];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("dir /logs", &mut out), Ok(()));
    assert_eq!(captured.take(), Some(vec!["/logs".to_string()]));

    assert_eq!(processor.dispatch("dir", &mut out), Ok(()));
    assert_eq!(captured.take(), Some(Vec::new()));
}

#[test]
fn dir_listing_round_trip() {
    let handler = DirCommand::new(listing());
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &handler,
            help: DIR_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("dir", &mut out), Ok(()));
    assert_eq!(out.as_str(), Some("a.txt\r\nsub/\r\n"));
}

#[test]
fn dir_listing_boundary_law() {
    // The full listing is 13 bytes: "a.txt\r\nsub/\r\n".
    let handler = DirCommand::new(listing());
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &handler,
            help: DIR_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut exact = [0u8; 13];
    let mut out = OutputBuffer::new(&mut exact);
    assert_eq!(processor.dispatch("dir", &mut out), Ok(()));
    assert_eq!(out.as_str(), Some("a.txt\r\nsub/\r\n"));

    let mut short = [0u8; 12];
    let mut out = OutputBuffer::new(&mut short);
    assert_eq!(processor.dispatch("dir", &mut out), Err(Error::BufferOverflow));
}

#[test]
fn dir_unknown_path_is_not_found() {
    let handler = DirCommand::new(listing());
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &handler,
            help: DIR_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(
        processor.dispatch("dir /missing", &mut out),
        Err(Error::NotFound)
    );
}

#[test]
fn registered_commands_with_argument_flood_and_tight_buffer() {
    let dir_handler = DirCommand::new(listing());
    let (instrumentation, _releases) = MockInstrumentation::new("");
    let tasklist_handler = TaskListCommand::new(instrumentation);

    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &dir_handler,
            help: DIR_HELP,
        })
        .unwrap();
    registry
        .register(CommandDefinition {
            name: "tasklist",
            max_args: 0,
            handler: &tasklist_handler,
            help: TASK_LIST_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(
        processor.dispatch("tasklist extra", &mut out),
        Err(Error::TooManyArguments)
    );

    let mut tight = [0u8; 5];
    let mut out = OutputBuffer::new(&mut tight);
    assert_eq!(processor.dispatch("dir", &mut out), Err(Error::BufferOverflow));
}

#[test]
fn runtimestats_copies_header_and_body() {
    const BODY: &str = "heartbeat\t\t1024\t\t50%\r\nidle\t\t1024\t\t50%\r\n";
    let (instrumentation, releases) = MockInstrumentation::new(BODY);
    let handler = RuntimeStatsCommand::new(instrumentation);

    let mut response = [0u8; 256];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(handler.invoke(&[], &mut out), Ok(()));

    let expected = format!("{RUNTIME_STATS_HEADER}{BODY}");
    assert_eq!(out.as_str(), Some(expected.as_str()));
    assert_eq!(releases.get(), 1);
}

#[test]
fn runtimestats_overflow_still_releases_scratch() {
    let (instrumentation, releases) =
        MockInstrumentation::new("heartbeat\t\t1024\t\t50%\r\n");
    let handler = RuntimeStatsCommand::new(instrumentation);

    let mut tiny = [0u8; 16];
    let mut out = OutputBuffer::new(&mut tiny);
    assert_eq!(handler.invoke(&[], &mut out), Err(Error::BufferOverflow));
    assert!(out.is_empty());
    assert_eq!(releases.get(), 1);
}

#[test]
fn runtimestats_allocation_failure_is_adapted() {
    let (mut instrumentation, releases) = MockInstrumentation::new("");
    instrumentation.failure = Some(SchedStatus::CouldNotAllocateMemory);
    let handler = RuntimeStatsCommand::new(instrumentation);

    let mut response = [0u8; 256];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(handler.invoke(&[], &mut out), Err(Error::AllocationFailure));
    assert_eq!(releases.get(), 0);
}

#[test]
fn tasklist_copies_header_and_body() {
    const BODY: &str = "heartbeat\tR\t1\t128\t1\r\n";
    let (instrumentation, releases) = MockInstrumentation::new(BODY);
    let handler = TaskListCommand::new(instrumentation);

    let mut response = [0u8; 256];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(handler.invoke(&[], &mut out), Ok(()));

    let expected = format!("{TASK_LIST_HEADER}{BODY}");
    assert_eq!(out.as_str(), Some(expected.as_str()));
    assert_eq!(releases.get(), 1);
}

#[test]
fn poisoned_handler_surfaces_its_error() {
    let handler = PoisonedHandler;
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "poison",
            max_args: 0,
            handler: &handler,
            help: "",
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("poison", &mut out), Err(Error::IoFailure));
}

#[test]
fn help_lists_registered_commands() {
    let handler = CountingHandler::new("");
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "runtimestats",
            max_args: 0,
            handler: &handler,
            help: RUNTIME_STATS_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 256];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("help", &mut out), Ok(()));

    let text = out.as_str().unwrap();
    assert!(text.contains("runtimestats"));
    assert!(text.contains(RUNTIME_STATS_HELP));
}

#[test]
fn help_for_a_single_command() {
    let handler = CountingHandler::new("");
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "dir",
            max_args: 1,
            handler: &handler,
            help: DIR_HELP,
        })
        .unwrap();
    let processor = CommandLineProcessor::new(registry);

    let mut response = [0u8; 256];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("help dir", &mut out), Ok(()));
    assert_eq!(out.as_str(), Some(DIR_HELP));
    assert_eq!(handler.invocations.get(), 0);

    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(
        processor.dispatch("help missing", &mut out),
        Err(Error::NotFound)
    );
}

#[test]
fn help_can_be_disabled() {
    let mut processor = CommandLineProcessor::new(CommandRegistry::new());
    processor.set_help(false);

    let mut response = [0u8; 64];
    let mut out = OutputBuffer::new(&mut response);
    assert_eq!(processor.dispatch("help", &mut out), Err(Error::NotFound));
}
