//! Command shell for the serial console.
//!
//! The shell resolves operator input into registered command handlers and
//! formats their responses into bounded, capacity-checked output buffers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Console      │───▶│  CommandLine    │───▶│    Command      │
//! │  (byte input,   │    │  Processor      │    │    Registry     │
//! │   line editing) │    │  (tokenize,     │    │  (name lookup)  │
//! └─────────────────┘    │   dispatch)     │    └─────────────────┘
//!          │             └─────────────────┘             │
//!          ▼                       │                     ▼
//! ┌─────────────────┐              ▼            ┌─────────────────┐
//! │    Transport    │    ┌─────────────────┐    │    Handlers     │
//! │  (serial link)  │◀───│  OutputBuffer   │◀───│  (dir, task-    │
//! └─────────────────┘    │  (bounded sink) │    │   list, ...)    │
//!                        └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dispatch runs within a single cooperative task context. The registry and
//! the processor are not designed for concurrent mutation: registration
//! happens during a single-threaded startup phase, and if several tasks may
//! dispatch, access must be serialized by the caller.
//!
//! # Failure contract
//!
//! Handlers append only through the capacity-checked writes of
//! [`OutputBuffer`]; the first write that would overflow aborts the command
//! with `BufferOverflow`. Buffer contents beyond the last successful write
//! are undefined on failure, so callers discard the whole buffer on any
//! non-success result instead of surfacing truncated output.

pub mod commands;
pub mod console;
pub mod output;
pub mod processor;
pub mod registry;

pub use console::Console;
pub use output::OutputBuffer;
pub use processor::{CommandLineProcessor, MAX_LINE_LENGTH, MAX_TOKENS};
pub use registry::{CommandDefinition, CommandRegistry, Handler, MAX_COMMANDS};
