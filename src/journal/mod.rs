//! The append-only directive log.
//!
//! Every committed mutation is recorded as one human-readable text block;
//! replaying the blocks in file order reconstructs the full ledger from
//! empty. The grammar is byte-stable: other tooling diffs and greps the log
//! file, so [`format`] is normative and [`parse`] is its exact inverse.

pub mod directive;
pub mod file;
pub mod format;
pub mod parse;

pub use directive::{Action, Directive};
pub use file::{DirectiveSink, JournalFile, MemoryJournal};
pub use format::{format_directive, format_log};
pub use parse::{parse_directive, parse_log, split_blocks};
