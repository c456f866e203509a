use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;

use super::directive::Directive;
use super::format::{format_directive, format_log};
use super::parse::parse_log;

/// Where committed directives are mirrored. The log has no read path during
/// normal operation; it is re-read in full only at start-up.
pub trait DirectiveSink: Send {
    fn append(&mut self, directive: &Directive) -> Result<()>;
}

/// The append-only directive log file.
#[derive(Debug, Clone)]
pub struct JournalFile {
    path: PathBuf,
}

impl JournalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full log text; a missing file reads as an empty log.
    pub fn read_text(&self) -> Result<String> {
        if self.path.exists() {
            Ok(fs::read_to_string(&self.path)?)
        } else {
            Ok(String::new())
        }
    }

    pub fn read_all(&self) -> Result<Vec<Directive>> {
        parse_log(&self.read_text()?)
    }

    /// Rewrites the whole file from scratch. Used by tests and by recovery
    /// tooling, never by the live mutation path.
    pub fn write_all(&self, directives: &[Directive]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format_log(directives))?;
        Ok(())
    }
}

impl DirectiveSink for JournalFile {
    fn append(&mut self, directive: &Directive) -> Result<()> {
        let block = format_directive(directive);
        let existing = fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if existing == 0 {
            writeln!(file, "{}", block)?;
        } else {
            writeln!(file, "\n{}", block)?;
        }
        file.flush()?;
        Ok(())
    }
}

/// In-memory sink used by tests and the re-export property.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    pub directives: Vec<Directive>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_text(&self) -> String {
        format_log(&self.directives)
    }
}

impl DirectiveSink for MemoryJournal {
    fn append(&mut self, directive: &Directive) -> Result<()> {
        self.directives.push(directive.clone());
        Ok(())
    }
}
