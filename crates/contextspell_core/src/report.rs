//! Finding sinks.

use std::io::{self, Write};
use std::path::Path;

use crate::Finding;

/// Receives findings as soon as they are produced.
pub trait Reporter {
    /// Handles one finding.
    fn report(&mut self, finding: Finding) -> io::Result<()>;
}

/// Collects findings in memory.
impl Reporter for Vec<Finding> {
    fn report(&mut self, finding: Finding) -> io::Result<()> {
        self.push(finding);
        Ok(())
    }
}

/// Writes the plain-text report.
///
/// Each finding is written, followed by a blank line, the moment it is
/// reported. Nothing is buffered across findings, so output already written
/// stays written if a later step fails.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes the concrete syntax tree header for `path`.
    pub fn tree(&mut self, path: &Path, sexp: &str) -> io::Result<()> {
        writeln!(self.out, "Concrete syntax tree for {}", path.display())?;
        writeln!(self.out, "{sexp}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, finding: Finding) -> io::Result<()> {
        writeln!(self.out, "{finding}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
