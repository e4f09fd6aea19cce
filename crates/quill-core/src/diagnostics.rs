//! Compiler diagnostics and the sinks they are written to.
//!
//! Non-fatal conditions (most importantly reflection warnings, emitted when a
//! host access has to be resolved at run time) are reported as
//! [`Diagnostic`]s. The compilation context always collects them into a
//! [`Diagnostics`] list and may forward each one to an additional
//! [`DiagnosticSink`], such as a [`WriterSink`] over stderr.
//!
//! # Examples
//!
//! ```
//! use quill_core::{Diagnostic, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.add_diagnostic(Diagnostic::warning(
//!     "call to Write can't be resolved",
//!     Some("core.qlj".to_string()),
//!     12,
//!     3,
//! ));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics.iter().next().unwrap().to_string(),
//!     "core.qlj:12:3: warning: call to Write can't be resolved"
//! );
//! ```

use std::fmt;
use std::io;

/// A non-fatal warning from the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// The source path where this diagnostic occurred, if available
    pub section: Option<String>,
    /// The line number (1-based, 0 when unknown)
    pub row: u32,
    /// The column number (1-based, 0 when unknown)
    pub col: u32,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, section: Option<String>, row: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            section,
            row,
            col,
        }
    }
}

/// A write-only channel receiving diagnostics.
///
/// Sinks are not synchronized by the compiler; a sink shared between
/// compilations running on different threads must do its own locking.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// A collection of diagnostic messages.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new, empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.add_diagnostic(diagnostic.clone());
    }
}

/// A sink writing one line per diagnostic to an `io::Write`.
///
/// Write failures are dropped: diagnostics must never abort a compilation.
pub struct WriterSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> DiagnosticSink for WriterSink<W> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{}", diagnostic);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = &self.section {
            write!(f, "{}:", section)?;
        }
        write!(f, "{}:{}: warning: {}", self.row, self.col, self.message)
    }
}
