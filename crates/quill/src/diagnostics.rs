//! Error types and diagnostics
//!
//! Structural problems (unreadable input, malformed trees, bad configuration)
//! are reported as [`QuillError`]. Irregular documentation content never
//! fails a pass; it is recorded as a [`Diagnostic`] instead.

use std::io;
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for quill operations
pub type QuillResult<T> = Result<T, QuillError>;

/// Main error type for quill
#[derive(Debug, Error)]
pub enum QuillError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Program tree or output JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// The program tree violates a structural requirement
    #[error("Malformed program tree: {0}")]
    Structural(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl QuillError {
    /// Create a configuration error
    pub fn config(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        QuillError::Config {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a structural error
    pub fn structural(message: impl Into<String>) -> Self {
        QuillError::Structural(message.into())
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        QuillError::Other(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the entry could not be produced
    Error,
    /// Warning - documentation was partially dropped
    Warning,
    /// Info - informational message
    Info,
    /// Hint - a comment that documents nothing
    Hint,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Hint => "hint",
        }
    }

    /// Terminal color of the severity label
    pub fn color(&self) -> Color {
        match self {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Warning => Color::Yellow,
            DiagnosticSeverity::Info => Color::Blue,
            DiagnosticSeverity::Hint => Color::Cyan,
        }
    }
}

/// A diagnostic message about documentation content
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Fully-qualified name of the declaration concerned
    pub fqn: Option<String>,
    /// Diagnostic code (for categorization)
    pub code: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            fqn: None,
            code: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create a hint diagnostic
    pub fn hint(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Hint, message)
    }

    /// Attach the declaration the diagnostic is about
    pub fn for_fqn(mut self, fqn: impl Into<String>) -> Self {
        self.fqn = Some(fqn.into());
        self
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = String::new();

        if let Some(ref fqn) = self.fqn {
            result.push_str(fqn);
            result.push_str(": ");
        }

        result.push_str(self.severity.display());

        if let Some(ref code) = self.code {
            result.push('[');
            result.push_str(code);
            result.push(']');
        }

        result.push_str(": ");
        result.push_str(&self.message);

        result
    }

    /// Write one line with colors to a WriteColor implementor
    ///
    /// Without colors the line matches [`Diagnostic::format`].
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        if let Some(ref fqn) = self.fqn {
            w.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(w, "{}", fqn)?;
            w.reset()?;
            write!(w, ": ")?;
        }

        w.set_color(ColorSpec::new().set_fg(Some(self.severity.color())))?;
        write!(w, "{}", self.severity.display())?;
        w.reset()?;

        if let Some(ref code) = self.code {
            w.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(w, "[{}]", code)?;
            w.reset()?;
        }

        writeln!(w, ": {}", self.message)
    }
}

/// Collector for diagnostics during a documentation pass
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, mirroring it to the tracing subscriber
    pub fn add(&mut self, diagnostic: Diagnostic) {
        let fqn = diagnostic.fqn.as_deref().unwrap_or_default();
        match diagnostic.severity {
            DiagnosticSeverity::Error | DiagnosticSeverity::Warning => {
                warn!(fqn = %fqn, code = ?diagnostic.code, "{}", diagnostic.message)
            }
            DiagnosticSeverity::Info | DiagnosticSeverity::Hint => {
                debug!(fqn = %fqn, code = ?diagnostic.code, "{}", diagnostic.message)
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Print all diagnostics to stderr, colored when it is a terminal
    pub fn print(&self) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        if let Err(e) = self.write_colored(&mut stderr) {
            eprintln!("Error printing diagnostics: {}", e);
        }
    }

    /// Write every diagnostic, one per line
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            diagnostic.write_colored(w)?;
        }
        Ok(())
    }

    /// Print summary
    pub fn print_summary(&self) {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors > 0 || warnings > 0 {
            eprintln!("\n{} error(s), {} warning(s)", errors, warnings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Ansi, NoColor};

    #[test]
    fn test_quill_error() {
        let err = QuillError::config("quill.toml", "unknown field `fromat`");
        assert!(err.to_string().contains("quill.toml"));
        assert!(err.to_string().contains("unknown field"));

        let err = QuillError::structural("module declaration without a name");
        assert!(err.to_string().starts_with("Malformed program tree"));
    }

    #[test]
    fn test_diagnostic() {
        let diag = Diagnostic::warning("unresolved @overload reference `plus`")
            .for_fqn("Math.add")
            .with_code("overload");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(
            diag.format(),
            "Math.add: warning[overload]: unresolved @overload reference `plus`"
        );
    }

    #[test]
    fn test_write_colored_without_color_matches_format() {
        let diag = Diagnostic::hint("documentation comment at 0..9 documents nothing")
            .with_code("unattributed-comment");

        let mut buffer = NoColor::new(Vec::new());
        diag.write_colored(&mut buffer).unwrap();
        let written = String::from_utf8(buffer.into_inner()).unwrap();

        assert_eq!(written, format!("{}\n", diag.format()));
    }

    #[test]
    fn test_write_colored_uses_severity_color() {
        let mut collector = DiagnosticsCollector::new();
        collector.add(Diagnostic::warning("dropped @example").for_fqn("Math.add"));

        let mut buffer = Ansi::new(Vec::new());
        collector.write_colored(&mut buffer).unwrap();
        let written = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(written.contains("\x1b[33m"));
        assert!(written.contains("Math.add"));
        assert!(written.ends_with(": dropped @example\n"));
    }

    #[test]
    fn test_diagnostics_collector() {
        let mut collector = DiagnosticsCollector::new();
        assert!(collector.is_empty());

        collector.add(Diagnostic::new(DiagnosticSeverity::Error, "error 1"));
        collector.add(Diagnostic::warning("warning 1"));
        collector.add(Diagnostic::new(DiagnosticSeverity::Info, "info 1"));
        collector.add(Diagnostic::hint("hint 1"));

        assert!(!collector.is_empty());
        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.diagnostics().len(), 4);
    }
}
