//! Terminal listing of documented entries
//!
//! # Example
//!
//! ```no_run
//! use quill::printer::DocPrinter;
//! use quill::CommentData;
//!
//! let entries: Vec<CommentData> = vec![];
//! let printer = DocPrinter::new(&entries, true);
//! printer.print_to_stdout();
//! ```

use crate::comment_data::CommentData;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Lists entries as `kind fqn` lines with their summary and signatures
pub struct DocPrinter<'a> {
    entries: &'a [CommentData],
    use_color: bool,
}

impl<'a> DocPrinter<'a> {
    /// Create a new printer
    ///
    /// # Arguments
    /// * `entries` - Documented entries, printed in the given order
    /// * `use_color` - Whether to use colors when printing to a terminal
    pub fn new(entries: &'a [CommentData], use_color: bool) -> Self {
        Self { entries, use_color }
    }

    /// Print directly to stdout with colors
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_colored(&mut stdout) {
            eprintln!("Error printing documentation: {}", e);
        }
    }

    /// Write with colors to a WriteColor implementor
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for entry in self.entries {
            self.write_magenta(w, entry.kind().display_name())?;
            write!(w, " ")?;
            self.write_bold(w, entry.fqn())?;
            if entry.tags().is_deprecated {
                write!(w, " ")?;
                self.write_yellow(w, "(deprecated)")?;
            }
            writeln!(w)?;

            for signature in signatures(entry) {
                write!(w, "  ")?;
                self.write_cyan(w, &signature)?;
                writeln!(w)?;
            }

            if let Some(summary) = summary_line(entry) {
                write!(w, "  ")?;
                self.write_gray(w, summary)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }

    fn write_cyan<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_magenta<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_yellow<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_bold<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_gray<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_dimmed(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }
}

impl Display for DocPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for entry in self.entries {
            write!(f, "{} {}", entry.kind().display_name(), entry.fqn())?;
            if entry.tags().is_deprecated {
                write!(f, " (deprecated)")?;
            }
            writeln!(f)?;
            for signature in signatures(entry) {
                writeln!(f, "  {}", signature)?;
            }
            if let Some(summary) = summary_line(entry) {
                writeln!(f, "  {}", summary)?;
            }
        }
        Ok(())
    }
}

fn signatures(entry: &CommentData) -> Vec<String> {
    match entry {
        CommentData::Method(m) => vec![m.signature.display(&m.name)],
        CommentData::Constructor(c) => {
            vec![c.signature.display(crate::comment_data::split_fqn(&c.fqn).1)]
        }
        CommentData::OverloadedMethod(m) => {
            m.overloads.iter().map(|o| o.signature.clone()).collect()
        }
        CommentData::OverloadedConstructor(c) => {
            c.overloads.iter().map(|o| o.signature.clone()).collect()
        }
        _ => Vec::new(),
    }
}

/// First line of the summary, or of the description without one
fn summary_line(entry: &CommentData) -> Option<&str> {
    let tags = entry.tags();
    let text = if tags.summary.is_empty() {
        &tags.description
    } else {
        &tags.summary
    };
    text.lines().next().filter(|line| !line.is_empty())
}
