//! Text rendering for comment prose
//!
//! Summary, description, return and deprecation text pass through a
//! [`Markdown`] renderer. The default is the identity; a CommonMark
//! renderer is available with the `commonmark` feature.

use serde::{Deserialize, Serialize};

/// Renders comment prose into output text
pub trait Markdown {
    /// Render one block of text
    fn render(&self, text: &str) -> String;
}

/// Identity renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Markdown for PlainText {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

/// CommonMark renderer producing HTML fragments
#[cfg(feature = "commonmark")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

#[cfg(feature = "commonmark")]
impl Markdown for CommonMark {
    fn render(&self, text: &str) -> String {
        let options = comrak::Options::default();
        comrak::markdown_to_html(text, &options).trim_end().to_string()
    }
}

/// Renderer selection as it appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownMode {
    /// Leave text untouched
    #[default]
    Plain,
    /// Render as CommonMark (needs the `commonmark` feature)
    CommonMark,
}

impl MarkdownMode {
    /// Build the renderer for this mode
    ///
    /// Falls back to [`PlainText`] when CommonMark support was not compiled in.
    pub fn renderer(&self) -> Box<dyn Markdown> {
        match self {
            MarkdownMode::Plain => Box::new(PlainText),
            #[cfg(feature = "commonmark")]
            MarkdownMode::CommonMark => Box::new(CommonMark),
            #[cfg(not(feature = "commonmark"))]
            MarkdownMode::CommonMark => {
                tracing::warn!("commonmark rendering requested but not compiled in, using plain text");
                Box::new(PlainText)
            }
        }
    }
}
