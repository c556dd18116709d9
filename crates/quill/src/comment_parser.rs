//! Documentation comment parsing
//!
//! Parsing runs in two stages:
//!
//! 1. [`normalize`] strips the `/**` and `*/` delimiters and the per-line `*`
//!    decoration, producing the comment body.
//! 2. [`scan_tags`] splits the body on `@name` boundaries into raw tags,
//!    which [`CommentParser`] turns into a [`DocCommentTags`] record.
//!
//! The grammar is lenient: unknown tags are ignored and incomplete tags
//! produce empty fields. Anything dropped along the way is reported as a
//! [`TagIssue`] rather than an error.

use crate::doc_tags::{DocCommentTags, Example};
use crate::markdown::{Markdown, PlainText};
use crate::params::Parameter;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// A tag start: `@` plus a lowercase name, at the start of the body or
    /// after whitespace. `user@host` and `/@user` do not start tags.
    static ref TAG_START: Regex = Regex::new(r"(?:^|\s)@([a-z]+)").unwrap();
}

/// Opening delimiter of a documentation comment
pub const DOC_COMMENT_OPEN: &str = "/**";

/// Closing delimiter of a block comment
pub const COMMENT_CLOSE: &str = "*/";

/// Check whether `text` is delimited as a documentation comment
pub fn is_doc_comment(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= DOC_COMMENT_OPEN.len() + COMMENT_CLOSE.len()
        && trimmed.starts_with(DOC_COMMENT_OPEN)
        && trimmed.ends_with(COMMENT_CLOSE)
}

/// Normalize raw comment text into its body
///
/// The first line (the text sharing a line with `/**`) is only trimmed;
/// every following line also loses one leading `*`. Blank lines at either
/// end are dropped, so `/** text */` and a decorated multi-line comment
/// holding the same text normalize identically. Text without delimiters is
/// treated as an already stripped body.
pub fn normalize(comment: &str) -> String {
    let trimmed = comment.trim();
    let inner = if is_doc_comment(trimmed) {
        &trimmed[DOC_COMMENT_OPEN.len()..trimmed.len() - COMMENT_CLOSE.len()]
    } else {
        trimmed
    };

    let lines: Vec<&str> = inner
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line = line.trim();
            if index == 0 {
                line
            } else {
                line.strip_prefix('*').map(str::trim).unwrap_or(line)
            }
        })
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// One tag as found by [`scan_tags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Tag name without the `@`
    pub name: &'a str,
    /// Trimmed text up to the next tag
    pub text: &'a str,
}

/// Split a normalized body into raw tags, in order of appearance
pub fn scan_tags(body: &str) -> Vec<RawTag<'_>> {
    // (position of '@', name, end of name)
    let starts: Vec<(usize, &str, usize)> = TAG_START
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            Some((name.start() - 1, name.as_str(), name.end()))
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(_, name, text_start))| {
            let text_end = starts.get(i + 1).map_or(body.len(), |next| next.0);
            RawTag {
                name,
                text: body[text_start..text_end].trim(),
            }
        })
        .collect()
}

/// Text before the first tag, trimmed
pub fn leading_description(body: &str) -> &str {
    let end = TAG_START
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map_or(body.len(), |name| name.start() - 1);
    body[..end].trim()
}

/// Something the parser dropped or ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagIssue {
    /// A tag name the grammar does not know
    UnknownTag(String),
    /// An `@example` without a title or without code
    DroppedExample(String),
    /// A `@param` with no name
    UnnamedParam,
}

impl TagIssue {
    /// Whether the issue lost documentation (as opposed to ignoring a tag)
    pub fn is_lossy(&self) -> bool {
        !matches!(self, TagIssue::UnknownTag(_))
    }
}

impl fmt::Display for TagIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagIssue::UnknownTag(name) => write!(f, "ignored unknown tag @{}", name),
            TagIssue::DroppedExample(title) if title.is_empty() => {
                write!(f, "dropped empty @example")
            }
            TagIssue::DroppedExample(title) => {
                write!(f, "dropped @example `{}` without code", title)
            }
            TagIssue::UnnamedParam => write!(f, "@param without a parameter name"),
        }
    }
}

/// Result of parsing one documentation comment
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComment {
    /// Normalized body text
    pub body: String,
    /// Structured tags
    pub tags: DocCommentTags,
    /// Dropped or ignored content
    pub issues: Vec<TagIssue>,
}

/// Turns documentation comment text into [`DocCommentTags`]
pub struct CommentParser {
    renderer: Box<dyn Markdown>,
}

impl fmt::Debug for CommentParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentParser").finish_non_exhaustive()
    }
}

impl Default for CommentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentParser {
    /// Create a parser with the identity renderer
    pub fn new() -> Self {
        Self::with_renderer(Box::new(PlainText))
    }

    /// Create a parser with a custom prose renderer
    pub fn with_renderer(renderer: Box<dyn Markdown>) -> Self {
        Self { renderer }
    }

    /// Parse raw comment text, delimiters included
    pub fn parse(&self, comment: &str) -> ParsedComment {
        let body = normalize(comment);
        let (tags, issues) = self.parse_body(&body);
        ParsedComment { body, tags, issues }
    }

    /// Parse an already normalized body
    pub fn parse_body(&self, body: &str) -> (DocCommentTags, Vec<TagIssue>) {
        let mut tags = DocCommentTags {
            description: self.markdown(leading_description(body)),
            ..Default::default()
        };
        let mut issues = Vec::new();

        for raw in scan_tags(body) {
            let text = raw.text;
            match raw.name {
                "summary" => tags.summary = self.markdown(text),
                "example" => match parse_example(text) {
                    Some(example) => tags.examples.push(example),
                    None => issues.push(TagIssue::DroppedExample(
                        text.lines().next().unwrap_or_default().trim().to_string(),
                    )),
                },
                "overload" => {
                    if !text.is_empty() {
                        tags.overload = Some(text.to_string());
                    }
                }
                "deprecated" => {
                    tags.is_deprecated = true;
                    if !text.is_empty() {
                        tags.deprecated_reason = Some(self.markdown(text));
                    }
                }
                "return" | "returns" => tags.return_info = Some(self.markdown(text)),
                "see" => {
                    if !text.is_empty() {
                        tags.see_also.push(text.to_string());
                    }
                }
                "param" => {
                    let param = parse_param(text);
                    if param.name.is_empty() {
                        issues.push(TagIssue::UnnamedParam);
                    }
                    tags.params.push(param);
                }
                other => issues.push(TagIssue::UnknownTag(other.to_string())),
            }
        }

        (tags, issues)
    }

    /// Render prose through the configured renderer
    pub fn markdown(&self, text: &str) -> String {
        self.renderer.render(text)
    }
}

/// Split `name description`; a bare name gets an empty description
fn parse_param(text: &str) -> Parameter {
    match text.split_once(char::is_whitespace) {
        Some((name, description)) => Parameter::new(name, description.trim()),
        None => Parameter::new(text, ""),
    }
}

/// First line is the title, the rest is code; both must be present
fn parse_example(text: &str) -> Option<Example> {
    let mut lines = text.lines();
    let title = lines.next()?.trim();
    let code = lines.map(str::trim).collect::<Vec<_>>().join("\n");
    let code = code.trim();

    if title.is_empty() || code.is_empty() {
        return None;
    }
    Some(Example::new(title, code))
}
