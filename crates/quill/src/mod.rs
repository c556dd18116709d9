//! quill: Documentation comment extraction engine
//!
//! This crate turns a parsed program tree into structured documentation by:
//! - Recognizing `/** ... */` documentation comments
//! - Attributing each comment to the declaration it immediately precedes
//! - Parsing the comment body into typed tags (`@summary`, `@param`, ...)
//! - Merging documentation scattered across overloaded callables
//! - Rendering the result as an XML (or JSON) document
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Program tree    │  (JSON from a language parser)
//! └────────┬────────┘
//!          ▼
//!   ┌──────────────┐     ┌────────────────┐
//!   │  DocVisitor  │────▶│ CommentParser  │
//!   └──────┬───────┘     └────────────────┘
//!          ▼
//!   ┌──────────────┐
//!   │ CommentData  │  (one per documented declaration)
//!   └──────┬───────┘
//!          ▼
//!   ┌──────────────────┐
//!   │ merge_overloads  │
//!   └──────┬───────────┘
//!          ▼
//!   ┌──────────────────┐
//!   │  OutputBuilder   │  (XML)  / serde_json (JSON)
//!   └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use quill::{Program, QuillBuilder};
//!
//! let program = Program::from_file("tree.json").expect("Failed to load tree");
//! let output = QuillBuilder::new()
//!     .build(&program)
//!     .expect("Failed to generate docs");
//! println!("{}", output.document);
//! ```

// Core types
pub mod ast;
pub mod comment_data;
pub mod doc_tags;
pub mod modifiers;
pub mod params;

// Parsing and attribution
pub mod comment_parser;
pub mod markdown;
pub mod overload;
pub mod type_name;
pub mod visitor;

// Output and utilities
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod printer;

// Re-exports for convenience
pub use ast::{Node, Program, Span, TypeAnnotation};
pub use comment_data::{CommentData, CommentKind};
pub use comment_parser::{CommentParser, ParsedComment, TagIssue};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, QuillError, QuillResult};
pub use doc_tags::{DocCommentTags, Example};
pub use markdown::{Markdown, MarkdownMode, PlainText};
pub use modifiers::{Modifier, ModifierSet, Modifiers};
pub use params::{Parameter, Signature, SignatureParam};

// Attribution and merging
pub use overload::merge_overloads;
pub use visitor::{DocVisitor, TraversalContext};

// Output
pub use output::OutputBuilder;
pub use printer::DocPrinter;

// Builder API
pub use builder::{BuildOutput, QuillBuilder};
pub use config::{OutputFormat, QuillConfig};

#[cfg(feature = "commonmark")]
pub use markdown::CommonMark;
