//! Builder API for quill
//!
//! This module ties the documentation pass together: attribution, overload
//! merging, ordering and rendering of the output document.

mod quill_builder;

pub use quill_builder::{BuildOutput, QuillBuilder};
