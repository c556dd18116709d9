//! Parsed documentation comment tags
//!
//! [`DocCommentTags`] is the typed body of one documentation comment as
//! produced by [`crate::comment_parser::CommentParser`].

use crate::params::Parameter;
use serde::{Deserialize, Serialize};

/// An `@example` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// First line of the tag
    pub title: String,
    /// Remaining lines of the tag
    pub code: String,
}

impl Example {
    /// Create a new example
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
        }
    }
}

/// Structured body of one documentation comment
///
/// Every field defaults to empty; a comment with no tags only ever fills
/// `description`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocCommentTags {
    /// `@summary`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    /// Text before the first tag
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// `@example` blocks, in tag order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,

    /// `@param` entries, in tag order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,

    /// `@return`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_info: Option<String>,

    /// `@see` references (FQNs or URLs, unresolved)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,

    /// `@overload` target name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overload: Option<String>,

    /// `@deprecated` present
    #[serde(default)]
    pub is_deprecated: bool,

    /// `@deprecated` text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_reason: Option<String>,
}

impl DocCommentTags {
    /// Create an empty tags record
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether nothing at all was documented
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let tags = DocCommentTags::new();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_description_alone_is_not_empty() {
        let tags = DocCommentTags {
            description: "Just prose.".to_string(),
            ..Default::default()
        };
        assert!(!tags.is_empty());
    }
}
