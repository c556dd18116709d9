//! Configuration loaded from `quill.toml`
//!
//! ```toml
//! format = "xml"            # or "json"
//! root_element = "documentation"
//! xml_declaration = true
//! markdown = "plain"        # or "commonmark"
//! ```
//!
//! Every key is optional.

use crate::diagnostics::{QuillError, QuillResult};
use crate::markdown::MarkdownMode;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

lazy_static! {
    static ref XML_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").unwrap();
}

/// Default name of the configuration file
pub const CONFIG_FILE_NAME: &str = "quill.toml";

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    /// File extension for documents in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(QuillError::other(format!(
                "Unknown output format: {} (expected xml or json)",
                s
            ))),
        }
    }
}

/// Documentation generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Output document format
    pub format: OutputFormat,
    /// Name of the XML root element
    pub root_element: String,
    /// Emit `<?xml ...?>` before the root element
    pub xml_declaration: bool,
    /// Prose renderer
    pub markdown: MarkdownMode,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xml,
            root_element: "documentation".to_string(),
            xml_declaration: true,
            markdown: MarkdownMode::Plain,
        }
    }
}

impl QuillConfig {
    /// Parse configuration from TOML text
    ///
    /// `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: impl AsRef<Path>) -> QuillResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| QuillError::config(origin.as_ref(), e.to_string()))?;
        config.validate(origin.as_ref())?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> QuillResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QuillError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// Load `quill.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: impl AsRef<Path>) -> QuillResult<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self, origin: &Path) -> QuillResult<()> {
        if !XML_NAME.is_match(&self.root_element) {
            return Err(QuillError::config(
                origin,
                format!("root_element `{}` is not a valid XML name", self.root_element),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_defaults() {
        let config = QuillConfig::from_toml_str("", "quill.toml").unwrap();
        assert_eq!(config, QuillConfig::default());
        assert_eq!(config.root_element, "documentation");
        assert!(config.xml_declaration);
    }

    #[test]
    fn test_partial_config() {
        let config = QuillConfig::from_toml_str(
            "format = \"json\"\nmarkdown = \"commonmark\"",
            "quill.toml",
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.markdown, MarkdownMode::CommonMark);
        assert_eq!(config.root_element, "documentation");
    }

    #[test]
    fn test_invalid_config() {
        let err = QuillConfig::from_toml_str("format = \"yaml\"", "bad.toml").unwrap_err();
        assert!(matches!(err, QuillError::Config { .. }));

        let err = QuillConfig::from_toml_str("root_element = \"1 docs\"", "bad.toml").unwrap_err();
        assert!(err.to_string().contains("root_element"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "root_element = \"api\"\nxml_declaration = false").unwrap();

        let config = QuillConfig::from_file(file.path()).unwrap();
        assert_eq!(config.root_element, "api");
        assert!(!config.xml_declaration);
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert_eq!(QuillConfig::discover(dir.path()).unwrap(), QuillConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "format = \"json\"").unwrap();
        assert_eq!(
            QuillConfig::discover(dir.path()).unwrap().format,
            OutputFormat::Json
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("XML".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
