use crate::ast::Program;
use crate::comment_data::CommentData;
use crate::comment_parser::CommentParser;
use crate::config::{OutputFormat, QuillConfig};
use crate::diagnostics::{DiagnosticsCollector, QuillResult};
use crate::markdown::MarkdownMode;
use crate::output::{wrap_document, OutputBuilder};
use crate::overload::merge_overloads;
use crate::visitor::DocVisitor;
use std::path::Path;
use tracing::{debug, info};

/// Result of one documentation pass
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Rendered document (XML or JSON)
    pub document: String,
    /// Format of `document`
    pub format: OutputFormat,
    /// Final entries, ordered by FQN then source order
    pub entries: Vec<CommentData>,
    /// Content irregularities found along the way
    pub diagnostics: DiagnosticsCollector,
}

impl BuildOutput {
    /// Number of documented entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Find an entry by FQN
    pub fn entry(&self, fqn: &str) -> Option<&CommentData> {
        self.entries.iter().find(|e| e.fqn() == fqn)
    }

    /// Write the document to `path`, creating parent directories
    pub fn write_to(&self, path: impl AsRef<Path>) -> QuillResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.document)?;
        Ok(())
    }
}

/// Builder for configuring a documentation pass
///
/// # Example
///
/// ```no_run
/// use quill::{OutputFormat, QuillBuilder};
///
/// let output = QuillBuilder::new()
///     .format(OutputFormat::Xml)
///     .root_element("api")
///     .build_file("tree.json")
///     .expect("Failed to generate docs");
/// output.write_to("docs/api.xml").expect("Failed to write docs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuillBuilder {
    config: QuillConfig,
}

impl QuillBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from loaded configuration
    pub fn from_config(config: QuillConfig) -> Self {
        Self { config }
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the XML root element name
    pub fn root_element(mut self, name: impl Into<String>) -> Self {
        self.config.root_element = name.into();
        self
    }

    /// Enable or disable the XML declaration
    pub fn xml_declaration(mut self, enable: bool) -> Self {
        self.config.xml_declaration = enable;
        self
    }

    /// Set the prose renderer
    pub fn markdown(mut self, mode: MarkdownMode) -> Self {
        self.config.markdown = mode;
        self
    }

    /// Current settings
    pub fn config(&self) -> &QuillConfig {
        &self.config
    }

    /// Load a program tree from JSON and document it
    pub fn build_file(&self, path: impl AsRef<Path>) -> QuillResult<BuildOutput> {
        let program = Program::from_file(path)?;
        self.build(&program)
    }

    /// Document a program tree
    ///
    /// This method:
    /// 1. Attributes documentation comments to declarations
    /// 2. Merges overloaded callables
    /// 3. Orders entries by FQN, keeping source order for equal FQNs
    /// 4. Renders the document in the configured format
    pub fn build(&self, program: &Program) -> QuillResult<BuildOutput> {
        let parser = CommentParser::with_renderer(self.config.markdown.renderer());
        let mut visitor = DocVisitor::with_parser(parser);
        visitor.visit_program(program)?;

        let (documented, mut diagnostics) = visitor.finish();
        debug!(fragments = documented.len(), "quill.build attributed");

        let mut entries = merge_overloads(documented, &mut diagnostics);
        entries.sort_by(|a, b| a.fqn().cmp(b.fqn()));

        let document = self.render(&entries)?;
        info!(
            entries = entries.len(),
            warnings = diagnostics.warning_count(),
            format = %self.config.format,
            "quill.build complete"
        );

        Ok(BuildOutput {
            document,
            format: self.config.format,
            entries,
            diagnostics,
        })
    }

    fn render(&self, entries: &[CommentData]) -> QuillResult<String> {
        match self.config.format {
            OutputFormat::Xml => {
                let mut builder = OutputBuilder::with_depth(1);
                builder.build_all(entries);
                Ok(wrap_document(
                    &self.config.root_element,
                    self.config.xml_declaration,
                    builder.output(),
                ))
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(entries)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::QuillError;
    use crate::modifiers::Modifier;
    use crate::test::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn math_program() -> Program {
        mock_program(vec![mock_class(
            "Math",
            vec![
                mock_doc_comment(
                    "/**\n * @summary Adds two numbers.\n * @param a First operand\n * @param b Second operand\n * @return The sum\n */",
                ),
                mock_modifier(
                    Modifier::Public,
                    vec![mock_method(
                        "add",
                        vec![mock_param("a", "int"), mock_param("b", "int")],
                    )],
                ),
                mock_doc_comment("/**\n * @overload add\n * @param c Third operand\n */"),
                mock_method(
                    "add",
                    vec![
                        mock_param("a", "int"),
                        mock_param("b", "int"),
                        mock_param("c", "int"),
                    ],
                ),
                mock_doc_comment("/** @summary Absolute value. */"),
                mock_method("abs", vec![mock_param("x", "int")]),
            ],
        )])
    }

    #[test]
    fn test_build_xml_document() {
        let output = QuillBuilder::new()
            .xml_declaration(false)
            .build(&math_program())
            .unwrap();

        assert!(output.diagnostics.is_empty());
        assert_eq!(output.entry_count(), 2);
        assert_eq!(
            output.document,
            r#"<documentation>
  <method>
    <title>Math.abs</title>
    <summary><![CDATA[Absolute value.]]></summary>
    <signature><![CDATA[abs(int x)]]></signature>
  </method>
  <method>
    <title>Math.add</title>
    <summary><![CDATA[Adds two numbers.]]></summary>
    <modifiers>
      <public/>
    </modifiers>
    <overloads>
      <overload>
        <signature><![CDATA[add(int a, int b)]]></signature>
        <parameters>
          <param name="a" type="int"><![CDATA[First operand]]></param>
          <param name="b" type="int"><![CDATA[Second operand]]></param>
        </parameters>
        <return><![CDATA[The sum]]></return>
      </overload>
      <overload>
        <signature><![CDATA[add(int a, int b, int c)]]></signature>
        <parameters>
          <param name="c" type="int"><![CDATA[Third operand]]></param>
        </parameters>
      </overload>
    </overloads>
  </method>
</documentation>
"#
        );
    }

    #[test]
    fn test_build_json_document() {
        let output = QuillBuilder::new()
            .format(OutputFormat::Json)
            .build(&math_program())
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output.document).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["kind"], "overloadedMethod");
        assert_eq!(entries[1]["overloads"].as_array().unwrap().len(), 2);
        assert_eq!(entries[0]["tags"]["summary"], "Absolute value.");
    }

    #[test]
    fn test_entries_sorted_by_fqn() {
        let program = mock_program(vec![
            mock_doc_comment("/** z */"),
            mock_method("zeta", vec![]),
            mock_doc_comment("/** M */"),
            mock_module(
                "alpha",
                vec![mock_doc_comment("/** f */"), mock_method("f", vec![])],
            ),
        ]);

        let output = QuillBuilder::new().build(&program).unwrap();
        let fqns: Vec<_> = output.entries.iter().map(CommentData::fqn).collect();
        assert_eq!(fqns, vec!["alpha", "alpha.f", "zeta"]);
        assert!(output.entry("alpha.f").is_some());
    }

    #[test]
    fn test_empty_program() {
        let output = QuillBuilder::new()
            .root_element("api")
            .build(&Program::default())
            .unwrap();
        assert_eq!(
            output.document,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<api>\n</api>\n"
        );
    }

    #[test]
    fn test_structural_error_propagates() {
        let program = mock_program(vec![mock_constructor(vec![])]);
        let err = QuillBuilder::new().build(&program).unwrap_err();
        assert!(matches!(err, QuillError::Structural(_)));
    }

    #[test]
    fn test_from_config() {
        let config = QuillConfig {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let builder = QuillBuilder::from_config(config);
        assert_eq!(builder.config().format, OutputFormat::Json);
    }

    #[test]
    fn test_build_file_and_write() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("tree.json");
        std::fs::write(&tree, serde_json::to_string(&math_program()).unwrap()).unwrap();

        let output = QuillBuilder::new().build_file(&tree).unwrap();
        let target = dir.path().join("out").join("docs.xml");
        output.write_to(&target).unwrap();

        assert_eq!(std::fs::read_to_string(target).unwrap(), output.document);
    }
}
