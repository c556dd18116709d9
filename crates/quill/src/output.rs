//! XML output document builder
//!
//! [`OutputBuilder`] appends one block per documented entry to an internal
//! buffer. Blocks only contain the parts that carry content: an entry with
//! no examples gets no `<examples>` element, an entry without `@return` gets
//! no `<return>`.
//!
//! Free text goes into CDATA sections; names and attribute values are
//! escaped with `html-escape`.

use crate::comment_data::{
    ClassCommentData, CommentData, ConstructorCommentData, EnumCommentData, FieldCommentData,
    InterfaceCommentData, MethodCommentData, ModuleCommentData, Overload,
    OverloadedConstructorCommentData, OverloadedMethodCommentData,
};
use crate::doc_tags::DocCommentTags;
use crate::modifiers::Modifiers;
use crate::params::{Parameter, Signature};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::debug;

const INDENT: &str = "  ";

/// Wrap text in a CDATA section
///
/// A `]]>` inside the text is split across two sections.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// Wrap built blocks in a document root
pub fn wrap_document(root: &str, xml_declaration: bool, body: &str) -> String {
    let mut document = String::new();
    if xml_declaration {
        document.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    document.push_str(&format!("<{}>\n", root));
    document.push_str(body);
    document.push_str(&format!("</{}>\n", root));
    document
}

/// Split a `@see` reference into `(page, title)`
///
/// `@see Math.sub Subtraction` links `Math.sub` with title `Subtraction`;
/// without a title the page doubles as the title.
pub fn split_see_also(reference: &str) -> (&str, &str) {
    match reference.split_once(char::is_whitespace) {
        Some((page, title)) if !title.trim().is_empty() => (page, title.trim()),
        Some((page, _)) => (page, page),
        None => (reference, reference),
    }
}

/// Builds the XML output document
#[derive(Debug, Clone, Default)]
pub struct OutputBuilder {
    output: String,
    depth: usize,
}

impl OutputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building at a given indentation depth
    pub fn with_depth(depth: usize) -> Self {
        Self {
            output: String::new(),
            depth,
        }
    }

    /// The XML built so far
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Append the block for any entry
    pub fn build(&mut self, entry: &CommentData) {
        debug!(fqn = %entry.fqn(), kind = %entry.kind(), "quill.output.block");
        match entry {
            CommentData::Module(c) => self.build_module(c),
            CommentData::Class(c) => self.build_class(c),
            CommentData::Interface(c) => self.build_interface(c),
            CommentData::Field(c) => self.build_field(c),
            CommentData::Enum(c) => self.build_enumeration(c),
            CommentData::Constructor(c) => self.build_constructor(c),
            CommentData::Method(c) => self.build_method(c),
            CommentData::OverloadedConstructor(c) => self.build_overloaded_constructor(c),
            CommentData::OverloadedMethod(c) => self.build_overloaded_method(c),
        }
    }

    /// Append blocks for every entry, in order
    pub fn build_all<'a>(&mut self, entries: impl IntoIterator<Item = &'a CommentData>) {
        for entry in entries {
            self.build(entry);
        }
    }

    pub fn build_module(&mut self, comment: &ModuleCommentData) {
        self.open("module");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_trailer(&comment.tags);
        self.close("module");
    }

    pub fn build_class(&mut self, comment: &ClassCommentData) {
        self.open("class");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_trailer(&comment.tags);
        self.close("class");
    }

    pub fn build_interface(&mut self, comment: &InterfaceCommentData) {
        self.open("interface");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_trailer(&comment.tags);
        self.close("interface");
    }

    pub fn build_field(&mut self, comment: &FieldCommentData) {
        self.open("field");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.text_element("type", &encode_text(&comment.type_name));
        self.add_trailer(&comment.tags);
        self.close("field");
    }

    pub fn build_enumeration(&mut self, comment: &EnumCommentData) {
        self.open("enum");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        if !comment.members.is_empty() {
            self.open("members");
            for member in &comment.members {
                self.text_element("member", &encode_text(member));
            }
            self.close("members");
        }
        self.add_trailer(&comment.tags);
        self.close("enum");
    }

    pub fn build_method(&mut self, comment: &MethodCommentData) {
        self.open("method");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_signature(&comment.signature.display(&comment.name));
        self.add_parameters(&comment.tags.params, &comment.signature);
        self.add_return(comment.tags.return_info.as_deref());
        self.add_trailer(&comment.tags);
        self.close("method");
    }

    pub fn build_overloaded_method(&mut self, comment: &OverloadedMethodCommentData) {
        self.open("method");
        self.add_title(&comment.fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_overloads(&comment.overloads);
        self.add_trailer(&comment.tags);
        self.close("method");
    }

    pub fn build_constructor(&mut self, comment: &ConstructorCommentData) {
        let (_, name) = crate::comment_data::split_fqn(&comment.fqn);
        self.open("constructor");
        self.add_title(&comment.fqn);
        self.add_class(&comment.class_fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_signature(&comment.signature.display(name));
        self.add_parameters(&comment.tags.params, &comment.signature);
        self.add_trailer(&comment.tags);
        self.close("constructor");
    }

    pub fn build_overloaded_constructor(&mut self, comment: &OverloadedConstructorCommentData) {
        self.open("constructor");
        self.add_title(&comment.fqn);
        self.add_class(&comment.class_fqn);
        self.add_common(&comment.tags, &comment.modifiers);
        self.add_overloads(&comment.overloads);
        self.add_trailer(&comment.tags);
        self.close("constructor");
    }

    /// Summary, description and modifiers, shared by every block
    fn add_common(&mut self, tags: &DocCommentTags, modifiers: &Modifiers) {
        self.add_cdata("summary", &tags.summary);
        self.add_cdata("description", &tags.description);
        self.add_modifiers(modifiers);
    }

    /// Examples, deprecation and see-also, closing every block
    fn add_trailer(&mut self, tags: &DocCommentTags) {
        if !tags.examples.is_empty() {
            self.open("examples");
            for example in &tags.examples {
                self.line(&format!(
                    "<example name=\"{}\">{}</example>",
                    encode_double_quoted_attribute(&example.title),
                    cdata(&example.code)
                ));
            }
            self.close("examples");
        }

        if tags.is_deprecated {
            match tags.deprecated_reason.as_deref() {
                Some(reason) => self.text_element("deprecated", &cdata(reason)),
                None => self.line("<deprecated/>"),
            }
        }

        if !tags.see_also.is_empty() {
            self.open("see-also");
            for reference in &tags.see_also {
                let (page, title) = split_see_also(reference);
                self.line(&format!(
                    "<see page=\"{}\">{}</see>",
                    encode_double_quoted_attribute(page),
                    encode_text(title)
                ));
            }
            self.close("see-also");
        }
    }

    fn add_title(&mut self, title: &str) {
        self.text_element("title", &encode_text(title));
    }

    fn add_class(&mut self, class_fqn: &str) {
        self.text_element("class", &encode_text(class_fqn));
    }

    fn add_signature(&mut self, signature: &str) {
        self.text_element("signature", &cdata(signature));
    }

    fn add_return(&mut self, return_info: Option<&str>) {
        if let Some(text) = return_info {
            self.add_cdata("return", text);
        }
    }

    fn add_modifiers(&mut self, modifiers: &Modifiers) {
        let active = modifiers.active();
        if active.is_empty() {
            return;
        }
        self.open("modifiers");
        for modifier in active {
            self.line(&format!("<{}/>", modifier.keyword()));
        }
        self.close("modifiers");
    }

    fn add_parameters(&mut self, params: &[Parameter], signature: &Signature) {
        if params.is_empty() {
            return;
        }
        self.open("parameters");
        for param in params {
            let name = encode_double_quoted_attribute(&param.name);
            let line = match signature.type_of(&param.name) {
                Some(ty) => format!(
                    "<param name=\"{}\" type=\"{}\">{}</param>",
                    name,
                    encode_double_quoted_attribute(ty),
                    cdata(&param.description)
                ),
                None => format!("<param name=\"{}\">{}</param>", name, cdata(&param.description)),
            };
            self.line(&line);
        }
        self.close("parameters");
    }

    fn add_overloads(&mut self, overloads: &[Overload]) {
        if overloads.is_empty() {
            return;
        }
        self.open("overloads");
        for overload in overloads {
            self.open("overload");
            self.add_signature(&overload.signature);
            self.add_parameters(&overload.params, &overload.declared);
            self.add_return(overload.return_info.as_deref());
            self.close("overload");
        }
        self.close("overloads");
    }

    /// `<tag>CDATA</tag>`, skipped for empty text
    fn add_cdata(&mut self, tag: &str, text: &str) {
        if !text.is_empty() {
            self.text_element(tag, &cdata(text));
        }
    }

    /// `<tag>content</tag>` with already escaped content
    fn text_element(&mut self, tag: &str, content: &str) {
        self.line(&format!("<{tag}>{content}</{tag}>"));
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_tags::Example;
    use crate::modifiers::{Modifier, ModifierSet};
    use crate::params::SignatureParam;
    use crate::test::mock_method_data;
    use pretty_assertions::assert_eq;

    fn add_tags() -> DocCommentTags {
        DocCommentTags {
            summary: "Adds two numbers.".to_string(),
            params: vec![
                Parameter::new("a", "First operand"),
                Parameter::new("b", "Second operand"),
            ],
            return_info: Some("The sum".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_cdata_splits_terminator() {
        assert_eq!(cdata("plain"), "<![CDATA[plain]]>");
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_split_see_also() {
        assert_eq!(split_see_also("Math.sub"), ("Math.sub", "Math.sub"));
        assert_eq!(
            split_see_also("https://example.com/math Math guide"),
            ("https://example.com/math", "Math guide")
        );
    }

    #[test]
    fn test_add_method_block() {
        let mut builder = OutputBuilder::new();
        builder.build(&mock_method_data(
            "Math.add",
            add_tags(),
            &[("a", "int"), ("b", "int")],
        ));

        insta::assert_snapshot!(builder.output(), @r###"
        <method>
          <title>Math.add</title>
          <summary><![CDATA[Adds two numbers.]]></summary>
          <signature><![CDATA[add(int a, int b)]]></signature>
          <parameters>
            <param name="a" type="int"><![CDATA[First operand]]></param>
            <param name="b" type="int"><![CDATA[Second operand]]></param>
          </parameters>
          <return><![CDATA[The sum]]></return>
        </method>
        "###);
    }

    #[test]
    fn test_empty_collections_emit_nothing() {
        let mut builder = OutputBuilder::new();
        builder.build(&mock_method_data("f", DocCommentTags::default(), &[]));

        assert_eq!(
            builder.output(),
            "<method>\n  <title>f</title>\n  <signature><![CDATA[f()]]></signature>\n</method>\n"
        );
        for absent in [
            "<parameters>",
            "<examples>",
            "<see-also>",
            "<modifiers>",
            "<return>",
            "<deprecated",
            "<summary>",
        ] {
            assert!(!builder.output().contains(absent), "unexpected {}", absent);
        }
    }

    #[test]
    fn test_class_block_with_trailer() {
        let comment = ClassCommentData {
            fqn: "Geo.Point".to_string(),
            modifiers: Modifiers::from(
                [Modifier::Public, Modifier::Final]
                    .into_iter()
                    .collect::<ModifierSet>(),
            ),
            tags: DocCommentTags {
                description: "A point & its <coordinates>.".to_string(),
                examples: vec![Example::new("Origin", "Point p = new Point();")],
                see_also: vec!["Geo.Line Lines".to_string()],
                is_deprecated: true,
                ..Default::default()
            },
        };

        let mut builder = OutputBuilder::new();
        builder.build_class(&comment);

        assert_eq!(
            builder.output(),
            r#"<class>
  <title>Geo.Point</title>
  <description><![CDATA[A point & its <coordinates>.]]></description>
  <modifiers>
    <public/>
    <final/>
  </modifiers>
  <examples>
    <example name="Origin"><![CDATA[Point p = new Point();]]></example>
  </examples>
  <deprecated/>
  <see-also>
    <see page="Geo.Line">Lines</see>
  </see-also>
</class>
"#
        );
    }

    #[test]
    fn test_constructor_links_class() {
        let comment = ConstructorCommentData {
            fqn: "Geo.Point.Point".to_string(),
            class_fqn: "Geo.Point".to_string(),
            modifiers: Modifiers::default(),
            tags: DocCommentTags {
                summary: "Creates a point.".to_string(),
                deprecated_reason: Some("Use at()".to_string()),
                is_deprecated: true,
                ..Default::default()
            },
            signature: Signature::new(vec![SignatureParam::new("x", "int")]),
        };

        let mut builder = OutputBuilder::new();
        builder.build_constructor(&comment);

        let output = builder.output();
        assert!(output.starts_with("<constructor>\n  <title>Geo.Point.Point</title>\n  <class>Geo.Point</class>\n"));
        assert!(output.contains("<signature><![CDATA[Point(int x)]]></signature>"));
        assert!(output.contains("<deprecated><![CDATA[Use at()]]></deprecated>"));
    }

    #[test]
    fn test_overloaded_method_block() {
        let comment = OverloadedMethodCommentData {
            fqn: "Math.add".to_string(),
            name: "add".to_string(),
            modifiers: Modifiers::default(),
            tags: DocCommentTags {
                summary: "Adds numbers.".to_string(),
                return_info: Some("Total".to_string()),
                ..Default::default()
            },
            overloads: vec![
                Overload {
                    signature: "add(int a, int b)".to_string(),
                    declared: Signature::new(vec![
                        SignatureParam::new("a", "int"),
                        SignatureParam::new("b", "int"),
                    ]),
                    params: vec![Parameter::new("a", "First")],
                    return_info: None,
                },
                Overload {
                    signature: "add(int[] xs)".to_string(),
                    declared: Signature::new(vec![SignatureParam::new("xs", "int[]")]),
                    params: vec![],
                    return_info: Some("Total".to_string()),
                },
            ],
        };

        let mut builder = OutputBuilder::new();
        builder.build_overloaded_method(&comment);

        assert_eq!(
            builder.output(),
            r#"<method>
  <title>Math.add</title>
  <summary><![CDATA[Adds numbers.]]></summary>
  <overloads>
    <overload>
      <signature><![CDATA[add(int a, int b)]]></signature>
      <parameters>
        <param name="a" type="int"><![CDATA[First]]></param>
      </parameters>
    </overload>
    <overload>
      <signature><![CDATA[add(int[] xs)]]></signature>
      <return><![CDATA[Total]]></return>
    </overload>
  </overloads>
</method>
"#
        );
    }

    #[test]
    fn test_param_without_declared_type() {
        let tags = DocCommentTags {
            params: vec![Parameter::new("ghost", "Not declared")],
            ..Default::default()
        };
        let mut builder = OutputBuilder::new();
        builder.build(&mock_method_data("f", tags, &[]));
        assert!(builder
            .output()
            .contains("<param name=\"ghost\"><![CDATA[Not declared]]></param>"));
    }

    #[test]
    fn test_field_and_enum_blocks() {
        let mut builder = OutputBuilder::with_depth(1);
        builder.build(&CommentData::Field(FieldCommentData {
            fqn: "C.items".to_string(),
            modifiers: Modifiers::default(),
            tags: DocCommentTags::default(),
            type_name: "Map<string, int>".to_string(),
        }));
        builder.build(&CommentData::Enum(EnumCommentData {
            fqn: "Color".to_string(),
            modifiers: Modifiers::default(),
            tags: DocCommentTags::default(),
            members: vec!["Red".to_string()],
        }));

        assert_eq!(
            builder.output(),
            "  <field>\n    <title>C.items</title>\n    <type>Map&lt;string, int&gt;</type>\n  </field>\n\
             \x20 <enum>\n    <title>Color</title>\n    <members>\n      <member>Red</member>\n    </members>\n  </enum>\n"
        );
    }

    #[test]
    fn test_wrap_document() {
        assert_eq!(
            wrap_document("documentation", true, "  <module/>\n"),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<documentation>\n  <module/>\n</documentation>\n"
        );
        assert_eq!(wrap_document("docs", false, ""), "<docs>\n</docs>\n");
    }
}
