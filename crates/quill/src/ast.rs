//! Program tree consumed by the documentation pass
//!
//! The tree is produced by a language parser (or loaded from a JSON dump of
//! one) and is read-only here. Node kinds form a closed enum tagged by
//! `kind`; type annotations form a closed enum tagged by `shape`.

use crate::diagnostics::{QuillError, QuillResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Byte range of a node in the source text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check whether this span ends before `other` starts
    pub fn is_before(&self, other: &Span) -> bool {
        self.end <= other.start
    }
}

/// A parsed source program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub body: Vec<Node>,
}

impl Program {
    /// Create a program from its top-level nodes
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }

    /// Load a program from its JSON form
    pub fn from_json(json: &str) -> QuillResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a program from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> QuillResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QuillError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Any node of the program tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    DocComment(DocComment),
    Module(ModuleDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
    Variable(VariableDecl),
    Modifier(ModifierScope),
    Statement(Statement),
}

impl Node {
    /// Source range of the node
    pub fn span(&self) -> Span {
        match self {
            Node::DocComment(n) => n.span,
            Node::Module(n) => n.span,
            Node::Class(n) => n.span,
            Node::Interface(n) => n.span,
            Node::Enum(n) => n.span,
            Node::Constructor(n) => n.span,
            Node::Method(n) => n.span,
            Node::Variable(n) => n.span,
            Node::Modifier(n) => n.span,
            Node::Statement(n) => n.span,
        }
    }

    /// Mutable access to the span, for tree builders
    pub fn span_mut(&mut self) -> &mut Span {
        match self {
            Node::DocComment(n) => &mut n.span,
            Node::Module(n) => &mut n.span,
            Node::Class(n) => &mut n.span,
            Node::Interface(n) => &mut n.span,
            Node::Enum(n) => &mut n.span,
            Node::Constructor(n) => &mut n.span,
            Node::Method(n) => &mut n.span,
            Node::Variable(n) => &mut n.span,
            Node::Modifier(n) => &mut n.span,
            Node::Statement(n) => &mut n.span,
        }
    }

    /// Child nodes of container kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Module(n) => &n.body,
            Node::Class(n) => &n.body,
            Node::Interface(n) => &n.body,
            Node::Modifier(n) => &n.body,
            _ => &[],
        }
    }

    /// Mutable child nodes of container kinds
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Module(n) => Some(&mut n.body),
            Node::Class(n) => Some(&mut n.body),
            Node::Interface(n) => Some(&mut n.body),
            Node::Modifier(n) => Some(&mut n.body),
            _ => None,
        }
    }
}

/// A comment token. Only `/** ... */` comments document anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

/// `module a.b.c { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// Dotted module name
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub body: Vec<Node>,
}

impl ModuleDecl {
    /// Components of the dotted name
    pub fn name_parts(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub params: Vec<Param>,
}

/// A method, or a free function when not inside a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeAnnotation>,
}

/// A variable statement, possibly declaring several names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDecl {
    #[serde(default)]
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<TypeAnnotation>,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

/// A modifier keyword applied to the nodes it wraps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierScope {
    pub modifier: crate::modifiers::Modifier,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub body: Vec<Node>,
}

/// Any statement that is not a declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub span: Span,
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<TypeAnnotation>,
}

impl Param {
    pub fn new(name: impl Into<String>, type_annotation: Option<TypeAnnotation>) -> Self {
        Self {
            name: name.into(),
            type_annotation,
        }
    }
}

/// A type as written in source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum TypeAnnotation {
    /// `int`
    Identifier { name: String },
    /// `object.member`
    Membered {
        object: Box<TypeAnnotation>,
        member: String,
    },
    /// `element[]`
    Array { element: Box<TypeAnnotation> },
    /// `returnType(paramTypes...)`
    #[serde(rename_all = "camelCase")]
    Callback {
        return_type: Box<TypeAnnotation>,
        #[serde(default)]
        params: Vec<TypeAnnotation>,
    },
    /// `base<args...>`
    GenericInstantiation {
        base: Box<TypeAnnotation>,
        #[serde(default)]
        args: Vec<TypeAnnotation>,
    },
    /// A shape this crate does not reconstruct
    #[serde(other)]
    Unknown,
}

impl TypeAnnotation {
    /// Shorthand for an identifier type
    pub fn ident(name: impl Into<String>) -> Self {
        TypeAnnotation::Identifier { name: name.into() }
    }

    /// Shorthand for an array of `element`
    pub fn array(element: TypeAnnotation) -> Self {
        TypeAnnotation::Array {
            element: Box::new(element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Modifier;

    #[test]
    fn test_is_before() {
        let comment = Span::new(0, 10);
        assert!(comment.is_before(&Span::new(10, 20)));
        assert!(comment.is_before(&Span::new(15, 20)));
        assert!(!comment.is_before(&Span::new(5, 20)));
    }

    #[test]
    fn test_program_from_json() {
        let json = r#"{
            "body": [
                { "kind": "docComment", "text": "/** Hi */", "span": { "start": 0, "end": 9 } },
                {
                    "kind": "modifier",
                    "modifier": "public",
                    "span": { "start": 10, "end": 60 },
                    "body": [{
                        "kind": "method",
                        "name": "add",
                        "span": { "start": 17, "end": 60 },
                        "params": [
                            { "name": "xs", "typeAnnotation": {
                                "shape": "array",
                                "element": { "shape": "identifier", "name": "int" }
                            } },
                            { "name": "y" }
                        ]
                    }]
                },
                { "kind": "statement", "span": { "start": 61, "end": 70 } }
            ]
        }"#;

        let program = Program::from_json(json).unwrap();
        assert_eq!(program.body.len(), 3);

        let Node::Modifier(scope) = &program.body[1] else {
            panic!("expected modifier scope");
        };
        assert_eq!(scope.modifier, Modifier::Public);

        let Node::Method(method) = &scope.body[0] else {
            panic!("expected method");
        };
        assert_eq!(method.params.len(), 2);
        assert_eq!(
            method.params[0].type_annotation,
            Some(TypeAnnotation::array(TypeAnnotation::ident("int")))
        );
        assert!(method.params[1].type_annotation.is_none());
    }

    #[test]
    fn test_unknown_type_shape() {
        let ty: TypeAnnotation = serde_json::from_str(r#"{ "shape": "tuple" }"#).unwrap();
        assert_eq!(ty, TypeAnnotation::Unknown);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Program::from_json(r#"{ "body": [{ "kind": "lambda" }] }"#).unwrap_err();
        assert!(matches!(err, QuillError::Json(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Program::from_file("/nonexistent/tree.json").unwrap_err();
        assert!(matches!(err, QuillError::FileNotFound(_)));
    }

    #[test]
    fn test_module_name_parts() {
        let module = ModuleDecl {
            name: "a.b.c".to_string(),
            span: Span::default(),
            body: vec![],
        };
        assert_eq!(module.name_parts().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
