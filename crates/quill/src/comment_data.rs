//! Documented declaration records
//!
//! One aggregate per attributable declaration kind, unified by
//! [`CommentData`]. Overloaded variants only ever come out of
//! [`crate::overload::merge_overloads`].

use crate::doc_tags::DocCommentTags;
use crate::modifiers::Modifiers;
use crate::params::{Parameter, Signature};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCommentData {
    pub fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCommentData {
    pub fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCommentData {
    pub fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
}

/// A documented field or variable (first declarator only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCommentData {
    pub fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    /// Declared type, `var` when absent
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumCommentData {
    pub fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

/// A documented constructor; its FQN ends with the class simple name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorCommentData {
    pub fqn: String,
    pub class_fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    pub signature: Signature,
}

/// A documented method or free function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodCommentData {
    pub fqn: String,
    pub name: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    pub signature: Signature,
}

/// One signature of an overloaded callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overload {
    /// Rendered call signature, e.g. `add(int a, int b)`
    pub signature: String,
    /// Declared parameters
    pub declared: Signature,
    /// `@param` tags of this fragment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_info: Option<String>,
}

/// Merged documentation of several method fragments sharing one FQN
///
/// `tags` come from the primary fragment with `params` moved into the
/// per-signature [`Overload`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadedMethodCommentData {
    pub fqn: String,
    pub name: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    pub overloads: Vec<Overload>,
}

/// Merged documentation of several constructor fragments of one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadedConstructorCommentData {
    pub fqn: String,
    pub class_fqn: String,
    pub modifiers: Modifiers,
    pub tags: DocCommentTags,
    pub overloads: Vec<Overload>,
}

/// Kind of a documented entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentKind {
    Module,
    Class,
    Interface,
    Field,
    Enum,
    Constructor,
    Method,
    OverloadedConstructor,
    OverloadedMethod,
}

impl CommentKind {
    /// Get display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            CommentKind::Module => "module",
            CommentKind::Class => "class",
            CommentKind::Interface => "interface",
            CommentKind::Field => "field",
            CommentKind::Enum => "enum",
            CommentKind::Constructor => "constructor",
            CommentKind::Method => "method",
            CommentKind::OverloadedConstructor => "constructor (overloaded)",
            CommentKind::OverloadedMethod => "method (overloaded)",
        }
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A documented declaration of any kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommentData {
    Module(ModuleCommentData),
    Class(ClassCommentData),
    Interface(InterfaceCommentData),
    Field(FieldCommentData),
    Enum(EnumCommentData),
    Constructor(ConstructorCommentData),
    Method(MethodCommentData),
    OverloadedConstructor(OverloadedConstructorCommentData),
    OverloadedMethod(OverloadedMethodCommentData),
}

impl CommentData {
    pub fn kind(&self) -> CommentKind {
        match self {
            CommentData::Module(_) => CommentKind::Module,
            CommentData::Class(_) => CommentKind::Class,
            CommentData::Interface(_) => CommentKind::Interface,
            CommentData::Field(_) => CommentKind::Field,
            CommentData::Enum(_) => CommentKind::Enum,
            CommentData::Constructor(_) => CommentKind::Constructor,
            CommentData::Method(_) => CommentKind::Method,
            CommentData::OverloadedConstructor(_) => CommentKind::OverloadedConstructor,
            CommentData::OverloadedMethod(_) => CommentKind::OverloadedMethod,
        }
    }

    pub fn fqn(&self) -> &str {
        match self {
            CommentData::Module(d) => &d.fqn,
            CommentData::Class(d) => &d.fqn,
            CommentData::Interface(d) => &d.fqn,
            CommentData::Field(d) => &d.fqn,
            CommentData::Enum(d) => &d.fqn,
            CommentData::Constructor(d) => &d.fqn,
            CommentData::Method(d) => &d.fqn,
            CommentData::OverloadedConstructor(d) => &d.fqn,
            CommentData::OverloadedMethod(d) => &d.fqn,
        }
    }

    pub fn tags(&self) -> &DocCommentTags {
        match self {
            CommentData::Module(d) => &d.tags,
            CommentData::Class(d) => &d.tags,
            CommentData::Interface(d) => &d.tags,
            CommentData::Field(d) => &d.tags,
            CommentData::Enum(d) => &d.tags,
            CommentData::Constructor(d) => &d.tags,
            CommentData::Method(d) => &d.tags,
            CommentData::OverloadedConstructor(d) => &d.tags,
            CommentData::OverloadedMethod(d) => &d.tags,
        }
    }

    pub fn modifiers(&self) -> &Modifiers {
        match self {
            CommentData::Module(d) => &d.modifiers,
            CommentData::Class(d) => &d.modifiers,
            CommentData::Interface(d) => &d.modifiers,
            CommentData::Field(d) => &d.modifiers,
            CommentData::Enum(d) => &d.modifiers,
            CommentData::Constructor(d) => &d.modifiers,
            CommentData::Method(d) => &d.modifiers,
            CommentData::OverloadedConstructor(d) => &d.modifiers,
            CommentData::OverloadedMethod(d) => &d.modifiers,
        }
    }
}

/// Split an FQN into its enclosing scope and simple name
pub fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rsplit_once('.') {
        Some((scope, name)) => (scope, name),
        None => ("", fqn),
    }
}
