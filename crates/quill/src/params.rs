//! Parameter definition types
//!
//! `Parameter` is what a `@param` tag documents; `SignatureParam` is what the
//! program tree declares. Output joins the two by name.

use serde::{Deserialize, Serialize};

/// A documented parameter from a `@param` tag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name (first token of the tag text)
    pub name: String,

    /// Parameter description (may be empty)
    pub description: String,
}

impl Parameter {
    /// Create a new documented parameter
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A declared parameter with its reconstructed type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureParam {
    /// Parameter name
    pub name: String,

    /// Type name as written in source
    pub type_name: String,
}

impl SignatureParam {
    /// Create a new signature parameter
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Get the parameter declaration (`int a`)
    pub fn declaration(&self) -> String {
        format!("{} {}", self.type_name, self.name)
    }
}

/// The declared parameter list and return type of one callable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<SignatureParam>,

    /// Declared return type; constructors and untyped methods have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl Signature {
    /// Create a signature from its parameters
    pub fn new(params: Vec<SignatureParam>) -> Self {
        Self {
            params,
            return_type: None,
        }
    }

    /// Set the declared return type
    pub fn with_return(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Find the declared type of a parameter
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.type_name.as_str())
    }

    /// Render the call signature for `name`, e.g. `add(int a, int b)`,
    /// prefixed by the return type when one is declared
    pub fn display(&self, name: &str) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.declaration()).collect();
        match self.return_type {
            Some(ref ret) => format!("{} {}({})", ret, name, params.join(", ")),
            None => format!("{}({})", name, params.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_display() {
        let sig = Signature::new(vec![
            SignatureParam::new("a", "int"),
            SignatureParam::new("b", "int"),
        ]);
        assert_eq!(sig.display("add"), "add(int a, int b)");
        assert_eq!(Signature::default().display("now"), "now()");
    }

    #[test]
    fn test_signature_display_with_return() {
        let sig = Signature::new(vec![SignatureParam::new("xs", "int[]")]).with_return("int");
        assert_eq!(sig.display("sum"), "int sum(int[] xs)");

        let json = serde_json::to_value(Signature::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_type_of() {
        let sig = Signature::new(vec![SignatureParam::new("items", "string[]")]);
        assert_eq!(sig.type_of("items"), Some("string[]"));
        assert_eq!(sig.type_of("missing"), None);
    }
}
