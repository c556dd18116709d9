//! Type name reconstruction
//!
//! Renders a [`TypeAnnotation`] back into source form for signatures.

use crate::ast::{Param, TypeAnnotation};
use crate::params::{Signature, SignatureParam};

/// Type name used when no annotation is present or its shape is unknown
pub const FALLBACK_TYPE: &str = "var";

/// Render a type annotation as source text
pub fn type_name(ty: &TypeAnnotation) -> String {
    match ty {
        TypeAnnotation::Identifier { name } => name.clone(),
        TypeAnnotation::Membered { object, member } => {
            format!("{}.{}", type_name(object), member)
        }
        TypeAnnotation::Array { element } => format!("{}[]", type_name(element)),
        TypeAnnotation::Callback {
            return_type,
            params,
        } => format!("{}({})", type_name(return_type), join(params)),
        TypeAnnotation::GenericInstantiation { base, args } => {
            format!("{}<{}>", type_name(base), join(args))
        }
        TypeAnnotation::Unknown => FALLBACK_TYPE.to_string(),
    }
}

/// Render an optional annotation, falling back to [`FALLBACK_TYPE`]
pub fn type_name_or_var(ty: Option<&TypeAnnotation>) -> String {
    ty.map(type_name)
        .unwrap_or_else(|| FALLBACK_TYPE.to_string())
}

/// Reconstruct the signature of a parameter list and optional return type
pub fn signature_of(params: &[Param], return_type: Option<&TypeAnnotation>) -> Signature {
    let signature = Signature::new(
        params
            .iter()
            .map(|p| SignatureParam::new(&p.name, type_name_or_var(p.type_annotation.as_ref())))
            .collect(),
    );
    match return_type {
        Some(ty) => signature.with_return(type_name(ty)),
        None => signature,
    }
}

fn join(types: &[TypeAnnotation]) -> String {
    types.iter().map(type_name).collect::<Vec<_>>().join(", ")
}
