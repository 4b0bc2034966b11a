//! Rust source rendering for type descriptors and value-set enums.
//!
//! One file per structure definition: the root struct followed by its
//! backbone structs. Resource kinds additionally get marshal helpers
//! that inject the `resourceType` discriminator, and an unmarshal
//! helper that surfaces the parse error verbatim.

use std::path::PathBuf;

use fhirmodels_core::{CodeSystem, ValueSet};

use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKind};
use crate::naming;

/// A generated file with its relative path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    /// Full source text
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

fn header(generated_at: &str) -> String {
    format!(
        "// Generated by fhirmodels-gen from FHIR structure definitions. DO NOT EDIT.\n\
         // Generated on {generated_at}.\n\
         //\n\
         // Licensed under either of the Apache License, Version 2.0 or the MIT\n\
         // license, at your option.\n\n"
    )
}

/// Render the file for one structure definition: root descriptor plus
/// its backbone descriptors, in the order the walk discovered them.
pub fn render_structure(descriptors: &[TypeDescriptor], generated_at: &str) -> String {
    let mut out = header(generated_at);
    out.push_str("use serde::{Deserialize, Serialize};\n");
    out.push_str("#[allow(unused_imports)]\nuse super::*;\n\n");

    for (i, desc) in descriptors.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_struct(desc, &mut out);
        if desc.kind == TypeKind::Resource {
            out.push('\n');
            render_resource_impl(desc, &mut out);
        }
    }
    out
}

fn render_struct(desc: &TypeDescriptor, out: &mut String) {
    out.push_str(&format!("/// {}\n", desc.name));
    out.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", desc.name));
    for field in &desc.fields {
        render_field(field, out);
    }
    out.push_str("}\n");
}

fn render_field(field: &FieldDescriptor, out: &mut String) {
    let ident = naming::rust_field_ident(&field.json_name);
    let mut ty = field.ty.rust_type();
    if field.array {
        ty = format!("Vec<{ty}>");
    }
    if field.optional {
        ty = format!("Option<{ty}>");
    }

    let mut serde_parts = Vec::new();
    if ident.trim_start_matches("r#") != field.json_name {
        serde_parts.push(format!("rename = \"{}\"", field.json_name));
    }
    if field.optional {
        serde_parts.push("skip_serializing_if = \"Option::is_none\"".to_string());
    }
    if !serde_parts.is_empty() {
        out.push_str(&format!("    #[serde({})]\n", serde_parts.join(", ")));
    }
    out.push_str(&format!("    pub {ident}: {ty},\n"));
}

fn render_resource_impl(desc: &TypeDescriptor, out: &mut String) {
    let name = &desc.name;
    out.push_str(&format!(
        "impl {name} {{\n\
         \x20   /// The `resourceType` discriminator for this resource.\n\
         \x20   pub fn resource_type(&self) -> &'static str {{\n\
         \x20       \"{name}\"\n\
         \x20   }}\n\
         \n\
         \x20   /// Serialize to JSON with the `resourceType` discriminator injected.\n\
         \x20   pub fn to_json(&self) -> Result<String, serde_json::Error> {{\n\
         \x20       let mut value = serde_json::to_value(self)?;\n\
         \x20       if let Some(object) = value.as_object_mut() {{\n\
         \x20           object.insert(\n\
         \x20               \"resourceType\".to_string(),\n\
         \x20               serde_json::Value::String(\"{name}\".to_string()),\n\
         \x20           );\n\
         \x20       }}\n\
         \x20       serde_json::to_string(&value)\n\
         \x20   }}\n\
         \n\
         \x20   /// Deserialize from JSON bytes.\n\
         \x20   pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {{\n\
         \x20       serde_json::from_slice(bytes)\n\
         \x20   }}\n\
         }}\n"
    ));
}

/// Render the enum file for a value set whose single code system
/// resolved. Variant order follows the code system's concept order.
pub fn render_enum(vs: &ValueSet, cs: &CodeSystem, generated_at: &str) -> String {
    let name = vs.name.as_deref().unwrap_or_default();
    let mut out = header(generated_at);
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    if let Some(url) = &vs.url {
        out.push_str(&format!("/// Codes from value set `{url}`.\n"));
    } else {
        out.push_str(&format!("/// {name}\n"));
    }
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub enum {name} {{\n"));

    let variants: Vec<(String, &fhirmodels_core::CodeSystemConcept)> = cs
        .concept
        .iter()
        .enumerate()
        .map(|(i, c)| (naming::variant_name(&c.code, i), c))
        .collect();

    for (variant, concept) in &variants {
        out.push_str(&format!("    #[serde(rename = {:?})]\n", concept.code));
        out.push_str(&format!("    {variant},\n"));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {name} {{\n"));
    out.push_str("    /// The code as it appears on the wire.\n");
    out.push_str("    pub fn as_str(&self) -> &'static str {\n        match self {\n");
    for (variant, concept) in &variants {
        out.push_str(&format!(
            "            Self::{variant} => {:?},\n",
            concept.code
        ));
    }
    out.push_str("        }\n    }\n\n");

    out.push_str("    /// The formal definition text of the code, when the code system\n");
    out.push_str("    /// carries one.\n");
    out.push_str("    pub fn definition(&self) -> &'static str {\n        match self {\n");
    for (variant, concept) in &variants {
        out.push_str(&format!(
            "            Self::{variant} => {:?},\n",
            concept.definition.as_deref().unwrap_or_default()
        ));
    }
    out.push_str("        }\n    }\n}\n\n");

    out.push_str(&format!(
        "impl std::fmt::Display for {name} {{\n\
         \x20   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{\n\
         \x20       f.write_str(self.as_str())\n\
         \x20   }}\n\
         }}\n"
    ));
    out
}

/// Render the `mod.rs` index tying the generated files together.
pub fn render_index(file_stems: &[String], generated_at: &str) -> String {
    let mut out = header(generated_at);
    for stem in file_stems {
        out.push_str(&format!("pub mod {stem};\n"));
    }
    out.push('\n');
    for stem in file_stems {
        out.push_str(&format!("pub use {stem}::*;\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldType;
    use fhirmodels_core::{CodeSystemConcept, ValueSet};

    fn field(name: &str, json: &str, ty: FieldType, array: bool, optional: bool) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            json_name: json.to_string(),
            ty,
            array,
            optional,
        }
    }

    #[test]
    fn test_struct_rendering() {
        let desc = TypeDescriptor {
            name: "Foo".to_string(),
            kind: TypeKind::Resource,
            fields: vec![
                field("Bar", "bar", FieldType::Bool, false, true),
                field("BirthDate", "birthDate", FieldType::Date, false, true),
                field("Baz", "baz", FieldType::Named("FooBaz".to_string()), false, false),
            ],
        };
        let source = render_structure(std::slice::from_ref(&desc), "2024-01-01T00:00:00Z");

        assert!(source.contains("pub struct Foo {"));
        assert!(source.contains("#[serde(skip_serializing_if = \"Option::is_none\")]\n    pub bar: Option<bool>,"));
        assert!(source.contains("#[serde(rename = \"birthDate\", skip_serializing_if = \"Option::is_none\")]"));
        assert!(source.contains("pub birth_date: Option<fhirmodels_core::FhirDate>,"));
        assert!(source.contains("pub baz: FooBaz,"));
        // Resource kinds get the discriminator helpers.
        assert!(source.contains("\"resourceType\".to_string()"));
        assert!(source.contains("pub fn from_json(bytes: &[u8])"));
    }

    #[test]
    fn test_backbone_types_share_the_file_without_helpers() {
        let descriptors = vec![
            TypeDescriptor {
                name: "Foo".to_string(),
                kind: TypeKind::Complex,
                fields: vec![],
            },
            TypeDescriptor {
                name: "FooBaz".to_string(),
                kind: TypeKind::Backbone,
                fields: vec![field("Qux", "qux", FieldType::String, false, false)],
            },
        ];
        let source = render_structure(&descriptors, "2024-01-01T00:00:00Z");
        assert!(source.contains("pub struct Foo {"));
        assert!(source.contains("pub struct FooBaz {"));
        assert!(source.contains("    pub qux: String,\n"));
        // Data types carry no discriminator.
        assert!(!source.contains("resourceType"));
    }

    #[test]
    fn test_keyword_field_needs_no_rename() {
        let desc = TypeDescriptor {
            name: "Coding".to_string(),
            kind: TypeKind::Complex,
            fields: vec![field("Type", "type", FieldType::String, false, false)],
        };
        let source = render_structure(std::slice::from_ref(&desc), "t");
        // r#type already serializes as "type"; a rename would be noise.
        assert!(source.contains("    pub r#type: String,\n"));
        assert!(!source.contains("rename = \"type\""));
    }

    #[test]
    fn test_enum_rendering() {
        let vs = ValueSet {
            name: Some("FooStatus".to_string()),
            url: Some("http://example.org/vs/status".to_string()),
            version: None,
            compose: None,
        };
        let cs = CodeSystem {
            name: None,
            url: Some("http://example.org/cs/status".to_string()),
            version: None,
            concept: vec![
                CodeSystemConcept {
                    code: "in-progress".to_string(),
                    display: Some("In Progress".to_string()),
                    definition: Some("Still running.".to_string()),
                },
                CodeSystemConcept {
                    code: "done".to_string(),
                    display: None,
                    definition: None,
                },
            ],
        };
        let source = render_enum(&vs, &cs, "t");

        assert!(source.contains("pub enum FooStatus {"));
        assert!(source.contains("#[serde(rename = \"in-progress\")]\n    InProgress,"));
        assert!(source.contains("Self::InProgress => \"in-progress\","));
        assert!(source.contains("Self::InProgress => \"Still running.\","));
        assert!(source.contains("Self::Done => \"\","));
        assert!(source.contains("impl std::fmt::Display for FooStatus"));
    }

    #[test]
    fn test_index_rendering() {
        let source = render_index(
            &["foo".to_string(), "foo_status".to_string()],
            "t",
        );
        assert!(source.contains("pub mod foo;\n"));
        assert!(source.contains("pub use foo_status::*;\n"));
    }
}
