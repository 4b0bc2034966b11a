//! StructureDefinition and ElementDefinition models.
//!
//! These mirror the subset of the FHIR conformance layer the struct
//! generator actually consumes: a flattened, path-addressed element list
//! with cardinality, declared types, content references and terminology
//! bindings.

use serde::{Deserialize, Serialize};

/// A FHIR StructureDefinition describing one resource or data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDefinition {
    /// Computable name, also the generated type name
    pub name: String,

    /// Canonical URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Version of this definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Definition kind: `resource`, `complex-type`, `primitive-type` or `logical`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Whether this definition is abstract and never instantiated directly
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,

    /// Base definition this one specializes
    #[serde(rename = "baseDefinition", skip_serializing_if = "Option::is_none")]
    pub base_definition: Option<String>,

    /// Fully flattened element view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
}

/// The snapshot view of a structure definition: every element, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Element definitions in tree order
    pub element: Vec<ElementDefinition>,
}

impl StructureDefinition {
    /// The flattened element list, empty when no snapshot is present.
    pub fn elements(&self) -> &[ElementDefinition] {
        self.snapshot
            .as_ref()
            .map(|s| s.element.as_slice())
            .unwrap_or(&[])
    }

    /// True when this definition describes a concrete resource kind.
    pub fn is_concrete_resource(&self) -> bool {
        self.kind.as_deref() == Some("resource") && !self.is_abstract.unwrap_or(false)
    }
}

/// One row of a flattened structure definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Dotted path, e.g. `Patient.contact.name`
    pub path: String,

    /// Minimum cardinality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Maximum cardinality: `"1"`, `"*"` or a digit string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Declared value types
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<ElementType>>,

    /// Reference to another element whose type this element reuses,
    /// in `#Path.to.element` form
    #[serde(rename = "contentReference", skip_serializing_if = "Option::is_none")]
    pub content_reference: Option<String>,

    /// Terminology binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<ElementBinding>,

    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
}

/// A declared type on an element definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementType {
    /// Type code, e.g. `boolean`, `code`, `BackboneElement`, `Reference`
    pub code: String,
}

/// A terminology binding on an element definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBinding {
    /// Binding strength: `required`, `extensible`, `preferred` or `example`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,

    /// Canonical value-set URL, possibly carrying a `|version` suffix
    #[serde(rename = "valueSet", skip_serializing_if = "Option::is_none")]
    pub value_set: Option<String>,
}

impl ElementDefinition {
    /// Nesting depth of this element's path: number of dots.
    ///
    /// `Patient` is depth 0, `Patient.contact.name` is depth 2.
    pub fn depth(&self) -> usize {
        self.path.matches('.').count()
    }

    /// Last segment of the dotted path.
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// True when the maximum cardinality allows more than one value.
    pub fn is_array(&self) -> bool {
        self.max.as_deref().is_some_and(|m| m != "1" && m != "0")
    }

    /// True when the minimum cardinality is zero.
    pub fn is_optional(&self) -> bool {
        self.min.unwrap_or(0) == 0
    }

    /// The required value-set URL, present only for `required` bindings.
    pub fn required_binding(&self) -> Option<&str> {
        let binding = self.binding.as_ref()?;
        if binding.strength.as_deref() != Some("required") {
            return None;
        }
        binding.value_set.as_deref()
    }
}
