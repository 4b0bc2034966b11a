//! ValueSet and CodeSystem models, plus the loader-facing envelope enum.

use serde::{Deserialize, Serialize};

use crate::structure_definition::StructureDefinition;

/// A FHIR ValueSet: a named, versioned selection of codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSet {
    /// Computable name, also the generated enum type name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Canonical URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Version of this value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Content logical definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose: Option<ValueSetCompose>,
}

/// The compose element of a value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetCompose {
    /// Code systems included in this value set
    #[serde(default)]
    pub include: Vec<ValueSetInclude>,
}

/// One include clause of a value-set compose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetInclude {
    /// Canonical URL of the included code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl ValueSet {
    /// The include clauses, empty when no compose element is present.
    pub fn includes(&self) -> &[ValueSetInclude] {
        self.compose
            .as_ref()
            .map(|c| c.include.as_slice())
            .unwrap_or(&[])
    }
}

/// A FHIR CodeSystem: the authority defining a set of codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSystem {
    /// Computable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Canonical URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Version of this code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Concepts defined by this code system
    #[serde(default)]
    pub concept: Vec<CodeSystemConcept>,
}

/// One concept in a code system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSystemConcept {
    /// The code itself, as it appears on the wire
    pub code: String,

    /// Human-friendly label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Formal definition text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

/// A definition resource as it appears in an input schema document,
/// discriminated by `resourceType`.
///
/// Anything other than the three definition kinds the generator consumes
/// lands in `Other` and is ignored by the loader.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "resourceType")]
pub enum DefinitionResource {
    /// A structure definition
    StructureDefinition(StructureDefinition),
    /// A value set
    ValueSet(ValueSet),
    /// A code system
    CodeSystem(CodeSystem),
    /// Any other resource type
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_set_includes() {
        let json = r#"{
            "resourceType": "ValueSet",
            "name": "AdministrativeGender",
            "url": "http://hl7.org/fhir/ValueSet/administrative-gender",
            "compose": {
                "include": [{"system": "http://hl7.org/fhir/administrative-gender"}]
            }
        }"#;
        let vs: ValueSet = serde_json::from_str(json).unwrap();
        assert_eq!(vs.includes().len(), 1);
        assert_eq!(
            vs.includes()[0].system.as_deref(),
            Some("http://hl7.org/fhir/administrative-gender")
        );
    }

    #[test]
    fn test_envelope_discrimination() {
        let sd: DefinitionResource =
            serde_json::from_str(r#"{"resourceType":"StructureDefinition","name":"Patient"}"#)
                .unwrap();
        assert!(matches!(sd, DefinitionResource::StructureDefinition(_)));

        let other: DefinitionResource =
            serde_json::from_str(r#"{"resourceType":"SearchParameter","name":"x"}"#).unwrap();
        assert!(matches!(other, DefinitionResource::Other));
    }

    #[test]
    fn test_code_system_round_trip_keeps_absent_optionals() {
        let json = r#"{"code":"male"}"#;
        let concept: CodeSystemConcept = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&concept).unwrap(), json);
    }
}
