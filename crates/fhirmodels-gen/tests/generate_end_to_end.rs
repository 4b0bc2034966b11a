//! End-to-end generation over a small on-disk corpus.

use std::fs;

use fhirmodels_gen::{DefinitionRegistry, definitions_list, generate_all_at};

fn write_corpus(dir: &std::path::Path) {
    fs::write(
        dir.join("patient.json"),
        r#"{
            "resourceType": "StructureDefinition",
            "name": "Patient",
            "kind": "resource",
            "abstract": false,
            "snapshot": {
                "element": [
                    {"path": "Patient", "min": 0, "max": "*"},
                    {"path": "Patient.id", "min": 0, "max": "1",
                     "type": [{"code": "id"}]},
                    {"path": "Patient.active", "min": 0, "max": "1",
                     "type": [{"code": "boolean"}]},
                    {"path": "Patient.gender", "min": 0, "max": "1",
                     "type": [{"code": "code"}],
                     "binding": {"strength": "required",
                                 "valueSet": "http://example.org/vs/gender|4.0.1"}},
                    {"path": "Patient.name", "min": 0, "max": "*",
                     "type": [{"code": "HumanName"}]},
                    {"path": "Patient.contact", "min": 0, "max": "*",
                     "type": [{"code": "BackboneElement"}]},
                    {"path": "Patient.contact.name", "min": 0, "max": "1",
                     "type": [{"code": "HumanName"}]},
                    {"path": "Patient.birthDate", "min": 0, "max": "1",
                     "type": [{"code": "date"}]}
                ]
            }
        }"#,
    )
    .unwrap();

    fs::write(
        dir.join("human_name.json"),
        r#"{
            "resourceType": "StructureDefinition",
            "name": "HumanName",
            "kind": "complex-type",
            "abstract": false,
            "snapshot": {
                "element": [
                    {"path": "HumanName", "min": 0, "max": "*"},
                    {"path": "HumanName.family", "min": 0, "max": "1",
                     "type": [{"code": "string"}]},
                    {"path": "HumanName.given", "min": 0, "max": "*",
                     "type": [{"code": "string"}]}
                ]
            }
        }"#,
    )
    .unwrap();

    fs::write(
        dir.join("terminology.json"),
        r#"{
            "resourceType": "Bundle",
            "entry": [
                {"resource": {
                    "resourceType": "ValueSet",
                    "name": "AdministrativeGender",
                    "url": "http://example.org/vs/gender",
                    "version": "4.0.1",
                    "compose": {"include": [{"system": "http://example.org/cs/gender"}]}
                }},
                {"resource": {
                    "resourceType": "CodeSystem",
                    "url": "http://example.org/cs/gender",
                    "concept": [
                        {"code": "female", "definition": "Female."},
                        {"code": "male", "definition": "Male."},
                        {"code": "unknown"}
                    ]
                }}
            ]
        }"#,
    )
    .unwrap();
}

#[test]
fn generates_structs_backbones_and_enums_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());

    let registry = DefinitionRegistry::load_dir(dir.path()).unwrap();
    let generated = generate_all_at(&registry, "2024-01-01T00:00:00Z").unwrap();
    assert!(generated.diagnostics.is_empty(), "{:?}", generated.diagnostics);

    let file = |name: &str| {
        generated
            .files
            .iter()
            .find(|f| f.path.to_string_lossy() == name)
            .unwrap_or_else(|| panic!("missing {name}"))
    };

    let patient = file("patient.rs");
    assert!(patient.content.contains("pub struct Patient {"));
    assert!(patient.content.contains("pub struct PatientContact {"));
    assert!(patient.content.contains("pub gender: Option<AdministrativeGender>,"));
    assert!(patient.content.contains("pub name: Option<Vec<HumanName>>,"));
    assert!(patient.content.contains("#[serde(rename = \"birthDate\""));
    assert!(patient.content.contains("\"resourceType\".to_string()"));

    let human_name = file("human_name.rs");
    assert!(human_name.content.contains("pub struct HumanName {"));
    // Data types carry no discriminator helper.
    assert!(!human_name.content.contains("resourceType"));

    let gender = file("administrative_gender.rs");
    assert!(gender.content.contains("pub enum AdministrativeGender {"));
    assert!(gender.content.contains("#[serde(rename = \"female\")]"));
    assert!(gender.content.contains("Self::Male => \"Male.\","));

    let index = file("mod.rs");
    assert!(index.content.contains("pub mod patient;"));
    assert!(index.content.contains("pub use administrative_gender::*;"));

    assert_eq!(definitions_list(&registry), "Patient\n");
}
