//! # FHIR Models Core
//!
//! Core data structures for the fhirmodels toolkit.
//!
//! This crate provides the definition-side model (StructureDefinition,
//! ElementDefinition, ValueSet, CodeSystem) consumed by the struct
//! generator, the client-side resources (Bundle, OperationOutcome)
//! consumed by the REST layer, and the hand-written FHIR primitive
//! wrappers referenced by generated code.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod operation_outcome;
pub mod primitives;
pub mod structure_definition;
pub mod terminology;

pub use bundle::{Bundle, BundleEntry};
pub use operation_outcome::{OperationOutcome, OperationOutcomeIssue};
pub use primitives::{DateTimePrecision, FhirDate, FhirDateTime, FhirDecimal, FhirTime};
pub use structure_definition::{
    ElementBinding, ElementDefinition, ElementType, Snapshot, StructureDefinition,
};
pub use terminology::{
    CodeSystem, CodeSystemConcept, DefinitionResource, ValueSet, ValueSetCompose, ValueSetInclude,
};

/// The FHIR specification version these models target.
pub const FHIR_VERSION: &str = "4.0.1";
