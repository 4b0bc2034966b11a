//! Intermediate type descriptors produced by the element walk and
//! consumed by the source emitter.

/// What kind of declaration a descriptor turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A concrete resource: gets a `resourceType` discriminator and
    /// marshal/unmarshal helpers
    Resource,
    /// A standalone data type
    Complex,
    /// An inline backbone element, named after its parent and field
    Backbone,
}

/// The resolved type of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `boolean`
    Bool,
    /// `integer`, `positiveInt`, `unsignedInt`
    Integer,
    /// `decimal`
    Decimal,
    /// `date`
    Date,
    /// `dateTime`, carried as a precision-tagged literal
    DateTime,
    /// `time`
    Time,
    /// Every textual primitive
    String,
    /// An untyped polymorphic `Resource` field, kept as raw JSON
    RawJson,
    /// Another generated struct type
    Named(String),
    /// A value-set-backed enumeration type
    Enum(String),
}

impl FieldType {
    /// The Rust type spelled into emitted code.
    pub fn rust_type(&self) -> String {
        match self {
            FieldType::Bool => "bool".to_string(),
            FieldType::Integer => "i32".to_string(),
            FieldType::Decimal => "fhirmodels_core::FhirDecimal".to_string(),
            FieldType::Date => "fhirmodels_core::FhirDate".to_string(),
            FieldType::DateTime => "fhirmodels_core::FhirDateTime".to_string(),
            FieldType::Time => "fhirmodels_core::FhirTime".to_string(),
            FieldType::String => "String".to_string(),
            FieldType::RawJson => "serde_json::Value".to_string(),
            FieldType::Named(name) | FieldType::Enum(name) => name.clone(),
        }
    }
}

/// One field of a generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Descriptor-level field name (`BirthDate`, `ID`)
    pub name: String,
    /// The JSON property name as it appears on the wire (`birthDate`, `id`)
    pub json_name: String,
    /// Resolved field type
    pub ty: FieldType,
    /// Maximum cardinality allows repetition
    pub array: bool,
    /// Minimum cardinality is zero
    pub optional: bool,
}

/// A generated type: name plus a flat ordered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name (`Patient`, `PatientContact`)
    pub name: String,
    /// Declaration kind
    pub kind: TypeKind,
    /// Fields in element order
    pub fields: Vec<FieldDescriptor>,
}
