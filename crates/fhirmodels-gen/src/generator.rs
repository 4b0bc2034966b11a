//! The element walk: turns a structure definition's flattened element
//! list into type descriptors.
//!
//! The snapshot is a tree flattened by dotted-path depth. The walk is a
//! recursive descent over that flat list: a child one segment deeper
//! than the current level belongs to the current scope, a backbone
//! child opens a new scope one level down, and the first element at or
//! above the current level closes the scope — its index is returned to
//! the caller so scanning resumes at the right position.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::warn;

use fhirmodels_core::{ElementDefinition, StructureDefinition};

use crate::descriptor::{FieldDescriptor, FieldType, TypeDescriptor, TypeKind};
use crate::error::{GenError, GenResult};
use crate::naming;
use crate::registry::DefinitionRegistry;

/// Value-set names usable as generated enum type identifiers.
static VALUE_SET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z][A-Za-z0-9_]{0,254}$").expect("valid literal pattern"));

/// Mutable state threaded explicitly through the walk.
///
/// There is no hidden shared state anywhere in generation: everything
/// the recursive calls accumulate lives here and is passed by `&mut`.
#[derive(Debug)]
pub struct GenContext<'a> {
    /// The loaded definition corpus
    pub registry: &'a DefinitionRegistry,
    /// Top-level type names referenced but not yet generated
    pub required_types: BTreeSet<String>,
    /// Canonical URLs of value sets that must become enum files
    pub required_value_sets: BTreeSet<String>,
    /// Type names already generated
    pub generated: BTreeSet<String>,
    /// Human-readable notes about degraded or skipped constructs
    pub diagnostics: Vec<String>,
}

impl<'a> GenContext<'a> {
    /// Create a fresh context over a registry.
    pub fn new(registry: &'a DefinitionRegistry) -> Self {
        Self {
            registry,
            required_types: BTreeSet::new(),
            required_value_sets: BTreeSet::new(),
            generated: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    fn diagnostic(&mut self, message: String) {
        warn!("{message}");
        self.diagnostics.push(message);
    }
}

/// Build the descriptor for one structure definition, plus descriptors
/// for every backbone element discovered inside it.
///
/// The root descriptor comes first, auxiliary backbone descriptors
/// follow in discovery order.
pub fn build_type(sd: &StructureDefinition, ctx: &mut GenContext<'_>) -> GenResult<Vec<TypeDescriptor>> {
    let elements = sd.elements();
    if elements.is_empty() {
        return Err(GenError::schema(format!(
            "structure definition {} has no snapshot elements",
            sd.name
        )));
    }

    let kind = if sd.is_concrete_resource() {
        TypeKind::Resource
    } else {
        TypeKind::Complex
    };

    let mut aux = Vec::new();
    let (fields, _end) = emit_fields(elements, 1, 0, &sd.name, ctx, &mut aux);

    let mut descriptors = vec![TypeDescriptor {
        name: sd.name.clone(),
        kind,
        fields,
    }];
    descriptors.extend(aux);
    Ok(descriptors)
}

/// Result of mapping a single type code.
enum Mapped {
    /// A directly usable field type
    Field(FieldType),
    /// An inline backbone element: the field's type must be synthesized
    Backbone,
}

/// The fixed type-code table. Codes not listed pass through as assumed
/// already-defined type names.
fn map_type_code(code: &str) -> Mapped {
    match code {
        "boolean" => Mapped::Field(FieldType::Bool),
        "integer" | "positiveInt" | "unsignedInt" => Mapped::Field(FieldType::Integer),
        "decimal" => Mapped::Field(FieldType::Decimal),
        "date" => Mapped::Field(FieldType::Date),
        "dateTime" => Mapped::Field(FieldType::DateTime),
        "time" => Mapped::Field(FieldType::Time),
        "base64Binary" | "canonical" | "code" | "id" | "instant" | "markdown" | "oid"
        | "string" | "uri" | "url" | "uuid" | "xhtml"
        | "http://hl7.org/fhirpath/System.String" => Mapped::Field(FieldType::String),
        "Element" | "BackboneElement" => Mapped::Backbone,
        other => Mapped::Field(FieldType::Named(other.to_string())),
    }
}

/// Scan direct children of the current scope starting at `index`.
///
/// Returns the collected fields and the index of the first element that
/// closed the scope (or `elements.len()` when the list was exhausted).
pub(crate) fn emit_fields(
    elements: &[ElementDefinition],
    mut index: usize,
    level: usize,
    parent_name: &str,
    ctx: &mut GenContext<'_>,
    aux: &mut Vec<TypeDescriptor>,
) -> (Vec<FieldDescriptor>, usize) {
    let mut fields = Vec::new();

    while index < elements.len() {
        let el = &elements[index];
        let depth = el.depth();
        if depth <= level {
            // End of this nesting scope; the caller resumes here.
            break;
        }
        if depth > level + 1 {
            // Descendants are consumed by the backbone recursion below;
            // reaching one here means the list is out of tree order.
            ctx.diagnostic(format!("element {} is out of tree order; skipped", el.path));
            index += 1;
            continue;
        }

        let segment = el.last_segment();
        if segment == "contained" {
            // Contained resources are not supported yet.
            index += 1;
            continue;
        }

        let name = naming::field_name(segment);
        let json_name = segment.strip_suffix("[x]").unwrap_or(segment).to_string();
        let array = el.is_array();
        let optional = el.is_optional();

        let types = el.types.as_deref().unwrap_or(&[]);
        let ty = match types {
            [] => {
                let Some(reference) = &el.content_reference else {
                    ctx.diagnostic(format!(
                        "element {} declares no type and no content reference; skipped",
                        el.path
                    ));
                    index += 1;
                    continue;
                };
                // Synthetic backbone type name; generated alongside the
                // referenced element's parent, so it is never added to
                // the required-types set.
                fields.push(FieldDescriptor {
                    name,
                    json_name,
                    ty: FieldType::Named(naming::content_reference_type_name(reference)),
                    array,
                    optional,
                });
                index += 1;
                continue;
            }
            [single] => match single.code.as_str() {
                "code" => match el.required_binding() {
                    Some(url) => resolve_enum(url, &el.path, ctx),
                    None => FieldType::String,
                },
                "Resource" => FieldType::RawJson,
                code => match map_type_code(code) {
                    Mapped::Field(ty) => ty,
                    Mapped::Backbone => {
                        let nested_name = format!("{parent_name}{name}");
                        let (nested_fields, next) =
                            emit_fields(elements, index + 1, level + 1, &nested_name, ctx, aux);
                        aux.push(TypeDescriptor {
                            name: nested_name.clone(),
                            kind: TypeKind::Backbone,
                            fields: nested_fields,
                        });
                        fields.push(FieldDescriptor {
                            name,
                            json_name,
                            ty: FieldType::Named(nested_name),
                            array,
                            optional,
                        });
                        index = next;
                        continue;
                    }
                },
            },
            _ => {
                ctx.diagnostic(format!(
                    "choice element {} declares {} types; skipped",
                    el.path,
                    types.len()
                ));
                index += 1;
                continue;
            }
        };

        if let FieldType::Named(type_name) = &ty {
            if type_name.starts_with(|c: char| c.is_ascii_uppercase()) {
                ctx.required_types.insert(type_name.clone());
            }
        }

        fields.push(FieldDescriptor {
            name,
            json_name,
            ty,
            array,
            optional,
        });
        index += 1;
    }

    (fields, index)
}

/// Resolve a required value-set binding to an enum type, or degrade to
/// a plain string.
///
/// The fallback is always safe: a broken binding never blocks
/// generation, it only costs the typed enum for that field.
fn resolve_enum(url: &str, element_path: &str, ctx: &mut GenContext<'_>) -> FieldType {
    let registry = ctx.registry;

    let Some(vs) = registry.value_set(url) else {
        ctx.diagnostic(format!(
            "value set {url} not found (element {element_path}); using String"
        ));
        return FieldType::String;
    };

    let Some(name) = vs.name.clone() else {
        ctx.diagnostic(format!(
            "value set {url} has no name (element {element_path}); using String"
        ));
        return FieldType::String;
    };

    if !VALUE_SET_NAME.is_match(&name) {
        ctx.diagnostic(format!(
            "value set {url} name {name:?} is not a usable identifier (element {element_path}); using String"
        ));
        return FieldType::String;
    }

    let includes = vs.includes();
    if includes.len() != 1 {
        ctx.diagnostic(format!(
            "value set {url} composes {} code systems, expected exactly one (element {element_path}); using String",
            includes.len()
        ));
        return FieldType::String;
    }

    let Some(system) = includes[0].system.clone() else {
        ctx.diagnostic(format!(
            "value set {url} include has no system (element {element_path}); using String"
        ));
        return FieldType::String;
    };

    if registry.code_system(&system).is_none() {
        ctx.diagnostic(format!(
            "code system {system} for value set {url} is not resolvable (element {element_path}); using String"
        ));
        return FieldType::String;
    }

    ctx.required_value_sets.insert(url.to_string());
    FieldType::Enum(name)
}
