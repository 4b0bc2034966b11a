//! # FHIR Models Generator
//!
//! Schema-driven Rust struct generation from FHIR structure definitions.
//!
//! The generator walks each structure definition's flattened element
//! list, resolves enumerations and backbone elements along the way, and
//! closes over transitively referenced types with a fixed-point loop:
//! every concrete resource kind is generated first, then every type the
//! emitted fields referenced, until nothing new is discovered.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod registry;

pub use descriptor::{FieldDescriptor, FieldType, TypeDescriptor, TypeKind};
pub use emit::GeneratedFile;
pub use error::{GenError, GenResult};
pub use generator::{GenContext, build_type};
pub use registry::DefinitionRegistry;

use tracing::{debug, info};

/// Cap on fixed-point passes. The loop terminates anyway because the
/// schema's type universe is finite and each type is generated at most
/// once; the cap turns a broken corpus into an error instead of a spin.
const MAX_PASSES: usize = 64;

/// Everything one generation run produced.
#[derive(Debug)]
pub struct Generated {
    /// Generated source files, index last
    pub files: Vec<GeneratedFile>,
    /// Names of the generated concrete resource kinds, in output order
    pub resource_names: Vec<String>,
    /// Notes about degraded constructs (string fallbacks, skipped elements)
    pub diagnostics: Vec<String>,
}

/// Generate source files for every structure definition in the
/// registry's corpus, plus enum files for every required value set and
/// a `mod.rs` index.
///
/// Missing-value-set policy: a value set that cannot back an enum
/// degrades that field to a string during the walk, and a value set
/// marked required that turns out unusable during the enum pass is
/// skipped — both with diagnostics. A *structure definition* missing
/// from the required-types closure is fatal instead, because emitted
/// code would reference a type that never gets generated.
///
/// Returns the full file set or an error; on error nothing is usable.
pub fn generate_all(registry: &DefinitionRegistry) -> GenResult<Generated> {
    let generated_at = chrono::Utc::now().to_rfc3339();
    generate_all_at(registry, &generated_at)
}

/// [`generate_all`] with an explicit timestamp, for reproducible output.
pub fn generate_all_at(registry: &DefinitionRegistry, generated_at: &str) -> GenResult<Generated> {
    let mut ctx = GenContext::new(registry);
    let mut files = Vec::new();
    let mut stems = Vec::new();
    let mut resource_names = Vec::new();

    // Pass zero: every concrete resource kind, directly.
    for sd in registry.structure_definitions() {
        if !sd.is_concrete_resource() {
            continue;
        }
        let descriptors = build_type(sd, &mut ctx)?;
        push_structure(&descriptors, generated_at, &mut files, &mut stems);
        ctx.generated.insert(sd.name.clone());
        resource_names.push(sd.name.clone());
    }
    info!(resources = resource_names.len(), "generated resource kinds");

    // Fixed point over the required-types closure.
    let mut passes = 0;
    loop {
        let pending: Vec<String> = ctx
            .required_types
            .difference(&ctx.generated)
            .cloned()
            .collect();
        if pending.is_empty() {
            break;
        }
        passes += 1;
        if passes > MAX_PASSES {
            return Err(GenError::FixedPointOverflow { passes });
        }
        debug!(pass = passes, pending = pending.len(), "closing over required types");

        for name in pending {
            let sd = registry
                .structure_definition(&name)
                .ok_or_else(|| GenError::MissingDefinition(name.clone()))?;
            let descriptors = build_type(sd, &mut ctx)?;
            push_structure(&descriptors, generated_at, &mut files, &mut stems);
            ctx.generated.insert(name);
        }
    }

    // Enum pass: every value set marked required during the walk.
    let required_value_sets = std::mem::take(&mut ctx.required_value_sets);
    for url in &required_value_sets {
        let Some(vs) = registry.value_set(url) else {
            ctx.diagnostics
                .push(format!("required value set {url} disappeared; enum skipped"));
            continue;
        };
        let Some(name) = vs.name.as_deref() else {
            ctx.diagnostics
                .push(format!("required value set {url} has no name; enum skipped"));
            continue;
        };
        let system = vs.includes().first().and_then(|i| i.system.clone());
        let Some(cs) = system.as_deref().and_then(|s| registry.code_system(s)) else {
            ctx.diagnostics.push(format!(
                "code system for required value set {url} is not resolvable; enum skipped"
            ));
            continue;
        };
        if ctx.generated.contains(name) {
            continue;
        }
        let stem = naming::file_stem(name);
        files.push(GeneratedFile::new(
            format!("{stem}.rs"),
            emit::render_enum(vs, cs, generated_at),
        ));
        stems.push(stem);
        ctx.generated.insert(name.to_string());
    }

    // Index tying the module together.
    files.push(GeneratedFile::new(
        "mod.rs",
        emit::render_index(&stems, generated_at),
    ));

    Ok(Generated {
        files,
        resource_names,
        diagnostics: ctx.diagnostics,
    })
}

fn push_structure(
    descriptors: &[TypeDescriptor],
    generated_at: &str,
    files: &mut Vec<GeneratedFile>,
    stems: &mut Vec<String>,
) {
    let stem = naming::file_stem(&descriptors[0].name);
    files.push(GeneratedFile::new(
        format!("{stem}.rs"),
        emit::render_structure(descriptors, generated_at),
    ));
    stems.push(stem);
}

/// The flat list of generated resource-kind names, one per line: the
/// companion definitions-list output.
pub fn definitions_list(registry: &DefinitionRegistry) -> String {
    let mut out = String::new();
    for sd in registry.structure_definitions() {
        if sd.is_concrete_resource() {
            out.push_str(&sd.name);
            out.push('\n');
        }
    }
    out
}
