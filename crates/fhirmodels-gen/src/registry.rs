//! Definition registry: the three lookup tables the generator works from.
//!
//! Input is a directory of JSON files, each either a single definition
//! resource or a Bundle wrapping many. Files that fail to read or parse
//! are fatal for the run; resource types the generator does not consume
//! are ignored.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use fhirmodels_core::{CodeSystem, DefinitionResource, StructureDefinition, ValueSet};

use crate::error::{GenError, GenResult};

/// Lookup tables over a loaded definition corpus.
///
/// Structure definitions are keyed by name; value sets and code systems
/// by canonical URL and additionally by `url|version` so versioned
/// binding references resolve too.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    structure_definitions: BTreeMap<String, StructureDefinition>,
    value_sets: IndexMap<String, ValueSet>,
    code_systems: IndexMap<String, CodeSystem>,
}

impl DefinitionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file under `dir` into a registry.
    pub fn load_dir(dir: impl AsRef<Path>) -> GenResult<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
            })
            .collect();
        paths.sort();

        for path in paths {
            let content = fs::read(&path)?;
            let value: serde_json::Value =
                serde_json::from_slice(&content).map_err(|e| GenError::parse(&path, e))?;
            registry.add_document(&path, value)?;
        }

        debug!(
            structure_definitions = registry.structure_definitions.len(),
            value_sets = registry.value_sets.len(),
            code_systems = registry.code_systems.len(),
            "loaded definition corpus"
        );
        Ok(registry)
    }

    /// Add one schema document: a single resource or a Bundle of them.
    fn add_document(&mut self, path: &Path, value: serde_json::Value) -> GenResult<()> {
        if value.get("resourceType").and_then(|t| t.as_str()) == Some("Bundle") {
            let entries = value
                .get("entry")
                .and_then(|e| e.as_array())
                .cloned()
                .unwrap_or_default();
            for entry in entries {
                if let Some(resource) = entry.get("resource") {
                    let parsed: DefinitionResource =
                        serde_json::from_value(resource.clone())
                            .map_err(|e| GenError::parse(path, e))?;
                    self.add_resource(parsed);
                }
            }
        } else {
            let parsed: DefinitionResource =
                serde_json::from_value(value).map_err(|e| GenError::parse(path, e))?;
            self.add_resource(parsed);
        }
        Ok(())
    }

    /// Register a single parsed definition resource.
    pub fn add_resource(&mut self, resource: DefinitionResource) {
        match resource {
            DefinitionResource::StructureDefinition(sd) => self.add_structure_definition(sd),
            DefinitionResource::ValueSet(vs) => self.add_value_set(vs),
            DefinitionResource::CodeSystem(cs) => self.add_code_system(cs),
            DefinitionResource::Other => {}
        }
    }

    /// Register a structure definition under its name.
    pub fn add_structure_definition(&mut self, sd: StructureDefinition) {
        self.structure_definitions.insert(sd.name.clone(), sd);
    }

    /// Register a value set under its URL and `url|version`.
    pub fn add_value_set(&mut self, vs: ValueSet) {
        let Some(url) = vs.url.clone() else {
            warn!("ignoring value set without a canonical URL");
            return;
        };
        if let Some(version) = &vs.version {
            self.value_sets.insert(format!("{url}|{version}"), vs.clone());
        }
        self.value_sets.insert(url, vs);
    }

    /// Register a code system under its URL and `url|version`.
    pub fn add_code_system(&mut self, cs: CodeSystem) {
        let Some(url) = cs.url.clone() else {
            warn!("ignoring code system without a canonical URL");
            return;
        };
        if let Some(version) = &cs.version {
            self.code_systems.insert(format!("{url}|{version}"), cs.clone());
        }
        self.code_systems.insert(url, cs);
    }

    /// Look up a structure definition by name.
    pub fn structure_definition(&self, name: &str) -> Option<&StructureDefinition> {
        self.structure_definitions.get(name)
    }

    /// All structure definitions in name order.
    pub fn structure_definitions(&self) -> impl Iterator<Item = &StructureDefinition> {
        self.structure_definitions.values()
    }

    /// Look up a value set by canonical URL, tolerating a `|version`
    /// suffix on either side of the lookup.
    pub fn value_set(&self, url: &str) -> Option<&ValueSet> {
        self.value_sets
            .get(url)
            .or_else(|| self.value_sets.get(url.split('|').next().unwrap_or(url)))
    }

    /// Look up a code system by canonical URL, with the same `|version`
    /// tolerance as [`value_set`](Self::value_set).
    pub fn code_system(&self, url: &str) -> Option<&CodeSystem> {
        self.code_systems
            .get(url)
            .or_else(|| self.code_systems.get(url.split('|').next().unwrap_or(url)))
    }
}
