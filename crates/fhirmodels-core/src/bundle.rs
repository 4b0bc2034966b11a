//! A minimal Bundle model for the client layer.
//!
//! Entry resources stay as raw JSON. The client never decides what an
//! entry is; that is the caller's job, so entries are kept byte-exact.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A FHIR Bundle: a container aggregating other resources as entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    /// Bundle type: `searchset`, `transaction`, `collection`, ...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,

    /// Total number of matches for search bundles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Entries carried by this bundle
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

/// One entry of a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Absolute URL of the entry's resource
    #[serde(rename = "fullUrl", skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// The carried resource, kept as raw JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Box<RawValue>>,
}

impl Bundle {
    /// Number of entries carried by this bundle.
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    /// True when the bundle carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Raw JSON of the entry resources, in order.
    pub fn resources(&self) -> impl Iterator<Item = &RawValue> {
        self.entry.iter().filter_map(|e| e.resource.as_deref())
    }
}
