//! Ingest specs: the property map (and optional schema) handed to the
//! downstream batch source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::Schema;
use crate::transform::{PROP_FILE_PATH, PROP_REFERENCE_NAME};
use crate::url_model::{normalize, reference_name};

/// Batch source plugin that consumes generated specs.
pub const SOURCE_PLUGIN_NAME: &str = "LocalFile";
pub const SOURCE_PLUGIN_KIND: &str = "batchsource";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSpec {
    pub target_plugin_name: String,
    pub target_plugin_kind: String,
    pub properties: BTreeMap<String, String>,
    /// Absent when no schema could be inferred; consumers use the default schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Spec for `target_path` with `referenceName` = last path segment and
/// `filePath` = the normalized path.
pub fn build_spec(target_path: &str, schema: Option<Schema>) -> IngestSpec {
    let mut properties = BTreeMap::new();
    properties.insert(
        PROP_REFERENCE_NAME.to_string(),
        reference_name(target_path).to_string(),
    );
    properties.insert(PROP_FILE_PATH.to_string(), normalize(target_path));
    IngestSpec {
        target_plugin_name: SOURCE_PLUGIN_NAME.to_string(),
        target_plugin_kind: SOURCE_PLUGIN_KIND.to_string(),
        properties,
        schema,
    }
}
