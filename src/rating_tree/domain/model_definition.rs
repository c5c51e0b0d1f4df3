use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Human-readable justification for how a rating was derived
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModelRatingDefinition {
    pub uuid: String,
    pub name: String,
    pub details: String,
    pub model_function_version: String,
}

/// Outcome of resolving a set of model rating definition ids
///
/// `details` maps id to the definition text. `errors` is only ever populated
/// when resolution runs in collect-errors mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionResolution {
    pub details: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
}

impl DefinitionResolution {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}
