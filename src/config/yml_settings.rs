use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named template as written in the YAML configuration
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TemplateSettings {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The template spec: `method`, `uri`, `headers`, `query`, `body`, ...
    pub request: Value,
}
