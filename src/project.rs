use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::id_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Detail page, filled in once the list is fetched; never read from the payload.
    #[serde(skip_deserializing)]
    pub url: String,
    /// Everything else the server sends, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Project {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}
