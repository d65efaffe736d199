use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of one host-managed entity (light, sensor, scene, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_friendly_name(self, name: impl Into<String>) -> Self {
        self.with_attribute("friendly_name", name.into())
    }

    /// Category prefix of the id (`light` for `light.kitchen`)
    pub fn domain(&self) -> &str {
        entity_domain(&self.entity_id)
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute("friendly_name").and_then(Value::as_str)
    }

    /// Friendly name, or the entity id when the host has none
    pub fn display_name(&self) -> &str {
        self.friendly_name().unwrap_or(&self.entity_id)
    }
}

pub fn entity_domain(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or(entity_id)
}

/// Render an attribute value the way it reads in chat: strings unquoted
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
