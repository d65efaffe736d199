//! Intent handlers - Turn the parsed command into host calls and a reply

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::application::errors::CommandError;
use crate::application::services::EntityResolver;
use crate::domain::entities::{display_value, entity_domain, EntityState};
use crate::domain::traits::HomeHost;

/// Domains shown by `list devices`
const LISTED_DOMAINS: &[&str] = &[
    "light",
    "switch",
    "climate",
    "sensor",
    "binary_sensor",
    "fan",
    "cover",
    "lock",
    "media_player",
    "camera",
];

/// Entities shown per domain group before truncating
const MAX_PER_GROUP: usize = 5;

pub const HELP_TEXT: &str = "🤖 *Home Control*

*Basic Commands:*
• Turn on [device]
• Turn off [device]
• Set [device] to [value]
• Status of [device]

*Information:*
• List devices
• Temperature

*Advanced:*
• Activate [scene]
• Trigger [automation]

*Examples:*
• \"Turn on living room light\"
• \"Set bedroom light to 50%\"
• \"Status of thermostat\"
• \"Activate movie scene\"

Send voice messages too! 🎤";

pub type HandlerResult = Result<String, CommandError>;

/// Executes each intent against the host
#[derive(Clone)]
pub struct HomeService {
    host: Arc<dyn HomeHost>,
    resolver: EntityResolver,
}

impl HomeService {
    pub fn new(host: Arc<dyn HomeHost>) -> Self {
        Self {
            resolver: EntityResolver::new(host.clone()),
            host,
        }
    }

    pub async fn turn_on(&self, name: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, None).await? else {
            return Ok(format!("❌ Device '{}' not found", name));
        };
        self.host
            .call_service("homeassistant", "turn_on", json!({ "entity_id": entity_id }))
            .await?;
        Ok(format!("✅ Turned on {}", name))
    }

    pub async fn turn_off(&self, name: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, None).await? else {
            return Ok(format!("❌ Device '{}' not found", name));
        };
        self.host
            .call_service("homeassistant", "turn_off", json!({ "entity_id": entity_id }))
            .await?;
        Ok(format!("✅ Turned off {}", name))
    }

    pub async fn set_value(&self, name: &str, value: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, None).await? else {
            return Ok(format!("❌ Device '{}' not found", name));
        };

        match entity_domain(&entity_id) {
            "light" => {
                let Some(brightness) = parse_percent(value) else {
                    return Ok("❌ Invalid brightness value".to_string());
                };
                self.host
                    .call_service(
                        "light",
                        "turn_on",
                        json!({ "entity_id": entity_id, "brightness_pct": brightness }),
                    )
                    .await?;
                Ok(format!("✅ Set {} to {}%", name, brightness))
            }
            "climate" => {
                let Some(temperature) = parse_temperature(value) else {
                    return Ok("❌ Invalid temperature value".to_string());
                };
                self.host
                    .call_service(
                        "climate",
                        "set_temperature",
                        json!({ "entity_id": entity_id, "temperature": temperature }),
                    )
                    .await?;
                Ok(format!("✅ Set {} to {:?}°", name, temperature))
            }
            "cover" => {
                let Some(position) = parse_percent(value) else {
                    return Ok("❌ Invalid position value".to_string());
                };
                self.host
                    .call_service(
                        "cover",
                        "set_cover_position",
                        json!({ "entity_id": entity_id, "position": position }),
                    )
                    .await?;
                Ok(format!("✅ Set {} to {}%", name, position))
            }
            _ => Ok("❌ Cannot set value for this device type".to_string()),
        }
    }

    pub async fn status(&self, name: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, None).await? else {
            return Ok(format!("❌ Device '{}' not found", name));
        };
        let Some(state) = self.host.state(&entity_id).await? else {
            return Ok(format!("❌ Could not get status for {}", name));
        };
        Ok(format_status(&state, name))
    }

    pub async fn list_devices(&self) -> HandlerResult {
        let states = self.host.states().await?;
        Ok(format_device_list(&states))
    }

    pub async fn temperature(&self) -> HandlerResult {
        let states = self.host.states().await?;
        Ok(format_temperatures(&states))
    }

    pub async fn activate_scene(&self, name: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, Some("scene")).await? else {
            return Ok(format!("❌ Scene '{}' not found", name));
        };
        self.host
            .call_service("scene", "turn_on", json!({ "entity_id": entity_id }))
            .await?;
        Ok(format!("✅ Activated scene: {}", name))
    }

    pub async fn trigger_automation(&self, name: &str) -> HandlerResult {
        let Some(entity_id) = self.resolver.resolve(name, Some("automation")).await? else {
            return Ok(format!("❌ Automation '{}' not found", name));
        };
        self.host
            .call_service("automation", "trigger", json!({ "entity_id": entity_id }))
            .await?;
        Ok(format!("✅ Triggered automation: {}", name))
    }

    pub fn help(&self) -> String {
        HELP_TEXT.to_string()
    }
}

/// Integer percentage, `%` optional. No range check.
fn parse_percent(value: &str) -> Option<i64> {
    value.replace('%', "").trim().parse().ok()
}

fn parse_temperature(value: &str) -> Option<f64> {
    value
        .replace(['°', 'c', 'f'], "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
}

fn format_status(state: &EntityState, name: &str) -> String {
    let mut status = format!("📊 *{}*\n", state.friendly_name().unwrap_or(name));
    status.push_str(&format!("State: {}\n", state.state));

    if let Some(v) = state.attribute("temperature") {
        status.push_str(&format!("Temperature: {}°\n", display_value(v)));
    }
    if let Some(v) = state.attribute("current_temperature") {
        status.push_str(&format!("Current: {}°\n", display_value(v)));
    }
    if let Some(v) = state.attribute("humidity") {
        status.push_str(&format!("Humidity: {}%\n", display_value(v)));
    }
    // 0-255 on the host
    if let Some(b) = state.attribute("brightness").and_then(|v| v.as_f64()) {
        status.push_str(&format!("Brightness: {}%\n", (b / 255.0 * 100.0) as i64));
    }
    if let Some(v) = state.attribute("battery_level") {
        status.push_str(&format!("Battery: {}%\n", display_value(v)));
    }

    status
}

fn format_device_list(states: &[EntityState]) -> String {
    let mut devices: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for state in states {
        let domain = state.domain();
        if LISTED_DOMAINS.contains(&domain) {
            devices.entry(domain).or_default().push(state.display_name());
        }
    }

    if devices.is_empty() {
        return "❌ No devices found".to_string();
    }

    let mut result = "📱 *Available Devices*\n\n".to_string();
    for (domain, mut names) in devices {
        names.sort_unstable();
        result.push_str(&format!("*{}*\n", domain.to_uppercase().replace('_', " ")));
        for name in names.iter().take(MAX_PER_GROUP) {
            result.push_str(&format!("  • {}\n", name));
        }
        if names.len() > MAX_PER_GROUP {
            result.push_str(&format!("  ... and {} more\n", names.len() - MAX_PER_GROUP));
        }
        result.push('\n');
    }
    result
}

fn format_temperatures(states: &[EntityState]) -> String {
    let mut temps = Vec::new();
    for state in states {
        match state.domain() {
            "sensor" => {
                if state.attribute("device_class").and_then(|v| v.as_str()) == Some("temperature") {
                    let unit = state
                        .attribute("unit_of_measurement")
                        .map(display_value)
                        .unwrap_or_default();
                    temps.push(format!("{}: {}{}", state.display_name(), state.state, unit));
                }
            }
            "climate" => {
                if let Some(v) = state.attribute("current_temperature") {
                    temps.push(format!("{}: {}°", state.display_name(), display_value(v)));
                }
            }
            _ => {}
        }
    }

    if temps.is_empty() {
        "❌ No temperature sensors found".to_string()
    } else {
        format!("🌡️ *Temperatures*\n{}", temps.join("\n"))
    }
}
