//! Command interpretation against an in-memory host
//! Run with: cargo test --test command_service_test

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{ensure_init, home_states, FakeHost, ServiceCall};
use homecontrol_bot::application::services::home_service::HELP_TEXT;
use homecontrol_bot::application::services::CommandService;
use homecontrol_bot::domain::entities::EntityState;

fn setup(states: Vec<EntityState>) -> (Arc<FakeHost>, CommandService) {
    ensure_init();
    let host = Arc::new(FakeHost::new(states));
    let commands = common::commands(host.clone());
    (host, commands)
}

fn call(domain: &str, service: &str, data: serde_json::Value) -> ServiceCall {
    ServiceCall {
        domain: domain.to_string(),
        service: service.to_string(),
        data,
    }
}

#[tokio::test]
async fn test_turn_on_living_room_light() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("Turn on the living room light").await;

    assert_eq!(reply, "✅ Turned on living room light");
    assert_eq!(
        host.calls(),
        vec![call("homeassistant", "turn_on", json!({ "entity_id": "light.living_room" }))]
    );
}

#[tokio::test]
async fn test_turn_on_takes_priority_over_status_keyword() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("turn on the status light").await;

    assert_eq!(reply, "✅ Turned on status light");
    assert_eq!(host.calls()[0].data, json!({ "entity_id": "light.status" }));
}

#[tokio::test]
async fn test_turn_off_with_switch_keyword() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("switch off kitchen").await;

    assert_eq!(reply, "✅ Turned off kitchen");
    assert_eq!(
        host.calls(),
        vec![call("homeassistant", "turn_off", json!({ "entity_id": "light.kitchen" }))]
    );
}

#[tokio::test]
async fn test_unknown_device() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("turn on the jacuzzi").await;

    assert_eq!(reply, "❌ Device 'jacuzzi' not found");
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_set_light_brightness_is_not_clamped() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("set bedroom light to 150%").await;

    assert_eq!(reply, "✅ Set bedroom light to 150%");
    assert_eq!(
        host.calls(),
        vec![call(
            "light",
            "turn_on",
            json!({ "entity_id": "light.bedroom", "brightness_pct": 150 })
        )]
    );
}

#[tokio::test]
async fn test_set_light_invalid_brightness() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("set bedroom light to abc").await;

    assert!(reply.starts_with('❌'));
    assert_eq!(reply, "❌ Invalid brightness value");
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_set_thermostat_temperature() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("Set the thermostat to 21.5°C").await;

    assert_eq!(reply, "✅ Set thermostat to 21.5°");
    assert_eq!(
        host.calls(),
        vec![call(
            "climate",
            "set_temperature",
            json!({ "entity_id": "climate.thermostat", "temperature": 21.5 })
        )]
    );
}

#[tokio::test]
async fn test_set_whole_degree_keeps_decimal_point() {
    let (_host, commands) = setup(home_states());

    assert_eq!(commands.interpret("set thermostat to 20").await, "✅ Set thermostat to 20.0°");
    assert_eq!(
        commands.interpret("set thermostat to warm").await,
        "❌ Invalid temperature value"
    );
}

#[tokio::test]
async fn test_set_cover_position() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("set garage door to 40%").await;

    assert_eq!(reply, "✅ Set garage door to 40%");
    assert_eq!(
        host.calls(),
        vec![call(
            "cover",
            "set_cover_position",
            json!({ "entity_id": "cover.garage", "position": 40 })
        )]
    );
    assert_eq!(commands.interpret("set garage door to half").await, "❌ Invalid position value");
}

#[tokio::test]
async fn test_set_unsupported_domain() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("set movie to 3").await;

    assert_eq!(reply, "❌ Cannot set value for this device type");
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_set_without_value() {
    let (_host, commands) = setup(home_states());

    let reply = commands.interpret("set bedroom light to").await;

    assert_eq!(reply, "❌ Invalid format. Use: set [device] to [value]");
}

#[tokio::test]
async fn test_status_of_thermostat() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("Status thermostat").await;

    assert_eq!(
        reply,
        "📊 *Thermostat*\nState: heat\nTemperature: 21.0°\nCurrent: 19.5°\n"
    );
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_status_brightness_percentage() {
    let (_host, commands) = setup(home_states());

    let reply = commands.interpret("state the bedroom light").await;

    assert_eq!(reply, "📊 *Bedroom Light*\nState: on\nBrightness: 100%\n");
}

#[tokio::test]
async fn test_status_of_keeps_the_connecting_word() {
    let (_host, commands) = setup(home_states());

    let reply = commands.interpret("status of thermostat").await;

    assert_eq!(reply, "❌ Device 'of thermostat' not found");
}

#[tokio::test]
async fn test_set_with_two_to_is_rejected() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("set the stove to 5").await;

    assert_eq!(reply, "❌ Invalid format. Use: set [device] to [value]");
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_list_devices_truncates_large_groups() {
    let mut states: Vec<EntityState> = (1..=7)
        .map(|i| EntityState::new(format!("sensor.s{}", i), "1").with_friendly_name(format!("Sensor {}", i)))
        .collect();
    states.push(EntityState::new("light.desk", "on").with_friendly_name("Desk"));
    states.push(EntityState::new("light.ceiling", "off").with_friendly_name("Ceiling"));
    states.push(EntityState::new("automation.hidden", "on").with_friendly_name("Hidden"));
    let (_host, commands) = setup(states);

    let reply = commands.interpret("list devices").await;

    assert_eq!(
        reply,
        "📱 *Available Devices*\n\n\
         *LIGHT*\n  • Ceiling\n  • Desk\n\n\
         *SENSOR*\n  • Sensor 1\n  • Sensor 2\n  • Sensor 3\n  • Sensor 4\n  • Sensor 5\n  ... and 2 more\n\n"
    );
}

#[tokio::test]
async fn test_list_devices_empty() {
    let (_host, commands) = setup(vec![EntityState::new("sun.sun", "above_horizon")]);

    assert_eq!(commands.interpret("show all").await, "❌ No devices found");
}

#[tokio::test]
async fn test_temperature_collects_sensors_and_climate() {
    let (_host, commands) = setup(home_states());

    let reply = commands.interpret("temperature").await;

    assert_eq!(reply, "🌡️ *Temperatures*\nThermostat: 19.5°\nOutside: 12.3°C");
}

#[tokio::test]
async fn test_temperature_none_found() {
    let (_host, commands) = setup(vec![EntityState::new("light.desk", "on")]);

    assert_eq!(commands.interpret("temp").await, "❌ No temperature sensors found");
}

#[tokio::test]
async fn test_activate_scene_is_domain_filtered() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("activate movie").await;

    assert_eq!(reply, "✅ Activated scene: movie");
    assert_eq!(
        host.calls(),
        vec![call("scene", "turn_on", json!({ "entity_id": "scene.movie_night" }))]
    );
}

#[tokio::test]
async fn test_scene_not_found() {
    let (_host, commands) = setup(home_states());

    assert_eq!(commands.interpret("scene kitchen").await, "❌ Scene 'kitchen' not found");
}

#[tokio::test]
async fn test_trigger_automation() {
    let (host, commands) = setup(home_states());

    let reply = commands.interpret("trigger morning routine").await;

    assert_eq!(reply, "✅ Triggered automation: morning routine");
    assert_eq!(
        host.calls(),
        vec![call("automation", "trigger", json!({ "entity_id": "automation.morning" }))]
    );
    assert_eq!(
        commands.interpret("trigger bedtime").await,
        "❌ Automation 'bedtime' not found"
    );
}

#[tokio::test]
async fn test_help_for_unknown_text() {
    let (_host, commands) = setup(home_states());

    assert_eq!(commands.interpret("hello there").await, HELP_TEXT);
}

#[tokio::test]
async fn test_host_failure_becomes_error_reply() {
    ensure_init();
    let host = Arc::new(FakeHost::failing(home_states()));
    let commands = common::commands(host);

    let reply = commands.interpret("turn on kitchen light").await;

    assert!(reply.starts_with("❌ Error: "), "unexpected reply: {}", reply);
}
