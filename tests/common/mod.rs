//! In-memory fakes shared by the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde_json::Value;

use homecontrol_bot::application::errors::{BotError, HostError, TranscriptionError};
use homecontrol_bot::application::services::{CommandService, MessageService, VoiceService};
use homecontrol_bot::domain::entities::{Chat, EntityState, Message};
use homecontrol_bot::domain::traits::{Bot, BotInfo, HomeHost, SpeechToText};

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const GROUP_ID: &str = "group-1";
pub const GROUP_NAME: &str = "homecontrol";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Value,
}

/// Host with a fixed state table that records service calls
#[derive(Default)]
pub struct FakeHost {
    states: Vec<EntityState>,
    calls: Mutex<Vec<ServiceCall>>,
    fail_calls: bool,
}

impl FakeHost {
    pub fn new(states: Vec<EntityState>) -> Self {
        Self {
            states,
            ..Default::default()
        }
    }

    pub fn failing(states: Vec<EntityState>) -> Self {
        Self {
            states,
            fail_calls: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeHost for FakeHost {
    async fn states(&self) -> Result<Vec<EntityState>, HostError> {
        Ok(self.states.clone())
    }

    async fn state(&self, entity_id: &str) -> Result<Option<EntityState>, HostError> {
        Ok(self.states.iter().find(|s| s.entity_id == entity_id).cloned())
    }

    async fn call_service(&self, domain: &str, service: &str, data: Value) -> Result<(), HostError> {
        if self.fail_calls {
            return Err(HostError::Api {
                status: 500,
                body: "service unavailable".to_string(),
            });
        }
        self.calls.lock().unwrap().push(ServiceCall {
            domain: domain.to_string(),
            service: service.to_string(),
            data,
        });
        Ok(())
    }
}

/// Transport that records outbound messages
#[derive(Default)]
pub struct FakeBot {
    pub group: Option<Chat>,
    pub media: Option<Vec<u8>>,
    pub fail_sends: bool,
    pub sent: Mutex<Vec<String>>,
    pub downloads: Mutex<usize>,
}

impl FakeBot {
    pub fn with_group() -> Self {
        Self {
            group: Some(Chat::group(GROUP_ID, "HomeControl")),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> usize {
        *self.downloads.lock().unwrap()
    }
}

#[async_trait]
impl Bot for FakeBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn poll(&self) -> Result<Vec<Message>, BotError> {
        Ok(Vec::new())
    }

    async fn find_group(&self, name: &str) -> Result<Option<Chat>, BotError> {
        Ok(self.group.clone().filter(|c| c.is_group_named(name)))
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        if self.fail_sends {
            return Err(BotError::Network("connection reset".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(text.to_string());
        Ok(sent.len().to_string())
    }

    async fn download_media(&self, _message: &Message) -> Result<Option<Vec<u8>>, BotError> {
        *self.downloads.lock().unwrap() += 1;
        Ok(self.media.clone())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "fake".to_string(),
            name: "fake".to_string(),
            username: "fake_bot".to_string(),
        }
    }
}

/// Transcriber returning a canned answer; remembers the files it was given
pub struct FakeTranscriber {
    answer: Option<String>,
    fail: bool,
    seen: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl FakeTranscriber {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            answer: None,
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            fail: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechToText for FakeTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<Option<String>, TranscriptionError> {
        let audio = std::fs::read(path)?;
        self.seen.lock().unwrap().push((path.to_path_buf(), audio));
        if self.fail {
            return Err(TranscriptionError::Status(500));
        }
        Ok(self.answer.clone())
    }
}

pub fn home_states() -> Vec<EntityState> {
    vec![
        EntityState::new("light.living_room", "off").with_friendly_name("Living Room Light"),
        EntityState::new("light.bedroom", "on")
            .with_friendly_name("Bedroom Light")
            .with_attribute("brightness", 255),
        EntityState::new("light.kitchen", "off").with_friendly_name("Kitchen Light"),
        EntityState::new("light.status", "off").with_friendly_name("Status Light"),
        EntityState::new("climate.thermostat", "heat")
            .with_friendly_name("Thermostat")
            .with_attribute("temperature", 21.0)
            .with_attribute("current_temperature", 19.5),
        EntityState::new("cover.garage", "closed").with_friendly_name("Garage Door"),
        EntityState::new("switch.movie_projector", "off").with_friendly_name("Movie Projector"),
        EntityState::new("scene.movie_night", "scening").with_friendly_name("Movie Night"),
        EntityState::new("automation.morning", "on").with_friendly_name("Morning Routine"),
        EntityState::new("sensor.outside", "12.3")
            .with_friendly_name("Outside")
            .with_attribute("device_class", "temperature")
            .with_attribute("unit_of_measurement", "°C"),
    ]
}

pub fn commands(host: Arc<FakeHost>) -> CommandService {
    CommandService::new(host)
}

pub fn session(bot: FakeBot, host: Arc<FakeHost>, transcriber: Option<Arc<FakeTranscriber>>) -> MessageService<FakeBot> {
    let transcriber = transcriber.map(|t| t as Arc<dyn SpeechToText>);
    MessageService::new(bot, commands(host), VoiceService::new(transcriber), GROUP_NAME)
}

pub fn group_text(text: &str) -> Message {
    Message::from_text(Chat::group(GROUP_ID, "HomeControl"), text)
}

pub fn group_voice() -> Message {
    Message::from_voice(Chat::group(GROUP_ID, "HomeControl"), "voice-1")
}
