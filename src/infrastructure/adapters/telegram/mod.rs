//! Telegram adapter

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{self, Chat, Content};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Long-polling timeout for getUpdates, in seconds
const POLL_TIMEOUT: i64 = 30;

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: TelegramChat,
    pub text: Option<String>,
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Voice {
    pub file_id: String,
    pub duration: Option<u32>,
    pub mime_type: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, BotError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BotError::Network(format!(
                "Telegram API error: {}",
                self.description.unwrap_or_else(|| "no result".to_string())
            ))),
        }
    }
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Message id from a sendMessage reply
fn parse_sent(status: reqwest::StatusCode, body: &str) -> Result<String, BotError> {
    let rejected = |description: String| BotError::Rejected {
        status: status.as_u16(),
        description,
    };

    let data: ApiResponse<SentMessage> = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(_) if !status.is_success() => return Err(rejected(body.to_string())),
        Err(e) => return Err(BotError::Parse(e.to_string())),
    };
    if !status.is_success() || !data.ok {
        return Err(rejected(data.description.unwrap_or_else(|| "no description".to_string())));
    }

    Ok(data.into_result()?.message_id.to_string())
}

/// Telegram answers 400 "can't parse entities" for text it cannot read as Markdown
fn is_markup_rejection(err: &BotError) -> bool {
    matches!(
        err,
        BotError::Rejected { status: 400, description } if description.contains("can't parse entities")
    )
}

impl TelegramChat {
    pub fn is_group(&self) -> bool {
        self.kind == "group" || self.kind == "supergroup"
    }

    pub fn name(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.first_name.clone())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    fn to_chat(&self) -> Chat {
        Chat {
            id: self.id.to_string(),
            name: self.name(),
            is_group: self.is_group(),
        }
    }
}

impl Message {
    /// Convert to the platform-independent message
    pub fn to_domain(&self) -> entities::Message {
        let content = if let Some(text) = &self.text {
            Content::Text(text.clone())
        } else if let Some(voice) = &self.voice {
            Content::Voice { file_ref: voice.file_id.clone() }
        } else {
            Content::Empty
        };

        let sender = self.from.as_ref().map(|u| {
            let mut user = entities::User::new(u.id.to_string());
            if let Some(username) = &u.username {
                user = user.with_username(username.clone());
            }
            if let Some(first) = &u.first_name {
                user = user.with_name(first.clone(), u.last_name.clone());
            }
            user
        });

        entities::Message::new(self.chat.to_chat(), content)
            .with_id(self.message_id.to_string())
            .with_sender_opt(sender)
            .with_platform("telegram")
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
    offset: AtomicI64,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "homecontrol-bot".to_string(),
                username: "homecontrol_bot".to_string(),
            },
            offset: AtomicI64::new(0),
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", API_BASE, self.token, file_path)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BotError::Auth("Telegram rejected the bot token".to_string()));
        }

        let data: ApiResponse<BotInfoResponse> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;
        let me = data.into_result()?;

        self.info = BotInfo {
            id: me.id.to_string(),
            name: me.first_name,
            username: me.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Telegram API error: {}", response.status())));
        }

        let data: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        data.into_result()
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update]) -> Option<i64> {
        updates.iter().map(|u| u.update_id + 1).max()
    }

    /// Send a message via Telegram API - try Markdown, fallback to plain
    /// only when Telegram cannot parse the markup
    pub async fn send_message_api(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        match self.send_message_with_format(chat_id, text, Some("Markdown")).await {
            Err(e) if is_markup_rejection(&e) => {
                tracing::warn!("Markdown failed, using plain text: {}", e);
                self.send_message_with_format(chat_id, text, None).await
            }
            result => result,
        }
    }

    /// Send a message with specific parse mode
    pub async fn send_message_with_format(&self, chat_id: &str, text: &str, parse_mode: Option<&str>) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<String>,
        }

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: parse_mode.map(|s| s.to_string()),
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;
        parse_sent(status, &body)
    }

    /// Resolve a file id to its download path
    async fn get_file_path(&self, file_id: &str) -> Result<Option<String>, BotError> {
        #[derive(Serialize)]
        struct GetFileRequest {
            file_id: String,
        }

        #[derive(Deserialize)]
        struct File {
            file_path: Option<String>,
        }

        let response = self.client
            .post(self.api_url("getFile"))
            .json(&GetFileRequest { file_id: file_id.to_string() })
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("getFile error: {}", response.status())));
        }

        let data: ApiResponse<File> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.into_result()?.file_path)
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", &self.token[..8.min(self.token.len())]);
        Ok(())
    }

    async fn poll(&self) -> Result<Vec<entities::Message>, BotError> {
        let offset = self.offset.load(Ordering::SeqCst);
        let updates = self.get_updates(offset, POLL_TIMEOUT).await?;
        if !updates.is_empty() {
            tracing::debug!("Received {} updates", updates.len());
        }

        if let Some(next) = Self::get_next_offset(&updates) {
            self.offset.store(next, Ordering::SeqCst);
        }

        Ok(updates
            .iter()
            .filter_map(|u| u.message.as_ref())
            .map(Message::to_domain)
            .collect())
    }

    /// Bots cannot list their chats, so this looks through pending updates
    /// without acknowledging them.
    async fn find_group(&self, name: &str) -> Result<Option<Chat>, BotError> {
        let offset = self.offset.load(Ordering::SeqCst);
        let updates = self.get_updates(offset, 0).await?;

        Ok(updates
            .iter()
            .filter_map(|u| u.message.as_ref())
            .map(|m| m.chat.to_chat())
            .find(|c| c.is_group_named(name)))
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);

        match self.send_message_api(chat_id, text).await {
            Ok(msg_id) => Ok(msg_id),
            Err(e) => {
                tracing::error!("Failed to send message: {}", e);
                Err(e)
            }
        }
    }

    async fn download_media(&self, message: &entities::Message) -> Result<Option<Vec<u8>>, BotError> {
        let Content::Voice { file_ref } = &message.content else {
            return Ok(None);
        };

        let Some(file_path) = self.get_file_path(file_ref).await? else {
            return Ok(None);
        };

        let response = self.client
            .get(self.file_url(&file_path))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("File download error: {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok((!bytes.is_empty()).then(|| bytes.to_vec()))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
