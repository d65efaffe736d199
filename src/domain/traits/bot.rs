use async_trait::async_trait;
use crate::domain::entities::{Chat, Message};
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Start the bot session
    async fn start(&self) -> Result<(), BotError>;

    /// Fetch the next batch of inbound messages, possibly empty
    async fn poll(&self) -> Result<Vec<Message>, BotError>;

    /// Look up a group chat by name, ignoring case
    async fn find_group(&self, name: &str) -> Result<Option<Chat>, BotError>;

    /// Send a message to a chat
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Download the audio of a voice message
    async fn download_media(&self, message: &Message) -> Result<Option<Vec<u8>>, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
