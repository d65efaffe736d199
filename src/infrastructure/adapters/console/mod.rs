//! Console adapter for development/testing
//!
//! Every stdin line is a message from the configured group. A line of the
//! form `!voice <path>` is delivered as a voice note whose audio is read from
//! `<path>`.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::entities::{Chat, Content, Message, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

const CONSOLE_CHAT_ID: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    group_name: String,
    sender: User,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new(group_name: impl Into<String>, phone: Option<&str>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "homecontrol-bot".to_string(),
                username: "console".to_string(),
            },
            group_name: group_name.into(),
            sender: User::new(phone.unwrap_or("console")).with_username("you"),
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    fn chat(&self) -> Chat {
        Chat::group(CONSOLE_CHAT_ID, self.group_name.clone())
    }

    /// Turn one input line into a message; blank lines yield nothing
    fn parse_line(&self, line: &str) -> Option<Message> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message = match line.strip_prefix("!voice ") {
            Some(path) => Message::from_voice(self.chat(), path.trim()),
            None => Message::from_text(self.chat(), line),
        };
        Some(message.with_sender(self.sender.clone()).with_platform("console"))
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn poll(&self) -> Result<Vec<Message>, BotError> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(line) => Ok(self.parse_line(&line).into_iter().collect()),
            None => {
                // stdin closed; keep the loop alive without spinning
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
        }
    }

    async fn find_group(&self, name: &str) -> Result<Option<Chat>, BotError> {
        let chat = self.chat();
        Ok(chat.is_group_named(name).then_some(chat))
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn download_media(&self, message: &Message) -> Result<Option<Vec<u8>>, BotError> {
        let Content::Voice { file_ref } = &message.content else {
            return Ok(None);
        };
        match tokio::fs::read(file_ref).await {
            Ok(bytes) if !bytes.is_empty() => Ok(Some(bytes)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BotError::Io(e)),
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
