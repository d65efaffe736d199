use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::application::errors::{BotError, VoiceError};
use crate::application::services::{CommandService, VoiceService};
use crate::domain::entities::{Content, Message};
use crate::domain::traits::Bot;

pub const READY_MESSAGE: &str = "🤖 Home Control Bot is online and ready!";
pub const TRANSCRIBE_FAILED: &str = "❌ Could not transcribe voice message";

/// Pause after a failed poll before trying again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// The long-lived session: one transport, one monitored group chat
pub struct MessageService<B: Bot> {
    bot: B,
    commands: CommandService,
    voice: VoiceService,
    group_name: String,
    group_id: OnceCell<String>,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, commands: CommandService, voice: VoiceService, group_name: impl Into<String>) -> Self {
        Self {
            bot,
            commands,
            voice,
            group_name: group_name.into(),
            group_id: OnceCell::new(),
        }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Resolved chat id of the monitored group, once known
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.get().map(String::as_str)
    }

    /// Start the transport, look up the group chat and announce the bot
    pub async fn connect(&self) -> Result<(), BotError> {
        self.bot.start().await?;
        if self.resolve_group().await {
            self.send_message(READY_MESSAGE).await;
        }
        Ok(())
    }

    /// Look up the group chat by name. Lookup failures are only logged.
    pub async fn resolve_group(&self) -> bool {
        match self.bot.find_group(&self.group_name).await {
            Ok(Some(chat)) => {
                tracing::info!("Found group: {}", chat.name);
                self.set_group(&chat.id);
                true
            }
            Ok(None) => {
                tracing::warn!("Group '{}' not found", self.group_name);
                false
            }
            Err(e) => {
                tracing::error!("Error finding group: {}", e);
                false
            }
        }
    }

    /// Poll the transport forever, handling messages one at a time
    pub async fn run(&self) -> Result<(), BotError> {
        self.connect().await?;

        let info = self.bot.bot_info();
        tracing::info!("Bot started: @{}, listening on '{}'", info.username, self.group_name);

        loop {
            match self.bot.poll().await {
                Ok(messages) => {
                    for message in messages {
                        self.handle_message(message).await;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to get updates: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }

    /// Process one inbound message. Failures are reported to the group.
    pub async fn handle_message(&self, message: Message) {
        if !message.chat.is_group_named(&self.group_name) {
            return;
        }

        let sender = message
            .sender
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info!("Message from {}: {}", sender, message.preview());

        if self.group_id.get().is_none() {
            tracing::info!("Found group: {}", message.chat.name);
            self.set_group(&message.chat.id);
        }

        if let Err(e) = self.process(&message).await {
            tracing::error!("Error handling message: {}", e);
            self.send_message(&format!("❌ Error: {}", e)).await;
        }
    }

    async fn process(&self, message: &Message) -> Result<(), BotError> {
        match &message.content {
            Content::Text(text) => {
                let response = self.commands.interpret(text).await;
                self.reply(&response).await
            }
            Content::Voice { .. } => {
                self.handle_voice(message).await;
                Ok(())
            }
            Content::Empty => Ok(()),
        }
    }

    async fn handle_voice(&self, message: &Message) {
        if !self.voice.is_enabled() {
            tracing::warn!("Voice message received but transcription is not configured");
            self.send_message(TRANSCRIBE_FAILED).await;
            return;
        }

        if let Err(e) = self.process_voice(message).await {
            tracing::error!("Error handling voice: {}", e);
            self.send_message(&format!("❌ Voice error: {}", e)).await;
        }
    }

    async fn process_voice(&self, message: &Message) -> Result<(), VoiceError> {
        self.reply("🎤 Processing voice message...").await?;

        let Some(audio) = self.bot.download_media(message).await? else {
            self.reply("❌ Could not download voice message").await?;
            return Ok(());
        };

        match self.voice.transcribe(&audio).await? {
            Some(text) => {
                self.reply(&format!("🎤 Heard: {}", text)).await?;
                let response = self.commands.interpret(&text).await;
                self.reply(&response).await?;
            }
            None => self.reply(TRANSCRIBE_FAILED).await?,
        }
        Ok(())
    }

    /// Broadcast a message to the group. Delivery problems are only logged.
    pub async fn send_message(&self, text: &str) {
        if let Err(e) = self.reply(text).await {
            tracing::error!("Error sending message: {}", e);
        }
    }

    /// Send to the group, returning delivery errors. Without a resolved
    /// group the text is logged and dropped.
    pub async fn reply(&self, text: &str) -> Result<(), BotError> {
        let Some(group_id) = self.group_id() else {
            tracing::error!("Group not found, cannot send message");
            return Ok(());
        };
        tracing::debug!("Sending to {}: {}", group_id, text);
        self.bot.send_message(group_id, text).await?;
        Ok(())
    }

    fn set_group(&self, chat_id: &str) {
        if self.group_id.set(chat_id.to_string()).is_err() {
            tracing::debug!("Group id already resolved, keeping {:?}", self.group_id.get());
        }
    }
}
