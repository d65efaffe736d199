use super::User;
use chrono::{DateTime, Utc};

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// Voice note; `file_ref` is whatever the transport needs to fetch the audio
    Voice { file_ref: String },
    Empty,
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Chat a message originates from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub name: String,
    pub is_group: bool,
}

impl Chat {
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_group: true,
        }
    }

    pub fn private(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_group: false,
        }
    }

    /// Group chat whose name equals `name`, ignoring case
    pub fn is_group_named(&self, name: &str) -> bool {
        self.is_group && self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Represents an incoming message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat: Chat,
    pub sender: Option<User>,
    pub content: Content,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(chat: Chat, content: Content) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat,
            sender: None,
            content,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(chat: Chat, text: impl Into<String>) -> Self {
        Self::new(chat, Content::Text(text.into()))
    }

    pub fn from_voice(chat: Chat, file_ref: impl Into<String>) -> Self {
        Self::new(chat, Content::Voice { file_ref: file_ref.into() })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Short description for logs: the text, or `[MEDIA]` for anything else
    pub fn preview(&self) -> &str {
        self.content.text().unwrap_or("[MEDIA]")
    }
}
