//! Application layer errors

use thiserror::Error;

/// Transport (messaging platform) errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request rejected ({status}): {description}")]
    Rejected { status: u16, description: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Home automation host errors
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Host API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unauthorized: check the access token")]
    Unauthorized,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Speech-to-text errors
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Transcription failed with status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Voice path errors
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error(transparent)]
    Bot(#[from] BotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
