//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Messaging platform integrations (Telegram, console)
//! - Home Assistant: REST client for the smart-home host
//! - Transcription: Speech-to-text client

pub mod config;
pub mod adapters;
pub mod homeassistant;
pub mod transcription;
