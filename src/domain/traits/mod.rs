//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod host;
pub mod transcriber;

pub use bot::{Bot, BotInfo};
pub use host::HomeHost;
pub use transcriber::SpeechToText;
