//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Message, EntityState, ParsedCommand)
//! - Traits: Abstractions for infrastructure (Bot, HomeHost, SpeechToText)

pub mod entities;
pub mod traits;
