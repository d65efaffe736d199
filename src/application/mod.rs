//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Command interpretation, intent handlers, voice path, session
//! - Errors: Domain-specific errors
//! - Messaging: Command text parsing

pub mod errors;
pub mod services;
pub mod messaging;
