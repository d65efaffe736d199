//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod entity_state;

pub use user::User;
pub use message::{Chat, Content, Message};
pub use command::{Intent, ParsedCommand};
pub use entity_state::{display_value, entity_domain, EntityState};
