//! Group chat bridge to a Home Assistant controller.
//!
//! Messages from one group chat are parsed into home control commands,
//! executed against the host and answered in the same chat.

pub mod domain;
pub mod application;
pub mod infrastructure;
