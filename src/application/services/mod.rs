//! Application services - Business logic orchestration

pub mod command_service;
pub mod entity_resolver;
pub mod home_service;
pub mod message_service;
pub mod voice_service;

pub use command_service::CommandService;
pub use entity_resolver::EntityResolver;
pub use home_service::HomeService;
pub use message_service::MessageService;
pub use voice_service::VoiceService;
