//! Message handling - Command text parsing

pub mod parser;

pub use parser::CommandParser;
