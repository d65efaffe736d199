use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::messaging::CommandParser;
use crate::application::services::HomeService;
use crate::domain::entities::ParsedCommand;
use crate::domain::traits::HomeHost;

/// Service for interpreting and executing home control commands
#[derive(Clone)]
pub struct CommandService {
    parser: CommandParser,
    home: HomeService,
}

impl CommandService {
    pub fn new(host: Arc<dyn HomeHost>) -> Self {
        Self {
            parser: CommandParser::new(),
            home: HomeService::new(host),
        }
    }

    /// Parse and execute a command, always producing a reply.
    /// Handler failures become `❌ Error: <message>`.
    pub async fn interpret(&self, command_text: &str) -> String {
        let command = self.parser.parse(command_text);
        tracing::debug!("Intent {} for '{}'", command.intent(), command_text.trim());

        match self.execute(command).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Command processing error: {}", e);
                format!("❌ Error: {}", e)
            }
        }
    }

    pub async fn execute(&self, command: ParsedCommand) -> Result<String, CommandError> {
        match command {
            ParsedCommand::TurnOn { entity } => self.home.turn_on(&entity).await,
            ParsedCommand::TurnOff { entity } => self.home.turn_off(&entity).await,
            ParsedCommand::SetValue { subject, value } => self.home.set_value(&subject, &value).await,
            ParsedCommand::InvalidSet => {
                Ok("❌ Invalid format. Use: set [device] to [value]".to_string())
            }
            ParsedCommand::Status { entity } => self.home.status(&entity).await,
            ParsedCommand::ListDevices => self.home.list_devices().await,
            ParsedCommand::Temperature => self.home.temperature().await,
            ParsedCommand::ActivateScene { name } => self.home.activate_scene(&name).await,
            ParsedCommand::TriggerAutomation { name } => self.home.trigger_automation(&name).await,
            ParsedCommand::Help => Ok(self.home.help()),
        }
    }
}
