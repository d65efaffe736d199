use std::fmt;

/// Classified purpose of a user command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    TurnOn,
    TurnOff,
    SetValue,
    Status,
    ListDevices,
    Temperature,
    ActivateScene,
    TriggerAutomation,
    Help,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TurnOn => "turn_on",
            Intent::TurnOff => "turn_off",
            Intent::SetValue => "set_value",
            Intent::Status => "status",
            Intent::ListDevices => "list_devices",
            Intent::Temperature => "temperature",
            Intent::ActivateScene => "activate_scene",
            Intent::TriggerAutomation => "trigger_automation",
            Intent::Help => "help",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command with its arguments extracted, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    TurnOn { entity: String },
    TurnOff { entity: String },
    SetValue { subject: String, value: String },
    /// `set ... to ...` that could not be split into a subject and a value
    InvalidSet,
    Status { entity: String },
    ListDevices,
    Temperature,
    ActivateScene { name: String },
    TriggerAutomation { name: String },
    Help,
}

impl ParsedCommand {
    pub fn intent(&self) -> Intent {
        match self {
            ParsedCommand::TurnOn { .. } => Intent::TurnOn,
            ParsedCommand::TurnOff { .. } => Intent::TurnOff,
            ParsedCommand::SetValue { .. } | ParsedCommand::InvalidSet => Intent::SetValue,
            ParsedCommand::Status { .. } => Intent::Status,
            ParsedCommand::ListDevices => Intent::ListDevices,
            ParsedCommand::Temperature => Intent::Temperature,
            ParsedCommand::ActivateScene { .. } => Intent::ActivateScene,
            ParsedCommand::TriggerAutomation { .. } => Intent::TriggerAutomation,
            ParsedCommand::Help => Intent::Help,
        }
    }
}
