//! Command parser - Classifies free text into a home control command
//!
//! Classification is an ordered rule list; the first rule whose keywords
//! appear in the text wins. Several keyword sets can co-occur in one phrase
//! ("turn on the status light"), so the order is part of the behaviour.

use crate::domain::entities::{Intent, ParsedCommand};

/// How a rule's keywords must appear in the text
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Any one keyword present
    Any(&'static [&'static str]),
    /// Every keyword present
    All(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Any(words) => words.iter().any(|w| text.contains(w)),
            Trigger::All(words) => words.iter().all(|w| text.contains(w)),
        }
    }
}

/// One entry of the rule list
#[derive(Debug, Clone, Copy)]
struct Rule {
    intent: Intent,
    trigger: Trigger,
    /// Keywords the entity argument follows, tried in order
    extract: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        intent: Intent::TurnOn,
        trigger: Trigger::Any(&["turn on", "switch on"]),
        extract: &["turn on", "switch on"],
    },
    Rule {
        intent: Intent::TurnOff,
        trigger: Trigger::Any(&["turn off", "switch off"]),
        extract: &["turn off", "switch off"],
    },
    Rule {
        intent: Intent::SetValue,
        trigger: Trigger::All(&["set", "to"]),
        extract: &[],
    },
    Rule {
        intent: Intent::Status,
        trigger: Trigger::Any(&["status", "state"]),
        extract: &["status", "state", "of"],
    },
    Rule {
        intent: Intent::ListDevices,
        trigger: Trigger::Any(&["list", "show all"]),
        extract: &[],
    },
    Rule {
        intent: Intent::Temperature,
        trigger: Trigger::Any(&["temperature", "temp"]),
        extract: &[],
    },
    Rule {
        intent: Intent::ActivateScene,
        trigger: Trigger::Any(&["scene", "activate"]),
        extract: &["scene", "activate"],
    },
    Rule {
        intent: Intent::TriggerAutomation,
        trigger: Trigger::Any(&["automation", "trigger"]),
        extract: &["automation", "trigger"],
    },
];

/// Parses command text into a [`ParsedCommand`]
#[derive(Debug, Default, Clone)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    /// Lower-case and trim the raw text, then classify it
    pub fn parse(&self, command_text: &str) -> ParsedCommand {
        let cmd = command_text.to_lowercase();
        let cmd = cmd.trim();

        let Some(rule) = RULES.iter().find(|r| r.trigger.matches(cmd)) else {
            return ParsedCommand::Help;
        };

        match rule.intent {
            Intent::TurnOn => ParsedCommand::TurnOn { entity: extract_entity(cmd, rule.extract) },
            Intent::TurnOff => ParsedCommand::TurnOff { entity: extract_entity(cmd, rule.extract) },
            Intent::SetValue => match split_set(cmd) {
                Some((subject, value)) => ParsedCommand::SetValue { subject, value },
                None => ParsedCommand::InvalidSet,
            },
            Intent::Status => ParsedCommand::Status { entity: extract_entity(cmd, rule.extract) },
            Intent::ListDevices => ParsedCommand::ListDevices,
            Intent::Temperature => ParsedCommand::Temperature,
            Intent::ActivateScene => {
                ParsedCommand::ActivateScene { name: extract_entity(cmd, rule.extract) }
            }
            Intent::TriggerAutomation => {
                ParsedCommand::TriggerAutomation { name: extract_entity(cmd, rule.extract) }
            }
            Intent::Help => ParsedCommand::Help,
        }
    }
}

/// Text after the first keyword found, with the word "the" dropped.
/// Falls back to the whole text when no keyword is present.
pub fn extract_entity(text: &str, keywords: &[&str]) -> String {
    for keyword in keywords {
        if let Some((_, rest)) = text.split_once(keyword) {
            return strip_words(rest, &["the"]);
        }
    }
    text.to_string()
}

/// Split `set <subject> to <value>` at the raw substring "to".
/// A second "to" anywhere ("set the stove to 5") makes the command invalid.
fn split_set(text: &str) -> Option<(String, String)> {
    let (subject, value) = text.split_once("to")?;
    if value.contains("to") {
        return None;
    }

    let subject = subject.trim();
    let subject = subject.strip_prefix("set").unwrap_or(subject);
    let subject = strip_words(subject, &["the"]);
    let value = value.trim().to_string();

    if subject.is_empty() || value.is_empty() {
        None
    } else {
        Some((subject, value))
    }
}

fn strip_words(text: &str, words: &[&str]) -> String {
    text.split_whitespace()
        .filter(|w| !words.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
