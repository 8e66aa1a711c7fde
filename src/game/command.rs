//! Typed player commands
//!
//! Text is parsed here before anything reaches the engine, so malformed
//! input (such as a clue id that is not a number) never touches state.

use crate::data::ClueId;
use crate::CaseError;
use serde::{Deserialize, Serialize};

/// An action the player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Travel to a location, by name or by its 1-based number
    Move(String),
    Examine,
    Search(ClueId),
    Interrogate(String),
    Present(String),
    Accuse(String),
}

impl Command {
    /// Parse `verb [argument...]`. Verbs are case-insensitive.
    pub fn parse(input: &str) -> Result<Command, CaseError> {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        let arg = |usage: &'static str| -> Result<String, CaseError> {
            if rest.is_empty() {
                Err(CaseError::MissingArgument(usage))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "move" | "go" => Ok(Command::Move(arg("move <location>")?)),
            "examine" | "look" => Ok(Command::Examine),
            "search" | "collect" => {
                let raw = arg("search <clue id>")?;
                Ok(Command::Search(raw.parse()?))
            }
            "interrogate" | "question" => Ok(Command::Interrogate(arg("interrogate <suspect>")?)),
            "present" => Ok(Command::Present(arg("present <suspect>")?)),
            "accuse" => Ok(Command::Accuse(arg("accuse <suspect>")?)),
            "" => Err(CaseError::UnknownCommand(String::new())),
            other => Err(CaseError::UnknownCommand(other.to_string())),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Command::Move(to) => format!("Travel to {}", to),
            Command::Examine => "Look around for visible clues".to_string(),
            Command::Search(id) => format!("Collect clue {}", id),
            Command::Interrogate(who) => format!("Question {}", who),
            Command::Present(who) => format!("Present evidence against {}", who),
            Command::Accuse(who) => format!("Accuse {}", who),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_with_multiword_arguments() {
        assert_eq!(
            Command::parse("accuse Avery Collins").unwrap(),
            Command::Accuse("Avery Collins".to_string())
        );
        assert_eq!(
            Command::parse("  GO   Local Bar ").unwrap(),
            Command::Move("Local Bar".to_string())
        );
        assert_eq!(Command::parse("look").unwrap(), Command::Examine);
        assert_eq!(Command::parse("search 4").unwrap(), Command::Search(ClueId(4)));
    }

    #[test]
    fn malformed_clue_id_is_rejected_before_lookup() {
        assert_eq!(
            Command::parse("search four"),
            Err(CaseError::MalformedClueId("four".to_string()))
        );
    }

    #[test]
    fn missing_and_unknown() {
        assert_eq!(
            Command::parse("present"),
            Err(CaseError::MissingArgument("present <suspect>"))
        );
        assert!(matches!(Command::parse("dance"), Err(CaseError::UnknownCommand(v)) if v == "dance"));
        assert!(matches!(Command::parse(""), Err(CaseError::UnknownCommand(_))));
    }
}
