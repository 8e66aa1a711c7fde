//! Clues that players can find and collect

use super::{ClueId, Tags};
use serde::{Deserialize, Serialize};

/// Categories of clue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClueKind {
    /// Places a person at a location
    Fingerprint,
    /// A recent purchase
    Receipt,
    /// A message mentioning the victim
    Text,
    /// An eyewitness statement
    Witness,
    /// A possible murder weapon
    Rope,
    /// Visual evidence
    Photo,
}

impl ClueKind {
    pub const ALL: [ClueKind; 6] = [
        ClueKind::Fingerprint,
        ClueKind::Receipt,
        ClueKind::Text,
        ClueKind::Witness,
        ClueKind::Rope,
        ClueKind::Photo,
    ];

    /// Lower-case name, doubling as the clue's kind tag
    pub fn name(&self) -> &'static str {
        match self {
            ClueKind::Fingerprint => "fingerprint",
            ClueKind::Receipt => "receipt",
            ClueKind::Text => "text",
            ClueKind::Witness => "witness",
            ClueKind::Rope => "rope",
            ClueKind::Photo => "photo",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ClueKind::Fingerprint => "links person to a location",
            ClueKind::Receipt => "shows a recent purchase",
            ClueKind::Text => "message mentioning the victim",
            ClueKind::Witness => "eye witness statement",
            ClueKind::Rope => "possible murder weapon",
            ClueKind::Photo => "visual evidence",
        }
    }
}

impl std::fmt::Display for ClueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A piece of physical or testimonial evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    pub kind: ClueKind,
    pub description: String,
    pub tags: Tags,
    pub found: bool,
}

impl Clue {
    pub fn new(id: ClueId, kind: ClueKind, description: impl Into<String>, tags: Tags) -> Self {
        Self {
            id,
            kind,
            description: description.into(),
            tags,
            found: false,
        }
    }

    /// One-line description for logs and lists
    pub fn brief(&self) -> String {
        format!("[{}] {}", self.kind, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_shows_kind_and_description() {
        let clue = Clue::new(
            ClueId(1),
            ClueKind::Photo,
            "a photo with a partial name on the back",
            Tags::new(["avery", "photo"]),
        );
        assert_eq!(clue.brief(), "[photo] a photo with a partial name on the back");
        assert!(!clue.found);
    }

    #[test]
    fn kind_names_are_distinct() {
        let mut names: Vec<&str> = ClueKind::ALL.iter().map(ClueKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ClueKind::ALL.len());
    }
}
