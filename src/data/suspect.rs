//! Suspects and how evidence has landed against them

use super::{tagify, ClueId, LocationId, SuspectId, Tags};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A person of interest in the case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: SuspectId,
    pub name: String,
    pub motive: String,
    pub alibi: LocationId,
    pub tags: Tags,
    pub interrogated: bool,
    /// Clues already used in a strong presentation against this suspect
    pub spent_clues: BTreeSet<ClueId>,
}

impl Suspect {
    /// Build a suspect whose tags are their first name and motive
    pub fn new(id: SuspectId, name: &str, motive: &str, alibi: LocationId) -> Self {
        let tags = Tags::new([first_name_tag(name), tagify(motive)]);
        Self {
            id,
            name: name.to_string(),
            motive: motive.to_string(),
            alibi,
            tags,
            interrogated: false,
            spent_clues: BTreeSet::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Lower-cased first name, the tag that ties clues to a person
pub fn first_name_tag(name: &str) -> String {
    tagify(name.split_whitespace().next().unwrap_or(name))
}

/// Result of the latest evidence presentation against a suspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presentation {
    Strong,
    Weak,
    None,
}

impl Presentation {
    pub fn label(&self) -> &'static str {
        match self {
            Presentation::Strong => "strong",
            Presentation::Weak => "weak",
            Presentation::None => "none",
        }
    }
}

impl std::fmt::Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_come_from_first_name_and_motive() {
        let s = Suspect::new(SuspectId(0), "Casey Lin", "Cover up", LocationId(2));
        assert!(s.tags.contains("casey"));
        assert!(s.tags.contains("cover-up"));
        assert_eq!(s.tags.len(), 2);
        assert_eq!(s.first_name(), "Casey");
        assert!(!s.interrogated);
    }
}
