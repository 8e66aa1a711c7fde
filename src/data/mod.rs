//! Data structures for the case world
//!
//! Defines clues, suspects, locations, the case timeline and the small
//! identifier types that address them.

pub mod clue;
pub mod location;
pub mod suspect;
pub mod timeline;

pub use clue::*;
pub use location::*;
pub use suspect::*;
pub use timeline::*;

use crate::CaseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Index of a location within its case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub usize);

/// Index of a suspect within its case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SuspectId(pub usize);

/// Clue number shown to the player, unique within a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClueId(pub u32);

impl std::fmt::Display for ClueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClueId {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ClueId)
            .map_err(|_| CaseError::MalformedClueId(s.trim().to_string()))
    }
}

/// Matching labels carried by clues and suspects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// True when the two sets share at least one tag
    pub fn intersects(&self, other: &Tags) -> bool {
        self.0.iter().any(|t| other.0.contains(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Turn a name or motive into a tag: lower case, spaces become hyphens
pub fn tagify(text: &str) -> String {
    text.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// How a narrative message should read (and be colored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Narrative,
    Lead,
    Success,
    Warning,
    Failure,
    Hint,
}

impl Tone {
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Narrative => "CASE",
            Tone::Lead => "LEAD",
            Tone::Success => "SUCCESS",
            Tone::Warning => "WARN",
            Tone::Failure => "FAILED",
            Tone::Hint => "TIP",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
