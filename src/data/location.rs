//! Locations and the clues still waiting in them

use super::{Clue, ClueId, LocationId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    /// Uncollected clues, in placement order
    pub clues: Vec<Clue>,
}

impl Location {
    pub fn new(id: LocationId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            clues: Vec::new(),
        }
    }

    /// Remove a clue from this location, handing ownership to the caller
    pub fn take_clue(&mut self, id: ClueId) -> Option<Clue> {
        let pos = self.clues.iter().position(|c| c.id == id)?;
        Some(self.clues.remove(pos))
    }
}
