//! Narrative text: case briefings and the tutorial walkthrough

use super::scenario::Case;
use super::ActionDetail;
use crate::data::{Presentation, Suspect};
use serde::{Deserialize, Serialize};

/// One-line summary of a suspect for briefings and the notebook
pub fn suspect_summary(case: &Case, suspect: &Suspect) -> String {
    let alibi = case
        .location(suspect.alibi)
        .map(|l| l.name.as_str())
        .unwrap_or("nowhere in particular");
    format!("{} -- motive: {}; alibi: {}", suspect.name, suspect.motive, alibi)
}

/// Opening lines when a case starts
pub fn briefing(case: &Case) -> Vec<String> {
    let mut lines = Vec::new();
    if case.is_tutorial() {
        lines.push("Tutorial case loaded. Examine the scene (e) to begin the guided walkthrough.".to_string());
    } else {
        lines.push(format!("New case: {}.", case.title()));
    }
    lines.push("Suspects:".to_string());
    for suspect in case.suspects() {
        lines.push(format!("- {}", suspect_summary(case, suspect)));
    }
    lines
}

/// Where the player is in the tutorial script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialStep {
    Examine,
    Search,
    Interrogate,
    Present,
    Accuse,
    Done,
}

/// Hands out the next hint once the player does what the last one asked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorialGuide {
    step: TutorialStep,
}

impl TutorialGuide {
    pub fn new() -> Self {
        Self {
            step: TutorialStep::Examine,
        }
    }

    pub fn step(&self) -> TutorialStep {
        self.step
    }

    /// Advance on the expected action and return the hint for the next one
    pub fn observe(&mut self, detail: &ActionDetail) -> Option<&'static str> {
        let (next, hint) = match (self.step, detail) {
            (TutorialStep::Examine, ActionDetail::Examined { .. }) => (
                TutorialStep::Search,
                "Tutorial hint: collect clue 1 with `search 1` (or press s).",
            ),
            (TutorialStep::Search, ActionDetail::Collected { .. }) => (
                TutorialStep::Interrogate,
                "Tutorial hint: check the notebook (n), then select Avery Collins and interrogate (i).",
            ),
            (TutorialStep::Interrogate, ActionDetail::Interrogated { .. }) => (
                TutorialStep::Present,
                "Tutorial hint: present your evidence to Avery Collins (p). More clues wait at the Office.",
            ),
            (TutorialStep::Present, ActionDetail::Presented { outcome, .. }) => {
                let hint = if *outcome == Presentation::Strong {
                    "Tutorial hint: the evidence is strong. Accuse Avery Collins (a) to close the case."
                } else {
                    "Tutorial hint: collect more of Avery's clues before you accuse (a)."
                };
                (TutorialStep::Accuse, hint)
            }
            (TutorialStep::Accuse, ActionDetail::Accused { .. }) => (
                TutorialStep::Done,
                "Tutorial complete. Start a new case (c) when you are ready.",
            ),
            _ => return None,
        };
        self.step = next;
        Some(hint)
    }
}

impl Default for TutorialGuide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClueId, LocationId, SuspectId};
    use crate::game::scenario::generate_tutorial_case;

    #[test]
    fn guide_ignores_out_of_order_actions() {
        let mut guide = TutorialGuide::new();
        let collected = ActionDetail::Collected { clue: ClueId(1) };
        assert_eq!(guide.observe(&collected), None);
        assert_eq!(guide.step(), TutorialStep::Examine);

        let examined = ActionDetail::Examined {
            location: LocationId(0),
            clues: vec![ClueId(1), ClueId(4)],
        };
        assert!(guide.observe(&examined).is_some());
        assert_eq!(guide.step(), TutorialStep::Search);
        assert!(guide.observe(&collected).is_some());
        assert_eq!(guide.step(), TutorialStep::Interrogate);

        let asked = ActionDetail::Interrogated {
            suspect: SuspectId(0),
            lead: None,
        };
        assert!(guide.observe(&asked).is_some());
        assert_eq!(guide.step(), TutorialStep::Present);
    }

    #[test]
    fn briefing_lists_every_suspect() {
        let case = generate_tutorial_case();
        let lines = briefing(&case);
        assert!(lines[0].starts_with("Tutorial case loaded"));
        assert_eq!(lines.len(), 2 + case.suspects().len());
        assert_eq!(lines[2], "- Avery Collins -- motive: jealousy; alibi: Office");
    }
}
