//! Investigation mechanics
//!
//! All matching in the game is tag-set intersection: a clue bears on a
//! suspect when the two share at least one tag.

use super::scenario::Case;
use crate::config::Rules;
use crate::data::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A location pointed out during questioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub location: LocationId,
    pub clue: ClueId,
    pub from: SuspectId,
}

/// Evidence in hand that bears on a suspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationScore {
    /// Matching clues not yet spent against this suspect
    pub scoring: Vec<ClueId>,
}

impl PresentationScore {
    pub fn score(&self) -> usize {
        self.scoring.len()
    }

    pub fn grade(&self, rules: &Rules) -> Presentation {
        match self.score() {
            n if n >= rules.strong_presentation => Presentation::Strong,
            0 => Presentation::None,
            _ => Presentation::Weak,
        }
    }
}

/// Score collected clues against a suspect, skipping ones already spent
pub fn score_presentation(suspect: &Suspect, collected: &[Clue]) -> PresentationScore {
    let scoring = collected
        .iter()
        .filter(|c| !suspect.spent_clues.contains(&c.id))
        .filter(|c| c.tags.intersects(&suspect.tags))
        .map(|c| c.id)
        .collect();
    PresentationScore { scoring }
}

/// Collected clues carrying the case's linking tag
pub fn linking_clue_count(collected: &[Clue], linking_tag: &str) -> usize {
    collected.iter().filter(|c| c.tags.contains(linking_tag)).count()
}

/// Walk uncollected clues in stable order; each one that matches the suspect
/// gets one roll at `chance`. The first success becomes the lead.
pub fn scan_for_lead<R: Rng + ?Sized>(
    case: &Case,
    suspect: &Suspect,
    chance: f64,
    rng: &mut R,
) -> Option<Lead> {
    for (location, clue) in case.uncollected_clues() {
        if clue.tags.intersects(&suspect.tags) && rng.gen_bool(chance) {
            return Some(Lead {
                location,
                clue: clue.id,
                from: suspect.id,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scenario::generate_tutorial_case;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clue(id: u32, tags: &[&str]) -> Clue {
        Clue::new(ClueId(id), ClueKind::Photo, "test", Tags::new(tags.iter().copied()))
    }

    #[test]
    fn thresholds_are_exact() {
        let rules = Rules::STANDARD;
        let suspect = Suspect::new(SuspectId(0), "Avery Collins", "jealousy", LocationId(0));

        let none = score_presentation(&suspect, &[clue(1, &["bar"])]);
        assert_eq!(none.grade(&rules), Presentation::None);

        let weak = score_presentation(&suspect, &[clue(1, &["avery"]), clue(2, &["bar"])]);
        assert_eq!(weak.score(), 1);
        assert_eq!(weak.grade(&rules), Presentation::Weak);

        let strong = score_presentation(&suspect, &[clue(1, &["avery"]), clue(2, &["jealousy"])]);
        assert_eq!(strong.scoring, vec![ClueId(1), ClueId(2)]);
        assert_eq!(strong.grade(&rules), Presentation::Strong);
    }

    #[test]
    fn spent_clues_do_not_score_twice() {
        let mut suspect = Suspect::new(SuspectId(0), "Avery Collins", "jealousy", LocationId(0));
        suspect.spent_clues.insert(ClueId(1));
        let score = score_presentation(&suspect, &[clue(1, &["avery"]), clue(2, &["avery"])]);
        assert_eq!(score.scoring, vec![ClueId(2)]);
    }

    #[test]
    fn linking_count_only_counts_linking_tag() {
        let collected = [clue(1, &["avery", "photo"]), clue(2, &["bar"]), clue(3, &["avery"])];
        assert_eq!(linking_clue_count(&collected, "avery"), 2);
        assert_eq!(linking_clue_count(&collected, "jordan"), 0);
    }

    #[test]
    fn certain_chance_finds_first_match_in_order() {
        let case = generate_tutorial_case();
        let avery = case.suspect(SuspectId(0)).unwrap();
        let lead = scan_for_lead(&case, avery, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(lead.location, LocationId(0));
        assert_eq!(lead.clue, ClueId(1));
    }

    #[test]
    fn zero_chance_or_no_match_finds_nothing() {
        let case = generate_tutorial_case();
        let avery = case.suspect(SuspectId(0)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(scan_for_lead(&case, avery, 0.0, &mut rng).is_none());

        // Morgan's tags match no tutorial clue
        let morgan = case.suspect(SuspectId(3)).unwrap();
        assert!(scan_for_lead(&case, morgan, 1.0, &mut rng).is_none());
    }
}
