//! Case definitions and generation
//!
//! A case is a fixed cast of locations and suspects, one of whom is the
//! culprit, plus a pool of clues scattered across the locations. Clues that
//! carry the culprit's first-name tag form the trail a player can follow.

use crate::config::Rules;
use crate::data::*;
use crate::CaseError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Places a case can be set in
pub static LOCATION_NAMES: &[&str] = &[
    "Victim's Penthouse",
    "Back Alley",
    "Rooftop Garden",
    "Office",
    "Local Bar",
    "Park",
    "Train Station",
    "Art Gallery",
];

/// People who can end up under suspicion
pub static SUSPECT_NAMES: &[&str] = &[
    "Avery Collins",
    "Jordan Blake",
    "Riley Park",
    "Morgan Hale",
    "Casey Lin",
    "Quinn Harper",
];

pub static MOTIVES: &[&str] = &["money", "revenge", "jealousy", "cover up", "power", "old grudge"];

/// How a case came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseOrigin {
    Random,
    Tutorial,
}

/// A complete mystery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    id: Uuid,
    origin: CaseOrigin,
    title: String,
    pub(crate) locations: Vec<Location>,
    pub(crate) suspects: Vec<Suspect>,
    culprit: SuspectId,
    linking_tag: String,
}

impl Case {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> CaseOrigin {
        self.origin
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_tutorial(&self) -> bool {
        self.origin == CaseOrigin::Tutorial
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn culprit(&self) -> SuspectId {
        self.culprit
    }

    pub fn culprit_name(&self) -> &str {
        self.suspects
            .get(self.culprit.0)
            .map(|s| s.name.as_str())
            .unwrap_or("an unknown party")
    }

    /// The tag shared by the culprit and every clue on their trail
    pub fn linking_tag(&self) -> &str {
        &self.linking_tag
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    pub fn suspect(&self, id: SuspectId) -> Option<&Suspect> {
        self.suspects.get(id.0)
    }

    pub(crate) fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(id.0)
    }

    pub(crate) fn suspect_mut(&mut self, id: SuspectId) -> Option<&mut Suspect> {
        self.suspects.get_mut(id.0)
    }

    /// Resolve a location by name, ignoring case
    pub fn location_named(&self, name: &str) -> Option<LocationId> {
        let name = name.trim();
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .map(|l| l.id)
    }

    /// Resolve a suspect by full name or unique first name, ignoring case
    pub fn suspect_named(&self, name: &str) -> Option<SuspectId> {
        let name = name.trim();
        if let Some(s) = self.suspects.iter().find(|s| s.name.eq_ignore_ascii_case(name)) {
            return Some(s.id);
        }
        let mut by_first = self.suspects.iter().filter(|s| s.first_name().eq_ignore_ascii_case(name));
        match (by_first.next(), by_first.next()) {
            (Some(s), None) => Some(s.id),
            _ => None,
        }
    }

    /// Clues still lying in locations, in location then placement order
    pub fn uncollected_clues(&self) -> impl Iterator<Item = (LocationId, &Clue)> {
        self.locations
            .iter()
            .flat_map(|l| l.clues.iter().map(move |c| (l.id, c)))
    }
}

/// Generate a randomized case under the standard rules
pub fn generate_case<R: Rng + ?Sized>(rng: &mut R) -> Result<Case, CaseError> {
    generate_case_with(&Rules::STANDARD, rng)
}

/// Generate a randomized case
pub fn generate_case_with<R: Rng + ?Sized>(rules: &Rules, rng: &mut R) -> Result<Case, CaseError> {
    check_pool("location", LOCATION_NAMES.len(), rules.location_count)?;
    check_pool("suspect", SUSPECT_NAMES.len(), rules.suspect_count)?;
    check_pool("clue kind", ClueKind::ALL.len(), *rules.strong_clues.end())?;
    if rules.location_count == 0 || rules.suspect_count == 0 {
        return Err(CaseError::Generation("a case needs locations and suspects".to_string()));
    }

    let mut locations: Vec<Location> = LOCATION_NAMES
        .choose_multiple(rng, rules.location_count)
        .enumerate()
        .map(|(i, name)| Location::new(LocationId(i), name))
        .collect();

    let suspect_names: Vec<&str> = SUSPECT_NAMES
        .choose_multiple(rng, rules.suspect_count)
        .copied()
        .collect();
    let culprit = SuspectId(rng.gen_range(0..suspect_names.len()));

    let mut suspects = Vec::with_capacity(suspect_names.len());
    for (i, name) in suspect_names.iter().enumerate() {
        let motive = pick(MOTIVES, rng)?;
        let alibi = LocationId(rng.gen_range(0..locations.len()));
        suspects.push(Suspect::new(SuspectId(i), name, motive, alibi));
    }

    let linking_tag = first_name_tag(suspect_names[culprit.0]);
    let culprit_first = suspects[culprit.0].first_name().to_string();

    // (kind, description, tags) before numbering
    let mut pool: Vec<(ClueKind, String, Tags)> = Vec::new();

    let strong_count = rng.gen_range(rules.strong_clues.clone());
    for kind in ClueKind::ALL.choose_multiple(rng, strong_count) {
        pool.push((
            *kind,
            format!("{}, related to {}", kind.description(), culprit_first),
            Tags::new([linking_tag.clone(), kind.name().to_string()]),
        ));
    }

    let others: Vec<&Suspect> = suspects.iter().filter(|s| s.id != culprit).collect();
    let filler_count = rng.gen_range(rules.filler_clues.clone());
    for _ in 0..filler_count {
        let kind = *ClueKind::ALL
            .choose(rng)
            .ok_or_else(|| CaseError::Generation("no clue kinds".to_string()))?;
        let herring = match others.choose(rng) {
            Some(other) if rng.gen_bool(0.5) => Herring::Person(other.first_name().to_string()),
            _ => Herring::Motive(pick(MOTIVES, rng)?.to_string()),
        };
        pool.push(herring.into_clue_parts(kind));
    }

    pool.shuffle(rng);
    for (n, (kind, description, tags)) in pool.into_iter().enumerate() {
        let clue = Clue::new(ClueId(n as u32 + 1), kind, description, tags);
        let at = rng.gen_range(0..locations.len());
        locations[at].clues.push(clue);
    }

    let title = format!("Trouble at the {}", locations[0].name);

    Ok(Case {
        id: Uuid::new_v4(),
        origin: CaseOrigin::Random,
        title,
        locations,
        suspects,
        culprit,
        linking_tag,
    })
}

/// What a filler clue points at instead of the culprit
enum Herring {
    Person(String),
    Motive(String),
}

impl Herring {
    fn into_clue_parts(self, kind: ClueKind) -> (ClueKind, String, Tags) {
        match self {
            Herring::Person(first) => (
                kind,
                format!("{}, mentioning {}", kind.description(), first),
                Tags::new([tagify(&first), kind.name().to_string()]),
            ),
            Herring::Motive(motive) => (
                kind,
                format!("{}, hinting at {}", kind.description(), motive),
                Tags::new([tagify(&motive), kind.name().to_string()]),
            ),
        }
    }
}

fn check_pool(what: &str, available: usize, needed: usize) -> Result<(), CaseError> {
    if available < needed {
        return Err(CaseError::Generation(format!(
            "{what} pool has {available} entries but {needed} are drawn"
        )));
    }
    Ok(())
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> Result<&'a str, CaseError> {
    pool.choose(rng)
        .copied()
        .ok_or_else(|| CaseError::Generation("empty name pool".to_string()))
}

/// The scripted tutorial case. Nothing here is random.
pub fn generate_tutorial_case() -> Case {
    let names = ["Victim's Penthouse", "Local Bar", "Office", "Park"];
    let mut locations: Vec<Location> = names
        .iter()
        .enumerate()
        .map(|(i, name)| Location::new(LocationId(i), name))
        .collect();

    let penthouse = LocationId(0);
    let bar = LocationId(1);
    let office = LocationId(2);
    let park = LocationId(3);

    let suspects = vec![
        Suspect::new(SuspectId(0), "Avery Collins", "jealousy", office),
        Suspect::new(SuspectId(1), "Jordan Blake", "money", bar),
        Suspect::new(SuspectId(2), "Riley Park", "revenge", bar),
        Suspect::new(SuspectId(3), "Morgan Hale", "power", park),
    ];

    let photo = Clue::new(
        ClueId(1),
        ClueKind::Photo,
        "a photo with a partial name 'Avery' on the back",
        Tags::new(["avery", "photo"]),
    );
    let text = Clue::new(
        ClueId(2),
        ClueKind::Text,
        "a threatening text referencing the victim",
        Tags::new(["avery", "text"]),
    );
    let receipt = Clue::new(
        ClueId(3),
        ClueKind::Receipt,
        "a bar receipt timestamped near the time of the crime",
        Tags::new(["bar", "receipt"]),
    );
    let print = Clue::new(
        ClueId(4),
        ClueKind::Fingerprint,
        "a smudged fingerprint on the balcony rail",
        Tags::new(["avery", "fingerprint"]),
    );

    locations[penthouse.0].clues.push(photo);
    locations[penthouse.0].clues.push(print);
    locations[office.0].clues.push(text);
    locations[bar.0].clues.push(receipt);

    Case {
        id: Uuid::new_v4(),
        origin: CaseOrigin::Tutorial,
        title: "Tutorial: The Penthouse Affair".to_string(),
        locations,
        suspects,
        culprit: SuspectId(0),
        linking_tag: "avery".to_string(),
    }
}
