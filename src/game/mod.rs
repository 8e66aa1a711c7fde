//! Core game logic and state management
//!
//! `Game` owns one investigation from briefing to verdict. Every change to
//! credibility, turns and the game phase passes through [`Game::gate`], so a
//! closed case can never be mutated again.

pub mod command;
pub mod investigation;
pub mod narrative;
pub mod scenario;

pub use command::Command;
pub use investigation::Lead;
pub use narrative::{TutorialGuide, TutorialStep};
pub use scenario::{generate_case, generate_tutorial_case, Case, CaseOrigin};

use crate::config::Rules;
use crate::data::*;
use crate::CaseError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Investigating,
    Solved,
    Discredited,
    OutOfTime,
}

/// How a case ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Solved { culprit: String },
    Discredited { culprit: String },
    OutOfTime { culprit: String },
}

impl Verdict {
    pub fn is_win(&self) -> bool {
        matches!(self, Verdict::Solved { .. })
    }

    pub fn culprit(&self) -> &str {
        match self {
            Verdict::Solved { culprit }
            | Verdict::Discredited { culprit }
            | Verdict::OutOfTime { culprit } => culprit,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Solved { .. } => "CASE CLOSED",
            Verdict::Discredited { .. } => "REMOVED FROM THE CASE",
            Verdict::OutOfTime { .. } => "OUT OF TIME",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Solved { culprit } => {
                write!(f, "{} is brought to justice. You win.", culprit)
            }
            Verdict::Discredited { culprit } => write!(
                f,
                "Your credibility has reached zero and you have been removed from the case. The real culprit was: {}",
                culprit
            ),
            Verdict::OutOfTime { culprit } => write!(
                f,
                "You ran out of allowed turns. The real culprit was: {}",
                culprit
            ),
        }
    }
}

/// What an accepted action did, for callers that want more than prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionDetail {
    Moved { from: LocationId, to: LocationId },
    StayedPut { location: LocationId },
    Examined { location: LocationId, clues: Vec<ClueId> },
    Collected { clue: ClueId },
    Interrogated { suspect: SuspectId, lead: Option<LocationId> },
    AlreadyInterrogated { suspect: SuspectId },
    Presented { suspect: SuspectId, outcome: Presentation, score: usize },
    AlreadyStrong { suspect: SuspectId },
    Accused { suspect: SuspectId, correct: bool, proven: bool },
    /// The action's own cost closed the case before it could be evaluated
    Halted,
}

/// Result of an accepted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub messages: Vec<TimelineEntry>,
    /// Credibility after the action, never below zero
    pub credibility: i32,
    pub turns: u32,
    pub terminal: bool,
    pub verdict: Option<Verdict>,
    pub detail: ActionDetail,
}

/// Location row for the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: LocationId,
    pub name: String,
    pub clue_count: usize,
    pub is_current: bool,
}

/// Suspect row for the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectSummary {
    pub id: SuspectId,
    pub name: String,
    pub motive: String,
    pub alibi: String,
    pub interrogated: bool,
    pub presentation: Option<Presentation>,
}

/// The player's notes: what they hold, who they have met, where to look
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub clues: Vec<(ClueId, String, String)>,
    pub suspects: Vec<SuspectSummary>,
    pub leads: Vec<String>,
}

impl Notebook {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Collected clues:".to_string()];
        if self.clues.is_empty() {
            lines.push("- none".to_string());
        }
        for (id, brief, tags) in &self.clues {
            lines.push(format!("- id {}: {} | tags: {}", id, brief, tags));
        }
        lines.push(String::new());
        lines.push("Suspect summaries:".to_string());
        for s in &self.suspects {
            let presented = s.presentation.map(|p| p.label()).unwrap_or("not presented");
            let asked = if s.interrogated { "interrogated" } else { "not interrogated" };
            lines.push(format!(
                "- {} | alibi: {} | {} | presented: {}",
                s.name, s.alibi, asked, presented
            ));
        }
        if !self.leads.is_empty() {
            lines.push(String::new());
            lines.push("Leads:".to_string());
            for lead in &self.leads {
                lines.push(format!("- {}", lead));
            }
        }
        lines
    }
}

/// A change routed through the gate
#[derive(Debug, Clone, Copy)]
enum Charge {
    /// Spend credibility and one turn
    Cost(u8),
    /// Reward or penalty; increases are capped at the starting value
    Adjust(i32),
    /// Reward for a proven accusation, closing the case as solved
    Solve(i32),
}

/// The main game state
#[derive(Debug, Clone)]
pub struct Game {
    /// The case under investigation; clues leave its locations when collected
    case: Case,

    /// Costs, rewards and limits
    rules: Rules,

    /// Current game phase
    phase: GamePhase,

    /// Where the detective stands
    current: LocationId,

    /// Raw credibility; may dip below zero inside the charge that closes the case
    credibility: i32,

    /// Charged actions taken so far
    turns: u32,

    /// Clues in hand, in collection order
    collected: Vec<Clue>,

    /// Latest presentation outcome per suspect
    presentations: BTreeMap<SuspectId, Presentation>,

    /// Locations pointed out during questioning
    leads: Vec<Lead>,

    /// Every message shown to the player
    timeline: Timeline,

    /// Walkthrough hints, only for the tutorial case
    tutorial: Option<TutorialGuide>,

    /// Seed behind the case and the lead rolls
    seed: u64,

    /// Session rng for the lead scan
    rng: StdRng,
}

impl Game {
    /// Generate a random case from `seed` and open a session on it
    pub fn start_new_case(seed: u64) -> Result<Self, CaseError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let case = scenario::generate_case_with(&Rules::STANDARD, &mut rng)?;
        Ok(Self::open(case, seed, rng))
    }

    /// Open the scripted tutorial case
    pub fn start_tutorial_case() -> Self {
        Self::from_case(generate_tutorial_case(), crate::seed_from_clock())
    }

    /// Open a session on an existing case; `seed` drives interrogation luck
    pub fn from_case(case: Case, seed: u64) -> Self {
        Self::open(case, seed, StdRng::seed_from_u64(seed))
    }

    fn open(case: Case, seed: u64, rng: StdRng) -> Self {
        let rules = Rules::STANDARD;
        let clue_count: usize = case.locations().iter().map(|l| l.clues.len()).sum();
        info!(
            case_id = %case.id(),
            origin = ?case.origin(),
            seed,
            locations = case.locations().len(),
            suspects = case.suspects().len(),
            clues = clue_count,
            "case opened"
        );
        match serde_json::to_string(&case) {
            Ok(layout) => debug!(case_id = %case.id(), %layout, "case layout"),
            Err(e) => debug!(case_id = %case.id(), error = %e, "case layout not serializable"),
        }

        let mut timeline = Timeline::new();
        for line in narrative::briefing(&case) {
            timeline.record(TimelineEntry::new(0, Tone::Narrative, line));
        }
        let tutorial = case.is_tutorial().then(TutorialGuide::new);

        Self {
            current: LocationId(0),
            credibility: rules.starting_credibility,
            rules,
            phase: GamePhase::Investigating,
            turns: 0,
            collected: Vec::new(),
            presentations: BTreeMap::new(),
            leads: Vec::new(),
            timeline,
            tutorial,
            seed,
            rng,
            case,
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn case(&self) -> &Case {
        &self.case
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != GamePhase::Investigating
    }

    pub fn verdict(&self) -> Option<Verdict> {
        let culprit = self.case.culprit_name().to_string();
        match self.phase {
            GamePhase::Investigating => None,
            GamePhase::Solved => Some(Verdict::Solved { culprit }),
            GamePhase::Discredited => Some(Verdict::Discredited { culprit }),
            GamePhase::OutOfTime => Some(Verdict::OutOfTime { culprit }),
        }
    }

    /// Credibility as shown to the player
    pub fn credibility(&self) -> i32 {
        self.credibility.max(0)
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn max_turns(&self) -> u32 {
        self.rules.max_turns
    }

    pub fn current_location(&self) -> &Location {
        // `current` only ever holds ids taken from this case
        &self.case.locations()[self.current.0]
    }

    pub fn collected_clues(&self) -> &[Clue] {
        &self.collected
    }

    pub fn presentation(&self, suspect: SuspectId) -> Option<Presentation> {
        self.presentations.get(&suspect).copied()
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn tutorial_step(&self) -> Option<TutorialStep> {
        self.tutorial.as_ref().map(TutorialGuide::step)
    }

    pub fn location_summaries(&self) -> Vec<LocationSummary> {
        self.case
            .locations()
            .iter()
            .map(|l| LocationSummary {
                id: l.id,
                name: l.name.clone(),
                clue_count: l.clues.len(),
                is_current: l.id == self.current,
            })
            .collect()
    }

    pub fn suspect_summaries(&self) -> Vec<SuspectSummary> {
        self.case
            .suspects()
            .iter()
            .map(|s| SuspectSummary {
                id: s.id,
                name: s.name.clone(),
                motive: s.motive.clone(),
                alibi: self.location_name(s.alibi).to_string(),
                interrogated: s.interrogated,
                presentation: self.presentation(s.id),
            })
            .collect()
    }

    pub fn notebook(&self) -> Notebook {
        Notebook {
            clues: self
                .collected
                .iter()
                .map(|c| (c.id, c.brief(), c.tags.to_string()))
                .collect(),
            suspects: self.suspect_summaries(),
            leads: self
                .leads
                .iter()
                .map(|l| {
                    let who = self.case.suspect(l.from).map(|s| s.name.as_str()).unwrap_or("someone");
                    format!("{} (from {})", self.location_name(l.location), who)
                })
                .collect(),
        }
    }

    fn location_name(&self, id: LocationId) -> &str {
        self.case.location(id).map(|l| l.name.as_str()).unwrap_or("unknown")
    }

    fn suspect_name(&self, id: SuspectId) -> Result<String, CaseError> {
        self.case
            .suspect(id)
            .map(|s| s.name.clone())
            .ok_or_else(|| CaseError::UnknownSuspect(format!("#{}", id.0 + 1)))
    }

    /// Resolve a location by name or 1-based number
    pub fn resolve_location(&self, query: &str) -> Result<LocationId, CaseError> {
        if let Ok(n) = query.trim().parse::<usize>() {
            if (1..=self.case.locations().len()).contains(&n) {
                return Ok(LocationId(n - 1));
            }
        }
        self.case
            .location_named(query)
            .ok_or_else(|| CaseError::UnknownLocation(query.trim().to_string()))
    }

    pub fn resolve_suspect(&self, query: &str) -> Result<SuspectId, CaseError> {
        self.case
            .suspect_named(query)
            .ok_or_else(|| CaseError::UnknownSuspect(query.trim().to_string()))
    }

    // ── Actions ────────────────────────────────────────────────────────

    /// Parse and run a typed command
    pub fn perform(&mut self, input: &str) -> Result<ActionOutcome, CaseError> {
        let command = Command::parse(input).inspect_err(|e| {
            debug!(case_id = %self.case.id(), input, error = %e, "command rejected");
        })?;
        self.execute(command)
    }

    /// Run a parsed command, resolving names against this case
    pub fn execute(&mut self, command: Command) -> Result<ActionOutcome, CaseError> {
        debug!(case_id = %self.case.id(), action = %command.description(), "executing");
        let result = match command {
            Command::Move(to) => self.resolve_location(&to).and_then(|id| self.move_to(id)),
            Command::Examine => self.examine(),
            Command::Search(clue) => self.search(clue),
            Command::Interrogate(who) => self.resolve_suspect(&who).and_then(|id| self.interrogate(id)),
            Command::Present(who) => self.resolve_suspect(&who).and_then(|id| self.present_evidence(id)),
            Command::Accuse(who) => self.resolve_suspect(&who).and_then(|id| self.accuse(id)),
        };
        if let Err(e) = &result {
            debug!(case_id = %self.case.id(), error = %e, "action rejected");
        }
        result
    }

    fn ensure_active(&self) -> Result<(), CaseError> {
        match self.verdict() {
            Some(verdict) => Err(CaseError::CaseClosed(verdict)),
            None => Ok(()),
        }
    }

    /// Travel to another location. Staying put is free.
    pub fn move_to(&mut self, to: LocationId) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        let name = self
            .case
            .location(to)
            .map(|l| l.name.clone())
            .ok_or_else(|| CaseError::UnknownLocation(format!("#{}", to.0 + 1)))?;

        if to == self.current {
            let line = (Tone::Narrative, format!("You are already at {}.", name));
            return Ok(self.finish(ActionDetail::StayedPut { location: to }, vec![line]));
        }

        let from = self.current;
        self.current = to;
        self.apply_cost(1);
        let line = (Tone::Narrative, format!("You move to {}.", name));
        Ok(self.finish(ActionDetail::Moved { from, to }, vec![line]))
    }

    /// List the clues lying at the current location. Free.
    pub fn examine(&mut self) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        let location = self.current_location();
        let clues: Vec<ClueId> = location.clues.iter().map(|c| c.id).collect();
        let mut lines = Vec::new();
        if location.clues.is_empty() {
            lines.push((Tone::Narrative, "You see nothing of obvious interest.".to_string()));
        } else {
            lines.push((Tone::Narrative, "Visible items and clues:".to_string()));
            for clue in &location.clues {
                lines.push((Tone::Narrative, format!("  id {}: {}", clue.id, clue.brief())));
            }
        }
        let detail = ActionDetail::Examined {
            location: self.current,
            clues,
        };
        Ok(self.finish(detail, lines))
    }

    /// Collect a clue from the current location
    pub fn search(&mut self, id: ClueId) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        if self.collected.iter().any(|c| c.id == id) {
            return Err(CaseError::AlreadyCollected(id));
        }
        let location = self
            .case
            .location_mut(self.current)
            .ok_or_else(|| CaseError::UnknownLocation(format!("#{}", self.current.0 + 1)))?;
        let mut clue = location.take_clue(id).ok_or(CaseError::ClueNotHere(id))?;

        clue.found = true;
        let line = (Tone::Narrative, format!("You collected the clue: {}", clue.brief()));
        self.collected.push(clue);
        self.apply_cost(1);
        Ok(self.finish(ActionDetail::Collected { clue: id }, vec![line]))
    }

    /// Question a suspect. Only the first interrogation costs, or tells you anything.
    pub fn interrogate(&mut self, suspect: SuspectId) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        let name = self.suspect_name(suspect)?;

        let already = self.case.suspect(suspect).map(|s| s.interrogated).unwrap_or(false);
        if already {
            let line = (Tone::Narrative, format!("{} has nothing new to tell you.", name));
            return Ok(self.finish(ActionDetail::AlreadyInterrogated { suspect }, vec![line]));
        }

        if let Some(s) = self.case.suspect_mut(suspect) {
            s.interrogated = true;
        }
        let mut lines = vec![(Tone::Narrative, format!("You question {}.", name))];
        if self.apply_cost(1).is_some() {
            return Ok(self.finish(ActionDetail::Halted, lines));
        }

        let lead = match self.case.suspect(suspect) {
            Some(s) => investigation::scan_for_lead(&self.case, s, self.rules.lead_chance, &mut self.rng),
            None => None,
        };
        match lead {
            Some(lead) => {
                lines.push((
                    Tone::Lead,
                    format!("During questioning you learn of a lead at: {}", self.location_name(lead.location)),
                ));
                self.leads.push(lead);
            }
            None => {
                let alibi = self.case.suspect(suspect).map(|s| s.alibi).unwrap_or(LocationId(0));
                lines.push((
                    Tone::Narrative,
                    format!("The suspect maintains their alibi: {}", self.location_name(alibi)),
                ));
            }
        }
        let detail = ActionDetail::Interrogated {
            suspect,
            lead: lead.map(|l| l.location),
        };
        Ok(self.finish(detail, lines))
    }

    /// Lay the collected evidence before a suspect
    pub fn present_evidence(&mut self, suspect: SuspectId) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        let name = self.suspect_name(suspect)?;

        if self.presentation(suspect) == Some(Presentation::Strong) {
            let line = (
                Tone::Hint,
                format!("You have already made a convincing case against {}.", name),
            );
            return Ok(self.finish(ActionDetail::AlreadyStrong { suspect }, vec![line]));
        }

        let mut lines = Vec::new();
        if self.apply_cost(1).is_some() {
            return Ok(self.finish(ActionDetail::Halted, lines));
        }

        let score = match self.case.suspect(suspect) {
            Some(s) => investigation::score_presentation(s, &self.collected),
            None => return Err(CaseError::UnknownSuspect(name)),
        };
        let outcome = score.grade(&self.rules);
        self.presentations.insert(suspect, outcome);

        match outcome {
            Presentation::Strong => {
                if let Some(s) = self.case.suspect_mut(suspect) {
                    s.spent_clues.extend(score.scoring.iter().copied());
                }
                let reward = self.rules.strong_presentation_reward;
                self.apply_adjustment(reward);
                lines.push((
                    Tone::Success,
                    format!(
                        "You present a convincing chain of evidence linking {} to the crime. Credibility +{}.",
                        name, reward
                    ),
                ));
            }
            Presentation::Weak => {
                lines.push((
                    Tone::Narrative,
                    "Your evidence is suggestive but circumstantial. Credibility unchanged.".to_string(),
                ));
            }
            Presentation::None => {
                let penalty = self.rules.empty_presentation_penalty;
                self.apply_adjustment(-penalty);
                lines.push((
                    Tone::Warning,
                    format!(
                        "No clear evidence links {} to the crime. You lose {} credibility for a weak presentation.",
                        name, penalty
                    ),
                ));
            }
        }

        let detail = ActionDetail::Presented {
            suspect,
            outcome,
            score: score.score(),
        };
        Ok(self.finish(detail, lines))
    }

    /// Name the culprit
    pub fn accuse(&mut self, suspect: SuspectId) -> Result<ActionOutcome, CaseError> {
        self.ensure_active()?;
        let name = self.suspect_name(suspect)?;

        let mut lines = vec![(Tone::Narrative, format!("You formally accuse {}.", name))];
        if self.apply_cost(1).is_some() {
            return Ok(self.finish(ActionDetail::Halted, lines));
        }

        let correct = suspect == self.case.culprit();
        let mut proven = false;
        if correct {
            let linking = investigation::linking_clue_count(&self.collected, self.case.linking_tag());
            if linking >= self.rules.proof_threshold {
                proven = true;
                self.gate(Charge::Solve(self.rules.solved_reward));
                lines.push((
                    Tone::Success,
                    "You accused the culprit and provided strong evidence. Case closed.".to_string(),
                ));
            } else {
                let penalty = self.rules.dismissed_penalty;
                self.apply_adjustment(-penalty);
                lines.push((
                    Tone::Warning,
                    format!(
                        "You accused the right person but lacked supporting evidence. The case is dismissed for lack of proof. You lose {} credibility.",
                        penalty
                    ),
                ));
            }
        } else {
            let penalty = self.rules.wrong_accusation_penalty;
            self.apply_adjustment(-penalty);
            lines.push((
                Tone::Failure,
                format!(
                    "You accused the wrong person. Public trust plummets. You lose {} credibility.",
                    penalty
                ),
            ));
        }

        let detail = ActionDetail::Accused {
            suspect,
            correct,
            proven,
        };
        Ok(self.finish(detail, lines))
    }

    // ── Gating ─────────────────────────────────────────────────────────

    /// Spend `cost` credibility and one turn
    fn apply_cost(&mut self, cost: u8) -> Option<Verdict> {
        self.gate(Charge::Cost(cost))
    }

    fn apply_adjustment(&mut self, delta: i32) -> Option<Verdict> {
        self.gate(Charge::Adjust(delta))
    }

    /// The only place credibility, turns and phase change. Returns the
    /// verdict if this charge closed the case.
    fn gate(&mut self, charge: Charge) -> Option<Verdict> {
        if self.is_terminal() {
            return None;
        }

        let cap = self.rules.starting_credibility;
        match charge {
            Charge::Cost(cost) => {
                self.credibility -= i32::from(cost);
                self.turns += 1;
            }
            Charge::Adjust(delta) if delta > 0 => {
                self.credibility = (self.credibility + delta).min(cap);
            }
            Charge::Adjust(delta) => {
                self.credibility += delta;
            }
            Charge::Solve(reward) => {
                self.credibility = (self.credibility + reward).min(cap);
                self.phase = GamePhase::Solved;
            }
        }
        debug!(
            case_id = %self.case.id(),
            ?charge,
            credibility = self.credibility,
            turns = self.turns,
            "charge applied"
        );

        if self.phase == GamePhase::Investigating {
            if self.credibility <= 0 {
                self.phase = GamePhase::Discredited;
            } else if self.turns >= self.rules.max_turns {
                self.phase = GamePhase::OutOfTime;
            }
        }

        let verdict = self.verdict();
        if let Some(v) = &verdict {
            info!(
                case_id = %self.case.id(),
                phase = ?self.phase,
                culprit = v.culprit(),
                turns = self.turns,
                "case closed"
            );
        }
        verdict
    }

    /// Stamp the action's lines into the timeline and build the outcome
    fn finish(&mut self, detail: ActionDetail, mut lines: Vec<(Tone, String)>) -> ActionOutcome {
        let verdict = self.verdict();
        match &verdict {
            Some(v) => {
                let tone = if v.is_win() { Tone::Success } else { Tone::Failure };
                lines.push((tone, v.to_string()));
            }
            None => {
                if let Some(hint) = self.tutorial.as_mut().and_then(|g| g.observe(&detail)) {
                    lines.push((Tone::Hint, hint.to_string()));
                }
            }
        }

        let messages: Vec<TimelineEntry> = lines
            .into_iter()
            .map(|(tone, text)| TimelineEntry::new(self.turns, tone, text))
            .collect();
        self.timeline.extend(messages.iter().cloned());
        debug!(
            case_id = %self.case.id(),
            ?detail,
            credibility = self.credibility,
            turns = self.turns,
            "action accepted"
        );

        ActionOutcome {
            messages,
            credibility: self.credibility(),
            turns: self.turns,
            terminal: verdict.is_some(),
            verdict,
            detail,
        }
    }
}
