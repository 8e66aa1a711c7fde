//! Fixed game rules and launch options
//!
//! There is exactly one rule set. `LaunchOptions` only decides which case
//! the binary opens and where it logs.

use clap::Parser;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// The constants every case is played under.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    /// Credibility at the start of a case, also the cap for any increase
    pub starting_credibility: i32,
    pub max_turns: u32,
    /// Chance that a qualifying clue becomes a lead during interrogation
    pub lead_chance: f64,

    pub location_count: usize,
    pub suspect_count: usize,
    pub strong_clues: RangeInclusive<usize>,
    pub filler_clues: RangeInclusive<usize>,

    /// Matching clues needed for a strong presentation
    pub strong_presentation: usize,
    pub strong_presentation_reward: i32,
    pub empty_presentation_penalty: i32,

    /// Linking clues needed for an accusation to stick
    pub proof_threshold: usize,
    pub solved_reward: i32,
    pub dismissed_penalty: i32,
    pub wrong_accusation_penalty: i32,
}

impl Rules {
    pub const STANDARD: Rules = Rules {
        starting_credibility: 10,
        max_turns: 50,
        lead_chance: 0.2,
        location_count: 4,
        suspect_count: 5,
        strong_clues: 3..=4,
        filler_clues: 4..=6,
        strong_presentation: 2,
        strong_presentation_reward: 2,
        empty_presentation_penalty: 2,
        proof_threshold: 2,
        solved_reward: 3,
        dismissed_penalty: 2,
        wrong_accusation_penalty: 5,
    };
}

impl Default for Rules {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Command line for the `casefile` binary
#[derive(Debug, Clone, Parser)]
#[command(name = "casefile", version, about = "A terminal detective game")]
pub struct LaunchOptions {
    /// Seed for the first randomized case (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Open the guided tutorial case instead of the title screen
    #[arg(long)]
    pub tutorial: bool,

    /// Where to write the log (the terminal belongs to the game)
    #[arg(long, default_value = "casefile.log")]
    pub log_file: PathBuf,
}
