//! Case timeline
//!
//! Records every narrative line of an investigation in the order it
//! happened, stamped with the turn and wall-clock time.

use super::Tone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entries kept per case; the oldest are dropped first
pub const TIMELINE_LIMIT: usize = 1_000;

/// A single line in the investigative log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub turn: u32,
    pub timestamp: DateTime<Utc>,
    pub tone: Tone,
    pub text: String,
}

impl TimelineEntry {
    pub fn new(turn: u32, tone: Tone, text: impl Into<String>) -> Self {
        Self {
            turn,
            timestamp: Utc::now(),
            tone,
            text: text.into(),
        }
    }
}

/// The complete log of a case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
        self.trim();
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TimelineEntry>) {
        self.entries.extend(entries);
        self.trim();
    }

    fn trim(&mut self) {
        if self.entries.len() > TIMELINE_LIMIT {
            let excess = self.entries.len() - TIMELINE_LIMIT;
            self.entries.drain(..excess);
        }
    }

    /// The most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> &[TimelineEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_tail_in_order() {
        let mut timeline = Timeline::new();
        for turn in 0..5 {
            timeline.record(TimelineEntry::new(turn, Tone::Narrative, format!("turn {turn}")));
        }
        let tail: Vec<&str> = timeline.recent(2).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(tail, vec!["turn 3", "turn 4"]);
        assert_eq!(timeline.recent(50).len(), 5);
    }

    #[test]
    fn oldest_entries_are_dropped_past_the_limit() {
        let mut timeline = Timeline::new();
        timeline.record(TimelineEntry::new(0, Tone::Narrative, "first"));
        timeline.extend((0..TIMELINE_LIMIT).map(|n| TimelineEntry::new(1, Tone::Narrative, format!("line {n}"))));
        assert_eq!(timeline.len(), TIMELINE_LIMIT);
        assert_eq!(timeline.entries[0].text, "line 0");
        assert_eq!(timeline.recent(1)[0].text, format!("line {}", TIMELINE_LIMIT - 1));
    }
}
