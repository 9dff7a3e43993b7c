use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StatsPort;

/// Cumulative counters for one sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    #[serde(alias = "times", alias = "total")]
    pub attempts: u32,
    pub correct: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<DateTime<Utc>>,
}

impl StatsEntry {
    pub fn record(&mut self, correct: bool, at: DateTime<Utc>) {
        self.attempts = self.attempts.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.last_practiced = Some(at);
    }

    /// Accuracy rounded half-up to a whole percent, `None` before the first attempt.
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.attempts == 0 {
            return None;
        }
        let correct = u64::from(self.correct.min(self.attempts));
        let attempts = u64::from(self.attempts);
        Some(((200 * correct + attempts) / (2 * attempts)) as u32)
    }

    pub fn accuracy_label(&self) -> String {
        match self.accuracy_percent() {
            Some(pct) => format!("{pct}%"),
            None => "-".to_string(),
        }
    }
}

pub type StatsMap = BTreeMap<String, StatsEntry>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub practiced: usize,
    pub attempts: u32,
    pub correct: u32,
}

impl StatsSummary {
    pub fn accuracy_label(&self) -> String {
        StatsEntry {
            attempts: self.attempts,
            correct: self.correct,
            last_practiced: None,
        }
        .accuracy_label()
    }
}

/// Per-sentence counters backed by a storage port.
///
/// Loaded once on open; every mutation is written straight back.
pub struct StatsStore {
    entries: StatsMap,
    port: Box<dyn StatsPort>,
}

impl StatsStore {
    pub fn open(port: Box<dyn StatsPort>) -> Self {
        let entries = match port.load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved stats, starting empty");
                StatsMap::new()
            }
        };
        tracing::debug!(sentences = entries.len(), "stats loaded");
        Self { entries, port }
    }

    /// Counters for `id`, zeroed if the sentence was never graded.
    pub fn entry(&self, id: &str) -> StatsEntry {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    pub fn record(&mut self, id: &str, correct: bool) -> StatsEntry {
        let entry = self.entries.entry(id.to_string()).or_default();
        entry.record(correct, Utc::now());
        let updated = entry.clone();
        if let Err(err) = self.port.save(&self.entries) {
            tracing::warn!(error = %err, sentence = id, "could not save stats");
        }
        updated
    }

    pub fn accuracy_for(&self, id: &str) -> String {
        self.entry(id).accuracy_label()
    }

    pub fn summary(&self) -> StatsSummary {
        self.entries
            .values()
            .fold(StatsSummary::default(), |mut acc, entry| {
                if entry.attempts > 0 {
                    acc.practiced += 1;
                }
                acc.attempts = acc.attempts.saturating_add(entry.attempts);
                acc.correct = acc.correct.saturating_add(entry.correct);
                acc
            })
    }

    pub fn entries(&self) -> &StatsMap {
        &self.entries
    }
}
