use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use holdem_domain::{Card, Chips, HandId, Phase};
use holdem_eval::HandCategory;
use serde::{Deserialize, Serialize};

/// One line of the chronological audit trail for a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub phase: Phase,
    pub seat: Option<usize>,
    pub detail: String,
}

/// A showdown participant as recorded in history. `category` is `None` when
/// the hand ended uncontested and no cards were evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContenderRecord {
    pub seat: usize,
    pub name: String,
    pub hole_cards: [Card; 2],
    pub category: Option<HandCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotResult {
    pub label: String,
    pub amount: Chips,
    pub winners: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPayout {
    pub seat: usize,
    pub amount: Chips,
}

/// Completed-hand record kept in the per-table history ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: HandId,
    pub hand_no: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub community: Vec<Card>,
    pub contenders: Vec<ContenderRecord>,
    pub pots: Vec<PotResult>,
    pub payouts: Vec<SeatPayout>,
    pub log: Vec<LogEntry>,
}

/// Fixed-capacity ring of completed hands, newest last.
#[derive(Debug, Clone, Default)]
pub struct HandHistory {
    records: VecDeque<HandRecord>,
    capacity: usize,
}

impl HandHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, record: HandRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Most recent records, newest first, at most `limit`.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<HandRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hand_no: u64) -> HandRecord {
        let now = Utc::now();
        HandRecord {
            hand_id: HandId::new(),
            hand_no,
            started_at: now,
            ended_at: now,
            community: Vec::new(),
            contenders: Vec::new(),
            pots: Vec::new(),
            payouts: Vec::new(),
            log: Vec::new(),
        }
    }

    #[test]
    fn ring_drops_oldest_beyond_capacity() {
        let mut history = HandHistory::new(3);
        for hand_no in 1..=5 {
            history.push(record(hand_no));
        }
        assert_eq!(history.len(), 3);
        let recent = history.recent(10);
        let hand_nos: Vec<u64> = recent.iter().map(|r| r.hand_no).collect();
        assert_eq!(hand_nos, vec![5, 4, 3]);
    }

    #[test]
    fn recent_respects_the_limit() {
        let mut history = HandHistory::new(10);
        for hand_no in 1..=4 {
            history.push(record(hand_no));
        }
        assert_eq!(history.recent(2).len(), 2);
        assert_eq!(history.recent(2)[0].hand_no, 4);
    }
}
