use chrono::{DateTime, Utc};
use holdem_domain::{ActionTag, Card, Chips, Phase, TableId};
use holdem_eval::HandCategory;
use serde::{Deserialize, Serialize};

use crate::history::{PotResult, SeatPayout};
use crate::view::TableView;

/// A state-change notification pushed to every client at the table. Events
/// are self-contained: a client that misses one can rebuild its view from the
/// state query, so delivery may stay best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    pub table_id: TableId,
    pub hand_no: u64,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: PushEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PushEventKind {
    PlayerJoined {
        seat: usize,
        name: String,
        stack: Chips,
    },
    PlayerLeft {
        seat: usize,
        name: String,
        final_stack: Chips,
    },
    BlindsPosted {
        small_blind_seat: usize,
        small_blind: Chips,
        big_blind_seat: usize,
        big_blind: Chips,
    },
    /// Hole cards went out to these seats. Card faces travel only through the
    /// per-player state query.
    CardsDealt { seats: Vec<usize> },
    /// The action moved; everything an agent needs to respond is inline.
    ActionOn {
        seat: usize,
        pot: Chips,
        current_bet_level: Chips,
        current_bet: Chips,
        to_call: Chips,
        min_raise: Chips,
        time_bank: u32,
    },
    PlayerAction {
        seat: usize,
        tag: ActionTag,
        amount: Option<Chips>,
        pot: Chips,
    },
    CommunityCards {
        phase: Phase,
        cards: Vec<Card>,
    },
    TimeBank {
        seat: usize,
        remaining: u32,
    },
    Showdown {
        community: Vec<Card>,
        reveals: Vec<ShowdownReveal>,
        pots: Vec<PotResult>,
    },
    HandComplete {
        payouts: Vec<SeatPayout>,
    },
    HandAborted {
        reason: String,
    },
    /// Full public snapshot after hand teardown; lets a client that missed
    /// pushes resynchronize without a state query.
    TableState { view: TableView },
    /// Dealer narration line.
    Mitsuki { line: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownReveal {
    pub seat: usize,
    pub name: String,
    pub hole_cards: [Card; 2],
    pub category: HandCategory,
}
