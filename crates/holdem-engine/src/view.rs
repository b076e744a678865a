use holdem_domain::{ActionTag, Card, Chips, LegalAction, Phase, SeatStatus, TableId};
use serde::{Deserialize, Serialize};

/// Public face of one seat. `hole_cards` stays `None` in public views and is
/// populated only for the requesting player in their private view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub stack: Chips,
    pub status: SeatStatus,
    pub current_bet: Chips,
    pub total_bet_this_hand: Chips,
    pub sit_out: bool,
    pub disconnected: bool,
    pub last_action: Option<ActionTag>,
    pub time_bank: u32,
    pub hands_won: u64,
    pub elo: f64,
    pub hole_cards: Option<[Card; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotView {
    pub label: String,
    pub amount: Chips,
    pub eligible: Vec<usize>,
}

/// Full public snapshot of a table; enough for any client to render the game
/// without earlier pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub table_id: TableId,
    pub hand_no: u64,
    pub phase: Phase,
    pub community: Vec<Card>,
    pub pot: Chips,
    pub pots: Vec<PotView>,
    pub dealer_seat: usize,
    pub current_actor: Option<usize>,
    pub current_bet_level: Chips,
    pub min_raise: Chips,
    pub seats: Vec<Option<SeatView>>,
}

/// A player's own view: the public table with their hole cards filled in and
/// the actions currently legal for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateView {
    pub seat: usize,
    pub legal_actions: Vec<LegalAction>,
    pub table: TableView,
}
