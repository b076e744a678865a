use std::time::Duration;

use holdem_domain::Chips;

/// Immutable game tuning for one table. Captured at table creation; a table
/// never observes configuration changes mid-life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub default_buy_in: Chips,
    pub turn_timer: Duration,
    pub time_bank_seconds: u32,
    pub hand_start_delay: Duration,
    pub showdown_delay: Duration,
    pub sit_out_auto_remove: Duration,
    pub max_hand_history: usize,
    pub elo_k_factor: f64,
    pub default_elo: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 9,
            small_blind: Chips(1),
            big_blind: Chips(2),
            min_buy_in: Chips(40),
            max_buy_in: Chips(400),
            default_buy_in: Chips(200),
            turn_timer: Duration::from_millis(15_000),
            time_bank_seconds: 30,
            hand_start_delay: Duration::from_millis(3_000),
            showdown_delay: Duration::from_millis(2_000),
            sit_out_auto_remove: Duration::from_millis(600_000),
            max_hand_history: 100,
            elo_k_factor: 32.0,
            default_elo: 1000.0,
        }
    }
}
