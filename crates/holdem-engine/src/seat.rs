use holdem_domain::{ActionTag, Card, Chips, MoneyError, PlayerToken, SeatStatus};

/// One occupied seat: the player's chips, cards, per-street and per-hand
/// betting state, and session stats. Owned exclusively by the table.
#[derive(Debug, Clone)]
pub struct Seat {
    pub token: PlayerToken,
    pub name: String,
    pub stack: Chips,
    pub hole_cards: Option<[Card; 2]>,
    pub status: SeatStatus,
    /// Chips committed in the current betting round.
    pub current_bet: Chips,
    /// Chips committed across the whole hand, blinds included.
    pub total_bet_this_hand: Chips,
    pub time_bank_secs: u32,
    pub sit_out: bool,
    pub disconnected: bool,
    /// Player asked to leave mid-hand; the seat is cleared at hand end.
    pub leaving: bool,
    pub acted_this_street: bool,
    /// Set when an incomplete all-in raise closed this seat's raising rights
    /// for the rest of the street; cleared by any full raise.
    pub raise_blocked: bool,
    pub last_action: Option<ActionTag>,
    pub hands_played: u64,
    pub hands_won: u64,
    pub elo: f64,
}

impl Seat {
    #[must_use]
    pub fn new(token: PlayerToken, name: String, stack: Chips, time_bank_secs: u32, elo: f64) -> Self {
        Self {
            token,
            name,
            stack,
            hole_cards: None,
            status: SeatStatus::Waiting,
            current_bet: Chips::ZERO,
            total_bet_this_hand: Chips::ZERO,
            time_bank_secs,
            sit_out: false,
            disconnected: false,
            leaving: false,
            acted_this_street: false,
            raise_blocked: false,
            last_action: None,
            hands_played: 0,
            hands_won: 0,
            elo,
        }
    }

    /// Clear per-hand state and recompute status for a new hand.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards = None;
        self.current_bet = Chips::ZERO;
        self.total_bet_this_hand = Chips::ZERO;
        self.acted_this_street = false;
        self.raise_blocked = false;
        self.last_action = None;
        self.status = if !self.stack.is_zero() && !self.sit_out && !self.leaving {
            SeatStatus::Active
        } else {
            SeatStatus::SittingOut
        };
    }

    /// Clear per-street state when a new street is dealt.
    pub fn reset_for_street(&mut self) {
        self.current_bet = Chips::ZERO;
        self.acted_this_street = false;
        self.raise_blocked = false;
        self.last_action = None;
    }

    /// Move up to `amount` from the stack into the current bet; a seat that
    /// empties its stack goes all-in. Returns the chips actually moved.
    pub fn commit(&mut self, amount: Chips) -> Result<Chips, MoneyError> {
        let moved = amount.min(self.stack);
        self.stack = self.stack.checked_sub(moved)?;
        self.current_bet = self.current_bet.checked_add(moved)?;
        self.total_bet_this_hand = self.total_bet_this_hand.checked_add(moved)?;
        if self.stack.is_zero() && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        Ok(moved)
    }

    #[must_use]
    pub fn to_call(&self, bet_level: Chips) -> Chips {
        bet_level.saturating_sub(self.current_bet)
    }

    /// Whether this seat can still take a turn this street.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Active
    }

    /// Dealt into the current hand and still able to win part of the pot.
    #[must_use]
    pub fn in_contention(&self) -> bool {
        self.status.in_contention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(stack: u64) -> Seat {
        let mut seat = Seat::new(PlayerToken::new(), "bot".to_string(), Chips(stack), 30, 1000.0);
        seat.reset_for_hand();
        seat
    }

    #[test]
    fn commit_caps_at_stack_and_goes_all_in() {
        let mut seat = seat(10);
        let moved = seat.commit(Chips(25)).expect("commit");
        assert_eq!(moved, Chips(10));
        assert_eq!(seat.stack, Chips::ZERO);
        assert_eq!(seat.status, SeatStatus::AllIn);
        assert_eq!(seat.total_bet_this_hand, Chips(10));
    }

    #[test]
    fn street_reset_keeps_hand_totals() {
        let mut seat = seat(100);
        seat.commit(Chips(30)).expect("commit");
        seat.reset_for_street();
        assert_eq!(seat.current_bet, Chips::ZERO);
        assert_eq!(seat.total_bet_this_hand, Chips(30));
        assert_eq!(seat.to_call(Chips(8)), Chips(8));
    }

    #[test]
    fn sit_out_seats_do_not_activate() {
        let mut seat = seat(100);
        seat.sit_out = true;
        seat.reset_for_hand();
        assert_eq!(seat.status, SeatStatus::SittingOut);
    }
}
