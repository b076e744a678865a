use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use holdem_domain::{
    Action, ActionTag, Card, Chips, Deck, HandId, IllegalActionReason, LegalAction, Phase,
    PlayerToken, SeatStatus, TableError, TableId,
};
use holdem_eval::{evaluate_best, HandRank};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::config::TableConfig;
use crate::elo;
use crate::events::{PushEvent, PushEventKind, ShowdownReveal};
use crate::history::{
    ContenderRecord, HandHistory, HandRecord, LogEntry, PotResult, SeatPayout,
};
use crate::pot::{build_pots, pots_total, Pot};
use crate::seat::Seat;
use crate::view::{PotView, PrivateView, SeatView, TableView};

/// Identity of one turn prompt. A timer carrying a fingerprint that no longer
/// matches the table's current prompt is stale and must be discarded;
/// `prompt_seq` covers the case where the same seat is re-prompted within one
/// street after a raise reopened the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFingerprint {
    pub hand_no: u64,
    pub phase: Phase,
    pub seat: usize,
    pub prompt_seq: u64,
}

/// Result of applying one table mutation: the push events to fan out, in
/// commit order, plus how the hand ended (if it did).
#[derive(Debug, Clone, Default)]
pub struct ActionOutcome {
    pub events: Vec<PushEvent>,
    pub hand_ended: bool,
    pub aborted: bool,
}

#[derive(Debug)]
pub enum TimerOutcome {
    /// Fingerprint no longer matches; ignore the expiry.
    Stale,
    /// The actor's time bank took over; a per-second countdown should start.
    TimeBankEngaged {
        seat: usize,
        remaining: u32,
        events: Vec<PushEvent>,
    },
    /// No time bank left: the turn resolved as a synthesized fold.
    Folded(ActionOutcome),
}

#[derive(Debug)]
pub enum TickOutcome {
    Stale,
    Counting {
        seat: usize,
        remaining: u32,
        events: Vec<PushEvent>,
    },
    Exhausted(ActionOutcome),
}

/// Post-hand teardown results the scheduler needs: seats vacated by leavers
/// and players forced into sit-out by busting.
#[derive(Debug, Default)]
pub struct FinishSummary {
    pub events: Vec<PushEvent>,
    pub removed: Vec<(usize, PlayerToken)>,
    pub sat_out: Vec<PlayerToken>,
}

/// One table: seats, the live hand's state machine, the pot ledger and the
/// hand-history ring. Purely synchronous; the service layer serializes calls
/// and owns all clocks.
pub struct Table {
    id: TableId,
    config: TableConfig,
    seats: Vec<Option<Seat>>,
    deck: Deck,
    rng: StdRng,
    community: Vec<Card>,
    pot: Chips,
    pots: Vec<Pot>,
    phase: Phase,
    dealer_seat: usize,
    current_bet_level: Chips,
    min_raise: Chips,
    current_actor: Option<usize>,
    prompt_seq: u64,
    time_bank_engaged: bool,
    hand_no: u64,
    hand_id: HandId,
    hand_started_at: DateTime<Utc>,
    hand_log: Vec<LogEntry>,
    history: HandHistory,
}

impl Table {
    #[must_use]
    pub fn new(id: TableId, config: TableConfig) -> Self {
        Self::with_rng(id, config, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(id: TableId, config: TableConfig, rng: StdRng) -> Self {
        Self {
            id,
            seats: (0..config.max_players).map(|_| None).collect(),
            deck: Deck::new(),
            rng,
            community: Vec::new(),
            pot: Chips::ZERO,
            pots: Vec::new(),
            phase: Phase::Waiting,
            dealer_seat: 0,
            current_bet_level: Chips::ZERO,
            min_raise: config.big_blind,
            current_actor: None,
            prompt_seq: 0,
            time_bank_engaged: false,
            hand_no: 0,
            hand_id: HandId::new(),
            hand_started_at: Utc::now(),
            hand_log: Vec::new(),
            history: HandHistory::new(config.max_hand_history),
            config,
        }
    }

    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pot
    }

    #[must_use]
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    #[must_use]
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    #[must_use]
    pub fn dealer_seat(&self) -> usize {
        self.dealer_seat
    }

    #[must_use]
    pub fn current_actor(&self) -> Option<usize> {
        self.current_actor
    }

    #[must_use]
    pub fn current_bet_level(&self) -> Chips {
        self.current_bet_level
    }

    #[must_use]
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    #[must_use]
    pub fn seat(&self, idx: usize) -> Option<&Seat> {
        self.seats.get(idx).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    #[must_use]
    pub fn has_free_seat(&self) -> bool {
        self.seats.iter().any(Option::is_none)
    }

    /// Stacks plus live-hand contributions; constant from hand start to hand
    /// end while the same players stay seated.
    #[must_use]
    pub fn chips_in_play(&self) -> Chips {
        Chips(
            self.seats
                .iter()
                .flatten()
                .map(|seat| seat.stack.0 + seat.total_bet_this_hand.0)
                .sum(),
        )
    }

    // ---- seating and session management ----

    pub fn seat_player(
        &mut self,
        name: &str,
        buy_in: Chips,
        token: PlayerToken,
    ) -> Result<(usize, Vec<PushEvent>), TableError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TableError::InvalidName("name must not be empty".to_string()));
        }
        if buy_in < self.config.min_buy_in || buy_in > self.config.max_buy_in {
            return Err(TableError::InvalidBuyIn {
                offered: buy_in,
                min: self.config.min_buy_in,
                max: self.config.max_buy_in,
            });
        }
        if self
            .seats
            .iter()
            .flatten()
            .any(|seat| seat.name == trimmed)
        {
            return Err(TableError::DuplicateName(trimmed.to_string()));
        }
        let idx = self
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or(TableError::TableFull)?;

        self.seats[idx] = Some(Seat::new(
            token,
            trimmed.to_string(),
            buy_in,
            self.config.time_bank_seconds,
            self.config.default_elo,
        ));
        info!(table_id = %self.id, seat = idx, name = trimmed, stack = %buy_in, "player seated");
        let events = vec![self.event(PushEventKind::PlayerJoined {
            seat: idx,
            name: trimmed.to_string(),
            stack: buy_in,
        })];
        Ok((idx, events))
    }

    /// Remove a player. If they are in a live hand their cards are folded
    /// (immediately, via the normal path when they hold the action) and the
    /// seat itself is vacated at hand end; chips already committed stay in
    /// the pot.
    pub fn remove_player(
        &mut self,
        token: &PlayerToken,
    ) -> Result<(Chips, ActionOutcome), TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        // A seat dealt into the live hand (folded included) keeps funding the
        // pot layers; it is only vacated at hand teardown.
        let dealt_in = self.phase.is_betting()
            && self.seats[idx].as_ref().is_some_and(|seat| {
                matches!(
                    seat.status,
                    SeatStatus::Active | SeatStatus::AllIn | SeatStatus::Folded
                )
            });
        let in_contention = self.seats[idx]
            .as_ref()
            .is_some_and(|seat| seat.in_contention());

        let (name, final_stack) = {
            let seat = self.seats[idx]
                .as_mut()
                .ok_or(TableError::Internal("seat vanished during removal"))?;
            let stack = seat.stack;
            seat.stack = Chips::ZERO;
            (seat.name.clone(), stack)
        };
        info!(table_id = %self.id, seat = idx, name = %name, stack = %final_stack, "player leaving");

        let mut outcome = ActionOutcome::default();
        if dealt_in {
            if let Some(seat) = self.seats[idx].as_mut() {
                seat.leaving = true;
                seat.sit_out = true;
            }
            if in_contention {
                outcome = self.fold_seat_out_of_hand(idx)?;
            }
            outcome.events.insert(
                0,
                self.event(PushEventKind::PlayerLeft {
                    seat: idx,
                    name,
                    final_stack,
                }),
            );
        } else {
            self.seats[idx] = None;
            outcome.events.push(self.event(PushEventKind::PlayerLeft {
                seat: idx,
                name,
                final_stack,
            }));
        }
        Ok((final_stack, outcome))
    }

    /// Mark a seat as sitting out. On their own turn this folds them first;
    /// otherwise their hand auto-folds when the action reaches them.
    pub fn set_sit_out(&mut self, token: &PlayerToken) -> Result<ActionOutcome, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        {
            let seat = self.seats[idx]
                .as_mut()
                .ok_or(TableError::Internal("seat vanished during sit-out"))?;
            if seat.sit_out {
                return Err(TableError::IllegalStateTransition("already sitting out"));
            }
            seat.sit_out = true;
        }
        if self.phase.is_betting() && self.current_actor == Some(idx) {
            return self.execute_or_abort(idx, Action::Fold, ActionTag::Fold);
        }
        Ok(ActionOutcome::default())
    }

    pub fn return_from_sit_out(&mut self, token: &PlayerToken) -> Result<(), TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        let seat = self.seats[idx]
            .as_mut()
            .ok_or(TableError::Internal("seat vanished during return"))?;
        if !seat.sit_out {
            return Err(TableError::IllegalStateTransition("not sitting out"));
        }
        seat.sit_out = false;
        seat.disconnected = false;
        if seat.status == SeatStatus::SittingOut {
            seat.status = SeatStatus::Waiting;
        }
        Ok(())
    }

    /// Transport lost the player: treat as sit-out (folding on their turn)
    /// and remember the disconnect for the views.
    pub fn mark_disconnected(&mut self, token: &PlayerToken) -> Result<ActionOutcome, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        {
            let seat = self.seats[idx]
                .as_mut()
                .ok_or(TableError::Internal("seat vanished during disconnect"))?;
            seat.disconnected = true;
            seat.sit_out = true;
        }
        if self.phase.is_betting() && self.current_actor == Some(idx) {
            return self.execute_or_abort(idx, Action::Fold, ActionTag::Fold);
        }
        Ok(ActionOutcome::default())
    }

    /// Top up a stack between hands, never above the maximum buy-in.
    pub fn rebuy(&mut self, token: &PlayerToken, amount: Chips) -> Result<Chips, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        let max = self.config.max_buy_in;
        let seat = self.seats[idx]
            .as_mut()
            .ok_or(TableError::Internal("seat vanished during rebuy"))?;
        if self.phase.is_betting()
            && !matches!(seat.status, SeatStatus::Waiting | SeatStatus::SittingOut)
        {
            return Err(TableError::IllegalStateTransition("cannot rebuy during a hand"));
        }
        let new_stack = seat.stack.checked_add(amount)?;
        if new_stack > max {
            return Err(TableError::ExceedsMaxBuyIn { max });
        }
        seat.stack = new_stack;
        info!(table_id = %self.id, seat = idx, stack = %new_stack, "rebuy applied");
        Ok(new_stack)
    }

    // ---- hand lifecycle ----

    #[must_use]
    pub fn can_start_hand(&self) -> bool {
        self.phase == Phase::Waiting && self.eligible_count() >= self.config.min_players
    }

    /// Begin the next hand if the table is ready. Returns `None` when the
    /// preconditions do not hold (not an error: start attempts are scheduled
    /// optimistically).
    pub fn try_start_hand(&mut self) -> Option<Vec<PushEvent>> {
        self.try_start_hand_inner(None)
    }

    /// Like `try_start_hand` but dealing from a caller-provided deck instead
    /// of shuffling. Test and replay hook.
    pub fn try_start_hand_with_deck(&mut self, deck: Deck) -> Option<Vec<PushEvent>> {
        self.try_start_hand_inner(Some(deck))
    }

    fn try_start_hand_inner(&mut self, stacked_deck: Option<Deck>) -> Option<Vec<PushEvent>> {
        if !self.can_start_hand() {
            return None;
        }
        match self.start_hand(stacked_deck) {
            Ok(events) => Some(events),
            Err(err) => {
                let outcome = self.abort_hand(&err.to_string());
                Some(outcome.events)
            }
        }
    }

    fn start_hand(&mut self, stacked_deck: Option<Deck>) -> Result<Vec<PushEvent>, TableError> {
        self.hand_no += 1;
        self.hand_id = HandId::new();
        self.hand_started_at = Utc::now();
        self.hand_log.clear();
        self.community.clear();
        self.pot = Chips::ZERO;
        self.pots.clear();
        self.current_bet_level = Chips::ZERO;
        self.min_raise = self.config.big_blind;
        self.time_bank_engaged = false;

        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_hand();
        }
        let active: Vec<usize> = self.active_seats();
        if active.len() < self.config.min_players {
            return Err(TableError::Internal("hand started without enough players"));
        }

        self.dealer_seat = if self.hand_no == 1 {
            active[0]
        } else {
            self.next_seat_where(self.dealer_seat, Seat::can_act)
                .ok_or(TableError::Internal("no eligible dealer seat"))?
        };

        let mut events = Vec::new();
        self.log(None, format!("hand #{} begins", self.hand_no));
        events.push(self.event(PushEventKind::Mitsuki {
            line: format!("Shuffling up. Hand #{} is on the felt.", self.hand_no),
        }));

        self.post_blinds(&mut events)?;

        match stacked_deck {
            Some(deck) => self.deck = deck,
            None => {
                self.deck.reset();
                self.deck.shuffle(&mut self.rng);
            }
        }
        self.phase = Phase::Preflop;
        let dealt_to = self.deal_hole_cards()?;
        events.push(self.event(PushEventKind::CardsDealt { seats: dealt_to }));

        if self.any_all_in() {
            self.pots = build_pots(&self.seats);
        }

        // First to act scans clockwise from the big blind: that reaches the
        // under-the-gun seat three-handed and up, and the button heads-up.
        let big_blind_seat = self.big_blind_seat()?;
        self.resolve_turn_flow(big_blind_seat, &mut events)?;
        Ok(events)
    }

    fn post_blinds(&mut self, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        let active = self.active_seats();
        let (sb_seat, bb_seat) = if active.len() == 2 {
            let other = self
                .next_seat_where(self.dealer_seat, Seat::can_act)
                .ok_or(TableError::Internal("missing big blind seat"))?;
            (self.dealer_seat, other)
        } else {
            let sb = self
                .next_seat_where(self.dealer_seat, Seat::can_act)
                .ok_or(TableError::Internal("missing small blind seat"))?;
            let bb = self
                .next_seat_where(sb, Seat::can_act)
                .ok_or(TableError::Internal("missing big blind seat"))?;
            (sb, bb)
        };

        let sb_paid = self.post_one_blind(sb_seat, self.config.small_blind, ActionTag::SmallBlind)?;
        let bb_paid = self.post_one_blind(bb_seat, self.config.big_blind, ActionTag::BigBlind)?;
        self.current_bet_level = self.config.big_blind;
        self.min_raise = self.config.big_blind;

        events.push(self.event(PushEventKind::BlindsPosted {
            small_blind_seat: sb_seat,
            small_blind: sb_paid,
            big_blind_seat: bb_seat,
            big_blind: bb_paid,
        }));
        Ok(())
    }

    fn post_one_blind(
        &mut self,
        idx: usize,
        amount: Chips,
        tag: ActionTag,
    ) -> Result<Chips, TableError> {
        let seat = self.seats[idx]
            .as_mut()
            .ok_or(TableError::Internal("blind seat is empty"))?;
        let paid = seat.commit(amount)?;
        seat.last_action = Some(tag);
        self.pot = self.pot.checked_add(paid)?;
        self.log(Some(idx), format!("posts {tag} {paid}"));
        Ok(paid)
    }

    fn deal_hole_cards(&mut self) -> Result<Vec<usize>, TableError> {
        let order = self.seats_in_deal_order();
        for _round in 0..2 {
            for &idx in &order {
                let card = self.deck.deal_one()?;
                let seat = self.seats[idx]
                    .as_mut()
                    .ok_or(TableError::Internal("dealt to an empty seat"))?;
                match seat.hole_cards.as_mut() {
                    None => seat.hole_cards = Some([card, card]),
                    Some(pair) => pair[1] = card,
                }
            }
        }
        for &idx in &order {
            if let Some(seat) = self.seats[idx].as_mut() {
                seat.hands_played += 1;
            }
        }
        self.log(None, format!("hole cards dealt to {} players", order.len()));
        Ok(order)
    }

    /// Seats that receive cards, clockwise starting left of the button.
    fn seats_in_deal_order(&self) -> Vec<usize> {
        let n = self.seats.len();
        let mut order = Vec::new();
        for step in 1..=n {
            let idx = (self.dealer_seat + step) % n;
            if self.seats[idx]
                .as_ref()
                .is_some_and(|seat| seat.status == SeatStatus::Active || seat.status == SeatStatus::AllIn)
            {
                order.push(idx);
            }
        }
        order
    }

    /// Tear the table down after the showdown pause: vacate leavers, force
    /// busted stacks into sit-out, and return to `waiting`.
    pub fn finish_hand(&mut self) -> FinishSummary {
        let mut summary = FinishSummary::default();
        if self.phase != Phase::Showdown {
            return summary;
        }
        for idx in 0..self.seats.len() {
            let Some(seat) = self.seats[idx].as_mut() else {
                continue;
            };
            if seat.leaving {
                summary.removed.push((idx, seat.token));
                self.seats[idx] = None;
                continue;
            }
            if seat.stack.is_zero() && !seat.sit_out {
                seat.sit_out = true;
                summary.sat_out.push(seat.token);
            }
            seat.hole_cards = None;
            seat.current_bet = Chips::ZERO;
            seat.total_bet_this_hand = Chips::ZERO;
            seat.acted_this_street = false;
            seat.raise_blocked = false;
            seat.last_action = None;
            seat.status = if seat.sit_out {
                SeatStatus::SittingOut
            } else {
                SeatStatus::Waiting
            };
        }
        self.community.clear();
        self.pot = Chips::ZERO;
        self.pots.clear();
        self.current_bet_level = Chips::ZERO;
        self.min_raise = self.config.big_blind;
        self.current_actor = None;
        self.phase = Phase::Waiting;
        let view = self.public_view();
        summary
            .events
            .push(self.event(PushEventKind::TableState { view }));
        summary
    }

    /// Refund all contributions and drop back to `waiting`; used when an
    /// internal invariant broke mid-hand. Chips stay conserved.
    pub fn abort_hand(&mut self, reason: &str) -> ActionOutcome {
        error!(table_id = %self.id, hand_no = self.hand_no, reason, "hand aborted");
        for slot in &mut self.seats {
            if slot.as_ref().is_some_and(|seat| seat.leaving) {
                *slot = None;
            }
        }
        for seat in self.seats.iter_mut().flatten() {
            // Refund is infallible: the chips came out of this stack.
            let refunded = seat.stack.0 + seat.total_bet_this_hand.0;
            seat.stack = Chips(refunded);
            seat.hole_cards = None;
            seat.current_bet = Chips::ZERO;
            seat.total_bet_this_hand = Chips::ZERO;
            seat.acted_this_street = false;
            seat.raise_blocked = false;
            seat.last_action = None;
            seat.status = if seat.sit_out {
                SeatStatus::SittingOut
            } else {
                SeatStatus::Waiting
            };
        }
        self.community.clear();
        self.pot = Chips::ZERO;
        self.pots.clear();
        self.current_bet_level = Chips::ZERO;
        self.min_raise = self.config.big_blind;
        self.current_actor = None;
        self.phase = Phase::Waiting;
        self.log(None, format!("hand aborted: {reason}"));
        ActionOutcome {
            events: vec![self.event(PushEventKind::HandAborted {
                reason: reason.to_string(),
            })],
            hand_ended: true,
            aborted: true,
        }
    }

    // ---- actions ----

    /// Primary entry point for client betting decisions.
    pub fn handle_action(
        &mut self,
        token: &PlayerToken,
        action: Action,
    ) -> Result<ActionOutcome, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        if !self.phase.is_betting() {
            return Err(TableError::NoActiveHand);
        }
        if self.current_actor != Some(idx) {
            return Err(TableError::NotYourTurn);
        }
        self.execute_or_abort(idx, action, ActionTag::Fold)
    }

    fn execute_or_abort(
        &mut self,
        idx: usize,
        action: Action,
        fold_tag: ActionTag,
    ) -> Result<ActionOutcome, TableError> {
        match self.execute(idx, action, fold_tag) {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.aborts_hand() => Ok(self.abort_hand(&err.to_string())),
            Err(err) => Err(err),
        }
    }

    fn execute(
        &mut self,
        idx: usize,
        action: Action,
        fold_tag: ActionTag,
    ) -> Result<ActionOutcome, TableError> {
        let mut events = Vec::new();
        self.apply_action(idx, action, fold_tag, &mut events)?;
        let hand_ended = self.resolve_turn_flow(idx, &mut events)?;
        Ok(ActionOutcome {
            events,
            hand_ended,
            aborted: false,
        })
    }

    /// Validate and apply one action. Validation happens before any state is
    /// touched, so a rejected action leaves the table unchanged.
    fn apply_action(
        &mut self,
        idx: usize,
        action: Action,
        fold_tag: ActionTag,
        events: &mut Vec<PushEvent>,
    ) -> Result<(), TableError> {
        let level = self.current_bet_level;
        let min_raise = self.min_raise;
        let (to_call, stack, prior_bet, raise_blocked) = {
            let seat = self.seats[idx]
                .as_ref()
                .ok_or(TableError::Internal("acting seat is empty"))?;
            (
                seat.to_call(level),
                seat.stack,
                seat.current_bet,
                seat.raise_blocked,
            )
        };

        match action {
            Action::Fold => {
                self.apply_fold(idx, fold_tag, events)?;
            }
            Action::Check => {
                if !to_call.is_zero() {
                    return Err(TableError::IllegalAction(
                        IllegalActionReason::CannotCheckWithBet,
                    ));
                }
                let seat = self.seats[idx]
                    .as_mut()
                    .ok_or(TableError::Internal("acting seat is empty"))?;
                seat.acted_this_street = true;
                seat.last_action = Some(ActionTag::Check);
                self.log(Some(idx), "checks".to_string());
                events.push(self.event(PushEventKind::PlayerAction {
                    seat: idx,
                    tag: ActionTag::Check,
                    amount: None,
                    pot: self.pot,
                }));
            }
            Action::Call => {
                if to_call.is_zero() {
                    return Err(TableError::IllegalAction(IllegalActionReason::NothingToCall));
                }
                let (paid, tag) = {
                    let seat = self.seats[idx]
                        .as_mut()
                        .ok_or(TableError::Internal("acting seat is empty"))?;
                    let paid = seat.commit(to_call)?;
                    seat.acted_this_street = true;
                    let tag = if seat.status == SeatStatus::AllIn {
                        ActionTag::AllIn
                    } else {
                        ActionTag::Call
                    };
                    seat.last_action = Some(tag);
                    (paid, tag)
                };
                self.pot = self.pot.checked_add(paid)?;
                self.log(Some(idx), format!("calls {paid}"));
                events.push(self.event(PushEventKind::PlayerAction {
                    seat: idx,
                    tag,
                    amount: Some(paid),
                    pot: self.pot,
                }));
            }
            Action::RaiseTo { to } => {
                if raise_blocked {
                    // An incomplete all-in raise closed this seat's raising
                    // rights for the street.
                    return Err(TableError::IllegalAction(IllegalActionReason::RaiseTooSmall));
                }
                if to <= level {
                    return Err(TableError::IllegalAction(IllegalActionReason::RaiseTooSmall));
                }
                let needed = to.checked_sub(prior_bet)?;
                if needed > stack {
                    return Err(TableError::IllegalAction(
                        IllegalActionReason::InsufficientChips,
                    ));
                }
                let increment = to.checked_sub(level)?;
                let is_all_in = needed == stack;
                let is_full_raise = increment >= min_raise;
                if !is_all_in && !is_full_raise {
                    return Err(TableError::IllegalAction(IllegalActionReason::RaiseTooSmall));
                }

                let tag = {
                    let seat = self.seats[idx]
                        .as_mut()
                        .ok_or(TableError::Internal("acting seat is empty"))?;
                    seat.commit(needed)?;
                    seat.acted_this_street = true;
                    let tag = if is_all_in {
                        ActionTag::AllIn
                    } else {
                        ActionTag::Raise
                    };
                    seat.last_action = Some(tag);
                    tag
                };
                self.pot = self.pot.checked_add(needed)?;
                self.current_bet_level = to;

                if is_full_raise {
                    // A full raise reopens the action for everyone.
                    self.min_raise = increment;
                    for (other, seat) in self.occupied_mut() {
                        if other != idx && seat.can_act() {
                            seat.acted_this_street = false;
                            seat.raise_blocked = false;
                        }
                    }
                } else {
                    // Incomplete all-in: the bet level moves, but seats whose
                    // action already closed may only call or fold.
                    for (other, seat) in self.occupied_mut() {
                        if other != idx && seat.can_act() && seat.acted_this_street {
                            seat.raise_blocked = true;
                        }
                    }
                }
                self.log(Some(idx), format!("raises to {to}"));
                events.push(self.event(PushEventKind::PlayerAction {
                    seat: idx,
                    tag,
                    amount: Some(to),
                    pot: self.pot,
                }));
            }
        }

        if self.any_all_in() {
            self.pots = build_pots(&self.seats);
        }
        Ok(())
    }

    fn apply_fold(
        &mut self,
        idx: usize,
        tag: ActionTag,
        events: &mut Vec<PushEvent>,
    ) -> Result<(), TableError> {
        let seat = self.seats[idx]
            .as_mut()
            .ok_or(TableError::Internal("folding seat is empty"))?;
        seat.status = SeatStatus::Folded;
        seat.acted_this_street = true;
        seat.last_action = Some(tag);
        self.log(Some(idx), format!("{tag}"));
        events.push(self.event(PushEventKind::PlayerAction {
            seat: idx,
            tag,
            amount: None,
            pot: self.pot,
        }));
        Ok(())
    }

    /// A seat left or was evicted outside its turn during a live hand: fold
    /// it in place and re-resolve the table, since the fold may leave the
    /// pot uncontested.
    fn fold_seat_out_of_hand(&mut self, idx: usize) -> Result<ActionOutcome, TableError> {
        if self.current_actor == Some(idx) {
            return self.execute_or_abort(idx, Action::Fold, ActionTag::Fold);
        }
        let mut events = Vec::new();
        self.apply_fold(idx, ActionTag::Fold, &mut events)?;
        if self.any_all_in() {
            self.pots = build_pots(&self.seats);
        }
        let mut hand_ended = false;
        if self.contender_count() <= 1 {
            match self.finish_uncontested(&mut events) {
                Ok(()) => hand_ended = true,
                Err(err) if err.aborts_hand() => return Ok(self.abort_hand(&err.to_string())),
                Err(err) => return Err(err),
            }
        }
        Ok(ActionOutcome {
            events,
            hand_ended,
            aborted: false,
        })
    }

    // ---- turn flow ----

    /// Drive the table forward from `cursor` until it either waits on a
    /// prompted player or the hand ends. Handles uncontested wins, street
    /// advancement, all-in run-outs and auto-folds of absent players.
    fn resolve_turn_flow(
        &mut self,
        cursor_start: usize,
        events: &mut Vec<PushEvent>,
    ) -> Result<bool, TableError> {
        let mut cursor = cursor_start;
        loop {
            if self.contender_count() <= 1 {
                self.finish_uncontested(events)?;
                return Ok(true);
            }

            if self.betting_round_complete() {
                if self.phase == Phase::River || self.actionable_count() <= 1 {
                    self.run_out_board(events)?;
                    self.showdown(events)?;
                    return Ok(true);
                }
                self.deal_next_street(events)?;
                cursor = self.dealer_seat;
                continue;
            }

            let Some(next) = self.next_seat_where(cursor, Seat::can_act) else {
                // Nobody left who can act: run the board out.
                self.run_out_board(events)?;
                self.showdown(events)?;
                return Ok(true);
            };

            let absent = self.seats[next]
                .as_ref()
                .is_some_and(|seat| seat.sit_out || seat.disconnected);
            if absent {
                self.apply_fold(next, ActionTag::Fold, events)?;
                if self.any_all_in() {
                    self.pots = build_pots(&self.seats);
                }
                cursor = next;
                continue;
            }

            self.prompt(next, events)?;
            return Ok(false);
        }
    }

    fn prompt(&mut self, idx: usize, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        self.current_actor = Some(idx);
        self.prompt_seq += 1;
        self.time_bank_engaged = false;
        let seat = self.seats[idx]
            .as_ref()
            .ok_or(TableError::Internal("prompted seat is empty"))?;
        events.push(self.event(PushEventKind::ActionOn {
            seat: idx,
            pot: self.pot,
            current_bet_level: self.current_bet_level,
            current_bet: seat.current_bet,
            to_call: seat.to_call(self.current_bet_level),
            min_raise: self.min_raise,
            time_bank: seat.time_bank_secs,
        }));
        Ok(())
    }

    fn betting_round_complete(&self) -> bool {
        self.seats
            .iter()
            .flatten()
            .filter(|seat| seat.can_act())
            .all(|seat| seat.acted_this_street && seat.current_bet == self.current_bet_level)
    }

    fn deal_next_street(&mut self, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        let next = self
            .phase
            .next_street()
            .ok_or(TableError::Internal("no street after the river"))?;
        self.deck.burn()?;
        let count = if next == Phase::Flop { 3 } else { 1 };
        let cards = self.deck.deal(count)?;
        self.community.extend(cards.iter().copied());

        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_street();
        }
        self.current_bet_level = Chips::ZERO;
        self.min_raise = self.config.big_blind;
        self.current_actor = None;
        self.phase = next;

        let shown = cards
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.log(None, format!("{next:?} dealt: {shown}").to_lowercase());
        events.push(self.event(PushEventKind::CommunityCards {
            phase: next,
            cards,
        }));
        if self.any_all_in() {
            self.pots = build_pots(&self.seats);
        }
        Ok(())
    }

    fn run_out_board(&mut self, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        while self.phase.next_street().is_some() {
            self.deal_next_street(events)?;
        }
        Ok(())
    }

    // ---- showdown and distribution ----

    fn showdown(&mut self, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        self.phase = Phase::Showdown;
        self.current_actor = None;
        self.pots = build_pots(&self.seats);

        let contributed = Chips(
            self.seats
                .iter()
                .flatten()
                .map(|seat| seat.total_bet_this_hand.0)
                .sum(),
        );
        let total = pots_total(&self.pots);
        if total != contributed {
            return Err(TableError::PotMismatch {
                pots: total,
                contributed,
            });
        }

        let ranks = self.contender_ranks()?;
        let mut payouts: BTreeMap<usize, Chips> = BTreeMap::new();
        let mut pot_results = Vec::with_capacity(self.pots.len());
        let mut hand_winners: HashSet<usize> = HashSet::new();

        for pot in self.pots.clone() {
            let mut winners: Vec<usize> = Vec::new();
            let mut best: Option<HandRank> = None;
            for &seat in &pot.eligible {
                let Some(rank) = ranks.get(&seat) else {
                    continue;
                };
                match best {
                    None => {
                        best = Some(*rank);
                        winners.push(seat);
                    }
                    Some(current) if *rank > current => {
                        best = Some(*rank);
                        winners.clear();
                        winners.push(seat);
                    }
                    Some(current) if *rank == current => winners.push(seat),
                    Some(_) => {}
                }
            }
            if winners.is_empty() {
                return Err(TableError::Internal("pot with no eligible contender"));
            }
            winners.sort_unstable();

            let share = Chips(pot.amount.0 / winners.len() as u64);
            let remainder = Chips(pot.amount.0 % winners.len() as u64);
            let odd_chip_seat = self.closest_to_button(&winners)?;
            for &winner in &winners {
                let mut award = share;
                if winner == odd_chip_seat {
                    award = award.checked_add(remainder)?;
                }
                let entry = payouts.entry(winner).or_insert(Chips::ZERO);
                *entry = entry.checked_add(award)?;
            }
            hand_winners.extend(winners.iter().copied());
            self.log(
                None,
                format!("{} ({}) to seats {:?}", pot.label, pot.amount, winners),
            );
            pot_results.push(PotResult {
                label: pot.label.clone(),
                amount: pot.amount,
                winners,
            });
        }

        for (&seat, &amount) in &payouts {
            let record = self.seats[seat]
                .as_mut()
                .ok_or(TableError::Internal("winner seat is empty"))?;
            record.stack = record.stack.checked_add(amount)?;
        }
        self.settle_bet_ledgers();
        for &winner in &hand_winners {
            if let Some(seat) = self.seats[winner].as_mut() {
                seat.hands_won += 1;
            }
        }
        self.apply_elo(&ranks, &hand_winners);

        let reveals = self.reveals(&ranks)?;
        let payout_list: Vec<SeatPayout> = payouts
            .iter()
            .map(|(&seat, &amount)| SeatPayout { seat, amount })
            .collect();

        events.push(self.event(PushEventKind::Showdown {
            community: self.community.clone(),
            reveals: reveals.clone(),
            pots: pot_results.clone(),
        }));
        events.push(self.event(PushEventKind::HandComplete {
            payouts: payout_list.clone(),
        }));
        events.push(self.event(PushEventKind::Mitsuki {
            line: self.narrate_winners(&payout_list),
        }));

        let contenders = reveals
            .iter()
            .map(|reveal| ContenderRecord {
                seat: reveal.seat,
                name: reveal.name.clone(),
                hole_cards: reveal.hole_cards,
                category: Some(reveal.category),
            })
            .collect();
        self.record_hand(contenders, pot_results, payout_list);
        Ok(())
    }

    /// Everyone else folded: the last seat standing takes the whole pot, no
    /// cards shown, no evaluation.
    fn finish_uncontested(&mut self, events: &mut Vec<PushEvent>) -> Result<(), TableError> {
        let winner = self
            .seats
            .iter()
            .enumerate()
            .find_map(|(idx, seat)| {
                seat.as_ref()
                    .filter(|s| s.in_contention())
                    .map(|_| idx)
            })
            .ok_or(TableError::Internal("uncontested hand with no contender"))?;

        self.phase = Phase::Showdown;
        self.current_actor = None;

        let amount = self.pot;
        let name = {
            let seat = self.seats[winner]
                .as_mut()
                .ok_or(TableError::Internal("winner seat is empty"))?;
            seat.stack = seat.stack.checked_add(amount)?;
            seat.hands_won += 1;
            seat.name.clone()
        };
        self.settle_bet_ledgers();
        self.log(Some(winner), format!("wins {amount} uncontested"));

        let payout = SeatPayout {
            seat: winner,
            amount,
        };
        let pot_result = PotResult {
            label: "Main Pot".to_string(),
            amount,
            winners: vec![winner],
        };
        events.push(self.event(PushEventKind::HandComplete {
            payouts: vec![payout],
        }));
        events.push(self.event(PushEventKind::Mitsuki {
            line: format!("{name} takes down {amount} without a fight."),
        }));
        self.record_hand(Vec::new(), vec![pot_result], vec![payout]);
        Ok(())
    }

    /// The pot has been paid out: committed chips are no longer owed to
    /// anyone. Keeps stacks-plus-contributions constant through the showdown
    /// pause.
    fn settle_bet_ledgers(&mut self) {
        for seat in self.seats.iter_mut().flatten() {
            seat.current_bet = Chips::ZERO;
            seat.total_bet_this_hand = Chips::ZERO;
        }
    }

    fn contender_ranks(&self) -> Result<HashMap<usize, HandRank>, TableError> {
        let mut ranks = HashMap::new();
        for (idx, seat) in self.occupied() {
            if !seat.in_contention() {
                continue;
            }
            let hole = seat
                .hole_cards
                .ok_or(TableError::Internal("contender without hole cards"))?;
            let mut cards: Vec<Card> = self.community.clone();
            cards.extend_from_slice(&hole);
            let rank = evaluate_best(&cards)
                .map_err(|_| TableError::Internal("showdown before the board completed"))?;
            ranks.insert(idx, rank);
        }
        Ok(ranks)
    }

    fn reveals(
        &self,
        ranks: &HashMap<usize, HandRank>,
    ) -> Result<Vec<ShowdownReveal>, TableError> {
        let mut reveals = Vec::with_capacity(ranks.len());
        for (idx, seat) in self.occupied() {
            let Some(rank) = ranks.get(&idx) else {
                continue;
            };
            let hole_cards = seat
                .hole_cards
                .ok_or(TableError::Internal("contender without hole cards"))?;
            reveals.push(ShowdownReveal {
                seat: idx,
                name: seat.name.clone(),
                hole_cards,
                category: rank.category,
            });
        }
        reveals.sort_by_key(|reveal| reveal.seat);
        Ok(reveals)
    }

    fn apply_elo(&mut self, ranks: &HashMap<usize, HandRank>, winners: &HashSet<usize>) {
        if ranks.len() < 2 {
            return;
        }
        let mut contenders: Vec<(usize, f64)> = ranks
            .keys()
            .filter_map(|&idx| self.seats[idx].as_ref().map(|seat| (idx, seat.elo)))
            .collect();
        contenders.sort_by_key(|(idx, _)| *idx);
        for (idx, rating) in elo::update_pairwise(&contenders, winners, self.config.elo_k_factor) {
            if let Some(seat) = self.seats[idx].as_mut() {
                seat.elo = rating;
            }
        }
    }

    /// Clockwise distance from the button decides who takes the odd chip.
    fn closest_to_button(&self, winners: &[usize]) -> Result<usize, TableError> {
        crate::pot::closest_clockwise_from(self.dealer_seat, winners, self.seats.len())
            .ok_or(TableError::Internal("odd chip with no winners"))
    }

    fn narrate_winners(&self, payouts: &[SeatPayout]) -> String {
        let names: Vec<String> = payouts
            .iter()
            .filter_map(|payout| {
                self.seats[payout.seat]
                    .as_ref()
                    .map(|seat| format!("{} ({})", seat.name, payout.amount))
            })
            .collect();
        format!("Showdown! Chips go to {}.", names.join(", "))
    }

    fn record_hand(
        &mut self,
        contenders: Vec<ContenderRecord>,
        pots: Vec<PotResult>,
        payouts: Vec<SeatPayout>,
    ) {
        let record = HandRecord {
            hand_id: self.hand_id,
            hand_no: self.hand_no,
            started_at: self.hand_started_at,
            ended_at: Utc::now(),
            community: self.community.clone(),
            contenders,
            pots,
            payouts,
            log: std::mem::take(&mut self.hand_log),
        };
        self.history.push(record);
    }

    // ---- timers ----

    /// Fingerprint of the prompt a turn timer should be armed against, if a
    /// player currently holds the action.
    #[must_use]
    pub fn current_fingerprint(&self) -> Option<TimerFingerprint> {
        if !self.phase.is_betting() {
            return None;
        }
        self.current_actor.map(|seat| TimerFingerprint {
            hand_no: self.hand_no,
            phase: self.phase,
            seat,
            prompt_seq: self.prompt_seq,
        })
    }

    /// The primary turn clock ran out. Engages the time bank when the actor
    /// still has one, otherwise folds them.
    pub fn on_turn_timer_expired(&mut self, fingerprint: TimerFingerprint) -> TimerOutcome {
        if self.current_fingerprint() != Some(fingerprint) {
            return TimerOutcome::Stale;
        }
        let remaining = self.seats[fingerprint.seat]
            .as_ref()
            .map_or(0, |seat| seat.time_bank_secs);
        if remaining > 0 && !self.time_bank_engaged {
            self.time_bank_engaged = true;
            self.log(
                Some(fingerprint.seat),
                format!("time bank engaged ({remaining}s)"),
            );
            let event = self.event(PushEventKind::TimeBank {
                seat: fingerprint.seat,
                remaining,
            });
            return TimerOutcome::TimeBankEngaged {
                seat: fingerprint.seat,
                remaining,
                events: vec![event],
            };
        }
        match self.execute_or_abort(fingerprint.seat, Action::Fold, ActionTag::TimeoutFold) {
            Ok(outcome) => TimerOutcome::Folded(outcome),
            Err(err) => {
                error!(table_id = %self.id, error = %err, "timeout fold failed");
                TimerOutcome::Stale
            }
        }
    }

    /// One second of time bank burned. Folds the actor when the bank empties.
    pub fn on_time_bank_tick(&mut self, fingerprint: TimerFingerprint) -> TickOutcome {
        if self.current_fingerprint() != Some(fingerprint) || !self.time_bank_engaged {
            return TickOutcome::Stale;
        }
        let remaining = {
            let Some(seat) = self.seats[fingerprint.seat].as_mut() else {
                return TickOutcome::Stale;
            };
            seat.time_bank_secs = seat.time_bank_secs.saturating_sub(1);
            seat.time_bank_secs
        };
        let tick_event = self.event(PushEventKind::TimeBank {
            seat: fingerprint.seat,
            remaining,
        });
        if remaining > 0 {
            return TickOutcome::Counting {
                seat: fingerprint.seat,
                remaining,
                events: vec![tick_event],
            };
        }
        match self.execute_or_abort(fingerprint.seat, Action::Fold, ActionTag::TimeoutFold) {
            Ok(mut outcome) => {
                outcome.events.insert(0, tick_event);
                TickOutcome::Exhausted(outcome)
            }
            Err(err) => {
                error!(table_id = %self.id, error = %err, "time bank fold failed");
                TickOutcome::Stale
            }
        }
    }

    // ---- queries ----

    /// Actions the given player could take right now; empty when the action
    /// is not on them.
    pub fn legal_actions(&self, token: &PlayerToken) -> Result<Vec<LegalAction>, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        if !self.phase.is_betting() || self.current_actor != Some(idx) {
            return Ok(Vec::new());
        }
        let seat = self.seats[idx]
            .as_ref()
            .ok_or(TableError::Internal("acting seat is empty"))?;

        let to_call = seat.to_call(self.current_bet_level);
        let mut actions = vec![LegalAction::Fold];
        if to_call.is_zero() {
            actions.push(LegalAction::Check);
        } else {
            actions.push(LegalAction::Call {
                amount: to_call.min(seat.stack),
            });
        }
        if !seat.raise_blocked && seat.stack > to_call {
            // The most a seat can ever bet to is its current bet plus stack;
            // an all-in below the full minimum is still legal.
            let max = Chips(seat.current_bet.0 + seat.stack.0);
            let min = Chips(self.current_bet_level.0 + self.min_raise.0).min(max);
            actions.push(LegalAction::RaiseTo { min, max });
        }
        Ok(actions)
    }

    /// The requesting player's view: public table plus their own hole cards.
    pub fn state_for(&self, token: &PlayerToken) -> Result<PrivateView, TableError> {
        let idx = self.find_seat(token).ok_or(TableError::UnknownPlayer)?;
        let mut table = self.public_view();
        if let Some(Some(view)) = table.seats.get_mut(idx) {
            view.hole_cards = self.seats[idx].as_ref().and_then(|seat| seat.hole_cards);
        }
        Ok(PrivateView {
            seat: idx,
            legal_actions: self.legal_actions(token)?,
            table,
        })
    }

    /// Public snapshot: no hole cards anywhere.
    #[must_use]
    pub fn public_view(&self) -> TableView {
        TableView {
            table_id: self.id,
            hand_no: self.hand_no,
            phase: self.phase,
            community: self.community.clone(),
            pot: self.pot,
            pots: self
                .pots
                .iter()
                .map(|pot| PotView {
                    label: pot.label.clone(),
                    amount: pot.amount,
                    eligible: pot.eligible.clone(),
                })
                .collect(),
            dealer_seat: self.dealer_seat,
            current_actor: self.current_actor,
            current_bet_level: self.current_bet_level,
            min_raise: self.min_raise,
            seats: self
                .seats
                .iter()
                .enumerate()
                .map(|(idx, seat)| {
                    seat.as_ref().map(|seat| SeatView {
                        seat: idx,
                        name: seat.name.clone(),
                        stack: seat.stack,
                        status: seat.status,
                        current_bet: seat.current_bet,
                        total_bet_this_hand: seat.total_bet_this_hand,
                        sit_out: seat.sit_out,
                        disconnected: seat.disconnected,
                        last_action: seat.last_action,
                        time_bank: seat.time_bank_secs,
                        hands_won: seat.hands_won,
                        elo: seat.elo,
                        hole_cards: None,
                    })
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn history_recent(&self, limit: usize) -> Vec<HandRecord> {
        self.history.recent(limit)
    }

    #[must_use]
    pub fn find_seat(&self, token: &PlayerToken) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|s| &s.token == token))
    }

    // ---- helpers ----

    fn occupied(&self) -> impl Iterator<Item = (usize, &Seat)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(idx, seat)| seat.as_ref().map(|s| (idx, s)))
    }

    fn occupied_mut(&mut self) -> impl Iterator<Item = (usize, &mut Seat)> {
        self.seats
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, seat)| seat.as_mut().map(|s| (idx, s)))
    }

    fn active_seats(&self) -> Vec<usize> {
        self.occupied()
            .filter(|(_, seat)| seat.status == SeatStatus::Active)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn eligible_count(&self) -> usize {
        self.occupied()
            .filter(|(_, seat)| !seat.stack.is_zero() && !seat.sit_out && !seat.leaving)
            .count()
    }

    fn contender_count(&self) -> usize {
        self.occupied()
            .filter(|(_, seat)| seat.in_contention())
            .count()
    }

    fn actionable_count(&self) -> usize {
        self.occupied().filter(|(_, seat)| seat.can_act()).count()
    }

    fn any_all_in(&self) -> bool {
        self.occupied()
            .any(|(_, seat)| seat.status == SeatStatus::AllIn)
    }

    /// First seat clockwise after `from` whose occupant satisfies `pred`.
    fn next_seat_where(&self, from: usize, pred: impl Fn(&Seat) -> bool) -> Option<usize> {
        let n = self.seats.len();
        (1..=n).find_map(|step| {
            let idx = (from + step) % n;
            self.seats[idx]
                .as_ref()
                .filter(|seat| pred(seat))
                .map(|_| idx)
        })
    }

    fn big_blind_seat(&self) -> Result<usize, TableError> {
        // Recomputed rather than stored: blinds are posted once per hand and
        // the dealt-in seats cannot change in between.
        let dealt: Vec<usize> = self
            .occupied()
            .filter(|(_, seat)| seat.in_contention())
            .map(|(idx, _)| idx)
            .collect();
        if dealt.len() == 2 {
            return self
                .next_seat_where(self.dealer_seat, Seat::in_contention)
                .ok_or(TableError::Internal("missing big blind seat"));
        }
        let sb = self
            .next_seat_where(self.dealer_seat, Seat::in_contention)
            .ok_or(TableError::Internal("missing small blind seat"))?;
        self.next_seat_where(sb, Seat::in_contention)
            .ok_or(TableError::Internal("missing big blind seat"))
    }

    fn event(&self, kind: PushEventKind) -> PushEvent {
        PushEvent {
            table_id: self.id,
            hand_no: self.hand_no,
            at: Utc::now(),
            kind,
        }
    }

    fn log(&mut self, seat: Option<usize>, detail: String) {
        self.hand_log.push(LogEntry {
            at: Utc::now(),
            phase: self.phase,
            seat,
            detail,
        });
    }
}
