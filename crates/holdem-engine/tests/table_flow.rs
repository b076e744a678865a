//! Full-hand flows driven straight through the table state machine: blinds,
//! betting, side pots, ties, timeouts and the bookkeeping invariants.

use holdem_domain::{
    Action, Card, Chips, Deck, IllegalActionReason, Phase, PlayerToken, Rank, SeatStatus, Suit,
    TableError,
};
use holdem_engine::{Table, TableConfig, TickOutcome, TimerOutcome};

fn card(spec: &str) -> Card {
    let mut chars = spec.chars();
    let rank = match chars.next().expect("rank") {
        '2' => Rank::Two,
        '3' => Rank::Three,
        '4' => Rank::Four,
        '5' => Rank::Five,
        '6' => Rank::Six,
        '7' => Rank::Seven,
        '8' => Rank::Eight,
        '9' => Rank::Nine,
        'T' => Rank::Ten,
        'J' => Rank::Jack,
        'Q' => Rank::Queen,
        'K' => Rank::King,
        'A' => Rank::Ace,
        other => panic!("bad rank {other}"),
    };
    let suit = match chars.next().expect("suit") {
        'c' => Suit::Clubs,
        'd' => Suit::Diamonds,
        'h' => Suit::Hearts,
        's' => Suit::Spades,
        other => panic!("bad suit {other}"),
    };
    Card::new(rank, suit)
}

fn deck_of(specs: &[&str]) -> Deck {
    Deck::from_cards(specs.iter().map(|spec| card(spec)).collect())
}

fn table_with(buy_ins: &[u64]) -> (Table, Vec<PlayerToken>) {
    table_with_config(TableConfig::default(), buy_ins)
}

fn table_with_config(config: TableConfig, buy_ins: &[u64]) -> (Table, Vec<PlayerToken>) {
    let mut table = Table::new(holdem_domain::TableId::new(), config);
    let mut tokens = Vec::new();
    for (i, &buy_in) in buy_ins.iter().enumerate() {
        let token = PlayerToken::new();
        table
            .seat_player(&format!("player-{i}"), Chips(buy_in), token)
            .expect("seat player");
        tokens.push(token);
    }
    (table, tokens)
}

fn stack_of(table: &Table, seat: usize) -> Chips {
    table.seat(seat).expect("occupied seat").stack
}

// Heads-up: the button posts the small blind and folds preflop; the big
// blind collects without showing cards.
#[test]
fn heads_up_preflop_fold_awards_blinds() {
    let (mut table, tokens) = table_with(&[200, 200]);
    let events = table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");
    assert!(!events.is_empty());
    assert_eq!(table.hand_no(), 1);
    assert_eq!(table.phase(), Phase::Preflop);
    assert_eq!(table.dealer_seat(), 0);
    // Heads-up the button is the small blind and acts first.
    assert_eq!(table.current_actor(), Some(0));
    assert_eq!(table.pot(), Chips(3));

    let outcome = table
        .handle_action(&tokens[0], Action::Fold)
        .expect("fold accepted");
    assert!(outcome.hand_ended);
    assert_eq!(stack_of(&table, 1), Chips(201));
    assert_eq!(stack_of(&table, 0), Chips(199));

    // Nobody's cards were revealed.
    let record = &table.history_recent(1)[0];
    assert!(record.contenders.is_empty());
    assert_eq!(record.pots[0].winners, vec![1]);
}

// Heads-up check-down to showdown; the pair of aces takes the 4-chip pot.
#[test]
fn checked_down_hand_reaches_showdown_and_pays_the_best_hand() {
    let (mut table, tokens) = table_with(&[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            // seat 1, seat 0, seat 1, seat 0
            "7c", "As", "2d", "Ah", // burn + flop
            "4c", "3h", "8s", "Jd", // burn + turn
            "4d", "5c", // burn + river
            "6s", "9h",
        ]))
        .expect("hand starts");

    let initial = table.chips_in_play();

    // Preflop: button completes, big blind checks.
    table.handle_action(&tokens[0], Action::Call).expect("call");
    assert_eq!(table.chips_in_play(), initial);
    table
        .handle_action(&tokens[1], Action::Check)
        .expect("check");
    assert_eq!(table.phase(), Phase::Flop);
    // Post-flop the big blind acts first heads-up.
    assert_eq!(table.current_actor(), Some(1));

    for _street in 0..3 {
        table
            .handle_action(&tokens[1], Action::Check)
            .expect("check");
        let outcome = table
            .handle_action(&tokens[0], Action::Check)
            .expect("check");
        assert_eq!(table.chips_in_play(), initial);
        if outcome.hand_ended {
            break;
        }
    }

    assert_eq!(table.phase(), Phase::Showdown);
    assert_eq!(stack_of(&table, 0), Chips(202));
    assert_eq!(stack_of(&table, 1), Chips(198));

    let record = &table.history_recent(1)[0];
    assert_eq!(record.community.len(), 5);
    assert_eq!(record.contenders.len(), 2);
    assert_eq!(record.pots[0].winners, vec![0]);
}

// Three stacks all-in preflop build a main pot and two side pots with the
// layered eligibility the short stacks can actually win.
#[test]
fn three_way_all_in_builds_layered_side_pots() {
    let (mut table, tokens) = table_with(&[50, 100, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            // deal order: seat 1, seat 2, seat 0 (button is 0)
            "Kc", "7s", "As", "Kd", "2c", "Ah", // burn + flop
            "3s", "3h", "8d", "Jc", // burn + turn
            "4s", "5s", // burn + river
            "6d", "9c",
        ]))
        .expect("hand starts");

    let initial = table.chips_in_play();
    assert_eq!(initial, Chips(350));

    // Seat 0 opens all-in, the others shove over the top.
    table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(50) })
        .expect("seat 0 all-in");
    table
        .handle_action(&tokens[1], Action::RaiseTo { to: Chips(100) })
        .expect("seat 1 all-in");
    let outcome = table
        .handle_action(&tokens[2], Action::RaiseTo { to: Chips(200) })
        .expect("seat 2 all-in");
    assert!(outcome.hand_ended);

    let record = &table.history_recent(1)[0];
    assert_eq!(record.pots.len(), 3);
    assert_eq!(record.pots[0].label, "Main Pot");
    assert_eq!(record.pots[0].amount, Chips(150));
    assert_eq!(record.pots[0].winners, vec![0]);
    assert_eq!(record.pots[1].label, "Side Pot 1");
    assert_eq!(record.pots[1].amount, Chips(100));
    assert_eq!(record.pots[1].winners, vec![1]);
    assert_eq!(record.pots[2].label, "Side Pot 2");
    assert_eq!(record.pots[2].amount, Chips(100));
    assert_eq!(record.pots[2].winners, vec![2]);

    // Aces scoop the main, kings the first side pot, and the uncalled
    // hundred goes back to the big stack.
    assert_eq!(stack_of(&table, 0), Chips(150));
    assert_eq!(stack_of(&table, 1), Chips(100));
    assert_eq!(stack_of(&table, 2), Chips(100));
    assert_eq!(table.chips_in_play(), initial);
}

// A split pot with an odd chip: the remainder lands on the winner nearest
// the button, clockwise.
#[test]
fn odd_chip_goes_clockwise_from_the_button() {
    let (mut table, tokens) = table_with(&[200, 200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            // deal order: seat 1, seat 2, seat 0
            "8c", "2h", "2c", "9d", "7h", "7d", // burn + flop (broadway on board)
            "3s", "Ah", "Kd", "Qc", // burn + turn
            "4s", "Js", // burn + river
            "5d", "Tc",
        ]))
        .expect("hand starts");

    // Seat 0 limps, the small blind folds (leaving an odd chip in the pot),
    // the big blind checks.
    table.handle_action(&tokens[0], Action::Call).expect("call");
    table.handle_action(&tokens[1], Action::Fold).expect("fold");
    table
        .handle_action(&tokens[2], Action::Check)
        .expect("check");

    // Check the board down; it plays for both remaining seats.
    for _street in 0..3 {
        table
            .handle_action(&tokens[2], Action::Check)
            .expect("check");
        table
            .handle_action(&tokens[0], Action::Check)
            .expect("check");
    }

    assert_eq!(table.phase(), Phase::Showdown);
    let record = &table.history_recent(1)[0];
    assert_eq!(record.pots[0].amount, Chips(5));
    assert_eq!(record.pots[0].winners, vec![0, 2]);
    // Button itself is distance zero: seat 0 takes 3, seat 2 takes 2.
    assert_eq!(stack_of(&table, 0), Chips(201));
    assert_eq!(stack_of(&table, 2), Chips(200));
    assert_eq!(stack_of(&table, 1), Chips(199));
}

// An all-in that is short of the full minimum raise moves the bet level but
// does not reopen raising for a player whose action already closed.
#[test]
fn incomplete_all_in_raise_does_not_reopen_action() {
    let config = TableConfig {
        min_buy_in: Chips(10),
        ..TableConfig::default()
    };
    let (mut table, tokens) = table_with_config(config, &[200, 200, 14]);
    table
        .try_start_hand_with_deck(deck_of(&[
            // deal order: seat 1, seat 2, seat 0
            "8c", "Kc", "As", "9d", "Kd", "Ah", // burn + flop
            "3s", "4h", "8d", "Jc", // burn + turn
            "4s", "5s", // burn + river
            "6d", "9c",
        ]))
        .expect("hand starts");

    // Seat 0 raises to 10 (full raise: min raise becomes 8).
    table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(10) })
        .expect("open raise");
    assert_eq!(table.min_raise(), Chips(8));
    table.handle_action(&tokens[1], Action::Fold).expect("fold");

    // The short stack shoves to 14: an incomplete raise.
    table
        .handle_action(&tokens[2], Action::RaiseTo { to: Chips(14) })
        .expect("short all-in");
    assert_eq!(table.current_bet_level(), Chips(14));
    assert_eq!(table.min_raise(), Chips(8));

    // Seat 0 is re-prompted but may only call or fold.
    assert_eq!(table.current_actor(), Some(0));
    let err = table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(22) })
        .expect_err("re-raise must be rejected");
    assert_eq!(
        err,
        TableError::IllegalAction(IllegalActionReason::RaiseTooSmall)
    );

    let outcome = table.handle_action(&tokens[0], Action::Call).expect("call");
    assert!(outcome.hand_ended);

    // Aces beat kings: seat 0 nets the whole 29-chip pot.
    assert_eq!(stack_of(&table, 0), Chips(215));
    assert_eq!(stack_of(&table, 1), Chips(199));
    assert_eq!(stack_of(&table, 2), Chips(0));
    assert_eq!(table.seat(2).expect("seat").status, SeatStatus::AllIn);
}

// Primary timer expiry engages the time bank; acting mid-countdown keeps the
// seconds already burned.
#[test]
fn time_bank_engages_on_expiry_and_keeps_spent_seconds() {
    let config = TableConfig {
        time_bank_seconds: 5,
        ..TableConfig::default()
    };
    let (mut table, tokens) = table_with_config(config, &[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    let fingerprint = table.current_fingerprint().expect("actor armed");
    let TimerOutcome::TimeBankEngaged { seat, remaining, .. } =
        table.on_turn_timer_expired(fingerprint)
    else {
        panic!("time bank should engage");
    };
    assert_eq!(seat, 0);
    assert_eq!(remaining, 5);

    // Three seconds tick away.
    for expected in [4, 3, 2] {
        let TickOutcome::Counting { remaining, .. } = table.on_time_bank_tick(fingerprint) else {
            panic!("countdown should continue");
        };
        assert_eq!(remaining, expected);
    }

    // The actor gets their call in before exhaustion; the burn is kept.
    table.handle_action(&tokens[0], Action::Call).expect("call");
    assert_eq!(table.seat(0).expect("seat").time_bank_secs, 2);

    // The old fingerprint is stale now.
    assert!(matches!(
        table.on_time_bank_tick(fingerprint),
        TickOutcome::Stale
    ));
    assert!(matches!(
        table.on_turn_timer_expired(fingerprint),
        TimerOutcome::Stale
    ));
}

// A drained time bank resolves the turn as a synthesized fold.
#[test]
fn exhausted_time_bank_folds_the_actor() {
    let config = TableConfig {
        time_bank_seconds: 1,
        ..TableConfig::default()
    };
    let (mut table, _tokens) = table_with_config(config, &[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    let fingerprint = table.current_fingerprint().expect("actor armed");
    assert!(matches!(
        table.on_turn_timer_expired(fingerprint),
        TimerOutcome::TimeBankEngaged { remaining: 1, .. }
    ));
    let TickOutcome::Exhausted(outcome) = table.on_time_bank_tick(fingerprint) else {
        panic!("bank should exhaust");
    };
    assert!(outcome.hand_ended);
    assert_eq!(stack_of(&table, 1), Chips(201));
    assert_eq!(stack_of(&table, 0), Chips(199));
}

// A player with no time bank folds straight away on primary expiry.
#[test]
fn expiry_without_time_bank_folds_immediately() {
    let config = TableConfig {
        time_bank_seconds: 0,
        ..TableConfig::default()
    };
    let (mut table, _tokens) = table_with_config(config, &[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    let fingerprint = table.current_fingerprint().expect("actor armed");
    let TimerOutcome::Folded(outcome) = table.on_turn_timer_expired(fingerprint) else {
        panic!("should fold with an empty bank");
    };
    assert!(outcome.hand_ended);
}

#[test]
fn buy_in_bounds_are_inclusive() {
    let (mut table, _) = table_with(&[]);
    assert!(matches!(
        table.seat_player("too-small", Chips(39), PlayerToken::new()),
        Err(TableError::InvalidBuyIn { .. })
    ));
    assert!(matches!(
        table.seat_player("too-big", Chips(401), PlayerToken::new()),
        Err(TableError::InvalidBuyIn { .. })
    ));
    assert!(table
        .seat_player("min", Chips(40), PlayerToken::new())
        .is_ok());
    assert!(table
        .seat_player("max", Chips(400), PlayerToken::new())
        .is_ok());
}

#[test]
fn raise_minimum_boundary_is_exact() {
    let (mut table, tokens) = table_with(&[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    // Level 2, min raise 2: raising to 3 is short, 4 is the exact minimum.
    let err = table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(3) })
        .expect_err("short raise rejected");
    assert_eq!(
        err,
        TableError::IllegalAction(IllegalActionReason::RaiseTooSmall)
    );
    table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(4) })
        .expect("exact minimum raise accepted");
    assert_eq!(table.current_bet_level(), Chips(4));
    assert_eq!(table.min_raise(), Chips(2));
}

#[test]
fn private_views_never_leak_other_hole_cards() {
    let (mut table, tokens) = table_with(&[200, 200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "8c", "2h", "2c", "9d", "7h", "7d", "3s", "Ah", "Kd", "Qc", "4s", "Js", "5d", "Tc",
        ]))
        .expect("hand starts");

    for (me, token) in tokens.iter().enumerate() {
        let view = table.state_for(token).expect("state");
        for seat_view in view.table.seats.iter().flatten() {
            if seat_view.seat == me {
                assert!(seat_view.hole_cards.is_some(), "own cards visible");
            } else {
                assert!(seat_view.hole_cards.is_none(), "foreign cards hidden");
            }
        }
    }

    // The public view hides everything.
    let public = table.public_view();
    assert!(public
        .seats
        .iter()
        .flatten()
        .all(|seat| seat.hole_cards.is_none()));
}

#[test]
fn wrong_turn_and_dead_table_actions_are_rejected() {
    let (mut table, tokens) = table_with(&[200, 200]);
    assert!(matches!(
        table.handle_action(&tokens[0], Action::Fold),
        Err(TableError::NoActiveHand)
    ));
    table.try_start_hand().expect("hand starts");
    assert!(matches!(
        table.handle_action(&tokens[1], Action::Fold),
        Err(TableError::NotYourTurn)
    ));
    assert!(matches!(
        table.handle_action(&PlayerToken::new(), Action::Fold),
        Err(TableError::UnknownPlayer)
    ));
}

#[test]
fn uncalled_bet_returns_to_the_bettor() {
    let (mut table, tokens) = table_with(&[200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    table
        .handle_action(&tokens[0], Action::RaiseTo { to: Chips(50) })
        .expect("raise");
    let outcome = table.handle_action(&tokens[1], Action::Fold).expect("fold");
    assert!(outcome.hand_ended);
    // The raiser collects the blinds plus their own bet back.
    assert_eq!(stack_of(&table, 0), Chips(202));
    assert_eq!(stack_of(&table, 1), Chips(198));
}

#[test]
fn short_stack_blind_posts_all_in() {
    let config = TableConfig {
        min_buy_in: Chips(1),
        ..TableConfig::default()
    };
    let (mut table, tokens) = table_with_config(config, &[200, 1]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    // The big blind could only post one chip and is all-in.
    assert_eq!(table.seat(1).expect("seat").status, SeatStatus::AllIn);
    assert_eq!(table.current_bet_level(), Chips(2));

    // Button calls; board runs out; aces win the main pot, and the button's
    // uncalled extra chip comes back as a side layer.
    let outcome = table.handle_action(&tokens[0], Action::Call).expect("call");
    assert!(outcome.hand_ended);
    assert_eq!(stack_of(&table, 0), Chips(201));
    assert_eq!(stack_of(&table, 1), Chips(0));
}

#[test]
fn sitting_out_mid_hand_folds_when_the_action_arrives() {
    let (mut table, tokens) = table_with(&[200, 200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "8c", "2h", "2c", "9d", "7h", "7d", "3s", "Ah", "Kd", "Qc", "4s", "Js", "5d", "Tc",
        ]))
        .expect("hand starts");

    // Seat 1 (small blind) sits out while seat 0 holds the action.
    assert_eq!(table.current_actor(), Some(0));
    let outcome = table.set_sit_out(&tokens[1]).expect("sit out");
    assert!(!outcome.hand_ended);

    // When seat 0 calls, the action skips over seat 1 by folding it.
    table.handle_action(&tokens[0], Action::Call).expect("call");
    assert_eq!(table.seat(1).expect("seat").status, SeatStatus::Folded);
    assert_eq!(table.current_actor(), Some(2));
}

#[test]
fn leaving_mid_hand_folds_and_vacates_at_teardown() {
    let (mut table, tokens) = table_with(&[200, 200, 200]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "8c", "2h", "2c", "9d", "7h", "7d", "3s", "Ah", "Kd", "Qc", "4s", "Js", "5d", "Tc",
        ]))
        .expect("hand starts");

    let initial = table.chips_in_play();

    // The current actor leaves: auto-fold, stack cashed out.
    let (final_stack, outcome) = table.remove_player(&tokens[0]).expect("leave");
    assert_eq!(final_stack, Chips(200));
    assert!(!outcome.hand_ended);
    assert_eq!(table.chips_in_play(), Chips(initial.0 - 200));

    // The remaining blinds finish the hand; the leaver's seat empties after
    // teardown.
    table.handle_action(&tokens[1], Action::Fold).expect("fold");
    assert_eq!(table.phase(), Phase::Showdown);
    let summary = table.finish_hand();
    assert_eq!(summary.removed.len(), 1);
    assert!(table.seat(0).is_none());
    assert_eq!(table.phase(), Phase::Waiting);
}

#[test]
fn bet_level_and_min_raise_are_monotonic_within_a_street() {
    let (mut table, tokens) = table_with(&[400, 400]);
    table
        .try_start_hand_with_deck(deck_of(&[
            "7c", "As", "2d", "Ah", "4c", "3h", "8s", "Jd", "4d", "5c", "6h", "9h",
        ]))
        .expect("hand starts");

    let mut last_level = table.current_bet_level();
    let mut last_min_raise = table.min_raise();
    for raise_to in [8u64, 24, 80] {
        let actor = table.current_actor().expect("actor");
        let token = tokens[actor];
        table
            .handle_action(&token, Action::RaiseTo { to: Chips(raise_to) })
            .expect("raise");
        assert!(table.current_bet_level() >= last_level);
        assert!(table.min_raise() >= last_min_raise);
        assert!(table.min_raise() >= Chips(2));
        last_level = table.current_bet_level();
        last_min_raise = table.min_raise();
    }
}

#[test]
fn rebuy_is_blocked_mid_hand_and_capped_between_hands() {
    let (mut table, tokens) = table_with(&[100, 100]);
    table.try_start_hand().expect("hand starts");
    assert!(matches!(
        table.rebuy(&tokens[0], Chips(50)),
        Err(TableError::IllegalStateTransition(_))
    ));

    let actor = table.current_actor().expect("actor");
    table
        .handle_action(&tokens[actor], Action::Fold)
        .expect("fold");
    table.finish_hand();

    let new_stack = table.rebuy(&tokens[0], Chips(50)).expect("rebuy");
    assert!(new_stack > Chips(100));
    assert!(matches!(
        table.rebuy(&tokens[0], Chips(400)),
        Err(TableError::ExceedsMaxBuyIn { .. })
    ));
}
