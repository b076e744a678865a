use holdem_domain::{Chips, SeatStatus};
use serde::{Deserialize, Serialize};

use crate::seat::Seat;

/// One pot layer: its chips, the seats that can win it, and the per-seat cap
/// that closed the layer (`None` for an uncapped layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<usize>,
    pub label: String,
    pub cap: Option<Chips>,
}

/// Slice per-hand contributions into an ordered main pot plus side pots.
///
/// Thresholds are the distinct contribution totals of seats still in
/// contention. Every seat (folded included) funds each layer up to the layer
/// cap; only contenders at or above the cap are eligible. Whatever active
/// seats committed beyond the top all-in cap forms a final uncapped layer —
/// the mechanism that returns an uncalled bet.
#[must_use]
pub fn build_pots(seats: &[Option<Seat>]) -> Vec<Pot> {
    let contributions: Vec<(usize, Chips, SeatStatus)> = seats
        .iter()
        .enumerate()
        .filter_map(|(idx, seat)| {
            seat.as_ref()
                .filter(|s| !s.total_bet_this_hand.is_zero())
                .map(|s| (idx, s.total_bet_this_hand, s.status))
        })
        .collect();

    let total: Chips = Chips(contributions.iter().map(|(_, amount, _)| amount.0).sum());
    if total.is_zero() {
        return Vec::new();
    }

    let any_all_in = contributions
        .iter()
        .any(|(_, _, status)| *status == SeatStatus::AllIn);
    if !any_all_in {
        let eligible: Vec<usize> = contributions
            .iter()
            .filter(|(_, _, status)| status.in_contention())
            .map(|(idx, _, _)| *idx)
            .collect();
        return vec![Pot {
            amount: total,
            eligible,
            label: "Main Pot".to_string(),
            cap: None,
        }];
    }

    let mut thresholds: Vec<Chips> = contributions
        .iter()
        .filter(|(_, _, status)| status.in_contention())
        .map(|(_, amount, _)| *amount)
        .collect();
    thresholds.sort_unstable();
    thresholds.dedup();

    let mut pots = Vec::new();
    let mut prev = Chips::ZERO;
    for cap in &thresholds {
        let span = cap.saturating_sub(prev);
        let amount = Chips(
            contributions
                .iter()
                .map(|(_, committed, _)| committed.saturating_sub(prev).min(span).0)
                .sum(),
        );
        if amount.is_zero() {
            prev = *cap;
            continue;
        }
        let eligible: Vec<usize> = contributions
            .iter()
            .filter(|(_, committed, status)| status.in_contention() && *committed >= *cap)
            .map(|(idx, _, _)| *idx)
            .collect();
        pots.push(Pot {
            amount,
            eligible,
            label: pot_label(pots.len()),
            cap: Some(*cap),
        });
        prev = *cap;
    }

    // Chips committed above the top all-in cap belong to the seats that can
    // still act; a single such seat is simply getting an uncalled bet back.
    let top = prev;
    let overflow = Chips(
        contributions
            .iter()
            .map(|(_, committed, _)| committed.saturating_sub(top).0)
            .sum(),
    );
    if !overflow.is_zero() {
        let eligible: Vec<usize> = contributions
            .iter()
            .filter(|(_, committed, status)| *status == SeatStatus::Active && *committed > top)
            .map(|(idx, _, _)| *idx)
            .collect();
        if eligible.is_empty() {
            // Dead chips above the top cap (the bettor was evicted mid-hand):
            // fold them into the top layer so nothing leaks from the pot.
            if let Some(last) = pots.last_mut() {
                last.amount = Chips(last.amount.0 + overflow.0);
            }
        } else {
            pots.push(Pot {
                amount: overflow,
                eligible,
                label: pot_label(pots.len()),
                cap: None,
            });
        }
    }

    pots
}

fn pot_label(index: usize) -> String {
    if index == 0 {
        "Main Pot".to_string()
    } else {
        format!("Side Pot {index}")
    }
}

/// Sum of all pot amounts; must always equal the sum of contributions.
#[must_use]
pub fn pots_total(pots: &[Pot]) -> Chips {
    Chips(pots.iter().map(|pot| pot.amount.0).sum())
}

/// Of `seats`, the one with minimum clockwise distance from the button;
/// odd chips from an uneven split land here.
#[must_use]
pub fn closest_clockwise_from(button: usize, seats: &[usize], max_seats: usize) -> Option<usize> {
    seats
        .iter()
        .copied()
        .min_by_key(|&seat| (seat + max_seats - button) % max_seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_domain::PlayerToken;

    fn seat_with(stack: u64, committed: u64, status: SeatStatus) -> Option<Seat> {
        let mut seat = Seat::new(
            PlayerToken::new(),
            "bot".to_string(),
            Chips(stack),
            30,
            1000.0,
        );
        seat.total_bet_this_hand = Chips(committed);
        seat.status = status;
        Some(seat)
    }

    #[test]
    fn no_all_in_gives_a_single_main_pot() {
        let seats = vec![
            seat_with(90, 10, SeatStatus::Active),
            seat_with(90, 10, SeatStatus::Active),
            seat_with(95, 5, SeatStatus::Folded),
            None,
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(25));
        assert_eq!(pots[0].eligible, vec![0, 1]);
        assert_eq!(pots[0].label, "Main Pot");
    }

    #[test]
    fn three_way_all_in_layers_into_main_and_two_side_pots() {
        // A=50, B=100, C=200, all all-in.
        let seats = vec![
            seat_with(0, 50, SeatStatus::AllIn),
            seat_with(0, 100, SeatStatus::AllIn),
            seat_with(0, 200, SeatStatus::AllIn),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 3);

        assert_eq!(pots[0].label, "Main Pot");
        assert_eq!(pots[0].amount, Chips(150));
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);

        assert_eq!(pots[1].label, "Side Pot 1");
        assert_eq!(pots[1].amount, Chips(100));
        assert_eq!(pots[1].eligible, vec![1, 2]);

        assert_eq!(pots[2].label, "Side Pot 2");
        assert_eq!(pots[2].amount, Chips(100));
        assert_eq!(pots[2].eligible, vec![2]);

        assert_eq!(pots_total(&pots), Chips(350));
    }

    #[test]
    fn folded_chips_fund_layers_without_eligibility() {
        let seats = vec![
            seat_with(0, 40, SeatStatus::AllIn),
            seat_with(60, 40, SeatStatus::Active),
            seat_with(80, 20, SeatStatus::Folded),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(100));
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }

    #[test]
    fn uncalled_overflow_goes_back_to_the_live_bettor() {
        // Caller is all-in for 30; the bettor put in 50 and stays active.
        let seats = vec![
            seat_with(0, 30, SeatStatus::AllIn),
            seat_with(50, 50, SeatStatus::Active),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips(60));
        assert_eq!(pots[0].eligible, vec![0, 1]);
        assert_eq!(pots[1].amount, Chips(20));
        assert_eq!(pots[1].eligible, vec![1]);
        assert_eq!(pots_total(&pots), Chips(80));
    }

    #[test]
    fn odd_chip_goes_to_the_seat_nearest_the_button_clockwise() {
        // Button on 1: seat 3 is two seats away, seat 6 is five.
        assert_eq!(closest_clockwise_from(1, &[3, 6], 9), Some(3));
        // The button seat itself is distance zero.
        assert_eq!(closest_clockwise_from(4, &[4, 5], 9), Some(4));
        // Wrap-around: from seat 7, seat 0 is closer than seat 6.
        assert_eq!(closest_clockwise_from(7, &[6, 0], 9), Some(0));
    }

    #[test]
    fn conservation_holds_across_mixed_statuses() {
        let seats = vec![
            seat_with(0, 17, SeatStatus::AllIn),
            seat_with(10, 33, SeatStatus::Active),
            seat_with(0, 33, SeatStatus::AllIn),
            seat_with(5, 9, SeatStatus::Folded),
            None,
        ];
        let pots = build_pots(&seats);
        let contributed: u64 = [17, 33, 33, 9].iter().sum();
        assert_eq!(pots_total(&pots), Chips(contributed));
    }
}
