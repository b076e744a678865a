use std::collections::HashSet;

/// Expected score of a rated player against one opponent.
#[must_use]
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Pairwise rating update over one showdown: every contender pair is scored
/// as a match, winners take 1 and everyone else 0. Deltas are computed from
/// the pre-showdown snapshot so iteration order cannot matter.
#[must_use]
pub fn update_pairwise(
    contenders: &[(usize, f64)],
    winners: &HashSet<usize>,
    k_factor: f64,
) -> Vec<(usize, f64)> {
    contenders
        .iter()
        .map(|&(seat, rating)| {
            let actual = if winners.contains(&seat) { 1.0 } else { 0.0 };
            let delta: f64 = contenders
                .iter()
                .filter(|&&(other, _)| other != seat)
                .map(|&(_, other_rating)| {
                    k_factor * (actual - expected_score(rating, other_rating))
                })
                .sum();
            (seat, rating + delta)
        })
        .collect()
}
