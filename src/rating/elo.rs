use super::types::{RatingUpdate, RatingValue, Record};
use crate::config::settings::RatingSettings;

// Rating gap at which the favourite is expected to score ten times as often
const SCALE: f64 = 400.0;

/// Probability that a player rated `rating` beats one rated `opponent_rating`.
pub fn expected_score(rating: RatingValue, opponent_rating: RatingValue) -> f64 {
    let gap = opponent_rating.saturating_sub(rating) as f64;
    1.0 / (1.0 + 10f64.powf(gap / SCALE))
}

/// Applies one decided game to both players' records.
///
/// The winner gains `round(K * (1 - E))` points and the loser drops the same
/// amount, where `E` is the winner's expected score. Neither rating ends up
/// below `settings.rating_floor`. Pure and deterministic.
pub fn compute_update(winner: Record, loser: Record, settings: &RatingSettings) -> RatingUpdate {
    let points = rating_points(winner.rating, loser.rating, settings.k_factor);

    RatingUpdate {
        winner: Record {
            rating: clamp_to_floor(winner.rating.saturating_add(points), settings),
            wins: winner.wins.saturating_add(1),
            losses: winner.losses,
        },
        loser: Record {
            rating: clamp_to_floor(loser.rating.saturating_sub(points), settings),
            wins: loser.wins,
            losses: loser.losses.saturating_add(1),
        },
    }
}

fn rating_points(winner_rating: RatingValue, loser_rating: RatingValue, k_factor: f64) -> RatingValue {
    let expected = expected_score(winner_rating, loser_rating);
    let delta = k_factor * (1.0 - expected);
    if delta.is_finite() {
        delta.round() as RatingValue
    } else {
        0
    }
}

fn clamp_to_floor(rating: RatingValue, settings: &RatingSettings) -> RatingValue {
    rating.max(settings.rating_floor)
}
