use std::collections::VecDeque;

use crate::model::{
    constants::{
        ELO_SCALE, K_BASE, K_MAX, K_MIN, OPPONENT_STRENGTH_DECAY, OPPONENT_STRENGTH_WINDOW, RETIREMENT_K_MULTIPLIER
    },
    rating_tracker::FacedOpponent,
    structures::match_status::MatchStatus
};

/// Probability that a player with rating `rating_a` beats one with
/// `rating_b` under the Elo logistic curve.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / ELO_SCALE))
}

/// Experience-adjusted learning rate: new players swing by up to `K_BASE`
/// points per match, and the swing shrinks as their history grows.
/// `matches_played` is counted before the current match is appended.
pub fn dynamic_k(matches_played: usize) -> f64 {
    (K_BASE / (1.0 + 0.1 * matches_played as f64)).clamp(K_MIN, K_MAX)
}

/// The K-factor actually used for a match: the dynamic K, halved when the
/// match ended in a retirement. Walkovers are skipped before rating math
/// ever runs, so they never reach this function.
pub fn match_k(matches_played: usize, status: MatchStatus) -> f64 {
    let k = dynamic_k(matches_played);
    match status {
        MatchStatus::Retired => k * RETIREMENT_K_MULTIPLIER,
        _ => k
    }
}

/// Blends a player's overall and surface rating into one effective strength,
/// trusting the surface rating more as the share of their record on that
/// surface grows. `ln` compresses the weight so a handful of surface matches
/// cannot overwhelm a long overall record.
///
/// A player with no history at all gets their overall rating back unchanged,
/// which also guards the zero denominator.
pub fn blended_rating(overall: f64, surface_rating: f64, total_matches: usize, surface_matches: usize) -> f64 {
    if total_matches == 0 {
        return overall;
    }

    let surface_weight = (1.0 + surface_matches as f64).ln() / (1.0 + total_matches as f64).ln();
    surface_weight * surface_rating + (1.0 - surface_weight) * overall
}

/// Recency-weighted average strength of the opponents a player has faced:
/// the most recent `OPPONENT_STRENGTH_WINDOW` history entries, each weighted
/// `0.9^i` for the i-th most recent. Returns 0 for an empty history.
///
/// Purely a read-side statistic; it never feeds back into rating updates.
pub fn weighted_opponent_rating(history: &VecDeque<FacedOpponent>) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut weight = 1.0;

    for faced in history.iter().rev().take(OPPONENT_STRENGTH_WINDOW) {
        weighted_sum += faced.opponent_rating * weight;
        total_weight += weight;
        weight *= OPPONENT_STRENGTH_DECAY;
    }

    weighted_sum / total_weight
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use approx::assert_abs_diff_eq;

    use crate::{
        model::{
            constants::{K_BASE, K_MAX, K_MIN, OPPONENT_STRENGTH_WINDOW},
            rating_utils::{blended_rating, dynamic_k, expected_score, match_k, weighted_opponent_rating},
            structures::{match_status::MatchStatus, surface::Surface}
        },
        utils::test_utils::{generate_faced_opponent, test_date}
    };

    #[test]
    fn test_expected_score_equal_ratings() {
        assert_abs_diff_eq!(expected_score(1500.0, 1500.0), 0.5);
    }

    #[test]
    fn test_expected_score_complements_sum_to_one() {
        let e_a = expected_score(1600.0, 1450.0);
        let e_b = expected_score(1450.0, 1600.0);

        assert!(e_a > 0.5);
        assert_abs_diff_eq!(e_a + e_b, 1.0);
    }

    #[test]
    fn test_expected_score_400_point_gap() {
        // A 400-point favorite wins 10 times out of 11
        assert_abs_diff_eq!(expected_score(1900.0, 1500.0), 10.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dynamic_k_new_player() {
        assert_abs_diff_eq!(dynamic_k(0), K_BASE);
    }

    #[test]
    fn test_dynamic_k_decreases_with_experience() {
        assert_abs_diff_eq!(dynamic_k(10), K_BASE / 2.0);
        assert!(dynamic_k(50) < dynamic_k(10));
    }

    #[test]
    fn test_dynamic_k_bounds() {
        for matches_played in [0, 1, 5, 10, 100, 1000, 10_000] {
            let k = dynamic_k(matches_played);
            assert!(k >= K_MIN);
            assert!(k <= K_MAX);
        }
        // A long career bottoms out at the floor
        assert_abs_diff_eq!(dynamic_k(1000), K_MIN);
    }

    #[test]
    fn test_match_k_retirement_halves() {
        assert_abs_diff_eq!(match_k(0, MatchStatus::Retired), K_BASE / 2.0);
        assert_abs_diff_eq!(match_k(0, MatchStatus::Completed), K_BASE);
        // A default is rated as completed play
        assert_abs_diff_eq!(match_k(0, MatchStatus::Defaulted), K_BASE);
    }

    #[test]
    fn test_blend_no_history_returns_overall() {
        assert_abs_diff_eq!(blended_rating(1500.0, 1800.0, 0, 0), 1500.0);
        assert_abs_diff_eq!(blended_rating(1234.5, 999.0, 0, 0), 1234.5);
    }

    #[test]
    fn test_blend_all_matches_on_surface_returns_surface() {
        assert_abs_diff_eq!(blended_rating(1500.0, 1700.0, 20, 20), 1700.0);
    }

    #[test]
    fn test_blend_no_surface_matches_returns_overall() {
        assert_abs_diff_eq!(blended_rating(1500.0, 1700.0, 20, 0), 1500.0);
    }

    #[test]
    fn test_blend_partial_surface_experience() {
        let blended = blended_rating(1500.0, 1700.0, 20, 5);
        let weight = 6f64.ln() / 21f64.ln();

        assert_abs_diff_eq!(blended, weight * 1700.0 + (1.0 - weight) * 1500.0);
        assert!(blended > 1500.0);
        assert!(blended < 1700.0);
    }

    #[test]
    fn test_weighted_opponent_rating_empty_history() {
        assert_eq!(weighted_opponent_rating(&VecDeque::new()), 0.0);
    }

    #[test]
    fn test_weighted_opponent_rating_single_entry() {
        let mut history = VecDeque::new();
        history.push_back(generate_faced_opponent(1725.0, Surface::Hard, test_date(2020, 1, 1), true));

        assert_abs_diff_eq!(weighted_opponent_rating(&history), 1725.0);
    }

    #[test]
    fn test_weighted_opponent_rating_biases_recent() {
        let date = test_date(2020, 1, 1);
        let mut history = VecDeque::new();
        history.push_back(generate_faced_opponent(1400.0, Surface::Hard, date, true));
        history.push_back(generate_faced_opponent(1600.0, Surface::Hard, date, false));

        // Most recent (1600) carries weight 1.0, the older entry 0.9
        let expected = (1600.0 + 1400.0 * 0.9) / 1.9;
        assert_abs_diff_eq!(weighted_opponent_rating(&history), expected);
    }

    #[test]
    fn test_weighted_opponent_rating_window_cap() {
        let date = test_date(2020, 1, 1);
        let mut history = VecDeque::new();
        // Entries beyond the window are all outliers; they must not register
        for _ in 0..100 {
            history.push_back(generate_faced_opponent(9999.0, Surface::Hard, date, true));
        }
        for _ in 0..OPPONENT_STRENGTH_WINDOW {
            history.push_back(generate_faced_opponent(1500.0, Surface::Hard, date, true));
        }

        assert_abs_diff_eq!(weighted_opponent_rating(&history), 1500.0, epsilon = 1e-9);
    }
}
