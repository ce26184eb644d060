use std::collections::{HashMap, VecDeque};

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::model::{
    constants::{RECENT_FORM_DAYS, REMOVAL_THRESHOLD_DAYS, TOP_TIER_RATING, UPPER_TIER_RATING},
    decay,
    rating_tracker::{FacedOpponent, PlayerState, RatingTracker},
    rating_utils::weighted_opponent_rating,
    structures::surface::Surface
};

/// One row of the terminal per-player report.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    /// Decayed to `as_of`.
    pub overall_rating: f64,
    /// Fully populated: surfaces the player never appeared on carry the
    /// (decayed) overall rating.
    pub surface_ratings: HashMap<Surface, f64>,
    pub last_active: NaiveDate,
    pub matches_last_six_months: usize,
    /// Length of the bounded history window, not a lifetime count.
    pub career_matches: usize,
    pub avg_rating_faced: f64,
    pub top_tier_matches: usize,
    pub top_tier_win_rate: f64,
    pub upper_tier_matches: usize,
    pub upper_tier_win_rate: f64
}

impl PlayerSnapshot {
    pub fn surface_rating(&self, surface: Surface) -> f64 {
        self.surface_ratings
            .get(&surface)
            .copied()
            .unwrap_or(self.overall_rating)
    }
}

/// Produces the terminal report rows for every player still active within
/// the removal threshold, with ratings decayed to `as_of`.
///
/// Decay is computed on clones: the streaming model only decays players when
/// they actually play, so a terminal report must bring dormant players
/// current too, but the live tracker is never mutated here. Exporting twice
/// in a row yields identical rows.
///
/// Rows are computed in parallel (the tracker is frozen for the duration)
/// and sorted by overall rating descending, name ascending on ties.
pub fn player_snapshots(tracker: &RatingTracker, as_of: NaiveDate) -> Vec<PlayerSnapshot> {
    let players: Vec<(&String, &PlayerState)> = tracker.iter().collect();

    let mut snapshots: Vec<PlayerSnapshot> = players
        .par_iter()
        .filter_map(|(name, state)| snapshot_player(name, state, as_of))
        .collect();

    snapshots.sort_by(|a, b| {
        b.overall_rating
            .partial_cmp(&a.overall_rating)
            .unwrap()
            .then_with(|| a.name.cmp(&b.name))
    });

    snapshots
}

fn snapshot_player(name: &str, state: &PlayerState, as_of: NaiveDate) -> Option<PlayerSnapshot> {
    if (as_of - state.last_active).num_days() > REMOVAL_THRESHOLD_DAYS {
        return None;
    }

    let mut state = state.clone();
    decay::apply_decay(&mut state, as_of);

    let six_months_ago = as_of - Duration::days(RECENT_FORM_DAYS);
    let matches_last_six_months = state.history.iter().filter(|f| f.date > six_months_ago).count();

    let (top_tier_matches, top_tier_win_rate) = tier_record(&state.history, TOP_TIER_RATING);
    let (upper_tier_matches, upper_tier_win_rate) = tier_record(&state.history, UPPER_TIER_RATING);

    Some(PlayerSnapshot {
        name: name.to_string(),
        overall_rating: state.overall_rating,
        surface_ratings: Surface::iter().map(|s| (s, state.surface_rating(s))).collect(),
        last_active: state.last_active,
        matches_last_six_months,
        career_matches: state.total_matches(),
        avg_rating_faced: weighted_opponent_rating(&state.history),
        top_tier_matches,
        top_tier_win_rate,
        upper_tier_matches,
        upper_tier_win_rate
    })
}

/// Matches played against opponents at or above the threshold (judged by the
/// opponent rating stored at match time) and the win rate within that
/// subset. Zero matches yields a zero win rate, not an error.
fn tier_record(history: &VecDeque<FacedOpponent>, threshold: f64) -> (usize, f64) {
    let played = history.iter().filter(|f| f.opponent_rating >= threshold).count();
    if played == 0 {
        return (0, 0.0);
    }

    let won = history
        .iter()
        .filter(|f| f.opponent_rating >= threshold && f.won)
        .count();

    (played, won as f64 / played as f64)
}
