use chrono::NaiveDate;
use serde::Serialize;

use crate::model::structures::match_status::MatchStatus;

/// One row of the deduplicated match table, ordered by date (ties broken by
/// `id`). The surface is kept as the raw label; the model classifies and
/// drops unsupported ones. The free-text comment has already been resolved
/// into a `MatchStatus` by the row mapping.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub id: i32,
    pub date: NaiveDate,
    pub surface: String,
    pub winner_name: String,
    pub loser_name: String,
    pub status: MatchStatus
}

/// Both participants' pre-update view of a match, written back to the match
/// row for downstream consumers. All ratings here are post-decay,
/// pre-result values.
#[derive(Debug, Clone, Serialize)]
pub struct PreMatchStats {
    pub match_id: i32,
    pub winner_overall_rating: f64,
    pub winner_surface_rating: f64,
    pub winner_total_matches: i32,
    pub winner_avg_rating_faced: f64,
    pub loser_overall_rating: f64,
    pub loser_surface_rating: f64,
    pub loser_total_matches: i32,
    pub loser_avg_rating_faced: f64
}
