use tracing::{debug, info};

use crate::{
    database::db_structs::{MatchRecord, PreMatchStats},
    model::{
        error::RatingError,
        rating_tracker::{FacedOpponent, RatingTracker},
        rating_utils::{blended_rating, expected_score, match_k, weighted_opponent_rating},
        structures::{match_status::MatchStatus, surface::Surface},
        decay
    },
    utils::progress_utils::progress_bar
};

/// Everything produced by one full pass over the match stream.
#[derive(Debug, Default)]
pub struct ProcessingResult {
    /// One entry per applied match, in stream order.
    pub pre_match_stats: Vec<PreMatchStats>,
    pub applied: usize,
    pub walkovers: usize,
    pub unsupported_surface: usize
}

enum RecordOutcome {
    Applied(PreMatchStats),
    SkippedWalkover,
    SkippedSurface
}

/// A participant's view of the match before the result is applied:
/// post-decay ratings and pre-match history statistics.
struct ParticipantView {
    overall_rating: f64,
    surface_rating: f64,
    blended_rating: f64,
    total_matches: usize,
    avg_rating_faced: f64
}

/// The rating model. Consumes an ordered stream of match records one at a
/// time and is the only mutator of the tracker it owns.
///
/// Ordering is a correctness precondition, not a performance concern: every
/// update reads the accumulated state of both participants, including decay
/// measured from their previous match, so reordering two matches that share
/// a participant changes the final ratings.
#[derive(Debug, Default)]
pub struct TsrModel {
    pub rating_tracker: RatingTracker
}

impl TsrModel {
    pub fn new() -> TsrModel {
        TsrModel {
            rating_tracker: RatingTracker::new()
        }
    }

    /// Processes the full stream strictly in the given order.
    pub fn process(&mut self, records: &[MatchRecord]) -> ProcessingResult {
        let p_bar = progress_bar(records.len() as u64, "Processing match records".to_string());
        let mut result = ProcessingResult::default();

        for record in records {
            match self.process_record(record) {
                RecordOutcome::Applied(stats) => {
                    result.pre_match_stats.push(stats);
                    result.applied += 1;
                }
                RecordOutcome::SkippedWalkover => result.walkovers += 1,
                RecordOutcome::SkippedSurface => result.unsupported_surface += 1
            }

            if let Some(bar) = &p_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &p_bar {
            bar.finish_with_message("Match processing complete");
        }

        info!(
            applied = result.applied,
            walkovers = result.walkovers,
            unsupported_surface = result.unsupported_surface,
            players = self.rating_tracker.player_count(),
            "Processed {} match records",
            records.len()
        );

        result
    }

    /// Applies a single match. Skips happen before any player state is
    /// created or touched, so a skipped record is a strict no-op.
    fn process_record(&mut self, record: &MatchRecord) -> RecordOutcome {
        let surface = match Surface::try_from(record.surface.as_str()) {
            Ok(surface) => surface,
            Err(()) => {
                let reason = RatingError::UnsupportedSurface(record.surface.clone());
                debug!(match_id = record.id, "Skipping match: {reason}");
                return RecordOutcome::SkippedSurface;
            }
        };

        if record.status == MatchStatus::Walkover {
            debug!(match_id = record.id, "Skipping walkover");
            return RecordOutcome::SkippedWalkover;
        }

        let winner = self.participant_view(&record.winner_name, surface, record);
        let loser = self.participant_view(&record.loser_name, surface, record);

        let expected_winner = expected_score(winner.blended_rating, loser.blended_rating);
        let expected_loser = 1.0 - expected_winner;

        let k_winner = match_k(winner.total_matches, record.status);
        let k_loser = match_k(loser.total_matches, record.status);

        // The same blended expectation drives both the overall and the
        // surface rating update.
        let winner_delta = k_winner * (1.0 - expected_winner);
        let loser_delta = k_loser * (0.0 - expected_loser);

        self.apply_result(&record.winner_name, surface, record, winner_delta, loser.overall_rating, true);
        self.apply_result(&record.loser_name, surface, record, loser_delta, winner.overall_rating, false);

        RecordOutcome::Applied(PreMatchStats {
            match_id: record.id,
            winner_overall_rating: winner.overall_rating,
            winner_surface_rating: winner.surface_rating,
            winner_total_matches: winner.total_matches as i32,
            winner_avg_rating_faced: winner.avg_rating_faced,
            loser_overall_rating: loser.overall_rating,
            loser_surface_rating: loser.surface_rating,
            loser_total_matches: loser.total_matches as i32,
            loser_avg_rating_faced: loser.avg_rating_faced
        })
    }

    /// Creates the participant if needed, applies decay, and captures the
    /// post-decay, pre-update view used for the probability computation and
    /// the persisted pre-match stats.
    fn participant_view(&mut self, name: &str, surface: Surface, record: &MatchRecord) -> ParticipantView {
        let state = self.rating_tracker.get_or_create(name, surface, record.date);
        decay::apply_decay(state, record.date);

        let overall_rating = state.overall_rating;
        let surface_rating = state.surface_rating(surface);
        let total_matches = state.total_matches();
        let surface_matches = state.surface_matches(surface);

        ParticipantView {
            overall_rating,
            surface_rating,
            blended_rating: blended_rating(overall_rating, surface_rating, total_matches, surface_matches),
            total_matches,
            avg_rating_faced: weighted_opponent_rating(&state.history)
        }
    }

    /// Mutates one participant with the match outcome: rating deltas,
    /// history append, and activity date.
    fn apply_result(
        &mut self,
        name: &str,
        surface: Surface,
        record: &MatchRecord,
        delta: f64,
        opponent_rating: f64,
        won: bool
    ) {
        let state = self
            .rating_tracker
            .get_mut(name)
            .expect("participant was created earlier in this match");

        state.apply_delta(surface, delta);
        state.record_result(FacedOpponent {
            opponent_rating,
            surface,
            date: record.date,
            won
        });
        state.last_active = record.date;
    }
}
