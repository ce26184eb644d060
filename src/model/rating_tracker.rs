use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{
    constants::{INITIAL_RATING, MATCH_HISTORY_LIMIT},
    error::RatingError,
    structures::surface::Surface
};

/// One entry of a player's bounded match history: who they faced and how
/// strong that opponent was going into the match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacedOpponent {
    /// The opponent's overall rating *before* the match result was applied
    /// (decay already applied).
    pub opponent_rating: f64,
    pub surface: Surface,
    pub date: NaiveDate,
    pub won: bool
}

/// All mutable rating state for a single player. Created lazily on first
/// appearance in the match stream, never removed while streaming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    pub overall_rating: f64,
    /// Lazily populated: a surface gets an entry the first time the player
    /// appears on it.
    pub surface_ratings: HashMap<Surface, f64>,
    pub last_active: NaiveDate,
    /// Sliding window of the most recent MATCH_HISTORY_LIMIT matches,
    /// oldest evicted first.
    pub history: VecDeque<FacedOpponent>
}

impl PlayerState {
    pub fn new(as_of: NaiveDate) -> PlayerState {
        PlayerState {
            overall_rating: INITIAL_RATING,
            surface_ratings: HashMap::new(),
            last_active: as_of,
            history: VecDeque::new()
        }
    }

    pub fn total_matches(&self) -> usize {
        self.history.len()
    }

    pub fn surface_matches(&self, surface: Surface) -> usize {
        self.history.iter().filter(|f| f.surface == surface).count()
    }

    /// The player's rating on the given surface, falling back to the overall
    /// rating for surfaces they have never played on.
    pub fn surface_rating(&self, surface: Surface) -> f64 {
        self.surface_ratings
            .get(&surface)
            .copied()
            .unwrap_or(self.overall_rating)
    }

    /// Adds a match result delta to the overall rating and the rating of the
    /// surface it was played on.
    pub fn apply_delta(&mut self, surface: Surface, delta: f64) {
        self.overall_rating += delta;
        *self.surface_ratings.entry(surface).or_insert(INITIAL_RATING) += delta;
    }

    /// Appends a faced opponent, evicting the oldest entry once the history
    /// window is full.
    pub fn record_result(&mut self, faced: FacedOpponent) {
        self.history.push_back(faced);
        if self.history.len() > MATCH_HISTORY_LIMIT {
            self.history.pop_front();
        }
    }
}

/// Owns every player's rating state, keyed by the player's (case-sensitive)
/// name. Insertion order is first appearance in the stream, which keeps
/// iteration deterministic across replays.
///
/// The tracker never mutates state on its own; all rating changes are driven
/// explicitly by the model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingTracker {
    players: IndexMap<String, PlayerState>
}

impl RatingTracker {
    pub fn new() -> RatingTracker {
        RatingTracker {
            players: IndexMap::new()
        }
    }

    /// Returns the player's state, creating it with default ratings and
    /// `last_active = as_of` on first appearance. The surface rating for
    /// `surface` is lazily initialized in the same call.
    pub fn get_or_create(&mut self, name: &str, surface: Surface, as_of: NaiveDate) -> &mut PlayerState {
        let state = self
            .players
            .entry(name.to_string())
            .or_insert_with(|| PlayerState::new(as_of));

        state.surface_ratings.entry(surface).or_insert(INITIAL_RATING);
        state
    }

    pub fn get(&self, name: &str) -> Result<&PlayerState, RatingError> {
        self.players
            .get(name)
            .ok_or_else(|| RatingError::PlayerNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut PlayerState, RatingError> {
        self.players
            .get_mut(name)
            .ok_or_else(|| RatingError::PlayerNotFound(name.to_string()))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PlayerState)> {
        self.players.iter()
    }
}
