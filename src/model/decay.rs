use chrono::NaiveDate;

use crate::model::{
    constants::{DECAY_MONTH_DAYS, DECAY_RATE, DECAY_THRESHOLD_DAYS},
    rating_tracker::PlayerState
};

/// # How decay works
/// - A player who has not played for more than `DECAY_THRESHOLD_DAYS` has
///   their ratings shrunk multiplicatively before they are next read.
/// - The shrink factor compounds per 30-day "month" of inactivity:
///   `DECAY_RATE ^ (days_inactive / 30)`. The division is float division,
///   deliberately not calendar months.
/// - Decay is applied to the overall rating and every surface rating the
///   player has an entry for. Surfaces the player has never appeared on stay
///   unpopulated and are unaffected.
///
/// Decay runs in exactly two places: on both participants of a match before
/// their ratings are read, and (on copies) when a terminal snapshot is
/// exported. There is no rating floor; a dormant rating can shrink
/// arbitrarily close to zero.
pub fn decay_factor(days_inactive: i64) -> Option<f64> {
    if days_inactive <= DECAY_THRESHOLD_DAYS {
        return None;
    }

    let months_inactive = days_inactive as f64 / DECAY_MONTH_DAYS;
    Some(DECAY_RATE.powf(months_inactive))
}

/// Applies inactivity decay to a player's ratings in place. Returns whether
/// decay fired. `last_active` and the match history are never touched here.
pub fn apply_decay(state: &mut PlayerState, as_of: NaiveDate) -> bool {
    let days_inactive = (as_of - state.last_active).num_days();

    match decay_factor(days_inactive) {
        Some(factor) => {
            state.overall_rating *= factor;
            for rating in state.surface_ratings.values_mut() {
                *rating *= factor;
            }
            true
        }
        None => false
    }
}
