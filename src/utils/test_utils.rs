use chrono::{Duration, NaiveDate};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

use crate::{
    database::db_structs::MatchRecord,
    model::{
        rating_tracker::FacedOpponent,
        structures::{match_status::MatchStatus, surface::Surface}
    }
};

pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn generate_faced_opponent(opponent_rating: f64, surface: Surface, date: NaiveDate, won: bool) -> FacedOpponent {
    FacedOpponent {
        opponent_rating,
        surface,
        date,
        won
    }
}

pub fn generate_match_record(
    id: i32,
    date: NaiveDate,
    surface: &str,
    winner_name: &str,
    loser_name: &str,
    status: MatchStatus
) -> MatchRecord {
    MatchRecord {
        id,
        date,
        surface: surface.to_string(),
        winner_name: winner_name.to_string(),
        loser_name: loser_name.to_string(),
        status
    }
}

pub fn generate_player_names(n: i32) -> Vec<String> {
    (1..=n).map(|i| format!("Player {i}")).collect_vec()
}

/// Generates `n` date-ordered match records between random pairs of the
/// given players, with an occasional retirement mixed in. Seeded RNG for
/// reproducible results.
pub fn generate_match_records(n: i32, player_names: &[String]) -> Vec<MatchRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let surfaces = Surface::iter().collect_vec();
    let start = test_date(2015, 1, 5);

    let mut records = Vec::with_capacity(n as usize);
    for i in 0..n {
        let winner = rng.random_range(0..player_names.len());
        let mut loser = rng.random_range(0..player_names.len());
        if loser == winner {
            loser = (loser + 1) % player_names.len();
        }

        let status = if rng.random_range(0..20) == 0 {
            MatchStatus::Retired
        } else {
            MatchStatus::Completed
        };

        records.push(MatchRecord {
            id: i,
            date: start + Duration::days((i / 4) as i64),
            surface: surfaces[rng.random_range(0..surfaces.len())].to_string(),
            winner_name: player_names[winner].clone(),
            loser_name: player_names[loser].clone(),
            status
        });
    }

    records
}
