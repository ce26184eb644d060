// Rating model constants
pub const INITIAL_RATING: f64 = 1500.0;
pub const ELO_SCALE: f64 = 400.0;
pub const K_BASE: f64 = 32.0;
pub const K_MIN: f64 = 12.0;
pub const K_MAX: f64 = 50.0;
pub const RETIREMENT_K_MULTIPLIER: f64 = 0.5;
// Inactivity decay: kicks in once a player has sat out longer than the
// threshold, compounding per 30-day month (float division, not calendar months)
pub const DECAY_THRESHOLD_DAYS: i64 = 180;
pub const DECAY_RATE: f64 = 0.995;
pub const DECAY_MONTH_DAYS: f64 = 30.0;
// Report-time filters and statistics
pub const REMOVAL_THRESHOLD_DAYS: i64 = 730;
pub const RECENT_FORM_DAYS: i64 = 180;
pub const MATCH_HISTORY_LIMIT: usize = 1000;
pub const OPPONENT_STRENGTH_WINDOW: usize = 50;
pub const OPPONENT_STRENGTH_DECAY: f64 = 0.9;
pub const TOP_TIER_RATING: f64 = 1800.0;
pub const UPPER_TIER_RATING: f64 = 1600.0;
