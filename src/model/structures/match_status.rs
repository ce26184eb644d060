use serde::{Deserialize, Serialize};

/// How a match concluded. Resolved once from the free-text comment column
/// when rows are loaded; the rating model never parses text itself.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStatus {
    #[default]
    Completed,
    Retired,
    Walkover,
    Defaulted
}

impl MatchStatus {
    /// Classifies a raw comment. The upstream data mixes bare labels
    /// ("Retired") with longer free text ("Sousa Retired in 2nd set"),
    /// so containment is checked rather than equality.
    pub fn from_comment(comment: Option<&str>) -> MatchStatus {
        match comment {
            Some(c) if c.contains("Walkover") => MatchStatus::Walkover,
            Some(c) if c.contains("Retired") => MatchStatus::Retired,
            Some(c) if c.contains("Default") => MatchStatus::Defaulted,
            _ => MatchStatus::Completed
        }
    }
}
