use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// Raised when a player is looked up before any of their matches have
    /// been processed. Inside the model this indicates a logic bug, not a
    /// data condition.
    #[error("No rating state exists for player '{0}'")]
    PlayerNotFound(String),

    /// The match carried a surface label outside the supported set.
    /// Recovered by dropping the event and counting it.
    #[error("Unsupported surface '{0}'")]
    UnsupportedSurface(String)
}
