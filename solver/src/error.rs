use thiserror::Error;

/// Everything that can abort a discovery attempt.
///
/// A rejected guess is not represented here; see `AttemptOutcome`.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Transport or protocol failure reported by the oracle client.
    #[error(transparent)]
    Oracle(#[from] anyhow::Error),

    #[error("oracle returned {results} results for {plans} plans")]
    ResultCountMismatch { plans: usize, results: usize },

    #[error("result {index} has {observed} labels, expected {expected}")]
    ResultLengthMismatch {
        index: usize,
        expected: usize,
        observed: usize,
    },

    #[error("discovered more than the expected {expected} rooms")]
    TooManyRooms { expected: usize },

    #[error("only {discovered} of {expected} rooms were discovered")]
    RoomsExhausted { discovered: usize, expected: usize },

    #[error("room {room} door {door} leads to room {target} but no matching door leads back")]
    InconsistentAdjacency {
        room: usize,
        door: usize,
        target: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no guess accepted after {0} attempts")]
    AttemptsExhausted(usize),
}

pub type Result<T> = std::result::Result<T, SolveError>;
