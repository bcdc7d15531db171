//!
//! Error types for model construction, decoding and sampling
//!
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;

///
/// Failure modes of the decoder and its collaborators.
///
/// A missing table entry is a configuration defect of the caller,
/// distinct from an entry that is present with probability zero
/// (an impossible event with infinite cost).
///
#[derive(Debug, Error)]
pub enum HmmError {
    /// The model was given no states.
    #[error("state set is empty")]
    EmptyStates,

    /// The observation sequence (or requested sample length) is empty.
    #[error("observation sequence is empty")]
    EmptyObservations,

    /// The scorer was given sequences of different lengths.
    #[error("sequence length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// No prior probability entry for a state.
    #[error("no prior probability for state {0}")]
    MissingPrior(String),

    /// No transition probability entry for a state pair.
    #[error("no transition probability for {0} -> {1}")]
    MissingTransition(String, String),

    /// No emission probability entry for a (state, observation) pair.
    #[error("no emission probability for {1} in state {0}")]
    MissingEmission(String, String),

    /// A state has no emission table at all.
    #[error("no emission table for state {0}")]
    MissingEmissionRow(String),

    /// Every complete path has probability zero.
    #[error("model admits no feasible path for the observation sequence")]
    NoFeasiblePath,

    /// The sampler hit a distribution whose weights are all zero.
    #[error("cannot sample from all-zero {0} distribution")]
    DegenerateDistribution(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
