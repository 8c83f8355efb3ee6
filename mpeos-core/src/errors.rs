use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for improperly defined states and convergence problems.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("{0}")]
    Error(String),
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("Iteration resulted in trivial solution.")]
    TrivialSolution,
    #[error("Invalid composition: {0}.")]
    InvalidComposition(String),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("No physically valid root of the cubic equation of state in {0}.")]
    NoValidRoot(String),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

impl EosError {
    /// Returns `true` for errors that stem from a failed iteration
    /// rather than from invalid input or parameters.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            Self::NotConverged(_) | Self::IterationFailed(_) | Self::TrivialSolution
        )
    }
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;
