//! Core traits, parameter handling and numerical building blocks for
//! multi-fluid Helmholtz energy models.
#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

mod errors;
pub mod parameter;
mod pure_fluid;
pub mod root_finding;
mod solver_options;

pub use errors::{EosError, EosResult};
pub use pure_fluid::{PureFluid, ResidualDerivatives, ResidualHelmholtzEnergyDual};
pub use solver_options::{SolverOptions, Verbosity};

/// Molar gas constant in J/(mol K).
pub const RGAS: f64 = 8.314472;
