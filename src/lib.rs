//! Multi-fluid Helmholtz energy models for mixtures and the vapor-liquid
//! equilibrium solvers built on them.
//!
//! A [MultiFluid] combines pure fluid equations of state (any type implementing
//! [PureFluid]) with a reducing function and binary departure functions. Phase
//! equilibria are calculated with [PhaseEquilibrium::tp_flash] and
//! [PhaseEquilibrium::saturation_point].
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod cubic;
pub mod density_iteration;
pub mod fluids;
pub mod mixture;
pub mod phase_equilibria;

pub use mixture::{BinaryParameters, MultiFluid};
pub use mpeos_core::parameter::{Identifier, IdentifierOption, ParameterError, PureRecord};
pub use mpeos_core::{EosError, EosResult, PureFluid, SolverOptions, Verbosity, RGAS};
pub use phase_equilibria::{
    FlashResult, PhaseDiagram, PhaseEquilibrium, PhaseState, SaturationType,
};
