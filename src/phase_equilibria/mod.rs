//! Vapor-liquid equilibria of mixtures: Rachford-Rice flash, bubble and dew points
//! and phase diagrams built from them.
use crate::density_iteration::{density, DensityInitialization, Phase};
use crate::MultiFluid;
use mpeos_core::EosResult;
use ndarray::Array1;
use std::fmt;

mod bubble_dew;
mod phase_diagram;
pub mod rachford_rice;
mod tp_flash;

pub use bubble_dew::SaturationType;
pub use phase_diagram::PhaseDiagram;
pub use rachford_rice::RachfordRice;

/// Homogeneous state of a mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseState {
    /// Temperature in K
    pub temperature: f64,
    /// Pressure in Pa
    pub pressure: f64,
    /// Molar density in mol/m³
    pub density: f64,
    pub molefracs: Array1<f64>,
}

impl PhaseState {
    /// State at given temperature and pressure, with the density found
    /// from the given initialization.
    pub fn new_tp(
        mixture: &MultiFluid,
        temperature: f64,
        pressure: f64,
        molefracs: &Array1<f64>,
        initialization: DensityInitialization,
    ) -> EosResult<Self> {
        let density = density(mixture, temperature, pressure, molefracs, initialization)?;
        Ok(Self {
            temperature,
            pressure,
            density,
            molefracs: molefracs.clone(),
        })
    }

    /// Logarithmic fugacity coefficients of all components.
    pub fn ln_phi(&self, mixture: &MultiFluid) -> EosResult<Array1<f64>> {
        mixture.ln_phi(self.temperature, self.density, &self.molefracs)
    }

    /// Partial densities in mol/m³.
    pub fn partial_density(&self) -> Array1<f64> {
        &self.molefracs * self.density
    }
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.5} K, p = {:.5} kPa, ρ = {:.5} mol/m³, x = {:.5}",
            self.temperature,
            self.pressure * 1e-3,
            self.density,
            self.molefracs
        )
    }
}

/// A vapor-liquid equilibrium.
///
/// ## Contents
///
/// + [Bubble and dew point calculations](#bubble-and-dew-point-calculations)
/// + [Flash calculations](#flash-calculations)
#[derive(Clone, Debug)]
pub struct PhaseEquilibrium {
    vapor: PhaseState,
    liquid: PhaseState,
    vapor_fraction: f64,
}

impl PhaseEquilibrium {
    pub(crate) fn from_states(vapor: PhaseState, liquid: PhaseState, vapor_fraction: f64) -> Self {
        Self {
            vapor,
            liquid,
            vapor_fraction,
        }
    }

    pub fn vapor(&self) -> &PhaseState {
        &self.vapor
    }

    pub fn liquid(&self) -> &PhaseState {
        &self.liquid
    }

    /// Molar vapor fraction $\beta$.
    pub fn vapor_fraction(&self) -> f64 {
        self.vapor_fraction
    }

    /// Temperature of both phases in K.
    pub fn temperature(&self) -> f64 {
        self.vapor.temperature
    }

    /// Pressure of both phases in Pa.
    pub fn pressure(&self) -> f64 {
        self.vapor.pressure
    }

    /// Check whether both phases have collapsed onto the same state.
    pub(crate) fn is_trivial_solution(&self, tol: f64) -> bool {
        let rho1 = self.vapor.partial_density();
        let rho2 = self.liquid.partial_density();
        rho1.iter()
            .zip(rho2.iter())
            .fold(0.0, |acc: f64, (&r1, &r2)| {
                let ratio = if r1 > 0.0 { r2 / r1 - 1.0 } else { 0.0 };
                acc.max(ratio.abs())
            })
            < tol
    }
}

impl fmt::Display for PhaseEquilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vapor:  {}", self.vapor)?;
        writeln!(f, "liquid: {}", self.liquid)?;
        write!(f, "vapor fraction: {:.8}", self.vapor_fraction)
    }
}

/// Outcome of a flash calculation.
#[derive(Clone, Debug)]
pub enum FlashResult {
    /// The feed is a stable liquid.
    SubcooledLiquid(PhaseState),
    /// The feed is a stable vapor.
    SuperheatedVapor(PhaseState),
    TwoPhase(PhaseEquilibrium),
}

impl FlashResult {
    pub fn is_two_phase(&self) -> bool {
        matches!(self, Self::TwoPhase(_))
    }

    pub fn two_phase(&self) -> Option<&PhaseEquilibrium> {
        match self {
            Self::TwoPhase(vle) => Some(vle),
            _ => None,
        }
    }

    /// Molar vapor fraction, 0 for a liquid and 1 for a vapor.
    pub fn vapor_fraction(&self) -> f64 {
        match self {
            Self::SubcooledLiquid(_) => 0.0,
            Self::SuperheatedVapor(_) => 1.0,
            Self::TwoPhase(vle) => vle.vapor_fraction(),
        }
    }

    pub(crate) fn single_phase(
        mixture: &MultiFluid,
        temperature: f64,
        pressure: f64,
        feed: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<Self> {
        let state = PhaseState::new_tp(
            mixture,
            temperature,
            pressure,
            feed,
            DensityInitialization::Cubic(phase),
        )?;
        Ok(match phase {
            Phase::Liquid => Self::SubcooledLiquid(state),
            Phase::Vapor => Self::SuperheatedVapor(state),
        })
    }
}

impl fmt::Display for FlashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubcooledLiquid(s) => write!(f, "subcooled liquid: {s}"),
            Self::SuperheatedVapor(s) => write!(f, "superheated vapor: {s}"),
            Self::TwoPhase(vle) => write!(f, "{vle}"),
        }
    }
}

/// Logarithmic Wilson K-factors
/// $\ln K_i=\ln\frac{p_{c,i}}{p}+5.373\left(1+\omega_i\right)\left(1-\frac{T_{c,i}}{T}\right)$.
pub(crate) fn wilson_ln_k(mixture: &MultiFluid, temperature: f64, pressure: f64) -> Array1<f64> {
    mixture
        .fluids()
        .iter()
        .map(|f| {
            (f.critical_pressure() / pressure).ln()
                + 5.373 * (1.0 + f.acentric_factor()) * (1.0 - f.critical_temperature() / temperature)
        })
        .collect()
}
