use super::{PhaseEquilibrium, PhaseState, SaturationType};
use crate::MultiFluid;
use mpeos_core::{EosError, EosResult, SolverOptions};
use ndarray::{arr1, Array1};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

const DEFAULT_POINTS: usize = 51;

/// Collection of phase equilibria of a mixture.
#[derive(Clone, Debug)]
pub struct PhaseDiagram {
    pub states: Vec<PhaseEquilibrium>,
}

impl PhaseDiagram {
    /// Create a phase diagram from a list of phase equilibria.
    pub fn new(states: Vec<PhaseEquilibrium>) -> Self {
        Self { states }
    }

    /// Temperature-composition diagram of a binary mixture at given pressure.
    ///
    /// The states contain the bubble points on an evenly spaced grid of liquid
    /// mole fractions of the first component, followed by the dew points on the
    /// same grid of vapor mole fractions in reversed order. Points that do not
    /// converge are skipped.
    pub fn binary_vle(
        mixture: &MultiFluid,
        pressure: f64,
        npoints: Option<usize>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        let states = binary_grid(mixture, npoints)?
            .into_iter()
            .filter_map(|(saturation_type, x0)| {
                saturation_point(mixture, saturation_type, pressure, x0, options)
            })
            .collect();
        Ok(Self::new(states))
    }

    /// Parallel version of [PhaseDiagram::binary_vle].
    #[cfg(feature = "rayon")]
    pub fn par_binary_vle(
        mixture: &MultiFluid,
        pressure: f64,
        npoints: Option<usize>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        let states = binary_grid(mixture, npoints)?
            .into_par_iter()
            .filter_map(|(saturation_type, x0)| {
                saturation_point(mixture, saturation_type, pressure, x0, options)
            })
            .collect();
        Ok(Self::new(states))
    }

    /// Bubble points of a fixed liquid composition on a geometric pressure grid
    /// from `min_pressure` in steps of `factor`, up to `max_pressure` or the
    /// first pressure at which the calculation does not converge.
    pub fn bubble_point_line(
        mixture: &MultiFluid,
        liquid_molefracs: &Array1<f64>,
        min_pressure: f64,
        max_pressure: f64,
        factor: f64,
        options: SolverOptions,
    ) -> EosResult<Self> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(EosError::Error(format!(
                "pressure factor has to be larger than 1, got {factor}"
            )));
        }
        if !min_pressure.is_finite() || min_pressure <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("bubble point line"),
                String::from("pressure"),
                min_pressure,
            ));
        }
        mixture.validate_molefracs(liquid_molefracs)?;

        let mut states = Vec::new();
        let mut pressure = min_pressure;
        while pressure <= max_pressure {
            match PhaseEquilibrium::bubble_point(mixture, pressure, liquid_molefracs, options) {
                Ok(vle) => states.push(vle),
                Err(e) if e.is_convergence_failure() || matches!(e, EosError::NoValidRoot(_)) => {
                    break
                }
                Err(e) => return Err(e),
            }
            pressure *= factor;
        }
        Ok(Self::new(states))
    }

    /// Return the vapor states of the diagram.
    pub fn vapor(&self) -> Vec<&PhaseState> {
        self.states.iter().map(|s| s.vapor()).collect()
    }

    /// Return the liquid states of the diagram.
    pub fn liquid(&self) -> Vec<&PhaseState> {
        self.states.iter().map(|s| s.liquid()).collect()
    }

    /// Temperatures of all states in K.
    pub fn temperature(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.temperature()).collect()
    }
}

/// Bubble points on a grid of liquid compositions followed by dew points
/// on the reversed grid of vapor compositions.
fn binary_grid(
    mixture: &MultiFluid,
    npoints: Option<usize>,
) -> EosResult<Vec<(SaturationType, f64)>> {
    if mixture.components() != 2 {
        return Err(EosError::Error(format!(
            "a binary phase diagram needs 2 components, got {}",
            mixture.components()
        )));
    }
    let x = Array1::linspace(0.0, 1.0, npoints.unwrap_or(DEFAULT_POINTS));
    Ok(x.iter()
        .map(|&x0| (SaturationType::Bubble, x0))
        .chain(x.iter().rev().map(|&y0| (SaturationType::Dew, y0)))
        .collect())
}

fn saturation_point(
    mixture: &MultiFluid,
    saturation_type: SaturationType,
    pressure: f64,
    x0: f64,
    options: SolverOptions,
) -> Option<PhaseEquilibrium> {
    let feed = arr1(&[x0, 1.0 - x0]);
    PhaseEquilibrium::saturation_point(mixture, saturation_type, pressure, &feed, options).ok()
}
