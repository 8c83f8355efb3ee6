//! Newton iteration for the density at given temperature, pressure and composition.
use crate::cubic::{CubicInitializer, PR_B};
use crate::MultiFluid;
use mpeos_core::{EosError, EosResult, RGAS};
use ndarray::Array1;

const MAX_ITER: usize = 50;
const REL_TOL: f64 = 1e-12;

/// Fluid phase used to select a density branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Vapor,
}

/// Initial values in a density iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DensityInitialization {
    /// Start from the root of the Peng-Robinson equation of state for the given phase.
    Cubic(Phase),
    /// Start from the given molar density in mol/m³.
    InitialDensity(f64),
}

/// Upper bound of the molar density at which every pure fluid is evaluated within
/// its co-volume in the reduced state of the mixture.
pub fn max_density(mixture: &MultiFluid, x: &Array1<f64>) -> EosResult<f64> {
    let rhor = mixture.reducing_function().reducing_density(x)?;
    Ok(mixture
        .fluids()
        .iter()
        .map(|f| {
            let b = PR_B * RGAS * f.critical_temperature() / f.critical_pressure();
            rhor / (b * f.critical_density())
        })
        .fold(f64::INFINITY, f64::min))
}

/// Molar density in mol/m³ at the given temperature, pressure and composition.
pub fn density(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    x: &Array1<f64>,
    initialization: DensityInitialization,
) -> EosResult<f64> {
    let initial_density = match initialization {
        DensityInitialization::Cubic(phase) => {
            CubicInitializer::new(mixture.fluids()).density(temperature, pressure, x, phase)?
        }
        DensityInitialization::InitialDensity(rho) => rho,
    };
    density_iteration(mixture, temperature, pressure, x, initial_density)
}

/// Solve $p(T,\rho,x)=p$ for the density with Newton's method, starting from
/// `initial_density`. The solution stays on the branch (liquid or vapor) of the
/// initial density relative to the reducing density of the mixture.
pub fn density_iteration(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    x: &Array1<f64>,
    initial_density: f64,
) -> EosResult<f64> {
    if !pressure.is_finite() || pressure <= 0.0 {
        return Err(EosError::InvalidState(
            String::from("density iteration"),
            String::from("pressure"),
            pressure,
        ));
    }
    if !initial_density.is_finite() || initial_density <= 0.0 {
        return Err(EosError::InvalidState(
            String::from("density iteration"),
            String::from("density"),
            initial_density,
        ));
    }
    let maxdensity = max_density(mixture, x)?;
    let liquid = initial_density > mixture.reducing_function().reducing_density(x)?;

    let mut rho = initial_density.min(0.99 * maxdensity);
    for k in 0..MAX_ITER {
        let (mut p, mut dp_drho) = mixture.pressure_and_derivative(temperature, rho, x)?;

        // attempt to correct for poor initial density
        if dp_drho.is_sign_negative() && k == 0 {
            rho = if liquid {
                (1.1 * rho).min(0.99 * maxdensity)
            } else {
                0.05 * rho
            };
            (p, dp_drho) = mixture.pressure_and_derivative(temperature, rho, x)?;
        }

        let error = p - pressure;
        if !error.is_finite() || !dp_drho.is_finite() {
            return Err(EosError::IterationFailed(String::from("density_iteration")));
        }

        // correction for instable region
        if dp_drho.is_sign_negative() {
            rho = if liquid {
                0.5 * (rho + maxdensity)
            } else {
                0.8 * rho
            };
            continue;
        }

        // Newton step
        let mut delta_rho = -error / dp_drho;
        if delta_rho.abs() > 0.075 * maxdensity {
            delta_rho = 0.075 * maxdensity * delta_rho.signum();
        }
        delta_rho = delta_rho.max(-0.95 * rho);
        if rho + delta_rho >= maxdensity {
            delta_rho = 0.5 * (maxdensity - rho);
        }
        rho += delta_rho;

        if delta_rho.abs() < REL_TOL * rho || error.abs() < REL_TOL * pressure {
            return Ok(rho);
        }
    }
    Err(EosError::NotConverged(String::from("density_iteration")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase_equilibria::tests::methane_ethane;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn liquid_and_vapor() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.5, 0.5]);
        let (t, p) = (200.0, 1e6);
        let rho_l = density(&mixture, t, p, &x, DensityInitialization::Cubic(Phase::Liquid))?;
        let rho_v = density(&mixture, t, p, &x, DensityInitialization::Cubic(Phase::Vapor))?;
        assert_relative_eq!(mixture.pressure(t, rho_l, &x)?, p, max_relative = 1e-8);
        assert_relative_eq!(mixture.pressure(t, rho_v, &x)?, p, max_relative = 1e-8);
        assert!(rho_l > rho_v);
        assert!(mixture.dp_drho(t, rho_l, &x)? > 0.0);
        assert!(mixture.dp_drho(t, rho_v, &x)? > 0.0);
        Ok(())
    }

    #[test]
    fn poor_initial_density() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.2, 0.8]);
        let (t, p) = (300.0, 2e5);
        let rho = density_iteration(&mixture, t, p, &x, 500.0)?;
        assert_relative_eq!(mixture.pressure(t, rho, &x)?, p, max_relative = 1e-8);
        assert_relative_eq!(rho, p / (RGAS * t), max_relative = 0.05);
        Ok(())
    }

    #[test]
    fn dln_phi_dt_at_constant_pressure() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.4, 0.6]);
        let (t, p) = (180.0, 1e6);
        let h = 1e-4;
        for init in [Phase::Liquid, Phase::Vapor] {
            let init = DensityInitialization::Cubic(init);
            let rho = density(&mixture, t, p, &x, init)?;
            let rho_p = density_iteration(&mixture, t + h, p, &x, rho)?;
            let rho_m = density_iteration(&mixture, t - h, p, &x, rho)?;
            let fd = (mixture.ln_phi(t + h, rho_p, &x)? - mixture.ln_phi(t - h, rho_m, &x)?)
                / (2.0 * h);
            let dln_phi_dt = mixture.dln_phi_dt(t, rho, &x)?;
            for i in 0..2 {
                assert_relative_eq!(
                    dln_phi_dt[i],
                    fd[i],
                    epsilon = 1e-7,
                    max_relative = 1e-5
                );
            }
        }
        Ok(())
    }

    #[test]
    fn invalid_input() {
        let mixture = methane_ethane();
        let x = arr1(&[0.5, 0.5]);
        assert!(density_iteration(&mixture, 200.0, -1.0, &x, 100.0).is_err());
        assert!(density_iteration(&mixture, 200.0, 1e5, &x, 0.0).is_err());
    }
}
