use super::tp_flash::phase_states;
use super::{wilson_ln_k, PhaseEquilibrium};
use crate::MultiFluid;
use mpeos_core::root_finding::secant;
use mpeos_core::{log_iter, log_result, EosError, EosResult, SolverOptions};
use ndarray::Array1;
use std::fmt;

const MAX_ITER_SAT: usize = 50;
const TOL_SAT: f64 = 1e-8;
const MAX_TSTEP: f64 = 20.0;
const TRIVIAL_TOL: f64 = 1e-5;

const MAX_ITER_INIT: usize = 100;
const TOL_INIT: f64 = 1e-10;
const DT_INIT: f64 = 1e-3;

/// Type of a saturation point calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaturationType {
    /// The feed is the liquid phase, the incipient phase is a vapor.
    Bubble,
    /// The feed is the vapor phase, the incipient phase is a liquid.
    Dew,
}

impl fmt::Display for SaturationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bubble => write!(f, "bubble point"),
            Self::Dew => write!(f, "dew point"),
        }
    }
}

impl SaturationType {
    /// Residual of the saturation condition for given K-factors.
    fn residual(&self, feed: &Array1<f64>, k: &Array1<f64>) -> f64 {
        match self {
            Self::Bubble => (feed * &(k - 1.0)).sum(),
            Self::Dew => (feed * &(1.0 - &k.mapv(f64::recip))).sum(),
        }
    }

    /// Temperature derivative of the residual from the logarithmic
    /// temperature derivatives of the K-factors.
    fn residual_derivative(
        &self,
        feed: &Array1<f64>,
        k: &Array1<f64>,
        dln_k_dt: &Array1<f64>,
    ) -> f64 {
        match self {
            Self::Bubble => (feed * k * dln_k_dt).sum(),
            Self::Dew => (feed / k * dln_k_dt).sum(),
        }
    }

    /// Normalized composition of the incipient phase.
    fn incipient_composition(&self, feed: &Array1<f64>, k: &Array1<f64>) -> Array1<f64> {
        let w = match self {
            Self::Bubble => feed * k,
            Self::Dew => feed / k,
        };
        let sum = w.sum();
        w / sum
    }
}

/// # Bubble and dew point calculations
impl PhaseEquilibrium {
    /// Calculate the bubble or dew point temperature of a mixture at given pressure.
    ///
    /// The temperature is found with Newton's method on $\sum_iz_i(K_i-1)$ (bubble point)
    /// or $\sum_iz_i(1-1/K_i)$ (dew point), with the composition of the incipient phase
    /// updated by successive substitution. Initial values are obtained from
    /// Wilson K-factors.
    ///
    /// The calculation is converged if the residual is within the tolerance and
    /// no incipient mole fraction changes by more than the tolerance in the last step.
    pub fn saturation_point(
        mixture: &MultiFluid,
        saturation_type: SaturationType,
        pressure: f64,
        feed: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        mixture.validate_molefracs(feed)?;
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(EosError::InvalidState(
                format!("{saturation_type}"),
                String::from("pressure"),
                pressure,
            ));
        }

        // set options
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_SAT, TOL_SAT);

        // initialization
        let mut temperature = starting_temperature(mixture, saturation_type, pressure, feed)?;
        let k = wilson_ln_k(mixture, temperature, pressure).mapv(f64::exp);
        let mut incipient = saturation_type.incipient_composition(feed, &k);

        log_iter!(
            verbosity,
            " iter |    residual    |  temperature   |  incipient mole fractions  "
        );
        log_iter!(verbosity, "{:-<70}", "");
        log_iter!(
            verbosity,
            " {:4} |                | {:12.8} K | {:.8}",
            0,
            temperature,
            incipient
        );

        let mut densities = None;
        for iter in 1..=max_iter {
            let (x, y) = match saturation_type {
                SaturationType::Bubble => (feed, &incipient),
                SaturationType::Dew => (&incipient, feed),
            };
            let (vapor, liquid) = phase_states(mixture, temperature, pressure, x, y, densities)?;
            densities = Some((vapor.density, liquid.density));
            let vapor_fraction = match saturation_type {
                SaturationType::Bubble => 0.0,
                SaturationType::Dew => 1.0,
            };
            let vle = PhaseEquilibrium::from_states(vapor, liquid, vapor_fraction);
            if vle.is_trivial_solution(TRIVIAL_TOL) {
                log_result!(verbosity, "{}: trivial solution in step {}\n", saturation_type, iter);
                return Err(EosError::TrivialSolution);
            }

            let phi_l = mixture.fugacity_coefficients(
                temperature,
                vle.liquid().density,
                &vle.liquid().molefracs,
            )?;
            let phi_v = mixture.fugacity_coefficients(
                temperature,
                vle.vapor().density,
                &vle.vapor().molefracs,
            )?;
            let k = (&phi_l.ln_phi - &phi_v.ln_phi).mapv(f64::exp);
            let dln_k_dt = &phi_l.dln_phi_dt - &phi_v.dln_phi_dt;
            let f = saturation_type.residual(feed, &k);
            let df_dt = saturation_type.residual_derivative(feed, &k, &dln_k_dt);
            if !f.is_finite() || !df_dt.is_finite() || df_dt == 0.0 {
                return Err(EosError::IterationFailed(format!("{saturation_type}")));
            }

            let new_incipient = saturation_type.incipient_composition(feed, &k);
            let dx = (&new_incipient - &incipient).fold(0.0, |acc: f64, d| acc.max(d.abs()));
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:12.8} K | {:.8}",
                iter,
                f,
                temperature,
                incipient
            );
            if f.abs() <= tol && dx <= tol {
                log_result!(
                    verbosity,
                    "{}: calculation converged in {} step(s)\n",
                    saturation_type,
                    iter
                );
                return Ok(vle);
            }

            // Newton step with limited temperature change
            let dt = (-f / df_dt).clamp(-MAX_TSTEP, MAX_TSTEP);
            temperature += dt;
            if !temperature.is_finite() || temperature <= 0.0 {
                return Err(EosError::IterationFailed(format!("{saturation_type}")));
            }
            incipient = new_incipient;
        }
        log_result!(
            verbosity,
            "{}: no convergence in {} step(s)\n",
            saturation_type,
            max_iter
        );
        Err(EosError::NotConverged(format!("{saturation_type}")))
    }

    /// Calculate the bubble point temperature of a liquid at given pressure.
    pub fn bubble_point(
        mixture: &MultiFluid,
        pressure: f64,
        liquid_molefracs: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        Self::saturation_point(
            mixture,
            SaturationType::Bubble,
            pressure,
            liquid_molefracs,
            options,
        )
    }

    /// Calculate the dew point temperature of a vapor at given pressure.
    pub fn dew_point(
        mixture: &MultiFluid,
        pressure: f64,
        vapor_molefracs: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        Self::saturation_point(
            mixture,
            SaturationType::Dew,
            pressure,
            vapor_molefracs,
            options,
        )
    }
}

/// Saturation temperature from Wilson K-factors. Secant iterations are started
/// at fractions of the reducing temperature of the feed until one converges.
fn starting_temperature(
    mixture: &MultiFluid,
    saturation_type: SaturationType,
    pressure: f64,
    feed: &Array1<f64>,
) -> EosResult<f64> {
    let tr = mixture.reducing_function().reducing_temperature(feed)?;
    let residual = |t: f64| {
        let k = wilson_ln_k(mixture, t, pressure).mapv(f64::exp);
        saturation_type.residual(feed, &k)
    };
    (1..10)
        .rev()
        .map(|i| 0.1 * i as f64 * tr)
        .filter_map(|t0| secant(&residual, t0, DT_INIT, TOL_INIT, MAX_ITER_INIT).ok())
        .find(|t| t.is_finite() && *t > 0.0)
        .ok_or_else(|| {
            EosError::NotConverged(String::from("saturation temperature initialization"))
        })
}
