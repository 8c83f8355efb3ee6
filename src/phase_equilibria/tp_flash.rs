use super::rachford_rice::{phase_compositions, rachford_rice, RachfordRice};
use super::{wilson_ln_k, FlashResult, PhaseEquilibrium, PhaseState};
use crate::density_iteration::{density, DensityInitialization, Phase};
use crate::MultiFluid;
use mpeos_core::{log_iter, log_result, EosError, EosResult, SolverOptions};
use ndarray::Array1;

const MAX_ITER_TP: usize = 400;
const TOL_TP: f64 = 1e-10;
const TRIVIAL_TOL: f64 = 1e-5;

/// Scaling factors of the Wilson K-factors used as starting values.
const START_FACTORS: [f64; 3] = [1.0, 1.0 / 3.0, 3.0];

/// # Flash calculations
impl PhaseEquilibrium {
    /// Perform a Tp-flash calculation by successive substitution of the
    /// K-factors.
    ///
    /// The iteration is started from Wilson K-factors. If it ends in a trivial
    /// solution or does not converge, it is restarted from the Wilson K-factors
    /// divided and multiplied by 3. Feeds that turn out to be outside the
    /// two-phase region are returned as a single liquid or vapor phase.
    pub fn tp_flash(
        mixture: &MultiFluid,
        temperature: f64,
        pressure: f64,
        feed: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<FlashResult> {
        mixture.validate_molefracs(feed)?;
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("Tp flash"),
                String::from("temperature"),
                temperature,
            ));
        }
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("Tp flash"),
                String::from("pressure"),
                pressure,
            ));
        }

        let ln_k = wilson_ln_k(mixture, temperature, pressure);
        let starts = START_FACTORS.iter().map(|f| &ln_k + f.ln());
        flash_with_starts(mixture, temperature, pressure, feed, starts, options)
    }
}

/// Successive substitution started from each set of logarithmic K-factors in
/// turn until one ends in neither a trivial solution nor the iteration limit.
fn flash_with_starts<I>(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    feed: &Array1<f64>,
    starts: I,
    options: SolverOptions,
) -> EosResult<FlashResult>
where
    I: IntoIterator<Item = Array1<f64>>,
{
    let mut error = EosError::NotConverged(String::from("Tp flash"));
    for ln_k in starts {
        match successive_substitution(mixture, temperature, pressure, feed, ln_k, options) {
            Err(e @ (EosError::TrivialSolution | EosError::NotConverged(_))) => error = e,
            res => return res,
        }
    }
    Err(error)
}

fn successive_substitution(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    feed: &Array1<f64>,
    mut ln_k: Array1<f64>,
    options: SolverOptions,
) -> EosResult<FlashResult> {
    // set options
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_TP, TOL_TP);

    let mut densities = None;

    log_iter!(
        verbosity,
        " iter |    residual    |     beta     |  vapor mole fractions  |  liquid mole fractions  "
    );
    log_iter!(verbosity, "{:-<88}", "");

    for iter in 1..=max_iter {
        let k = ln_k.mapv(f64::exp);
        let beta = match rachford_rice(feed, &k)? {
            RachfordRice::TwoPhase(beta) => beta,
            RachfordRice::SubcooledLiquid => {
                log_result!(verbosity, "Tp flash: subcooled liquid after {} step(s)\n", iter);
                return FlashResult::single_phase(
                    mixture,
                    temperature,
                    pressure,
                    feed,
                    Phase::Liquid,
                );
            }
            RachfordRice::SuperheatedVapor => {
                log_result!(verbosity, "Tp flash: superheated vapor after {} step(s)\n", iter);
                return FlashResult::single_phase(
                    mixture,
                    temperature,
                    pressure,
                    feed,
                    Phase::Vapor,
                );
            }
        };

        let (x, y) = phase_compositions(feed, &k, beta);
        let (vapor, liquid) = phase_states(mixture, temperature, pressure, &x, &y, densities)?;
        densities = Some((vapor.density, liquid.density));

        let ln_k_new = liquid.ln_phi(mixture)? - vapor.ln_phi(mixture)?;
        if ln_k_new.iter().any(|v| !v.is_finite()) {
            return Err(EosError::IterationFailed(String::from("Tp flash")));
        }
        let res = (&ln_k_new - &ln_k).fold(0.0, |acc: f64, d| acc.max(d.abs()));
        ln_k = ln_k_new;

        log_iter!(
            verbosity,
            " {:4} | {:14.8e} | {:12.8} | {:.8} | {:.8}",
            iter,
            res,
            beta,
            y,
            x,
        );

        if ln_k.iter().all(|v| v.abs() < TRIVIAL_TOL) {
            log_result!(verbosity, "Tp flash: trivial solution in step {}\n", iter);
            return Err(EosError::TrivialSolution);
        }

        if res < tol {
            log_result!(verbosity, "Tp flash: calculation converged in {} step(s)\n", iter);
            return converged_flash(mixture, temperature, pressure, feed, &ln_k, densities);
        }
    }
    log_result!(verbosity, "Tp flash: no convergence in {} step(s)\n", max_iter);
    Err(EosError::NotConverged(String::from("Tp flash")))
}

/// Phase states at the converged K-factors.
fn converged_flash(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    feed: &Array1<f64>,
    ln_k: &Array1<f64>,
    densities: Option<(f64, f64)>,
) -> EosResult<FlashResult> {
    let k = ln_k.mapv(f64::exp);
    match rachford_rice(feed, &k)? {
        RachfordRice::SubcooledLiquid => {
            FlashResult::single_phase(mixture, temperature, pressure, feed, Phase::Liquid)
        }
        RachfordRice::SuperheatedVapor => {
            FlashResult::single_phase(mixture, temperature, pressure, feed, Phase::Vapor)
        }
        RachfordRice::TwoPhase(beta) => {
            let (x, y) = phase_compositions(feed, &k, beta);
            let (vapor, liquid) = phase_states(mixture, temperature, pressure, &x, &y, densities)?;
            Ok(FlashResult::TwoPhase(PhaseEquilibrium::from_states(
                vapor, liquid, beta,
            )))
        }
    }
}

/// Vapor and liquid states, seeded from the cubic equation of state or
/// from the densities of the previous iteration.
pub(super) fn phase_states(
    mixture: &MultiFluid,
    temperature: f64,
    pressure: f64,
    x: &Array1<f64>,
    y: &Array1<f64>,
    densities: Option<(f64, f64)>,
) -> EosResult<(PhaseState, PhaseState)> {
    let (init_v, init_l) = match densities {
        Some((rho_v, rho_l)) => (
            DensityInitialization::InitialDensity(rho_v),
            DensityInitialization::InitialDensity(rho_l),
        ),
        None => (
            DensityInitialization::Cubic(Phase::Vapor),
            DensityInitialization::Cubic(Phase::Liquid),
        ),
    };
    let rho_v = density(mixture, temperature, pressure, y, init_v)?;
    let rho_l = density(mixture, temperature, pressure, x, init_l)?;
    Ok((
        PhaseState {
            temperature,
            pressure,
            density: rho_v,
            molefracs: y.clone(),
        },
        PhaseState {
            temperature,
            pressure,
            density: rho_l,
            molefracs: x.clone(),
        },
    ))
}
