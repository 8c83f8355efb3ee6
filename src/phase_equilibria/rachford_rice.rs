//! Solution of the Rachford-Rice equation for the vapor fraction.
use mpeos_core::root_finding::brent;
use mpeos_core::EosResult;
use ndarray::Array1;

const MAX_ITER_RR: usize = 100;
const TOL_RR: f64 = 1e-14;

/// Position of a feed relative to the two-phase region for given K-factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RachfordRice {
    /// $g(0)<0$: the feed is below its bubble point.
    SubcooledLiquid,
    /// $g(1)>0$: the feed is above its dew point.
    SuperheatedVapor,
    /// Vapor fraction $\beta$ of the two-phase solution.
    TwoPhase(f64),
}

/// $g(\beta)=\sum_iz_i\frac{K_i-1}{1-\beta+\beta K_i}$
pub fn rachford_rice_residual(beta: f64, z: &Array1<f64>, k: &Array1<f64>) -> f64 {
    z.iter()
        .zip(k.iter())
        .map(|(&z, &k)| z * (k - 1.0) / (1.0 - beta + beta * k))
        .sum()
}

/// Solve the Rachford-Rice equation. Feeds outside of the two-phase region
/// are detected from the signs of the residual at $\beta=0$ and $\beta=1$.
pub fn rachford_rice(z: &Array1<f64>, k: &Array1<f64>) -> EosResult<RachfordRice> {
    let g0 = rachford_rice_residual(0.0, z, k);
    if g0 < 0.0 {
        return Ok(RachfordRice::SubcooledLiquid);
    }
    let g1 = rachford_rice_residual(1.0, z, k);
    if g1 > 0.0 {
        return Ok(RachfordRice::SuperheatedVapor);
    }
    let beta = brent(
        |beta| rachford_rice_residual(beta, z, k),
        0.0,
        1.0,
        TOL_RR,
        MAX_ITER_RR,
    )?;
    Ok(RachfordRice::TwoPhase(beta))
}

/// Liquid and vapor compositions
/// $x_i=\frac{z_i}{1-\beta+\beta K_i}$ and $y_i=K_ix_i$.
pub fn phase_compositions(
    z: &Array1<f64>,
    k: &Array1<f64>,
    beta: f64,
) -> (Array1<f64>, Array1<f64>) {
    let x = z / &(k.mapv(|k| 1.0 - beta + beta * k));
    let y = k * &x;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn recover_vapor_fraction() -> EosResult<()> {
        let x = arr1(&[0.6, 0.3, 0.1]);
        let y = arr1(&[0.1, 0.3, 0.6]);
        for beta in [0.05, 0.3, 0.7, 0.95] {
            let z = &y * beta + &x * (1.0 - beta);
            let k = &y / &x;
            let RachfordRice::TwoPhase(b) = rachford_rice(&z, &k)? else {
                panic!("expected a two-phase solution");
            };
            assert_relative_eq!(b, beta, max_relative = 1e-10);
            let (x_calc, y_calc) = phase_compositions(&z, &k, b);
            assert_relative_eq!(x_calc, x, max_relative = 1e-9);
            assert_relative_eq!(y_calc, y, max_relative = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn single_phase() -> EosResult<()> {
        let z = arr1(&[0.5, 0.5]);
        assert_eq!(
            rachford_rice(&z, &arr1(&[0.8, 0.5]))?,
            RachfordRice::SubcooledLiquid
        );
        assert_eq!(
            rachford_rice(&z, &arr1(&[3.0, 1.5]))?,
            RachfordRice::SuperheatedVapor
        );
        Ok(())
    }

    #[test]
    fn phase_boundaries() -> EosResult<()> {
        // bubble point: sum z K = 1
        let z = arr1(&[0.5, 0.5]);
        let k = arr1(&[1.5, 0.5]);
        assert_eq!(rachford_rice(&z, &k)?, RachfordRice::TwoPhase(0.0));
        Ok(())
    }
}
