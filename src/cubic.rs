//! Peng-Robinson equation of state used to generate initial densities.
use crate::density_iteration::Phase;
use mpeos_core::root_finding::cubic_roots;
use mpeos_core::{EosError, EosResult, PureFluid, RGAS};
use ndarray::Array1;
use std::sync::Arc;

pub(crate) const PR_A: f64 = 0.45724;
pub(crate) const PR_B: f64 = 0.07780;

/// Peng-Robinson equation of state built from the critical constants and
/// acentric factors of the components, without binary interaction parameters.
#[derive(Debug, Clone)]
pub struct CubicInitializer {
    tc: Array1<f64>,
    a: Array1<f64>,
    b: Array1<f64>,
    kappa: Array1<f64>,
}

impl CubicInitializer {
    pub fn new(fluids: &[Arc<dyn PureFluid>]) -> Self {
        let n = fluids.len();
        let mut tc = Array1::zeros(n);
        let mut a = Array1::zeros(n);
        let mut b = Array1::zeros(n);
        let mut kappa = Array1::zeros(n);
        for (i, f) in fluids.iter().enumerate() {
            let (t, p, w) = (
                f.critical_temperature(),
                f.critical_pressure(),
                f.acentric_factor(),
            );
            tc[i] = t;
            a[i] = PR_A * (RGAS * t).powi(2) / p;
            b[i] = PR_B * RGAS * t / p;
            kappa[i] = 0.37464 + (1.54226 - 0.26992 * w) * w;
        }
        Self { tc, a, b, kappa }
    }

    /// Mixture parameters $a$ in Pa m⁶/mol² and $b$ in m³/mol.
    fn mixture_parameters(&self, temperature: f64, x: &Array1<f64>) -> (f64, f64) {
        let ai = (&self.tc.mapv(|tc| 1.0 - (temperature / tc).sqrt()) * &self.kappa + 1.0)
            .mapv(|v| v * v)
            * &self.a;
        let mut a = 0.0;
        for i in 0..ai.len() {
            for j in 0..ai.len() {
                a += x[i] * x[j] * (ai[i] * ai[j]).sqrt();
            }
        }
        (a, (x * &self.b).sum())
    }

    /// Physically meaningful compressibility factors in ascending order.
    ///
    /// Roots below the co-volume and mechanically unstable roots are discarded.
    pub fn compressibility_factors(
        &self,
        temperature: f64,
        pressure: f64,
        x: &Array1<f64>,
    ) -> EosResult<Vec<f64>> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("cubic initializer"),
                String::from("temperature"),
                temperature,
            ));
        }
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("cubic initializer"),
                String::from("pressure"),
                pressure,
            ));
        }
        if x.len() != self.tc.len() {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.tc.len(),
                x.len()
            )));
        }

        let rt = RGAS * temperature;
        let (a, b) = self.mixture_parameters(temperature, x);
        let a_red = a * pressure / (rt * rt);
        let b_red = b * pressure / rt;
        let roots = cubic_roots(
            1.0,
            b_red - 1.0,
            a_red - 3.0 * b_red * b_red - 2.0 * b_red,
            -a_red * b_red + b_red * b_red + b_red.powi(3),
        );

        Ok(roots
            .into_iter()
            .filter(|&z| z > 0.0 && z > b_red)
            .filter(|&z| {
                let v = z * rt / pressure;
                let dp_dv = -rt / (v - b).powi(2)
                    + a * (2.0 * v + 2.0 * b) / (v * v + 2.0 * b * v - b * b).powi(2);
                -v * v * dp_dv >= 0.0
            })
            .collect())
    }

    /// Molar density in mol/m³ of the requested phase.
    pub fn density(
        &self,
        temperature: f64,
        pressure: f64,
        x: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<f64> {
        let z = self.compressibility_factors(temperature, pressure, x)?;
        let z = match phase {
            Phase::Liquid => z.first(),
            Phase::Vapor => z.last(),
        };
        z.map(|z| pressure / (z * RGAS * temperature)).ok_or_else(|| {
            EosError::NoValidRoot(format!(
                "{phase:?} branch at T = {temperature} K, p = {pressure} Pa"
            ))
        })
    }
}
