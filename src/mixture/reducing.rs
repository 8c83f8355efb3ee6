use mpeos_core::{EosError, EosResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary parameters of the reducing functions for temperature and volume.
///
/// The parameters are given for an ordered pair of components. $\beta$ is
/// asymmetric, exchanging the components replaces $\beta$ by $1/\beta$.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ReducingBinaryRecord {
    pub beta_t: f64,
    pub gamma_t: f64,
    pub beta_v: f64,
    pub gamma_v: f64,
}

impl ReducingBinaryRecord {
    pub fn new(beta_t: f64, gamma_t: f64, beta_v: f64, gamma_v: f64) -> Self {
        Self {
            beta_t,
            gamma_t,
            beta_v,
            gamma_v,
        }
    }

    /// Parameters for the same pair with the order of the components exchanged.
    pub fn reversed(&self) -> Self {
        Self {
            beta_t: self.beta_t.recip(),
            beta_v: self.beta_v.recip(),
            ..*self
        }
    }
}

impl Default for ReducingBinaryRecord {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl fmt::Display for ReducingBinaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReducingBinaryRecord(beta_t={}, gamma_t={}, beta_v={}, gamma_v={})",
            self.beta_t, self.gamma_t, self.beta_v, self.gamma_v
        )
    }
}

/// Reducing temperature and density of a mixture together with their
/// derivatives with respect to the mole fractions.
#[derive(Debug, Clone)]
pub struct ReducingDerivatives {
    pub tr: f64,
    pub rhor: f64,
    pub dtr_dx: Array1<f64>,
    pub drhor_dx: Array1<f64>,
}

/// Mixing rule of the form
/// $Y_r=\sum_ix_i^2Y_i+\sum_{i<j}2x_ix_j\beta_{ij}\gamma_{ij}\frac{x_i+x_j}{\beta_{ij}^2x_i+x_j}Y_{ij}$.
#[derive(Debug, Clone)]
struct QuadraticMixingRule {
    y: Array1<f64>,
    y_ij: Array2<f64>,
    beta: Array2<f64>,
    gamma: Array2<f64>,
}

impl QuadraticMixingRule {
    fn value(&self, x: &Array1<f64>) -> f64 {
        let n = x.len();
        let mut yr = 0.0;
        for i in 0..n {
            yr += x[i] * x[i] * self.y[i];
            for j in i + 1..n {
                let beta = self.beta[(i, j)];
                let den = beta * beta * x[i] + x[j];
                if den == 0.0 {
                    continue;
                }
                yr += 2.0 * x[i] * x[j] * beta * self.gamma[(i, j)] * (x[i] + x[j]) / den
                    * self.y_ij[(i, j)];
            }
        }
        yr
    }

    fn derivative(&self, x: &Array1<f64>, i: usize) -> f64 {
        let n = x.len();
        let xi = x[i];
        let mut dyr = 2.0 * xi * self.y[i];
        for k in 0..i {
            let xk = x[k];
            let beta = self.beta[(k, i)];
            let den = beta * beta * xk + xi;
            if den == 0.0 {
                continue;
            }
            dyr += 2.0
                * beta
                * self.gamma[(k, i)]
                * self.y_ij[(k, i)]
                * (xk * (xk + xi) / den + xk * xi / den * (1.0 - (xk + xi) / den));
        }
        for k in i + 1..n {
            let xk = x[k];
            let beta = self.beta[(i, k)];
            let den = beta * beta * xi + xk;
            if den == 0.0 {
                continue;
            }
            dyr += 2.0
                * beta
                * self.gamma[(i, k)]
                * self.y_ij[(i, k)]
                * (xk * (xi + xk) / den + xi * xk / den * (1.0 - beta * beta * (xi + xk) / den));
        }
        dyr
    }
}

/// Reducing functions for temperature and density of the multi-fluid mixture model.
#[derive(Debug, Clone)]
pub struct ReducingFunction {
    temperature: QuadraticMixingRule,
    volume: QuadraticMixingRule,
}

impl ReducingFunction {
    /// Build the reducing functions from the critical temperatures and densities of
    /// the components and a matrix of binary parameters.
    ///
    /// Only the upper triangle of `binary_records` is used; entry `(i, j)` has to
    /// be oriented such that component `i` is the first component of the pair.
    pub fn new(
        tc: Array1<f64>,
        rhoc: Array1<f64>,
        binary_records: &Array2<ReducingBinaryRecord>,
    ) -> EosResult<Self> {
        let n = tc.len();
        if rhoc.len() != n || binary_records.dim() != (n, n) {
            return Err(EosError::Error(format!(
                "reducing function: inconsistent number of components ({n} critical temperatures, {} critical densities, {:?} binary records)",
                rhoc.len(),
                binary_records.dim()
            )));
        }

        let t_ij = Array2::from_shape_fn((n, n), |(i, j)| (tc[i] * tc[j]).sqrt());
        let v_ij = Array2::from_shape_fn((n, n), |(i, j)| {
            0.125 * (rhoc[i].powf(-1.0 / 3.0) + rhoc[j].powf(-1.0 / 3.0)).powi(3)
        });

        Ok(Self {
            temperature: QuadraticMixingRule {
                y: tc,
                y_ij: t_ij,
                beta: binary_records.mapv(|r| r.beta_t),
                gamma: binary_records.mapv(|r| r.gamma_t),
            },
            volume: QuadraticMixingRule {
                y: rhoc.mapv(f64::recip),
                y_ij: v_ij,
                beta: binary_records.mapv(|r| r.beta_v),
                gamma: binary_records.mapv(|r| r.gamma_v),
            },
        })
    }

    pub fn components(&self) -> usize {
        self.temperature.y.len()
    }

    fn validate(&self, x: &Array1<f64>) -> EosResult<()> {
        if x.len() != self.components() {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.components(),
                x.len()
            )));
        }
        if x.iter().any(|xi| !xi.is_finite()) {
            return Err(EosError::InvalidComposition(format!(
                "non-finite mole fraction in {x}"
            )));
        }
        Ok(())
    }

    fn validate_index(&self, i: usize) -> EosResult<()> {
        if i >= self.components() {
            return Err(EosError::Error(format!(
                "component index {i} out of range for {} components",
                self.components()
            )));
        }
        Ok(())
    }

    /// Reducing temperature $T_r$ in K.
    pub fn reducing_temperature(&self, x: &Array1<f64>) -> EosResult<f64> {
        self.validate(x)?;
        Ok(self.temperature.value(x))
    }

    /// Reducing molar density $\rho_r$ in mol/m³.
    pub fn reducing_density(&self, x: &Array1<f64>) -> EosResult<f64> {
        self.validate(x)?;
        Ok(self.volume.value(x).recip())
    }

    /// $\left(\partial T_r/\partial x_i\right)_{x_{j\neq i}}$
    pub fn dtr_dxi(&self, x: &Array1<f64>, i: usize) -> EosResult<f64> {
        self.validate(x)?;
        self.validate_index(i)?;
        Ok(self.temperature.derivative(x, i))
    }

    /// $\left(\partial\rho_r/\partial x_i\right)_{x_{j\neq i}}$
    pub fn drhor_dxi(&self, x: &Array1<f64>, i: usize) -> EosResult<f64> {
        self.validate(x)?;
        self.validate_index(i)?;
        let rhor = self.volume.value(x).recip();
        Ok(-rhor * rhor * self.volume.derivative(x, i))
    }

    /// Reducing temperature and density with all composition derivatives.
    pub fn derivatives(&self, x: &Array1<f64>) -> EosResult<ReducingDerivatives> {
        self.validate(x)?;
        let n = self.components();
        let rhor = self.volume.value(x).recip();
        Ok(ReducingDerivatives {
            tr: self.temperature.value(x),
            rhor,
            dtr_dx: Array1::from_shape_fn(n, |i| self.temperature.derivative(x, i)),
            drhor_dx: Array1::from_shape_fn(n, |i| -rhor * rhor * self.volume.derivative(x, i)),
        })
    }
}
