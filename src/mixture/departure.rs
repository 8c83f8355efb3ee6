use mpeos_core::parameter::ParameterError;
use mpeos_core::{EosError, EosResult, ResidualDerivatives};
use ndarray::Array1;
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Coefficients of a binary departure function.
///
/// A term with $\eta=\beta=\varepsilon=\gamma=0$ is a polynomial term
/// $n\delta^d\tau^t$, every other term is of the Gaussian bell shape
/// $n\delta^d\tau^t\exp\left(-\eta(\delta-\varepsilon)^2-\beta(\delta-\gamma)\right)$.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DepartureRecord {
    pub n: Vec<f64>,
    pub t: Vec<f64>,
    pub d: Vec<f64>,
    pub eta: Vec<f64>,
    pub epsilon: Vec<f64>,
    pub beta: Vec<f64>,
    pub gamma: Vec<f64>,
}

impl DepartureRecord {
    /// Departure function of methane and ethane of the GERG-2008 model.
    pub fn gerg2008_methane_ethane() -> Self {
        Self {
            n: vec![
                -8.0926050298746e-04,
                -7.5381925080059e-04,
                -4.1618768891219e-02,
                -2.3452173681569e-01,
                1.4003840584586e-01,
                6.3281744807738e-02,
                -3.4660425848809e-02,
                -2.3918747334251e-01,
                1.9855255066891e-03,
                6.1777746171555e+00,
                -6.9575358271105e+00,
                1.0630185306388e+00,
            ],
            t: vec![0.65, 1.55, 3.1, 5.9, 7.05, 3.35, 1.2, 5.8, 2.7, 0.45, 0.55, 1.95],
            d: vec![3., 4., 1., 2., 2., 2., 2., 2., 2., 3., 3., 3.],
            eta: vec![0., 0., 1., 1., 1., 0.875, 0.75, 0.5, 0., 0., 0., 0.],
            epsilon: vec![0., 0., 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
            beta: vec![0., 0., 1., 1., 1., 1.25, 1.5, 2., 3., 3., 3., 3.],
            gamma: vec![0., 0., 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PowerTerm {
    n: f64,
    d: f64,
    t: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct GaussianTerm {
    n: f64,
    d: f64,
    t: f64,
    eta: f64,
    epsilon: f64,
    beta: f64,
    gamma: f64,
}

/// Validated shape function $\alpha_{ij}(\tau,\delta)$ of a binary departure function.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureTerms {
    power: Vec<PowerTerm>,
    gaussian: Vec<GaussianTerm>,
}

impl TryFrom<&DepartureRecord> for DepartureTerms {
    type Error = ParameterError;

    fn try_from(r: &DepartureRecord) -> Result<Self, ParameterError> {
        let nterms = r.n.len();
        let columns = [&r.t, &r.d, &r.eta, &r.epsilon, &r.beta, &r.gamma];
        if columns.iter().any(|c| c.len() != nterms) {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "departure function coefficient arrays differ in length",
            )));
        }
        if columns
            .iter()
            .flat_map(|c| c.iter())
            .chain(&r.n)
            .any(|v| !v.is_finite())
        {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "departure function coefficients have to be finite",
            )));
        }
        Ok(Self::partition(r))
    }
}

impl DepartureTerms {
    fn partition(r: &DepartureRecord) -> Self {
        let mut power = Vec::new();
        let mut gaussian = Vec::new();
        for k in 0..r.n.len() {
            let (n, d, t) = (r.n[k], r.d[k], r.t[k]);
            let (eta, epsilon, beta, gamma) = (r.eta[k], r.epsilon[k], r.beta[k], r.gamma[k]);
            if eta == 0.0 && epsilon == 0.0 && beta == 0.0 && gamma == 0.0 {
                power.push(PowerTerm { n, d, t });
            } else {
                gaussian.push(GaussianTerm {
                    n,
                    d,
                    t,
                    eta,
                    epsilon,
                    beta,
                    gamma,
                });
            }
        }
        Self { power, gaussian }
    }

    /// Departure function of methane and ethane of the GERG-2008 model.
    pub fn gerg2008_methane_ethane() -> Self {
        Self::partition(&DepartureRecord::gerg2008_methane_ethane())
    }

    /// Number of polynomial and Gaussian terms.
    pub fn nterms(&self) -> (usize, usize) {
        (self.power.len(), self.gaussian.len())
    }

    pub fn alpha<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut alpha = D::zero();
        for p in &self.power {
            alpha += delta.powf(p.d) * tau.powf(p.t) * p.n;
        }
        for g in &self.gaussian {
            let exponent = (delta - g.epsilon).powi(2) * (-g.eta) - (delta - g.gamma) * g.beta;
            alpha += delta.powf(g.d) * tau.powf(g.t) * exponent.exp() * g.n;
        }
        alpha
    }

    pub fn derivatives(&self, tau: f64, delta: f64) -> ResidualDerivatives {
        ResidualDerivatives::from_hyperdual(|t, d| self.alpha(t, d), tau, delta)
    }
}

/// Departure function of a single pair of components `i < j`.
#[derive(Debug, Clone)]
pub struct BinaryDeparture {
    pub i: usize,
    pub j: usize,
    /// Weighting factor $F_{ij}$
    pub f: f64,
    pub terms: Arc<DepartureTerms>,
}

/// Departure function of the mixture
/// $\Delta\alpha^\mathrm{r}=\sum_{i<j}x_ix_jF_{ij}\alpha_{ij}(\tau,\delta)$.
#[derive(Debug, Clone)]
pub struct DepartureFunction {
    components: usize,
    pairs: Vec<BinaryDeparture>,
}

impl DepartureFunction {
    pub fn new(components: usize, pairs: Vec<BinaryDeparture>) -> EosResult<Self> {
        for (k, p) in pairs.iter().enumerate() {
            if p.i >= p.j || p.j >= components {
                return Err(EosError::Error(format!(
                    "departure function: invalid pair ({}, {}) for {components} components",
                    p.i, p.j
                )));
            }
            if pairs[..k].iter().any(|q| q.i == p.i && q.j == p.j) {
                return Err(EosError::Error(format!(
                    "departure function: pair ({}, {}) defined more than once",
                    p.i, p.j
                )));
            }
        }
        Ok(Self { components, pairs })
    }

    /// A departure function that vanishes identically.
    pub fn none(components: usize) -> Self {
        Self {
            components,
            pairs: Vec::new(),
        }
    }

    pub fn pairs(&self) -> &[BinaryDeparture] {
        &self.pairs
    }

    fn validate(&self, x: &Array1<f64>) -> EosResult<()> {
        if x.len() != self.components {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.components,
                x.len()
            )));
        }
        Ok(())
    }

    fn pair_derivatives(&self, tau: f64, delta: f64) -> Vec<ResidualDerivatives> {
        self.pairs
            .iter()
            .map(|p| p.terms.derivatives(tau, delta) * p.f)
            .collect()
    }

    /// $\Delta\alpha^\mathrm{r}$ and all its derivatives with respect to $\tau$ and $\delta$.
    pub fn derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
    ) -> EosResult<ResidualDerivatives> {
        self.validate(x)?;
        Ok(self
            .pairs
            .iter()
            .zip(self.pair_derivatives(tau, delta))
            .map(|(p, a)| a * (x[p.i] * x[p.j]))
            .sum())
    }

    /// Derivatives of $\Delta\alpha^\mathrm{r}$ with respect to every mole fraction,
    /// $\partial\Delta\alpha^\mathrm{r}/\partial x_i=\sum_{k\neq i}x_kF_{ik}\alpha_{ik}$,
    /// including their $\tau$ and $\delta$ derivatives.
    pub fn composition_derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
    ) -> EosResult<Vec<ResidualDerivatives>> {
        self.validate(x)?;
        let mut dx = vec![ResidualDerivatives::default(); self.components];
        for (p, a) in self.pairs.iter().zip(self.pair_derivatives(tau, delta)) {
            dx[p.i] += a * x[p.j];
            dx[p.j] += a * x[p.i];
        }
        Ok(dx)
    }

    pub fn phir(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.phir)
    }

    pub fn dphir_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.dphir_dtau)
    }

    pub fn dphir_ddelta(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.dphir_ddelta)
    }

    pub fn d2phir_dtau2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.d2phir_dtau2)
    }

    pub fn d2phir_ddelta_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.d2phir_ddelta_dtau)
    }

    pub fn d2phir_ddelta2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.derivatives(tau, delta, x)?.d2phir_ddelta2)
    }

    fn composition_derivative(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<ResidualDerivatives> {
        self.composition_derivatives(tau, delta, x)?
            .get(i)
            .copied()
            .ok_or_else(|| EosError::Error(format!("component index {i} out of range")))
    }

    pub fn dphir_dxi(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> EosResult<f64> {
        Ok(self.composition_derivative(tau, delta, x, i)?.phir)
    }

    pub fn d2phir_dxi_dtau(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        Ok(self.composition_derivative(tau, delta, x, i)?.dphir_dtau)
    }

    pub fn d2phir_dxi_ddelta(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        Ok(self.composition_derivative(tau, delta, x, i)?.dphir_ddelta)
    }
}
