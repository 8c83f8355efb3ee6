use mpeos_core::{EosError, EosResult, PureFluid, ResidualDerivatives};
use ndarray::Array1;
use std::sync::Arc;

/// Mole fraction weighted sum of the residual Helmholtz energies of the pure
/// components, all evaluated at the reduced state of the mixture:
/// $\alpha^\mathrm{r}_0=\sum_ix_i\alpha^\mathrm{r}_{0i}(\tau,\delta)$.
#[derive(Clone)]
pub struct ResidualIdealMixture {
    fluids: Vec<Arc<dyn PureFluid>>,
}

impl ResidualIdealMixture {
    pub fn new(fluids: Vec<Arc<dyn PureFluid>>) -> Self {
        Self { fluids }
    }

    pub fn fluids(&self) -> &[Arc<dyn PureFluid>] {
        &self.fluids
    }

    fn validate(&self, x: &Array1<f64>) -> EosResult<()> {
        if x.len() != self.fluids.len() {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.fluids.len(),
                x.len()
            )));
        }
        Ok(())
    }

    /// Derivatives of every pure component at the given reduced state.
    ///
    /// These are at the same time the composition derivatives
    /// $\partial\alpha^\mathrm{r}_0/\partial x_i$ of the ideal mixture.
    pub fn component_derivatives(&self, tau: f64, delta: f64) -> Vec<ResidualDerivatives> {
        self.fluids
            .iter()
            .map(|f| f.residual_derivatives(tau, delta))
            .collect()
    }

    pub fn derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
    ) -> EosResult<ResidualDerivatives> {
        self.validate(x)?;
        Ok(self
            .component_derivatives(tau, delta)
            .into_iter()
            .zip(x)
            .map(|(d, &xi)| d * xi)
            .sum())
    }

    pub fn phir(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        self.validate(x)?;
        Ok(self
            .fluids
            .iter()
            .zip(x)
            .map(|(f, &xi)| xi * f.phir(tau, delta))
            .sum())
    }

    pub fn dphir_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        self.validate(x)?;
        Ok(self
            .fluids
            .iter()
            .zip(x)
            .map(|(f, &xi)| xi * f.dphir_dtau(tau, delta))
            .sum())
    }

    pub fn dphir_ddelta(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        self.validate(x)?;
        Ok(self
            .fluids
            .iter()
            .zip(x)
            .map(|(f, &xi)| xi * f.dphir_ddelta(tau, delta))
            .sum())
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

    /// $\partial\alpha^\mathrm{r}_0/\partial x_i=\alpha^\mathrm{r}_{0i}(\tau,\delta)$
    pub fn dphir_dxi(&self, tau: f64, delta: f64, i: usize) -> EosResult<f64> {
        self.fluids
            .get(i)
            .map(|f| f.phir(tau, delta))
            .ok_or_else(|| EosError::Error(format!("component index {i} out of range")))
    }
}
