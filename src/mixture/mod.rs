//! Multi-fluid mixture model: reducing functions, departure functions and
//! the ideal mixture of the pure component residual Helmholtz energies.
use mpeos_core::{EosError, EosResult, PureFluid, ResidualDerivatives, RGAS};
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

mod departure;
mod ideal_mixture;
mod parameters;
mod reducing;

pub use departure::{BinaryDeparture, DepartureFunction, DepartureRecord, DepartureTerms};
pub use ideal_mixture::ResidualIdealMixture;
pub use parameters::{
    BinaryParameters, DepartureBinaryRecord, DepartureModelRecord, DeparturePairEntry,
    DepartureTableEntry, SUPPORTED_DEPARTURE_MODELS,
};
pub use reducing::{ReducingBinaryRecord, ReducingDerivatives, ReducingFunction};

/// Maximum deviation of the sum of mole fractions from unity.
const MOLEFRAC_TOL: f64 = 1e-8;

/// Residual Helmholtz energy of a mixture and its derivatives at a given
/// reduced state and composition.
#[derive(Debug, Clone)]
pub struct HelmholtzDerivatives {
    pub tau: f64,
    pub delta: f64,
    /// $\alpha^\mathrm{r}$ and its $\tau$ and $\delta$ derivatives
    pub residual: ResidualDerivatives,
    /// $\partial\alpha^\mathrm{r}/\partial x_i$ and its $\tau$ and $\delta$ derivatives
    pub composition: Vec<ResidualDerivatives>,
    pub reducing: ReducingDerivatives,
}

/// $n\left(\partial\alpha^\mathrm{r}/\partial n_i\right)_{T,V,n_j}$ and its
/// derivatives with respect to $\tau$ and $\delta$ for every component.
#[derive(Debug, Clone)]
pub struct PartialMolarDerivatives {
    pub ndphir_dni: Array1<f64>,
    pub dndphir_dni_dtau: Array1<f64>,
    pub dndphir_dni_ddelta: Array1<f64>,
}

impl HelmholtzDerivatives {
    pub fn partial_molar(&self, x: &Array1<f64>) -> PartialMolarDerivatives {
        let r = &self.residual;
        let red = &self.reducing;
        let (tau, delta) = (self.tau, self.delta);
        let xs_rho = (x * &red.drhor_dx).sum();
        let xs_t = (x * &red.dtr_dx).sum();
        let xs_a: ResidualDerivatives = self
            .composition
            .iter()
            .zip(x)
            .map(|(d, &xi)| *d * xi)
            .sum();

        let n = x.len();
        let mut nd = Array1::zeros(n);
        let mut nd_tau = Array1::zeros(n);
        let mut nd_delta = Array1::zeros(n);
        for i in 0..n {
            let f_rho = 1.0 - (red.drhor_dx[i] - xs_rho) / red.rhor;
            let f_t = (red.dtr_dx[i] - xs_t) / red.tr;
            let da = self.composition[i] - xs_a;
            nd[i] = delta * r.dphir_ddelta * f_rho + tau * r.dphir_dtau * f_t + da.phir;
            nd_tau[i] = delta * r.d2phir_ddelta_dtau * f_rho
                + (tau * r.d2phir_dtau2 + r.dphir_dtau) * f_t
                + da.dphir_dtau;
            nd_delta[i] = (r.dphir_ddelta + delta * r.d2phir_ddelta2) * f_rho
                + tau * r.d2phir_ddelta_dtau * f_t
                + da.dphir_ddelta;
        }
        PartialMolarDerivatives {
            ndphir_dni: nd,
            dndphir_dni_dtau: nd_tau,
            dndphir_dni_ddelta: nd_delta,
        }
    }
}

/// Logarithmic fugacity coefficients and their temperature derivatives at
/// constant pressure and composition.
#[derive(Debug, Clone)]
pub(crate) struct FugacityCoefficients {
    pub ln_phi: Array1<f64>,
    pub dln_phi_dt: Array1<f64>,
}

/// Multi-fluid mixture model
/// $\alpha^\mathrm{r}(\tau,\delta,x)=\sum_ix_i\alpha^\mathrm{r}_{0i}(\tau,\delta)+\Delta\alpha^\mathrm{r}(\tau,\delta,x)$
/// with $\tau=T_r(x)/T$ and $\delta=\rho/\rho_r(x)$.
#[derive(Clone)]
pub struct MultiFluid {
    ideal_mixture: ResidualIdealMixture,
    reducing: ReducingFunction,
    departure: DepartureFunction,
}

impl MultiFluid {
    pub fn new(fluids: Vec<Arc<dyn PureFluid>>, binary: &BinaryParameters) -> EosResult<Self> {
        if fluids.is_empty() {
            return Err(EosError::Error(String::from(
                "a mixture needs at least one component",
            )));
        }
        let tc = fluids.iter().map(|f| f.critical_temperature()).collect();
        let rhoc = fluids.iter().map(|f| f.critical_density()).collect();
        let reducing = ReducingFunction::new(tc, rhoc, &binary.reducing_matrix(&fluids)?)?;
        let departure = DepartureFunction::new(fluids.len(), binary.departure_pairs(&fluids)?)?;
        Ok(Self {
            ideal_mixture: ResidualIdealMixture::new(fluids),
            reducing,
            departure,
        })
    }

    /// Mixture without binary parameters.
    pub fn ideal(fluids: Vec<Arc<dyn PureFluid>>) -> EosResult<Self> {
        Self::new(fluids, &BinaryParameters::default())
    }

    pub fn components(&self) -> usize {
        self.ideal_mixture.fluids().len()
    }

    pub fn fluids(&self) -> &[Arc<dyn PureFluid>] {
        self.ideal_mixture.fluids()
    }

    pub fn reducing_function(&self) -> &ReducingFunction {
        &self.reducing
    }

    pub fn departure_function(&self) -> &DepartureFunction {
        &self.departure
    }

    pub fn residual_ideal_mixture(&self) -> &ResidualIdealMixture {
        &self.ideal_mixture
    }

    /// Check that `x` is a valid composition of the mixture.
    pub fn validate_molefracs(&self, x: &Array1<f64>) -> EosResult<()> {
        if x.len() != self.components() {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.components(),
                x.len()
            )));
        }
        if x.iter().any(|&xi| !xi.is_finite() || xi < 0.0) {
            return Err(EosError::InvalidComposition(format!(
                "mole fractions have to be finite and non-negative, got {x}"
            )));
        }
        if (x.sum() - 1.0).abs() > MOLEFRAC_TOL {
            return Err(EosError::InvalidComposition(format!(
                "mole fractions have to sum to one, got {}",
                x.sum()
            )));
        }
        Ok(())
    }

    pub fn helmholtz_derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
    ) -> EosResult<HelmholtzDerivatives> {
        let reducing = self.reducing.derivatives(x)?;
        let mut composition = self.ideal_mixture.component_derivatives(tau, delta);
        let residual = composition
            .iter()
            .zip(x)
            .map(|(d, &xi)| *d * xi)
            .sum::<ResidualDerivatives>()
            + self.departure.derivatives(tau, delta, x)?;
        for (c, d) in composition
            .iter_mut()
            .zip(self.departure.composition_derivatives(tau, delta, x)?)
        {
            *c += d;
        }
        Ok(HelmholtzDerivatives {
            tau,
            delta,
            residual,
            composition,
            reducing,
        })
    }

    fn residual_derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
    ) -> EosResult<ResidualDerivatives> {
        Ok(self.ideal_mixture.derivatives(tau, delta, x)?
            + self.departure.derivatives(tau, delta, x)?)
    }

    pub fn phir(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.ideal_mixture.phir(tau, delta, x)? + self.departure.phir(tau, delta, x)?)
    }

    pub fn dphir_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.ideal_mixture.dphir_dtau(tau, delta, x)?
            + self.departure.dphir_dtau(tau, delta, x)?)
    }

    pub fn dphir_ddelta(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.ideal_mixture.dphir_ddelta(tau, delta, x)?
            + self.departure.dphir_ddelta(tau, delta, x)?)
    }

    pub fn d2phir_dtau2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.residual_derivatives(tau, delta, x)?.d2phir_dtau2)
    }

    pub fn d2phir_ddelta_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.residual_derivatives(tau, delta, x)?.d2phir_ddelta_dtau)
    }

    pub fn d2phir_ddelta2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.residual_derivatives(tau, delta, x)?.d2phir_ddelta2)
    }

    /// $\left(\partial\alpha^\mathrm{r}/\partial x_i\right)_{\tau,\delta,x_{j\neq i}}$
    pub fn dphir_dxi(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> EosResult<f64> {
        Ok(self.ideal_mixture.dphir_dxi(tau, delta, i)?
            + self.departure.dphir_dxi(tau, delta, x, i)?)
    }

    pub fn d2phir_dxi_dtau(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        let pure = self.ideal_component(tau, delta, i)?;
        Ok(pure.dphir_dtau + self.departure.d2phir_dxi_dtau(tau, delta, x, i)?)
    }

    pub fn d2phir_dxi_ddelta(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        let pure = self.ideal_component(tau, delta, i)?;
        Ok(pure.dphir_ddelta + self.departure.d2phir_dxi_ddelta(tau, delta, x, i)?)
    }

    fn ideal_component(&self, tau: f64, delta: f64, i: usize) -> EosResult<ResidualDerivatives> {
        self.fluids()
            .get(i)
            .map(|f| f.residual_derivatives(tau, delta))
            .ok_or_else(|| EosError::Error(format!("component index {i} out of range")))
    }

    fn partial_molar_derivatives(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<(f64, f64, f64)> {
        if i >= self.components() {
            return Err(EosError::Error(format!("component index {i} out of range")));
        }
        let pm = self.helmholtz_derivatives(tau, delta, x)?.partial_molar(x);
        Ok((
            pm.ndphir_dni[i],
            pm.dndphir_dni_dtau[i],
            pm.dndphir_dni_ddelta[i],
        ))
    }

    /// $n\left(\partial\alpha^\mathrm{r}/\partial n_i\right)_{T,V,n_j}$
    pub fn ndphir_dni(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> EosResult<f64> {
        Ok(self.partial_molar_derivatives(tau, delta, x, i)?.0)
    }

    pub fn dndphir_dni_dtau(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        Ok(self.partial_molar_derivatives(tau, delta, x, i)?.1)
    }

    pub fn dndphir_dni_ddelta(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        Ok(self.partial_molar_derivatives(tau, delta, x, i)?.2)
    }

    fn validate_state(&self, temperature: f64, density: f64) -> EosResult<()> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("MultiFluid"),
                String::from("temperature"),
                temperature,
            ));
        }
        if !density.is_finite() || density <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("MultiFluid"),
                String::from("density"),
                density,
            ));
        }
        Ok(())
    }

    /// Reduced state $(\tau,\delta)$ at temperature in K and molar density in mol/m³.
    pub fn reduced_state(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<(f64, f64)> {
        self.validate_state(temperature, density)?;
        let tr = self.reducing.reducing_temperature(x)?;
        let rhor = self.reducing.reducing_density(x)?;
        Ok((tr / temperature, density / rhor))
    }

    /// Pressure in Pa.
    pub fn pressure(&self, temperature: f64, density: f64, x: &Array1<f64>) -> EosResult<f64> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        let a_d = self.dphir_ddelta(tau, delta, x)?;
        Ok(density * RGAS * temperature * (1.0 + delta * a_d))
    }

    /// Pressure and its derivative with respect to density at constant temperature.
    pub fn pressure_and_derivative(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<(f64, f64)> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        let r = self.residual_derivatives(tau, delta, x)?;
        let rt = RGAS * temperature;
        Ok((
            density * rt * (1.0 + delta * r.dphir_ddelta),
            rt * (1.0 + 2.0 * delta * r.dphir_ddelta + delta * delta * r.d2phir_ddelta2),
        ))
    }

    /// $\left(\partial p/\partial\rho\right)_{T,x}$ in Pa m³/mol.
    pub fn dp_drho(&self, temperature: f64, density: f64, x: &Array1<f64>) -> EosResult<f64> {
        Ok(self.pressure_and_derivative(temperature, density, x)?.1)
    }

    /// $\left(\partial p/\partial T\right)_{\rho,x}$ in Pa/K.
    pub fn dp_dt(&self, temperature: f64, density: f64, x: &Array1<f64>) -> EosResult<f64> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        let r = self.residual_derivatives(tau, delta, x)?;
        Ok(density * RGAS * (1.0 + delta * r.dphir_ddelta - delta * tau * r.d2phir_ddelta_dtau))
    }

    /// Compressibility factor $Z=p/(\rho RT)$.
    pub fn compressibility(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<f64> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        Ok(1.0 + delta * self.dphir_ddelta(tau, delta, x)?)
    }

    pub(crate) fn fugacity_coefficients(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<FugacityCoefficients> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        let h = self.helmholtz_derivatives(tau, delta, x)?;
        let pm = h.partial_molar(x);
        let r = &h.residual;
        let rhor = h.reducing.rhor;

        let z = 1.0 + delta * r.dphir_ddelta;
        if z <= 0.0 {
            return Err(EosError::InvalidState(
                String::from("fugacity coefficient"),
                String::from("Z"),
                z,
            ));
        }
        let ln_phi = (&pm.ndphir_dni + r.phir).mapv(|v| v - z.ln());

        // density response at constant pressure
        let dp_dt =
            density * RGAS * (1.0 + delta * r.dphir_ddelta - delta * tau * r.d2phir_ddelta_dtau);
        let dp_drho = RGAS
            * temperature
            * (1.0 + 2.0 * delta * r.dphir_ddelta + delta * delta * r.d2phir_ddelta2);
        let drho_dt = -dp_dt / dp_drho;

        let dtau_dt = -tau / temperature;
        let ddelta_dt = drho_dt / rhor;
        let dln_phi_dt = (&pm.dndphir_dni_dtau + r.dphir_dtau) * dtau_dt
            + (&pm.dndphir_dni_ddelta + r.dphir_ddelta) * ddelta_dt
            + 1.0 / temperature
            + drho_dt / density;
        Ok(FugacityCoefficients { ln_phi, dln_phi_dt })
    }

    /// Logarithmic fugacity coefficients
    /// $\ln\varphi_i=\alpha^\mathrm{r}+n\left(\partial\alpha^\mathrm{r}/\partial n_i\right)-\ln Z$.
    pub fn ln_phi(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<Array1<f64>> {
        Ok(self.fugacity_coefficients(temperature, density, x)?.ln_phi)
    }

    /// $\left(\partial\ln\varphi_i/\partial T\right)_{p,x}$ in 1/K.
    pub fn dln_phi_dt(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
    ) -> EosResult<Array1<f64>> {
        Ok(self.fugacity_coefficients(temperature, density, x)?.dln_phi_dt)
    }

    /// Fugacity of component `i` in Pa.
    pub fn fugacity(
        &self,
        temperature: f64,
        density: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> EosResult<f64> {
        let (tau, delta) = self.reduced_state(temperature, density, x)?;
        let phir = self.phir(tau, delta, x)?;
        let nd = self.ndphir_dni(tau, delta, x, i)?;
        Ok(x[i] * density * RGAS * temperature * (phir + nd).exp())
    }
}

impl fmt::Display for MultiFluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiFluid(")?;
        for fluid in self.fluids() {
            write!(f, "\n\t{fluid},")?;
        }
        let pairs: Vec<_> = self.departure.pairs().iter().map(|p| (p.i, p.j)).collect();
        write!(f, "\n\tdeparture pairs={pairs:?}")?;
        write!(f, "\n)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluids::{into_fluids, PengRobinsonFluid, PengRobinsonRecord};
    use approx::assert_relative_eq;
    use mpeos_core::parameter::{Identifier, PureRecord};
    use ndarray::arr1;

    fn methane_ethane() -> MultiFluid {
        let records = vec![
            PureRecord::new(
                Identifier::new(Some("74-82-8"), Some("methane"), None),
                PengRobinsonRecord::new(190.564, 4.5992e6, 10139.128, 0.01142),
            ),
            PureRecord::new(
                Identifier::new(Some("74-84-0"), Some("ethane"), None),
                PengRobinsonRecord::new(305.322, 4.8722e6, 6870.854, 0.0995),
            ),
        ];
        let fluids = records
            .into_iter()
            .map(PengRobinsonFluid::new)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        MultiFluid::new(into_fluids(fluids), &BinaryParameters::gerg2008_methane_ethane()).unwrap()
    }

    /// Total residual Helmholtz energy $n\alpha^\mathrm{r}$ at fixed T and V as
    /// function of the mole numbers.
    fn n_phir(mixture: &MultiFluid, t: f64, v: f64, n: &Array1<f64>) -> f64 {
        let ntot = n.sum();
        let x = n / ntot;
        let (tau, delta) = mixture.reduced_state(t, ntot / v, &x).unwrap();
        ntot * mixture.phir(tau, delta, &x).unwrap()
    }

    #[test]
    fn partial_molar_derivative() -> EosResult<()> {
        let mixture = methane_ethane();
        let (t, v) = (200.0, 1.0 / 5000.0);
        let n = arr1(&[0.4, 0.6]);
        let x = &n / n.sum();
        let (tau, delta) = mixture.reduced_state(t, n.sum() / v, &x)?;
        let phir = mixture.phir(tau, delta, &x)?;
        let h = 1e-6;
        for i in 0..2 {
            let mut np = n.clone();
            let mut nm = n.clone();
            np[i] += h;
            nm[i] -= h;
            let fd = (n_phir(&mixture, t, v, &np) - n_phir(&mixture, t, v, &nm)) / (2.0 * h);
            assert_relative_eq!(
                phir + mixture.ndphir_dni(tau, delta, &x, i)?,
                fd,
                max_relative = 1e-7
            );
        }
        Ok(())
    }

    #[test]
    fn partial_molar_tau_delta_derivatives() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.3, 0.7]);
        let (tau, delta) = (1.2, 0.9);
        let h = 1e-6;
        for i in 0..2 {
            let dt = (mixture.ndphir_dni(tau + h, delta, &x, i)?
                - mixture.ndphir_dni(tau - h, delta, &x, i)?)
                / (2.0 * h);
            let dd = (mixture.ndphir_dni(tau, delta + h, &x, i)?
                - mixture.ndphir_dni(tau, delta - h, &x, i)?)
                / (2.0 * h);
            assert_relative_eq!(mixture.dndphir_dni_dtau(tau, delta, &x, i)?, dt, max_relative = 1e-6);
            assert_relative_eq!(
                mixture.dndphir_dni_ddelta(tau, delta, &x, i)?,
                dd,
                max_relative = 1e-6
            );
        }
        Ok(())
    }

    #[test]
    fn composition_derivatives() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.3, 0.7]);
        let (tau, delta) = (1.2, 0.9);
        let h = 1e-6;
        for i in 0..2 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            let fd = (mixture.phir(tau, delta, &xp)? - mixture.phir(tau, delta, &xm)?) / (2.0 * h);
            assert_relative_eq!(mixture.dphir_dxi(tau, delta, &x, i)?, fd, max_relative = 1e-7);
            let fd_tau = (mixture.dphir_dtau(tau, delta, &xp)? - mixture.dphir_dtau(tau, delta, &xm)?)
                / (2.0 * h);
            assert_relative_eq!(
                mixture.d2phir_dxi_dtau(tau, delta, &x, i)?,
                fd_tau,
                max_relative = 1e-7
            );
            let fd_delta = (mixture.dphir_ddelta(tau, delta, &xp)?
                - mixture.dphir_ddelta(tau, delta, &xm)?)
                / (2.0 * h);
            assert_relative_eq!(
                mixture.d2phir_dxi_ddelta(tau, delta, &x, i)?,
                fd_delta,
                max_relative = 1e-7
            );
        }
        Ok(())
    }

    #[test]
    fn pressure_derivatives() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.5, 0.5]);
        let (t, rho) = (220.0, 12000.0);
        let h = 1e-3;
        let dp_drho = (mixture.pressure(t, rho + h, &x)? - mixture.pressure(t, rho - h, &x)?)
            / (2.0 * h);
        let dp_dt = (mixture.pressure(t + h, rho, &x)? - mixture.pressure(t - h, rho, &x)?)
            / (2.0 * h);
        assert_relative_eq!(mixture.dp_drho(t, rho, &x)?, dp_drho, max_relative = 1e-6);
        assert_relative_eq!(mixture.dp_dt(t, rho, &x)?, dp_dt, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn fugacity() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.2, 0.8]);
        let (t, rho) = (250.0, 800.0);
        let p = mixture.pressure(t, rho, &x)?;
        let ln_phi = mixture.ln_phi(t, rho, &x)?;
        for i in 0..2 {
            assert_relative_eq!(
                mixture.fugacity(t, rho, &x, i)?,
                x[i] * p * ln_phi[i].exp(),
                max_relative = 1e-12
            );
        }
        Ok(())
    }

    #[test]
    fn ideal_gas_limit() -> EosResult<()> {
        let mixture = methane_ethane();
        let x = arr1(&[0.5, 0.5]);
        let ln_phi = mixture.ln_phi(300.0, 1e-6, &x)?;
        assert_relative_eq!(ln_phi[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(ln_phi[1], 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn validate_molefracs() {
        let mixture = methane_ethane();
        assert!(mixture.validate_molefracs(&arr1(&[0.5, 0.5])).is_ok());
        for x in [
            arr1(&[0.5, 0.4]),
            arr1(&[1.2, -0.2]),
            arr1(&[1.0]),
            arr1(&[f64::NAN, 0.5]),
        ] {
            assert!(matches!(
                mixture.validate_molefracs(&x),
                Err(EosError::InvalidComposition(_))
            ));
        }
    }
}
