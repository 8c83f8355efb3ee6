use crate::parameter::Identifier;
use num_dual::*;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Reduced residual Helmholtz energy $\alpha^\mathrm{r}(\tau,\delta)$
/// that can be evaluated using generalized (hyper) dual numbers.
///
/// This trait needs to be implemented generically or for the specific
/// types in the supertraits of [PureFluid] so that the implementor can be
/// used as a component of a mixture.
pub trait ResidualHelmholtzEnergyDual<D: DualNum<f64>> {
    /// The reduced residual Helmholtz energy at reciprocal reduced temperature
    /// $\tau=T_c/T$ and reduced density $\delta=\rho/\rho_c$.
    fn residual_helmholtz_energy(&self, tau: D, delta: D) -> D;
}

/// Object safe pure fluid equation of state.
///
/// Derivatives with respect to $\tau$ and $\delta$ are provided via automatic
/// differentiation of [ResidualHelmholtzEnergyDual].
pub trait PureFluid: ResidualHelmholtzEnergyDual<f64>
    + ResidualHelmholtzEnergyDual<Dual64>
    + ResidualHelmholtzEnergyDual<HyperDual64>
    + fmt::Display
    + Send
    + Sync
{
    /// Identifier used to match binary parameters.
    fn identifier(&self) -> &Identifier;

    /// Critical temperature in K. Also the reducing temperature.
    fn critical_temperature(&self) -> f64;

    /// Critical pressure in Pa.
    fn critical_pressure(&self) -> f64;

    /// Critical molar density in mol/m³. Also the reducing density.
    fn critical_density(&self) -> f64;

    fn acentric_factor(&self) -> f64;

    fn phir(&self, tau: f64, delta: f64) -> f64 {
        <Self as ResidualHelmholtzEnergyDual<f64>>::residual_helmholtz_energy(self, tau, delta)
    }

    fn dphir_dtau(&self, tau: f64, delta: f64) -> f64 {
        let tau = Dual64::from(tau).derivative();
        <Self as ResidualHelmholtzEnergyDual<Dual64>>::residual_helmholtz_energy(
            self,
            tau,
            Dual64::from(delta),
        )
        .eps
    }

    fn dphir_ddelta(&self, tau: f64, delta: f64) -> f64 {
        let delta = Dual64::from(delta).derivative();
        <Self as ResidualHelmholtzEnergyDual<Dual64>>::residual_helmholtz_energy(
            self,
            Dual64::from(tau),
            delta,
        )
        .eps
    }

    fn d2phir_dtau2(&self, tau: f64, delta: f64) -> f64 {
        self.residual_derivatives(tau, delta).d2phir_dtau2
    }

    fn d2phir_ddelta_dtau(&self, tau: f64, delta: f64) -> f64 {
        self.residual_derivatives(tau, delta).d2phir_ddelta_dtau
    }

    fn d2phir_ddelta2(&self, tau: f64, delta: f64) -> f64 {
        self.residual_derivatives(tau, delta).d2phir_ddelta2
    }

    /// All derivatives up to second order in a single evaluation.
    fn residual_derivatives(&self, tau: f64, delta: f64) -> ResidualDerivatives {
        ResidualDerivatives::from_hyperdual(
            |t, d| {
                <Self as ResidualHelmholtzEnergyDual<HyperDual64>>::residual_helmholtz_energy(
                    self, t, d,
                )
            },
            tau,
            delta,
        )
    }
}

/// Reduced residual Helmholtz energy and its partial derivatives
/// with respect to $\tau$ and $\delta$ up to second order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResidualDerivatives {
    pub phir: f64,
    pub dphir_dtau: f64,
    pub dphir_ddelta: f64,
    pub d2phir_dtau2: f64,
    pub d2phir_ddelta_dtau: f64,
    pub d2phir_ddelta2: f64,
}

impl ResidualDerivatives {
    /// Evaluates `f` three times with hyper-dual arguments to obtain every
    /// derivative up to second order.
    pub fn from_hyperdual<F>(f: F, tau: f64, delta: f64) -> Self
    where
        F: Fn(HyperDual64, HyperDual64) -> HyperDual64,
    {
        let mut t = HyperDual64::from(tau);
        t.eps1 = 1.0;
        t.eps2 = 1.0;
        let a_tt = f(t, HyperDual64::from(delta));

        let mut d = HyperDual64::from(delta);
        d.eps1 = 1.0;
        d.eps2 = 1.0;
        let a_dd = f(HyperDual64::from(tau), d);

        let mut t = HyperDual64::from(tau);
        let mut d = HyperDual64::from(delta);
        t.eps1 = 1.0;
        d.eps2 = 1.0;
        let a_td = f(t, d);

        Self {
            phir: a_tt.re,
            dphir_dtau: a_tt.eps1,
            dphir_ddelta: a_dd.eps1,
            d2phir_dtau2: a_tt.eps1eps2,
            d2phir_ddelta_dtau: a_td.eps1eps2,
            d2phir_ddelta2: a_dd.eps1eps2,
        }
    }
}

impl Add for ResidualDerivatives {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            phir: self.phir + rhs.phir,
            dphir_dtau: self.dphir_dtau + rhs.dphir_dtau,
            dphir_ddelta: self.dphir_ddelta + rhs.dphir_ddelta,
            d2phir_dtau2: self.d2phir_dtau2 + rhs.d2phir_dtau2,
            d2phir_ddelta_dtau: self.d2phir_ddelta_dtau + rhs.d2phir_ddelta_dtau,
            d2phir_ddelta2: self.d2phir_ddelta2 + rhs.d2phir_ddelta2,
        }
    }
}

impl AddAssign for ResidualDerivatives {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ResidualDerivatives {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl Mul<f64> for ResidualDerivatives {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            phir: self.phir * rhs,
            dphir_dtau: self.dphir_dtau * rhs,
            dphir_ddelta: self.dphir_ddelta * rhs,
            d2phir_dtau2: self.d2phir_dtau2 * rhs,
            d2phir_ddelta_dtau: self.d2phir_ddelta_dtau * rhs,
            d2phir_ddelta2: self.d2phir_ddelta2 * rhs,
        }
    }
}

impl std::iter::Sum for ResidualDerivatives {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, d| acc + d)
    }
}
