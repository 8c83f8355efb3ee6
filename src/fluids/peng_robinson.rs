use crate::cubic::{PR_A, PR_B};
use mpeos_core::parameter::{Identifier, IdentifierOption, ParameterError, PureRecord};
use mpeos_core::{PureFluid, ResidualHelmholtzEnergyDual, RGAS};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;
use std::path::Path;

/// Peng-Robinson parameters for a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PengRobinsonRecord {
    /// critical temperature in Kelvin
    pub tc: f64,
    /// critical pressure in Pascal
    pub pc: f64,
    /// critical molar density in mol/m³
    pub rhoc: f64,
    /// acentric factor
    pub acentric_factor: f64,
}

impl PengRobinsonRecord {
    pub fn new(tc: f64, pc: f64, rhoc: f64, acentric_factor: f64) -> Self {
        Self {
            tc,
            pc,
            rhoc,
            acentric_factor,
        }
    }
}

impl fmt::Display for PengRobinsonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PengRobinsonRecord(tc={} K", self.tc)?;
        write!(f, ", pc={} Pa", self.pc)?;
        write!(f, ", rhoc={} mol/m³", self.rhoc)?;
        write!(f, ", acentric factor={})", self.acentric_factor)
    }
}

/// Peng-Robinson equation of state of a pure substance expressed as reduced
/// residual Helmholtz energy.
///
/// The reducing state is the experimental critical point given in the record,
/// which generally differs from the critical point of the cubic equation.
#[derive(Debug, Clone)]
pub struct PengRobinsonFluid {
    identifier: Identifier,
    record: PengRobinsonRecord,
    a: f64,
    b: f64,
    kappa: f64,
}

impl PengRobinsonFluid {
    pub fn new(pure_record: PureRecord<PengRobinsonRecord>) -> Result<Self, ParameterError> {
        let r = pure_record.model_record;
        if [r.tc, r.pc, r.rhoc]
            .iter()
            .any(|&v| !v.is_finite() || v <= 0.0)
            || !r.acentric_factor.is_finite()
        {
            return Err(ParameterError::IncompatibleParameters(format!(
                "invalid Peng-Robinson parameters for {}",
                pure_record.identifier
            )));
        }
        let a = PR_A * (RGAS * r.tc).powi(2) / r.pc;
        let b = PR_B * RGAS * r.tc / r.pc;
        let kappa = 0.37464 + (1.54226 - 0.26992 * r.acentric_factor) * r.acentric_factor;
        Ok(Self {
            identifier: pure_record.identifier,
            record: r,
            a,
            b,
            kappa,
        })
    }

    /// Read the fluids from a json file of [PureRecord]s in the order of `substances`.
    pub fn from_json<P: AsRef<Path>>(
        substances: &[&str],
        file: P,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError> {
        PureRecord::from_json(substances, file, identifier_option)?
            .into_iter()
            .map(Self::new)
            .collect()
    }

    pub fn record(&self) -> &PengRobinsonRecord {
        &self.record
    }
}

impl fmt::Display for PengRobinsonFluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PengRobinsonFluid({}, {})", self.identifier, self.record)
    }
}

impl<D: DualNum<f64> + Copy> ResidualHelmholtzEnergyDual<D> for PengRobinsonFluid {
    fn residual_helmholtz_energy(&self, tau: D, delta: D) -> D {
        let r = &self.record;
        // sqrt(T/Tc) = tau^(-1/2)
        let alpha = ((-tau.recip().sqrt() + 1.0) * self.kappa + 1.0).powi(2);
        let b_rho = delta * (self.b * r.rhoc);
        let a_rt = alpha * tau * (self.a / (RGAS * r.tc));
        -(-b_rho + 1.0).ln()
            - a_rt / (self.b * 2.0 * SQRT_2)
                * ((b_rho * (1.0 + SQRT_2) + 1.0) / (b_rho * (1.0 - SQRT_2) + 1.0)).ln()
    }
}

impl PureFluid for PengRobinsonFluid {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn critical_temperature(&self) -> f64 {
        self.record.tc
    }

    fn critical_pressure(&self) -> f64 {
        self.record.pc
    }

    fn critical_density(&self) -> f64 {
        self.record.rhoc
    }

    fn acentric_factor(&self) -> f64 {
        self.record.acentric_factor
    }
}
