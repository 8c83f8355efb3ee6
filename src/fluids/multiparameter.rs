use mpeos_core::parameter::{Identifier, IdentifierOption, ParameterError, PureRecord};
use mpeos_core::{PureFluid, ResidualHelmholtzEnergyDual};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Coefficients of a multiparameter residual Helmholtz energy
/// $\alpha^\mathrm{r}=\sum_k n_k\delta^{d_k}\tau^{t_k}\exp\left(-\delta^{l_k}\right)$,
/// where terms with $l_k=0$ carry no exponential.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MultiParameterRecord {
    /// critical temperature in Kelvin
    pub tc: f64,
    /// critical pressure in Pascal
    pub pc: f64,
    /// critical molar density in mol/m³
    pub rhoc: f64,
    pub acentric_factor: f64,
    pub n: Vec<f64>,
    pub d: Vec<f64>,
    pub t: Vec<f64>,
    #[serde(default)]
    pub l: Vec<i32>,
}

impl fmt::Display for MultiParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MultiParameterRecord(tc={} K, pc={} Pa, rhoc={} mol/m³, acentric factor={}, terms={})",
            self.tc,
            self.pc,
            self.rhoc,
            self.acentric_factor,
            self.n.len()
        )
    }
}

#[derive(Debug, Clone)]
struct PowerTerm {
    n: f64,
    d: f64,
    t: f64,
}

#[derive(Debug, Clone)]
struct ExponentialTerm {
    n: f64,
    d: f64,
    t: f64,
    l: i32,
}

/// Pure fluid described by a multiparameter equation of state.
#[derive(Debug, Clone)]
pub struct MultiParameterFluid {
    identifier: Identifier,
    record: MultiParameterRecord,
    power: Vec<PowerTerm>,
    exponential: Vec<ExponentialTerm>,
}

impl MultiParameterFluid {
    pub fn new(pure_record: PureRecord<MultiParameterRecord>) -> Result<Self, ParameterError> {
        let r = pure_record.model_record;
        let id = &pure_record.identifier;
        if [r.tc, r.pc, r.rhoc].iter().any(|&v| !v.is_finite() || v <= 0.0) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "invalid critical point for {id}"
            )));
        }
        let nterms = r.n.len();
        if r.d.len() != nterms || r.t.len() != nterms || !(r.l.is_empty() || r.l.len() == nterms)
        {
            return Err(ParameterError::IncompatibleParameters(format!(
                "coefficient arrays of {id} differ in length"
            )));
        }
        if r.n.iter().chain(&r.d).chain(&r.t).any(|v| !v.is_finite()) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "non-finite coefficients for {id}"
            )));
        }

        let mut power = Vec::new();
        let mut exponential = Vec::new();
        for k in 0..nterms {
            let (n, d, t) = (r.n[k], r.d[k], r.t[k]);
            match r.l.get(k).copied().unwrap_or(0) {
                0 => power.push(PowerTerm { n, d, t }),
                l => exponential.push(ExponentialTerm { n, d, t, l }),
            }
        }

        Ok(Self {
            identifier: pure_record.identifier,
            record: r,
            power,
            exponential,
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

    pub fn record(&self) -> &MultiParameterRecord {
        &self.record
    }
}

impl fmt::Display for MultiParameterFluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiParameterFluid({}, {})", self.identifier, self.record)
    }
}

impl<D: DualNum<f64> + Copy> ResidualHelmholtzEnergyDual<D> for MultiParameterFluid {
    fn residual_helmholtz_energy(&self, tau: D, delta: D) -> D {
        let mut phir = D::zero();
        for term in &self.power {
            phir += delta.powf(term.d) * tau.powf(term.t) * term.n;
        }
        for term in &self.exponential {
            phir += delta.powf(term.d) * tau.powf(term.t) * (-delta.powi(term.l)).exp() * term.n;
        }
        phir
    }
}

impl PureFluid for MultiParameterFluid {
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
