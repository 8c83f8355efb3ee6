use super::departure::{BinaryDeparture, DepartureRecord, DepartureTerms};
use super::reducing::ReducingBinaryRecord;
use mpeos_core::parameter::{BinaryRecord, Identifier, IdentifierOption, PairOrder, ParameterError};
use mpeos_core::PureFluid;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Names of the departure function formulations that can be read from a departure table.
pub const SUPPORTED_DEPARTURE_MODELS: [&str; 2] = ["Kunz-JCED-2012", "GERG-2008"];

fn unity() -> f64 {
    1.0
}

/// Entry of a departure table.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum DepartureTableEntry {
    Pair(DeparturePairEntry),
    /// Departure function shared by lists of substances. Such entries are
    /// not supported and skipped when the table is read.
    Group {
        #[serde(rename = "Names1")]
        names1: Vec<String>,
        #[serde(rename = "Names2")]
        names2: Vec<String>,
    },
}

/// Departure function of a single pair as stored in a departure table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeparturePairEntry {
    #[serde(rename = "Name1", default, skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    #[serde(rename = "Name2", default, skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(rename = "CAS1")]
    pub cas1: String,
    #[serde(rename = "CAS2")]
    pub cas2: String,
    /// Weighting factor $F_{ij}$
    #[serde(rename = "F", default = "unity")]
    pub f: f64,
    #[serde(flatten)]
    pub coefficients: DepartureRecord,
}

/// All departure functions of one model in a departure table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DepartureModelRecord {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Coeffs")]
    pub coeffs: Vec<DepartureTableEntry>,
}

/// Validated departure function of a pair of substances.
#[derive(Debug, Clone)]
pub struct DepartureBinaryRecord {
    /// Weighting factor $F_{ij}$
    pub f: f64,
    pub terms: Arc<DepartureTerms>,
}

impl DepartureBinaryRecord {
    pub fn new(f: f64, record: &DepartureRecord) -> Result<Self, ParameterError> {
        if !f.is_finite() {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "the weighting factor of a departure function has to be finite",
            )));
        }
        Ok(Self {
            f,
            terms: Arc::new(DepartureTerms::try_from(record)?),
        })
    }
}

/// Binary interaction parameters of the multi-fluid mixture model.
///
/// Records are matched to pairs of components by the identifier selected with
/// `identifier_option`, in either order. Pairs without a reducing record use
/// unit parameters, pairs without a departure record have no departure function.
#[derive(Debug, Clone, Default)]
pub struct BinaryParameters {
    pub reducing: Vec<BinaryRecord<Identifier, ReducingBinaryRecord>>,
    pub departure: Vec<BinaryRecord<Identifier, DepartureBinaryRecord>>,
    pub identifier_option: IdentifierOption,
}

impl BinaryParameters {
    pub fn new(
        reducing: Vec<BinaryRecord<Identifier, ReducingBinaryRecord>>,
        departure: Vec<BinaryRecord<Identifier, DepartureBinaryRecord>>,
    ) -> Self {
        Self {
            reducing,
            departure,
            identifier_option: IdentifierOption::Cas,
        }
    }

    pub fn identifier_option(mut self, identifier_option: IdentifierOption) -> Self {
        self.identifier_option = identifier_option;
        self
    }

    /// Reducing parameters and departure function of methane and ethane
    /// of the GERG-2008 model.
    pub fn gerg2008_methane_ethane() -> Self {
        let methane = Identifier::new(Some("74-82-8"), Some("methane"), Some("CH4"));
        let ethane = Identifier::new(Some("74-84-0"), Some("ethane"), Some("C2H6"));
        let reducing = ReducingBinaryRecord::new(0.996336508, 1.049707697, 0.997547866, 1.006617867);
        let departure = DepartureBinaryRecord {
            f: 1.0,
            terms: Arc::new(DepartureTerms::gerg2008_methane_ethane()),
        };
        Self::new(
            vec![BinaryRecord::new(methane.clone(), ethane.clone(), reducing)],
            vec![BinaryRecord::new(methane, ethane, departure)],
        )
    }

    /// Select and validate the departure functions of `model` from a departure table.
    pub fn departure_from_table(
        table: &[DepartureModelRecord],
        model: &str,
    ) -> Result<Vec<BinaryRecord<Identifier, DepartureBinaryRecord>>, ParameterError> {
        if !SUPPORTED_DEPARTURE_MODELS.contains(&model) {
            return Err(ParameterError::UnsupportedModel(model.to_string()));
        }
        if !table.iter().any(|m| m.model == model) {
            return Err(ParameterError::UnsupportedModel(format!(
                "{model} (not found in departure table)"
            )));
        }
        table
            .iter()
            .filter(|m| m.model == model)
            .flat_map(|m| m.coeffs.iter())
            .filter_map(|e| match e {
                DepartureTableEntry::Pair(e) => Some(e),
                DepartureTableEntry::Group { .. } => None,
            })
            .map(|e| {
                let id1 = Identifier::new(Some(&e.cas1), e.name1.as_deref(), None);
                let id2 = Identifier::new(Some(&e.cas2), e.name2.as_deref(), None);
                let record = DepartureBinaryRecord::new(e.f, &e.coefficients)?;
                Ok(BinaryRecord::new(id1, id2, record))
            })
            .collect()
    }

    /// Read binary parameters from a json file of reducing parameters and an optional
    /// departure table, from which the departure functions of `model` are used.
    pub fn from_json<P: AsRef<Path>>(
        reducing_file: P,
        departure_file: Option<P>,
        model: &str,
    ) -> Result<Self, ParameterError> {
        let reducing = BinaryRecord::from_json(reducing_file)?;
        let departure = match departure_file {
            Some(file) => {
                let table: Vec<DepartureModelRecord> =
                    serde_json::from_reader(BufReader::new(File::open(file)?))?;
                Self::departure_from_table(&table, model)?
            }
            None => Vec::new(),
        };
        Ok(Self::new(reducing, departure))
    }

    /// Matrix of reducing parameters, oriented along the given component order.
    pub fn reducing_matrix(
        &self,
        fluids: &[Arc<dyn PureFluid>],
    ) -> Result<Array2<ReducingBinaryRecord>, ParameterError> {
        let n = fluids.len();
        let mut matrix = Array2::from_elem((n, n), ReducingBinaryRecord::default());
        for i in 0..n {
            for j in i + 1..n {
                let Some((record, order)) = BinaryRecord::find_pair(
                    &self.reducing,
                    fluids[i].identifier(),
                    fluids[j].identifier(),
                    self.identifier_option,
                )?
                else {
                    continue;
                };
                let values = [record.beta_t, record.gamma_t, record.beta_v, record.gamma_v];
                if values.iter().any(|&v| !v.is_finite() || v <= 0.0) {
                    return Err(ParameterError::IncompatibleParameters(format!(
                        "invalid reducing parameters for {} and {}: {record}",
                        fluids[i].identifier(),
                        fluids[j].identifier()
                    )));
                }
                let (forward, backward) = match order {
                    PairOrder::Forward => (*record, record.reversed()),
                    PairOrder::Reversed => (record.reversed(), *record),
                };
                matrix[(i, j)] = forward;
                matrix[(j, i)] = backward;
            }
        }
        Ok(matrix)
    }

    /// Departure functions of all pairs of the given components that have one.
    pub fn departure_pairs(
        &self,
        fluids: &[Arc<dyn PureFluid>],
    ) -> Result<Vec<BinaryDeparture>, ParameterError> {
        let n = fluids.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                if let Some((record, _)) = BinaryRecord::find_pair(
                    &self.departure,
                    fluids[i].identifier(),
                    fluids[j].identifier(),
                    self.identifier_option,
                )? {
                    pairs.push(BinaryDeparture {
                        i,
                        j,
                        f: record.f,
                        terms: record.terms.clone(),
                    });
                }
            }
        }
        Ok(pairs)
    }
}
