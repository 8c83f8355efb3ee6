use super::identifier::{Identifier, IdentifierOption};
use super::ParameterError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A collection of parameters of a pure substance.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PureRecord<M> {
    pub identifier: Identifier,
    pub model_record: M,
}

impl<M> PureRecord<M> {
    /// Create a new `PureRecord`.
    pub fn new(identifier: Identifier, model_record: M) -> Self {
        Self {
            identifier,
            model_record,
        }
    }

    /// Read the records of the given substances from a json file.
    ///
    /// The records are returned in the order of `substances`.
    pub fn from_json<P>(
        substances: &[&str],
        file: P,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError>
    where
        P: AsRef<Path>,
        M: DeserializeOwned,
    {
        let file_records: Vec<Self> = serde_json::from_reader(BufReader::new(File::open(file)?))?;
        Self::select(substances, file_records, identifier_option)
    }

    /// Pick the records of `substances` out of `records`.
    pub fn select(
        substances: &[&str],
        records: Vec<Self>,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError> {
        let mut queried: IndexMap<&str, Option<Self>> =
            substances.iter().map(|&s| (s, None)).collect();
        if queried.len() != substances.len() {
            return Err(ParameterError::IncompatibleParameters(
                "A substance was defined more than once.".to_string(),
            ));
        }

        for record in records {
            if let Some(slot) = record
                .identifier
                .as_str(identifier_option)
                .and_then(|id| queried.get_mut(id))
            {
                slot.get_or_insert(record);
            }
        }

        let missing: Vec<_> = queried
            .iter()
            .filter(|(_, r)| r.is_none())
            .map(|(&s, _)| s)
            .collect();
        if !missing.is_empty() {
            return Err(ParameterError::ComponentsNotFound(missing.join(", ")));
        }
        Ok(queried.into_values().flatten().collect())
    }
}

impl<M> std::fmt::Display for PureRecord<M>
where
    M: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PureRecord(")?;
        write!(f, "\n\tidentifier={},", self.identifier)?;
        write!(f, "\n\tmodel_record={},", self.model_record)?;
        write!(f, "\n)")
    }
}

/// Orientation of a binary record relative to an ordered pair of components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {
    /// `id1` matches the first and `id2` the second component.
    Forward,
    /// `id1` matches the second and `id2` the first component.
    Reversed,
}

/// A collection of parameters that model interactions between two
/// substances.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BinaryRecord<I, B> {
    /// Identifier of the first component
    pub id1: I,
    /// Identifier of the second component
    pub id2: I,
    /// Binary interaction parameter(s)
    pub model_record: B,
}

impl<I, B> BinaryRecord<I, B> {
    /// Crates a new `BinaryRecord`.
    pub fn new(id1: I, id2: I, model_record: B) -> Self {
        Self {
            id1,
            id2,
            model_record,
        }
    }

    /// Read a list of `BinaryRecord`s from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError>
    where
        I: DeserializeOwned,
        B: DeserializeOwned,
    {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }
}

impl<B> BinaryRecord<Identifier, B> {
    /// Checks whether the record describes the pair `(first, second)` in either order.
    pub fn pair_order(
        &self,
        first: &Identifier,
        second: &Identifier,
        option: IdentifierOption,
    ) -> Option<PairOrder> {
        if self.id1.matches(first, option) && self.id2.matches(second, option) {
            Some(PairOrder::Forward)
        } else if self.id1.matches(second, option) && self.id2.matches(first, option) {
            Some(PairOrder::Reversed)
        } else {
            None
        }
    }

    /// Finds the unique record for the pair `(first, second)`.
    ///
    /// Returns `Ok(None)` if no record matches and an error if more than one does.
    pub fn find_pair<'a>(
        records: &'a [Self],
        first: &Identifier,
        second: &Identifier,
        option: IdentifierOption,
    ) -> Result<Option<(&'a B, PairOrder)>, ParameterError> {
        let mut matches = records
            .iter()
            .filter_map(|r| r.pair_order(first, second, option).map(|o| (&r.model_record, o)));
        let found = matches.next();
        if found.is_some() && matches.next().is_some() {
            return Err(ParameterError::AmbiguousBinary(
                first.to_string(),
                second.to_string(),
            ));
        }
        Ok(found)
    }
}

impl<I, B> std::fmt::Display for BinaryRecord<I, B>
where
    I: std::fmt::Display,
    B: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryRecord(")?;
        write!(f, "\n\tid1={},", self.id1)?;
        write!(f, "\n\tid2={},", self.id2)?;
        write!(f, "\n\tmodel_record={},", self.model_record)?;
        write!(f, "\n)")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct TestModelRecord {
        tc: f64,
    }

    #[test]
    fn deserialize() {
        let r = r#"
        {
            "identifier": {
                "cas": "74-84-0",
                "name": "ethane"
            },
            "model_record": {
                "tc": 305.322
            }
        }
        "#;
        let record: PureRecord<TestModelRecord> = serde_json::from_str(r).unwrap();
        assert_eq!(record.identifier.name.as_deref(), Some("ethane"));
        assert_eq!(record.model_record.tc, 305.322);
    }

    #[test]
    fn select_keeps_order() {
        let records = vec![
            PureRecord::new(
                Identifier::new(Some("74-82-8"), Some("methane"), None),
                TestModelRecord { tc: 190.564 },
            ),
            PureRecord::new(
                Identifier::new(Some("74-84-0"), Some("ethane"), None),
                TestModelRecord { tc: 305.322 },
            ),
        ];
        let selected =
            PureRecord::select(&["ethane", "methane"], records, IdentifierOption::Name).unwrap();
        assert_eq!(selected[0].model_record.tc, 305.322);
        assert_eq!(selected[1].model_record.tc, 190.564);
    }

    #[test]
    fn select_missing() {
        let records = vec![PureRecord::new(
            Identifier::new(Some("74-82-8"), Some("methane"), None),
            TestModelRecord { tc: 190.564 },
        )];
        let err = PureRecord::select(&["methane", "propane"], records, IdentifierOption::Name);
        assert!(matches!(err, Err(ParameterError::ComponentsNotFound(s)) if s == "propane"));
    }

    #[test]
    fn pair_order() {
        let methane = Identifier::new(Some("74-82-8"), None, None);
        let ethane = Identifier::new(Some("74-84-0"), None, None);
        let propane = Identifier::new(Some("74-98-6"), None, None);
        let records = vec![BinaryRecord::new(methane.clone(), ethane.clone(), 1.5)];

        let (b, order) = BinaryRecord::find_pair(&records, &ethane, &methane, IdentifierOption::Cas)
            .unwrap()
            .unwrap();
        assert_eq!(*b, 1.5);
        assert_eq!(order, PairOrder::Reversed);
        assert!(
            BinaryRecord::find_pair(&records, &methane, &propane, IdentifierOption::Cas)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn ambiguous_pair() {
        let methane = Identifier::new(Some("74-82-8"), None, None);
        let ethane = Identifier::new(Some("74-84-0"), None, None);
        let records = vec![
            BinaryRecord::new(methane.clone(), ethane.clone(), 1.5),
            BinaryRecord::new(ethane.clone(), methane.clone(), 1.2),
        ];
        let err = BinaryRecord::find_pair(&records, &methane, &ethane, IdentifierOption::Cas);
        assert!(matches!(err, Err(ParameterError::AmbiguousBinary(_, _))));
    }
}
