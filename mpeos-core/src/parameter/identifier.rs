use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Field of an [Identifier] used to match records against each other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierOption {
    #[default]
    Cas,
    Name,
    Formula,
}

/// Identity of a substance in parameter files.
///
/// Two identifiers compare equal if their CAS numbers are equal.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Identifier {
    /// CAS registry number
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,
    /// Commonly used english name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Chemical formula
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Identifier {
    /// Create a new identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mpeos_core::parameter::Identifier;
    /// let methane = Identifier::new(Some("74-82-8"), Some("methane"), Some("CH4"));
    /// assert_eq!(methane.cas.as_deref(), Some("74-82-8"));
    /// ```
    pub fn new(cas: Option<&str>, name: Option<&str>, formula: Option<&str>) -> Identifier {
        Identifier {
            cas: cas.map(Into::into),
            name: name.map(Into::into),
            formula: formula.map(Into::into),
        }
    }

    pub fn as_str(&self, option: IdentifierOption) -> Option<&str> {
        match option {
            IdentifierOption::Cas => self.cas.as_deref(),
            IdentifierOption::Name => self.name.as_deref(),
            IdentifierOption::Formula => self.formula.as_deref(),
        }
    }

    /// Whether both identifiers carry the field selected by `option` and agree on it.
    ///
    /// Names are compared case-insensitively.
    pub fn matches(&self, other: &Identifier, option: IdentifierOption) -> bool {
        match (self.as_str(option), other.as_str(option)) {
            (Some(a), Some(b)) if option == IdentifierOption::Name => a.eq_ignore_ascii_case(b),
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = [
            ("cas", &self.cas),
            ("name", &self.name),
            ("formula", &self.formula),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
        .collect();
        write!(f, "Identifier({})", ids.join(", "))
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.cas == other.cas
    }
}
impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cas.hash(state);
    }
}
