//! Structures and traits that can be used to build model parameters for equations of state.
use std::io;
use thiserror::Error;

mod identifier;
mod model_record;

pub use identifier::{Identifier, IdentifierOption};
pub use model_record::{BinaryRecord, PairOrder, PureRecord};

/// Error type for incomplete parameter information and IO problems.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The following component(s) were not found: {0}")]
    ComponentsNotFound(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
    #[error("The model '{0}' is not supported.")]
    UnsupportedModel(String),
    #[error("More than one binary record found for {0} and {1}.")]
    AmbiguousBinary(String, String),
}
