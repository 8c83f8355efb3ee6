//! Pure fluid equations of state that can be combined into mixtures.
use mpeos_core::PureFluid;
use std::sync::Arc;

mod multiparameter;
mod peng_robinson;
pub use multiparameter::{MultiParameterFluid, MultiParameterRecord};
pub use peng_robinson::{PengRobinsonFluid, PengRobinsonRecord};

/// Convert a list of pure fluids into the trait objects used by [MultiFluid](crate::MultiFluid).
pub fn into_fluids<F: PureFluid + 'static>(fluids: Vec<F>) -> Vec<Arc<dyn PureFluid>> {
    fluids
        .into_iter()
        .map(|f| Arc::new(f) as Arc<dyn PureFluid>)
        .collect()
}
