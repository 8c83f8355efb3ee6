use mpeos::fluids::{into_fluids, PengRobinsonFluid};
use mpeos::{BinaryParameters, IdentifierOption, MultiFluid};
use std::error::Error;

mod bubble_dew;
mod parameters;
mod tp_flash;

const PURE: &str = "tests/methane_ethane/pure_parameters.json";
const REDUCING: &str = "tests/methane_ethane/reducing_parameters.json";
const DEPARTURE: &str = "tests/methane_ethane/departure_parameters.json";

fn binary_parameters() -> Result<BinaryParameters, Box<dyn Error>> {
    Ok(BinaryParameters::from_json(
        REDUCING,
        Some(DEPARTURE),
        "Kunz-JCED-2012",
    )?)
}

fn mixture(components: &[&str]) -> Result<MultiFluid, Box<dyn Error>> {
    let fluids = PengRobinsonFluid::from_json(components, PURE, IdentifierOption::Name)?;
    Ok(MultiFluid::new(into_fluids(fluids), &binary_parameters()?)?)
}

fn methane_ethane() -> Result<MultiFluid, Box<dyn Error>> {
    mixture(&["methane", "ethane"])
}
