use super::*;
use approx::assert_relative_eq;
use mpeos::density_iteration::{density, DensityInitialization, Phase};
use mpeos::mixture::{DepartureTerms, ReducingBinaryRecord};
use mpeos::ParameterError;
use ndarray::arr1;

#[test]
fn read_binary_parameters() -> Result<(), Box<dyn Error>> {
    let binary = binary_parameters()?;
    assert_eq!(binary.reducing.len(), 3);
    assert_eq!(binary.departure.len(), 1);
    assert_eq!(
        binary.reducing[0].model_record,
        ReducingBinaryRecord::new(0.996336508, 1.049707697, 0.997547866, 1.006617867)
    );
    assert_eq!(
        *binary.departure[0].model_record.terms,
        DepartureTerms::gerg2008_methane_ethane()
    );
    Ok(())
}

#[test]
fn json_and_builtin_parameters_agree() -> Result<(), Box<dyn Error>> {
    let from_json = methane_ethane()?;
    let fluids = PengRobinsonFluid::from_json(&["methane", "ethane"], PURE, IdentifierOption::Name)?;
    let builtin = MultiFluid::new(
        into_fluids(fluids),
        &BinaryParameters::gerg2008_methane_ethane(),
    )?;
    let x = arr1(&[0.3, 0.7]);
    let (t, rho) = (210.0, 9000.0);
    assert_relative_eq!(
        from_json.pressure(t, rho, &x)?,
        builtin.pressure(t, rho, &x)?,
        max_relative = 1e-14
    );
    Ok(())
}

#[test]
fn component_order() -> Result<(), Box<dyn Error>> {
    let forward = mixture(&["methane", "ethane"])?;
    let backward = mixture(&["ethane", "methane"])?;
    let (t, p) = (150.0, 5e6);
    let x = arr1(&[0.4, 0.6]);
    let x_rev = arr1(&[0.6, 0.4]);
    let rho = density(&forward, t, p, &x, DensityInitialization::Cubic(Phase::Liquid))?;
    assert_relative_eq!(backward.pressure(t, rho, &x_rev)?, p, max_relative = 1e-10);
    let ln_phi = forward.ln_phi(t, rho, &x)?;
    let ln_phi_rev = backward.ln_phi(t, rho, &x_rev)?;
    assert_relative_eq!(ln_phi[0], ln_phi_rev[1], max_relative = 1e-10);
    assert_relative_eq!(ln_phi[1], ln_phi_rev[0], max_relative = 1e-10);
    Ok(())
}

#[test]
fn match_by_name() -> Result<(), Box<dyn Error>> {
    // the departure table spells the names with capital letters
    let fluids = PengRobinsonFluid::from_json(&["methane", "ethane"], PURE, IdentifierOption::Name)?;
    let binary = binary_parameters()?.identifier_option(IdentifierOption::Name);
    let mixture = MultiFluid::new(into_fluids(fluids), &binary)?;
    assert_eq!(mixture.departure_function().pairs().len(), 1);
    Ok(())
}

#[test]
fn ternary_without_departure() -> Result<(), Box<dyn Error>> {
    let mixture = mixture(&["methane", "ethane", "propane"])?;
    assert_eq!(mixture.components(), 3);
    assert_eq!(mixture.departure_function().pairs().len(), 1);
    let x = arr1(&[0.2, 0.3, 0.5]);
    let tr = mixture.reducing_function().reducing_temperature(&x)?;
    let dtr = mixture.reducing_function().derivatives(&x)?.dtr_dx;
    assert_relative_eq!((&x * &dtr).sum(), 2.0 * tr, max_relative = 1e-12);
    Ok(())
}

#[test]
fn unsupported_model() {
    let res = BinaryParameters::from_json(REDUCING, Some(DEPARTURE), "Peng-Robinson");
    assert!(matches!(res, Err(ParameterError::UnsupportedModel(_))));
}

#[test]
fn missing_component() {
    let res = PengRobinsonFluid::from_json(&["methane", "butane"], PURE, IdentifierOption::Name);
    assert!(matches!(res, Err(ParameterError::ComponentsNotFound(s)) if s == "butane"));
}
