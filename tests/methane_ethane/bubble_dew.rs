use super::*;
use approx::assert_relative_eq;
use mpeos::{PhaseEquilibrium, SaturationType, SolverOptions};
use ndarray::arr1;

/// Saturation temperature of a pure component at given pressure.
fn pure_saturation_temperature(name: &str, pressure: f64) -> Result<f64, Box<dyn Error>> {
    let pure = mixture(&[name])?;
    let vle = PhaseEquilibrium::bubble_point(&pure, pressure, &arr1(&[1.0]), Default::default())?;
    Ok(vle.temperature())
}

#[test]
fn pure_component_saturation() -> Result<(), Box<dyn Error>> {
    let pure = mixture(&["ethane"])?;
    let p = 1e6;
    let vle = PhaseEquilibrium::bubble_point(&pure, p, &arr1(&[1.0]), Default::default())?;
    let t = vle.temperature();
    assert!(t > 230.0 && t < 260.0);
    assert!(vle.liquid().density > 5.0 * vle.vapor().density);
    assert_relative_eq!(
        pure.fugacity(t, vle.liquid().density, &arr1(&[1.0]), 0)?,
        pure.fugacity(t, vle.vapor().density, &arr1(&[1.0]), 0)?,
        max_relative = 1e-7
    );
    Ok(())
}

#[test]
fn bubble_point_between_pure_components() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let p = 1e6;
    let x = arr1(&[0.5, 0.5]);
    let vle = PhaseEquilibrium::saturation_point(
        &mixture,
        SaturationType::Bubble,
        p,
        &x,
        SolverOptions::default(),
    )?;
    let t_methane = pure_saturation_temperature("methane", p)?;
    let t_ethane = pure_saturation_temperature("ethane", p)?;
    assert!(vle.temperature() > t_methane);
    assert!(vle.temperature() < t_ethane);
    assert!(vle.vapor().molefracs[0] > x[0]);
    assert_eq!(vle.vapor_fraction(), 0.0);
    Ok(())
}

#[test]
fn dew_point_between_pure_components() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let p = 1e6;
    let y = arr1(&[0.5, 0.5]);
    let dew = PhaseEquilibrium::saturation_point(
        &mixture,
        SaturationType::Dew,
        p,
        &y,
        SolverOptions::default(),
    )?;
    let bubble = PhaseEquilibrium::bubble_point(&mixture, p, &y, SolverOptions::default())?;
    assert!(dew.temperature() > bubble.temperature());
    assert!(dew.temperature() < pure_saturation_temperature("ethane", p)?);
    assert!(dew.liquid().molefracs[0] < y[0]);
    assert_eq!(dew.vapor_fraction(), 1.0);
    Ok(())
}

#[test]
fn dew_and_bubble_point_consistent() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let p = 1e6;
    let y = arr1(&[0.7, 0.3]);
    let dew = PhaseEquilibrium::dew_point(&mixture, p, &y, SolverOptions::default())?;
    let bubble = PhaseEquilibrium::bubble_point(
        &mixture,
        p,
        &dew.liquid().molefracs,
        SolverOptions::default(),
    )?;
    assert_relative_eq!(bubble.temperature(), dew.temperature(), max_relative = 1e-6);
    assert_relative_eq!(bubble.vapor().molefracs, y, epsilon = 1e-6);
    Ok(())
}

#[test]
fn supercritical_pure_component() -> Result<(), Box<dyn Error>> {
    let pure = mixture(&["methane"])?;
    let res = PhaseEquilibrium::bubble_point(&pure, 1e7, &arr1(&[1.0]), Default::default());
    assert!(res.is_err());
    Ok(())
}
