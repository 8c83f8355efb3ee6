use super::*;
use approx::assert_relative_eq;
use mpeos::{EosError, FlashResult, PhaseEquilibrium, SolverOptions};
use ndarray::arr1;

#[test]
fn two_phase_flash() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let z = arr1(&[0.5, 0.5]);
    let p = 1e6;
    let t_bubble = PhaseEquilibrium::bubble_point(&mixture, p, &z, Default::default())?;
    let t_dew = PhaseEquilibrium::dew_point(&mixture, p, &z, Default::default())?;
    let (t_bubble, t_dew) = (t_bubble.temperature(), t_dew.temperature());
    let t = 0.5 * (t_bubble + t_dew);

    let flash = PhaseEquilibrium::tp_flash(&mixture, t, p, &z, SolverOptions::default())?;
    let FlashResult::TwoPhase(vle) = flash else {
        panic!("expected two phases, got {flash}");
    };
    let beta = vle.vapor_fraction();
    assert!(beta > 0.0 && beta < 1.0);
    let z_calc = &vle.vapor().molefracs * beta + &vle.liquid().molefracs * (1.0 - beta);
    assert_relative_eq!(z_calc, z, epsilon = 1e-6);
    assert_relative_eq!(vle.vapor().molefracs.sum(), 1.0, epsilon = 1e-8);
    assert_relative_eq!(vle.liquid().molefracs.sum(), 1.0, epsilon = 1e-8);
    for state in [vle.vapor(), vle.liquid()] {
        let p_calc = mixture.pressure(t, state.density, &state.molefracs)?;
        assert_relative_eq!(p_calc, p, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn tp_flash_idempotent() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let z = arr1(&[0.6, 0.4]);
    let (t, p) = (190.0, 1.5e6);
    let first = PhaseEquilibrium::tp_flash(&mixture, t, p, &z, SolverOptions::default())?;
    let second = PhaseEquilibrium::tp_flash(&mixture, t, p, &z, SolverOptions::default())?;
    let (Some(first), Some(second)) = (first.two_phase(), second.two_phase()) else {
        panic!("expected two phases");
    };
    assert_eq!(first.vapor_fraction(), second.vapor_fraction());
    assert_eq!(first.vapor().molefracs, second.vapor().molefracs);
    assert_eq!(first.liquid().density, second.liquid().density);

    // flashing one of the phases again stays at its phase boundary
    let liquid = PhaseEquilibrium::tp_flash(
        &mixture,
        t,
        p,
        &first.liquid().molefracs,
        SolverOptions::default(),
    )?;
    assert!(liquid.vapor_fraction() < 1e-4);
    Ok(())
}

#[test]
fn flash_near_bubble_point() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let z = arr1(&[0.5, 0.5]);
    let p = 1e6;
    let bubble = PhaseEquilibrium::bubble_point(&mixture, p, &z, Default::default())?;
    let t_bubble = bubble.temperature();

    let below = PhaseEquilibrium::tp_flash(&mixture, t_bubble - 2.0, p, &z, Default::default())?;
    assert!(matches!(below, FlashResult::SubcooledLiquid(_)));

    let above = PhaseEquilibrium::tp_flash(&mixture, t_bubble + 2.0, p, &z, Default::default())?;
    let beta = above.vapor_fraction();
    assert!(above.is_two_phase());
    assert!(beta > 0.0 && beta < 0.5);
    Ok(())
}

#[test]
fn flash_near_dew_point() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let z = arr1(&[0.5, 0.5]);
    let p = 1e6;
    let t_dew = PhaseEquilibrium::dew_point(&mixture, p, &z, Default::default())?.temperature();
    let flash = PhaseEquilibrium::tp_flash(&mixture, t_dew + 2.0, p, &z, Default::default())?;
    let FlashResult::SuperheatedVapor(vapor) = flash else {
        panic!("expected a vapor");
    };
    assert_eq!(vapor.molefracs, z);
    Ok(())
}

#[test]
fn iteration_limit() -> Result<(), Box<dyn Error>> {
    let mixture = methane_ethane()?;
    let z = arr1(&[0.5, 0.5]);
    let options = SolverOptions::new().max_iter(2);
    let res = PhaseEquilibrium::tp_flash(&mixture, 200.0, 1e6, &z, options);
    assert!(matches!(res, Err(EosError::NotConverged(_))));
    Ok(())
}
