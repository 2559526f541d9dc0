use approx::assert_relative_eq;
use integration_tests::{ReferenceTitration as Ref, one_site_free_titrant};
use itc_model::{
    BindingPolynomial, BindingPolynomialModel, Dilution, HeatModel, ModelError, Setup,
    ShotOutcome, SingleSite, predict_heats,
};
use proptest::prelude::*;

#[test]
fn reference_titration_matches_closed_form() {
    let prediction = predict_heats(
        &[Ref::BETA],
        &[Ref::DH],
        &[Ref::S_TOTAL; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("reference titration should predict");

    let expected_free: Vec<f64> = Ref::T_CONC
        .iter()
        .map(|&t| one_site_free_titrant(Ref::BETA, Ref::S_TOTAL, t))
        .collect();

    // The root finder stops once the bracket is within x_abs_tol = 2e-12, so
    // free concentrations are compared on that absolute scale.
    assert_eq!(prediction.t_free.len(), 3);
    assert_relative_eq!(prediction.t_free[0], 0.0);
    assert_relative_eq!(prediction.t_free[1], expected_free[1], epsilon = 2e-12);
    assert_relative_eq!(prediction.t_free[2], expected_free[2], epsilon = 2e-12);

    // √2·1e-5 and (1 + √5)·1e-5
    assert_relative_eq!(prediction.t_free[1], 1.414_213_562_373_095e-5, epsilon = 2e-12);
    assert_relative_eq!(prediction.t_free[2], 3.236_067_977_499_79e-5, epsilon = 2e-12);

    let avg_dh = |t: f64| Ref::DH * Ref::BETA * t / (1.0 + Ref::BETA * t);
    for j in 0..2 {
        let expected = Ref::CELL_VOLUME
            * Ref::S_TOTAL
            * (avg_dh(expected_free[j + 1]) - avg_dh(expected_free[j]));
        assert_relative_eq!(prediction.heats[j], expected, max_relative = 1e-9);
    }
    assert_relative_eq!(prediction.heats[0], -4.100_505_063_388_335e-5, max_relative = 1e-9);
    assert_relative_eq!(prediction.heats[1], -1.247_019_094_113_136_8e-5, max_relative = 1e-9);

    assert_eq!(prediction.outcomes[0], ShotOutcome::NoTitrant);
    assert!(matches!(prediction.outcomes[1], ShotOutcome::Solved { .. }));
}

#[test]
fn model_trait_agrees_with_entry_point() {
    let model = BindingPolynomialModel::new(Ref::polynomial().expect("valid"));
    let heats = model.dq(&Ref::experiment().expect("valid")).expect("predicts");

    let prediction = predict_heats(
        &[Ref::BETA],
        &[Ref::DH],
        &[Ref::S_TOTAL; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("predicts");

    assert_eq!(heats, prediction.heats);
}

#[test]
fn site_order_matters() {
    let forward = predict_heats(
        &[1e5, 1e9],
        &[-5000.0, -1000.0],
        &[1e-5; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("predicts");
    let reversed = predict_heats(
        &[1e9, 1e5],
        &[-1000.0, -5000.0],
        &[1e-5; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("predicts");

    assert!((forward.heats[0] - reversed.heats[0]).abs() > 1e-12);
}

#[test]
fn reversing_shot_order_changes_heats() {
    let forward = predict_heats(
        &[Ref::BETA],
        &[Ref::DH],
        &[Ref::S_TOTAL; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("predicts");

    let mut reversed_conc = Ref::T_CONC;
    reversed_conc.reverse();
    let reversed = predict_heats(
        &[Ref::BETA],
        &[Ref::DH],
        &[Ref::S_TOTAL; 3],
        &reversed_conc,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    )
    .expect("predicts");

    assert_eq!(reversed.heats.len(), 2);
    assert_ne!(forward.heats, reversed.heats);
}

#[test]
fn mismatched_parameters_are_rejected() {
    let result = predict_heats(
        &[1e5, 1e6],
        &[-5000.0],
        &[1e-5; 3],
        &Ref::T_CONC,
        Ref::CELL_VOLUME,
        &[0.0, 0.0],
    );
    assert!(matches!(result, Err(ModelError::InvalidInput(_))));
}

#[test]
fn default_setup_end_to_end() {
    let setup = Setup::default();
    let dilution = Dilution {
        heat: 0.0,
        intercept: -0.1,
    };
    let experiment = setup.experiment(1.0, &dilution).expect("valid setup");

    let polynomial = BindingPolynomial::with_guesses(1).expect("one site");
    let heats = BindingPolynomialModel::new(polynomial)
        .dq(&experiment)
        .expect("predicts");
    let closed = SingleSite::default().dq(&experiment).expect("computes");

    assert_eq!(heats.len(), 30);
    for (solved, exact) in heats.iter().zip(&closed) {
        assert_relative_eq!(*solved, *exact, epsilon = 1e-3, max_relative = 1e-3);
    }

    // Exothermic binding: early injections release the most heat.
    assert!(heats[0] < heats[29]);
}

proptest! {
    #[test]
    fn free_titrant_stays_within_shot_total(
        log_beta in 2.0f64..9.0,
        dh in -10_000.0f64..10_000.0,
        s_total in 1e-6f64..1e-3,
        increments in prop::collection::vec(1e-7f64..1e-4, 1..12),
    ) {
        let mut t_conc = vec![0.0];
        for step in &increments {
            let last = t_conc[t_conc.len() - 1];
            t_conc.push(last + step);
        }
        let shots = t_conc.len();

        let prediction = predict_heats(
            &[10f64.powf(log_beta)],
            &[dh],
            &vec![s_total; shots],
            &t_conc,
            1.4e-3,
            &vec![0.0; shots - 1],
        )
        .expect("valid titration should predict");

        prop_assert_eq!(prediction.t_free.len(), shots);
        prop_assert_eq!(prediction.heats.len(), shots - 1);
        for (t_free, t_total) in prediction.t_free.iter().zip(&t_conc) {
            prop_assert!(*t_free >= 0.0);
            prop_assert!(t_free <= t_total);
        }
        prop_assert!(prediction.heats.iter().all(|q| q.is_finite()));
    }
}
