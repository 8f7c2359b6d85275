use crtcompute::compute::methods::{
    combined_cluster_size, combined_clusters, combined_params, combined_power, single_1df_clusters,
    single_1df_power, DesignParams,
};
use crtcompute::compute::{compute_design, DesignInput, Dist, Output, SampleSize, SearchConfig};
use crtcompute::{CrtcomputeErr, ValidationError};
use proptest::prelude::*;

fn params(beta1: f64, beta2: f64, rho0: f64, rho2: f64) -> DesignParams {
    DesignParams {
        alpha: 0.05,
        beta1,
        beta2,
        var_y1: 0.23,
        var_y2: 0.25,
        rho01: rho0,
        rho02: rho0,
        rho1: rho0 / 2.0,
        rho2,
        r: 1.0,
        dist: Dist::Chi2,
        search: SearchConfig::default(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn combined_clusters_reach_target(
        power in 0.5f64..0.95,
        m in 5u64..500,
        beta in 0.05f64..0.5,
        rho0 in 0.0f64..0.2,
    ) {
        let p = params(beta, beta, rho0, 0.1);
        let k = combined_clusters(power, m, &p).unwrap().required().unwrap();
        prop_assert!(combined_power(k, m, &p).unwrap() >= round4(power));
    }

    #[test]
    fn combined_cluster_size_reaches_target(
        power in 0.5f64..0.95,
        k in 2u64..60,
        beta in 0.05f64..0.5,
        rho0 in 0.0f64..0.2,
    ) {
        let p = params(beta, beta, rho0, 0.1);
        match combined_cluster_size(power, k, &p).unwrap() {
            SampleSize::Required(m) => {
                prop_assert!(combined_power(k, m, &p).unwrap() >= round4(power))
            }
            // Only designs beyond the plateau in m are infeasible
            SampleSize::Infeasible => prop_assert!(rho0 > 0.0),
        }
    }

    #[test]
    fn combined_power_monotone(
        k in 1u64..50,
        m in 1u64..400,
        beta in 0.0f64..0.5,
        rho0 in 0.0f64..0.3,
    ) {
        let p = params(beta, beta / 2.0, rho0, 0.2);
        let base = combined_power(k, m, &p).unwrap();
        prop_assert!(combined_power(k + 1, m, &p).unwrap() >= base);
        prop_assert!(combined_power(k, m + 1, &p).unwrap() >= base);
    }

    #[test]
    fn combined_variance_rounded(rho2 in -1.0f64..1.0) {
        let p = params(0.1, 0.1, 0.025, rho2);
        let raw = 0.23 + 0.25 + 2.0 * rho2 * (0.23f64 * 0.25).sqrt();
        prop_assert_eq!(combined_params(&p).var_yc, (raw * 100.0).round() / 100.0);
    }

    #[test]
    fn single_1df_clusters_reach_target(
        power in 0.5f64..0.95,
        m in 5u64..500,
        beta1 in 0.05f64..0.5,
        beta2 in 0.05f64..0.5,
    ) {
        let p = params(beta1, beta2, 0.05, 0.3);
        let k = single_1df_clusters(power, m, &p).unwrap().required().unwrap();
        prop_assert!(single_1df_power(k, m, &p).unwrap() >= round4(power));
    }

    #[test]
    fn fractional_clusters_rejected(whole in 1u32..1000, frac in 0.01f64..0.99) {
        let input = reference().with_k(whole as f64 + frac).with_m(300.0);
        let rejected = matches!(
            compute_design(Output::Power, &input),
            Err(CrtcomputeErr::Validation(ValidationError::NotPositiveInteger { name: "K", .. }))
        );
        prop_assert!(rejected);
    }
}

fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

fn reference() -> DesignInput {
    DesignInput::new(0.1, 0.1, 0.23, 0.25, 0.025, 0.025, 0.01, 0.05)
}

#[test]
fn reference_table_lists_every_method() {
    let report = compute_design(Output::Power, &reference().with_k(15.0).with_m(300.0)).unwrap();
    let table = report.to_string();
    assert!(table.contains("2. Combined Outcomes"));
    assert!(table.contains("5. Conjunctive IU Test"));
}

#[test]
fn power_supplied_in_power_mode() {
    let input = reference().with_k(15.0).with_m(300.0).with_power(0.8);
    assert!(matches!(
        compute_design(Output::Power, &input),
        Err(CrtcomputeErr::Validation(ValidationError::UnexpectedParameter { .. }))
    ));
}

#[test]
fn unsupported_mode() {
    match "n".parse::<Output>() {
        Err(CrtcomputeErr::Validation(ValidationError::UnsupportedMode(mode))) => {
            assert_eq!(mode, "n")
        }
        other => panic!("expected unsupported mode, got {other:?}"),
    }
}

#[test]
fn conjunctive_zero_effects_infeasible() {
    let mut input = DesignInput::new(0.0, 0.0, 0.23, 0.25, 0.025, 0.025, 0.01, 0.05)
        .with_power(0.8)
        .with_k(15.0);
    input.search.ceiling = 5_000;
    // The closed form methods cannot be powered either
    let report = compute_design(Output::ClusterSize, &input).unwrap();
    for row in &report.rows[1..] {
        match row.value {
            crtcompute::compute::ReportValue::ClusterSize(m) => {
                assert!(m.is_infeasible(), "{} gave {m}", row.label)
            }
            other => panic!("{} carried {other:?}", row.label),
        }
    }
}
