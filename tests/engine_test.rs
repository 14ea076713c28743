//! Integration tests for vitals scoring

use proptest::prelude::*;
use stressiq::{score, RegionKey, StressError, VitalsSnapshot};

const EPS: f64 = 1e-9;

#[test]
fn test_demo_reading_saturates() {
    let report = score(&VitalsSnapshot::new(15.0, 25.0, 28.0, 95.0, 115.0)).unwrap();

    assert_eq!(report.global, 1.0);
    let expected = [
        (RegionKey::Temporal, 1.0),
        (RegionKey::Cerebellum, 0.6),
        (RegionKey::Frontal, 1.0),
        (RegionKey::Parietal, 0.8),
        (RegionKey::Occipital, 0.3),
        (RegionKey::Spinal, 1.0),
    ];
    for (region, value) in expected {
        assert!(
            (report.regions[region] - value).abs() < EPS,
            "{region}: {} != {value}",
            report.regions[region]
        );
    }
}

#[test]
fn test_baseline_reading_is_all_zero() {
    let report = score(&VitalsSnapshot::baseline()).unwrap();
    assert_eq!(report.global, 0.0);
    assert!(report.regions.iter().all(|(_, v)| v == 0.0));
}

#[test]
fn test_report_json_shape() {
    let report = score(&VitalsSnapshot::demo()).unwrap().rounded();
    let json = serde_json::to_value(report).unwrap();

    assert_eq!(json["global"], 1.0);
    assert_eq!(json["regions"]["OCCIPITAL"], 0.3);
    assert_eq!(json["regions"].as_object().unwrap().len(), 6);
}

#[test]
fn test_snapshot_json_defaults_tuning() {
    let snapshot: VitalsSnapshot = serde_json::from_str(
        r#"{"rmssd": 32.5, "sdnn": 40, "resp_rate": 14, "spo2": 98, "heart_rate": 65}"#,
    )
    .unwrap();
    assert_eq!(snapshot.sensitivity, 1.0);
    assert_eq!(snapshot.harshness, 1.7);

    // 0.45 * 0.5 = 0.225
    let report = score(&snapshot).unwrap();
    assert!((report.global - 0.225_f64.powf(1.7)).abs() < EPS);
}

#[test]
fn test_infinite_reading_rejected() {
    let mut v = VitalsSnapshot::demo();
    v.spo2 = f64::NEG_INFINITY;
    assert!(matches!(
        score(&v),
        Err(StressError::InvalidInput { field: "spo2", .. })
    ));
}

fn finite_vital() -> impl Strategy<Value = f64> {
    -500.0..500.0f64
}

prop_compose! {
    fn arb_snapshot()(
        rmssd in finite_vital(),
        sdnn in finite_vital(),
        resp_rate in finite_vital(),
        spo2 in finite_vital(),
        heart_rate in finite_vital(),
        sensitivity in -5.0..5.0f64,
        harshness in -5.0..5.0f64,
    ) -> VitalsSnapshot {
        VitalsSnapshot::new(rmssd, sdnn, resp_rate, spo2, heart_rate)
            .with_tuning(sensitivity, harshness)
    }
}

proptest! {
    #[test]
    fn prop_scores_stay_in_unit_range(v in arb_snapshot()) {
        let report = score(&v).unwrap();
        prop_assert!((0.0..=1.0).contains(&report.global));
        for (_, value) in report.regions.iter() {
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn prop_scoring_is_deterministic(v in arb_snapshot()) {
        prop_assert_eq!(score(&v).unwrap(), score(&v).unwrap());
    }

    #[test]
    fn prop_spinal_tracks_global(v in arb_snapshot()) {
        let report = score(&v).unwrap();
        prop_assert_eq!(report.regions[RegionKey::Spinal], report.global);
    }

    #[test]
    fn prop_sdnn_is_ignored(v in arb_snapshot(), sdnn in finite_vital()) {
        let mut other = v;
        other.sdnn = sdnn;
        prop_assert_eq!(score(&v).unwrap().regions, score(&other).unwrap().regions);
    }

    #[test]
    fn prop_higher_heart_rate_never_lowers_stress(
        v in arb_snapshot(),
        bump in 0.0..100.0f64,
        harshness in 0.1..4.0f64,
        sensitivity in 0.0..4.0f64,
    ) {
        let base = v.with_tuning(sensitivity, harshness);
        let mut worse = base;
        worse.heart_rate += bump;
        prop_assert!(score(&worse).unwrap().global >= score(&base).unwrap().global);
    }

    #[test]
    fn prop_lower_rmssd_never_lowers_stress(
        v in arb_snapshot(),
        fall in 0.0..100.0f64,
        harshness in 0.1..4.0f64,
        sensitivity in 0.0..4.0f64,
    ) {
        let base = v.with_tuning(sensitivity, harshness);
        let mut worse = base;
        worse.rmssd -= fall;
        let before = score(&base).unwrap();
        let after = score(&worse).unwrap();
        prop_assert!(after.global >= before.global);
        for region in RegionKey::ALL {
            prop_assert!(after.regions[region] >= before.regions[region]);
        }
    }

    #[test]
    fn prop_faster_breathing_never_lowers_stress(
        v in arb_snapshot(),
        bump in 0.0..50.0f64,
        harshness in 0.1..4.0f64,
    ) {
        let base = v.with_tuning(1.0, harshness);
        let mut worse = base;
        worse.resp_rate += bump;
        prop_assert!(score(&worse).unwrap().global >= score(&base).unwrap().global);
    }

    #[test]
    fn prop_lower_spo2_never_lowers_stress(
        v in arb_snapshot(),
        fall in 0.0..50.0f64,
        harshness in 0.1..4.0f64,
    ) {
        let base = v.with_tuning(1.0, harshness);
        let mut worse = base;
        worse.spo2 -= fall;
        prop_assert!(score(&worse).unwrap().global >= score(&base).unwrap().global);
    }
}
