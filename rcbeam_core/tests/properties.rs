//! Property tests for the design pipeline.

use approx::{assert_relative_eq, relative_eq};
use proptest::prelude::*;

use rcbeam_core::calculations::flexure::{design_flexure, limiting_moment, moment_capacity, FlexureState};
use rcbeam_core::calculations::shear::ShearState;
use rcbeam_core::errors::DesignErrorCode;
use rcbeam_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
use rcbeam_core::section::{BeamSection, DesignLoad};
use rcbeam_core::settings::SolverSettings;
use rcbeam_core::tables;
use rcbeam_core::{design_beam, BeamDesignRequest, BeamDesignResult, DesignStatus};

fn concrete() -> impl Strategy<Value = ConcreteGrade> {
    prop_oneof![
        Just(ConcreteGrade::M20),
        Just(ConcreteGrade::M25),
        Just(ConcreteGrade::M30),
        Just(ConcreteGrade::M35),
        Just(ConcreteGrade::M40),
    ]
}

fn steel() -> impl Strategy<Value = SteelGrade> {
    prop_oneof![Just(SteelGrade::Fe250), Just(SteelGrade::Fe415), Just(SteelGrade::Fe500)]
}

/// Whole-millimetre sections with 40-60 mm of tension cover
fn section() -> impl Strategy<Value = BeamSection> {
    (230u32..=400, 300u32..=700, 40u32..=60)
        .prop_map(|(b, d, cover)| BeamSection::new(b as f64, d as f64, (d + cover) as f64))
}

proptest! {
    #[test]
    fn shear_strength_is_monotonic_in_steel(grade in concrete(), p1 in 0.0f64..4.0, p2 in 0.0f64..4.0) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let a = tables::design_shear_strength(grade, lo).value;
        let b = tables::design_shear_strength(grade, hi).value;
        prop_assert!(a <= b + 1e-12, "τc({lo}) = {a} > τc({hi}) = {b}");
    }

    #[test]
    fn singly_capacity_matches_demand(
        s in section(),
        c in concrete(),
        st in steel(),
        ratio in 0.2f64..1.0,
    ) {
        let grades = MaterialGrade::new(c, st);
        let (mu_lim, _) = limiting_moment(&s, &grades);
        let load = DesignLoad::new(ratio * mu_lim.0, 0.0);
        let result = design_flexure(&s, &grades, &load, s.tension_cover_mm(), &SolverSettings::default()).unwrap();

        prop_assert_eq!(result.state, FlexureState::SinglyReinforced);
        prop_assume!(result.governing_bound.is_none());

        let capacity = moment_capacity(&s, &grades, result.ast_required_mm2, 0.0, s.tension_cover_mm());
        prop_assert!(
            relative_eq!(capacity.0, load.moment_knm.0, max_relative = 0.01),
            "capacity {} vs demand {}", capacity.0, load.moment_knm.0
        );
    }

    #[test]
    fn doubly_capacity_matches_demand(
        s in section(),
        c in concrete(),
        st in steel(),
        ratio in 1.05f64..1.6,
    ) {
        let grades = MaterialGrade::new(c, st);
        let (mu_lim, _) = limiting_moment(&s, &grades);
        let load = DesignLoad::new(ratio * mu_lim.0, 0.0);
        let d_prime = s.tension_cover_mm();
        let result = design_flexure(&s, &grades, &load, d_prime, &SolverSettings::default()).unwrap();

        prop_assert_eq!(result.state, FlexureState::DoublyReinforced);
        prop_assume!(!result.status.is_fatal());

        let capacity = moment_capacity(&s, &grades, result.ast_required_mm2, result.asc_required_mm2, d_prime);
        prop_assert!(
            relative_eq!(capacity.0, load.moment_knm.0, max_relative = 0.01),
            "capacity {} vs demand {}", capacity.0, load.moment_knm.0
        );
    }

    #[test]
    fn effective_depth_at_or_above_overall_is_rejected(b in 200u32..400, d in 300u32..700, extra in 0u32..50) {
        let s = BeamSection::new(b as f64, (d + extra) as f64, d as f64);
        let request = BeamDesignRequest::new(
            "bad",
            s,
            MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
            DesignLoad::new(100.0, 50.0),
        );
        let err = design_beam(&request).unwrap_err();
        prop_assert_eq!(err.field(), "section.effective_depth_mm");
    }

    #[test]
    fn design_json_is_deterministic(
        s in section(),
        c in concrete(),
        st in steel(),
        mu in 10u32..400,
        vu in 10u32..300,
    ) {
        let request = BeamDesignRequest::new(
            "prop",
            s,
            MaterialGrade::new(c, st),
            DesignLoad::new(mu as f64, vu as f64),
        );
        let first = serde_json::to_string(&design_beam(&request).unwrap()).unwrap();

        let reparsed: BeamDesignRequest =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        let second = serde_json::to_string(&design_beam(&reparsed).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn shear_above_maximum_never_reports_spacing(s in section(), c in concrete(), factor in 1.01f64..2.0) {
        let grades = MaterialGrade::new(c, SteelGrade::Fe415);
        let tau_max = tables::max_shear_stress(c).value;
        let vu_kn = factor * tau_max * s.effective_area_mm2() / 1000.0;
        let request = BeamDesignRequest::new("shear", s, grades, DesignLoad::new(10.0, vu_kn));
        let result = design_beam(&request).unwrap();

        let shear = result.shear.as_ref().unwrap();
        prop_assert_eq!(shear.state, ShearState::SectionInadequate);
        prop_assert!(shear.spacing_mm.is_none());
        prop_assert_eq!(result.status, DesignStatus::SectionInadequate);
    }
}

fn reference_request(mu_knm: f64) -> BeamDesignRequest {
    BeamDesignRequest::new(
        "ref",
        BeamSection::new(300.0, 450.0, 500.0),
        MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
        DesignLoad::new(mu_knm, 100.0),
    )
}

#[test]
fn limiting_moment_boundary() {
    let section = BeamSection::new(300.0, 450.0, 500.0);
    let grades = MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415);
    let (mu_lim, xu_max) = limiting_moment(&section, &grades);
    assert_relative_eq!(mu_lim.0, 209.532096, max_relative = 1e-9);
    assert_relative_eq!(xu_max, 216.0, max_relative = 1e-12);

    let at_limit = design_beam(&reference_request(mu_lim.0)).unwrap();
    assert_eq!(at_limit.flexure.state, FlexureState::SinglyReinforced);

    let above = design_beam(&reference_request(mu_lim.0 + 1.0)).unwrap();
    assert_eq!(above.flexure.state, FlexureState::DoublyReinforced);
    assert!(above.flexure.asc_required_mm2 > 0.0);
}

#[test]
fn reference_singly_beam() {
    let result: BeamDesignResult = design_beam(&reference_request(150.0)).unwrap();
    assert_relative_eq!(result.flexure.ast_required_mm2, 1061.887, epsilon = 0.01);
    assert_eq!(result.flexure.asc_required_mm2, 0.0);
    assert_eq!(result.status, DesignStatus::Safe);

    let bars = result.detailing.as_ref().unwrap().tension_bars.as_ref().unwrap();
    assert!(bars.area_mm2 >= result.flexure.ast_required_mm2);
}

#[test]
fn compression_steel_above_neutral_axis_is_flagged() {
    let request = reference_request(250.0).with_compression_steel_depth(215.0);
    let result = design_beam(&request).unwrap();
    assert!(result
        .records
        .iter()
        .any(|r| r.code == DesignErrorCode::CompressionSteelIneffective));
}
