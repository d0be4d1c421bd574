//! # Shear Design
//!
//! Vertical stirrups for factored shear per IS 456:2000 Cl. 40.
//!
//! ```text
//! τv = Vu / (b d)
//!
//! τv <= τc            CONCRETE_ADEQUATE        minimum stirrups only
//! τc < τv <= τc,max   REINFORCEMENT_REQUIRED   sv = 0.87 fyv Asv d / (Vu - τc b d)
//! τv > τc,max         SECTION_INADEQUATE       no spacing is given
//! ```
//!
//! Spacing is always held to `min(0.75 d, 300 mm, 0.87 fyv Asv / (0.4 b))` and
//! never set below the 75 mm practical minimum; a spacing pulled up to that
//! minimum is reported as a warning because the stirrups are then undersized.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    clause, MAX_STIRRUP_SPACING_DEPTH_RATIO, MAX_STIRRUP_SPACING_MM, MIN_SHEAR_REINF_STRESS, MIN_STIRRUP_SPACING_MM,
    STEEL_DESIGN_FACTOR, STIRRUP_MAX_FY,
};
use crate::errors::{worst_status, CalcResult, DesignErrorCode, DesignStatus, ErrorRecord, Severity};
use crate::materials::{bar_area, MaterialGrade};
use crate::section::{BeamSection, DesignLoad};
use crate::settings::ResolvedDetailing;
use crate::tables::{self, TableValue};
use crate::units::{KiloNewtons, Newtons};
use crate::validation::{require_non_negative, validate_load, validate_section};

/// Resolved shear state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShearState {
    ConcreteAdequate,
    ReinforcementRequired,
    SectionInadequate,
}

impl ShearState {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShearState::ConcreteAdequate => "Concrete adequate",
            ShearState::ReinforcementRequired => "Shear reinforcement required",
            ShearState::SectionInadequate => "Section inadequate in shear",
        }
    }
}

impl std::fmt::Display for ShearState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which limit fixed the reported stirrup spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingGovernedBy {
    /// Strength demand (Cl. 40.4)
    Strength,
    /// 0.75 d or 300 mm (Cl. 26.5.1.5)
    MaximumSpacing,
    /// Minimum shear reinforcement (Cl. 26.5.1.6)
    MinimumReinforcement,
    /// Raised to the 75 mm practical minimum
    PracticalMinimum,
}

impl SpacingGovernedBy {
    pub fn clause(&self) -> &'static str {
        match self {
            SpacingGovernedBy::Strength | SpacingGovernedBy::PracticalMinimum => clause::SHEAR_REINFORCEMENT,
            SpacingGovernedBy::MaximumSpacing => clause::MAX_STIRRUP_SPACING,
            SpacingGovernedBy::MinimumReinforcement => clause::MIN_SHEAR_REINFORCEMENT,
        }
    }
}

/// Shear design output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    pub state: ShearState,

    pub vu_kn: f64,
    /// Nominal shear stress τv (N/mm²)
    pub tau_v_n_mm2: f64,
    /// Tension steel percentage used for τc
    pub pt_percent: f64,
    /// Design shear strength of concrete τc (N/mm²)
    pub tau_c_n_mm2: f64,
    /// Maximum shear stress τc,max (N/mm²)
    pub tau_c_max_n_mm2: f64,

    pub stirrup_diameter_mm: f64,
    pub stirrup_legs: u32,
    /// Stirrup area per spacing, Asv (mm²)
    pub asv_mm2: f64,
    /// Stirrup design yield strength min(fy, 415) (N/mm²)
    pub stirrup_fy_n_mm2: f64,

    /// Shear carried by stirrups, Vu - τc b d (kN), when reinforcement is required
    pub vus_kn: Option<f64>,
    /// Upper bound on spacing from detailing rules (mm)
    pub max_spacing_mm: f64,
    /// Stirrup spacing; `None` when the section is inadequate
    pub spacing_mm: Option<f64>,
    pub spacing_governed_by: Option<SpacingGovernedBy>,
    /// Clause behind the governing spacing limit
    pub spacing_clause: Option<String>,

    pub status: DesignStatus,
    pub records: Vec<ErrorRecord>,
    pub table_lookups: Vec<TableValue>,
}

impl ShearResult {
    /// τv / τc,max
    pub fn stress_ratio(&self) -> f64 {
        self.tau_v_n_mm2 / self.tau_c_max_n_mm2
    }
}

/// Design stirrups for `load.shear_kn` with `ast_mm2` of tension steel.
pub fn design_shear(
    section: &BeamSection,
    grades: &MaterialGrade,
    load: &DesignLoad,
    ast_mm2: f64,
    detailing: &ResolvedDetailing,
) -> CalcResult<ShearResult> {
    validate_section(section)?;
    validate_load(load)?;
    require_non_negative("ast_mm2", ast_mm2)?;

    let (b, d) = (section.b(), section.d());
    let vu = load.shear_n();
    let tau_v = vu / section.effective_area_mm2();
    let pt = section.steel_percentage(ast_mm2);

    let tc = tables::design_shear_strength(grades.concrete, pt);
    let tc_max = tables::max_shear_stress(grades.concrete);
    let mut records: Vec<ErrorRecord> = [tc, tc_max].iter().filter_map(TableValue::clamp_record).collect();

    let phi = detailing.stirrup_diameter_mm;
    let legs = detailing.stirrup_legs;
    let asv = legs as f64 * bar_area(phi);
    let fyv = grades.fy().min(STIRRUP_MAX_FY);

    // Cl. 26.5.1.5 and 26.5.1.6
    let geometric_cap = (MAX_STIRRUP_SPACING_DEPTH_RATIO * d).min(MAX_STIRRUP_SPACING_MM);
    let min_reinf_spacing = STEEL_DESIGN_FACTOR * fyv * asv / (MIN_SHEAR_REINF_STRESS * b);
    let (max_spacing, cap_reason) = if min_reinf_spacing < geometric_cap {
        (min_reinf_spacing, SpacingGovernedBy::MinimumReinforcement)
    } else {
        (geometric_cap, SpacingGovernedBy::MaximumSpacing)
    };

    let mut vus_kn = None;
    let (state, spacing) = if tau_v > tc_max.value {
        records.push(
            ErrorRecord::new(
                DesignErrorCode::ShearExceedsMaximum,
                Severity::SectionInadequate,
                format!(
                    "Nominal shear stress τv = {:.3} N/mm² exceeds τc,max = {:.2} N/mm²",
                    tau_v, tc_max.value
                ),
                clause::MAX_SHEAR_STRESS,
            )
            .with_suggestion("Increase the section width or depth")
            .with_suggestion("Use a higher concrete grade"),
        );
        (ShearState::SectionInadequate, None)
    } else if tau_v <= tc.value {
        (ShearState::ConcreteAdequate, Some((max_spacing, cap_reason)))
    } else {
        let vus = vu - tc.value * b * d;
        vus_kn = Some(KiloNewtons::from(Newtons(vus)).0);
        let strength_spacing = STEEL_DESIGN_FACTOR * fyv * asv * d / vus;
        if strength_spacing < max_spacing {
            (ShearState::ReinforcementRequired, Some((strength_spacing, SpacingGovernedBy::Strength)))
        } else {
            (ShearState::ReinforcementRequired, Some((max_spacing, cap_reason)))
        }
    };

    let spacing = spacing.map(|(sv, reason)| {
        if sv < MIN_STIRRUP_SPACING_MM {
            records.push(
                ErrorRecord::new(
                    DesignErrorCode::StirrupSpacingBelowMinimum,
                    Severity::Warning,
                    format!(
                        "Required stirrup spacing {:.0} mm is below the practical minimum of {:.0} mm; {:.0} mm reported",
                        sv, MIN_STIRRUP_SPACING_MM, MIN_STIRRUP_SPACING_MM
                    ),
                    clause::SHEAR_REINFORCEMENT,
                )
                .with_suggestion(format!("Use stirrups larger than {:.0} mm", phi))
                .with_suggestion(format!("Use more than {} legs", legs)),
            );
            (MIN_STIRRUP_SPACING_MM, SpacingGovernedBy::PracticalMinimum)
        } else {
            (sv, reason)
        }
    });

    debug!(
        state = %state,
        tau_v,
        tau_c = tc.value,
        tau_c_max = tc_max.value,
        spacing_mm = ?spacing.map(|s| s.0),
        "shear resolved"
    );

    Ok(ShearResult {
        state,
        vu_kn: load.shear_kn.0,
        tau_v_n_mm2: tau_v,
        pt_percent: pt,
        tau_c_n_mm2: tc.value,
        tau_c_max_n_mm2: tc_max.value,
        stirrup_diameter_mm: phi,
        stirrup_legs: legs,
        asv_mm2: asv,
        stirrup_fy_n_mm2: fyv,
        vus_kn,
        max_spacing_mm: max_spacing,
        spacing_mm: spacing.map(|s| s.0),
        spacing_governed_by: spacing.map(|s| s.1),
        spacing_clause: spacing.map(|s| s.1.clause().to_string()),
        status: worst_status(&records),
        records,
        table_lookups: vec![tc, tc_max],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteGrade, SteelGrade};
    use crate::settings::DetailingOptions;

    fn detailing() -> ResolvedDetailing {
        let mut applied = Vec::new();
        DetailingOptions::new().resolve(SteelGrade::Fe415, &mut applied)
    }

    fn run(vu_kn: f64, ast_mm2: f64) -> ShearResult {
        design_shear(
            &BeamSection::new(300.0, 450.0, 500.0),
            &MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
            &DesignLoad::new(0.0, vu_kn),
            ast_mm2,
            &detailing(),
        )
        .unwrap()
    }

    #[test]
    fn test_concrete_adequate_uses_maximum_spacing() {
        // τv = 50000/135000 = 0.37 < τc(0.79%) ≈ 0.58
        let result = run(50.0, 1062.0);
        assert_eq!(result.state, ShearState::ConcreteAdequate);
        // 0.87×415×100.5/(0.4×300) = 302.4 > min(337.5, 300) = 300
        assert_eq!(result.spacing_mm, Some(300.0));
        assert_eq!(result.spacing_governed_by, Some(SpacingGovernedBy::MaximumSpacing));
        assert_eq!(result.spacing_clause.as_deref(), Some("IS 456:2000 Cl. 26.5.1.5"));
        assert_eq!(result.status, DesignStatus::Safe);
    }

    #[test]
    fn test_reinforcement_required() {
        let result = run(150.0, 1062.0);
        assert_eq!(result.state, ShearState::ReinforcementRequired);
        // τc at pt = 0.7866: 0.57 + (0.64 - 0.57) × 0.0366/0.25 = 0.5803
        assert!((result.tau_c_n_mm2 - 0.58025).abs() < 1e-3);
        let vus = 150_000.0 - result.tau_c_n_mm2 * 135_000.0;
        let expected = 0.87 * 415.0 * result.asv_mm2 * 450.0 / vus;
        assert!((result.spacing_mm.unwrap() - expected).abs() < 1e-9);
        assert_eq!(result.spacing_governed_by, Some(SpacingGovernedBy::Strength));
        assert_eq!(result.spacing_clause.as_deref(), Some("IS 456:2000 Cl. 40.4"));
        assert!((result.vus_kn.unwrap() - vus / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_demand_spacing_capped() {
        // Just above τc: strength spacing is huge, cap governs
        let result = run(80.0, 1062.0);
        assert_eq!(result.state, ShearState::ReinforcementRequired);
        assert_eq!(result.spacing_mm, Some(300.0));
        assert_eq!(result.spacing_governed_by, Some(SpacingGovernedBy::MaximumSpacing));
    }

    #[test]
    fn test_practical_minimum_warning() {
        // τv = 3.0 ≤ τc,max 3.1 but 2-legged 8 mm stirrups need about 50 mm spacing
        let result = run(405.0, 1062.0);
        assert_eq!(result.state, ShearState::ReinforcementRequired);
        assert_eq!(result.spacing_mm, Some(75.0));
        assert_eq!(result.spacing_governed_by, Some(SpacingGovernedBy::PracticalMinimum));
        assert_eq!(result.status, DesignStatus::Warning);
        assert_eq!(result.records[0].code, DesignErrorCode::StirrupSpacingBelowMinimum);
        assert!(!result.records[0].suggestions.is_empty());
    }

    #[test]
    fn test_shear_above_maximum_has_no_spacing() {
        // τv = 450000/135000 = 3.33 > 3.1
        let result = run(450.0, 1062.0);
        assert_eq!(result.state, ShearState::SectionInadequate);
        assert_eq!(result.status, DesignStatus::SectionInadequate);
        assert!(result.spacing_mm.is_none());
        assert!(result.spacing_governed_by.is_none());
        assert!(result.spacing_clause.is_none());
        assert!(result.stress_ratio() > 1.0);
    }

    #[test]
    fn test_stirrup_yield_capped_at_415() {
        let result = design_shear(
            &BeamSection::new(300.0, 450.0, 500.0),
            &MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe500),
            &DesignLoad::new(0.0, 150.0),
            1062.0,
            &detailing(),
        )
        .unwrap();
        assert_eq!(result.stirrup_fy_n_mm2, 415.0);
    }

    #[test]
    fn test_low_steel_percentage_clamped_and_flagged() {
        let result = run(30.0, 100.0);
        // pt = 0.074% is below the first row of Table 19
        assert!(result.table_lookups[0].was_clamped());
        assert_eq!(result.tau_c_n_mm2, 0.29);
        assert!(result
            .records
            .iter()
            .any(|r| r.code == DesignErrorCode::TableInputClamped && r.severity == Severity::Info));
        assert_eq!(result.status, DesignStatus::Safe);
    }

    #[test]
    fn test_minimum_reinforcement_caps_spacing() {
        let mut applied = Vec::new();
        let light = DetailingOptions::new()
            .with_stirrups(6.0, 2)
            .resolve(SteelGrade::Fe415, &mut applied);
        let result = design_shear(
            &BeamSection::new(300.0, 450.0, 500.0),
            &MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
            &DesignLoad::new(0.0, 50.0),
            1062.0,
            &light,
        )
        .unwrap();
        // 0.87×415×56.5/(0.4×300) = 170 < 300
        assert_eq!(result.spacing_governed_by, Some(SpacingGovernedBy::MinimumReinforcement));
        assert!((result.spacing_mm.unwrap() - 170.0).abs() < 1.0);
        assert_eq!(result.spacing_clause.as_deref(), Some("IS 456:2000 Cl. 26.5.1.6"));
    }

    #[test]
    fn test_zero_shear() {
        let result = run(0.0, 1062.0);
        assert_eq!(result.state, ShearState::ConcreteAdequate);
        assert_eq!(result.tau_v_n_mm2, 0.0);
    }
}
