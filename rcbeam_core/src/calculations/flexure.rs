//! # Flexure Design
//!
//! Tension and compression steel for a rectangular section under factored
//! moment, per IS 456:2000 Cl. 38.1 and Annex G.
//!
//! ## Resolution
//!
//! ```text
//! xu,max = k d                                   (k from Cl. 38.1)
//! Mu,lim = 0.36 fck b xu,max (d - 0.42 xu,max)
//!
//! Mu <= Mu,lim  ->  SINGLY_REINFORCED
//! Mu >  Mu,lim  ->  DOUBLY_REINFORCED
//! ```
//!
//! Singly reinforced steel comes from the closed form of G-1.1(b) and is held
//! within the code minimum and maximum. Doubly reinforced steel starts from the
//! classic proportioning at `xu = xu,max`, then a bounded refinement re-analyses
//! the section by strain compatibility until the capacity matches `Mu`.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::calculations::flexure::{design_flexure, FlexureState};
//! use rcbeam_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
//! use rcbeam_core::section::{BeamSection, DesignLoad};
//! use rcbeam_core::settings::SolverSettings;
//!
//! let section = BeamSection::new(300.0, 450.0, 500.0);
//! let grades = MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415);
//! let load = DesignLoad::new(150.0, 0.0);
//!
//! let result = design_flexure(&section, &grades, &load, 50.0, &SolverSettings::default()).unwrap();
//! assert_eq!(result.state, FlexureState::SinglyReinforced);
//! assert!((result.ast_required_mm2 - 1062.0).abs() < 1.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    clause, CONCRETE_ULTIMATE_STRAIN, DISPLACED_CONCRETE_STRESS, MAX_STEEL_FRACTION, MIN_TENSION_STEEL_COEFF,
    STEEL_DESIGN_FACTOR, STRESS_BLOCK_CENTROID, STRESS_BLOCK_FORCE,
};
use crate::errors::{worst_status, CalcResult, DesignErrorCode, DesignStatus, ErrorRecord, Severity};
use crate::materials::MaterialGrade;
use crate::section::{BeamSection, DesignLoad};
use crate::settings::SolverSettings;
use crate::tables::{self, TableValue};
use crate::units::{KiloNewtonMetres, NewtonMillimetres};
use crate::validation::{validate_compression_steel_depth, validate_load, validate_section, validate_solver};

/// Bisection stops once the neutral-axis bracket is narrower than this
/// fraction of the effective depth
pub const BISECTION_WIDTH_RATIO: f64 = 1.0e-9;

/// Resolved flexural state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlexureState {
    SinglyReinforced,
    DoublyReinforced,
}

impl FlexureState {
    pub fn display_name(&self) -> &'static str {
        match self {
            FlexureState::SinglyReinforced => "Singly reinforced",
            FlexureState::DoublyReinforced => "Doubly reinforced",
        }
    }

    pub fn clause(&self) -> &'static str {
        match self {
            FlexureState::SinglyReinforced => clause::SINGLY_REINFORCED,
            FlexureState::DoublyReinforced => clause::DOUBLY_REINFORCED,
        }
    }
}

impl std::fmt::Display for FlexureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Code bound that replaced the computed tension steel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteelBound {
    /// Raised to 0.85 b d / fy
    Minimum,
    /// Capped at 0.04 b D
    Maximum,
}

/// Flexural design output.
///
/// Quantities are always populated. When the status is `ERROR` they hold the
/// last solver iterate and must not be used for detailing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexureResult {
    pub state: FlexureState,
    /// Annex G clause the steel areas were computed under
    pub clause: String,

    /// Factored moment Mu (kN·m)
    pub mu_knm: f64,
    /// Limiting moment of resistance Mu,lim (kN·m)
    pub mu_lim_knm: f64,

    /// Limiting neutral-axis depth xu,max (mm)
    pub xu_max_mm: f64,
    /// Neutral-axis depth of the designed section (mm)
    pub xu_mm: f64,
    /// Depth of compression steel centroid d' (mm)
    pub compression_steel_depth_mm: f64,

    /// Required tension steel Ast (mm²)
    pub ast_required_mm2: f64,
    /// Required compression steel Asc (mm²), zero when singly reinforced
    pub asc_required_mm2: f64,
    pub ast_min_mm2: f64,
    pub ast_max_mm2: f64,
    /// Set when a code bound replaced the computed Ast
    pub governing_bound: Option<SteelBound>,

    /// Compression steel design stress fsc (N/mm²), doubly reinforced only
    pub compression_steel_stress_n_mm2: Option<f64>,

    /// Refinement passes used (zero for singly reinforced)
    pub iterations: u32,

    pub status: DesignStatus,
    pub records: Vec<ErrorRecord>,
    /// Table lookups made by this module
    pub table_lookups: Vec<TableValue>,
}

impl FlexureResult {
    /// Tension steel percentage 100 Ast/(b d)
    pub fn tension_steel_percentage(&self, section: &BeamSection) -> f64 {
        section.steel_percentage(self.ast_required_mm2)
    }

    pub fn is_doubly_reinforced(&self) -> bool {
        self.state == FlexureState::DoublyReinforced
    }
}

/// Equilibrium state of a section found by strain compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    /// Neutral-axis depth (mm)
    pub xu_mm: f64,
    /// Tension steel stress (N/mm²)
    pub fst_n_mm2: f64,
    /// Compression steel stress (N/mm²), before the displaced-concrete deduction
    pub fsc_n_mm2: f64,
    /// fsc less the displaced concrete stress when the bars sit in the compression zone
    pub net_fsc_n_mm2: f64,
    /// Moment of resistance (N·mm)
    pub moment_nmm: f64,
    pub bisections: u32,
    pub converged: bool,
}

/// Limiting moment of resistance and xu,max for the section
pub fn limiting_moment(section: &BeamSection, grades: &MaterialGrade) -> (KiloNewtonMetres, f64) {
    let k = tables::neutral_axis_limit(grades.steel).value;
    let xu_max = k * section.d();
    let mu_lim = STRESS_BLOCK_FORCE * grades.fck() * section.b() * xu_max * (section.d() - STRESS_BLOCK_CENTROID * xu_max);
    (NewtonMillimetres(mu_lim).into(), xu_max)
}

/// Minimum and maximum tension steel (mm²)
pub fn steel_limits(section: &BeamSection, grades: &MaterialGrade) -> (f64, f64) {
    let min = MIN_TENSION_STEEL_COEFF * section.effective_area_mm2() / grades.fy();
    let max = MAX_STEEL_FRACTION * section.gross_area_mm2();
    (min, max)
}

/// Locate the neutral axis by bisection so that compression equals tension.
///
/// Both steel stresses come from the design stress-strain curve. The bracket
/// is `(0, D]`; the search stops when it narrows below `1e-9 d` or after
/// `max_bisections` halvings, whichever comes first.
pub fn analyze_section(
    section: &BeamSection,
    grades: &MaterialGrade,
    ast_mm2: f64,
    asc_mm2: f64,
    d_prime_mm: f64,
    max_bisections: u32,
) -> SectionAnalysis {
    let fck = grades.fck();
    let (b, d) = (section.b(), section.d());

    let state_at = |xu: f64| {
        let strain_st = CONCRETE_ULTIMATE_STRAIN * (d - xu) / xu;
        let strain_sc = CONCRETE_ULTIMATE_STRAIN * (xu - d_prime_mm) / xu;
        let fst = tables::steel_design_stress(grades.steel, strain_st);
        let fsc = tables::steel_design_stress(grades.steel, strain_sc);
        let displaced = if xu > d_prime_mm { DISPLACED_CONCRETE_STRESS * fck } else { 0.0 };
        (fst, fsc, fsc - displaced)
    };
    let imbalance = |xu: f64| {
        let (fst, _, net_fsc) = state_at(xu);
        STRESS_BLOCK_FORCE * fck * b * xu + asc_mm2 * net_fsc - ast_mm2 * fst
    };

    let mut lo = 0.0;
    let mut hi = section.overall_depth();
    let width_tol = BISECTION_WIDTH_RATIO * d;
    let mut bisections = 0;
    let mut converged = false;

    if imbalance(hi) > 0.0 {
        while bisections < max_bisections {
            let mid = 0.5 * (lo + hi);
            if imbalance(mid) > 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
            bisections += 1;
            if hi - lo <= width_tol {
                converged = true;
                break;
            }
        }
    }

    let xu = 0.5 * (lo + hi);
    let (fst, fsc, net_fsc) = state_at(xu);
    let moment = STRESS_BLOCK_FORCE * fck * b * xu * (d - STRESS_BLOCK_CENTROID * xu)
        + asc_mm2 * net_fsc * (d - d_prime_mm);

    SectionAnalysis {
        xu_mm: xu,
        fst_n_mm2: fst,
        fsc_n_mm2: fsc,
        net_fsc_n_mm2: net_fsc,
        moment_nmm: moment,
        bisections,
        converged,
    }
}

/// Moment of resistance of a section with the given steel.
///
/// Tension-only sections use the closed form of G-1.1(b), capped at Mu,lim
/// when over-reinforced. Sections with compression steel are analysed by
/// strain compatibility.
pub fn moment_capacity(
    section: &BeamSection,
    grades: &MaterialGrade,
    ast_mm2: f64,
    asc_mm2: f64,
    d_prime_mm: f64,
) -> KiloNewtonMetres {
    if asc_mm2 > 0.0 {
        let analysis = analyze_section(
            section,
            grades,
            ast_mm2,
            asc_mm2,
            d_prime_mm,
            SolverSettings::default().max_bisections,
        );
        return NewtonMillimetres(analysis.moment_nmm).into();
    }

    let (fck, fy) = (grades.fck(), grades.fy());
    let (b, d) = (section.b(), section.d());
    let (mu_lim, xu_max) = limiting_moment(section, grades);
    let xu = STEEL_DESIGN_FACTOR * fy * ast_mm2 / (STRESS_BLOCK_FORCE * fck * b);
    if xu > xu_max {
        return mu_lim;
    }
    let mu = STEEL_DESIGN_FACTOR * fy * ast_mm2 * d * (1.0 - ast_mm2 * fy / (b * d * fck));
    NewtonMillimetres(mu).into()
}

/// Design flexural reinforcement for `load.moment_knm`.
///
/// `d_prime_mm` is the compression steel depth; it is only used when the
/// section turns out doubly reinforced.
pub fn design_flexure(
    section: &BeamSection,
    grades: &MaterialGrade,
    load: &DesignLoad,
    d_prime_mm: f64,
    solver: &SolverSettings,
) -> CalcResult<FlexureResult> {
    validate_section(section)?;
    validate_load(load)?;
    validate_compression_steel_depth(section, Some(d_prime_mm))?;
    validate_solver(solver)?;

    let xu_limit = tables::neutral_axis_limit(grades.steel);
    let (mu_lim, xu_max) = limiting_moment(section, grades);
    let mu = load.moment_nmm();
    let mu_lim_nmm = NewtonMillimetres::from(mu_lim).0;
    let (ast_min, ast_max) = steel_limits(section, grades);

    let mut result = FlexureResult {
        state: FlexureState::SinglyReinforced,
        clause: String::new(),
        mu_knm: load.moment_knm.0,
        mu_lim_knm: mu_lim.0,
        xu_max_mm: xu_max,
        xu_mm: 0.0,
        compression_steel_depth_mm: d_prime_mm,
        ast_required_mm2: 0.0,
        asc_required_mm2: 0.0,
        ast_min_mm2: ast_min,
        ast_max_mm2: ast_max,
        governing_bound: None,
        compression_steel_stress_n_mm2: None,
        iterations: 0,
        status: DesignStatus::Safe,
        records: Vec::new(),
        table_lookups: vec![xu_limit],
    };

    // Inclusive boundary, compared in the units Mu was given in
    if load.moment_knm.0 <= mu_lim.0 {
        design_singly(section, grades, mu, &mut result);
    } else {
        result.state = FlexureState::DoublyReinforced;
        design_doubly(section, grades, mu, mu_lim_nmm, solver, &mut result);
    }

    result.clause = result.state.clause().to_string();
    result.status = worst_status(&result.records);
    debug!(
        state = %result.state,
        mu_knm = result.mu_knm,
        mu_lim_knm = result.mu_lim_knm,
        ast_mm2 = result.ast_required_mm2,
        asc_mm2 = result.asc_required_mm2,
        iterations = result.iterations,
        "flexure resolved"
    );
    Ok(result)
}

fn design_singly(section: &BeamSection, grades: &MaterialGrade, mu: f64, result: &mut FlexureResult) {
    let (fck, fy) = (grades.fck(), grades.fy());
    let (b, d) = (section.b(), section.d());

    let root = (1.0 - 4.0 * mu / (STEEL_DESIGN_FACTOR * fck * b * d * d)).max(0.0);
    let ast = 0.5 * fck / fy * (1.0 - root.sqrt()) * b * d;

    result.ast_required_mm2 = ast;
    apply_tension_bounds(section, result);
    result.xu_mm = STEEL_DESIGN_FACTOR * fy * result.ast_required_mm2 / (STRESS_BLOCK_FORCE * fck * b);
}

fn design_doubly(
    section: &BeamSection,
    grades: &MaterialGrade,
    mu: f64,
    mu_lim: f64,
    solver: &SolverSettings,
    result: &mut FlexureResult,
) {
    let (fck, fy) = (grades.fck(), grades.fy());
    let d = section.d();
    let d_prime = result.compression_steel_depth_mm;
    let xu_max = result.xu_max_mm;
    let lever = d - d_prime;

    let strain_sc = CONCRETE_ULTIMATE_STRAIN * (xu_max - d_prime) / xu_max;
    let fsc = tables::steel_design_stress(grades.steel, strain_sc);
    let net_fsc = fsc - DISPLACED_CONCRETE_STRESS * fck;
    result.compression_steel_stress_n_mm2 = Some(fsc);
    result.xu_mm = xu_max;

    let ast_lim = mu_lim / (STEEL_DESIGN_FACTOR * fy * (d - STRESS_BLOCK_CENTROID * xu_max));
    if net_fsc <= 0.0 {
        result.ast_required_mm2 = ast_lim;
        result.records.push(
            ErrorRecord::new(
                DesignErrorCode::CompressionSteelIneffective,
                Severity::SectionInadequate,
                format!(
                    "Compression steel at d' = {:.0} mm carries fsc = {:.1} N/mm², not above the displaced concrete stress {:.1} N/mm²",
                    d_prime,
                    fsc,
                    DISPLACED_CONCRETE_STRESS * fck
                ),
                clause::DOUBLY_REINFORCED,
            )
            .with_suggestion("Reduce the compression steel cover d'")
            .with_suggestion("Increase the section depth so the beam can be singly reinforced"),
        );
        return;
    }

    let mut asc = (mu - mu_lim) / (net_fsc * lever);
    let mut ast = ast_lim + asc * net_fsc / (STEEL_DESIGN_FACTOR * fy);

    let mut converged = false;
    let mut last_residual = f64::NAN;
    for pass in 1..=solver.max_iterations {
        result.iterations = pass;
        let analysis = analyze_section(section, grades, ast, asc, d_prime, solver.max_bisections);
        result.xu_mm = analysis.xu_mm;
        result.compression_steel_stress_n_mm2 = Some(analysis.fsc_n_mm2);
        if !analysis.converged {
            break;
        }

        let deficit = mu - analysis.moment_nmm;
        last_residual = deficit / mu;
        if last_residual.abs() <= solver.tolerance {
            converged = true;
            break;
        }
        if analysis.net_fsc_n_mm2 <= 0.0 || analysis.fst_n_mm2 <= 0.0 {
            break;
        }

        // Add steel in the pair ratio that leaves xu unchanged
        let delta_asc = deficit / (analysis.net_fsc_n_mm2 * lever);
        asc = (asc + delta_asc).max(0.0);
        ast += delta_asc * analysis.net_fsc_n_mm2 / analysis.fst_n_mm2;
    }

    result.ast_required_mm2 = ast;
    result.asc_required_mm2 = asc;

    if !converged {
        warn!(
            iterations = result.iterations,
            residual = last_residual,
            "doubly reinforced refinement did not converge"
        );
        result.records.push(
            ErrorRecord::new(
                DesignErrorCode::SolverNotConverged,
                Severity::Error,
                format!(
                    "Compression steel refinement did not reach tolerance {:e} within {} passes (last residual {:.3e})",
                    solver.tolerance, solver.max_iterations, last_residual
                ),
                clause::DOUBLY_REINFORCED,
            )
            .with_suggestion("Increase the section depth to reduce the compression steel demand")
            .with_suggestion("Relax the solver tolerance or raise max_iterations"),
        );
        return;
    }

    apply_tension_bounds(section, result);
    if result.asc_required_mm2 > result.ast_max_mm2 {
        result.records.push(
            ErrorRecord::new(
                DesignErrorCode::MaxSteelExceeded,
                Severity::SectionInadequate,
                format!(
                    "Required compression steel {:.0} mm² exceeds 0.04 b D = {:.0} mm²",
                    result.asc_required_mm2, result.ast_max_mm2
                ),
                clause::MAX_COMPRESSION_STEEL,
            )
            .with_suggestion("Increase the section depth or width")
            .with_suggestion("Use a higher concrete grade"),
        );
    }
}

/// Hold Ast within [As,min, As,max] and record which bound governed
fn apply_tension_bounds(section: &BeamSection, result: &mut FlexureResult) {
    let computed = result.ast_required_mm2;
    if computed < result.ast_min_mm2 {
        result.ast_required_mm2 = result.ast_min_mm2;
        result.governing_bound = Some(SteelBound::Minimum);
        result.records.push(
            ErrorRecord::new(
                DesignErrorCode::MinSteelGoverns,
                Severity::Info,
                format!(
                    "Computed Ast = {:.0} mm² is below 0.85 b d / fy = {:.0} mm²; minimum steel provided",
                    computed, result.ast_min_mm2
                ),
                clause::MIN_TENSION_STEEL,
            )
            .with_suggestion("A shallower section may be more economical"),
        );
    } else if computed > result.ast_max_mm2 {
        result.ast_required_mm2 = result.ast_max_mm2;
        result.governing_bound = Some(SteelBound::Maximum);
        result.records.push(
            ErrorRecord::new(
                DesignErrorCode::MaxSteelExceeded,
                Severity::SectionInadequate,
                format!(
                    "Required Ast = {:.0} mm² ({:.2}% of b D) exceeds 0.04 b D = {:.0} mm²",
                    computed,
                    100.0 * computed / section.gross_area_mm2(),
                    result.ast_max_mm2
                ),
                clause::MAX_TENSION_STEEL,
            )
            .with_suggestion("Increase the section depth")
            .with_suggestion("Use a higher concrete grade"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteGrade, SteelGrade};

    fn section() -> BeamSection {
        BeamSection::new(300.0, 450.0, 500.0)
    }

    fn m25_fe415() -> MaterialGrade {
        MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415)
    }

    fn design(mu_knm: f64) -> FlexureResult {
        design_flexure(
            &section(),
            &m25_fe415(),
            &DesignLoad::new(mu_knm, 0.0),
            50.0,
            &SolverSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_limiting_moment() {
        let (mu_lim, xu_max) = limiting_moment(&section(), &m25_fe415());
        // xu,max = 0.48 × 450 = 216; Mu,lim = 0.36×25×300×216×(450 - 90.72) = 209.53 kN·m
        assert!((xu_max - 216.0).abs() < 1e-9);
        assert!((mu_lim.0 - 209.532096).abs() < 1e-6);
    }

    #[test]
    fn test_singly_reinforced_reference_case() {
        let result = design(150.0);
        assert_eq!(result.state, FlexureState::SinglyReinforced);
        assert!((result.ast_required_mm2 - 1061.887).abs() < 0.01);
        assert_eq!(result.asc_required_mm2, 0.0);
        assert!(result.governing_bound.is_none());
        assert_eq!(result.status, DesignStatus::Safe);
        assert!(result.xu_mm < result.xu_max_mm);
    }

    #[test]
    fn test_minimum_steel_governs() {
        let result = design(20.0);
        // 0.85 × 300 × 450 / 415 = 276.5
        assert_eq!(result.governing_bound, Some(SteelBound::Minimum));
        assert!((result.ast_required_mm2 - 276.506).abs() < 0.01);
        assert_eq!(result.records[0].code, DesignErrorCode::MinSteelGoverns);
        assert_eq!(result.status, DesignStatus::Safe);
    }

    #[test]
    fn test_zero_moment_gives_minimum_steel() {
        let result = design(0.0);
        assert_eq!(result.ast_required_mm2, result.ast_min_mm2);
    }

    #[test]
    fn test_boundary_is_singly() {
        let (mu_lim, _) = limiting_moment(&section(), &m25_fe415());
        let at_limit = design(mu_lim.0);
        assert_eq!(at_limit.state, FlexureState::SinglyReinforced);
        assert_eq!(at_limit.clause, "IS 456:2000 Annex G-1.1(b)");

        let above = design(mu_lim.0 + 1.0);
        assert_eq!(above.state, FlexureState::DoublyReinforced);
        assert_eq!(above.clause, "IS 456:2000 Annex G-1.2");
        assert!(above.asc_required_mm2 > 0.0);
    }

    #[test]
    fn test_doubly_reinforced_converges() {
        let result = design(300.0);
        assert_eq!(result.state, FlexureState::DoublyReinforced);
        assert_eq!(result.status, DesignStatus::Safe);
        assert!(result.iterations >= 1 && result.iterations <= 50);
        assert!((result.ast_required_mm2 - 2242.5).abs() < 1.0);
        assert!((result.asc_required_mm2 - 668.3).abs() < 1.0);
        // fsc at xu,max with d' = 50: strain 0.00269 -> about 350 N/mm²
        let fsc = result.compression_steel_stress_n_mm2.unwrap();
        assert!((fsc - 350.0).abs() < 0.5);
    }

    #[test]
    fn test_capacity_round_trip() {
        for mu in [60.0, 150.0, 209.0, 250.0, 300.0] {
            let result = design(mu);
            let capacity = moment_capacity(
                &section(),
                &m25_fe415(),
                result.ast_required_mm2,
                result.asc_required_mm2,
                result.compression_steel_depth_mm,
            );
            assert!(capacity.0 >= mu * 0.99, "Mu = {} capacity = {}", mu, capacity.0);
        }
    }

    #[test]
    fn test_capacity_capped_when_over_reinforced() {
        let (mu_lim, _) = limiting_moment(&section(), &m25_fe415());
        let capacity = moment_capacity(&section(), &m25_fe415(), 4000.0, 0.0, 50.0);
        assert_eq!(capacity, mu_lim);
    }

    #[test]
    fn test_compression_steel_ineffective() {
        let result = design_flexure(
            &section(),
            &m25_fe415(),
            &DesignLoad::new(250.0, 0.0),
            215.0,
            &SolverSettings::default(),
        )
        .unwrap();
        assert_eq!(result.status, DesignStatus::SectionInadequate);
        assert!(result
            .records
            .iter()
            .any(|r| r.code == DesignErrorCode::CompressionSteelIneffective));
    }

    #[test]
    fn test_max_steel_exceeded_is_fatal() {
        // Shallow section, very large moment
        let s = BeamSection::new(230.0, 300.0, 340.0);
        let result = design_flexure(
            &s,
            &m25_fe415(),
            &DesignLoad::new(400.0, 0.0),
            40.0,
            &SolverSettings::default(),
        )
        .unwrap();
        assert!(result.status.is_fatal());
        assert!(result.records.iter().any(|r| r.code == DesignErrorCode::MaxSteelExceeded));
    }

    #[test]
    fn test_solver_iteration_limit() {
        let solver = SolverSettings {
            tolerance: 1.0e-12,
            max_iterations: 1,
            ..SolverSettings::default()
        };
        let result = design_flexure(&section(), &m25_fe415(), &DesignLoad::new(300.0, 0.0), 50.0, &solver);
        // 1e-12 is a legal tolerance; one pass cannot reach it
        let result = result.unwrap();
        assert_eq!(result.status, DesignStatus::Error);
        assert_eq!(result.records[0].code, DesignErrorCode::SolverNotConverged);
        assert!(result.ast_required_mm2 > 0.0);
    }

    #[test]
    fn test_analysis_balances_forces() {
        let grades = m25_fe415();
        let a = analyze_section(&section(), &grades, 1500.0, 400.0, 50.0, 200);
        assert!(a.converged);
        let compression = 0.36 * 25.0 * 300.0 * a.xu_mm + 400.0 * a.net_fsc_n_mm2;
        let tension = 1500.0 * a.fst_n_mm2;
        assert!((compression - tension).abs() / tension < 1e-5);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let s = BeamSection::new(300.0, 520.0, 500.0);
        let err = design_flexure(&s, &m25_fe415(), &DesignLoad::new(100.0, 0.0), 50.0, &SolverSettings::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_string(&design(150.0)).unwrap();
        assert!(json.contains("\"state\":\"SINGLY_REINFORCED\""));
        assert!(json.contains("\"status\":\"SAFE\""));
    }
}
