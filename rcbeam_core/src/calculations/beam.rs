//! # Beam Design
//!
//! Designs a rectangular reinforced-concrete beam end to end: flexure, shear,
//! detailing and (on request) IS 13920 ductile checks.
//!
//! ## Pipeline
//!
//! ```text
//! validate -> resolve settings -> flexure -> shear -> detailing -> ductile
//! ```
//!
//! - Any validation failure returns `Err` before a single calculation runs.
//! - A flexure status of `SECTION_INADEQUATE` or `ERROR` stops the pipeline;
//!   the later modules are reported as absent.
//! - Shear and detailing problems do not stop the pipeline.
//! - The top-level status is the worst module status.
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use rcbeam_core::calculations::beam::{design_beam, BeamDesignRequest};
//! use rcbeam_core::errors::DesignStatus;
//! use rcbeam_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
//! use rcbeam_core::section::{BeamSection, DesignLoad};
//!
//! let request = BeamDesignRequest::new(
//!     "B-1",
//!     BeamSection::new(300.0, 450.0, 500.0),
//!     MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
//!     DesignLoad::new(150.0, 100.0),
//! );
//!
//! let result = design_beam(&request).unwrap();
//! assert_eq!(result.status, DesignStatus::Safe);
//! println!("Ast required: {:.0} mm²", result.flexure.ast_required_mm2);
//! println!("Stirrups at {:?} mm", result.shear.as_ref().and_then(|s| s.spacing_mm));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::calculations::detailing::{design_detailing, DetailingResult};
use crate::calculations::ductile::{check_ductile_detailing, DuctileCheckResult, DuctileDemand};
use crate::calculations::flexure::{design_flexure, FlexureResult};
use crate::calculations::shear::{design_shear, ShearResult};
use crate::errors::{AppliedDefault, CalcResult, DesignStatus, ErrorRecord};
use crate::materials::MaterialGrade;
use crate::section::{BeamSection, DesignLoad};
use crate::settings::{DetailingOptions, DuctileOptions, SolverOptions, SolverSettings, DEFAULT_BAR_DIAMETERS_MM};
use crate::units::Millimetres;
use crate::validation::{validate_clear_width, validate_compression_steel_depth, validate_request};

/// Input for one beam design.
///
/// Only `section`, `materials` and `loads` are required. Everything else
/// falls back to a documented default that is listed in the result.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "section": { "width_mm": 300.0, "effective_depth_mm": 450.0, "overall_depth_mm": 500.0 },
///   "materials": { "concrete": "M25", "steel": "Fe415" },
///   "loads": { "moment_knm": 150.0, "shear_kn": 100.0 },
///   "detailing": { "clear_cover_mm": 30.0 },
///   "ductile": { "clear_span_mm": 5000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesignRequest {
    /// User label for this beam (e.g., "B-1", "Roof beam at grid C")
    #[serde(default)]
    pub label: String,

    pub section: BeamSection,
    pub materials: MaterialGrade,
    pub loads: DesignLoad,

    /// Depth of the compression steel centroid d'; defaults to D - d
    #[serde(default)]
    pub compression_steel_depth_mm: Option<Millimetres>,

    #[serde(default)]
    pub detailing: DetailingOptions,

    /// Presence requests IS 13920 ductile checks
    #[serde(default)]
    pub ductile: Option<DuctileOptions>,

    /// Refinement guards; omitted fields default individually
    #[serde(default)]
    pub solver: SolverOptions,
}

impl BeamDesignRequest {
    pub fn new(label: impl Into<String>, section: BeamSection, materials: MaterialGrade, loads: DesignLoad) -> Self {
        Self {
            label: label.into(),
            section,
            materials,
            loads,
            compression_steel_depth_mm: None,
            detailing: DetailingOptions::default(),
            ductile: None,
            solver: SolverOptions::default(),
        }
    }

    pub fn with_compression_steel_depth(mut self, d_prime_mm: f64) -> Self {
        self.compression_steel_depth_mm = Some(Millimetres(d_prime_mm));
        self
    }

    pub fn with_detailing(mut self, detailing: DetailingOptions) -> Self {
        self.detailing = detailing;
        self
    }

    pub fn with_ductile(mut self, ductile: DuctileOptions) -> Self {
        self.ductile = Some(ductile);
        self
    }

    pub fn with_solver(mut self, solver: impl Into<SolverOptions>) -> Self {
        self.solver = solver.into();
        self
    }

    /// Validate the request without designing
    pub fn validate(&self) -> CalcResult<()> {
        validate_request(self)
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignModule {
    Flexure,
    Shear,
    Detailing,
    Ductile,
}

impl DesignModule {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignModule::Flexure => "Flexure",
            DesignModule::Shear => "Shear",
            DesignModule::Detailing => "Detailing",
            DesignModule::Ductile => "Ductile detailing",
        }
    }
}

impl std::fmt::Display for DesignModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Status reached by one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub module: DesignModule,
    pub status: DesignStatus,
}

/// Complete design report for one beam.
///
/// Numbers are full precision; rounding is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesignResult {
    pub label: String,

    /// Worst status over all modules that ran
    pub status: DesignStatus,

    pub flexure: FlexureResult,
    /// Absent when flexure was fatal
    pub shear: Option<ShearResult>,
    /// Absent when flexure was fatal
    pub detailing: Option<DetailingResult>,
    /// Absent when not requested or when flexure was fatal
    pub ductile: Option<DuctileCheckResult>,

    /// Modules that ran, in pipeline order
    pub modules: Vec<ModuleStatus>,

    /// All module records, in pipeline order
    pub records: Vec<ErrorRecord>,

    /// Optional inputs that were filled from engine defaults
    pub defaults_applied: Vec<AppliedDefault>,
}

impl BeamDesignResult {
    /// Usable design (possibly with warnings)
    pub fn passes(&self) -> bool {
        !self.status.is_fatal()
    }

    /// First module that reached the top-level status
    pub fn governing_module(&self) -> Option<DesignModule> {
        self.modules.iter().find(|m| m.status == self.status).map(|m| m.module)
    }
}

/// Design a beam.
///
/// # Errors
///
/// Returns a [`ValidationError`](crate::errors::ValidationError) when the
/// request is malformed. Design findings never produce `Err`; they are
/// reported in the result's records and status.
#[instrument(skip_all, fields(label = %request.label))]
pub fn design_beam(request: &BeamDesignRequest) -> CalcResult<BeamDesignResult> {
    validate_request(request)?;

    let section = &request.section;
    let grades = &request.materials;
    let mut defaults = Vec::new();

    let d_prime = match request.compression_steel_depth_mm {
        Some(d_prime) => d_prime.0,
        None => {
            let d_prime = section.tension_cover_mm();
            defaults.push(AppliedDefault::new(
                "compression_steel_depth_mm",
                d_prime,
                "Taken equal to the tension cover D - d",
            ));
            d_prime
        }
    };
    validate_compression_steel_depth(section, Some(d_prime))?;

    let solver: SolverSettings = request.solver.resolve(&mut defaults);

    let detailing_options = request.detailing.resolve(grades.steel, &mut defaults);
    validate_clear_width(section, &detailing_options)?;

    debug!(
        grades = %grades,
        moment_knm = request.loads.moment_knm.0,
        shear_kn = request.loads.shear_kn.0,
        defaults = defaults.len(),
        "request validated"
    );

    let flexure = design_flexure(section, grades, &request.loads, d_prime, &solver)?;
    let mut modules = vec![ModuleStatus {
        module: DesignModule::Flexure,
        status: flexure.status,
    }];

    if flexure.status.is_fatal() {
        warn!(status = %flexure.status, "flexure is fatal; shear, detailing and ductile checks skipped");
        return Ok(assemble(request, flexure, None, None, None, modules, defaults));
    }

    let shear = design_shear(section, grades, &request.loads, flexure.ast_required_mm2, &detailing_options)?;
    modules.push(ModuleStatus {
        module: DesignModule::Shear,
        status: shear.status,
    });

    let detailing = design_detailing(
        section,
        grades,
        flexure.ast_required_mm2,
        flexure.asc_required_mm2,
        &detailing_options,
    )?;
    modules.push(ModuleStatus {
        module: DesignModule::Detailing,
        status: detailing.status,
    });

    let ductile = match &request.ductile {
        Some(options) => {
            let smallest_bar_mm = [&detailing.tension_bars, &detailing.compression_bars]
                .into_iter()
                .flatten()
                .map(|bars| bars.smallest_diameter_mm())
                .reduce(f64::min)
                .or_else(|| detailing_options.bar_diameters_mm.first().copied())
                .unwrap_or(DEFAULT_BAR_DIAMETERS_MM[0]);
            let demand = DuctileDemand {
                tension_steel_mm2: detailing
                    .provided_tension_area_mm2()
                    .unwrap_or(flexure.ast_required_mm2),
                smallest_bar_mm,
                shear_spacing_mm: shear.spacing_mm,
            };
            let result = check_ductile_detailing(section, grades, options, &demand, &mut defaults)?;
            modules.push(ModuleStatus {
                module: DesignModule::Ductile,
                status: result.status,
            });
            Some(result)
        }
        None => None,
    };

    for m in modules.iter().filter(|m| m.status.is_fatal()) {
        warn!(module = %m.module, status = %m.status, "module reported a fatal status");
    }

    Ok(assemble(
        request,
        flexure,
        Some(shear),
        Some(detailing),
        ductile,
        modules,
        defaults,
    ))
}

fn assemble(
    request: &BeamDesignRequest,
    flexure: FlexureResult,
    shear: Option<ShearResult>,
    detailing: Option<DetailingResult>,
    ductile: Option<DuctileCheckResult>,
    modules: Vec<ModuleStatus>,
    defaults_applied: Vec<AppliedDefault>,
) -> BeamDesignResult {
    let status = modules.iter().map(|m| m.status).max().unwrap_or_default();

    let mut records = flexure.records.clone();
    records.extend(shear.iter().flat_map(|s| s.records.iter().cloned()));
    records.extend(detailing.iter().flat_map(|d| d.records.iter().cloned()));
    records.extend(ductile.iter().flat_map(|d| d.records.iter().cloned()));

    debug!(status = %status, records = records.len(), "beam design complete");

    BeamDesignResult {
        label: request.label.clone(),
        status,
        flexure,
        shear,
        detailing,
        ductile,
        modules,
        records,
        defaults_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::flexure::FlexureState;
    use crate::calculations::shear::ShearState;
    use crate::errors::DesignErrorCode;
    use crate::materials::{ConcreteGrade, SteelGrade};

    fn request(mu_knm: f64, vu_kn: f64) -> BeamDesignRequest {
        BeamDesignRequest::new(
            "B-1",
            BeamSection::new(300.0, 450.0, 500.0),
            MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
            DesignLoad::new(mu_knm, vu_kn),
        )
    }

    #[test]
    fn test_reference_beam() {
        let result = design_beam(&request(150.0, 100.0)).unwrap();
        assert_eq!(result.status, DesignStatus::Safe);
        assert_eq!(result.flexure.state, FlexureState::SinglyReinforced);
        assert!((result.flexure.ast_required_mm2 - 1050.0).abs() <= 50.0);
        assert!(result.shear.is_some());
        assert!(result.detailing.is_some());
        assert!(result.ductile.is_none());
        assert_eq!(result.modules.len(), 3);
        assert!(result.passes());
    }

    #[test]
    fn test_defaults_are_recorded() {
        let result = design_beam(&request(150.0, 100.0)).unwrap();
        let fields: Vec<&str> = result.defaults_applied.iter().map(|d| d.field.as_str()).collect();
        assert!(fields.contains(&"compression_steel_depth_mm"));
        assert!(fields.contains(&"solver.tolerance"));
        assert!(fields.contains(&"solver.max_iterations"));
        assert!(fields.contains(&"solver.max_bisections"));
        assert!(fields.contains(&"detailing.clear_cover_mm"));
        assert!(fields.contains(&"detailing.bar_surface"));
    }

    #[test]
    fn test_validation_runs_first() {
        let mut req = request(150.0, 100.0);
        req.section = BeamSection::new(300.0, 500.0, 500.0);
        let err = design_beam(&req).unwrap_err();
        assert_eq!(err.error_code(), "INCONSISTENT_GEOMETRY");
    }

    #[test]
    fn test_default_d_prime_must_be_valid() {
        // D - d = 250 >= d = 200
        let mut req = request(50.0, 10.0);
        req.section = BeamSection::new(300.0, 200.0, 450.0);
        assert!(design_beam(&req).is_err());
    }

    #[test]
    fn test_cover_too_large_rejected() {
        let req = request(150.0, 100.0).with_detailing(DetailingOptions::new().with_clear_cover(150.0));
        let err = design_beam(&req).unwrap_err();
        assert_eq!(err.field(), "detailing.clear_cover_mm");
    }

    #[test]
    fn test_fatal_flexure_short_circuits() {
        let mut req = request(400.0, 100.0);
        req.section = BeamSection::new(230.0, 300.0, 340.0);
        let result = design_beam(&req).unwrap();
        assert_eq!(result.status, DesignStatus::SectionInadequate);
        assert!(result.shear.is_none());
        assert!(result.detailing.is_none());
        assert!(result.ductile.is_none());
        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.governing_module(), Some(DesignModule::Flexure));
    }

    #[test]
    fn test_shear_failure_does_not_halt() {
        let result = design_beam(&request(150.0, 450.0)).unwrap();
        assert_eq!(result.status, DesignStatus::SectionInadequate);
        let shear = result.shear.as_ref().unwrap();
        assert_eq!(shear.state, ShearState::SectionInadequate);
        assert!(shear.spacing_mm.is_none());
        assert!(result.detailing.is_some());
        assert_eq!(result.governing_module(), Some(DesignModule::Shear));
        assert!(result.records.iter().any(|r| r.code == DesignErrorCode::ShearExceedsMaximum));
    }

    #[test]
    fn test_doubly_reinforced_beam() {
        let result = design_beam(&request(300.0, 150.0)).unwrap();
        assert_eq!(result.flexure.state, FlexureState::DoublyReinforced);
        let detailing = result.detailing.unwrap();
        assert!(detailing.compression_bars.is_some());
        assert!(detailing.tension_bars.unwrap().area_mm2 >= result.flexure.ast_required_mm2);
    }

    #[test]
    fn test_ductile_checks_requested() {
        let req = request(150.0, 100.0).with_ductile(DuctileOptions::new().with_clear_span(5000.0));
        let result = design_beam(&req).unwrap();
        let ductile = result.ductile.as_ref().unwrap();
        assert!(ductile.check(crate::calculations::ductile::DuctileCheckKind::DepthSpanRatio).is_some());
        assert_eq!(result.modules.len(), 4);
        assert!(result
            .defaults_applied
            .iter()
            .any(|d| d.field == "ductile.confinement_length_mm"));
    }

    #[test]
    fn test_partial_solver_block_records_remaining_defaults() {
        let json = r#"{
            "section": { "width_mm": 300.0, "effective_depth_mm": 450.0, "overall_depth_mm": 500.0 },
            "materials": { "concrete": "M25", "steel": "Fe415" },
            "loads": { "moment_knm": 300.0, "shear_kn": 150.0 },
            "solver": { "max_iterations": 5 }
        }"#;
        let req: BeamDesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.solver.max_iterations, Some(5));

        let result = design_beam(&req).unwrap();
        let fields: Vec<&str> = result.defaults_applied.iter().map(|d| d.field.as_str()).collect();
        assert!(fields.contains(&"solver.tolerance"));
        assert!(fields.contains(&"solver.max_bisections"));
        assert!(!fields.contains(&"solver.max_iterations"));
    }

    #[test]
    fn test_full_solver_settings_record_nothing() {
        let req = request(300.0, 150.0).with_solver(SolverSettings::default());
        let result = design_beam(&req).unwrap();
        assert!(!result.defaults_applied.iter().any(|d| d.field.starts_with("solver")));
    }

    #[test]
    fn test_shear_failure_leaves_hoop_checks_unevaluated() {
        use crate::calculations::ductile::DuctileCheckKind;

        let req = request(150.0, 450.0).with_ductile(DuctileOptions::new());
        let result = design_beam(&req).unwrap();
        assert!(result.shear.as_ref().unwrap().spacing_mm.is_none());

        let ductile = result.ductile.as_ref().unwrap();
        assert!(!ductile.passed);
        for kind in [DuctileCheckKind::ConfinementHoopSpacing, DuctileCheckKind::HoopSpacingOutsideZone] {
            assert!(!ductile.check(kind).unwrap().evaluated);
            assert!(ductile.failed_checks.contains(&kind));
        }
        assert!(result
            .records
            .iter()
            .any(|r| r.code == DesignErrorCode::DuctileCheckNotEvaluated));
    }

    #[test]
    fn test_records_in_pipeline_order() {
        // Min steel (flexure, Info) then clamp (shear, Info)
        let result = design_beam(&request(10.0, 20.0)).unwrap();
        let codes: Vec<DesignErrorCode> = result.records.iter().map(|r| r.code).collect();
        let min_pos = codes.iter().position(|c| *c == DesignErrorCode::MinSteelGoverns).unwrap();
        assert_eq!(min_pos, 0);
        assert_eq!(result.status, DesignStatus::Safe);
    }

    #[test]
    fn test_request_json_minimal() {
        let json = r#"{
            "section": { "width_mm": 300.0, "effective_depth_mm": 450.0, "overall_depth_mm": 500.0 },
            "materials": { "concrete": "M25", "steel": "Fe415" },
            "loads": { "moment_knm": 150.0, "shear_kn": 100.0 }
        }"#;
        let req: BeamDesignRequest = serde_json::from_str(json).unwrap();
        assert!(req.ductile.is_none());
        assert_eq!(req.detailing, DetailingOptions::default());
        let result = design_beam(&req).unwrap();
        assert_eq!(result.status, DesignStatus::Safe);
    }

    #[test]
    fn test_result_serialization_is_stable() {
        let req = request(300.0, 150.0);
        let a = serde_json::to_string(&design_beam(&req).unwrap()).unwrap();
        let b = serde_json::to_string(&design_beam(&req).unwrap()).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("\"status\":"));
    }
}
