//! # Ductile Detailing Checks (IS 13920:2016)
//!
//! Itemized checks for flexural members of earthquake-resisting frames. Each
//! check reports the actual value, the limit, and the clause; the composite
//! result passes only when every check passes.
//!
//! Geometry failures (width, width/depth, depth/span) make the section
//! inadequate. Steel and hoop failures are warnings: they are fixed by
//! re-detailing, not by resizing.
//!
//! A hoop check with no spacing to check against is still listed, marked
//! not evaluated, and counts as a failure of the composite.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    clause, CONFINEMENT_LENGTH_DEPTH_MULTIPLE, CONFINEMENT_SPACING_BAR_DIAMETERS, CONFINEMENT_SPACING_DEPTH_RATIO,
    CONFINEMENT_SPACING_MAX_MM, DUCTILE_MAX_DEPTH_SPAN_RATIO, DUCTILE_MAX_STEEL_PERCENT, DUCTILE_MIN_FCK,
    DUCTILE_MIN_STEEL_COEFF, DUCTILE_MIN_WIDTH_DEPTH_RATIO, DUCTILE_MIN_WIDTH_MM, OUTSIDE_ZONE_SPACING_DEPTH_RATIO,
};
use crate::errors::{worst_status, AppliedDefault, CalcResult, DesignErrorCode, DesignStatus, ErrorRecord, Severity};
use crate::materials::MaterialGrade;
use crate::section::BeamSection;
use crate::settings::DuctileOptions;
use crate::validation::{require_non_negative, require_positive, validate_ductile_options, validate_section};

/// The individual IS 13920 checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuctileCheckKind {
    ConcreteGrade,
    MinimumWidth,
    WidthDepthRatio,
    DepthSpanRatio,
    MinimumSteel,
    MaximumSteel,
    ConfinementZoneLength,
    ConfinementHoopSpacing,
    HoopSpacingOutsideZone,
}

impl DuctileCheckKind {
    /// Geometry checks cannot be fixed by detailing
    pub fn is_geometric(&self) -> bool {
        matches!(
            self,
            DuctileCheckKind::MinimumWidth | DuctileCheckKind::WidthDepthRatio | DuctileCheckKind::DepthSpanRatio
        )
    }

    pub fn clause(&self) -> &'static str {
        match self {
            DuctileCheckKind::ConcreteGrade => clause::DUCTILE_CONCRETE,
            DuctileCheckKind::MinimumWidth => clause::DUCTILE_MIN_WIDTH,
            DuctileCheckKind::WidthDepthRatio => clause::DUCTILE_WIDTH_DEPTH,
            DuctileCheckKind::DepthSpanRatio => clause::DUCTILE_DEPTH_SPAN,
            DuctileCheckKind::MinimumSteel => clause::DUCTILE_MIN_STEEL,
            DuctileCheckKind::MaximumSteel => clause::DUCTILE_MAX_STEEL,
            DuctileCheckKind::ConfinementZoneLength
            | DuctileCheckKind::ConfinementHoopSpacing
            | DuctileCheckKind::HoopSpacingOutsideZone => clause::DUCTILE_HOOPS,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DuctileCheckKind::ConcreteGrade => "Concrete grade",
            DuctileCheckKind::MinimumWidth => "Minimum width",
            DuctileCheckKind::WidthDepthRatio => "Width to depth ratio",
            DuctileCheckKind::DepthSpanRatio => "Depth to span ratio",
            DuctileCheckKind::MinimumSteel => "Minimum tension steel",
            DuctileCheckKind::MaximumSteel => "Maximum tension steel",
            DuctileCheckKind::ConfinementZoneLength => "Confinement zone length",
            DuctileCheckKind::ConfinementHoopSpacing => "Hoop spacing in confinement zone",
            DuctileCheckKind::HoopSpacingOutsideZone => "Hoop spacing outside confinement zone",
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            DuctileCheckKind::ConcreteGrade => "Use M20 or higher concrete",
            DuctileCheckKind::MinimumWidth => "Increase the beam width to at least 200 mm",
            DuctileCheckKind::WidthDepthRatio => "Increase the width or reduce the depth",
            DuctileCheckKind::DepthSpanRatio => "Reduce the depth or increase the clear span",
            DuctileCheckKind::MinimumSteel => "Provide more tension steel",
            DuctileCheckKind::MaximumSteel => "Increase the section size to reduce the steel percentage",
            DuctileCheckKind::ConfinementZoneLength => "Extend closely spaced hoops to 2d from each support face",
            DuctileCheckKind::ConfinementHoopSpacing => "Reduce hoop spacing near supports",
            DuctileCheckKind::HoopSpacingOutsideZone => "Reduce stirrup spacing to d/2 or less",
        }
    }
}

impl std::fmt::Display for DuctileCheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Comparison a check applies between actual and limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    AtLeast,
    AtMost,
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctileCheck {
    pub kind: DuctileCheckKind,
    pub passed: bool,
    /// False when the input needed for the check was unavailable
    pub evaluated: bool,
    /// `None` when not evaluated
    pub actual: Option<f64>,
    pub limit: f64,
    pub message: String,
    pub clause: String,
}

impl DuctileCheck {
    fn evaluate(kind: DuctileCheckKind, actual: f64, limit: f64, bound: Limit, unit: &str) -> Self {
        let (passed, relation) = match bound {
            Limit::AtLeast => (actual >= limit, ">="),
            Limit::AtMost => (actual <= limit, "<="),
        };
        let verdict = if passed { "OK" } else { "NOT satisfied" };
        Self {
            kind,
            passed,
            evaluated: true,
            actual: Some(actual),
            limit,
            message: format!(
                "{}: {:.4}{} {} {:.4}{} {}",
                kind.display_name(),
                actual,
                unit,
                relation,
                limit,
                unit,
                verdict
            ),
            clause: kind.clause().to_string(),
        }
    }

    fn not_evaluated(kind: DuctileCheckKind, limit: f64, reason: &str) -> Self {
        Self {
            kind,
            passed: false,
            evaluated: false,
            actual: None,
            limit,
            message: format!("{}: not evaluated, {}", kind.display_name(), reason),
            clause: kind.clause().to_string(),
        }
    }

    /// Record for a failed or unevaluated check
    pub fn to_record(&self) -> Option<ErrorRecord> {
        if self.passed {
            return None;
        }
        if !self.evaluated {
            return Some(
                ErrorRecord::new(
                    DesignErrorCode::DuctileCheckNotEvaluated,
                    Severity::Warning,
                    self.message.clone(),
                    self.clause.clone(),
                )
                .with_suggestion("Supply ductile.hoop_spacing_mm")
                .with_suggestion(self.kind.suggestion()),
            );
        }
        let severity = if self.kind.is_geometric() {
            Severity::SectionInadequate
        } else {
            Severity::Warning
        };
        Some(
            ErrorRecord::new(DesignErrorCode::DuctileCheckFailed, severity, self.message.clone(), self.clause.clone())
                .with_suggestion(self.kind.suggestion()),
        )
    }
}

/// Quantities the checks are evaluated against.
///
/// The orchestrator fills this from the flexure, shear and detailing results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctileDemand {
    /// Tension steel: provided area when bars were chosen, else required area (mm²)
    pub tension_steel_mm2: f64,
    /// Smallest longitudinal bar diameter (mm)
    pub smallest_bar_mm: f64,
    /// Stirrup spacing from shear design, when one exists (mm)
    pub shear_spacing_mm: Option<f64>,
}

/// Composite ductile-detailing result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctileCheckResult {
    /// True when every check was evaluated and passed
    pub passed: bool,
    pub checks: Vec<DuctileCheck>,
    pub failed_checks: Vec<DuctileCheckKind>,
    /// Hoop spacing checked inside the confinement zone (mm)
    pub hoop_spacing_mm: Option<f64>,
    /// Confinement zone length checked (mm)
    pub confinement_length_mm: f64,
    pub status: DesignStatus,
    pub records: Vec<ErrorRecord>,
}

impl DuctileCheckResult {
    pub fn check(&self, kind: DuctileCheckKind) -> Option<&DuctileCheck> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

/// Run the IS 13920 checks.
///
/// Omitted options are filled and recorded in `applied`: hoop spacing from the
/// shear design, confinement length as 2d. When no spacing is available at
/// all (shear design found the section inadequate) the hoop checks are
/// reported as not evaluated and the composite fails.
pub fn check_ductile_detailing(
    section: &BeamSection,
    grades: &MaterialGrade,
    options: &DuctileOptions,
    demand: &DuctileDemand,
    applied: &mut Vec<AppliedDefault>,
) -> CalcResult<DuctileCheckResult> {
    validate_section(section)?;
    validate_ductile_options(options)?;
    require_non_negative("tension_steel_mm2", demand.tension_steel_mm2)?;
    require_positive("smallest_bar_mm", demand.smallest_bar_mm)?;

    let (b, d, overall) = (section.b(), section.d(), section.overall_depth());
    let (fck, fy) = (grades.fck(), grades.fy());
    let mut checks = vec![
        DuctileCheck::evaluate(DuctileCheckKind::ConcreteGrade, fck, DUCTILE_MIN_FCK, Limit::AtLeast, " N/mm²"),
        DuctileCheck::evaluate(DuctileCheckKind::MinimumWidth, b, DUCTILE_MIN_WIDTH_MM, Limit::AtLeast, " mm"),
        DuctileCheck::evaluate(
            DuctileCheckKind::WidthDepthRatio,
            b / overall,
            DUCTILE_MIN_WIDTH_DEPTH_RATIO,
            Limit::AtLeast,
            "",
        ),
    ];

    if let Some(span) = options.clear_span_mm {
        checks.push(DuctileCheck::evaluate(
            DuctileCheckKind::DepthSpanRatio,
            overall / span.0,
            DUCTILE_MAX_DEPTH_SPAN_RATIO,
            Limit::AtMost,
            "",
        ));
    }

    let ratio = demand.tension_steel_mm2 / section.effective_area_mm2();
    checks.push(DuctileCheck::evaluate(
        DuctileCheckKind::MinimumSteel,
        ratio,
        DUCTILE_MIN_STEEL_COEFF * fck.sqrt() / fy,
        Limit::AtLeast,
        "",
    ));
    checks.push(DuctileCheck::evaluate(
        DuctileCheckKind::MaximumSteel,
        100.0 * ratio,
        DUCTILE_MAX_STEEL_PERCENT,
        Limit::AtMost,
        " %",
    ));

    let required_length = CONFINEMENT_LENGTH_DEPTH_MULTIPLE * d;
    let confinement_length = match options.confinement_length_mm {
        Some(length) => length.0,
        None => {
            applied.push(AppliedDefault::new(
                "ductile.confinement_length_mm",
                required_length,
                "Confinement zone taken as 2d from each support face",
            ));
            required_length
        }
    };
    checks.push(DuctileCheck::evaluate(
        DuctileCheckKind::ConfinementZoneLength,
        confinement_length,
        required_length,
        Limit::AtLeast,
        " mm",
    ));

    let hoop_spacing = match options.hoop_spacing_mm {
        Some(spacing) => Some(spacing.0),
        None => {
            if let Some(spacing) = demand.shear_spacing_mm {
                applied.push(AppliedDefault::new(
                    "ductile.hoop_spacing_mm",
                    spacing,
                    "Hoop spacing taken from the shear design",
                ));
            }
            demand.shear_spacing_mm
        }
    };
    const NO_SPACING: &str = "no hoop spacing given and shear design produced none";
    let zone_limit = (CONFINEMENT_SPACING_DEPTH_RATIO * d)
        .min(CONFINEMENT_SPACING_BAR_DIAMETERS * demand.smallest_bar_mm)
        .min(CONFINEMENT_SPACING_MAX_MM);
    checks.push(match hoop_spacing {
        Some(spacing) => DuctileCheck::evaluate(
            DuctileCheckKind::ConfinementHoopSpacing,
            spacing,
            zone_limit,
            Limit::AtMost,
            " mm",
        ),
        None => DuctileCheck::not_evaluated(DuctileCheckKind::ConfinementHoopSpacing, zone_limit, NO_SPACING),
    });
    let outside_limit = OUTSIDE_ZONE_SPACING_DEPTH_RATIO * d;
    checks.push(match demand.shear_spacing_mm.or(hoop_spacing) {
        Some(spacing) => DuctileCheck::evaluate(
            DuctileCheckKind::HoopSpacingOutsideZone,
            spacing,
            outside_limit,
            Limit::AtMost,
            " mm",
        ),
        None => DuctileCheck::not_evaluated(DuctileCheckKind::HoopSpacingOutsideZone, outside_limit, NO_SPACING),
    });

    let failed_checks: Vec<DuctileCheckKind> = checks.iter().filter(|c| !c.passed).map(|c| c.kind).collect();
    let records: Vec<ErrorRecord> = checks.iter().filter_map(DuctileCheck::to_record).collect();

    debug!(
        checks = checks.len(),
        failed = failed_checks.len(),
        "ductile detailing checked"
    );

    Ok(DuctileCheckResult {
        passed: failed_checks.is_empty(),
        checks,
        failed_checks,
        hoop_spacing_mm: hoop_spacing,
        confinement_length_mm: confinement_length,
        status: worst_status(&records),
        records,
    })
}
