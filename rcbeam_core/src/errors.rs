//! # Error Types
//!
//! Two-tier error taxonomy for rcbeam_core:
//!
//! - [`ValidationError`] - malformed input. Always fatal, returned as `Err`
//!   before any design calculation starts.
//! - [`ErrorRecord`] - a design-level finding (code violation, warning, or
//!   informational note). Carried inside the result so the caller always
//!   receives a complete diagnostic report.
//!
//! Both are designed to be informative for humans and LLMs alike: every record
//! names a clause and tells the engineer what to change.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::errors::{CalcResult, ValidationError};
//!
//! fn validate_width(width_mm: f64) -> CalcResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(ValidationError::invalid_input(
//!             "width_mm",
//!             width_mm.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-300.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rcbeam_core operations
pub type CalcResult<T> = Result<T, ValidationError>;

// ============================================================================
// Validation Errors (tier 1)
// ============================================================================

/// Structured validation error.
///
/// Raised before any calculation proceeds. Each variant provides the offending
/// field and value so callers can correct the request programmatically.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ValidationError {
    /// An input value is out of range (non-positive, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Two inputs are individually valid but contradict each other
    #[error("Inconsistent geometry: '{field}' = {value} violates {constraint}")]
    InconsistentGeometry {
        field: String,
        value: String,
        constraint: String,
    },

    /// Material grade outside the enumerated, code-permitted set
    #[error("Unsupported {material} grade: {value}")]
    UnsupportedGrade { material: String, value: String },
}

impl ValidationError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InconsistentGeometry error
    pub fn inconsistent_geometry(
        field: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        ValidationError::InconsistentGeometry {
            field: field.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an UnsupportedGrade error
    pub fn unsupported_grade(material: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnsupportedGrade {
            material: material.into(),
            value: value.into(),
        }
    }

    /// Name of the request field that failed validation
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidInput { field, .. } => field,
            ValidationError::InconsistentGeometry { field, .. } => field,
            ValidationError::UnsupportedGrade { material, .. } => material,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidInput { .. } => "INVALID_INPUT",
            ValidationError::InconsistentGeometry { .. } => "INCONSISTENT_GEOMETRY",
            ValidationError::UnsupportedGrade { .. } => "UNSUPPORTED_GRADE",
        }
    }
}

// ============================================================================
// Design Status and Severity (tier 2)
// ============================================================================

/// Worst-case outcome of a module or of the whole design.
///
/// Ordered: `Safe < Warning < SectionInadequate < Error`, so the top-level
/// status is simply the maximum over module statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignStatus {
    /// All checks satisfied
    #[default]
    Safe,
    /// Design usable, but the engineer should act on a finding
    Warning,
    /// Code requirement violated; the section as given cannot be used
    SectionInadequate,
    /// Calculation could not be completed
    Error,
}

impl DesignStatus {
    /// True for statuses that make downstream modules meaningless
    pub fn is_fatal(&self) -> bool {
        *self >= DesignStatus::SectionInadequate
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignStatus::Safe => "SAFE",
            DesignStatus::Warning => "WARNING",
            DesignStatus::SectionInadequate => "SECTION INADEQUATE",
            DesignStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Severity of a single [`ErrorRecord`].
///
/// `Info` records are visible to the caller but do not degrade the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    SectionInadequate,
    Error,
}

impl Severity {
    /// Module status implied by a record of this severity
    pub fn status(&self) -> DesignStatus {
        match self {
            Severity::Info => DesignStatus::Safe,
            Severity::Warning => DesignStatus::Warning,
            Severity::SectionInadequate => DesignStatus::SectionInadequate,
            Severity::Error => DesignStatus::Error,
        }
    }
}

/// Stable codes for design findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignErrorCode {
    /// Tension steel raised to the code minimum
    MinSteelGoverns,
    /// Required steel exceeds the code maximum
    MaxSteelExceeded,
    /// Compression steel stress does not exceed the displaced concrete stress
    CompressionSteelIneffective,
    /// Doubly reinforced refinement did not converge
    SolverNotConverged,
    /// Nominal shear stress above Table 20 ceiling
    ShearExceedsMaximum,
    /// Required stirrup spacing below the practical minimum
    StirrupSpacingBelowMinimum,
    /// No bar combination fits within the layer limits
    BarsDoNotFit,
    /// Deep beam needs side-face bars
    SideFaceReinforcementRequired,
    /// A table input was outside the tabulated domain
    TableInputClamped,
    /// An IS 13920 check failed
    DuctileCheckFailed,
    /// An IS 13920 check could not be run for lack of input
    DuctileCheckNotEvaluated,
}

impl DesignErrorCode {
    /// Short code string (matches the JSON representation)
    pub fn code(&self) -> &'static str {
        match self {
            DesignErrorCode::MinSteelGoverns => "MIN_STEEL_GOVERNS",
            DesignErrorCode::MaxSteelExceeded => "MAX_STEEL_EXCEEDED",
            DesignErrorCode::CompressionSteelIneffective => "COMPRESSION_STEEL_INEFFECTIVE",
            DesignErrorCode::SolverNotConverged => "SOLVER_NOT_CONVERGED",
            DesignErrorCode::ShearExceedsMaximum => "SHEAR_EXCEEDS_MAXIMUM",
            DesignErrorCode::StirrupSpacingBelowMinimum => "STIRRUP_SPACING_BELOW_MINIMUM",
            DesignErrorCode::BarsDoNotFit => "BARS_DO_NOT_FIT",
            DesignErrorCode::SideFaceReinforcementRequired => "SIDE_FACE_REINFORCEMENT_REQUIRED",
            DesignErrorCode::TableInputClamped => "TABLE_INPUT_CLAMPED",
            DesignErrorCode::DuctileCheckFailed => "DUCTILE_CHECK_FAILED",
            DesignErrorCode::DuctileCheckNotEvaluated => "DUCTILE_CHECK_NOT_EVALUATED",
        }
    }
}

impl std::fmt::Display for DesignErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Error Records
// ============================================================================

/// A clause-traceable design finding.
///
/// ## JSON Example
///
/// ```json
/// {
///   "code": "SHEAR_EXCEEDS_MAXIMUM",
///   "severity": "SECTION_INADEQUATE",
///   "message": "Nominal shear stress 3.70 N/mm² exceeds τc,max = 3.10 N/mm²",
///   "clause": "IS 456:2000 Table 20",
///   "suggestions": ["Increase section width", "Use a higher concrete grade"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: DesignErrorCode,
    pub severity: Severity,
    pub message: String,
    pub clause: String,
    /// Actionable changes, most effective first
    pub suggestions: Vec<String>,
}

impl ErrorRecord {
    /// Create a record without suggestions
    pub fn new(
        code: DesignErrorCode,
        severity: Severity,
        message: impl Into<String>,
        clause: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            clause: clause.into(),
            suggestions: Vec::new(),
        }
    }

    /// Append an actionable suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Worst status implied by a set of records (`Safe` when empty)
pub fn worst_status(records: &[ErrorRecord]) -> DesignStatus {
    records
        .iter()
        .map(|r| r.severity.status())
        .max()
        .unwrap_or(DesignStatus::Safe)
}

/// An optional request field filled from an engine default.
///
/// Defaults are never applied silently; each one is listed in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDefault {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl AppliedDefault {
    pub fn new(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
