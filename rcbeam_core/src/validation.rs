//! # Input Validation
//!
//! Every check here runs before any design calculation. A failure returns a
//! [`ValidationError`] naming the offending field, so a request either passes
//! as a whole or nothing is computed.
//!
//! Material grades need no runtime check: they are closed enums and serde
//! rejects unknown designations while parsing.

use crate::calculations::beam::BeamDesignRequest;
use crate::errors::{CalcResult, ValidationError};
use crate::section::{BeamSection, DesignLoad};
use crate::settings::{DetailingOptions, DuctileOptions, ResolvedDetailing, SolverOptions, SolverSettings};

/// Upper bound on the solver's relative moment tolerance
pub const MAX_SOLVER_TOLERANCE: f64 = 0.01;

/// Value must be finite and strictly positive
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_input(field, value.to_string(), "Must be a finite number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::invalid_input(field, value.to_string(), "Must be greater than zero"));
    }
    Ok(())
}

/// Value must be finite and zero or greater
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_input(field, value.to_string(), "Must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::invalid_input(field, value.to_string(), "Must not be negative"));
    }
    Ok(())
}

/// Positive dimensions and d < D
pub fn validate_section(section: &BeamSection) -> CalcResult<()> {
    require_positive("section.width_mm", section.b())?;
    require_positive("section.effective_depth_mm", section.d())?;
    require_positive("section.overall_depth_mm", section.overall_depth())?;

    if section.d() >= section.overall_depth() {
        return Err(ValidationError::inconsistent_geometry(
            "section.effective_depth_mm",
            section.d().to_string(),
            format!(
                "effective depth must be less than overall depth ({} mm)",
                section.overall_depth()
            ),
        ));
    }
    Ok(())
}

/// Finite, non-negative design actions
pub fn validate_load(load: &DesignLoad) -> CalcResult<()> {
    require_non_negative("loads.moment_knm", load.moment_knm.0)?;
    require_non_negative("loads.shear_kn", load.shear_kn.0)
}

/// Compression steel must sit between the compression face and the tension steel
pub fn validate_compression_steel_depth(section: &BeamSection, d_prime: Option<f64>) -> CalcResult<()> {
    let Some(d_prime) = d_prime else {
        return Ok(());
    };
    require_positive("compression_steel_depth_mm", d_prime)?;
    if d_prime >= section.d() {
        return Err(ValidationError::inconsistent_geometry(
            "compression_steel_depth_mm",
            d_prime.to_string(),
            format!("d' must be less than the effective depth ({} mm)", section.d()),
        ));
    }
    Ok(())
}

/// Supplied detailing options (omitted fields are checked after resolution)
pub fn validate_detailing_options(options: &DetailingOptions) -> CalcResult<()> {
    if let Some(cover) = options.clear_cover_mm {
        require_positive("detailing.clear_cover_mm", cover.0)?;
    }
    if let Some(dia) = options.stirrup_diameter_mm {
        require_positive("detailing.stirrup_diameter_mm", dia.0)?;
    }
    if let Some(legs) = options.stirrup_legs {
        if legs < 2 {
            return Err(ValidationError::invalid_input(
                "detailing.stirrup_legs",
                legs.to_string(),
                "Stirrups need at least 2 legs",
            ));
        }
    }
    if let Some(layers) = options.max_layers {
        if layers < 1 {
            return Err(ValidationError::invalid_input(
                "detailing.max_layers",
                layers.to_string(),
                "At least one layer of bars is required",
            ));
        }
    }
    if let Some(diameters) = &options.bar_diameters_mm {
        if diameters.is_empty() {
            return Err(ValidationError::invalid_input(
                "detailing.bar_diameters_mm",
                "[]",
                "At least one bar diameter is required",
            ));
        }
        for &dia in diameters {
            require_positive("detailing.bar_diameters_mm", dia)?;
        }
    }
    if let Some(agg) = options.aggregate_size_mm {
        require_positive("detailing.aggregate_size_mm", agg.0)?;
    }
    Ok(())
}

/// Cover and stirrups must leave room for longitudinal bars
pub fn validate_clear_width(section: &BeamSection, detailing: &ResolvedDetailing) -> CalcResult<()> {
    let clear = detailing.clear_width_mm(section.b());
    if clear <= 0.0 {
        return Err(ValidationError::inconsistent_geometry(
            "detailing.clear_cover_mm",
            detailing.clear_cover_mm.to_string(),
            format!(
                "b - 2 cover - 2 stirrup diameter must be positive (got {:.1} mm)",
                clear
            ),
        ));
    }
    Ok(())
}

pub fn validate_ductile_options(options: &DuctileOptions) -> CalcResult<()> {
    if let Some(span) = options.clear_span_mm {
        require_positive("ductile.clear_span_mm", span.0)?;
    }
    if let Some(length) = options.confinement_length_mm {
        require_positive("ductile.confinement_length_mm", length.0)?;
    }
    if let Some(spacing) = options.hoop_spacing_mm {
        require_positive("ductile.hoop_spacing_mm", spacing.0)?;
    }
    Ok(())
}

pub fn validate_solver(solver: &SolverSettings) -> CalcResult<()> {
    let tol = solver.tolerance;
    if !tol.is_finite() || tol <= 0.0 || tol > MAX_SOLVER_TOLERANCE {
        return Err(ValidationError::invalid_input(
            "solver.tolerance",
            tol.to_string(),
            format!("Must be in (0, {}]", MAX_SOLVER_TOLERANCE),
        ));
    }
    if solver.max_iterations == 0 {
        return Err(ValidationError::invalid_input(
            "solver.max_iterations",
            "0",
            "At least one refinement pass is required",
        ));
    }
    if solver.max_bisections == 0 {
        return Err(ValidationError::invalid_input(
            "solver.max_bisections",
            "0",
            "At least one bisection step is required",
        ));
    }
    Ok(())
}

/// Validate the solver fields the caller supplied
pub fn validate_solver_options(options: &SolverOptions) -> CalcResult<()> {
    // Default guards always pass
    validate_solver(&options.resolve(&mut Vec::new()))
}

/// Validate everything the caller supplied.
///
/// Checks that depend on resolved defaults (clear width) are run by the
/// orchestrator through [`validate_clear_width`] once settings are resolved,
/// still ahead of any calculation.
pub fn validate_request(request: &BeamDesignRequest) -> CalcResult<()> {
    validate_section(&request.section)?;
    validate_load(&request.loads)?;
    validate_compression_steel_depth(&request.section, request.compression_steel_depth_mm.map(|d| d.0))?;
    validate_detailing_options(&request.detailing)?;
    if let Some(ductile) = &request.ductile {
        validate_ductile_options(ductile)?;
    }
    validate_solver_options(&request.solver)?;
    Ok(())
}
