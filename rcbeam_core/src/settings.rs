//! # Design Settings
//!
//! Caller-tunable detailing, ductile-detailing and solver options.
//!
//! Every option is optional in the request. When one is omitted the engine
//! fills it from the documented default below **and records the fact** as an
//! [`AppliedDefault`] in the result; nothing is substituted silently.
//!
//! | Option | Default | Source |
//! |--------|---------|--------|
//! | Clear cover | 25 mm | IS 456 Cl. 26.4.2.1 (moderate exposure) |
//! | Stirrup | 8 mm, 2 legs | common practice |
//! | Bar surface | per steel grade | Fe250 plain, Fe415/Fe500 deformed |
//! | Bar diameters | 12, 16, 20, 25, 28, 32 mm | IS 1786 preferred sizes |
//! | Max layers | 2 | common practice |
//! | Aggregate | 20 mm | IS 456 Cl. 26.3.2 |
//! | Splice | flexural tension | IS 456 Cl. 26.2.5.1 |
//! | Solver tolerance | 1e-4 | relative moment residual |
//! | Solver passes | 50 | refinement guard |
//! | Solver bisections | 200 | neutral-axis search guard |
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::settings::{DetailingOptions, SpliceKind};
//!
//! let options = DetailingOptions::new()
//!     .with_clear_cover(40.0)
//!     .with_stirrups(10.0, 2)
//!     .with_splice(SpliceKind::DirectTension);
//! assert_eq!(options.stirrup_legs, Some(2));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::AppliedDefault;
use crate::materials::{BarSurface, SteelGrade};
use crate::units::Millimetres;

pub const DEFAULT_CLEAR_COVER_MM: f64 = 25.0;
pub const DEFAULT_STIRRUP_DIAMETER_MM: f64 = 8.0;
pub const DEFAULT_STIRRUP_LEGS: u32 = 2;
pub const DEFAULT_BAR_DIAMETERS_MM: [f64; 6] = [12.0, 16.0, 20.0, 25.0, 28.0, 32.0];
pub const DEFAULT_MAX_LAYERS: u32 = 2;
pub const DEFAULT_AGGREGATE_SIZE_MM: f64 = 20.0;

/// How a lapped splice is stressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpliceKind {
    /// Lap in flexural tension: max(Ld, 30φ)
    #[default]
    FlexuralTension,
    /// Lap in direct tension: max(2 Ld, 30φ)
    DirectTension,
}

impl SpliceKind {
    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            SpliceKind::FlexuralTension => "Flexural tension",
            SpliceKind::DirectTension => "Direct tension",
        }
    }
}

impl std::fmt::Display for SpliceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Detailing options as supplied by the caller.
///
/// ## JSON Example
///
/// ```json
/// {
///   "clear_cover_mm": 30.0,
///   "stirrup_diameter_mm": 8.0,
///   "stirrup_legs": 2,
///   "bar_diameters_mm": [16.0, 20.0, 25.0]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetailingOptions {
    /// Clear cover to the stirrups
    pub clear_cover_mm: Option<Millimetres>,
    pub stirrup_diameter_mm: Option<Millimetres>,
    pub stirrup_legs: Option<u32>,
    pub bar_surface: Option<BarSurface>,
    /// Candidate longitudinal bar diameters
    pub bar_diameters_mm: Option<Vec<f64>>,
    /// Maximum layers of tension bars
    pub max_layers: Option<u32>,
    /// Nominal maximum size of coarse aggregate
    pub aggregate_size_mm: Option<Millimetres>,
    pub splice: Option<SpliceKind>,
}

impl DetailingOptions {
    /// Options with nothing specified (every field will default)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clear_cover(mut self, cover_mm: f64) -> Self {
        self.clear_cover_mm = Some(Millimetres(cover_mm));
        self
    }

    pub fn with_stirrups(mut self, diameter_mm: f64, legs: u32) -> Self {
        self.stirrup_diameter_mm = Some(Millimetres(diameter_mm));
        self.stirrup_legs = Some(legs);
        self
    }

    pub fn with_bar_surface(mut self, surface: BarSurface) -> Self {
        self.bar_surface = Some(surface);
        self
    }

    pub fn with_bar_diameters(mut self, diameters_mm: &[f64]) -> Self {
        self.bar_diameters_mm = Some(diameters_mm.to_vec());
        self
    }

    pub fn with_max_layers(mut self, layers: u32) -> Self {
        self.max_layers = Some(layers);
        self
    }

    pub fn with_aggregate_size(mut self, size_mm: f64) -> Self {
        self.aggregate_size_mm = Some(Millimetres(size_mm));
        self
    }

    pub fn with_splice(mut self, splice: SpliceKind) -> Self {
        self.splice = Some(splice);
        self
    }

    /// Fill omitted fields from defaults, recording each substitution.
    pub fn resolve(&self, steel: SteelGrade, applied: &mut Vec<AppliedDefault>) -> ResolvedDetailing {
        let mut take = |field: &str, supplied: Option<f64>, default: f64, reason: &str| -> f64 {
            supplied.unwrap_or_else(|| {
                applied.push(AppliedDefault::new(field, default, reason));
                default
            })
        };

        let clear_cover_mm = take(
            "detailing.clear_cover_mm",
            self.clear_cover_mm.map(|c| c.0),
            DEFAULT_CLEAR_COVER_MM,
            "Nominal cover for moderate exposure (IS 456 Cl. 26.4.2.1)",
        );
        let stirrup_diameter_mm = take(
            "detailing.stirrup_diameter_mm",
            self.stirrup_diameter_mm.map(|s| s.0),
            DEFAULT_STIRRUP_DIAMETER_MM,
            "Typical stirrup diameter",
        );
        let aggregate_size_mm = take(
            "detailing.aggregate_size_mm",
            self.aggregate_size_mm.map(|a| a.0),
            DEFAULT_AGGREGATE_SIZE_MM,
            "Typical nominal maximum aggregate size",
        );

        let stirrup_legs = self.stirrup_legs.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "detailing.stirrup_legs",
                DEFAULT_STIRRUP_LEGS,
                "Two-legged closed stirrups",
            ));
            DEFAULT_STIRRUP_LEGS
        });
        let max_layers = self.max_layers.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "detailing.max_layers",
                DEFAULT_MAX_LAYERS,
                "Practical limit on tension bar layers",
            ));
            DEFAULT_MAX_LAYERS
        });
        let bar_surface = self.bar_surface.unwrap_or_else(|| {
            let surface = steel.typical_surface();
            applied.push(AppliedDefault::new(
                "detailing.bar_surface",
                surface,
                format!("Bar surface normally supplied in {}", steel),
            ));
            surface
        });
        let splice = self.splice.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "detailing.splice",
                SpliceKind::default(),
                "Laps assumed in flexural tension",
            ));
            SpliceKind::default()
        });
        let bar_diameters_mm = match &self.bar_diameters_mm {
            Some(list) => {
                let mut list = list.clone();
                list.sort_by(f64::total_cmp);
                list.dedup();
                list
            }
            None => {
                applied.push(AppliedDefault::new(
                    "detailing.bar_diameters_mm",
                    format!("{:?}", DEFAULT_BAR_DIAMETERS_MM),
                    "Preferred bar sizes (IS 1786)",
                ));
                DEFAULT_BAR_DIAMETERS_MM.to_vec()
            }
        };

        ResolvedDetailing {
            clear_cover_mm,
            stirrup_diameter_mm,
            stirrup_legs,
            bar_surface,
            bar_diameters_mm,
            max_layers,
            aggregate_size_mm,
            splice,
        }
    }
}

/// Detailing options with every field settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDetailing {
    pub clear_cover_mm: f64,
    pub stirrup_diameter_mm: f64,
    pub stirrup_legs: u32,
    pub bar_surface: BarSurface,
    /// Ascending, de-duplicated
    pub bar_diameters_mm: Vec<f64>,
    pub max_layers: u32,
    pub aggregate_size_mm: f64,
    pub splice: SpliceKind,
}

impl ResolvedDetailing {
    /// Width available to longitudinal bars inside the stirrups (mm)
    pub fn clear_width_mm(&self, width_mm: f64) -> f64 {
        width_mm - 2.0 * self.clear_cover_mm - 2.0 * self.stirrup_diameter_mm
    }
}

/// Options for the IS 13920 ductile-detailing checks.
///
/// Presence of this block in a request turns the checks on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DuctileOptions {
    /// Clear span; enables the depth-to-span check
    pub clear_span_mm: Option<Millimetres>,
    /// Length of the confinement zone provided at each support
    pub confinement_length_mm: Option<Millimetres>,
    /// Hoop spacing provided inside the confinement zone
    pub hoop_spacing_mm: Option<Millimetres>,
}

impl DuctileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clear_span(mut self, span_mm: f64) -> Self {
        self.clear_span_mm = Some(Millimetres(span_mm));
        self
    }

    pub fn with_confinement_length(mut self, length_mm: f64) -> Self {
        self.confinement_length_mm = Some(Millimetres(length_mm));
        self
    }

    pub fn with_hoop_spacing(mut self, spacing_mm: f64) -> Self {
        self.hoop_spacing_mm = Some(Millimetres(spacing_mm));
        self
    }
}

pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1.0e-4;
pub const DEFAULT_SOLVER_MAX_ITERATIONS: u32 = 50;
pub const DEFAULT_SOLVER_MAX_BISECTIONS: u32 = 200;

/// Solver options as supplied by the caller; any subset may be given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SolverOptions {
    pub tolerance: Option<f64>,
    pub max_iterations: Option<u32>,
    pub max_bisections: Option<u32>,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_max_iterations(mut self, passes: u32) -> Self {
        self.max_iterations = Some(passes);
        self
    }

    pub fn with_max_bisections(mut self, halvings: u32) -> Self {
        self.max_bisections = Some(halvings);
        self
    }

    /// Fill omitted guards, recording each one in `applied`
    pub fn resolve(&self, applied: &mut Vec<AppliedDefault>) -> SolverSettings {
        let tolerance = self.tolerance.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "solver.tolerance",
                DEFAULT_SOLVER_TOLERANCE,
                "Default relative moment tolerance",
            ));
            DEFAULT_SOLVER_TOLERANCE
        });
        let max_iterations = self.max_iterations.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "solver.max_iterations",
                DEFAULT_SOLVER_MAX_ITERATIONS,
                "Default refinement pass limit",
            ));
            DEFAULT_SOLVER_MAX_ITERATIONS
        });
        let max_bisections = self.max_bisections.unwrap_or_else(|| {
            applied.push(AppliedDefault::new(
                "solver.max_bisections",
                DEFAULT_SOLVER_MAX_BISECTIONS,
                "Default neutral-axis bisection limit",
            ));
            DEFAULT_SOLVER_MAX_BISECTIONS
        });
        SolverSettings {
            tolerance,
            max_iterations,
            max_bisections,
        }
    }
}

impl From<SolverSettings> for SolverOptions {
    fn from(settings: SolverSettings) -> Self {
        Self {
            tolerance: Some(settings.tolerance),
            max_iterations: Some(settings.max_iterations),
            max_bisections: Some(settings.max_bisections),
        }
    }
}

/// Resolved convergence guards for the doubly reinforced refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Relative moment tolerance |Mu − Mcap| / Mu
    pub tolerance: f64,
    /// Fixed-point refinement passes
    pub max_iterations: u32,
    /// Halvings allowed when locating the neutral axis
    pub max_bisections: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SOLVER_TOLERANCE,
            max_iterations: DEFAULT_SOLVER_MAX_ITERATIONS,
            max_bisections: DEFAULT_SOLVER_MAX_BISECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_records_every_default() {
        let mut applied = Vec::new();
        let resolved = DetailingOptions::new().resolve(SteelGrade::Fe415, &mut applied);

        assert_eq!(resolved.clear_cover_mm, 25.0);
        assert_eq!(resolved.stirrup_diameter_mm, 8.0);
        assert_eq!(resolved.stirrup_legs, 2);
        assert_eq!(resolved.bar_surface, BarSurface::Deformed);
        assert_eq!(resolved.max_layers, 2);
        assert_eq!(resolved.bar_diameters_mm, DEFAULT_BAR_DIAMETERS_MM.to_vec());
        assert_eq!(applied.len(), 8);
        assert!(applied.iter().any(|d| d.field == "detailing.clear_cover_mm"));
    }

    #[test]
    fn test_supplied_values_are_not_recorded() {
        let mut applied = Vec::new();
        let options = DetailingOptions::new()
            .with_clear_cover(30.0)
            .with_stirrups(10.0, 4)
            .with_bar_surface(BarSurface::Plain)
            .with_bar_diameters(&[25.0, 16.0, 16.0])
            .with_max_layers(3)
            .with_aggregate_size(10.0)
            .with_splice(SpliceKind::DirectTension);
        let resolved = options.resolve(SteelGrade::Fe500, &mut applied);

        assert!(applied.is_empty());
        assert_eq!(resolved.bar_diameters_mm, vec![16.0, 25.0]);
        assert_eq!(resolved.stirrup_legs, 4);
    }

    #[test]
    fn test_mild_steel_defaults_to_plain_bars() {
        let mut applied = Vec::new();
        let resolved = DetailingOptions::new().resolve(SteelGrade::Fe250, &mut applied);
        assert_eq!(resolved.bar_surface, BarSurface::Plain);
    }

    #[test]
    fn test_clear_width() {
        let mut applied = Vec::new();
        let resolved = DetailingOptions::new().resolve(SteelGrade::Fe415, &mut applied);
        // 300 - 2×25 - 2×8 = 234
        assert_eq!(resolved.clear_width_mm(300.0), 234.0);
    }

    #[test]
    fn test_options_json_allows_omitted_fields() {
        let options: DetailingOptions = serde_json::from_str(r#"{"clear_cover_mm": 40.0}"#).unwrap();
        assert_eq!(options.clear_cover_mm, Some(Millimetres(40.0)));
        assert!(options.stirrup_diameter_mm.is_none());

        let solver: SolverOptions = serde_json::from_str(r#"{"max_iterations": 5}"#).unwrap();
        assert_eq!(solver.max_iterations, Some(5));
        assert!(solver.tolerance.is_none());
    }

    #[test]
    fn test_partial_solver_options_record_filled_guards() {
        let mut applied = Vec::new();
        let solver = SolverOptions::new().with_max_iterations(5).resolve(&mut applied);

        assert_eq!(solver.max_iterations, 5);
        assert_eq!(solver.tolerance, DEFAULT_SOLVER_TOLERANCE);
        assert_eq!(solver.max_bisections, DEFAULT_SOLVER_MAX_BISECTIONS);
        let fields: Vec<&str> = applied.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["solver.tolerance", "solver.max_bisections"]);
    }

    #[test]
    fn test_resolved_solver_settings_require_every_field() {
        let partial: Result<SolverSettings, _> = serde_json::from_str(r#"{"max_iterations": 5}"#);
        assert!(partial.is_err());

        let mut applied = Vec::new();
        let full = SolverOptions::from(SolverSettings::default()).resolve(&mut applied);
        assert_eq!(full, SolverSettings::default());
        assert!(applied.is_empty());
    }
}
