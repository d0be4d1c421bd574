//! # Constants
//!
//! Fixed unit-conversion factors, limit-state design constants, and
//! detailing limits from IS 456:2000, IS 13920:2016 and SP 16.
//!
//! Every constant here is used by exactly the formula its doc comment names,
//! so a reviewer can check the engine against a hand calculation line by line.

// ============================================================================
// Unit Conversion
// ============================================================================

/// Newtons per kilonewton
pub const KN_TO_N: f64 = 1.0e3;

/// Newton-millimetres per kilonewton-metre
pub const KNM_TO_NMM: f64 = 1.0e6;

// ============================================================================
// Limit-State Design (IS 456 Cl. 38.1, Annex G)
// ============================================================================

/// Modulus of elasticity of reinforcing steel Es (N/mm²), Cl. 5.6.3
pub const STEEL_MODULUS: f64 = 200_000.0;

/// Maximum compressive strain in concrete in flexure
pub const CONCRETE_ULTIMATE_STRAIN: f64 = 0.0035;

/// Design stress in steel as a fraction of fy (1/γm, γm = 1.15)
pub const STEEL_DESIGN_FACTOR: f64 = 0.87;

/// Stress-block force coefficient: C = 0.36 fck b xu
pub const STRESS_BLOCK_FORCE: f64 = 0.36;

/// Stress-block centroid depth as a fraction of xu: 0.42 xu
pub const STRESS_BLOCK_CENTROID: f64 = 0.42;

/// Concrete stress at compression steel level deducted from fsc: 0.446 fck
pub const DISPLACED_CONCRETE_STRESS: f64 = 0.446;

// ============================================================================
// Flexural Reinforcement Limits (IS 456 Cl. 26.5.1)
// ============================================================================

/// Minimum tension steel: As/(b d) = 0.85 / fy
pub const MIN_TENSION_STEEL_COEFF: f64 = 0.85;

/// Maximum tension or compression steel as a fraction of b D
pub const MAX_STEEL_FRACTION: f64 = 0.04;

/// Overall depth beyond which side-face reinforcement is required (mm)
pub const SIDE_FACE_DEPTH_LIMIT_MM: f64 = 750.0;

/// Side-face reinforcement as a fraction of web area b D (both faces)
pub const SIDE_FACE_STEEL_FRACTION: f64 = 0.001;

// ============================================================================
// Shear (IS 456 Cl. 26.5.1.5, 26.5.1.6, 40)
// ============================================================================

/// Upper limit on fy for stirrup design (N/mm²), Cl. 40.4
pub const STIRRUP_MAX_FY: f64 = 415.0;

/// Minimum shear reinforcement: Asv/(b sv) ≥ 0.4 / (0.87 fy)
pub const MIN_SHEAR_REINF_STRESS: f64 = 0.4;

/// Maximum stirrup spacing as a fraction of d
pub const MAX_STIRRUP_SPACING_DEPTH_RATIO: f64 = 0.75;

/// Absolute maximum stirrup spacing (mm)
pub const MAX_STIRRUP_SPACING_MM: f64 = 300.0;

/// Practical minimum stirrup spacing for concrete placement (mm)
pub const MIN_STIRRUP_SPACING_MM: f64 = 75.0;

// ============================================================================
// Bond, Anchorage and Laps (IS 456 Cl. 26.2)
// ============================================================================

/// Bond stress increase for deformed bars (Cl. 26.2.1.1)
pub const DEFORMED_BAR_BOND_FACTOR: f64 = 1.6;

/// Bond stress increase for bars in compression (Cl. 26.2.1.1)
pub const COMPRESSION_BOND_FACTOR: f64 = 1.25;

/// Minimum flexural-tension lap as a multiple of bar diameter
pub const TENSION_LAP_MIN_DIAMETERS: f64 = 30.0;

/// Minimum compression lap as a multiple of bar diameter
pub const COMPRESSION_LAP_MIN_DIAMETERS: f64 = 24.0;

/// Minimum straight lap length as a multiple of bar diameter (Cl. 26.2.5.1(c))
pub const LAP_FLOOR_DIAMETERS: f64 = 15.0;

/// Absolute minimum straight lap length (mm)
pub const LAP_FLOOR_MM: f64 = 200.0;

/// Lap multiplier on Ld for splices in direct tension
pub const DIRECT_TENSION_LAP_FACTOR: f64 = 2.0;

// ============================================================================
// Bar Spacing (IS 456 Cl. 26.3.2)
// ============================================================================

/// Clear spacing allowance over nominal aggregate size (mm)
pub const AGGREGATE_SPACING_ALLOWANCE_MM: f64 = 5.0;

/// Practical floor on clear spacing between bars (mm)
pub const MIN_CLEAR_BAR_SPACING_MM: f64 = 25.0;

/// Bars required at the corners of a stirrup
pub const MIN_BARS: u32 = 2;

// ============================================================================
// Ductile Detailing (IS 13920:2016)
// ============================================================================

/// Minimum concrete grade fck (N/mm²), Cl. 5.2
pub const DUCTILE_MIN_FCK: f64 = 20.0;

/// Minimum beam width (mm), Cl. 6.1.2
pub const DUCTILE_MIN_WIDTH_MM: f64 = 200.0;

/// Minimum width-to-depth ratio b/D, Cl. 6.1.1
pub const DUCTILE_MIN_WIDTH_DEPTH_RATIO: f64 = 0.3;

/// Maximum depth as a fraction of clear span, Cl. 6.1.3
pub const DUCTILE_MAX_DEPTH_SPAN_RATIO: f64 = 0.25;

/// Minimum tension steel ratio coefficient: 0.24 √fck / fy, Cl. 6.2.1(b)
pub const DUCTILE_MIN_STEEL_COEFF: f64 = 0.24;

/// Maximum tension steel percentage, Cl. 6.2.2
pub const DUCTILE_MAX_STEEL_PERCENT: f64 = 2.5;

/// Confinement zone length as a multiple of d, Cl. 6.3.5
pub const CONFINEMENT_LENGTH_DEPTH_MULTIPLE: f64 = 2.0;

/// Hoop spacing limit inside the confinement zone as a fraction of d
pub const CONFINEMENT_SPACING_DEPTH_RATIO: f64 = 0.25;

/// Hoop spacing limit inside the confinement zone in smallest bar diameters
pub const CONFINEMENT_SPACING_BAR_DIAMETERS: f64 = 6.0;

/// Absolute hoop spacing limit inside the confinement zone (mm)
pub const CONFINEMENT_SPACING_MAX_MM: f64 = 100.0;

/// Hoop spacing limit outside the confinement zone as a fraction of d
pub const OUTSIDE_ZONE_SPACING_DEPTH_RATIO: f64 = 0.5;

// ============================================================================
// Clause References
// ============================================================================

/// Clause references for design checks.
///
/// These constants provide traceable citations to IS 456:2000,
/// IS 13920:2016 and SP 16 for every error record the engine emits.
pub mod clause {
    // Flexure
    /// Limiting depth of neutral axis
    pub const NEUTRAL_AXIS_LIMIT: &str = "IS 456:2000 Cl. 38.1";
    /// Singly reinforced moment of resistance
    pub const SINGLY_REINFORCED: &str = "IS 456:2000 Annex G-1.1(b)";
    /// Doubly reinforced sections
    pub const DOUBLY_REINFORCED: &str = "IS 456:2000 Annex G-1.2";
    /// Design stress-strain curve of reinforcement
    pub const STEEL_STRESS_STRAIN: &str = "SP 16 Table A";
    /// Minimum tension reinforcement
    pub const MIN_TENSION_STEEL: &str = "IS 456:2000 Cl. 26.5.1.1(a)";
    /// Maximum tension reinforcement
    pub const MAX_TENSION_STEEL: &str = "IS 456:2000 Cl. 26.5.1.1(b)";
    /// Maximum compression reinforcement
    pub const MAX_COMPRESSION_STEEL: &str = "IS 456:2000 Cl. 26.5.1.2";
    /// Side-face reinforcement
    pub const SIDE_FACE_STEEL: &str = "IS 456:2000 Cl. 26.5.1.3";

    // Shear
    /// Design shear strength of concrete
    pub const DESIGN_SHEAR_STRENGTH: &str = "IS 456:2000 Table 19";
    /// Maximum shear stress
    pub const MAX_SHEAR_STRESS: &str = "IS 456:2000 Table 20";
    /// Design of shear reinforcement
    pub const SHEAR_REINFORCEMENT: &str = "IS 456:2000 Cl. 40.4";
    /// Maximum spacing of shear reinforcement
    pub const MAX_STIRRUP_SPACING: &str = "IS 456:2000 Cl. 26.5.1.5";
    /// Minimum shear reinforcement
    pub const MIN_SHEAR_REINFORCEMENT: &str = "IS 456:2000 Cl. 26.5.1.6";

    // Detailing
    /// Development length
    pub const DEVELOPMENT_LENGTH: &str = "IS 456:2000 Cl. 26.2.1";
    /// Design bond stress
    pub const BOND_STRESS: &str = "IS 456:2000 Cl. 26.2.1.1";
    /// Lap splices
    pub const LAP_SPLICE: &str = "IS 456:2000 Cl. 26.2.5.1";
    /// Minimum distance between bars
    pub const BAR_SPACING: &str = "IS 456:2000 Cl. 26.3.2";

    // Ductile detailing
    /// Concrete grade for ductile members
    pub const DUCTILE_CONCRETE: &str = "IS 13920:2016 Cl. 5.2";
    /// Width-to-depth ratio
    pub const DUCTILE_WIDTH_DEPTH: &str = "IS 13920:2016 Cl. 6.1.1";
    /// Minimum width
    pub const DUCTILE_MIN_WIDTH: &str = "IS 13920:2016 Cl. 6.1.2";
    /// Depth-to-span ratio
    pub const DUCTILE_DEPTH_SPAN: &str = "IS 13920:2016 Cl. 6.1.3";
    /// Minimum longitudinal steel
    pub const DUCTILE_MIN_STEEL: &str = "IS 13920:2016 Cl. 6.2.1";
    /// Maximum longitudinal steel
    pub const DUCTILE_MAX_STEEL: &str = "IS 13920:2016 Cl. 6.2.2";
    /// Confinement hoops near supports
    pub const DUCTILE_HOOPS: &str = "IS 13920:2016 Cl. 6.3.5";
}
