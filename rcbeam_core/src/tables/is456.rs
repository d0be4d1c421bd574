//! Tabulated design data from IS 456:2000 and SP 16.
//!
//! Raw series only; [`super::CODE_TABLES`] assembles them into lookup tables.
//! Knots are strictly increasing and every column has one value per knot.

/// Table 19 rows: tension steel percentage 100 As/(b d)
pub const SHEAR_PT: [f64; 13] = [
    0.15, 0.25, 0.50, 0.75, 1.00, 1.25, 1.50, 1.75, 2.00, 2.25, 2.50, 2.75, 3.00,
];

/// Table 19 τc (N/mm²), M15 column
pub const SHEAR_TC_M15: [f64; 13] = [
    0.28, 0.35, 0.46, 0.54, 0.60, 0.64, 0.68, 0.71, 0.71, 0.71, 0.71, 0.71, 0.71,
];
/// Table 19 τc (N/mm²), M20 column
pub const SHEAR_TC_M20: [f64; 13] = [
    0.28, 0.36, 0.48, 0.56, 0.62, 0.67, 0.72, 0.75, 0.79, 0.81, 0.82, 0.82, 0.82,
];
/// Table 19 τc (N/mm²), M25 column
pub const SHEAR_TC_M25: [f64; 13] = [
    0.29, 0.36, 0.49, 0.57, 0.64, 0.70, 0.74, 0.78, 0.82, 0.85, 0.88, 0.90, 0.92,
];
/// Table 19 τc (N/mm²), M30 column
pub const SHEAR_TC_M30: [f64; 13] = [
    0.29, 0.37, 0.50, 0.59, 0.66, 0.71, 0.76, 0.80, 0.84, 0.88, 0.91, 0.94, 0.96,
];
/// Table 19 τc (N/mm²), M35 column
pub const SHEAR_TC_M35: [f64; 13] = [
    0.29, 0.37, 0.50, 0.59, 0.67, 0.73, 0.78, 0.82, 0.86, 0.90, 0.93, 0.96, 0.99,
];
/// Table 19 τc (N/mm²), M40 and above
pub const SHEAR_TC_M40: [f64; 13] = [
    0.30, 0.38, 0.51, 0.60, 0.68, 0.74, 0.79, 0.84, 0.88, 0.92, 0.95, 0.98, 1.01,
];

/// Concrete grade knots (fck, N/mm²) for the single-column grade tables
pub const GRADE_FCK: [f64; 6] = [15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

/// Table 20 τc,max (N/mm²)
pub const MAX_SHEAR_STRESS: [f64; 6] = [2.5, 2.8, 3.1, 3.5, 3.7, 4.0];

/// Cl. 26.2.1.1 design bond stress τbd for plain bars in tension (N/mm²)
pub const BOND_STRESS: [f64; 6] = [1.0, 1.2, 1.4, 1.5, 1.7, 1.9];

/// Steel grade knots (fy, N/mm²)
pub const STEEL_FY: [f64; 3] = [250.0, 415.0, 500.0];

/// Cl. 38.1 note: xu,max / d
pub const NEUTRAL_AXIS_LIMIT: [f64; 3] = [0.53, 0.48, 0.46];

/// Mild steel: elastic up to 0.87 fy / Es, then flat
pub const FE250_STRAIN: [f64; 2] = [0.0, 0.0010875];
pub const FE250_STRESS: [f64; 2] = [0.0, 217.5];

/// SP 16 Table A, Fe 415
pub const FE415_STRAIN: [f64; 7] = [0.0, 0.00144, 0.00163, 0.00192, 0.00241, 0.00276, 0.00380];
pub const FE415_STRESS: [f64; 7] = [0.0, 288.7, 306.7, 324.8, 342.8, 351.8, 360.9];

/// SP 16 Table A, Fe 500
pub const FE500_STRAIN: [f64; 7] = [0.0, 0.00174, 0.00195, 0.00226, 0.00277, 0.00312, 0.00417];
pub const FE500_STRESS: [f64; 7] = [0.0, 347.8, 369.6, 391.3, 413.0, 423.9, 434.8];
