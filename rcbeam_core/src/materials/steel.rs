//! Reinforcing Steel (IS 1786 / IS 432)
//!
//! Steel grades permitted by IS 456:2000 Cl. 5.6 and their bar surface types.
//! The design stress-strain curve lives in [`crate::tables`] since it is a
//! tabulated lookup (SP 16 Table A) rather than a single property.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{STEEL_DESIGN_FACTOR, STEEL_MODULUS};
use crate::errors::{CalcResult, ValidationError};

/// Reinforcing steel grade (number = characteristic yield strength fy in N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// Mild steel, plain bars (IS 432)
    Fe250,
    /// High-yield strength deformed bars (IS 1786)
    Fe415,
    /// High-yield strength deformed bars (IS 1786)
    Fe500,
}

impl SteelGrade {
    /// All steel grade variants for UI selection
    pub const ALL: [SteelGrade; 3] = [SteelGrade::Fe250, SteelGrade::Fe415, SteelGrade::Fe500];

    /// Characteristic yield strength fy (N/mm²)
    pub fn fy(&self) -> f64 {
        match self {
            SteelGrade::Fe250 => 250.0,
            SteelGrade::Fe415 => 415.0,
            SteelGrade::Fe500 => 500.0,
        }
    }

    /// Design yield stress 0.87 fy (N/mm²)
    pub fn design_stress(&self) -> f64 {
        STEEL_DESIGN_FACTOR * self.fy()
    }

    /// Strain at which the design stress is first reached
    ///
    /// Mild steel yields at 0.87 fy / Es; cold-worked bars carry an
    /// additional 0.002 inelastic strain (IS 456 Fig. 23A).
    pub fn yield_strain(&self) -> f64 {
        let elastic = self.design_stress() / STEEL_MODULUS;
        match self {
            SteelGrade::Fe250 => elastic,
            SteelGrade::Fe415 | SteelGrade::Fe500 => elastic + 0.002,
        }
    }

    /// Bar surface normally supplied in this grade
    pub fn typical_surface(&self) -> BarSurface {
        match self {
            SteelGrade::Fe250 => BarSurface::Plain,
            SteelGrade::Fe415 | SteelGrade::Fe500 => BarSurface::Deformed,
        }
    }

    /// Code designation (e.g., "Fe415")
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::Fe250 => "Fe250",
            SteelGrade::Fe415 => "Fe415",
            SteelGrade::Fe500 => "Fe500",
        }
    }

    /// Resolve a numeric fy to its enumerated grade
    pub fn from_fy(fy: f64) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.fy() == fy)
            .ok_or_else(|| ValidationError::unsupported_grade("steel", fy.to_string()))
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Bar surface type, which sets the bond stress multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSurface {
    Plain,
    Deformed,
}

impl BarSurface {
    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            BarSurface::Plain => "Plain",
            BarSurface::Deformed => "Deformed",
        }
    }
}

impl std::fmt::Display for BarSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cross-sectional area of one bar (mm²)
#[inline]
pub fn bar_area(diameter_mm: f64) -> f64 {
    PI * diameter_mm * diameter_mm / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_stress() {
        assert!((SteelGrade::Fe415.design_stress() - 361.05).abs() < 1e-9);
        assert!((SteelGrade::Fe500.design_stress() - 435.0).abs() < 1e-9);
    }

    #[test]
    fn test_yield_strain() {
        // 0.87 × 415 / 200000 + 0.002 = 0.0038053
        assert!((SteelGrade::Fe415.yield_strain() - 0.0038053).abs() < 1e-6);
        assert!((SteelGrade::Fe250.yield_strain() - 0.0010875).abs() < 1e-9);
    }

    #[test]
    fn test_from_fy() {
        assert_eq!(SteelGrade::from_fy(500.0).unwrap(), SteelGrade::Fe500);
        assert!(SteelGrade::from_fy(450.0).is_err());
    }

    #[test]
    fn test_bar_area() {
        assert!((bar_area(16.0) - 201.06).abs() < 0.01);
        assert!((bar_area(25.0) - 490.87).abs() < 0.01);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&SteelGrade::Fe415).unwrap(), "\"Fe415\"");
        assert_eq!(serde_json::to_string(&BarSurface::Deformed).unwrap(), "\"deformed\"");
    }
}
