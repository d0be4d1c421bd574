//! # Materials
//!
//! Concrete and reinforcing-steel grades permitted by IS 456:2000.
//!
//! Grades are closed enums: a request can only name a code-permitted grade,
//! and numeric construction (`from_fck`, `from_fy`) rejects anything else with
//! a [`ValidationError`](crate::errors::ValidationError).
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
//!
//! let grades = MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415);
//! assert_eq!(grades.fck(), 25.0);
//! assert_eq!(grades.fy(), 415.0);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::ConcreteGrade;
pub use steel::{bar_area, BarSurface, SteelGrade};

use serde::{Deserialize, Serialize};

/// Material grades for one beam.
///
/// ## JSON Example
///
/// ```json
/// { "concrete": "M25", "steel": "Fe415" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialGrade {
    pub concrete: ConcreteGrade,
    pub steel: SteelGrade,
}

impl MaterialGrade {
    pub fn new(concrete: ConcreteGrade, steel: SteelGrade) -> Self {
        Self { concrete, steel }
    }

    /// Concrete characteristic strength fck (N/mm²)
    pub fn fck(&self) -> f64 {
        self.concrete.fck()
    }

    /// Steel characteristic yield strength fy (N/mm²)
    pub fn fy(&self) -> f64 {
        self.steel.fy()
    }

    /// Display name (e.g., "M25 / Fe415")
    pub fn display_name(&self) -> String {
        format!("{} / {}", self.concrete, self.steel)
    }
}

impl std::fmt::Display for MaterialGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let grades = MaterialGrade::new(ConcreteGrade::M30, SteelGrade::Fe500);
        assert_eq!(grades.display_name(), "M30 / Fe500");
    }

    #[test]
    fn test_serialization() {
        let grades = MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415);
        let json = serde_json::to_string(&grades).unwrap();
        assert_eq!(json, r#"{"concrete":"M25","steel":"Fe415"}"#);
        let parsed: MaterialGrade = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, grades);
    }

    #[test]
    fn test_unsupported_grade_rejected_by_serde() {
        let result = serde_json::from_str::<MaterialGrade>(r#"{"concrete":"M25","steel":"Fe550"}"#);
        assert!(result.is_err());
    }
}
