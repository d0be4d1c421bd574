//! Concrete Grades (IS 456:2000 Table 2)
//!
//! Characteristic compressive strength fck of 150 mm cubes at 28 days.
//! Only the grades permitted for reinforced concrete are enumerated.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, ValidationError};

/// Concrete grade designation (M = mix, number = fck in N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    M15,
    M20,
    M25,
    M30,
    M35,
    M40,
    M45,
    M50,
}

impl ConcreteGrade {
    /// All concrete grade variants for UI selection
    pub const ALL: [ConcreteGrade; 8] = [
        ConcreteGrade::M15,
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
        ConcreteGrade::M45,
        ConcreteGrade::M50,
    ];

    /// Characteristic compressive strength fck (N/mm²)
    pub fn fck(&self) -> f64 {
        match self {
            ConcreteGrade::M15 => 15.0,
            ConcreteGrade::M20 => 20.0,
            ConcreteGrade::M25 => 25.0,
            ConcreteGrade::M30 => 30.0,
            ConcreteGrade::M35 => 35.0,
            ConcreteGrade::M40 => 40.0,
            ConcreteGrade::M45 => 45.0,
            ConcreteGrade::M50 => 50.0,
        }
    }

    /// Code designation (e.g., "M25")
    pub fn code(&self) -> &'static str {
        match self {
            ConcreteGrade::M15 => "M15",
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
            ConcreteGrade::M45 => "M45",
            ConcreteGrade::M50 => "M50",
        }
    }

    /// Resolve a numeric fck to its enumerated grade.
    ///
    /// Anything that is not exactly one of the permitted grades is rejected;
    /// numeric inputs are never rounded to the nearest grade.
    pub fn from_fck(fck: f64) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.fck() == fck)
            .ok_or_else(|| ValidationError::unsupported_grade("concrete", fck.to_string()))
    }

    /// Parse from common string representations ("M25", "m25", "25")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase();
        let digits = normalized.trim_start_matches('M');
        Self::ALL
            .into_iter()
            .find(|g| g.code().trim_start_matches('M') == digits)
            .ok_or_else(|| ValidationError::unsupported_grade("concrete", s))
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fck_values() {
        assert_eq!(ConcreteGrade::M20.fck(), 20.0);
        assert_eq!(ConcreteGrade::M50.fck(), 50.0);
    }

    #[test]
    fn test_from_fck() {
        assert_eq!(ConcreteGrade::from_fck(25.0).unwrap(), ConcreteGrade::M25);
        assert!(ConcreteGrade::from_fck(22.0).is_err());
        assert!(ConcreteGrade::from_fck(f64::NAN).is_err());
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(ConcreteGrade::from_str_flexible("m30").unwrap(), ConcreteGrade::M30);
        assert_eq!(ConcreteGrade::from_str_flexible("40").unwrap(), ConcreteGrade::M40);
        assert!(ConcreteGrade::from_str_flexible("M22").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ConcreteGrade::M25).unwrap();
        assert_eq!(json, "\"M25\"");
        assert!(serde_json::from_str::<ConcreteGrade>("\"M22\"").is_err());
    }
}
