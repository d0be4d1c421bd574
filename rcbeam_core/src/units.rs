//! # Unit Types
//!
//! Type-safe wrappers for engineering units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Concrete design uses a small, consistent set of SI units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## SI Units (IS 456)
//!
//! Request fields are expressed in the units the code tables use:
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Stress: newtons per square millimetre (N/mm², numerically equal to MPa)
//! - Force: kilonewtons (kN) at the boundary, newtons (N) internally
//! - Moment: kilonewton-metres (kN·m) at the boundary, newton-millimetres (N·mm) internally
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::units::{KiloNewtonMetres, KiloNewtons, NewtonMillimetres, Newtons};
//!
//! let moment = KiloNewtonMetres(150.0);
//! let moment_nmm: NewtonMillimetres = moment.into();
//! assert_eq!(moment_nmm.0, 150.0e6);
//!
//! let shear: Newtons = KiloNewtons(80.0).into();
//! assert_eq!(shear.0, 80_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::constants::{KN_TO_N, KNM_TO_NMM};

// ============================================================================
// Length and Area Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimetres(pub f64);

impl Mul for Millimetres {
    type Output = SquareMillimetres;
    fn mul(self, rhs: Self) -> Self::Output {
        SquareMillimetres(self.0 * rhs.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in newtons per square millimetre (N/mm² = MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerSqMm(pub f64);

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * KN_TO_N)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / KN_TO_N)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimetres(pub f64);

/// Moment in kilonewton-metres (1 kN·m = 10⁶ N·mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMetres(pub f64);

impl From<KiloNewtonMetres> for NewtonMillimetres {
    fn from(knm: KiloNewtonMetres) -> Self {
        NewtonMillimetres(knm.0 * KNM_TO_NMM)
    }
}

impl From<NewtonMillimetres> for KiloNewtonMetres {
    fn from(nmm: NewtonMillimetres) -> Self {
        KiloNewtonMetres(nmm.0 / KNM_TO_NMM)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimetres);
impl_arithmetic!(SquareMillimetres);
impl_arithmetic!(NewtonsPerSqMm);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(NewtonMillimetres);
impl_arithmetic!(KiloNewtonMetres);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knm_to_nmm() {
        let m = KiloNewtonMetres(1.5);
        let nmm: NewtonMillimetres = m.into();
        assert_eq!(nmm.0, 1_500_000.0);

        let back: KiloNewtonMetres = nmm.into();
        assert_eq!(back, m);
    }

    #[test]
    fn test_kn_to_n() {
        let v = KiloNewtons(2.5);
        let n: Newtons = v.into();
        assert_eq!(n.0, 2500.0);
    }

    #[test]
    fn test_length_product_is_area() {
        let area = Millimetres(300.0) * Millimetres(450.0);
        assert_eq!(area, SquareMillimetres(135_000.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimetres(10.0);
        let b = Millimetres(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let d = Millimetres(450.5);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "450.5");

        let roundtrip: Millimetres = serde_json::from_str(&json).unwrap();
        assert_eq!(d, roundtrip);
    }
}
