//! # Beam Section and Design Loads
//!
//! Geometry and factored actions for a rectangular reinforced-concrete beam.
//!
//! ```text
//!     ┌─────────────┐  ─┬─
//!     │  ○       ○  │   │  d' (compression steel)
//!     │             │   │
//!     │             │   D        d = effective depth (to tension steel centroid)
//!     │  ●  ●  ●  ● │  ─┼─ d
//!     └─────────────┘  ─┴─
//!           b
//! ```
//!
//! All fields carry their unit in both the type and the JSON field name.

use serde::{Deserialize, Serialize};

use crate::units::{KiloNewtonMetres, KiloNewtons, Millimetres, NewtonMillimetres, Newtons};

/// Rectangular beam cross-section.
///
/// ## JSON Example
///
/// ```json
/// { "width_mm": 300.0, "effective_depth_mm": 450.0, "overall_depth_mm": 500.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSection {
    /// Web width b
    pub width_mm: Millimetres,
    /// Effective depth d (compression face to tension steel centroid)
    pub effective_depth_mm: Millimetres,
    /// Overall depth D
    pub overall_depth_mm: Millimetres,
}

impl BeamSection {
    pub fn new(width_mm: f64, effective_depth_mm: f64, overall_depth_mm: f64) -> Self {
        Self {
            width_mm: Millimetres(width_mm),
            effective_depth_mm: Millimetres(effective_depth_mm),
            overall_depth_mm: Millimetres(overall_depth_mm),
        }
    }

    /// b (mm)
    pub fn b(&self) -> f64 {
        self.width_mm.0
    }

    /// d (mm)
    pub fn d(&self) -> f64 {
        self.effective_depth_mm.0
    }

    /// D (mm)
    pub fn overall_depth(&self) -> f64 {
        self.overall_depth_mm.0
    }

    /// Effective area b d used for steel percentage and nominal shear (mm²)
    pub fn effective_area_mm2(&self) -> f64 {
        self.b() * self.d()
    }

    /// Gross area b D (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.b() * self.overall_depth()
    }

    /// Distance from tension face to tension steel centroid, D − d (mm)
    pub fn tension_cover_mm(&self) -> f64 {
        self.overall_depth() - self.d()
    }

    /// Steel percentage 100 As/(b d)
    pub fn steel_percentage(&self, area_mm2: f64) -> f64 {
        100.0 * area_mm2 / self.effective_area_mm2()
    }
}

/// Factored design actions at the critical section.
///
/// ## JSON Example
///
/// ```json
/// { "moment_knm": 150.0, "shear_kn": 120.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignLoad {
    /// Factored bending moment Mu
    pub moment_knm: KiloNewtonMetres,
    /// Factored shear force Vu
    pub shear_kn: KiloNewtons,
}

impl DesignLoad {
    pub fn new(moment_knm: f64, shear_kn: f64) -> Self {
        Self {
            moment_knm: KiloNewtonMetres(moment_knm),
            shear_kn: KiloNewtons(shear_kn),
        }
    }

    /// Mu in N·mm
    pub fn moment_nmm(&self) -> f64 {
        NewtonMillimetres::from(self.moment_knm).0
    }

    /// Vu in N
    pub fn shear_n(&self) -> f64 {
        Newtons::from(self.shear_kn).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_properties() {
        let s = BeamSection::new(300.0, 450.0, 500.0);
        assert_eq!(s.effective_area_mm2(), 135_000.0);
        assert_eq!(s.gross_area_mm2(), 150_000.0);
        assert_eq!(s.tension_cover_mm(), 50.0);
        assert!((s.steel_percentage(1350.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_conversion() {
        let load = DesignLoad::new(150.0, 120.0);
        assert_eq!(load.moment_nmm(), 150.0e6);
        assert_eq!(load.shear_n(), 120_000.0);
    }

    #[test]
    fn test_json_field_names_carry_units() {
        let json = serde_json::to_string(&BeamSection::new(300.0, 450.0, 500.0)).unwrap();
        assert!(json.contains("\"width_mm\":300.0"));
        assert!(json.contains("\"effective_depth_mm\":450.0"));

        let load: DesignLoad = serde_json::from_str(r#"{"moment_knm":150.0,"shear_kn":80.0}"#).unwrap();
        assert_eq!(load.moment_knm.0, 150.0);
    }
}
