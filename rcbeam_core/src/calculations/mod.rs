//! # Design Calculations
//!
//! Each design module is a pure function over a validated section and grade
//! pair:
//!
//! - `design_*(...) -> CalcResult<*Result>` - one module of the design
//! - `*Result` - module output (JSON-serializable) carrying its own status,
//!   records and table lookups
//!
//! [`beam::design_beam`] runs them in order and aggregates the statuses.
//!
//! ## Available Calculations
//!
//! - [`flexure`] - Limit-state flexure, singly and doubly reinforced (IS 456 Annex G)
//! - [`shear`] - Nominal shear stress and vertical stirrup spacing (IS 456 40)
//! - [`detailing`] - Bar selection, anchorage and side-face steel (IS 456 26)
//! - [`ductile`] - IS 13920 ductile detailing checks
//! - [`beam`] - End-to-end pipeline

pub mod beam;
pub mod detailing;
pub mod ductile;
pub mod flexure;
pub mod shear;

// Re-export commonly used types
pub use beam::{design_beam, BeamDesignRequest, BeamDesignResult, DesignModule, ModuleStatus};
pub use detailing::{design_detailing, BarArrangement, BarGroup, DetailingResult};
pub use ductile::{check_ductile_detailing, DuctileCheck, DuctileCheckKind, DuctileCheckResult};
pub use flexure::{design_flexure, FlexureResult, FlexureState};
pub use shear::{design_shear, ShearResult, ShearState};
