//! # rcbeam_core - Reinforced Concrete Beam Design Engine
//!
//! `rcbeam_core` designs rectangular reinforced-concrete beams to IS 456:2000
//! limit-state rules, with optional IS 13920:2016 ductile detailing checks.
//! Requests and results are JSON-serializable so the engine can sit behind a
//! CLI, a web service or an AI assistant without an adapter layer.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a request and return a result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Malformed input is an `Err`; design findings are records
//! - **Traceable**: Every table lookup and applied default is reported
//!
//! ## Quick Start
//!
//! ```rust
//! use rcbeam_core::{design_beam, BeamDesignRequest, DesignStatus};
//! use rcbeam_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
//! use rcbeam_core::section::{BeamSection, DesignLoad};
//!
//! let request = BeamDesignRequest::new(
//!     "B-1",
//!     BeamSection::new(300.0, 450.0, 500.0),
//!     MaterialGrade::new(ConcreteGrade::M25, SteelGrade::Fe415),
//!     DesignLoad::new(150.0, 100.0),
//! );
//!
//! let result = design_beam(&request).unwrap();
//! assert_eq!(result.status, DesignStatus::Safe);
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Flexure, shear, detailing, ductile checks and the beam pipeline
//! - [`tables`] - IS 456 lookup tables with linear interpolation
//! - [`materials`] - Concrete and steel grades
//! - [`section`] - Beam geometry and factored loads
//! - [`settings`] - Detailing, ductile and solver options with defaults
//! - [`validation`] - Input validation
//! - [`constants`] - Code constants and clause references
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error and status types

pub mod calculations;
pub mod constants;
pub mod errors;
pub mod materials;
pub mod section;
pub mod settings;
pub mod tables;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::beam::{design_beam, BeamDesignRequest, BeamDesignResult};
pub use errors::{CalcResult, DesignStatus, ValidationError};
