//! # panel_core - Stiffened Wing Panel Sizing Engine
//!
//! `panel_core` is the computational heart of Spanwise: post-buckling
//! sizing of stiffened thin-wall wing panels under spanwise bending. The
//! upper skin works past its local buckling stress, so the sizing couples
//! plate stability, effective-width reduction and strength checks through
//! a fixed-point iteration per span station.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: pure functions over explicit section state
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Explicit convergence**: the iteration is bounded and a failure to
//!   converge is an error, never a silently accepted result
//!
//! ## Quick Start
//!
//! ```rust
//! use panel_core::materials::Material;
//! use panel_core::station::{size_station, StationSettings};
//! use panel_core::wing::WingGeometry;
//!
//! let wing = WingGeometry::default();
//! let material = Material::v95t1_sheet();
//!
//! let record = size_station(&wing, &material, 0.6, 0.1e6, &StationSettings::default()).unwrap();
//! assert!(record.effective_width_m > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`wing`] - Wing planform geometry provider
//! - [`materials`] - Material definitions
//! - [`loads`] - Bending moment tables and load factors
//! - [`section`] - Panel and stringer section entities
//! - [`stability`] - Critical buckling stresses
//! - [`reduction`] - Effective width, reduced modulus and the iteration
//! - [`strength`] - Working stress and strength verdicts
//! - [`station`] - Per-station sizing orchestration
//! - [`project`] - Run container, metadata, and settings
//! - [`report`] - Markdown results rendering
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod reduction;
pub mod report;
pub mod section;
pub mod stability;
pub mod station;
pub mod strength;
pub mod units;
pub mod wing;

// Re-export commonly used types at crate root for convenience
pub use errors::{PanelError, PanelResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{GlobalSettings, ProjectMetadata, WingProject};
pub use section::{Panel, Stringer, StringerKind};
pub use station::{size_station, size_stations, StationRecord, StationSettings};
