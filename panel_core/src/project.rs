//! # Project Data Structures
//!
//! The `WingProject` struct is the root container for a sizing run.
//! Projects serialize to `.wpd` (wing panel design) files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! WingProject
//! ├── meta: ProjectMetadata (version, engineer, aircraft, timestamps)
//! ├── settings: GlobalSettings (stations, load factors, iteration knobs)
//! ├── wing: WingGeometry (planform)
//! └── stations: Vec<StationRecord> (sized results in run order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use panel_core::project::WingProject;
//!
//! let project = WingProject::new("Jane Engineer", "B737-800");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("B737-800"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::loads::LoadFactors;
use crate::station::{StationRecord, StationSettings};
use crate::wing::WingGeometry;

/// Current schema version for .wpd files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.wpd` files.
/// Station records are kept in run order, root to tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingProject {
    /// Project metadata (version, engineer, aircraft, timestamps)
    pub meta: ProjectMetadata,

    /// Global settings (stations, load factors, iteration knobs)
    pub settings: GlobalSettings,

    /// Wing planform the run was sized against
    pub wing: WingGeometry,

    /// Sized station records, root to tip
    pub stations: Vec<StationRecord>,
}

impl WingProject {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use panel_core::project::WingProject;
    ///
    /// let project = WingProject::new("John Doe", "B737-800");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.stations.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, aircraft: impl Into<String>) -> Self {
        let now = Utc::now();
        WingProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                run_id: Uuid::new_v4(),
                engineer: engineer.into(),
                aircraft: aircraft.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            wing: WingGeometry::default(),
            stations: Vec::new(),
        }
    }

    /// Record a sized station.
    pub fn add_station(&mut self, record: StationRecord) {
        self.stations.push(record);
        self.touch();
    }

    /// Station record at a span fraction, if present.
    pub fn station_at(&self, span_fraction: f64) -> Option<&StationRecord> {
        self.stations
            .iter()
            .find(|s| (s.span_fraction - span_fraction).abs() < 1e-9)
    }

    /// Number of sized stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// All stations passed their verdicts.
    pub fn all_satisfied(&self) -> bool {
        !self.stations.is_empty() && self.stations.iter().all(|s| s.verdict)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for WingProject {
    fn default() -> Self {
        WingProject::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Identifier of this sizing run
    pub run_id: Uuid,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Aircraft designation (e.g., "B737-800")
    pub aircraft: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Span fractions to size, root to tip
    pub span_fractions: Vec<f64>,

    /// Maneuver and safety factors applied to the limit moments
    pub load_factors: LoadFactors,

    /// Per-station sizing knobs
    pub station: StationSettings,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            span_fractions: vec![0.2, 0.4, 0.6, 0.8],
            load_factors: LoadFactors::default(),
            station: StationSettings::default(),
        }
    }
}
