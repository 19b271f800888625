//! # Load Data
//!
//! Bending-moment and load-factor inputs for the sizing pipeline, plus the
//! bending-stress primitive shared by the reduction loop and the strength
//! checker.
//!
//! Moment data arrives from an external loads analysis as a plain-text
//! station table (`z/L | z | M` with `#` comments). The core needs exactly
//! one scalar moment per station per call; [`MomentTable::moment_at`]
//! interpolates (or extrapolates) linearly when a station falls between the
//! supplied points.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::loads::MomentTable;
//!
//! let table = MomentTable::builtin_737_800();
//! let m = table.moment_at(0.2).unwrap();
//! assert_eq!(m, 7.63e6);
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, PanelResult};

/// One row of the externally supplied moment table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentStation {
    /// Span fraction z/L in [0, 1]
    pub span_fraction: f64,
    /// Absolute spanwise position (m)
    pub z_m: f64,
    /// Signed bending moment (N·m), positive compresses the upper panel
    pub moment_nm: f64,
}

/// Design load factors from the loads analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadFactors {
    /// Maximum positive load factor
    pub ny_max: f64,
    /// Maximum negative load factor
    pub ny_min: f64,
    /// Overall safety factor on limit loads
    pub safety_factor: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        LoadFactors {
            ny_max: 3.75,
            ny_min: -1.5,
            safety_factor: 1.5,
        }
    }
}

impl LoadFactors {
    /// Parse the `key = value` load-factor file format.
    pub fn from_file(path: &Path) -> PanelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PanelError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        let mut factors = LoadFactors::default();
        let mut seen_any = false;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value: f64 = value.trim().parse().map_err(|_| {
                PanelError::data_format(
                    path.display().to_string(),
                    line_no + 1,
                    format!("expected a number, got '{}'", value.trim()),
                )
            })?;
            match key.trim() {
                "ny_max" => factors.ny_max = value,
                "ny_min" => factors.ny_min = value,
                "safety_factor" => factors.safety_factor = value,
                _ => continue,
            }
            seen_any = true;
        }

        if !seen_any {
            return Err(PanelError::data_format(
                path.display().to_string(),
                0,
                "file contains no load factor entries",
            ));
        }
        Ok(factors)
    }
}

/// Bending moments along the half-span, sorted by span fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentTable {
    stations: Vec<MomentStation>,
}

/// Reference 737-800 moment distribution (N·m at limit load).
///
/// The 0.2 and 0.4 stations come straight from the loads analysis; the
/// outboard stations follow the same decaying distribution.
static BUILTIN_737_800: Lazy<MomentTable> = Lazy::new(|| {
    MomentTable::from_stations(vec![
        MomentStation {
            span_fraction: 0.2,
            z_m: 3.432,
            moment_nm: 7.63e6,
        },
        MomentStation {
            span_fraction: 0.4,
            z_m: 6.864,
            moment_nm: 4.66e6,
        },
        MomentStation {
            span_fraction: 0.6,
            z_m: 10.296,
            moment_nm: 2.42e6,
        },
        MomentStation {
            span_fraction: 0.8,
            z_m: 13.728,
            moment_nm: 0.85e6,
        },
    ])
    .expect("builtin moment table is valid")
});

impl MomentTable {
    /// Build a table from station rows; rows are sorted by span fraction.
    pub fn from_stations(mut stations: Vec<MomentStation>) -> PanelResult<Self> {
        if stations.is_empty() {
            return Err(PanelError::invalid_geometry(
                "stations",
                "[]",
                "Moment table must contain at least one station",
            ));
        }
        for station in &stations {
            if !(0.0..=1.0).contains(&station.span_fraction) {
                return Err(PanelError::out_of_range(station.span_fraction));
            }
        }
        stations.sort_by(|a, b| a.span_fraction.total_cmp(&b.span_fraction));
        Ok(MomentTable { stations })
    }

    /// The built-in 737-800 reference distribution.
    pub fn builtin_737_800() -> Self {
        BUILTIN_737_800.clone()
    }

    /// Parse the pipe-separated moment file format:
    ///
    /// ```text
    /// # station z/L | z (m) | M (N·m)
    /// 0.2 | 3.432 | 7.63e6
    /// ```
    pub fn from_file(path: &Path) -> PanelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PanelError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        let mut stations = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('|').collect();
            if parts.len() != 3 {
                return Err(PanelError::data_format(
                    path.display().to_string(),
                    line_no + 1,
                    format!("expected 3 '|' separated values, got {}", parts.len()),
                ));
            }

            let parse = |s: &str| -> PanelResult<f64> {
                s.trim().parse().map_err(|_| {
                    PanelError::data_format(
                        path.display().to_string(),
                        line_no + 1,
                        format!("expected a number, got '{}'", s.trim()),
                    )
                })
            };

            stations.push(MomentStation {
                span_fraction: parse(parts[0])?,
                z_m: parse(parts[1])?,
                moment_nm: parse(parts[2])?,
            });
        }

        if stations.is_empty() {
            return Err(PanelError::data_format(
                path.display().to_string(),
                0,
                "file contains no moment stations",
            ));
        }
        Self::from_stations(stations)
    }

    /// All stations, sorted by span fraction.
    pub fn stations(&self) -> &[MomentStation] {
        &self.stations
    }

    /// Bending moment at a span fraction.
    ///
    /// Exact station values are returned as-is; positions between stations
    /// are interpolated linearly, positions beyond the data range are
    /// extrapolated linearly from the two nearest stations.
    pub fn moment_at(&self, span_fraction: f64) -> PanelResult<f64> {
        if !(0.0..=1.0).contains(&span_fraction) {
            return Err(PanelError::out_of_range(span_fraction));
        }

        if let Some(hit) = self
            .stations
            .iter()
            .find(|s| s.span_fraction == span_fraction)
        {
            return Ok(hit.moment_nm);
        }

        let first = self.stations.first().expect("table is non-empty");
        let last = self.stations.last().expect("table is non-empty");

        if self.stations.len() == 1 {
            return Ok(first.moment_nm);
        }

        if span_fraction < first.span_fraction {
            let (a, b) = (&self.stations[0], &self.stations[1]);
            let slope = (b.moment_nm - a.moment_nm) / (b.span_fraction - a.span_fraction);
            return Ok(a.moment_nm + slope * (span_fraction - a.span_fraction));
        }

        if span_fraction > last.span_fraction {
            let n = self.stations.len();
            let (a, b) = (&self.stations[n - 2], &self.stations[n - 1]);
            let slope = (b.moment_nm - a.moment_nm) / (b.span_fraction - a.span_fraction);
            return Ok(b.moment_nm + slope * (span_fraction - b.span_fraction));
        }

        for pair in self.stations.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.span_fraction <= span_fraction && span_fraction <= b.span_fraction {
                let t = (span_fraction - a.span_fraction) / (b.span_fraction - a.span_fraction);
                return Ok(a.moment_nm + (b.moment_nm - a.moment_nm) * t);
            }
        }

        Ok(last.moment_nm)
    }
}

/// Bending stress from the flexure formula: σ = M·y / I.
///
/// Fails with `InvalidSection` for a non-positive inertia and with
/// `InvalidGeometry` for a zero fiber distance, so a degenerate section can
/// never propagate NaN or infinite stresses downstream.
pub fn bending_stress(moment_nm: f64, inertia_m4: f64, fiber_distance_m: f64) -> PanelResult<f64> {
    if inertia_m4 <= 0.0 {
        return Err(PanelError::invalid_section("inertia_m4", inertia_m4));
    }
    if fiber_distance_m == 0.0 {
        return Err(PanelError::invalid_geometry(
            "fiber_distance_m",
            "0",
            "Fiber distance must be non-zero",
        ));
    }
    Ok(moment_nm * fiber_distance_m / inertia_m4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_exact_stations() {
        let table = MomentTable::builtin_737_800();
        assert_eq!(table.moment_at(0.2).unwrap(), 7.63e6);
        assert_eq!(table.moment_at(0.4).unwrap(), 4.66e6);
    }

    #[test]
    fn test_builtin_decreases_outboard() {
        let table = MomentTable::builtin_737_800();
        let stations = table.stations();
        for pair in stations.windows(2) {
            assert!(pair[0].moment_nm > pair[1].moment_nm);
        }
    }

    #[test]
    fn test_interpolation_midpoint() {
        let table = MomentTable::builtin_737_800();
        let m = table.moment_at(0.3).unwrap();
        assert!((m - (7.63e6 + 4.66e6) / 2.0).abs() < 1.0);
    }

    #[test]
    fn test_extrapolation_below_range() {
        let table = MomentTable::builtin_737_800();
        // Linear extrapolation toward the root from the first two stations
        let slope = (4.66e6 - 7.63e6) / 0.2;
        let expected = 7.63e6 + slope * (0.1 - 0.2);
        assert!((table.moment_at(0.1).unwrap() - expected).abs() < 1.0);
    }

    #[test]
    fn test_extrapolation_above_range() {
        let table = MomentTable::builtin_737_800();
        let slope = (0.85e6 - 2.42e6) / 0.2;
        let expected = 0.85e6 + slope * (0.9 - 0.8);
        assert!((table.moment_at(0.9).unwrap() - expected).abs() < 1.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let table = MomentTable::builtin_737_800();
        assert!(matches!(
            table.moment_at(1.5),
            Err(PanelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# station z/L | z (m) | M (N*m)").unwrap();
        writeln!(file, "0.2 | 3.432 | 7.63e6").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "0.4 | 6.864 | 4.66e6").unwrap();

        let table = MomentTable::from_file(file.path()).unwrap();
        assert_eq!(table.stations().len(), 2);
        assert_eq!(table.moment_at(0.4).unwrap(), 4.66e6);
    }

    #[test]
    fn test_from_file_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.2 | 3.432").unwrap();

        let err = MomentTable::from_file(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "DATA_FORMAT");
    }

    #[test]
    fn test_load_factors_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# design load factors").unwrap();
        writeln!(file, "ny_max = 3.75").unwrap();
        writeln!(file, "ny_min = -1.5").unwrap();
        writeln!(file, "safety_factor = 1.5").unwrap();

        let factors = LoadFactors::from_file(file.path()).unwrap();
        assert_eq!(factors.ny_max, 3.75);
        assert_eq!(factors.ny_min, -1.5);
        assert_eq!(factors.safety_factor, 1.5);
    }

    #[test]
    fn test_bending_stress() {
        // σ = M·y/I
        let stress = bending_stress(1.0e6, 1.0e-4, 0.25).unwrap();
        assert!((stress - 2.5e9).abs() < 1.0);
    }

    #[test]
    fn test_bending_stress_degenerate_inertia() {
        let err = bending_stress(1.0e6, 0.0, 0.25).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }
}
