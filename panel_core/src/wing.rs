//! # Wing Geometry Provider
//!
//! Planform geometry for a tapered, two-spar box-section wing. All queries
//! take a span fraction in `[0, 1]` measured from root to tip along the
//! half-span and fail with `OutOfRange` outside it.
//!
//! The geometry lives in an explicit [`WingGeometry`] config struct so the
//! same sizing core can run against synthetic fixtures; `Default` carries
//! the Boeing 737-800 reference planform.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::wing::WingGeometry;
//!
//! let wing = WingGeometry::default();
//! let chord = wing.chord_at(0.0).unwrap();
//! assert_eq!(chord, wing.root_chord_m);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, PanelResult};

/// Spar chordwise positions as fractions of the local chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparPositions {
    /// Front spar position (fraction of chord from leading edge)
    pub front: f64,
    /// Rear spar position (fraction of chord from leading edge)
    pub rear: f64,
}

/// Planform and structural layout of one wing.
///
/// Chord tapers linearly root to tip; box height is piecewise linear through
/// a mid-span control point; spar chord fractions interpolate linearly
/// between their root and tip values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingGeometry {
    /// Aircraft designation (report header only)
    pub name: String,

    /// Full wing span (m)
    pub span_m: f64,
    /// Root chord (m)
    pub root_chord_m: f64,
    /// Tip chord (m)
    pub tip_chord_m: f64,

    /// Spar chord fractions at the root
    pub spar_positions_root: SparPositions,
    /// Spar chord fractions at the tip
    pub spar_positions_tip: SparPositions,

    /// Box height at the root (m)
    pub box_height_root_m: f64,
    /// Box height at half span (m)
    pub box_height_mid_m: f64,
    /// Box height at the tip (m)
    pub box_height_tip_m: f64,
}

impl Default for WingGeometry {
    /// Boeing 737-800 reference planform.
    fn default() -> Self {
        WingGeometry {
            name: "Boeing 737-800".to_string(),
            span_m: 34.32,
            root_chord_m: 6.65,
            tip_chord_m: 1.25,
            spar_positions_root: SparPositions {
                front: 0.15,
                rear: 0.60,
            },
            spar_positions_tip: SparPositions {
                front: 0.20,
                rear: 0.74,
            },
            box_height_root_m: 0.5,
            box_height_mid_m: 0.35,
            box_height_tip_m: 0.2,
        }
    }
}

impl WingGeometry {
    fn validate_span_fraction(span_fraction: f64) -> PanelResult<()> {
        if !(0.0..=1.0).contains(&span_fraction) {
            return Err(PanelError::out_of_range(span_fraction));
        }
        Ok(())
    }

    /// Local chord at a span fraction (linear taper).
    pub fn chord_at(&self, span_fraction: f64) -> PanelResult<f64> {
        Self::validate_span_fraction(span_fraction)?;

        let chord = self.root_chord_m - (self.root_chord_m - self.tip_chord_m) * span_fraction;
        if chord < 0.0 {
            return Err(PanelError::invalid_geometry(
                "chord_m",
                chord.to_string(),
                "Interpolated chord is negative; check root/tip chords",
            ));
        }
        Ok(chord)
    }

    /// Box height at a span fraction.
    ///
    /// Piecewise linear: root value to the mid-span value over [0, 0.5],
    /// then mid-span value to the tip value over [0.5, 1].
    pub fn box_height_at(&self, span_fraction: f64) -> PanelResult<f64> {
        Self::validate_span_fraction(span_fraction)?;

        let height = if span_fraction <= 0.5 {
            let t = span_fraction / 0.5;
            self.box_height_root_m - (self.box_height_root_m - self.box_height_mid_m) * t
        } else {
            let t = (span_fraction - 0.5) / 0.5;
            self.box_height_mid_m - (self.box_height_mid_m - self.box_height_tip_m) * t
        };

        if height < 0.0 {
            return Err(PanelError::invalid_geometry(
                "box_height_m",
                height.to_string(),
                "Interpolated box height is negative",
            ));
        }
        Ok(height)
    }

    /// Spar chord fractions at a span fraction (linear interpolation).
    pub fn spar_positions_at(&self, span_fraction: f64) -> PanelResult<SparPositions> {
        Self::validate_span_fraction(span_fraction)?;

        let front = self.spar_positions_root.front
            + (self.spar_positions_tip.front - self.spar_positions_root.front) * span_fraction;
        let rear = self.spar_positions_root.rear
            + (self.spar_positions_tip.rear - self.spar_positions_root.rear) * span_fraction;

        if !(0.0..=1.0).contains(&front) || !(0.0..=1.0).contains(&rear) {
            return Err(PanelError::invalid_geometry(
                "spar_positions",
                format!("front={front}, rear={rear}"),
                "Spar chord fractions must stay within [0, 1]",
            ));
        }
        if front >= rear {
            return Err(PanelError::invalid_geometry(
                "spar_positions",
                format!("front={front}, rear={rear}"),
                "Front spar must lie ahead of the rear spar",
            ));
        }
        Ok(SparPositions { front, rear })
    }

    /// Box width between the spars at a span fraction.
    pub fn box_width_at(&self, span_fraction: f64) -> PanelResult<f64> {
        let chord = self.chord_at(span_fraction)?;
        let spars = self.spar_positions_at(span_fraction)?;
        Ok((spars.rear - spars.front) * chord)
    }

    /// Half of the full span.
    pub fn semispan_m(&self) -> f64 {
        self.span_m / 2.0
    }

    /// Absolute spanwise distance from the root for a span fraction.
    pub fn absolute_position_m(&self, span_fraction: f64) -> PanelResult<f64> {
        Self::validate_span_fraction(span_fraction)?;
        Ok(span_fraction * self.semispan_m())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_endpoints() {
        let wing = WingGeometry::default();
        assert_eq!(wing.chord_at(0.0).unwrap(), 6.65);
        assert_eq!(wing.chord_at(1.0).unwrap(), 1.25);
    }

    #[test]
    fn test_chord_midpoint() {
        let wing = WingGeometry::default();
        let chord = wing.chord_at(0.5).unwrap();
        assert!((chord - (6.65 + 1.25) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_height_control_points() {
        let wing = WingGeometry::default();
        assert_eq!(wing.box_height_at(0.0).unwrap(), 0.5);
        assert_eq!(wing.box_height_at(0.5).unwrap(), 0.35);
        assert_eq!(wing.box_height_at(1.0).unwrap(), 0.2);
        // Inner segment interpolates between root and mid values
        let h = wing.box_height_at(0.25).unwrap();
        assert!((h - 0.425).abs() < 1e-9);
    }

    #[test]
    fn test_spar_positions_interpolate() {
        let wing = WingGeometry::default();
        let root = wing.spar_positions_at(0.0).unwrap();
        assert_eq!(root.front, 0.15);
        assert_eq!(root.rear, 0.60);

        let mid = wing.spar_positions_at(0.5).unwrap();
        assert!((mid.front - 0.175).abs() < 1e-9);
        assert!((mid.rear - 0.67).abs() < 1e-9);
    }

    #[test]
    fn test_box_width() {
        let wing = WingGeometry::default();
        let width = wing.box_width_at(0.0).unwrap();
        assert!((width - (0.60 - 0.15) * 6.65).abs() < 1e-9);
        // Width shrinks toward the tip
        assert!(wing.box_width_at(0.8).unwrap() < width);
    }

    #[test]
    fn test_out_of_range() {
        let wing = WingGeometry::default();
        assert!(matches!(
            wing.chord_at(-0.1),
            Err(PanelError::OutOfRange { .. })
        ));
        assert!(matches!(
            wing.box_height_at(1.5),
            Err(PanelError::OutOfRange { .. })
        ));
        assert!(matches!(
            wing.absolute_position_m(2.0),
            Err(PanelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_absolute_position() {
        let wing = WingGeometry::default();
        assert!((wing.absolute_position_m(0.2).unwrap() - 3.432).abs() < 1e-9);
        assert_eq!(wing.absolute_position_m(1.0).unwrap(), wing.semispan_m());
    }

    #[test]
    fn test_serialization() {
        let wing = WingGeometry::default();
        let json = serde_json::to_string(&wing).unwrap();
        let roundtrip: WingGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(wing, roundtrip);
    }
}
