//! # Unit Types
//!
//! Type-safe wrappers for SI engineering units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - The sizing pipeline works in a consistent SI set (m, Pa, N·m)
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! Calculation code carries unit-suffixed `f64` fields (`skin_thickness_m`,
//! `stress_pa`); the wrappers are used at the display boundary where values
//! are converted to mm, MPa and MN·m for reporting.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::units::{Meters, Millimeters, Pascals, MegaPascals};
//!
//! let spacing = Meters(0.15);
//! let spacing_mm: Millimeters = spacing.into();
//! assert_eq!(spacing_mm.0, 150.0);
//!
//! let stress = Pascals(5.37e6);
//! let stress_mpa: MegaPascals = stress.into();
//! assert!((stress_mpa.0 - 5.37).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Stiffness in gigapascals (elastic moduli)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GigaPascals(pub f64);

impl From<Pascals> for MegaPascals {
    fn from(pa: Pascals) -> Self {
        MegaPascals(pa.0 / 1e6)
    }
}

impl From<MegaPascals> for Pascals {
    fn from(mpa: MegaPascals) -> Self {
        Pascals(mpa.0 * 1e6)
    }
}

impl From<Pascals> for GigaPascals {
    fn from(pa: Pascals) -> Self {
        GigaPascals(pa.0 / 1e9)
    }
}

impl From<GigaPascals> for Pascals {
    fn from(gpa: GigaPascals) -> Self {
        Pascals(gpa.0 * 1e9)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Bending moment in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Bending moment in meganewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeganewtonMeters(pub f64);

impl From<NewtonMeters> for MeganewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        MeganewtonMeters(nm.0 / 1e6)
    }
}

impl From<MeganewtonMeters> for NewtonMeters {
    fn from(mnm: MeganewtonMeters) -> Self {
        NewtonMeters(mnm.0 * 1e6)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area in square centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareCentimeters(pub f64);

impl From<SquareMeters> for SquareCentimeters {
    fn from(m2: SquareMeters) -> Self {
        SquareCentimeters(m2.0 * 1e4)
    }
}

impl From<SquareCentimeters> for SquareMeters {
    fn from(cm2: SquareCentimeters) -> Self {
        SquareMeters(cm2.0 / 1e4)
    }
}

/// Moment of inertia in meters^4
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters4(pub f64);

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

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Pascals);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(GigaPascals);
impl_arithmetic!(NewtonMeters);
impl_arithmetic!(MeganewtonMeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(SquareCentimeters);
impl_arithmetic!(Meters4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(0.0025);
        let mm: Millimeters = m.into();
        assert!((mm.0 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_pascals_to_megapascals() {
        let pa = Pascals(440e6);
        let mpa: MegaPascals = pa.into();
        assert_eq!(mpa.0, 440.0);
    }

    #[test]
    fn test_moment_conversion() {
        let m: NewtonMeters = MeganewtonMeters(7.63).into();
        assert_eq!(m.0, 7.63e6);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(0.15);
        let b = Meters(0.05);
        assert!(((a + b).0 - 0.2).abs() < 1e-12);
        assert!(((a - b).0 - 0.1).abs() < 1e-12);
        assert!(((a * 2.0).0 - 0.3).abs() < 1e-12);
        assert!(((a / 2.0).0 - 0.075).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let mpa = MegaPascals(352.0);
        let json = serde_json::to_string(&mpa).unwrap();
        assert_eq!(json, "352.0");

        let roundtrip: MegaPascals = serde_json::from_str(&json).unwrap();
        assert_eq!(mpa, roundtrip);
    }
}
