//! # Stringer Cross-Sections
//!
//! Longitudinal stiffener geometry and derived section properties. Supports
//! the four common open profiles: Z, C (channel), T (tee) and L (angle).
//!
//! Derived area, self-inertia and centroid are computed by the constructor
//! and whenever the geometry is replaced, so they can never go stale.
//! Fillet corners are deducted from the area with a quarter-circle
//! approximation.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::section::{Stringer, StringerKind};
//!
//! let stringer = Stringer::typical(StringerKind::Z);
//! assert!(stringer.area_m2 > 0.0);
//! assert!(stringer.inertia_m4 > 0.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, PanelResult};

/// Area floor guarding against a fillet deduction zeroing a thin section
const MIN_AREA_M2: f64 = 1e-6;

/// Supported stringer cross-section shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringerKind {
    /// Z-profile, the usual choice for wing upper panels
    Z,
    /// Channel
    C,
    /// Tee
    T,
    /// Angle
    L,
}

impl StringerKind {
    /// All supported shapes, for iteration
    pub const ALL: [StringerKind; 4] = [
        StringerKind::Z,
        StringerKind::C,
        StringerKind::T,
        StringerKind::L,
    ];
}

impl std::fmt::Display for StringerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StringerKind::Z => "Z",
            StringerKind::C => "C",
            StringerKind::T => "T",
            StringerKind::L => "L",
        };
        write!(f, "{s}")
    }
}

/// One longitudinal stiffener, exclusively owned by its panel.
///
/// `area_m2`, `inertia_m4` and `centroid_y_m` are derived fields: the
/// constructor computes them from the geometry, and `set_geometry`
/// recomputes them. They are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stringer {
    /// Cross-section shape
    pub kind: StringerKind,

    /// Web height (m)
    pub web_height_m: f64,
    /// Flange width (m)
    pub flange_width_m: f64,
    /// Web thickness (m)
    pub web_thickness_m: f64,
    /// Flange thickness (m)
    pub flange_thickness_m: f64,
    /// Fillet radius at the web/flange junctions (m)
    pub fillet_radius_m: f64,

    /// Cross-sectional area (m²), derived
    pub area_m2: f64,
    /// Self moment of inertia about the centroidal horizontal axis (m⁴), derived
    pub inertia_m4: f64,
    /// Centroid height above the section's lower edge (m), derived
    pub centroid_y_m: f64,
}

impl Stringer {
    /// Create a stringer, computing its derived section properties.
    pub fn new(
        kind: StringerKind,
        web_height_m: f64,
        flange_width_m: f64,
        web_thickness_m: f64,
        flange_thickness_m: f64,
        fillet_radius_m: f64,
    ) -> PanelResult<Self> {
        let mut stringer = Stringer {
            kind,
            web_height_m,
            flange_width_m,
            web_thickness_m,
            flange_thickness_m,
            fillet_radius_m,
            area_m2: 0.0,
            inertia_m4: 0.0,
            centroid_y_m: 0.0,
        };
        stringer.recompute()?;
        Ok(stringer)
    }

    /// Typical 737-800 wing panel stringer dimensions for each shape.
    pub fn typical(kind: StringerKind) -> Self {
        let (web_h, flange_w, radius) = match kind {
            StringerKind::Z | StringerKind::C => (0.025, 0.020, 0.003),
            StringerKind::T => (0.020, 0.025, 0.002),
            StringerKind::L => (0.020, 0.020, 0.002),
        };
        Stringer::new(kind, web_h, flange_w, 0.002, 0.002, radius)
            .expect("typical stringer dimensions are valid")
    }

    /// Replace the geometry and recompute the derived properties.
    pub fn set_geometry(
        &mut self,
        web_height_m: f64,
        flange_width_m: f64,
        web_thickness_m: f64,
        flange_thickness_m: f64,
        fillet_radius_m: f64,
    ) -> PanelResult<()> {
        self.web_height_m = web_height_m;
        self.flange_width_m = flange_width_m;
        self.web_thickness_m = web_thickness_m;
        self.flange_thickness_m = flange_thickness_m;
        self.fillet_radius_m = fillet_radius_m;
        self.recompute()
    }

    fn validate(&self) -> PanelResult<()> {
        let dims = [
            ("web_height_m", self.web_height_m),
            ("flange_width_m", self.flange_width_m),
            ("web_thickness_m", self.web_thickness_m),
            ("flange_thickness_m", self.flange_thickness_m),
        ];
        for (field, value) in dims {
            if value <= 0.0 {
                return Err(PanelError::invalid_geometry(
                    field,
                    value.to_string(),
                    "Stringer dimension must be positive",
                ));
            }
        }
        if self.fillet_radius_m < 0.0 {
            return Err(PanelError::invalid_geometry(
                "fillet_radius_m",
                self.fillet_radius_m.to_string(),
                "Fillet radius cannot be negative",
            ));
        }
        Ok(())
    }

    fn recompute(&mut self) -> PanelResult<()> {
        self.validate()?;
        self.area_m2 = self.compute_area();
        let (inertia, centroid) = self.compute_inertia();
        self.inertia_m4 = inertia;
        self.centroid_y_m = centroid;
        Ok(())
    }

    fn compute_area(&self) -> f64 {
        let flange = self.flange_width_m * self.flange_thickness_m;
        let web = self.web_height_m * self.web_thickness_m;

        let gross = match self.kind {
            // Two flanges plus the web
            StringerKind::Z | StringerKind::C => 2.0 * flange + web,
            // One flange plus the web (the angle's "web" is its vertical leg)
            StringerKind::T | StringerKind::L => flange + web,
        };

        let corners = match self.kind {
            StringerKind::Z | StringerKind::C => 4.0,
            StringerKind::T | StringerKind::L => 2.0,
        };
        let fillet_deduction = corners * PI * self.fillet_radius_m.powi(2) / 4.0;

        (gross - fillet_deduction).max(MIN_AREA_M2)
    }

    /// Centroid (from the lower edge) and self inertia by parallel-axis
    /// assembly of the rectangular parts.
    fn compute_inertia(&self) -> (f64, f64) {
        let fw = self.flange_width_m;
        let ft = self.flange_thickness_m;
        let wh = self.web_height_m;
        let wt = self.web_thickness_m;
        let area = self.area_m2;

        let rect_inertia = |width: f64, height: f64| width * height.powi(3) / 12.0;

        match self.kind {
            StringerKind::Z | StringerKind::C => {
                let total_height = wh + 2.0 * ft;
                let static_moment = fw * ft * (total_height - ft / 2.0)
                    + wh * wt * (wh / 2.0 + ft)
                    + fw * ft * (ft / 2.0);
                let centroid = static_moment / area;

                let i_top = rect_inertia(fw, ft)
                    + fw * ft * (total_height - ft / 2.0 - centroid).powi(2);
                let i_web =
                    rect_inertia(wt, wh) + wh * wt * (wh / 2.0 + ft - centroid).powi(2);
                let i_bottom = rect_inertia(fw, ft) + fw * ft * (ft / 2.0 - centroid).powi(2);
                (i_top + i_web + i_bottom, centroid)
            }
            StringerKind::T => {
                // Flange on top, web below
                let total_height = wh + ft;
                let static_moment =
                    fw * ft * (total_height - ft / 2.0) + wh * wt * (wh / 2.0);
                let centroid = static_moment / area;

                let i_flange = rect_inertia(fw, ft)
                    + fw * ft * (total_height - ft / 2.0 - centroid).powi(2);
                let i_web = rect_inertia(wt, wh) + wh * wt * (wh / 2.0 - centroid).powi(2);
                (i_flange + i_web, centroid)
            }
            StringerKind::L => {
                // Two perpendicular legs, treated as rectangles
                let h_eff = self.web_height_m.max(self.flange_width_m);
                let static_moment =
                    wh * wt * (wh / 2.0) + fw * ft * (h_eff - ft / 2.0);
                let centroid = static_moment / area;

                let i_vertical =
                    rect_inertia(wt, wh) + wh * wt * (wh / 2.0 - centroid).powi(2);
                let i_horizontal = rect_inertia(ft, fw)
                    + fw * ft * (h_eff - ft / 2.0 - centroid).powi(2);
                (i_vertical + i_horizontal, centroid)
            }
        }
    }

    /// Overall section height above the skin plane (m).
    pub fn height_m(&self) -> f64 {
        match self.kind {
            StringerKind::Z | StringerKind::C => {
                self.web_height_m + 2.0 * self.flange_thickness_m
            }
            StringerKind::T => self.web_height_m + self.flange_thickness_m,
            StringerKind::L => self.web_height_m.max(self.flange_width_m),
        }
    }

    /// Centroid depth below the attached upper edge (m).
    ///
    /// Stringers hang below the skin, so the panel assembly measures
    /// centroids downward from the attachment plane.
    pub fn centroid_depth_m(&self) -> f64 {
        self.height_m() - self.centroid_y_m
    }

    /// Combined area of the stringer plus its cooperating effective skin.
    pub fn effective_area_m2(&self, skin_thickness_m: f64, effective_width_m: f64) -> f64 {
        self.area_m2 + skin_thickness_m * effective_width_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_z_area() {
        let s = Stringer::typical(StringerKind::Z);
        // 2 flanges 20x2 mm + web 25x2 mm, minus four 3 mm fillet corners
        let gross = 2.0 * 0.020 * 0.002 + 0.025 * 0.002;
        let fillets = 4.0 * PI * 0.003f64.powi(2) / 4.0;
        assert!((s.area_m2 - (gross - fillets)).abs() < 1e-12);
        assert!(s.area_m2 > 0.0);
    }

    #[test]
    fn test_all_kinds_positive_properties() {
        for kind in StringerKind::ALL {
            let s = Stringer::typical(kind);
            assert!(s.area_m2 > 0.0, "{kind} area");
            assert!(s.inertia_m4 > 0.0, "{kind} inertia");
            assert!(s.centroid_y_m > 0.0, "{kind} centroid");
            assert!(s.centroid_y_m < s.height_m(), "{kind} centroid within section");
        }
    }

    #[test]
    fn test_z_centroid_near_mid_height() {
        // Symmetric flanges put the Z centroid at mid-height
        let s = Stringer::typical(StringerKind::Z);
        let total_height = 0.025 + 2.0 * 0.002;
        assert!((s.centroid_y_m - total_height / 2.0).abs() / total_height < 0.2);
    }

    #[test]
    fn test_area_floor() {
        // A large fillet radius on a tiny section bottoms out at the floor
        let s = Stringer::new(StringerKind::Z, 0.002, 0.002, 0.0005, 0.0005, 0.01).unwrap();
        assert_eq!(s.area_m2, MIN_AREA_M2);
    }

    #[test]
    fn test_set_geometry_recomputes() {
        let mut s = Stringer::typical(StringerKind::Z);
        let area_before = s.area_m2;
        s.set_geometry(0.030, 0.020, 0.002, 0.002, 0.003).unwrap();
        assert!(s.area_m2 > area_before);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(Stringer::new(StringerKind::Z, -0.025, 0.02, 0.002, 0.002, 0.003).is_err());
        assert!(Stringer::new(StringerKind::Z, 0.025, 0.02, 0.0, 0.002, 0.003).is_err());
        assert!(Stringer::new(StringerKind::Z, 0.025, 0.02, 0.002, 0.002, -0.001).is_err());
    }

    #[test]
    fn test_effective_area_with_skin() {
        let s = Stringer::typical(StringerKind::Z);
        let eff = s.effective_area_m2(0.002, 0.05);
        assert!((eff - (s.area_m2 + 0.002 * 0.05)).abs() < 1e-15);
    }

    #[test]
    fn test_serialization() {
        let s = Stringer::typical(StringerKind::T);
        let json = serde_json::to_string(&s).unwrap();
        let roundtrip: Stringer = serde_json::from_str(&json).unwrap();
        assert_eq!(s, roundtrip);
    }
}
