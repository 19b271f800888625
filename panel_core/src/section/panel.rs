//! # Panel Aggregate
//!
//! One stiffened upper-panel cross-section at a span station: skin strip,
//! owned stringers, and the derived effective (post-buckling-reduced)
//! section properties.
//!
//! A panel is created with geometry seeded from the wing planform, mutated
//! in place by the reduction iteration, and read out by the strength
//! checker once converged. `reduced_area_m2` / `reduced_inertia_m4` are
//! `None` until a reduction pass has computed them.

use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, PanelResult};
use crate::section::Stringer;
use crate::wing::WingGeometry;

/// Stiffened panel at one span station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Station position along the half-span, in [0, 1]
    pub span_fraction: f64,

    /// Skin thickness (m)
    pub skin_thickness_m: f64,
    /// Stringer spacing, i.e. the width of one skin bay (m)
    pub stringer_spacing_m: f64,
    /// Panel width between the spars (m)
    pub panel_width_m: f64,
    /// Box height at this station (m)
    pub box_height_m: f64,

    /// Stiffeners, exclusively owned by this panel
    pub stringers: Vec<Stringer>,

    /// Effective (load-carrying) skin width after reduction (m).
    /// Seeded to the full stringer spacing; never exceeds it.
    pub effective_skin_width_m: f64,
    /// Effective cross-section area (m²); valid only after a reduction pass
    pub reduced_area_m2: Option<f64>,
    /// Effective moment of inertia (m⁴); valid only after a reduction pass
    pub reduced_inertia_m4: Option<f64>,
}

impl Panel {
    /// Create a panel with explicit geometry.
    pub fn new(
        span_fraction: f64,
        panel_width_m: f64,
        box_height_m: f64,
        skin_thickness_m: f64,
        stringer_spacing_m: f64,
    ) -> PanelResult<Self> {
        if !(0.0..=1.0).contains(&span_fraction) {
            return Err(PanelError::out_of_range(span_fraction));
        }
        let dims = [
            ("panel_width_m", panel_width_m),
            ("box_height_m", box_height_m),
            ("skin_thickness_m", skin_thickness_m),
            ("stringer_spacing_m", stringer_spacing_m),
        ];
        for (field, value) in dims {
            if value <= 0.0 {
                return Err(PanelError::invalid_geometry(
                    field,
                    value.to_string(),
                    "Panel dimension must be positive",
                ));
            }
        }

        Ok(Panel {
            span_fraction,
            skin_thickness_m,
            stringer_spacing_m,
            panel_width_m,
            box_height_m,
            stringers: Vec::new(),
            effective_skin_width_m: stringer_spacing_m,
            reduced_area_m2: None,
            reduced_inertia_m4: None,
        })
    }

    /// Create a panel with width and box height seeded from the wing
    /// planform at the given station.
    pub fn for_station(
        wing: &WingGeometry,
        span_fraction: f64,
        skin_thickness_m: f64,
        stringer_spacing_m: f64,
    ) -> PanelResult<Self> {
        let panel_width_m = wing.box_width_at(span_fraction)?;
        let box_height_m = wing.box_height_at(span_fraction)?;
        Panel::new(
            span_fraction,
            panel_width_m,
            box_height_m,
            skin_thickness_m,
            stringer_spacing_m,
        )
    }

    /// Attach a stringer to this panel.
    pub fn add_stringer(&mut self, stringer: Stringer) {
        self.stringers.push(stringer);
    }

    /// Number of stringers on the panel.
    pub fn stringer_count(&self) -> usize {
        self.stringers.len()
    }

    /// Total stringer cross-section area (m²).
    pub fn stringer_area_m2(&self) -> f64 {
        self.stringers.iter().map(|s| s.area_m2).sum()
    }

    /// Set the effective skin width, clamped to the full stringer spacing.
    ///
    /// The effective width can never exceed the bay width; a value above it
    /// (e.g. from an elastic formula evaluated right at the critical stress)
    /// simply means the full bay is effective.
    pub fn set_effective_width(&mut self, width_m: f64) -> PanelResult<()> {
        if width_m < 0.0 {
            return Err(PanelError::invalid_geometry(
                "effective_skin_width_m",
                width_m.to_string(),
                "Effective width cannot be negative",
            ));
        }
        self.effective_skin_width_m = width_m.min(self.stringer_spacing_m);
        Ok(())
    }

    /// Effective skin area: thickness times the current effective width (m²).
    pub fn effective_skin_area_m2(&self) -> f64 {
        self.skin_thickness_m * self.effective_skin_width_m
    }

    /// Recompute and store the effective cross-section area.
    ///
    /// Effective skin area plus all stringer areas.
    pub fn recompute_effective_area(&mut self) -> PanelResult<f64> {
        let area = self.effective_skin_area_m2() + self.stringer_area_m2();
        if area <= 0.0 {
            return Err(PanelError::invalid_section("reduced_area_m2", area));
        }
        self.reduced_area_m2 = Some(area);
        Ok(area)
    }

    /// Height of each element centroid above the lower box edge, paired
    /// with its area.
    fn element_centroids(&self) -> Vec<(f64, f64)> {
        let mut elements = Vec::with_capacity(1 + self.stringers.len());

        // Skin strip at the top of the box
        let skin_area = self.effective_skin_area_m2();
        let skin_y = self.box_height_m - self.skin_thickness_m / 2.0;
        elements.push((skin_area, skin_y));

        // Stringers hang below the upper skin
        let attach_y = self.box_height_m - self.skin_thickness_m;
        for stringer in &self.stringers {
            elements.push((stringer.area_m2, attach_y - stringer.centroid_depth_m()));
        }
        elements
    }

    /// Neutral axis of the composite section: the area-weighted centroid of
    /// all contributing elements, measured from the lower box edge (m).
    pub fn neutral_axis_m(&self) -> PanelResult<f64> {
        let elements = self.element_centroids();
        let total_area: f64 = elements.iter().map(|(a, _)| a).sum();
        if total_area <= 0.0 {
            return Err(PanelError::invalid_section("total_area_m2", total_area));
        }
        let static_moment: f64 = elements.iter().map(|(a, y)| a * y).sum();
        Ok(static_moment / total_area)
    }

    /// Recompute and store the effective moment of inertia about the
    /// section's neutral axis (parallel-axis combination).
    pub fn recompute_effective_inertia(&mut self) -> PanelResult<f64> {
        if self.reduced_area_m2.is_none() {
            self.recompute_effective_area()?;
        }
        let neutral_axis = self.neutral_axis_m()?;

        // Skin strip: thin-plate self term plus its Steiner term
        let skin_area = self.effective_skin_area_m2();
        let skin_self =
            self.effective_skin_width_m * self.skin_thickness_m.powi(3) / 12.0;
        let skin_y = self.box_height_m - self.skin_thickness_m / 2.0;
        let mut inertia = skin_self + skin_area * (skin_y - neutral_axis).powi(2);

        // Stringers: own inertia plus area times squared centroid offset
        let attach_y = self.box_height_m - self.skin_thickness_m;
        for stringer in &self.stringers {
            let y = attach_y - stringer.centroid_depth_m();
            inertia += stringer.inertia_m4 + stringer.area_m2 * (y - neutral_axis).powi(2);
        }

        if inertia <= 0.0 {
            return Err(PanelError::invalid_section("reduced_inertia_m4", inertia));
        }
        self.reduced_inertia_m4 = Some(inertia);
        Ok(inertia)
    }

    /// Stored effective area, failing if no reduction pass has run yet.
    pub fn reduced_area(&self) -> PanelResult<f64> {
        self.reduced_area_m2
            .ok_or_else(|| PanelError::invalid_section("reduced_area_m2", -1.0))
    }

    /// Stored effective inertia, failing if no reduction pass has run yet.
    pub fn reduced_inertia(&self) -> PanelResult<f64> {
        self.reduced_inertia_m4
            .ok_or_else(|| PanelError::invalid_section("reduced_inertia_m4", -1.0))
    }

    /// Skin reduction factor ρ = effective width / full bay width.
    pub fn reduction_factor(&self) -> f64 {
        self.effective_skin_width_m / self.stringer_spacing_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::StringerKind;

    fn test_panel() -> Panel {
        let mut panel = Panel::new(0.2, 2.5, 0.45, 0.0025, 0.5).unwrap();
        for _ in 0..4 {
            panel.add_stringer(Stringer::typical(StringerKind::Z));
        }
        panel
    }

    #[test]
    fn test_new_seeds_full_effective_width() {
        let panel = test_panel();
        assert_eq!(panel.effective_skin_width_m, panel.stringer_spacing_m);
        assert!(panel.reduced_area_m2.is_none());
        assert!(panel.reduced_inertia_m4.is_none());
    }

    #[test]
    fn test_for_station_uses_wing_geometry() {
        let wing = WingGeometry::default();
        let panel = Panel::for_station(&wing, 0.2, 0.0025, 0.5).unwrap();
        assert_eq!(panel.panel_width_m, wing.box_width_at(0.2).unwrap());
        assert_eq!(panel.box_height_m, wing.box_height_at(0.2).unwrap());
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(Panel::new(0.2, 2.5, 0.45, 0.0, 0.5).is_err());
        assert!(Panel::new(0.2, 2.5, -0.45, 0.0025, 0.5).is_err());
        assert!(Panel::new(1.5, 2.5, 0.45, 0.0025, 0.5).is_err());
    }

    #[test]
    fn test_effective_area() {
        let mut panel = test_panel();
        let area = panel.recompute_effective_area().unwrap();
        let expected = 0.0025 * 0.5 + panel.stringer_area_m2();
        assert!((area - expected).abs() < 1e-12);
        assert_eq!(panel.reduced_area_m2, Some(area));
    }

    #[test]
    fn test_effective_width_clamped_to_spacing() {
        let mut panel = test_panel();
        panel.set_effective_width(0.8).unwrap();
        assert_eq!(panel.effective_skin_width_m, panel.stringer_spacing_m);

        panel.set_effective_width(0.1).unwrap();
        assert_eq!(panel.effective_skin_width_m, 0.1);

        assert!(panel.set_effective_width(-0.1).is_err());
    }

    #[test]
    fn test_neutral_axis_near_top() {
        // Everything sits at the top of the box, so the composite centroid
        // must land just below the upper skin.
        let panel = test_panel();
        let na = panel.neutral_axis_m().unwrap();
        assert!(na > 0.9 * panel.box_height_m);
        assert!(na < panel.box_height_m);
    }

    #[test]
    fn test_effective_inertia_positive() {
        let mut panel = test_panel();
        let inertia = panel.recompute_effective_inertia().unwrap();
        assert!(inertia > 0.0);
        assert_eq!(panel.reduced_inertia_m4, Some(inertia));
    }

    #[test]
    fn test_reduction_shrinks_area_and_inertia() {
        let mut full = test_panel();
        let area_full = full.recompute_effective_area().unwrap();
        let inertia_full = full.recompute_effective_inertia().unwrap();

        let mut reduced = test_panel();
        reduced.set_effective_width(0.1).unwrap();
        let area_red = reduced.recompute_effective_area().unwrap();
        reduced.recompute_effective_inertia().unwrap();

        assert!(area_red < area_full);
        // Less cooperating skin also means less Steiner contribution
        assert!(reduced.reduced_inertia_m4.unwrap() < inertia_full);
    }

    #[test]
    fn test_accessors_before_reduction_fail() {
        let panel = test_panel();
        assert!(panel.reduced_area().is_err());
        assert!(panel.reduced_inertia().is_err());
    }

    #[test]
    fn test_reduction_factor() {
        let mut panel = test_panel();
        panel.set_effective_width(0.25).unwrap();
        assert!((panel.reduction_factor() - 0.5).abs() < 1e-12);
    }
}
