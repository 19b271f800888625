//! # Strength Checks
//!
//! Bending-stress assessment of a converged panel. The working stress
//! is the extreme-fiber value M·(h/2)/I_eff; the acceptance criterion
//! keeps it inside the proportional regime so the elastic section
//! properties behind the reduction stay valid. The full panel check
//! adds the compression allowable and a local buckling audit of every
//! stringer element.

use serde::{Deserialize, Serialize};

use crate::errors::PanelResult;
use crate::loads::bending_stress;
use crate::materials::{LoadSense, Material};
use crate::section::Panel;
use crate::stability::{check_stringer_local_buckling, StringerBucklingReport};

/// Extreme-fiber bending stress of a panel under a spanwise moment (Pa).
///
/// Uses the half box height as the fiber distance and the panel's
/// converged reduced inertia. Fails with [`crate::errors::PanelError::InvalidSection`]
/// if no reduction pass has stored an inertia yet.
pub fn extreme_fiber_stress(panel: &Panel, moment_nm: f64) -> PanelResult<f64> {
    let inertia = panel.reduced_inertia()?;
    bending_stress(moment_nm, inertia, panel.box_height_m / 2.0)
}

/// Outcome of a single stress-against-limit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthCheck {
    /// Working stress (Pa)
    pub stress_pa: f64,
    /// Governing limit (Pa)
    pub limit_pa: f64,
    /// Working stress strictly below the limit
    pub satisfied: bool,
    /// Limit / working stress ratio (infinite for near-zero stress)
    pub margin: f64,
}

impl StrengthCheck {
    fn against(stress_pa: f64, limit_pa: f64) -> Self {
        let stress = stress_pa.abs();
        let margin = if stress > 1e-6 {
            limit_pa / stress
        } else {
            f64::INFINITY
        };
        StrengthCheck {
            stress_pa,
            limit_pa,
            satisfied: stress < limit_pa,
            margin,
        }
    }
}

/// Check a working stress against the proportional limit.
///
/// The reduction model assumes elastic skin behaviour below the
/// proportional limit, so the converged state is only trusted when the
/// working stress stays under it.
pub fn check_strength(stress_pa: f64, material: &Material) -> StrengthCheck {
    StrengthCheck::against(stress_pa, material.proportional_limit_pa)
}

/// Full strength assessment of a converged panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelStrengthReport {
    /// Extreme-fiber stress against the proportional limit
    pub proportional: StrengthCheck,
    /// Extreme-fiber stress against the compression allowable
    pub allowable: StrengthCheck,
    /// Local buckling audit per stringer
    pub stringer_audits: Vec<StringerBucklingReport>,
    /// Every check satisfied
    pub satisfied: bool,
}

/// Assess a converged panel: proportional limit, compression allowable
/// and per-stringer local buckling, all at the extreme-fiber stress.
pub fn check_panel_strength(
    panel: &Panel,
    material: &Material,
    moment_nm: f64,
) -> PanelResult<PanelStrengthReport> {
    let stress = extreme_fiber_stress(panel, moment_nm)?;

    let proportional = check_strength(stress, material);
    let allowable =
        StrengthCheck::against(stress, material.allowable_stress(LoadSense::Compression));

    let mut stringer_audits = Vec::with_capacity(panel.stringer_count());
    for stringer in &panel.stringers {
        stringer_audits.push(check_stringer_local_buckling(stringer, material, stress)?);
    }

    let satisfied = proportional.satisfied
        && allowable.satisfied
        && stringer_audits.iter().all(|a| a.overall_safe);

    Ok(PanelStrengthReport {
        proportional,
        allowable,
        stringer_audits,
        satisfied,
    })
}

/// Bending stress at the section's characteristic fibers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressDistribution {
    /// Neutral axis height above the lower box edge (m)
    pub neutral_axis_m: f64,
    /// Stress at the skin mid-plane (Pa)
    pub skin_pa: f64,
    /// Stress at each stringer centroid (Pa)
    pub stringer_pa: Vec<f64>,
}

/// Stress at the skin and each stringer centroid, measured from the
/// section's own neutral axis.
pub fn stress_distribution(panel: &Panel, moment_nm: f64) -> PanelResult<StressDistribution> {
    let inertia = panel.reduced_inertia()?;
    let neutral_axis = panel.neutral_axis_m()?;

    let stress_at = |y: f64| -> PanelResult<f64> {
        let distance = y - neutral_axis;
        if distance.abs() < 1e-12 {
            return Ok(0.0);
        }
        bending_stress(moment_nm, inertia, distance)
    };

    let skin_y = panel.box_height_m - panel.skin_thickness_m / 2.0;
    let skin_pa = stress_at(skin_y)?;

    let attach_y = panel.box_height_m - panel.skin_thickness_m;
    let mut stringer_pa = Vec::with_capacity(panel.stringer_count());
    for stringer in &panel.stringers {
        stringer_pa.push(stress_at(attach_y - stringer.centroid_depth_m())?);
    }

    Ok(StressDistribution {
        neutral_axis_m: neutral_axis,
        skin_pa,
        stringer_pa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{Stringer, StringerKind};

    fn converged_panel() -> Panel {
        let mut panel = Panel::new(0.2, 1.0, 0.6, 0.003, 0.15).unwrap();
        for _ in 0..4 {
            panel.add_stringer(Stringer::typical(StringerKind::Z));
        }
        panel.recompute_effective_area().unwrap();
        panel.recompute_effective_inertia().unwrap();
        panel
    }

    #[test]
    fn test_extreme_fiber_stress_formula() {
        let panel = converged_panel();
        let moment = 1.0e5;
        let stress = extreme_fiber_stress(&panel, moment).unwrap();
        let expected = moment * (panel.box_height_m / 2.0) / panel.reduced_inertia().unwrap();
        assert!((stress - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_extreme_fiber_stress_requires_reduction_pass() {
        let panel = Panel::new(0.2, 1.0, 0.6, 0.003, 0.15).unwrap();
        let err = extreme_fiber_stress(&panel, 1.0e5).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_check_strength_verdict_and_margin() {
        let mat = Material::v95t1_sheet();
        let limit = mat.proportional_limit_pa;

        let pass = check_strength(0.5 * limit, &mat);
        assert!(pass.satisfied);
        assert!((pass.margin - 2.0).abs() < 1e-12);

        let fail = check_strength(1.5 * limit, &mat);
        assert!(!fail.satisfied);
        assert!(fail.margin < 1.0);

        // At the limit itself the check is not satisfied (strict inequality)
        let edge = check_strength(limit, &mat);
        assert!(!edge.satisfied);
    }

    #[test]
    fn test_check_strength_zero_stress() {
        let mat = Material::v95t1_sheet();
        let verdict = check_strength(0.0, &mat);
        assert!(verdict.satisfied);
        assert!(verdict.margin.is_infinite());
    }

    #[test]
    fn test_check_strength_compression_sign() {
        // Compressive (negative) stress is assessed by magnitude
        let mat = Material::v95t1_sheet();
        let verdict = check_strength(-0.5 * mat.proportional_limit_pa, &mat);
        assert!(verdict.satisfied);
        assert!((verdict.margin - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_panel_strength_report() {
        let mat = Material::v95t1_sheet();
        let panel = converged_panel();
        let report = check_panel_strength(&panel, &mat, 1.0e4).unwrap();

        assert_eq!(report.stringer_audits.len(), 4);
        assert_eq!(
            report.satisfied,
            report.proportional.satisfied
                && report.allowable.satisfied
                && report.stringer_audits.iter().all(|a| a.overall_safe)
        );
    }

    #[test]
    fn test_stress_distribution_signs() {
        let panel = converged_panel();
        let dist = stress_distribution(&panel, 1.0e5).unwrap();

        // All elements sit above the lower box edge but around the section's
        // own neutral axis near the top; skin above it, stringers below
        let skin_y = panel.box_height_m - panel.skin_thickness_m / 2.0;
        assert!(skin_y > dist.neutral_axis_m);
        assert!(dist.skin_pa > 0.0);
        assert_eq!(dist.stringer_pa.len(), 4);
        for s in &dist.stringer_pa {
            assert!(*s < 0.0);
        }
    }
}
