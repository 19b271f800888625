//! # Reduction Engine
//!
//! Post-buckling reduction of a stiffened panel. After the skin between
//! stringers buckles, only a fraction of each bay keeps carrying load;
//! the effective width captures that fraction and feeds the reduced
//! section properties. Because the edge stress depends on the reduced
//! inertia, which depends on the effective width, which depends on the
//! edge stress, the engine runs a fixed-point iteration until the
//! effective width settles.
//!
//! Two effective-width formulations are supported:
//!
//! - **Winter** (post-buckling reduced): λ_p = √(f_y/σ_cr),
//!   ρ = (1 − 0.22/λ_p)/λ_p above the slenderness limit 0.673,
//! - **von Kármán** (elastic critical): b_eff = b·√(σ_cr/σ_edge).
//!
//! Above the proportional regime the stringer modulus degrades to a
//! tangent modulus and the panel works with an area-weighted reduced
//! modulus.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{PanelError, PanelResult};
use crate::materials::Material;
use crate::section::Panel;
use crate::stability::{local_skin_buckling, BoundaryCondition};
use crate::strength::extreme_fiber_stress;

/// Slenderness below which the full bay width is effective (Winter).
pub const WINTER_SLENDERNESS_LIMIT: f64 = 0.673;

/// Fraction of yield where the tangent modulus starts degrading.
pub const TANGENT_ONSET_FRACTION: f64 = 0.6;

/// Effective-width formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionMethod {
    /// Winter curve anchored at the yield strength
    PostBucklingReduced,
    /// von Kármán width anchored at the current edge stress
    ElasticCritical,
}

impl FromStr for ReductionMethod {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "post_buckling_reduced" | "winter" => Ok(ReductionMethod::PostBucklingReduced),
            "elastic_critical" | "von_karman" => Ok(ReductionMethod::ElasticCritical),
            other => Err(PanelError::InvalidMethod {
                value: other.to_string(),
            }),
        }
    }
}

/// Effective width of one skin bay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveWidth {
    /// Effective width (m), never larger than the bay width
    pub width_m: f64,
    /// Reduction factor ρ = b_eff / b
    pub rho: f64,
}

/// Effective width of a skin bay under a compressive edge stress.
///
/// `critical_stress_pa` is the local buckling stress of the bay and
/// `edge_stress_pa` the current compressive stress at the stringer line.
/// The result never exceeds the physical bay width.
pub fn effective_width(
    bay_width_m: f64,
    critical_stress_pa: f64,
    edge_stress_pa: f64,
    material: &Material,
    method: ReductionMethod,
) -> PanelResult<EffectiveWidth> {
    if bay_width_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "bay_width_m",
            bay_width_m.to_string(),
            "Bay width must be positive",
        ));
    }
    if critical_stress_pa <= 0.0 {
        return Err(PanelError::invalid_section(
            "critical_stress_pa",
            critical_stress_pa,
        ));
    }

    let rho = match method {
        ReductionMethod::PostBucklingReduced => {
            let lambda_p = (material.yield_strength_pa / critical_stress_pa).sqrt();
            if lambda_p <= WINTER_SLENDERNESS_LIMIT {
                1.0
            } else {
                ((1.0 - 0.22 / lambda_p) / lambda_p).clamp(0.0, 1.0)
            }
        }
        ReductionMethod::ElasticCritical => {
            let edge = edge_stress_pa.abs();
            if edge <= critical_stress_pa {
                1.0
            } else {
                (critical_stress_pa / edge).sqrt().clamp(0.0, 1.0)
            }
        }
    };

    Ok(EffectiveWidth {
        width_m: rho * bay_width_m,
        rho,
    })
}

/// Tangent modulus of the stringer material at a working stress.
///
/// Equal to E below the 0.6·f_y onset, then degrading linearly to zero
/// at the yield strength. Never negative.
pub fn tangent_modulus(material: &Material, stress_pa: f64) -> f64 {
    let e = material.young_modulus_pa;
    let fy = material.yield_strength_pa;
    let stress = stress_pa.abs();
    let onset = TANGENT_ONSET_FRACTION * fy;

    if stress <= onset {
        e
    } else {
        (e * (1.0 - (stress - onset) / (fy - onset))).max(0.0)
    }
}

/// Area-weighted reduced modulus of the stringer/skin composite.
///
/// The stringers keep the elastic modulus while the effective skin works
/// at the tangent modulus: E_red = (E·A_str + E_t·A_skin) / (A_str + A_skin).
/// The buckled skin sheds stiffness first, so the tangent term attaches to
/// its area. Clamped to at most E.
pub fn reduced_modulus(panel: &Panel, material: &Material, stress_pa: f64) -> PanelResult<f64> {
    let a_str = panel.stringer_area_m2();
    if a_str <= 0.0 {
        return Err(PanelError::invalid_section("stringer_area_m2", a_str));
    }
    let a_skin = panel.effective_skin_area_m2();
    let e = material.young_modulus_pa;
    let e_t = tangent_modulus(material, stress_pa);

    let e_red = (e * a_str + e_t * a_skin) / (a_str + a_skin);
    Ok(e_red.min(e))
}

/// Knobs for the fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationOptions {
    /// Iteration cap before a non-convergence error
    pub max_iterations: usize,
    /// Relative change in effective width accepted as converged
    pub tolerance: f64,
    /// Effective-width formulation
    pub method: ReductionMethod,
    /// Edge support of the skin bays and the panel column
    pub boundary_condition: BoundaryCondition,
}

impl Default for IterationOptions {
    fn default() -> Self {
        IterationOptions {
            max_iterations: 10,
            tolerance: 0.02,
            method: ReductionMethod::PostBucklingReduced,
            boundary_condition: BoundaryCondition::Hinged,
        }
    }
}

/// Converged state of a panel after the reduction iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionSummary {
    /// Iterations consumed
    pub iterations: usize,
    /// Converged effective skin width per bay (m)
    pub effective_width_m: f64,
    /// Width reduction factor ρ at convergence
    pub rho: f64,
    /// Edge stress at convergence (Pa)
    pub edge_stress_pa: f64,
    /// Local skin buckling stress (Pa)
    pub critical_stress_pa: f64,
    /// Reduced modulus at convergence (Pa)
    pub reduced_modulus_pa: f64,
}

/// Run the coupled effective-width / reduced-modulus iteration.
///
/// Each pass recomputes the reduced section properties from the current
/// effective width, derives the extreme-fiber edge stress under the
/// applied moment, and produces a new effective width. Convergence is
/// judged on the relative change of the effective width alone; the
/// panel is left carrying its converged reduced properties.
///
/// Exhausting the iteration cap is surfaced as a
/// [`PanelError::NonConvergence`] so callers can report the station
/// instead of silently using an unsettled width.
pub fn iterate(
    panel: &mut Panel,
    material: &Material,
    moment_nm: f64,
    options: &IterationOptions,
) -> PanelResult<ReductionSummary> {
    let critical = local_skin_buckling(
        panel.skin_thickness_m,
        panel.stringer_spacing_m,
        material,
        options.boundary_condition,
    )?;

    let mut width = panel.effective_skin_width_m;
    let mut last_change = f64::INFINITY;

    for iteration in 1..=options.max_iterations {
        panel.recompute_effective_area()?;
        panel.recompute_effective_inertia()?;

        let edge_stress = extreme_fiber_stress(panel, moment_nm)?;
        let e_red = reduced_modulus(panel, material, edge_stress)?;

        // Reduction applies only once the skin has actually buckled;
        // below the critical stress the full bay carries load.
        let next = if edge_stress.abs() > critical {
            effective_width(
                panel.stringer_spacing_m,
                critical,
                edge_stress,
                material,
                options.method,
            )?
        } else {
            EffectiveWidth {
                width_m: panel.stringer_spacing_m,
                rho: 1.0,
            }
        };

        last_change = if width > 0.0 {
            (next.width_m - width).abs() / width
        } else {
            f64::INFINITY
        };

        debug!(
            iteration,
            width_m = next.width_m,
            relative_change = last_change,
            edge_stress_pa = edge_stress,
            reduced_modulus_pa = e_red,
            "reduction pass"
        );

        width = next.width_m;
        panel.set_effective_width(width)?;

        if last_change <= options.tolerance {
            // Settle the section properties on the final width
            panel.recompute_effective_area()?;
            panel.recompute_effective_inertia()?;
            let final_stress = extreme_fiber_stress(panel, moment_nm)?;
            let e_red = reduced_modulus(panel, material, final_stress)?;

            info!(
                iterations = iteration,
                effective_width_mm = width * 1e3,
                rho = next.rho,
                "reduction converged"
            );
            return Ok(ReductionSummary {
                iterations: iteration,
                effective_width_m: width,
                rho: next.rho,
                edge_stress_pa: final_stress,
                critical_stress_pa: critical,
                reduced_modulus_pa: e_red,
            });
        }
    }

    Err(PanelError::NonConvergence {
        iterations: options.max_iterations,
        last_relative_change: last_change,
        tolerance: options.tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{Stringer, StringerKind};

    fn test_panel() -> Panel {
        let mut panel = Panel::new(0.2, 1.0, 0.6, 0.003, 0.15).unwrap();
        for _ in 0..4 {
            panel.add_stringer(Stringer::typical(StringerKind::Z));
        }
        panel
    }

    #[test]
    fn test_winter_fully_effective_below_limit() {
        let mat = Material::v95t1_sheet();
        // Stocky bay: critical stress well above yield
        let ew = effective_width(
            0.05,
            mat.yield_strength_pa * 4.0,
            100e6,
            &mat,
            ReductionMethod::PostBucklingReduced,
        )
        .unwrap();
        assert_eq!(ew.rho, 1.0);
        assert_eq!(ew.width_m, 0.05);
    }

    #[test]
    fn test_winter_slender_bay_reference_point() {
        // λ_p = √(440/5.37) ≈ 9.05 gives ρ ≈ 0.1078
        let mat = Material::v95t1_sheet();
        let ew = effective_width(
            0.45,
            5.37e6,
            200e6,
            &mat,
            ReductionMethod::PostBucklingReduced,
        )
        .unwrap();
        assert!((ew.rho - 0.1078).abs() < 1e-3);
        assert!((ew.width_m - 0.1078 * 0.45).abs() < 5e-4);
    }

    #[test]
    fn test_von_karman_width() {
        let mat = Material::v95t1_sheet();
        let ew = effective_width(0.15, 50e6, 200e6, &mat, ReductionMethod::ElasticCritical)
            .unwrap();
        assert!((ew.rho - (50e6f64 / 200e6).sqrt()).abs() < 1e-12);
        // Edge stress below critical: bay fully effective
        let ew = effective_width(0.15, 50e6, 30e6, &mat, ReductionMethod::ElasticCritical)
            .unwrap();
        assert_eq!(ew.rho, 1.0);
    }

    #[test]
    fn test_effective_width_never_exceeds_bay() {
        let mat = Material::v95t1_sheet();
        for critical in [1e6, 10e6, 100e6, 1e9] {
            for method in [
                ReductionMethod::PostBucklingReduced,
                ReductionMethod::ElasticCritical,
            ] {
                let ew = effective_width(0.15, critical, 250e6, &mat, method).unwrap();
                assert!(ew.width_m <= 0.15 + 1e-12);
                assert!(ew.rho >= 0.0 && ew.rho <= 1.0);
            }
        }
    }

    #[test]
    fn test_effective_width_invalid_inputs() {
        let mat = Material::v95t1_sheet();
        let err = effective_width(0.0, 50e6, 200e6, &mat, ReductionMethod::PostBucklingReduced)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        let err = effective_width(0.15, 0.0, 200e6, &mat, ReductionMethod::PostBucklingReduced)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_tangent_modulus_elastic_below_onset() {
        let mat = Material::v95t1_profile();
        let onset = 0.6 * mat.yield_strength_pa;
        assert_eq!(tangent_modulus(&mat, 0.0), mat.young_modulus_pa);
        assert_eq!(tangent_modulus(&mat, onset), mat.young_modulus_pa);
        assert_eq!(tangent_modulus(&mat, -0.5 * onset), mat.young_modulus_pa);
    }

    #[test]
    fn test_tangent_modulus_degrades_to_zero_at_yield() {
        let mat = Material::v95t1_profile();
        let fy = mat.yield_strength_pa;
        let mid = 0.8 * fy;
        let e_t = tangent_modulus(&mat, mid);
        assert!((e_t - 0.5 * mat.young_modulus_pa).abs() / mat.young_modulus_pa < 1e-12);
        assert_eq!(tangent_modulus(&mat, fy), 0.0);
        // Clamped at zero past yield, never negative
        assert_eq!(tangent_modulus(&mat, 1.2 * fy), 0.0);
    }

    #[test]
    fn test_reduced_modulus_bounds() {
        let mat = Material::v95t1_sheet();
        let panel = test_panel();

        // Elastic regime: no reduction
        let e_red = reduced_modulus(&panel, &mat, 50e6).unwrap();
        assert!((e_red - mat.young_modulus_pa).abs() / mat.young_modulus_pa < 1e-12);

        // Plastic regime: below E, above the pure tangent value
        let stress = 0.9 * mat.yield_strength_pa;
        let e_red = reduced_modulus(&panel, &mat, stress).unwrap();
        assert!(e_red < mat.young_modulus_pa);
        assert!(e_red > tangent_modulus(&mat, stress));
    }

    #[test]
    fn test_reduced_modulus_requires_stringers() {
        let mat = Material::v95t1_sheet();
        let panel = Panel::new(0.2, 1.0, 0.6, 0.003, 0.15).unwrap();
        let err = reduced_modulus(&panel, &mat, 100e6).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_iterate_converges_for_moderate_moment() {
        let mat = Material::v95t1_sheet();
        let mut panel = test_panel();
        let opts = IterationOptions::default();

        let summary = iterate(&mut panel, &mat, 0.5e6, &opts).unwrap();
        assert!(summary.iterations <= opts.max_iterations);
        assert!(summary.effective_width_m > 0.0);
        assert!(summary.effective_width_m <= panel.stringer_spacing_m + 1e-12);
        assert!(panel.reduced_inertia().unwrap() > 0.0);
    }

    #[test]
    fn test_iterate_keeps_full_width_below_critical_stress() {
        let mat = Material::v95t1_sheet();
        let mut panel = test_panel();
        let opts = IterationOptions::default();

        // Negligible moment: the edge stress stays far below the skin
        // buckling stress, so the bay must stay fully effective even
        // though the Winter curve would reduce it on slenderness alone.
        let summary = iterate(&mut panel, &mat, 10.0, &opts).unwrap();
        assert!(summary.edge_stress_pa.abs() < summary.critical_stress_pa);
        assert!((summary.rho - 1.0).abs() < 1e-12);
        assert!((summary.effective_width_m - panel.stringer_spacing_m).abs() < 1e-12);
        assert!((panel.effective_skin_width_m - panel.stringer_spacing_m).abs() < 1e-12);
    }

    #[test]
    fn test_iterate_restores_width_when_moment_drops() {
        let mat = Material::v95t1_sheet();
        let mut panel = test_panel();
        let opts = IterationOptions::default();

        let loaded = iterate(&mut panel, &mat, 0.5e6, &opts).unwrap();
        assert!(loaded.effective_width_m < panel.stringer_spacing_m);

        let unloaded = iterate(&mut panel, &mat, 10.0, &opts).unwrap();
        assert!((unloaded.rho - 1.0).abs() < 1e-12);
        assert!((panel.effective_skin_width_m - panel.stringer_spacing_m).abs() < 1e-12);
    }

    #[test]
    fn test_iterate_idempotent_after_convergence() {
        let mat = Material::v95t1_sheet();
        let mut panel = test_panel();
        let opts = IterationOptions::default();

        let first = iterate(&mut panel, &mat, 0.5e6, &opts).unwrap();
        let second = iterate(&mut panel, &mat, 0.5e6, &opts).unwrap();
        // Converged once, the second run settles immediately
        assert_eq!(second.iterations, 1);
        let change =
            (second.effective_width_m - first.effective_width_m).abs() / first.effective_width_m;
        assert!(change <= opts.tolerance);
    }

    #[test]
    fn test_iterate_non_convergence_is_an_error() {
        let mat = Material::v95t1_sheet();
        let mut panel = test_panel();
        // Zero-pass cap forces the error path
        let opts = IterationOptions {
            max_iterations: 0,
            ..Default::default()
        };
        let err = iterate(&mut panel, &mat, 0.5e6, &opts).unwrap_err();
        assert_eq!(err.error_code(), "NON_CONVERGENCE");
    }

    #[test]
    fn test_iterate_degenerate_section_never_nan() {
        let mat = Material::v95t1_sheet();
        // No stringers: the reduced modulus has no stringer area to weight
        let mut panel = Panel::new(0.2, 1.0, 0.6, 0.003, 0.15).unwrap();
        let result = iterate(&mut panel, &mat, 0.5e6, &IterationOptions::default());
        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_reduction_method_from_str() {
        assert_eq!(
            "post_buckling_reduced".parse::<ReductionMethod>().unwrap(),
            ReductionMethod::PostBucklingReduced
        );
        assert_eq!(
            "von_karman".parse::<ReductionMethod>().unwrap(),
            ReductionMethod::ElasticCritical
        );
        let err = "plastic_hinge".parse::<ReductionMethod>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_METHOD");
    }
}
