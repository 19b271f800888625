//! # Station Sizing
//!
//! Per-station orchestration: seed a preliminary panel from the wing
//! planform and the design moment, run the reduction iteration to
//! convergence, and assess the converged section. Each station produces
//! a complete [`StationRecord`] or an explicit error; there are no
//! partial records. Stations are independent, so a batch runner keeps
//! going past a failed station and reports the failure alongside the
//! successes.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::PanelResult;
use crate::materials::Material;
use crate::reduction::{iterate, IterationOptions};
use crate::section::{Panel, Stringer, StringerKind};
use crate::stability::general_panel_buckling;
use crate::strength::{check_panel_strength, extreme_fiber_stress, PanelStrengthReport};
use crate::wing::WingGeometry;

/// Sizing knobs applied to every station of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSettings {
    /// Column length of the panel between ribs (m)
    pub panel_length_m: f64,
    /// Reduction iteration controls
    pub iteration: IterationOptions,
    /// Skin thickness override (m); seeded from the moment band when absent
    pub skin_thickness_m: Option<f64>,
    /// Stringer count override; seeded from the panel width when absent
    pub stringer_count: Option<usize>,
    /// Stringer profile used for all seeded stringers
    pub stringer_kind: StringerKind,
}

impl Default for StationSettings {
    fn default() -> Self {
        StationSettings {
            panel_length_m: 0.5,
            iteration: IterationOptions::default(),
            skin_thickness_m: None,
            stringer_count: None,
            stringer_kind: StringerKind::Z,
        }
    }
}

/// Skin thickness seeded from the design moment band (m).
pub fn preliminary_thickness_m(moment_nm: f64) -> f64 {
    let m = moment_nm.abs();
    if m >= 5.0e6 {
        0.004
    } else if m >= 3.0e6 {
        0.003
    } else {
        0.0025
    }
}

/// Stringer count seeded from the panel width.
pub fn preliminary_stringer_count(panel_width_m: f64) -> usize {
    if panel_width_m > 2.0 {
        4
    } else if panel_width_m > 1.5 {
        3
    } else {
        2
    }
}

/// Seed a panel at a span station from the wing planform and the
/// design moment.
///
/// Thickness comes from the moment band, stringer count from the box
/// width and spacing divides the width into equal bays, with one extra
/// bay so no stringer sits on a spar line.
pub fn preliminary_design(
    wing: &WingGeometry,
    span_fraction: f64,
    moment_nm: f64,
    settings: &StationSettings,
) -> PanelResult<Panel> {
    let width = wing.box_width_at(span_fraction)?;

    let thickness = settings
        .skin_thickness_m
        .unwrap_or_else(|| preliminary_thickness_m(moment_nm));
    let count = settings
        .stringer_count
        .unwrap_or_else(|| preliminary_stringer_count(width));
    let spacing = width / (count as f64 + 1.0);

    let mut panel = Panel::for_station(wing, span_fraction, thickness, spacing)?;
    for _ in 0..count {
        panel.add_stringer(Stringer::typical(settings.stringer_kind));
    }
    Ok(panel)
}

/// Converged sizing result for one span station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Station position as a span fraction
    pub span_fraction: f64,
    /// Absolute spanwise position (m)
    pub z_m: f64,
    /// Design bending moment (N·m)
    pub moment_nm: f64,
    /// Converged skin thickness (m)
    pub skin_thickness_m: f64,
    /// Stringers on the panel
    pub stringer_count: usize,
    /// Stringer pitch (m)
    pub stringer_spacing_m: f64,
    /// Converged effective skin width per bay (m)
    pub effective_width_m: f64,
    /// Width reduction factor ρ
    pub rho: f64,
    /// Reduced cross-section area (m²)
    pub reduced_area_m2: f64,
    /// Reduced moment of inertia (m⁴)
    pub reduced_inertia_m4: f64,
    /// Reduced modulus at convergence (Pa)
    pub reduced_modulus_pa: f64,
    /// Local skin buckling stress (Pa)
    pub critical_stress_pa: f64,
    /// General column buckling stress of the panel (Pa)
    pub column_critical_pa: f64,
    /// Iterations the reduction needed
    pub iterations: usize,
    /// Extreme-fiber working stress (Pa)
    pub stress_pa: f64,
    /// Proportional-limit safety margin
    pub safety_margin: f64,
    /// Strength and local buckling assessment
    pub strength: PanelStrengthReport,
    /// Strength satisfied and working stress below the column critical
    pub verdict: bool,
}

/// Size one station end to end.
///
/// Seeds a preliminary panel, iterates the post-buckling reduction to
/// convergence and assesses the converged section against strength and
/// general buckling.
pub fn size_station(
    wing: &WingGeometry,
    material: &Material,
    span_fraction: f64,
    moment_nm: f64,
    settings: &StationSettings,
) -> PanelResult<StationRecord> {
    let mut panel = preliminary_design(wing, span_fraction, moment_nm, settings)?;

    let summary = iterate(&mut panel, material, moment_nm, &settings.iteration)?;

    let reduced_area = panel.reduced_area()?;
    let reduced_inertia = panel.reduced_inertia()?;

    let column_critical = general_panel_buckling(
        reduced_area,
        reduced_inertia,
        summary.reduced_modulus_pa,
        settings.panel_length_m,
        settings.iteration.boundary_condition,
    )?;

    let stress = extreme_fiber_stress(&panel, moment_nm)?;
    let strength = check_panel_strength(&panel, material, moment_nm)?;

    let verdict = strength.satisfied && stress.abs() < column_critical;

    info!(
        span_fraction,
        stress_mpa = stress / 1e6,
        margin = strength.proportional.margin,
        verdict,
        "station sized"
    );

    Ok(StationRecord {
        span_fraction,
        z_m: wing.absolute_position_m(span_fraction)?,
        moment_nm,
        skin_thickness_m: panel.skin_thickness_m,
        stringer_count: panel.stringer_count(),
        stringer_spacing_m: panel.stringer_spacing_m,
        effective_width_m: summary.effective_width_m,
        rho: summary.rho,
        reduced_area_m2: reduced_area,
        reduced_inertia_m4: reduced_inertia,
        reduced_modulus_pa: summary.reduced_modulus_pa,
        critical_stress_pa: summary.critical_stress_pa,
        column_critical_pa: column_critical,
        iterations: summary.iterations,
        stress_pa: stress,
        safety_margin: strength.proportional.margin,
        strength,
        verdict,
    })
}

/// Result of one station inside a batch run.
#[derive(Debug)]
pub struct StationOutcome {
    /// Station position as a span fraction
    pub span_fraction: f64,
    /// Sized record or the error that stopped this station
    pub result: PanelResult<StationRecord>,
}

/// Size a list of stations sequentially.
///
/// A failed station is recorded and the batch continues; the caller
/// decides what a partial batch means.
pub fn size_stations(
    wing: &WingGeometry,
    material: &Material,
    stations: &[(f64, f64)],
    settings: &StationSettings,
) -> Vec<StationOutcome> {
    stations
        .iter()
        .map(|&(span_fraction, moment_nm)| {
            let result = size_station(wing, material, span_fraction, moment_nm, settings);
            if let Err(err) = &result {
                warn!(span_fraction, error = %err, "station sizing failed");
            }
            StationOutcome {
                span_fraction,
                result,
            }
        })
        .collect()
}
