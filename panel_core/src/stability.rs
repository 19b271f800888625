//! # Stability Calculator
//!
//! Critical buckling stresses for the three instability modes of a
//! stiffened panel:
//!
//! - local buckling of a skin bay between stringers,
//! - local buckling of an individual stringer plate element,
//! - general (column) buckling of the panel as an equivalent strut.
//!
//! The plate modes share the Euler plate form
//! σ_cr = k·π²·E / (12·(1−ν²)) · (t/b)², with k selected from a fixed
//! coefficient table per boundary condition or element role. All functions
//! here are pure and stateless; the reduction engine calls them repeatedly.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::materials::Material;
//! use panel_core::stability::{local_skin_buckling, BoundaryCondition};
//!
//! let mat = Material::v95t1_sheet();
//! let sigma_cr =
//!     local_skin_buckling(0.002, 0.15, &mat, BoundaryCondition::Hinged).unwrap();
//! assert!(sigma_cr > 0.0);
//! ```

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{PanelError, PanelResult};
use crate::materials::Material;
use crate::section::{Stringer, StringerKind};

/// Edge support assumed for a plate bay or panel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Both edges/ends simply supported
    Hinged,
    /// Both edges/ends clamped
    Clamped,
    /// One edge/end clamped, the other simply supported
    Mixed,
    /// One end clamped, the other free (column mode only)
    Cantilever,
}

impl BoundaryCondition {
    /// Plate buckling coefficient k for a skin bay.
    ///
    /// The cantilever case has no plate-bay interpretation and is rejected.
    pub fn plate_coefficient(&self) -> PanelResult<f64> {
        match self {
            BoundaryCondition::Hinged => Ok(4.0),
            BoundaryCondition::Clamped => Ok(6.97),
            BoundaryCondition::Mixed => Ok(5.0),
            BoundaryCondition::Cantilever => Err(PanelError::InvalidBoundaryCondition {
                value: "cantilever".to_string(),
            }),
        }
    }

    /// Effective-length (end fixity) factor μ for column buckling.
    pub fn end_fixity_factor(&self) -> f64 {
        match self {
            BoundaryCondition::Hinged => 1.0,
            BoundaryCondition::Clamped => 0.5,
            BoundaryCondition::Mixed => 0.7,
            BoundaryCondition::Cantilever => 2.0,
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hinged" => Ok(BoundaryCondition::Hinged),
            "clamped" => Ok(BoundaryCondition::Clamped),
            "mixed" => Ok(BoundaryCondition::Mixed),
            "cantilever" => Ok(BoundaryCondition::Cantilever),
            other => Err(PanelError::InvalidBoundaryCondition {
                value: other.to_string(),
            }),
        }
    }
}

/// Role a plate element plays inside a stringer cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// Web between two flanges (both edges restrained)
    Web,
    /// Flange supported along both edges
    FlangeInternal,
    /// Free flange outstand (cantilever plate)
    FlangeFree,
    /// Flange of a Z-profile
    FlangeZ,
}

impl ElementRole {
    /// Plate buckling coefficient k for this element role.
    pub fn plate_coefficient(&self) -> f64 {
        match self {
            ElementRole::Web => 6.97,
            ElementRole::FlangeInternal => 4.0,
            ElementRole::FlangeFree => 0.43,
            ElementRole::FlangeZ => 0.425,
        }
    }

    /// Parse an element role, falling back to the Z-flange coefficient for
    /// unrecognized names.
    ///
    /// The Z-flange coefficient is the lowest in the table, so the fallback
    /// is conservative; it is signalled at warning level rather than
    /// treated as a hard error.
    pub fn parse_lossy(s: &str) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(_) => {
                warn!(
                    element_type = s,
                    "unrecognized stringer element role, defaulting to flange_z coefficient"
                );
                ElementRole::FlangeZ
            }
        }
    }

    /// Flange role implied by a stringer shape.
    ///
    /// The channel's free flange edge is simplified to an internal flange,
    /// matching the tee.
    pub fn flange_role_for(kind: StringerKind) -> Self {
        match kind {
            StringerKind::Z => ElementRole::FlangeZ,
            StringerKind::C | StringerKind::T => ElementRole::FlangeInternal,
            StringerKind::L => ElementRole::FlangeFree,
        }
    }
}

impl FromStr for ElementRole {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(ElementRole::Web),
            "flange_internal" => Ok(ElementRole::FlangeInternal),
            "flange_free" => Ok(ElementRole::FlangeFree),
            "flange_z" => Ok(ElementRole::FlangeZ),
            other => Err(PanelError::invalid_geometry(
                "element_role",
                other,
                "Unknown stringer element role",
            )),
        }
    }
}

/// Euler plate buckling stress: σ_cr = k·π²·E / (12·(1−ν²)) · (t/b)².
fn plate_buckling_stress(k: f64, material: &Material, thickness_m: f64, width_m: f64) -> f64 {
    let e = material.young_modulus_pa;
    let nu = material.poisson_ratio;
    k * PI.powi(2) * e / (12.0 * (1.0 - nu.powi(2))) * (thickness_m / width_m).powi(2)
}

/// Critical stress for local buckling of one skin bay between stringers.
///
/// `spacing_m` is the bay width (stringer pitch). Monotonically increasing
/// in thickness and decreasing in spacing for a fixed material.
pub fn local_skin_buckling(
    thickness_m: f64,
    spacing_m: f64,
    material: &Material,
    boundary: BoundaryCondition,
) -> PanelResult<f64> {
    let k = boundary.plate_coefficient()?;

    if thickness_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "thickness_m",
            thickness_m.to_string(),
            "Skin thickness must be positive",
        ));
    }
    if spacing_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "spacing_m",
            spacing_m.to_string(),
            "Stringer spacing must be positive",
        ));
    }

    Ok(plate_buckling_stress(k, material, thickness_m, spacing_m))
}

/// Critical stress for local buckling of one stringer plate element
/// (web or flange).
pub fn local_stringer_element_buckling(
    element_width_m: f64,
    element_thickness_m: f64,
    material: &Material,
    role: ElementRole,
) -> PanelResult<f64> {
    if element_width_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "element_width_m",
            element_width_m.to_string(),
            "Element width must be positive",
        ));
    }
    if element_thickness_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "element_thickness_m",
            element_thickness_m.to_string(),
            "Element thickness must be positive",
        ));
    }

    Ok(plate_buckling_stress(
        role.plate_coefficient(),
        material,
        element_thickness_m,
        element_width_m,
    ))
}

/// Critical stress for general buckling of the panel as an equivalent
/// column.
///
/// Euler column form with the effective radius of gyration r = √(I/A),
/// effective slenderness λ = μ·L/r and σ_cr = π²·E_red / λ².
pub fn general_panel_buckling(
    effective_area_m2: f64,
    effective_inertia_m4: f64,
    reduced_modulus_pa: f64,
    panel_length_m: f64,
    boundary: BoundaryCondition,
) -> PanelResult<f64> {
    if effective_area_m2 <= 0.0 {
        return Err(PanelError::invalid_section(
            "effective_area_m2",
            effective_area_m2,
        ));
    }
    if effective_inertia_m4 <= 0.0 {
        return Err(PanelError::invalid_section(
            "effective_inertia_m4",
            effective_inertia_m4,
        ));
    }
    if panel_length_m <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "panel_length_m",
            panel_length_m.to_string(),
            "Panel length must be positive",
        ));
    }
    if reduced_modulus_pa <= 0.0 {
        return Err(PanelError::invalid_geometry(
            "reduced_modulus_pa",
            reduced_modulus_pa.to_string(),
            "Reduced modulus must be positive",
        ));
    }

    let radius = (effective_inertia_m4 / effective_area_m2).sqrt();
    let slenderness = boundary.end_fixity_factor() * panel_length_m / radius;

    Ok(PI.powi(2) * reduced_modulus_pa / slenderness.powi(2))
}

/// Buckling audit for one stringer element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementCheck {
    /// Element role in the cross-section
    pub role: ElementRole,
    /// Critical buckling stress (Pa)
    pub critical_stress_pa: f64,
    /// Working stress below the critical stress
    pub safe: bool,
    /// Critical / working stress ratio (infinite for near-zero stress)
    pub safety_margin: f64,
}

/// Per-element local buckling audit of a stringer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringerBucklingReport {
    /// Web check
    pub web: ElementCheck,
    /// Flange check, with the role implied by the stringer shape
    pub flange: ElementCheck,
    /// All elements stable at the working stress
    pub overall_safe: bool,
}

fn element_check(
    width_m: f64,
    thickness_m: f64,
    material: &Material,
    role: ElementRole,
    stress_pa: f64,
) -> PanelResult<ElementCheck> {
    let critical = local_stringer_element_buckling(width_m, thickness_m, material, role)?;
    let stress = stress_pa.abs();
    let margin = if stress > 1e-6 {
        critical / stress
    } else {
        f64::INFINITY
    };
    Ok(ElementCheck {
        role,
        critical_stress_pa: critical,
        safe: stress < critical,
        safety_margin: margin,
    })
}

/// Check every plate element of a stringer against a working stress.
pub fn check_stringer_local_buckling(
    stringer: &Stringer,
    material: &Material,
    stress_pa: f64,
) -> PanelResult<StringerBucklingReport> {
    let web = element_check(
        stringer.web_height_m,
        stringer.web_thickness_m,
        material,
        ElementRole::Web,
        stress_pa,
    )?;
    let flange = element_check(
        stringer.flange_width_m,
        stringer.flange_thickness_m,
        material,
        ElementRole::flange_role_for(stringer.kind),
        stress_pa,
    )?;

    let overall_safe = web.safe && flange.safe;
    Ok(StringerBucklingReport {
        web,
        flange,
        overall_safe,
    })
}
