//! # Materials Database
//!
//! Material definitions for the wing panel sizing pipeline. The reference
//! alloy is V95-T1 (a 7075-class aluminum) in sheet form for skins and
//! extruded profile form for stringers.
//!
//! A [`Material`] is constructed once and read-only thereafter; every stress
//! field is in pascals.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::materials::{Alloy, Material, ProductForm};
//!
//! let skin = Material::from_spec(Alloy::V95T1, ProductForm::Sheet);
//! assert_eq!(skin.young_modulus_pa, 74e9);
//! assert_eq!(skin.yield_strength_pa, 440e6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, PanelResult};

/// Supported alloys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alloy {
    /// V95-T1 high-strength aluminum (7075-class)
    #[serde(rename = "V95-T1")]
    V95T1,
}

/// Product form the alloy is supplied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductForm {
    /// Rolled sheet (skins)
    Sheet,
    /// Extruded profile (stringers)
    Profile,
}

/// Kind of loading a strength allowable applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSense {
    Tension,
    Compression,
    Shear,
}

/// Immutable mechanical properties record.
///
/// Invariant: `0 < proportional_limit_pa <= yield_strength_pa <=
/// ultimate_strength_pa`, enforced by [`Material::new`]. The preset
/// constructors always satisfy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Alloy designation
    pub alloy: Alloy,
    /// Product form (sheet or extruded profile)
    pub product_form: ProductForm,

    /// Elastic modulus E (Pa)
    pub young_modulus_pa: f64,
    /// Shear modulus G (Pa)
    pub shear_modulus_pa: f64,
    /// Poisson ratio ν
    pub poisson_ratio: f64,
    /// Density (kg/m³)
    pub density_kg_m3: f64,

    /// Ultimate strength σᵤ (Pa)
    pub ultimate_strength_pa: f64,
    /// Yield strength σ₀.₂ (Pa)
    pub yield_strength_pa: f64,
    /// Proportional limit σ_pc (Pa) - the strength allowable of the scalar check
    pub proportional_limit_pa: f64,

    /// Allowable tension stress (Pa), design value with margin applied
    pub allowable_tension_pa: f64,
    /// Allowable compression stress (Pa)
    pub allowable_compression_pa: f64,
    /// Allowable shear stress (Pa)
    pub allowable_shear_pa: f64,

    /// Safety factor against ultimate failure
    pub safety_factor_ultimate: f64,
    /// Safety factor against yield
    pub safety_factor_yield: f64,
}

impl Material {
    /// Create a material record, validating the strength ordering invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        alloy: Alloy,
        product_form: ProductForm,
        young_modulus_pa: f64,
        shear_modulus_pa: f64,
        poisson_ratio: f64,
        ultimate_strength_pa: f64,
        yield_strength_pa: f64,
        proportional_limit_pa: f64,
    ) -> PanelResult<Self> {
        if young_modulus_pa <= 0.0 {
            return Err(PanelError::invalid_geometry(
                "young_modulus_pa",
                young_modulus_pa.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if shear_modulus_pa <= 0.0 {
            return Err(PanelError::invalid_geometry(
                "shear_modulus_pa",
                shear_modulus_pa.to_string(),
                "Shear modulus must be positive",
            ));
        }
        if !(0.0..0.5).contains(&poisson_ratio) {
            return Err(PanelError::invalid_geometry(
                "poisson_ratio",
                poisson_ratio.to_string(),
                "Poisson ratio must be in [0, 0.5)",
            ));
        }
        if proportional_limit_pa <= 0.0 {
            return Err(PanelError::invalid_geometry(
                "proportional_limit_pa",
                proportional_limit_pa.to_string(),
                "Proportional limit must be positive",
            ));
        }
        if proportional_limit_pa > yield_strength_pa || yield_strength_pa > ultimate_strength_pa {
            return Err(PanelError::invalid_geometry(
                "yield_strength_pa",
                yield_strength_pa.to_string(),
                "Strengths must satisfy proportional <= yield <= ultimate",
            ));
        }

        Ok(Material {
            alloy,
            product_form,
            young_modulus_pa,
            shear_modulus_pa,
            poisson_ratio,
            density_kg_m3: 2850.0,
            ultimate_strength_pa,
            yield_strength_pa,
            proportional_limit_pa,
            allowable_tension_pa: 350e6,
            allowable_compression_pa: 300e6,
            allowable_shear_pa: 180e6,
            safety_factor_ultimate: 1.5,
            safety_factor_yield: 1.15,
        })
    }

    /// Look up the preset record for an alloy/form pair.
    pub fn from_spec(alloy: Alloy, product_form: ProductForm) -> Self {
        match (alloy, product_form) {
            (Alloy::V95T1, ProductForm::Sheet) => Material::v95t1_sheet(),
            (Alloy::V95T1, ProductForm::Profile) => Material::v95t1_profile(),
        }
    }

    /// V95-T1 rolled sheet (skin material)
    pub fn v95t1_sheet() -> Self {
        let yield_strength_pa = 440e6;
        Material {
            alloy: Alloy::V95T1,
            product_form: ProductForm::Sheet,
            young_modulus_pa: 74e9,
            shear_modulus_pa: 26e9,
            poisson_ratio: 0.32,
            density_kg_m3: 2850.0,
            ultimate_strength_pa: 520e6,
            yield_strength_pa,
            proportional_limit_pa: 0.8 * yield_strength_pa,
            allowable_tension_pa: 350e6,
            allowable_compression_pa: 300e6,
            allowable_shear_pa: 180e6,
            safety_factor_ultimate: 1.5,
            safety_factor_yield: 1.15,
        }
    }

    /// V95-T1 extruded profile (stringer material)
    pub fn v95t1_profile() -> Self {
        let yield_strength_pa = 450e6;
        Material {
            yield_strength_pa,
            proportional_limit_pa: 0.8 * yield_strength_pa,
            product_form: ProductForm::Profile,
            ..Material::v95t1_sheet()
        }
    }

    /// Allowable stress for the given load sense.
    pub fn allowable_stress(&self, sense: LoadSense) -> f64 {
        match sense {
            LoadSense::Tension => self.allowable_tension_pa,
            LoadSense::Compression => self.allowable_compression_pa,
            LoadSense::Shear => self.allowable_shear_pa,
        }
    }

    /// Ultimate design stress: allowable scaled by the ultimate safety factor.
    pub fn ultimate_stress(&self, sense: LoadSense) -> f64 {
        self.allowable_stress(sense) * self.safety_factor_ultimate
    }

    /// Get display name for this material
    pub fn display_name(&self) -> String {
        let form = match self.product_form {
            ProductForm::Sheet => "sheet",
            ProductForm::Profile => "profile",
        };
        format!("V95-T1 ({form})")
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::v95t1_sheet()
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
