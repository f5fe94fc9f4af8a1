use super::SettingsError;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of the factor pattern produced by the symbolic factorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactorVariant {
    /// every row ascending with the diagonal inside
    Plain,
    /// rows split at the diagonal into L and U parts
    #[default]
    Lu,
    /// upper rows of a symmetric matrix with the diagonal stored last
    Cholesky,
}

/// Storage of the L and U parts for [`FactorVariant::Lu`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LuPacking {
    /// two independent row compressed buffers
    #[default]
    Separate,
    /// one shared buffer, L growing from the front and U from the back
    Packed,
}

/// Settings for [`SymbolicFactorizer`](crate::symbolic::SymbolicFactorizer)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SymbolicSettings {
    ///expected ratio of factor to matrix nonzeros.  Sizes the first arena chunk only
    #[builder(default = "5.0")]
    pub fill_ratio: f64,

    ///factor layout
    #[builder(default = "FactorVariant::Lu")]
    pub variant: FactorVariant,

    ///LU buffer layout.  Ignored for the other variants
    #[builder(default = "LuPacking::Separate")]
    pub lu_packing: LuPacking,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///dense row threshold scaling for AMD orderings
    #[builder(default = "1.5")]
    pub amd_dense_scale: f64,
}

impl Default for SymbolicSettings {
    fn default() -> SymbolicSettings {
        SymbolicSettingsBuilder::default().build().unwrap()
    }
}

impl SymbolicSettings {
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_fill_ratio(self.fill_ratio)?;
        validate_amd_dense_scale(self.amd_dense_scale)?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SymbolicSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SymbolicSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl SymbolicSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(fill_ratio) = self.fill_ratio {
            validate_fill_ratio(fill_ratio)?;
        }
        if let Some(scale) = self.amd_dense_scale {
            validate_amd_dense_scale(scale)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_fill_ratio(fill_ratio: f64) -> Result<(), SettingsError> {
    if fill_ratio.is_finite() && fill_ratio > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::BadField("fill_ratio"))
    }
}

fn validate_amd_dense_scale(scale: f64) -> Result<(), SettingsError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::BadField("amd_dense_scale"))
    }
}

#[test]
fn test_settings_validate() {
    let settings = SymbolicSettings::default();
    assert_eq!(settings.fill_ratio, 5.0);
    assert_eq!(settings.variant, FactorVariant::Lu);
    assert_eq!(settings.lu_packing, LuPacking::Separate);
    assert!(!settings.verbose);
    assert!(settings.validate().is_ok());

    assert!(SymbolicSettingsBuilder::default()
        .fill_ratio(0.0)
        .build()
        .is_err());
    assert!(SymbolicSettingsBuilder::default()
        .fill_ratio(f64::NAN)
        .build()
        .is_err());
    assert!(SymbolicSettingsBuilder::default()
        .amd_dense_scale(-1.0)
        .build()
        .is_err());

    let settings = SymbolicSettingsBuilder::default()
        .fill_ratio(1.0)
        .variant(FactorVariant::Cholesky)
        .build()
        .unwrap();
    assert_eq!(settings.variant, FactorVariant::Cholesky);

    // settings with public fields can still be broken after building
    let mut settings = settings;
    settings.fill_ratio = -2.0;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadField("fill_ratio"))
    );
}
