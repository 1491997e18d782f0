//! Loader configuration.

use super::DecodeConfig;
use crate::resolve::ResolutionContext;

/// Configuration for a [`ProfileLoader`](crate::ProfileLoader).
///
/// ## Default Values
///
/// - `context`: none (each profile type's home context is used)
/// - `privileged`: strict
/// - `provisioner`: tolerant
/// - `catalog`: tolerant
///
/// ## Example
///
/// ```rust
/// use asset_profile::{DecodeConfig, LoaderConfig, builtin_context};
///
/// let config = LoaderConfig::builder()
///     .context(builtin_context())
///     .provisioner(DecodeConfig::strict())
///     .build();
/// assert!(config.context.is_some());
/// assert!(config.provisioner.strict);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct LoaderConfig {
    /// Context used instead of each type's home context.
    pub context: Option<ResolutionContext>,

    /// Decode settings for [`Profile`](crate::Profile) documents.
    #[builder(default = DecodeConfig::strict())]
    pub privileged: DecodeConfig,

    /// Decode settings for [`ProvisionerProfile`](crate::ProvisionerProfile) documents.
    #[builder(default = DecodeConfig::tolerant())]
    pub provisioner: DecodeConfig,

    /// Decode settings for [`ProfileCatalog`](crate::ProfileCatalog) documents.
    #[builder(default = DecodeConfig::tolerant())]
    pub catalog: DecodeConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
