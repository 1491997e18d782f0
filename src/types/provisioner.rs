//! Profiles as the provisioner sees them.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::{Profile, builtin_context};
use crate::resolve::{Resolvable, ResolutionContext};

/// A [`Profile`] loaded for the provisioner.
///
/// Same fields and defaults as [`Profile`], registered under its own type
/// name so documents can say which one they carry. Provisioner documents
/// are usually decoded tolerantly; see
/// [`LoaderConfig`](crate::LoaderConfig).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvisionerProfile(Profile);

impl ProvisionerProfile {
    /// Borrows the underlying profile.
    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.0
    }

    /// Takes the underlying profile.
    #[inline]
    pub fn into_profile(self) -> Profile {
        self.0
    }
}

impl Deref for ProvisionerProfile {
    type Target = Profile;

    fn deref(&self) -> &Profile {
        &self.0
    }
}

impl AsRef<Profile> for ProvisionerProfile {
    fn as_ref(&self) -> &Profile {
        &self.0
    }
}

impl From<Profile> for ProvisionerProfile {
    fn from(profile: Profile) -> Self {
        Self(profile)
    }
}

impl From<ProvisionerProfile> for Profile {
    fn from(profile: ProvisionerProfile) -> Self {
        profile.0
    }
}

impl Resolvable for ProvisionerProfile {
    fn type_name() -> &'static str {
        "asset.ProvisionerProfile"
    }

    fn home_context() -> Option<ResolutionContext> {
        Some(builtin_context())
    }
}
