//! Profile types and the context they resolve in.
//!
//! | Type                   | Tag                         |
//! |------------------------|-----------------------------|
//! | [`Profile`]            | `!asset.Profile`            |
//! | [`ProvisionerProfile`] | `!asset.ProvisionerProfile` |
//! | [`ProfileCatalog`]     | `!asset.ProfileCatalog`     |
//!
//! All three are registered in [`builtin_context`], which is also their
//! home context.

mod catalog;
mod profile;
mod provisioner;

use std::sync::OnceLock;

pub use catalog::ProfileCatalog;
pub use profile::{AllowedClasses, Profile};
pub use provisioner::ProvisionerProfile;

use crate::resolve::{ResolutionContext, TypeDescriptor, TypeRegistry};

/// Returns the context the built-in profile types are registered in.
///
/// Every call returns a handle to the same resolver. Layer plugin types over
/// it with [`TypeRegistryBuilder::parent`](crate::resolve::TypeRegistryBuilder::parent)
/// or [`PluginRegistry::with_parent`](crate::PluginRegistry::with_parent).
pub fn builtin_context() -> ResolutionContext {
    static BUILTIN: OnceLock<ResolutionContext> = OnceLock::new();
    BUILTIN
        .get_or_init(|| {
            TypeRegistry::from_descriptors(
                [
                    TypeDescriptor::of::<Profile>(),
                    TypeDescriptor::of::<ProvisionerProfile>(),
                    TypeDescriptor::of::<ProfileCatalog>(),
                ],
                None,
            )
            .into_context()
        })
        .clone()
}
