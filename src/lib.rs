//! # asset-profile
//!
//! Loads asset provisioning profiles from YAML, resolving type tags through
//! an explicitly supplied resolution context.
//!
//! ## Quick Start
//!
//! ```rust
//! use asset_profile::prelude::*;
//!
//! let loader = ProfileLoader::new();
//! let profile = loader
//!     .load_privileged_from_reader("label: web\nprefix: w\nrequires_pool: false\n".as_bytes())
//!     .unwrap();
//!
//! assert_eq!(profile.prefix(), "w");
//! assert!(profile.requires_primary_role());
//! assert!(!profile.requires_pool());
//! ```
//!
//! ## Key Concepts
//!
//! - **Explicit contexts**: a [`ResolvingDecoder`] resolves every tag through
//!   the [`ResolutionContext`] it was built with, never a global default. A
//!   plugin's types are decodable only through a context that knows them.
//! - **Strict vs tolerant**: privileged profiles reject unknown keys,
//!   provisioner profiles drop them with a warning. See [`LoaderConfig`].
//! - **Loading ≠ verifying**: the `requires_*` flags are checked against a
//!   provision request by [`verify`](crate::verify::verify), never at load.
//!
//! ## Features
//!
//! - `derive`: `#[derive(Resolvable)]` for plugin types

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// The derive macro names paths as `::asset_profile::...`.
extern crate self as asset_profile;

// Core modules
pub mod config;
pub mod decoder;
pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;
pub mod verify;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use config::{DecodeConfig, LoaderConfig};
pub use decoder::{AnyObject, DecodeRoot, ResolvingDecoder, TypedObject};
pub use error::{Error, ErrorKind, RequestRejected, Result};
pub use loader::ProfileLoader;
pub use resolve::{PluginRegistry, Resolvable, ResolutionContext, TypeRegistry};
pub use types::{AllowedClasses, Profile, ProfileCatalog, ProvisionerProfile, builtin_context};

#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use asset_profile_derive::Resolvable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types_resolve() {
        let context = builtin_context();
        assert!(context.resolve(Profile::type_name()).is_some());
        assert!(context.resolve(ProvisionerProfile::type_name()).is_some());
        assert!(context.resolve(ProfileCatalog::type_name()).is_some());
    }
}
