//! Prelude module for convenient imports.
//!
//! ```rust
//! use asset_profile::prelude::*;
//! ```
//!
//! This provides access to:
//! - Profile types and the loader
//! - Decoder and resolution context types
//! - Error types
//! - Provision request verification

pub use crate::{
    config::{DecodeConfig, LoaderConfig},
    decoder::{AnyObject, ResolvingDecoder},
    error::{Error, ErrorKind, RequestRejected, Result},
    loader::ProfileLoader,
    resolve::{PluginRegistry, Resolvable, ResolutionContext, TypeRegistry},
    types::{AllowedClasses, Profile, ProfileCatalog, ProvisionerProfile, builtin_context},
    verify::{ProvisionRequest, verify},
};
