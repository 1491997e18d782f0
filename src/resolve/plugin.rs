//! Runtime plugin registration.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::registry::validate_type_name;
use super::{Resolvable, ResolutionContext, TypeDescriptor, TypeRegistry};
use crate::{Error, Result};

/// A registry plugins add types to while the process runs.
///
/// `PluginRegistry` is not itself a [`TypeResolver`](super::TypeResolver):
/// decoders are bound to immutable contexts, so the only way to hand its
/// contents to a decoder is [`snapshot`](PluginRegistry::snapshot). Types
/// registered after a snapshot is taken are not visible through it.
///
/// ## Example
///
/// ```rust
/// use asset_profile::builtin_context;
/// use asset_profile::resolve::{PluginRegistry, Resolvable};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Serialize, Deserialize)]
/// # struct GpuProfile { cards: u32 }
/// # impl Resolvable for GpuProfile {
/// #     fn type_name() -> &'static str { "ml.GpuProfile" }
/// # }
///
/// let plugins = PluginRegistry::with_parent(builtin_context());
/// plugins.register::<GpuProfile>().unwrap();
///
/// let context = plugins.snapshot();
/// assert!(context.resolve("ml.GpuProfile").is_some());
/// ```
#[derive(Debug, Default)]
pub struct PluginRegistry {
    types: RwLock<BTreeMap<String, TypeDescriptor>>,
    parent: Option<ResolutionContext>,
}

impl PluginRegistry {
    /// Creates an empty plugin registry with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty plugin registry layered over `parent`.
    pub fn with_parent(parent: ResolutionContext) -> Self {
        Self {
            types: RwLock::new(BTreeMap::new()),
            parent: Some(parent),
        }
    }

    /// Registers `T` under its own type name.
    ///
    /// # Errors
    ///
    /// Returns an `Initialization` error if the name is already registered
    /// here or is not a valid type name.
    pub fn register<T: Resolvable>(&self) -> Result<()> {
        self.insert(TypeDescriptor::of::<T>())
    }

    /// Registers `T` under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`register`](PluginRegistry::register).
    pub fn register_as<T: Resolvable>(&self, name: impl Into<String>) -> Result<()> {
        self.insert(TypeDescriptor::named::<T>(name.into()))
    }

    fn insert(&self, descriptor: TypeDescriptor) -> Result<()> {
        validate_type_name(descriptor.name()).map_err(Error::initialization)?;

        let mut types = self.types.write();
        if types.contains_key(descriptor.name()) {
            return Err(Error::initialization(format!(
                "type `{}` is already registered",
                descriptor.name()
            )));
        }
        tracing::debug!(
            type_name = descriptor.name(),
            rust_type = descriptor.rust_name(),
            "registered plugin type"
        );
        types.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// Removes `name`. Returns `true` if it was registered.
    ///
    /// Snapshots taken earlier keep resolving it.
    pub fn unregister(&self, name: &str) -> bool {
        self.types.write().remove(name).is_some()
    }

    /// Returns `true` if `name` is registered here (the parent is not consulted).
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Returns the number of types registered here.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Returns `true` if nothing is registered here.
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Freezes the current registrations into an immutable context.
    pub fn snapshot(&self) -> ResolutionContext {
        let types = self.types.read();
        TypeRegistry::from_descriptors(types.values().cloned(), self.parent.clone()).into_context()
    }
}
