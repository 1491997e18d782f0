//! Type resolution contexts.
//!
//! A document may name the concrete type of any node with a YAML tag:
//!
//! ```yaml
//! web: !acme.RackProfile
//!   label: Web tier
//!   rack_units: 2
//! ```
//!
//! The decoder never maps `acme.RackProfile` to a Rust type on its own. It
//! asks the [`ResolutionContext`] it was built with, which is how types that
//! live in a plugin (and are unknown to this crate) become decodable.
//!
//! - [`Resolvable`]: implemented by every type a context can hand out
//! - [`TypeResolver`]: the `name -> TypeDescriptor` capability
//! - [`ResolutionContext`]: shared, immutable handle to a resolver
//! - [`TypeRegistry`]: immutable resolver, optionally layered over a parent
//! - [`PluginRegistry`]: runtime registration, frozen into snapshots

mod descriptor;
mod plugin;
mod registry;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

pub use descriptor::TypeDescriptor;
pub(crate) use descriptor::decode_as;
pub use plugin::PluginRegistry;
pub use registry::{TypeRegistry, TypeRegistryBuilder};

/// A type that can be named in a document and built by the decoder.
///
/// Type names are namespaced: they contain at least one `.`, as in
/// `acme.RackProfile`. Only tags of that shape are looked up in a context.
/// Any other tag, such as the `!Hdd` serde_yaml writes for an enum variant,
/// is left in place for the type's own `Deserialize` impl.
///
/// ## Example
///
/// ```rust
/// use asset_profile::resolve::{Resolvable, TypeRegistry};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct RackProfile {
///     label: String,
///     rack_units: u32,
/// }
///
/// impl Resolvable for RackProfile {
///     fn type_name() -> &'static str { "acme.RackProfile" }
/// }
///
/// let registry = TypeRegistry::builder().register::<RackProfile>().build().unwrap();
/// assert!(registry.contains("acme.RackProfile"));
/// ```
pub trait Resolvable: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the fully-qualified name documents use to tag this type.
    fn type_name() -> &'static str;

    /// Returns the context this type's own definitions are registered in.
    ///
    /// Types without one can only be decoded through a decoder that was
    /// given a context explicitly.
    fn home_context() -> Option<ResolutionContext> {
        None
    }
}

/// Maps a type name to a loadable [`TypeDescriptor`].
///
/// ## Object Safety
///
/// This trait is object-safe; contexts hold an `Arc<dyn TypeResolver>`.
pub trait TypeResolver: Send + Sync + fmt::Debug {
    /// Looks up `name`. Returns `None` if this resolver does not know it.
    fn resolve(&self, name: &str) -> Option<TypeDescriptor>;

    /// Returns every name this resolver can resolve, for diagnostics.
    fn type_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Shared handle to an immutable [`TypeResolver`].
///
/// Cloning is cheap. A context bound to a decoder stays the same for the
/// decoder's lifetime; to pick up newly registered plugin types, take a new
/// [`PluginRegistry::snapshot`] and build a new decoder.
#[derive(Clone)]
pub struct ResolutionContext {
    inner: Arc<dyn TypeResolver>,
}

impl ResolutionContext {
    /// Wraps a resolver.
    pub fn new<R>(resolver: R) -> Self
    where
        R: TypeResolver + 'static,
    {
        Self {
            inner: Arc::new(resolver),
        }
    }

    /// Wraps an already shared resolver.
    pub fn from_arc(resolver: Arc<dyn TypeResolver>) -> Self {
        Self { inner: resolver }
    }

    /// Looks up `name` in the underlying resolver.
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        self.inner.resolve(name)
    }

    /// Returns every name the underlying resolver can resolve.
    pub fn type_names(&self) -> Vec<String> {
        self.inner.type_names()
    }

    /// Returns `true` if both handles point at the same resolver.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolutionContext").field(&self.inner).finish()
    }
}

impl TypeResolver for ResolutionContext {
    fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        self.inner.resolve(name)
    }

    fn type_names(&self) -> Vec<String> {
        self.inner.type_names()
    }
}

impl From<TypeRegistry> for ResolutionContext {
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl From<Arc<dyn TypeResolver>> for ResolutionContext {
    fn from(resolver: Arc<dyn TypeResolver>) -> Self {
        Self::from_arc(resolver)
    }
}
