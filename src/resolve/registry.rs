//! Immutable type registries.

use std::collections::BTreeMap;

use super::{Resolvable, ResolutionContext, TypeDescriptor, TypeResolver};
use crate::{Error, Result};

/// An immutable `name -> TypeDescriptor` map.
///
/// A registry can be layered over a parent context: names are looked up here
/// first, then in the parent. This is how a plugin's types are made visible
/// next to the built-in ones without touching the built-in context.
///
/// ## Example
///
/// ```rust
/// use asset_profile::{Profile, builtin_context};
/// use asset_profile::resolve::{Resolvable, TypeRegistry};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Serialize, Deserialize)]
/// # struct RackProfile { rack_units: u32 }
/// # impl Resolvable for RackProfile {
/// #     fn type_name() -> &'static str { "acme.RackProfile" }
/// # }
///
/// let plugin = TypeRegistry::builder()
///     .register::<RackProfile>()
///     .parent(builtin_context())
///     .build()
///     .unwrap();
///
/// assert!(plugin.contains("acme.RackProfile"));
/// assert!(plugin.contains(Profile::type_name()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDescriptor>,
    parent: Option<ResolutionContext>,
}

impl TypeRegistry {
    /// Creates a registry builder.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Creates a registry that resolves nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a registry from descriptors whose names are known to be unique.
    pub(crate) fn from_descriptors(
        descriptors: impl IntoIterator<Item = TypeDescriptor>,
        parent: Option<ResolutionContext>,
    ) -> Self {
        let types = descriptors
            .into_iter()
            .map(|d| (d.name().to_string(), d))
            .collect();
        Self { types, parent }
    }

    /// Returns `true` if `name` resolves here or in the parent.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Returns the number of types registered directly in this registry.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered directly in this registry.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the parent context, if any.
    pub fn parent(&self) -> Option<&ResolutionContext> {
        self.parent.as_ref()
    }

    /// Wraps this registry in a [`ResolutionContext`].
    pub fn into_context(self) -> ResolutionContext {
        ResolutionContext::new(self)
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        match self.types.get(name) {
            Some(descriptor) => Some(descriptor.clone()),
            None => self.parent.as_ref().and_then(|p| p.resolve(name)),
        }
    }

    fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        if let Some(ref parent) = self.parent {
            for name in parent.type_names() {
                if !self.types.contains_key(&name) {
                    names.push(name);
                }
            }
        }
        names.sort();
        names
    }
}

/// Builder for [`TypeRegistry`].
///
/// Registration never fails eagerly; duplicate or malformed names are
/// reported together by [`build`](TypeRegistryBuilder::build).
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: BTreeMap<String, TypeDescriptor>,
    problems: Vec<String>,
    parent: Option<ResolutionContext>,
}

impl TypeRegistryBuilder {
    /// Registers `T` under its own type name.
    #[must_use]
    pub fn register<T: Resolvable>(self) -> Self {
        self.descriptor(TypeDescriptor::of::<T>())
    }

    /// Registers `T` under `name`, e.g. to keep an old name working.
    #[must_use]
    pub fn register_as<T: Resolvable>(self, name: impl Into<String>) -> Self {
        self.descriptor(TypeDescriptor::named::<T>(name.into()))
    }

    /// Registers a prepared descriptor.
    #[must_use]
    pub fn descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        let name = descriptor.name().to_string();
        if let Err(problem) = validate_type_name(&name) {
            self.problems.push(problem);
        } else if self.types.contains_key(&name) {
            self.problems.push(format!("type `{}` is registered twice", name));
        } else {
            self.types.insert(name, descriptor);
        }
        self
    }

    /// Sets the context consulted for names not registered here.
    #[must_use]
    pub fn parent(mut self, parent: ResolutionContext) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Finishes the registry.
    ///
    /// # Errors
    ///
    /// Returns an `Initialization` error if any name was registered twice or
    /// is not a valid type name.
    pub fn build(self) -> Result<TypeRegistry> {
        if !self.problems.is_empty() {
            return Err(Error::initialization(self.problems.join("; ")));
        }
        Ok(TypeRegistry {
            types: self.types,
            parent: self.parent,
        })
    }
}

/// Type names must be non-empty, free of whitespace and `!`, and contain a
/// `.` so they cannot be mistaken for enum variant tags.
pub(crate) fn validate_type_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("type name cannot be empty".to_string());
    }
    if let Some(c) = name.chars().find(|c| c.is_whitespace() || *c == '!') {
        return Err(format!("type name `{}` contains invalid character {:?}", name, c));
    }
    if !name.contains('.') || name.starts_with('.') || name.ends_with('.') {
        return Err(format!(
            "type name `{}` must be namespaced, as in `vendor.{}`",
            name,
            name.trim_matches('.')
        ));
    }
    Ok(())
}
