//! Loadable type descriptors.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;

use serde_yaml::Value;

use super::Resolvable;
use crate::Error;
use crate::decoder::{FieldPath, deserialize_tracked};

type DecodeFn = fn(&Value) -> Result<(Box<dyn Any + Send + Sync>, Vec<FieldPath>), Error>;

/// Everything the decoder needs to build one registered type.
///
/// Descriptors are created with [`TypeDescriptor::of`] and are cheap to clone.
///
/// ```rust
/// use asset_profile::{Profile, resolve::{Resolvable, TypeDescriptor}};
///
/// let descriptor = TypeDescriptor::of::<Profile>();
/// assert_eq!(descriptor.name(), Profile::type_name());
/// assert!(descriptor.is::<Profile>());
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    rust_name: &'static str,
    type_id: TypeId,
    decode: DecodeFn,
}

impl TypeDescriptor {
    /// Describes `T` under its own [`Resolvable::type_name`].
    pub fn of<T: Resolvable>() -> Self {
        Self::named::<T>(T::type_name())
    }

    /// Describes `T` under an alternate name.
    pub fn named<T: Resolvable>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            rust_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            decode: decode_erased::<T>,
        }
    }

    /// Returns the name documents use for this type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the Rust type name, for diagnostics.
    #[inline]
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if this descriptor builds a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Builds the described type from an untagged node, returning the
    /// document keys it has no field for.
    pub(crate) fn decode(
        &self,
        node: &Value,
    ) -> Result<(Box<dyn Any + Send + Sync>, Vec<FieldPath>), Error> {
        (self.decode)(node)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("rust_name", &self.rust_name)
            .finish()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_id == other.type_id
    }
}

impl Eq for TypeDescriptor {}

/// Decodes `node` as a `T` and reports the keys `T` did not consume.
///
/// `node` must not contain type tags any more.
pub(crate) fn decode_as<T: Resolvable>(node: &Value) -> Result<(T, Vec<FieldPath>), Error> {
    deserialize_tracked::<T>(node).map_err(|err| {
        Error::decode(format!("cannot build `{}`: {}", T::type_name(), err)).with_source(err)
    })
}

fn decode_erased<T: Resolvable>(
    node: &Value,
) -> Result<(Box<dyn Any + Send + Sync>, Vec<FieldPath>), Error> {
    let (instance, unknown) = decode_as::<T>(node)?;
    Ok((Box::new(instance), unknown))
}
