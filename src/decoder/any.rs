//! Roots whose type is not known ahead of time.

use std::any::Any;
use std::fmt;

use serde_yaml::Value;

/// The result of decoding with root type "any object".
///
/// ```rust
/// use asset_profile::{AnyObject, Profile, ResolvingDecoder, builtin_context};
///
/// let decoder = ResolvingDecoder::any(builtin_context());
///
/// let typed = decoder.decode_str("!asset.Profile {label: Web, prefix: web}").unwrap();
/// assert_eq!(typed.type_name(), Some("asset.Profile"));
/// let profile = typed.downcast::<Profile>().unwrap();
/// assert_eq!(profile.label(), "Web");
///
/// let plain = decoder.decode_str("just: data").unwrap();
/// assert!(matches!(plain, AnyObject::Untyped(_)));
/// ```
#[derive(Debug)]
pub enum AnyObject {
    /// The root was tagged and built through its descriptor.
    Typed(TypedObject),
    /// The root was untagged. Nested tags are already resolved.
    Untyped(Value),
}

impl AnyObject {
    /// Returns the resolved type name of a tagged root.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            AnyObject::Typed(object) => Some(object.type_name()),
            AnyObject::Untyped(_) => None,
        }
    }

    /// Returns `true` if the root was built as a `T`.
    pub fn is<T: Any>(&self) -> bool {
        match self {
            AnyObject::Typed(object) => object.is::<T>(),
            AnyObject::Untyped(_) => false,
        }
    }

    /// Takes the root out as a `T`. Returns `None` for any other type and
    /// for untagged roots.
    pub fn downcast<T: Any>(self) -> Option<T> {
        match self {
            AnyObject::Typed(object) => object.downcast::<T>().ok(),
            AnyObject::Untyped(_) => None,
        }
    }

    /// Returns the value of an untagged root.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            AnyObject::Typed(_) => None,
            AnyObject::Untyped(value) => Some(value),
        }
    }
}

/// An instance of a type resolved through a context.
pub struct TypedObject {
    type_name: String,
    rust_name: &'static str,
    inner: Box<dyn Any + Send + Sync>,
}

impl TypedObject {
    pub(crate) fn new(
        type_name: impl Into<String>,
        rust_name: &'static str,
        inner: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            rust_name,
            inner,
        }
    }

    /// Returns the name the document's tag resolved to.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns `true` if the instance is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the instance as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Takes the instance out as a `T`, or gives `self` back.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let Self {
            type_name,
            rust_name,
            inner,
        } = self;
        match inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self {
                type_name,
                rust_name,
                inner,
            }),
        }
    }
}

impl fmt::Debug for TypedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedObject")
            .field("type_name", &self.type_name)
            .field("rust_name", &self.rust_name)
            .finish_non_exhaustive()
    }
}
