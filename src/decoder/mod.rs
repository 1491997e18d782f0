//! The resolving decoder.
//!
//! [`ResolvingDecoder`] parses YAML with `serde_yaml` and builds an instance
//! of its root type. Every type tag met along the way is looked up through
//! the decoder's own [`ResolutionContext`], never through a global default.
//!
//! ## Decoding Order
//!
//! 1. The stream is parsed into a YAML value tree.
//! 2. Tags are resolved bottom-up: each node with a namespaced tag is built
//!    as the type its tag names, validated, and replaced by its untagged
//!    content. Other tags, such as enum variants, are left for serde.
//! 3. The root is built as the decoder's root type.
//!
//! Unknown keys are whatever a type's `Deserialize` impl skips, so aliases
//! and defaulted fields count as known.
//!
//! Any failure aborts the whole decode. No partially built value escapes.

mod any;
mod keys;
mod walk;

use std::io::Read;
use std::marker::PhantomData;

use serde_yaml::Value;

pub use any::{AnyObject, TypedObject};
pub(crate) use keys::{FieldPath, deserialize_tracked};
use walk::{ResolvedRoot, Walk};

use crate::resolve::{Resolvable, ResolutionContext, TypeDescriptor, decode_as};
use crate::{DecodeConfig, Error, Result};

mod sealed {
    use super::{ResolvedRoot, Walk};
    use crate::Result;

    pub trait Sealed: Sized {
        fn from_resolved(root: ResolvedRoot, walk: &mut Walk<'_, Self>) -> Result<Self>;
    }
}

/// A type a [`ResolvingDecoder`] can produce.
///
/// Implemented for every [`Resolvable`] type and for [`AnyObject`].
pub trait DecodeRoot: sealed::Sealed {
    /// Name used for this root in diagnostics.
    fn root_name() -> &'static str;

    /// The context a decoder uses when none is given explicitly.
    fn natural_context() -> Option<ResolutionContext>;
}

impl<T: Resolvable> DecodeRoot for T {
    fn root_name() -> &'static str {
        T::type_name()
    }

    fn natural_context() -> Option<ResolutionContext> {
        T::home_context()
    }
}

impl<T: Resolvable> sealed::Sealed for T {
    fn from_resolved(root: ResolvedRoot, walk: &mut Walk<'_, Self>) -> Result<Self> {
        let value = match root {
            ResolvedRoot::Tagged { descriptor, value } => {
                let (built, value) =
                    walk.decode(descriptor.name(), value, |node| descriptor.decode(node))?;
                match built.downcast::<T>() {
                    Ok(instance) => return Ok(*instance),
                    Err(_) => value,
                }
            },
            ResolvedRoot::Plain(value) => value,
        };
        let (instance, _) = walk.decode(T::type_name(), value, decode_as::<T>)?;
        Ok(instance)
    }
}

impl DecodeRoot for AnyObject {
    fn root_name() -> &'static str {
        "any"
    }

    fn natural_context() -> Option<ResolutionContext> {
        None
    }
}

impl sealed::Sealed for AnyObject {
    fn from_resolved(root: ResolvedRoot, walk: &mut Walk<'_, Self>) -> Result<Self> {
        match root {
            ResolvedRoot::Tagged { descriptor, value } => {
                let (inner, _) =
                    walk.decode(descriptor.name(), value, |node| descriptor.decode(node))?;
                Ok(AnyObject::Typed(TypedObject::new(
                    descriptor.name(),
                    descriptor.rust_name(),
                    inner,
                )))
            },
            ResolvedRoot::Plain(value) => Ok(AnyObject::Untyped(value)),
        }
    }
}

/// Decodes YAML documents into `T`, resolving type tags through an
/// explicitly bound [`ResolutionContext`].
///
/// ## Construction
///
/// | Constructor                 | Context used              | Fails when               |
/// |-----------------------------|---------------------------|--------------------------|
/// | `new()`                     | `T`'s home context        | `T` has no home context  |
/// | `with_context(Some(ctx))`   | `ctx`                     | never                    |
/// | `with_context(None)`        | -                         | always                   |
/// | `any(ctx)`                  | `ctx`, root is any object | never                    |
///
/// Construction failures are `ErrorKind::Initialization`.
///
/// ## Example
///
/// ```rust
/// use asset_profile::{Profile, ResolvingDecoder};
///
/// let decoder = ResolvingDecoder::<Profile>::new().unwrap();
/// let profile = decoder.decode_str("label: Web\nprefix: web\n").unwrap();
/// assert_eq!(profile.prefix(), "web");
/// assert!(profile.requires_primary_role());
/// ```
///
/// ## Concurrency
///
/// A decoder holds only immutable state, and each `decode` call owns its
/// input stream. Sharing one decoder between threads is fine; sharing one
/// stream is not.
#[derive(Debug, Clone)]
pub struct ResolvingDecoder<T = AnyObject> {
    context: ResolutionContext,
    config: DecodeConfig,
    _root: PhantomData<fn() -> T>,
}

impl<T: DecodeRoot> ResolvingDecoder<T> {
    /// Creates a decoder bound to the root type's home context.
    ///
    /// # Errors
    ///
    /// Returns an `Initialization` error if `T` has no home context.
    pub fn new() -> Result<Self> {
        let context = T::natural_context().ok_or_else(|| {
            Error::initialization(format!(
                "root type `{}` has no resolution context of its own; supply one explicitly",
                T::root_name()
            ))
        })?;
        Ok(Self::bind(context))
    }

    /// Creates a decoder bound to `context`.
    ///
    /// # Errors
    ///
    /// Returns an `Initialization` error if `context` is `None`. The decoder
    /// never substitutes a default context for a missing one.
    pub fn with_context(context: Option<ResolutionContext>) -> Result<Self> {
        let context = context.ok_or_else(|| {
            Error::initialization(format!(
                "a resolution context must be provided to decode `{}`",
                T::root_name()
            ))
        })?;
        Ok(Self::bind(context))
    }

    fn bind(context: ResolutionContext) -> Self {
        Self {
            context,
            config: DecodeConfig::default(),
            _root: PhantomData,
        }
    }

    /// Replaces the decode configuration.
    #[must_use]
    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Decodes one YAML document from `reader`.
    ///
    /// `reader` is consumed and dropped before this returns, on every path.
    ///
    /// # Errors
    ///
    /// Returns a `Decode` error for malformed YAML, unknown keys in strict
    /// mode, values of the wrong shape, or tags the context cannot resolve
    /// (the `TypeResolution` error is attached as the source).
    pub fn decode<R: Read>(&self, reader: R) -> Result<T> {
        let document: Value = serde_yaml::from_reader(reader)?;
        self.decode_value(document)
    }

    /// Decodes one YAML document from a string.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](ResolvingDecoder::decode).
    pub fn decode_str(&self, document: &str) -> Result<T> {
        self.decode(document.as_bytes())
    }

    /// Decodes an already parsed YAML value.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](ResolvingDecoder::decode), minus syntax errors.
    pub fn decode_value(&self, document: Value) -> Result<T> {
        tracing::debug!(
            root = T::root_name(),
            strict = self.config.strict,
            "decoding document"
        );

        let mut walk = Walk::new(self);
        let root = walk.resolve_root(document)?;
        let decoded = T::from_resolved(root, &mut walk)?;

        tracing::debug!(
            root = T::root_name(),
            tags_resolved = walk.resolved(),
            fields_dropped = walk.dropped().len(),
            "decoded document"
        );
        Ok(decoded)
    }
}

impl ResolvingDecoder<AnyObject> {
    /// Creates a decoder whose root is "any object", bound to `context`.
    ///
    /// Used when the document's root type is not known ahead of time; a
    /// tagged root comes back as [`AnyObject::Typed`].
    pub fn any(context: ResolutionContext) -> Self {
        Self::bind(context)
    }
}

impl<T> ResolvingDecoder<T> {
    /// Returns the bound resolution context.
    #[inline]
    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Returns the decode configuration.
    #[inline]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Looks `name` up in the bound context.
    ///
    /// # Errors
    ///
    /// Returns a `TypeResolution` error if the context does not know `name`.
    pub fn resolve_type_name(&self, name: &str) -> Result<TypeDescriptor> {
        self.context.resolve(name).ok_or_else(|| {
            let known = self.context.type_names();
            let message = if known.is_empty() {
                format!("no type named `{}` in the resolution context", name)
            } else {
                format!(
                    "no type named `{}` in the resolution context (known: {})",
                    name,
                    known.join(", ")
                )
            };
            Error::type_resolution(message)
        })
    }
}
