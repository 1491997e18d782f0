//! Error kind enumeration for categorizing load failures.

/// Categorization of profile loading errors.
///
/// This enum provides a stable interface for matching on error types, so a
/// caller can decide between fixing the input, fixing the deployment, or
/// giving up.
///
/// ## What To Do
///
/// | ErrorKind        | Retriable | Action                                  |
/// |------------------|-----------|-----------------------------------------|
/// | `NotFound`       | No        | Fix the path                            |
/// | `Initialization` | No        | Fix the resolution context / root type  |
/// | `TypeResolution` | No        | Register the type or fix the document   |
/// | `Decode`         | No        | Fix the document                        |
/// | `Io`             | No        | Inspect the underlying I/O error        |
/// | `Verification`   | No        | Fix the provision request               |
///
/// Nothing in this crate retries. `is_retriable()` exists so callers can
/// write policy against a stable predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input path was absent or does not exist.
    ///
    /// Raised before any decode attempt.
    #[error("not found")]
    NotFound,

    /// The decoder could not be set up.
    ///
    /// A resolution context was missing, or the root type has no home
    /// context of its own. This is a programming or deployment bug.
    #[error("initialization error")]
    Initialization,

    /// A type name could not be mapped through the bound resolution context.
    ///
    /// Usually means the document was written for a different set of
    /// registered (plugin) types than the running process has.
    #[error("type resolution error")]
    TypeResolution,

    /// The document is malformed, has unknown keys on the strict path, or a
    /// nested type failed to resolve.
    ///
    /// When the cause is a type lookup, the `TypeResolution` error is
    /// attached as the source. See [`Error::root_kind`](crate::Error::root_kind).
    #[error("decode error")]
    Decode,

    /// Reading the input failed for a reason other than it being absent.
    #[error("I/O error")]
    Io,

    /// A provision request does not satisfy a profile's requirements.
    #[error("verification failed")]
    Verification,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// Every failure here is caused by input or configuration, so this is
    /// always `false`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        false
    }

    /// Returns `true` if the failure points at the caller's setup rather
    /// than at the document being loaded.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, ErrorKind::Initialization)
    }
}
