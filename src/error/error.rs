//! Main error type for profile loading.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use super::ErrorKind;

/// The primary error type for profile loading operations.
///
/// `Error` provides rich context for debugging and error handling:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`document()`](Error::document): The document being loaded, if any
/// - [`root_kind()`](Error::root_kind): The innermost kind in the source chain
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── document: Option         (path of the document being decoded)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use asset_profile::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::NotFound => eprintln!("check the path: {}", err),
///         ErrorKind::Initialization => eprintln!("deployment bug: {}", err),
///         ErrorKind::Decode if err.root_kind() == ErrorKind::TypeResolution => {
///             eprintln!("document references an unregistered type: {}", err)
///         }
///         _ => eprintln!("cannot load profile: {}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// The document this error was raised for.
    document: Option<PathBuf>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use asset_profile::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Decode, "expected a mapping");
    /// assert_eq!(err.kind(), ErrorKind::Decode);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            document: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::NotFound => "input not found",
            ErrorKind::Initialization => "decoder could not be initialized",
            ErrorKind::TypeResolution => "type could not be resolved",
            ErrorKind::Decode => "document could not be decoded",
            ErrorKind::Io => "input could not be read",
            ErrorKind::Verification => "request does not satisfy profile",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message, without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the path of the document this error was raised for, if known.
    #[inline]
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// Returns the kind of the innermost `Error` in the source chain.
    ///
    /// A tag that fails to resolve during decode surfaces as
    /// `ErrorKind::Decode`; this returns `ErrorKind::TypeResolution` for it.
    ///
    /// ```rust
    /// use asset_profile::{Error, ErrorKind};
    ///
    /// let inner = Error::type_resolution("no type named `acme.Rack`");
    /// let outer = Error::decode("cannot decode document").with_source(inner);
    /// assert_eq!(outer.kind(), ErrorKind::Decode);
    /// assert_eq!(outer.root_kind(), ErrorKind::TypeResolution);
    /// ```
    pub fn root_kind(&self) -> ErrorKind {
        let mut kind = self.kind;
        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            if let Some(ours) = err.downcast_ref::<Error>() {
                kind = ours.kind;
            }
            current = err.source();
        }
        kind
    }

    /// Returns `true` if this error is generally safe to retry.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the document path for this error.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document = Some(path.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates a not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates an initialization error.
    pub fn initialization(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Initialization, message)
    }

    /// Creates a type resolution error.
    pub fn type_resolution(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TypeResolution, message)
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Creates a verification error.
    pub fn verification(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Verification, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref document) = self.document {
            write!(f, " (document: {})", document.display())?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// Implement From for common error types

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Io,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        let message = match err.location() {
            Some(at) => format!("{} (line {}, column {})", err, at.line(), at.column()),
            None => err.to_string(),
        };
        Error::decode(message).with_source(err)
    }
}
