//! Error types for profile loading.
//!
//! The crate provides two main error types:
//! - [`Error`]: Load failures (missing input, bad setup, malformed document)
//! - [`RequestRejected`]: A provision request the profile does not allow
//!
//! ## Key Invariant
//!
//! Loading never validates semantics. A profile whose `requires_pool` is set
//! but whose `pool` is empty still loads; only
//! [`verify`](crate::verify::verify) turns that into a [`RequestRejected`].

#[allow(clippy::module_inception)]
mod error;
mod kind;
mod rejected;

pub use error::Error;
pub use kind::ErrorKind;
pub use rejected::RequestRejected;

/// A specialized `Result` type for profile loading operations.
pub type Result<T> = std::result::Result<T, Error>;
