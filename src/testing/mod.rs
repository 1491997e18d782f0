//! Testing utilities.
//!
//! - [`fixtures`]: sample profile documents
//! - [`CountingResolver`]: a resolver that records every lookup
//!
//! ## Quick Start
//!
//! ```rust
//! use asset_profile::{Profile, ResolvingDecoder, builtin_context};
//! use asset_profile::testing::{CountingResolver, fixtures};
//!
//! let resolver = CountingResolver::new(builtin_context());
//! let decoder = ResolvingDecoder::<Profile>::with_context(Some(resolver.context())).unwrap();
//!
//! decoder.decode_str(fixtures::TAGGED_PROFILE).unwrap();
//! assert_eq!(resolver.lookup_count("asset.Profile"), 1);
//! ```

mod counting;
pub mod fixtures;

pub use counting::CountingResolver;
