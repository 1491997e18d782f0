//! Configuration types for profile loading.
//!
//! This module provides configuration options for:
//! - [`DecodeConfig`]: Strict or tolerant decoding, nesting limit
//! - [`LoaderConfig`]: Resolution context and per-document decode settings

mod decode;
mod loader;

pub use decode::DecodeConfig;
pub use loader::LoaderConfig;
