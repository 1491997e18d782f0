//! Integration tests for asset-profile.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # Include the derive macro tests
//! cargo test --features derive --test integration
//!
//! # With log output
//! RUST_LOG=asset_profile=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod decoder_tests;
#[cfg(feature = "derive")]
mod derive_tests;
mod loader_tests;
mod property_tests;
mod verify_tests;
