//! Tests for `#[derive(Resolvable)]`.

use asset_profile::resolve::{ResolutionContext, TypeRegistry};
use asset_profile::{PluginRegistry, Resolvable, ResolvingDecoder};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Resolvable)]
#[resolvable(name = "acme.PowerProfile")]
struct PowerProfile {
    label: String,
    circuits: u8,
}

fn cooling_context() -> ResolutionContext {
    TypeRegistry::builder()
        .register::<CoolingProfile>()
        .build()
        .map(TypeRegistry::into_context)
        .unwrap_or_else(|_| TypeRegistry::empty().into_context())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Resolvable)]
#[resolvable(name = "acme.CoolingProfile", home = "cooling_context")]
struct CoolingProfile {
    label: String,
}

#[test]
fn test_derived_names() {
    assert_eq!(<PowerProfile as asset_profile::resolve::Resolvable>::type_name(), "acme.PowerProfile");
    assert!(<PowerProfile as asset_profile::resolve::Resolvable>::home_context().is_none());
}

#[test]
fn test_derived_type_registers_as_plugin() {
    let plugins = PluginRegistry::new();
    assert!(plugins.register::<PowerProfile>().is_ok());

    let decoder = ResolvingDecoder::any(plugins.snapshot());
    let object = decoder
        .decode_str("!acme.PowerProfile {label: p, circuits: 2}")
        .unwrap();

    assert_eq!(
        object.downcast::<PowerProfile>(),
        Some(PowerProfile {
            label: "p".into(),
            circuits: 2
        })
    );
}

#[test]
fn test_derived_home_context() {
    let decoder = ResolvingDecoder::<CoolingProfile>::new().unwrap();
    let cooling = decoder.decode_str("!acme.CoolingProfile {label: c}").unwrap();
    assert_eq!(cooling.label, "c");
}
