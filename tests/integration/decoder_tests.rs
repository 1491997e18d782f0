//! Decoding through explicit resolution contexts.

use std::thread;

use asset_profile::resolve::TypeRegistry;
use asset_profile::testing::{CountingResolver, fixtures};
use asset_profile::{
    AnyObject, DecodeConfig, ErrorKind, PluginRegistry, Profile, ProvisionerProfile,
    ResolvingDecoder, builtin_context,
};

use crate::common::{RackProfile, init_tracing};

#[test]
fn test_decoder_needs_a_context() {
    let err = ResolvingDecoder::<Profile>::with_context(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Initialization);

    let err = ResolvingDecoder::<RackProfile>::new().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Initialization);
    assert!(err.message().contains("acme.RackProfile"));
}

#[test]
fn test_plugin_type_needs_plugin_context() {
    init_tracing();
    let document = "!acme.RackProfile\nlabel: r1\nrack_units: 4\n";

    let builtin = ResolvingDecoder::any(builtin_context());
    let err = builtin.decode_str(document).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.root_kind(), ErrorKind::TypeResolution);

    let plugins = PluginRegistry::with_parent(builtin_context());
    assert!(plugins.register::<RackProfile>().is_ok());
    let decoder = ResolvingDecoder::any(plugins.snapshot());

    let rack = decoder.decode_str(document).unwrap().downcast::<RackProfile>().unwrap();
    assert_eq!(
        rack,
        RackProfile {
            label: "r1".into(),
            rack_units: 4,
            shared: false,
            location: None,
        }
    );

    // Builtin types still resolve through the parent.
    let typed = decoder.decode_str(fixtures::TAGGED_PROFILE).unwrap();
    assert!(typed.is::<Profile>());
}

#[test]
fn test_aliased_and_optional_plugin_fields_decode_strictly() -> anyhow::Result<()> {
    let plugins = PluginRegistry::with_parent(builtin_context());
    plugins.register::<RackProfile>()?;
    let decoder = ResolvingDecoder::any(plugins.snapshot()).with_config(DecodeConfig::strict());

    let rack = decoder
        .decode_str("!acme.RackProfile {label: r1, rack_units: 2, location: ~}")?
        .downcast::<RackProfile>();
    assert_eq!(rack.map(|r| r.location), Some(None));

    let rack = decoder
        .decode_str("!acme.RackProfile {label: r1, rack_units: 2, site: dc1}")?
        .downcast::<RackProfile>();
    assert_eq!(rack.and_then(|r| r.location).as_deref(), Some("dc1"));
    Ok(())
}

#[test]
fn test_snapshot_is_isolated_from_later_registration() {
    let plugins = PluginRegistry::new();
    let before = plugins.snapshot();
    assert!(plugins.register::<RackProfile>().is_ok());

    assert!(before.resolve("acme.RackProfile").is_none());
    assert!(plugins.snapshot().resolve("acme.RackProfile").is_some());
}

#[test]
fn test_duplicate_plugin_registration_fails() {
    let plugins = PluginRegistry::new();
    assert!(plugins.register::<RackProfile>().is_ok());
    let err = plugins.register::<RackProfile>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Initialization);
}

#[test]
fn test_resolve_type_name() {
    let decoder = ResolvingDecoder::<Profile>::new().unwrap();

    let descriptor = decoder.resolve_type_name("asset.ProvisionerProfile").unwrap();
    assert!(descriptor.is::<ProvisionerProfile>());

    let err = decoder.resolve_type_name("acme.RackProfile").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeResolution);
    assert!(err.message().contains("asset.Profile"));
}

#[test]
fn test_every_tag_goes_through_the_bound_context() {
    let counting = CountingResolver::new(builtin_context());
    let decoder = ResolvingDecoder::<asset_profile::ProfileCatalog>::with_context(Some(
        counting.context(),
    ))
    .unwrap();

    let catalog = decoder
        .decode_str("profiles:\n  a: !asset.Profile {label: A}\n  b: !asset.Profile {label: B}\n")
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(counting.lookup_count("asset.Profile"), 2);
    assert_eq!(counting.misses(), 0);
}

#[test]
fn test_nested_unknown_key_reports_path() {
    let context = TypeRegistry::builder()
        .register::<RackProfile>()
        .parent(builtin_context())
        .build()
        .unwrap()
        .into_context();
    let decoder = ResolvingDecoder::<asset_profile::ProfileCatalog>::with_context(Some(context))
        .unwrap()
        .with_config(DecodeConfig::strict());

    let err = decoder
        .decode_str("profiles:\n  web:\n    label: Web\n    colour: blue\n")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.message().contains("profiles.web.colour"));
}

#[test]
fn test_root_tag_of_other_type_is_checked_against_root() {
    let plugins = PluginRegistry::with_parent(builtin_context());
    assert!(plugins.register::<RackProfile>().is_ok());
    let decoder = ResolvingDecoder::<Profile>::with_context(Some(plugins.snapshot())).unwrap();

    // `rack_units` is not a profile field.
    let err = decoder
        .decode_str("!acme.RackProfile {label: r1, rack_units: 2}")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let tolerant = decoder.with_config(DecodeConfig::tolerant());
    let profile = tolerant
        .decode_str("!acme.RackProfile {label: r1, rack_units: 2}")
        .unwrap();
    assert_eq!(profile.label(), "r1");
}

#[test]
fn test_untagged_any_root() {
    let decoder = ResolvingDecoder::any(builtin_context());

    let object = decoder
        .decode_str("inventory:\n  - !asset.Profile {label: A}\n")
        .unwrap();

    let value = object.as_value().unwrap();
    let label = &value["inventory"][0]["label"];
    assert_eq!(label.as_str(), Some("A"));
    assert!(matches!(object, AnyObject::Untyped(_)));
}

#[test]
fn test_decoder_shared_across_threads() {
    let decoder = ResolvingDecoder::<Profile>::new().unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let decoder = &decoder;
                scope.spawn(move || {
                    decoder
                        .decode_str(&format!("label: worker-{}\n", i))
                        .map(|profile| profile.label().to_string())
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let label = handle.join().unwrap().unwrap();
            assert_eq!(label, format!("worker-{}", i));
        }
    });
}
