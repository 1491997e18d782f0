//! Loading profile documents from disk.

use std::path::Path;

use asset_profile::testing::fixtures;
use asset_profile::{
    DecodeConfig, ErrorKind, LoaderConfig, PluginRegistry, Profile, ProfileLoader,
    builtin_context,
};
use test_case::test_case;

use crate::common::{RackProfile, document, init_tracing};

#[test]
fn test_privileged_profile_defaults() -> anyhow::Result<()> {
    init_tracing();
    let file = document(fixtures::WEB_PROFILE)?;

    let profile = ProfileLoader::new().load_privileged(Some(file.path()))?;

    assert_eq!(profile.label(), "web");
    assert_eq!(profile.prefix(), "w");
    assert!(!profile.requires_pool());
    assert!(profile.requires_primary_role());
    assert!(!profile.requires_secondary_role());
    assert!(!profile.allow_suffix());
    assert_eq!(profile.primary_role(), "");
    assert!(profile.allowed_classes().is_unrestricted());
    Ok(())
}

#[test]
fn test_fully_specified_profile() -> anyhow::Result<()> {
    let file = document(fixtures::HADOOP_PROFILE)?;

    let profile = ProfileLoader::new().load_privileged(Some(file.path()))?;

    assert_eq!(profile.primary_role(), "HADOOP");
    assert_eq!(profile.secondary_role(), "DATANODE");
    assert_eq!(profile.pool(), "HADOOP_PROD");
    assert_eq!(profile.contact(), Some("data-infra"));
    assert!(profile.allow_suffix());
    assert!(profile.permits_class("SERVER_NODE"));
    assert!(!profile.permits_class("POWER_CIRCUIT"));
    Ok(())
}

#[test]
fn test_missing_file_is_not_found() {
    let path = Path::new("/no/such/file.yaml");

    let err = ProfileLoader::new().load_privileged(Some(path)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("/no/such/file.yaml"));
}

#[test]
fn test_absent_path_is_not_found() {
    let loader = ProfileLoader::new();
    assert_eq!(loader.load_privileged(None).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        loader.load_provisioner(None, Some(builtin_context())).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_unknown_key_strict_vs_tolerant() -> anyhow::Result<()> {
    init_tracing();
    let file = document(fixtures::PROFILE_WITH_UNKNOWN_KEY)?;
    let loader = ProfileLoader::new();

    let err = loader.load_privileged(Some(file.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.message().contains("rack_position"));
    assert_eq!(err.document(), Some(file.path()));

    let profile = loader.load_provisioner(Some(file.path()), None)?;
    assert_eq!(profile.label(), "legacy");
    Ok(())
}

#[test]
fn test_non_string_key_strict_vs_tolerant() -> anyhow::Result<()> {
    init_tracing();
    let loader = ProfileLoader::new();
    let doc = "label: web\n0: junk\ncontact: ops\n";

    let profile = loader.load_provisioner_from_reader(doc.as_bytes(), None)?;
    assert_eq!(profile.label(), "web");
    assert_eq!(profile.contact(), Some("ops"));

    let err = loader.load_privileged_from_reader(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    Ok(())
}

#[test]
fn test_malformed_document_is_decode_error() -> anyhow::Result<()> {
    let file = document(fixtures::MALFORMED_PROFILE)?;

    let err = ProfileLoader::new().load_privileged(Some(file.path())).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(std::error::Error::source(&err).is_some());
    Ok(())
}

#[test]
fn test_syntax_error_is_decode_error() -> anyhow::Result<()> {
    let file = document("label: [unterminated\n")?;

    let err = ProfileLoader::new().load_provisioner(Some(file.path()), None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    Ok(())
}

#[test]
fn test_provisioner_with_plugin_context() -> anyhow::Result<()> {
    init_tracing();
    let plugins = PluginRegistry::with_parent(builtin_context());
    plugins.register::<RackProfile>()?;
    let file = document(
        "!asset.ProvisionerProfile\nlabel: racked\nprefix: r\nrack: !acme.RackProfile {label: r1, rack_units: 2}\n",
    )?;
    let loader = ProfileLoader::new();

    // The builtin context cannot resolve the plugin tag.
    let err = loader.load_provisioner(Some(file.path()), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.root_kind(), ErrorKind::TypeResolution);

    // The plugin snapshot can; the tolerant decode then drops the key.
    let profile = loader.load_provisioner(Some(file.path()), Some(plugins.snapshot()))?;
    assert_eq!(profile.label(), "racked");
    Ok(())
}

#[test]
fn test_configured_context_is_used() -> anyhow::Result<()> {
    let empty = asset_profile::TypeRegistry::empty().into_context();
    let loader = ProfileLoader::with_config(LoaderConfig::builder().context(empty).build());
    let file = document(fixtures::TAGGED_PROFILE)?;

    let err = loader.load_privileged(Some(file.path())).unwrap_err();

    assert_eq!(err.root_kind(), ErrorKind::TypeResolution);
    Ok(())
}

#[test]
fn test_catalog_from_file() -> anyhow::Result<()> {
    let file = document(fixtures::CATALOG)?;

    let catalog = ProfileLoader::new().load_catalog(Some(file.path()))?;

    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["hadoop", "web"]);
    assert_eq!(catalog.get("Hadoop").map(Profile::primary_role), Some("HADOOP"));
    assert_eq!(catalog.get("web").map(Profile::requires_pool), Some(false));
    Ok(())
}

#[test]
fn test_catalog_with_tagged_entries() -> anyhow::Result<()> {
    let file = document(
        "profiles:\n  db: !asset.Profile {label: Db, prefix: db}\n  web: !asset.ProvisionerProfile {label: Web}\n",
    )?;

    let catalog = ProfileLoader::new().load_catalog(Some(file.path()))?;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("db").map(Profile::prefix), Some("db"));
    Ok(())
}

#[test_case(1, false ; "too shallow")]
#[test_case(3, true ; "deep enough")]
fn test_catalog_max_depth(max_depth: usize, ok: bool) -> anyhow::Result<()> {
    let config = LoaderConfig::builder()
        .catalog(DecodeConfig::tolerant().with_max_depth(max_depth))
        .build();
    let file = document(fixtures::CATALOG)?;

    let result = ProfileLoader::with_config(config).load_catalog(Some(file.path()));

    assert_eq!(result.is_ok(), ok);
    if let Err(err) = result {
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
    Ok(())
}
