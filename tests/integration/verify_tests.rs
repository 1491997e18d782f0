//! Verifying provision requests against loaded profiles.

use asset_profile::testing::fixtures;
use asset_profile::verify::{Attribute, ProvisionRequest, Violation, verify};
use asset_profile::{Error, ErrorKind, ProfileLoader};

#[test]
fn test_request_against_catalog_profile() -> anyhow::Result<()> {
    let catalog = ProfileLoader::new().load_catalog_from_reader(fixtures::CATALOG.as_bytes())?;
    let profile = catalog.get("hadoop").ok_or_else(|| anyhow::anyhow!("no hadoop profile"))?;

    let request = ProvisionRequest::new("hadoop").with_pool("HADOOP_DEV");
    let attributes = verify(profile, &request)?;

    assert_eq!(attributes.primary_role(), Some("HADOOP"));
    assert_eq!(attributes.pool(), Some("HADOOP_DEV"));
    Ok(())
}

#[test]
fn test_loading_does_not_verify() -> anyhow::Result<()> {
    // Requires a primary role but supplies none; loading still succeeds.
    let profile = ProfileLoader::new()
        .load_privileged_from_reader(fixtures::WEB_PROFILE.as_bytes())?;
    assert!(profile.requires_primary_role());

    let rejected = verify(&profile, &ProvisionRequest::new("web")).unwrap_err();
    assert_eq!(
        rejected.violations(),
        &[Violation::Required(Attribute::PrimaryRole)]
    );
    Ok(())
}

#[test]
fn test_rejection_converts_to_verification_error() -> anyhow::Result<()> {
    let profile = ProfileLoader::new()
        .load_privileged_from_reader(fixtures::HADOOP_PROFILE.as_bytes())?;
    let request = ProvisionRequest::new("hadoop")
        .with_pool("OTHER")
        .with_asset_class("SWITCH");

    let err: Error = verify(&profile, &request).unwrap_err().into();

    assert_eq!(err.kind(), ErrorKind::Verification);
    assert!(err.message().contains("Pool is not user configurable"));
    assert!(err.message().contains("SWITCH"));
    Ok(())
}
