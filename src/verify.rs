//! Checking provision requests against a profile.
//!
//! Loading a profile never checks its `requires_*` flags. That happens here,
//! when someone asks to provision an asset under the profile:
//!
//! - a suffix is accepted only if the profile allows one
//! - an attribute the profile fixes cannot be overridden by the request
//! - an attribute the profile requires but leaves unset must come from the
//!   request
//! - the asset class must be on a non-empty allow-list
//!
//! Every violation is collected before rejecting, so the caller sees all of
//! them at once.
//!
//! ```rust
//! use asset_profile::Profile;
//! use asset_profile::verify::{ProvisionRequest, verify};
//!
//! let profile = Profile::builder()
//!     .label("Hadoop worker")
//!     .primary_role("HADOOP")
//!     .build();
//!
//! let request = ProvisionRequest::new("hadoop").with_pool("HADOOP_PROD");
//! let attributes = verify(&profile, &request).unwrap();
//! assert_eq!(attributes.primary_role(), Some("HADOOP"));
//! assert_eq!(attributes.pool(), Some("HADOOP_PROD"));
//! ```

use std::fmt;

use crate::{Profile, RequestRejected};

/// An attribute either the profile or the request may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The asset pool.
    Pool,
    /// The primary role.
    PrimaryRole,
    /// The secondary role.
    SecondaryRole,
}

impl Attribute {
    /// Every attribute, in the order requests are checked.
    pub const ALL: [Attribute; 3] = [
        Attribute::Pool,
        Attribute::SecondaryRole,
        Attribute::PrimaryRole,
    ];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Pool => "Pool",
            Attribute::PrimaryRole => "Primary role",
            Attribute::SecondaryRole => "Secondary role",
        })
    }
}

/// One way a request breaks a profile's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The request has a suffix but the profile does not allow one.
    SuffixNotAllowed,
    /// The request sets an attribute the profile already fixes.
    NotConfigurable(Attribute),
    /// The profile requires an attribute that neither side supplies.
    Required(Attribute),
    /// The asset class is not on the profile's allow-list.
    ClassNotAllowed(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SuffixNotAllowed => f.write_str("Suffix not allowed"),
            Violation::NotConfigurable(attribute) => {
                write!(f, "{} is not user configurable", attribute)
            },
            Violation::Required(attribute) => write!(f, "{} is required", attribute),
            Violation::ClassNotAllowed(class) => {
                write!(f, "Asset class '{}' is not allowed", class)
            },
        }
    }
}

/// A request to provision one asset under a named profile.
///
/// Empty strings count as "not specified".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionRequest {
    profile_id: String,
    asset_class: Option<String>,
    pool: Option<String>,
    primary_role: Option<String>,
    secondary_role: Option<String>,
    suffix: Option<String>,
}

impl ProvisionRequest {
    /// Creates a request against `profile_id` with nothing else specified.
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            ..Self::default()
        }
    }

    /// Sets the class of the asset being provisioned.
    #[must_use]
    pub fn with_asset_class(mut self, class: impl Into<String>) -> Self {
        self.asset_class = Some(class.into());
        self
    }

    /// Sets the pool.
    #[must_use]
    pub fn with_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = Some(pool.into());
        self
    }

    /// Sets the primary role.
    #[must_use]
    pub fn with_primary_role(mut self, role: impl Into<String>) -> Self {
        self.primary_role = Some(role.into());
        self
    }

    /// Sets the secondary role.
    #[must_use]
    pub fn with_secondary_role(mut self, role: impl Into<String>) -> Self {
        self.secondary_role = Some(role.into());
        self
    }

    /// Sets the identifier suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Returns the profile identifier.
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    /// Returns the asset class, if specified.
    pub fn asset_class(&self) -> Option<&str> {
        non_empty(&self.asset_class)
    }

    /// Returns the suffix, if specified.
    pub fn suffix(&self) -> Option<&str> {
        non_empty(&self.suffix)
    }

    /// Returns the request's value for `attribute`, if specified.
    pub fn specified(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Pool => non_empty(&self.pool),
            Attribute::PrimaryRole => non_empty(&self.primary_role),
            Attribute::SecondaryRole => non_empty(&self.secondary_role),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The attributes an accepted request provisions with.
///
/// Each one comes from the profile if it fixes the value, otherwise from the
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveAttributes {
    pool: Option<String>,
    primary_role: Option<String>,
    secondary_role: Option<String>,
    suffix: Option<String>,
}

impl EffectiveAttributes {
    /// Returns the effective pool.
    pub fn pool(&self) -> Option<&str> {
        self.pool.as_deref()
    }

    /// Returns the effective primary role.
    pub fn primary_role(&self) -> Option<&str> {
        self.primary_role.as_deref()
    }

    /// Returns the effective secondary role.
    pub fn secondary_role(&self) -> Option<&str> {
        self.secondary_role.as_deref()
    }

    /// Returns the requested suffix.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Returns the effective value for `attribute`.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Pool => self.pool(),
            Attribute::PrimaryRole => self.primary_role(),
            Attribute::SecondaryRole => self.secondary_role(),
        }
    }

    fn set(&mut self, attribute: Attribute, value: Option<&str>) {
        let value = value.map(str::to_string);
        match attribute {
            Attribute::Pool => self.pool = value,
            Attribute::PrimaryRole => self.primary_role = value,
            Attribute::SecondaryRole => self.secondary_role = value,
        }
    }
}

/// Checks `request` against `profile`.
///
/// # Errors
///
/// Returns [`RequestRejected`] carrying every [`Violation`] found, in check
/// order: suffix, pool, secondary role, primary role, asset class.
pub fn verify(
    profile: &Profile,
    request: &ProvisionRequest,
) -> Result<EffectiveAttributes, RequestRejected> {
    let mut violations = Vec::new();
    let mut effective = EffectiveAttributes::default();

    if request.suffix().is_some() && !profile.allow_suffix() {
        violations.push(Violation::SuffixNotAllowed);
    }
    effective.suffix = request.suffix().map(str::to_string);

    for attribute in Attribute::ALL {
        let fixed = profile.provides(attribute);
        match request.specified(attribute) {
            Some(_) if fixed.is_some() => {
                violations.push(Violation::NotConfigurable(attribute));
            },
            Some(value) => effective.set(attribute, Some(value)),
            None if fixed.is_none() && profile.requires(attribute) => {
                violations.push(Violation::Required(attribute));
            },
            None => effective.set(attribute, fixed),
        }
    }

    if let Some(class) = request.asset_class()
        && !profile.permits_class(class)
    {
        violations.push(Violation::ClassNotAllowed(class.to_string()));
    }

    if violations.is_empty() {
        tracing::debug!(profile = request.profile_id(), "provision request accepted");
        Ok(effective)
    } else {
        let rejected = RequestRejected::new(request.profile_id().to_string(), violations);
        tracing::debug!(
            profile = request.profile_id(),
            violations = rejected.violations().len(),
            "provision request rejected"
        );
        Err(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn hadoop() -> Profile {
        Profile::builder()
            .label("Hadoop")
            .prefix("hadoop")
            .primary_role("HADOOP")
            .allowed_classes(["SERVER_NODE"])
            .build()
    }

    #[test]
    fn test_accepts_and_merges() {
        let request = ProvisionRequest::new("hadoop")
            .with_pool("PROD")
            .with_asset_class("SERVER_NODE");
        let effective = verify(&hadoop(), &request).unwrap();
        assert_eq!(effective.pool(), Some("PROD"));
        assert_eq!(effective.primary_role(), Some("HADOOP"));
        assert_eq!(effective.secondary_role(), None);
        assert_eq!(effective.suffix(), None);
    }

    #[test]
    fn test_collects_every_violation() {
        let request = ProvisionRequest::new("hadoop")
            .with_suffix("x")
            .with_primary_role("WEB")
            .with_asset_class("SWITCH");
        let rejected = verify(&hadoop(), &request).unwrap_err();
        assert_eq!(
            rejected.violations(),
            &[
                Violation::SuffixNotAllowed,
                Violation::Required(Attribute::Pool),
                Violation::NotConfigurable(Attribute::PrimaryRole),
                Violation::ClassNotAllowed("SWITCH".to_string()),
            ]
        );
        assert_eq!(rejected.profile(), "hadoop");
    }

    #[test]
    fn test_suffix_allowed() {
        let profile = Profile::builder()
            .label("p")
            .allow_suffix(true)
            .requires_primary_role(false)
            .requires_pool(false)
            .build();
        let effective = verify(&profile, &ProvisionRequest::new("p").with_suffix("a")).unwrap();
        assert_eq!(effective.suffix(), Some("a"));
    }

    #[test]
    fn test_empty_values_count_as_unspecified() {
        let request = ProvisionRequest::new("hadoop").with_pool("").with_primary_role("");
        let rejected = verify(&hadoop(), &request).unwrap_err();
        assert_eq!(rejected.violations(), &[Violation::Required(Attribute::Pool)]);
    }

    #[test]
    fn test_unrestricted_class_list() {
        let profile = Profile::builder().label("p").pool("P").primary_role("R").build();
        let request = ProvisionRequest::new("p").with_asset_class("ANYTHING");
        assert!(verify(&profile, &request).is_ok());
    }

    #[test_case(Violation::SuffixNotAllowed => "Suffix not allowed")]
    #[test_case(Violation::NotConfigurable(Attribute::Pool) => "Pool is not user configurable")]
    #[test_case(Violation::Required(Attribute::SecondaryRole) => "Secondary role is required")]
    #[test_case(Violation::ClassNotAllowed("SWITCH".into()) => "Asset class 'SWITCH' is not allowed")]
    fn test_violation_display(violation: Violation) -> String {
        violation.to_string()
    }
}
