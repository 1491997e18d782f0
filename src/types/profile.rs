//! The asset profile.

use serde::{Deserialize, Deserializer, Serialize};

use super::builtin_context;
use crate::resolve::{Resolvable, ResolutionContext};
use crate::verify::Attribute;

/// A named policy describing what an asset provisioned under it must have.
///
/// Profiles are immutable once built. They come from
/// [`ProfileLoader`](crate::ProfileLoader) or from [`Profile::builder`].
///
/// ## Defaults
///
/// | Field                     | Default     |
/// |---------------------------|-------------|
/// | `prefix`, roles, `pool`   | `""`        |
/// | `contact`, `contact_notes`| none        |
/// | `allowed_classes`         | empty (= unrestricted) |
/// | `allow_suffix`            | `false`     |
/// | `requires_primary_role`   | `true`      |
/// | `requires_secondary_role` | `false`     |
/// | `requires_pool`           | `true`      |
///
/// Decoding never checks the `requires_*` flags against the values; an
/// empty `primary_role` with `requires_primary_role: true` decodes fine.
/// See [`verify`](crate::verify::verify).
///
/// ## Example
///
/// ```rust
/// use asset_profile::Profile;
///
/// let profile = Profile::builder()
///     .label("Hadoop worker")
///     .prefix("hadoop")
///     .primary_role("HADOOP")
///     .allowed_classes(["SERVER_NODE"])
///     .build();
///
/// assert!(profile.requires_pool());
/// assert!(profile.permits_class("SERVER_NODE"));
/// assert!(!profile.permits_class("SWITCH"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct Profile {
    /// Display name.
    #[builder(into)]
    label: String,

    /// Prefix for identifiers of assets provisioned under this profile.
    #[builder(into, default)]
    prefix: String,

    #[builder(into, default)]
    primary_role: String,

    #[builder(into, default)]
    secondary_role: String,

    #[builder(into, default)]
    pool: String,

    /// Who to ask about this profile.
    #[builder(into)]
    contact: Option<String>,

    #[builder(into)]
    contact_notes: Option<String>,

    /// Asset classes this profile may be applied to. Empty means any.
    #[builder(into, default)]
    allowed_classes: AllowedClasses,

    #[builder(default = Profile::DEFAULT_ALLOW_SUFFIX)]
    allow_suffix: bool,

    #[builder(default = Profile::DEFAULT_REQUIRES_PRIMARY_ROLE)]
    requires_primary_role: bool,

    #[builder(default = Profile::DEFAULT_REQUIRES_SECONDARY_ROLE)]
    requires_secondary_role: bool,

    #[builder(default = Profile::DEFAULT_REQUIRES_POOL)]
    requires_pool: bool,
}

impl Profile {
    /// Default for `allow_suffix`.
    pub const DEFAULT_ALLOW_SUFFIX: bool = false;
    /// Default for `requires_primary_role`.
    pub const DEFAULT_REQUIRES_PRIMARY_ROLE: bool = true;
    /// Default for `requires_secondary_role`.
    pub const DEFAULT_REQUIRES_SECONDARY_ROLE: bool = false;
    /// Default for `requires_pool`.
    pub const DEFAULT_REQUIRES_POOL: bool = true;

    /// Returns the display name.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the identifier prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the primary role this profile assigns, or `""`.
    #[inline]
    pub fn primary_role(&self) -> &str {
        &self.primary_role
    }

    /// Returns the secondary role this profile assigns, or `""`.
    #[inline]
    pub fn secondary_role(&self) -> &str {
        &self.secondary_role
    }

    /// Returns the pool this profile assigns, or `""`.
    #[inline]
    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Returns the contact, if any.
    #[inline]
    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    /// Returns the contact notes, if any.
    #[inline]
    pub fn contact_notes(&self) -> Option<&str> {
        self.contact_notes.as_deref()
    }

    /// Returns the allowed asset classes.
    #[inline]
    pub fn allowed_classes(&self) -> &AllowedClasses {
        &self.allowed_classes
    }

    /// Returns `true` if an identifier suffix may be requested.
    #[inline]
    pub fn allow_suffix(&self) -> bool {
        self.allow_suffix
    }

    /// Returns `true` if provisioned assets need a primary role.
    #[inline]
    pub fn requires_primary_role(&self) -> bool {
        self.requires_primary_role
    }

    /// Returns `true` if provisioned assets need a secondary role.
    #[inline]
    pub fn requires_secondary_role(&self) -> bool {
        self.requires_secondary_role
    }

    /// Returns `true` if provisioned assets need a pool.
    #[inline]
    pub fn requires_pool(&self) -> bool {
        self.requires_pool
    }

    /// Returns `true` if this profile may be applied to `class`.
    ///
    /// An empty allow-list means no restriction.
    #[inline]
    pub fn permits_class(&self, class: &str) -> bool {
        self.allowed_classes.permits(class)
    }

    /// Returns `true` if the allow-list restricts asset classes at all.
    #[inline]
    pub fn is_class_restricted(&self) -> bool {
        !self.allowed_classes.is_unrestricted()
    }

    /// Returns the value this profile fixes for `attribute`, if it fixes one.
    pub fn provides(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::Pool => &self.pool,
            Attribute::PrimaryRole => &self.primary_role,
            Attribute::SecondaryRole => &self.secondary_role,
        };
        if value.is_empty() { None } else { Some(value) }
    }

    /// Returns `true` if provisioned assets need `attribute`.
    pub fn requires(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Pool => self.requires_pool,
            Attribute::PrimaryRole => self.requires_primary_role,
            Attribute::SecondaryRole => self.requires_secondary_role,
        }
    }

    /// Returns the attributes this profile requires but does not supply.
    ///
    /// A provision request against this profile has to supply each of them.
    pub fn missing_requirements(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|a| self.requires(*a) && self.provides(*a).is_none())
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            label: String::new(),
            prefix: String::new(),
            primary_role: String::new(),
            secondary_role: String::new(),
            pool: String::new(),
            contact: None,
            contact_notes: None,
            allowed_classes: AllowedClasses::default(),
            allow_suffix: Self::DEFAULT_ALLOW_SUFFIX,
            requires_primary_role: Self::DEFAULT_REQUIRES_PRIMARY_ROLE,
            requires_secondary_role: Self::DEFAULT_REQUIRES_SECONDARY_ROLE,
            requires_pool: Self::DEFAULT_REQUIRES_POOL,
        }
    }
}

impl Resolvable for Profile {
    fn type_name() -> &'static str {
        "asset.Profile"
    }

    fn home_context() -> Option<ResolutionContext> {
        Some(builtin_context())
    }
}

/// Ordered set of asset class names.
///
/// **An empty set means "no restriction"**, not "nothing allowed". This is
/// the opposite of what an empty allow-list means in most places, so use
/// [`permits`](AllowedClasses::permits) instead of `contains`.
///
/// Duplicates are dropped, keeping the first occurrence. Matching is exact
/// and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AllowedClasses(Vec<String>);

impl AllowedClasses {
    /// Creates an unrestricted (empty) set.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Returns `true` if the set is empty and therefore permits every class.
    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `class` may be provisioned.
    pub fn permits(&self, class: &str) -> bool {
        self.is_unrestricted() || self.contains(class)
    }

    /// Returns `true` if `class` is listed explicitly.
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Returns the number of listed classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no class is listed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the listed classes in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the listed classes in order.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for AllowedClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut classes: Vec<String> = Vec::new();
        for class in iter {
            let class = class.into();
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        Self(classes)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for AllowedClasses {
    fn from(classes: [S; N]) -> Self {
        classes.into_iter().collect()
    }
}

impl From<Vec<String>> for AllowedClasses {
    fn from(classes: Vec<String>) -> Self {
        classes.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for AllowedClasses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let classes = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(classes.unwrap_or_default().into_iter().collect())
    }
}
