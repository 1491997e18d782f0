//! Documents holding many profiles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Profile, builtin_context};
use crate::resolve::{Resolvable, ResolutionContext};

/// A set of profiles keyed by identifier.
///
/// ```yaml
/// profiles:
///   hadoop:
///     label: Hadoop worker
///     prefix: hadoop
///   web:
///     label: Web
///     prefix: web
///     requires_pool: false
/// ```
///
/// Identifiers are unique in the document. [`get`](ProfileCatalog::get)
/// ignores ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCatalog {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

impl ProfileCatalog {
    /// Looks up a profile by identifier.
    ///
    /// An exact match wins over a case-insensitive one.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id).or_else(|| {
            self.profiles
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(id))
                .map(|(_, profile)| profile)
        })
    }

    /// Returns `true` if [`get`](ProfileCatalog::get) would find `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Iterates over `(identifier, profile)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Returns the number of profiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the catalog holds no profiles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Profile)> for ProfileCatalog {
    fn from_iter<I: IntoIterator<Item = (S, Profile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().map(|(id, p)| (id.into(), p)).collect(),
        }
    }
}

impl Resolvable for ProfileCatalog {
    fn type_name() -> &'static str {
        "asset.ProfileCatalog"
    }

    fn home_context() -> Option<ResolutionContext> {
        Some(builtin_context())
    }
}
