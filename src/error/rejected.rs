//! RequestRejected error type for provision requests a profile does not allow.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::verify::Violation;

/// Error returned when a provision request does not satisfy a profile.
///
/// This type is **distinct from load errors**. The profile decoded fine;
/// it is the request made against it that is wrong. All violations found are
/// reported together so an operator can fix the request in one pass.
///
/// ```rust
/// use asset_profile::{Profile, verify::{ProvisionRequest, verify}};
///
/// let profile = Profile::builder().label("Web").prefix("web").build();
/// let request = ProvisionRequest::new("web").with_suffix("canary");
///
/// let rejected = verify(&profile, &request).unwrap_err();
/// assert_eq!(rejected.profile(), "web");
/// assert!(rejected.violations().len() >= 2); // suffix + required roles/pool
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRejected {
    /// The profile id or label the request was made against.
    profile: Cow<'static, str>,

    /// Every requirement the request broke, in check order.
    violations: Vec<Violation>,
}

impl RequestRejected {
    /// Creates a new rejection for `profile` with the given violations.
    pub fn new(profile: impl Into<Cow<'static, str>>, violations: Vec<Violation>) -> Self {
        Self {
            profile: profile.into(),
            violations,
        }
    }

    /// Returns the profile the request was made against.
    #[inline]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Returns the violations, in the order they were checked.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if `violation` is among the reported violations.
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Returns a formatted string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        format!("request_rejected: profile={} violations=[{}]", self.profile, parts.join("; "))
    }
}

impl fmt::Display for RequestRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request rejected for profile '{}'", self.profile)?;
        for (idx, violation) in self.violations.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, violation)?;
        }
        Ok(())
    }
}

impl StdError for RequestRejected {}

impl From<RequestRejected> for crate::Error {
    fn from(rejected: RequestRejected) -> Self {
        crate::Error::verification(rejected.to_string()).with_source(rejected)
    }
}
