//! Decode configuration.

/// Configuration for a single decoder.
///
/// Strict and tolerant decoding are the same decoder configured two ways.
///
/// ## Default Values
///
/// - `strict`: true
/// - `max_depth`: 64
///
/// ## Example
///
/// ```rust
/// use asset_profile::DecodeConfig;
///
/// let config = DecodeConfig::builder()
///     .strict(false)
///     .max_depth(16)
///     .build();
/// assert!(!config.strict);
/// assert_eq!(DecodeConfig::tolerant().strict, false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct DecodeConfig {
    /// Whether document keys with no matching field fail the decode.
    ///
    /// When `false` they are dropped with a warning.
    #[builder(default = true)]
    pub strict: bool,

    /// Deepest nesting of mappings and sequences the decoder will walk.
    #[builder(default = DecodeConfig::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DecodeConfig {
    /// Default value of [`max_depth`](DecodeConfig::max_depth).
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Creates a configuration that rejects unknown keys.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Creates a configuration that ignores unknown keys.
    pub fn tolerant() -> Self {
        Self::builder().strict(false).build()
    }

    /// Sets whether unknown keys are rejected.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}
