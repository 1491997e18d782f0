//! Common test harness for asset-profile integration tests.

use std::io::Write;
use std::sync::Once;

use asset_profile::resolve::Resolvable;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Write `contents` to a fresh temporary file.
pub fn document(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// A type only a plugin knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackProfile {
    pub label: String,
    pub rack_units: u32,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, alias = "site", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Resolvable for RackProfile {
    fn type_name() -> &'static str {
        "acme.RackProfile"
    }
}
