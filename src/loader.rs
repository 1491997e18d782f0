//! Loading profiles from files.
//!
//! [`ProfileLoader`] is where a root type, a resolution context and a decode
//! configuration meet. Each call opens one document, decodes it completely
//! and drops the handle before returning, whether it succeeded or not.
//!
//! The loader does no semantic checks. A profile whose `requires_*` flags
//! contradict its values loads fine; see [`verify`](crate::verify).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::resolve::{Resolvable, ResolutionContext};
use crate::{
    DecodeConfig, Error, LoaderConfig, Profile, ProfileCatalog, ProvisionerProfile, Result,
    ResolvingDecoder,
};

/// Loads profile documents.
///
/// ## Example
///
/// ```rust
/// use std::io::Write;
/// use asset_profile::{ErrorKind, ProfileLoader};
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// writeln!(file, "label: web\nprefix: w\nrequires_pool: false").unwrap();
///
/// let loader = ProfileLoader::new();
/// let profile = loader.load_privileged(Some(file.path())).unwrap();
/// assert_eq!(profile.label(), "web");
/// assert!(!profile.requires_pool());
/// assert!(profile.requires_primary_role());
///
/// let err = loader.load_privileged(None).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct ProfileLoader {
    /// Contexts and strictness for each document kind.
    #[builder(default)]
    config: LoaderConfig,
}

impl ProfileLoader {
    /// Creates a loader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with `config`.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the loader configuration.
    #[inline]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads a [`Profile`], rejecting unknown keys.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `path` is `None` or names no file; nothing is decoded.
    /// - `Io` if the file exists but cannot be opened.
    /// - `Decode` if the document is malformed, has unknown keys, or uses a
    ///   tag the context cannot resolve. The error names the document.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_privileged(&self, path: Option<&Path>) -> Result<Profile> {
        let path = require_path(path, Profile::type_name())?;
        let file = open(path)?;
        self.load_privileged_from_reader(file)
            .map_err(|err| err.with_document(path))
    }

    /// Loads a [`Profile`] from an already open stream.
    ///
    /// # Errors
    ///
    /// Same as [`load_privileged`](ProfileLoader::load_privileged), minus the
    /// path checks.
    pub fn load_privileged_from_reader<R: Read>(&self, reader: R) -> Result<Profile> {
        self.decoder::<Profile>(None, &self.config.privileged)?
            .decode(reader)
    }

    /// Loads a [`ProvisionerProfile`], dropping unknown keys with a warning.
    ///
    /// `context` overrides the loader's configured context; without either,
    /// the profile type's home context is used.
    ///
    /// # Errors
    ///
    /// Same as [`load_privileged`](ProfileLoader::load_privileged), except
    /// that unknown keys are not an error by default.
    #[tracing::instrument(level = "debug", skip(self, context))]
    pub fn load_provisioner(
        &self,
        path: Option<&Path>,
        context: Option<ResolutionContext>,
    ) -> Result<ProvisionerProfile> {
        let path = require_path(path, ProvisionerProfile::type_name())?;
        let file = open(path)?;
        self.load_provisioner_from_reader(file, context)
            .map_err(|err| err.with_document(path))
    }

    /// Loads a [`ProvisionerProfile`] from an already open stream.
    ///
    /// # Errors
    ///
    /// Same as [`load_provisioner`](ProfileLoader::load_provisioner), minus
    /// the path checks.
    pub fn load_provisioner_from_reader<R: Read>(
        &self,
        reader: R,
        context: Option<ResolutionContext>,
    ) -> Result<ProvisionerProfile> {
        self.decoder::<ProvisionerProfile>(context, &self.config.provisioner)?
            .decode(reader)
    }

    /// Loads a [`ProfileCatalog`].
    ///
    /// # Errors
    ///
    /// Same as [`load_provisioner`](ProfileLoader::load_provisioner).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_catalog(&self, path: Option<&Path>) -> Result<ProfileCatalog> {
        let path = require_path(path, ProfileCatalog::type_name())?;
        let file = open(path)?;
        let catalog = self
            .load_catalog_from_reader(file)
            .map_err(|err| err.with_document(path))?;
        tracing::debug!(profiles = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Loads a [`ProfileCatalog`] from an already open stream.
    ///
    /// # Errors
    ///
    /// Same as [`load_catalog`](ProfileLoader::load_catalog), minus the path
    /// checks.
    pub fn load_catalog_from_reader<R: Read>(&self, reader: R) -> Result<ProfileCatalog> {
        self.decoder::<ProfileCatalog>(None, &self.config.catalog)?
            .decode(reader)
    }

    /// Builds a decoder for `T`. An explicit context wins over the
    /// configured one, which wins over `T`'s home context.
    fn decoder<T: Resolvable>(
        &self,
        context: Option<ResolutionContext>,
        config: &DecodeConfig,
    ) -> Result<ResolvingDecoder<T>> {
        let decoder = match context.or_else(|| self.config.context.clone()) {
            Some(context) => ResolvingDecoder::with_context(Some(context))?,
            None => ResolvingDecoder::new()?,
        };
        Ok(decoder.with_config(config.clone()))
    }
}

fn require_path<'a>(path: Option<&'a Path>, what: &str) -> Result<&'a Path> {
    path.ok_or_else(|| Error::not_found(format!("no document path given for `{}`", what)))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    tracing::debug!(path = %path.display(), "opening document");
    let file = File::open(path).map_err(|err| Error::from(err).with_document(path))?;
    Ok(BufReader::new(file))
}
