//! CountingResolver for asserting which types a decode looked up.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::resolve::{ResolutionContext, TypeDescriptor, TypeResolver};

/// A resolver that delegates to another context and records every name it
/// was asked for.
///
/// Clones share the same record, so a test can keep one handle and give the
/// decoder a context built from another.
///
/// ```rust
/// use asset_profile::resolve::TypeRegistry;
/// use asset_profile::testing::CountingResolver;
///
/// let resolver = CountingResolver::new(TypeRegistry::empty().into_context());
/// assert!(resolver.context().resolve("acme.Rack").is_none());
/// assert_eq!(resolver.lookups(), vec!["acme.Rack".to_string()]);
/// assert_eq!(resolver.misses(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountingResolver {
    inner: ResolutionContext,
    lookups: Arc<Mutex<Vec<Lookup>>>,
}

#[derive(Debug, Clone)]
struct Lookup {
    name: String,
    found: bool,
}

impl CountingResolver {
    /// Wraps `inner`.
    pub fn new(inner: ResolutionContext) -> Self {
        Self {
            inner,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a context that resolves through this resolver.
    pub fn context(&self) -> ResolutionContext {
        ResolutionContext::new(self.clone())
    }

    /// Returns every name looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().iter().map(|l| l.name.clone()).collect()
    }

    /// Returns how many times `name` was looked up.
    pub fn lookup_count(&self, name: &str) -> usize {
        self.lookups.lock().iter().filter(|l| l.name == name).count()
    }

    /// Returns how many lookups found nothing.
    pub fn misses(&self) -> usize {
        self.lookups.lock().iter().filter(|l| !l.found).count()
    }

    /// Returns the total number of lookups.
    pub fn call_count(&self) -> usize {
        self.lookups.lock().len()
    }

    /// Clears the record.
    pub fn reset(&self) {
        self.lookups.lock().clear();
    }
}

impl TypeResolver for CountingResolver {
    fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        let descriptor = self.inner.resolve(name);
        self.lookups.lock().push(Lookup {
            name: name.to_string(),
            found: descriptor.is_some(),
        });
        descriptor
    }

    fn type_names(&self) -> Vec<String> {
        self.inner.type_names()
    }
}
