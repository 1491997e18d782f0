//! Bottom-up tag resolution over a parsed document.

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use super::ResolvingDecoder;
use super::keys::{FieldPath, drop_non_string_keys, has_non_string_keys, key_label, remove};
use crate::resolve::TypeDescriptor;
use crate::{DecodeConfig, Error, Result};

/// Prefix libyaml expands `!!` to.
const YAML_CORE_PREFIX: &str = "tag:yaml.org,2002:";

/// Tags from the YAML core schema; these describe scalars, not types.
const YAML_CORE_TAGS: &[&str] = &[
    "str", "int", "float", "bool", "null", "map", "seq", "binary", "timestamp",
];

/// What a tag means to the walk.
#[derive(Debug, PartialEq, Eq)]
enum TagRole<'t> {
    /// A YAML core schema tag; dropped.
    Core,
    /// A namespaced type name; resolved through the context.
    Type(&'t str),
    /// Anything else, such as an enum variant; kept for serde.
    Variant,
}

fn classify(raw: &str) -> TagRole<'_> {
    let name = raw.strip_prefix('!').unwrap_or(raw);
    let name = match name.strip_prefix(YAML_CORE_PREFIX) {
        Some(core) if YAML_CORE_TAGS.contains(&core) => return TagRole::Core,
        Some(global) => global,
        None => name,
    };
    if name.contains('.') {
        TagRole::Type(name)
    } else {
        TagRole::Variant
    }
}

/// The document root once every tag beneath it has been resolved.
#[derive(Debug)]
pub enum ResolvedRoot {
    /// The root node itself carried a type tag. `value` is untagged.
    Tagged {
        /// The type the root tag resolved to.
        descriptor: TypeDescriptor,
        /// The root's content, with nested tags already resolved.
        value: Value,
    },
    /// The root node carried no type tag.
    Plain(Value),
}

/// One resolution pass. Not reused across documents.
pub struct Walk<'a, T> {
    decoder: &'a ResolvingDecoder<T>,
    path: String,
    resolved: usize,
    dropped: Vec<String>,
}

impl<'a, T> Walk<'a, T> {
    pub(crate) fn new(decoder: &'a ResolvingDecoder<T>) -> Self {
        Self {
            decoder,
            path: String::new(),
            resolved: 0,
            dropped: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &DecodeConfig {
        self.decoder.config()
    }

    /// Number of tags resolved so far.
    pub(crate) fn resolved(&self) -> usize {
        self.resolved
    }

    /// Keys dropped by tolerant decodes so far, as dotted paths.
    pub(crate) fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Resolves every tag in `document`, leaving a root type tag for the
    /// caller.
    pub(crate) fn resolve_root(&mut self, document: Value) -> Result<ResolvedRoot> {
        let Value::Tagged(tagged) = document else {
            return Ok(ResolvedRoot::Plain(self.resolve_node(document, 0)?));
        };

        let TaggedValue { tag, value } = *tagged;
        let raw = tag.to_string();
        match classify(&raw) {
            TagRole::Type(name) => {
                let descriptor = self.descriptor_for(name)?;
                let value = self.resolve_node(value, 1)?;
                Ok(ResolvedRoot::Tagged { descriptor, value })
            },
            TagRole::Core => Ok(ResolvedRoot::Plain(self.resolve_node(value, 1)?)),
            TagRole::Variant => {
                let value = self.resolve_node(value, 1)?;
                Ok(ResolvedRoot::Plain(Value::Tagged(Box::new(TaggedValue { tag, value }))))
            },
        }
    }

    /// Runs `decode` over `value` and applies strictness to the keys it
    /// skipped. Returns the decoded instance and `value` minus anything
    /// dropped.
    ///
    /// In tolerant mode a decode that fails on a document with non-string
    /// keys is retried once with those keys removed.
    pub(crate) fn decode<D>(
        &mut self,
        type_name: &str,
        mut value: Value,
        decode: impl Fn(&Value) -> Result<(D, Vec<FieldPath>)>,
    ) -> Result<(D, Value)> {
        let (instance, unknown) = match decode(&value) {
            Ok(decoded) => decoded,
            Err(_) if !self.config().strict && has_non_string_keys(&value) => {
                let dropped = drop_non_string_keys(&mut value);
                let dropped = self.qualify_all(&dropped);
                tracing::warn!(
                    type_name,
                    keys = %dropped.join(", "),
                    "ignoring non-string keys"
                );
                self.dropped.extend(dropped);
                decode(&value)?
            },
            Err(err) => return Err(err),
        };
        let value = self.accept(type_name, value, &unknown)?;
        Ok((instance, value))
    }

    fn accept(&mut self, type_name: &str, mut value: Value, unknown: &[FieldPath]) -> Result<Value> {
        if unknown.is_empty() {
            return Ok(value);
        }

        let qualified = self.qualify_all(unknown);
        if self.config().strict {
            return Err(Error::decode(format!(
                "unknown field(s) for `{}`: {}",
                type_name,
                qualified.join(", ")
            )));
        }

        tracing::warn!(
            type_name,
            fields = %qualified.join(", "),
            "ignoring unknown fields"
        );
        for path in unknown {
            remove(&mut value, path);
        }
        self.dropped.extend(qualified);
        Ok(value)
    }

    fn resolve_node(&mut self, node: Value, depth: usize) -> Result<Value> {
        if depth > self.config().max_depth {
            return Err(Error::decode(format!(
                "document nests deeper than {} levels at `{}`",
                self.config().max_depth,
                self.location()
            )));
        }

        match node {
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                let raw = tag.to_string();
                match classify(&raw) {
                    TagRole::Type(name) => {
                        let descriptor = self.descriptor_for(name)?;
                        let value = self.resolve_node(value, depth + 1)?;
                        self.build(&descriptor, value)
                    },
                    TagRole::Core => self.resolve_node(value, depth + 1),
                    TagRole::Variant => {
                        let value = self.resolve_node(value, depth + 1)?;
                        Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
                    },
                }
            },
            Value::Mapping(mapping) => {
                let mut resolved = Mapping::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = self.resolve_node(key, depth + 1)?;
                    let len = self.path.len();
                    self.push_segment(&key);
                    let value = self.resolve_node(value, depth + 1);
                    self.path.truncate(len);
                    resolved.insert(key, value?);
                }
                Ok(Value::Mapping(resolved))
            },
            Value::Sequence(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for (idx, item) in items.into_iter().enumerate() {
                    let len = self.path.len();
                    self.path.push_str(&format!("[{}]", idx));
                    let item = self.resolve_node(item, depth + 1);
                    self.path.truncate(len);
                    resolved.push(item?);
                }
                Ok(Value::Sequence(resolved))
            },
            scalar => Ok(scalar),
        }
    }

    /// Builds a tagged node through its descriptor and returns it untagged.
    fn build(&mut self, descriptor: &TypeDescriptor, value: Value) -> Result<Value> {
        let at = self.location().to_string();
        tracing::trace!(type_name = descriptor.name(), %at, "resolved tagged node");

        let (_, value) = self.decode(descriptor.name(), value, |node| {
            descriptor
                .decode(node)
                .map_err(|err| nested_failure(descriptor.name(), &at, err))
        })?;
        Ok(value)
    }

    fn descriptor_for(&mut self, name: &str) -> Result<TypeDescriptor> {
        match self.decoder.resolve_type_name(name) {
            Ok(descriptor) => {
                self.resolved += 1;
                Ok(descriptor)
            },
            Err(err) => Err(Error::decode(format!(
                "cannot resolve tag `!{}` at `{}`",
                name,
                self.location()
            ))
            .with_source(err)),
        }
    }

    fn qualify_all(&self, paths: &[FieldPath]) -> Vec<String> {
        paths
            .iter()
            .map(|path| {
                let key = path.to_string();
                if self.path.is_empty() {
                    key
                } else if key.starts_with('[') {
                    format!("{}{}", self.path, key)
                } else {
                    format!("{}.{}", self.path, key)
                }
            })
            .collect()
    }

    fn location(&self) -> &str {
        if self.path.is_empty() { "<root>" } else { &self.path }
    }

    fn push_segment(&mut self, key: &Value) {
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(&key_label(key));
    }
}

fn nested_failure(type_name: &str, at: &str, err: Error) -> Error {
    Error::decode(format!("cannot decode `{}` at `{}`: {}", type_name, at, err.message()))
        .with_source(err)
}
