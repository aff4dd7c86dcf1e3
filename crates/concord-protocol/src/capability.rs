//! The set of features one connection has advertised.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::Version;

/// The shared "announced nothing" set.
static EMPTY: LazyLock<Arc<CapabilitySet>> =
    LazyLock::new(|| Arc::new(CapabilitySet::default()));

/// An immutable map of feature name → [`Version`].
///
/// A feature that is not in the set is *absent*; it is never treated as
/// version `0.0.0`. There are no mutating methods: when a client announces
/// again, a new set is built and swapped in whole.
///
/// Equality is map equality, so two sets compare equal regardless of the
/// order their entries were inserted or encoded in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    features: HashMap<String, Version>,
}

impl CapabilitySet {
    /// Wraps an existing map.
    pub fn new(features: HashMap<String, Version>) -> Self {
        Self { features }
    }

    /// Returns the shared empty set.
    ///
    /// Every caller gets a clone of the same `Arc`, so unannounced
    /// connections cost no allocation.
    pub fn empty() -> Arc<Self> {
        Arc::clone(&EMPTY)
    }

    /// The advertised version of `feature`, if present.
    pub fn get(&self, feature: &str) -> Option<Version> {
        self.features.get(feature).copied()
    }

    /// Whether `feature` was advertised at all, at any version.
    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains_key(feature)
    }

    /// Number of advertised features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` if nothing was advertised.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over `(name, version)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Version)> {
        self.features.iter().map(|(name, v)| (name.as_str(), *v))
    }
}

/// Later entries win when a name repeats.
impl<K: Into<String>> FromIterator<(K, Version)> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = (K, Version)>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Prints `{name@version, ...}` sorted by name, for stable log lines.
impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        f.write_str("{")?;
        for (i, (name, version)) in entries.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}@{version}")?;
        }
        f.write_str("}")
    }
}
