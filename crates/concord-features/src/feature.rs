//! Required feature versions and the compatibility rule.

use std::fmt;

use concord_protocol::{CapabilitySet, Version};

/// A feature at the version some piece of content was last changed in a
/// compatibility-breaking way.
///
/// These are `const` values, declared once next to the content they gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVersion {
    name: &'static str,
    version: Version,
}

impl FeatureVersion {
    /// The client ships Concord's message resources and can resolve
    /// translation keys itself.
    pub const TRANSLATIONS: Self = Self::new("translations", Version::new(1, 0, 0));

    /// The client ships the `concord:icons` font (owner crown and friends).
    pub const ICONS: Self = Self::new("icons", Version::new(1, 0, 0));

    pub const fn new(name: &'static str, version: Version) -> Self {
        Self { name, version }
    }

    /// The feature's name as it appears in the capability payload.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn version(&self) -> Version {
        self.version
    }

    /// The same feature, at another version.
    pub const fn at(self, version: Version) -> Self {
        Self::new(self.name, version)
    }

    /// Shorthand for [`is_compatible`]`(self, advertised)`.
    pub fn is_satisfied_by(&self, advertised: &CapabilitySet) -> bool {
        is_compatible(self, advertised)
    }
}

impl fmt::Display for FeatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Whether a recipient that advertised `advertised` can handle content
/// requiring `required`.
///
/// An absent feature is never compatible. A present one is compatible only
/// when `(major, minor)` match **exactly**: a newer minor may have dropped
/// arguments an older message passes, and an older one may lack arguments
/// a newer message passes, so neither direction is safe. Patch never
/// matters.
pub fn is_compatible(required: &FeatureVersion, advertised: &CapabilitySet) -> bool {
    advertised
        .get(required.name)
        .is_some_and(|have| have.major_minor() == required.version.major_minor())
}
