//! Feature versions: `major.minor.patch`.

use std::fmt;
use std::str::FromStr;

use crate::VersionParseError;

/// The version of one advertised feature.
///
/// Parsed from `major[.minor[.patch]]`; omitted components default to 0,
/// so `"2"`, `"2.0"` and `"2.0.0"` are the same version. Always displayed
/// with all three components, which means `Display` followed by
/// `FromStr` gives back the same value.
///
/// Only `(major, minor)` matters for compatibility. The patch component
/// is carried so clients can report fully-compatible changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Creates a version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The `(major, minor)` pair compatibility is decided on.
    pub const fn major_minor(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError {
            input: s.to_owned(),
        };

        let mut parts = [0u32; 3];
        let mut count = 0;
        for part in s.split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            // `u32::from_str` accepts a leading `+`, which is not a valid
            // version component, so check the digits ourselves.
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            parts[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }

        let [major, minor, patch] = parts;
        Ok(Self::new(major, minor, patch))
    }
}
