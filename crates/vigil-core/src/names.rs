use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A simple (unqualified) identifier.
pub type Name = SmolStr;

/// A dotted Java package name. The empty name is the default package.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageName(SmolStr);

impl PackageName {
    pub fn new(name: impl AsRef<str>) -> Self {
        PackageName(SmolStr::new(name.as_ref().trim()))
    }

    pub fn default_package() -> Self {
        PackageName(SmolStr::default())
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `self` is `other` or a (transitive) subpackage of it.
    #[must_use]
    pub fn is_within(&self, other: &PackageName) -> bool {
        if other.is_default() {
            return true;
        }
        match self.0.strip_prefix(other.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Debug for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("PackageName(<default>)")
        } else {
            write!(f, "PackageName({})", self.0)
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(value: &str) -> Self {
        PackageName::new(value)
    }
}
