//! Dot-separated key paths for navigating a [`PathMap`](crate::PathMap).
//!
//! A path is a sequence of key segments. The string form joins segments with
//! [`DELIMITER`]; empty segments (leading, trailing or doubled dots) are skipped.
//! There is no escaping, so a key that itself contains the delimiter cannot be
//! addressed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between segments in the string form of a path.
pub const DELIMITER: char = '.';

/// A parsed key path.
///
/// Segments address object keys. When resolution meets a sequence, a segment
/// that parses as an in-range index selects that element.
///
/// # Examples
///
/// ```
/// use dictum_state::Path;
///
/// let path = Path::parse("user.address.city");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "$.user.address.city");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty path (alias for `new`).
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    /// Parse a dot-separated path string.
    pub fn parse(path: &str) -> Self {
        path.split(DELIMITER)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(k.into());
        self
    }

    /// Push a key segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, k: impl Into<String>) {
        self.0.push(k.into());
    }

    /// Pop the last segment from the path.
    #[inline]
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Join this path with another path.
    pub fn join(&self, other: &Path) -> Path {
        let mut result = self.clone();
        result.0.extend(other.0.iter().cloned());
        result
    }

    /// Get the parent path (path without the last segment).
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            let mut p = self.clone();
            p.pop();
            Some(p)
        }
    }

    /// Check if this path is a prefix of another path.
    ///
    /// A path is a prefix of itself.
    #[inline]
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Render the path back to its dot-separated form.
    pub fn to_dotted(&self) -> String {
        self.0.join(&DELIMITER.to_string())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for seg in &self.0 {
            write!(f, "{DELIMITER}{seg}")?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::parse(&path)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.0[index].as_str()
    }
}

/// Interpret a segment as a sequence index.
#[inline]
pub(crate) fn seg_index(seg: &str) -> Option<usize> {
    seg.parse().ok()
}

/// Construct a `Path` from a sequence of segments.
///
/// Each segment is rendered with `ToString`, so numbers can address sequence
/// elements.
///
/// ```
/// use dictum_state::path;
///
/// let p = path!("items", 0, "name");
/// assert_eq!(p.to_dotted(), "items.0.name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::root();
        $(
            p.push(::std::string::ToString::to_string(&$seg));
        )+
        p
    }};
}
