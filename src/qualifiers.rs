//! Qualifier pairs of a package URL.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::codec;
use crate::constants::{QUALIFIER_KV_SEPARATOR, QUALIFIER_PAIR_SEPARATOR};
use crate::error::QualifierError;

/// Key/value pairs from the `?` part of a package URL.
///
/// Keys are unique. Entries keep the order in which their key was first
/// inserted; inserting an existing key replaces the value in place, so the
/// last write wins.
///
/// Order only affects rendering. Two sets of qualifiers with the same pairs
/// compare and hash equal regardless of order.
///
/// # Examples
///
/// ```
/// use package_url::Qualifiers;
///
/// let q = Qualifiers::parse("Arch=x86_64&distro=fedora%2025").unwrap();
/// assert_eq!(q.get("arch"), Some("x86_64"));
/// assert_eq!(q.get("distro"), Some("fedora 25"));
/// assert_eq!(q.to_string(), "arch=x86_64&distro=fedora%2025");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Qualifiers {
    entries: Vec<(String, String)>,
}

impl Qualifiers {
    /// Creates an empty set of qualifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses qualifiers from their raw form (without leading `?`).
    ///
    /// Pairs are split on `&`, then on the first `=`. Keys are lower-cased,
    /// values are percent-decoded, and pairs whose value is empty are
    /// dropped. An empty input yields empty qualifiers.
    ///
    /// # Errors
    ///
    /// Returns `QualifierError` if:
    /// - A pair has no `=`
    /// - A key contains characters outside `[A-Za-z0-9.\-_]` or starts with a digit
    /// - A value cannot be percent-decoded, or decodes to text containing `&`
    pub fn parse(input: &str) -> Result<Self, QualifierError> {
        let mut qualifiers = Self::new();
        if input.is_empty() {
            return Ok(qualifiers);
        }

        for pair in input.split(QUALIFIER_PAIR_SEPARATOR) {
            let Some((key, value)) = pair.split_once(QUALIFIER_KV_SEPARATOR) else {
                return Err(QualifierError::MissingSeparator {
                    pair: pair.to_string(),
                });
            };

            let key = key.to_ascii_lowercase();
            if !Self::is_valid_key(&key) {
                return Err(QualifierError::InvalidKey { key });
            }

            let value = match codec::decode(value) {
                Ok(value) => value,
                Err(source) => return Err(QualifierError::Encoding { key, source }),
            };

            // Empty values carry no information and are dropped.
            if value.is_empty() {
                continue;
            }
            if value.contains(QUALIFIER_PAIR_SEPARATOR) {
                return Err(QualifierError::IllegalValue { key });
            }

            qualifiers.insert(key, value.into_owned());
        }

        Ok(qualifiers)
    }

    /// Inserts a pair, returning the previous value for the key if any.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no qualifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of qualifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if the key matches `[A-Za-z.\-_][A-Za-z0-9.\-_]*`.
    #[must_use]
    pub fn is_valid_key(key: &str) -> bool {
        let mut chars = key.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first.is_ascii_alphabetic() || matches!(first, '.' | '-' | '_'))
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    }

    /// Validates decoded pairs and lower-cases their keys.
    ///
    /// Values must be non-empty and must not contain `&`.
    ///
    /// Keys that collide after lower-casing follow the usual last-write-wins
    /// rule.
    pub(crate) fn canonicalize(self) -> Result<Self, QualifierError> {
        let mut canonical = Self::new();
        for (key, value) in self.entries {
            let key = key.to_ascii_lowercase();
            if !Self::is_valid_key(&key) {
                return Err(QualifierError::InvalidKey { key });
            }
            if value.is_empty() {
                return Err(QualifierError::EmptyValue { key });
            }
            if value.contains(QUALIFIER_PAIR_SEPARATOR) {
                return Err(QualifierError::IllegalValue { key });
            }
            canonical.insert(key, value);
        }
        Ok(canonical)
    }
}

impl PartialEq for Qualifiers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value.as_str()))
    }
}

impl Eq for Qualifiers {}

impl Hash for Qualifiers {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable();
        entries.hash(state);
    }
}

impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{QUALIFIER_PAIR_SEPARATOR}")?;
            }
            write!(f, "{key}{QUALIFIER_KV_SEPARATOR}{}", codec::encode(value))?;
        }
        Ok(())
    }
}

impl FromStr for Qualifiers {
    type Err = QualifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut qualifiers = Self::new();
        for (key, value) in iter {
            qualifiers.insert(key, value);
        }
        qualifiers
    }
}
