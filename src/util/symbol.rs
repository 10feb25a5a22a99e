//! Canonical configuration keys.
//!
//! Target options arrive from many places (CLI flags, TOML profiles, JSON
//! maps) with slightly different spellings. A [`Symbol`] is the one
//! canonical spelling every key is normalized to before it is looked at:
//! surrounding whitespace trimmed and `-` folded to `_`, so that
//! `www-form-encoded-password` and `www_form_encoded_password` name the
//! same option.
//!
//! The folding is stricter than a plain string-to-symbol conversion: two
//! keys that differ only in `-` versus `_` become the same symbol, and a
//! map holding both is rejected as a duplicate.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated, canonical configuration key.
///
/// Valid symbols are non-empty, start with an ASCII letter or `_`, and
/// contain only ASCII letters, digits and `_`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    inner: String,
}

/// Error returned when a key cannot be represented as a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSymbol(pub String);

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid key {:?}: keys must start with a letter or `_` and contain only letters, digits, `_` or `-`",
            self.0
        )
    }
}

impl std::error::Error for InvalidSymbol {}

impl Symbol {
    /// Normalize a raw key into its canonical form.
    pub fn parse(raw: &str) -> Result<Self, InvalidSymbol> {
        let canonical: String = raw
            .trim()
            .chars()
            .map(|c| if c == '-' { '_' } else { c })
            .collect();

        let mut chars = canonical.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InvalidSymbol(raw.to_string()));
        }

        Ok(Symbol { inner: canonical })
    }

    /// Get the canonical key.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl FromStr for Symbol {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl Deref for Symbol {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<str> for Symbol {
    #[inline]
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.inner)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Symbol::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_fold_to_underscores() {
        let a = Symbol::parse("www-form-encoded-password").unwrap();
        let b = Symbol::parse("www_form_encoded_password").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "www_form_encoded_password");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(Symbol::parse("  host ").unwrap().as_str(), "host");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_ne!(Symbol::parse("Host").unwrap(), Symbol::parse("host").unwrap());
    }

    #[test]
    fn test_rejects_non_tokens() {
        assert!(Symbol::parse("").is_err());
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("9lives").is_err());
        assert!(Symbol::parse("user name").is_err());
        assert!(Symbol::parse("a.b").is_err());
    }

    #[test]
    fn test_borrow_lookup() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(Symbol::parse("port").unwrap(), 22);
        assert_eq!(map.get("port"), Some(&22));
    }
}
