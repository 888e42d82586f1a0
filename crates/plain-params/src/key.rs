//! # Field Keys
//!
//! Input maps may be keyed by plain text (`"name"`) or by a symbol-like
//! identifier ([`Symbol`], usually written with [`sym!`](crate::sym)). Both
//! normalize to the same [`FieldKey`], so `"name"` and `sym!(name)` bind the
//! same field.

use std::borrow::Borrow;
use std::fmt;

/// A symbol-like field identifier, the canonical spelling of a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub &'static str);

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Canonical identifier form of an input key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for FieldKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for FieldKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for FieldKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

impl From<Symbol> for FieldKey {
    fn from(key: Symbol) -> Self {
        Self(key.0.to_owned())
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a [`Symbol`] from a bare identifier: `sym!(name)`.
#[macro_export]
macro_rules! sym {
    ($name:ident) => {
        $crate::Symbol(stringify!($name))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_symbol_keys_normalize_to_the_same_key() {
        assert_eq!(FieldKey::from("name"), FieldKey::from(sym!(name)));
        assert_eq!(FieldKey::from(String::from("age")), FieldKey::from(Symbol("age")));
    }

    #[test]
    fn symbol_displays_with_colon() {
        assert_eq!(sym!(age_in_days).to_string(), ":age_in_days");
        assert_eq!(FieldKey::from(sym!(age_in_days)).to_string(), "age_in_days");
    }
}
