//! Identifier management using string interning.
//!
//! Family labels and member identities are compared constantly while the
//! graph is built and while links between families are detected, so they are
//! stored as interned symbols rather than owned strings.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
///
/// Layout tasks run on several threads, hence the `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned identifier.
///
/// Member identities are nested ids of the form `Family::Name`.
///
/// # Examples
///
/// ```
/// use lineage_core::identifier::Id;
///
/// let family = Id::new("Smith");
/// let member = family.create_nested(Id::new("Alice"));
/// assert_eq!(member, "Smith::Alice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        with_interner(|interner| Self(interner.get_or_intern(name)))
    }

    /// Creates a nested ID by combining this ID and `child_id` with a `::` separator.
    pub fn create_nested(&self, child_id: Id) -> Self {
        with_interner(|interner| {
            let parent_str = interner
                .resolve(self.0)
                .expect("Parent ID should exist in interner");
            let child_str = interner
                .resolve(child_id.0)
                .expect("Child ID should exist in interner");
            let nested_name = format!("{parent_str}::{child_str}");
            Self(interner.get_or_intern(&nested_name))
        })
    }

    /// Shorthand for the member identity `family::name`.
    pub fn member(family: &str, name: &str) -> Self {
        Id::new(family).create_nested(Id::new(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        write!(f, "{value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_some_and(|value| value == other)
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("Smith"), Id::new("Smith"));
        assert_ne!(Id::new("Smith"), Id::new("Jones"));
    }

    #[test]
    fn test_member_matches_nested() {
        let nested = Id::new("Smith").create_nested(Id::new("Bob"));
        assert_eq!(Id::member("Smith", "Bob"), nested);
        assert_eq!(nested.to_string(), "Smith::Bob");
    }

    #[test]
    fn test_unicode_names() {
        let id = Id::member("Ключник", "Сергій");
        assert!(id == "Ключник::Сергій");
    }
}
