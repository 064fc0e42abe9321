//! Syntax tree produced by the reader, before identities are resolved.

use crate::span::Span;

/// A person as written in a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Person<'src> {
    pub span: Span,
    pub kind: PersonKind<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersonKind<'src> {
    /// `?`
    Unknown,
    /// A given name with an optional second word.
    ///
    /// In sources the second word is the given name and the first one the
    /// surname of another family (`Smith Alice`); in targets the second word
    /// is a new surname (`Alice Jones`). [`Person::given_name`] and
    /// [`Person::surname`] interpret the words by position.
    Named {
        first: &'src str,
        second: Option<&'src str>,
    },
}

/// Where a person appears in a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Source,
    Target,
}

impl<'src> Person<'src> {
    pub fn given_name(&self, role: Role) -> Option<&'src str> {
        match (self.kind, role) {
            (PersonKind::Unknown, _) => None,
            (PersonKind::Named { first, second }, Role::Source) => Some(second.unwrap_or(first)),
            (PersonKind::Named { first, .. }, Role::Target) => Some(first),
        }
    }

    /// The other family named by a two-word reference.
    pub fn surname(&self, role: Role) -> Option<&'src str> {
        match (self.kind, role) {
            (PersonKind::Unknown, _) => None,
            (PersonKind::Named { second: None, .. }, _) => None,
            (PersonKind::Named { first, .. }, Role::Source) => Some(first),
            (PersonKind::Named { second, .. }, Role::Target) => second,
        }
    }

    /// Text shown for this person in the diagram.
    pub fn display_name(&self, role: Role) -> &'src str {
        self.given_name(role).unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relation<'src> {
    pub span: Span,
    pub sources: Vec<Person<'src>>,
    pub targets: Vec<Person<'src>>,
    pub is_union: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Family<'src> {
    pub span: Span,
    pub name: &'src str,
    pub aliases: Vec<&'src str>,
    pub relations: Vec<Relation<'src>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Document<'src> {
    pub families: Vec<Family<'src>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named<'a>(first: &'a str, second: Option<&'a str>) -> Person<'a> {
        Person {
            span: Span::default(),
            kind: PersonKind::Named { first, second },
        }
    }

    #[test]
    fn test_two_words_by_role() {
        let person = named("Smith", Some("Alice"));

        assert_eq!(person.given_name(Role::Source), Some("Alice"));
        assert_eq!(person.surname(Role::Source), Some("Smith"));
        assert_eq!(person.given_name(Role::Target), Some("Smith"));
        assert_eq!(person.surname(Role::Target), Some("Alice"));
    }

    #[test]
    fn test_unknown_person() {
        let person = Person {
            span: Span::default(),
            kind: PersonKind::Unknown,
        };

        assert_eq!(person.given_name(Role::Source), None);
        assert_eq!(person.display_name(Role::Target), "?");
    }
}
