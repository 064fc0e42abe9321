//! Read-only document snapshot consumed by the layout engine.
//!
//! A [`DocumentGraph`] holds the parsed family structure of one document
//! together with an [`IdentityIndex`] that maps every parsed person
//! reference to the canonical member it denotes. The snapshot is valid for
//! one layout request; callers refresh it when the document changes.

use std::collections::HashMap;

use crate::identifier::Id;

/// Source text of a name together with its length in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    chars: usize,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { text, chars }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters (not bytes) in the label.
    pub fn chars(&self) -> usize {
        self.chars
    }
}

/// Identifies one parsed person reference.
///
/// The value is the byte offset of the reference in its source, which is
/// unique within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(usize);

impl RefId {
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    pub fn offset(self) -> usize {
        self.0
    }
}

/// A person as written in a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRef {
    id: RefId,
    label: Label,
}

impl PersonRef {
    pub fn new(id: RefId, label: Label) -> Self {
        Self { id, label }
    }

    pub fn id(&self) -> RefId {
        self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

/// One relation line: source persons, target persons, and whether the
/// relation forms a union (a family definition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRelation {
    sources: Vec<PersonRef>,
    targets: Vec<PersonRef>,
    is_union: bool,
}

impl SourceRelation {
    pub fn new(sources: Vec<PersonRef>, targets: Vec<PersonRef>, is_union: bool) -> Self {
        Self {
            sources,
            targets,
            is_union,
        }
    }

    pub fn sources(&self) -> &[PersonRef] {
        &self.sources
    }

    pub fn targets(&self) -> &[PersonRef] {
        &self.targets
    }

    pub fn is_union(&self) -> bool {
        self.is_union
    }
}

/// A surname section of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFamily {
    label: Label,
    relations: Vec<SourceRelation>,
}

impl SourceFamily {
    pub fn new(label: Label, relations: Vec<SourceRelation>) -> Self {
        Self { label, relations }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn relations(&self) -> &[SourceRelation] {
        &self.relations
    }
}

/// Maps parsed person references to canonical member identities.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    members: HashMap<RefId, Id>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `reference` denotes `member`.
    pub fn insert(&mut self, reference: RefId, member: Id) {
        self.members.insert(reference, member);
    }

    /// Returns the member denoted by `reference`, if it was resolved.
    pub fn member(&self, reference: RefId) -> Option<Id> {
        self.members.get(&reference).copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Families of one document plus the identity index for its references.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    families: Vec<SourceFamily>,
    identities: IdentityIndex,
}

impl DocumentGraph {
    pub fn new(families: Vec<SourceFamily>, identities: IdentityIndex) -> Self {
        Self {
            families,
            identities,
        }
    }

    pub fn families(&self) -> &[SourceFamily] {
        &self.families
    }

    pub fn identities(&self) -> &IdentityIndex {
        &self.identities
    }

    /// Member identity of a person reference.
    pub fn member_of(&self, person: &PersonRef) -> Option<Id> {
        self.identities.member(person.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_counts_chars() {
        let label = Label::new("Сергій");
        assert_eq!(label.chars(), 6);
        assert!(label.text().len() > 6);
    }

    #[test]
    fn test_member_of_unresolved() {
        let person = PersonRef::new(RefId::new(4), Label::new("?"));
        let mut identities = IdentityIndex::new();
        let graph = DocumentGraph::new(Vec::new(), identities.clone());
        assert_eq!(graph.member_of(&person), None);

        identities.insert(RefId::new(4), Id::member("Smith", "Bob"));
        let graph = DocumentGraph::new(Vec::new(), identities);
        assert_eq!(graph.member_of(&person), Some(Id::member("Smith", "Bob")));
    }
}
