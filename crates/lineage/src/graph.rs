//! Tree-shaped model of a document.
//!
//! [`GraphBuilder`] turns the flat relation lists of a [`DocumentGraph`] into
//! one [`GraphFamily`] per surname section. Persons live in a per-family
//! arena and are addressed by [`PersonIdx`]; a person who opens a union after
//! being introduced as a child is looked up through their member identity
//! and reused, so every person appears in exactly one place of the tree.

use std::collections::HashMap;

use log::{debug, trace};

use lineage_core::{
    document::{DocumentGraph, Label, PersonRef, SourceFamily},
    identifier::Id,
};

/// Index of a person in its family's arena.
pub type PersonIdx = usize;

/// One person node.
#[derive(Debug, Clone)]
pub struct GraphPerson {
    label: Label,
    member: Option<Id>,
    relations: Vec<GraphRelation>,
}

impl GraphPerson {
    fn new(label: Label, member: Option<Id>) -> Self {
        Self {
            label,
            member,
            relations: Vec::new(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Canonical member identity, `None` for unknown persons.
    pub fn member(&self) -> Option<Id> {
        self.member
    }

    /// Unions this person opens as first parent.
    pub fn relations(&self) -> &[GraphRelation] {
        &self.relations
    }
}

/// One union: co-parents beyond the opening person, and children.
#[derive(Debug, Clone, Default)]
pub struct GraphRelation {
    partners: Vec<PersonIdx>,
    children: Vec<PersonIdx>,
}

impl GraphRelation {
    pub fn partners(&self) -> &[PersonIdx] {
        &self.partners
    }

    pub fn children(&self) -> &[PersonIdx] {
        &self.children
    }
}

/// A surname section with its root persons.
#[derive(Debug, Clone)]
pub struct GraphFamily {
    label: Label,
    persons: Vec<GraphPerson>,
    roots: Vec<PersonIdx>,
}

impl GraphFamily {
    fn new(label: Label) -> Self {
        Self {
            label,
            persons: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn roots(&self) -> &[PersonIdx] {
        &self.roots
    }

    /// # Panics
    ///
    /// Panics if `idx` was not produced by this family.
    pub fn person(&self, idx: PersonIdx) -> &GraphPerson {
        &self.persons[idx]
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    fn push(&mut self, person: GraphPerson) -> PersonIdx {
        self.persons.push(person);
        self.persons.len() - 1
    }
}

/// Builds [`GraphFamily`] trees from a document snapshot.
pub struct GraphBuilder<'a> {
    document: &'a DocumentGraph,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(document: &'a DocumentGraph) -> Self {
        Self { document }
    }

    /// Build every family of the document, in source order.
    pub fn build(&self) -> Vec<GraphFamily> {
        let families: Vec<_> = self
            .document
            .families()
            .iter()
            .map(|family| self.build_family(family))
            .collect();

        debug!(families = families.len(); "Family graphs built");
        families
    }

    fn build_family(&self, source: &SourceFamily) -> GraphFamily {
        let mut family = GraphFamily::new(source.label().clone());
        let mut by_member: HashMap<Id, PersonIdx> = HashMap::new();

        for relation in source.relations().iter().filter(|r| r.is_union()) {
            let Some((first, partners)) = relation.sources().split_first() else {
                continue;
            };

            let member = self.document.member_of(first);
            let anchor = match member.and_then(|member| by_member.get(&member).copied()) {
                Some(idx) => idx,
                None => {
                    let idx = self.register(&mut family, &mut by_member, first);
                    family.roots.push(idx);
                    idx
                }
            };

            let partners = partners
                .iter()
                .map(|person| self.register(&mut family, &mut by_member, person))
                .collect();
            let children = relation
                .targets()
                .iter()
                .map(|person| self.register(&mut family, &mut by_member, person))
                .collect();

            family.persons[anchor].relations.push(GraphRelation { partners, children });
        }

        trace!(
            family = family.label().text(),
            persons = family.len(),
            roots = family.roots().len();
            "Family graph"
        );

        family
    }

    fn register(
        &self,
        family: &mut GraphFamily,
        by_member: &mut HashMap<Id, PersonIdx>,
        person: &PersonRef,
    ) -> PersonIdx {
        let member = self.document.member_of(person);
        let idx = family.push(GraphPerson::new(person.label().clone(), member));
        if let Some(member) = member {
            by_member.insert(member, idx);
        }
        idx
    }
}
