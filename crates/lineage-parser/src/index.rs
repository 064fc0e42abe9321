//! Identity resolution.
//!
//! Maps every person reference of a parsed document to the canonical member
//! it denotes and lowers the syntax tree into a [`DocumentGraph`].
//!
//! A member `F::Name` is defined by a child in family `F` or by a one-word
//! source of `F`. References resolve as follows:
//! - `?` denotes nobody;
//! - a target `Name` or `Name Surname` in `F` is `F::Name`;
//! - a source `Surname Name` is `Surname::Name`, with family aliases mapped
//!   to their canonical family;
//! - a source `Name` in `F` is the member adopted into `F` under that name
//!   (a child of another family written `Name F` there) or else `F::Name`.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use lineage_core::{
    document::{DocumentGraph, IdentityIndex, Label, PersonRef, RefId, SourceFamily, SourceRelation},
    identifier::Id,
};

use crate::ast::{Document, Person, Role};

struct Resolver<'src> {
    /// Canonical family name to the names of its members.
    members: IndexMap<&'src str, HashSet<&'src str>>,
    /// Alias to canonical family name.
    aliases: HashMap<&'src str, &'src str>,
    /// `(new surname, given name)` to the member's identity in its birth family.
    adopted: HashMap<(&'src str, &'src str), Id>,
}

impl<'src> Resolver<'src> {
    fn new(document: &Document<'src>) -> Self {
        let mut resolver = Self {
            members: IndexMap::new(),
            aliases: HashMap::new(),
            adopted: HashMap::new(),
        };

        for family in &document.families {
            resolver.members.entry(family.name).or_default();
            for alias in &family.aliases {
                resolver.aliases.insert(*alias, family.name);
            }
        }

        for family in &document.families {
            for person in family.relations.iter().flat_map(|r| &r.targets) {
                if let (Some(name), Some(surname)) =
                    (person.given_name(Role::Target), person.surname(Role::Target))
                {
                    let surname = resolver.canonical(surname);
                    resolver
                        .adopted
                        .insert((surname, name), Id::member(family.name, name));
                }
            }
        }

        for family in &document.families {
            let mut defined = Vec::new();
            for relation in &family.relations {
                for person in &relation.sources {
                    if person.surname(Role::Source).is_some() {
                        continue;
                    }
                    let Some(name) = person.given_name(Role::Source) else {
                        continue;
                    };
                    if !resolver.adopted.contains_key(&(family.name, name)) {
                        defined.push(name);
                    }
                }
                defined.extend(
                    relation
                        .targets
                        .iter()
                        .filter_map(|person| person.given_name(Role::Target)),
                );
            }
            resolver.members.entry(family.name).or_default().extend(defined);
        }

        resolver
    }

    fn canonical(&self, surname: &'src str) -> &'src str {
        self.aliases.get(surname).copied().unwrap_or(surname)
    }

    fn resolve(&self, family: &'src str, person: &Person<'src>, role: Role) -> Option<Id> {
        let name = person.given_name(role)?;

        match (role, person.surname(role)) {
            (Role::Target, _) => Some(Id::member(family, name)),
            (Role::Source, Some(surname)) => {
                let surname = self.canonical(surname);
                if self
                    .members
                    .get(surname)
                    .is_some_and(|members| members.contains(name))
                {
                    Some(Id::member(surname, name))
                } else if let Some(member) = self.adopted.get(&(surname, name)) {
                    Some(*member)
                } else {
                    warn!(
                        family = family,
                        surname = surname,
                        name = name;
                        "Reference to an unknown member"
                    );
                    None
                }
            }
            (Role::Source, None) => self
                .adopted
                .get(&(family, name))
                .copied()
                .or_else(|| Some(Id::member(family, name))),
        }
    }
}

fn person_ref<'src>(
    resolver: &Resolver<'src>,
    identities: &mut IdentityIndex,
    family: &'src str,
    person: &Person<'src>,
    role: Role,
) -> PersonRef {
    let id = RefId::new(person.span.start());
    if let Some(member) = resolver.resolve(family, person, role) {
        identities.insert(id, member);
    }
    PersonRef::new(id, Label::new(person.display_name(role)))
}

/// Lower a syntax tree into the snapshot consumed by the layout engine.
pub(crate) fn build_graph<'src>(document: &Document<'src>) -> DocumentGraph {
    let resolver = Resolver::new(document);
    let mut identities = IdentityIndex::new();

    let families = document
        .families
        .iter()
        .map(|family| {
            let relations = family
                .relations
                .iter()
                .map(|relation| {
                    let sources = relation
                        .sources
                        .iter()
                        .map(|p| person_ref(&resolver, &mut identities, family.name, p, Role::Source))
                        .collect();
                    let targets = relation
                        .targets
                        .iter()
                        .map(|p| person_ref(&resolver, &mut identities, family.name, p, Role::Target))
                        .collect();
                    SourceRelation::new(sources, targets, relation.is_union)
                })
                .collect();
            SourceFamily::new(Label::new(family.name), relations)
        })
        .collect();

    debug!(
        families = document.families.len(),
        resolved = identities.len();
        "Resolved person references"
    );

    DocumentGraph::new(families, identities)
}
