//! Line-oriented reader for family documents.
//!
//! Every non-blank line is one of:
//! - a family header: `Smith` or `Smith (Smyth, Smithe)`;
//! - a relation: `John + Mary = Bob, Alice Jones` (`=` forms a union,
//!   `->` records any other relation);
//! - a child line, while a relation written without targets (`John + Mary =`)
//!   collects its children: `1. Bob`. A blank line ends the list.
//!
//! Text after `//` is a comment. Each line is parsed with `winnow`; malformed
//! lines are collected as diagnostics and reading continues with the next
//! line.

use winnow::{
    ModalResult, Parser as _,
    ascii::{digit1, space0, space1},
    combinator::{alt, delimited, opt, preceded, separated, terminated},
    token::take_while,
};

use crate::{
    ast::{Document, Family, Person, PersonKind, Relation},
    error::{Diagnostic, ParseError},
    span::Span,
};

const RELATION_HELP: &str = "relations are written `Father + Mother = Child, Child`";
const CHILD_HELP: &str = "list one child per line, optionally numbered: `1. Bob`";
const HEADER_HELP: &str = "a family starts with a line holding only its surname";

/// A person before spans are attached.
#[derive(Debug, Clone, Copy)]
struct RawPerson<'src> {
    text: &'src str,
    words: Option<(&'src str, Option<&'src str>)>,
}

impl<'src> RawPerson<'src> {
    fn into_person(self, source: &'src str) -> Person<'src> {
        let kind = match self.words {
            None => PersonKind::Unknown,
            Some((first, second)) => PersonKind::Named { first, second },
        };
        Person {
            span: Span::of(source, self.text),
            kind,
        }
    }
}

#[derive(Debug)]
struct RawRelation<'src> {
    sources: Vec<RawPerson<'src>>,
    is_union: bool,
    targets: Option<Vec<RawPerson<'src>>>,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '_'
}

fn name<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    take_while(1.., is_name_char).parse_next(input)
}

fn words<'src>(input: &mut &'src str) -> ModalResult<(&'src str, Option<&'src str>)> {
    (name, opt(preceded(space1, name))).parse_next(input)
}

fn person<'src>(input: &mut &'src str) -> ModalResult<RawPerson<'src>> {
    alt((
        "?".map(|text| RawPerson { text, words: None }),
        words.with_taken().map(|(words, text)| RawPerson {
            text,
            words: Some(words),
        }),
    ))
    .parse_next(input)
}

fn sources<'src>(input: &mut &'src str) -> ModalResult<Vec<RawPerson<'src>>> {
    separated(1.., delimited(space0, person, space0), '+').parse_next(input)
}

fn targets<'src>(input: &mut &'src str) -> ModalResult<Vec<RawPerson<'src>>> {
    separated(1.., delimited(space0, person, space0), ',').parse_next(input)
}

fn relation_op(input: &mut &str) -> ModalResult<bool> {
    alt(("->".value(false), "=".value(true))).parse_next(input)
}

fn relation_line<'src>(input: &mut &'src str) -> ModalResult<RawRelation<'src>> {
    (sources, relation_op, opt(targets), space0)
        .map(|(sources, is_union, targets, _)| RawRelation {
            sources,
            is_union,
            targets,
        })
        .parse_next(input)
}

fn child_line<'src>(input: &mut &'src str) -> ModalResult<Vec<RawPerson<'src>>> {
    (opt(terminated(digit1, '.')), targets)
        .map(|(_, children)| children)
        .parse_next(input)
}

fn aliases<'src>(input: &mut &'src str) -> ModalResult<Vec<&'src str>> {
    delimited(
        '(',
        separated(1.., delimited(space0, name, space0), ','),
        ')',
    )
    .parse_next(input)
}

fn family_header<'src>(input: &mut &'src str) -> ModalResult<(&'src str, Vec<&'src str>)> {
    (name, opt(preceded(space0, aliases)), space0)
        .map(|(name, aliases, _)| (name, aliases.unwrap_or_default()))
        .parse_next(input)
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn is_relation(content: &str) -> bool {
    content.contains('=') || content.contains("->")
}

/// Diagnostic for a line that failed at byte `offset` of `content`.
fn syntax_error(
    source: &str,
    content: &str,
    offset: usize,
    message: &str,
    help: &str,
) -> Diagnostic {
    let line = Span::of(source, content);
    let at = line.start() + offset;
    let label = if offset >= content.len() {
        "line ends too early"
    } else {
        "unexpected text"
    };
    Diagnostic::error(message)
        .with_label(Span::new(at..line.end()), label)
        .with_help(help)
}

/// Parse a whole document into its syntax tree.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per malformed line.
pub(crate) fn parse_document(source: &str) -> Result<Document<'_>, ParseError> {
    let mut document = Document::default();
    let mut diagnostics = Vec::new();
    let mut awaiting_children = false;

    for line in source.lines() {
        let content = strip_comment(line).trim();

        if content.is_empty() {
            awaiting_children = false;
            continue;
        }

        let span = Span::of(source, content);

        if is_relation(content) {
            awaiting_children = false;

            let Some(family) = document.families.last_mut() else {
                diagnostics.push(
                    Diagnostic::error("relation outside of a family")
                        .with_label(span, "this relation")
                        .with_help(HEADER_HELP),
                );
                continue;
            };

            match relation_line.parse(content) {
                Ok(raw) => {
                    awaiting_children = raw.targets.is_none();
                    family.relations.push(Relation {
                        span,
                        sources: raw
                            .sources
                            .into_iter()
                            .map(|person| person.into_person(source))
                            .collect(),
                        targets: raw
                            .targets
                            .unwrap_or_default()
                            .into_iter()
                            .map(|person| person.into_person(source))
                            .collect(),
                        is_union: raw.is_union,
                    });
                }
                Err(err) => diagnostics.push(syntax_error(
                    source,
                    content,
                    err.offset(),
                    "invalid relation",
                    RELATION_HELP,
                )),
            }
            continue;
        }

        if awaiting_children {
            match child_line.parse(content) {
                Ok(children) => {
                    let relation = document
                        .families
                        .last_mut()
                        .and_then(|family| family.relations.last_mut());
                    if let Some(relation) = relation {
                        relation.span = relation.span.union(span);
                        relation.targets.extend(
                            children
                                .into_iter()
                                .map(|person| person.into_person(source)),
                        );
                    }
                }
                Err(err) => diagnostics.push(syntax_error(
                    source,
                    content,
                    err.offset(),
                    "invalid child list",
                    CHILD_HELP,
                )),
            }
            continue;
        }

        match family_header.parse(content) {
            Ok((name, aliases)) => document.families.push(Family {
                span,
                name,
                aliases,
                relations: Vec::new(),
            }),
            Err(err) => diagnostics.push(syntax_error(
                source,
                content,
                err.offset(),
                "expected a family name or a relation",
                HEADER_HELP,
            )),
        }
    }

    if diagnostics.is_empty() {
        Ok(document)
    } else {
        Err(diagnostics.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_words<'a>(person: &Person<'a>) -> Option<(&'a str, Option<&'a str>)> {
        match person.kind {
            PersonKind::Unknown => None,
            PersonKind::Named { first, second } => Some((first, second)),
        }
    }

    #[test]
    fn test_family_with_inline_relation() {
        let source = "Smith\n\nJohn + Mary = Bob, Alice Jones\n";
        let document = parse_document(source).expect("valid document");

        assert_eq!(document.families.len(), 1);
        let family = &document.families[0];
        assert_eq!(family.name, "Smith");
        assert_eq!(family.relations.len(), 1);

        let relation = &family.relations[0];
        assert!(relation.is_union);
        assert_eq!(relation.sources.len(), 2);
        assert_eq!(relation.targets.len(), 2);
        assert_eq!(first_words(&relation.sources[1]), Some(("Mary", None)));
        assert_eq!(
            first_words(&relation.targets[1]),
            Some(("Alice", Some("Jones")))
        );
    }

    #[test]
    fn test_person_spans_point_into_source() {
        let source = "Smith\nJohn + Mary = Bob";
        let document = parse_document(source).expect("valid document");
        let relation = &document.families[0].relations[0];

        let bob = relation.targets[0].span;
        assert_eq!(&source[bob.start()..bob.end()], "Bob");
        let mary = relation.sources[1].span;
        assert_eq!(&source[mary.start()..mary.end()], "Mary");
    }

    #[test]
    fn test_numbered_child_list() {
        let source = "Smith\n\nJohn + ? =\n1. Bob\n2. Kate\n\nBob = Tom\n";
        let document = parse_document(source).expect("valid document");
        let relations = &document.families[0].relations;

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].targets.len(), 2);
        assert_eq!(relations[0].sources[1].kind, PersonKind::Unknown);
        assert_eq!(first_words(&relations[1].sources[0]), Some(("Bob", None)));
    }

    #[test]
    fn test_relation_without_targets_then_blank() {
        let source = "Smith\nJohn =\n\nJones\n";
        let document = parse_document(source).expect("valid document");

        assert_eq!(document.families.len(), 2);
        assert!(document.families[0].relations[0].targets.is_empty());
    }

    #[test]
    fn test_non_union_relation() {
        let source = "Smith\nJohn -> Bob\n";
        let document = parse_document(source).expect("valid document");

        assert!(!document.families[0].relations[0].is_union);
    }

    #[test]
    fn test_header_aliases_and_comments() {
        let source = "// family book\nSmith (Smyth, Smithe) // old spelling\n";
        let document = parse_document(source).expect("valid document");

        assert_eq!(document.families[0].aliases, vec!["Smyth", "Smithe"]);
    }

    #[test]
    fn test_relation_outside_family() {
        let err = parse_document("John + Mary = Bob").expect_err("no family");

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(
            err.diagnostics()[0].message(),
            "relation outside of a family"
        );
    }

    #[test]
    fn test_collects_every_bad_line() {
        let source = "Smith\nJohn + = Bob\nBob Tom Kate\n";
        let err = parse_document(source).expect_err("two bad lines");

        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "invalid relation");
        assert_eq!(
            err.diagnostics()[1].message(),
            "expected a family name or a relation"
        );
    }
}
