use lineage_core::identifier::Id;
use lineage_parser::parse;

const BOOK: &str = "\
// Two families joined by a marriage
Smith (Smyth)

John + Mary =
1. Bob
2. Alice Jones

Bob + ? = Tom

Jones

Peter + Alice = Carl
Smyth Bob -> Carl
";

#[test]
fn test_document_structure() {
    let graph = parse(BOOK).expect("valid document");

    let families = graph.families();
    assert_eq!(families.len(), 2);
    assert_eq!(families[0].label().text(), "Smith");
    assert_eq!(families[1].label().text(), "Jones");

    let smith = families[0].relations();
    assert_eq!(smith.len(), 2);
    assert_eq!(smith[0].targets().len(), 2);
    assert!(smith[0].is_union());

    let jones = families[1].relations();
    assert!(jones[0].is_union());
    assert!(!jones[1].is_union());
}

#[test]
fn test_identities_cross_families() {
    let graph = parse(BOOK).expect("valid document");
    let smith = graph.families()[0].relations();
    let jones = graph.families()[1].relations();

    let alice = graph.member_of(&smith[0].targets()[1]);
    assert_eq!(alice, Some(Id::member("Smith", "Alice")));
    assert_eq!(graph.member_of(&jones[0].sources()[1]), alice);

    let bob = graph.member_of(&smith[0].targets()[0]);
    assert_eq!(graph.member_of(&smith[1].sources()[0]), bob);
    assert_eq!(graph.member_of(&jones[1].sources()[0]), bob);

    assert_eq!(graph.member_of(&smith[1].sources()[1]), None);
}

#[test]
fn test_labels_count_characters() {
    let graph = parse("Шевченко\nТарас = Марія\n").expect("valid document");
    let family = &graph.families()[0];

    assert_eq!(family.label().chars(), 8);
    assert_eq!(family.relations()[0].targets()[0].label().chars(), 5);
}

#[test]
fn test_errors_point_at_the_line() {
    let source = "Smith\nJohn + Mary = Bob,\n";
    let err = parse(source).expect_err("dangling comma");

    let diagnostic = &err.diagnostics()[0];
    let span = diagnostic.primary_span().expect("labelled");
    assert!(span.start() >= source.find("John").unwrap_or_default());
    assert!(span.end() <= source.len());
    assert!(diagnostic.help().is_some());
}

#[test]
fn test_empty_document() {
    let graph = parse("// nothing here\n\n").expect("comments only");
    assert!(graph.families().is_empty());
    assert!(graph.identities().is_empty());
}
