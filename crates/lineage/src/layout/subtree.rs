//! Layout of one root person's subtree.
//!
//! The family tree is fed to [`TidyNode`] with partners chained as nested
//! children: partner `k + 1` hangs under partner `k`, and the children of a
//! union hang under its last partner. This makes the centered layout place
//! co-parents and then offspring generation by generation. The chain only
//! exists inside this module; [`SvgPerson::children`] lists partners and
//! children side by side.

use serde::Serialize;

use lineage_core::{geometry::Rect, identifier::Id, style::Style};

use crate::{
    graph::{GraphFamily, GraphRelation, PersonIdx},
    layout::tidy::TidyNode,
};

/// Positioned box of one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgPerson {
    #[serde(flatten)]
    rect: Rect,
    name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    partner: bool,
    #[serde(skip)]
    member: Option<Id>,
    children: Vec<SvgPerson>,
}

impl SvgPerson {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this person is a co-parent listed among the children of the
    /// person who opened the union.
    pub fn is_partner(&self) -> bool {
        self.partner
    }

    pub fn member(&self) -> Option<Id> {
        self.member
    }

    /// Partners and children of every union this person opens, union by
    /// union.
    pub fn children(&self) -> &[SvgPerson] {
        &self.children
    }

    /// Visit this person and everyone below, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SvgPerson)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translate(dx, dy);
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }
}

/// One root person's subtree and its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgRoot {
    #[serde(flatten)]
    rect: Rect,
    person: SvgPerson,
}

impl SvgRoot {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn person(&self) -> &SvgPerson {
        &self.person
    }

    /// Move the subtree so its box starts at `(x, y)`.
    pub(crate) fn place(&mut self, x: i32, y: i32) {
        let (dx, dy) = (x - self.rect.x(), y - self.rect.y());
        self.rect = self.rect.translate(dx, dy);
        self.person.translate(dx, dy);
    }
}

/// Lays out single root persons.
#[derive(Debug, Clone, Copy)]
pub struct SubtreeLayout<'a> {
    style: &'a Style,
    font_ratio: f32,
}

impl<'a> SubtreeLayout<'a> {
    pub fn new(style: &'a Style, font_ratio: f32) -> Self {
        Self { style, font_ratio }
    }

    /// Lay out the subtree of `root`.
    ///
    /// The returned boxes are subtree-local: the leftmost box starts at
    /// `x = 0` and the root box at `y = 0`.
    pub fn layout(&self, family: &GraphFamily, root: PersonIdx) -> SvgRoot {
        let mut tree = self.sizing_node(family, root);
        tree.layout();

        let margin = self.style.person_margin_x();
        let height = self.style.person_height().round() as i32;

        let mut boxes = vec![Rect::default(); family.len()];
        let (mut min_left, mut max_right, mut max_bottom) = (i32::MAX, i32::MIN, 0);

        tree.walk(&mut |node| {
            let x = (node.x() - node.width() / 2.0 + margin).round() as i32;
            let width = ((node.width() - margin * 2.0).round() as i32).max(0);
            let rect = Rect::new(x, node.y().round() as i32, width, height);

            min_left = min_left.min(rect.x());
            max_right = max_right.max(rect.right());
            max_bottom = max_bottom.max(rect.bottom());
            boxes[*node.payload()] = rect;
        });

        let person = self.svg_person(family, root, false, &boxes, min_left);
        SvgRoot {
            rect: Rect::from_size(max_right - min_left, max_bottom),
            person,
        }
    }

    fn sizing_node(&self, family: &GraphFamily, idx: PersonIdx) -> TidyNode<PersonIdx> {
        let person = family.person(idx);
        let width = self
            .style
            .person_node_width(person.label().chars(), self.font_ratio);

        TidyNode::new(idx, width, self.style.person_node_height()).with_children(
            person
                .relations()
                .iter()
                .flat_map(|relation| self.relation_nodes(family, relation)),
        )
    }

    /// Nodes a union contributes under the person who opened it.
    fn relation_nodes(&self, family: &GraphFamily, relation: &GraphRelation) -> Vec<TidyNode<PersonIdx>> {
        let children = relation
            .children()
            .iter()
            .map(|&child| self.sizing_node(family, child));

        let Some((&last, rest)) = relation.partners().split_last() else {
            return children.collect();
        };

        let mut chain = self.sizing_node(family, last).with_children(children);
        for &partner in rest.iter().rev() {
            let mut node = self.sizing_node(family, partner);
            node.push(chain);
            chain = node;
        }
        vec![chain]
    }

    fn svg_person(
        &self,
        family: &GraphFamily,
        idx: PersonIdx,
        partner: bool,
        boxes: &[Rect],
        min_left: i32,
    ) -> SvgPerson {
        let person = family.person(idx);
        let mut children = Vec::new();

        for relation in person.relations() {
            children.extend(
                relation
                    .partners()
                    .iter()
                    .map(|&p| self.svg_person(family, p, true, boxes, min_left)),
            );
            children.extend(
                relation
                    .children()
                    .iter()
                    .map(|&c| self.svg_person(family, c, false, boxes, min_left)),
            );
        }

        SvgPerson {
            rect: boxes[idx].translate(-min_left, 0),
            name: person.label().text().to_owned(),
            partner,
            member: person.member(),
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::graph::GraphBuilder;

    fn layout_first_root(source: &str, font_ratio: f32) -> SvgRoot {
        let document = lineage_parser::parse(source).expect("valid document");
        let families = GraphBuilder::new(&document).build();
        let style = Style::default();
        SubtreeLayout::new(&style, font_ratio).layout(&families[0], families[0].roots()[0])
    }

    fn min_x(root: &SvgRoot) -> i32 {
        let mut min = i32::MAX;
        root.person().walk(&mut |p| min = min.min(p.rect().x()));
        min
    }

    #[test]
    fn test_partner_chain_below_root() {
        let root = layout_first_root("Smith\nJohn + Mary = Bob\n", 1.0);
        let john = root.person();

        // John 108 wide with margins, Mary the same, Bob 96
        assert_eq!(john.rect(), Rect::new(0, 0, 88, 30));
        assert_eq!(john.children().len(), 2);

        let mary = &john.children()[0];
        assert!(mary.is_partner());
        assert_eq!(mary.rect(), Rect::new(0, 55, 88, 30));

        let bob = &john.children()[1];
        assert!(!bob.is_partner());
        assert_eq!(bob.rect(), Rect::new(6, 110, 76, 30));

        assert_eq!(root.rect(), Rect::from_size(88, 140));
    }

    #[test]
    fn test_children_without_partner_hang_under_person() {
        let root = layout_first_root("Smith\nJohn = Al, Bo\n", 1.0);
        let john = root.person();

        assert_eq!(john.children().len(), 2);
        let (al, bo) = (&john.children()[0], &john.children()[1]);
        assert_eq!(al.rect().y(), 55);
        assert_eq!(bo.rect().y(), 55);
        assert!(al.rect().right() <= bo.rect().x());
        assert_eq!(min_x(&root), 0);
    }

    #[test]
    fn test_second_union_lists_partners_in_order() {
        let root = layout_first_root("Smith\nJohn + Mary = Bob\nJohn + Ann = Kate\n", 1.0);
        let names: Vec<_> = root.person().children().iter().map(SvgPerson::name).collect();

        assert_eq!(names, vec!["Mary", "Bob", "Ann", "Kate"]);
    }

    #[test]
    fn test_serialized_shape() {
        let root = layout_first_root("Smith\nJohn + Mary = Bob\n", 1.0);
        let json = serde_json::to_value(&root).expect("serializable");

        assert_eq!(json["width"], 88);
        assert_eq!(json["person"]["name"], "John");
        assert_eq!(json["person"]["children"][0]["partner"], true);
        assert!(json["person"]["children"][1].get("partner").is_none());
        assert!(json["person"].get("member").is_none());
    }

    proptest! {
        #[test]
        fn prop_subtree_starts_at_zero(
            names in prop::collection::vec("[A-Z][a-z]{0,12}", 2..8),
            ratio in 0.3f32..1.5,
        ) {
            let children = names[1..].join(", ");
            let source = format!("Smith\n{} + Ann = {children}\n", names[0]);
            let root = layout_first_root(&source, ratio);

            prop_assert_eq!(min_x(&root), 0);
            let mut max_right = 0;
            root.person().walk(&mut |p| max_right = max_right.max(p.rect().right()));
            prop_assert_eq!(root.rect().width(), max_right);
        }
    }
}
