//! Family blocks.
//!
//! [`FamilyComposer`] places the root subtrees of one family side by side
//! below a centered title. Everything inside a block is family-local; the
//! block origin is the only global value, set by [`FamilyComposer::stack`]
//! and later moved by packing.

use serde::Serialize;

use lineage_core::{
    document::Label,
    geometry::{Pos, Rect},
    style::Style,
};

use crate::layout::subtree::{SvgPerson, SvgRoot};

/// The family name box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleNode {
    #[serde(flatten)]
    rect: Rect,
    name: String,
}

impl TitleNode {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One positioned family block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgFamily {
    #[serde(flatten)]
    rect: Rect,
    title: TitleNode,
    roots: Vec<SvgRoot>,
    bounding: Vec<Pos>,
}

impl SvgFamily {
    /// Block box. Its origin is global, its content is family-local.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn origin(&self) -> Pos {
        self.rect.origin()
    }

    pub fn title(&self) -> &TitleNode {
        &self.title
    }

    pub fn roots(&self) -> &[SvgRoot] {
        &self.roots
    }

    /// Closed outline polygon, family-local.
    pub fn bounding(&self) -> &[Pos] {
        &self.bounding
    }

    /// Visit every person of every root, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SvgPerson)) {
        for root in &self.roots {
            root.person().walk(visit);
        }
    }

    pub(crate) fn set_bounding(&mut self, bounding: Vec<Pos>) {
        self.bounding = bounding;
    }

    pub(crate) fn set_origin(&mut self, origin: Pos) {
        self.rect = self.rect.with_origin(origin);
    }
}

/// Composes family blocks out of laid out root subtrees.
#[derive(Debug, Clone, Copy)]
pub struct FamilyComposer<'a> {
    style: &'a Style,
    font_ratio: f32,
}

impl<'a> FamilyComposer<'a> {
    pub fn new(style: &'a Style, font_ratio: f32) -> Self {
        Self { style, font_ratio }
    }

    /// Place `roots` left to right and center the title over them.
    ///
    /// The block origin is `(0, 0)` and the outline is left empty.
    pub fn compose(&self, label: &Label, mut roots: Vec<SvgRoot>) -> SvgFamily {
        let style = self.style;
        let pad = style.family_padding();
        let top = style.roots_top();

        let mut x = pad;
        let mut max_height = 0;
        for root in &mut roots {
            root.place(x, top);
            x += root.rect().width() + style.family_gap();
            max_height = max_height.max(root.rect().height());
        }

        let title_width = style.title_width(label.chars(), self.font_ratio);
        let (title_x, width) = match (roots.first(), roots.last()) {
            (Some(first), Some(last)) => {
                let span = last.rect().right() - first.rect().x();
                let widths: i32 = roots.iter().map(|root| root.rect().width()).sum();
                let gaps = (roots.len() as i32 - 1) * style.family_gap();
                (
                    first.rect().x() + span / 2 - title_width / 2,
                    pad * 2 + widths + gaps,
                )
            }
            _ => (pad, pad * 2 + title_width),
        };

        let title = TitleNode {
            rect: Rect::new(title_x, pad, title_width, style.title_height()),
            name: label.text().to_owned(),
        };

        SvgFamily {
            rect: Rect::from_size(width, top + max_height + pad),
            title,
            roots,
            bounding: Vec::new(),
        }
    }

    /// Stack blocks top to bottom in the given order.
    pub fn stack(families: &mut [SvgFamily]) {
        let mut y = 0;
        for family in families {
            family.set_origin(Pos::new(0, y));
            y += family.rect().height();
        }
    }
}
