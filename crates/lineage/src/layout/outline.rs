//! Outline polygons around family blocks.
//!
//! The default [`OutlineStyle::Edges`] outline follows the leftmost and the
//! rightmost box of every row across all roots, one row per generation. Both edges are traced in parallel and joined into a closed
//! loop: left edge top to bottom, then right edge bottom to top.
//!
//! [`OutlineStyle::Levels`] instead hugs every box of the block using the
//! level contours of [`crate::layout::levels`].

use std::collections::BTreeMap;

use log::trace;

use lineage_core::{
    geometry::{Pos, Rect},
    style::Style,
};

use crate::{
    config::OutlineStyle,
    layout::{
        family::SvgFamily,
        levels::{levels_border, levels_from_rects, merge_levels_rects},
    },
};

/// Neighbouring rows whose edges differ by less than this are aligned.
pub const SNAP_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn edge(self, rect: Rect) -> i32 {
        match self {
            Side::Left => rect.x(),
            Side::Right => rect.right(),
        }
    }

    /// Whether `a` lies further out than `b`.
    fn is_outer(self, a: i32, b: i32) -> bool {
        match self {
            Side::Left => a < b,
            Side::Right => a > b,
        }
    }

    fn outward(self, amount: i32) -> i32 {
        match self {
            Side::Left => -amount,
            Side::Right => amount,
        }
    }
}

/// One generation as seen from one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    x: i32,
    y: i32,
    height: i32,
}

/// Traces family outlines.
#[derive(Debug, Clone, Copy)]
pub struct OutlineTracer<'a> {
    style: &'a Style,
    kind: OutlineStyle,
}

impl<'a> OutlineTracer<'a> {
    pub fn new(style: &'a Style, kind: OutlineStyle) -> Self {
        Self { style, kind }
    }

    /// Family-local outline of `family`; empty when it has no roots.
    pub fn trace(&self, family: &SvgFamily) -> Vec<Pos> {
        if family.roots().is_empty() {
            return Vec::new();
        }

        let points = match self.kind {
            OutlineStyle::Edges => self.edges(family),
            OutlineStyle::Levels => self.levels(family),
        };

        trace!(family = family.title().name(), points = points.len(); "Outline traced");
        points
    }

    fn edges(&self, family: &SvgFamily) -> Vec<Pos> {
        let (mut left, mut right) = rayon::join(
            || self.edge(family, Side::Left),
            || self.edge(family, Side::Right),
        );
        right.reverse();
        left.append(&mut right);
        left
    }

    fn edge(&self, family: &SvgFamily, side: Side) -> Vec<Pos> {
        let arrows = self.style.arrows_height();

        let mut outermost: BTreeMap<i32, Rect> = BTreeMap::new();
        family.walk(&mut |person| {
            let rect = person.rect();
            let keep = outermost
                .get(&rect.y())
                .is_none_or(|known| side.is_outer(side.edge(rect), side.edge(*known)));
            if keep {
                outermost.insert(rect.y(), rect);
            }
        });

        let title = family.title().rect();
        let mut rows: Vec<Row> = std::iter::once(Row {
            x: side.edge(title),
            y: title.y(),
            height: title.height() + arrows,
        })
        .chain(outermost.into_values().map(|rect| Row {
            x: side.edge(rect),
            y: rect.y(),
            height: rect.height(),
        }))
        .collect();
        rows.sort_by_key(|row| row.y);

        snap_rows(&mut rows, side);

        for row in rows.iter_mut().skip(2) {
            row.y -= arrows;
            row.height += arrows;
        }

        let mut points: Vec<Pos> = rows
            .iter()
            .flat_map(|row| [Pos::new(row.x, row.y), Pos::new(row.x, row.y + row.height)])
            .collect();
        pad_points(&mut points, side, self.style.family_padding());
        points
    }

    fn levels(&self, family: &SvgFamily) -> Vec<Pos> {
        let pad = self.style.family_padding();
        let title = family.title().rect();

        let mut rects = vec![title.with_height(title.height() + self.style.arrows_height())];
        family.walk(&mut |person| rects.push(person.rect()));

        let mut levels = levels_from_rects(
            rects
                .into_iter()
                .map(|rect| rect.translate(-pad, 0).with_width(rect.width() + pad * 2)),
        );
        if let Some(first) = levels.first_mut() {
            first.grow_up(pad);
        }
        if let Some(last) = levels.last_mut() {
            last.grow_down(pad);
        }

        merge_levels_rects(&mut levels, self.style.family_gap());
        levels_border(&levels)
    }
}

/// Align the edges of neighbouring rows that differ by less than
/// [`SNAP_THRESHOLD`]; the inner row moves out to the outer one.
fn snap_rows(rows: &mut [Row], side: Side) {
    for i in 1..rows.len() {
        let (prev, cur) = (rows[i - 1].x, rows[i].x);
        let delta = prev - cur;

        if delta == 0 || delta.abs() >= SNAP_THRESHOLD {
            continue;
        }

        if side.is_outer(prev, cur) {
            rows[i].x = prev;
        } else {
            rows[i - 1].x = cur;
        }
    }
}

/// Push the top/bottom point pairs of one edge out by `pad`.
///
/// A point drops by `pad` where the edge turns inward below it, so the margin
/// stays even around steps.
fn pad_points(points: &mut [Pos], side: Side, pad: i32) {
    let count = points.len();
    if count < 2 {
        return;
    }

    let mut prev = points[0];
    for i in 1..count - 1 {
        let mut cur = points[i];
        let next = points[i + 1];

        let drops = if prev.x() == cur.x() {
            side.is_outer(cur.x(), next.x())
        } else {
            side.is_outer(prev.x(), cur.x())
        };
        if drops {
            cur = cur.translate(0, pad);
        }
        cur = cur.translate(side.outward(pad), 0);

        prev = points[i];
        points[i] = cur;
    }

    points[0] = points[0].translate(side.outward(pad), -pad);
    points[count - 1] = points[count - 1].translate(side.outward(pad), pad);

    if count > 2 && side.is_outer(points[2].x(), points[1].x()) {
        points[1] = points[1].translate(0, -pad);
        points[2] = points[2].translate(0, -pad);
    }
}
