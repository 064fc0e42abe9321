//! Cross-family packing.
//!
//! A person who is a descendant in one family block and a root of another
//! links the two blocks. The dependent block is moved on a coarse grid so its
//! root lands as close as possible to the linked descendant without any of
//! its cells overlapping cells of another block, the anchor included.
//!
//! Blocks are approximated by [figure cells](figure_cells): one padded band
//! per generation, the title band included, sampled at cell centers.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use lineage_core::{
    geometry::{Corner, Pos, Rect},
    identifier::Id,
    style::Style,
};

use crate::layout::{family::SvgFamily, subtree::SvgPerson};

/// One applied move of a dependent family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    anchor: usize,
    family: usize,
    offset: Pos,
}

impl Placement {
    /// Index of the family that stayed in place.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Index of the family that was moved.
    pub fn family(&self) -> usize {
        self.family
    }

    /// Applied translation in diagram units.
    pub fn offset(&self) -> Pos {
        self.offset
    }
}

/// A descendant of `anchor` that is a root of `family`.
#[derive(Debug, Clone, Copy)]
struct Link {
    anchor: usize,
    family: usize,
    /// Linked descendant, local to the anchor block.
    person: Rect,
    /// Linked root, local to the dependent block.
    root: Rect,
}

/// Moves linked families next to each other.
#[derive(Debug, Clone, Copy)]
pub struct Packer<'a> {
    style: &'a Style,
}

impl<'a> Packer<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self { style }
    }

    /// Pack `families` in place and return the moves that were applied.
    ///
    /// Families are expected to be stacked already; a family without links
    /// keeps its origin.
    pub fn pack(&self, families: &mut [SvgFamily]) -> Vec<Placement> {
        let links = find_links(families);
        if links.is_empty() {
            return Vec::new();
        }

        let step = self.style.grid_step();
        let mut own: Vec<HashSet<Pos>> = families
            .iter()
            .map(|family| figure_cells(family, self.style))
            .collect();
        let mut occupied: HashSet<Pos> = own.iter().flatten().copied().collect();

        let mut placements = Vec::with_capacity(links.len());
        for link in links {
            let (a, b) = (link.anchor, link.family);

            let anchor_cell = cell_of(families[a].origin(), link.person, step);
            let moving_cell = cell_of(families[b].origin(), link.root, step);
            let distance = anchor_cell.sub_point(moving_cell);

            for cell in &own[b] {
                occupied.remove(cell);
            }
            let cells = search_offset(&occupied, &own[b], distance);

            let moved: HashSet<Pos> = own[b].iter().map(|cell| cell.add_point(cells)).collect();
            occupied.extend(moved.iter().copied());
            own[b] = moved;

            let offset = cells.scale(step);
            let origin = families[b].origin().add_point(offset);
            families[b].set_origin(origin);

            debug!(
                anchor = families[a].title().name(),
                family = families[b].title().name(),
                dx = offset.x(),
                dy = offset.y(),
                before = distance.abs_sum(),
                after = distance.sub_point(cells).abs_sum();
                "Family placed"
            );

            placements.push(Placement {
                anchor: a,
                family: b,
                offset,
            });
        }

        placements
    }
}

/// Grid cells occupied by `family`, in diagram-global cell coordinates.
///
/// A cell is occupied when its center lies inside one of the family bands:
/// the title band (title plus arrow band below it) and one band per
/// generation spanning all roots (boxes plus arrow band above them), each
/// padded by the family padding.
pub fn figure_cells(family: &SvgFamily, style: &Style) -> HashSet<Pos> {
    let step = style.grid_step();
    let pad = style.family_padding();
    let arrows = style.arrows_height();
    let origin = family.origin();

    let title = family.title().rect();
    let mut bands = vec![title.with_height(title.height() + arrows)];

    let mut rows: HashMap<i32, (i32, i32, i32)> = HashMap::new();
    family.walk(&mut |person| {
        let rect = person.rect();
        let row = rows
            .entry(rect.y())
            .or_insert((rect.x(), rect.right(), rect.bottom()));
        row.0 = row.0.min(rect.x());
        row.1 = row.1.max(rect.right());
        row.2 = row.2.max(rect.bottom());
    });
    bands.extend(
        rows.into_iter()
            .map(|(y, (left, right, bottom))| Rect::new(left, y, right - left, bottom - y).extend_up(arrows)),
    );

    let mut cells = HashSet::new();
    for band in bands {
        let band = Rect::new(
            band.x() - pad + origin.x(),
            band.y() - pad + origin.y(),
            band.width() + pad * 2,
            band.height() + pad * 2,
        );
        for cx in cell_span(band.x(), band.right(), step) {
            for cy in cell_span(band.y(), band.bottom(), step) {
                cells.insert(Pos::new(cx, cy));
            }
        }
    }

    trace!(family = family.title().name(), cells = cells.len(); "Figure built");
    cells
}

/// Cells whose center lies in `start..end`.
fn cell_span(start: i32, end: i32, step: i32) -> std::ops::Range<i32> {
    let half = step / 2;
    let first = (start - half + step - 1).div_euclid(step);
    let last = (end - half + step - 1).div_euclid(step);
    first..last
}

fn cell_of(origin: Pos, rect: Rect, step: i32) -> Pos {
    origin.add_point(rect.to_pos(Corner::TopMiddle)).to_cell(step)
}

/// Collect links, anchor by anchor in document order.
///
/// Within an anchor the links are ordered by the descendant's position, top
/// to bottom then left to right. Only the first link of a family pair is
/// kept, whichever direction it points.
fn find_links(families: &[SvgFamily]) -> Vec<Link> {
    let mut roots: HashMap<Id, (usize, Rect)> = HashMap::new();
    for (idx, family) in families.iter().enumerate() {
        for root in family.roots() {
            if let Some(member) = root.person().member() {
                roots.entry(member).or_insert((idx, root.person().rect()));
            }
        }
    }

    let mut taken: HashSet<(usize, usize)> = HashSet::new();
    let mut links = Vec::new();

    for (anchor, family) in families.iter().enumerate() {
        let mut candidates = Vec::new();
        for root in family.roots() {
            for child in root.person().children() {
                descendants(child, &mut |person| {
                    let Some(member) = person.member() else {
                        return;
                    };
                    let Some(&(target, target_root)) = roots.get(&member) else {
                        return;
                    };
                    if target != anchor {
                        candidates.push(Link {
                            anchor,
                            family: target,
                            person: person.rect(),
                            root: target_root,
                        });
                    }
                });
            }
        }

        candidates.sort_by_key(|link| (link.person.y(), link.person.x()));
        for link in candidates {
            if taken.contains(&(link.anchor, link.family)) || taken.contains(&(link.family, link.anchor)) {
                continue;
            }
            taken.insert((link.anchor, link.family));
            links.push(link);
        }
    }

    links
}

/// Visit `person` and everyone below, skipping partners but not their
/// descendants.
fn descendants<'a>(person: &'a SvgPerson, visit: &mut impl FnMut(&'a SvgPerson)) {
    if !person.is_partner() {
        visit(person);
    }
    for child in person.children() {
        descendants(child, visit);
    }
}

/// Offsets at Manhattan distance `r`, left to right, upper before lower.
fn ring(r: i32) -> impl Iterator<Item = Pos> {
    (-r..=r).flat_map(move |ox| {
        let rest = r - ox.abs();
        std::iter::once(Pos::new(ox, -rest)).chain((rest > 0).then_some(Pos::new(ox, rest)))
    })
}

/// Best offset for `moving` towards the anchor, in cells.
///
/// Offsets are swept ring by ring up to `|distance|`; an offset is taken when
/// it brings the link cells strictly closer than the best so far and the
/// shifted cells miss `blocked`. Without any such offset the first free
/// offset of the following rings is used.
fn search_offset(blocked: &HashSet<Pos>, moving: &HashSet<Pos>, distance: Pos) -> Pos {
    let fits = |offset: Pos| moving.iter().all(|cell| !blocked.contains(&cell.add_point(offset)));

    let reach = distance.abs_sum();
    let mut best = None;
    let mut best_distance = reach + 1;
    for r in 0..=reach {
        for offset in ring(r) {
            let left = distance.sub_point(offset).abs_sum();
            if left < best_distance && fits(offset) {
                best = Some(offset);
                best_distance = left;
            }
        }
    }

    if let Some(offset) = best {
        return offset;
    }

    let mut r = reach + 1;
    loop {
        if let Some(offset) = ring(r).find(|&offset| fits(offset)) {
            return offset;
        }
        r += 1;
    }
}
