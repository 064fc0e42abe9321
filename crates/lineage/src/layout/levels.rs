//! Level contours.
//!
//! A [`Level`] is one horizontal band of boxes. [`merge_levels_rects`]
//! closes gaps narrower than a minimum inside each band and between a band
//! and the one below it; [`levels_border`] then walks the band corners into
//! a single closed polygon.

use std::{cmp::Ordering, collections::BTreeMap};

use lineage_core::geometry::{Corner, Pos, Rect};

/// One band of boxes. Only `x` and `width` of the rectangles are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    y: i32,
    height: i32,
    rects: Vec<Rect>,
}

impl Level {
    pub fn new(y: i32, height: i32, rects: Vec<Rect>) -> Self {
        Self { y, height, rects }
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub(crate) fn grow_up(&mut self, amount: i32) {
        self.y -= amount;
        self.height += amount;
    }

    pub(crate) fn grow_down(&mut self, amount: i32) {
        self.height += amount;
    }
}

/// Group boxes into levels by their top Y.
///
/// A level reaches down to the next level's top; the last one keeps the
/// height of its first box.
pub fn levels_from_rects(rects: impl IntoIterator<Item = Rect>) -> Vec<Level> {
    let mut by_y: BTreeMap<i32, Vec<Rect>> = BTreeMap::new();
    for rect in rects {
        by_y.entry(rect.y()).or_default().push(rect);
    }

    let mut levels: Vec<Level> = by_y
        .into_iter()
        .map(|(y, rects)| {
            let height = rects.first().map_or(0, |r| r.height());
            Level::new(y, height, rects)
        })
        .collect();

    for i in 1..levels.len() {
        levels[i - 1].height = levels[i].y - levels[i - 1].y;
    }

    levels
}

/// Close gaps narrower than `min_gap`.
///
/// First every level is merged on its own. Then, bottom-up, a gap between two
/// boxes of a level is measured against the boxes of the level below: the
/// part of the gap covered from below is added to the neighbouring boxes, and
/// if what remains is narrower than `min_gap` the two boxes are joined.
pub fn merge_levels_rects(levels: &mut [Level], min_gap: i32) {
    for level in levels.iter_mut() {
        level.rects.sort_by_key(|rect| rect.x());

        let mut merged: Vec<Rect> = Vec::with_capacity(level.rects.len());
        for &rect in &level.rects {
            match merged.last_mut() {
                Some(last) if rect.x() - last.right() < min_gap => {
                    let right = last.right().max(rect.right());
                    *last = last.with_width(right - last.x());
                }
                _ => merged.push(rect),
            }
        }
        level.rects = merged;
    }

    for i in (0..levels.len().saturating_sub(1)).rev() {
        let (upper, lower) = levels.split_at_mut(i + 1);
        let level = &mut upper[i];
        let below = &lower[0];

        let Some((&first, rest)) = level.rects.split_first() else {
            continue;
        };

        let mut merged = Vec::with_capacity(level.rects.len());
        merged.push(first);

        for &next in rest {
            let Some(last) = merged.last_mut() else {
                break;
            };
            let (start, end) = open_gap(last.right(), next.x(), &below.rects);

            if end - start < min_gap {
                *last = last.with_width(next.right() - last.x());
                continue;
            }

            if start != last.right() {
                *last = last.with_width(start - last.x());
            }

            let mut next = next;
            if end != next.x() {
                next = next.with_x(end).with_width(next.right() - end);
            }
            merged.push(next);
        }

        level.rects = merged;
    }
}

/// Part of the gap `start..end` not covered by `below`.
fn open_gap(mut start: i32, mut end: i32, below: &[Rect]) -> (i32, i32) {
    for rect in below {
        let (left, right) = (rect.x(), rect.right());

        if left >= end {
            break;
        }
        if right <= start {
            continue;
        }
        if left <= start && end <= right {
            return (end, end);
        }
        if start <= left && left < end {
            end = left;
        }
        if start < right && right <= end {
            start = right;
        }
    }
    (start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CornerKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy)]
struct BorderPoint {
    pos: Pos,
    kind: CornerKind,
    prev: Option<usize>,
    next: Option<usize>,
    /// Opposite vertical corner of the same box.
    across: usize,
}

/// Trace the outer border of merged levels, clockwise from the top-left
/// corner of the first box.
pub fn levels_border(levels: &[Level]) -> Vec<Pos> {
    let mut points: Vec<BorderPoint> = Vec::new();
    let mut lines: Vec<Vec<usize>> = vec![Vec::new(); levels.len() + 1];

    for (i, level) in levels.iter().enumerate() {
        for rect in &level.rects {
            let rect = rect.with_y(level.y).with_height(level.height.max(0));
            let base = points.len();
            let corners = [
                (rect.to_pos(Corner::TopLeft), CornerKind::TopLeft, base + 2),
                (rect.to_pos(Corner::TopRight), CornerKind::TopRight, base + 3),
                (rect.to_pos(Corner::BottomLeft), CornerKind::BottomLeft, base),
                (rect.to_pos(Corner::BottomRight), CornerKind::BottomRight, base + 1),
            ];
            for (pos, kind, across) in corners {
                points.push(BorderPoint {
                    pos,
                    kind,
                    prev: None,
                    next: None,
                    across,
                });
            }
            lines[i].extend([base, base + 1]);
            lines[i + 1].extend([base + 2, base + 3]);
        }
    }

    for line in &mut lines {
        line.sort_by(|&a, &b| {
            let (a, b) = (&points[a], &points[b]);
            match a.pos.x().cmp(&b.pos.x()) {
                Ordering::Equal => a.kind.cmp(&b.kind),
                other => other,
            }
        });
        for pair in line.windows(2) {
            points[pair[0]].next = Some(pair[1]);
            points[pair[1]].prev = Some(pair[0]);
        }
    }

    let Some(&start) = lines.first().and_then(|line| line.first()) else {
        return Vec::new();
    };

    let mut border: Vec<Pos> = Vec::with_capacity(points.len());
    let mut current = start;
    for _ in 0..points.len() {
        let point = points[current];
        if border.last() != Some(&point.pos) {
            border.push(point.pos);
        }

        current = match point.kind {
            CornerKind::TopLeft | CornerKind::BottomRight => point.across,
            CornerKind::BottomLeft => match point.prev {
                Some(prev) if points[prev].kind == CornerKind::TopLeft => prev,
                _ => point.next.unwrap_or(point.across),
            },
            CornerKind::TopRight => point.next.or(point.prev).unwrap_or(point.across),
        };
    }

    border
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn span(x: i32, width: i32) -> Rect {
        Rect::new(x, 0, width, 0)
    }

    fn spans(level: &Level) -> Vec<(i32, i32)> {
        level.rects().iter().map(|r| (r.x(), r.width())).collect()
    }

    fn sample() -> Vec<Level> {
        vec![
            Level::new(0, 10, vec![span(10, 10), span(30, 30)]),
            Level::new(10, 10, vec![span(0, 20), span(40, 30)]),
            Level::new(20, 10, vec![span(10, 20)]),
        ]
    }

    #[test]
    fn test_merge_levels_rects() {
        let mut levels = sample();
        merge_levels_rects(&mut levels, 10);

        assert_eq!(spans(&levels[0]), vec![(10, 50)]);
        assert_eq!(spans(&levels[1]), vec![(0, 30), (40, 30)]);
        assert_eq!(spans(&levels[2]), vec![(10, 20)]);
    }

    #[test]
    fn test_levels_border() {
        let mut levels = sample();
        merge_levels_rects(&mut levels, 20);

        let expected: Vec<Pos> = [
            (10, 0),
            (10, 10),
            (0, 10),
            (0, 20),
            (10, 20),
            (10, 30),
            (30, 30),
            (30, 20),
            (70, 20),
            (70, 10),
            (60, 10),
            (60, 0),
        ]
        .into_iter()
        .map(|(x, y)| Pos::new(x, y))
        .collect();

        assert_eq!(levels_border(&levels), expected);
    }

    #[test]
    fn test_levels_from_rects() {
        let levels = levels_from_rects([
            Rect::new(0, 40, 10, 30),
            Rect::new(0, 0, 10, 30),
            Rect::new(20, 0, 10, 30),
        ]);

        assert_eq!(levels.len(), 2);
        assert_eq!((levels[0].y(), levels[0].height()), (0, 40));
        assert_eq!(levels[0].rects().len(), 2);
        assert_eq!((levels[1].y(), levels[1].height()), (40, 30));
    }

    #[test]
    fn test_empty_levels() {
        assert!(levels_border(&[]).is_empty());
    }

    fn levels_strategy() -> impl Strategy<Value = Vec<Level>> {
        let level = prop::collection::vec((0i32..200, 1i32..60), 1..5)
            .prop_map(|rects| rects.into_iter().map(|(x, w)| span(x, w)).collect::<Vec<_>>());
        prop::collection::vec(level, 1..5).prop_map(|levels| {
            levels
                .into_iter()
                .enumerate()
                .map(|(i, rects)| Level::new(i as i32 * 10, 10, rects))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(mut levels in levels_strategy(), min_gap in 1i32..30) {
            merge_levels_rects(&mut levels, min_gap);
            let once = levels.clone();
            merge_levels_rects(&mut levels, min_gap);

            prop_assert_eq!(levels, once);
        }
    }
}
