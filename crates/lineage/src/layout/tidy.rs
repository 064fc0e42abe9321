//! Centered tree layout.
//!
//! Each [`TidyNode`] declares a width and a height. [`TidyNode::layout`]
//! assigns every node a center X and a top Y such that:
//! - a parent is centered over the centers of its first and last child;
//! - sibling subtrees never overlap at any depth;
//! - a child's top is its parent's bottom.
//!
//! Subtrees are compared through their contours: for every depth below a
//! node, the leftmost and rightmost extent relative to the node's center.

/// Extents `(left, right)` per depth, relative to the subtree root's center.
type Contour = Vec<(f32, f32)>;

#[derive(Debug, Clone)]
pub struct TidyNode<T> {
    payload: T,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    /// Center offset from the parent's center.
    offset: f32,
    children: Vec<TidyNode<T>>,
}

impl<T> TidyNode<T> {
    pub fn new(payload: T, width: f32, height: f32) -> Self {
        Self {
            payload,
            width,
            height,
            x: 0.0,
            y: 0.0,
            offset: 0.0,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: TidyNode<T>) {
        self.children.push(child);
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TidyNode<T>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Center X.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Top Y.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn children(&self) -> &[TidyNode<T>] {
        &self.children
    }

    /// Position the whole tree with this node's center at `(0, 0)`.
    pub fn layout(&mut self) {
        self.arrange();
        self.place(0.0, 0.0);
    }

    /// Visit every node, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TidyNode<T>)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    fn arrange(&mut self) -> Contour {
        let half = self.width / 2.0;
        let mut contour = vec![(-half, half)];

        if self.children.is_empty() {
            return contour;
        }

        let mut merged: Contour = Vec::new();
        for child in &mut self.children {
            let child_contour = child.arrange();

            let shift = merged
                .iter()
                .zip(&child_contour)
                .map(|(&(_, right), &(left, _))| right - left)
                .fold(f32::NEG_INFINITY, f32::max);
            let shift = if merged.is_empty() { 0.0 } else { shift };
            child.offset = shift;

            for (depth, &(left, right)) in child_contour.iter().enumerate() {
                let (left, right) = (left + shift, right + shift);
                match merged.get_mut(depth) {
                    Some(extent) => {
                        extent.0 = extent.0.min(left);
                        extent.1 = extent.1.max(right);
                    }
                    None => merged.push((left, right)),
                }
            }
        }

        let first = self.children.first().map_or(0.0, |c| c.offset);
        let last = self.children.last().map_or(0.0, |c| c.offset);
        let mid = (first + last) / 2.0;

        for child in &mut self.children {
            child.offset -= mid;
        }
        contour.extend(merged.into_iter().map(|(l, r)| (l - mid, r - mid)));
        contour
    }

    fn place(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        let bottom = y + self.height;
        for child in &mut self.children {
            let child_x = x + child.offset;
            child.place(child_x, bottom);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn leaf(id: u32, width: f32) -> TidyNode<u32> {
        TidyNode::new(id, width, 10.0)
    }

    /// `(depth, left, right)` of every node.
    fn extents(tree: &TidyNode<u32>) -> Vec<(f32, f32, f32)> {
        let mut out = Vec::new();
        tree.walk(&mut |node| {
            out.push((node.y(), node.x() - node.width() / 2.0, node.x() + node.width() / 2.0));
        });
        out
    }

    #[test]
    fn test_single_node() {
        let mut tree = leaf(0, 40.0);
        tree.layout();

        assert_eq!(tree.x(), 0.0);
        assert_eq!(tree.y(), 0.0);
    }

    #[test]
    fn test_two_children_centered() {
        let mut tree = leaf(0, 10.0).with_children([leaf(1, 10.0), leaf(2, 20.0)]);
        tree.layout();

        let children = tree.children();
        assert_eq!(children[0].x(), -7.5);
        assert_eq!(children[1].x(), 7.5);
        assert_eq!(children[0].y(), 10.0);
        // touching, not overlapping
        assert_eq!(children[0].x() + 5.0, children[1].x() - 10.0);
    }

    #[test]
    fn test_deep_subtrees_pushed_apart() {
        let wide = leaf(1, 10.0).with_children([leaf(3, 50.0)]);
        let narrow = leaf(2, 10.0).with_children([leaf(4, 50.0)]);
        let mut tree = leaf(0, 10.0).with_children([wide, narrow]);
        tree.layout();

        let grandchildren: Vec<_> = tree.children().iter().map(|c| &c.children()[0]).collect();
        assert_eq!(grandchildren[1].x() - grandchildren[0].x(), 50.0);
        assert_eq!(tree.children()[0].x(), -25.0);
    }

    fn tree_strategy() -> impl Strategy<Value = TidyNode<u32>> {
        let leaf = (1.0f32..80.0).prop_map(|width| TidyNode::new(0, width.round(), 10.0));
        leaf.prop_recursive(4, 32, 4, |inner| {
            ((1.0f32..80.0), prop::collection::vec(inner, 0..4))
                .prop_map(|(width, children)| TidyNode::new(0, width.round(), 10.0).with_children(children))
        })
    }

    proptest! {
        #[test]
        fn prop_same_depth_never_overlaps(mut tree in tree_strategy()) {
            tree.layout();

            let mut rows = extents(&tree);
            rows.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
            for pair in rows.windows(2) {
                if pair[0].0 == pair[1].0 {
                    prop_assert!(pair[0].2 <= pair[1].1 + 1e-3);
                }
            }
        }

        #[test]
        fn prop_parent_centered_over_children(mut tree in tree_strategy()) {
            tree.layout();

            let mut ok = true;
            tree.walk(&mut |node| {
                if let (Some(first), Some(last)) = (node.children().first(), node.children().last()) {
                    ok &= approx_eq!(f32, node.x(), (first.x() + last.x()) / 2.0, epsilon = 1e-3);
                }
            });
            prop_assert!(ok);
        }
    }
}
