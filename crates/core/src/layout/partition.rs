//! Radial partition: the sunburst's angular subdivision.
//!
//! The root covers the full circle; every child's angular extent is its
//! share of the parent's aggregated value. Ring thickness is one depth
//! unit — scaling to pixels happens at render time.

use std::f64::consts::TAU;

use skillwheel_protocol::ArcSpan;

use crate::model::SkillTree;

/// Ring count shown by default: center disc plus three data rings.
pub const DEFAULT_RINGS: u32 = 4;

/// Write partition geometry into every node's `current` span.
///
/// Expects aggregated values (run [`SkillTree::count`] or
/// [`SkillTree::sum`] first); a zero-valued subtree collapses to
/// zero-width wedges rather than failing.
pub fn layout(tree: &mut SkillTree) {
    let root = tree.root();
    tree[root].base = ArcSpan::new(0.0, TAU, 0.0, 1.0);
    for id in tree.descendants(root) {
        let span = tree[id].base;
        let total = tree[id].value;
        let children = tree.children(id).to_vec();
        let mut x = span.x0;
        let y0 = f64::from(tree[id].depth) + 1.0;
        for c in children {
            let frac = if total > 0.0 {
                tree[c].value / total
            } else {
                0.0
            };
            let w = span.span_x() * frac;
            tree[c].base = ArcSpan::new(x, x + w, y0, y0 + 1.0);
            x += w;
        }
        tree[id].current = tree[id].base;
        tree[id].target = None;
    }
}

/// The shared visibility predicate: rendered rings only, positive span.
pub fn arc_visible(span: &ArcSpan, max_rings: u32) -> bool {
    span.y1 <= f64::from(max_rings) && span.y0 >= 1.0 && span.x1 > span.x0
}

/// Labels additionally need enough cell area to be readable.
pub fn label_visible(span: &ArcSpan, max_rings: u32) -> bool {
    span.y1 <= f64::from(max_rings)
        && span.y0 >= 1.0
        && (span.y1 - span.y0) * (span.x1 - span.x0) > 0.03
}

/// Angular padding taken out of a wedge, capped at half its own span so
/// thin slices never collapse to nothing.
pub fn pad_angle(span: &ArcSpan) -> f64 {
    (span.span_x() / 2.0).min(0.005)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn sample_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        tree.add_child(a, "a1", 0.0);
        tree.add_child(a, "a2", 0.0);
        tree.add_child(tree.root(), "b", 0.0);
        tree.count();
        tree
    }

    #[test]
    fn children_spans_sum_to_parent() {
        let mut tree = sample_tree();
        layout(&mut tree);
        for id in tree.ids() {
            if tree.is_leaf(id) {
                continue;
            }
            let child_sum: f64 = tree
                .children(id)
                .iter()
                .map(|&c| tree[c].current.span_x())
                .sum();
            assert!(
                (child_sum - tree[id].current.span_x()).abs() < 1e-9,
                "node {} spans must sum",
                tree[id].name
            );
        }
    }

    #[test]
    fn proportional_to_aggregated_count() {
        let mut tree = sample_tree();
        layout(&mut tree);
        let kids = tree.children(tree.root()).to_vec();
        // "a" holds two of the three leaves.
        let a_span = tree[kids[0]].current.span_x();
        let b_span = tree[kids[1]].current.span_x();
        assert!((a_span - TAU * 2.0 / 3.0).abs() < 1e-9);
        assert!((b_span - TAU / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rings_follow_depth() {
        let mut tree = sample_tree();
        layout(&mut tree);
        for id in tree.ids() {
            let span = tree[id].current;
            assert!((span.y0 - f64::from(tree[id].depth)).abs() < 1e-12);
            assert!((span.span_y() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_valued_subtree_collapses() {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        tree.add_child(a, "a1", 0.0);
        // No aggregation: all values stay 0.
        layout(&mut tree);
        assert_eq!(tree[a].current.span_x(), 0.0);
        assert!(!arc_visible(&tree[a].current, DEFAULT_RINGS));
    }

    #[test]
    fn padding_never_exceeds_half_span() {
        let thin = ArcSpan::new(0.0, 0.004, 1.0, 2.0);
        assert!((pad_angle(&thin) - 0.002).abs() < 1e-12);
        let wide = ArcSpan::new(0.0, 1.0, 1.0, 2.0);
        assert!((pad_angle(&wide) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn root_is_never_a_visible_arc() {
        let mut tree = sample_tree();
        layout(&mut tree);
        assert!(!arc_visible(&tree[NodeId(0)].current, DEFAULT_RINGS));
        let a = tree.children(tree.root())[0];
        assert!(arc_visible(&tree[a].current, DEFAULT_RINGS));
    }
}
