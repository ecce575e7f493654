//! Tidy node-link layout with label-width compensation.
//!
//! Lateral slots are assigned post-order: leaves take successive slots,
//! internal nodes center over their children, so siblings never overlap
//! and all nodes of one depth share the same depth-axis coordinate.
//!
//! Depth spacing depends on the widest rendered label, which is only
//! knowable after text has been laid out once. The two-pass device is
//! explicit here: `layout` with a provisional compensation, then
//! [`measure_labels`], then `layout` again with the measured width. The
//! renderer emits a full fresh command list per pass, so invoking the
//! pair repeatedly never duplicates visual elements.

use skillwheel_protocol::ArcSpan;

use crate::model::{NodeId, SkillTree};

/// Measures rendered text extents. The egui frontend supplies a real
/// galley-backed implementation; [`HeuristicMeasurer`] approximates for
/// SVG output and tests.
pub trait TextMeasurer {
    fn width(&self, text: &str, font_size: f64) -> f64;
}

/// Average-glyph-width estimate, good enough where no layout engine is
/// available to ask.
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * 0.6
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    /// Depth-axis extent in pixels.
    pub size: f64,
    /// Lateral distance between adjacent leaf slots.
    pub margin: f64,
    pub font_size: f64,
    /// Compensation used for the first pass, before labels are measured.
    pub default_label: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            size: 1000.0,
            margin: 11.0,
            font_size: 10.0,
            default_label: 60.0,
        }
    }
}

/// Write tidy-tree positions (point reading: x = depth axis, y = lateral)
/// into every node's `current`.
pub fn layout(tree: &mut SkillTree, cfg: &TreeConfig, label_compensation: f64) {
    let positions = compute_positions(tree, cfg, label_compensation);
    for id in tree.ids() {
        tree[id].current = positions[id.index()];
    }
}

/// Same positions, written into `target` for an animated reposition.
pub fn layout_into_targets(tree: &mut SkillTree, cfg: &TreeConfig, label_compensation: f64) {
    let positions = compute_positions(tree, cfg, label_compensation);
    for id in tree.ids() {
        tree[id].target = Some(positions[id.index()]);
    }
}

/// Widest label at the given font size, rounded up to whole pixels.
pub fn measure_labels(tree: &SkillTree, measurer: &dyn TextMeasurer, font_size: f64) -> f64 {
    tree.ids()
        .map(|id| measurer.width(&tree[id].name, font_size))
        .fold(0.0, f64::max)
        .ceil()
}

/// Provisional layout, measure, final layout. Returns the measured width
/// so callers can cache it and skip the first pass on later relayouts.
pub fn layout_two_pass(
    tree: &mut SkillTree,
    cfg: &TreeConfig,
    measurer: &dyn TextMeasurer,
) -> f64 {
    layout(tree, cfg, cfg.default_label);
    let widest = measure_labels(tree, measurer, cfg.font_size);
    layout(tree, cfg, widest / 2.0);
    widest
}

fn compute_positions(tree: &SkillTree, cfg: &TreeConfig, label_compensation: f64) -> Vec<ArcSpan> {
    let height = tree.height().max(1);
    let depth_spacing = (cfg.size / f64::from(height) - label_compensation).max(cfg.margin);
    let mut positions = vec![ArcSpan::default(); tree.len()];
    let mut next_slot = 0.0;
    place(
        tree,
        tree.root(),
        depth_spacing,
        cfg.margin,
        &mut next_slot,
        &mut positions,
    );
    positions
}

fn place(
    tree: &SkillTree,
    id: NodeId,
    depth_spacing: f64,
    margin: f64,
    next_slot: &mut f64,
    positions: &mut [ArcSpan],
) -> f64 {
    let children = tree.children(id);
    let lateral = if children.is_empty() {
        let slot = *next_slot;
        *next_slot += margin;
        slot
    } else {
        let mut first = None;
        let mut last = 0.0;
        for &c in children {
            last = place(tree, c, depth_spacing, margin, next_slot, positions);
            first.get_or_insert(last);
        }
        (first.unwrap_or(last) + last) / 2.0
    };
    positions[id.index()] = ArcSpan::point(f64::from(tree[id].depth) * depth_spacing, lateral);
    lateral
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("skills");
        let a = tree.add_child(tree.root(), "frontend", 0.0);
        tree.add_child(a, "css", 0.0);
        tree.add_child(a, "typescript", 0.0);
        let b = tree.add_child(tree.root(), "backend", 0.0);
        tree.add_child(b, "rust", 0.0);
        tree
    }

    #[test]
    fn same_depth_nodes_share_the_depth_coordinate() {
        let mut tree = sample_tree();
        layout(&mut tree, &TreeConfig::default(), 60.0);
        let mut by_depth: std::collections::HashMap<u32, f64> = std::collections::HashMap::new();
        for id in tree.ids() {
            let x = tree[id].current.x0;
            let entry = by_depth.entry(tree[id].depth).or_insert(x);
            assert!((x - *entry).abs() < 1e-9);
        }
    }

    #[test]
    fn leaves_get_unique_slots_spaced_by_margin() {
        let mut tree = sample_tree();
        let cfg = TreeConfig::default();
        layout(&mut tree, &cfg, 60.0);
        let mut laterals: Vec<f64> = tree
            .leaves()
            .into_iter()
            .map(|id| tree[id].current.y0)
            .collect();
        laterals.sort_by(f64::total_cmp);
        for pair in laterals.windows(2) {
            assert!(pair[1] - pair[0] >= cfg.margin - 1e-9);
        }
    }

    #[test]
    fn parents_center_over_children() {
        let mut tree = sample_tree();
        layout(&mut tree, &TreeConfig::default(), 60.0);
        let a = tree.children(tree.root())[0];
        let kids = tree.children(a).to_vec();
        let mid = (tree[kids[0]].current.y0 + tree[kids[1]].current.y0) / 2.0;
        assert!((tree[a].current.y0 - mid).abs() < 1e-9);
    }

    #[test]
    fn wider_labels_compress_depth_spacing() {
        let mut tree = sample_tree();
        let cfg = TreeConfig::default();
        layout(&mut tree, &cfg, 0.0);
        let loose = tree[tree.children(tree.root())[0]].current.x0;
        layout(&mut tree, &cfg, 200.0);
        let tight = tree[tree.children(tree.root())[0]].current.x0;
        assert!(tight < loose);
    }

    #[test]
    fn two_pass_is_stable_on_reruns() {
        let mut tree = sample_tree();
        let cfg = TreeConfig::default();
        let w1 = layout_two_pass(&mut tree, &cfg, &HeuristicMeasurer);
        let first: Vec<_> = tree.ids().map(|id| tree[id].current).collect();
        let w2 = layout_two_pass(&mut tree, &cfg, &HeuristicMeasurer);
        let second: Vec<_> = tree.ids().map(|id| tree[id].current).collect();
        assert_eq!(w1, w2);
        assert_eq!(first, second);
    }

    #[test]
    fn measure_uses_the_longest_name() {
        let tree = sample_tree();
        let widest = measure_labels(&tree, &HeuristicMeasurer, 10.0);
        // "typescript" has 10 chars at 6px each.
        assert_eq!(widest, 60.0);
    }

    #[test]
    fn degenerate_single_node_tree() {
        let mut tree = SkillTree::with_root("only");
        layout(&mut tree, &TreeConfig::default(), 60.0);
        assert_eq!(tree[tree.root()].current.x0, 0.0);
    }
}
