//! Pointer interaction: sunburst click-to-zoom and tree hover paths.

use crate::layout::partition::arc_visible;
use crate::model::{NodeId, SkillTree};
use crate::transition::retarget_zoom;
use crate::views::sunburst::SunburstConfig;

/// What a pointer position over the sunburst resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunburstHit {
    /// The center disc — the zoom-out control.
    Center,
    Node(NodeId),
}

/// Resolve a pixel position against current geometry. Invisible arcs are
/// not hit, matching their disabled pointer events.
pub fn hit_test(tree: &SkillTree, cfg: &SunburstConfig, px: f64, py: f64) -> Option<SunburstHit> {
    let c = cfg.size / 2.0;
    let dx = px - c;
    let dy = py - c;
    let ring = (dx * dx + dy * dy).sqrt() / cfg.radius();
    if ring <= 1.0 {
        return Some(SunburstHit::Center);
    }
    if ring > f64::from(cfg.rings) {
        return None;
    }
    // Angle clockwise from 12 o'clock, normalized to [0, 2π).
    let angle = dx.atan2(-dy).rem_euclid(std::f64::consts::TAU);
    for id in tree.ids().skip(1) {
        let span = tree[id].current;
        if arc_visible(&span, cfg.rings)
            && angle >= span.x0
            && angle < span.x1
            && ring >= span.y0
            && ring < span.y1
        {
            return Some(SunburstHit::Node(id));
        }
    }
    None
}

/// Apply a click. Returns `true` when a zoom transition should start:
/// the active node changed and every node has a fresh target. Clicking
/// the active node again, the center while at the root, or a leaf is a
/// no-op.
pub fn click(tree: &mut SkillTree, active: &mut NodeId, hit: SunburstHit) -> bool {
    let next = match hit {
        SunburstHit::Center => tree[*active].parent.unwrap_or_else(|| tree.root()),
        SunburstHit::Node(id) => {
            if tree.is_leaf(id) {
                return false;
            }
            id
        }
    };
    if next == *active {
        return false;
    }
    *active = next;
    retarget_zoom(tree, next);
    true
}

/// Nodes to brighten while hovering `id`: the path up to the root.
pub fn hover_path(tree: &SkillTree, id: NodeId) -> Vec<NodeId> {
    tree.ancestors(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::partition;

    fn zoomed_setup() -> (SkillTree, NodeId, SunburstConfig) {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        tree.add_child(a, "a1", 0.0);
        tree.add_child(a, "a2", 0.0);
        tree.add_child(tree.root(), "b", 0.0);
        tree.count();
        partition::layout(&mut tree);
        let cfg = SunburstConfig::default();
        (tree, a, cfg)
    }

    #[test]
    fn clicking_the_active_node_is_a_noop() {
        let (mut tree, a, _) = zoomed_setup();
        let mut active = tree.root();
        assert!(click(&mut tree, &mut active, SunburstHit::Node(a)));
        assert_eq!(active, a);
        // Same node again: nothing changes.
        assert!(!click(&mut tree, &mut active, SunburstHit::Node(a)));
        assert_eq!(active, a);
    }

    #[test]
    fn center_at_root_stays_centered() {
        let (mut tree, _, _) = zoomed_setup();
        let mut active = tree.root();
        assert!(!click(&mut tree, &mut active, SunburstHit::Center));
        assert_eq!(active, tree.root());
    }

    #[test]
    fn center_steps_back_to_the_parent() {
        let (mut tree, a, _) = zoomed_setup();
        let mut active = tree.root();
        click(&mut tree, &mut active, SunburstHit::Node(a));
        assert!(click(&mut tree, &mut active, SunburstHit::Center));
        assert_eq!(active, tree.root());
    }

    #[test]
    fn leaves_are_not_zoom_targets() {
        let (mut tree, a, _) = zoomed_setup();
        let a1 = tree.children(a)[0];
        let mut active = tree.root();
        assert!(!click(&mut tree, &mut active, SunburstHit::Node(a1)));
        assert_eq!(active, tree.root());
    }

    #[test]
    fn hit_test_finds_the_center_disc() {
        let (tree, _, cfg) = zoomed_setup();
        let c = cfg.size / 2.0;
        assert_eq!(hit_test(&tree, &cfg, c, c), Some(SunburstHit::Center));
    }

    #[test]
    fn hit_test_finds_a_wedge_midpoint() {
        let (tree, a, cfg) = zoomed_setup();
        let span = tree[a].current;
        let c = cfg.size / 2.0;
        let angle = span.mid_x();
        let r = span.mid_y() * cfg.radius();
        let px = c + r * angle.sin();
        let py = c - r * angle.cos();
        assert_eq!(hit_test(&tree, &cfg, px, py), Some(SunburstHit::Node(a)));
    }

    #[test]
    fn hit_test_misses_outside_the_rings() {
        let (tree, _, cfg) = zoomed_setup();
        assert_eq!(hit_test(&tree, &cfg, 0.0, 0.0), None);
    }

    #[test]
    fn hover_path_runs_to_the_root() {
        let (tree, a, _) = zoomed_setup();
        let a1 = tree.children(a)[0];
        assert_eq!(hover_path(&tree, a1), vec![a1, a, tree.root()]);
    }
}
