//! Tidy-tree view: bump links, node markers, side-anchored labels.

use skillwheel_protocol::{Paint, Point, RenderCommand, Stroke, TextAlign, ThemeToken};

use crate::model::{NodeId, SkillTree};

const CIRCLE_RADIUS: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;
const LABEL_OFFSET: f64 = 6.0;
/// Channel multiplier for hover-highlighted nodes and links.
const HIGHLIGHT_BRIGHTEN: f32 = 2.0;

/// Emit the command list for the node-link chart from `current` geometry
/// (point reading: x = depth axis, y = lateral). `highlight` brightens
/// that set of nodes and the links between them (the hover path);
/// `opacity` drives the initial fade-in.
pub fn render_tree(
    tree: &SkillTree,
    highlight: Option<&[NodeId]>,
    opacity: f64,
) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    commands.push(RenderCommand::BeginGroup {
        id: "tree".to_string(),
        label: Some("Skills".to_string()),
    });

    let highlighted = |id: NodeId| highlight.is_some_and(|set| set.contains(&id));

    // Links first so markers draw on top.
    for id in tree.ids().skip(1) {
        let Some(parent) = tree[id].parent else {
            continue;
        };
        let from = position(tree, parent);
        let to = position(tree, id);
        let mid_x = (from.x + to.x) / 2.0;
        let mut color = tree[id].color;
        if highlighted(id) && highlighted(parent) {
            color = color.brighter(HIGHLIGHT_BRIGHTEN);
        }
        commands.push(RenderCommand::DrawCurve {
            from,
            ctrl1: Point::new(mid_x, from.y),
            ctrl2: Point::new(mid_x, to.y),
            to,
            stroke: Stroke::new(Paint::Solid(color), 1.0),
            opacity,
        });
    }

    for id in tree.ids() {
        let pos = position(tree, id);
        let mut color = tree[id].color;
        if highlighted(id) {
            color = color.brighter(HIGHLIGHT_BRIGHTEN);
        }
        let is_leaf = tree.is_leaf(id);
        commands.push(RenderCommand::DrawCircle {
            center: pos,
            radius: CIRCLE_RADIUS,
            // Hollow markers for leaves, filled for categories.
            fill: (!is_leaf).then_some(Paint::Solid(color)),
            stroke: Some(Stroke::new(Paint::Solid(color), 1.0)),
            node_id: Some(id.index() as u64),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(
                pos.x + if is_leaf { LABEL_OFFSET } else { -LABEL_OFFSET },
                pos.y,
            ),
            text: tree[id].name.clone(),
            color: if highlighted(id) {
                Paint::Solid(color)
            } else {
                Paint::Token(ThemeToken::TextPrimary)
            },
            font_size: FONT_SIZE,
            align: if is_leaf {
                TextAlign::Left
            } else {
                TextAlign::Right
            },
            rotation: 0.0,
            opacity,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn position(tree: &SkillTree, id: NodeId) -> Point {
    let span = tree[id].current;
    Point::new(span.x0, span.y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::layout::tree::{self as tidy, TreeConfig};

    fn chart_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("skills");
        let a = tree.add_child(tree.root(), "frontend", 0.0);
        tree.add_child(a, "css", 0.0);
        tree.add_child(a, "js", 0.0);
        tree.add_child(tree.root(), "backend", 0.0);
        tidy::layout(&mut tree, &TreeConfig::default(), 60.0);
        color::propagate(&mut tree, &color::discrete_palette(2));
        tree
    }

    fn curves(cmds: &[RenderCommand]) -> usize {
        cmds.iter()
            .filter(|c| matches!(c, RenderCommand::DrawCurve { .. }))
            .count()
    }

    #[test]
    fn one_link_per_non_root_node() {
        let tree = chart_tree();
        let cmds = render_tree(&tree, None, 1.0);
        assert_eq!(curves(&cmds), tree.len() - 1);
    }

    #[test]
    fn leaves_get_hollow_markers_and_left_labels() {
        let tree = chart_tree();
        let a = tree.children(tree.root())[0];
        let css = tree.children(a)[0];
        let cmds = render_tree(&tree, None, 1.0);
        let marker = cmds.iter().find(|c| {
            matches!(c, RenderCommand::DrawCircle { node_id: Some(n), .. }
                if *n == css.index() as u64)
        });
        assert!(matches!(
            marker,
            Some(RenderCommand::DrawCircle { fill: None, .. })
        ));
        let label = cmds.iter().any(|c| {
            matches!(c, RenderCommand::DrawText { text, align, .. }
                if text == "css" && *align == TextAlign::Left)
        });
        assert!(label);
    }

    #[test]
    fn hover_path_brightens_nodes_and_links() {
        let tree = chart_tree();
        let a = tree.children(tree.root())[0];
        let css = tree.children(a)[0];
        let path = crate::interact::hover_path(&tree, css);

        let plain = render_tree(&tree, None, 1.0);
        let lit = render_tree(&tree, Some(&path), 1.0);

        let link_color = |cmds: &[RenderCommand]| {
            cmds.iter().find_map(|c| match c {
                RenderCommand::DrawCurve { to, stroke, .. }
                    if (to.y - tree[css].current.y0).abs() < 1e-9 =>
                {
                    Some(stroke.paint)
                }
                _ => None,
            })
        };
        assert_ne!(link_color(&plain), link_color(&lit));
    }

    #[test]
    fn fade_in_opacity_flows_through() {
        let tree = chart_tree();
        let cmds = render_tree(&tree, None, 0.25);
        for cmd in &cmds {
            if let RenderCommand::DrawCurve { opacity, .. } = cmd {
                assert!((opacity - 0.25).abs() < 1e-12);
            }
        }
    }
}
