//! Force-graph view: straight links, disc markers, side labels.

use skillwheel_protocol::{Paint, Point, RenderCommand, Stroke, TextAlign, ThemeToken};

use crate::model::{NodeId, SkillTree};

const NODE_RADIUS: f64 = 10.0;
const FONT_SIZE: f64 = 12.0;
const LINK_OPACITY: f64 = 0.6;

/// Emit the command list for the force graph from `current` geometry
/// (point reading, origin-centered — renderers translate to their
/// viewport center).
pub fn render_force(tree: &SkillTree) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    commands.push(RenderCommand::BeginGroup {
        id: "force".to_string(),
        label: Some("Skills".to_string()),
    });

    for id in tree.ids().skip(1) {
        let Some(parent) = tree[id].parent else {
            continue;
        };
        commands.push(RenderCommand::DrawLine {
            from: position(tree, parent),
            to: position(tree, id),
            stroke: Stroke::new(Paint::Token(ThemeToken::LinkStroke), 1.0),
            opacity: LINK_OPACITY,
        });
    }

    for id in tree.ids() {
        let pos = position(tree, id);
        commands.push(RenderCommand::DrawCircle {
            center: pos,
            radius: NODE_RADIUS,
            fill: Some(Paint::Solid(tree[id].color)),
            stroke: Some(Stroke::new(Paint::Token(ThemeToken::NodeStroke), 1.5)),
            node_id: Some(id.index() as u64),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(pos.x + NODE_RADIUS + 2.0, pos.y),
            text: tree[id].name.clone(),
            color: Paint::Token(ThemeToken::TextPrimary),
            font_size: FONT_SIZE,
            align: TextAlign::Left,
            rotation: 0.0,
            opacity: 1.0,
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
    use crate::layout::force::{self, ForceConfig};

    #[test]
    fn links_nodes_and_labels_are_all_present() {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        tree.add_child(a, "a1", 0.0);
        force::layout(&mut tree, &ForceConfig::default());
        let cmds = render_force(&tree);

        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        let circles = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawCircle { .. }))
            .count();
        let texts = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        assert_eq!(lines, 2);
        assert_eq!(circles, 3);
        assert_eq!(texts, 3);
    }
}
