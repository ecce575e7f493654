//! Treemap view: leaf tiles with wrapped labels.

use skillwheel_protocol::{Paint, Point, RenderCommand, TextAlign, ThemeToken};

use crate::layout::treemap::span_to_rect;
use crate::model::{NodeId, SkillTree};

const TILE_OPACITY: f64 = 0.6;
const LABEL_FONT: f64 = 11.0;

/// Emit the command list for the treemap from `current` geometry
/// (cartesian reading). Only leaves are tiled; each is filled with its
/// top-level branch color.
pub fn render_treemap(tree: &SkillTree) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    commands.push(RenderCommand::BeginGroup {
        id: "treemap".to_string(),
        label: Some("Skills".to_string()),
    });

    for id in tree.leaves() {
        let rect = span_to_rect(&tree[id].current);
        if rect.area() <= 0.0 {
            continue;
        }
        let fill = branch_of(tree, id)
            .map(|b| tree[b].color)
            .unwrap_or(tree[id].color);
        commands.push(RenderCommand::DrawRect {
            rect,
            fill: Paint::Solid(fill),
            opacity: TILE_OPACITY,
            label: Some(tree[id].name.clone()),
            node_id: Some(id.index() as u64),
        });
        for (i, line) in split_label(&tree[id].name).into_iter().enumerate() {
            commands.push(RenderCommand::DrawText {
                position: Point::new(
                    rect.x + 3.0,
                    rect.y + (1.1 + i as f64 * 0.9) * LABEL_FONT,
                ),
                text: line,
                color: Paint::Token(ThemeToken::TextPrimary),
                font_size: LABEL_FONT,
                align: TextAlign::Left,
                rotation: 0.0,
                opacity: 1.0,
            });
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Nearest depth-1 ancestor: the tile's color source.
fn branch_of(tree: &SkillTree, id: NodeId) -> Option<NodeId> {
    let mut cur = id;
    while tree[cur].depth > 1 {
        cur = tree[cur].parent?;
    }
    (tree[cur].depth == 1).then_some(cur)
}

/// Break a name into display lines on whitespace and camelCase seams.
fn split_label(name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for word in name.split_whitespace() {
        let mut current = String::new();
        let chars: Vec<char> = word.chars().collect();
        for (i, &ch) in chars.iter().enumerate() {
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if ch.is_uppercase() && next_is_lower && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(name.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::layout::treemap::{self, TreemapConfig};

    fn chart_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("skills");
        let a = tree.add_child(tree.root(), "frontend", 0.0);
        tree.add_child(a, "TypeScript", 2.0);
        tree.add_child(a, "css", 1.0);
        let b = tree.add_child(tree.root(), "backend", 0.0);
        tree.add_child(b, "rust", 3.0);
        tree.sum();
        treemap::layout(&mut tree, &TreemapConfig::default());
        color::propagate(&mut tree, &color::discrete_palette(2));
        tree
    }

    #[test]
    fn one_tile_per_leaf() {
        let tree = chart_tree();
        let cmds = render_treemap(&tree);
        let tiles = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .count();
        assert_eq!(tiles, 3);
    }

    #[test]
    fn tiles_use_branch_colors_at_partial_opacity() {
        let tree = chart_tree();
        let a = tree.children(tree.root())[0];
        let branch_color = tree[a].color;
        let cmds = render_treemap(&tree);
        let found = cmds.iter().any(|c| {
            matches!(c, RenderCommand::DrawRect { fill: Paint::Solid(col), opacity, label, .. }
                if *col == branch_color
                    && (*opacity - TILE_OPACITY).abs() < 1e-12
                    && label.as_deref() == Some("TypeScript"))
        });
        assert!(found);
    }

    #[test]
    fn camel_case_names_wrap() {
        assert_eq!(split_label("TypeScript"), vec!["Type", "Script"]);
        assert_eq!(split_label("GitHub Actions"), vec!["Git", "Hub", "Actions"]);
        assert_eq!(split_label("css"), vec!["css"]);
    }

    #[test]
    fn every_tile_gets_at_least_one_label_line() {
        let tree = chart_tree();
        let cmds = render_treemap(&tree);
        let texts = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        // TypeScript wraps to two lines, css and rust are one each.
        assert_eq!(texts, 4);
    }
}
