//! Sunburst view: current geometry into arc, label, and center commands.

use skillwheel_protocol::{Paint, Point, RenderCommand, TextAlign, ThemeToken};

use crate::layout::partition::{arc_visible, label_visible, pad_angle, DEFAULT_RINGS};
use crate::model::{NodeId, SkillTree};

/// Longest label drawn before truncation.
const MAX_LABEL_CHARS: usize = 14;
/// Labels never grow past this, however wide the wedge.
const MAX_LABEL_FONT: f64 = 14.0;
const CENTER_FONT: f64 = 21.0;

#[derive(Debug, Clone, Copy)]
pub struct SunburstConfig {
    /// Square chart size in pixels.
    pub size: f64,
    /// Visible ring count, center disc included.
    pub rings: u32,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            size: 400.0,
            rings: DEFAULT_RINGS,
        }
    }
}

impl SunburstConfig {
    /// Pixel thickness of one ring unit.
    pub fn radius(&self) -> f64 {
        self.size / (f64::from(self.rings) * 2.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

/// Font size for a wedge label: grows with the angular span, clamped so
/// text never overflows its wedge.
pub fn label_font_size(angular_span: f64, radius: f64) -> f64 {
    (angular_span * radius + 2.0).floor().min(MAX_LABEL_FONT)
}

/// Emit the full command list for the sunburst from `current` geometry.
/// `active` names the node shown in the center disc.
pub fn render_sunburst(
    tree: &SkillTree,
    cfg: &SunburstConfig,
    active: NodeId,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(tree.len() * 2 + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "sunburst".to_string(),
        label: Some("Skills".to_string()),
    });

    let center = cfg.center();
    let radius = cfg.radius();

    for id in tree.ids().skip(1) {
        let span = tree[id].current;
        if !arc_visible(&span, cfg.rings) {
            continue;
        }
        let pad = pad_angle(&span) / 2.0;
        commands.push(RenderCommand::DrawArc {
            center,
            inner_radius: span.y0 * radius,
            outer_radius: (span.y1 * radius - 1.0).max(span.y0 * radius),
            start_angle: span.x0 + pad,
            end_angle: span.x1 - pad,
            fill: Paint::Solid(tree[id].color),
            opacity: 1.0,
            node_id: Some(id.index() as u64),
        });
    }

    for id in tree.ids().skip(1) {
        let span = tree[id].current;
        if !label_visible(&span, cfg.rings) {
            continue;
        }
        let angle = span.mid_x();
        let r = span.mid_y() * radius;
        let position = Point::new(center.x + r * angle.sin(), center.y - r * angle.cos());
        // Flip labels on the left half so they stay upright.
        let rotation = angle - std::f64::consts::FRAC_PI_2
            + if angle < std::f64::consts::PI {
                0.0
            } else {
                std::f64::consts::PI
            };
        commands.push(RenderCommand::DrawText {
            position,
            text: truncate(&tree[id].name),
            color: Paint::Token(ThemeToken::TextPrimary),
            font_size: label_font_size(span.span_x(), radius),
            align: TextAlign::Center,
            rotation,
            opacity: 1.0,
        });
    }

    // Invisible center disc: the zoom-out hit target.
    commands.push(RenderCommand::DrawCircle {
        center,
        radius,
        fill: None,
        stroke: None,
        node_id: Some(active.index() as u64),
    });
    commands.push(RenderCommand::DrawText {
        position: center,
        text: tree[active].name.clone(),
        color: Paint::Token(ThemeToken::CenterText),
        font_size: CENTER_FONT,
        align: TextAlign::Center,
        rotation: 0.0,
        opacity: 1.0,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

fn truncate(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let head: String = name.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}
