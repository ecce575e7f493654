use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Color, Point, Rect};

/// Fill or stroke source: a semantic token resolved by the active theme,
/// or a literal color computed by the color propagator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Token(ThemeToken),
    Solid(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
}

impl Stroke {
    pub fn new(paint: Paint, width: f64) -> Self {
        Self { paint, width }
    }
}

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each chart. Renderers consume
/// the list sequentially — each command carries all the data it needs, so
/// the same list drives egui, terminal cells, and SVG output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// A ring segment of the sunburst. Angles are radians clockwise from
    /// 12 o'clock. `node_id` identifies the source node for hit-testing.
    DrawArc {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Paint,
        opacity: f64,
        node_id: Option<u64>,
    },

    /// A filled rectangle (treemap tiles).
    DrawRect {
        rect: Rect,
        fill: Paint,
        opacity: f64,
        label: Option<String>,
        node_id: Option<u64>,
    },

    /// A circle marker. `fill: None` draws a hollow marker.
    DrawCircle {
        center: Point,
        radius: f64,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
        node_id: Option<u64>,
    },

    /// A straight line segment.
    DrawLine {
        from: Point,
        to: Point,
        stroke: Stroke,
        opacity: f64,
    },

    /// A cubic Bézier (tidy-tree links).
    DrawCurve {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
        stroke: Stroke,
        opacity: f64,
    },

    /// A text run. `rotation` is radians around `position`.
    DrawText {
        position: Point,
        text: String,
        color: Paint,
        font_size: f64,
        align: TextAlign,
        rotation: f64,
        opacity: f64,
    },

    /// Begin a logical group (one chart, one treemap tile). Renderers may
    /// use this for batching or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_roundtrip_as_json() {
        let cmds = vec![
            RenderCommand::BeginGroup {
                id: "sunburst".into(),
                label: None,
            },
            RenderCommand::DrawArc {
                center: Point::new(100.0, 100.0),
                inner_radius: 20.0,
                outer_radius: 40.0,
                start_angle: 0.0,
                end_angle: std::f64::consts::PI,
                fill: Paint::Solid(Color::rgb(0.2, 0.4, 0.9)),
                opacity: 1.0,
                node_id: Some(3),
            },
            RenderCommand::EndGroup,
        ];
        let json = serde_json::to_string(&cmds).unwrap();
        let back: Vec<RenderCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
        assert!(matches!(
            back[1],
            RenderCommand::DrawArc {
                node_id: Some(3),
                ..
            }
        ));
    }
}
