use egui::{FontId, Pos2, Rect, Stroke as EguiStroke};
use skillwheel_core::layout::tree::TextMeasurer;
use skillwheel_protocol::{RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// Radians per tessellation step when turning arcs into polygons.
const ARC_STEP: f64 = 0.05;

/// Region the user can click or hover, mapped back to a tree node.
pub struct HitRegion {
    pub rect: Rect,
    pub node_id: u64,
    pub label: Option<String>,
}

/// Result of rendering a command list.
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the chart area; command
/// coordinates are chart-local.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut hit_regions = Vec::new();
    let at = |x: f64, y: f64| Pos2::new(offset.x + x as f32, offset.y + y as f32);

    for cmd in commands {
        match cmd {
            RenderCommand::DrawArc {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                fill,
                opacity,
                ..
            } => {
                if *opacity <= 0.0 || end_angle <= start_angle {
                    continue;
                }
                let fill = theme::resolve_paint(fill, mode, *opacity);
                let c = at(center.x, center.y);
                // A ring segment is concave, so fill it as a fan of
                // convex quads instead of one polygon.
                let steps = ((end_angle - start_angle) / ARC_STEP).ceil().max(1.0) as usize;
                let point = |r: f64, a: f64| {
                    Pos2::new(
                        c.x + (r * a.sin()) as f32,
                        c.y - (r * a.cos()) as f32,
                    )
                };
                for i in 0..steps {
                    let a0 = start_angle + (end_angle - start_angle) * i as f64 / steps as f64;
                    let a1 =
                        start_angle + (end_angle - start_angle) * (i + 1) as f64 / steps as f64;
                    painter.add(egui::Shape::convex_polygon(
                        vec![
                            point(*inner_radius, a0),
                            point(*outer_radius, a0),
                            point(*outer_radius, a1),
                            point(*inner_radius, a1),
                        ],
                        fill,
                        EguiStroke::NONE,
                    ));
                }
            }

            RenderCommand::DrawRect {
                rect,
                fill,
                opacity,
                label,
                node_id,
            } => {
                let egui_rect = Rect::from_min_size(
                    at(rect.x, rect.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );
                painter.rect_filled(
                    egui_rect,
                    egui::CornerRadius::ZERO,
                    theme::resolve_paint(fill, mode, *opacity),
                );
                if let Some(id) = node_id {
                    hit_regions.push(HitRegion {
                        rect: egui_rect,
                        node_id: *id,
                        label: label.clone(),
                    });
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                node_id,
            } => {
                let c = at(center.x, center.y);
                let r = *radius as f32;
                if fill.is_some() || stroke.is_some() {
                    let fill_color = fill
                        .as_ref()
                        .map_or(egui::Color32::TRANSPARENT, |p| {
                            theme::resolve_paint(p, mode, 1.0)
                        });
                    let stroke = stroke.as_ref().map_or(EguiStroke::NONE, |s| {
                        EguiStroke::new(
                            s.width as f32,
                            theme::resolve_paint(&s.paint, mode, 1.0),
                        )
                    });
                    painter.circle(c, r, fill_color, stroke);
                }
                if let Some(id) = node_id {
                    hit_regions.push(HitRegion {
                        rect: Rect::from_center_size(c, egui::vec2(r * 2.0, r * 2.0)),
                        node_id: *id,
                        label: None,
                    });
                }
            }

            RenderCommand::DrawLine {
                from,
                to,
                stroke,
                opacity,
            } => {
                painter.line_segment(
                    [at(from.x, from.y), at(to.x, to.y)],
                    EguiStroke::new(
                        stroke.width as f32,
                        theme::resolve_paint(&stroke.paint, mode, *opacity),
                    ),
                );
            }

            RenderCommand::DrawCurve {
                from,
                ctrl1,
                ctrl2,
                to,
                stroke,
                opacity,
            } => {
                let shape = egui::epaint::CubicBezierShape::from_points_stroke(
                    [
                        at(from.x, from.y),
                        at(ctrl1.x, ctrl1.y),
                        at(ctrl2.x, ctrl2.y),
                        at(to.x, to.y),
                    ],
                    false,
                    egui::Color32::TRANSPARENT,
                    EguiStroke::new(
                        stroke.width as f32,
                        theme::resolve_paint(&stroke.paint, mode, *opacity),
                    ),
                );
                painter.add(shape);
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                rotation,
                opacity,
            } => {
                if *opacity <= 0.0 || *font_size < 1.0 {
                    continue;
                }
                let color = theme::resolve_paint(color, mode, *opacity);
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    FontId::proportional(*font_size as f32),
                    color,
                );
                let size = galley.size();
                // Anchor offset in unrotated text space, then rotate it
                // around the anchor point.
                let (ax, ay) = match align {
                    TextAlign::Left => (0.0, -size.y / 2.0),
                    TextAlign::Center => (-size.x / 2.0, -size.y / 2.0),
                    TextAlign::Right => (-size.x, -size.y / 2.0),
                };
                let (sin, cos) = (*rotation as f32).sin_cos();
                let anchor = at(position.x, position.y);
                let pos = Pos2::new(
                    anchor.x + ax * cos - ay * sin,
                    anchor.y + ax * sin + ay * cos,
                );
                let mut shape = egui::epaint::TextShape::new(pos, galley, color);
                shape.angle = *rotation as f32;
                painter.add(shape);
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic — no visual effect in egui.
            }
        }
    }

    RenderResult { hit_regions }
}

/// Label measurement backed by the real egui font atlas, for the
/// tidy tree's measure-then-relayout pass.
pub struct ContextMeasurer<'a> {
    pub ctx: &'a egui::Context,
}

impl TextMeasurer for ContextMeasurer<'_> {
    fn width(&self, text: &str, font_size: f64) -> f64 {
        let text = text.to_owned();
        self.ctx.fonts(|fonts| {
            f64::from(
                fonts
                    .layout_no_wrap(
                        text,
                        FontId::proportional(font_size as f32),
                        egui::Color32::WHITE,
                    )
                    .size()
                    .x,
            )
        })
    }
}
