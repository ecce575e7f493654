//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use skillwheel_protocol::{Paint, Point, RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the palette behind semantic tokens; literal node colors
/// pass through unchanged.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));

    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

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
                let d = arc_path(*center, *inner_radius, *outer_radius, *start_angle, *end_angle);
                svg.push_str(&format!(
                    r#"<path d="{d}" fill="{}" fill-opacity="{opacity}"/>"#,
                    resolve_paint(fill, dark),
                ));
            }

            RenderCommand::DrawRect {
                rect,
                fill,
                opacity,
                label,
                ..
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{opacity}">"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve_paint(fill, dark),
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</rect>");
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                ..
            } => {
                // Pure hit markers carry neither fill nor stroke.
                if fill.is_none() && stroke.is_none() {
                    continue;
                }
                let fill_attr = fill
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |p| resolve_paint(p, dark));
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill_attr}""#,
                    center.x, center.y,
                ));
                if let Some(s) = stroke {
                    svg.push_str(&format!(
                        r#" stroke="{}" stroke-width="{}""#,
                        resolve_paint(&s.paint, dark),
                        s.width,
                    ));
                }
                svg.push_str("/>");
            }

            RenderCommand::DrawLine {
                from,
                to,
                stroke,
                opacity,
            } => {
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-opacity="{opacity}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve_paint(&stroke.paint, dark),
                    stroke.width,
                ));
            }

            RenderCommand::DrawCurve {
                from,
                ctrl1,
                ctrl2,
                to,
                stroke,
                opacity,
            } => {
                svg.push_str(&format!(
                    r#"<path d="M{},{} C{},{} {},{} {},{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{opacity}"/>"#,
                    from.x,
                    from.y,
                    ctrl1.x,
                    ctrl1.y,
                    ctrl2.x,
                    ctrl2.y,
                    to.x,
                    to.y,
                    resolve_paint(&stroke.paint, dark),
                    stroke.width,
                ));
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
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let transform = if rotation.abs() > 1e-9 {
                    format!(
                        r#" transform="rotate({} {} {})""#,
                        rotation.to_degrees(),
                        position.x,
                        position.y,
                    )
                } else {
                    String::new()
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{}" fill-opacity="{opacity}" font-size="{font_size}" text-anchor="{anchor}"{transform}>{}</text>"#,
                    position.x,
                    position.y,
                    resolve_paint(color, dark),
                    escape_xml(text),
                ));
            }

            // Groups are semantic — no visual effect in static SVG.
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Ring-segment path: outer sweep, inner sweep back, closed.
fn arc_path(center: Point, r_inner: f64, r_outer: f64, a0: f64, a1: f64) -> String {
    let at = |r: f64, a: f64| {
        (
            center.x + r * a.sin(),
            center.y - r * a.cos(),
        )
    };
    let large = u8::from(a1 - a0 > std::f64::consts::PI);
    let (ox0, oy0) = at(r_outer, a0);
    let (ox1, oy1) = at(r_outer, a1);
    let (ix1, iy1) = at(r_inner, a1);
    let (ix0, iy0) = at(r_inner, a0);
    format!(
        "M{ox0:.3},{oy0:.3} A{r_outer:.3},{r_outer:.3} 0 {large} 1 {ox1:.3},{oy1:.3} \
         L{ix1:.3},{iy1:.3} A{r_inner:.3},{r_inner:.3} 0 {large} 0 {ix0:.3},{iy0:.3} Z"
    )
}

fn resolve_paint(paint: &Paint, dark: bool) -> String {
    match paint {
        Paint::Solid(c) => c.to_hex(),
        Paint::Token(t) => resolve_color(*t, dark).to_string(),
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#11111b",
            ThemeToken::Surface => "#181825",
            ThemeToken::Border => "#313244",
            ThemeToken::TextPrimary => "#eeeeee",
            ThemeToken::TextSecondary => "#bac2de",
            ThemeToken::TextMuted => "#a6adc8",
            ThemeToken::CenterText => "#cccccc",
            ThemeToken::LinkStroke => "#999999",
            ThemeToken::NodeStroke => "#ffffff",
            ThemeToken::SelectionHighlight | ThemeToken::HoverHighlight => "#89b4fa",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::Surface => "#f5f5f8",
            ThemeToken::Border => "#d2d2dc",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextSecondary => "#505064",
            ThemeToken::TextMuted => "#64646e",
            ThemeToken::CenterText => "#444455",
            ThemeToken::LinkStroke => "#999999",
            ThemeToken::NodeStroke => "#1a1a2e",
            ThemeToken::SelectionHighlight | ThemeToken::HoverHighlight => "#326edc",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::layout::partition;
    use crate::model::SkillTree;
    use crate::views::sunburst::{render_sunburst, SunburstConfig};

    fn sunburst_commands() -> Vec<RenderCommand> {
        let mut tree = SkillTree::with_root("skills");
        let a = tree.add_child(tree.root(), "web", 0.0);
        tree.add_child(a, "css", 0.0);
        tree.add_child(tree.root(), "ops", 0.0);
        tree.count();
        partition::layout(&mut tree);
        color::propagate(&mut tree, &color::discrete_palette(2));
        render_sunburst(&tree, &SunburstConfig::default(), tree.root())
    }

    #[test]
    fn sunburst_svg_has_arc_paths_and_labels() {
        let svg = render_svg(&sunburst_commands(), 400.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<path"));
        assert!(svg.contains("css"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn escapes_xml_entities() {
        let cmds = vec![RenderCommand::DrawRect {
            rect: skillwheel_protocol::Rect::new(0.0, 0.0, 10.0, 10.0),
            fill: Paint::Token(ThemeToken::Surface),
            opacity: 1.0,
            label: Some("C & C++ <embedded>".into()),
            node_id: None,
        }];
        let svg = render_svg(&cmds, 100.0, 100.0, false);
        assert!(svg.contains("C &amp; C++ &lt;embedded&gt;"));
    }

    #[test]
    fn arc_path_is_closed_and_uses_both_radii() {
        let d = arc_path(Point::new(0.0, 0.0), 10.0, 20.0, 0.0, 1.0);
        assert!(d.ends_with('Z'));
        assert!(d.contains("A20.000,20.000"));
        assert!(d.contains("A10.000,10.000"));
    }

    #[test]
    fn theme_tokens_follow_the_mode() {
        let cmds = vec![RenderCommand::DrawText {
            position: Point::new(5.0, 5.0),
            text: "label".into(),
            color: Paint::Token(ThemeToken::TextPrimary),
            font_size: 10.0,
            align: TextAlign::Left,
            rotation: 0.0,
            opacity: 1.0,
        }];
        let dark = render_svg(&cmds, 50.0, 50.0, true);
        let light = render_svg(&cmds, 50.0, 50.0, false);
        assert!(dark.contains("#eeeeee"));
        assert!(light.contains("#1a1a2e"));
    }

    #[test]
    fn invisible_hit_markers_are_skipped() {
        let cmds = vec![RenderCommand::DrawCircle {
            center: Point::new(0.0, 0.0),
            radius: 50.0,
            fill: None,
            stroke: None,
            node_id: Some(0),
        }];
        let svg = render_svg(&cmds, 100.0, 100.0, true);
        assert!(!svg.contains("<circle"));
    }
}
