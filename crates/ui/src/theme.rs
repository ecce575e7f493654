use skillwheel_protocol::{Color, Paint, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

/// Resolve a paint source with an opacity multiplier applied.
pub fn resolve_paint(paint: &Paint, mode: ThemeMode, opacity: f64) -> egui::Color32 {
    let base = match paint {
        Paint::Token(t) => resolve(*t, mode),
        Paint::Solid(c) => solid_to_color32(*c),
    };
    if opacity >= 1.0 {
        base
    } else {
        let a = (f64::from(base.a()) * opacity.clamp(0.0, 1.0)) as u8;
        egui::Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), a)
    }
}

pub fn solid_to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (c.r.clamp(0.0, 1.0) * 255.0) as u8,
        (c.g.clamp(0.0, 1.0) * 255.0) as u8,
        (c.b.clamp(0.0, 1.0) * 255.0) as u8,
        (c.a.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha-ish neutrals.
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b),
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),
        TextPrimary => ResolvedColor::rgb(0xee, 0xee, 0xee),
        TextSecondary => ResolvedColor::rgb(0xba, 0xc2, 0xde),
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),
        CenterText => ResolvedColor::rgb(0xcc, 0xcc, 0xcc),
        LinkStroke => ResolvedColor::rgba(0x99, 0x99, 0x99, 200),
        NodeStroke => ResolvedColor::rgb(0xff, 0xff, 0xff),
        SelectionHighlight => ResolvedColor::rgba(0x89, 0xb4, 0xfa, 80),
        HoverHighlight => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 25),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        Surface => ResolvedColor::rgb(245, 245, 248),
        Border => ResolvedColor::rgb(210, 210, 220),
        TextPrimary => ResolvedColor::rgb(26, 26, 46),
        TextSecondary => ResolvedColor::rgb(80, 80, 100),
        TextMuted => ResolvedColor::rgb(100, 100, 110),
        CenterText => ResolvedColor::rgb(68, 68, 85),
        LinkStroke => ResolvedColor::rgba(0x99, 0x99, 0x99, 200),
        NodeStroke => ResolvedColor::rgb(26, 26, 46),
        SelectionHighlight => ResolvedColor::rgba(66, 135, 245, 60),
        HoverHighlight => ResolvedColor::rgba(0, 0, 0, 15),
    }
}

// ── egui visual presets ────────────────────────────────────────────────────

pub fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x18, 0x18, 0x25);
    v.window_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x89, 0xb4, 0xfa, 60);
    v.hyperlink_color = egui::Color32::from_rgb(0x89, 0xb4, 0xfa);
    v
}

pub fn light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(250, 250, 252);
    v.window_fill = egui::Color32::from_rgb(255, 255, 255);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(50, 110, 220, 50);
    v.hyperlink_color = egui::Color32::from_rgb(50, 110, 220);
    v
}
