use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
///
/// Node fills are computed per-node by color propagation and travel as
/// literal colors; tokens cover the structural chrome around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    /// Title text in the sunburst center disc.
    CenterText,
    /// Default stroke for force-graph links.
    LinkStroke,
    /// Outline of hollow node markers.
    NodeStroke,

    SelectionHighlight,
    HoverHighlight,
}
