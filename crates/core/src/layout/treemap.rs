//! Squarified rectangular partition.
//!
//! Subdivides a fixed rectangle among children proportional to aggregated
//! value, preferring near-square tiles. Sibling gaps come from a pixel
//! padding that survives integer rounding: shared boundaries are rounded
//! from the same coordinate, so tiles may touch but never overlap.

use skillwheel_protocol::{ArcSpan, Rect};

use crate::model::SkillTree;

#[derive(Debug, Clone, Copy)]
pub struct TreemapConfig {
    pub width: f64,
    pub height: f64,
    /// Gap between sibling tiles (and inset from the parent), in pixels.
    pub padding: f64,
    /// Round every edge to whole pixels.
    pub round: bool,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            padding: 1.0,
            round: true,
        }
    }
}

/// Write treemap geometry (cartesian reading) into every node's `current`.
///
/// Expects aggregated values; zero-valued subtrees collapse to empty
/// rects at their parent's corner.
pub fn layout(tree: &mut SkillTree, cfg: &TreemapConfig) {
    let root = tree.root();
    tree[root].current = ArcSpan::new(0.0, cfg.width, 0.0, cfg.height);

    for id in tree.descendants(root) {
        let children = tree.children(id).to_vec();
        if children.is_empty() {
            continue;
        }
        let span = tree[id].current;
        let inner = inset(span_to_rect(&span), cfg.padding);
        let values: Vec<f64> = children.iter().map(|&c| tree[c].value).collect();
        let tiles = tile(&values, inner);
        for (&c, t) in children.iter().zip(tiles) {
            let r = inset(t, cfg.padding / 2.0);
            let r = if cfg.round { round_rect(r) } else { r };
            tree[c].current = ArcSpan::new(r.x, r.x + r.w, r.y, r.y + r.h);
        }
    }
}

/// Squarified tiling of `rect` into one sub-rect per value, covering it
/// exactly (before padding). Exposed for one-level browsers like the TUI.
pub fn tile(values: &[f64], rect: Rect) -> Vec<Rect> {
    let total: f64 = values.iter().copied().filter(|v| *v > 0.0).sum();
    if total <= 0.0 || rect.w <= 0.0 || rect.h <= 0.0 {
        return values
            .iter()
            .map(|_| Rect::new(rect.x, rect.y, 0.0, 0.0))
            .collect();
    }

    let areas: Vec<f64> = values
        .iter()
        .map(|v| v.max(0.0) / total * rect.area())
        .collect();
    let mut out = vec![Rect::new(rect.x, rect.y, 0.0, 0.0); values.len()];

    let mut remaining = rect;
    let mut start = 0;
    while start < areas.len() {
        // Skip zero-area entries: they keep their empty rect.
        if areas[start] <= 0.0 {
            out[start] = Rect::new(remaining.x, remaining.y, 0.0, 0.0);
            start += 1;
            continue;
        }

        // Grow the row while the worst aspect ratio keeps improving.
        let shorter = remaining.w.min(remaining.h);
        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut ratio = worst(&areas[start..end], row_sum, shorter);
        while end < areas.len() && areas[end] > 0.0 {
            let next_sum = row_sum + areas[end];
            let next_ratio = worst(&areas[start..=end], next_sum, shorter);
            if next_ratio > ratio {
                break;
            }
            row_sum = next_sum;
            ratio = next_ratio;
            end += 1;
        }

        // Lay the row along the shorter side of the remaining space.
        if remaining.w >= remaining.h {
            let strip_w = row_sum / remaining.h;
            let mut y = remaining.y;
            for i in start..end {
                let h = areas[i] / strip_w;
                out[i] = Rect::new(remaining.x, y, strip_w, h);
                y += h;
            }
            remaining.x += strip_w;
            remaining.w -= strip_w;
        } else {
            let strip_h = row_sum / remaining.w;
            let mut x = remaining.x;
            for i in start..end {
                let w = areas[i] / strip_h;
                out[i] = Rect::new(x, remaining.y, w, strip_h);
                x += w;
            }
            remaining.y += strip_h;
            remaining.h -= strip_h;
        }
        start = end;
    }
    out
}

fn worst(row: &[f64], row_sum: f64, shorter: f64) -> f64 {
    let strip = row_sum / shorter;
    row.iter()
        .map(|&a| {
            let other = a / strip;
            (strip / other).max(other / strip)
        })
        .fold(0.0, f64::max)
}

fn inset(r: Rect, by: f64) -> Rect {
    let by_x = by.min(r.w / 2.0);
    let by_y = by.min(r.h / 2.0);
    Rect::new(r.x + by_x, r.y + by_y, r.w - 2.0 * by_x, r.h - 2.0 * by_y)
}

fn round_rect(r: Rect) -> Rect {
    let x0 = r.x.round();
    let y0 = r.y.round();
    let x1 = (r.x + r.w).round();
    let y1 = (r.y + r.h).round();
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

/// Cartesian reading of a node's geometry cell.
pub fn span_to_rect(span: &ArcSpan) -> Rect {
    Rect::new(span.x0, span.y0, span.span_x(), span.span_y())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        for (name, w) in [("a1", 6.0), ("a2", 2.0), ("a3", 2.0)] {
            tree.add_child(a, name, w);
        }
        let b = tree.add_child(tree.root(), "b", 0.0);
        tree.add_child(b, "b1", 4.0);
        tree.sum();
        tree
    }

    #[test]
    fn siblings_never_overlap() {
        let mut tree = sample_tree();
        layout(&mut tree, &TreemapConfig::default());
        for id in tree.ids() {
            let kids = tree.children(id);
            for (i, &a) in kids.iter().enumerate() {
                for &b in &kids[i + 1..] {
                    let ra = span_to_rect(&tree[a].current);
                    let rb = span_to_rect(&tree[b].current);
                    if ra.area() > 0.0 && rb.area() > 0.0 {
                        assert!(!ra.intersects(&rb), "{} vs {}", tree[a].name, tree[b].name);
                    }
                }
            }
        }
    }

    #[test]
    fn child_areas_fit_inside_parent() {
        let mut tree = sample_tree();
        layout(&mut tree, &TreemapConfig::default());
        for id in tree.ids() {
            if tree.is_leaf(id) {
                continue;
            }
            let parent_area = span_to_rect(&tree[id].current).area();
            let child_area: f64 = tree
                .children(id)
                .iter()
                .map(|&c| span_to_rect(&tree[c].current).area())
                .sum();
            assert!(child_area <= parent_area + 1e-6);
        }
    }

    #[test]
    fn tiles_stay_inside_the_container() {
        let mut tree = sample_tree();
        let cfg = TreemapConfig::default();
        layout(&mut tree, &cfg);
        for id in tree.ids() {
            let s = tree[id].current;
            assert!(s.x0 >= -0.5 && s.y0 >= -0.5);
            assert!(s.x1 <= cfg.width + 0.5 && s.y1 <= cfg.height + 0.5);
        }
    }

    #[test]
    fn rounding_produces_integer_edges() {
        let mut tree = sample_tree();
        layout(&mut tree, &TreemapConfig::default());
        for id in tree.ids().skip(1) {
            let s = tree[id].current;
            assert_eq!(s.x0, s.x0.round());
            assert_eq!(s.x1, s.x1.round());
            assert_eq!(s.y0, s.y0.round());
            assert_eq!(s.y1, s.y1.round());
        }
    }

    #[test]
    fn tile_covers_the_rect_exactly() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let tiles = tile(&[3.0, 2.0, 1.0], rect);
        let total: f64 = tiles.iter().map(Rect::area).sum();
        assert!((total - rect.area()).abs() < 1e-6);
    }

    #[test]
    fn tile_proportions_match_values() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let tiles = tile(&[3.0, 1.0], rect);
        assert!((tiles[0].area() - 7500.0).abs() < 1e-6);
        assert!((tiles[1].area() - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn zero_total_collapses_to_empty_tiles() {
        let rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        let tiles = tile(&[0.0, 0.0], rect);
        assert!(tiles.iter().all(|t| t.area() == 0.0));
    }
}
