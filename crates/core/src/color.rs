//! Branch color assignment.
//!
//! Top-level branches sample a cyclic rainbow; every descendant inherits
//! its branch hue with a depth-dependent lightness lift so leaves read
//! brighter than the categories above them. Propagation is a single
//! top-down pass and idempotent: colors derive from the palette and the
//! tree shape, never from a node's current color.

use skillwheel_protocol::Color;

use crate::model::{SkillTree, PLACEHOLDER_COLOR};

/// Cubehelix point to RGB (Green, "A colour scheme for the display of
/// astronomical intensity images"). `h` in degrees, `s`/`l` unitless.
fn cubehelix(h: f64, s: f64, l: f64) -> Color {
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    let r = l + a * (-0.14861 * cos_h + 1.78277 * sin_h);
    let g = l + a * (-0.29227 * cos_h - 0.90649 * sin_h);
    let b = l + a * (1.97294 * cos_h);
    Color::rgb(
        r.clamp(0.0, 1.0) as f32,
        g.clamp(0.0, 1.0) as f32,
        b.clamp(0.0, 1.0) as f32,
    )
}

/// Cyclic "less-angry rainbow" interpolator over `[0, 1)`.
pub fn rainbow(t: f64) -> Color {
    let t = t - t.floor();
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// `n` uniform samples of the rainbow across `[0, 1)`.
///
/// Sampling at `i / n` (not `i / (n - 1)`) keeps the first and last hue
/// distinct on the cycle.
pub fn discrete_palette(n: usize) -> Vec<Color> {
    let n = n.max(1);
    (0..n).map(|i| rainbow(i as f64 / n as f64)).collect()
}

/// Assign colors: root keeps the placeholder, each top-level branch gets a
/// palette hue, descendants inherit it with internal nodes slightly lifted
/// and de-saturated and leaves lifted further.
pub fn propagate(tree: &mut SkillTree, palette: &[Color]) {
    propagate_with_sibling_shift(tree, palette, 0.0);
}

/// Like [`propagate`], but rotates each node's hue by
/// `sibling index × shift_degrees` to visually separate same-branch
/// siblings. `shift_degrees = 0` disables the perturbation.
pub fn propagate_with_sibling_shift(tree: &mut SkillTree, palette: &[Color], shift_degrees: f64) {
    let root = tree.root();
    tree[root].color = PLACEHOLDER_COLOR;
    if palette.is_empty() {
        return;
    }

    let branches: Vec<_> = tree.children(root).to_vec();
    for (i, &branch) in branches.iter().enumerate() {
        let (h, s, l) = rgb_to_hsl(palette[i % palette.len()]);
        for id in tree.descendants(branch) {
            let sibling_index = tree[id]
                .parent
                .map(|p| {
                    tree.children(p)
                        .iter()
                        .position(|&c| c == id)
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            let h = if tree[id].depth > 1 {
                h + sibling_index as f64 * shift_degrees
            } else {
                h
            };
            tree[id].color = if tree.is_leaf(id) {
                hsl_to_rgb(h, s, (l + 0.15).clamp(0.0, 1.0))
            } else {
                hsl_to_rgb(h, (s - 0.10).max(0.0), (l + 0.05).clamp(0.0, 1.0))
            };
        }
    }
}

/// Palette sized to the number of top-level branches, the default wiring.
pub fn branch_palette(tree: &SkillTree) -> Vec<Color> {
    discrete_palette(tree.children(tree.root()).len())
}

fn rgb_to_hsl(c: Color) -> (f64, f64, f64) {
    let r = f64::from(c.r);
    let g = f64::from(c.g);
    let b = f64::from(c.b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < 1e-9 {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if (max - r).abs() < 1e-9 {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < 1e-9 {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h * 60.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(360.0) / 360.0;
    if s <= 0.0 {
        let v = l as f32;
        return Color::rgb(v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    Color::rgb(
        channel(h + 1.0 / 3.0) as f32,
        channel(h) as f32,
        channel(h - 1.0 / 3.0) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SkillTree;

    fn sample_tree() -> SkillTree {
        let mut tree = SkillTree::with_root("root");
        let a = tree.add_child(tree.root(), "a", 0.0);
        tree.add_child(a, "a1", 0.0);
        tree.add_child(a, "a2", 0.0);
        tree.add_child(tree.root(), "b", 0.0);
        tree
    }

    #[test]
    fn palette_hues_are_distinct() {
        let palette = discrete_palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
        assert_ne!(palette[0], palette[2]);
    }

    #[test]
    fn root_keeps_placeholder_everyone_else_does_not() {
        let mut tree = sample_tree();
        propagate(&mut tree, &branch_palette(&tree));
        assert_eq!(tree[tree.root()].color, PLACEHOLDER_COLOR);
        for id in tree.ids().skip(1) {
            assert_ne!(tree[id].color, PLACEHOLDER_COLOR, "{}", tree[id].name);
        }
    }

    #[test]
    fn branches_get_different_hues() {
        let mut tree = sample_tree();
        propagate(&mut tree, &branch_palette(&tree));
        let kids = tree.children(tree.root()).to_vec();
        let a = tree.children(kids[0])[0];
        assert_ne!(tree[kids[0]].color, tree[kids[1]].color);
        // A child shares its branch hue, not the sibling branch's.
        let (ha, _, _) = rgb_to_hsl(tree[a].color);
        let (hb, _, _) = rgb_to_hsl(tree[kids[1]].color);
        assert!((ha - hb).abs() > 1.0);
    }

    #[test]
    fn leaves_are_brighter_than_their_category() {
        let mut tree = sample_tree();
        propagate(&mut tree, &branch_palette(&tree));
        let a = tree.children(tree.root())[0];
        let a1 = tree.children(a)[0];
        let (_, _, l_cat) = rgb_to_hsl(tree[a].color);
        let (_, _, l_leaf) = rgb_to_hsl(tree[a1].color);
        assert!(l_leaf > l_cat);
    }

    #[test]
    fn propagation_is_idempotent() {
        let mut tree = sample_tree();
        let palette = branch_palette(&tree);
        propagate(&mut tree, &palette);
        let first: Vec<_> = tree.ids().map(|id| tree[id].color).collect();
        propagate(&mut tree, &palette);
        let second: Vec<_> = tree.ids().map(|id| tree[id].color).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sibling_shift_separates_same_branch_leaves() {
        let mut tree = sample_tree();
        let palette = branch_palette(&tree);
        propagate_with_sibling_shift(&mut tree, &palette, 12.0);
        let a = tree.children(tree.root())[0];
        let kids = tree.children(a).to_vec();
        assert_ne!(tree[kids[0]].color, tree[kids[1]].color);
    }

    #[test]
    fn hsl_roundtrip_is_close() {
        let c = Color::rgb(0.3, 0.6, 0.2);
        let (h, s, l) = rgb_to_hsl(c);
        let back = hsl_to_rgb(h, s, l);
        assert!((c.r - back.r).abs() < 1e-3);
        assert!((c.g - back.g).abs() < 1e-3);
        assert!((c.b - back.b).abs() < 1e-3);
    }
}
