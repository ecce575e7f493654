//! Geometry tweening between layout states.
//!
//! A [`Transition`] captures every node's geometry when it begins and
//! interpolates toward the pending `target` spans as the host feeds it
//! frame deltas. `current` holds the interpolated value on every tick and
//! the exact target at completion, so renderers always draw from
//! `current` and never see residual drift.
//!
//! Starting a new transition replaces the old one wholesale — the latest
//! target always wins, and no node is ever interpolated toward two
//! destinations at once.

use skillwheel_protocol::ArcSpan;

use crate::model::{NodeId, SkillTree};

/// Sunburst zoom duration.
pub const SUNBURST_ZOOM_MS: f64 = 750.0;
/// Tidy-tree reposition / fade-in duration.
pub const TREE_REPOSITION_MS: f64 = 1000.0;
/// Hover highlight revert duration.
pub const HOVER_REVERT_MS: f64 = 150.0;

/// Write every node's `target` relative to the new active node: the
/// active span is remapped onto the full circle and rings shift inward by
/// the active node's depth.
pub fn retarget_zoom(tree: &mut SkillTree, active: NodeId) {
    let a = tree[active].base;
    let a_span = a.span_x();
    let a_depth = f64::from(tree[active].depth);
    let tau = std::f64::consts::TAU;
    for id in tree.ids() {
        let b = tree[id].base;
        let ratio = |x: f64| {
            if a_span > 0.0 {
                ((x - a.x0) / a_span).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        tree[id].target = Some(ArcSpan {
            x0: ratio(b.x0) * tau,
            x1: ratio(b.x1) * tau,
            y0: (b.y0 - a_depth).max(0.0),
            y1: (b.y1 - a_depth).max(0.0),
        });
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    duration_ms: f64,
    elapsed_ms: f64,
    start: Vec<ArcSpan>,
}

impl Transition {
    /// Capture the current geometry of every node as the tween origin.
    /// Targets must already be written (by [`retarget_zoom`] or a
    /// `*_into_targets` layout).
    pub fn begin(tree: &SkillTree, duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            start: tree.ids().map(|id| tree[id].current).collect(),
        }
    }

    /// Advance by `dt_ms` and update every node's `current`. Returns
    /// `true` while the transition is still running.
    pub fn tick(&mut self, tree: &mut SkillTree, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        let t = self.progress();
        if t >= 1.0 {
            tree.snap_to_targets();
            return false;
        }
        let eased = ease_cubic_in_out(t);
        for id in tree.ids() {
            if let Some(target) = tree[id].target {
                let start = self
                    .start
                    .get(id.index())
                    .copied()
                    .unwrap_or(tree[id].current);
                tree[id].current = start.lerp(&target, eased);
            }
        }
        true
    }

    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
