//! Force-directed layout for the skill graph view.
//!
//! A small spring embedder: parent-child links pull toward a rest
//! distance, every node pair repels, velocities decay each tick while the
//! simulation temperature anneals to zero. Initial placement is the
//! deterministic phyllotaxis spiral, so the whole run is reproducible
//! without a random source.

use skillwheel_protocol::ArcSpan;

use crate::model::SkillTree;

#[derive(Debug, Clone, Copy)]
pub struct ForceConfig {
    pub link_distance: f64,
    pub link_strength: f64,
    /// Negative values repel (many-body charge).
    pub charge: f64,
    pub velocity_decay: f64,
    pub ticks: usize,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            link_distance: 100.0,
            link_strength: 1.6,
            charge: -200.0,
            velocity_decay: 0.6,
            ticks: 300,
        }
    }
}

/// Run the simulation to rest and write final positions (point reading,
/// centered on the origin) into every node's `current`.
pub fn layout(tree: &mut SkillTree, cfg: &ForceConfig) {
    let n = tree.len();
    let mut x = vec![0.0f64; n];
    let mut y = vec![0.0f64; n];
    let mut vx = vec![0.0f64; n];
    let mut vy = vec![0.0f64; n];

    // Phyllotaxis spiral initial placement.
    let initial_radius = 10.0;
    let initial_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    for i in 0..n {
        let r = initial_radius * (0.5 + i as f64).sqrt();
        let a = i as f64 * initial_angle;
        x[i] = r * a.cos();
        y[i] = r * a.sin();
    }

    let links: Vec<(usize, usize)> = tree
        .ids()
        .filter_map(|id| tree[id].parent.map(|p| (p.index(), id.index())))
        .collect();

    // Temperature anneals so the final ticks barely move anything.
    let alpha_decay = 1.0 - 0.001f64.powf(1.0 / cfg.ticks.max(1) as f64);
    let mut alpha = 1.0;

    for _ in 0..cfg.ticks {
        alpha += (0.0 - alpha) * alpha_decay;

        // Link springs, half the correction to each endpoint.
        for &(s, t) in &links {
            let dx = x[t] + vx[t] - x[s] - vx[s];
            let dy = y[t] + vy[t] - y[s] - vy[s];
            let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
            let k = (dist - cfg.link_distance) / dist * alpha * cfg.link_strength;
            vx[t] -= dx * k * 0.5;
            vy[t] -= dy * k * 0.5;
            vx[s] += dx * k * 0.5;
            vy[s] += dy * k * 0.5;
        }

        // Many-body repulsion, exact pairwise (the datasets are tiny).
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = x[j] - x[i];
                let dy = y[j] - y[i];
                let d2 = (dx * dx + dy * dy).max(1.0);
                let w = cfg.charge * alpha / d2;
                vx[j] += dx * w;
                vy[j] += dy * w;
                vx[i] -= dx * w;
                vy[i] -= dy * w;
            }
        }

        for i in 0..n {
            vx[i] *= cfg.velocity_decay;
            vy[i] *= cfg.velocity_decay;
            x[i] += vx[i];
            y[i] += vy[i];
        }
    }

    for id in tree.ids() {
        tree[id].current = ArcSpan::point(x[id.index()], y[id.index()]);
    }
}
