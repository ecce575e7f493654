use eframe::egui;
use skillwheel_core::data;
use skillwheel_core::interact;
use skillwheel_core::layout::tree::{self as tidy, TreeConfig};
use skillwheel_core::layout::treemap::TreemapConfig;
use skillwheel_core::layout::{force, partition, treemap};
use skillwheel_core::model::{NodeId, SkillTree};
use skillwheel_core::theme_state::{PreferenceStore, StaticScheme, ThemeChoice, ThemeController};
use skillwheel_core::transition::{
    Transition, HOVER_REVERT_MS, SUNBURST_ZOOM_MS, TREE_REPOSITION_MS,
};
use skillwheel_core::views::sunburst::SunburstConfig;
use skillwheel_core::{color, views};
use skillwheel_protocol::ArcSpan;

use crate::renderer::{self, ContextMeasurer};
use crate::theme::{self, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartTab {
    Sunburst,
    Treemap,
    Tree,
    Force,
}

struct SunburstState {
    tree: SkillTree,
    active: NodeId,
    transition: Option<Transition>,
}

struct TreemapState {
    tree: SkillTree,
}

struct TidyState {
    tree: SkillTree,
    /// Measured widest label; `None` until the first two-pass layout.
    label_width: Option<f64>,
    transition: Option<Transition>,
    /// Hover highlight, held briefly after un-hover before reverting.
    hover_linger: Option<(Vec<NodeId>, f64)>,
}

struct ForceState {
    tree: SkillTree,
}

/// Main application state.
pub struct SkillApp {
    tab: ChartTab,
    sunburst: SunburstState,
    treemap: TreemapState,
    tidy: TidyState,
    force: ForceState,
    theme: ThemeController<Box<dyn PreferenceStore>, StaticScheme>,
    theme_mode: ThemeMode,
    error: Option<String>,
}

impl SkillApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (store, system_dark) = platform_theme_io();
        let theme = ThemeController::new(store, StaticScheme(system_dark));
        let theme_mode = match theme.resolve() {
            ThemeChoice::Dark => ThemeMode::Dark,
            ThemeChoice::Light => ThemeMode::Light,
        };
        cc.egui_ctx.set_visuals(match theme_mode {
            ThemeMode::Dark => theme::dark_visuals(),
            ThemeMode::Light => theme::light_visuals(),
        });

        let base = data::demo_tree();
        let mut app = Self {
            tab: ChartTab::Sunburst,
            sunburst: SunburstState {
                tree: SkillTree::with_root("skills"),
                active: NodeId(0),
                transition: None,
            },
            treemap: TreemapState {
                tree: SkillTree::with_root("skills"),
            },
            tidy: TidyState {
                tree: SkillTree::with_root("skills"),
                label_width: None,
                transition: None,
                hover_linger: None,
            },
            force: ForceState {
                tree: SkillTree::with_root("skills"),
            },
            theme,
            theme_mode,
            error: None,
        };
        app.load_tree(base);
        app
    }

    /// Rebuild all chart states from a freshly parsed dataset.
    fn load_tree(&mut self, base: SkillTree) {
        let palette = color::branch_palette(&base);

        let mut sun = base.clone();
        sun.count();
        partition::layout(&mut sun);
        color::propagate(&mut sun, &palette);
        let active = sun.root();
        self.sunburst = SunburstState {
            tree: sun,
            active,
            transition: None,
        };

        let mut map = base.clone();
        map.count();
        color::propagate(&mut map, &palette);
        self.treemap = TreemapState { tree: map };

        let mut tree = base.clone();
        tree.sort_by_height();
        color::propagate(&mut tree, &palette);
        self.tidy = TidyState {
            tree,
            label_width: None,
            transition: None,
            hover_linger: None,
        };

        let mut graph = base;
        color::propagate(&mut graph, &palette);
        force::layout(&mut graph, &force::ForceConfig::default());
        self.force = ForceState { tree: graph };

        self.error = None;
    }

    fn load_bytes(&mut self, bytes: &[u8]) {
        match data::parse_skills(bytes) {
            Ok(tree) => self.load_tree(tree),
            Err(e) => self.error = Some(format!("Failed to load skills: {e}")),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let next = self.theme.toggle();
        self.theme_mode = match next {
            ThemeChoice::Dark => ThemeMode::Dark,
            ThemeChoice::Light => ThemeMode::Light,
        };
        ctx.set_visuals(match self.theme_mode {
            ThemeMode::Dark => theme::dark_visuals(),
            ThemeMode::Light => theme::light_visuals(),
        });
    }

    fn show_sunburst(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let avail = ui.available_rect_before_wrap();
        let size = f64::from(avail.width().min(avail.height())).max(100.0);
        let cfg = SunburstConfig {
            size,
            rings: partition::DEFAULT_RINGS,
        };
        let offset = egui::pos2(
            avail.left() + (avail.width() - size as f32) / 2.0,
            avail.top() + (avail.height() - size as f32) / 2.0,
        );

        // Drive a running zoom; the latest click owns all targets.
        if let Some(tr) = &mut self.sunburst.transition {
            let dt_ms = f64::from(ctx.input(|i| i.stable_dt)) * 1000.0;
            if tr.tick(&mut self.sunburst.tree, dt_ms) {
                ctx.request_repaint();
            } else {
                self.sunburst.transition = None;
            }
        }

        let response = ui.allocate_rect(avail, egui::Sense::click());
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let px = f64::from(pos.x - offset.x);
                let py = f64::from(pos.y - offset.y);
                let hit = interact::hit_test(&self.sunburst.tree, &cfg, px, py);
                if let Some(hit) = hit {
                    if interact::click(&mut self.sunburst.tree, &mut self.sunburst.active, hit) {
                        self.sunburst.transition =
                            Some(Transition::begin(&self.sunburst.tree, SUNBURST_ZOOM_MS));
                        ctx.request_repaint();
                    }
                }
            }
        }

        let painter = ui.painter_at(avail);
        paint_background(&painter, avail, self.theme_mode);
        let cmds =
            views::sunburst::render_sunburst(&self.sunburst.tree, &cfg, self.sunburst.active);
        renderer::render_commands(&painter, &cmds, offset, self.theme_mode);
    }

    fn show_treemap(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let avail = ui.available_rect_before_wrap();
        // Datasets are tens of nodes; relaying out per frame keeps the
        // tiles glued to the window size.
        treemap::layout(
            &mut self.treemap.tree,
            &TreemapConfig {
                width: f64::from(avail.width()),
                height: f64::from(avail.height()),
                ..TreemapConfig::default()
            },
        );

        let painter = ui.painter_at(avail);
        paint_background(&painter, avail, self.theme_mode);
        let cmds = views::treemap::render_treemap(&self.treemap.tree);
        let result = renderer::render_commands(&painter, &cmds, avail.min, self.theme_mode);

        if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
            if avail.contains(pos) {
                for hit in &result.hit_regions {
                    if hit.rect.contains(pos) {
                        if let Some(label) = &hit.label {
                            #[allow(deprecated)]
                            egui::show_tooltip_at_pointer(
                                ctx,
                                ui.layer_id(),
                                egui::Id::new("tile_tooltip"),
                                |ui| {
                                    ui.label(label);
                                },
                            );
                        }
                        break;
                    }
                }
            }
        }
    }

    fn show_tidy(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let avail = ui.available_rect_before_wrap();
        let cfg = TreeConfig {
            size: f64::from(avail.width()).max(200.0) - 40.0,
            ..TreeConfig::default()
        };

        if self.tidy.label_width.is_none() {
            // Two-pass layout: provisional positions, measure rendered
            // label extents, then the real layout — animated in from the
            // spine like the first page load.
            let measurer = ContextMeasurer { ctx };
            tidy::layout(&mut self.tidy.tree, &cfg, cfg.default_label);
            let widest = tidy::measure_labels(&self.tidy.tree, &measurer, cfg.font_size);
            tidy::layout_into_targets(&mut self.tidy.tree, &cfg, widest / 2.0);
            let spine = ArcSpan::point(0.0, cfg.size / 2.0);
            for id in self.tidy.tree.ids() {
                self.tidy.tree[id].current = spine;
            }
            self.tidy.transition = Some(Transition::begin(&self.tidy.tree, TREE_REPOSITION_MS));
            self.tidy.label_width = Some(widest);
        }

        let dt_ms = f64::from(ctx.input(|i| i.stable_dt)) * 1000.0;
        let mut opacity = 1.0;
        if let Some(tr) = &mut self.tidy.transition {
            if tr.tick(&mut self.tidy.tree, dt_ms) {
                opacity = tr.progress();
                ctx.request_repaint();
            } else {
                self.tidy.transition = None;
            }
        } else if let Some(widest) = self.tidy.label_width {
            // Settled: track window resizes directly.
            tidy::layout(&mut self.tidy.tree, &cfg, widest / 2.0);
        }

        let offset = egui::pos2(
            avail.left() + 20.0 + self.tidy.label_width.unwrap_or(60.0) as f32 / 2.0,
            avail.top() + 20.0,
        );

        // Hover: highlight the path from the node (or its incoming link)
        // to the root. The highlight lingers briefly after un-hover
        // before colors revert.
        let mut hovered: Option<Vec<NodeId>> = None;
        if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
            if avail.contains(pos) {
                hovered = self
                    .hover_target(pos, offset)
                    .map(|id| interact::hover_path(&self.tidy.tree, id));
            }
        }
        match hovered {
            Some(path) => self.tidy.hover_linger = Some((path, HOVER_REVERT_MS)),
            None => {
                if let Some((_, remaining)) = &mut self.tidy.hover_linger {
                    *remaining -= dt_ms;
                    if *remaining <= 0.0 {
                        self.tidy.hover_linger = None;
                    } else {
                        ctx.request_repaint();
                    }
                }
            }
        }
        let highlight = self.tidy.hover_linger.as_ref().map(|(path, _)| path.as_slice());

        let painter = ui.painter_at(avail);
        paint_background(&painter, avail, self.theme_mode);
        let cmds = views::tree::render_tree(&self.tidy.tree, highlight, opacity);
        renderer::render_commands(&painter, &cmds, offset, self.theme_mode);
    }

    /// The tree node under the pointer: a marker within grab distance, or
    /// the child end of the nearest link.
    fn hover_target(&self, pos: egui::Pos2, offset: egui::Pos2) -> Option<NodeId> {
        const GRAB: f32 = 8.0;
        let tree = &self.tidy.tree;
        let to_screen = |id: NodeId| {
            let span = tree[id].current;
            egui::pos2(offset.x + span.x0 as f32, offset.y + span.y0 as f32)
        };
        let mut best: Option<(f32, NodeId)> = None;
        for id in tree.ids() {
            let d = to_screen(id).distance(pos);
            if d <= GRAB && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, id));
            }
        }
        if best.is_none() {
            for id in tree.ids().skip(1) {
                let Some(parent) = tree[id].parent else { continue };
                let d = segment_distance(pos, to_screen(parent), to_screen(id));
                if d <= GRAB / 2.0 && best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, id));
                }
            }
        }
        best.map(|(_, id)| id)
    }

    fn show_force(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_rect_before_wrap();
        let painter = ui.painter_at(avail);
        paint_background(&painter, avail, self.theme_mode);
        // Force positions are origin-centered.
        let cmds = views::force::render_force(&self.force.tree);
        renderer::render_commands(&painter, &cmds, avail.center(), self.theme_mode);
    }
}

impl eframe::App for SkillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("skillwheel");
                ui.separator();

                for (tab, label) in [
                    (ChartTab::Sunburst, "Sunburst"),
                    (ChartTab::Treemap, "Treemap"),
                    (ChartTab::Tree, "Tree"),
                    (ChartTab::Force, "Graph"),
                ] {
                    if ui.selectable_label(self.tab == tab, label).clicked() {
                        self.tab = tab;
                    }
                }

                ui.separator();

                if ui.button("📂 Open").clicked() {
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Skills", &["json"])
                            .pick_file()
                        {
                            match std::fs::read(&path) {
                                Ok(bytes) => self.load_bytes(&bytes),
                                Err(e) => self.error = Some(format!("Failed to read file: {e}")),
                            }
                        }
                    }
                }

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.toggle_theme(ctx);
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                } else {
                    let tree = &self.sunburst.tree;
                    ui.label(format!(
                        "{} skills in {} branches | active: {}",
                        tree.leaves().len(),
                        tree.children(tree.root()).len(),
                        tree[self.sunburst.active].name,
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            ChartTab::Sunburst => self.show_sunburst(ui, ctx),
            ChartTab::Treemap => self.show_treemap(ui, ctx),
            ChartTab::Tree => self.show_tidy(ui, ctx),
            ChartTab::Force => self.show_force(ui),
        });
    }
}

fn paint_background(painter: &egui::Painter, rect: egui::Rect, mode: ThemeMode) {
    painter.rect_filled(
        rect,
        egui::CornerRadius::ZERO,
        theme::resolve(skillwheel_protocol::ThemeToken::Background, mode),
    );
}

fn segment_distance(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_sq();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(target_arch = "wasm32")]
fn platform_theme_io() -> (Box<dyn PreferenceStore>, bool) {
    let system_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches());
    (Box::new(LocalStorageStore), system_dark)
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_theme_io() -> (Box<dyn PreferenceStore>, bool) {
    use skillwheel_core::theme_state::MemoryStore;
    (Box::new(MemoryStore::default()), true)
}

/// `localStorage`-backed preference store; absent storage (private mode,
/// unmount races) silently degrades to no persistence.
#[cfg(target_arch = "wasm32")]
struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        web_sys::window()?
            .local_storage()
            .ok()
            .flatten()?
            .get_item(key)
            .ok()
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
}
