//! JS-facing bindings: build a skill tree, drive the sunburst zoom, and
//! pull render command lists (or finished SVG) across the boundary as
//! JSON strings.

use std::sync::Mutex;

use skillwheel_core::interact::{self, SunburstHit};
use skillwheel_core::layout::tree::{layout_two_pass, HeuristicMeasurer, TreeConfig};
use skillwheel_core::layout::{force, partition, treemap};
use skillwheel_core::model::{NodeId, SkillTree};
use skillwheel_core::transition::{Transition, SUNBURST_ZOOM_MS};
use skillwheel_core::views::sunburst::SunburstConfig;
use skillwheel_core::{color, data, svg, views};
use wasm_bindgen::prelude::*;

struct ChartSession {
    tree: SkillTree,
    active: NodeId,
    transition: Option<Transition>,
}

static SESSIONS: Mutex<Vec<ChartSession>> = Mutex::new(Vec::new());

fn with_session<T>(
    handle: usize,
    f: impl FnOnce(&mut ChartSession) -> Result<T, JsError>,
) -> Result<T, JsError> {
    let mut sessions = SESSIONS.lock().unwrap_or_else(|e| e.into_inner());
    let session = sessions
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid session handle"))?;
    f(session)
}

fn new_session(mut tree: SkillTree) -> usize {
    tree.count();
    partition::layout(&mut tree);
    color::propagate(&mut tree, &color::branch_palette(&tree));
    let active = tree.root();
    let mut sessions = SESSIONS.lock().unwrap_or_else(|e| e.into_inner());
    sessions.push(ChartSession {
        tree,
        active,
        transition: None,
    });
    sessions.len() - 1
}

/// Parse a skills dataset (single nested record). Returns a handle.
#[wasm_bindgen]
pub fn build_tree(bytes: &[u8]) -> Result<usize, JsError> {
    let tree = data::parse_skills(bytes).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(new_session(tree))
}

/// Build a session over the bundled demo dataset.
#[wasm_bindgen]
pub fn demo_tree() -> usize {
    new_session(data::demo_tree())
}

/// Render a view as a JSON `RenderCommand` list.
///
/// `view` is one of `"sunburst"`, `"treemap"`, `"tree"`, `"force"`.
/// The sunburst renders the session's live (possibly mid-zoom) geometry;
/// the other views lay out a scratch copy sized to `width`/`height`.
#[wasm_bindgen]
pub fn render_view(
    handle: usize,
    view: &str,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    with_session(handle, |session| {
        let commands = match view {
            "sunburst" => {
                let cfg = SunburstConfig {
                    size: width.min(height),
                    ..SunburstConfig::default()
                };
                views::sunburst::render_sunburst(&session.tree, &cfg, session.active)
            }
            "treemap" => {
                let mut scratch = session.tree.clone();
                treemap::layout(
                    &mut scratch,
                    &treemap::TreemapConfig {
                        width,
                        height,
                        ..treemap::TreemapConfig::default()
                    },
                );
                views::treemap::render_treemap(&scratch)
            }
            "tree" => {
                let mut scratch = session.tree.clone();
                scratch.sort_by_height();
                let cfg = TreeConfig {
                    size: width,
                    ..TreeConfig::default()
                };
                layout_two_pass(&mut scratch, &cfg, &HeuristicMeasurer);
                views::tree::render_tree(&scratch, None, 1.0)
            }
            "force" => {
                let mut scratch = session.tree.clone();
                force::layout(&mut scratch, &force::ForceConfig::default());
                views::force::render_force(&scratch)
            }
            _ => return Err(JsError::new(&format!("unknown view: {view}"))),
        };
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Render a view straight to a standalone SVG document.
#[wasm_bindgen]
pub fn render_view_svg(
    handle: usize,
    view: &str,
    width: f64,
    height: f64,
    dark: bool,
) -> Result<String, JsError> {
    let commands_json = render_view(handle, view, width, height)?;
    let commands: Vec<skillwheel_protocol::RenderCommand> =
        serde_json::from_str(&commands_json).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(svg::render_svg(&commands, width, height, dark))
}

/// Resolve a pixel position on the sunburst to a node id, the center
/// disc (-2), or nothing (-1).
#[wasm_bindgen]
pub fn sunburst_hit(handle: usize, x: f64, y: f64, size: f64) -> Result<i64, JsError> {
    with_session(handle, |session| {
        let cfg = SunburstConfig {
            size,
            ..SunburstConfig::default()
        };
        Ok(match interact::hit_test(&session.tree, &cfg, x, y) {
            Some(SunburstHit::Node(id)) => id.index() as i64,
            Some(SunburstHit::Center) => -2,
            None => -1,
        })
    })
}

/// Click a node (or -2 for the center disc). Starts a zoom transition
/// and returns whether anything changed.
#[wasm_bindgen]
pub fn sunburst_click(handle: usize, target: i64) -> Result<bool, JsError> {
    with_session(handle, |session| {
        let hit = match target {
            -2 => SunburstHit::Center,
            id if id >= 0 && (id as usize) < session.tree.len() => {
                SunburstHit::Node(NodeId(id as usize))
            }
            _ => return Err(JsError::new("invalid node id")),
        };
        let changed = interact::click(&mut session.tree, &mut session.active, hit);
        if changed {
            session.transition = Some(Transition::begin(&session.tree, SUNBURST_ZOOM_MS));
        }
        Ok(changed)
    })
}

/// Advance the running zoom by `dt_ms`. Returns `true` while animating —
/// the host keeps scheduling frames until this goes `false`.
#[wasm_bindgen]
pub fn tick(handle: usize, dt_ms: f64) -> Result<bool, JsError> {
    with_session(handle, |session| {
        let Some(tr) = session.transition.as_mut() else {
            return Ok(false);
        };
        let running = tr.tick(&mut session.tree, dt_ms);
        if !running {
            session.transition = None;
        }
        Ok(running)
    })
}

/// Name of the active (zoomed-to) node, for the center label.
#[wasm_bindgen]
pub fn active_name(handle: usize) -> Result<String, JsError> {
    with_session(handle, |session| {
        Ok(session.tree[session.active].name.clone())
    })
}

/// Number of nodes in the session's tree.
#[wasm_bindgen]
pub fn node_count(handle: usize) -> Result<usize, JsError> {
    with_session(handle, |session| Ok(session.tree.len()))
}
