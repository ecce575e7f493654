//! Core data model, layouts, and chart transforms for skillwheel.
//!
//! ```text
//!   skills JSON ──▶ SkillTree ──▶ layout + color ──▶ View Transform ──▶ RenderCommand[] ──▶ Renderer
//!    (data)        (arena)       (partition,         (sunburst,          (DrawArc,          (egui,
//!                                 treemap, tidy,      treemap, tree,      DrawText…)         terminal,
//!                                 force)              force)                                 SVG…)
//! ```
//!
//! Interaction (`interact`) and tweening (`transition`) mutate only the
//! geometry and active-node state; colors are assigned once and the base
//! layout survives every zoom.

pub mod color;
pub mod data;
pub mod interact;
pub mod layout;
pub mod model;
pub mod svg;
pub mod theme_state;
pub mod transition;
pub mod views;
