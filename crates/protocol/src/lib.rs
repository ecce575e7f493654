pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{Paint, RenderCommand, Stroke, TextAlign};
pub use theme::ThemeToken;
pub use types::{ArcSpan, Color, Point, Rect};
