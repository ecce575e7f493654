use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
    Terminal,
};
use skillwheel_core::layout::treemap;
use skillwheel_core::model::{NodeId, SkillTree};

fn to_tui_color(c: skillwheel_protocol::Color) -> Color {
    Color::Rgb(
        (c.r.clamp(0.0, 1.0) * 255.0) as u8,
        (c.g.clamp(0.0, 1.0) * 255.0) as u8,
        (c.b.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Interactive one-level treemap browser: the current node's children
/// tile the terminal; Enter descends, Backspace ascends.
pub fn render_tui(tree: &SkillTree) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut current: NodeId = tree.root();
    let mut selected: usize = 0;

    loop {
        let children = tree.children(current).to_vec();

        terminal.draw(|frame| {
            let area = frame.area();

            let path: Vec<&str> = tree
                .ancestors(current)
                .into_iter()
                .rev()
                .map(|id| tree[id].name.as_str())
                .collect();
            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " {} | ←→ select | Enter open | Backspace up | q quit ",
                    path.join(" / "),
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            if children.is_empty() || content.width == 0 || content.height == 0 {
                return;
            }

            let values: Vec<f64> = children.iter().map(|&c| tree[c].value.max(1.0)).collect();
            let tiles = treemap::tile(
                &values,
                skillwheel_protocol::Rect::new(
                    0.0,
                    0.0,
                    f64::from(content.width),
                    f64::from(content.height),
                ),
            );

            let buf = frame.buffer_mut();
            for (i, (&child, tile)) in children.iter().zip(&tiles).enumerate() {
                let x0 = tile.x.round() as u16;
                let y0 = tile.y.round() as u16;
                let x1 = ((tile.x + tile.w).round() as u16).min(content.width);
                let y1 = ((tile.y + tile.h).round() as u16).min(content.height);
                if x1 <= x0 || y1 <= y0 {
                    continue;
                }

                let mut bg = to_tui_color(tree[child].color);
                if i == selected {
                    bg = to_tui_color(tree[child].color.brighter(1.6));
                }
                for y in y0..y1 {
                    for x in x0..x1 {
                        let cx = content.x + x;
                        let cy = content.y + y;
                        if cx < content.x + content.width && cy < content.y + content.height {
                            buf[(cx, cy)].set_char(' ').set_bg(bg);
                        }
                    }
                }

                let suffix = if tree.is_leaf(child) { "" } else { "/" };
                let label = format!(
                    "{}{} ({})",
                    tree[child].name, suffix, tree[child].value as u64,
                );
                let fg = if i == selected {
                    Color::Black
                } else {
                    Color::White
                };
                let max_chars = usize::from(x1 - x0);
                for (j, ch) in label.chars().take(max_chars).enumerate() {
                    buf[(content.x + x0 + j as u16, content.y + y0)]
                        .set_char(ch)
                        .set_fg(fg)
                        .set_bg(bg);
                }
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left | KeyCode::Up => {
                        selected = selected.saturating_sub(1);
                    }
                    KeyCode::Right | KeyCode::Down => {
                        if !children.is_empty() {
                            selected = (selected + 1).min(children.len() - 1);
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(&child) = children.get(selected) {
                            if !tree.is_leaf(child) {
                                current = child;
                                selected = 0;
                            }
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(parent) = tree[current].parent {
                            current = parent;
                            selected = 0;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
