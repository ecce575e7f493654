mod renderer;

use std::path::PathBuf;

use anyhow::Result;
use skillwheel_core::{color, data};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut tree = if let Some(path) = args.get(1) {
        let bytes = std::fs::read(PathBuf::from(path))?;
        data::parse_skills(&bytes)?
    } else {
        data::demo_tree()
    };

    tree.count();
    color::propagate(&mut tree, &color::branch_palette(&tree));

    renderer::render_tui(&tree)?;
    Ok(())
}
