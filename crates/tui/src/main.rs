mod demo;
mod renderer;

use anyhow::Result;

fn main() -> Result<()> {
    let mut table = demo::DemoTable::new();
    renderer::run(&mut table)
}
