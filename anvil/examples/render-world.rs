//! Renders every region of a world directory into `./maps/<world name>/`,
//! using an empty color table (every block renders as opaque black). A
//! real driver would load its color table from a block-id catalog; this
//! example exists to exercise the pipeline end to end.

use std::path::PathBuf;

use anvil::{render_world, ClassicRenderer, StaticColorTable, World};

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    let world_path = args.get(1).expect("usage: render-world <world-dir>");

    env_logger::init();

    let world = World::open(world_path).expect("open world");
    let colors = StaticColorTable::new();
    let mut renderer = ClassicRenderer::new(&colors);

    let out_dir = PathBuf::from("maps").join(&world.name);
    std::fs::create_dir_all(&out_dir).expect("create output directory");

    render_world(&world, &mut renderer, &out_dir).expect("render world");
}
