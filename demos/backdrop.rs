//! Runs one of the seeded backdrop presets in a window.
//!
//! ```sh
//! cargo run --example backdrop            # prism field
//! cargo run --example backdrop -- grid    # horizon grids
//! cargo run --example backdrop -- stream  # data lines
//! ```
//!
//! Drag to rotate the rig, scroll to zoom.

use backdrop::errors::Result;
use backdrop::{presets, App, BackdropConfig};
use glam::Vec3;

fn main() -> Result<()> {
    env_logger::init();

    let preset = std::env::args().nth(1).unwrap_or_else(|| "prism".into());
    let scene = match preset.as_str() {
        "grid" => presets::grid_horizon(42),
        "stream" => presets::data_stream(42),
        _ => presets::prism_field(42),
    };

    let config = BackdropConfig::default()
        .interactive()
        .with_fog(8.0, 45.0, Vec3::new(0.01, 0.01, 0.03));

    App::new(config, scene).with_title("Backdrop").run()
}
