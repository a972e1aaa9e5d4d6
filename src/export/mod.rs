//! Turning a scene into files: a PNG raster or a replayable drawing script.

mod code;
mod raster;

pub use code::generate_code;
pub use raster::{export_png, render_pixmap, write_export};
