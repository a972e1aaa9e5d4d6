use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::info;
use tiny_skia::Pixmap;

use crate::config::CanvasSettings;
use crate::error::ExportError;
use crate::renderer::{PixmapSurface, RenderOptions, Renderer};
use crate::scene::Scene;
use crate::text_layout::TextMeasure;

/// Render `scene` onto an opaque white pixmap of the canvas size, without the selection overlay
pub fn render_pixmap(
    scene: &Scene,
    canvas: &CanvasSettings,
    metrics: &dyn TextMeasure,
) -> Result<Pixmap, ExportError> {
    let mut surface = PixmapSurface::new(canvas.width, canvas.height, metrics).ok_or(
        ExportError::InvalidCanvasSize {
            width: canvas.width,
            height: canvas.height,
        },
    )?;
    Renderer::new(metrics).render(&mut surface, scene, canvas, RenderOptions::export());
    Ok(surface.into_pixmap())
}

/// Render `scene` and encode it as PNG
pub fn export_png(
    scene: &Scene,
    canvas: &CanvasSettings,
    metrics: &dyn TextMeasure,
) -> Result<Vec<u8>, ExportError> {
    let pixmap = render_pixmap(scene, canvas, metrics)?;

    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba).ok_or(
        ExportError::InvalidCanvasSize {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    info!(
        "Exported {}x{} PNG ({} bytes)",
        pixmap.width(),
        pixmap.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Write export bytes to `path`
pub fn write_export(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    info!("Wrote {}", path.display());
    Ok(())
}
