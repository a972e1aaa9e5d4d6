use egui::{Color32, Pos2, Rect};
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, PremultipliedColorU8,
    SpreadMode, Stroke, StrokeDash, Transform,
};

use super::surface::{StrokeStyle, Surface, TextStyle, align_offset};
use crate::element::Bitmap;
use crate::text_layout::TextMeasure;

/// Software surface backed by a tiny-skia pixmap.
///
/// Text is drawn from the glyph coverage of the metrics' rasterizer; with
/// metrics that cannot rasterize, text is skipped.
pub struct PixmapSurface<'a> {
    pixmap: Pixmap,
    metrics: &'a dyn TextMeasure,
}

impl<'a> PixmapSurface<'a> {
    /// A `width`×`height` surface filled with opaque white.
    ///
    /// Returns `None` if either side is zero.
    pub fn new(width: u32, height: u32, metrics: &'a dyn TextMeasure) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Some(Self { pixmap, metrics })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight-alpha RGBA of one pixel, for inspection
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            c.red(),
            c.green(),
            c.blue(),
            c.alpha(),
        ))
    }

    /// Source-over blend of `color` at `coverage` into one pixel
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color32, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let index = (y * self.pixmap.width() + x) as usize;
        // Color32 channels are already premultiplied by its own alpha.
        let coverage = coverage.clamp(0.0, 1.0);
        let src_alpha = color.a() as f32 * coverage;
        let dst = self.pixmap.pixels()[index];
        let over = |src: u8, dst: u8| {
            (src as f32 * coverage + dst as f32 * (1.0 - src_alpha / 255.0)).round() as u8
        };
        let alpha = over(color.a(), dst.alpha());
        let blended = PremultipliedColorU8::from_rgba(
            over(color.r(), dst.red()).min(alpha),
            over(color.g(), dst.green()).min(alpha),
            over(color.b(), dst.blue()).min(alpha),
            alpha,
        );
        if let Some(blended) = blended {
            self.pixmap.pixels_mut()[index] = blended;
        }
    }
}

fn paint_for(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = true;
    paint
}

fn stroke_for(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width,
        dash: style
            .dash
            .and_then(|[dash, gap]| StrokeDash::new(vec![dash, gap], 0.0)),
        ..Stroke::default()
    }
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.min.x, rect.min.y, rect.width(), rect.height())
}

impl Surface for PixmapSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        if let Some(rect) = skia_rect(rect) {
            self.pixmap
                .fill_rect(rect, &paint_for(color), Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        if let Some(rect) = skia_rect(rect) {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(
                &path,
                &paint_for(stroke.color),
                &stroke_for(stroke),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: &StrokeStyle) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.stroke_path(
                &path,
                &paint_for(stroke.color),
                &stroke_for(stroke),
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: &StrokeStyle) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint_for(stroke.color),
                &stroke_for(stroke),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_text(&mut self, text: &str, origin: Pos2, style: &TextStyle) {
        let metrics = self.metrics;
        let Some(rasterizer) = metrics.rasterizer() else {
            return;
        };
        let width = metrics.text_width(text, &style.font);
        let origin = Pos2::new(origin.x + align_offset(style.align, width), origin.y);

        let mut coverage = Vec::new();
        rasterizer.rasterize(text, &style.font, origin, |x, y, c| coverage.push((x, y, c)));
        for (x, y, c) in coverage {
            self.blend_pixel(x, y, style.color, c);
        }
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) {
        let Some(source) = bitmap_pixmap(bitmap) else {
            return;
        };
        let Some(target) = skia_rect(rect) else {
            return;
        };
        let scale_x = rect.width() / bitmap.width() as f32;
        let scale_y = rect.height() / bitmap.height() as f32;
        let mut paint = Paint::default();
        paint.shader = Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_row(scale_x, 0.0, 0.0, scale_y, rect.min.x, rect.min.y),
        );
        self.pixmap
            .fill_rect(target, &paint, Transform::identity(), None);
    }
}

/// Premultiplied copy of a decoded bitmap
fn bitmap_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(bitmap.pixels().pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_layout::ApproxMetrics;
    use egui::Vec2;
    use image::{Rgba, RgbaImage};

    #[test]
    fn zero_sized_surfaces_are_refused() {
        let metrics = ApproxMetrics::default();
        assert!(PixmapSurface::new(0, 10, &metrics).is_none());
    }

    #[test]
    fn filled_rect_covers_its_pixels() {
        let metrics = ApproxMetrics::default();
        let mut surface = PixmapSurface::new(20, 20, &metrics).unwrap();
        assert_eq!(surface.pixel(5, 5), Some(Color32::WHITE));

        surface.fill_rect(
            Rect::from_min_size(Pos2::new(2.0, 2.0), Vec2::new(10.0, 10.0)),
            Color32::from_rgb(255, 0, 0),
        );
        assert_eq!(surface.pixel(5, 5), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(surface.pixel(15, 15), Some(Color32::WHITE));
    }

    #[test]
    fn images_are_scaled_into_their_rect() {
        let metrics = ApproxMetrics::default();
        let mut surface = PixmapSurface::new(20, 20, &metrics).unwrap();
        let bitmap = Bitmap::new(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])));
        surface.draw_image(
            &bitmap,
            Rect::from_min_size(Pos2::new(4.0, 4.0), Vec2::new(8.0, 8.0)),
        );
        assert_eq!(surface.pixel(8, 8), Some(Color32::from_rgb(0, 0, 255)));
        assert_eq!(surface.pixel(1, 1), Some(Color32::WHITE));
    }

    #[test]
    fn text_without_a_rasterizer_is_skipped() {
        let metrics = ApproxMetrics::default();
        let mut surface = PixmapSurface::new(40, 40, &metrics).unwrap();
        let style = TextStyle {
            font: crate::element::TextElement::default().font(),
            color: Color32::BLACK,
            align: crate::element::TextAlign::Left,
        };
        surface.fill_text("Hi", Pos2::new(5.0, 30.0), &style);
        for y in 0..40 {
            for x in 0..40 {
                assert_eq!(surface.pixel(x, y), Some(Color32::WHITE));
            }
        }
    }
}
