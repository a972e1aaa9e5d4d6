//! Scene painting against an abstract [`Surface`].
//!
//! The same pass drives the live canvas, PNG export and the recording
//! surface used by tests.

use egui::{Color32, Rect, Vec2};

use crate::config::CanvasSettings;
use crate::element::{Element, ElementKind};
use crate::geometry::{element_bounds, handles_for};
use crate::scene::Scene;
use crate::text_layout::TextMeasure;

mod display_list;
mod painter;
mod pixmap;
mod surface;

pub use display_list::{DisplayList, DrawOp};
pub use painter::PainterSurface;
pub use pixmap::PixmapSurface;
pub use surface::{StrokeStyle, Surface, TextStyle, align_offset};

/// Accent used for the selection box and its handles
pub const SELECTION_COLOR: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
/// Gap between an element's bounds and its selection box
pub const SELECTION_PADDING: f32 = 5.0;
/// Side length of a painted resize handle
pub const HANDLE_SIZE: f32 = 8.0;
const SELECTION_DASH: [f32; 2] = [5.0, 5.0];
const OVERLAY_STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paint the selection box and handles on top of the scene
    pub selection_overlay: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            selection_overlay: true,
        }
    }
}

impl RenderOptions {
    /// Options for producing a file: the scene alone
    pub fn export() -> Self {
        Self {
            selection_overlay: false,
        }
    }
}

pub struct Renderer<'a> {
    metrics: &'a dyn TextMeasure,
}

impl<'a> Renderer<'a> {
    pub fn new(metrics: &'a dyn TextMeasure) -> Self {
        Self { metrics }
    }

    /// Paint one full frame: background, visible elements bottom to top, then the overlay
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        scene: &Scene,
        canvas: &CanvasSettings,
        options: RenderOptions,
    ) {
        surface.fill_rect(canvas.rect(), canvas.background);

        for element in scene.elements().iter().filter(|e| e.visible) {
            surface.save();
            self.render_element(surface, element);
            surface.restore();
        }

        if options.selection_overlay {
            if let Some(selected) = scene.selected() {
                self.render_selection(surface, selected);
            }
        }
    }

    fn render_element(&self, surface: &mut dyn Surface, element: &Element) {
        let anchor = element.position;
        match &element.kind {
            ElementKind::Text(text) => {
                let style = TextStyle {
                    font: text.font(),
                    color: text.color,
                    align: text.align,
                };
                let layout = text.layout(self.metrics);
                for (line, origin) in layout.baselines(anchor) {
                    surface.fill_text(line, origin, &style);
                }
            }
            ElementKind::Line(line) => {
                let stroke = StrokeStyle::solid(line.stroke_color, line.stroke_width);
                surface.stroke_line(anchor, line.end, &stroke);
            }
            ElementKind::Rectangle(rect) => {
                let bounds = rect.rect(anchor);
                if rect.filled {
                    surface.fill_rect(bounds, rect.fill_color);
                }
                let stroke = StrokeStyle::solid(rect.stroke_color, rect.stroke_width);
                surface.stroke_rect(bounds, &stroke);
            }
            ElementKind::Circle(circle) => {
                if circle.filled {
                    surface.fill_circle(anchor, circle.radius, circle.fill_color);
                }
                let stroke = StrokeStyle::solid(circle.stroke_color, circle.stroke_width);
                surface.stroke_circle(anchor, circle.radius, &stroke);
            }
            ElementKind::Image(image) => surface.draw_image(&image.bitmap, image.rect(anchor)),
        }
    }

    fn render_selection(&self, surface: &mut dyn Surface, element: &Element) {
        surface.save();

        let outline = element_bounds(element, self.metrics).expand(SELECTION_PADDING);
        let dashed = StrokeStyle::dashed(SELECTION_COLOR, OVERLAY_STROKE_WIDTH, SELECTION_DASH);
        surface.stroke_rect(outline, &dashed);

        let handle_outline = StrokeStyle::solid(Color32::WHITE, OVERLAY_STROKE_WIDTH);
        for handle in handles_for(element, self.metrics) {
            let square = Rect::from_center_size(handle.pos, Vec2::splat(HANDLE_SIZE));
            surface.fill_rect(square, SELECTION_COLOR);
            surface.stroke_rect(square, &handle_outline);
        }

        surface.restore();
    }
}
