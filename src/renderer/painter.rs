use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2};

use super::surface::{StrokeStyle, Surface, TextStyle};
use crate::element::{Bitmap, TextAlign};
use crate::text_layout::FontSpec;
use crate::texture_manager::TextureManager;

/// Ascent of egui's proportional face as a share of the font size
const ASCENT_RATIO: f32 = 0.8;

/// Mean glyph advance of egui's proportional face as a share of the font size
const MEAN_ADVANCE_RATIO: f32 = 0.5;

/// Overdraw offset per unit of weight widening, as a share of the font size
const EMBOLDEN_RATIO: f32 = 0.4;

/// egui ships a single proportional face, so weights are approximated: the
/// letter spacing follows the widening the export rasterizer applies, and
/// weights wider than normal are overdrawn slightly to the right.
fn letter_spacing(font: &FontSpec) -> f32 {
    font.size * MEAN_ADVANCE_RATIO * (font.weight.width_factor() - 1.0)
}

fn embolden_offset(font: &FontSpec) -> Option<f32> {
    let factor = font.weight.width_factor();
    (factor > 1.0).then(|| font.size * EMBOLDEN_RATIO * (factor - 1.0))
}

/// Live surface that forwards drawing to an egui painter.
///
/// Canvas coordinates are offset by `origin`, the screen position of the
/// canvas' top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    origin: Vec2,
    textures: &'a mut TextureManager,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, textures: &'a mut TextureManager) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            textures,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.origin
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect.translate(self.origin)
    }
}

fn egui_stroke(style: &StrokeStyle) -> Stroke {
    Stroke::new(style.width, style.color)
}

impl Surface for PainterSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(self.rect_to_screen(rect), 0.0, color);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        let rect = self.rect_to_screen(rect);
        match stroke.dash {
            Some([dash, gap]) => {
                let outline = [
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                    rect.left_top(),
                ];
                self.painter
                    .extend(Shape::dashed_line(&outline, egui_stroke(stroke), dash, gap));
            }
            None => {
                self.painter.rect_stroke(rect, 0.0, egui_stroke(stroke));
            }
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: &StrokeStyle) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, egui_stroke(stroke));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: &StrokeStyle) {
        let points = [self.to_screen(from), self.to_screen(to)];
        match stroke.dash {
            Some([dash, gap]) => self
                .painter
                .extend(Shape::dashed_line(&points, egui_stroke(stroke), dash, gap)),
            None => {
                self.painter.line_segment(points, egui_stroke(stroke));
            }
        }
    }

    // egui places text by its top edge, so the baseline is moved up by the ascent.
    fn fill_text(&mut self, text: &str, origin: Pos2, style: &TextStyle) {
        let format = TextFormat {
            font_id: FontId::proportional(style.font.size),
            color: style.color,
            extra_letter_spacing: letter_spacing(&style.font),
            ..Default::default()
        };
        let galley = self
            .painter
            .layout_job(LayoutJob::single_section(text.to_owned(), format));

        let width = galley.size().x;
        let shift = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => width / 2.0,
            TextAlign::Right => width,
        };
        let top = self.to_screen(origin) - Vec2::new(shift, style.font.size * ASCENT_RATIO);

        if let Some(offset) = embolden_offset(&style.font) {
            self.painter
                .galley(top + Vec2::new(offset, 0.0), galley.clone(), style.color);
        }
        self.painter.galley(top, galley, style.color);
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) {
        let texture = self.textures.texture_for(bitmap, self.painter.ctx());
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter
            .image(texture, self.rect_to_screen(rect), uv, Color32::WHITE);
    }
}
