use egui::{Color32, Pos2, Rect};

use super::surface::{StrokeStyle, Surface, TextStyle};
use crate::element::Bitmap;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    FillRect { rect: Rect, color: Color32 },
    StrokeRect { rect: Rect, stroke: StrokeStyle },
    FillCircle { center: Pos2, radius: f32, color: Color32 },
    StrokeCircle { center: Pos2, radius: f32, stroke: StrokeStyle },
    StrokeLine { from: Pos2, to: Pos2, stroke: StrokeStyle },
    FillText { text: String, origin: Pos2, style: TextStyle },
    DrawImage { size: [u32; 2], rect: Rect },
}

/// Surface that records calls instead of drawing them
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs in paint order
    pub fn texts(&self) -> Vec<(&str, Pos2)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, origin, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect()
    }

    /// Strokes drawn with a dash pattern
    pub fn dashed_strokes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| match op {
            DrawOp::StrokeRect { stroke, .. }
            | DrawOp::StrokeCircle { stroke, .. }
            | DrawOp::StrokeLine { stroke, .. } => stroke.dash.is_some(),
            _ => false,
        })
    }
}

impl Surface for DisplayList {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: &StrokeStyle) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: &StrokeStyle) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, origin: Pos2, style: &TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_owned(),
            origin,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect) {
        self.ops.push(DrawOp::DrawImage {
            size: [bitmap.width(), bitmap.height()],
            rect,
        });
    }
}
