//! Greedy word-wrap shared by hit-testing, bounds and painting.
//!
//! Every consumer goes through [`layout_text`], so a line break seen by the
//! renderer is the same one the hit-tester sees.

use egui::{Pos2, Rect, Vec2};
use log::warn;
use rusttype::{Font, Scale, point};

use crate::element::{FontWeight, TextElement};

/// Font request for measuring or drawing one run of text
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub family: String,
    pub weight: FontWeight,
}

impl FontSpec {
    /// CSS font shorthand, e.g. `bold 18px Poppins`
    pub fn css(&self) -> String {
        format!("{} {}px {}", self.weight.as_css(), self.size, self.family)
    }
}

/// Horizontal text metrics
pub trait TextMeasure {
    /// Advance width of `text` set in `font`
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;

    /// Glyph rasterizer backing these metrics, if there is one
    fn rasterizer(&self) -> Option<&FontMetrics> {
        None
    }
}

/// Fixed-pitch estimate: every character advances `char_width × font size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxMetrics {
    pub char_width: f32,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self { char_width: 0.6 }
    }
}

impl TextMeasure for ApproxMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.char_width * font.weight.width_factor()
    }
}

/// Real glyph metrics from a TrueType face.
///
/// The family name is not resolved: one face stands in for all of them, and
/// weights are approximated by [`FontWeight::width_factor`].
pub struct FontMetrics {
    font: Font<'static>,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Largest font size the rasterizer will draw; bigger text is skipped
pub const MAX_RASTER_FONT_SIZE: f32 = 2048.0;

/// Name of the proportional face bundled with egui
const EGUI_PROPORTIONAL_FONT: &str = "Ubuntu-Light";

impl FontMetrics {
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font })
    }

    /// Load the proportional face that ships with egui's default fonts
    pub fn from_egui_defaults() -> Option<Self> {
        let definitions = egui::FontDefinitions::default();
        let Some(data) = definitions.font_data.get(EGUI_PROPORTIONAL_FONT) else {
            warn!("egui default fonts do not contain {EGUI_PROPORTIONAL_FONT}");
            return None;
        };
        Self::from_bytes(data.font.to_vec())
    }

    /// Rasterize `text` with its first baseline starting at `origin`.
    ///
    /// `plot` receives pixel coordinates and a coverage value in `0.0..=1.0`.
    /// Non-positive sizes and sizes above [`MAX_RASTER_FONT_SIZE`] draw nothing.
    pub fn rasterize(
        &self,
        text: &str,
        font: &FontSpec,
        origin: Pos2,
        mut plot: impl FnMut(i32, i32, f32),
    ) {
        if !(font.size > 0.0 && font.size <= MAX_RASTER_FONT_SIZE) {
            warn!("Not rasterizing text at font size {}", font.size);
            return;
        }
        let scale = Scale {
            x: font.size * font.weight.width_factor(),
            y: font.size,
        };
        for glyph in self.font.layout(text, scale, point(origin.x, origin.y)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, coverage| {
                    plot(bb.min.x + x as i32, bb.min.y + y as i32, coverage);
                });
            }
        }
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let scale = Scale {
            x: font.size * font.weight.width_factor(),
            y: font.size,
        };
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let glyph = self.font.glyph(c).scaled(scale);
            if let Some(prev) = previous {
                width += self.font.pair_kerning(scale, prev, glyph.id());
            }
            width += glyph.h_metrics().advance_width;
            previous = Some(glyph.id());
        }
        width
    }

    fn rasterizer(&self) -> Option<&FontMetrics> {
        Some(self)
    }
}

/// Result of wrapping one text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Committed lines, already trimmed
    pub lines: Vec<String>,
    /// Width of the widest committed line
    pub widest: f32,
    /// Vertical distance between consecutive baselines
    pub line_advance: f32,
}

impl TextLayout {
    /// Baseline origin of each line for a block anchored at `anchor`
    pub fn baselines(&self, anchor: Pos2) -> impl Iterator<Item = (&str, Pos2)> + '_ {
        let advance = self.line_advance;
        self.lines.iter().enumerate().map(move |(i, line)| {
            (
                line.as_str(),
                Pos2::new(anchor.x, anchor.y + i as f32 * advance),
            )
        })
    }
}

/// Wrap `content` greedily at `max_width`.
///
/// Words are split on single spaces. A word that would push the line past
/// `max_width` starts a new line, unless it is the very first word.
pub fn layout_text(
    content: &str,
    font: &FontSpec,
    max_width: f32,
    line_advance: f32,
    metrics: &dyn TextMeasure,
) -> TextLayout {
    let mut lines = Vec::new();
    let mut widest: f32 = 0.0;
    let mut line = String::new();

    for (n, word) in content.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if metrics.text_width(&candidate, font) > max_width && n > 0 {
            let committed = line.trim().to_owned();
            widest = widest.max(metrics.text_width(&committed, font));
            lines.push(committed);
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    let committed = line.trim().to_owned();
    widest = widest.max(metrics.text_width(&committed, font));
    lines.push(committed);

    TextLayout {
        lines,
        widest,
        line_advance,
    }
}

/// Box around a text element.
///
/// The anchor is the first baseline, so the box starts one font size above it
/// to cover the ascent.
pub fn measure_bounds(text: &TextElement, anchor: Pos2, metrics: &dyn TextMeasure) -> Rect {
    let layout = text.layout(metrics);
    Rect::from_min_size(
        Pos2::new(anchor.x, anchor.y - text.font_size),
        Vec2::new(
            layout.widest.min(text.width),
            layout.lines.len() as f32 * layout.line_advance,
        ),
    )
}
