use std::str::FromStr;

use egui::{Color32, Pos2, Rect};

use crate::text_layout::{self, FontSpec, TextLayout, TextMeasure};

/// Horizontal alignment of each wrapped line relative to the anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    /// CSS weight 300
    Light,
    /// CSS weight 600
    SemiBold,
}

impl FontWeight {
    /// The value used in a CSS font shorthand
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Light => "300",
            FontWeight::SemiBold => "600",
        }
    }

    /// Horizontal widening applied when a single regular face stands in for this weight
    pub fn width_factor(&self) -> f32 {
        match self {
            FontWeight::Normal => 1.0,
            FontWeight::Bold => 1.1,
            FontWeight::Light => 0.95,
            FontWeight::SemiBold => 1.05,
        }
    }
}

impl FromStr for FontWeight {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "400" => Ok(FontWeight::Normal),
            "bold" | "700" => Ok(FontWeight::Bold),
            "300" => Ok(FontWeight::Light),
            "600" => Ok(FontWeight::SemiBold),
            _ => Err(()),
        }
    }
}

/// Wrapped text block. The element anchor is the left end of the first baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: Color32,
    pub align: TextAlign,
    pub weight: FontWeight,
    /// Wrap width
    pub width: f32,
    /// Multiplier applied to the font size to get the line advance
    pub line_height: f32,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            content: "Sample Text".to_owned(),
            font_size: 18.0,
            font_family: "Poppins".to_owned(),
            color: Color32::BLACK,
            align: TextAlign::Left,
            weight: FontWeight::Normal,
            width: 200.0,
            line_height: 1.4,
        }
    }
}

impl TextElement {
    pub fn font(&self) -> FontSpec {
        FontSpec {
            size: self.font_size,
            family: self.font_family.clone(),
            weight: self.weight,
        }
    }

    pub fn line_advance(&self) -> f32 {
        self.font_size * self.line_height
    }

    pub fn layout(&self, metrics: &dyn TextMeasure) -> TextLayout {
        text_layout::layout_text(
            &self.content,
            &self.font(),
            self.width,
            self.line_advance(),
            metrics,
        )
    }

    pub fn bounds(&self, anchor: Pos2, metrics: &dyn TextMeasure) -> Rect {
        text_layout::measure_bounds(self, anchor, metrics)
    }
}
