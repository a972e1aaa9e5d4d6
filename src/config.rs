use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

/// File name offered for raster exports
pub const DEFAULT_EXPORT_FILE_NAME: &str = "canvas-export.png";

/// Drawing surface size and fill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub background: Color32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color32::WHITE,
        }
    }
}

impl CanvasSettings {
    /// Canvas area in canvas-local coordinates
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Editor preferences that survive restarts. The scene itself is not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    pub canvas: CanvasSettings,
    pub default_tool: ToolKind,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSettings::default(),
            default_tool: ToolKind::Select,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "canvas": { "width": 1024 } }"#).unwrap();
        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.canvas.background, Color32::WHITE);
        assert_eq!(config.default_tool, ToolKind::Select);
        assert_eq!(config.export_file_name, "canvas-export.png");
    }

    #[test]
    fn config_survives_a_round_trip() {
        let config = EditorConfig {
            canvas: CanvasSettings {
                width: 320,
                height: 240,
                background: Color32::from_rgb(10, 20, 30),
            },
            default_tool: ToolKind::Rectangle,
            export_file_name: "poster.png".to_owned(),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<EditorConfig>(&json).unwrap(), config);
    }
}
