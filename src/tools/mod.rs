use std::str::FromStr;

use egui::CursorIcon;
use serde::{Deserialize, Serialize};

use crate::element::ElementType;

mod interaction;
mod resize;

pub use interaction::InteractionState;
pub use resize::{MIN_BOX_SIZE, MIN_CIRCLE_RADIUS, MIN_TEXT_WIDTH, resize_element};

/// The armed palette tool. Orthogonal to the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Select,
    Text,
    Line,
    Rectangle,
    Circle,
    Image,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Text,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Image,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Text => "text",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Image => "image",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Text => "Text",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Image => "Image",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Select => "⬉",
            ToolKind::Text => "T",
            ToolKind::Line => "╱",
            ToolKind::Rectangle => "▭",
            ToolKind::Circle => "◯",
            ToolKind::Image => "🖼",
        }
    }

    /// Element type a click with this tool creates, if any
    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            ToolKind::Select => None,
            ToolKind::Text => Some(ElementType::Text),
            ToolKind::Line => Some(ElementType::Line),
            ToolKind::Rectangle => Some(ElementType::Rectangle),
            ToolKind::Circle => Some(ElementType::Circle),
            ToolKind::Image => Some(ElementType::Image),
        }
    }

    /// Cursor shown over the canvas when no gesture is in progress
    pub fn base_cursor(&self) -> CursorIcon {
        match self {
            ToolKind::Select => CursorIcon::Default,
            ToolKind::Text => CursorIcon::Text,
            _ => CursorIcon::Crosshair,
        }
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| format!("unknown tool `{s}`"))
    }
}
