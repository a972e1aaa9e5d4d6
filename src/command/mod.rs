use egui::Color32;

use crate::element::ElementId;
use crate::tools::ToolKind;

/// Requests from the panels and menus, executed by [`crate::Editor::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Arm a palette tool
    SelectTool(ToolKind),

    /// Remove the selected element, if any
    DeleteSelected,

    /// Remove an element from the layers list
    DeleteById(ElementId),

    /// Select an element from the layers list
    SelectById(ElementId),

    /// Flip an element's visibility
    ToggleVisibility(ElementId),

    /// Change the drawing surface size
    ResizeCanvas { width: u32, height: u32 },

    SetBackground(Color32),

    /// Remove every element. Does nothing unless `confirmed` is set.
    ClearAll { confirmed: bool },

    /// Render the scene to PNG bytes
    ExportImage,

    /// Generate drawing code for the scene
    ExportCode,

    /// Place an uploaded file as an image element
    UploadImage { bytes: Vec<u8>, mime: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectTool(_) => "SelectTool",
            Command::DeleteSelected => "DeleteSelected",
            Command::DeleteById(_) => "DeleteById",
            Command::SelectById(_) => "SelectById",
            Command::ToggleVisibility(_) => "ToggleVisibility",
            Command::ResizeCanvas { .. } => "ResizeCanvas",
            Command::SetBackground(_) => "SetBackground",
            Command::ClearAll { .. } => "ClearAll",
            Command::ExportImage => "ExportImage",
            Command::ExportCode => "ExportCode",
            Command::UploadImage { .. } => "UploadImage",
        }
    }
}

/// What executing a [`Command`] produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The editor changed as requested
    Done,
    /// The command referred to something that does not exist, or was not applicable
    Ignored,
    /// A destructive command was sent without confirmation
    ConfirmationRequired,
    /// A new element was placed
    Created(ElementId),
    /// Encoded PNG
    Image(Vec<u8>),
    /// Generated drawing script
    Code(String),
}
