use crate::element::ElementId;
use crate::tools::ToolKind;

/// Something observable changed in the editor.
///
/// Emitted after the mutation has been applied, so handlers that query the
/// editor see the new state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ElementAdded { id: ElementId },
    ElementRemoved { id: ElementId },
    /// A property, drag or resize touched the element
    ElementChanged { id: ElementId },
    SelectionChanged { selected: Option<ElementId> },
    SceneCleared,
    CanvasChanged { width: u32, height: u32 },
    ToolChanged { old: ToolKind, new: ToolKind },
}

impl EditorEvent {
    /// Whether the layers list needs rebuilding after this event
    pub fn affects_layers(&self) -> bool {
        !matches!(
            self,
            EditorEvent::CanvasChanged { .. } | EditorEvent::ToolChanged { .. }
        )
    }
}
