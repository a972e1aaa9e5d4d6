use egui::{Color32, CursorIcon, Pos2};
use log::{debug, info, warn};

use crate::command::{Command, CommandOutcome};
use crate::config::{CanvasSettings, EditorConfig};
use crate::element::{
    Bitmap, Element, ElementId, ElementKind, ElementType, ImageElement, PropertyValue,
};
use crate::error::{EditorError, PropertyError};
use crate::event::{EditorEvent, EventBus};
use crate::export;
use crate::geometry::handle_at;
use crate::input::InputEvent;
use crate::renderer::{RenderOptions, Renderer, Surface};
use crate::scene::Scene;
use crate::text_layout::{ApproxMetrics, TextMeasure};
use crate::tools::{InteractionState, ToolKind, resize_element};

/// Where uploaded images are placed
pub const IMAGE_PLACEMENT: Pos2 = Pos2::new(50.0, 50.0);

/// One row of the layers list
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub id: ElementId,
    pub name: String,
    pub element_type: ElementType,
    pub visible: bool,
    pub selected: bool,
}

/// What a canvas input asks of the surrounding UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Nothing beyond a redraw
    None,
    /// Open a text editor for this element and push the result through `set_property`
    EditText(ElementId),
}

/// The editing session: scene, gesture state, armed tool and canvas settings.
pub struct Editor {
    scene: Scene,
    interaction: InteractionState,
    tool: ToolKind,
    canvas: CanvasSettings,
    metrics: Box<dyn TextMeasure>,
    events: EventBus,
    cursor: CursorIcon,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("elements", &self.scene.len())
            .field("selected", &self.scene.selected_id())
            .field("interaction", &self.interaction.name())
            .field("tool", &self.tool)
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default(), Box::new(ApproxMetrics::default()))
    }
}

impl Editor {
    pub fn new(config: &EditorConfig, metrics: Box<dyn TextMeasure>) -> Self {
        Self {
            scene: Scene::new(),
            interaction: InteractionState::Idle,
            tool: config.default_tool,
            canvas: config.canvas,
            metrics,
            events: EventBus::new(),
            cursor: config.default_tool.base_cursor(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Cursor the canvas should show
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn metrics(&self) -> &dyn TextMeasure {
        self.metrics.as_ref()
    }

    /// Subscribe observers here
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // Queries

    pub fn selected(&self) -> Option<&Element> {
        self.scene.selected()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.scene.element(id)
    }

    /// Layer rows in paint order, bottom first
    pub fn layers(&self) -> Vec<LayerInfo> {
        let selected = self.scene.selected_id();
        self.scene
            .elements()
            .iter()
            .map(|e| LayerInfo {
                id: e.id(),
                name: e.name.clone(),
                element_type: e.element_type(),
                visible: e.visible,
                selected: selected == Some(e.id()),
            })
            .collect()
    }

    // Pointer input

    pub fn handle_input(&mut self, event: InputEvent) -> InputResponse {
        match event {
            InputEvent::PointerDown { pos } => self.pointer_down(pos),
            InputEvent::PointerMove { pos } => {
                self.pointer_move(pos);
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::DoubleClick { pos } => {
                if let Some(id) = self.double_click(pos) {
                    return InputResponse::EditText(id);
                }
            }
        }
        InputResponse::None
    }

    /// Start a gesture.
    ///
    /// Handles of the selected element win over element bodies; a click on
    /// empty canvas creates an element with the armed tool or clears the selection.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if let Some(selected) = self.scene.selected() {
            if let Some(handle) = handle_at(pos, selected, self.metrics.as_ref()) {
                debug!("Resizing element {} from {}", selected.id(), handle.as_str());
                self.interaction = InteractionState::Resizing { handle, last: pos };
                self.cursor = handle.cursor_icon();
                return;
            }
        }

        if let Some(id) = self.scene.find_at_point(pos, self.metrics.as_ref()) {
            self.set_selection(Some(id));
            debug!("Dragging element {id}");
            self.interaction = InteractionState::Dragging { last: pos };
            return;
        }

        self.set_selection(None);
        let Some(element_type) = self.tool.element_type() else {
            return;
        };
        if let Some(id) = self.scene.create_with_defaults(element_type, pos) {
            self.events.emit(EditorEvent::ElementAdded { id });
            self.set_selection(Some(id));
        }
    }

    /// Continue a gesture and return the cursor to show
    pub fn pointer_move(&mut self, pos: Pos2) -> CursorIcon {
        match self.interaction {
            InteractionState::Dragging { .. } => {
                let delta = self.interaction.advance(pos);
                if let Some(element) = self.scene.selected_mut() {
                    element.translate(delta);
                    let id = element.id();
                    self.events.emit(EditorEvent::ElementChanged { id });
                }
            }
            InteractionState::Resizing { handle, .. } => {
                let delta = self.interaction.advance(pos);
                if let Some(element) = self.scene.selected_mut() {
                    resize_element(element, handle, pos, delta);
                    let id = element.id();
                    self.events.emit(EditorEvent::ElementChanged { id });
                }
            }
            InteractionState::Idle => {
                if self.tool == ToolKind::Select {
                    self.cursor = self.hover_cursor(pos);
                }
            }
        }
        self.cursor
    }

    fn hover_cursor(&self, pos: Pos2) -> CursorIcon {
        let metrics = self.metrics.as_ref();
        match self.scene.selected() {
            Some(selected) => {
                if let Some(handle) = handle_at(pos, selected, metrics) {
                    handle.cursor_icon()
                } else if self.scene.find_at_point(pos, metrics).is_some() {
                    CursorIcon::Move
                } else {
                    CursorIcon::Default
                }
            }
            None if self.scene.find_at_point(pos, metrics).is_some() => CursorIcon::PointingHand,
            None => CursorIcon::Default,
        }
    }

    /// End the gesture in progress
    pub fn pointer_up(&mut self) {
        if !self.interaction.is_idle() {
            debug!("{} finished", self.interaction.name());
        }
        self.interaction = InteractionState::Idle;
        self.cursor = self.tool.base_cursor();
    }

    /// Text element under `pos` whose content should be edited, if any
    pub fn double_click(&self, pos: Pos2) -> Option<ElementId> {
        let id = self.scene.find_at_point(pos, self.metrics.as_ref())?;
        let element = self.scene.element(id)?;
        (element.element_type() == ElementType::Text).then_some(id)
    }

    // Property updates

    /// Update a property of the selected element.
    ///
    /// Returns `Ok(false)` when nothing is selected.
    pub fn set_property(&mut self, key: &str, value: &PropertyValue) -> Result<bool, PropertyError> {
        match self.scene.selected_id() {
            Some(id) => self.set_property_of(id, key, value),
            None => Ok(false),
        }
    }

    /// Update a property of element `id`. Returns `Ok(false)` for an unknown id.
    pub fn set_property_of(
        &mut self,
        id: ElementId,
        key: &str,
        value: &PropertyValue,
    ) -> Result<bool, PropertyError> {
        match self.scene.set_property(id, key, value) {
            Ok(true) => {
                self.events.emit(EditorEvent::ElementChanged { id });
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => {
                warn!("Rejected property update on element {id}: {err}");
                Err(err)
            }
        }
    }

    /// Place a decoded bitmap as a new, selected image element
    pub fn add_image(&mut self, bitmap: Bitmap) -> ElementId {
        let kind = ElementKind::Image(ImageElement::from_bitmap(bitmap));
        let id = self.scene.add_element(IMAGE_PLACEMENT, kind);
        self.events.emit(EditorEvent::ElementAdded { id });
        self.set_selection(Some(id));
        id
    }

    // Commands

    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        debug!("Executing {}", command.name());
        let outcome = match command {
            Command::SelectTool(tool) => {
                let old = self.tool;
                self.tool = tool;
                self.cursor = tool.base_cursor();
                if old != tool {
                    self.events.emit(EditorEvent::ToolChanged { old, new: tool });
                }
                CommandOutcome::Done
            }
            Command::DeleteSelected => match self.scene.selected_id() {
                Some(id) => self.delete(id),
                None => CommandOutcome::Ignored,
            },
            Command::DeleteById(id) => self.delete(id),
            Command::SelectById(id) => {
                if self.scene.element(id).is_some() {
                    self.set_selection(Some(id));
                    CommandOutcome::Done
                } else {
                    CommandOutcome::Ignored
                }
            }
            Command::ToggleVisibility(id) => match self.scene.toggle_visibility(id) {
                Some(_) => {
                    self.events.emit(EditorEvent::ElementChanged { id });
                    CommandOutcome::Done
                }
                None => CommandOutcome::Ignored,
            },
            Command::ResizeCanvas { width, height } => self.resize_canvas(width, height),
            Command::SetBackground(color) => {
                self.set_background(color);
                CommandOutcome::Done
            }
            Command::ClearAll { confirmed: false } => CommandOutcome::ConfirmationRequired,
            Command::ClearAll { confirmed: true } => {
                self.interaction = InteractionState::Idle;
                self.scene.clear();
                self.events.emit(EditorEvent::SceneCleared);
                CommandOutcome::Done
            }
            Command::ExportImage => CommandOutcome::Image(self.export_png()?),
            Command::ExportCode => CommandOutcome::Code(self.export_code()),
            Command::UploadImage { bytes, mime } => self.upload_image(&bytes, &mime),
        };
        Ok(outcome)
    }

    fn delete(&mut self, id: ElementId) -> CommandOutcome {
        if self.scene.selected_id() == Some(id) {
            self.interaction = InteractionState::Idle;
        }
        let had_selection = self.scene.selected_id().is_some();
        match self.scene.delete_by_id(id) {
            Some(_) => {
                self.events.emit(EditorEvent::ElementRemoved { id });
                if had_selection && self.scene.selected_id().is_none() {
                    self.events.emit(EditorEvent::SelectionChanged { selected: None });
                }
                CommandOutcome::Done
            }
            None => CommandOutcome::Ignored,
        }
    }

    fn resize_canvas(&mut self, width: u32, height: u32) -> CommandOutcome {
        if width == 0 || height == 0 {
            warn!("Ignoring canvas size {width}x{height}");
            return CommandOutcome::Ignored;
        }
        self.canvas.width = width;
        self.canvas.height = height;
        info!("Canvas resized to {width}x{height}");
        self.events.emit(EditorEvent::CanvasChanged { width, height });
        CommandOutcome::Done
    }

    fn set_background(&mut self, color: Color32) {
        self.canvas.background = color;
        self.events.emit(EditorEvent::CanvasChanged {
            width: self.canvas.width,
            height: self.canvas.height,
        });
    }

    /// Non-image uploads and undecodable files are logged and ignored
    fn upload_image(&mut self, bytes: &[u8], mime: &str) -> CommandOutcome {
        match Bitmap::from_upload(bytes, mime) {
            Ok(bitmap) => CommandOutcome::Created(self.add_image(bitmap)),
            Err(err) => {
                warn!("Ignoring upload: {err}");
                CommandOutcome::Ignored
            }
        }
    }

    pub fn export_png(&self) -> Result<Vec<u8>, crate::error::ExportError> {
        export::export_png(&self.scene, &self.canvas, self.metrics.as_ref())
    }

    pub fn export_code(&self) -> String {
        export::generate_code(&self.scene, &self.canvas)
    }

    // Rendering

    pub fn render(&self, surface: &mut dyn Surface, options: RenderOptions) {
        Renderer::new(self.metrics.as_ref()).render(surface, &self.scene, &self.canvas, options);
    }

    fn set_selection(&mut self, id: Option<ElementId>) {
        if self.scene.selected_id() == id {
            return;
        }
        match id {
            Some(id) => {
                self.scene.select(id);
            }
            None => self.scene.clear_selection(),
        }
        self.events.emit(EditorEvent::SelectionChanged {
            selected: self.scene.selected_id(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_empty_canvas_with_select_tool_deselects() {
        let mut editor = Editor::default();
        editor.execute(Command::SelectTool(ToolKind::Circle)).unwrap();
        editor.pointer_down(Pos2::new(100.0, 100.0));
        editor.pointer_up();
        assert!(editor.selected().is_some());

        editor.execute(Command::SelectTool(ToolKind::Select)).unwrap();
        editor.pointer_down(Pos2::new(400.0, 400.0));
        assert!(editor.selected().is_none());
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn image_tool_never_creates_on_click() {
        let mut editor = Editor::default();
        editor.execute(Command::SelectTool(ToolKind::Image)).unwrap();
        editor.pointer_down(Pos2::new(10.0, 10.0));
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn hover_cursor_reflects_what_is_under_the_pointer() {
        let mut editor = Editor::default();
        editor.execute(Command::SelectTool(ToolKind::Rectangle)).unwrap();
        editor.pointer_down(Pos2::new(50.0, 50.0));
        editor.pointer_up();
        editor.execute(Command::SelectTool(ToolKind::Select)).unwrap();

        assert_eq!(editor.pointer_move(Pos2::new(150.0, 110.0)), CursorIcon::ResizeSouthEast);
        assert_eq!(editor.pointer_move(Pos2::new(100.0, 80.0)), CursorIcon::Move);
        assert_eq!(editor.pointer_move(Pos2::new(500.0, 500.0)), CursorIcon::Default);

        editor.pointer_down(Pos2::new(500.0, 500.0));
        editor.pointer_up();
        assert_eq!(editor.pointer_move(Pos2::new(100.0, 80.0)), CursorIcon::PointingHand);
    }

    #[test]
    fn pointer_up_restores_the_tool_cursor() {
        let mut editor = Editor::default();
        editor.execute(Command::SelectTool(ToolKind::Text)).unwrap();
        assert_eq!(editor.cursor(), CursorIcon::Text);
        editor.pointer_down(Pos2::new(20.0, 40.0));
        editor.pointer_up();
        assert_eq!(editor.cursor(), CursorIcon::Text);
        assert!(editor.interaction().is_idle());
    }

    #[test]
    fn canvas_must_have_an_area() {
        let mut editor = Editor::default();
        let outcome = editor
            .execute(Command::ResizeCanvas { width: 0, height: 300 })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);
        assert_eq!((editor.canvas().width, editor.canvas().height), (800, 600));
    }
}
