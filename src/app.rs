use std::cell::Cell;
use std::rc::Rc;

use log::{error, info, warn};

use crate::command::{Command, CommandOutcome};
use crate::config::EditorConfig;
use crate::editor::{Editor, LayerInfo};
use crate::element::ElementId;
use crate::event::EditorEvent;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::panels;
use crate::text_layout::{ApproxMetrics, FontMetrics, TextMeasure};
use crate::texture_manager::TextureManager;

/// Transient UI state that is not part of the editor
#[derive(Debug, Default)]
pub(crate) struct UiState {
    /// Clear-all confirmation window is open
    pub confirm_clear: bool,
    /// Exported drawing code shown in the code window
    pub code: Option<String>,
    pub code_copied: bool,
    /// Text element being edited after a double click, with the draft content
    pub text_edit: Option<(ElementId, String)>,
    /// Canvas size fields of the tools panel
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Last export or error message
    pub status: Option<String>,
}

pub struct CanvasApp {
    pub(crate) config: EditorConfig,
    pub(crate) editor: Editor,
    pub(crate) input_handler: InputHandler,
    pub(crate) file_handler: FileHandler,
    pub(crate) textures: TextureManager,
    pub(crate) ui: UiState,
    /// Layers list, rebuilt when the editor reports a change
    pub(crate) layers: Vec<LayerInfo>,
    layers_dirty: Rc<Cell<bool>>,
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: EditorConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let metrics: Box<dyn TextMeasure> = match FontMetrics::from_egui_defaults() {
            Some(metrics) => Box::new(metrics),
            None => {
                warn!("Falling back to approximate text metrics");
                Box::new(ApproxMetrics::default())
            }
        };
        let editor = Editor::new(&config, metrics);

        let layers_dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&layers_dirty);
        editor
            .events()
            .subscribe(Box::new(move |event: &EditorEvent| {
                if event.affects_layers() {
                    flag.set(true);
                }
            }));

        info!(
            "Canvas editor ready: {}x{} canvas",
            config.canvas.width, config.canvas.height
        );
        Self {
            ui: UiState {
                canvas_width: config.canvas.width,
                canvas_height: config.canvas.height,
                ..Default::default()
            },
            config,
            editor,
            input_handler: InputHandler::new(),
            file_handler: FileHandler::new(),
            textures: TextureManager::default(),
            layers: Vec::new(),
            layers_dirty,
        }
    }

    /// Run a command and route its outcome to the UI
    pub(crate) fn execute_command(&mut self, command: Command) {
        let clears_scene = matches!(command, Command::ClearAll { confirmed: true });
        match self.editor.execute(command) {
            Ok(CommandOutcome::Done) if clears_scene => self.textures.clear_cache(),
            Ok(CommandOutcome::ConfirmationRequired) => self.ui.confirm_clear = true,
            Ok(CommandOutcome::Code(code)) => {
                self.ui.code = Some(code);
                self.ui.code_copied = false;
            }
            Ok(CommandOutcome::Image(bytes)) => self.save_export(&bytes),
            Ok(CommandOutcome::Done | CommandOutcome::Created(_) | CommandOutcome::Ignored) => {}
            Err(err) => {
                error!("{err}");
                self.ui.status = Some(err.to_string());
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_export(&mut self, bytes: &[u8]) {
        let path = &self.config.export_file_name;
        self.ui.status = Some(match crate::export::write_export(path, bytes) {
            Ok(()) => format!("Saved {path}"),
            Err(err) => {
                error!("{err}");
                err.to_string()
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn save_export(&mut self, bytes: &[u8]) {
        self.ui.status = Some(format!("Rendered {} bytes of PNG", bytes.len()));
    }

    fn refresh_layers(&mut self) {
        if self.layers_dirty.replace(false) {
            self.layers = self.editor.layers();
        }
    }

    /// Settings worth keeping across restarts
    fn current_config(&self) -> EditorConfig {
        EditorConfig {
            canvas: *self.editor.canvas(),
            default_tool: self.editor.tool(),
            export_file_name: self.config.export_file_name.clone(),
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.current_config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            for command in self.file_handler.process_dropped_files() {
                self.execute_command(command);
            }
        }

        self.refresh_layers();
        panels::tools_panel(self, ctx);
        self.refresh_layers();
        panels::properties_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::dialogs(self, ctx);
    }
}
