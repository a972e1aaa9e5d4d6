#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod text_layout;
pub mod texture_manager;
pub mod tools;

pub use app::CanvasApp;
pub use command::{Command, CommandOutcome};
pub use config::{CanvasSettings, EditorConfig};
pub use editor::{Editor, InputResponse, LayerInfo};
pub use element::{Element, ElementId, ElementKind, ElementType, PropertyKey, PropertyValue};
pub use error::{EditorError, ExportError, PropertyError, UploadError};
pub use event::{EditorEvent, EventBus};
pub use input::InputEvent;
pub use renderer::{DisplayList, RenderOptions, Renderer};
pub use scene::Scene;
pub use text_layout::{ApproxMetrics, FontMetrics, TextMeasure};
pub use tools::{InteractionState, ToolKind};
