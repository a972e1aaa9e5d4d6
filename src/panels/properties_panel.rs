use egui::Color32;

use crate::CanvasApp;
use crate::command::Command;
use crate::element::{Element, PropertyKey, PropertyValue, color_hex};

const FONT_FAMILIES: [&str; 6] = ["Poppins", "Inter", "Roboto", "Arial", "serif", "monospace"];
const TEXT_ALIGNS: [&str; 3] = ["left", "center", "right"];
const FONT_WEIGHTS: [&str; 4] = ["300", "normal", "600", "bold"];

pub fn properties_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::right("properties_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            layers_section(app, ui);
            ui.separator();
            properties_section(app, ui);
        });
}

fn layers_section(app: &mut CanvasApp, ui: &mut egui::Ui) {
    ui.heading("Layers");
    if app.layers.is_empty() {
        ui.label("No elements yet");
        return;
    }

    let mut commands = Vec::new();
    egui::ScrollArea::vertical()
        .id_salt("layers_scroll")
        .max_height(240.0)
        .show(ui, |ui| {
            for layer in &app.layers {
                ui.horizontal(|ui| {
                    let eye = if layer.visible { "👁" } else { "🚫" };
                    if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
                        commands.push(Command::ToggleVisibility(layer.id));
                    }
                    let label = format!("{} ({})", layer.name, layer.element_type.as_str());
                    if ui.selectable_label(layer.selected, label).clicked() {
                        commands.push(Command::SelectById(layer.id));
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        commands.push(Command::DeleteById(layer.id));
                    }
                });
            }
        });

    for command in commands {
        app.execute_command(command);
    }
}

fn properties_section(app: &mut CanvasApp, ui: &mut egui::Ui) {
    ui.heading("Properties");
    let Some(element) = app.editor.selected() else {
        ui.label("Select an element to edit its properties");
        return;
    };

    let mut edits = Vec::new();
    egui::Grid::new("properties_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for &key in PropertyKey::editable_for(element.element_type()) {
                ui.label(key.as_str());
                if let Some(value) = property_editor(ui, element, key) {
                    edits.push((key, value));
                }
                ui.end_row();
            }
        });

    let delete = ui.button("Delete Element").clicked();

    for (key, value) in edits {
        if let Err(err) = app.editor.set_property(key.as_str(), &value) {
            app.ui.status = Some(err.to_string());
        }
    }
    if delete {
        app.execute_command(Command::DeleteSelected);
    }
}

/// Widget for one property. Returns the new value when the user changed it.
fn property_editor(ui: &mut egui::Ui, element: &Element, key: PropertyKey) -> Option<PropertyValue> {
    let current = element.property(key)?;
    let id_salt = (element.id(), key.as_str());
    match (key, current) {
        (PropertyKey::TextAlign, PropertyValue::Text(selected)) => {
            choice(ui, id_salt, &selected, &TEXT_ALIGNS)
        }
        (PropertyKey::FontWeight, PropertyValue::Text(selected)) => {
            choice(ui, id_salt, &selected, &FONT_WEIGHTS)
        }
        (PropertyKey::FontFamily, PropertyValue::Text(selected)) => {
            choice(ui, id_salt, &selected, &FONT_FAMILIES)
        }
        (PropertyKey::Color | PropertyKey::StrokeColor | PropertyKey::FillColor, PropertyValue::Text(hex)) => {
            let mut color = Color32::from_hex(&hex).unwrap_or(Color32::BLACK);
            egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            .then(|| PropertyValue::Text(color_hex(color)))
        }
        (PropertyKey::Text, PropertyValue::Text(mut text)) => ui
            .add(egui::TextEdit::multiline(&mut text).desired_rows(3))
            .changed()
            .then(|| PropertyValue::Text(text)),
        (_, PropertyValue::Text(mut text)) => ui
            .text_edit_singleline(&mut text)
            .changed()
            .then(|| PropertyValue::Text(text)),
        (_, PropertyValue::Number(mut number)) => ui
            .add(egui::DragValue::new(&mut number).speed(1.0).max_decimals(2))
            .changed()
            .then(|| PropertyValue::Number(number)),
        (_, PropertyValue::Bool(mut flag)) => ui
            .checkbox(&mut flag, "")
            .changed()
            .then(|| PropertyValue::Bool(flag)),
    }
}

fn choice(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    selected: &str,
    options: &[&str],
) -> Option<PropertyValue> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for &option in options {
                if ui.selectable_label(option == selected, option).clicked() {
                    picked = Some(PropertyValue::Text(option.to_owned()));
                }
            }
        });
    picked
}
