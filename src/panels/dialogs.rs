use crate::CanvasApp;
use crate::command::Command;
use crate::element::PropertyValue;

/// Floating windows: clear-all confirmation, text editing and exported code
pub fn dialogs(app: &mut CanvasApp, ctx: &egui::Context) {
    confirm_clear(app, ctx);
    text_editor(app, ctx);
    code_window(app, ctx);
}

fn confirm_clear(app: &mut CanvasApp, ctx: &egui::Context) {
    if !app.ui.confirm_clear {
        return;
    }
    let mut answer = None;
    egui::Window::new("Clear canvas")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Are you sure you want to clear all elements?");
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });
    if let Some(confirmed) = answer {
        app.ui.confirm_clear = false;
        if confirmed {
            app.execute_command(Command::ClearAll { confirmed: true });
        }
    }
}

fn text_editor(app: &mut CanvasApp, ctx: &egui::Context) {
    let Some((id, draft)) = &mut app.ui.text_edit else {
        return;
    };
    let id = *id;
    let mut done = None;
    egui::Window::new("Edit text")
        .collapsible(false)
        .show(ctx, |ui| {
            ui.add(egui::TextEdit::multiline(draft).desired_rows(4));
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    done = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    done = Some(false);
                }
            });
        });

    if let Some(apply) = done {
        if let Some((_, text)) = app.ui.text_edit.take() {
            if apply {
                if let Err(err) = app
                    .editor
                    .set_property_of(id, "text", &PropertyValue::Text(text))
                {
                    app.ui.status = Some(err.to_string());
                }
            }
        }
    }
}

fn code_window(app: &mut CanvasApp, ctx: &egui::Context) {
    let Some(code) = &app.ui.code else {
        return;
    };
    let mut open = true;
    let mut copy = false;
    egui::Window::new("Exported code")
        .open(&mut open)
        .default_size([560.0, 480.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    copy = true;
                }
                if app.ui.code_copied {
                    ui.label("Copied!");
                }
            });
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut view = code.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut view)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

    if copy {
        ctx.copy_text(code.clone());
        app.ui.code_copied = true;
    }
    if !open {
        app.ui.code = None;
    }
}
