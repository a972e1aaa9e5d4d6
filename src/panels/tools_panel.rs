use crate::CanvasApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor.tool();
            let mut picked = None;
            ui.horizontal_wrapped(|ui| {
                for tool in ToolKind::ALL {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        picked = Some(tool);
                    }
                }
            });
            if let Some(tool) = picked {
                log::info!("Tool selected from UI: {}", tool.name());
                app.execute_command(Command::SelectTool(tool));
            }
            if active == ToolKind::Image {
                ui.small("Drop an image file onto the window to place it.");
            }

            ui.separator();
            ui.heading("Canvas");
            egui::Grid::new("canvas_size_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Width:");
                    ui.add(egui::DragValue::new(&mut app.ui.canvas_width).range(1..=8192));
                    ui.end_row();
                    ui.label("Height:");
                    ui.add(egui::DragValue::new(&mut app.ui.canvas_height).range(1..=8192));
                    ui.end_row();
                });
            if ui.button("Resize Canvas").clicked() {
                let (width, height) = (app.ui.canvas_width, app.ui.canvas_height);
                app.execute_command(Command::ResizeCanvas { width, height });
            }

            ui.horizontal(|ui| {
                ui.label("Background:");
                let mut background = app.editor.canvas().background;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut background,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.execute_command(Command::SetBackground(background));
                }
            });

            ui.separator();
            ui.heading("Export");
            ui.horizontal(|ui| {
                if ui.button("Export PNG").clicked() {
                    app.execute_command(Command::ExportImage);
                }
                if ui.button("Export Code").clicked() {
                    app.execute_command(Command::ExportCode);
                }
            });
            if let Some(status) = &app.ui.status {
                ui.small(status);
            }

            ui.separator();
            if ui.button("Clear All").clicked() {
                app.execute_command(Command::ClearAll { confirmed: false });
            }
        });
}
