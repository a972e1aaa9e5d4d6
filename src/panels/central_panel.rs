use crate::CanvasApp;
use crate::editor::InputResponse;
use crate::renderer::{PainterSurface, RenderOptions};

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = app.editor.canvas().size();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            let canvas_hovered = response.hovered() || response.dragged();
            for event in app.input_handler.process_input(ctx, canvas_rect, canvas_hovered) {
                if let InputResponse::EditText(id) = app.editor.handle_input(event) {
                    if let Some(text) = app.editor.element(id).and_then(|e| e.as_text()) {
                        app.ui.text_edit = Some((id, text.content.clone()));
                    }
                }
            }
            if response.hovered() || response.dragged() {
                ctx.set_cursor_icon(app.editor.cursor());
            }

            app.textures.begin_frame();
            let painter = painter.with_clip_rect(canvas_rect);
            let mut surface = PainterSurface::new(&painter, canvas_rect.min, &mut app.textures);
            app.editor.render(&mut surface, RenderOptions::default());
        });
    });
}
