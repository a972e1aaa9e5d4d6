use eframe::egui;

use crate::tools::ToolKind;

const BUTTON_SIZE: f32 = 36.0;
const CORNER_RADIUS: f32 = 6.0;

/// Square palette button showing a tool's icon, highlighted while the tool is armed
pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::Vec2::splat(BUTTON_SIZE), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let widget = ui.style().interact_selectable(&response, self.selected);
            let painter = ui.painter();
            let (fill, icon_color) = if self.selected {
                let selection = ui.visuals().selection;
                (selection.bg_fill, selection.stroke.color)
            } else {
                (widget.weak_bg_fill, widget.fg_stroke.color)
            };

            painter.rect_filled(rect, CORNER_RADIUS, fill);
            if self.selected || response.hovered() {
                painter.rect_stroke(rect, CORNER_RADIUS, widget.bg_stroke);
            }
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                icon_color,
            );
        }

        response.on_hover_text(self.tool.label())
    }
}
