use std::io::Cursor;

use canvas_editor::command::{Command, CommandOutcome};
use canvas_editor::editor::Editor;
use canvas_editor::config::EditorConfig;
use canvas_editor::element::PropertyValue;
use canvas_editor::error::PropertyError;
use canvas_editor::text_layout::FontMetrics;
use canvas_editor::renderer::{DisplayList, DrawOp, RenderOptions};
use canvas_editor::tools::ToolKind;
use egui::{Color32, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn place(editor: &mut Editor, tool: ToolKind, at: Pos2) {
    editor.execute(Command::SelectTool(tool)).unwrap();
    editor.pointer_down(at);
    editor.pointer_up();
}

fn upload_png(editor: &mut Editor) {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 255]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    editor
        .execute(Command::UploadImage {
            bytes,
            mime: "image/png".to_owned(),
        })
        .unwrap();
}

#[test]
fn test_code_has_one_block_per_visible_element() {
    let mut editor = Editor::default();
    place(&mut editor, ToolKind::Rectangle, Pos2::new(50.0, 50.0));
    place(&mut editor, ToolKind::Circle, Pos2::new(400.0, 300.0));
    place(&mut editor, ToolKind::Line, Pos2::new(10.0, 500.0));
    editor.execute(Command::ToggleVisibility(2)).unwrap();

    let CommandOutcome::Code(code) = editor.execute(Command::ExportCode).unwrap() else {
        panic!("expected generated code");
    };
    assert!(code.starts_with("// Canvas drawing code (800x600)\n"));
    assert!(code.contains("ctx.fillStyle = '#ffffff';"));
    assert!(code.contains("function wrapText(ctx, text, x, y, maxWidth, lineHeight)"));
    assert!(code.contains("// rectangle 1\n"));
    assert!(code.contains("ctx.strokeRect(50, 50, 100, 60);"));
    assert!(!code.contains("// circle 2\n"));
    assert!(!code.contains("ctx.arc("));
    assert!(code.contains("// line 3\n"));
    assert!(code.contains("ctx.moveTo(10, 500);"));
    assert!(code.contains("ctx.lineTo(110, 500);"));

    let rect_block = code.find("// rectangle 1").unwrap();
    let line_block = code.find("// line 3").unwrap();
    assert!(rect_block < line_block);
}

#[test]
fn test_filled_shapes_and_text_blocks() {
    let mut editor = Editor::default();
    place(&mut editor, ToolKind::Rectangle, Pos2::new(10.0, 20.0));
    editor.set_property("filled", &PropertyValue::Bool(true)).unwrap();
    editor
        .set_property("fillColor", &PropertyValue::Text("#ff8800".to_owned()))
        .unwrap();
    place(&mut editor, ToolKind::Text, Pos2::new(300.0, 300.0));
    editor
        .set_property("text", &PropertyValue::Text("It's here".to_owned()))
        .unwrap();

    let code = editor.export_code();
    assert!(code.contains("ctx.fillStyle = '#ff8800';\nctx.fillRect(10, 20, 100, 60);"));
    assert!(code.contains("ctx.font = 'normal 18px Poppins';"));
    assert!(code.contains("ctx.textAlign = 'left';"));
    assert!(code.contains("wrapText(ctx, 'It\\'s here', 300, 300, 200, 25.2);"));
}

#[test]
fn test_image_blocks_are_comments_only() {
    let mut editor = Editor::default();
    upload_png(&mut editor);

    let code = editor.export_code();
    let block = &code[code.find("// Image 1").unwrap()..];
    assert!(block.contains("// const img0 = new Image();"));
    assert!(block.contains("//     ctx.drawImage(img0, 50, 50, 4, 4);"));
    for line in block.lines().filter(|l| !l.is_empty()) {
        assert!(line.starts_with("//"), "uncommented line in image block: {line}");
    }
}

#[test]
fn test_png_export_has_canvas_size_and_no_overlay() {
    let mut editor = Editor::default();
    editor
        .execute(Command::ResizeCanvas { width: 120, height: 90 })
        .unwrap();
    place(&mut editor, ToolKind::Rectangle, Pos2::new(10.0, 10.0));
    editor.set_property("filled", &PropertyValue::Bool(true)).unwrap();
    editor
        .set_property("fillColor", &PropertyValue::Text("#0000ff".to_owned()))
        .unwrap();
    assert!(editor.selected().is_some());

    let CommandOutcome::Image(bytes) = editor.execute(Command::ExportImage).unwrap() else {
        panic!("expected PNG bytes");
    };
    assert_eq!(bytes[..8], PNG_SIGNATURE);

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (120, 90));
    assert_eq!(decoded.get_pixel(50, 40), &Rgba([0, 0, 255, 255]));
    assert_eq!(decoded.get_pixel(115, 85), &Rgba([255, 255, 255, 255]));
    // the dashed selection outline would sit 5px outside the box
    assert_eq!(decoded.get_pixel(50, 75), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_png_export_skips_hidden_elements() {
    let mut editor = Editor::default();
    editor
        .execute(Command::ResizeCanvas { width: 100, height: 100 })
        .unwrap();
    editor
        .execute(Command::SetBackground(Color32::from_rgb(0, 0, 0)))
        .unwrap();
    place(&mut editor, ToolKind::Rectangle, Pos2::new(10.0, 10.0));
    editor.set_property("filled", &PropertyValue::Bool(true)).unwrap();
    editor.set_property("visible", &PropertyValue::Bool(false)).unwrap();

    let bytes = editor.export_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(40, 40), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_live_render_draws_overlay_for_selection() {
    let mut editor = Editor::default();
    place(&mut editor, ToolKind::Circle, Pos2::new(100.0, 100.0));

    let mut live = DisplayList::default();
    editor.render(&mut live, RenderOptions::default());
    assert!(live.dashed_strokes().next().is_some());

    let mut export = DisplayList::default();
    editor.render(&mut export, RenderOptions::export());
    assert_eq!(export.dashed_strokes().count(), 0);
    assert!(
        export
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::StrokeCircle { .. }))
    );
}

#[test]
fn test_negative_font_size_is_rejected_and_export_still_renders() {
    let metrics = FontMetrics::from_egui_defaults().unwrap();
    let mut editor = Editor::new(&EditorConfig::default(), Box::new(metrics));
    place(&mut editor, ToolKind::Text, Pos2::new(100.0, 100.0));

    let err = editor
        .set_property("fontSize", &PropertyValue::Number(-18.0))
        .unwrap_err();
    assert!(matches!(err, PropertyError::InvalidValue { key: "fontSize", .. }));
    assert_eq!(
        editor.selected().unwrap().as_text().unwrap().font_size,
        18.0
    );

    let bytes = editor.export_png().unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
}
