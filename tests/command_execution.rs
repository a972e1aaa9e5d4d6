use std::cell::RefCell;
use std::rc::Rc;

use canvas_editor::command::{Command, CommandOutcome};
use canvas_editor::editor::Editor;
use canvas_editor::element::{PropertyKey, PropertyValue};
use canvas_editor::event::EditorEvent;
use canvas_editor::tools::ToolKind;
use egui::{Color32, CursorIcon, Pos2};

// Helper to create an editor holding a rectangle, a circle and a line, in that order
fn create_test_editor() -> Editor {
    let mut editor = Editor::default();
    for (tool, at) in [
        (ToolKind::Rectangle, Pos2::new(50.0, 50.0)),
        (ToolKind::Circle, Pos2::new(400.0, 300.0)),
        (ToolKind::Line, Pos2::new(10.0, 500.0)),
    ] {
        editor.execute(Command::SelectTool(tool)).unwrap();
        editor.pointer_down(at);
        editor.pointer_up();
    }
    editor.execute(Command::SelectTool(ToolKind::Select)).unwrap();
    editor
}

fn record_events(editor: &Editor) -> Rc<RefCell<Vec<EditorEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    editor
        .events()
        .subscribe(Box::new(move |event: &EditorEvent| sink.borrow_mut().push(event.clone())));
    seen
}

fn ids(editor: &Editor) -> Vec<usize> {
    editor.scene().elements().iter().map(|e| e.id()).collect()
}

#[test]
fn test_delete_selected_removes_only_that_element() {
    let mut editor = create_test_editor();
    let line = editor.selected().unwrap().id();

    assert_eq!(editor.execute(Command::DeleteSelected).unwrap(), CommandOutcome::Done);
    assert_eq!(ids(&editor), vec![1, 2]);
    assert!(editor.element(line).is_none());
    assert!(editor.selected().is_none());

    assert_eq!(editor.execute(Command::DeleteSelected).unwrap(), CommandOutcome::Ignored);
}

#[test]
fn test_delete_by_id_of_the_selection_clears_it() {
    let mut editor = create_test_editor();
    editor.execute(Command::SelectById(2)).unwrap();
    let circle_center = Pos2::new(400.0, 300.0);
    assert_eq!(
        editor.scene().find_at_point(circle_center, editor.metrics()),
        Some(2)
    );

    editor.execute(Command::DeleteById(2)).unwrap();
    assert_eq!(ids(&editor), vec![1, 3]);
    assert!(editor.selected().is_none());
    assert_eq!(
        editor.scene().find_at_point(circle_center, editor.metrics()),
        None
    );
}

#[test]
fn test_delete_by_id_keeps_other_selection() {
    let mut editor = create_test_editor();
    editor.execute(Command::SelectById(1)).unwrap();

    editor.execute(Command::DeleteById(2)).unwrap();
    assert_eq!(editor.selected().map(|e| e.id()), Some(1));
    assert_eq!(editor.execute(Command::DeleteById(42)).unwrap(), CommandOutcome::Ignored);
}

#[test]
fn test_select_unknown_id_is_a_no_op() {
    let mut editor = create_test_editor();
    let before = editor.selected().map(|e| e.id());
    assert_eq!(editor.execute(Command::SelectById(99)).unwrap(), CommandOutcome::Ignored);
    assert_eq!(editor.selected().map(|e| e.id()), before);
}

#[test]
fn test_toggle_visibility_hides_from_hit_testing() {
    let mut editor = create_test_editor();
    editor.execute(Command::ToggleVisibility(1)).unwrap();

    assert!(!editor.element(1).unwrap().visible);
    let layers = editor.layers();
    assert!(!layers[0].visible);
    assert_eq!(
        editor.scene().find_at_point(Pos2::new(60.0, 60.0), editor.metrics()),
        None
    );

    editor.execute(Command::ToggleVisibility(1)).unwrap();
    assert!(editor.element(1).unwrap().visible);
}

#[test]
fn test_layers_follow_creation_order_and_mark_selection() {
    let mut editor = create_test_editor();
    editor.execute(Command::SelectById(2)).unwrap();

    let layers = editor.layers();
    let names: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["rectangle 1", "circle 2", "line 3"]);
    let selected: Vec<_> = layers.iter().map(|l| l.selected).collect();
    assert_eq!(selected, [false, true, false]);
}

#[test]
fn test_clear_all_requires_confirmation() {
    let mut editor = create_test_editor();

    let outcome = editor.execute(Command::ClearAll { confirmed: false }).unwrap();
    assert_eq!(outcome, CommandOutcome::ConfirmationRequired);
    assert_eq!(editor.scene().len(), 3);

    editor.execute(Command::ClearAll { confirmed: true }).unwrap();
    assert!(editor.scene().is_empty());
    assert!(editor.selected().is_none());
}

#[test]
fn test_resize_canvas_and_background() {
    let mut editor = create_test_editor();
    let seen = record_events(&editor);

    editor
        .execute(Command::ResizeCanvas { width: 1024, height: 768 })
        .unwrap();
    assert_eq!((editor.canvas().width, editor.canvas().height), (1024, 768));

    let outcome = editor
        .execute(Command::ResizeCanvas { width: 0, height: 768 })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(editor.canvas().width, 1024);

    editor
        .execute(Command::SetBackground(Color32::from_rgb(1, 2, 3)))
        .unwrap();
    assert_eq!(editor.canvas().background, Color32::from_rgb(1, 2, 3));

    assert_eq!(
        *seen.borrow(),
        vec![
            EditorEvent::CanvasChanged { width: 1024, height: 768 },
            EditorEvent::CanvasChanged { width: 1024, height: 768 },
        ]
    );
}

#[test]
fn test_select_tool_updates_cursor_and_emits_change() {
    let mut editor = Editor::default();
    let seen = record_events(&editor);

    editor.execute(Command::SelectTool(ToolKind::Circle)).unwrap();
    assert_eq!(editor.tool(), ToolKind::Circle);
    assert_eq!(editor.cursor(), CursorIcon::Crosshair);

    editor.execute(Command::SelectTool(ToolKind::Circle)).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![EditorEvent::ToolChanged {
            old: ToolKind::Select,
            new: ToolKind::Circle,
        }]
    );
}

#[test]
fn test_events_follow_element_lifecycle() {
    let mut editor = Editor::default();
    let seen = record_events(&editor);

    editor.execute(Command::SelectTool(ToolKind::Rectangle)).unwrap();
    editor.pointer_down(Pos2::new(50.0, 50.0));
    editor.pointer_up();
    editor.set_property("filled", &true.into()).unwrap();
    editor.execute(Command::DeleteSelected).unwrap();
    editor.execute(Command::ClearAll { confirmed: true }).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            EditorEvent::ToolChanged {
                old: ToolKind::Select,
                new: ToolKind::Rectangle,
            },
            EditorEvent::ElementAdded { id: 1 },
            EditorEvent::SelectionChanged { selected: Some(1) },
            EditorEvent::ElementChanged { id: 1 },
            EditorEvent::ElementRemoved { id: 1 },
            EditorEvent::SelectionChanged { selected: None },
            EditorEvent::SceneCleared,
        ]
    );
}

#[test]
fn test_property_updates_target_the_selection() {
    let mut editor = create_test_editor();
    editor.execute(Command::SelectById(2)).unwrap();

    assert_eq!(editor.set_property("radius", &PropertyValue::Number(60.0)), Ok(true));
    assert_eq!(editor.set_property("name", &"sun".into()), Ok(true));
    assert!(editor.set_property("radius", &"big".into()).is_err());
    assert!(editor.set_property("colour", &"#000000".into()).is_err());

    let circle = editor.element(2).unwrap();
    assert_eq!(circle.name, "sun");
    assert_eq!(
        circle.property(PropertyKey::Radius),
        Some(PropertyValue::Number(60.0))
    );

    editor.execute(Command::DeleteSelected).unwrap();
    assert_eq!(editor.set_property("radius", &PropertyValue::Number(10.0)), Ok(false));
}
