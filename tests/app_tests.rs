//! Integration tests for the designer state and its editing operations

use designer::config::Config;
use designer::form::{DropOutcome, DropTarget, FieldKind, FieldProperty, ValidationError};
use designer::{App, DesignerMode, Pane};

#[test]
fn test_app_creation() {
    let app = App::default();

    assert!(app.running);
    assert!(app.form.is_empty());
    assert_eq!(app.mode, DesignerMode::Design);
    assert_eq!(app.focus, Pane::Palette);
    assert!(app.drag.is_none());
    assert!(app.status_message.is_none());
    assert!(app.status_bar.slot_count() > 0);
}

#[test]
fn test_add_field_selects_it() {
    let mut app = App::default();

    let first = app.add_field(FieldKind::Input);
    let second = app.add_field(FieldKind::Date);

    assert_eq!(app.form.len(), 2);
    assert_eq!(app.form.selected_id(), Some(second));
    assert_ne!(first, second);
}

#[test]
fn test_add_field_without_auto_select() {
    let mut config = Config::default();
    config.designer.select_on_add = false;
    let mut app = App::with_config(config, ".".into());

    app.add_field(FieldKind::Checkbox);

    assert!(app.form.selected_id().is_none());
}

#[test]
fn test_typing_edits_focused_property_and_keeps_focus() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.focus_property(FieldProperty::MaxLength);

    for c in "120".chars() {
        app.insert_property_char(c).unwrap();
    }
    app.delete_property_char().unwrap();

    let field = app.form.selected().unwrap();
    assert_eq!(field.max_length(), "12");
    assert_eq!(field.name(), "");
    assert_eq!(app.focus, Pane::Properties);
    assert_eq!(app.active_property(), Some(FieldProperty::MaxLength));
}

#[test]
fn test_active_property_falls_back_to_name() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.focus_property(FieldProperty::MaxLength);

    app.add_field(FieldKind::Checkbox);
    assert_eq!(app.active_property(), Some(FieldProperty::Name));

    // Cycling on a one-input kind stays put
    app.cycle_property(true);
    assert_eq!(app.active_property(), Some(FieldProperty::Name));

    app.insert_property_char('x').unwrap();
    assert_eq!(app.form.selected().unwrap().name(), "x");
}

#[test]
fn test_cycle_property_wraps() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);

    app.cycle_property(true);
    assert_eq!(app.active_property(), Some(FieldProperty::MaxLength));
    app.cycle_property(true);
    assert_eq!(app.active_property(), Some(FieldProperty::Name));
    app.cycle_property(false);
    assert_eq!(app.active_property(), Some(FieldProperty::MaxLength));
}

#[test]
fn test_rejected_save_changes_nothing() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.add_field(FieldKind::Date);
    let before = app.form.fields().to_vec();
    let selected = app.form.selected_id();

    assert_eq!(app.request_preview(), Err(ValidationError::MissingName));

    assert_eq!(app.mode, DesignerMode::Design);
    assert!(app.preview.is_empty());
    assert_eq!(app.form.fields(), before.as_slice());
    assert_eq!(app.form.selected_id(), selected);
}

#[test]
fn test_save_opens_preview_and_dismiss_returns() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.focus_property(FieldProperty::Name);
    for c in "Email".chars() {
        app.insert_property_char(c).unwrap();
    }

    app.request_preview().unwrap();
    assert_eq!(app.mode, DesignerMode::Preview);
    assert_eq!(app.preview.len(), 1);
    assert_eq!(app.preview[0].label, "Email");

    app.dismiss_preview();
    assert_eq!(app.mode, DesignerMode::Design);
    assert!(app.preview.is_empty());
    assert_eq!(app.form.len(), 1);
}

#[test]
fn test_move_selected_stops_at_edges() {
    let mut app = App::default();
    let first = app.add_field(FieldKind::Input);
    app.add_field(FieldKind::Checkbox);
    app.select_at(0).unwrap();

    assert!(app.move_selected(-1).unwrap().is_none());
    assert_eq!(app.move_selected(1).unwrap(), Some((first, 0, 1)));
    assert!(app.move_selected(1).unwrap().is_none());
    assert_eq!(app.form.selected_index(), Some(1));
}

#[test]
fn test_step_selection() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.add_field(FieldKind::Checkbox);
    app.add_field(FieldKind::Date);
    app.form.deselect();

    app.step_selection(1);
    assert_eq!(app.form.selected_index(), Some(0));
    app.step_selection(5);
    assert_eq!(app.form.selected_index(), Some(2));
    app.step_selection(-1);
    assert_eq!(app.form.selected_index(), Some(1));
}

#[test]
fn test_remove_selected() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.add_field(FieldKind::Date);

    let removed = app.remove_selected().unwrap().unwrap();
    assert_eq!(removed.kind(), FieldKind::Date);
    assert_eq!(app.form.len(), 1);
    assert!(app.remove_selected().unwrap().is_none());
}

#[test]
fn test_clear_form() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.add_field(FieldKind::Date);
    app.focus_property(FieldProperty::Name);
    app.begin_field_drag(0).unwrap();

    app.clear_form();

    assert!(app.form.is_empty());
    assert!(app.form.selected_id().is_none());
    assert!(app.drag.is_none());
    assert_eq!(app.canvas_scroll, 0);
    assert_eq!(app.focus, Pane::Canvas);
}

#[test]
fn test_palette_cursor_is_clamped() {
    let mut app = App::default();

    app.move_palette_cursor(-1);
    assert_eq!(app.palette_kind(), FieldKind::Input);
    app.move_palette_cursor(10);
    assert_eq!(app.palette_kind(), FieldKind::Date);
}

#[test]
fn test_pane_focus_cycles() {
    let mut app = App::default();

    app.focus_next_pane();
    assert_eq!(app.focus, Pane::Canvas);
    app.focus_next_pane();
    app.focus_next_pane();
    assert_eq!(app.focus, Pane::Palette);
    app.focus_previous_pane();
    assert_eq!(app.focus, Pane::Properties);
}

#[test]
fn test_status_bar_reflects_state() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);
    app.set_status_message("hello");

    app.update_status_bar();

    assert_eq!(app.status_bar.get_slot("fields").unwrap().content, "1 field");
    assert_eq!(app.status_bar.get_slot("mode").unwrap().content, "DESIGN");
    let message = app.status_bar.get_slot("message").unwrap();
    assert!(message.visible);
    assert_eq!(message.content, "hello");
}

#[test]
fn test_keyboard_remove_cancels_drag() {
    let mut app = App::default();
    let a = app.add_field(FieldKind::Input);
    let b = app.add_field(FieldKind::Checkbox);
    let c = app.add_field(FieldKind::Date);

    app.begin_field_drag(1).unwrap();
    app.form.select(a).unwrap();
    app.remove_selected().unwrap();

    assert!(app.drag.is_none());
    assert!(!app.drag_hover(DropTarget::Row(0)).unwrap());
    assert_eq!(app.end_drag(DropTarget::Row(0)).unwrap(), DropOutcome::Cancelled);
    let order: Vec<_> = app.form.iter().map(|f| f.id()).collect();
    assert_eq!(order, vec![b, c]);
}

#[test]
fn test_keyboard_move_cancels_drag() {
    let mut app = App::default();
    let a = app.add_field(FieldKind::Input);
    let b = app.add_field(FieldKind::Checkbox);
    let c = app.add_field(FieldKind::Date);

    app.begin_field_drag(0).unwrap();
    app.form.select(a).unwrap();
    assert!(app.move_selected(1).unwrap().is_some());
    assert!(app.drag.is_none());

    assert!(!app.drag_hover(DropTarget::Row(2)).unwrap());
    let order: Vec<_> = app.form.iter().map(|f| f.id()).collect();
    assert_eq!(order, vec![b, a, c]);
}

#[test]
fn test_palette_drop_selects_new_field() {
    let mut app = App::default();
    app.add_field(FieldKind::Input);

    app.begin_palette_drag(FieldKind::Date);
    let DropOutcome::Appended(id) = app.end_drag(DropTarget::Canvas).unwrap() else {
        panic!("palette drop should append");
    };

    assert_eq!(app.form.selected_id(), Some(id));
    assert!(app.drag.is_none());
}
