//! Smoke tests for overall application functionality
//!
//! These are high-level tests that walk a form from first field to preview

use designer::form::{Control, FieldKind, FieldProperty};
use designer::{App, DesignerMode};
use ratatui::{backend::TestBackend, Terminal};

#[test]
fn test_app_smoke_test() {
    let app = App::default();

    assert!(app.running);
    assert!(app.form.is_empty());
    assert!(app.status_bar.slot_count() > 0);
}

#[test]
fn test_design_to_preview_smoke_test() {
    let mut app = App::default();
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

    // Build a three field form the way the keyboard would
    for (kind, name, max_length) in [
        (FieldKind::Input, "Full name", "60"),
        (FieldKind::Date, "Start date", ""),
        (FieldKind::Checkbox, "Remote", ""),
    ] {
        app.add_field(kind);
        app.focus_property(FieldProperty::Name);
        for c in name.chars() {
            app.insert_property_char(c).unwrap();
        }
        if !max_length.is_empty() {
            app.cycle_property(true);
            for c in max_length.chars() {
                app.insert_property_char(c).unwrap();
            }
        }
        terminal.draw(|f| app.render(f)).unwrap();
    }

    // Put the checkbox first
    app.select_at(2).unwrap();
    app.move_selected(-1).unwrap();
    app.move_selected(-1).unwrap();

    app.request_preview().unwrap();
    terminal.draw(|f| app.render(f)).unwrap();

    assert_eq!(app.mode, DesignerMode::Preview);
    let labels: Vec<_> = app.preview.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["Remote", "Full name", "Start date"]);
    assert_eq!(
        app.preview[1].control,
        Control::TextBox {
            max_length: Some(60)
        }
    );

    app.dismiss_preview();
    app.clear_form();
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(app.form.is_empty());
}
