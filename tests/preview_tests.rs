//! Integration tests for the preview projection

use designer::form::{
    project, project_all, Control, FieldCollection, FieldKind, FieldPatch,
};

#[test]
fn test_projection_follows_form_order() {
    let mut form = FieldCollection::new();
    let email = form.append(FieldKind::Input).id();
    let agree = form.append(FieldKind::Checkbox).id();
    let born = form.append(FieldKind::Date).id();
    form.update(email, FieldPatch::name("Email").with_max_length("40"))
        .unwrap();
    form.update(agree, FieldPatch::name("Agree")).unwrap();
    form.update(born, FieldPatch::name("Birthday")).unwrap();

    let directives = project_all(&form);

    let labels: Vec<_> = directives.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["Email", "Agree", "Birthday"]);
    assert_eq!(
        directives[0].control,
        Control::TextBox {
            max_length: Some(40)
        }
    );
    assert_eq!(directives[1].control, Control::Checkbox);
    assert_eq!(directives[2].control, Control::DatePicker);
    assert_eq!(directives[0].field_id, email);
}

#[test]
fn test_projection_is_repeatable_and_read_only() {
    let mut form = FieldCollection::new();
    let id = form.append(FieldKind::Input).id();
    form.update(id, FieldPatch::name("Name")).unwrap();
    form.append(FieldKind::Date);
    let before = form.fields().to_vec();

    let first = project_all(form.fields());
    let second = project_all(form.fields());

    assert_eq!(first, second);
    assert_eq!(form.fields(), before.as_slice());
}

#[test]
fn test_unnamed_fields_use_kind_fallback() {
    let mut form = FieldCollection::new();
    for kind in FieldKind::ALL {
        form.append(kind);
    }

    let labels: Vec<_> = project_all(&form).into_iter().map(|d| d.label).collect();
    assert_eq!(labels, ["Input Field", "Checkbox Field", "Date Field"]);
}

#[test]
fn test_text_box_cap() {
    let mut form = FieldCollection::new();
    let id = form.append(FieldKind::Input).id();

    for (raw, cap) in [("", None), ("12", Some(12)), ("7.9", Some(7)), (" 5 ", Some(5))] {
        let field = form.update(id, FieldPatch::max_length(raw)).unwrap();
        assert_eq!(
            project(field).control,
            Control::TextBox { max_length: cap },
            "max length {:?}",
            raw
        );
    }
}

#[test]
fn test_empty_form_projects_nothing() {
    assert!(project_all(&FieldCollection::new()).is_empty());
}
