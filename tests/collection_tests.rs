//! Integration tests for the field collection
//!
//! Covers append, reorder, update, remove, clear and the id-based selection

use std::collections::HashSet;

use designer::form::{FieldCollection, FieldKind, FieldPatch, FieldProperty, FormError};

fn collection_of(kinds: &[FieldKind]) -> FieldCollection {
    let mut fields = FieldCollection::new();
    for kind in kinds {
        fields.append(*kind);
    }
    fields
}

#[test]
fn test_append_adds_unnamed_field_at_tail() {
    let mut fields = collection_of(&[FieldKind::Checkbox]);

    let id = fields.append(FieldKind::Input).id();

    assert_eq!(fields.len(), 2);
    let last = fields.get_at(1).unwrap();
    assert_eq!(last.id(), id);
    assert_eq!(last.kind(), FieldKind::Input);
    assert_eq!(last.name(), "");
    assert_eq!(last.max_length(), "");
}

#[test]
fn test_ids_are_unique() {
    let fields = collection_of(&[FieldKind::Input, FieldKind::Input, FieldKind::Date]);
    let ids: HashSet<_> = fields.iter().map(|f| f.id()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_reorder_moves_with_remove_then_insert() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Checkbox, FieldKind::Date]);
    let before: Vec<_> = fields.iter().map(|f| f.id()).collect();

    fields.reorder(0, 2).unwrap();

    let after: Vec<_> = fields.iter().map(|f| f.id()).collect();
    assert_eq!(after, vec![before[1], before[2], before[0]]);

    fields.reorder(2, 0).unwrap();
    let restored: Vec<_> = fields.iter().map(|f| f.id()).collect();
    assert_eq!(restored, before);
}

#[test]
fn test_reorder_keeps_every_field() {
    let mut fields = collection_of(&[
        FieldKind::Input,
        FieldKind::Checkbox,
        FieldKind::Date,
        FieldKind::Input,
    ]);
    let mut before: Vec<_> = fields.iter().map(|f| f.id()).collect();

    for (from, to) in [(0, 3), (1, 2), (3, 0), (2, 2), (1, 3)] {
        fields.reorder(from, to).unwrap();
    }

    let mut after: Vec<_> = fields.iter().map(|f| f.id()).collect();
    before.sort_by_key(|id| id.0);
    after.sort_by_key(|id| id.0);
    assert_eq!(before, after);
}

#[test]
fn test_reorder_same_index_is_noop() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Date]);
    let id = fields.get_at(0).unwrap().id();
    fields.update(id, FieldPatch::name("Email")).unwrap();
    let before = fields.fields().to_vec();

    fields.reorder(1, 1).unwrap();

    assert_eq!(fields.fields(), before.as_slice());
}

#[test]
fn test_reorder_out_of_range() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Date]);
    let before = fields.fields().to_vec();

    assert_eq!(
        fields.reorder(0, 2),
        Err(FormError::OutOfRange { index: 2, len: 2 })
    );
    assert_eq!(
        fields.reorder(5, 0),
        Err(FormError::OutOfRange { index: 5, len: 2 })
    );
    assert_eq!(fields.fields(), before.as_slice());
}

#[test]
fn test_update_changes_only_named_properties() {
    let mut fields = collection_of(&[FieldKind::Input]);
    let id = fields.get_at(0).unwrap().id();

    fields
        .update(id, FieldPatch::name("Email").with_max_length("20"))
        .unwrap();
    let field = fields.update(id, FieldPatch::name("E-mail")).unwrap();

    assert_eq!(field.name(), "E-mail");
    assert_eq!(field.max_length(), "20");
    assert_eq!(field.kind(), FieldKind::Input);
    assert_eq!(field.id(), id);
}

#[test]
fn test_update_unknown_id() {
    let mut fields = collection_of(&[FieldKind::Input]);
    let id = fields.get_at(0).unwrap().id();
    fields.remove(id).unwrap();

    assert_eq!(
        fields.update(id, FieldPatch::name("Gone")).unwrap_err(),
        FormError::NotFound(id)
    );
}

#[test]
fn test_max_length_rejected_for_checkbox_and_date() {
    let mut fields = collection_of(&[FieldKind::Checkbox, FieldKind::Date]);

    for field_id in fields.iter().map(|f| f.id()).collect::<Vec<_>>() {
        let kind = fields.get(field_id).unwrap().kind();
        let err = fields
            .update(field_id, FieldPatch::name("Agree").with_max_length("5"))
            .unwrap_err();
        assert_eq!(
            err,
            FormError::NotApplicable {
                kind,
                property: FieldProperty::MaxLength
            }
        );
        // Rejected patches apply nothing
        assert_eq!(fields.get(field_id).unwrap().name(), "");
    }
}

#[test]
fn test_selection_follows_field_through_edits_and_moves() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Checkbox, FieldKind::Date]);
    let id = fields.get_at(0).unwrap().id();
    fields.select(id).unwrap();

    fields.update(id, FieldPatch::name("First name")).unwrap();
    fields.reorder(0, 2).unwrap();

    assert_eq!(fields.selected_id(), Some(id));
    assert_eq!(fields.selected_index(), Some(2));
    assert_eq!(fields.selected().unwrap().name(), "First name");
}

#[test]
fn test_remove_clears_matching_selection() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Checkbox]);
    let first = fields.get_at(0).unwrap().id();
    let second = fields.get_at(1).unwrap().id();

    fields.select(second).unwrap();
    fields.remove(first).unwrap();
    assert_eq!(fields.selected_id(), Some(second));

    let removed = fields.remove(second).unwrap();
    assert_eq!(removed.kind(), FieldKind::Checkbox);
    assert!(fields.selected().is_none());
    assert!(fields.is_empty());
}

#[test]
fn test_select_unknown_id_fails() {
    let mut fields = collection_of(&[FieldKind::Input]);
    let id = fields.get_at(0).unwrap().id();
    fields.clear();

    assert_eq!(fields.select(id), Err(FormError::NotFound(id)));
    assert!(fields.selected_id().is_none());
}

#[test]
fn test_clear_empties_collection_and_selection() {
    let mut fields = collection_of(&[FieldKind::Input, FieldKind::Date]);
    let id = fields.get_at(1).unwrap().id();
    fields.select(id).unwrap();

    fields.clear();

    assert_eq!(fields.len(), 0);
    assert!(fields.selected_id().is_none());

    // Clearing an empty, unselected collection is fine too
    fields.clear();
    assert!(fields.is_empty());
}

#[test]
fn test_descriptor_serializes_with_max_length_key() {
    let mut fields = collection_of(&[FieldKind::Input]);
    let id = fields.get_at(0).unwrap().id();
    fields
        .update(id, FieldPatch::name("Email").with_max_length("40"))
        .unwrap();

    let json = serde_json::to_value(fields.fields()).unwrap();
    assert_eq!(json[0]["name"], "Email");
    assert_eq!(json[0]["maxLength"], "40");
    assert_eq!(json[0]["kind"], "Input");
}
