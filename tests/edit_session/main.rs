//! Integration tests for the edit session state machine.


use barkeep::{DoneType, EditAction, EditModeDisplay, NameLookup, SessionState, SinkMessage};
use support::{harness, Label, LabelField};

const SAVE: EditAction = EditAction::FinishEditing(DoneType::Save);
const CANCEL: EditAction = EditAction::FinishEditing(DoneType::Cancel);

fn labels() -> Vec<Label> {
    vec![
        Label::new("1", "Chartreuse", 110),
        Label::new("", "", 0),
        Label::new("2", "Fernet", 78),
    ]
}

#[test]
fn cancel_without_changes_is_immediate() {
    for label in labels() {
        let mut h = harness(label.clone());
        h.session.send(EditAction::StartEditing);
        h.session.send(CANCEL);

        assert_eq!(h.session.state(), SessionState::Viewing);
        assert!(h.sink.confirmation_requests().is_empty());
        assert_eq!(h.session.active_model(), &label);
        assert_eq!(h.session.stored_model(), &label);
    }
}

#[test]
fn cancel_with_changes_asks_exactly_once() {
    for label in labels() {
        let mut h = harness(label.clone());
        h.session.update_active_model(|l| l.proof += 1);
        let before = h.session.active_model().clone();

        h.session.send(CANCEL);
        h.session.send(CANCEL);

        let requests = h.sink.confirmation_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, DoneType::Cancel);
        assert_eq!(h.session.active_model(), &before);

        h.session.resolve_confirmation(requests[0].1, false);
        assert!(h.session.is_editing());
        assert_eq!(h.session.active_model(), &before);
        assert_eq!(h.session.stored_model(), &label);
    }
}

#[test]
fn confirmed_cancel_reverts() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.edit_field(LabelField::Name, |l| l.name = "Green Chartreuse".into());
    h.session.send(CANCEL);
    let (_, id) = h.sink.confirmation_requests()[0];

    h.session.resolve_confirmation(id, true);

    assert_eq!(h.session.state(), SessionState::Viewing);
    assert_eq!(h.session.active_model().name, "Chartreuse");
    assert!(h.session.touched().is_empty());
    assert_eq!(h.sink.last_edit_mode(), Some(EditModeDisplay::default()));
}

#[test]
fn invalid_save_changes_nothing() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.update_active_model(|l| l.proof = -5);
    h.session.send(SAVE);

    assert!(h.session.is_editing());
    assert_eq!(h.session.stored_model().proof, 110);
    assert!(h.saved.borrow().is_empty());

    h.session.validator_mut().names = NameLookup::from_items(&[Label::new("9", "Cynar", 33)]);
    h.session.update_active_model(|l| {
        l.proof = 33;
        l.name = "cynar".into();
    });
    h.session.send(SAVE);
    assert!(h.saved.borrow().is_empty(), "name collision refuses the save");
}

#[test]
fn valid_save_commits_exactly_once() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.update_active_model(|l| l.proof = 80);
    h.session.send(SAVE);
    h.session.send(SAVE);

    assert_eq!(h.session.state(), SessionState::Viewing);
    assert_eq!(h.session.stored_model().proof, 80);
    assert_eq!(h.saved.borrow().as_slice(), &[Label::new("1", "Chartreuse", 80)]);
}

#[test]
fn renaming_back_to_own_name_is_valid() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.validator_mut().names = NameLookup::from_items(&[Label::new("1", "Chartreuse", 110)]);

    h.session.update_active_model(|l| l.name = "Other".into());
    h.session.update_active_model(|l| l.name = "CHARTREUSE".into());
    h.session.send(SAVE);

    assert_eq!(h.saved.borrow().len(), 1);
}

#[test]
fn external_push_during_edit_does_not_clobber() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.update_active_model(|l| l.proof = 95);
    h.sink.clear();

    h.session.update_stored_model(Label::new("1", "Yellow Chartreuse", 80));

    assert_eq!(h.session.active_model().proof, 95);
    assert_eq!(h.session.active_model().name, "Chartreuse");
    assert_eq!(h.session.stored_model().name, "Yellow Chartreuse");
    assert!(h.sink.is_empty());

    // cancel now reverts to the newest stored value
    h.session.send(CANCEL);
    let (_, id) = h.sink.confirmation_requests()[0];
    h.session.resolve_confirmation(id, true);
    assert_eq!(h.session.active_model().name, "Yellow Chartreuse");
}

#[test]
fn empty_name_error_waits_for_touch() {
    let mut h = harness(Label::new("new", "", 0));
    h.session.send(EditAction::StartEditing);
    h.session.refresh();

    let display = h.sink.last_display().unwrap();
    assert!(!display.name_error);

    h.session.edit_field(LabelField::Name, |l| l.name.clear());

    let display = h.sink.last_display().unwrap();
    assert!(display.name_error);
    assert!(!display.proof_error);
}

#[test]
fn every_mutation_pushes_display_then_edit_mode() {
    let mut h = harness(Label::new("1", "Chartreuse", 110));
    h.session.update_active_model(|l| l.proof = 100);

    let messages = h.sink.take();
    assert_eq!(messages.len(), 2);
    assert!(matches!(messages[0], SinkMessage::Display(_)));
    assert_eq!(
        messages[1],
        SinkMessage::EditMode(EditModeDisplay {
            is_editing: true,
            can_save: true,
        })
    );
}
