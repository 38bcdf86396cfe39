//! Integration tests: list and detail screens sharing one ingredient store.

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use barkeep::bar::{Ingredient, IngredientField, IngredientReason};
use barkeep::{
    DoneType, EditAction, InMemoryStore, LogNotifier, MemoryPersistence, SaverToken, SinkMessage,
    Store,
};
use pretty_assertions::assert_eq;
use support::{create_detail, names, open_detail, open_list, shelf, store};

#[test]
fn delete_from_single_item_section() {
    let store = store();
    let (list, sink) = open_list(&store);
    assert_eq!(
        sink.last_display().unwrap().titles(),
        vec!["A", "C", "G"]
    );

    let removed = list.delete_item(0, 0).unwrap();

    assert_eq!(removed.id, "angostura");
    assert!(list.is_editing());
    let remaining = list.items();
    assert_eq!(names(&remaining), vec!["Campari", "Gin", "Cointreau", "grenadine"]);
    for (kept, original) in remaining.iter().zip(shelf().iter().filter(|i| i.id != "angostura")) {
        assert_eq!(kept, original);
    }
    assert_eq!(sink.last_display().unwrap().titles(), vec!["C", "G"]);

    list.finish(DoneType::Save);
    assert!(!list.is_editing());
    assert_eq!(store.current().len(), 4);
}

#[test]
fn detail_save_reaches_list_without_echo() {
    let store = store();
    let (list, _) = open_list(&store);
    let (detail, sink) = open_detail(&store, "gin");

    detail.edit_field(IngredientField::Name, |i| i.name = "Old Tom Gin".into());
    sink.clear();
    detail.send(EditAction::FinishEditing(DoneType::Save));

    let displays = sink
        .take()
        .into_iter()
        .filter(|m| matches!(m, SinkMessage::Display(_)))
        .count();
    assert_eq!(displays, 1, "detail must not receive its own save");

    assert!(names(&store.current()).contains(&"Old Tom Gin"));
    assert_eq!(list.select_item(3, 0).map(|i| i.name), Some("Old Tom Gin".into()));
}

#[test]
fn list_edit_survives_detail_save() {
    let store = store();
    let (list, sink) = open_list(&store);
    let (detail, _) = open_detail(&store, "campari");

    list.delete_item(0, 0);
    detail.edit_field(IngredientField::Amount, |i| i.amount = 650.0);
    detail.send(EditAction::FinishEditing(DoneType::Save));

    // the in-progress deletion stays
    assert_eq!(list.items().len(), 4);
    assert_eq!(store.current().len(), 5);

    list.finish(DoneType::Cancel);
    let (_, id) = sink.confirmation_requests()[0];
    list.resolve_confirmation(id, true);

    let items = list.items();
    assert_eq!(items.len(), 5);
    let campari = items.iter().find(|i| i.id == "campari").unwrap();
    assert_eq!(campari.amount, 650.0);
}

#[test]
fn list_save_keeps_detail_commit() {
    let store = store();
    let (list, _) = open_list(&store);
    let (detail, _) = open_detail(&store, "campari");

    list.delete_item(0, 0);
    detail.edit_field(IngredientField::Amount, |i| i.amount = 650.0);
    detail.send(EditAction::FinishEditing(DoneType::Save));
    list.finish(DoneType::Save);

    assert!(!list.is_editing());
    let current = store.current();
    assert_eq!(current.len(), 4);
    assert!(current.iter().all(|i| i.id != "angostura"));
    let campari = current.iter().find(|i| i.id == "campari").unwrap();
    assert_eq!(campari.amount, 650.0);
    assert_eq!(list.items(), current);
}

#[test]
fn list_save_keeps_items_added_elsewhere() {
    let store = store();
    let (list, sink) = open_list(&store);
    let (detail, _) = create_detail(&store, "aperol");

    list.delete_item(0, 0);
    detail.edit_field(IngredientField::Name, |i| i.name = "Aperol".into());
    detail.send(EditAction::FinishEditing(DoneType::Save));
    assert_eq!(list.items().len(), 4);

    list.finish(DoneType::Save);

    let current = store.current();
    assert_eq!(names(&current), vec!["Campari", "Gin", "Cointreau", "grenadine", "Aperol"]);
    assert_eq!(list.items(), current);
    assert_eq!(sink.last_display().unwrap().titles(), vec!["A", "C", "G"]);
}

#[test]
fn new_ingredient_name_must_be_unique() {
    let store = store();
    let (list, _) = open_list(&store);
    let (detail, sink) = create_detail(&store, "aperol");

    assert!(detail.is_editing());
    let display = sink.last_display().unwrap();
    assert_eq!(display.title, "New Ingredient");
    assert_eq!(display.name_error, None);

    detail.edit_field(IngredientField::Name, |i| i.name = "campari".into());
    let display = sink.last_display().unwrap();
    assert_eq!(display.name_error, Some(IngredientReason::NameTaken));
    assert_eq!(display.name_suggestion.as_deref(), Some("campari 2"));

    detail.send(EditAction::FinishEditing(DoneType::Save));
    assert!(detail.is_editing());
    assert_eq!(store.current().len(), 5);

    detail.edit_field(IngredientField::Name, |i| i.name = "Aperol".into());
    detail.send(EditAction::FinishEditing(DoneType::Save));
    assert!(!detail.is_editing());
    assert_eq!(store.current().len(), 6);
    assert_eq!(list.select_item(0, 1).map(|i| i.name), Some("Aperol".into()));
}

#[test]
fn viewing_detail_follows_other_screens() {
    let store = store();
    let (watcher, watcher_sink) = open_detail(&store, "gin");
    let (editor, _) = open_detail(&store, "gin");

    editor.edit_field(IngredientField::Name, |i| i.name = "London Dry".into());
    editor.send(EditAction::FinishEditing(DoneType::Save));

    assert_eq!(watcher.active().name, "London Dry");
    assert_eq!(watcher_sink.last_display().unwrap().title, "London Dry");
}

#[test]
fn editing_detail_sees_new_collisions() {
    let store = store();
    let (first, first_sink) = open_detail(&store, "gin");
    let (second, _) = open_detail(&store, "cointreau");

    first.edit_field(IngredientField::Name, |i| i.name = "Triple Sec".into());
    assert_eq!(first_sink.last_display().unwrap().name_error, None);

    second.edit_field(IngredientField::Name, |i| i.name = "Triple Sec".into());
    second.send(EditAction::FinishEditing(DoneType::Save));

    assert_eq!(
        first_sink.last_display().unwrap().name_error,
        Some(IngredientReason::NameTaken)
    );
    assert_eq!(first.active().name, "Triple Sec");
    first.send(EditAction::FinishEditing(DoneType::Save));
    assert!(first.is_editing());
}

#[test]
fn closing_screens_unregisters() {
    let store = store();
    let (list, _) = open_list(&store);
    let (detail, _) = open_detail(&store, "gin");
    assert_eq!(store.observer_count(), 2);

    detail.close();
    list.close();
    assert_eq!(store.observer_count(), 0);

    store
        .update(SaverToken::ANONYMOUS, |items| items.push(Ingredient::new("rum", "Rum")))
        .unwrap();
    assert_eq!(store.current().len(), 6);
}

#[test]
fn dropped_screen_is_skipped() {
    let store = store();
    let (detail, _) = open_detail(&store, "gin");
    drop(detail);

    store.save(Vec::new(), SaverToken::ANONYMOUS).unwrap();
    assert!(store.current().is_empty());
}

#[test]
fn saves_persist_and_notify() {
    init();
    let persistence = MemoryPersistence::new();
    let store = InMemoryStore::with_persistence(shelf(), persistence.clone());
    let lines = Rc::new(RefCell::new(Vec::new()));
    store.add_notifier(LogNotifier::with_buffer("IngredientsSaved", Rc::clone(&lines)));

    let (detail, _) = open_detail(&store, "grenadine");
    detail.edit_field(IngredientField::InStock, |i| i.in_stock = true);
    detail.send(EditAction::FinishEditing(DoneType::Save));

    let snapshot = persistence.snapshot().unwrap();
    let persisted: Vec<Ingredient> = serde_json::from_str(&snapshot).unwrap();
    assert!(persisted.iter().find(|i| i.id == "grenadine").unwrap().in_stock);
    assert_eq!(lines.borrow().len(), 1);
    assert!(lines.borrow()[0].starts_with("[SAVED] IngredientsSaved ["));

    let reopened: InMemoryStore<Vec<Ingredient>> =
        InMemoryStore::load(persistence, Vec::new()).unwrap();
    assert_eq!(reopened.current(), store.current());
}

fn init() {
    support::init_tracing();
}
