//! End-to-end checks of the store, editor, and browser against a real SQLite
//! file in a temporary directory.

use std::path::PathBuf;

use coffee_catalog::{
    BrowserError, CatalogBrowser, CatalogStore, Coffee, CoffeeDraft, EditorError, EditorOutcome,
    RecordEditor, StoreError, ValidationError,
};
use rusqlite::Connection;
use tempfile::TempDir;

/// Creates an empty store file and returns it alongside its directory guard.
fn temp_store() -> (TempDir, PathBuf, CatalogStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("coffee.sqlite");
    let store = CatalogStore::open(&path).unwrap();
    (dir, path, store)
}

/// Types field values into an editor the way the dialog would.
fn fill(
    editor: &mut RecordEditor,
    name: &str,
    roast: &str,
    kind: &str,
    taste: &str,
    price: &str,
    volume: &str,
) {
    let form = editor.form_mut();
    form.name = name.to_string();
    assert!(form.roast_level.select(roast), "unknown roast {roast}");
    assert!(form.kind.select(kind), "unknown type {kind}");
    form.taste = taste.to_string();
    form.price = price.to_string();
    form.volume = volume.to_string();
}

fn sample_draft(name: &str) -> CoffeeDraft {
    CoffeeDraft {
        name: name.to_string(),
        roast_level: "Light".to_string(),
        kind: "Ground".to_string(),
        taste_description: "Berry".to_string(),
        price: 15.0,
        package_volume: 340.0,
    }
}

#[test]
fn create_arabica_round_trips_through_the_store() {
    let (_dir, _path, store) = temp_store();
    let mut editor = RecordEditor::open(&store, None).unwrap();
    fill(&mut editor, "Arabica", "Medium", "Beans", "Nutty", "499.00", "200");

    let id = editor.save(&store).unwrap();

    assert_eq!(editor.outcome(), EditorOutcome::Accepted(id));
    assert_eq!(
        store.fetch_one(id).unwrap(),
        Some(Coffee {
            id,
            name: "Arabica".to_string(),
            roast_level: "Medium".to_string(),
            kind: "Beans".to_string(),
            taste_description: "Nutty".to_string(),
            price: 499.0,
            package_volume: 200.0,
        })
    );
}

#[test]
fn every_valid_combination_round_trips() {
    let (_dir, _path, store) = temp_store();
    let cases = [
        ("Light", "Beans", "Floral", "0", "1"),
        ("Medium-Dark", "Ground", "", "12.75", "0.5"),
        ("Dark", "Beans", "Smoky\nBitter", "1e2", "1000"),
    ];

    for (roast, kind, taste, price, volume) in cases {
        let mut editor = RecordEditor::create();
        fill(&mut editor, "Blend", roast, kind, taste, price, volume);
        let expected = editor.draft().unwrap();

        let id = editor.save(&store).unwrap();

        let saved = store.fetch_one(id).unwrap().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.to_draft(), expected);
    }
}

#[test]
fn empty_name_blocks_the_save() {
    let (_dir, _path, store) = temp_store();
    store.insert(&sample_draft("Existing")).unwrap();
    let before = store.fetch_all().unwrap();

    let mut editor = RecordEditor::create();
    fill(&mut editor, "", "Light", "Beans", "", "999.99", "250.0");

    let messages: Vec<String> = editor.validate().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Name is required"]);

    let err = editor.save(&store).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Invalid(ref errors) if errors == &[ValidationError::NameRequired]
    ));
    assert!(editor.is_open());
    assert_eq!(store.fetch_all().unwrap(), before);
}

#[test]
fn non_numeric_price_and_volume_are_reported() {
    let mut editor = RecordEditor::create();
    fill(&mut editor, "Mocha", "Dark", "Ground", "", "12,50", "large");

    assert_eq!(
        editor.validate(),
        vec![ValidationError::InvalidPrice, ValidationError::InvalidVolume]
    );
}

#[test]
fn create_through_browser_adds_exactly_one_row() {
    let (_dir, _path, store) = temp_store();
    store.insert(&sample_draft("Colombia")).unwrap();
    store.insert(&sample_draft("Honduras")).unwrap();
    let mut browser = CatalogBrowser::new();
    browser.load(&store).unwrap();
    let before = browser.rows().len();

    let mut editor = browser.add();
    fill(&mut editor, "Rwanda", "Light", "Beans", "Tea-like", "18", "250");
    let id = editor.save(&store).unwrap();
    browser.finish_editor(&store, editor.outcome()).unwrap();

    assert_eq!(browser.rows().len(), before + 1);
    assert!(browser.rows().iter().any(|coffee| coffee.id == id));
}

#[test]
fn edit_without_selection_never_opens_an_editor() {
    let (_dir, _path, store) = temp_store();
    store.insert(&sample_draft("Colombia")).unwrap();
    let mut browser = CatalogBrowser::new();
    browser.load(&store).unwrap();

    assert!(matches!(browser.edit(&store), Err(BrowserError::NoSelection)));

    let empty = CatalogBrowser::new();
    assert!(matches!(empty.edit(&store), Err(BrowserError::NoSelection)));
}

#[test]
fn update_keeps_the_identifier() {
    let (_dir, _path, store) = temp_store();
    let id = store.insert(&sample_draft("Colombia")).unwrap();
    let mut browser = CatalogBrowser::new();
    browser.load(&store).unwrap();
    browser.select_first();

    let mut editor = browser.edit(&store).unwrap();
    fill(&mut editor, "Colombia Excelso", "Dark", "Beans", "Cocoa", "16.5", "500");
    assert_eq!(editor.save(&store).unwrap(), id);

    let saved = store.fetch_one(id).unwrap().unwrap();
    assert_eq!(saved.id, id);
    assert_eq!(saved.name, "Colombia Excelso");
    assert_eq!(saved.roast_level, "Dark");
    assert_eq!(saved.kind, "Beans");
    assert_eq!(saved.taste_description, "Cocoa");
    assert_eq!(saved.price, 16.5);
    assert_eq!(saved.package_volume, 500.0);
    assert_eq!(store.fetch_all().unwrap().len(), 1);
}

#[test]
fn rejected_write_leaves_store_and_editor_intact() {
    let (_dir, path, store) = temp_store();
    store.insert(&sample_draft("Colombia")).unwrap();
    let before = store.fetch_all().unwrap();

    let saboteur = Connection::open(&path).unwrap();
    saboteur
        .execute_batch(
            "CREATE TRIGGER no_new_coffee AFTER INSERT ON coffee
             BEGIN
                 SELECT RAISE(ABORT, 'catalog is frozen');
             END;",
        )
        .unwrap();
    drop(saboteur);

    let mut editor = RecordEditor::create();
    fill(&mut editor, "Panama Geisha", "Light", "Beans", "Jasmine", "80", "100");
    let err = editor.save(&store).unwrap_err();

    assert!(matches!(err, EditorError::Store(StoreError::Persistence(_))));
    assert!(err.to_string().contains("catalog is frozen"));
    assert!(editor.is_open());
    assert_eq!(editor.error(), Some(err.to_string().as_str()));
    assert_eq!(editor.form().name, "Panama Geisha");
    assert_eq!(editor.form().price, "80");
    assert_eq!(store.fetch_all().unwrap(), before);
}

#[test]
fn rows_survive_close_and_reopen_in_order() {
    let (_dir, path, store) = temp_store();
    let first = store.insert(&sample_draft("Colombia")).unwrap();
    let second = store.insert(&sample_draft("Honduras")).unwrap();
    store.close().unwrap();

    let store = CatalogStore::open(&path).unwrap();
    let ids: Vec<i64> = store.fetch_all().unwrap().iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![first, second]);
    store.close().unwrap();
}
