use getdone_core::db::open_db_in_memory;
use getdone_core::{Category, SqliteStore, StoreError, TodoStore};
use uuid::Uuid;

fn store_with_work() -> (SqliteStore, Category) {
    let store = SqliteStore::open_in_memory().unwrap();
    let work = store.add_category("Work", "E8C413").unwrap();
    (store, work)
}

fn titles(store: &SqliteStore, category: &Category, needle: Option<&str>) -> Vec<String> {
    store
        .query_items(category.id, needle)
        .unwrap()
        .into_iter()
        .map(|item| item.title)
        .collect()
}

#[test]
fn added_items_are_listed_alphabetically() {
    let (store, work) = store_with_work();

    store.add_item(work.id, "Buy milk").unwrap();
    store.add_item(work.id, "Call bank").unwrap();

    assert_eq!(titles(&store, &work, None), vec!["Buy milk", "Call bank"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let (store, work) = store_with_work();
    store.add_item(work.id, "Buy milk").unwrap();
    store.add_item(work.id, "Call bank").unwrap();

    assert_eq!(titles(&store, &work, Some("call")), vec!["Call bank"]);
    assert_eq!(titles(&store, &work, Some("MILK")), vec!["Buy milk"]);
    assert!(titles(&store, &work, Some("xyz")).is_empty());
}

#[test]
fn deleted_item_disappears_from_listing() {
    let (store, work) = store_with_work();
    let milk = store.add_item(work.id, "Buy milk").unwrap();
    store.add_item(work.id, "Call bank").unwrap();

    store.delete_item(milk.id).unwrap();

    assert_eq!(titles(&store, &work, None), vec!["Call bank"]);
    assert!(store.get_item(milk.id).unwrap().is_none());
    let reloaded = store.get_category(work.id).unwrap().unwrap();
    assert_eq!(reloaded.items.len(), 1);
}

#[test]
fn listing_is_sorted_regardless_of_insertion_order() {
    let base = ["delta", "alpha", "echo", "charlie", "bravo", "Zulu", "apple pie"];
    let mut expected: Vec<String> = base.iter().map(|title| title.to_string()).collect();
    expected.sort();

    for rotation in 0..base.len() {
        let (store, work) = store_with_work();
        let mut order = base.to_vec();
        order.rotate_left(rotation);
        if rotation % 2 == 1 {
            order.reverse();
        }
        for title in &order {
            store.add_item(work.id, title).unwrap();
        }

        let listed = titles(&store, &work, None);
        assert_eq!(listed, expected);
        assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn duplicate_titles_keep_insertion_order() {
    let (store, work) = store_with_work();
    let first = store.add_item(work.id, "same").unwrap();
    let second = store.add_item(work.id, "same").unwrap();

    let ids: Vec<_> = store
        .query_items(work.id, None)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn filter_includes_exactly_the_matching_titles() {
    let (store, work) = store_with_work();
    let all = ["Buy milk", "Call bank", "call MOM", "Book flights", "Milkshake", ""];
    for title in all {
        store.add_item(work.id, title).unwrap();
    }

    for needle in ["call", "MILK", "b", " ", "", "k f", "nothing"] {
        let mut expected: Vec<String> = all
            .iter()
            .filter(|title| title.to_lowercase().contains(&needle.to_lowercase()))
            .map(|title| title.to_string())
            .collect();
        expected.sort();
        assert_eq!(
            titles(&store, &work, Some(needle)),
            expected,
            "needle `{needle}`"
        );
    }
}

#[test]
fn search_never_changes_stored_order() {
    let (store, work) = store_with_work();
    for title in ["b", "a", "c"] {
        store.add_item(work.id, title).unwrap();
    }

    titles(&store, &work, Some("a"));
    let stored: Vec<_> = store
        .get_category(work.id)
        .unwrap()
        .unwrap()
        .items
        .into_iter()
        .map(|item| item.title)
        .collect();
    assert_eq!(stored, vec!["b", "a", "c"]);
}

#[test]
fn items_are_scoped_to_their_category() {
    let (store, work) = store_with_work();
    let home = store.add_category("Home", "2ECC71").unwrap();
    store.add_item(work.id, "Report").unwrap();
    store.add_item(home.id, "Laundry").unwrap();

    assert_eq!(titles(&store, &work, None), vec!["Report"]);
    assert_eq!(titles(&store, &home, None), vec!["Laundry"]);
}

#[test]
fn new_item_defaults() {
    let (store, work) = store_with_work();
    let item = store.add_item(work.id, "Buy milk").unwrap();

    assert!(!item.done);
    assert!(item.created_at > 0);
    assert_eq!(store.get_item(item.id).unwrap(), Some(item));
}

#[test]
fn toggling_twice_restores_done_flag() {
    let (store, work) = store_with_work();
    let item = store.add_item(work.id, "Buy milk").unwrap();

    let toggled = store.toggle_item_done(item.id).unwrap();
    assert!(toggled.done);
    assert_eq!(toggled.title, item.title);
    assert_eq!(toggled.created_at, item.created_at);
    assert!(store.get_item(item.id).unwrap().unwrap().done);

    let restored = store.toggle_item_done(item.id).unwrap();
    assert_eq!(restored, item);
}

#[test]
fn adding_to_missing_category_returns_not_found() {
    let store = SqliteStore::open_in_memory().unwrap();
    let missing = Uuid::new_v4();

    let err = store.add_item(missing, "orphan").unwrap_err();
    assert!(matches!(err, StoreError::CategoryNotFound(id) if id == missing));
}

#[test]
fn stale_item_references_fail_cleanly() {
    let (store, work) = store_with_work();
    let milk = store.add_item(work.id, "Buy milk").unwrap();
    let bank = store.add_item(work.id, "Call bank").unwrap();
    store.delete_item(milk.id).unwrap();

    assert!(matches!(
        store.toggle_item_done(milk.id),
        Err(StoreError::ItemNotFound(id)) if id == milk.id
    ));
    assert!(matches!(
        store.delete_item(milk.id),
        Err(StoreError::ItemNotFound(id)) if id == milk.id
    ));
    assert_eq!(store.get_item(bank.id).unwrap(), Some(bank));
}

#[test]
fn failed_item_insert_leaves_no_trace() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_item_insert AFTER INSERT ON items
         BEGIN
            SELECT RAISE(ABORT, 'simulated write failure');
         END;",
    )
    .unwrap();
    let store = SqliteStore::from_connection(conn).unwrap();
    let work = store.add_category("Work", "E8C413").unwrap();

    let err = store.add_item(work.id, "Buy milk").unwrap_err();

    assert!(matches!(
        err,
        StoreError::Write {
            operation: "item_add",
            ..
        }
    ));
    assert!(std::error::Error::source(&err).is_some());
    assert!(store.query_items(work.id, None).unwrap().is_empty());
    assert!(store.get_category(work.id).unwrap().unwrap().items.is_empty());
}

#[test]
fn failed_toggle_keeps_previous_state() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_item_update BEFORE UPDATE ON items
         BEGIN
            SELECT RAISE(ABORT, 'simulated write failure');
         END;",
    )
    .unwrap();
    let store = SqliteStore::from_connection(conn).unwrap();
    let work = store.add_category("Work", "E8C413").unwrap();
    let item = store.add_item(work.id, "Buy milk").unwrap();

    let err = store.toggle_item_done(item.id).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Write {
            operation: "item_toggle_done",
            ..
        }
    ));
    assert_eq!(store.get_item(item.id).unwrap(), Some(item));
}

#[test]
fn search_matches_letters_regardless_of_their_position() {
    let (store, work) = store_with_work();
    store.add_item(work.id, "ΟΔΟΣ").unwrap();
    store.add_item(work.id, "Straße").unwrap();

    assert_eq!(titles(&store, &work, Some("Σ")), vec!["ΟΔΟΣ"]);
    assert_eq!(titles(&store, &work, Some("οδος")), vec!["ΟΔΟΣ"]);
    assert_eq!(titles(&store, &work, Some("STRASSE")), vec!["Straße"]);
}

#[test]
fn failed_item_delete_keeps_item() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_item_delete BEFORE DELETE ON items
         BEGIN
            SELECT RAISE(ABORT, 'simulated write failure');
         END;",
    )
    .unwrap();
    let store = SqliteStore::from_connection(conn).unwrap();
    let work = store.add_category("Work", "E8C413").unwrap();
    let item = store.add_item(work.id, "Buy milk").unwrap();

    let err = store.delete_item(item.id).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Write {
            operation: "item_delete",
            ..
        }
    ));
    assert_eq!(store.get_item(item.id).unwrap(), Some(item));
    assert_eq!(titles(&store, &work, None), vec!["Buy milk"]);
}
