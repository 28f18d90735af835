use getdone_core::{Category, Item};
use uuid::Uuid;

#[test]
fn item_new_sets_defaults() {
    let item = Item::new("Buy milk");

    assert!(!item.id.is_nil());
    assert_eq!(item.title, "Buy milk");
    assert!(!item.done);
    assert!(item.created_at > 0);
}

#[test]
fn toggle_done_flips_and_reports_new_value() {
    let mut item = Item::new("Call bank");

    assert!(item.toggle_done());
    assert!(item.done);
    assert!(!item.toggle_done());
    assert!(!item.done);
}

#[test]
fn category_new_starts_empty_with_fresh_id() {
    let first = Category::new("Work", "E8C413");
    let second = Category::new("Work", "E8C413");

    assert_ne!(first.id, second.id);
    assert!(first.items.is_empty());
    assert_eq!(first.open_item_count(), 0);
}

#[test]
fn open_item_count_ignores_done_items() {
    let mut category = Category::new("Home", "1ABC9C");
    let mut done = Item::new("Water plants");
    done.toggle_done();
    category.items.push(done);
    category.items.push(Item::new("Fix sink"));

    assert_eq!(category.open_item_count(), 1);
}

#[test]
fn category_serialization_uses_expected_wire_fields() {
    let category_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let item_id = Uuid::parse_str("66666666-7777-4888-8999-aaaaaaaaaaaa").unwrap();
    let mut category = Category::with_id(category_id, "Work", "E8C413", 1_700_000_000_000);
    category
        .items
        .push(Item::with_id(item_id, "Buy milk", 1_700_000_360_000));

    let json = serde_json::to_value(&category).unwrap();
    assert_eq!(json["id"], category_id.to_string());
    assert_eq!(json["name"], "Work");
    assert_eq!(json["color_tag"], "E8C413");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["items"][0]["id"], item_id.to_string());
    assert_eq!(json["items"][0]["title"], "Buy milk");
    assert_eq!(json["items"][0]["done"], false);

    let decoded: Category = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, category);
}

#[test]
fn category_deserializes_without_items_field() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Errands",
        "color_tag": "3498DB",
        "created_at": 0
    });

    let decoded: Category = serde_json::from_value(value).unwrap();
    assert!(decoded.items.is_empty());
}
