use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use toon::{from_reader, from_slice, from_str, to_string, to_value, to_writer, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "developer".to_string()],
        },
        items: vec![
            Product {
                sku: "SKU-1".to_string(),
                price: 9.99,
                quantity: 5,
            },
            Product {
                sku: "SKU-2".to_string(),
                price: 14.99,
                quantity: 2,
            },
        ],
        total: 79.93,
    }
}

#[test]
fn simple_struct_round_trip() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };
    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "active: true\nid: 123\nname: Alice\ntags: [2]: admin, developer"
    );
    let back: User = from_str(&text).unwrap();
    assert_eq!(user, back);
}

#[test]
fn nested_struct_round_trip() {
    let order = sample_order();
    let text = to_string(&order).unwrap();
    let back: Order = from_str(&text).unwrap();
    assert_eq!(order, back);
}

#[test]
fn struct_vec_serializes_as_table() {
    let order = sample_order();
    let text = to_string(&order).unwrap();
    assert!(text.contains("items: [{price, quantity, sku}]:"));
    assert!(text.contains("9.99, 5, SKU-1"));
}

#[test]
fn map_round_trip() {
    let mut scores: HashMap<String, i64> = HashMap::new();
    scores.insert("alice".to_string(), 10);
    scores.insert("bob".to_string(), -3);
    let text = to_string(&scores).unwrap();
    assert_eq!(text, "alice: 10\nbob: -3");
    let back: HashMap<String, i64> = from_str(&text).unwrap();
    assert_eq!(scores, back);
}

#[test]
fn integer_keyed_map_keys_become_strings() {
    let mut by_id: HashMap<u32, String> = HashMap::new();
    by_id.insert(7, "seven".to_string());
    let value = to_value(&by_id).unwrap();
    assert_eq!(value["7"].string(), "seven");
}

#[test]
fn unit_and_newtype_structs() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Marker;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Meters(f64);

    assert_eq!(to_string(&Marker).unwrap(), "null");
    let back: Marker = from_str("null").unwrap();
    assert_eq!(back, Marker);

    let distance = Meters(1.5);
    let text = to_string(&distance).unwrap();
    assert_eq!(text, "1.5");
    let back: Meters = from_str(&text).unwrap();
    assert_eq!(distance, back);
}

#[test]
fn enum_round_trips() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Event {
        Ping,
        Message(String),
        Moved { x: i32, y: i32 },
        Range(i32, i32),
    }

    let events = [
        Event::Ping,
        Event::Message("hello there".to_string()),
        Event::Moved { x: 3, y: -4 },
        Event::Range(0, 10),
    ];
    for event in events {
        let text = to_string(&event).unwrap();
        let back: Event = from_str(&text).unwrap();
        assert_eq!(event, back);
    }
}

#[test]
fn option_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        timeout: Option<u64>,
        proxy: Option<String>,
    }

    let settings = Settings {
        timeout: None,
        proxy: Some("proxy.internal".to_string()),
    };
    let text = to_string(&settings).unwrap();
    assert_eq!(text, "proxy: proxy.internal\ntimeout: null");
    let back: Settings = from_str(&text).unwrap();
    assert_eq!(settings, back);
}

#[test]
fn tuples_and_nested_vecs() {
    let pair: (i32, bool) = (9, false);
    let back: (i32, bool) = from_str(&to_string(&pair).unwrap()).unwrap();
    assert_eq!(pair, back);

    let flat = vec![vec![1, 2], vec![3]];
    let text = to_string(&flat).unwrap();
    assert_eq!(text, "[2]: [2]: 1, 2, [1]: 3");
    let back: Vec<Vec<i32>> = from_str(&text).unwrap();
    assert_eq!(flat, back);
}

#[test]
fn deserialize_into_dynamic_value() {
    let doc: Value = from_str("name: Alice\nscores: [3]: 1, 2, 3").unwrap();
    assert_eq!(doc["name"].string(), "Alice");
    assert_eq!(doc["scores"].elements().len(), 3);
}

#[test]
fn writer_and_reader_round_trip() {
    let order = sample_order();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &order).unwrap();
    let back: Order = from_reader(std::io::Cursor::new(&buffer)).unwrap();
    assert_eq!(order, back);
    let again: Order = from_slice(&buffer).unwrap();
    assert_eq!(order, again);
}

#[test]
fn type_mismatch_is_a_message_error() {
    let result: Result<u32, _> = from_str("not a number");
    assert!(result.is_err());
}

#[test]
fn hand_written_document_deserializes() {
    let text = "\
# order export
customer: \n  active: true\n  id: 123\n  name: Alice\n  tags: [2]: admin, developer
items: [{price, quantity, sku}]:
  9.99, 5, SKU-1
  14.99, 2, SKU-2
order_id: 12345
total: 79.93
";
    let order: Order = from_str(text).unwrap();
    assert_eq!(order, sample_order());
}

#[test]
fn json_value_converts_through_serde() {
    let json = serde_json::json!({"name": "Alice", "nums": [1, 2], "ok": true});
    let value = to_value(&json).unwrap();
    assert_eq!(value["name"].string(), "Alice");
    assert_eq!(value["nums"][1].integer(), 2);
    assert!(value["ok"].boolean());
}
