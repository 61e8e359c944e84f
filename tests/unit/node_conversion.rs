//! Unit tests for payload normalization
//!
//! Tests cover:
//! - Null and plain-data pass-through
//! - Root wrapping versus nested in-place replacement
//! - Key consistency at any depth
//! - Instances implemented as Rust types
//! - Sharing one normalizer across threads

use assert_matches::assert_matches;
use normconv::{
    Mappable, MapKey, MappingEntry, MappingRegistry, Node, NormalizeError, Normalizer, Record,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

/// Money stored in cents, exposing a float view
#[derive(Debug)]
struct Money {
    cents: i64,
}

impl Mappable for Money {
    fn type_name(&self) -> &str {
        "Money"
    }

    fn satisfies(&self, matcher: &str) -> bool {
        matcher == "Amount"
    }

    fn extract(&self, method: &str) -> Option<Value> {
        match method {
            "toFloat" => Some(json!(self.cents as f64 / 100.0)),
            "toCents" => Some(json!(self.cents)),
            _ => None,
        }
    }
}

fn money_normalizer() -> Normalizer {
    Normalizer::from_config(&json!({
        "classes": [{"matcher": "Money", "key": "amount", "method": "toFloat"}]
    }))
    .unwrap()
}

#[test]
fn test_null_identity() {
    assert_eq!(money_normalizer().convert(&Node::Null).unwrap(), Value::Null);
}

#[test]
fn test_plain_data_is_unchanged() {
    let payload = json!({
        "user": {"id": 7, "name": "Alice", "tags": ["a", "b"], "manager": null},
        "scores": [1.5, 2, -3],
        "active": true
    });

    let output = money_normalizer()
        .convert(&Node::from(payload.clone()))
        .unwrap();
    assert_eq!(output, payload);
}

#[test]
fn test_scenario_money_in_list() {
    let payload = Node::seq(vec![Node::map(vec![(
        "price",
        Node::instance(Money { cents: 999 }),
    )])]);

    assert_eq!(
        money_normalizer().convert(&payload).unwrap(),
        json!([{"price": 9.99}])
    );
}

#[test]
fn test_root_wrapping_and_nested_replacement() {
    let registry = MappingRegistry::new(vec![MappingEntry::new("T", "item", "value")]);
    let normalizer = Normalizer::new(registry);
    let instance = || Node::instance(Record::new("T").with_value("value", json!("x")));

    assert_eq!(normalizer.convert(&instance()).unwrap(), json!({"item": "x"}));
    assert_eq!(
        normalizer
            .convert(&Node::map(vec![("a", instance())]))
            .unwrap(),
        json!({"a": "x"})
    );
}

#[test]
fn test_extracted_value_taken_as_is() {
    let registry = MappingRegistry::new(vec![MappingEntry::new("Page", "page", "toArray")]);
    let page = Record::new("Page").with_value("toArray", json!({"0": "first", "next": 2}));

    let output = Normalizer::new(registry)
        .convert(&Node::map(vec![("page", Node::instance(page))]))
        .unwrap();
    assert_eq!(output, json!({"page": {"0": "first", "next": 2}}));
}

#[test]
fn test_mixed_keys_rejected_at_any_depth() {
    let mixed = || Node::map(vec![(MapKey::Index(0), Node::from("a")), ("b".into(), "c".into())]);

    assert_matches!(
        money_normalizer().convert(&mixed()),
        Err(NormalizeError::MixedKeys { path, .. }) if path == "$"
    );

    let deep = Node::map(vec![(
        "level1",
        Node::seq(vec![Node::map(vec![("level2", mixed())])]),
    )]);
    assert_matches!(
        money_normalizer().convert(&deep),
        Err(NormalizeError::MixedKeys { path, .. }) if path == "$.level1[0].level2"
    );

    let decoded = Node::from(json!({"wrapper": {"0": "a", "b": "c"}}));
    assert!(money_normalizer().convert(&decoded).is_err());
}

#[test]
fn test_unmapped_instance() {
    let normalizer = Normalizer::new(MappingRegistry::default());
    assert_eq!(
        normalizer
            .convert(&Node::instance(Money { cents: 1 }))
            .unwrap_err(),
        NormalizeError::NoMappingFound {
            type_name: "Money".to_string(),
            path: "$".to_string(),
        }
    );
}

#[test]
fn test_scalar_root_is_invalid_payload() {
    assert_matches!(
        money_normalizer().convert(&Node::from(42i64)),
        Err(NormalizeError::InvalidPayload { .. })
    );
}

#[test]
fn test_input_not_mutated_and_reusable() {
    let normalizer = money_normalizer();
    let payload = Node::map(vec![("price", Node::instance(Money { cents: 250 }))]);

    let first = normalizer.convert(&payload).unwrap();
    let second = normalizer.convert(&payload).unwrap();
    assert_eq!(first, second);
    assert!(matches!(&payload, Node::Map(entries) if matches!(entries[0].1, Node::Instance(_))));
}

#[test]
fn test_concurrent_conversions_share_normalizer() {
    let normalizer = Arc::new(money_normalizer());

    let handles: Vec<_> = (0..4i64)
        .map(|n| {
            let normalizer = Arc::clone(&normalizer);
            thread::spawn(move || {
                let payload = Node::map(vec![("price", Node::instance(Money { cents: n * 100 }))]);
                normalizer.convert(&payload).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!({"price": n as f64}));
    }
}
