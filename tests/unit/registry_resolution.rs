//! Unit tests for type resolution through the mapping registry

use assert_matches::assert_matches;
use normconv::mapping::MatchKind;
use normconv::{MappingConfig, MappingEntry, MappingRegistry, Node, NormalizeError, Normalizer, Record};
use pretty_assertions::assert_eq;
use serde_json::json;

fn collection() -> Record {
    Record::new("Collection")
        .implements("Arrayable")
        .implements("Jsonable")
        .with_value("all", json!([1, 2]))
        .with_value("toArray", json!(["array"]))
        .with_value("toJson", json!("json"))
}

#[test]
fn test_exact_match_takes_precedence() {
    let registry = MappingRegistry::new(vec![
        MappingEntry::new("Arrayable", "items", "toArray"),
        MappingEntry::new("Collection", "collection", "all"),
    ]);

    let found = registry.lookup(&collection()).unwrap();
    assert_eq!(found.kind, MatchKind::Exact);

    let output = Normalizer::new(registry)
        .convert(&Node::instance(collection()))
        .unwrap();
    assert_eq!(output, json!({"collection": [1, 2]}));
}

#[test]
fn test_registration_order_breaks_ties() {
    let jsonable_first = MappingRegistry::new(vec![
        MappingEntry::new("Jsonable", "json", "toJson"),
        MappingEntry::new("Arrayable", "items", "toArray"),
    ]);
    let arrayable_first = MappingRegistry::new(vec![
        MappingEntry::new("Arrayable", "items", "toArray"),
        MappingEntry::new("Jsonable", "json", "toJson"),
    ]);

    assert_eq!(
        Normalizer::new(jsonable_first)
            .convert(&Node::instance(collection()))
            .unwrap(),
        json!({"json": "json"})
    );
    assert_eq!(
        Normalizer::new(arrayable_first)
            .convert(&Node::instance(collection()))
            .unwrap(),
        json!({"items": ["array"]})
    );
}

#[test]
fn test_table_config_order_is_resolution_order() {
    let config = MappingConfig::from_toml_str(
        r#"
        [classes.Jsonable]
        key = "json"
        method = "toJson"

        [classes.Arrayable]
        key = "items"
        method = "toArray"
        "#,
    )
    .unwrap();

    let entry = config
        .into_registry()
        .resolve(&collection())
        .unwrap()
        .clone();
    assert_eq!(entry, MappingEntry::new("Jsonable", "json", "toJson"));
}

#[test]
fn test_unmapped_type_named_in_error() {
    let registry = MappingRegistry::new(vec![MappingEntry::new("Money", "amount", "toFloat")]);
    assert_matches!(
        registry.resolve(&Record::new("Invoice")),
        Err(NormalizeError::NoMappingFound { type_name, .. }) if type_name == "Invoice"
    );
}

#[test]
fn test_invalid_configuration() {
    for config in [json!("classes"), json!(1), json!(true), json!({"classes": "Money"})] {
        assert_matches!(
            Normalizer::from_config(&config),
            Err(NormalizeError::InvalidConfiguration { .. })
        );
    }
}

#[test]
fn test_one_shot_convert() {
    let output = normconv::convert(
        &json!([{"matcher": "Money", "key": "amount", "method": "toFloat"}]),
        &Node::instance(Record::new("Money").with_value("toFloat", json!(1.25))),
    )
    .unwrap();
    assert_eq!(output, json!({"amount": 1.25}));
}
