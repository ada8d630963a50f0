//! Tests for property declarations and normalization
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

#[cfg(test)]
mod tests {
    use super::super::{
        normalize, normalize_declaration, DefaultValue, PropertyDeclaration, PropertyOptions,
        PropertyRule, PropertyRuleBuilder, PropertySpec, ValueType,
    };
    use crate::path::PropertyPath;
    use crate::Error;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn path(s: &str) -> PropertyPath {
        PropertyPath::parse(s).unwrap()
    }

    fn declaration(value: Value) -> PropertyDeclaration {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_name_form() {
        let rule = normalize_declaration(PropertyDeclaration::name("a.b")).unwrap();
        assert_eq!(rule.source, path("a.b"));
        assert_eq!(rule.destination, path("a.b"));
        assert_eq!(rule.default, None);
        assert_eq!(rule.value_type, None);
    }

    #[test]
    fn test_rename_form() {
        let rule = normalize_declaration(PropertyDeclaration::rename("a.b", "x.y")).unwrap();
        assert_eq!(rule.source, path("a.b"));
        assert_eq!(rule.destination, path("x.y"));
    }

    #[test]
    fn test_options_form() {
        let options = PropertyOptions {
            alias: Some("b".to_string()),
            value: Some(DefaultValue::literal(5)),
            value_type: Some(ValueType::Number),
        };
        let rule = normalize_declaration(PropertyDeclaration::options("a", options)).unwrap();
        assert_eq!(rule.source, path("a"));
        assert_eq!(rule.destination, path("b"));
        assert_eq!(rule.default, Some(DefaultValue::literal(5)));
        assert_eq!(rule.value_type, Some(ValueType::Number));
    }

    #[test]
    fn test_options_form_without_alias_keeps_name() {
        let rule =
            normalize_declaration(PropertyDeclaration::options("id", PropertyOptions::default()))
                .unwrap();
        assert_eq!(rule, PropertyRule::keep(path("id")));
    }

    #[test]
    fn test_explicit_form_defaults_alias_to_name() {
        let rule = normalize_declaration(PropertySpec::new("a.b").into()).unwrap();
        assert_eq!(rule.destination, path("a.b"));

        let empty_alias = PropertySpec {
            alias: Some(String::new()),
            ..PropertySpec::new("a.b")
        };
        let rule = normalize_declaration(empty_alias.into()).unwrap();
        assert_eq!(rule.destination, path("a.b"));
    }

    #[test]
    fn test_all_forms_normalize_identically() {
        let expected = PropertyRule {
            source: path("id"),
            destination: path("number"),
            default: None,
            value_type: None,
        };

        let forms = vec![
            PropertyDeclaration::rename("id", "number"),
            PropertyDeclaration::options(
                "id",
                PropertyOptions {
                    alias: Some("number".to_string()),
                    ..Default::default()
                },
            ),
            PropertyDeclaration::explicit(PropertySpec {
                alias: Some("number".to_string()),
                ..PropertySpec::new("id")
            }),
            declaration(json!({ "id": "number" })),
            declaration(json!({ "id": { "alias": "number" } })),
            declaration(json!({ "name": "id", "alias": "number" })),
        ];

        for form in forms {
            assert_eq!(normalize_declaration(form).unwrap(), expected);
        }
    }

    #[test]
    fn test_forms_with_defaults_normalize_identically() {
        let from_options = declaration(json!({ "flag": { "value": true, "type": "boolean" } }));
        let from_explicit = declaration(json!({ "name": "flag", "value": true, "type": "boolean" }));
        let from_builder = PropertyRuleBuilder::new("flag")
            .value(true)
            .value_type(ValueType::Boolean)
            .build()
            .unwrap();

        assert_eq!(normalize_declaration(from_options).unwrap(), from_builder);
        assert_eq!(normalize_declaration(from_explicit).unwrap(), from_builder);
    }

    #[test]
    fn test_json_shape_detection() {
        assert_eq!(declaration(json!("id")), PropertyDeclaration::name("id"));
        assert_eq!(
            declaration(json!({ "address.city": "city" })),
            PropertyDeclaration::rename("address.city", "city")
        );
        assert_eq!(
            declaration(json!({ "id": {} })),
            PropertyDeclaration::options("id", PropertyOptions::default())
        );
        // A lone `name` key is the explicit form, not a property called "name"
        assert_eq!(
            declaration(json!({ "name": "id" })),
            PropertyDeclaration::explicit(PropertySpec::new("id"))
        );
    }

    #[test]
    fn test_json_rejects_invalid_declarations() {
        let invalid = vec![
            json!(42),
            json!(null),
            json!(["id"]),
            json!({ "id": 5 }),
            json!({ "alias": "x", "type": "number" }),
            json!({ "id": { "type": "uuid" } }),
            json!({ "id": { "alais": "x" } }),
            json!({}),
        ];

        for value in invalid {
            let result = serde_json::from_value::<PropertyDeclaration>(value.clone());
            assert!(result.is_err(), "expected {} to be rejected", value);
        }
    }

    #[test]
    fn test_options_name_is_overridden_by_key() {
        let declaration: PropertyDeclaration =
            serde_json::from_value(json!({ "id": { "name": "other", "alias": "number" } })).unwrap();
        let rule = normalize_declaration(declaration).unwrap();
        assert_eq!(rule.source.to_string(), "id");
        assert_eq!(rule.destination.to_string(), "number");

        let declaration: PropertyDeclaration =
            serde_json::from_value(json!({ "id": { "name": "other" } })).unwrap();
        let rule = normalize_declaration(declaration).unwrap();
        assert_eq!(rule.source.to_string(), "id");
        assert_eq!(rule.destination.to_string(), "id");
    }

    #[test]
    fn test_try_from_reports_configuration_error() {
        let err = PropertyDeclaration::try_from(json!({ "id": 5 })).unwrap_err();
        match err {
            Error::Configuration { field, .. } => assert_eq!(field.as_deref(), Some("id")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_paths_are_rejected() {
        assert!(normalize_declaration(PropertyDeclaration::name("")).is_err());
        assert!(normalize_declaration(PropertyDeclaration::rename("a", "x..y")).is_err());
        assert!(PropertyRuleBuilder::new("a.").build().is_err());
    }

    #[test]
    fn test_declared_order_is_preserved() {
        let rules = normalize(vec![
            PropertyDeclaration::name("z"),
            PropertyDeclaration::name("a"),
            PropertyDeclaration::rename("m", "b"),
        ])
        .unwrap();

        let sources: Vec<String> = rules.iter().map(|r| r.source.to_string()).collect();
        assert_eq!(sources, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let rules = normalize(vec![
            declaration(json!("id")),
            declaration(json!({ "foo.bar": "bar.foo" })),
            declaration(json!({ "flag": { "type": "boolean" } })),
            declaration(json!({ "name": "count", "alias": "total", "value": 3 })),
        ])
        .unwrap();

        let again = normalize(rules.iter().cloned().map(PropertyDeclaration::from)).unwrap();
        assert_eq!(again, rules);
    }

    #[test]
    fn test_fallback_precedence() {
        let literal = PropertyRuleBuilder::new("a")
            .value("default")
            .value_type(ValueType::Number)
            .build()
            .unwrap();
        assert_eq!(literal.fallback(), json!("default"));

        let typed = PropertyRuleBuilder::new("a")
            .value_type(ValueType::Number)
            .build()
            .unwrap();
        assert_eq!(typed.fallback(), json!(0));

        let bare = PropertyRuleBuilder::new("a").build().unwrap();
        assert_eq!(bare.fallback(), Value::Null);
    }

    #[test]
    fn test_type_zero_values() {
        assert_eq!(ValueType::Boolean.zero_value(), json!(false));
        assert_eq!(ValueType::Number.zero_value(), json!(0));
        assert_eq!(ValueType::String.zero_value(), json!(""));

        let date = ValueType::Date.zero_value();
        let text = date.as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(text).is_ok());
    }

    #[test]
    fn test_producer_invoked_per_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let rule = PropertyRuleBuilder::new("a")
            .producer(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                json!("produced")
            })
            .build()
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(rule.fallback(), json!("produced"));
        assert_eq!(rule.fallback(), json!("produced"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_producer_equality_is_identity() {
        let producer = DefaultValue::producer(|| json!(1));
        assert_eq!(producer, producer.clone());
        assert_ne!(producer, DefaultValue::producer(|| json!(1)));
        assert_ne!(producer, DefaultValue::literal(1));
        assert_eq!(format!("{:?}", producer), "Producer(<fn>)");
    }

    #[test]
    fn test_value_type_serde() {
        assert_eq!(serde_json::from_value::<ValueType>(json!("date")).unwrap(), ValueType::Date);
        assert_eq!(serde_json::to_value(ValueType::String).unwrap(), json!("string"));
        assert_eq!(ValueType::Boolean.to_string(), "boolean");
    }
}
