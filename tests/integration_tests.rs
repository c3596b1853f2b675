use json_decode::{
    array, at, boolean, date, dict, fail, field, key_value_pairs, maybe, nullable, number, one_of,
    path, string, succeed, DecodeError, Decoder,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    name: String,
    age: f64,
    admin: bool,
}

#[test]
fn test_succeed_and_fail_ignore_their_input() {
    for input in [json!(null), json!(42), json!({"a": [1]})] {
        assert_eq!(succeed("ok").decode_value(&input), Ok("ok"));
        assert_eq!(
            fail::<String>("doomed").decode_value(&input),
            Err(DecodeError::new("doomed"))
        );
    }
}

#[test]
fn test_map_over_succeed() {
    let decoder = succeed(20.0).map(|n| n * 2.0);
    assert_eq!(decoder.decode_value(&json!("whatever")), Ok(40.0));
}

#[test]
fn test_array_of_strings() {
    let decoder = array(string());
    assert_eq!(
        decoder.decode_value(&json!(["a", "b"])),
        Ok(vec!["a".to_string(), "b".to_string()])
    );

    let err = decoder.decode_value(&json!(["a", 2])).unwrap_err();
    assert!(err.message().contains("at [1]"));
}

#[test]
fn test_field_presence_and_absence() {
    let decoder = field("x", number());
    assert_eq!(decoder.decode_value(&json!({"x": 5})), Ok(5.0));

    let err = decoder.decode_value(&json!({})).unwrap_err();
    assert!(err.message().contains("key 'x'"));
}

#[test]
fn test_maybe_masks_nullable_propagates() {
    assert_eq!(maybe(number()).decode_value(&json!("oops")), Ok(None));
    assert_eq!(maybe(number()).decode_value(&json!(2)), Ok(Some(2.0)));

    assert!(nullable(number()).decode_value(&json!("oops")).is_err());
    assert_eq!(nullable(number()).decode_value(&Value::Null), Ok(None));
    assert_eq!(nullable(number()).decode_value(&json!(2)), Ok(Some(2.0)));
}

#[test]
fn test_one_of_reports_every_alternative() {
    let decoder = one_of(vec![string(), number().map(|n| n.to_string())]);
    let err = decoder.decode_value(&json!(true)).unwrap_err();
    assert!(err.message().contains("I expected to find a string"));
    assert!(err.message().contains("I expected to find a number"));
}

#[test]
fn test_one_of_first_success_wins() {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let second = number().inspect(move |_| {
        hits.fetch_add(1, Ordering::Relaxed);
    });
    let decoder = one_of(vec![number(), second]);
    assert_eq!(decoder.decode_value(&json!(1)), Ok(1.0));
    assert_eq!(counter.load(Ordering::Relaxed), 0);
}

#[test]
fn test_at_reaches_nested_values() {
    let decoder = at(path!["a", "b"], string());
    assert_eq!(
        decoder.decode_value(&json!({"a": {"b": "x"}})),
        Ok("x".to_string())
    );

    let err = decoder.decode_value(&json!({"a": {}})).unwrap_err();
    assert!(err.message().contains(r#"["a","b"]"#));
}

#[test]
fn test_at_inner_errors_pass_through_without_path_context() {
    let decoder = at(path!["a"], number());
    let err = decoder.decode_value(&json!({"a": "nope"})).unwrap_err();
    assert_eq!(
        err.message(),
        r#"I expected to find a number but instead I found "nope""#
    );
}

#[test]
fn test_dict_and_key_value_pairs_preserve_key_order() {
    let input: Value = serde_json::from_str(r#"{"zebra": 1, "apple": 2, "mango": 3}"#).unwrap();

    let pairs = key_value_pairs(number()).decode_value(&input).unwrap();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);

    let map = dict(number()).decode_value(&input).unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    assert_eq!(map.get("apple"), Some(&2.0));
}

#[test]
fn test_decode_json_malformed_text() {
    let result = string().decode_json("{");
    let err = result.unwrap_err();
    assert!(!err.message().is_empty());

    assert!(number().decode_json("[1, 2,").is_err());
    assert!(boolean().decode_json("").is_err());
}

#[test]
fn test_map_err_composition_law() {
    let f = |e: DecodeError| DecodeError::new(format!("f({e})"));
    let g = |e: DecodeError| DecodeError::new(format!("g({e})"));

    let nested = fail::<f64>("base").map_err(f).map_err(g);
    let fused = fail::<f64>("base").map_err(move |e| g(f(e)));

    assert_eq!(
        nested.decode_value(&json!(null)),
        fused.decode_value(&json!(null))
    );
    assert_eq!(
        nested.decode_value(&json!(null)).unwrap_err().message(),
        "g(f(base))"
    );
}

#[test]
fn test_and_then_re_decodes_the_original_input() {
    // The chosen decoder sees the whole object again, not the version value.
    let decoder = field("version", number()).and_then(|version| {
        if version >= 2.0 {
            field("payload", string())
        } else {
            field("data", string())
        }
    });

    let v2 = json!({"version": 2, "payload": "current"});
    let v1 = json!({"version": 1, "data": "legacy"});
    assert_eq!(decoder.decode_value(&v2), Ok("current".to_string()));
    assert_eq!(decoder.decode_value(&v1), Ok("legacy".to_string()));

    let err = decoder
        .decode_value(&json!({"version": 2, "data": "wrong shape"}))
        .unwrap_err();
    assert!(err.message().contains("key 'payload'"));
}

#[test]
fn test_or_else_decodes_the_original_input() {
    let decoder = field("new_name", string()).or_else(|_| field("old_name", string()));
    assert_eq!(
        decoder.decode_value(&json!({"old_name": "legacy"})),
        Ok("legacy".to_string())
    );
}

#[test]
fn test_assign_builds_typed_records() {
    let decoder = succeed(Value::Null)
        .assign("name", field("name", string()))
        .assign("age", field("age", number()))
        .assign("admin", field("admin", boolean()))
        .materialize::<User>();

    let input = json!({"name": "Ada", "age": 36, "admin": true, "extra": "ignored"});
    assert_eq!(
        decoder.decode_value(&input),
        Ok(User {
            name: "Ada".to_string(),
            age: 36.0,
            admin: true,
        })
    );
}

#[test]
fn test_assign_fails_fast_on_missing_member() {
    let decoder = succeed(Value::Null)
        .assign("name", field("name", string()))
        .assign("age", field("age", number()));

    let err = decoder.decode_value(&json!({"name": "Ada"})).unwrap_err();
    assert!(err.message().contains("key 'age'"));
}

#[test]
fn test_assign_with_sees_the_scope_so_far() {
    let decoder = succeed(Value::Null)
        .assign("count", field("count", number()))
        .assign_with("doubled", |scope: &Value| {
            let count = scope["count"].as_f64().unwrap_or(0.0);
            succeed(count * 2.0)
        });

    let built = decoder.decode_value(&json!({"count": 4})).unwrap();
    assert_eq!(built["doubled"], json!(8.0));
}

#[test]
fn test_inspect_runs_on_success_only() {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let decoder = number().inspect(move |_| {
        hits.fetch_add(1, Ordering::Relaxed);
    });

    assert!(decoder.decode_value(&json!(1)).is_ok());
    assert!(decoder.decode_value(&json!("no")).is_err());
    assert_eq!(counter.load(Ordering::Relaxed), 1);
}

#[test]
fn test_inspect_err_runs_on_failure_only() {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let decoder = number().inspect_err(move |_| {
        hits.fetch_add(1, Ordering::Relaxed);
    });

    assert!(decoder.decode_value(&json!(1)).is_ok());
    assert!(decoder.decode_value(&json!("no")).is_err());
    assert_eq!(counter.load(Ordering::Relaxed), 1);

    // The diagnostic itself is untouched.
    let err = decoder.decode_value(&json!("no")).unwrap_err();
    assert!(err.message().starts_with("I expected to find a number"));
}

#[test]
fn test_standalone_callables() {
    let from_value = field("n", number()).to_value_fn();
    assert_eq!(from_value(&json!({"n": 9})), Ok(9.0));

    let from_json = field("n", number()).to_json_fn();
    assert_eq!(from_json(r#"{"n": 9}"#), Ok(9.0));
    assert!(from_json("{").is_err());
}

#[test]
fn test_date_decoder_accepts_strings_and_numbers() {
    use chrono::{TimeZone, Utc};

    let iso = date().decode_value(&json!("2020-01-02T03:04:05Z")).unwrap();
    assert_eq!(iso, Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap());

    let millis = date().decode_value(&json!(1_577_934_245_000i64)).unwrap();
    assert_eq!(millis, iso);

    let err = date().decode_value(&json!(true)).unwrap_err();
    assert_eq!(err.message(), "I expected a date but instead I found true");
}

#[test]
fn test_nested_structural_failure_keeps_inner_context() {
    let decoder = field("rows", array(field("id", number())));
    let input = json!({"rows": [{"id": 1}, {"id": "two"}]});
    let err = decoder.decode_value(&input).unwrap_err();

    assert!(err.message().contains("field named 'rows'"));
    assert!(err.message().contains("at [1]"));
    assert!(err.message().contains("field named 'id'"));
    assert!(err.message().contains("I expected to find a number"));
}

#[test]
fn test_decoder_reuse_across_inputs() {
    let decoder: Decoder<Vec<f64>> = array(number());
    for i in 0..10 {
        assert_eq!(decoder.decode_value(&json!([i])), Ok(vec![f64::from(i)]));
    }
}
