#![forbid(unsafe_code)]

use super::invalid_input;
use serde_json::{Map, Value};

pub(crate) type Args = Map<String, Value>;

pub(crate) fn args_object(args: Value) -> Result<Args, Value> {
    match args {
        Value::Null => Ok(Map::new()),
        Value::Object(obj) => Ok(obj),
        _ => Err(invalid_input("args must be an object")),
    }
}

pub(crate) fn require_string(args: &Args, key: &str) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(invalid_input(&format!("{key} is required")));
    };
    Ok(v.to_string())
}

pub(crate) fn optional_string(args: &Args, key: &str) -> Result<Option<String>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.to_string())),
        Some(_) => Err(invalid_input(&format!("{key} must be a string"))),
    }
}

/// `Some(None)` when the key is present and null, so callers can clear a field.
pub(crate) fn optional_nullable_string(
    args: &Args,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    match args.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(invalid_input(&format!("{key} must be a string or null"))),
    }
}

pub(crate) fn optional_i64(args: &Args, key: &str) -> Result<Option<i64>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| invalid_input(&format!("{key} must be an integer"))),
    }
}

pub(crate) fn require_i64(args: &Args, key: &str) -> Result<i64, Value> {
    optional_i64(args, key)?.ok_or_else(|| invalid_input(&format!("{key} is required")))
}

pub(crate) fn optional_usize(args: &Args, key: &str) -> Result<Option<usize>, Value> {
    match optional_i64(args, key)? {
        None => Ok(None),
        Some(v) => usize::try_from(v)
            .map(Some)
            .map_err(|_| invalid_input(&format!("{key} must be non-negative"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Args {
        args_object(value).expect("object")
    }

    #[test]
    fn integers_reject_other_types() {
        let args = obj(json!({ "to": "2", "from": 1.5, "ok": 3 }));
        assert!(optional_i64(&args, "to").is_err());
        assert!(optional_i64(&args, "from").is_err());
        assert_eq!(optional_i64(&args, "ok"), Ok(Some(3)));
        assert_eq!(optional_i64(&args, "missing"), Ok(None));
        assert!(require_i64(&args, "missing").is_err());
    }

    #[test]
    fn nullable_strings_distinguish_absent_from_null() {
        let args = obj(json!({ "body_en": null, "link_url": "https://x" }));
        assert_eq!(optional_nullable_string(&args, "body_en"), Ok(Some(None)));
        assert_eq!(
            optional_nullable_string(&args, "link_url"),
            Ok(Some(Some("https://x".to_string())))
        );
        assert_eq!(optional_nullable_string(&args, "media_url"), Ok(None));
    }

    #[test]
    fn args_must_be_an_object_or_null() {
        assert!(args_object(json!([1, 2])).is_err());
        assert!(args_object(Value::Null).expect("null").is_empty());
    }
}
