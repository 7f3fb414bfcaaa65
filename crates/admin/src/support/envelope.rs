#![forbid(unsafe_code)]

use crate::auth::AuthError;
use serde_json::{Value, json};
use ts_storage::StoreError;

pub(crate) const CLASS_PROTOCOL: &str = "protocol";
pub(crate) const CLASS_UNAUTHORIZED: &str = "unauthorized";
pub(crate) const CLASS_VALIDATION: &str = "validation_failure";

pub(crate) fn warning(code: &str, message: &str, recovery: &str) -> Value {
    json!({
        "code": code,
        "message": message,
        "recovery": recovery
    })
}

pub(crate) fn admin_ok_with_warnings(intent: &str, result: Value, warnings: Vec<Value>) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "warnings": warnings,
        "error": null
    })
}

pub(crate) fn admin_ok(intent: &str, result: Value) -> Value {
    admin_ok_with_warnings(intent, result, Vec::new())
}

pub(crate) fn admin_error_with(
    code: &str,
    class: &str,
    message: &str,
    recovery: Option<&str>,
) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert("class".to_string(), Value::String(class.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert(
            "recovery".to_string(),
            Value::String(recovery.trim().to_string()),
        );
    }

    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "warnings": [],
        "error": Value::Object(error_obj)
    })
}

/// Argument problems caught before the store is touched.
pub(crate) fn invalid_input(message: &str) -> Value {
    admin_error_with("INVALID_INPUT", CLASS_VALIDATION, message, None)
}

fn store_recovery(err: &StoreError) -> &'static str {
    match err {
        StoreError::UnknownId => {
            "Re-fetch the list: the item was removed or belongs to another scope."
        }
        StoreError::UnknownScope => "Re-fetch the parent collection: the parent record is gone.",
        StoreError::OrderOutOfRange { .. } => {
            "Pick a target order between 0 and the sibling count minus one."
        }
        StoreError::StaleOrder { .. } | StoreError::RevisionMismatch { .. } => {
            "Re-fetch the list, redisplay the stored order and retry from there."
        }
        StoreError::InvalidInput(msg) if msg.starts_with("RESET_REQUIRED") => {
            "Point storage_dir at an empty directory or remove the foreign database."
        }
        StoreError::InvalidInput(_) => "Fix the request arguments and retry.",
        StoreError::Io(_) | StoreError::Sql(_) => {
            "Nothing was saved: redisplay the prior order and retry later."
        }
    }
}

pub(crate) fn store_error(err: &StoreError) -> Value {
    admin_error_with(
        err.code(),
        err.class().as_str(),
        &err.to_string(),
        Some(store_recovery(err)),
    )
}

pub(crate) fn auth_error(err: &AuthError) -> Value {
    admin_error_with(
        err.code(),
        CLASS_UNAUTHORIZED,
        &err.to_string(),
        Some(err.recovery()),
    )
}

/// Echoes the caller's request id onto a response envelope.
pub(crate) fn with_request_id(id: Value, mut response: Value) -> Value {
    if let Some(obj) = response.as_object_mut() {
        obj.insert("id".to_string(), id);
    }
    response
}
