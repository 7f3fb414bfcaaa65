#![forbid(unsafe_code)]

use crate::auth::{AuthError, Claims};
use crate::handlers::{dispatch_handler, is_public_action};
use crate::*;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

#[derive(Deserialize)]
struct AdminRequest {
    #[serde(default)]
    id: Value,
    action: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    args: Value,
}

impl AdminServer {
    pub(crate) fn handle_line(&mut self, line: &str) -> Value {
        match serde_json::from_str::<Value>(line) {
            Ok(request) => self.handle_request(request),
            Err(err) => with_request_id(
                Value::Null,
                admin_error_with(
                    "PARSE_ERROR",
                    CLASS_PROTOCOL,
                    &format!("request is not valid JSON: {err}"),
                    Some("Send exactly one JSON object per line."),
                ),
            ),
        }
    }

    pub(crate) fn handle_request(&mut self, request: Value) -> Value {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let request = match serde_json::from_value::<AdminRequest>(request) {
            Ok(v) => v,
            Err(err) => {
                return with_request_id(
                    id,
                    admin_error_with(
                        "INVALID_REQUEST",
                        CLASS_PROTOCOL,
                        &format!("malformed request: {err}"),
                        Some("Requests need an action string plus optional id, token and args."),
                    ),
                );
            }
        };
        let response = self.route(request.action, request.token, request.args);
        with_request_id(request.id, response)
    }

    fn route(&mut self, action: String, token: Option<String>, args: Value) -> Value {
        let subject = if is_public_action(&action) {
            None
        } else {
            match self.authorize(token.as_deref()) {
                Ok(claims) => Some(claims.sub),
                Err(err) => {
                    warn!(action = %action, code = err.code(), "request rejected: {err}");
                    return auth_error(&err);
                }
            }
        };

        let response = dispatch_handler(self, &action, token.as_deref(), args).unwrap_or_else(|| {
            admin_error_with(
                "UNKNOWN_ACTION",
                CLASS_PROTOCOL,
                &format!("unknown action: {action}"),
                Some("Call help for the list of supported actions."),
            )
        });

        match response.get("error").and_then(|e| e.get("code")).and_then(|c| c.as_str()) {
            Some(code) => warn!(action = %action, sub = ?subject, code, "action failed"),
            None => debug!(action = %action, sub = ?subject, "action ok"),
        }
        response
    }

    pub(crate) fn authorize(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token, now_secs())
    }

    pub(crate) fn issue_token(&self, subject: &str) -> Value {
        let (token, claims) = self.tokens.issue(subject, now_secs());
        json!({
            "token": token,
            "token_type": "Bearer",
            "expires_in": self.tokens.ttl_secs(),
            "claims": claims,
        })
    }
}
