#![forbid(unsafe_code)]

use crate::*;
use serde_json::{Value, json};
use tracing::{info, warn};

impl AdminServer {
    pub(crate) fn action_auth_login(&mut self, args: Value) -> Value {
        let args = match args_object(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let username = match require_string(&args, "username") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let password = match require_string(&args, "password") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        if let Err(err) = self.credentials.check(&username, &password) {
            warn!(username = %username, code = err.code(), "login refused");
            return auth_error(&err);
        }
        info!(username = %username, "admin signed in");
        admin_ok("auth.login", self.issue_token(&username))
    }

    /// Checks the request token, or `args.token` when the caller passes one explicitly.
    pub(crate) fn action_auth_verify(&mut self, token: Option<&str>, args: Value) -> Value {
        let args = match args_object(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let explicit = match optional_string(&args, "token") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        match self.authorize(explicit.as_deref().or(token)) {
            Ok(claims) => admin_ok("auth.verify", json!({ "valid": true, "claims": claims })),
            Err(err) => auth_error(&err),
        }
    }
}
