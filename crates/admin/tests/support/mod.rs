#![forbid(unsafe_code)]
#![allow(dead_code)]

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core};
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::OnceLock;

pub(crate) const SECRET: &str = "test-secret-test-secret-test-secret";
pub(crate) const USERNAME: &str = "admin";
pub(crate) const PASSWORD: &str = "correct horse battery staple";

fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        Argon2::default()
            .hash_password(PASSWORD.as_bytes(), &salt)
            .expect("hash fixture password")
            .to_string()
    })
}

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    _storage: Option<tempfile::TempDir>,
    next_id: u64,
}

impl Server {
    pub(crate) fn start() -> Self {
        let storage = tempfile::tempdir().expect("temp storage dir");
        let mut server = Self::start_in(storage.path(), &[]);
        server._storage = Some(storage);
        server
    }

    pub(crate) fn start_in(storage_dir: &Path, extra_args: &[&str]) -> Self {
        Self::spawn(storage_dir, password_hash(), extra_args)
    }

    pub(crate) fn start_with_hash(storage_dir: &Path, phc: &str) -> Self {
        Self::spawn(storage_dir, phc, &[])
    }

    fn spawn(storage_dir: &Path, phc: &str, extra_args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_ts_admin"))
            .arg("--storage-dir")
            .arg(storage_dir)
            .env("TS_JWT_SECRET", SECRET)
            .env("TS_ADMIN_USERNAME", USERNAME)
            .env("TS_ADMIN_PASSWORD_HASH", phc)
            .env("RUST_LOG", "off")
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn ts_admin");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            _storage: None,
            next_id: 1,
        }
    }

    pub(crate) fn send_raw(&mut self, line: &str) {
        writeln!(self.stdin, "{line}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send_raw(&req.to_string());
        self.recv()
    }

    /// Sends `action` with a fresh request id and checks the id is echoed back.
    pub(crate) fn call(&mut self, action: &str, token: Option<&str>, args: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let resp = self.request(json!({
            "id": id,
            "action": action,
            "token": token,
            "args": args,
        }));
        assert_eq!(resp["id"], id, "response id must echo the request id");
        resp
    }

    pub(crate) fn login(&mut self) -> String {
        let resp = self.call(
            "auth.login",
            None,
            json!({ "username": USERNAME, "password": PASSWORD }),
        );
        assert_eq!(resp["success"], true, "login failed: {resp}");
        resp["result"]["token"]
            .as_str()
            .expect("result.token")
            .to_string()
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub(crate) fn ok_result(resp: &Value) -> &Value {
    assert_eq!(resp["success"], true, "expected success: {resp}");
    &resp["result"]
}

pub(crate) fn error_code(resp: &Value) -> &str {
    assert_eq!(resp["success"], false, "expected failure: {resp}");
    resp["error"]["code"].as_str().expect("error.code")
}

/// `(title_en, order)` pairs of a result's `items`, in list order.
pub(crate) fn titles_and_orders(result: &Value) -> Vec<(String, i64)> {
    result["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| {
            (
                item["title_en"].as_str().expect("title_en").to_string(),
                item["order"].as_i64().expect("order"),
            )
        })
        .collect()
}
