#![forbid(unsafe_code)]

mod auth;
mod config;
mod entry;
mod handlers;
mod logging;
mod server;
mod support;

pub(crate) use support::*;

use anyhow::Context;
use clap::Parser;
use auth::{AdminCredentials, TokenAuthority};
use ts_storage::SqliteStore;

pub(crate) struct AdminServer {
    store: SqliteStore,
    tokens: TokenAuthority,
    credentials: AdminCredentials,
}

impl AdminServer {
    fn new(store: SqliteStore, tokens: TokenAuthority, credentials: AdminCredentials) -> Self {
        Self {
            store,
            tokens,
            credentials,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();
    if let Some(password) = cli.hash_password.as_deref() {
        let phc = auth::hash_password(password)
            .map_err(|err| anyhow::anyhow!("hashing password: {err}"))?;
        println!("{phc}");
        return Ok(());
    }

    let config = config::AdminConfig::load(cli)?;
    logging::init_logging(&logging::LogConfig {
        level: config.log_level,
        json: config.log_json,
    })?;

    let store = SqliteStore::open(&config.storage_dir).with_context(|| {
        format!("opening store in {}", config.storage_dir.display())
    })?;
    let tokens = TokenAuthority::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_secs,
        config.token_leeway_secs,
    )
    .map_err(|_| anyhow::anyhow!("jwt_secret cannot key HMAC-SHA256"))?;
    let credentials = AdminCredentials::new(
        config.admin_username.clone(),
        config.admin_password_hash.clone(),
    );

    tracing::info!(
        db = %store.db_path().display(),
        login_enabled = config.admin_password_hash.is_some(),
        "ts_admin ready"
    );

    let mut server = AdminServer::new(store, tokens, credentials);
    entry::run_stdio(&mut server)?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
