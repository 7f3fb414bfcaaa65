#![forbid(unsafe_code)]

use crate::auth::check_password_hash;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub(crate) const DEFAULT_STORAGE_DIR: &str = ".techstart";
pub(crate) const DEFAULT_TOKEN_TTL_SECS: u64 = 8 * 60 * 60;
pub(crate) const DEFAULT_TOKEN_LEEWAY_SECS: u64 = 30;
pub(crate) const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub(crate) const MIN_SECRET_BYTES: usize = 32;

/// Admin process for the Tech Start ordered collections.
///
/// Reads one JSON request per line on stdin and answers one JSON envelope per line on stdout.
#[derive(Parser, Debug, Default)]
#[command(name = "ts_admin", version)]
pub(crate) struct Cli {
    /// TOML file with defaults for every option below.
    #[arg(long, env = "TS_ADMIN_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Directory holding the SQLite database.
    #[arg(long, env = "TS_STORAGE_DIR")]
    pub(crate) storage_dir: Option<PathBuf>,

    /// HS256 signing secret (at least 32 bytes).
    #[arg(long, env = "TS_JWT_SECRET", hide_env_values = true)]
    pub(crate) jwt_secret: Option<String>,

    #[arg(long, env = "TS_TOKEN_TTL_SECS")]
    pub(crate) token_ttl_secs: Option<u64>,

    #[arg(long, env = "TS_TOKEN_LEEWAY_SECS")]
    pub(crate) token_leeway_secs: Option<u64>,

    #[arg(long, env = "TS_ADMIN_USERNAME")]
    pub(crate) admin_username: Option<String>,

    /// Argon2 PHC string of the admin password; login stays disabled without it.
    #[arg(long, env = "TS_ADMIN_PASSWORD_HASH", hide_env_values = true)]
    pub(crate) admin_password_hash: Option<String>,

    /// Default level when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, env = "TS_LOG_LEVEL")]
    pub(crate) log_level: Option<String>,

    #[arg(long, env = "TS_LOG_JSON", num_args = 0..=1, default_missing_value = "true")]
    pub(crate) log_json: Option<bool>,

    /// Print the Argon2 PHC string for PASSWORD and exit.
    #[arg(long, value_name = "PASSWORD")]
    pub(crate) hash_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    storage_dir: Option<PathBuf>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    token_leeway_secs: Option<u64>,
    admin_username: Option<String>,
    admin_password_hash: Option<String>,
    log_level: Option<String>,
    log_json: Option<bool>,
}

impl FileConfig {
    pub(crate) fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("jwt_secret is required")]
    MissingSecret,
    #[error("jwt_secret must be at least {min} bytes (got {len})", min = MIN_SECRET_BYTES)]
    WeakSecret { len: usize },
    #[error("token_ttl_secs must be positive")]
    ZeroTtl,
    #[error("admin_username must not be empty")]
    EmptyUsername,
    #[error("admin_password_hash must be an Argon2 PHC string")]
    BadPasswordHash,
    #[error("unknown log level: {0}")]
    BadLogLevel(String),
}

#[derive(Clone, Debug)]
pub(crate) struct AdminConfig {
    pub(crate) storage_dir: PathBuf,
    pub(crate) jwt_secret: String,
    pub(crate) token_ttl_secs: u64,
    pub(crate) token_leeway_secs: u64,
    pub(crate) admin_username: String,
    pub(crate) admin_password_hash: Option<String>,
    pub(crate) log_level: tracing::Level,
    pub(crate) log_json: bool,
}

impl AdminConfig {
    pub(crate) fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = match cli.config.as_deref() {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Flags and environment (already folded together by clap) win over the file.
    pub(crate) fn merge(cli: Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let jwt_secret = cli
            .jwt_secret
            .or(file.jwt_secret)
            .ok_or(ConfigError::MissingSecret)?;
        if jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret {
                len: jwt_secret.len(),
            });
        }

        let token_ttl_secs = cli
            .token_ttl_secs
            .or(file.token_ttl_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if token_ttl_secs == 0 {
            return Err(ConfigError::ZeroTtl);
        }

        let admin_username = cli
            .admin_username
            .or(file.admin_username)
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        if admin_username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        let admin_password_hash = cli
            .admin_password_hash
            .or(file.admin_password_hash)
            .map(|raw| raw.trim().to_string());
        if let Some(phc) = admin_password_hash.as_deref() {
            check_password_hash(phc).map_err(|_| ConfigError::BadPasswordHash)?;
        }

        let log_level_raw = cli
            .log_level
            .or(file.log_level)
            .unwrap_or_else(|| "info".to_string());
        let log_level = tracing::Level::from_str(log_level_raw.trim())
            .map_err(|_| ConfigError::BadLogLevel(log_level_raw.clone()))?;

        Ok(Self {
            storage_dir: cli
                .storage_dir
                .or(file.storage_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
            jwt_secret,
            token_ttl_secs,
            token_leeway_secs: cli
                .token_leeway_secs
                .or(file.token_leeway_secs)
                .unwrap_or(DEFAULT_TOKEN_LEEWAY_SECS),
            admin_username,
            admin_password_hash,
            log_level,
            log_json: cli.log_json.or(file.log_json).unwrap_or(false),
        })
    }
}
