#![forbid(unsafe_code)]

mod jwt;
mod login;

pub(crate) use jwt::*;
pub(crate) use login::*;

/// The only role allowed to call collection actions.
pub(crate) const ADMIN_ROLE: &str = "admin";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AuthError {
    #[error("token is missing")]
    MissingToken,
    #[error("token is malformed")]
    Malformed,
    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("token signature does not match")]
    BadSignature,
    #[error("token expired at {exp}")]
    Expired { exp: u64 },
    #[error("token issued in the future (iat={iat})")]
    NotYetValid { iat: u64 },
    #[error("role {0:?} may not administer content")]
    Forbidden(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("login is not configured on this server")]
    LoginDisabled,
}

impl AuthError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::LoginDisabled => "LOGIN_DISABLED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Expired { .. } => "TOKEN_EXPIRED",
            _ => "UNAUTHORIZED",
        }
    }

    pub(crate) fn recovery(&self) -> &'static str {
        match self {
            Self::LoginDisabled => {
                "Set admin_password_hash (see --hash-password) in the server configuration to enable auth.login."
            }
            Self::InvalidCredentials => "Check the username and password, then retry auth.login.",
            Self::Forbidden(_) => "Sign in with an admin account.",
            _ => "Call auth.login to obtain a fresh token and resend it in the token field.",
        }
    }
}
