#![forbid(unsafe_code)]

use super::AuthError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

/// Hashes a password into an Argon2id PHC string suitable for `admin_password_hash`.
pub(crate) fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Rejects settings that are not a parseable PHC string.
pub(crate) fn check_password_hash(phc: &str) -> Result<(), argon2::password_hash::Error> {
    PasswordHash::new(phc).map(|_| ())
}

pub(crate) struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    pub(crate) fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    pub(crate) fn check(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let Some(phc) = self.password_hash.as_deref() else {
            return Err(AuthError::LoginDisabled);
        };
        let parsed = PasswordHash::new(phc).map_err(|_| AuthError::InvalidCredentials)?;
        // The password is verified before the username is looked at, so both paths cost the same.
        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        let username_ok = username == self.username;
        if password_ok && username_ok {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(password: &str) -> AdminCredentials {
        AdminCredentials::new("admin", Some(hash_password(password).expect("hash")))
    }

    #[test]
    fn matching_credentials_pass() {
        let creds = credentials("hunter22");
        assert_eq!(creds.check("admin", "hunter22"), Ok(()));
    }

    #[test]
    fn wrong_user_or_password_fail_alike() {
        let creds = credentials("hunter22");
        assert_eq!(
            creds.check("admin", "hunter23"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            creds.check("root", "hunter22"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn hashes_are_salted_argon2id() {
        let first = hash_password("hunter22").expect("hash");
        let second = hash_password("hunter22").expect("hash");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(check_password_hash(&first).is_ok());
        assert!(check_password_hash(&"ab".repeat(32)).is_err());
    }

    #[test]
    fn missing_hash_disables_login() {
        let creds = AdminCredentials::new("admin", None);
        assert_eq!(creds.check("admin", ""), Err(AuthError::LoginDisabled));
    }
}
