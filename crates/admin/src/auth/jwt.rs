#![forbid(unsafe_code)]

use super::{ADMIN_ROLE, AuthError};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALG_HS256: &str = "HS256";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) role: String,
    pub(crate) iat: u64,
    pub(crate) exp: u64,
}

#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Issues and checks compact HS256 tokens with a single shared secret.
#[derive(Clone)]
pub(crate) struct TokenAuthority {
    mac: HmacSha256,
    ttl_secs: u64,
    leeway_secs: u64,
}

impl TokenAuthority {
    pub(crate) fn new(
        secret: &[u8],
        ttl_secs: u64,
        leeway_secs: u64,
    ) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret)?,
            ttl_secs,
            leeway_secs,
        })
    }

    pub(crate) fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub(crate) fn issue(&self, subject: &str, now_secs: u64) -> (String, Claims) {
        let claims = Claims {
            sub: subject.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now_secs,
            exp: now_secs.saturating_add(self.ttl_secs),
        };
        let header = json!({ "alg": ALG_HS256, "typ": "JWT" }).to_string();
        let payload = json!({
            "sub": claims.sub,
            "role": claims.role,
            "iat": claims.iat,
            "exp": claims.exp,
        })
        .to_string();

        let signing_input = format!(
            "{}.{}",
            Base64UrlUnpadded::encode_string(header.as_bytes()),
            Base64UrlUnpadded::encode_string(payload.as_bytes())
        );
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let token = format!(
            "{signing_input}.{}",
            Base64UrlUnpadded::encode_string(&signature)
        );
        (token, claims)
    }

    /// Pure check of a token against the secret and the supplied clock.
    pub(crate) fn verify(&self, token: &str, now_secs: u64) -> Result<Claims, AuthError> {
        let mut parts = token.trim().split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Malformed);
        };

        let header: Header = decode_json(header_b64)?;
        if header.alg != ALG_HS256 {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let signature =
            Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| AuthError::Malformed)?;
        let mut mac = self.mac.clone();
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims: Claims = decode_json(payload_b64)?;
        if now_secs > claims.exp.saturating_add(self.leeway_secs) {
            return Err(AuthError::Expired { exp: claims.exp });
        }
        if claims.iat > now_secs.saturating_add(self.leeway_secs) {
            return Err(AuthError::NotYetValid { iat: claims.iat });
        }
        if claims.role != ADMIN_ROLE {
            return Err(AuthError::Forbidden(claims.role));
        }
        Ok(claims)
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = Base64UrlUnpadded::decode_vec(segment).map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)
}
