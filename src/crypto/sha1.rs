//! SHA-1 primitives used by OAuth 1.0 signing.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};

use crate::prelude::*;

type HmacSha1 = Hmac<Sha1>;

/// Base64 of the SHA-1 digest of `body`.
pub fn body_hash(body: &[u8]) -> String {
    STANDARD.encode(Sha1::digest(body))
}

/// Base64 of HMAC-SHA1 over `message` keyed with `key`.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(key).map_err(|_| Error::SigningKey)?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
