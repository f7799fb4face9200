//! Two-legged OAuth 1.0 request signing with HMAC-SHA1.
//!
//! Only the consumer credentials identify the caller; the token is present
//! with an empty key and secret. The signed parameters travel in the
//! form-encoded body of a POST request.
//!
//! # Examples
//!
//! ```rust
//! use dzclient::auth::oauth1::{Consumer, OAuthRequest, Stamp, Token};
//! use url::Url;
//!
//! let url = Url::parse("http://datazilla.mozilla.org/project/api/load_test").unwrap();
//! let request = OAuthRequest::new("POST", url)
//!     .stamped(&Stamp::new("46810593", 1342229050))
//!     .param("user", "project")
//!     .sign(&Consumer::new("oauth-key", "oauth-secret"), &Token::default())
//!     .unwrap();
//!
//! assert!(request.get("oauth_signature").is_some());
//! ```

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use url::Url;

use crate::{
    crypto::sha1::{body_hash, hmac_sha1},
    prelude::*,
};

pub const OAUTH_VERSION: &str = "1.0";
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

const SIGNATURE_PARAM: &str = "oauth_signature";

/// RFC 5849 section 3.6: everything but `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `value` for use in a signature or post body.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE).to_string()
}

/// OAuth consumer credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    pub key: String,
    pub secret: String,
}

impl Consumer {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Access token. Two-legged signing uses the empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub secret: String,
}

/// Nonce and timestamp of a single signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub nonce: String,
    pub timestamp: i64,
}

impl Stamp {
    pub fn new(nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
        }
    }

    /// Eight random digits and the current UNIX time.
    pub fn fresh() -> Self {
        let nonce = rand::thread_rng().gen_range(0..100_000_000u32);
        Self {
            nonce: format!("{nonce:08}"),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// A request whose parameters are signed with OAuth 1.0.
#[derive(Debug, Clone)]
pub struct OAuthRequest {
    method: String,
    url: Url,
    params: Vec<(String, String)>,
}

impl OAuthRequest {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into().to_uppercase(),
            url,
            params: Vec::new(),
        }
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    /// Adds `oauth_version`, `oauth_nonce` and `oauth_timestamp`.
    pub fn stamped(self, stamp: &Stamp) -> Self {
        self.param("oauth_version", OAUTH_VERSION)
            .param("oauth_nonce", stamp.nonce.as_str())
            .param("oauth_timestamp", stamp.timestamp.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: String, value: String) {
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key, value)),
        }
    }

    /// Scheme, host, non-default port and path of the request URL.
    pub fn normalized_url(&self) -> String {
        let mut normalized = format!(
            "{}://{}",
            self.url.scheme(),
            self.url.host_str().unwrap_or_default()
        );
        if let Some(port) = self.url.port() {
            let _ = write!(normalized, ":{port}");
        }
        normalized.push_str(self.url.path());
        normalized
    }

    fn encoded_params(&self, with_query: bool) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(k, _)| k != SIGNATURE_PARAM)
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();
        if with_query {
            pairs.extend(
                self.url
                    .query_pairs()
                    .map(|(k, v)| (encode(&k), encode(&v))),
            );
        }
        pairs.sort();
        pairs
    }

    fn join(pairs: &[(String, String)]) -> String {
        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Every parameter but `oauth_signature`, encoded, sorted and joined.
    pub fn normalized_parameters(&self) -> String {
        Self::join(&self.encoded_params(true))
    }

    pub fn signature_base_string(&self) -> String {
        format!(
            "{}&{}&{}",
            encode(&self.method),
            encode(&self.normalized_url()),
            encode(&self.normalized_parameters())
        )
    }

    /// Adds the consumer, token and body hash parameters, then the signature.
    ///
    /// The body hash covers the empty entity body, since the parameters
    /// themselves form the body.
    pub fn sign(mut self, consumer: &Consumer, token: &Token) -> Result<Self> {
        self.set("oauth_body_hash".into(), body_hash(b""));
        if self.get("oauth_consumer_key").is_none() {
            self.set("oauth_consumer_key".into(), consumer.key.clone());
        }
        if self.get("oauth_token").is_none() {
            self.set("oauth_token".into(), token.key.clone());
        }
        self.set("oauth_signature_method".into(), SIGNATURE_METHOD.into());

        let key = format!("{}&{}", encode(&consumer.secret), encode(&token.secret));
        let signature = hmac_sha1(key.as_bytes(), self.signature_base_string().as_bytes())?;
        self.set(SIGNATURE_PARAM.into(), signature);
        Ok(self)
    }

    /// Form body carrying every parameter, signature last.
    pub fn to_postdata(&self) -> String {
        let mut postdata = Self::join(&self.encoded_params(false));
        if let Some(signature) = self.get(SIGNATURE_PARAM) {
            if !postdata.is_empty() {
                postdata.push('&');
            }
            let _ = write!(postdata, "{SIGNATURE_PARAM}={}", encode(signature));
        }
        postdata
    }
}
