#![allow(dead_code)]

use dzclient::{
    ResultStore, RunMetadata, TransportConfig,
    dz_request::Document,
    prelude::*,
};
use url::form_urlencoded;

pub mod loopback;
pub mod transport;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn aurora_metadata() -> RunMetadata {
    RunMetadata {
        machine_name: String::from("qm-pxp01"),
        os: String::from("linux"),
        os_version: String::from("Ubuntu 11.10"),
        platform: String::from("x86_64"),
        build_name: String::from("Firefox"),
        version: String::from("14.0a2"),
        revision: String::from("785345035a3b"),
        branch: String::from("Mozilla-Aurora"),
        id: String::from("20120228122102"),
        test_date: None,
    }
}

pub fn unsigned_config() -> TransportConfig {
    TransportConfig::new("http", "host", "project").expect("valid protocol")
}

pub fn signed_config() -> TransportConfig {
    TransportConfig::new("http", "datazilla.mozilla.org", "project")
        .expect("valid protocol")
        .with_oauth("oauth-key", "oauth-secret")
}

pub fn two_suites() -> ResultStore {
    let mut store = ResultStore::new();
    store.add_test_results("suite1", "test1", [1.0]);
    store.add_test_results("suite2", "test2", [2.0]);
    store
}

/// Value of `key` in a form-encoded body.
pub fn form_value(body: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(body.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Recovers the document from an unsigned `data=<json>` body.
pub fn unsigned_document(body: &str) -> Result<Document> {
    let json = form_value(body, "data").unwrap_or_default();
    Ok(serde_json::from_str(&json)?)
}

/// Recovers the document from a signed body, where `data` is quoted twice.
pub fn signed_document(body: &str) -> Result<Document> {
    let quoted = form_value(body, "data").unwrap_or_default();
    let json = percent_encoding::percent_decode_str(&quoted).decode_utf8_lossy();
    Ok(serde_json::from_str(&json)?)
}
