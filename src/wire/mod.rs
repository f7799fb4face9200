//! Request body encodings.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

pub mod json;

pub use json::to_json_text;

/// Content type of every submission.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Characters left alone when quoting the JSON text for a signed request.
const DATA_QUOTE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/');

/// Quotes JSON text for the `data` parameter of a signed request.
///
/// The result is encoded a second time as an OAuth parameter, so the server
/// sees the quoted form after form decoding.
pub fn quote_data(json: &str) -> String {
    utf8_percent_encode(json, DATA_QUOTE).to_string()
}

/// `data=<json>` as an `application/x-www-form-urlencoded` body.
pub fn form_body(json: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("data", json)
        .finish()
}
