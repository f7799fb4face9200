pub mod sha1;
pub mod sha256;
