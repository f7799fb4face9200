//! Client library for submitting performance test results to a Datazilla server.
//!
//! Results are accumulated in a [`ResultStore`], handed to a
//! [`SubmissionContext`] together with the machine and build metadata of the
//! run, and posted as one JSON document per test suite. Requests are signed
//! with two-legged OAuth 1.0 when consumer credentials are configured and
//! sent as a plain form post otherwise.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dzclient::{ResultStore, RunMetadata, SubmissionContext, TransportConfig};
//!
//! # fn example() -> dzclient::prelude::Result<()> {
//! let config = TransportConfig::from_toml(
//!     r#"
//!     protocol = "https"
//!     host = "datazilla.mozilla.org"
//!     project = "talos"
//!     oauth_key = "key"
//!     oauth_secret = "secret"
//!     "#,
//! )?;
//!
//! let metadata = RunMetadata {
//!     machine_name: "qm-pxp01".into(),
//!     build_name: "Firefox".into(),
//!     revision: "785345035a3b".into(),
//!     branch: "Mozilla-Aurora".into(),
//!     ..Default::default()
//! };
//!
//! let mut results = ResultStore::new();
//! results.add_test_results("tp5", "google.com", [1200.0, 1180.0]);
//!
//! let mut context = SubmissionContext::new(config, metadata)?;
//! context.add_result(&results);
//! for response in context.submit()? {
//!     println!("{}", response.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A context is not synchronized internally. Share one between threads only
//! behind your own lock.

pub mod auth;
pub mod crypto;
pub mod dz_config;
pub mod dz_request;
pub mod dz_result;
pub mod error;
pub mod prelude;
pub mod requests;
pub mod wire;

pub use dz_config::{Protocol, TransportConfig};
pub use dz_request::{Document, MAX_REVISION_LENGTH, RunMetadata, SubmissionContext};
pub use dz_result::{ResultStore, TestSuite};
pub use requests::{ApiClient, LoadTestRequest, Response, Transport};
