//! Building and submitting per-suite datasets.
//!
//! A [`SubmissionContext`] owns the metadata of one test run and a
//! [`ResultStore`] that accumulates its results. Every suite of the store
//! becomes an independent [`Document`], posted in its own request.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    auth::oauth1::{OAuthRequest, Stamp, Token},
    crypto::sha256::generate_hash,
    dz_config::TransportConfig,
    dz_result::ResultStore,
    prelude::*,
    requests::{ApiClient, LoadTestRequest, Response, Transport},
    wire::{FORM_CONTENT_TYPE, form_body, quote_data, to_json_text},
};

pub mod document;

pub use document::{Document, TestBuild, TestMachine, TestRun};

/// Longest revision, in characters, the server accepts.
pub const MAX_REVISION_LENGTH: usize = 16;

/// Machine and build information describing a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub machine_name: String,
    pub os: String,
    pub os_version: String,
    pub platform: String,
    pub build_name: String,
    pub version: String,
    pub revision: String,
    pub branch: String,
    pub id: String,
    /// UNIX time of the run. `None` means "when the context is created".
    pub test_date: Option<i64>,
}

impl RunMetadata {
    /// Fails on the first required field that is empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("branch", &self.branch),
            ("build_name", &self.build_name),
            ("revision", &self.revision),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::MissingMetadata(*field)),
            None => Ok(()),
        }
    }

    fn test_machine(&self) -> TestMachine {
        TestMachine {
            name: self.machine_name.clone(),
            os: self.os.clone(),
            osversion: self.os_version.clone(),
            platform: self.platform.clone(),
        }
    }

    fn test_build(&self) -> TestBuild {
        TestBuild {
            name: self.build_name.clone(),
            version: self.version.clone(),
            revision: self.revision.chars().take(MAX_REVISION_LENGTH).collect(),
            branch: self.branch.clone(),
            id: self.id.clone(),
        }
    }
}

/// Accumulates results for one run and submits them suite by suite.
///
/// Not synchronized: concurrent mutation must be guarded by the caller.
#[derive(Debug)]
pub struct SubmissionContext<T: Transport = ApiClient> {
    config: TransportConfig,
    metadata: RunMetadata,
    test_date: i64,
    results: ResultStore,
    transport: T,
}

impl SubmissionContext<ApiClient> {
    /// Creates a context posting over HTTP with [`ApiClient`].
    pub fn new(config: TransportConfig, metadata: RunMetadata) -> Result<Self> {
        Self::with_transport(config, metadata, ApiClient::new()?)
    }
}

impl<T: Transport> SubmissionContext<T> {
    /// Creates a context sending through `transport`.
    ///
    /// In strict mode, metadata missing a branch, build name or revision is
    /// rejected.
    pub fn with_transport(
        config: TransportConfig,
        metadata: RunMetadata,
        transport: T,
    ) -> Result<Self> {
        if config.strict {
            metadata.validate()?;
        }
        let test_date = metadata
            .test_date
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        Ok(Self {
            config,
            metadata,
            test_date,
            results: ResultStore::new(),
            transport,
        })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    pub fn test_date(&self) -> i64 {
        self.test_date
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Direct access to the owned store, for adding results in place.
    pub fn results_mut(&mut self) -> &mut ResultStore {
        &mut self.results
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Joins `store` into the owned results.
    pub fn add_result(&mut self, store: &ResultStore) {
        self.results.join_results(store);
    }

    /// One document per suite of the main results, in suite name order.
    ///
    /// Suites that only have auxiliary, xperf or option data are skipped.
    pub fn build_datasets(&self) -> Vec<Document> {
        let test_machine = self.metadata.test_machine();
        let test_build = self.metadata.test_build();

        self.results
            .results()
            .iter()
            .map(|(suite, results)| Document {
                test_machine: test_machine.clone(),
                test_build: test_build.clone(),
                testrun: TestRun {
                    date: self.test_date,
                    suite: suite.clone(),
                    options: self
                        .results
                        .options()
                        .get(suite)
                        .filter(|options| !options.is_empty())
                        .cloned(),
                },
                results: results.clone(),
                results_aux: self
                    .results
                    .auxiliary_results()
                    .get(suite)
                    .filter(|aux| !aux.is_empty())
                    .cloned(),
                results_xperf: self
                    .results
                    .xperf_results()
                    .get(suite)
                    .filter(|xperf| !xperf.is_empty())
                    .cloned(),
            })
            .collect()
    }

    /// Sends every dataset in order and returns the responses in the same order.
    ///
    /// Stops at the first failed send. The error is
    /// [`Error::Submission`], carrying the responses received before it.
    pub fn submit(&self) -> Result<Vec<Response>> {
        let datasets = self.build_datasets();
        let total = datasets.len();
        let mut responses = Vec::with_capacity(total);

        for dataset in &datasets {
            info!(suite = %dataset.testrun.suite, "Submitting dataset");
            match self.send(dataset) {
                Ok(response) => responses.push(response),
                Err(err) => {
                    error!(
                        suite = %dataset.testrun.suite,
                        sent = responses.len(),
                        total,
                        "Submission aborted: {err}"
                    );
                    return Err(Error::Submission {
                        completed: responses,
                        total,
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(responses)
    }

    /// Sends one document, signed with a fresh nonce and timestamp when
    /// credentials are configured.
    pub fn send<D: Serialize + ?Sized>(&self, document: &D) -> Result<Response> {
        let request = self.load_test_request(document, &Stamp::fresh())?;
        self.transport.send(&request)
    }

    /// Builds the request `send` would post for `document` with `stamp`.
    ///
    /// The stamp is ignored for unsigned requests.
    pub fn load_test_request<D: Serialize + ?Sized>(
        &self,
        document: &D,
        stamp: &Stamp,
    ) -> Result<LoadTestRequest> {
        let url = self.config.endpoint()?;
        let json = to_json_text(document)?;

        let body = match self.config.credentials() {
            Some(consumer) => OAuthRequest::new("POST", url.clone())
                .stamped(stamp)
                .param("user", self.config.project.as_str())
                .param("data", quote_data(&json))
                .sign(&consumer, &Token::default())?
                .to_postdata(),
            None => form_body(&json),
        };

        let fingerprint = generate_hash(&json);
        debug!(
            %url,
            signed = self.config.credentials().is_some(),
            %fingerprint,
            "Built load test request"
        );
        Ok(LoadTestRequest {
            url,
            content_type: FORM_CONTENT_TYPE,
            body,
        })
    }
}
