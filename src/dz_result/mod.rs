//! Accumulation of test results grouped by suite and test name.
//!
//! A [`ResultStore`] holds four independent channels keyed by suite name:
//! the main results, auxiliary results, xperf results and per-suite options.
//! Samples are only ever appended, so adding or joining results never loses
//! data that was already recorded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Samples for each test of a suite: `{"testname": [values], ...}`.
pub type SuiteResults = BTreeMap<String, Vec<f64>>;

/// Free-form scalar options attached to a suite.
pub type SuiteOptions = BTreeMap<String, serde_json::Value>;

/// The four per-suite collections, used to initialize a suite wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub results: SuiteResults,
    pub auxiliary_results: SuiteResults,
    pub xperf_results: SuiteResults,
    pub options: SuiteOptions,
}

/// Test results keyed by suite name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultStore {
    results: BTreeMap<String, SuiteResults>,
    #[serde(default)]
    auxiliary_results: BTreeMap<String, SuiteResults>,
    #[serde(default)]
    xperf_results: BTreeMap<String, SuiteResults>,
    #[serde(default)]
    options: BTreeMap<String, SuiteOptions>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an existing `{"suite": {"test": [values]}}` mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dzclient::ResultStore;
    ///
    /// let mut suite = BTreeMap::new();
    /// suite.insert("test".to_string(), vec![1.0, 2.0, 3.0]);
    /// let mut results = BTreeMap::new();
    /// results.insert("suite".to_string(), suite);
    ///
    /// let store = ResultStore::from_results(results.clone());
    /// assert_eq!(store.results(), &results);
    /// ```
    pub fn from_results(results: BTreeMap<String, SuiteResults>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn results(&self) -> &BTreeMap<String, SuiteResults> {
        &self.results
    }

    pub fn auxiliary_results(&self) -> &BTreeMap<String, SuiteResults> {
        &self.auxiliary_results
    }

    pub fn xperf_results(&self) -> &BTreeMap<String, SuiteResults> {
        &self.xperf_results
    }

    pub fn options(&self) -> &BTreeMap<String, SuiteOptions> {
        &self.options
    }

    /// True when no channel holds any suite.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
            && self.auxiliary_results.is_empty()
            && self.xperf_results.is_empty()
            && self.options.is_empty()
    }

    /// Sets all four collections of `suite_name`, replacing whatever the
    /// suite held before.
    pub fn add_test_suite(&mut self, suite_name: impl Into<String>, suite: TestSuite) {
        let suite_name = suite_name.into();
        self.results.insert(suite_name.clone(), suite.results);
        self.auxiliary_results
            .insert(suite_name.clone(), suite.auxiliary_results);
        self.xperf_results
            .insert(suite_name.clone(), suite.xperf_results);
        self.options.insert(suite_name, suite.options);
    }

    /// Appends `values` to the samples of `suite_name`/`test_name`.
    pub fn add_test_results<I>(&mut self, suite_name: &str, test_name: &str, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        append(&mut self.results, suite_name, test_name, values);
    }

    /// Appends `values` to the auxiliary channel `aux_name` of `suite_name`.
    pub fn add_auxiliary_results<I>(&mut self, suite_name: &str, aux_name: &str, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        append(&mut self.auxiliary_results, suite_name, aux_name, values);
    }

    /// Appends `values` to the xperf channel `counter_name` of `suite_name`.
    pub fn add_xperf_results<I>(&mut self, suite_name: &str, counter_name: &str, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        append(&mut self.xperf_results, suite_name, counter_name, values);
    }

    /// Merges `other` into this store.
    ///
    /// Samples of `other` land after the samples already present for the
    /// same suite and test. Options of `other` overwrite options with the
    /// same name.
    pub fn join_results(&mut self, other: &ResultStore) {
        join_channel(&mut self.results, &other.results);
        join_channel(&mut self.auxiliary_results, &other.auxiliary_results);
        join_channel(&mut self.xperf_results, &other.xperf_results);

        for (suite_name, options) in &other.options {
            self.options
                .entry(suite_name.clone())
                .or_default()
                .extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
}

fn append<I>(
    channel: &mut BTreeMap<String, SuiteResults>,
    suite_name: &str,
    name: &str,
    values: I,
) where
    I: IntoIterator<Item = f64>,
{
    channel
        .entry(suite_name.to_string())
        .or_default()
        .entry(name.to_string())
        .or_default()
        .extend(values);
}

fn join_channel(
    channel: &mut BTreeMap<String, SuiteResults>,
    other: &BTreeMap<String, SuiteResults>,
) {
    for (suite_name, tests) in other {
        let suite = channel.entry(suite_name.clone()).or_default();
        for (test_name, values) in tests {
            suite
                .entry(test_name.clone())
                .or_default()
                .extend_from_slice(values);
        }
    }
}
