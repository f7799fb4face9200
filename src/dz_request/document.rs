//! Wire format of a single suite submission.

use serde::{Deserialize, Serialize, Serializer, ser};

use crate::dz_result::{SuiteOptions, SuiteResults};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMachine {
    pub name: String,
    pub os: String,
    pub osversion: String,
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestBuild {
    pub name: String,
    pub version: String,
    pub revision: String,
    pub branch: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    /// UNIX time of the run.
    pub date: i64,
    pub suite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SuiteOptions>,
}

/// One suite's results plus the metadata of the run that produced them.
///
/// # JSON Format
///
/// ```json
/// {
///   "test_machine": {
///     "name": "qm-pxp01", "os": "linux", "osversion": "Ubuntu 11.10", "platform": "x86_64"
///   },
///   "test_build": {
///     "name": "Firefox", "version": "14.0a2", "revision": "785345035a3b",
///     "branch": "Mozilla-Aurora", "id": "20120228122102"
///   },
///   "testrun": {"date": 1342229050, "suite": "tp5"},
///   "results": {"google.com": [1200.0, 1180.0]}
/// }
/// ```
///
/// `results_aux`, `results_xperf` and `testrun.options` appear only when the
/// suite has data for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub test_machine: TestMachine,
    pub test_build: TestBuild,
    pub testrun: TestRun,
    #[serde(serialize_with = "finite_samples")]
    pub results: SuiteResults,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_finite_samples"
    )]
    pub results_aux: Option<SuiteResults>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_finite_samples"
    )]
    pub results_xperf: Option<SuiteResults>,
}

/// JSON has no NaN or infinity; serde_json would write them as `null`.
fn finite_samples<S: Serializer>(
    samples: &SuiteResults,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if let Some((name, value)) = samples
        .iter()
        .find_map(|(name, values)| values.iter().find(|v| !v.is_finite()).map(|v| (name, v)))
    {
        return Err(ser::Error::custom(format!(
            "non-finite sample {value} in '{name}'"
        )));
    }
    samples.serialize(serializer)
}

fn optional_finite_samples<S: Serializer>(
    samples: &Option<SuiteResults>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match samples {
        Some(samples) => finite_samples(samples, serializer),
        None => serializer.serialize_none(),
    }
}
