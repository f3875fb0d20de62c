//! Common data types for heartstat

use serde::{Deserialize, Serialize};

/// Test statistic and p-value of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Value of the test statistic.
    pub statistic: f64,

    /// Probability, under the null hypothesis, of a statistic at least this extreme.
    pub p_value: f64,
}

impl TestResult {
    /// Create a new test result
    pub fn new(statistic: f64, p_value: f64) -> Self {
        Self { statistic, p_value }
    }

    /// Decision against the null hypothesis at significance level `alpha`.
    pub fn decision(&self, alpha: f64) -> Decision {
        Decision::at(self.p_value, alpha)
    }
}

/// Outcome of comparing a p-value against a significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// p < alpha: the null hypothesis is rejected.
    Reject,
    /// p >= alpha.
    FailToReject,
}

impl Decision {
    /// Decide at level `alpha`.
    pub fn at(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha { Decision::Reject } else { Decision::FailToReject }
    }

    /// `true` for [`Decision::Reject`].
    pub fn is_reject(self) -> bool {
        self == Decision::Reject
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Reject => write!(f, "reject"),
            Decision::FailToReject => write!(f, "fail to reject"),
        }
    }
}
