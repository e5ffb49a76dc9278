use super::http::{HttpError, HttpResponse};
use crate::suite::{Assertion, AssertionResult, ResponseBody, TestCase};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Terminal state of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseState {
    Evaluated,
    TransportFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed,
    Errored,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub case_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub method: String,
    pub url: String,
    pub state: CaseState,
    pub status: Option<u16>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub response_headers: BTreeMap<String, String>,
    pub body: ResponseBody,
    /// Comparison of the received status with the case's expected status.
    pub status_check: Option<AssertionResult>,
    pub assertions: Vec<AssertionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn evaluated(
        case: &TestCase,
        url: String,
        response: HttpResponse,
        elapsed: Duration,
    ) -> Self {
        let body = ResponseBody::parse(response.body.clone(), response.content_type());
        let status = response.status;
        let status_check = Assertion::StatusEquals {
            status: case.expected_status,
        }
        .evaluate(status, &body);
        let assertions = case
            .assertions
            .iter()
            .map(|assertion| assertion.evaluate(status, &body))
            .collect();

        ExecutionResult {
            case_name: case.name.clone(),
            group: case.group.clone(),
            method: case.method.as_str().to_string(),
            url,
            state: CaseState::Evaluated,
            status: Some(status),
            elapsed_ms: elapsed.as_millis() as u64,
            response_headers: response.headers,
            body,
            status_check: Some(status_check),
            assertions,
            error: None,
        }
    }

    pub fn transport_failed(
        case: &TestCase,
        url: String,
        error: &HttpError,
        elapsed: Duration,
    ) -> Self {
        ExecutionResult {
            case_name: case.name.clone(),
            group: case.group.clone(),
            method: case.method.as_str().to_string(),
            url,
            state: CaseState::TransportFailed,
            status: None,
            elapsed_ms: elapsed.as_millis() as u64,
            response_headers: BTreeMap::new(),
            body: ResponseBody::Empty,
            status_check: None,
            assertions: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn outcome(&self) -> CaseOutcome {
        match self.state {
            CaseState::TransportFailed => CaseOutcome::Errored,
            CaseState::Evaluated => {
                let status_ok = self.status_check.as_ref().is_some_and(|check| check.passed);
                if status_ok && self.assertions.iter().all(|result| result.passed) {
                    CaseOutcome::Passed
                } else {
                    CaseOutcome::Failed
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Summary {
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        results
            .iter()
            .fold(Summary::default(), |mut summary, result| {
                summary.total += 1;
                match result.outcome() {
                    CaseOutcome::Passed => summary.passed += 1,
                    CaseOutcome::Failed => summary.failed += 1,
                    CaseOutcome::Errored => summary.errored += 1,
                }
                summary
            })
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
