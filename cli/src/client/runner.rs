use super::http::{self, HttpError, PreparedRequest};
use super::models::ExecutionResult;
use super::result_log::ResultLog;
use crate::core::error::CheckError;
use crate::suite::TestCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

pub struct RunnerConfig {
    pub base_url: String,
    /// Maximum number of cases in flight at once.
    pub parallelism: usize,
    /// Deadline for the whole suite, measured from the start of `run`.
    pub suite_timeout: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: crate::suite::petstore::DEFAULT_BASE_URL.to_string(),
            parallelism: 1,
            suite_timeout: None,
        }
    }
}

pub struct Runner {
    client: reqwest::Client,
    base_url: Arc<str>,
    parallelism: usize,
    suite_timeout: Option<Duration>,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Result<Self, CheckError> {
        let url = reqwest::Url::parse(&config.base_url).map_err(|err| {
            CheckError::Config(format!("invalid base URL '{}': {err}", config.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CheckError::Config(format!(
                "unsupported scheme '{}' in base URL '{}', expected http or https",
                url.scheme(),
                config.base_url
            )));
        }
        if config.parallelism == 0 {
            return Err(CheckError::Config(
                "parallelism must be at least 1".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(crate::core::version::user_agent())
            .build()
            .map_err(|err| CheckError::Config(format!("cannot build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.as_str()),
            parallelism: config.parallelism,
            suite_timeout: config.suite_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs every case once and returns one result per case, in case order.
    ///
    /// Cases start in listed order, at most `parallelism` at a time. A
    /// transport failure only affects its own case.
    pub async fn run(&self, cases: &[TestCase]) -> Vec<ExecutionResult> {
        // A timeout too far out to represent is the same as no deadline.
        let deadline = self
            .suite_timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let log = ResultLog::new();
        let mut tasks = JoinSet::new();

        crate::debug_log!(
            "Running {} case(s) against {} (parallelism {})",
            cases.len(),
            self.base_url,
            self.parallelism
        );

        for (index, case) in cases.iter().cloned().enumerate() {
            let client = self.client.clone();
            let base_url = Arc::clone(&self.base_url);
            let semaphore = Arc::clone(&semaphore);
            let log = log.clone();

            tasks.spawn(async move {
                let result = run_case(&client, &base_url, &case, &semaphore, deadline).await;
                log.append(index, result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                crate::debug_log!("Case task did not complete: {err}");
            }
        }

        crate::debug_log!("Collected {} result(s)", log.len());
        log.into_ordered(cases.len(), |index| {
            let case = &cases[index];
            ExecutionResult::transport_failed(
                case,
                http::join_url(&self.base_url, &case.path),
                &HttpError::new("internal error", "case task did not complete"),
                Duration::ZERO,
            )
        })
    }
}

async fn run_case(
    client: &reqwest::Client,
    base_url: &str,
    case: &TestCase,
    semaphore: &Semaphore,
    deadline: Option<Instant>,
) -> ExecutionResult {
    let request = match PreparedRequest::from_case(case, base_url) {
        Ok(request) => request,
        Err(err) => {
            let url = http::join_url(base_url, &case.path);
            return ExecutionResult::transport_failed(case, url, &err, Duration::ZERO);
        }
    };

    // Waiting for a slot counts against the suite deadline; once it passes,
    // nothing else is dispatched.
    let permit = match deadline {
        Some(deadline) => timeout_at(deadline, semaphore.acquire()).await.ok(),
        None => Some(semaphore.acquire().await),
    };
    let _permit = match permit {
        Some(Ok(permit)) => permit,
        Some(Err(_)) => {
            let err = HttpError::new("internal error", "dispatch queue closed");
            return ExecutionResult::transport_failed(case, request.url, &err, Duration::ZERO);
        }
        None => {
            crate::debug_log!("Case '{}' not dispatched: suite timeout", case.name);
            let err = HttpError::timeout("suite timeout elapsed before dispatch");
            return ExecutionResult::transport_failed(case, request.url, &err, Duration::ZERO);
        }
    };

    crate::debug_log!(
        "Dispatching '{}': {} {}",
        case.name,
        request.method,
        request.url
    );
    let started = std::time::Instant::now();
    let outcome = match deadline {
        Some(deadline) => timeout_at(deadline, http::execute_request(client, &request))
            .await
            .unwrap_or_else(|_| Err(HttpError::timeout("suite timeout elapsed awaiting response"))),
        None => http::execute_request(client, &request).await,
    };
    let elapsed = started.elapsed();

    match outcome {
        Ok(response) => {
            crate::debug_log!(
                "Response for '{}': {} ({} ms)",
                case.name,
                response.status,
                elapsed.as_millis()
            );
            ExecutionResult::evaluated(case, request.url, response, elapsed)
        }
        Err(err) => {
            crate::debug_log!("Transport failure for '{}': {err}", case.name);
            ExecutionResult::transport_failed(case, request.url, &err, elapsed)
        }
    }
}
