pub mod http;
pub mod models;
pub mod result_log;
pub mod runner;

pub use models::{CaseOutcome, ExecutionResult, Summary};
pub use runner::{Runner, RunnerConfig};
