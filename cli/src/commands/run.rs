use crate::client::{Runner, RunnerConfig, Summary};
use crate::commands::shared::{OutputArgs, SuiteArgs};
use crate::commands::validators;
use crate::core::error::CheckError;
use crate::core::formatter::OutputFormat;
use crate::core::report::{self, RunReport};
use crate::suite::petstore::DEFAULT_BASE_URL;
use crate::suite::Suite;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub suite: SuiteArgs,

    #[arg(
        short = 'u',
        long = "base-url",
        env = "PETCHECK_BASE_URL",
        help = "Base URL of the API under test",
        value_parser = validators::validate_base_url
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'p',
        long = "parallel",
        value_name = "N",
        default_value = "1",
        help = "Number of cases in flight at once",
        value_parser = validators::validate_parallelism
    )]
    pub parallel: usize,

    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        help = "Overall suite timeout; unfinished cases are reported as timed out",
        value_parser = validators::validate_timeout
    )]
    pub timeout: Option<Duration>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Flag or environment first, then the suite file, then the public demo API.
pub fn resolve_base_url(flag: Option<&str>, suite: &Suite) -> String {
    flag.or(suite.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

pub async fn execute_run(args: &RunArgs) -> Result<Summary, CheckError> {
    let suite = Suite::load(args.suite.suite.as_deref())?.select(args.suite.name.as_deref())?;
    let base_url = resolve_base_url(args.base_url.as_deref(), &suite);

    let runner = Runner::new(RunnerConfig {
        base_url,
        parallelism: args.parallel,
        suite_timeout: args.timeout,
    })?;

    let started_at = chrono::Utc::now();
    let results = runner.run(&suite.cases).await;
    let report = RunReport::new(runner.base_url(), started_at, results);

    match args.output.output {
        OutputFormat::Text => print!("{}", report::render_text(&report)),
        OutputFormat::Json => {
            let formatter = crate::core::formatter::get_formatter(&args.output.output);
            println!("{}", formatter.format(&report));
        }
    }

    Ok(report.summary)
}
