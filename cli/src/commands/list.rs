use crate::commands::shared::{OutputArgs, SuiteArgs};
use crate::core::error::CheckError;
use crate::suite::Suite;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CaseInfo {
    pub name: String,
    pub method: String,
    pub path: String,
    pub expected_status: u16,
    pub assertions: usize,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub suite: SuiteArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute_list(args: &ListArgs) -> Result<(), CheckError> {
    let suite = Suite::load(args.suite.suite.as_deref())?.select(args.suite.name.as_deref())?;

    let cases: Vec<CaseInfo> = suite
        .cases
        .iter()
        .map(|case| CaseInfo {
            name: case.name.clone(),
            method: case.method.as_str().to_string(),
            path: case.path.clone(),
            expected_status: case.expected_status,
            assertions: case.assertions.len(),
        })
        .collect();

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&cases, "Cases:", "No cases found")
    );

    Ok(())
}
