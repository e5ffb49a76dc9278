use crate::commands::validators;
use crate::core::formatter::OutputFormat;
use clap::Args;

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long = "output",
        help = "Output format: text or json",
        default_value_t = OutputFormat::Text,
        value_enum,
        ignore_case = true
    )]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SuiteArgs {
    #[arg(
        short = 's',
        long = "suite",
        help = "Path to a JSON suite file (defaults to the built-in pet-store suite)"
    )]
    pub suite: Option<String>,

    #[arg(
        short = 'n',
        long = "name",
        help = "Only keep cases whose name contains this filter",
        value_parser = validators::validate_name
    )]
    pub name: Option<String>,
}
