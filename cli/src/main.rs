use clap::Parser;

mod client;
mod commands;
mod core;
mod suite;

use commands::Commands;
use crate::core::error::CheckError;
use crate::core::exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "petcheck")]
#[command(
    about = "Functional test runner for the pet-store API. Defaults to 'run' if no subcommand is provided."
)]
#[command(version = crate::core::version::app_version())]
struct Args {
    #[arg(short, long, help = "Enable debug logging", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
#[command(name = "petcheck")]
#[command(version = crate::core::version::app_version())]
struct DefaultArgs {
    #[arg(short, long, help = "Enable debug logging", global = true)]
    debug: bool,
    #[command(flatten)]
    run_args: commands::run::RunArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(exit_code) => std::process::exit(exit_code.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(ExitCode::from(&e).code());
        }
    }
}

async fn run() -> Result<ExitCode, CheckError> {
    let args: Vec<String> = std::env::args().collect();
    let is_subcommand = args.len() > 1 && matches!(args[1].as_str(), "run" | "list" | "help");

    let run_args = if is_subcommand {
        let args = Args::parse();
        crate::core::logger::Logger::init(args.debug);
        match args.command {
            Some(Commands::List(list_args)) => {
                commands::list::execute_list(&list_args)?;
                return Ok(ExitCode::Success);
            }
            Some(Commands::Run(run_args)) => run_args,
            None => return Ok(ExitCode::Success),
        }
    } else {
        let default_args = DefaultArgs::parse();
        crate::core::logger::Logger::init(default_args.debug);
        default_args.run_args
    };

    let summary = commands::run::execute_run(&run_args).await?;
    if summary.all_passed() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::Failure)
    }
}
