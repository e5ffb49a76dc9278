pub mod list;
pub mod run;
pub mod shared;
pub mod validators;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the suite (default when no subcommand is given)")]
    Run(run::RunArgs),
    #[command(about = "List the cases of the suite without sending requests")]
    List(list::ListArgs),
}
