use crate::demo::{run_demo, run_import, run_list, DemoArgs, ImportArgs, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use registry_taxonomy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Registry Taxonomy",
    about = "Manage the professional registration reference data from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect or bulk-load taxonomy dimensions
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommand,
    },
    /// Walk through the taxonomy rules against the seeded reference data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TaxonomyCommand {
    /// List the records of one dimension
    List(ListArgs),
    /// Validate and load records from a CSV file (name,code,description[,abbreviation])
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Start with empty stores instead of the seeded reference data
    #[arg(long)]
    pub(crate) empty: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Taxonomy {
            command: TaxonomyCommand::List(args),
        } => run_list(args),
        Command::Taxonomy {
            command: TaxonomyCommand::Import(args),
        } => run_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
