use crate::demo::{run_demo, run_integrity_report, DemoArgs, IntegrityReportArgs};
use crate::server;
use bidwatch::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Bid Integrity Orchestrator",
    about = "Score marketplace bids and flag market abuse from the command line",
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
    /// Analyze a bid-set export and print the integrity report
    Integrity {
        #[command(subcommand)]
        command: IntegrityCommand,
    },
    /// Run an end-to-end CLI demo covering scoring and integrity analysis
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum IntegrityCommand {
    /// Analyze bids from a JSON export against a market reference price
    Report(IntegrityReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Integrity {
            command: IntegrityCommand::Report(args),
        } => run_integrity_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
