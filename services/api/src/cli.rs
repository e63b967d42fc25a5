use crate::demo::{run_countries, run_demo, run_recommend, CountriesArgs, DemoArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visa_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Visa Advisor",
    about = "Score immigration profiles and recommend destination countries",
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
    /// Score a profile JSON file and print ranked recommendations
    Recommend(RecommendArgs),
    /// List the countries and purposes in the active catalog
    Countries(CountriesArgs),
    /// Score a set of sample profiles against the catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Ignore ADVISOR_REMOTE_URL and always score locally
    #[arg(long)]
    pub(crate) local_only: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args).await,
        Command::Countries(args) => run_countries(args),
        Command::Demo(args) => run_demo(args),
    }
}
