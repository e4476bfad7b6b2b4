use crate::report::{run_nutrition_search, run_score_report, NutritionSearchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trinity_os::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TrinityOS",
    about = "Serve and inspect TrinityOS wellness scoring from the command line",
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
    /// Compute the Trinity score for an exported record bundle
    Score(ScoreArgs),
    /// Query the FoodData Central proxy
    Nutrition {
        #[command(subcommand)]
        command: NutritionCommand,
    },
}

#[derive(Subcommand, Debug)]
enum NutritionCommand {
    /// Search foods and print mapped nutrients
    Search(NutritionSearchArgs),
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
        Command::Score(args) => run_score_report(args),
        Command::Nutrition {
            command: NutritionCommand::Search(args),
        } => run_nutrition_search(args).await,
    }
}
