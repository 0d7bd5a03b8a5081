use arcsearch::catalog::ChartCatalog;
use arcsearch::error::ArcResult;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/charts.csv")]
    data: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter the chart list and print or export the result.
    Query(cmd::query::QueryArgs),
    /// Live score/rating calculator driven by the arrow keys.
    Score(cmd::score::ScoreArgs),
    /// One-shot score/rating for a given pure count.
    Rate(cmd::rate::RateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> ArcResult<()> {
    info!("📂 Loading charts: {}", cli.data);
    let catalog = ChartCatalog::load_from_file(&cli.data)?;
    info!("Loaded {} charts", catalog.total());

    match cli.command {
        Commands::Query(args) => cmd::query::run(args, &catalog, matches.subcommand_matches("query")),
        Commands::Score(args) => cmd::score::run(args, &catalog),
        Commands::Rate(args) => cmd::rate::run(args, &catalog),
    }
}
