use arcsearch::catalog::{ChartCatalog, Difficulty};
use arcsearch::error::ArcResult;
use arcsearch::reports;
use arcsearch::session::ScoreSession;
use clap::Args;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    #[arg(short, long)]
    pub song: String,

    #[arg(short = 'D', long)]
    pub difficulty: Difficulty,

    #[arg(short, long)]
    pub pure: u32,

    /// Print the result as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: RateArgs, catalog: &ChartCatalog) -> ArcResult<()> {
    let Some(chart) = catalog.locate(&args.song, args.difficulty) else {
        println!("❌ No chart found for '{}' [{}]", args.song, args.difficulty);
        return Ok(());
    };

    if args.pure > chart.notes {
        warn!(
            "Pure count {} exceeds {} notes; using {}",
            args.pure, chart.notes, chart.notes
        );
    }

    let session = ScoreSession::new(chart.clone())?.with_pure_count(args.pure);
    let snapshot = session.snapshot();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", reports::render_snapshot(&snapshot));
    }
    Ok(())
}
