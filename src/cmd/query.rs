use arcsearch::catalog::ChartCatalog;
use arcsearch::config::{DisplayArgs, FilterQuery};
use arcsearch::error::ArcResult;
use clap::{ArgMatches, Args};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filters: FilterQuery,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Saved query (JSON); filter flags given on the command line win.
    #[arg(short, long)]
    pub query_file: Option<String>,

    /// Write the filtered charts to this CSV file.
    #[arg(short, long)]
    pub export: Option<String>,
}

pub fn run(args: QueryArgs, catalog: &ChartCatalog, sub_matches: Option<&ArgMatches>) -> ArcResult<()> {
    let query = match &args.query_file {
        Some(path) => {
            info!("Loading query from {}", path);
            let mut query = FilterQuery::load_from_file(path)?;
            if let Some(matches) = sub_matches {
                query.merge_from_cli(&args.filters, matches);
            }
            query
        }
        None => args.filters.clone(),
    };

    let view = query.apply(catalog)?;
    view.print_summary(&args.display.summary_format());

    if let Some(path) = &args.export {
        view.to_csv(path)?;
        println!("\n💾 Exported {} charts to {}", view.count(), path);
    }

    Ok(())
}
