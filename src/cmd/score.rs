use arcsearch::catalog::{ChartCatalog, Difficulty};
use arcsearch::config::SessionParams;
use arcsearch::error::ArcResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(short, long)]
    pub song: String,

    #[arg(short = 'D', long)]
    pub difficulty: Difficulty,

    #[command(flatten)]
    pub session: SessionParams,

    /// Print the final result as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(not(feature = "interactive"))]
pub fn run(_args: ScoreArgs, _catalog: &ChartCatalog) -> ArcResult<()> {
    eprintln!("⚠️  Interactive scoring is unavailable: built without the 'interactive' feature.");
    eprintln!("    Use 'arcsearch rate --pure <N>' for a one-shot result.");
    Ok(())
}

#[cfg(feature = "interactive")]
pub fn run(args: ScoreArgs, catalog: &ChartCatalog) -> ArcResult<()> {
    use arcsearch::reports;
    use arcsearch::session::input::{KeyReader, RawModeGuard};
    use arcsearch::session::{ScoreSession, SessionExit};
    use crossterm::cursor::MoveToColumn;
    use crossterm::execute;
    use crossterm::style::Print;
    use crossterm::terminal::{Clear, ClearType};
    use std::io::{self, IsTerminal};
    use tracing::error;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("⚠️  Interactive scoring needs a terminal.");
        eprintln!("    Use 'arcsearch rate --pure <N>' for a one-shot result.");
        return Ok(());
    }

    let Some(chart) = catalog.locate(&args.song, args.difficulty) else {
        println!("❌ No chart found for '{}' [{}]", args.song, args.difficulty);
        return Ok(());
    };

    let mut session = ScoreSession::new(chart.clone())?;
    if let Some(pure) = args.session.start_pure {
        session = session.with_pure_count(pure);
    }

    println!(
        "🎵 {} [{}]  Lv {}  CC {:.1}  Notes {}",
        chart.song, chart.difficulty, chart.level, chart.cc, chart.notes
    );
    println!("   ↑/↓ ±1   Shift+↑/↓ ±100   Ctrl+↑ or → max   Ctrl+↓ or ← zero   q quit\n");

    let outcome = {
        let _raw = RawModeGuard::enable()?;
        let (_reader, events) = KeyReader::spawn(args.session.debounce())?;
        let mut stdout = io::stdout();

        session.run(&events, |s| {
            let line = reports::status_line(s);
            if let Err(e) = execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line)) {
                error!("Failed to repaint status: {}", e);
            }
        })
    };
    println!();

    if outcome.exit == SessionExit::Interrupted {
        println!("\n🛑 Interrupted. Last result:");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.snapshot)?);
    } else {
        println!("{}", reports::render_snapshot(&outcome.snapshot));
    }
    Ok(())
}
