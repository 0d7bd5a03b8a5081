use crate::catalog::{ChartCatalog, ChartColumn, Difficulty};
use crate::error::{ArcError, ArcResult};
use crate::reports::SummaryFormat;
use clap::parser::ValueSource;
use clap::{ArgMatches, Args};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// A filter chain expressed as data, from command-line flags or a saved JSON
/// query file. Empty lists and unset bounds are skipped.
#[derive(Args, Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterQuery {
    #[arg(long, value_delimiter = ',')]
    pub difficulty: Vec<Difficulty>,
    #[arg(long, value_delimiter = ',')]
    pub level: Vec<String>,
    #[arg(long)]
    pub min_level: Option<String>,
    #[arg(long)]
    pub max_level: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub cc: Vec<f64>,
    #[arg(long)]
    pub min_cc: Option<f64>,
    #[arg(long)]
    pub max_cc: Option<f64>,

    #[arg(long)]
    pub song: Vec<String>,
    #[arg(long)]
    pub song_contains: Vec<String>,
    #[arg(long)]
    pub artist: Vec<String>,
    #[arg(long)]
    pub artist_contains: Vec<String>,
    #[arg(long)]
    pub designer: Vec<String>,
    #[arg(long)]
    pub designer_contains: Vec<String>,
    #[arg(long)]
    pub version: Vec<String>,

    #[arg(long)]
    pub min_notes: Option<u32>,
    #[arg(long)]
    pub max_notes: Option<u32>,

    /// Column header to sort by, e.g. `CC` or `"Chart designer"`.
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long, default_value_t = false)]
    pub descending: bool,
}

impl FilterQuery {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ArcResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with the values explicitly given on the command line.
    pub fn merge_from_cli(&mut self, cli_query: &FilterQuery, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($($field:ident),+ $(,)?) => {
                $(
                    if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                        self.$field = cli_query.$field.clone();
                    }
                )+
            };
        }

        update_if_present!(
            difficulty,
            level,
            min_level,
            max_level,
            cc,
            min_cc,
            max_cc,
            song,
            song_contains,
            artist,
            artist_contains,
            designer,
            designer_contains,
            version,
            min_notes,
            max_notes,
            sort_by,
            descending,
        );
    }

    pub fn sort_column(&self) -> ArcResult<Option<ChartColumn>> {
        self.sort_by
            .as_deref()
            .map(|name| {
                ChartColumn::from_str(name)
                    .map_err(|_| ArcError::Config(format!("unknown sort column '{}'", name)))
            })
            .transpose()
    }

    /// Replays the query against `catalog` in a fixed order and returns the
    /// narrowed view.
    pub fn apply(&self, catalog: &ChartCatalog) -> ArcResult<ChartCatalog> {
        let mut view = catalog.clone();

        if !self.difficulty.is_empty() {
            view = view.difficulty(self.difficulty.iter().copied());
        }
        if !self.level.is_empty() {
            view = view.level(&self.level);
        }
        if let Some(lv) = &self.min_level {
            view = view.min_level(lv)?;
        }
        if let Some(lv) = &self.max_level {
            view = view.max_level(lv)?;
        }

        if !self.cc.is_empty() {
            view = view.cc(self.cc.iter().copied());
        }
        view = match (self.min_cc, self.max_cc) {
            (Some(min), Some(max)) => view.cc_range(min, max),
            (Some(min), None) => view.min_cc(min),
            (None, Some(max)) => view.max_cc(max),
            (None, None) => view,
        };

        if !self.song.is_empty() {
            view = view.song(&self.song, true)?;
        }
        if !self.song_contains.is_empty() {
            view = view.song(&self.song_contains, false)?;
        }
        if !self.artist.is_empty() {
            view = view.artist(&self.artist, true)?;
        }
        if !self.artist_contains.is_empty() {
            view = view.artist(&self.artist_contains, false)?;
        }
        if !self.designer.is_empty() {
            view = view.designer(&self.designer, true)?;
        }
        if !self.designer_contains.is_empty() {
            view = view.designer(&self.designer_contains, false)?;
        }
        if !self.version.is_empty() {
            view = view.version(&self.version);
        }

        view = match (self.min_notes, self.max_notes) {
            (Some(min), Some(max)) => view.notes_range(min, max),
            (Some(min), None) => view.min_notes(min),
            (None, Some(max)) => view.max_notes(max),
            (None, None) => view,
        };

        if let Some(column) = self.sort_column()? {
            view = view.sort_by(column, !self.descending);
        }

        Ok(view)
    }
}

#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    #[arg(long, default_value_t = 10)]
    pub max_rows: usize,
    #[arg(long)]
    pub table_width: Option<u16>,
}

impl DisplayArgs {
    pub fn summary_format(&self) -> SummaryFormat {
        SummaryFormat {
            max_rows: self.max_rows,
            table_width: self.table_width,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SessionParams {
    /// Minimum gap between two identical key commands.
    #[arg(long, default_value_t = 120)]
    pub debounce_ms: u64,
    #[arg(long)]
    pub start_pure: Option<u32>,
}

impl SessionParams {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
