pub mod level;
pub mod loader;
pub mod record;

pub use self::record::{ChartColumn, ChartRecord, Difficulty};

use self::level::{parse_level, MAX_LEVEL_PLUS_OFFSET, MIN_LEVEL_PLUS_OFFSET};
use crate::error::{ArcError, ArcResult};
use crate::reports::{self, SummaryFormat};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An immutable filtered view over a shared chart dataset.
///
/// Every filter returns a new catalog narrowed from the current view, so an
/// intermediate catalog can be kept and branched from freely. The original
/// rows are shared between all views and never copied.
#[derive(Debug, Clone)]
pub struct ChartCatalog {
    original: Arc<[ChartRecord]>,
    view: Vec<usize>,
}

impl ChartCatalog {
    pub fn new(records: Vec<ChartRecord>) -> Self {
        let view = (0..records.len()).collect();
        Self {
            original: records.into(),
            view,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ArcResult<Self> {
        Ok(Self::new(loader::load_records(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> ArcResult<Self> {
        Ok(Self::new(loader::read_records(reader)?))
    }

    // --- VIEW ACCESS ---

    pub fn count(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Size of the unfiltered dataset.
    pub fn total(&self) -> usize {
        self.original.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartRecord> + '_ {
        self.view.iter().map(|&i| &self.original[i])
    }

    /// Records of the current view in view order, truncated to `limit` rows.
    /// A limit of zero means no limit.
    pub fn get(&self, limit: Option<usize>) -> Vec<&ChartRecord> {
        let take = limit.filter(|&n| n > 0).unwrap_or(self.view.len());
        self.iter().take(take).collect()
    }

    pub fn reset(&self) -> Self {
        Self {
            original: Arc::clone(&self.original),
            view: (0..self.original.len()).collect(),
        }
    }

    /// First chart in the full dataset matching song and difficulty exactly.
    ///
    /// Ignores the current view. Duplicate matches resolve to the first row.
    pub fn locate(&self, song: &str, difficulty: Difficulty) -> Option<&ChartRecord> {
        let mut matches = self
            .original
            .iter()
            .filter(|r| r.song == song && r.difficulty == difficulty);

        let first = matches.next()?;
        let extra = matches.count();
        if extra > 0 {
            warn!(
                "'{}' [{}] matches {} charts; using the first",
                song,
                difficulty,
                extra + 1
            );
        }
        Some(first)
    }

    // --- FILTERS ---

    pub fn difficulty<I>(&self, difficulties: I) -> Self
    where
        I: IntoIterator<Item = Difficulty>,
    {
        let wanted: HashSet<Difficulty> = difficulties.into_iter().collect();
        self.retain("difficulty", |r| wanted.contains(&r.difficulty))
    }

    /// Keeps rows whose Lv label equals one of `levels` as text, so `9` and
    /// `"9"` select the same rows.
    pub fn level<I, T>(&self, levels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let wanted: HashSet<String> = levels.into_iter().map(|l| l.to_string()).collect();
        self.retain("level", |r| wanted.contains(r.level.as_str()))
    }

    pub fn min_level<T: ToString>(&self, min_level: T) -> ArcResult<Self> {
        let bound = level_bound(&min_level.to_string(), MIN_LEVEL_PLUS_OFFSET)?;
        self.try_retain("min_level", |r| {
            Ok(self.row_level(r, MIN_LEVEL_PLUS_OFFSET)? >= bound)
        })
    }

    pub fn max_level<T: ToString>(&self, max_level: T) -> ArcResult<Self> {
        let bound = level_bound(&max_level.to_string(), MAX_LEVEL_PLUS_OFFSET)?;
        self.try_retain("max_level", |r| {
            Ok(self.row_level(r, MAX_LEVEL_PLUS_OFFSET)? <= bound)
        })
    }

    pub fn cc<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let wanted: Vec<f64> = values.into_iter().collect();
        self.retain("cc", |r| wanted.iter().any(|&v| v == r.cc))
    }

    pub fn min_cc(&self, min_cc: f64) -> Self {
        self.retain("min_cc", |r| r.cc >= min_cc)
    }

    pub fn max_cc(&self, max_cc: f64) -> Self {
        self.retain("max_cc", |r| r.cc <= max_cc)
    }

    pub fn cc_range(&self, min_cc: f64, max_cc: f64) -> Self {
        self.retain("cc_range", |r| r.cc >= min_cc && r.cc <= max_cc)
    }

    /// Exact song membership, or with `exact = false` a case-insensitive
    /// search where any of the names (as regex alternatives) may match.
    pub fn song<I, S>(&self, names: I, exact: bool) -> ArcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.text_filter("song", names, exact, |r| r.song.as_str())
    }

    pub fn song_contains(&self, term: &str) -> ArcResult<Self> {
        self.song([term], false)
    }

    pub fn artist<I, S>(&self, names: I, exact: bool) -> ArcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.text_filter("artist", names, exact, |r| r.artist.as_str())
    }

    pub fn artist_contains(&self, term: &str) -> ArcResult<Self> {
        self.artist([term], false)
    }

    pub fn designer<I, S>(&self, names: I, exact: bool) -> ArcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.text_filter("designer", names, exact, |r| r.designer.as_str())
    }

    pub fn designer_contains(&self, term: &str) -> ArcResult<Self> {
        self.designer([term], false)
    }

    pub fn version<I, S>(&self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = versions
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        self.retain("version", |r| wanted.contains(r.version.as_str()))
    }

    pub fn min_notes(&self, min_notes: u32) -> Self {
        self.retain("min_notes", |r| r.notes >= min_notes)
    }

    pub fn max_notes(&self, max_notes: u32) -> Self {
        self.retain("max_notes", |r| r.notes <= max_notes)
    }

    pub fn notes_range(&self, min_notes: u32, max_notes: u32) -> Self {
        self.retain("notes_range", |r| {
            r.notes >= min_notes && r.notes <= max_notes
        })
    }

    /// Stable sort of the view. Ties keep their current relative order in
    /// both directions.
    pub fn sort_by(&self, column: ChartColumn, ascending: bool) -> Self {
        let mut view = self.view.clone();
        view.sort_by(|&a, &b| {
            let ord = self.original[a].compare_by(&self.original[b], column);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        Self {
            original: Arc::clone(&self.original),
            view,
        }
    }

    // --- OUTPUT ---

    pub fn to_csv<P: AsRef<Path>>(&self, output_path: P) -> ArcResult<&Self> {
        let path = output_path.as_ref();
        let file = File::create(path)?;
        let written = loader::write_records(file, self.iter())?;
        info!("Exported {} charts to {}", written, path.display());
        Ok(self)
    }

    pub fn print_summary(&self, format: &SummaryFormat) -> &Self {
        println!("{}", reports::render_summary(self, format));
        self
    }

    // --- INTERNALS ---

    fn retain<F>(&self, op: &str, mut keep: F) -> Self
    where
        F: FnMut(&ChartRecord) -> bool,
    {
        let view: Vec<usize> = self
            .view
            .iter()
            .copied()
            .filter(|&i| keep(&self.original[i]))
            .collect();
        debug!("{}: {} -> {} charts", op, self.view.len(), view.len());
        Self {
            original: Arc::clone(&self.original),
            view,
        }
    }

    fn try_retain<F>(&self, op: &str, mut keep: F) -> ArcResult<Self>
    where
        F: FnMut(&ChartRecord) -> ArcResult<bool>,
    {
        let mut view = Vec::with_capacity(self.view.len());
        for &i in &self.view {
            if keep(&self.original[i])? {
                view.push(i);
            }
        }
        debug!("{}: {} -> {} charts", op, self.view.len(), view.len());
        Ok(Self {
            original: Arc::clone(&self.original),
            view,
        })
    }

    fn text_filter<I, S, F>(&self, op: &str, names: I, exact: bool, field: F) -> ArcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&ChartRecord) -> &str,
    {
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        if exact {
            let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
            return Ok(self.retain(op, |r| wanted.contains(field(r))));
        }

        let pattern = search_pattern(&names)?;
        Ok(self.retain(op, |r| pattern.is_match(field(r))))
    }

    fn row_level(&self, record: &ChartRecord, plus_offset: f64) -> ArcResult<f64> {
        parse_level(&record.level, plus_offset).ok_or_else(|| {
            let row = self
                .original
                .iter()
                .position(|r| std::ptr::eq(r, record))
                .map_or(0, |i| i + 1);
            loader::conversion_error(ChartColumn::Lv, row, &record.level)
        })
    }
}

fn level_bound(label: &str, plus_offset: f64) -> ArcResult<f64> {
    parse_level(label, plus_offset)
        .ok_or_else(|| ArcError::Validation(format!("'{}' is not a level label", label)))
}

/// Builds the case-insensitive alternation used by the `*_contains` filters.
pub fn search_pattern(terms: &[String]) -> ArcResult<Regex> {
    let pattern = terms.join("|");
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}
