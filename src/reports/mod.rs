use crate::catalog::{ChartCatalog, ChartColumn};
use crate::session::{ScoreSession, ScoreSnapshot};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

const RULE_WIDTH: usize = 80;

/// Display parameters for [`render_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryFormat {
    pub max_rows: usize,
    /// Fixed table width; `None` lets the table size itself to the content.
    pub table_width: Option<u16>,
}

impl Default for SummaryFormat {
    fn default() -> Self {
        Self {
            max_rows: 10,
            table_width: None,
        }
    }
}

pub fn render_summary(catalog: &ChartCatalog, format: &SummaryFormat) -> String {
    let count = catalog.count();
    let mut out = format!("Total results: {}\n\n{}\n\n", count, "=".repeat(RULE_WIDTH));

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    match format.table_width {
        Some(width) => {
            table
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_width(width);
        }
        None => {
            table.set_content_arrangement(ContentArrangement::Disabled);
        }
    }

    table.set_header(
        ChartColumn::iter()
            .map(|c| Cell::new(c.to_string()).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let shown = catalog.get(Some(format.max_rows));
    for record in &shown {
        table.add_row(
            ChartColumn::iter()
                .map(|c| {
                    let cell = Cell::new(record.field_text(c));
                    match c {
                        ChartColumn::Cc => cell.fg(Color::Cyan),
                        _ => cell,
                    }
                })
                .collect::<Vec<_>>(),
        );
    }

    for column in [ChartColumn::Lv, ChartColumn::Cc, ChartColumn::Notes] {
        if let Some(col) = table.column_mut(column as usize) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    out.push_str(&table.to_string());

    if count > shown.len() {
        out.push_str(&format!("\n\n... and {} more results", count - shown.len()));
    }
    out
}

/// `9900000` -> `"09,900,000"`.
pub fn format_score(score: u32) -> String {
    let digits = format!("{:08}", score);
    let mut out = String::with_capacity(digits.len() + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn status_line(session: &ScoreSession) -> String {
    format!(
        "Score: {} | Pure: {} | Lost: {} | Max: {} | Rating: {:.2}",
        format_score(session.total_score()),
        session.pure_count(),
        session.lost_count(),
        session.notes(),
        session.play_rating()
    )
}

pub fn render_snapshot(snapshot: &ScoreSnapshot) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Song").add_attribute(Attribute::Bold),
        Cell::new("Difficulty"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Pure").fg(Color::Green),
        Cell::new("Lost").fg(Color::Red),
        Cell::new("Rating").add_attribute(Attribute::Bold),
    ]);

    for i in 2..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.add_row(vec![
        Cell::new(&snapshot.song).add_attribute(Attribute::Bold),
        Cell::new(snapshot.difficulty),
        Cell::new(format_score(snapshot.total_score)).fg(Color::Cyan),
        Cell::new(snapshot.pure_count).fg(Color::Green),
        Cell::new(snapshot.lost_count).fg(Color::Red),
        Cell::new(format!("{:.2}", snapshot.play_rating)).add_attribute(Attribute::Bold),
    ]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ChartRecord, Difficulty};

    fn catalog_of(n: usize) -> ChartCatalog {
        ChartCatalog::new(
            (0..n)
                .map(|i| ChartRecord {
                    song: format!("Song {}", i),
                    artist: "Artist".to_string(),
                    difficulty: Difficulty::Future,
                    level: "9".to_string(),
                    cc: 9.5,
                    notes: 1000,
                    designer: "Designer".to_string(),
                    version: "V1".to_string(),
                })
                .collect(),
        )
    }

    fn format(max_rows: usize) -> SummaryFormat {
        SummaryFormat {
            max_rows,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_view_renders_header_only() {
        let empty = catalog_of(3).min_notes(5000);
        let text = render_summary(&empty, &format(10));

        assert!(text.starts_with("Total results: 0\n"));
        assert!(text.contains("Chart designer"));
        assert!(!text.contains("Song 0"));
        assert!(!text.contains("more results"));
    }

    #[test]
    fn test_full_page_has_no_suffix() {
        let text = render_summary(&catalog_of(3), &format(3));
        assert!(text.starts_with("Total results: 3\n"));
        assert!(text.contains("Song 2"));
        assert!(!text.contains("more results"));
    }

    #[test]
    fn test_one_row_over_reports_remainder() {
        let text = render_summary(&catalog_of(4), &format(3));
        assert!(text.contains("Song 2"));
        assert!(!text.contains("Song 3"));
        assert!(text.ends_with("\n\n... and 1 more results"));
    }

    #[test]
    fn test_zero_max_rows_shows_everything() {
        let text = render_summary(&catalog_of(4), &format(0));
        assert!(text.contains("Song 3"));
        assert!(!text.contains("more results"));
    }

    #[test]
    fn test_format_score_groups_thousands() {
        assert_eq!(format_score(10_000_000), "10,000,000");
        assert_eq!(format_score(9_900_000), "09,900,000");
        assert_eq!(format_score(0), "00,000,000");
    }
}
