use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Past,
    Present,
    Future,
    Beyond,
    Eternal,
}

/// The eight dataset columns, serialized with their exact header names.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum ChartColumn {
    Song,
    Artist,
    Difficulty,
    #[strum(to_string = "Lv", serialize = "level")]
    Lv,
    #[strum(to_string = "CC")]
    Cc,
    Notes,
    #[strum(to_string = "Chart designer", serialize = "designer")]
    Designer,
    Version,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    #[serde(rename = "Song")]
    pub song: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: Difficulty,
    #[serde(rename = "Lv")]
    pub level: String,
    #[serde(rename = "CC")]
    pub cc: f64,
    #[serde(rename = "Notes")]
    pub notes: u32,
    #[serde(rename = "Chart designer")]
    pub designer: String,
    #[serde(rename = "Version")]
    pub version: String,
}

impl ChartRecord {
    /// Text of a column as it would appear in the dataset.
    pub fn field_text(&self, column: ChartColumn) -> String {
        match column {
            ChartColumn::Song => self.song.clone(),
            ChartColumn::Artist => self.artist.clone(),
            ChartColumn::Difficulty => self.difficulty.to_string(),
            ChartColumn::Lv => self.level.clone(),
            ChartColumn::Cc => format!("{:?}", self.cc),
            ChartColumn::Notes => self.notes.to_string(),
            ChartColumn::Designer => self.designer.clone(),
            ChartColumn::Version => self.version.clone(),
        }
    }

    /// Ordering used by `sort_by`. Numeric columns compare numerically,
    /// everything else (Lv included) as text.
    pub fn compare_by(&self, other: &Self, column: ChartColumn) -> Ordering {
        match column {
            ChartColumn::Song => self.song.cmp(&other.song),
            ChartColumn::Artist => self.artist.cmp(&other.artist),
            ChartColumn::Difficulty => self
                .difficulty
                .to_string()
                .cmp(&other.difficulty.to_string()),
            ChartColumn::Lv => self.level.cmp(&other.level),
            ChartColumn::Cc => self.cc.total_cmp(&other.cc),
            ChartColumn::Notes => self.notes.cmp(&other.notes),
            ChartColumn::Designer => self.designer.cmp(&other.designer),
            ChartColumn::Version => self.version.cmp(&other.version),
        }
    }
}

/// A dataset row before type coercion. Every field is kept as text so that a
/// bad numeric cell can be reported with its column instead of failing inside
/// the CSV deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChartRow {
    #[serde(rename = "Song")]
    pub song: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
    #[serde(rename = "Lv")]
    pub level: String,
    #[serde(rename = "CC")]
    pub cc: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Chart designer")]
    pub designer: String,
    #[serde(rename = "Version")]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn column_names_round_trip_through_headers() {
        assert_eq!(ChartColumn::from_str("CC").unwrap(), ChartColumn::Cc);
        assert_eq!(ChartColumn::from_str("cc").unwrap(), ChartColumn::Cc);
        assert_eq!(
            ChartColumn::from_str("Chart designer").unwrap(),
            ChartColumn::Designer
        );
        assert_eq!(ChartColumn::Designer.to_string(), "Chart designer");
        assert_eq!(ChartColumn::Lv.to_string(), "Lv");
    }

    #[test]
    fn difficulty_parsing_ignores_case() {
        assert_eq!(Difficulty::from_str("beyond").unwrap(), Difficulty::Beyond);
        assert!(Difficulty::from_str("Impossible").is_err());
    }
}
