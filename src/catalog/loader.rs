use super::record::{ChartColumn, ChartRecord, Difficulty, RawChartRow};
use crate::error::{ArcError, ArcResult};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info};

pub fn load_records<P: AsRef<Path>>(path: P) -> ArcResult<Vec<ChartRecord>> {
    let path = path.as_ref();
    info!("Loading chart data from {}", path.display());
    let file = File::open(path)?;
    read_records(file)
}

pub fn read_records<R: Read>(reader: R) -> ArcResult<Vec<ChartRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawChartRow>().enumerate() {
        let raw = result?;
        records.push(coerce_row(raw, idx + 1)?);
    }

    debug!("Loaded {} chart rows", records.len());
    Ok(records)
}

pub fn write_records<'a, W, I>(writer: W, records: I) -> ArcResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ChartRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut written = 0;
    for record in records {
        wtr.serialize(record)?;
        written += 1;
    }

    // serialize() only emits the header alongside the first row.
    if written == 0 {
        let header: Vec<String> = ChartColumn::iter().map(|c| c.to_string()).collect();
        wtr.write_record(&header)?;
    }

    wtr.flush()?;
    Ok(written)
}

fn coerce_row(raw: RawChartRow, row: usize) -> ArcResult<ChartRecord> {
    let difficulty = parse_field::<Difficulty>(&raw.difficulty, ChartColumn::Difficulty, row)?;
    let cc = parse_field::<f64>(&raw.cc, ChartColumn::Cc, row)?;
    let notes = parse_field::<u32>(&raw.notes, ChartColumn::Notes, row)?;

    if !cc.is_finite() {
        return Err(conversion_error(ChartColumn::Cc, row, &raw.cc));
    }

    Ok(ChartRecord {
        song: raw.song,
        artist: raw.artist,
        difficulty,
        level: raw.level,
        cc,
        notes,
        designer: raw.designer,
        version: raw.version,
    })
}

fn parse_field<T: FromStr>(text: &str, column: ChartColumn, row: usize) -> ArcResult<T> {
    text.trim()
        .parse()
        .map_err(|_| conversion_error(column, row, text))
}

pub(crate) fn conversion_error(column: ChartColumn, row: usize, value: &str) -> ArcError {
    ArcError::DataConversion {
        column: column.to_string(),
        row,
        value: value.to_string(),
    }
}
