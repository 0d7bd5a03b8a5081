#![allow(dead_code)]

use arcsearch::catalog::ChartCatalog;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "Song,Artist,Difficulty,Lv,CC,Notes,Chart designer,Version";

/// Ten charts covering every filter. "Axium Crisis" [Future] appears twice
/// on purpose (first row has CC 10.0).
pub const FIXTURE_ROWS: &[&str] = &[
    "Fractional Sky,Alpha,Past,3,3.0,400,Des A,V1",
    "Fractional Sky,Alpha,Future,9,9.5,1000,Des A,V1",
    "Infinite FRACTION,Beta,Future,9+,9.8,1000,Des B,V2",
    "Grievous Lady,Team Grimoire,Future,11,11.3,1450,Nitro,V2",
    "Tempestissimo,t+pazolite,Beyond,11,11.5,1540,Toaster,V3",
    "Axium Crisis,ak+q,Future,10,10.0,1260,Nitro,V3",
    "Arcahv,Feryquitous,Future,10+,10.7,1100,Toaster,V1",
    "Lucent,Beta,Present,9,9.0,800,Des B,V2",
    "Singularity,ETIA.,Beyond,10+,11.0,1300,Nitro,V3",
    "Axium Crisis,ak+q,Future,10,10.2,1261,Nitro,V4",
];

pub fn fixture_csv() -> String {
    csv_with_rows(FIXTURE_ROWS)
}

pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

pub fn fixture_catalog() -> ChartCatalog {
    ChartCatalog::from_reader(fixture_csv().as_bytes()).expect("fixture must load")
}

pub fn write_temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

/// `(song, CC)` pairs of the view, in view order.
pub fn rows(catalog: &ChartCatalog) -> Vec<(String, f64)> {
    catalog.iter().map(|r| (r.song.clone(), r.cc)).collect()
}
