mod common;

use arcsearch::catalog::{ChartColumn, Difficulty};
use arcsearch::config::{DisplayArgs, FilterQuery};
use arcsearch::error::ArcError;
use clap::{CommandFactory, FromArgMatches, Parser};
use common::{fixture_catalog, write_temp_csv};

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    query: FilterQuery,
    #[command(flatten)]
    display: DisplayArgs,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
        .expect("arguments should parse");
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_empty_query_is_identity() {
    let catalog = fixture_catalog();
    let view = FilterQuery::default().apply(&catalog).unwrap();
    assert_eq!(view.count(), catalog.count());
}

#[test]
fn test_cli_flags_build_a_chain() {
    let (cli, _) = parse(&[
        "--difficulty",
        "future,beyond",
        "--min-cc",
        "10.0",
        "--max-notes",
        "1300",
        "--sort-by",
        "CC",
        "--descending",
    ]);
    assert_eq!(cli.query.difficulty, vec![Difficulty::Future, Difficulty::Beyond]);

    let view = cli.query.apply(&fixture_catalog()).unwrap();
    let ccs: Vec<f64> = view.iter().map(|r| r.cc).collect();
    assert_eq!(ccs, vec![11.0, 10.7, 10.2, 10.0]);
}

#[test]
fn test_contains_flags_are_alternatives() {
    let (cli, _) = parse(&["--song-contains", "lucent", "--song-contains", "sky"]);
    let view = cli.query.apply(&fixture_catalog()).unwrap();
    assert_eq!(view.count(), 3);
}

#[test]
fn test_level_flags_use_their_own_offsets() {
    let (cli, _) = parse(&["--min-level", "9+", "--max-level", "10"]);
    let view = cli.query.apply(&fixture_catalog()).unwrap();
    let levels: Vec<&str> = view.iter().map(|r| r.level.as_str()).collect();
    assert_eq!(levels, vec!["9+", "10", "10"]);
}

#[test]
fn test_unknown_sort_column_is_config_error() {
    let query = FilterQuery {
        sort_by: Some("Popularity".to_string()),
        ..Default::default()
    };
    let err = query.apply(&fixture_catalog()).unwrap_err();
    assert!(matches!(err, ArcError::Config(_)));
}

#[test]
fn test_sort_column_accepts_header_names() {
    let query = FilterQuery {
        sort_by: Some("Chart designer".to_string()),
        ..Default::default()
    };
    assert_eq!(query.sort_column().unwrap(), Some(ChartColumn::Designer));
}

#[test]
fn test_query_file_loads_json() {
    let file = write_temp_csv(
        r#"{
            "difficulty": ["Future"],
            "designer": ["Nitro"],
            "min_notes": 1261
        }"#,
    );
    let query = FilterQuery::load_from_file(file.path()).unwrap();
    assert_eq!(query.min_notes, Some(1261));

    let view = query.apply(&fixture_catalog()).unwrap();
    assert_eq!(view.count(), 2);
}

#[test]
fn test_cli_overrides_query_file() {
    let mut query = FilterQuery {
        difficulty: vec![Difficulty::Future],
        min_cc: Some(11.0),
        version: vec!["V2".to_string()],
        ..Default::default()
    };

    let (cli, matches) = parse(&["--min-cc", "9.6", "--version", "V1"]);
    query.merge_from_cli(&cli.query, &matches);

    // Explicit flags win, untouched fields keep the file's value.
    assert_eq!(query.min_cc, Some(9.6));
    assert_eq!(query.version, vec!["V1".to_string()]);
    assert_eq!(query.difficulty, vec![Difficulty::Future]);

    let view = query.apply(&fixture_catalog()).unwrap();
    assert_eq!(view.count(), 1);
    assert_eq!(view.get(None)[0].song, "Arcahv");
}

#[test]
fn test_display_defaults() {
    let (cli, _) = parse(&[]);
    let format = cli.display.summary_format();
    assert_eq!(format.max_rows, 10);
    assert_eq!(format.table_width, None);
}
