use arcsearch::catalog::{ChartCatalog, ChartColumn, ChartRecord, Difficulty};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use strum::IntoEnumIterator;

fn setup_catalog() -> ChartCatalog {
    let difficulties: Vec<Difficulty> = Difficulty::iter().collect();
    let mut records = Vec::new();
    for i in 0..5_000u32 {
        let lv = 1 + i % 12;
        records.push(ChartRecord {
            song: format!("Song {}", i / 4),
            artist: format!("Artist {}", i % 97),
            difficulty: difficulties[(i % 5) as usize],
            level: if i % 3 == 0 {
                format!("{}+", lv)
            } else {
                lv.to_string()
            },
            cc: f64::from(lv) + f64::from(i % 10) / 10.0,
            notes: 300 + i % 1500,
            designer: format!("Designer {}", i % 13),
            version: format!("V{}", i % 8),
        });
    }
    ChartCatalog::new(records)
}

fn bench_filter_chain(c: &mut Criterion) {
    let catalog = setup_catalog();

    c.bench_function("filter_chain", |b| {
        b.iter(|| {
            let view = black_box(&catalog)
                .difficulty([Difficulty::Future, Difficulty::Beyond])
                .min_level("9+")
                .unwrap()
                .cc_range(9.5, 11.5)
                .song_contains("song 1")
                .unwrap()
                .sort_by(ChartColumn::Cc, false);
            black_box(view.count())
        })
    });

    c.bench_function("reset", |b| {
        let narrowed = catalog.min_notes(1000);
        b.iter(|| black_box(narrowed.reset().count()))
    });
}

criterion_group!(benches, bench_filter_chain);
criterion_main!(benches);
