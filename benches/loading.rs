//! CSV and NDJSON load throughput.
//!
//! Run with: `cargo bench --bench loading`

use std::fmt::Write as _;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use bikeshare_stats::config::City;
use bikeshare_stats::ingestion::csv::read_csv_from_path;
use bikeshare_stats::ingestion::json::read_json_from_str;

const ROWS: usize = 20_000;

fn csv_text(rows: usize) -> String {
    let mut out = String::from(",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n");
    for i in 0..rows {
        let month = 1 + i % 6;
        let day = 1 + i % 28;
        let _ = writeln!(
            out,
            "{i},2017-{month:02}-{day:02} 08:{m:02}:00,2017-{month:02}-{day:02} 09:00:00,{dur}.0,Station {s},Station {e},Subscriber,Female,{year}.0",
            m = i % 60,
            dur = 60 + i % 1800,
            s = i % 40,
            e = (i * 3) % 40,
            year = 1950 + i % 50,
        );
    }
    out
}

fn ndjson_text(rows: usize) -> String {
    let mut out = String::new();
    for i in 0..rows {
        let _ = writeln!(
            out,
            r#"{{"start_time":"2017-03-{day:02} 17:{m:02}:00","trip_duration":{dur},"start_station":"Station {s}","end_station":"Station {e}","user_type":"Customer"}}"#,
            day = 1 + i % 28,
            m = i % 60,
            dur = 60 + i % 1800,
            s = i % 40,
            e = (i * 3) % 40,
        );
    }
    out
}

fn bench_csv(c: &mut Criterion) {
    let path: PathBuf = std::env::temp_dir().join(format!("bikeshare-bench-{}.csv", std::process::id()));
    std::fs::write(&path, csv_text(ROWS)).unwrap();

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(ROWS as u64));
    group.bench_function("csv", |b| {
        b.iter(|| read_csv_from_path(black_box(&path), City::Chicago).unwrap())
    });
    group.finish();

    let _ = std::fs::remove_file(&path);
}

fn bench_ndjson(c: &mut Criterion) {
    let text = ndjson_text(ROWS);

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(ROWS as u64));
    group.bench_function("ndjson", |b| {
        b.iter(|| read_json_from_str(black_box(&text), City::Washington).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_csv, bench_ndjson);
criterion_main!(benches);
