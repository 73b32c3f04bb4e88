use bikeshare_stats::config::{BikeshareConfig, City};
use bikeshare_stats::ingestion::LoadOptions;
use bikeshare_stats::loader::{load, load_city};
use bikeshare_stats::processing::{filter, FilterCriteria};
use bikeshare_stats::stats::{DurationBreakdown, StationPair, StatsReport};
use bikeshare_stats::BikeshareError;

fn fixtures() -> BikeshareConfig {
    BikeshareConfig::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn criteria(config: &BikeshareConfig, month: &str, day: &str) -> FilterCriteria {
    FilterCriteria::from_names(config, month, day).unwrap()
}

#[test]
fn chicago_unfiltered_report() {
    let config = fixtures();
    let ds = load(&config, City::Chicago, &FilterCriteria::all(), &LoadOptions::default()).unwrap();
    let report = StatsReport::compute(&ds, &config);

    assert_eq!(report.rows, 12);

    assert_eq!(report.travel_time.common_months, vec!["january", "may"]);
    assert_eq!(report.travel_time.common_days, vec!["Friday", "Monday"]);
    assert_eq!(report.travel_time.common_start_hours, vec![8]);

    assert_eq!(report.stations.common_start_stations, vec!["Canal St & Adams St"]);
    assert_eq!(
        report.stations.common_end_stations,
        vec!["Canal St & Adams St", "Clinton St & Madison St"]
    );
    assert_eq!(
        report.stations.common_trips,
        vec![StationPair::new("Canal St & Adams St", "Clinton St & Madison St")]
    );

    assert_eq!(report.trip_duration.total_seconds, 9875);
    assert_eq!(
        report.trip_duration.total,
        DurationBreakdown { hours: 2, minutes: 44, seconds: 35 }
    );
    assert_eq!(
        report.trip_duration.mean,
        Some(DurationBreakdown { hours: 0, minutes: 13, seconds: 42 })
    );

    let users = &report.users.user_types;
    assert_eq!((users.subscriber, users.customer, users.unknown), (7, 3, 2));

    let demo = report.users.demographics.as_ref().unwrap();
    assert_eq!((demo.gender.male, demo.gender.female, demo.gender.unknown), (5, 4, 3));
    assert_eq!(demo.earliest_birth_year, Some(1975));
    assert_eq!(demo.most_recent_birth_year, Some(1992));
    assert_eq!(demo.common_birth_years, vec![1992]);
}

#[test]
fn chicago_month_and_day_filter() {
    let config = fixtures();
    let ds = load(
        &config,
        City::Chicago,
        &criteria(&config, "January", "monday"),
        &LoadOptions::default(),
    )
    .unwrap();

    assert_eq!(ds.row_count(), 2);
    assert!(ds.records.iter().all(|r| r.month() == 1 && r.day_name() == "Monday"));

    let report = StatsReport::compute(&ds, &config);
    assert_eq!(report.trip_duration.total_seconds, 776 + 933);
    assert_eq!(report.travel_time.common_months, vec!["january"]);
}

#[test]
fn month_without_trips_yields_empty_report() {
    let config = fixtures();
    let ds = load(&config, City::Chicago, &criteria(&config, "june", "all"), &LoadOptions::default()).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.schema, bikeshare_stats::types::TripSchema::full());

    let report = StatsReport::compute(&ds, &config);
    assert!(report.travel_time.common_months.is_empty());
    assert!(report.stations.common_start_stations.is_empty());
    assert_eq!(report.trip_duration.total, DurationBreakdown::default());
    assert_eq!(report.trip_duration.mean, None);
    assert_eq!(report.users.user_types.total(), 0);

    let demo = report.users.demographics.unwrap();
    assert_eq!(demo.earliest_birth_year, None);
    assert!(demo.common_birth_years.is_empty());

    assert!(ds.cursor().next_page(5).is_empty());
}

#[test]
fn new_york_city_float_columns() {
    let config = fixtures();
    let ds = load_city(&config, City::NewYorkCity, &LoadOptions::default()).unwrap();
    let report = StatsReport::compute(&ds, &config);

    assert_eq!(report.rows, 8);
    assert_eq!(report.trip_duration.total_seconds, 6042);
    assert_eq!(report.travel_time.common_months, vec!["june"]);
    assert_eq!(report.travel_time.common_days, vec!["Wednesday"]);
    assert_eq!(report.travel_time.common_start_hours, vec![7]);
    assert_eq!(
        report.stations.common_trips,
        vec![StationPair::new("Suffolk St & Stanton St", "W Broadway & Spring St")]
    );

    let demo = report.users.demographics.unwrap();
    assert_eq!((demo.gender.male, demo.gender.female, demo.gender.unknown), (4, 2, 2));
    assert_eq!(demo.earliest_birth_year, Some(1981));
    assert_eq!(demo.most_recent_birth_year, Some(1998));
    assert_eq!(demo.common_birth_years, vec![1992]);
}

#[test]
fn washington_has_no_demographics() {
    let config = fixtures();
    let ds = load_city(&config, City::Washington, &LoadOptions::default()).unwrap();
    let report = StatsReport::compute(&ds, &config);

    assert_eq!(report.rows, 6);
    assert_eq!(report.trip_duration.total_seconds, 5409);
    assert_eq!(report.travel_time.common_months, vec!["january"]);
    let users = &report.users.user_types;
    assert_eq!((users.subscriber, users.customer, users.unknown), (3, 2, 1));
    assert!(report.users.demographics.is_none());
}

#[test]
fn filtering_twice_changes_nothing() {
    let config = fixtures();
    let full = load_city(&config, City::Chicago, &LoadOptions::default()).unwrap();
    let c = criteria(&config, "may", "friday");

    let once = filter(&full, &c);
    let twice = filter(&once, &c);
    assert_eq!(once, twice);
    assert_eq!(filter(&full, &FilterCriteria::all()), full);
}

#[test]
fn user_type_counts_partition_every_filter() {
    let config = fixtures();
    let full = load_city(&config, City::Chicago, &LoadOptions::default()).unwrap();

    for month in ["all", "january", "february", "march", "april", "may", "june"] {
        for day in ["all", "monday", "friday", "sunday"] {
            let ds = filter(&full, &criteria(&config, month, day));
            let report = StatsReport::compute(&ds, &config);
            assert_eq!(report.users.user_types.total(), ds.row_count(), "{month}/{day}");
            if let Some(demo) = report.users.demographics {
                assert_eq!(
                    demo.gender.male + demo.gender.female + demo.gender.unknown,
                    ds.row_count()
                );
            }
            let total = report.trip_duration.total;
            assert!(total.minutes < 60 && total.seconds < 60);
            assert_eq!(total.as_secs(), report.trip_duration.total_seconds);
        }
    }
}

#[test]
fn cursor_pages_through_filtered_rows() {
    let config = fixtures();
    let ds = load(&config, City::Chicago, &criteria(&config, "all", "friday"), &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 6);

    let mut cursor = ds.cursor();
    let first = cursor.next_page(4);
    assert_eq!(first.len(), 4);
    assert_eq!(first[0].start_station, "Clark St & Lake St");
    assert_eq!(cursor.next_page(4).len(), 2);
    assert!(cursor.next_page(4).is_empty());

    // Statistics are unaffected by paging.
    assert_eq!(StatsReport::compute(&ds, &config).rows, 6);
}

#[test]
fn invalid_filter_names_are_rejected() {
    let config = fixtures();
    assert!(matches!(
        FilterCriteria::from_names(&config, "july", "all"),
        Err(BikeshareError::InvalidMonth(m)) if m == "july"
    ));
    assert!(matches!(
        FilterCriteria::from_names(&config, "all", "funday"),
        Err(BikeshareError::InvalidDay(d)) if d == "funday"
    ));
}

#[test]
fn missing_source_file_is_an_io_error() {
    let config = BikeshareConfig::with_data_dir("tests/fixtures/no_such_dir");
    let err = load_city(&config, City::Chicago, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, BikeshareError::Io(_)));
}

#[test]
fn config_sources_can_point_at_other_formats() {
    let config = BikeshareConfig::from_json_str(&format!(
        r#"{{"data_dir": "{}/tests/fixtures", "sources": {{"chicago": "trips.ndjson"}}}}"#,
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let ds = load(&config, City::Chicago, &criteria(&config, "february", "all"), &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    let report = StatsReport::compute(&ds, &config);
    assert_eq!(report.travel_time.common_start_hours, vec![7]);
    assert_eq!(report.stations.common_trips, vec![StationPair::new("A", "B")]);

    // Sources given in JSON replace the default table.
    assert!(load_city(&config, City::Washington, &LoadOptions::default()).is_err());
}
