use indicatif::ProgressBar;
use placeinfer::extraction::PlaceExtractor;
use placeinfer::resolver::{CountryLookup, CountryResolver, CsvCountryTable, SqliteCountryTable};
use placeinfer::source::{AddressReader, ReaderOptions};
use placeinfer::{GroupResult, Pipeline, TieBreak, group_addresses};
use regex::RegexBuilder;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

const ADDRESSES: &str = "testdata/integration/addresses.csv";
const PLACES: &str = "testdata/integration/places.csv";

fn run(lookup: Arc<dyn CountryLookup>, options: ReaderOptions) -> Vec<GroupResult> {
    let rows = AddressReader::new(options)
        .read_path(Path::new(ADDRESSES))
        .expect("Address source should be readable");
    let groups = group_addresses(rows);
    let pipeline = Pipeline::new(
        PlaceExtractor::default(),
        CountryResolver::new(lookup),
        TieBreak::FirstListed,
    );
    pipeline.process(&groups, &ProgressBar::hidden(), |_| {})
}

fn csv_lookup() -> Arc<dyn CountryLookup> {
    Arc::new(CsvCountryTable::from_path(Path::new(PLACES)).expect("Lookup table should load"))
}

fn find<'a>(results: &'a [GroupResult], id: &str) -> &'a GroupResult {
    results
        .iter()
        .find(|r| r.group_id == id)
        .unwrap_or_else(|| panic!("missing group {id}"))
}

#[test]
fn test_groups_follow_input_order() {
    let results = run(csv_lookup(), ReaderOptions::default());
    let ids: Vec<&str> = results.iter().map(|r| r.group_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "acme.in",
            "maple.ca",
            "postal.example",
            "lost.example",
            "stpaul.us"
        ]
    );
}

#[test]
fn test_single_country_group_across_addresses() {
    let results = run(csv_lookup(), ReaderOptions::default());
    let acme = find(&results, "acme.in");

    assert_eq!(acme.addresses.len(), 2);
    for place in ["Pune", "Maharashtra", "India"] {
        assert!(acme.places.iter().any(|p| p == place), "{:?}", acme.places);
        assert_eq!(acme.country_map[place], "India");
    }
    assert_eq!(
        acme.places.iter().filter(|p| p.as_str() == "Pune").count(),
        1
    );
    assert_eq!(acme.countries, vec!["India"]);
}

#[test]
fn test_ambiguous_place_keeps_first_listed_country() {
    let results = run(csv_lookup(), ReaderOptions::default());
    let maple = find(&results, "maple.ca");

    assert_eq!(maple.country_map["Delhi"], "India");
    assert!(maple.places.iter().any(|p| p == "Ontario"));
    assert!(!maple.country_map.contains_key("Ontario"));
    assert_eq!(maple.countries, vec!["India"]);
}

#[test]
fn test_groups_without_resolved_places_are_still_reported() {
    let results = run(csv_lookup(), ReaderOptions::default());

    let postal = find(&results, "postal.example");
    assert!(postal.places.is_empty());
    assert!(postal.countries.is_empty());

    let lost = find(&results, "lost.example");
    assert!(lost.places.iter().any(|p| p == "Atlantis"));
    assert!(lost.country_map.is_empty());
    assert!(lost.countries.is_empty());
}

#[test]
fn test_group_scores_pick_majority_country() {
    let results = run(csv_lookup(), ReaderOptions::default());
    let stpaul = find(&results, "stpaul.us");

    assert_eq!(stpaul.country_map["Saint Paul"], "United States");
    assert_eq!(stpaul.country_map["MN"], "United States");
    assert_eq!(stpaul.country_map["Paul"], "Brazil");
    assert_eq!(stpaul.countries, vec!["United States", "Brazil"]);
}

#[test]
fn test_filter_and_window() {
    let filter = RegexBuilder::new("delhi")
        .case_insensitive(true)
        .build()
        .unwrap();
    let results = run(
        csv_lookup(),
        ReaderOptions {
            filter: Some(filter),
            offset: 1,
            ..ReaderOptions::default()
        },
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].group_id, "maple.ca");
    assert_eq!(results[0].addresses, vec!["Delhi, Ontario"]);
}

#[test]
fn test_sqlite_lookup_matches_csv_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("places.db");
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE places_countries (name TEXT, country TEXT);")
            .unwrap();
        let mut reader = csv::Reader::from_path(PLACES).unwrap();
        for record in reader.records() {
            let record = record.unwrap();
            conn.execute(
                "INSERT INTO places_countries (name, country) VALUES (?1, ?2)",
                rusqlite::params![&record[0], &record[1]],
            )
            .unwrap();
        }
    }

    let sqlite: Arc<dyn CountryLookup> = Arc::new(SqliteCountryTable::open(&db_path).unwrap());
    let from_sqlite = run(sqlite, ReaderOptions::default());
    let from_csv = run(csv_lookup(), ReaderOptions::default());
    assert_eq!(from_sqlite, from_csv);
}

#[test]
fn test_output_record_shape() {
    let results = run(csv_lookup(), ReaderOptions::default());
    let json = serde_json::to_value(find(&results, "maple.ca")).unwrap();

    let keys: Vec<&str> = json
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["groupId", "addresses", "places", "countryMap", "countries"]
    );
    assert_eq!(json["countryMap"]["Delhi"], "India");
}
