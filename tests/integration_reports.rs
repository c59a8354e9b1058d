//! End-to-end tests for report frame assembly over in-memory fixtures.

use routeframe::adapter;
use routeframe::frame::aggregate;
use routeframe::models::{Cube, CubeDimension, ExportRows};
use routeframe::reports;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Airport x year cube the way the backend returns it: unclassified period
/// first, totals pseudo-category appended to both dimensions
fn yearly_activity_cube() -> Cube {
    Cube::new(
        vec![
            CubeDimension::new(
                "reRepor1",
                labels(&["NEWCASTLE", "HEATHROW", "JERSEY", "TOTAL"]),
            ),
            CubeDimension::new("flReport", labels(&["0000", "2018", "2019", "TOTAL"])),
        ],
        vec![
            0, 10, 12, 22, // NEWCASTLE
            0, 20, 25, 45, // HEATHROW
            0, 0, 0, 0, // JERSEY
            0, 30, 37, 67, // TOTAL
        ],
        "routes",
    )
}

/// Destination x month cube for a single selected year
fn monthly_destination_cube() -> Cube {
    Cube::new(
        vec![
            CubeDimension::new("flOrigi1", labels(&["ALICANTE", "SEVILLE", "TOTAL"])),
            CubeDimension::new(
                "flReport",
                labels(&["000000", "201901", "201902", "TOTAL"]),
            ),
        ],
        vec![
            0, 4, 5, 9, // ALICANTE
            0, 0, 0, 0, // SEVILLE
            0, 4, 5, 9, // TOTAL
        ],
        "routes",
    )
}

fn destination_reference() -> ExportRows {
    ExportRows::new(
        labels(&["Origin Dest", "Lat", "Long"]),
        vec![
            labels(&["ALICANTE", "   38.282200", "   -0.558156"]),
            labels(&["SEVILLE", "   37.418000", "   -5.893110"]),
            labels(&["VALENCIA", "   39.489300", "   -0.481625"]),
        ],
    )
}

#[test]
fn route_activity_all_years() {
    let df = reports::route_activity_frame(&yearly_activity_cube(), None, 0).unwrap();

    // 3 airports x 2 classified years once sentinels are stripped
    assert_eq!(df.height(), 6);

    let airports: Vec<&str> = df
        .column("var_name")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(
        airports,
        ["NEWCASTLE", "NEWCASTLE", "HEATHROW", "HEATHROW", "JERSEY", "JERSEY"]
    );

    let periods: Vec<&str> = df
        .column("period_label")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(periods, ["2018", "2019", "2018", "2019", "2018", "2019"]);

    assert!(reports::has_activity(&df).unwrap());
}

#[test]
fn route_activity_top_one_keeps_busiest_airport() {
    let df = reports::route_activity_frame(&yearly_activity_cube(), None, 1).unwrap();

    let airports: Vec<&str> = df
        .column("var_name")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(airports, ["HEATHROW", "HEATHROW"]);

    let routes: Vec<i64> = df
        .column("routes")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(routes, [20, 25]);
}

#[test]
fn route_activity_filter_is_stable_under_reapplication() {
    let df = reports::route_activity_frame(&yearly_activity_cube(), None, 0).unwrap();
    let once = aggregate::filter_by_minimum_count(&df, "var_name", "routes", 20).unwrap();
    let twice = aggregate::filter_by_minimum_count(&once, "var_name", "routes", 20).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn destination_activity_selected_year() {
    let df = reports::destination_activity_frame(
        &monthly_destination_cube(),
        &destination_reference(),
        Some(2019),
    )
    .unwrap();

    // Seville saw no routes and Valencia has no measured rows at all; only
    // Alicante's two months survive the activity pruning
    assert_eq!(df.height(), 2);

    let dests: Vec<&str> = df
        .column("Origin Dest")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(dests, ["ALICANTE", "ALICANTE"]);

    let dates: Vec<&str> = df
        .column("date")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(dates, ["Jan 19", "Feb 19"]);

    // Coordinates ride along from the reference export, still verbatim
    let lat = df.column("Lat").unwrap().str().unwrap().get(0).unwrap();
    assert_eq!(lat, "   38.282200");
}

#[test]
fn destination_activity_no_routes_in_window() {
    let df = reports::destination_activity_frame(
        &monthly_destination_cube(),
        &destination_reference(),
        Some(2020),
    )
    .unwrap();

    assert_eq!(df.height(), 0);
    assert!(!reports::has_activity(&df).unwrap());
}

#[test]
fn cube_response_payload_to_activity_frame() {
    let payload = r#"{
        "dimensionResults": [
            {"id": "flOrigi1", "headerDescriptions": "LONDON\tPARIS\tTOTAL"},
            {"id": "flReport", "headerDescriptions": "2019\t2020\tTOTAL"}
        ],
        "measureResults": [
            {"id": "routes", "rows": ["5\t6\t11", "7\t8\t15", "12\t14\t26"]}
        ]
    }"#;

    let cube = adapter::cube_from_json(payload).unwrap();
    let df = reports::route_activity_frame(&cube, None, 0).unwrap();

    assert_eq!(df.height(), 4);
    let routes: Vec<i64> = df
        .column("routes")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(routes, [5, 6, 7, 8]);
}

#[test]
fn selector_options_from_payload() {
    let payload = r#"{
        "dimensionResults": [
            {"id": "reRepor1", "headerDescriptions": "ABERDEEN\tBELFAST CITY\tTOTAL"}
        ],
        "measureResults": [
            {"id": "routes", "rows": ["4540\t3200\t7740"]}
        ]
    }"#;

    let cube = adapter::cube_from_json(payload).unwrap();
    let options = reports::selector_labels_with_minimum(&cube, 0).unwrap();
    assert_eq!(options, ["Aberdeen", "Belfast City"]);
}
