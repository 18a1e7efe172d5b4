use crate::helpers::{
    seed_database, seed_database_with, spawn_app, test_period, TOBS_STATION,
};
use axum::http::StatusCode;
use std::{collections::BTreeMap, sync::Arc};
use surfsup::{
    app, build_app_state, AppSettings, ClimateAccess, ClimateData, DateRange, ErrorResponse,
    PrecipitationReading, TemperatureStats,
};
use tempfile::TempDir;
use time::macros::date;

async fn seeded_access() -> (TempDir, ClimateAccess) {
    let dir = TempDir::new().unwrap();
    let path = seed_database(&dir).await;
    (dir, ClimateAccess::new(&path, 2))
}

#[tokio::test]
async fn health_check_passes_on_seeded_dataset() {
    let (_dir, access) = seeded_access().await;
    access.health_check().await.unwrap();
}

#[tokio::test]
async fn measurements_since_filters_by_date_and_keeps_storage_order() {
    let (_dir, access) = seeded_access().await;

    let rows = access
        .measurements_since(test_period().cutoff(), None)
        .await
        .unwrap();

    let dates: Vec<&str> = rows.iter().map(|m| m.date.as_str()).collect();
    assert_eq!(
        dates,
        ["2016-08-23", "2016-08-23", "2017-08-18", "2017-08-18", "2017-08-23"]
    );
    assert_eq!(rows[2].precipitation, None);
    assert_eq!(rows[1].station_id, TOBS_STATION);
}

#[tokio::test]
async fn measurements_since_restricts_to_one_station() {
    let (_dir, access) = seeded_access().await;

    let rows = access
        .measurements_since(test_period().cutoff(), Some(TOBS_STATION.to_string()))
        .await
        .unwrap();

    let tobs: Vec<Option<f64>> = rows.iter().map(|m| m.observed_temperature).collect();
    assert_eq!(tobs, [Some(77.0), Some(79.0), Some(70.0)]);
    assert!(rows.iter().all(|m| m.station_id == TOBS_STATION));
}

#[tokio::test]
async fn stations_reads_every_row() {
    let (_dir, access) = seeded_access().await;

    let stations = access.stations().await.unwrap();

    assert_eq!(stations.len(), 3);
    assert_eq!(stations[0].station_id, "USC00519397");
    assert_eq!(stations[2].name.as_deref(), Some("WAIHEE 837.5, HI US"));
    assert_eq!(stations[2].elevation, Some(32.9));
}

#[tokio::test]
async fn null_station_metadata_is_none_not_empty() {
    let dir = TempDir::new().unwrap();
    let path = seed_database_with(
        &dir,
        "INSERT INTO station (station, name, latitude, longitude, elevation)
         VALUES ('USC00511918', NULL, NULL, NULL, NULL);",
    )
    .await;
    let access = ClimateAccess::new(&path, 1);

    let stations = access.stations().await.unwrap();

    assert_eq!(stations.len(), 4);
    assert_eq!(stations[3].station_id, "USC00511918");
    assert_eq!(stations[3].name, None);
    assert_eq!(stations[3].latitude, None);
    assert_eq!(stations[3].longitude, None);
    assert_eq!(stations[3].elevation, None);
}

#[tokio::test]
async fn null_temperature_is_served_as_null_not_zero() {
    let dir = TempDir::new().unwrap();
    let path = seed_database_with(
        &dir,
        "INSERT INTO measurement (station, date, prcp, tobs)
         VALUES ('USC00519281', '2017-01-01', 0.5, NULL);",
    )
    .await;
    let access = ClimateAccess::new(&path, 1);

    let rows = access
        .measurements_since(date!(2017 - 01 - 01), Some(TOBS_STATION.to_string()))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].date, "2017-01-01");
    assert_eq!(rows[2].observed_temperature, None);

    let test_app = spawn_app(Arc::new(access)).await;

    let (status, body) = test_app.get("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "[77.0,79.0,70.0,null]");

    let (status, stats): (_, TemperatureStats) =
        test_app.get_json("/api/v1.0/start_date/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats.min, Some(70.0));
    assert_eq!(stats.avg, Some(75.0));
    assert_eq!(stats.max, Some(79.0));
}

#[tokio::test]
async fn temperature_stats_are_ordered_for_every_start_date() {
    let (_dir, access) = seeded_access().await;

    for start in [
        date!(2010 - 01 - 01),
        date!(2016 - 08 - 22),
        date!(2016 - 08 - 23),
        date!(2017 - 08 - 18),
        date!(2017 - 08 - 23),
    ] {
        let stats = access
            .temperature_stats(DateRange::starting(start))
            .await
            .unwrap();
        let (min, avg, max) = (stats.min.unwrap(), stats.avg.unwrap(), stats.max.unwrap());
        assert!(min <= avg && avg <= max, "{start}: {stats:?}");
    }
}

#[tokio::test]
async fn temperature_stats_bounds_are_inclusive() {
    let (_dir, access) = seeded_access().await;

    let stats = access
        .temperature_stats(DateRange::between(
            date!(2016 - 08 - 22),
            date!(2016 - 08 - 23),
        ))
        .await
        .unwrap();

    assert_eq!(
        stats,
        TemperatureStats {
            min: Some(68.0),
            avg: Some(75.5),
            max: Some(81.0),
        }
    );
}

#[tokio::test]
async fn temperature_stats_are_null_for_empty_ranges() {
    let (_dir, access) = seeded_access().await;

    let reversed = access
        .temperature_stats(DateRange::between(
            date!(2017 - 08 - 23),
            date!(2016 - 08 - 23),
        ))
        .await
        .unwrap();
    assert_eq!(reversed, TemperatureStats::default());

    let future = access
        .temperature_stats(DateRange::starting(date!(2018 - 01 - 01)))
        .await
        .unwrap();
    assert_eq!(future, TemperatureStats::default());
}

#[tokio::test]
async fn api_serves_seeded_dataset_end_to_end() {
    let (dir, access) = seeded_access().await;
    let test_app = spawn_app(Arc::new(access)).await;

    let (status, by_date): (_, BTreeMap<String, Option<f64>>) =
        test_app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_date.len(), 3);
    assert_eq!(by_date["2016-08-23"], Some(1.79));
    assert_eq!(by_date["2017-08-18"], Some(0.06));
    assert!(!by_date.contains_key("2016-08-22"));

    let (_, readings): (_, Vec<PrecipitationReading>) =
        test_app.get_json("/api/v1.0/precipitation/readings").await;
    assert_eq!(readings.len(), 5);

    let (_, stations): (_, Vec<String>) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(stations, ["USC00519397", "USC00513117", "USC00519281"]);

    let (_, tobs): (_, Vec<Option<f64>>) = test_app.get_json("/api/v1.0/tobs").await;
    assert_eq!(tobs, [Some(77.0), Some(79.0), Some(70.0)]);

    let (status, stats): (_, TemperatureStats) =
        test_app.get_json("/api/v1.0/start_date/2017-08-18").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats.min, Some(70.0));
    assert_eq!(stats.avg, Some(75.0));
    assert_eq!(stats.max, Some(79.0));

    let (status, stats): (_, TemperatureStats) = test_app
        .get_json("/api/v1.0/start_end_date/2017-08-23/2017-08-18")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, TemperatureStats::default());

    drop(dir);
}

#[tokio::test]
async fn missing_dataset_still_starts_and_fails_per_request() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.sqlite");

    let app_state = build_app_state(AppSettings {
        database: missing.to_str().unwrap().to_owned(),
        max_connections: 1,
        reference_date: "2017-08-23".to_string(),
        lookback_days: 365,
        station_id: TOBS_STATION.to_string(),
    })
    .await
    .expect("service should start without its dataset");
    assert!(!missing.exists(), "read-only pool must not create the file");

    let test_app = crate::helpers::TestApp {
        app: app(app_state),
    };

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start_date/2017-01-01",
    ] {
        let (status, body): (_, ErrorResponse) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert!(!body.error.is_empty());
    }
}

#[tokio::test]
async fn invalid_reference_date_fails_startup() {
    let result = build_app_state(AppSettings {
        database: "./Resources/hawaii.sqlite".to_string(),
        max_connections: 1,
        reference_date: "08/23/2017".to_string(),
        lookback_days: 365,
        station_id: TOBS_STATION.to_string(),
    })
    .await;

    assert!(result.is_err());
}
