//! Integration tests for a full session.
//!
//! These tests drive the controller the way a UI would:
//! - initial fix → map opened (or fatal message)
//! - map clicks and radius input → geofence overlay and status
//! - place requests → markers, alerts, and last-query-wins ordering
//!
//! Run with: `cargo test --test session_integration`

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use solotrav::app::{AppConfig, AppController, AppError, AppEvent, AppState, GEOFENCE_SET_PROMPT};
use solotrav::coord::Position;
use solotrav::map::{RecordingSurface, StatusTone};
use solotrav::places::{
    AsyncHttpClient, OverpassClient, PlaceCategory, PlaceOfInterest, PlaceQuery, PlaceQueryError,
};
use solotrav::position::{ChannelPositionSource, PositionError, PositionFeed};

// ============================================================================
// Test Doubles
// ============================================================================

type QueryResult = Result<Vec<PlaceOfInterest>, PlaceQueryError>;

/// Answers every query with the same result.
struct FixedPlaces(QueryResult);

impl PlaceQuery for FixedPlaces {
    async fn query(
        &self,
        _category: PlaceCategory,
        _center: Position,
        _radius_meters: u32,
    ) -> QueryResult {
        self.0.clone()
    }
}

/// Holds each category's query open until the test releases it.
struct GatedPlaces {
    gates: Mutex<HashMap<PlaceCategory, oneshot::Receiver<QueryResult>>>,
}

impl GatedPlaces {
    fn new(gates: Vec<(PlaceCategory, oneshot::Receiver<QueryResult>)>) -> Self {
        Self {
            gates: Mutex::new(gates.into_iter().collect()),
        }
    }
}

impl PlaceQuery for GatedPlaces {
    async fn query(
        &self,
        category: PlaceCategory,
        _center: Position,
        _radius_meters: u32,
    ) -> QueryResult {
        let gate = self.gates.lock().unwrap().remove(&category);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PlaceQueryError::Network("gate dropped".to_string()))),
            None => Err(PlaceQueryError::Network("no gate".to_string())),
        }
    }
}

/// HTTP client serving a fixed body.
struct StaticHttp(&'static str);

impl AsyncHttpClient for StaticHttp {
    async fn get(&self, _url: &str) -> Result<Vec<u8>, PlaceQueryError> {
        Ok(self.0.as_bytes().to_vec())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn origin() -> Position {
    Position::new(0.0, 0.0)
}

fn police(label: &str, lon: f64) -> PlaceOfInterest {
    PlaceOfInterest::new(Position::new(0.0, lon), label, PlaceCategory::Police)
}

fn hospital(label: &str, lon: f64) -> PlaceOfInterest {
    PlaceOfInterest::new(Position::new(0.0, lon), label, PlaceCategory::Hospital)
}

async fn started<Q: PlaceQuery>(
    places: Q,
) -> (
    AppController<ChannelPositionSource, RecordingSurface, Q>,
    PositionFeed,
) {
    let (source, feed) = ChannelPositionSource::new();
    feed.push(origin());

    let mut app = AppController::new(AppConfig::default(), source, RecordingSurface::new(), places);
    app.start().await.expect("initial fix should succeed");
    (app, feed)
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Permission denied on the initial fix: fatal message, map never opened.
#[tokio::test]
async fn test_initial_fix_denied_is_fatal() {
    let (source, feed) = ChannelPositionSource::new();
    feed.push_error(PositionError::PermissionDenied);

    let mut app = AppController::new(
        AppConfig::default(),
        source,
        RecordingSurface::new(),
        FixedPlaces(Ok(Vec::new())),
    );
    let result = app.start().await;

    assert!(matches!(
        result,
        Err(AppError::InitialFix(PositionError::PermissionDenied))
    ));
    assert_eq!(app.state(), AppState::Failed);

    let surface = app.map().surface();
    assert!(surface.fatal().unwrap().starts_with("Location access denied"));
    assert!(surface.opened().is_none());
    assert_eq!(surface.layer_count(), 0);

    // Failed is terminal
    let (_tx, rx) = mpsc::channel(1);
    assert!(matches!(
        app.run(rx).await,
        Err(AppError::InvalidState { .. })
    ));
}

/// No fix within the timeout is fatal too.
#[tokio::test(start_paused = true)]
async fn test_initial_fix_timeout_is_fatal() {
    let (source, _feed) = ChannelPositionSource::new();
    let mut app = AppController::new(
        AppConfig::default(),
        source,
        RecordingSurface::new(),
        FixedPlaces(Ok(Vec::new())),
    );

    let result = app.start().await;
    assert!(matches!(
        result,
        Err(AppError::InitialFix(PositionError::Timeout(7000)))
    ));
    assert!(app.map().surface().fatal().is_some());
    assert!(!app.map().is_open());
}

// ============================================================================
// Geofence
// ============================================================================

/// A sample ~500.4 m from the center with a 500 m radius is outside.
#[tokio::test]
async fn test_sample_just_past_boundary_is_outside() {
    let (mut app, _feed) = started(FixedPlaces(Ok(Vec::new()))).await;

    app.handle_map_click(origin());
    let status = app.handle_position(Position::new(0.0, 0.0045));

    assert!(status.is_outside());
    assert_eq!(
        app.map().surface().status(),
        Some(("Outside geofence (500 m)", StatusTone::Warning))
    );
}

/// Negative radius input is ignored and the redraw keeps the old radius.
#[tokio::test]
async fn test_negative_radius_redraws_with_previous_radius() {
    let (mut app, _feed) = started(FixedPlaces(Ok(Vec::new()))).await;

    app.handle_map_click(origin());
    app.handle_radius_input("-5");

    assert_eq!(app.geofence().definition().radius_meters(), 500.0);
    assert_eq!(
        app.map().surface().geofence_overlays(),
        vec![(origin(), 500.0)]
    );
}

/// Moving the center replaces the overlay rather than adding a second one.
#[tokio::test]
async fn test_second_click_moves_geofence() {
    let (mut app, _feed) = started(FixedPlaces(Ok(Vec::new()))).await;

    app.handle_map_click(origin());
    app.handle_map_click(Position::new(0.0, 0.02));

    assert_eq!(
        app.map().surface().geofence_overlays(),
        vec![(Position::new(0.0, 0.02), 500.0)]
    );
    assert_eq!(
        app.map().surface().status(),
        Some((GEOFENCE_SET_PROMPT, StatusTone::Neutral))
    );
}

// ============================================================================
// Nearby Places
// ============================================================================

/// Empty hospital result: distinct alert, no markers.
#[tokio::test]
async fn test_empty_hospital_result_alerts() {
    let (mut app, _feed) = started(FixedPlaces(Ok(Vec::new()))).await;

    app.request_places(PlaceCategory::Hospital);
    let completion = app.next_query_completion().await.unwrap();
    app.handle_query_completion(completion);

    let surface = app.map().surface();
    assert_eq!(
        surface.alerts(),
        &["No nearby hospitals found within 3 km.".to_string()]
    );
    assert!(surface.place_markers().is_empty());
}

/// A centroid-only police element with no name uses the centroid and the
/// default label.
#[tokio::test]
async fn test_centroid_only_police_station() {
    let body = r#"{"elements": [{"type": "way", "id": 7, "center": {"lat": 0.01, "lon": 0.02}, "tags": {"amenity": "police"}}]}"#;
    let (mut app, _feed) = started(OverpassClient::new(StaticHttp(body))).await;

    app.request_places(PlaceCategory::Police);
    let completion = app.next_query_completion().await.unwrap();
    assert!(app.handle_query_completion(completion));

    let markers = app.map().surface().place_markers();
    assert_eq!(
        markers,
        vec![PlaceOfInterest::new(
            Position::new(0.01, 0.02),
            "Police Station",
            PlaceCategory::Police
        )]
    );
}

/// Requesting places clears the previous markers straight away.
#[tokio::test]
async fn test_new_request_clears_old_markers() {
    let (mut app, _feed) = started(FixedPlaces(Ok(vec![police("A", 0.01)]))).await;

    app.request_places(PlaceCategory::Police);
    let completion = app.next_query_completion().await.unwrap();
    app.handle_query_completion(completion);
    assert_eq!(app.map().place_marker_count(), 1);

    app.request_places(PlaceCategory::Police);
    assert_eq!(app.map().place_marker_count(), 0);
}

/// Q1 is issued before Q2 but answers after it: only Q2's markers remain.
#[tokio::test]
async fn test_last_query_wins() {
    let (police_tx, police_rx) = oneshot::channel();
    let (hospital_tx, hospital_rx) = oneshot::channel();
    let places = GatedPlaces::new(vec![
        (PlaceCategory::Police, police_rx),
        (PlaceCategory::Hospital, hospital_rx),
    ]);
    let (mut app, _feed) = started(places).await;

    assert_eq!(app.request_places(PlaceCategory::Police), Some(1));
    assert_eq!(app.request_places(PlaceCategory::Hospital), Some(2));

    hospital_tx.send(Ok(vec![hospital("General", 0.01)])).unwrap();
    let second = app.next_query_completion().await.unwrap();
    assert_eq!(second.sequence, 2);
    assert!(app.handle_query_completion(second));

    police_tx
        .send(Ok(vec![police("Precinct 1", 0.02), police("Precinct 2", 0.03)]))
        .unwrap();
    let first = app.next_query_completion().await.unwrap();
    assert_eq!(first.sequence, 1);
    assert!(!app.handle_query_completion(first));

    assert_eq!(
        app.map().surface().place_markers(),
        vec![hospital("General", 0.01)]
    );
    assert!(app.map().surface().alerts().is_empty());
}

// ============================================================================
// Event Loop
// ============================================================================

/// Full loop: click, samples (with a transient error in between), a place
/// request, then quit.
#[tokio::test(start_paused = true)]
async fn test_event_loop_end_to_end() {
    let (mut app, feed) = started(FixedPlaces(Ok(vec![police("Central", 0.004)]))).await;
    let (events_tx, events_rx) = mpsc::channel(16);

    let handle = tokio::spawn(async move {
        app.run(events_rx).await.unwrap();
        app
    });
    let settle = || tokio::time::sleep(Duration::from_millis(10));

    events_tx.send(AppEvent::MapClicked(origin())).await.unwrap();
    settle().await;

    feed.push(Position::new(0.0, 0.001));
    settle().await;

    feed.push_error(PositionError::Unavailable("signal lost".to_string()));
    feed.push(Position::new(0.0, 0.01));
    settle().await;

    events_tx
        .send(AppEvent::FindNearby(PlaceCategory::Police))
        .await
        .unwrap();
    settle().await;

    events_tx.send(AppEvent::Quit).await.unwrap();
    let app = handle.await.unwrap();

    let surface = app.map().surface();
    assert_eq!(surface.user_marker(), Some(Position::new(0.0, 0.01)));
    assert_eq!(surface.user_marker_creations(), 1);
    assert_eq!(
        surface.status(),
        Some(("Outside geofence (1112 m)", StatusTone::Warning))
    );
    // The sensor error between the two samples left no trace on the map
    let history = surface.status_history();
    let inside = history
        .iter()
        .position(|s| s == "Inside geofence (111 m)")
        .expect("inside status rendered");
    assert_eq!(
        &history[inside..],
        &[
            "Inside geofence (111 m)".to_string(),
            "Outside geofence (1112 m)".to_string()
        ]
    );
    assert!(surface.alerts().is_empty());
    assert!(surface.fatal().is_none());
    assert_eq!(surface.place_markers(), vec![police("Central", 0.004)]);
    assert_eq!(app.state(), AppState::Ready);
}

/// Closing the event channel ends the loop.
#[tokio::test]
async fn test_event_loop_ends_when_events_close() {
    let (mut app, _feed) = started(FixedPlaces(Ok(Vec::new()))).await;
    let (events_tx, events_rx) = mpsc::channel(1);
    drop(events_tx);

    app.run(events_rx).await.unwrap();
    assert_eq!(app.state(), AppState::Ready);
}
