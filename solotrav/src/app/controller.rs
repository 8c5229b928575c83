//! The session controller and its event loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::config::AppConfig;
use super::error::AppError;
use super::events::{AppEvent, AppState, QueryCompletion};
use crate::coord::Position;
use crate::geofence::{GeofenceModel, MembershipStatus};
use crate::map::{MapSurface, MapView};
use crate::places::{PlaceCategory, PlaceQuery};
use crate::position::{PositionError, PositionSource, PositionWatch};

/// Prompt shown after the geofence center is placed.
pub const GEOFENCE_SET_PROMPT: &str = "Geofence center set. We'll warn you if you exit.";

/// Alert shown when a place query fails for any reason.
pub const PLACES_FAILED_MESSAGE: &str = "Couldn't load nearby places, try again later.";

/// Alert shown when places are requested before the first fix.
pub const LOCATION_NOT_READY: &str = "Location not ready yet.";

/// Alert shown when a place query succeeds with nothing in range.
pub fn no_results_message(category: PlaceCategory, radius_meters: u32) -> String {
    format!(
        "No nearby {} found within {} km.",
        category.plural(),
        radius_meters as f64 / 1000.0
    )
}

/// Owns one session: sensor subscription, geofence, map and place queries.
pub struct AppController<S, M, Q>
where
    S: PositionSource,
    M: MapSurface,
    Q: PlaceQuery,
{
    config: AppConfig,
    source: S,
    map: MapView<M>,
    geofence: GeofenceModel,
    places: Arc<Q>,
    state: AppState,
    last_position: Option<Position>,
    last_status: MembershipStatus,
    watch: Option<PositionWatch>,
    latest_query: u64,
    completions_tx: mpsc::UnboundedSender<QueryCompletion>,
    completions_rx: Option<mpsc::UnboundedReceiver<QueryCompletion>>,
}

impl<S, M, Q> AppController<S, M, Q>
where
    S: PositionSource,
    M: MapSurface,
    Q: PlaceQuery,
{
    /// Create an uninitialized session.
    pub fn new(config: AppConfig, source: S, surface: M, places: Q) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            map: MapView::new(surface, config.zoom),
            geofence: GeofenceModel::with_radius(config.initial_radius_meters),
            config,
            source,
            places: Arc::new(places),
            state: AppState::Uninitialized,
            last_position: None,
            last_status: MembershipStatus::NoGeofence,
            watch: None,
            latest_query: 0,
            completions_tx,
            completions_rx: Some(completions_rx),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn geofence(&self) -> &GeofenceModel {
        &self.geofence
    }

    pub fn map(&self) -> &MapView<M> {
        &self.map
    }

    /// Most recent position, from the initial fix or the live stream.
    pub fn last_position(&self) -> Option<Position> {
        self.last_position
    }

    /// Status computed from the most recent sample.
    pub fn last_status(&self) -> MembershipStatus {
        self.last_status
    }

    /// Sequence number of the most recently issued place query.
    pub fn latest_query(&self) -> u64 {
        self.latest_query
    }

    /// Acquire the initial fix and move to Ready, or to Failed.
    ///
    /// On failure the fatal message is shown and the map is never opened.
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.expect_state(AppState::Uninitialized)?;

        info!("Requesting initial position fix");
        match self.source.current_position(&self.config.position).await {
            Ok(position) => {
                info!(%position, "Initial position acquired");
                self.map.open(position);
                self.last_position = Some(position);
                self.last_status = self.geofence.classify(&position);
                self.map.render_status(&self.last_status);
                self.watch = Some(self.source.watch(&self.config.position));
                self.state = AppState::Ready;
                Ok(())
            }
            Err(e) => {
                let err = AppError::InitialFix(e);
                error!(error = %err, "Session cannot start");
                self.map.show_fatal(&err.fatal_message());
                self.state = AppState::Failed;
                Err(err)
            }
        }
    }

    /// Apply a live position sample.
    pub fn handle_position(&mut self, position: Position) -> MembershipStatus {
        if self.state != AppState::Ready {
            debug!(state = %self.state, "Ignoring position sample");
            return self.last_status;
        }

        self.last_position = Some(position);
        self.map.update_user_position(position);

        let status = self.geofence.classify(&position);
        match (self.last_status, status) {
            (MembershipStatus::Inside(_), MembershipStatus::Outside(d)) => {
                warn!(distance_m = d, "Left the geofence")
            }
            (MembershipStatus::Outside(_), MembershipStatus::Inside(d)) => {
                info!(distance_m = d, "Back inside the geofence")
            }
            _ => {}
        }
        self.last_status = status;
        self.map.render_status(&status);
        status
    }

    /// A sample in the live stream failed. Logged only; tracking continues.
    pub fn handle_position_error(&mut self, error: &PositionError) {
        warn!(error = %error, "Position update failed, continuing");
    }

    /// Place the geofence center where the map was clicked.
    pub fn handle_map_click(&mut self, position: Position) {
        if self.state != AppState::Ready {
            debug!(state = %self.state, "Ignoring map click");
            return;
        }

        info!(center = %position, "Geofence center set");
        self.geofence.set_center(position);
        self.map.draw_geofence(self.geofence.definition());
        self.map.show_prompt(GEOFENCE_SET_PROMPT);
    }

    /// Apply the radius input and redraw the overlay.
    ///
    /// Invalid input keeps the previous radius; the overlay is redrawn
    /// either way.
    pub fn handle_radius_input(&mut self, input: &str) {
        if self.state != AppState::Ready {
            debug!(state = %self.state, "Ignoring radius input");
            return;
        }

        if self.geofence.set_radius(input) {
            info!(
                radius_m = self.geofence.definition().radius_meters(),
                "Geofence radius changed"
            );
        }
        self.map.draw_geofence(self.geofence.definition());
    }

    /// Clear the place markers and start a query around the last position.
    ///
    /// Returns the query's sequence number, or `None` if there is no
    /// position yet (the user is alerted).
    pub fn request_places(&mut self, category: PlaceCategory) -> Option<u64> {
        let center = match (self.state, self.last_position) {
            (AppState::Ready, Some(position)) => position,
            _ => {
                self.map.alert(LOCATION_NOT_READY);
                return None;
            }
        };

        self.map.clear_places();
        self.latest_query += 1;

        let sequence = self.latest_query;
        let radius_meters = self.config.search_radius_meters;
        let places = Arc::clone(&self.places);
        let tx = self.completions_tx.clone();

        info!(%category, sequence, %center, radius_meters, "Searching nearby places");
        tokio::spawn(async move {
            let result = places.query(category, center, radius_meters).await;
            let _ = tx.send(QueryCompletion {
                sequence,
                category,
                radius_meters,
                result,
            });
        });

        Some(sequence)
    }

    /// Render a finished query unless a newer one has been issued since.
    ///
    /// Returns whether the completion was applied.
    pub fn handle_query_completion(&mut self, completion: QueryCompletion) -> bool {
        if completion.sequence != self.latest_query {
            debug!(
                sequence = completion.sequence,
                latest = self.latest_query,
                "Discarding stale place query result"
            );
            return false;
        }

        match completion.result {
            Ok(places) if places.is_empty() => {
                info!(category = %completion.category, "No places found");
                self.map
                    .alert(&no_results_message(completion.category, completion.radius_meters));
            }
            Ok(places) => {
                info!(category = %completion.category, count = places.len(), "Places found");
                self.map.replace_places(&places);
            }
            Err(e) => {
                error!(category = %completion.category, error = %e, "Place query failed");
                self.map.alert(PLACES_FAILED_MESSAGE);
            }
        }
        true
    }

    /// Wait for the next finished place query.
    ///
    /// For driving the controller without [`run`](Self::run).
    pub async fn next_query_completion(&mut self) -> Option<QueryCompletion> {
        match self.completions_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Dispatch a UI event. Returns `false` when the session should end.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::MapClicked(position) => self.handle_map_click(position),
            AppEvent::RadiusInput(input) => self.handle_radius_input(&input),
            AppEvent::FindNearby(category) => {
                self.request_places(category);
            }
            AppEvent::Quit => return false,
        }
        true
    }

    /// Run the event loop until [`AppEvent::Quit`] or until the event
    /// channel closes.
    ///
    /// Position samples are handled in arrival order; place query results
    /// are filtered by sequence number as they arrive.
    pub async fn run(&mut self, mut events: mpsc::Receiver<AppEvent>) -> Result<(), AppError> {
        self.expect_state(AppState::Ready)?;

        let mut watch = self.watch.take();
        let mut completions = self.completions_rx.take();
        info!("Session running");

        loop {
            tokio::select! {
                sample = next_sample(&mut watch) => match sample {
                    Some(Ok(position)) => {
                        self.handle_position(position);
                    }
                    Some(Err(e)) => self.handle_position_error(&e),
                    None => {
                        info!("Position stream ended");
                        watch = None;
                    }
                },
                Some(completion) = next_completion(&mut completions) => {
                    self.handle_query_completion(completion);
                }
                event = events.recv() => match event {
                    Some(event) => {
                        if !self.handle_event(event) {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        self.watch = watch;
        self.completions_rx = completions;
        info!("Session ended");
        Ok(())
    }

    fn expect_state(&self, expected: AppState) -> Result<(), AppError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AppError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}

async fn next_sample(
    watch: &mut Option<PositionWatch>,
) -> Option<Result<Position, PositionError>> {
    match watch {
        Some(watch) => watch.next_sample().await,
        None => std::future::pending().await,
    }
}

async fn next_completion(
    completions: &mut Option<mpsc::UnboundedReceiver<QueryCompletion>>,
) -> Option<QueryCompletion> {
    match completions {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{RecordingSurface, StatusTone, NO_GEOFENCE_PROMPT};
    use crate::places::{PlaceOfInterest, PlaceQueryError};
    use crate::position::ChannelPositionSource;

    /// Place query answering every request with the same result.
    struct FixedPlaces(Result<Vec<PlaceOfInterest>, PlaceQueryError>);

    impl PlaceQuery for FixedPlaces {
        async fn query(
            &self,
            _category: PlaceCategory,
            _center: Position,
            _radius_meters: u32,
        ) -> Result<Vec<PlaceOfInterest>, PlaceQueryError> {
            self.0.clone()
        }
    }

    type TestController = AppController<ChannelPositionSource, RecordingSurface, FixedPlaces>;

    async fn ready_controller(
        places: Result<Vec<PlaceOfInterest>, PlaceQueryError>,
    ) -> TestController {
        let (source, feed) = ChannelPositionSource::new();
        feed.push(Position::new(0.0, 0.0));
        let mut app = AppController::new(
            AppConfig::default(),
            source,
            RecordingSurface::new(),
            FixedPlaces(places),
        );
        app.start().await.unwrap();
        app
    }

    #[test]
    fn test_no_results_message() {
        assert_eq!(
            no_results_message(PlaceCategory::Hospital, 3000),
            "No nearby hospitals found within 3 km."
        );
        assert_eq!(
            no_results_message(PlaceCategory::Police, 2500),
            "No nearby police stations found within 2.5 km."
        );
    }

    #[tokio::test]
    async fn test_start_opens_map_at_fix() {
        let app = ready_controller(Ok(Vec::new())).await;

        assert_eq!(app.state(), AppState::Ready);
        let surface = app.map().surface();
        assert_eq!(surface.opened(), Some((Position::new(0.0, 0.0), 15)));
        assert_eq!(surface.user_marker(), Some(Position::new(0.0, 0.0)));
        assert_eq!(surface.status(), Some((NO_GEOFENCE_PROMPT, StatusTone::Neutral)));
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let mut app = ready_controller(Ok(Vec::new())).await;
        let result = app.start().await;
        assert!(matches!(result, Err(AppError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_click_sets_center_and_prompts() {
        let mut app = ready_controller(Ok(Vec::new())).await;
        app.handle_map_click(Position::new(0.0, 0.001));

        assert_eq!(app.geofence().definition().center(), Some(Position::new(0.0, 0.001)));
        let surface = app.map().surface();
        assert_eq!(surface.geofence_overlays(), vec![(Position::new(0.0, 0.001), 500.0)]);
        assert_eq!(surface.status(), Some((GEOFENCE_SET_PROMPT, StatusTone::Neutral)));
    }

    #[tokio::test]
    async fn test_position_renders_status() {
        let mut app = ready_controller(Ok(Vec::new())).await;
        app.handle_map_click(Position::new(0.0, 0.0));

        let status = app.handle_position(Position::new(0.0, 0.001));
        assert!(status.is_inside());
        assert_eq!(
            app.map().surface().status().map(|(_, tone)| tone),
            Some(StatusTone::Affirmative)
        );

        let status = app.handle_position(Position::new(0.0, 0.01));
        assert!(status.is_outside());
        assert_eq!(
            app.map().surface().status().map(|(_, tone)| tone),
            Some(StatusTone::Warning)
        );
        assert_eq!(app.last_position(), Some(Position::new(0.0, 0.01)));
    }

    #[tokio::test]
    async fn test_radius_input_redraws_with_valid_value_only() {
        let mut app = ready_controller(Ok(Vec::new())).await;
        app.handle_map_click(Position::new(0.0, 0.0));

        app.handle_radius_input("800");
        assert_eq!(
            app.map().surface().geofence_overlays(),
            vec![(Position::new(0.0, 0.0), 800.0)]
        );

        app.handle_radius_input("-5");
        assert_eq!(
            app.map().surface().geofence_overlays(),
            vec![(Position::new(0.0, 0.0), 800.0)]
        );
    }

    #[tokio::test]
    async fn test_query_failure_alerts_generic_message() {
        let mut app =
            ready_controller(Err(PlaceQueryError::Parse("bad json".to_string()))).await;

        let sequence = app.request_places(PlaceCategory::Police);
        assert_eq!(sequence, Some(1));

        let completion = app.next_query_completion().await.unwrap();
        assert!(app.handle_query_completion(completion));
        assert_eq!(app.map().surface().alerts(), &[PLACES_FAILED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let mut app = ready_controller(Ok(vec![PlaceOfInterest::new(
            Position::new(0.0, 0.002),
            "Station 1",
            PlaceCategory::Police,
        )]))
        .await;

        app.request_places(PlaceCategory::Police);
        app.request_places(PlaceCategory::Police);

        let stale = QueryCompletion {
            sequence: 1,
            category: PlaceCategory::Police,
            radius_meters: 3000,
            result: Ok(Vec::new()),
        };
        assert!(!app.handle_query_completion(stale));
        assert!(app.map().surface().alerts().is_empty());
    }

    #[tokio::test]
    async fn test_quit_event_stops_dispatch() {
        let mut app = ready_controller(Ok(Vec::new())).await;
        assert!(app.handle_event(AppEvent::RadiusInput("100".to_string())));
        assert!(!app.handle_event(AppEvent::Quit));
        assert_eq!(app.geofence().definition().radius_meters(), 100.0);
    }
}
