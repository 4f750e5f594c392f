use futures::join;
use geo_types::Rect;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use crate::{
    builder::{build_route, BuiltRoute, Endpoint, RouteRequest},
    error::RouteError,
    overpass::PlaceSource,
    persistence::RouteStore,
    selector::SelectionPolicy,
    types::model::route::{Locality, Place, Route},
};

#[derive(Default)]
struct SessionState {
    localities: Vec<Locality>,
    current: Option<Route>,
    // Places behind the current route's interior waypoints, empty after a restart
    stops: Vec<Place>,
    // Every route seen this session, oldest first
    routes: Vec<Route>,
}

/// Result of a build. The route is kept even when saving it failed.
#[derive(Debug)]
pub struct BuildOutcome {
    pub built: BuiltRoute,
    pub persisted: Result<(), RouteError>,
}

/// Everything one user of the app works with: the known localities, the
/// current route and the routes built so far.
pub struct Session {
    source: Box<dyn PlaceSource>,
    store: RouteStore,
    area_code: String,
    policy: SelectionPolicy,
    state: RwLock<SessionState>,
    build_lock: Mutex<()>,
}

impl Session {
    pub fn new(
        source: Box<dyn PlaceSource>,
        store: RouteStore,
        area_code: impl Into<String>,
        policy: SelectionPolicy,
    ) -> Self {
        Session {
            source,
            store,
            area_code: area_code.into(),
            policy,
            state: RwLock::new(SessionState::default()),
            build_lock: Mutex::new(()),
        }
    }

    /// Loads localities and the saved route. Neither failure stops the
    /// session: localities can be refreshed later and an unreadable route
    /// file counts as no route.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        let (localities, saved) = join!(
            self.source.fetch_localities(&self.area_code),
            self.store.load()
        );
        let mut state = self.state.write().await;
        match localities {
            Ok(localities) => state.localities = localities,
            Err(err) => warn!("could not load localities: {}", err),
        }
        match saved {
            Ok(Some(route)) => {
                info!("restored route {}", route.name);
                state.routes.push(route.clone());
                state.stops = route.stops.clone();
                state.current = Some(route);
            }
            Ok(None) => {}
            Err(err) => warn!("ignoring saved route: {}", err),
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh_localities(&self) -> Result<usize, RouteError> {
        let localities = self.source.fetch_localities(&self.area_code).await?;
        let count = localities.len();
        self.state.write().await.localities = localities;
        Ok(count)
    }

    pub async fn localities(&self) -> Vec<Locality> {
        self.state.read().await.localities.clone()
    }

    /// First locality whose name matches, ignoring case
    pub async fn resolve(&self, name: &str) -> Result<Endpoint, RouteError> {
        let state = self.state.read().await;
        state
            .localities
            .iter()
            .find(|l| l.name.to_lowercase() == name.to_lowercase())
            .map(|l| Endpoint {
                name: l.name.clone(),
                point: l.point(),
            })
            .ok_or_else(|| RouteError::UnknownLocality(name.to_string()))
    }

    /// Builds, remembers and saves a route. Only one build runs at a time.
    #[instrument(skip(self))]
    pub async fn build(&self, request: RouteRequest) -> Result<BuildOutcome, RouteError> {
        let _guard = self.build_lock.lock().await;
        let mut rng = StdRng::from_entropy();
        let built = build_route(self.source.as_ref(), &request, self.policy, &mut rng).await?;

        {
            let mut state = self.state.write().await;
            state.routes.push(built.route.clone());
            state.current = Some(built.route.clone());
            state.stops = built.stops.clone();
        }

        let persisted = self.store.save(&built.route).await;
        if let Err(err) = &persisted {
            warn!("route built but not saved: {}", err);
        }
        Ok(BuildOutcome { built, persisted })
    }

    pub async fn current_route(&self) -> Option<Route> {
        self.state.read().await.current.clone()
    }

    pub async fn current_stops(&self) -> Vec<Place> {
        self.state.read().await.stops.clone()
    }

    pub async fn routes(&self) -> Vec<Route> {
        self.state.read().await.routes.clone()
    }

    /// Candidate places in `bbox`, optionally of one category
    pub async fn places_in(
        &self,
        bbox: &Rect,
        category: Option<&str>,
    ) -> Result<Vec<Place>, RouteError> {
        let places = self.source.fetch_candidate_places(bbox).await?;
        Ok(match category {
            Some(category) => places
                .into_iter()
                .filter(|p| p.category.eq_ignore_ascii_case(category))
                .collect(),
            None => places,
        })
    }
}
