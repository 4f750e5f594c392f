use geo_types::Point;
use rand::Rng;
use tracing::{info, instrument};

use crate::{
    corridor::corridor_bbox,
    error::RouteError,
    overpass::PlaceSource,
    selector::{select, SelectionPolicy},
    sequencer::sequence,
    theme::{MovementMode, Theme},
    types::model::route::{Place, Route},
};

/// One end of a route
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub from: Endpoint,
    pub to: Endpoint,
    pub theme: Theme,
    pub movement_mode: MovementMode,
}

/// A freshly built route plus the places behind its interior waypoints, so
/// the caller can label them.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRoute {
    pub route: Route,
    pub stops: Vec<Place>,
}

/// Corridor, fetch, quota draw, greedy ordering. Any error aborts the build
/// and nothing partial is returned.
#[instrument(skip(source, rng))]
pub async fn build_route<S, R>(
    source: &S,
    request: &RouteRequest,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Result<BuiltRoute, RouteError>
where
    S: PlaceSource + ?Sized,
    R: Rng + Send,
{
    let start = request.from.point;
    let end = request.to.point;
    let bbox = corridor_bbox(start, end, request.movement_mode)?;

    let candidates = source.fetch_candidate_places(&bbox).await?;
    let selected = select(&candidates, request.theme.quotas(), policy, rng);
    info!(
        "selected {} of {} candidates",
        selected.len(),
        candidates.len()
    );

    let path = sequence(start, end, selected);
    let route = Route::new(
        &request.from.name,
        &request.to.name,
        path.waypoints,
        request.theme,
        request.movement_mode,
    )
    .with_stops(path.stops.clone());
    Ok(BuiltRoute {
        route,
        stops: path.stops,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use geo_types::Rect;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::types::model::route::{LonLat, Locality};

    /// Serves fixed data and remembers the boxes it was asked for
    #[derive(Default)]
    pub(crate) struct FixturePlaceSource {
        pub localities: Vec<Locality>,
        pub places: Vec<Place>,
        pub fail: bool,
        pub requested: Mutex<Vec<Rect>>,
    }

    #[async_trait]
    impl PlaceSource for FixturePlaceSource {
        async fn fetch_localities(&self, _area_code: &str) -> Result<Vec<Locality>, RouteError> {
            if self.fail {
                return Err(RouteError::RemoteQuery("fixture offline".into()));
            }
            Ok(self.localities.clone())
        }

        async fn fetch_candidate_places(&self, bbox: &Rect) -> Result<Vec<Place>, RouteError> {
            self.requested.lock().unwrap().push(*bbox);
            if self.fail {
                return Err(RouteError::RemoteQuery("fixture offline".into()));
            }
            Ok(self.places.clone())
        }
    }

    pub(crate) fn place(name: &str, category: &str, lon: f64, lat: f64) -> Place {
        Place {
            name: name.into(),
            latitude: lat,
            longitude: lon,
            category: category.into(),
        }
    }

    fn request(theme: Theme, from: (f64, f64), to: (f64, f64)) -> RouteRequest {
        RouteRequest {
            from: Endpoint {
                name: "Start".into(),
                point: Point::new(from.0, from.1),
            },
            to: Endpoint {
                name: "Finish".into(),
                point: Point::new(to.0, to.1),
            },
            theme,
            movement_mode: MovementMode::Foot,
        }
    }

    #[tokio::test]
    async fn food_route_visits_nearest_first() {
        let source = FixturePlaceSource {
            places: vec![
                place("Bar B", "bar", 40.55, 64.59),
                place("Cafe A", "cafe", 40.05, 64.51),
                place("Lonely Museum", "museum", 40.3, 64.55),
            ],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let built = build_route(
            &source,
            &request(Theme::Food, (40.0, 64.5), (40.6, 64.6)),
            SelectionPolicy::default(),
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(
            built.route.waypoints,
            vec![
                LonLat(40.0, 64.5),
                LonLat(40.05, 64.51),
                LonLat(40.55, 64.59),
                LonLat(40.6, 64.6)
            ]
        );
        let names: Vec<&str> = built.stops.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cafe A", "Bar B"]);
        assert_eq!(built.route.stops, built.stops);
        assert_eq!(built.route.name, "Start - Finish");
        assert_eq!(built.route.theme, Theme::Food);
        assert_eq!(source.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_endpoints_never_query() {
        let source = FixturePlaceSource::default();
        let mut rng = StdRng::seed_from_u64(5);
        let result = build_route(
            &source,
            &request(Theme::Art, (40.0, 64.5), (40.0, 64.5)),
            SelectionPolicy::default(),
            &mut rng,
        )
        .await;
        assert!(matches!(result, Err(RouteError::DegenerateRoute)));
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_aborts_the_build() {
        let source = FixturePlaceSource {
            fail: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let result = build_route(
            &source,
            &request(Theme::History, (40.0, 64.5), (40.6, 64.6)),
            SelectionPolicy::default(),
            &mut rng,
        )
        .await;
        assert!(matches!(result, Err(RouteError::RemoteQuery(_))));
    }

    #[tokio::test]
    async fn empty_theme_goes_straight_through() {
        let source = FixturePlaceSource {
            places: vec![place("Cafe A", "cafe", 40.05, 64.51)],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let built = build_route(
            &source,
            &request(Theme::None, (40.0, 64.5), (40.6, 64.6)),
            SelectionPolicy::default(),
            &mut rng,
        )
        .await
        .unwrap();
        assert_eq!(
            built.route.waypoints,
            vec![LonLat(40.0, 64.5), LonLat(40.6, 64.6)]
        );
        assert!(built.stops.is_empty());
    }
}
