use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use geo_types::{Point, Rect};
use geojson::FeatureCollection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use tour_route::{
    builder::{Endpoint, RouteRequest},
    clients::{get_config, get_reqwest_client, CONFIG, REQWEST},
    config::Config,
    net::response::{ResponseError, Result},
    overpass::OverpassClient,
    persistence::RouteStore,
    route_geo::IntoRouteFeatureCollection,
    session::Session,
    types::{
        dto::{self, geom::BoxQuery, route::EndpointDto},
        model::route::{Locality, Place, Route},
    },
};

type AppState = State<Arc<Session>>;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    // initialize tracing
    tracing_subscriber::fmt::init();

    init_config()?;
    init_reqwest_client()?;
    let session = Arc::new(init_session()?);
    session.start().await;

    let app = Router::new()
        .route("/localities", get(list_localities))
        .route("/localities/refresh", post(refresh_localities))
        .route("/routes", get(list_routes).post(build_route))
        .route("/routes/current", get(current_route))
        .route("/routes/current/geojson", get(current_route_geojson))
        .route("/places", get(list_places))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(session);

    let listen = get_config()?.listen;
    info!("Running on {}", listen);

    axum::Server::bind(&listen)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn init_config() -> color_eyre::Result<()> {
    let config = Config::from_env()?;
    info!(?config, "Loaded config");
    CONFIG
        .set(config)
        .map_err(|_| color_eyre::eyre::eyre!("Config already set"))
}

fn init_reqwest_client() -> color_eyre::Result<()> {
    let client = reqwest::Client::new();
    REQWEST
        .set(client)
        .map_err(|_| color_eyre::eyre::eyre!("Reqwest client already set"))
}

fn init_session() -> color_eyre::Result<Session> {
    let config = get_config()?;
    let overpass = OverpassClient::new(
        get_reqwest_client()?.clone(),
        config.overpass_url.clone(),
        config.query_timeout_secs,
    );
    Ok(Session::new(
        Box::new(overpass),
        RouteStore::new(&config.data_dir),
        config.area_code.clone(),
        config.selection,
    ))
}

async fn list_localities(State(session): AppState) -> Json<Vec<Locality>> {
    Json(session.localities().await)
}

async fn refresh_localities(State(session): AppState) -> Result<Json<usize>> {
    Ok(Json(session.refresh_localities().await?))
}

async fn resolve(session: &Session, endpoint: EndpointDto) -> Result<Endpoint> {
    Ok(match endpoint {
        EndpointDto::Locality(name) => session.resolve(&name).await?,
        EndpointDto::Coordinates(c) => Endpoint {
            name: c.name,
            point: Point::new(c.lon, c.lat),
        },
    })
}

#[instrument(skip(session))]
#[axum::debug_handler(state = Arc<Session>)]
async fn build_route(
    State(session): AppState,
    Json(body): Json<dto::route::BuildRoute>,
) -> Result<Json<dto::route::BuiltRoute>> {
    let request = RouteRequest {
        from: resolve(&session, body.from).await?,
        to: resolve(&session, body.to).await?,
        theme: body.theme,
        movement_mode: body.movement_mode,
    };
    let outcome = session.build(request).await?;
    Ok(Json(dto::route::BuiltRoute {
        stops: outcome.built.stops.iter().map(Into::into).collect(),
        route: outcome.built.route,
        persisted: outcome.persisted.is_ok(),
    }))
}

async fn list_routes(State(session): AppState) -> Json<Vec<Route>> {
    Json(session.routes().await)
}

async fn current_route(State(session): AppState) -> Result<Json<Route>> {
    let route = session
        .current_route()
        .await
        .ok_or(ResponseError::not_found("No current route"))?;
    Ok(Json(route))
}

async fn current_route_geojson(State(session): AppState) -> Result<Json<FeatureCollection>> {
    let route = session
        .current_route()
        .await
        .ok_or(ResponseError::not_found("No current route"))?;
    let stops = session.current_stops().await;
    Ok(Json(route.into_route_feature_collection(&stops)?))
}

async fn list_places(
    State(session): AppState,
    Query(query): Query<BoxQuery>,
) -> Result<Json<Vec<Place>>> {
    let bbox = Rect::from(&query);
    Ok(Json(
        session
            .places_in(&bbox, query.category.as_deref())
            .await?,
    ))
}
