use async_trait::async_trait;
use geo_types::Rect;
use tracing::{debug, info, instrument};

use crate::{
    corridor::overpass_bbox,
    error::RouteError,
    types::{
        model::route::{Locality, Place},
        overpass::OverpassResponse,
    },
};

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const FOOD_AMENITIES: &str = "restaurant|cafe|bar|pub|food_court";

/// Where localities and candidate places come from.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Cities and towns inside the ISO3166-2 area `area_code`
    async fn fetch_localities(&self, area_code: &str) -> Result<Vec<Locality>, RouteError>;

    /// Tourism and food places inside `bbox`
    async fn fetch_candidate_places(&self, bbox: &Rect) -> Result<Vec<Place>, RouteError>;
}

pub fn locality_query(area_code: &str, timeout_secs: u32) -> String {
    format!(
        r#"[out:json][timeout:{timeout_secs}];
area["ISO3166-2"="{area_code}"]->.searchArea;
(
  node["place"~"city|town"](area.searchArea);
);
out body;
"#
    )
}

pub fn candidate_query(bbox: &Rect, timeout_secs: u32) -> String {
    let bbox = overpass_bbox(bbox);
    format!(
        r#"[out:json][timeout:{timeout_secs}];
(
  node["tourism"]({bbox});
  way["tourism"]({bbox});
  relation["tourism"]({bbox});
  node["amenity"~"{FOOD_AMENITIES}"]({bbox});
  way["amenity"~"{FOOD_AMENITIES}"]({bbox});
  relation["amenity"~"{FOOD_AMENITIES}"]({bbox});
);
out center;
"#
    )
}

fn parse_response(body: &str) -> Result<OverpassResponse, RouteError> {
    serde_json::from_str(body).map_err(|err| RouteError::ResponseParse(err.to_string()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Elements without a name, a category or coordinates are dropped.
pub fn parse_candidate_places(body: &str) -> Result<Vec<Place>, RouteError> {
    let response = parse_response(body)?;
    let total = response.elements.len();
    let places: Vec<Place> = response
        .elements
        .into_iter()
        .filter_map(|el| {
            let name = non_empty(&el.tags.name)?;
            let category = non_empty(&el.tags.tourism).or(non_empty(&el.tags.amenity))?;
            let coord = el.coord()?;
            Some(Place {
                name: name.to_string(),
                latitude: coord.lat,
                longitude: coord.lon,
                category: category.to_string(),
            })
        })
        .collect();
    debug!("kept {} of {} elements", places.len(), total);
    Ok(places)
}

pub fn parse_localities(body: &str) -> Result<Vec<Locality>, RouteError> {
    let response = parse_response(body)?;
    Ok(response
        .elements
        .into_iter()
        .filter_map(|el| {
            let name = non_empty(&el.tags.name)?.to_string();
            let coord = el.coord()?;
            Some(Locality {
                name,
                latitude: coord.lat,
                longitude: coord.lon,
            })
        })
        .collect())
}

/// Overpass interpreter client. Requests are not retried and carry only the
/// server-side timeout hint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    url: String,
    timeout_secs: u32,
}

impl OverpassClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout_secs: u32) -> Self {
        OverpassClient {
            http,
            url: url.into(),
            timeout_secs,
        }
    }

    async fn interpret(&self, query: String) -> Result<String, RouteError> {
        let res = self
            .http
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RouteError::RemoteQuery(format!(
                "{} returned {}",
                self.url, status
            )));
        }
        Ok(res.text().await?)
    }
}

#[async_trait]
impl PlaceSource for OverpassClient {
    #[instrument(skip(self))]
    async fn fetch_localities(&self, area_code: &str) -> Result<Vec<Locality>, RouteError> {
        let body = self
            .interpret(locality_query(area_code, self.timeout_secs))
            .await?;
        let localities = parse_localities(&body)?;
        info!("fetched {} localities", localities.len());
        Ok(localities)
    }

    #[instrument(skip(self))]
    async fn fetch_candidate_places(&self, bbox: &Rect) -> Result<Vec<Place>, RouteError> {
        let body = self
            .interpret(candidate_query(bbox, self.timeout_secs))
            .await?;
        let places = parse_candidate_places(&body)?;
        info!("fetched {} candidate places", places.len());
        Ok(places)
    }
}
