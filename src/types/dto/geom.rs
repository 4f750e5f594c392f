use geo_types::{coord, Rect};
use serde::Deserialize;

/// `?south=&west=&north=&east=&category=` on the places endpoint
#[derive(Deserialize, Clone, Debug)]
pub struct BoxQuery {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub category: Option<String>,
}

impl From<&BoxQuery> for Rect {
    fn from(value: &BoxQuery) -> Self {
        Rect::new(
            coord! { x: value.west, y: value.south },
            coord! { x: value.east, y: value.north },
        )
    }
}

/// Endpoint given by coordinates rather than by locality name
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct NamedLatLng {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}
