use serde::{Deserialize, Serialize};

use super::geom::NamedLatLng;
use crate::{
    theme::{MovementMode, Theme},
    types::model::route::{Place, Route},
};

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EndpointDto {
    Coordinates(NamedLatLng),
    Locality(String),
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildRoute {
    pub from: EndpointDto,
    pub to: EndpointDto,
    #[serde(alias = "routeType")]
    pub theme: Theme,
    #[serde(alias = "movementType", default = "default_mode")]
    pub movement_mode: MovementMode,
}

fn default_mode() -> MovementMode {
    MovementMode::Other
}

/// Label of one interior waypoint, for the map pins
#[derive(Serialize, Deserialize, Debug)]
pub struct Stop {
    pub name: String,
    pub category: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<&Place> for Stop {
    fn from(place: &Place) -> Self {
        Stop {
            name: place.name.clone(),
            category: place.category.clone(),
            lon: place.longitude,
            lat: place.latitude,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BuiltRoute {
    pub route: Route,
    pub stops: Vec<Stop>,
    pub persisted: bool,
}
