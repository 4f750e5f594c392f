use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::theme::{MovementMode, Theme};

/// A coordinate pair stored as `[lon, lat]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

impl From<Point> for LonLat {
    fn from(point: Point) -> Self {
        LonLat(point.x(), point.y())
    }
}

impl From<LonLat> for Point {
    fn from(value: LonLat) -> Self {
        Point::new(value.0, value.1)
    }
}

/// A point of interest that may become a waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
}

impl Place {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A named city or town usable as a route endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Locality {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

//Whats actually stored in routeinfo.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    #[serde(default)]
    pub waypoints: Vec<LonLat>,
    #[serde(alias = "routeType")]
    pub theme: Theme,
    #[serde(alias = "movementType")]
    pub movement_mode: MovementMode,
    pub description: String,
    /// Labels for the interior waypoints, in visiting order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stops: Vec<Place>,
}

impl Route {
    pub fn new(
        from: &str,
        to: &str,
        waypoints: Vec<LonLat>,
        theme: Theme,
        movement_mode: MovementMode,
    ) -> Self {
        Route {
            name: format!("{} - {}", from, to),
            waypoints,
            theme,
            movement_mode,
            description: format!(
                "Route from {} to {} ({}, {})",
                from, to, theme, movement_mode
            ),
            stops: Vec::new(),
        }
    }

    pub fn with_stops(mut self, stops: Vec<Place>) -> Self {
        self.stops = stops;
        self
    }

    pub fn start(&self) -> Option<LonLat> {
        self.waypoints.first().copied()
    }

    pub fn end(&self) -> Option<LonLat> {
        self.waypoints.last().copied()
    }
}
