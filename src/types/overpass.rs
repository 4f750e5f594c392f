use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    // Set for ways and relations when the query asks for `out center`
    pub center: Option<OverpassCoord>,
    #[serde(default)]
    pub tags: OverpassTags,
}

impl OverpassElement {
    /// Explicit `lat`/`lon` first, then the centroid
    pub fn coord(&self) -> Option<OverpassCoord> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(OverpassCoord { lat, lon }),
            _ => self.center.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverpassCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct OverpassTags {
    pub name: Option<String>,
    pub tourism: Option<String>,
    pub amenity: Option<String>,
    pub place: Option<String>,
}
