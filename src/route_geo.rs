use color_eyre::eyre::Result;
use geo::BoundingRect;
use geo_types::{CoordNum, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry};

use crate::types::{
    feature::FeatureProperties,
    model::route::{Place, Route},
};

pub trait IntoRouteFeatureCollection {
    /// `stops` labels the interior waypoints; missing labels are left empty
    fn into_route_feature_collection(&self, stops: &[Place]) -> Result<FeatureCollection>;
}

impl IntoRouteFeatureCollection for Route {
    fn into_route_feature_collection(&self, stops: &[Place]) -> Result<FeatureCollection> {
        let line: LineString = self.waypoints.iter().map(|w| (w.0, w.1)).collect();
        let bounding_box = line.bounding_box();
        let mut features = vec![Feature {
            id: Some(geojson::feature::Id::String(String::from("path"))),
            bbox: bounding_box.to_owned(),
            geometry: Some(Geometry::new((&line).into())),
            ..Default::default()
        }];

        let last = self.waypoints.len().saturating_sub(1);
        for (seq, waypoint) in self.waypoints.iter().enumerate() {
            let point = Point::from(*waypoint);
            let feature = match seq {
                0 => feature_point(String::from("start"), &point),
                _ if seq == last => feature_point(String::from("end"), &point),
                _ => {
                    let stop = stops.get(seq - 1);
                    Feature {
                        properties: Some(
                            FeatureProperties {
                                name: stop.map(|s| s.name.clone()),
                                category: stop.map(|s| s.category.clone()),
                                seq,
                            }
                            .try_into()?,
                        ),
                        ..feature_point(format!("stop-{}", seq), &point)
                    }
                }
            };
            features.push(feature);
        }

        Ok(FeatureCollection {
            bbox: bounding_box,
            features,
            foreign_members: None,
        })
    }
}

fn feature_point(id: String, point: &Point) -> Feature {
    Feature {
        id: Some(geojson::feature::Id::String(id)),
        geometry: Some(Geometry::new(point.into())),
        ..Default::default()
    }
}

//Get the bounding box for a geometry as a vector
pub trait BoundingBox<N> {
    fn bounding_box(&self) -> Option<Vec<N>>;
}

impl<T, N> BoundingBox<N> for T
where
    T: BoundingRect<N>,
    N: CoordNum,
{
    fn bounding_box(&self) -> Option<Vec<N>> {
        self.bounding_rect()
            .into()
            .map(|r| vec![r.min().x, r.min().y, r.max().x, r.max().y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        theme::{MovementMode, Theme},
        types::model::route::LonLat,
    };

    fn route() -> Route {
        Route::new(
            "A",
            "B",
            vec![LonLat(40.0, 64.5), LonLat(40.2, 64.52), LonLat(40.6, 64.6)],
            Theme::Art,
            MovementMode::Foot,
        )
    }

    #[test]
    fn collection_has_path_and_labelled_stops() {
        let stops = vec![Place {
            name: "Fine Arts Museum".into(),
            latitude: 64.52,
            longitude: 40.2,
            category: "museum".into(),
        }];
        let fc = route().into_route_feature_collection(&stops).unwrap();
        assert_eq!(fc.features.len(), 4);
        assert_eq!(fc.bbox, Some(vec![40.0, 64.5, 40.6, 64.6]));

        let stop = &fc.features[2];
        assert_eq!(
            stop.property("name").and_then(|v| v.as_str()),
            Some("Fine Arts Museum")
        );
        assert_eq!(stop.property("seq").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(
            fc.features[3].id,
            Some(geojson::feature::Id::String("end".into()))
        );
    }

    #[test]
    fn stops_without_labels_still_render() {
        let fc = route().into_route_feature_collection(&[]).unwrap();
        let stop = &fc.features[2];
        assert_eq!(stop.property("name"), Some(&serde_json::Value::Null));
        assert!(matches!(
            stop.geometry.as_ref().map(|g| &g.value),
            Some(geojson::Value::Point(_))
        ));
    }
}
