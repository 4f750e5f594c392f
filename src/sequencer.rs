use geo::EuclideanDistance;
use geo_types::Point;
use tracing::{debug, instrument};

use crate::types::model::route::{LonLat, Place};

/// Visiting order produced by [`sequence`].
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedPath {
    /// Start, the stops in visiting order, end
    pub waypoints: Vec<LonLat>,
    /// The places behind the interior waypoints, same order
    pub stops: Vec<Place>,
}

/// Greedy nearest-next ordering. Distances are planar on raw lon/lat and the
/// first candidate wins a tie.
#[instrument(skip(selected), fields(selected = selected.len()))]
pub fn sequence(start: Point, end: Point, selected: Vec<Place>) -> SequencedPath {
    let mut waypoints = Vec::with_capacity(selected.len() + 2);
    let mut stops = Vec::with_capacity(selected.len());
    waypoints.push(LonLat::from(start));

    let mut remaining = selected;
    let mut current = start;
    while !remaining.is_empty() {
        let (nearest, _) = remaining
            .iter()
            .enumerate()
            .map(|(i, place)| (i, current.euclidean_distance(&place.point())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((0, 0.0));
        let next = remaining.remove(nearest);
        current = next.point();
        debug!(name = %next.name, lon = current.x(), lat = current.y(), "next stop");
        waypoints.push(LonLat::from(current));
        stops.push(next);
    }

    waypoints.push(LonLat::from(end));
    SequencedPath { waypoints, stops }
}
