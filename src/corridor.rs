use geo_types::{coord, Point, Rect};
use tracing::debug;

use crate::{error::RouteError, theme::MovementMode};

/// Corners of the corridor of `half_width` degrees around the straight line
/// from `start` to `end`, in the order start+, start-, end-, end+.
pub fn corridor_corners(
    start: Point,
    end: Point,
    half_width: f64,
) -> Result<[Point; 4], RouteError> {
    if start == end {
        return Err(RouteError::DegenerateRoute);
    }
    let dx = end.x() - start.x();
    let dy = end.y() - start.y();
    let length = dx.hypot(dy);
    let perp = Point::new(-dy / length, dx / length) * half_width;
    Ok([start + perp, start - perp, end - perp, end + perp])
}

/// Axis-aligned box around the corridor for `mode`. This is the min/max of
/// the corners, so it covers more than the rotated corridor itself.
pub fn corridor_bbox(start: Point, end: Point, mode: MovementMode) -> Result<Rect, RouteError> {
    let corners = corridor_corners(start, end, mode.half_width())?;
    let (min_x, min_y, max_x, max_y) = corners.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), p| {
            (
                min_x.min(p.x()),
                min_y.min(p.y()),
                max_x.max(p.x()),
                max_y.max(p.y()),
            )
        },
    );
    let bbox = Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y });
    debug!(?bbox, %mode, "corridor bbox");
    Ok(bbox)
}

/// Overpass bbox filter: `south,west,north,east`
pub fn overpass_bbox(bbox: &Rect) -> String {
    format!(
        "{},{},{},{}",
        bbox.min().y,
        bbox.min().x,
        bbox.max().y,
        bbox.max().x
    )
}
