use serde_json::Value;

/// A point in latitude-first order, as the map canvas expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    /// Builds a point from a GeoJSON position (`[longitude, latitude, ...]`).
    ///
    /// Extra ordinates such as elevation are ignored. Returns `None` when
    /// fewer than two finite numbers are present.
    pub fn from_position(position: &Value) -> Option<Self> {
        let ordinates = position.as_array()?;
        let lon = ordinates.first()?.as_f64()?;
        let lat = ordinates.get(1)?.as_f64()?;
        (lon.is_finite() && lat.is_finite()).then_some(Self { lat, lon })
    }
}

/// Bounding box of a route, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Grows the box by `ratio` of its span on each side.
    ///
    /// Spans narrower than `min_span` degrees are widened to it first, so a
    /// single-point route still frames a visible area.
    pub fn padded(self, ratio: f64, min_span: f64) -> Self {
        let lat_pad = (self.north - self.south).max(min_span) * ratio
            + ((min_span - (self.north - self.south)).max(0.0) / 2.0);
        let lon_pad = (self.east - self.west).max(min_span) * ratio
            + ((min_span - (self.east - self.west)).max(0.0) / 2.0);
        Self {
            south: (self.south - lat_pad).max(-90.0),
            north: (self.north + lat_pad).min(90.0),
            west: (self.west - lon_pad).max(-180.0),
            east: (self.east + lon_pad).min(180.0),
        }
    }
}

/// Ordered path of a computed route. Never empty.
///
/// Order is the direction of travel; points are neither sorted nor
/// deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    points: Vec<LatLng>,
}

impl RouteGeometry {
    /// Wraps a point sequence, or returns `None` if it is empty.
    pub fn new(points: Vec<LatLng>) -> Option<Self> {
        (!points.is_empty()).then_some(Self { points })
    }

    /// Converts a GeoJSON coordinate array.
    ///
    /// Malformed positions are skipped with a warning; an array with no
    /// usable positions yields `None`.
    pub fn from_coordinates(coordinates: &Value) -> Option<Self> {
        let positions = coordinates.as_array()?;
        let points: Vec<LatLng> = positions
            .iter()
            .filter_map(|position| {
                let point = LatLng::from_position(position);
                if point.is_none() {
                    tracing::warn!(%position, "skipping malformed route position");
                }
                point
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    /// Smallest box containing every point.
    pub fn bounds(&self) -> Bounds {
        let first = self.points[0];
        let seed = Bounds {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        self.points.iter().fold(seed, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lon),
            north: b.north.max(p.lat),
            east: b.east.max(p.lon),
        })
    }
}
