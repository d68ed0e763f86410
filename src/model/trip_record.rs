use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::geometry::RouteGeometry;

/// Naive timestamp layouts accepted when `created_at` carries no offset; read as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Paths tried, in order, to find the route coordinates inside `route_raw`.
///
/// The first is the routing provider's JSON directions envelope; the second
/// its GeoJSON feature collection.
const COORDINATE_POINTERS: &[&str] = &[
    "/routes/0/geometry/coordinates",
    "/features/0/geometry/coordinates",
];

/// A number the planner may encode either as a JSON number or as a decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(n),
            Self::Text(s) => s.trim().parse().ok(),
        };
        value.filter(|n: &f64| n.is_finite())
    }
}

/// Trip record exactly as the planner serializes it.
///
/// Display-only fields are kept as raw JSON so an unexpected shape drops
/// that field instead of the whole record.
#[derive(Debug, Deserialize)]
struct TripRecordWire {
    #[serde(default)]
    id: Option<Value>,
    current_location: String,
    #[serde(default)]
    pickup_location: Option<String>,
    dropoff_location: String,
    #[serde(default)]
    cycle_used_hours: Option<Numeric>,
    #[serde(default)]
    total_distance_miles: Option<Numeric>,
    #[serde(default)]
    total_driving_hours: Option<Numeric>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    route_raw: Option<Value>,
}

impl TripRecordWire {
    fn into_record(self) -> TripRecord {
        let route = self.route_raw.as_ref().and_then(|raw| {
            COORDINATE_POINTERS
                .iter()
                .find_map(|pointer| raw.pointer(pointer))
                .and_then(RouteGeometry::from_coordinates)
        });
        TripRecord {
            id: self.id.and_then(|v| display_text("id", v)),
            current_location: self.current_location,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            cycle_used_hours: self.cycle_used_hours.and_then(Numeric::value),
            total_distance_miles: self.total_distance_miles.and_then(Numeric::value),
            total_driving_hours: self.total_driving_hours.and_then(Numeric::value),
            status: self.status.and_then(|v| display_text("status", v)),
            created_at: self.created_at.and_then(parse_created_at),
            route,
        }
    }
}

/// Reads a display-only scalar; strings pass through, numbers are rendered.
fn display_text(field: &'static str, value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => {
            tracing::warn!(field, value = %other, "ignoring unexpected trip field");
            None
        }
    }
}

/// Parses `created_at` as RFC 3339, falling back to naive UTC timestamps.
fn parse_created_at(value: Value) -> Option<DateTime<Utc>> {
    let raw = match value {
        Value::Null => return None,
        Value::String(s) => s,
        other => {
            tracing::warn!(value = %other, "ignoring non-string created_at");
            return None;
        }
    };
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok());
    if naive.is_none() {
        tracing::warn!(created_at = raw, "ignoring unparseable created_at");
    }
    naive.map(|n| n.and_utc())
}

/// Hours-of-service compliance of a planned trip, as far as the client can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    /// The planner produced an hours-of-service plan.
    Compliant,
    /// Planning has not finished yet.
    Pending,
    /// The planner reported a failure.
    Failed,
}

impl Compliance {
    pub fn label(self) -> &'static str {
        match self {
            Self::Compliant => "FMCSA compliant (70-hour/8-day)",
            Self::Pending => "Compliance check pending",
            Self::Failed => "Compliance check failed",
        }
    }
}

/// A planned trip as fetched from the planner. Read-only on the client.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: Option<String>,
    pub current_location: String,
    pub pickup_location: Option<String>,
    pub dropoff_location: String,
    pub cycle_used_hours: Option<f64>,
    pub total_distance_miles: Option<f64>,
    pub total_driving_hours: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Route path decoded once from the routing provider envelope.
    pub route: Option<RouteGeometry>,
}

impl TripRecord {
    /// Decodes a record from the planner's JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<TripRecordWire>(body).map(TripRecordWire::into_record)
    }

    /// Total distance for display, rounded to whole miles.
    ///
    /// The stored value is left untouched.
    pub fn distance_label(&self) -> String {
        match self.total_distance_miles {
            Some(miles) => format!("{} miles", miles.round()),
            None => "Distance pending".to_string(),
        }
    }

    /// Compliance summary derived from the planner status.
    ///
    /// A computed driving-time total means the hours-of-service plan exists,
    /// even while the status still reads `pending`.
    pub fn compliance(&self) -> Compliance {
        let status = self.status.as_deref().map(|s| s.trim().to_ascii_lowercase());
        match status.as_deref() {
            Some("failed" | "error" | "rejected") => Compliance::Failed,
            Some("completed" | "complete" | "planned" | "success" | "compliant") => {
                Compliance::Compliant
            }
            _ if self.total_driving_hours.is_some() => Compliance::Compliant,
            _ => Compliance::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::LatLng;

    fn chicago_dallas_points() -> &'static [LatLng] {
        &[
            LatLng { lat: 41.8, lon: -87.6 },
            LatLng { lat: 32.8, lon: -96.8 },
        ]
    }

    fn decode(value: Value) -> TripRecord {
        TripRecord::from_json(value.to_string().as_bytes()).unwrap()
    }

    fn chicago_dallas() -> Value {
        json!({
            "current_location": "Chicago, IL",
            "dropoff_location": "Dallas, TX",
            "total_distance_miles": 927.4,
            "route_raw": {
                "routes": [
                    {"geometry": {"coordinates": [[-87.6, 41.8], [-96.8, 32.8]]}}
                ]
            }
        })
    }

    #[test]
    fn decodes_summary_fields_verbatim() {
        let record = decode(chicago_dallas());
        assert_eq!(record.current_location, "Chicago, IL");
        assert_eq!(record.dropoff_location, "Dallas, TX");
        assert_eq!(record.total_distance_miles, Some(927.4));
    }

    #[test]
    fn route_converted_to_lat_lng_in_order() {
        let record = decode(chicago_dallas());
        let route = record.route.expect("route present");
        assert_eq!(route.points(), chicago_dallas_points());
    }

    #[test]
    fn distance_label_rounds_for_display_only() {
        let record = decode(chicago_dallas());
        assert_eq!(record.distance_label(), "927 miles");
        assert_eq!(record.total_distance_miles, Some(927.4));
    }

    #[test]
    fn distance_label_rounds_half_up() {
        let mut record = decode(chicago_dallas());
        record.total_distance_miles = Some(12.5);
        assert_eq!(record.distance_label(), "13 miles");
    }

    #[test]
    fn distance_label_when_missing() {
        let mut value = chicago_dallas();
        value.as_object_mut().unwrap().remove("total_distance_miles");
        assert_eq!(decode(value).distance_label(), "Distance pending");
    }

    #[test]
    fn decimal_strings_accepted() {
        let mut value = chicago_dallas();
        value["total_distance_miles"] = json!("927.40");
        value["cycle_used_hours"] = json!("32.50");
        let record = decode(value);
        assert_eq!(record.total_distance_miles, Some(927.4));
        assert_eq!(record.cycle_used_hours, Some(32.5));
    }

    #[test]
    fn missing_route_raw_is_none() {
        let mut value = chicago_dallas();
        value.as_object_mut().unwrap().remove("route_raw");
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn null_route_raw_is_none() {
        let mut value = chicago_dallas();
        value["route_raw"] = Value::Null;
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn empty_routes_is_none() {
        let mut value = chicago_dallas();
        value["route_raw"] = json!({"routes": []});
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn missing_geometry_is_none() {
        let mut value = chicago_dallas();
        value["route_raw"] = json!({"routes": [{"summary": {}}]});
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn empty_coordinates_is_none() {
        let mut value = chicago_dallas();
        value["route_raw"] = json!({"routes": [{"geometry": {"coordinates": []}}]});
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn encoded_polyline_geometry_is_none() {
        let mut value = chicago_dallas();
        value["route_raw"] = json!({"routes": [{"geometry": "_p~iF~ps|U_ulLnnqC"}]});
        assert_eq!(decode(value).route, None);
    }

    #[test]
    fn geojson_feature_collection_supported() {
        let mut value = chicago_dallas();
        value["route_raw"] = json!({
            "type": "FeatureCollection",
            "features": [{"geometry": {"coordinates": [[-87.6, 41.8], [-96.8, 32.8]]}}]
        });
        let route = decode(value).route.unwrap();
        assert_eq!(route.points(), chicago_dallas_points());
    }

    #[test]
    fn optional_fields_decoded() {
        let mut value = chicago_dallas();
        value["id"] = json!("8c1f2a90-0000-0000-0000-000000000000");
        value["pickup_location"] = json!("St. Louis, MO");
        value["total_driving_hours"] = json!(15.2);
        value["status"] = json!("pending");
        value["created_at"] = json!("2026-10-16T12:00:00Z");
        let record = decode(value);
        assert_eq!(record.pickup_location.as_deref(), Some("St. Louis, MO"));
        assert_eq!(record.total_driving_hours, Some(15.2));
        assert_eq!(record.status.as_deref(), Some("pending"));
        assert!(record.created_at.is_some());
        assert!(record.id.is_some());
    }

    mod lenient_display_fields {
        use super::*;

        #[test]
        fn naive_created_at_keeps_record() {
            let mut value = chicago_dallas();
            value["created_at"] = json!("2025-11-01T12:00:00.123456");
            let record = decode(value);
            assert_eq!(record.current_location, "Chicago, IL");
            assert_eq!(record.distance_label(), "927 miles");
            assert_eq!(
                record.created_at.unwrap().to_rfc3339(),
                "2025-11-01T12:00:00.123456+00:00"
            );
        }

        #[test]
        fn space_separated_created_at_accepted() {
            let mut value = chicago_dallas();
            value["created_at"] = json!("2025-11-01 08:30:00");
            assert!(decode(value).created_at.is_some());
        }

        #[test]
        fn offset_created_at_converted_to_utc() {
            let mut value = chicago_dallas();
            value["created_at"] = json!("2025-11-01T07:00:00-05:00");
            assert_eq!(
                decode(value).created_at.unwrap().to_rfc3339(),
                "2025-11-01T12:00:00+00:00"
            );
        }

        #[test]
        fn custom_format_created_at_dropped() {
            let mut value = chicago_dallas();
            value["created_at"] = json!("01/11/2025 12:00");
            let record = decode(value);
            assert_eq!(record.created_at, None);
            assert!(record.route.is_some());
        }

        #[test]
        fn non_string_created_at_dropped() {
            let mut value = chicago_dallas();
            value["created_at"] = json!(1761998400);
            assert_eq!(decode(value).created_at, None);
        }

        #[test]
        fn numeric_id_rendered() {
            let mut value = chicago_dallas();
            value["id"] = json!(42);
            assert_eq!(decode(value).id.as_deref(), Some("42"));
        }

        #[test]
        fn structured_status_dropped() {
            let mut value = chicago_dallas();
            value["status"] = json!({"state": "pending"});
            let record = decode(value);
            assert_eq!(record.status, None);
            assert_eq!(record.dropoff_location, "Dallas, TX");
        }
    }

    mod compliance {
        use super::*;

        fn with(status: Option<&str>, driving_hours: Option<f64>) -> TripRecord {
            let mut record = decode(chicago_dallas());
            record.status = status.map(str::to_string);
            record.total_driving_hours = driving_hours;
            record
        }

        #[test]
        fn completed_status_is_compliant() {
            assert_eq!(with(Some("Completed"), None).compliance(), Compliance::Compliant);
        }

        #[test]
        fn pending_with_driving_hours_is_compliant() {
            assert_eq!(with(Some("pending"), Some(15.2)).compliance(), Compliance::Compliant);
        }

        #[test]
        fn pending_without_plan_is_pending() {
            assert_eq!(with(Some("pending"), None).compliance(), Compliance::Pending);
            assert_eq!(with(None, None).compliance(), Compliance::Pending);
        }

        #[test]
        fn failed_status_wins_over_hours() {
            assert_eq!(with(Some("failed"), Some(3.0)).compliance(), Compliance::Failed);
        }

        #[test]
        fn labels_are_distinct() {
            assert_ne!(Compliance::Compliant.label(), Compliance::Pending.label());
            assert_ne!(Compliance::Pending.label(), Compliance::Failed.label());
        }
    }

    #[test]
    fn missing_locations_is_an_error() {
        let body = json!({"detail": "Not found."}).to_string();
        assert!(TripRecord::from_json(body.as_bytes()).is_err());
    }

    #[test]
    fn non_json_is_an_error() {
        assert!(TripRecord::from_json(b"<html>oops</html>").is_err());
    }
}
