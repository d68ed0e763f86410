mod geometry;
mod trip_id;
mod trip_record;
mod trip_request;
mod validation;

pub use geometry::{Bounds, LatLng, RouteGeometry};
pub use trip_id::TripId;
pub use trip_record::{Compliance, TripRecord};
pub use trip_request::{FieldError, TripField, TripRequest};
pub use validation::{MAX_CYCLE_HOURS, ValidationError, validate_cycle_used, validate_location};
