use serde::Serialize;

use super::validation::{ValidationError, validate_cycle_used, validate_location};

/// One of the four inputs of a trip request, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    CurrentLocation,
    PickupLocation,
    DropoffLocation,
    CycleUsed,
}

static ALL_FIELDS: &[TripField] = &[
    TripField::CurrentLocation,
    TripField::PickupLocation,
    TripField::DropoffLocation,
    TripField::CycleUsed,
];

impl TripField {
    /// Returns all fields in form order.
    pub fn all() -> &'static [TripField] {
        ALL_FIELDS
    }

    /// Position of this field within the intake form.
    pub fn index(self) -> usize {
        match self {
            Self::CurrentLocation => 0,
            Self::PickupLocation => 1,
            Self::DropoffLocation => 2,
            Self::CycleUsed => 3,
        }
    }

    /// Label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentLocation => "Current Location (City, State)",
            Self::PickupLocation => "Pickup Location (City, State)",
            Self::DropoffLocation => "Dropoff Location (City, State)",
            Self::CycleUsed => "Current 70-Hour Cycle Used (Hours)",
        }
    }

    /// Hint shown while the input is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::CurrentLocation => "e.g., Chicago, IL",
            Self::PickupLocation => "e.g., Dallas, TX",
            Self::DropoffLocation => "e.g., Los Angeles, CA",
            Self::CycleUsed => "e.g., 32.5",
        }
    }
}

/// A validation failure attributed to a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: TripField,
    pub error: ValidationError,
}

/// A validated trip request, ready to send to the planner.
///
/// Serializes to the planner's snake_case body with `cycle_used_hours` as a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_used_hours: f64,
}

impl TripRequest {
    /// Validates raw form text and builds a request.
    ///
    /// Every field is checked, so the error list names each failing input
    /// exactly once, in form order.
    pub fn parse(
        current_location: &str,
        pickup_location: &str,
        dropoff_location: &str,
        cycle_used: &str,
    ) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut check = |field: TripField, result: Result<(), ValidationError>| {
            if let Err(error) = result {
                errors.push(FieldError { field, error });
            }
        };

        let current = validate_location(current_location);
        check(TripField::CurrentLocation, current.map(|_| ()));
        let pickup = validate_location(pickup_location);
        check(TripField::PickupLocation, pickup.map(|_| ()));
        let dropoff = validate_location(dropoff_location);
        check(TripField::DropoffLocation, dropoff.map(|_| ()));
        let hours = validate_cycle_used(cycle_used);
        check(TripField::CycleUsed, hours.map(|_| ()));

        match (current, pickup, dropoff, hours) {
            (Ok(current), Ok(pickup), Ok(dropoff), Ok(hours)) => Ok(Self {
                current_location: current.to_string(),
                pickup_location: pickup.to_string(),
                dropoff_location: dropoff.to_string(),
                cycle_used_hours: hours,
            }),
            _ => Err(errors),
        }
    }
}
