use async_trait::async_trait;

use super::error::ApiError;
use crate::model::{TripId, TripRecord, TripRequest};

/// What the planner hands back for an accepted trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub trip_id: TripId,
    /// Acknowledgement text from the planner, if it sent one.
    pub message: Option<String>,
}

/// The remote trip planner.
///
/// Implemented over HTTP by [`HttpTripService`](super::HttpTripService);
/// tests substitute in-memory fakes.
#[async_trait]
pub trait TripService: Send + Sync {
    /// Creates a trip from a validated request.
    async fn submit_trip(&self, request: &TripRequest) -> Result<SubmitReceipt, ApiError>;

    /// Fetches a previously created trip.
    async fn fetch_trip(&self, trip_id: &TripId) -> Result<TripRecord, ApiError>;

    /// URL of the printable driver logs for a trip.
    fn logs_url(&self, trip_id: &TripId) -> String;

    /// Base address of the planner, for display.
    fn base_url(&self) -> &str;
}
