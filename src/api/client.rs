use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::error::ApiError;
use super::service::{SubmitReceipt, TripService};
use crate::config::ApiConfig;
use crate::model::{TripId, TripRecord, TripRequest};

/// URL layout of the planner's trip resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Creates endpoints rooted at `base_url`; trailing slashes are dropped.
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Collection URL used to create trips.
    pub fn trips(&self) -> String {
        format!("{}/trips/", self.base)
    }

    /// URL of a single trip.
    pub fn trip(&self, trip_id: &TripId) -> String {
        format!("{}/trips/{trip_id}/", self.base)
    }

    /// URL of a trip's printable logs.
    pub fn logs(&self, trip_id: &TripId) -> String {
        format!("{}/trips/{trip_id}/logs/", self.base)
    }
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    #[serde(default)]
    trip_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Error body shape. The planner sends `message`; framework-level errors
/// (404, 405, throttling) send `detail`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

fn rejection(status: StatusCode, body: &[u8]) -> ApiError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.detail)
        .filter(|m| !m.trim().is_empty());
    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Interprets the response to a trip submission.
pub fn interpret_submit_response(
    status: StatusCode,
    body: &[u8],
) -> Result<SubmitReceipt, ApiError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }
    let parsed: SubmitBody = serde_json::from_slice(body)?;
    let trip_id = parsed
        .trip_id
        .as_deref()
        .and_then(TripId::new)
        .ok_or(ApiError::MissingTripId)?;
    Ok(SubmitReceipt {
        trip_id,
        message: parsed.message,
    })
}

/// Interprets the response to a trip lookup.
pub fn interpret_fetch_response(status: StatusCode, body: &[u8]) -> Result<TripRecord, ApiError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }
    Ok(TripRecord::from_json(body)?)
}

/// [`TripService`] backed by the planner's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTripService {
    client: Client,
    endpoints: Endpoints,
}

impl HttpTripService {
    /// Builds a client for the configured planner.
    ///
    /// No request timeout is set; failures surface from the transport.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("eldtrip/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl TripService for HttpTripService {
    async fn submit_trip(&self, request: &TripRequest) -> Result<SubmitReceipt, ApiError> {
        let url = self.endpoints.trips();
        tracing::info!(%url, "submitting trip");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "submit response received");
        interpret_submit_response(status, &body)
    }

    async fn fetch_trip(&self, trip_id: &TripId) -> Result<TripRecord, ApiError> {
        let url = self.endpoints.trip(trip_id);
        tracing::info!(%url, "fetching trip");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "trip response received");
        interpret_fetch_response(status, &body)
    }

    fn logs_url(&self, trip_id: &TripId) -> String {
        self.endpoints.logs(trip_id)
    }

    fn base_url(&self) -> &str {
        self.endpoints.base()
    }
}
