//! Runs planner requests in the background and reports back over a channel.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::error::ApiError;
use super::service::{SubmitReceipt, TripService};
use crate::model::{TripId, TripRecord, TripRequest};

/// Monotonic tag attached to every dispatched request.
pub type Generation = u64;

/// A settled planner request.
#[derive(Debug)]
pub enum ApiEvent {
    /// A trip submission finished.
    Submitted {
        generation: Generation,
        outcome: Result<SubmitReceipt, ApiError>,
    },
    /// A trip lookup finished.
    Fetched {
        generation: Generation,
        trip_id: TripId,
        outcome: Result<TripRecord, ApiError>,
    },
}

/// Spawns requests on a tokio runtime and posts one [`ApiEvent`] per request.
pub struct Dispatcher {
    service: Arc<dyn TripService>,
    runtime: Handle,
    events: UnboundedSender<ApiEvent>,
    last_generation: Generation,
}

impl Dispatcher {
    /// Creates a dispatcher and the receiving end of its event channel.
    pub fn new(service: Arc<dyn TripService>, runtime: Handle) -> (Self, UnboundedReceiver<ApiEvent>) {
        let (events, rx) = unbounded_channel();
        let dispatcher = Self {
            service,
            runtime,
            events,
            last_generation: 0,
        };
        (dispatcher, rx)
    }

    fn next_generation(&mut self) -> Generation {
        self.last_generation += 1;
        self.last_generation
    }

    /// Starts a trip submission and returns its generation.
    pub fn submit(&mut self, request: TripRequest) -> Generation {
        let generation = self.next_generation();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tracing::debug!(generation, "dispatching trip submission");
        self.runtime.spawn(async move {
            let outcome = service.submit_trip(&request).await;
            if let Err(e) = &outcome {
                tracing::warn!(generation, error = %e, "trip submission failed");
            }
            if events
                .send(ApiEvent::Submitted {
                    generation,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(generation, "event receiver gone; dropping submission result");
            }
        });
        generation
    }

    /// Starts a trip lookup and returns its generation.
    pub fn fetch(&mut self, trip_id: TripId) -> Generation {
        let generation = self.next_generation();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tracing::debug!(generation, %trip_id, "dispatching trip lookup");
        self.runtime.spawn(async move {
            let outcome = service.fetch_trip(&trip_id).await;
            if let Err(e) = &outcome {
                tracing::warn!(generation, %trip_id, error = %e, "trip lookup failed");
            }
            if events
                .send(ApiEvent::Fetched {
                    generation,
                    trip_id,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(generation, "event receiver gone; dropping lookup result");
            }
        });
        generation
    }

    /// URL of the printable logs for a trip.
    pub fn logs_url(&self, trip_id: &TripId) -> String {
        self.service.logs_url(trip_id)
    }

    /// Base address of the planner.
    pub fn base_url(&self) -> &str {
        self.service.base_url()
    }
}
