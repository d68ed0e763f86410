//! Client side of the remote trip planner.
//!
//! [`TripService`] is the seam the UI talks to; [`HttpTripService`] is the
//! production implementation and [`Dispatcher`] runs its calls off the UI
//! thread.

mod client;
mod dispatch;
mod error;
mod service;

pub use client::{Endpoints, HttpTripService, interpret_fetch_response, interpret_submit_response};
#[cfg(test)]
pub(crate) use dispatch::fake;
pub use dispatch::{ApiEvent, Dispatcher, Generation};
pub use error::ApiError;
pub use service::{SubmitReceipt, TripService};
