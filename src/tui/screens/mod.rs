//! TUI screen implementations.

pub mod help;
pub mod trip_form;
pub mod trip_results;

pub use help::{HelpState, draw_help};
pub use trip_form::{TripFormState, draw_trip_form};
pub use trip_results::{ResultsStatus, TripResultsState, draw_trip_results};
