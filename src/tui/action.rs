//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::{TripId, TripRequest};

use super::route::Route;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to dispatch planner requests and move between
/// routes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Go to the given route, loading its data if it needs any.
    Navigate(Route),
    /// Send a validated trip request to the planner.
    SubmitTrip(TripRequest),
    /// Fetch the given trip again.
    LoadTrip(TripId),
    /// Open the help overlay for the current screen.
    ShowHelp,
    /// Leave the help overlay.
    CloseHelp,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
