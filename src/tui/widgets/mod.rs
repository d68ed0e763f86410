//! Reusable TUI widgets.

pub mod form;
pub mod route_map;
pub mod status_bar;

pub use form::{Form, FormField, draw_form};
pub use route_map::draw_route_map;
pub use status_bar::{NoticeKind, StatusBarContext, draw_status_bar};
