//! TUI: App state, event loop, routes, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod route;
pub mod screens;
pub mod widgets;

pub use app::App;
pub use error::AppError;
pub use route::Route;
