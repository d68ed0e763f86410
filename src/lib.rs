#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod tui;
