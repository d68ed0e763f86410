//! Application routes and path parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::TripId;

static RESULTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/results/([^/?#\s]+)/?$").expect("valid hardcoded regex"));

/// A navigable location in the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The trip intake form. Also the fallback for unknown paths.
    Intake,
    /// Results for one trip.
    Results(TripId),
}

impl Route {
    /// Maps a path onto a route; anything unrecognised lands on [`Route::Intake`].
    pub fn parse(path: &str) -> Self {
        RESULTS_RE
            .captures(path.trim())
            .and_then(|caps| TripId::new(&caps[1]))
            .map_or(Self::Intake, Self::Results)
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Intake => "/".to_string(),
            Self::Results(id) => format!("/results/{id}"),
        }
    }
}

#[mutants::skip]
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(raw: &str) -> Route {
        Route::Results(TripId::new(raw).unwrap())
    }

    #[test]
    fn root_is_intake() {
        assert_eq!(Route::parse("/"), Route::Intake);
    }

    #[test]
    fn unknown_paths_fall_back_to_intake() {
        for path in ["", "/trips", "/results", "/results/", "/results/a/b", "nonsense"] {
            assert_eq!(Route::parse(path), Route::Intake, "{path:?}");
        }
    }

    #[test]
    fn results_path_parsed() {
        assert_eq!(Route::parse("/results/abc123"), results("abc123"));
    }

    #[test]
    fn results_path_with_trailing_slash() {
        assert_eq!(Route::parse("/results/ABC123/"), results("abc123"));
    }

    #[test]
    fn results_id_lowercased() {
        assert_eq!(Route::parse("/results/ABC123"), results("abc123"));
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Intake, results("9f3a1c2b")] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn results_path_is_lowercase() {
        assert_eq!(results("ABC").path(), "/results/abc");
    }
}
