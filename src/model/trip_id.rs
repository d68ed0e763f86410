use std::fmt;

/// Opaque identifier of a planned trip.
///
/// The planner treats identifiers case-insensitively; they are always held
/// lower-cased so URLs and comparisons are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripId(String);

impl TripId {
    /// Normalizes a raw identifier, or returns `None` if it is empty or
    /// contains characters that would change the meaning of a URL path.
    pub fn new(raw: &str) -> Option<Self> {
        let id = raw.trim().to_lowercase();
        let path_safe = !id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'));
        (!id.is_empty() && path_safe).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[mutants::skip]
impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
