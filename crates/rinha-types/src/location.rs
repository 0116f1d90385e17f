use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a term.
///
/// `start` and `end` are byte offsets into the original source file.
/// Locations are carried for diagnostics only and never influence
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub filename: String,
}

impl Location {
    /// Create a new location.
    pub fn new(start: usize, end: usize, filename: impl Into<String>) -> Self {
        Self {
            start,
            end,
            filename: filename.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.filename, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = Location::new(3, 15, "print.rinha");
        assert_eq!(format!("{loc}"), "print.rinha:3..15");
    }

    #[test]
    fn test_location_decodes_from_json() {
        let loc: Location =
            serde_json::from_str(r#"{"start": 0, "end": 12, "filename": "hello.rinha"}"#)
                .unwrap();
        assert_eq!(loc, Location::new(0, 12, "hello.rinha"));
    }

    #[test]
    fn test_location_display_determinism_100_iterations() {
        let loc = Location::new(7, 9, "a.rinha");
        let first = loc.to_string();
        for i in 0..100 {
            assert_eq!(first, loc.to_string(), "Determinism failure at iteration {i}");
        }
    }
}
