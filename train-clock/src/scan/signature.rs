//! Tag-path patterns describing one itinerary page layout.

use serde::Deserialize;

/// Where the interesting text lives on a results page.
///
/// These are facts about one site's markup, not about the scanning
/// algorithm. If the page template changes, the patterns need to be
/// re-derived from the new markup; the extractor itself stays the same.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSignature {
    /// Trailing tags around a station name heading a route section.
    pub station_marker: Vec<String>,

    /// Trailing tags around the line name in a route row.
    pub line_label: Vec<String>,

    /// Innermost tag of a departure time cell.
    pub time_cell: String,

    /// Label text must be strictly longer than this many characters.
    pub min_label_chars: usize,
}

impl PageSignature {
    /// Layout of the Jorudan English route search results page.
    pub fn jorudan() -> Self {
        Self {
            station_marker: tags(&["b", "font"]),
            line_label: tags(&[
                "tr", "td", "img", "td", "img", "td", "img", "td", "img", "td", "b", "font",
            ]),
            time_cell: "font".to_string(),
            min_label_chars: 4,
        }
    }
}

impl Default for PageSignature {
    fn default() -> Self {
        Self::jorudan()
    }
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}
