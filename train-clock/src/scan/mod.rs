//! Recovering departures from itinerary result pages.
//!
//! The results page is presentation-only HTML. Rather than building a DOM
//! query, the scanner replays the document as a stream of open-tag and text
//! events and recognises the interesting cells by their trailing tag path.
//! The paths are collected in a [`PageSignature`] so that a template change
//! only means new patterns.

mod events;
mod extractor;
mod signature;
mod tag_path;

#[cfg(test)]
pub(crate) mod test_pages;

pub use events::{PageEvent, page_events};
pub use extractor::{Extraction, ScanState, ScheduleExtractor, extract_departure};
pub use signature::PageSignature;
pub use tag_path::TagPath;
