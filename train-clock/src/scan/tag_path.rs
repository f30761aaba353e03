//! Ancestor tag path tracking.

/// Tag names seen so far in the current document scan, outermost first.
///
/// The path only ever grows: close tags are not tracked. The pages this is
/// used on are shallow enough that the trailing few entries still describe
/// where the scanner is. Call [`TagPath::clear`] between documents.
#[derive(Debug, Clone, Default)]
pub struct TagPath {
    tags: Vec<String>,
}

impl TagPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an opening tag.
    pub fn open_tag(&mut self, name: &str) {
        self.tags.push(name.to_ascii_lowercase());
    }

    /// The last `k` tags, or the whole path if it is shorter.
    pub fn suffix(&self, k: usize) -> &[String] {
        let start = self.tags.len().saturating_sub(k);
        &self.tags[start..]
    }

    /// True if the path ends with exactly `pattern`.
    ///
    /// A path shorter than the pattern never matches.
    pub fn ends_with<S: AsRef<str>>(&self, pattern: &[S]) -> bool {
        if self.tags.len() < pattern.len() {
            return false;
        }
        self.suffix(pattern.len())
            .iter()
            .zip(pattern)
            .all(|(tag, want)| tag == want.as_ref())
    }

    /// The most recently opened tag.
    pub fn innermost(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Forget everything; used at the start of each scan.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
