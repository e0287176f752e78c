//! Keyword classification of free-text answers into category buckets.
//!
//! The answer is scanned once, top to bottom. Any line naming a category
//! (its label or one of its keywords) moves the current-category pointer;
//! bullet lines are collected under whatever category is current. A section
//! header that names no known category closes the current one when it sits at
//! the same outline level or above; deeper sub-headings keep it open. The scan
//! is order sensitive and purely heuristic.

mod bucket;
mod rules;

pub use bucket::{Category, CategoryBucket};
pub use rules::{CategoryRule, CategorySet};

/// Characters that mark a list item at the start of a line.
pub const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// Turns answer text into category buckets.
///
/// The keyword heuristic is the only implementation today; a parser for
/// structured responses can replace it without touching callers.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str, set: &CategorySet) -> CategoryBucket;
}

/// Line-by-line keyword matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str, set: &CategorySet) -> CategoryBucket {
        classify(text, set)
    }
}

/// Buckets the bullet lines of `text` under the categories of `set`.
///
/// Every category of `set` is present in the result, possibly empty.
pub fn classify(text: &str, set: &CategorySet) -> CategoryBucket {
    let mut bucket = CategoryBucket::empty(set);
    // Category index and the heading rank of the line that selected it.
    let mut current: Option<(usize, u8)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match set.match_line(line) {
            Some(index) => current = Some((index, heading_rank(line))),
            None if is_section_header(line) => {
                if current.is_some_and(|(_, rank)| heading_rank(line) <= rank) {
                    current = None;
                }
            }
            None => {}
        }

        if let (Some((index, _)), Some(item)) = (current, bullet_content(line)) {
            bucket.push(index, item);
        }
    }

    bucket
}

/// Whether a trimmed line starts with a bullet marker.
pub fn is_bullet(line: &str) -> bool {
    line.starts_with(&BULLET_MARKERS[..])
}

/// A non-bullet line shaped like a heading: `Title:` or `# Title`.
pub fn is_section_header(line: &str) -> bool {
    !is_bullet(line) && (line.ends_with(':') || line.starts_with('#'))
}

/// Outline level of a heading line; smaller is more general.
///
/// `#` headings rank by their hash count, numbered headings (`1.`, `2)`) come
/// after every markdown level and plain `Title:` lines rank last.
pub fn heading_rank(line: &str) -> u8 {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes > 0 {
        return hashes.min(6) as u8;
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && matches!(line[digits..].chars().next(), Some('.' | ')')) {
        return 7;
    }
    8
}

/// Strips bullet markers and whitespace from both ends of a line.
pub fn strip_markers(line: &str) -> &str {
    line.trim_matches(|c: char| BULLET_MARKERS.contains(&c) || c.is_whitespace())
}

/// Content of a bullet line, or `None` for non-bullets and empty bullets.
pub fn bullet_content(line: &str) -> Option<&str> {
    if !is_bullet(line) {
        return None;
    }
    let content = strip_markers(line);
    (!content.is_empty()).then_some(content)
}
