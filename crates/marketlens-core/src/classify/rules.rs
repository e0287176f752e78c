use serde::Serialize;

/// A category label plus the keywords that announce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRule {
    label: String,
    /// Lowercased label followed by lowercased synonyms
    #[serde(skip)]
    needles: Vec<String>,
}

impl CategoryRule {
    /// A rule that matches only its own label (case-insensitive).
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let needles = vec![label.to_lowercase()];
        Self { label, needles }
    }

    /// Adds synonyms; a line containing any of them selects this category.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.needles
            .extend(keywords.into_iter().map(|k| k.as_ref().to_lowercase()));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `lower_line` must already be lowercased.
    fn matches(&self, lower_line: &str) -> bool {
        self.needles
            .iter()
            .any(|needle| lower_line.contains(needle.as_str()))
    }
}

/// Ordered category rules for one analysis mode.
///
/// Order matters: when a line mentions several categories the first rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySet {
    rules: Vec<CategoryRule>,
}

impl CategorySet {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Label-only rules, in the given order.
    pub fn from_labels(labels: &[&str]) -> Self {
        Self::new(labels.iter().copied().map(CategoryRule::new).collect())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(CategoryRule::label)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the first rule mentioned by `line`.
    pub fn match_line(&self, line: &str) -> Option<usize> {
        let lower = line.to_lowercase();
        self.rules.iter().position(|rule| rule.matches(&lower))
    }

    pub fn search_patterns() -> Self {
        Self::from_labels(&[
            "Common Search Queries",
            "Search Trends",
            "Related Searches",
            "Top-Performing Content",
            "User Interests",
        ])
    }

    pub fn themes() -> Self {
        Self::new(vec![
            CategoryRule::new("Main Themes").with_keywords(["theme", "main"]),
            CategoryRule::new("Customer Interests").with_keywords(["interest", "customer"]),
            CategoryRule::new("Product Features").with_keywords(["feature", "product"]),
            CategoryRule::new("Brand Perception").with_keywords(["brand", "perception"]),
            CategoryRule::new("Recurring Topics").with_keywords(["recurring", "topic"]),
        ])
    }

    pub fn pain_points() -> Self {
        Self::from_labels(&[
            "Product Issues",
            "Customer Service Issues",
            "User Experience Issues",
            "Value and Pricing Issues",
        ])
    }

    /// Aspects tracked inside each platform section.
    pub fn platform_aspects() -> Self {
        Self::new(vec![
            CategoryRule::new("Summary"),
            CategoryRule::new("Metrics").with_keywords(["metric"]),
            CategoryRule::new("Content"),
            CategoryRule::new("Engagement"),
            CategoryRule::new("Success"),
            CategoryRule::new("Improvement").with_keywords(["improve"]),
        ])
    }
}
