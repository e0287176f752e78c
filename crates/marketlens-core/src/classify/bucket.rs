use serde::Serialize;

use super::CategorySet;

/// One labelled list of classified items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: String,
    pub items: Vec<String>,
}

/// Classified items per category, in rule order.
///
/// Items keep insertion order. Items added through `push` never repeat within
/// a category; `append` keeps repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    categories: Vec<Category>,
}

impl CategoryBucket {
    /// One empty category per label of `set`.
    pub fn empty(set: &CategorySet) -> Self {
        Self {
            categories: set
                .labels()
                .map(|label| Category {
                    label: label.to_string(),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends `item` to the category at `index` unless it is already there.
    ///
    /// Returns whether the item was added.
    pub(crate) fn push(&mut self, index: usize, item: &str) -> bool {
        let Some(category) = self.categories.get_mut(index) else {
            return false;
        };
        if category.items.iter().any(|existing| existing == item) {
            return false;
        }
        category.items.push(item.to_string());
        true
    }

    /// Appends `item` to the category at `index`, repeats included.
    pub(crate) fn append(&mut self, index: usize, item: &str) {
        if let Some(category) = self.categories.get_mut(index) {
            category.items.push(item.to_string());
        }
    }

    /// Items for `label`, `None` if the label is not part of the set.
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Categories that received at least one item; what gets rendered.
    pub fn non_empty(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.items.is_empty())
    }

    /// Number of categories, empty ones included.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when no category received any item.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    pub fn total_items(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
