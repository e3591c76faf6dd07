//! Builder for Gmail search expressions.
//!
//! Produces the same syntax users type into the Gmail search box, e.g.
//! `in:inbox -category:{promotions,social,updates,forums} is:unread`.

use std::fmt;

/// Inbox tab assigned by Gmail's automatic categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Promotions tab.
    Promotions,
    /// Social tab.
    Social,
    /// Updates tab.
    Updates,
    /// Forums tab.
    Forums,
}

impl Category {
    /// Convert to the search operator value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Promotions => "promotions",
            Self::Social => "social",
            Self::Updates => "updates",
            Self::Forums => "forums",
        }
    }

    /// Every tab other than Primary.
    pub const NON_PRIMARY: [Self; 4] = [Self::Promotions, Self::Social, Self::Updates, Self::Forums];
}

/// A Gmail search expression made of space-separated terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Creates an empty query (matches everything).
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Unread mail in the inbox, excluding the non-primary tabs.
    #[must_use]
    pub fn unread_primary_inbox() -> Self {
        Self::new()
            .in_folder("inbox")
            .exclude_categories(&Category::NON_PRIMARY)
            .unread()
    }

    /// Restrict to a system folder (`in:inbox`, `in:anywhere`, ...).
    #[must_use]
    pub fn in_folder(self, folder: &str) -> Self {
        self.term(format!("in:{folder}"))
    }

    /// Only unread messages.
    #[must_use]
    pub fn unread(self) -> Self {
        self.term("is:unread")
    }

    /// Exclude messages in any of the given categories.
    ///
    /// An empty slice leaves the query unchanged.
    #[must_use]
    pub fn exclude_categories(self, categories: &[Category]) -> Self {
        match categories {
            [] => self,
            [single] => self.term(format!("-category:{}", single.as_str())),
            many => {
                let names: Vec<_> = many.iter().map(Category::as_str).collect();
                self.term(format!("-category:{{{}}}", names.join(",")))
            }
        }
    }

    /// Append a raw search term. Blank terms are ignored.
    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        if !trimmed.is_empty() {
            self.terms.push(trimmed.to_string());
        }
        self
    }

    /// Returns true if the query has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_primary_inbox() {
        assert_eq!(
            SearchQuery::unread_primary_inbox().to_string(),
            "in:inbox -category:{promotions,social,updates,forums} is:unread"
        );
    }

    #[test]
    fn test_single_category_exclusion() {
        let query = SearchQuery::new().exclude_categories(&[Category::Social]);
        assert_eq!(query.to_string(), "-category:social");
    }

    #[test]
    fn test_empty_exclusion_and_blank_terms() {
        let query = SearchQuery::new()
            .exclude_categories(&[])
            .term("   ")
            .term(" from:boss@example.com ");
        assert_eq!(query.to_string(), "from:boss@example.com");
    }

    #[test]
    fn test_empty_query() {
        let query = SearchQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }
}
