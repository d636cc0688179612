//! The fixed, ordered set of category labels.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{DocsortError, Result};

/// Ordered set of category labels, including a designated fallback label.
///
/// Built once at startup and shared for the lifetime of the process; cloning
/// is a reference-count bump. Declaration order is significant: it breaks
/// ties when two categories end up with the same averaged score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    labels: Arc<[String]>,
    fallback: usize,
}

impl CategorySet {
    /// Create a category set from labels in declaration order.
    ///
    /// Fails with [`DocsortError::Configuration`] when the set is empty,
    /// contains blank or duplicate labels, or does not contain `fallback`.
    pub fn new<I, S>(labels: I, fallback: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DocsortError::Configuration(
                "category set is empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.trim().is_empty() {
                return Err(DocsortError::Configuration(
                    "category labels must not be blank".to_string(),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(DocsortError::Configuration(format!(
                    "duplicate category label '{label}'"
                )));
            }
        }

        let fallback = labels
            .iter()
            .position(|l| l == fallback)
            .ok_or_else(|| {
                DocsortError::Configuration(format!(
                    "fallback label '{fallback}' is not in the category set"
                ))
            })?;

        Ok(Self {
            labels: labels.into(),
            fallback,
        })
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels as string slices, the shape oracles take.
    pub fn as_strs(&self) -> Vec<&str> {
        self.labels.iter().map(String::as_str).collect()
    }

    /// The fallback ("unclassifiable") label.
    pub fn fallback(&self) -> &str {
        &self.labels[self.fallback]
    }

    pub fn is_fallback(&self, label: &str) -> bool {
        self.fallback() == label
    }

    /// Declaration index of a label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let set = CategorySet::new(["Invoice", "Contract", "Other"], "Other").unwrap();
        assert_eq!(set.as_strs(), vec!["Invoice", "Contract", "Other"]);
        assert_eq!(set.fallback(), "Other");
        assert_eq!(set.position("Contract"), Some(1));
        assert!(set.is_fallback("Other"));
        assert!(!set.is_fallback("Invoice"));
    }

    #[test]
    fn fallback_need_not_be_last() {
        let set = CategorySet::new(["Other", "A"], "Other").unwrap();
        assert_eq!(set.fallback(), "Other");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn rejects_empty_set() {
        let err = CategorySet::new(Vec::<String>::new(), "Other").unwrap_err();
        assert!(matches!(err, DocsortError::Configuration(_)));
    }

    #[test]
    fn rejects_missing_fallback() {
        let err = CategorySet::new(["A", "B"], "Other").unwrap_err();
        assert!(err.to_string().contains("fallback label 'Other'"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = CategorySet::new(["A", "A", "Other"], "Other").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_blank_label() {
        let err = CategorySet::new(["A", "  ", "Other"], "Other").unwrap_err();
        assert!(matches!(err, DocsortError::Configuration(_)));
    }

    #[test]
    fn clones_share_storage() {
        let set = CategorySet::new(["A", "Other"], "Other").unwrap();
        let copy = set.clone();
        assert_eq!(set, copy);
        assert!(std::ptr::eq(set.labels().as_ptr(), copy.labels().as_ptr()));
    }
}
