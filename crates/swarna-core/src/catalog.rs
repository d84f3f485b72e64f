//! # Category Protection
//!
//! The seed metal categories every rate and product depends on must never
//! be deleted. The protected set is built once from configuration and
//! handed to whatever manages categories; it cannot be changed afterwards.

use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};

/// Category codes seeded on a fresh install.
pub const DEFAULT_PROTECTED_CATEGORIES: &[&str] = &["GOLD22", "GOLD24", "SILVER", "PLATINUM"];

/// Immutable set of category codes that may not be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedCategories {
    codes: BTreeSet<String>,
}

impl ProtectedCategories {
    /// Builds the set from codes (trimmed, upper-cased, blanks dropped).
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ProtectedCategories {
            codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive membership check.
    pub fn is_protected(&self, code: &str) -> bool {
        self.codes.contains(&code.trim().to_ascii_uppercase())
    }

    /// Returns an error if `code` is protected.
    pub fn ensure_deletable(&self, code: &str) -> CoreResult<()> {
        if self.is_protected(code) {
            return Err(CoreError::ProtectedCategory(code.trim().to_string()));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

impl Default for ProtectedCategories {
    fn default() -> Self {
        ProtectedCategories::new(DEFAULT_PROTECTED_CATEGORIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let protected = ProtectedCategories::default();
        assert!(protected.is_protected("GOLD22"));
        assert!(protected.is_protected(" silver "));
        assert!(!protected.is_protected("DIAMOND"));
        assert_eq!(protected.iter().count(), 4);
    }

    #[test]
    fn test_ensure_deletable() {
        let protected = ProtectedCategories::new(["gold18", ""]);
        assert!(protected.ensure_deletable("GOLD22").is_ok());
        let err = protected.ensure_deletable("Gold18").unwrap_err();
        assert_eq!(err.to_string(), "Category Gold18 is protected and cannot be deleted");
        assert_eq!(protected.iter().collect::<Vec<_>>(), vec!["GOLD18"]);
    }
}
