//! SelectionSet - Countries chosen for comparison

use hashlink::LinkedHashSet;

/// Ordered set of NOC codes. Insertion order is display order; re-adding a
/// code that is already present is rejected and keeps its position.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    codes: LinkedHashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code; returns false for duplicates
    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.insert(code)
    }

    /// Remove a code; returns false when it was not selected
    pub fn remove(&mut self, code: &str) -> bool {
        self.codes.remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Position of a code in display order
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.iter().position(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_duplicates() {
        let mut set: SelectionSet = ["USA", "CHN", "GBR"].into_iter().collect();
        assert!(!set.insert("USA"));
        assert!(set.insert("FRA"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["USA", "CHN", "GBR", "FRA"]);

        assert!(set.remove("CHN"));
        assert!(!set.remove("CHN"));
        assert_eq!(set.index_of("GBR"), Some(1));
    }
}
