//! Domains and their active tag sets

use serde::{Deserialize, Serialize};

/// Insertion-ordered set of applicability tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning false if it was already present
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove a tag, returning false if it was absent
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Replace the whole set with a single tag
    pub fn set_only(&mut self, tag: &str) {
        self.0.clear();
        self.0.push(tag.to_string());
    }

    /// Append every tag of `other` not already present
    pub fn extend_from(&mut self, other: &TagSet) {
        for tag in other.iter() {
            self.insert(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

/// One form control group and its current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub active_tags: TagSet,
}

impl Domain {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active_tags: TagSet::new(),
        }
    }

    pub fn with_tags(name: &str, tags: TagSet) -> Self {
        Self {
            name: name.to_string(),
            active_tags: tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tag_set {
        use super::*;

        #[test]
        fn test_insert_keeps_order_and_skips_duplicates() {
            let mut set = TagSet::new();
            assert!(set.insert("b"));
            assert!(set.insert("a"));
            assert!(!set.insert("b"));
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        }

        #[test]
        fn test_remove_absent_is_noop() {
            let mut set: TagSet = ["a"].into_iter().collect();
            assert!(!set.remove("z"));
            assert_eq!(set.len(), 1);
            assert!(set.remove("a"));
            assert!(set.is_empty());
        }

        #[test]
        fn test_set_only_discards_previous() {
            let mut set: TagSet = ["a", "b", "c"].into_iter().collect();
            set.set_only("d");
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["d"]);
        }

        #[test]
        fn test_extend_from_appends_new_tags() {
            let mut set: TagSet = ["a", "b"].into_iter().collect();
            let other: TagSet = ["b", "c"].into_iter().collect();
            set.extend_from(&other);
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        }

        #[test]
        fn test_serializes_as_plain_array() {
            let set: TagSet = ["x", "y"].into_iter().collect();
            let json = serde_json::to_string(&set).unwrap();
            assert_eq!(json, r#"["x","y"]"#);
        }
    }

    #[test]
    fn test_new_domain_is_empty() {
        let domain = Domain::new("size");
        assert_eq!(domain.name, "size");
        assert!(domain.active_tags.is_empty());
    }
}
