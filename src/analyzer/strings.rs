//! Notable String Extraction
//!
//! A "notable" string is a literal long enough (>= 20 chars) to plausibly
//! identify the package that shipped it, rather than incidental text.
//! [`NotableStringSet`] keeps at most N of them, always preferring the
//! longest: when an insertion overflows the cap, the current shortest
//! member is evicted. The minimum is recomputed on every eviction; the cap
//! is small enough that caching it buys nothing.

use std::collections::BTreeSet;
use std::path::Path;

use crate::analyzer::parser::{self, Grammar};
use crate::constants::fingerprint::{DEFAULT_NOTABLE_STRING_LIMIT, MIN_NOTABLE_STRING_LENGTH};

/// Bounded set of identifying string literals.
///
/// Invariant: `len() <= capacity` after every insertion. With capacity N and
/// more than N qualifying inserts, the survivors are the N longest strings
/// seen (ties broken lexicographically, smallest evicted first, so eviction
/// is deterministic).
#[derive(Debug, Clone)]
pub struct NotableStringSet {
    strings: BTreeSet<String>,
    capacity: Option<usize>,
}

impl Default for NotableStringSet {
    fn default() -> Self {
        Self::new()
    }
}

impl NotableStringSet {
    /// Create a set with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(Some(DEFAULT_NOTABLE_STRING_LIMIT))
    }

    /// Create a set with an explicit capacity; `None` means unbounded
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            strings: BTreeSet::new(),
            capacity,
        }
    }

    /// Insert a string, evicting the shortest member if the cap overflows
    pub fn insert(&mut self, value: String) {
        self.strings.insert(value);
        if let Some(cap) = self.capacity
            && self.strings.len() > cap
        {
            self.evict_shortest();
        }
    }

    /// Remove the current minimum-length member. Lexicographic tie-break
    /// comes for free from the BTreeSet iteration order.
    fn evict_shortest(&mut self) {
        let shortest = self
            .strings
            .iter()
            .min_by_key(|s| s.chars().count())
            .cloned();
        if let Some(s) = shortest {
            self.strings.remove(&s);
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.strings.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.strings.iter()
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.strings.into_iter().collect()
    }

    pub fn into_set(self) -> BTreeSet<String> {
        self.strings
    }
}

impl FromIterator<String> for NotableStringSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for s in iter {
            set.insert(s);
        }
        set
    }
}

/// Collect notable strings from one file's text into `set`.
///
/// The text is parsed as a JS/TS superset; every string literal of
/// qualifying length is inserted. Unparseable input fails softly: whatever
/// already accumulated in `set` is kept and no error surfaces.
pub fn collect_notable_strings(content: &str, path: &Path, set: &mut NotableStringSet) {
    let grammar = Grammar::for_path(path);
    for literal in parser::string_literals(content, grammar) {
        if literal.chars().count() >= MIN_NOTABLE_STRING_LENGTH {
            set.insert(literal);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn test_capacity_enforced() {
        let mut set = NotableStringSet::with_capacity(Some(2));
        set.insert("a".repeat(30));
        set.insert("b".repeat(25));
        set.insert("c".repeat(40));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"a".repeat(30)));
        assert!(set.contains(&"c".repeat(40)));
        assert!(!set.contains(&"b".repeat(25)));
    }

    #[test]
    fn test_short_insert_into_full_set_is_rejected() {
        let mut set = NotableStringSet::with_capacity(Some(2));
        set.insert("x".repeat(30));
        set.insert("y".repeat(30));
        set.insert("z".repeat(21));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&"z".repeat(21)));
    }

    #[test]
    fn test_unbounded_set() {
        let mut set = NotableStringSet::with_capacity(None);
        for i in 0..200 {
            set.insert(format!("string number {:>10} padded out", i));
        }
        assert_eq!(set.len(), 200);
    }

    #[test]
    fn test_duplicate_insert_does_not_evict() {
        let mut set = NotableStringSet::with_capacity(Some(2));
        set.insert("a".repeat(30));
        set.insert("b".repeat(25));
        set.insert("a".repeat(30));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"b".repeat(25)));
    }

    #[test]
    fn test_collect_from_js() {
        let src = r#"
            const msg = "this string is definitely long enough";
            const tiny = "short";
            function f() { return 'another quite notable string literal'; }
        "#;
        let mut set = NotableStringSet::new();
        collect_notable_strings(src, &PathBuf::from("sample.js"), &mut set);
        assert_eq!(set.len(), 2);
        assert!(set.contains("this string is definitely long enough"));
        assert!(!set.contains("short"));
    }

    #[test]
    fn test_collect_from_garbage_keeps_accumulated() {
        let mut set = NotableStringSet::new();
        set.insert("previously accumulated long string".to_string());
        collect_notable_strings("\u{0}\u{1} binary garbage", &PathBuf::from("blob.js"), &mut set);
        assert_eq!(set.len(), 1);
    }

    proptest! {
        /// With capacity N and more than N distinct qualifying strings, the
        /// final set holds exactly the N longest candidates.
        #[test]
        fn prop_keeps_longest(mut lengths in proptest::collection::vec(20usize..120, 5..40)) {
            lengths.sort_unstable();
            lengths.dedup();
            let candidates: Vec<String> = lengths.iter().map(|n| "s".repeat(*n)).collect();

            let cap = 4usize;
            let mut set = NotableStringSet::with_capacity(Some(cap));
            for c in &candidates {
                set.insert(c.clone());
                prop_assert!(set.len() <= cap);
            }

            let mut expected = candidates.clone();
            expected.sort_by_key(|s| std::cmp::Reverse(s.len()));
            expected.truncate(cap);
            for want in &expected {
                prop_assert!(set.contains(want), "missing {}", want.len());
            }
        }
    }
}
