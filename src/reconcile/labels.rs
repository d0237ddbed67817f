//! Tag/label matching shared by both trackers

use std::collections::HashSet;

/// Lower-case and trim labels, dropping any that end up empty
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| label.as_ref().trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Whether `item_labels` carries every label in `required`
///
/// Comparison is case-insensitive and whitespace-trimmed, with set
/// semantics on both sides. An empty `required` list always matches.
pub fn matches_all<A: AsRef<str>, B: AsRef<str>>(item_labels: &[A], required: &[B]) -> bool {
    let required = normalize_labels(required);
    if required.is_empty() {
        return true;
    }

    let present: HashSet<String> = normalize_labels(item_labels).into_iter().collect();
    required.iter().all(|label| present.contains(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_required_always_matches() {
        assert!(matches_all::<&str, &str>(&[], &[]));
        assert!(matches_all(&["bug"], &[] as &[&str]));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(matches_all(&["Roadmap", " Q3 "], &["roadmap", "q3"]));
        assert!(matches_all(&["roadmap"], &["  ROADMAP  "]));
    }

    #[test]
    fn test_every_required_label_must_be_present() {
        assert!(!matches_all(&["roadmap"], &["roadmap", "q3"]));
        assert!(matches_all(&["q3", "roadmap", "extra"], &["roadmap", "q3"]));
    }

    #[test]
    fn test_no_prefix_matching() {
        assert!(!matches_all(&["roadmap-2024"], &["roadmap"]));
    }

    #[test]
    fn test_duplicates_and_blank_labels_ignored() {
        assert!(matches_all(&["a", "", "  "], &["a", "A", " "]));
        assert_eq!(normalize_labels(&[" A ", "", "b"]), vec!["a", "b"]);
    }
}
