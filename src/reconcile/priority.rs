//! Priority ordering for roadmap items

use std::cmp::Ordering;

/// A priority counts only when present and greater than zero
pub fn effective_priority(priority: Option<i64>) -> Option<i64> {
    priority.filter(|p| *p > 0)
}

/// Total order over optional priorities
///
/// Effective priorities sort ascending (1 is most urgent) ahead of
/// everything else. Two items without an effective priority compare
/// equal, so callers must sort stably to keep their input order.
pub fn compare_priority(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (effective_priority(a), effective_priority(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(input: &[Option<i64>]) -> Vec<Option<i64>> {
        let mut items = input.to_vec();
        items.sort_by(|a, b| compare_priority(*a, *b));
        items
    }

    #[test]
    fn test_effective_priorities_ascending() {
        assert_eq!(sorted(&[Some(4), Some(1), Some(2)]), vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_absent_sorts_last() {
        assert_eq!(sorted(&[None, Some(3)]), vec![Some(3), None]);
    }

    #[test]
    fn test_zero_is_no_priority() {
        assert_eq!(sorted(&[Some(0), Some(4)]), vec![Some(4), Some(0)]);
        assert_eq!(compare_priority(Some(0), None), Ordering::Equal);
        assert_eq!(compare_priority(Some(-1), Some(2)), Ordering::Greater);
    }

    #[test]
    fn test_no_priority_keeps_input_order() {
        let mut items = vec![("a", None), ("b", Some(0)), ("c", Some(2)), ("d", None)];
        items.sort_by(|x, y| compare_priority(x.1, y.1));
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }
}
