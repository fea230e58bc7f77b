//! Deterministic sorters over donation records.
//!
//! Both sorters return a new vector and leave their input untouched. They are
//! written against generic helpers so the matcher can reuse them on
//! `Vec<&Donation>` without cloning records.

use crate::models::Donation;

/// Stable top-down merge sort, ascending by `key`.
///
/// On equal keys the left half wins, so equal elements keep their original
/// relative order.
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort_by_key(&items[..mid], key);
    let right = merge_sort_by_key(&items[mid..], key);

    merge(left, right, key)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        result.extend(next);
    }

    result
}

/// Pivot partition sort, descending by `key`.
///
/// The first element is the pivot. Everything after it with `key >= pivot`
/// goes left, the rest right, and the result is `left ++ [pivot] ++ right`.
/// Elements equal to the pivot therefore end up ahead of it. Worst case is
/// quadratic on already-ordered input; record counts here are small.
pub fn partition_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    let Some((pivot, rest)) = items.split_first() else {
        return Vec::new();
    };
    if rest.is_empty() {
        return vec![pivot.clone()];
    }

    let pivot_key = key(pivot);
    let (greater_or_equal, less): (Vec<T>, Vec<T>) =
        rest.iter().cloned().partition(|item| key(item) >= pivot_key);

    let mut result = partition_sort_by_key(&greater_or_equal, key);
    result.push(pivot.clone());
    result.extend(partition_sort_by_key(&less, key));
    result
}

/// Returns the donations ordered by expiry, soonest first. Stable.
pub fn sort_by_expiry_ascending(records: &[Donation]) -> Vec<Donation> {
    merge_sort_by_key(records, Donation::expiry_millis)
}

/// Returns the donations ordered by quantity, largest first.
pub fn sort_by_quantity_descending(records: &[Donation]) -> Vec<Donation> {
    partition_sort_by_key(records, |d: &Donation| d.quantity)
}

/// Binary search over donations already sorted by expiry ascending.
///
/// Returns the index of a donation expiring at exactly `target_millis`, or
/// `None` if there is none. With several equal expiries any one of them may
/// be returned.
pub fn binary_search_by_expiry(sorted: &[Donation], target_millis: i64) -> Option<usize> {
    let mut low = 0usize;
    let mut high = sorted.len();

    while low < high {
        let mid = low + (high - low) / 2;
        let mid_millis = sorted[mid].expiry_millis();

        if mid_millis == target_millis {
            return Some(mid);
        }
        if mid_millis < target_millis {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, MedicineStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn donation(id: &str, quantity: u32, expiry_days: i64) -> Donation {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Donation {
            id: id.to_string(),
            donor_id: "donor".to_string(),
            name: "Aspirin".to_string(),
            description: String::new(),
            quantity,
            unit: "tablets".to_string(),
            expiry_date: base + Duration::days(expiry_days),
            batch_number: String::new(),
            manufacturer: String::new(),
            status: MedicineStatus::Available,
            location: Location {
                city: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
                pincode: String::new(),
            },
            created_at: base,
            updated_at: base,
        }
    }

    fn ids(records: &[Donation]) -> Vec<&str> {
        records.iter().map(|d| d.id.as_str()).collect()
    }

    // =========================================================================
    // Expiry sort
    // =========================================================================

    #[test]
    fn test_expiry_sort_orders_ascending() {
        let input = vec![
            donation("c", 1, 30),
            donation("a", 1, 5),
            donation("d", 1, 90),
            donation("b", 1, 10),
        ];
        let sorted = sort_by_expiry_ascending(&input);
        assert_eq!(ids(&sorted), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_expiry_sort_is_stable() {
        let input = vec![
            donation("late", 1, 20),
            donation("tie-1", 1, 10),
            donation("early", 1, 1),
            donation("tie-2", 1, 10),
            donation("tie-3", 1, 10),
        ];
        let sorted = sort_by_expiry_ascending(&input);
        assert_eq!(
            ids(&sorted),
            vec!["early", "tie-1", "tie-2", "tie-3", "late"]
        );
    }

    #[test]
    fn test_expiry_sort_is_idempotent() {
        let input = vec![
            donation("b", 1, 3),
            donation("a", 1, 3),
            donation("c", 1, 1),
        ];
        let once = sort_by_expiry_ascending(&input);
        let twice = sort_by_expiry_ascending(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expiry_sort_does_not_mutate_input() {
        let input = vec![donation("b", 1, 9), donation("a", 1, 1)];
        let before = input.clone();
        let _ = sort_by_expiry_ascending(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_expiry_sort_trivial_inputs() {
        assert!(sort_by_expiry_ascending(&[]).is_empty());
        let single = vec![donation("only", 1, 1)];
        assert_eq!(sort_by_expiry_ascending(&single), single);
    }

    // =========================================================================
    // Quantity sort
    // =========================================================================

    #[test]
    fn test_quantity_sort_partition_rule() {
        // pivot is "p" (5); the other 5 belongs to the >= bucket and lands before it
        let input = vec![
            donation("p", 5, 0),
            donation("ten", 10, 0),
            donation("five", 5, 0),
            donation("three", 3, 0),
        ];
        let sorted = sort_by_quantity_descending(&input);
        assert_eq!(ids(&sorted), vec!["ten", "five", "p", "three"]);
    }

    #[test]
    fn test_quantity_sort_orders_descending() {
        let input = vec![
            donation("a", 20, 0),
            donation("b", 100, 0),
            donation("c", 1, 0),
            donation("d", 50, 0),
        ];
        let sorted = sort_by_quantity_descending(&input);
        let quantities: Vec<u32> = sorted.iter().map(|d| d.quantity).collect();
        assert_eq!(quantities, vec![100, 50, 20, 1]);
    }

    #[test]
    fn test_quantity_sort_is_idempotent_on_distinct_keys() {
        let input = vec![
            donation("a", 3, 0),
            donation("b", 9, 0),
            donation("c", 6, 0),
        ];
        let once = sort_by_quantity_descending(&input);
        let twice = sort_by_quantity_descending(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sorters_preserve_the_multiset() {
        let input = vec![
            donation("a", 7, 4),
            donation("b", 7, 2),
            donation("c", 1, 4),
            donation("d", 9, 8),
            donation("e", 0, 1),
        ];

        for sorted in [
            sort_by_expiry_ascending(&input),
            sort_by_quantity_descending(&input),
        ] {
            assert_eq!(sorted.len(), input.len());
            let mut got = ids(&sorted);
            got.sort_unstable();
            assert_eq!(got, vec!["a", "b", "c", "d", "e"]);
        }
    }

    #[test]
    fn test_generic_helpers_work_on_references() {
        let owned = vec![donation("x", 2, 5), donation("y", 8, 1)];
        let refs: Vec<&Donation> = owned.iter().collect();

        let by_expiry = merge_sort_by_key(&refs, |d: &&Donation| d.expiry_millis());
        assert_eq!(by_expiry[0].id, "y");

        let by_quantity = partition_sort_by_key(&refs, |d: &&Donation| d.quantity);
        assert_eq!(by_quantity[0].id, "y");
    }

    // =========================================================================
    // Binary search
    // =========================================================================

    #[test]
    fn test_binary_search_finds_exact_expiry() {
        let sorted = sort_by_expiry_ascending(&[
            donation("a", 1, 1),
            donation("b", 1, 5),
            donation("c", 1, 9),
        ]);
        let target = sorted[1].expiry_millis();
        assert_eq!(binary_search_by_expiry(&sorted, target), Some(1));
    }

    #[test]
    fn test_binary_search_missing_is_none() {
        let sorted = vec![donation("a", 1, 1), donation("b", 1, 5)];
        let target = donation("z", 1, 3).expiry_millis();
        assert_eq!(binary_search_by_expiry(&sorted, target), None);
        assert_eq!(binary_search_by_expiry(&[], target), None);
    }
}
