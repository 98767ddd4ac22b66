// shared/src/transform/nearest.rs
//
// Tooltip lookup: which sample sits under the cursor. Shared by every line
// and segment chart.

/// First index whose key is not less than `target`. `items` must be sorted by `key`.
pub fn bisect_left<T, K>(items: &[T], target: f64, key: K) -> usize
where
    K: Fn(&T) -> f64,
{
    items.partition_point(|it| key(it) < target)
}

/// Index of the sample whose key is closest to `target`.
///
/// Equal distance to both neighbours resolves to the earlier index.
pub fn nearest_index<T, K>(items: &[T], target: f64, key: K) -> Option<usize>
where
    K: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }
    let i = bisect_left(items, target, &key);
    if i == 0 {
        return Some(0);
    }
    if i >= items.len() {
        return Some(items.len() - 1);
    }

    let before = target - key(&items[i - 1]);
    let after = key(&items[i]) - target;
    Some(if before <= after { i - 1 } else { i })
}

pub fn nearest<T, K>(items: &[T], target: f64, key: K) -> Option<&T>
where
    K: Fn(&T) -> f64,
{
    nearest_index(items, target, key).map(|i| &items[i])
}
