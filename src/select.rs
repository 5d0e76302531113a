use std::cmp::Ordering;

/// Stable top-N truncation: sort by the extracted key descending, keep the
/// first `n`. Ties keep their original relative order (`sort_by` is stable),
/// so equal-weight categories never flicker between runs. `n >= len` returns
/// the whole list sorted.
pub fn select_top_n<T, F>(mut items: Vec<T>, n: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> f32,
{
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    items.truncate(n);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending_and_truncates() {
        let items = vec![("a", 1.0), ("b", 5.0), ("c", 3.0)];
        let top = select_top_n(items, 2, |i| i.1);
        assert_eq!(top, vec![("b", 5.0), ("c", 3.0)]);
    }

    #[test]
    fn ties_keep_original_order() {
        let items = vec![("first", 3.0), ("second", 3.0), ("last", 1.0)];
        let top = select_top_n(items, 2, |i| i.1);
        assert_eq!(top, vec![("first", 3.0), ("second", 3.0)]);
    }

    #[test]
    fn n_beyond_length_returns_everything() {
        let items = vec![("a", 2.0), ("b", 4.0)];
        let top = select_top_n(items, 10, |i| i.1);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "b");
    }
}
