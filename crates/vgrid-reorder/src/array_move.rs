//! Reorder a flat backing array (column order) by a resolved delta.

use crate::error::{ReorderError, Result};
use rustc_hash::FxHashSet;

/// Move the `selected` elements of `arr` by `delta` positions.
///
/// `index_of` maps an id to its current position in `arr`. Selected
/// elements are removed from the highest index down, then reinserted in
/// selection order at `original + delta`, clamped to the bounds of the
/// array. Repeated ids are ignored after their first occurrence.
///
/// # Errors
///
/// Returns [`ReorderError::UnknownItem`] for an id that `index_of` does not
/// resolve to a position inside `arr`.
pub fn array_move<T, S, F>(arr: &[T], selected: &[S], delta: isize, index_of: F) -> Result<Vec<T>>
where
    T: Clone,
    S: AsRef<str>,
    F: Fn(&str) -> Option<usize>,
{
    let mut seen = FxHashSet::default();
    let mut origins = Vec::with_capacity(selected.len());
    for id in selected {
        let id = id.as_ref();
        if !seen.insert(id) {
            continue;
        }
        let ix = index_of(id)
            .filter(|&ix| ix < arr.len())
            .ok_or_else(|| ReorderError::unknown(id))?;
        origins.push(ix);
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(
        message = "reorder.array_move",
        len = arr.len(),
        selected = origins.len(),
        delta,
    );

    if delta == 0 || origins.is_empty() {
        return Ok(arr.to_vec());
    }

    let mut removal = origins.clone();
    removal.sort_unstable_by(|a, b| b.cmp(a));
    removal.dedup();

    let mut out = arr.to_vec();
    for ix in removal {
        out.remove(ix);
    }
    for ix in origins {
        let target = (ix as isize + delta).clamp(0, out.len() as isize) as usize;
        out.insert(target, arr[ix].clone());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<&'static str> {
        vec!["a", "b", "c", "d"]
    }

    fn lookup<'a>(cols: &'a [&'static str]) -> impl Fn(&str) -> Option<usize> + 'a {
        move |id| cols.iter().position(|c| *c == id)
    }

    #[test]
    fn moves_single_column_right() {
        let cols = cols();
        let out = array_move(&cols, &["a"], 2, lookup(&cols)).unwrap();
        assert_eq!(out, ["b", "c", "a", "d"]);
    }

    #[test]
    fn clamps_to_bounds() {
        let cols = cols();
        let out = array_move(&cols, &["d"], -10, lookup(&cols)).unwrap();
        assert_eq!(out, ["d", "a", "b", "c"]);
        let out = array_move(&cols, &["a"], 10, lookup(&cols)).unwrap();
        assert_eq!(out, ["b", "c", "d", "a"]);
    }

    #[test]
    fn moves_multiple_columns() {
        let cols = cols();
        let out = array_move(&cols, &["a", "c"], 1, lookup(&cols)).unwrap();
        assert_eq!(out, ["b", "a", "d", "c"]);
    }

    #[test]
    fn selection_order_does_not_corrupt_removal() {
        let cols = cols();
        let out = array_move(&cols, &["c", "a"], 1, lookup(&cols)).unwrap();
        // Removal is by index, so both land one slot to the right.
        assert_eq!(out, ["b", "a", "d", "c"]);
    }

    #[test]
    fn zero_delta_and_duplicates() {
        let cols = cols();
        assert_eq!(array_move(&cols, &["b"], 0, lookup(&cols)).unwrap(), cols);
        let out = array_move(&cols, &["b", "b"], 1, lookup(&cols)).unwrap();
        assert_eq!(out, ["a", "c", "b", "d"]);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let cols = cols();
        assert_eq!(
            array_move(&cols, &["z"], 1, lookup(&cols)),
            Err(ReorderError::unknown("z"))
        );
    }
}
