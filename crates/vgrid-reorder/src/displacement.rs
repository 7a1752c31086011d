//! Pixel displacement of a windowed list while a selection is dragged.
//!
//! The calculation models the move as two passes over the window:
//!
//! 1. **Removal**: every selected item is taken out, closing its gap. Items
//!    after it shift back by one index and by its pixel size.
//! 2. **Injection**: each selected item is reinserted at `index + delta`,
//!    anchored on whichever tracked item now occupies that index. Items at or
//!    after the insertion point shift forward again.
//!
//! A selected item whose target index has no anchor inside the window is
//! pushed past the window edge instead of being placed mid-window.
//!
//! ```
//! use vgrid_reorder::{Item, calculate_displacements};
//!
//! let items = vec![
//!     Item::new("a", 0, 0.0, 10.0),
//!     Item::new("b", 1, 10.0, 10.0),
//!     Item::new("c", 2, 20.0, 10.0),
//! ];
//! let moved = calculate_displacements(&items, &items[..1], 1).unwrap();
//! assert_eq!(moved.new_index("a"), Some(1));
//! assert_eq!(moved.displacement("b"), -10.0);
//! ```

use crate::error::{ReorderError, Result};
use crate::geometry::Item;
use rustc_hash::{FxHashMap, FxHashSet};

/// Per-item outcome of a hypothetical move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Displacements {
    /// Signed pixel offset for every in-range item and every injected
    /// selected item.
    pub displacements: FxHashMap<String, f64>,
    /// Provisional logical index after the move.
    ///
    /// Selected items pushed outside the window have no entry.
    pub new_indices: FxHashMap<String, isize>,
}

impl Displacements {
    /// Pixel offset for `id`, zero when the item is not tracked.
    #[must_use]
    pub fn displacement(&self, id: &str) -> f64 {
        self.displacements.get(id).copied().unwrap_or(0.0)
    }

    /// Provisional index for `id`.
    #[must_use]
    pub fn new_index(&self, id: &str) -> Option<isize> {
        self.new_indices.get(id).copied()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }

    /// Whether no item moves at all.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.displacements.values().all(|&d| d == 0.0)
    }

    fn identity(in_range: &[Item], selected: &[Item]) -> Self {
        let mut out = Self::default();
        for item in in_range.iter().chain(selected) {
            out.displacements.insert(item.id.clone(), 0.0);
            out.new_indices.insert(item.id.clone(), item.index as isize);
        }
        out
    }
}

/// An item whose provisional index is known.
#[derive(Debug)]
struct Tracked<'a> {
    item: &'a Item,
    new_index: isize,
    displacement: f64,
}

/// Pixel start the slot `index` would have in the current provisional layout.
///
/// Uses the tracked item at `index`, else the trailing edge of the one at
/// `index - 1`.
fn anchor_start(tracked: &[Tracked<'_>], index: isize) -> Option<f64> {
    if let Some(slot) = tracked.iter().find(|t| t.new_index == index) {
        return Some(slot.item.start + slot.displacement);
    }
    tracked
        .iter()
        .find(|t| t.new_index == index - 1)
        .map(|slot| slot.item.end() + slot.displacement)
}

/// Compute displacements and provisional indices for moving `selected` by
/// `delta` positions inside the `in_range` window.
///
/// `in_range` must be ordered by index and contiguous. `selected` may
/// contain items outside the window as long as their geometry is resolved.
///
/// # Errors
///
/// Returns [`ReorderError::EmptyWindow`] when `in_range` is empty.
pub fn calculate_displacements(
    in_range: &[Item],
    selected: &[Item],
    delta: isize,
) -> Result<Displacements> {
    let (Some(first), Some(last)) = (in_range.first(), in_range.last()) else {
        return Err(ReorderError::EmptyWindow);
    };
    if delta == 0 {
        return Ok(Displacements::identity(in_range, selected));
    }

    let selected_ids: FxHashSet<&str> = selected.iter().map(|s| s.id.as_str()).collect();
    let mut tracked: Vec<Tracked<'_>> = in_range
        .iter()
        .filter(|item| !selected_ids.contains(item.id.as_str()))
        .map(|item| Tracked {
            item,
            new_index: item.index as isize,
            displacement: 0.0,
        })
        .collect();

    let mut removal_order: Vec<&Item> = selected.iter().collect();
    removal_order.sort_by(|a, b| b.index.cmp(&a.index));
    for sel in removal_order {
        let sel_index = sel.index as isize;
        for slot in tracked.iter_mut().filter(|t| t.new_index >= sel_index) {
            slot.new_index -= 1;
            slot.displacement -= sel.size;
        }
    }

    let window_start = first.start;
    let window_end = last.end();
    let mut off_window: Vec<(&str, f64)> = Vec::new();

    for sel in selected {
        let target = sel.index as isize + delta;
        let start = anchor_start(&tracked, target);

        for slot in tracked.iter_mut().filter(|t| t.new_index >= target) {
            slot.new_index += 1;
            slot.displacement += sel.size;
        }

        match start {
            Some(start) => tracked.push(Tracked {
                item: sel,
                new_index: target,
                displacement: start - sel.start,
            }),
            None if delta > 0 => off_window.push((sel.id.as_str(), window_end - sel.start)),
            None => off_window.push((sel.id.as_str(), window_start - sel.start - sel.size)),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        message = "reorder.displacements",
        in_range = in_range.len(),
        selected = selected.len(),
        delta,
        off_window = off_window.len(),
    );

    let mut out = Displacements::default();
    for item in in_range {
        out.displacements.insert(item.id.clone(), 0.0);
    }
    for slot in &tracked {
        out.displacements
            .insert(slot.item.id.clone(), slot.displacement);
        out.new_indices.insert(slot.item.id.clone(), slot.new_index);
    }
    for (id, displacement) in off_window {
        out.displacements.insert(id.to_owned(), displacement);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::contiguous_items;

    fn abc() -> Vec<Item> {
        vec![
            Item::new("a", 0, 0.0, 10.0),
            Item::new("b", 1, 10.0, 10.0),
            Item::new("c", 2, 20.0, 10.0),
        ]
    }

    fn pick(items: &[Item], ids: &[&str]) -> Vec<Item> {
        ids.iter()
            .map(|id| {
                items
                    .iter()
                    .find(|item| item.id == *id)
                    .cloned()
                    .expect("fixture id")
            })
            .collect()
    }

    #[test]
    fn move_first_item_down_one() {
        let items = abc();
        let out = calculate_displacements(&items, &pick(&items, &["a"]), 1).unwrap();
        assert_eq!(out.new_index("a"), Some(1));
        assert_eq!(out.new_index("b"), Some(0));
        assert_eq!(out.new_index("c"), Some(2));
        assert_eq!(out.displacement("a"), 10.0);
        assert_eq!(out.displacement("b"), -10.0);
        assert_eq!(out.displacement("c"), 0.0);
    }

    #[test]
    fn move_last_item_to_top() {
        let items = abc();
        let out = calculate_displacements(&items, &pick(&items, &["c"]), -2).unwrap();
        assert_eq!(out.new_index("c"), Some(0));
        assert_eq!(out.new_index("a"), Some(1));
        assert_eq!(out.new_index("b"), Some(2));
        assert_eq!(out.displacement("c"), -20.0);
        assert_eq!(out.displacement("a"), 10.0);
        assert_eq!(out.displacement("b"), 10.0);
    }

    #[test]
    fn zero_delta_is_identity() {
        let items = abc();
        let out = calculate_displacements(&items, &pick(&items, &["b"]), 0).unwrap();
        assert!(out.is_identity());
        assert_eq!(out.new_index("b"), Some(1));
    }

    #[test]
    fn empty_window_is_rejected() {
        let sel = vec![Item::new("a", 0, 0.0, 10.0)];
        assert_eq!(
            calculate_displacements(&[], &sel, 1),
            Err(ReorderError::EmptyWindow)
        );
    }

    #[test]
    fn two_selected_items_interleave() {
        // a b c d e f g, move c and e down by two: a b d f c g e
        let mut items = contiguous_items(0, &[10.0; 7]);
        for (item, id) in items.iter_mut().zip(["a", "b", "c", "d", "e", "f", "g"]) {
            item.id = id.to_owned();
        }
        let out = calculate_displacements(&items, &pick(&items, &["c", "e"]), 2).unwrap();

        let mut order: Vec<(&str, isize)> = out
            .new_indices
            .iter()
            .map(|(id, &ix)| (id.as_str(), ix))
            .collect();
        order.sort_by_key(|&(_, ix)| ix);
        let ids: Vec<&str> = order.iter().map(|&(id, _)| id).collect();
        assert_eq!(ids, ["a", "b", "d", "f", "c", "g", "e"]);

        assert_eq!(out.displacement("d"), -10.0);
        assert_eq!(out.displacement("f"), -20.0);
        assert_eq!(out.displacement("g"), -10.0);
        assert_eq!(out.displacement("c"), 20.0);
        assert_eq!(out.displacement("e"), 20.0);
    }

    #[test]
    fn same_target_resolves_in_selection_order() {
        let items = contiguous_items(0, &[10.0; 4]);
        // Items 0 and 1 both shifted to the end: 2 3 0 1.
        let sel = pick(&items, &["0", "1"]);
        let out = calculate_displacements(&items, &sel, 2).unwrap();
        assert_eq!(out.new_index("2"), Some(0));
        assert_eq!(out.new_index("3"), Some(1));
        assert_eq!(out.new_index("0"), Some(2));
        assert_eq!(out.new_index("1"), Some(3));
    }

    #[test]
    fn variable_sizes_displace_by_crossed_extent() {
        let items = contiguous_items(0, &[10.0, 30.0, 5.0, 20.0]);
        let out = calculate_displacements(&items, &pick(&items, &["0"]), 2).unwrap();
        assert_eq!(out.displacement("0"), 35.0);
        assert_eq!(out.displacement("1"), -10.0);
        assert_eq!(out.displacement("2"), -10.0);
        assert_eq!(out.displacement("3"), 0.0);
    }

    #[test]
    fn forward_past_window_exits_at_window_end() {
        let items = abc();
        let out = calculate_displacements(&items, &pick(&items, &["a"]), 5).unwrap();
        assert_eq!(out.displacement("a"), 30.0);
        assert_eq!(out.new_index("a"), None);
        assert_eq!(out.new_index("b"), Some(0));
        assert_eq!(out.displacement("c"), -10.0);
    }

    #[test]
    fn backward_past_window_exits_before_window_start() {
        let items = abc();
        let out = calculate_displacements(&items, &pick(&items, &["c"]), -5).unwrap();
        assert_eq!(out.displacement("c"), -30.0);
        assert_eq!(out.new_index("c"), None);
        assert_eq!(out.new_index("a"), Some(1));
        assert_eq!(out.displacement("b"), 10.0);
    }

    #[test]
    fn selection_outside_window_enters_it() {
        // Window shows indices 10..13, the dragged item sits at index 8.
        let window = contiguous_items(10, &[10.0; 3]);
        let sel = vec![Item::new("8", 8, -20.0, 10.0)];
        let out = calculate_displacements(&window, &sel, 3).unwrap();
        // Target 11: the removal shifted 10..12 to 9..11, so it lands on "12".
        assert_eq!(out.new_index("8"), Some(11));
        assert_eq!(out.displacement("8"), 30.0);
        assert_eq!(out.new_index("10"), Some(9));
        assert_eq!(out.new_index("11"), Some(10));
        assert_eq!(out.new_index("12"), Some(12));
        assert_eq!(out.displacement("12"), 0.0);
    }

    #[test]
    fn every_in_range_item_has_a_displacement() {
        let items = contiguous_items(0, &[10.0; 6]);
        let out = calculate_displacements(&items, &pick(&items, &["1", "4"]), -1).unwrap();
        for item in &items {
            assert!(out.displacements.contains_key(&item.id), "{}", item.id);
        }
    }
}
