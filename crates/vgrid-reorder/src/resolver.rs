//! Pointer position to index delta.
//!
//! The caller supplies a coarse estimate (pointer travel divided by the
//! average item size, see [`estimate_delta`]). The resolver scores that
//! estimate and its neighbours by running the displacement calculation and
//! measuring how far the dragged item's center would land from the pointer.
//!
//! # Search window
//!
//! Only `[estimate - radius, estimate + radius)` is searched, plus the
//! estimate itself. The default radius of [`DEFAULT_SEARCH_RADIUS`] absorbs
//! the rounding error of the estimate for lists of similar item sizes. When
//! item sizes vary widely the true nearest delta can lie outside the window;
//! the result is then the best candidate inside it, not a global optimum.

use crate::displacement::calculate_displacements;
use crate::error::{ReorderError, Result};
use crate::geometry::Item;

/// Default half-width of the candidate window around the estimated delta.
pub const DEFAULT_SEARCH_RADIUS: usize = 5;

/// Candidate search around an estimated delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionResolver {
    search_radius: usize,
}

impl Default for PositionResolver {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }
}

impl PositionResolver {
    /// Create a resolver with the default search radius.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the half-width of the candidate window.
    #[must_use]
    pub fn search_radius(mut self, radius: usize) -> Self {
        self.search_radius = radius;
        self
    }

    /// Current half-width of the candidate window.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.search_radius
    }

    /// Find the delta that puts the center of `dragged_id` closest to
    /// `position`.
    ///
    /// Ties keep the earliest evaluated candidate, so the estimate wins ties.
    ///
    /// # Errors
    ///
    /// [`ReorderError::EmptyWindow`] for an empty window and
    /// [`ReorderError::UnknownItem`] when `dragged_id` is neither selected
    /// nor in range.
    pub fn resolve(
        &self,
        dragged_id: &str,
        in_range: &[Item],
        selected: &[Item],
        position: f64,
        estimated_delta: isize,
    ) -> Result<isize> {
        if in_range.is_empty() {
            return Err(ReorderError::EmptyWindow);
        }
        let dragged = selected
            .iter()
            .chain(in_range)
            .find(|item| item.id == dragged_id)
            .ok_or_else(|| ReorderError::unknown(dragged_id))?;

        let radius = self.search_radius as isize;
        let candidates = std::iter::once(estimated_delta)
            .chain(estimated_delta - radius..estimated_delta + radius);

        let mut best_delta = estimated_delta;
        let mut best_distance = f64::INFINITY;
        for delta in candidates {
            let moved = calculate_displacements(in_range, selected, delta)?;
            let center = dragged.center() + moved.displacement(dragged_id);
            let distance = (position - center).abs();
            if distance < best_distance {
                best_distance = distance;
                best_delta = delta;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "reorder.resolve",
            dragged_id,
            position,
            estimated_delta,
            best_delta,
            best_distance,
        );

        Ok(best_delta)
    }
}

/// Resolve the delta for a pointer position with the default search radius.
///
/// # Errors
///
/// See [`PositionResolver::resolve`].
pub fn find_delta_at_position(
    dragged_id: &str,
    in_range: &[Item],
    selected: &[Item],
    position: f64,
    estimated_delta: isize,
) -> Result<isize> {
    PositionResolver::default().resolve(dragged_id, in_range, selected, position, estimated_delta)
}

/// Coarse delta guess: pointer travel over the average in-range item size.
///
/// # Errors
///
/// Returns [`ReorderError::EmptyWindow`] when `in_range` is empty.
pub fn estimate_delta(in_range: &[Item], pointer_travel: f64) -> Result<isize> {
    if in_range.is_empty() {
        return Err(ReorderError::EmptyWindow);
    }
    let total: f64 = in_range.iter().map(|item| item.size).sum();
    let average = total / in_range.len() as f64;
    Ok((pointer_travel / average).round() as isize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::contiguous_items;

    fn selected(items: &[Item], id: &str) -> Vec<Item> {
        items.iter().filter(|item| item.id == id).cloned().collect()
    }

    #[test]
    fn finds_delta_under_pointer() {
        let items = contiguous_items(0, &[10.0; 10]);
        let sel = selected(&items, "2");
        // Center of slot 5 is 55.
        assert_eq!(find_delta_at_position("2", &items, &sel, 55.0, 0), Ok(3));
        assert_eq!(find_delta_at_position("2", &items, &sel, 5.0, 0), Ok(-2));
    }

    #[test]
    fn estimate_wins_ties() {
        let items = contiguous_items(0, &[10.0; 3]);
        let sel = selected(&items, "0");
        // Pointer at 10 is equidistant from the centers for delta 0 and 1.
        assert_eq!(find_delta_at_position("0", &items, &sel, 10.0, 1), Ok(1));
        assert_eq!(find_delta_at_position("0", &items, &sel, 10.0, 0), Ok(0));
    }

    #[test]
    fn radius_bounds_the_search() {
        let items = contiguous_items(0, &[10.0; 20]);
        let sel = selected(&items, "0");
        // Center of slot 8 is 85, but a radius of 5 only reaches delta 4.
        assert_eq!(find_delta_at_position("0", &items, &sel, 85.0, 0), Ok(4));
        let wide = PositionResolver::new().search_radius(10);
        assert_eq!(wide.resolve("0", &items, &sel, 85.0, 0), Ok(8));
    }

    #[test]
    fn unknown_dragged_id_is_rejected() {
        let items = contiguous_items(0, &[10.0; 3]);
        let sel = selected(&items, "0");
        assert_eq!(
            find_delta_at_position("missing", &items, &sel, 0.0, 0),
            Err(ReorderError::unknown("missing"))
        );
    }

    #[test]
    fn empty_window_is_rejected() {
        let sel = vec![Item::new("a", 0, 0.0, 10.0)];
        assert_eq!(
            find_delta_at_position("a", &[], &sel, 0.0, 0),
            Err(ReorderError::EmptyWindow)
        );
        assert_eq!(estimate_delta(&[], 30.0), Err(ReorderError::EmptyWindow));
    }

    #[test]
    fn estimate_rounds_travel_over_average_size() {
        let items = contiguous_items(0, &[10.0, 30.0]);
        assert_eq!(estimate_delta(&items, 41.0), Ok(2));
        assert_eq!(estimate_delta(&items, -29.0), Ok(-1));
        assert_eq!(estimate_delta(&items, 4.0), Ok(0));
    }

    #[test]
    fn default_radius() {
        assert_eq!(PositionResolver::new().radius(), DEFAULT_SEARCH_RADIUS);
    }
}
