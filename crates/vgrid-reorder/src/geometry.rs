//! Positional vocabulary shared by the displacement calculator and resolver.

/// A materialized row or column: its logical index and pixel extent along
/// the drag axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Logical position in the full (unwindowed) collection.
    pub index: usize,
    /// Identity, unique among the items of one computation.
    pub id: String,
    /// Pixel offset of the leading edge.
    pub start: f64,
    /// Pixel length along the drag axis. Always positive.
    pub size: f64,
}

impl Item {
    /// Create an item.
    #[must_use]
    pub fn new(id: impl Into<String>, index: usize, start: f64, size: f64) -> Self {
        debug_assert!(size > 0.0, "item size must be positive");
        Self {
            index,
            id: id.into(),
            start,
            size,
        }
    }

    /// Pixel offset of the trailing edge.
    #[inline]
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.size
    }

    /// Pixel offset of the midpoint.
    #[inline]
    #[must_use]
    pub fn center(&self) -> f64 {
        self.start + self.size / 2.0
    }
}

/// Lay out `sizes` back to back, starting at `first_index` and pixel 0.
///
/// Each item's id is its decimal index. Useful when a collection has no
/// natural ids, or to build a window whose ids are rewritten afterwards.
///
/// ```
/// use vgrid_reorder::contiguous_items;
///
/// let window = contiguous_items(10, &[24.0, 32.0]);
/// assert_eq!(window[1].id, "11");
/// assert_eq!(window[1].start, 24.0);
/// ```
#[must_use]
pub fn contiguous_items(first_index: usize, sizes: &[f64]) -> Vec<Item> {
    let mut start = 0.0;
    sizes
        .iter()
        .enumerate()
        .map(|(offset, &size)| {
            let index = first_index + offset;
            let item = Item::new(index.to_string(), index, start, size);
            start += size;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_and_center() {
        let item = Item::new("a", 3, 40.0, 20.0);
        assert_eq!(item.end(), 60.0);
        assert_eq!(item.center(), 50.0);
    }

    #[test]
    fn contiguous_items_are_back_to_back() {
        let items = contiguous_items(5, &[10.0, 25.0, 5.0]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "5");
        assert_eq!(items[1].start, 10.0);
        assert_eq!(items[2].start, 35.0);
        assert_eq!(items[2].index, 7);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn item_serde_shape() {
        let item = Item::new("a", 0, 0.0, 10.0);
        let json = serde_json::to_value(&item).expect("serialize item");
        assert_eq!(json["id"], "a");
        assert_eq!(json["size"], 10.0);
        let back: Item = serde_json::from_value(json).expect("deserialize item");
        assert_eq!(back, item);
    }
}
