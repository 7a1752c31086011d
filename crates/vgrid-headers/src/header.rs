//! Per-render header view objects.
//!
//! These are produced fresh on every render by the column layout pass.
//! [`crate::VirtualHeaderGroupCache`] folds them into stable [`Arc`]s.

use std::sync::Arc;

/// Side a pinned column sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinSide {
    Left,
    Right,
}

/// Drag-and-drop presentation of a header. Changes every frame of a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DndStyle {
    /// Horizontal offset applied while the column is displaced.
    pub translate: f64,
    /// Whether this header is the one under the pointer.
    pub dragging: bool,
    pub z_index: i32,
    /// Whether the offset should animate.
    pub transition: bool,
}

/// A header cell positioned inside the virtualized column window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualHeader {
    pub header_id: String,
    pub column_id: String,
    /// Pixel offset from the start of the header row.
    pub start: f64,
    pub width: f64,
    pub is_first: bool,
    pub is_last: bool,
    /// Last header of the unpinned center section.
    pub is_last_center: bool,
    pub pinned: Option<PinSide>,
    /// Last header of its pinned section.
    pub is_last_pinned: bool,
    pub dnd_style: DndStyle,
}

impl VirtualHeader {
    /// Header at `start` with `width`, unpinned and not being dragged.
    #[must_use]
    pub fn new(
        header_id: impl Into<String>,
        column_id: impl Into<String>,
        start: f64,
        width: f64,
    ) -> Self {
        Self {
            header_id: header_id.into(),
            column_id: column_id.into(),
            start,
            width,
            is_first: false,
            is_last: false,
            is_last_center: false,
            pinned: None,
            is_last_pinned: false,
            dnd_style: DndStyle::default(),
        }
    }

    /// Set the pinned side.
    #[must_use]
    pub fn pinned(mut self, side: PinSide) -> Self {
        self.pinned = Some(side);
        self
    }

    /// Set the drag style.
    #[must_use]
    pub fn dnd_style(mut self, style: DndStyle) -> Self {
        self.dnd_style = style;
        self
    }

    /// Field-by-field equality of everything except [`Self::dnd_style`].
    #[must_use]
    pub fn same_layout(&self, other: &Self) -> bool {
        let Self {
            header_id,
            column_id,
            start,
            width,
            is_first,
            is_last,
            is_last_center,
            pinned,
            is_last_pinned,
            dnd_style: _,
        } = self;
        *header_id == other.header_id
            && *column_id == other.column_id
            && *start == other.start
            && *width == other.width
            && *is_first == other.is_first
            && *is_last == other.is_last
            && *is_last_center == other.is_last_center
            && *pinned == other.pinned
            && *is_last_pinned == other.is_last_pinned
    }
}

/// One row of the header area, restricted to the visible columns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualHeaderGroup {
    pub id: String,
    /// Width of the virtualized-away columns before the window.
    pub offset_left: f64,
    /// Width of the virtualized-away columns after the window.
    pub offset_right: f64,
    /// Id of the upstream header group this row renders.
    pub header_group: String,
    pub headers: Vec<Arc<VirtualHeader>>,
}

impl VirtualHeaderGroup {
    #[must_use]
    pub fn new(id: impl Into<String>, header_group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            offset_left: 0.0,
            offset_right: 0.0,
            header_group: header_group.into(),
            headers: Vec::new(),
        }
    }

    /// Set the virtualization offsets.
    #[must_use]
    pub fn offsets(mut self, left: f64, right: f64) -> Self {
        self.offset_left = left;
        self.offset_right = right;
        self
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, header: VirtualHeader) -> Self {
        self.headers.push(Arc::new(header));
        self
    }

    /// Whether the scalar fields match, ignoring the header contents.
    #[must_use]
    pub fn same_frame(&self, other: &Self) -> bool {
        self.offset_left == other.offset_left
            && self.offset_right == other.offset_right
            && self.header_group == other.header_group
            && self.headers.len() == other.headers.len()
    }
}
