#![forbid(unsafe_code)]

//! Drag-and-drop reordering for virtualized tables.
//!
//! - [`calculate_displacements`] turns a selection and an index delta into
//!   per-item pixel offsets for drag feedback.
//! - [`find_delta_at_position`] picks the delta that best matches the pointer.
//! - [`array_move`] and [`grouped_array_move`] apply the final delta to the
//!   backing column order and the hierarchical row data.
//!
//! Everything here is pure and synchronous; the only inputs are the visible
//! window and the row structure computed by the table's own models.

pub mod array_move;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod grouped;
pub mod resolver;

pub use array_move::array_move;
pub use displacement::{Displacements, calculate_displacements};
pub use error::{ReorderError, Result};
pub use geometry::{Item, contiguous_items};
pub use grouped::{RowModel, grouped_array_move};
pub use resolver::{
    DEFAULT_SEARCH_RADIUS, PositionResolver, estimate_delta, find_delta_at_position,
};
