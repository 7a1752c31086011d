#![forbid(unsafe_code)]

//! vgrid public facade crate.
//!
//! Re-exports the reorder engine and the header view cache, and offers a
//! prelude for day-to-day usage.

// --- Reorder re-exports ----------------------------------------------------

pub use vgrid_reorder::{
    DEFAULT_SEARCH_RADIUS, Displacements, Item, PositionResolver, ReorderError, Result, RowModel,
    array_move, calculate_displacements, contiguous_items, estimate_delta, find_delta_at_position,
    grouped_array_move,
};

// --- Header re-exports -----------------------------------------------------

pub use vgrid_headers::{
    DndStyle, HeaderGroupUpdate, PinSide, VirtualHeader, VirtualHeaderGroup,
    VirtualHeaderGroupCache,
};

// --- Module aliases --------------------------------------------------------

pub use vgrid_headers as headers;
pub use vgrid_reorder as reorder;

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Displacements, Item, PositionResolver, ReorderError, RowModel, VirtualHeader,
        VirtualHeaderGroup, VirtualHeaderGroupCache,
    };

    pub use crate::{
        array_move, calculate_displacements, estimate_delta, find_delta_at_position,
        grouped_array_move,
    };

    pub use crate::{headers, reorder};
}
