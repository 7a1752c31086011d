#![forbid(unsafe_code)]

//! Header view objects for virtualized columns and the cache that keeps
//! them reference-stable between renders.

pub mod cache;
pub mod header;

pub use cache::{HeaderGroupUpdate, VirtualHeaderGroupCache};
pub use header::{DndStyle, PinSide, VirtualHeader, VirtualHeaderGroup};
