// Resume layout: fixed-width hard-wrap, cursor-driven pagination.
// Produces positioned lines per page; serialization lives in `render`.

pub mod engine;
pub mod geometry;
pub mod wrap;

pub use geometry::{default_page_geometry, PageGeometry};
