pub mod assemble;
pub mod classify;
pub mod cut;
pub mod merge;

pub use assemble::{assemble_polygons, assemble_polygons_bounded};
pub use cut::{cut_boundary, polygon_cut};
