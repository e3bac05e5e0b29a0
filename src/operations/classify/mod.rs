pub mod point;
pub mod polygon;
pub mod segment;
pub mod segment_polygon;

pub use point::{classify_local, classify_point, PointPolygonRelation};
pub use polygon::{compare_polygons, PolygonComparison, PolygonIntersection, PolygonPosition};
pub use segment::{compare_segments, SegmentRelation};
pub use segment_polygon::{
    compare_segment_polygon, segment_inside_polygon, segment_outside_polygon,
    SegmentPolygonRelation,
};
