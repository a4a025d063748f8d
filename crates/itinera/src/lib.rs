//! Route ordering for named geographic points.
//!
//! Distances are great-circle (haversine) kilometers and the visiting order is
//! built with a greedy nearest-neighbor heuristic anchored at the first point.

pub mod description;
pub mod distance;
pub mod error;
pub mod point;
pub mod tour;

pub use description::{RouteDescription, describe_route};
pub use distance::{DistanceMetric, Haversine, Kilometers, haversine_distance};
pub use error::ValidationError;
pub use point::Point;
pub use tour::{NearestNeighborTourBuilder, Tour, build_tour, round_trip_length, tour_length};
