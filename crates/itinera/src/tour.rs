use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::{Level, debug, instrument, warn};

use crate::{
    distance::{DistanceMetric, Haversine, Kilometers},
    point::Point,
};

/// Visiting order over a set of points, identified by label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    labels: Vec<String>,
    #[serde(skip)]
    indices: Vec<usize>,
    #[serde(skip)]
    num_points: usize,
}

impl Tour {
    fn from_indices(points: &[Point], indices: Vec<usize>) -> Self {
        Self {
            labels: indices
                .iter()
                .map(|&index| points[index].label().to_owned())
                .collect(),
            indices,
            num_points: points.len(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Positions in the input slice, in visiting order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// False when construction stopped before every point was visited.
    pub fn is_complete(&self) -> bool {
        self.indices.len() == self.num_points
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

/// Greedy tour construction: from the last visited point, always move to the
/// closest point not yet visited. The tour starts at the first input point.
///
/// Runs in O(n²) metric evaluations. Ties go to the candidate that comes first
/// in input order.
pub struct NearestNeighborTourBuilder<M = Haversine> {
    metric: M,
}

impl Default for NearestNeighborTourBuilder<Haversine> {
    fn default() -> Self {
        Self { metric: Haversine }
    }
}

impl<M> NearestNeighborTourBuilder<M>
where
    M: DistanceMetric,
{
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(points = points.len()))]
    pub fn build_tour(&self, points: &[Point]) -> Tour {
        let num_points = points.len();
        let mut order = Vec::with_capacity(num_points);

        if num_points == 0 {
            return Tour::from_indices(points, order);
        }

        let mut visited = FixedBitSet::with_capacity(num_points);
        visited.insert(0);
        order.push(0);

        while order.len() < num_points {
            let current = &points[order[order.len() - 1]];

            let mut nearest: Option<usize> = None;
            let mut min_distance = f64::INFINITY;

            // zeroes() yields unvisited indices in ascending order
            for candidate in visited.zeroes() {
                let distance = self.metric.distance(current, &points[candidate]);
                if distance < min_distance {
                    min_distance = distance;
                    nearest = Some(candidate);
                }
            }

            let Some(next) = nearest else {
                warn!(
                    "No nearest candidate from {}, stopping with {}/{} points",
                    current.label(),
                    order.len(),
                    num_points
                );
                break;
            };

            visited.insert(next);
            order.push(next);
        }

        let tour = Tour::from_indices(points, order);
        debug!(
            "Built tour over {} points, path length = {}",
            tour.len(),
            tour_length(points, &tour, &self.metric)
        );

        tour
    }
}

/// Nearest-neighbor tour over `points` using haversine distance.
pub fn build_tour(points: &[Point]) -> Tour {
    NearestNeighborTourBuilder::<Haversine>::default().build_tour(points)
}

/// Length of the open path through the tour, first stop to last stop.
pub fn tour_length<M: DistanceMetric>(points: &[Point], tour: &Tour, metric: &M) -> Kilometers {
    tour.indices()
        .windows(2)
        .map(|leg| Kilometers::new(metric.distance(&points[leg[0]], &points[leg[1]])))
        .sum()
}

/// Length of the tour including the leg from the last stop back to the first.
pub fn round_trip_length<M: DistanceMetric>(
    points: &[Point],
    tour: &Tour,
    metric: &M,
) -> Kilometers {
    let open = tour_length(points, tour, metric);

    match (tour.indices().first(), tour.indices().last()) {
        (Some(&first), Some(&last)) if first != last => {
            open + Kilometers::new(metric.distance(&points[last], &points[first]))
        }
        _ => open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, lat: f64, lon: f64) -> Point {
        Point::new(label, lat, lon).unwrap()
    }

    fn indian_cities() -> Vec<Point> {
        vec![
            point("Mumbai", 19.076, 72.8777),
            point("Delhi", 28.6139, 77.209),
            point("Bangalore", 12.9716, 77.5946),
            point("Kolkata", 22.5726, 88.3639),
        ]
    }

    #[test]
    fn test_empty_input() {
        let tour = build_tour(&[]);
        assert!(tour.is_empty());
        assert!(tour.is_complete());
        assert_eq!(tour.first(), None);
    }

    #[test]
    fn test_single_point() {
        let tour = build_tour(&[point("Pune", 18.5204, 73.8567)]);
        assert_eq!(tour.labels(), ["Pune"]);
        assert_eq!(tour.first(), tour.last());
    }

    #[test]
    fn test_picks_nearer_point_first() {
        let points = vec![point("A", 0.0, 0.0), point("C", 0.0, 2.0), point("B", 0.0, 1.0)];
        let tour = build_tour(&points);

        assert_eq!(tour.labels(), ["A", "B", "C"]);
        assert_eq!(tour.indices(), [0, 2, 1]);
    }

    #[test]
    fn test_square_visits_adjacent_before_diagonal() {
        let points = vec![
            point("south west", 0.0, 0.0),
            point("north east", 1.0, 1.0),
            point("south east", 0.0, 1.0),
            point("north west", 1.0, 0.0),
        ];
        let tour = build_tour(&points);

        assert_eq!(
            tour.labels(),
            ["south west", "south east", "north east", "north west"]
        );
    }

    #[test]
    fn test_ties_go_to_first_in_input_order() {
        let east_first = vec![
            point("origin", 0.0, 0.0),
            point("east", 0.0, 1.0),
            point("west", 0.0, -1.0),
        ];
        assert_eq!(build_tour(&east_first).labels(), ["origin", "east", "west"]);

        let west_first = vec![
            point("origin", 0.0, 0.0),
            point("west", 0.0, -1.0),
            point("east", 0.0, 1.0),
        ];
        assert_eq!(build_tour(&west_first).labels(), ["origin", "west", "east"]);
    }

    #[test]
    fn test_tour_is_permutation_of_input() {
        let points = indian_cities();
        let tour = build_tour(&points);

        assert_eq!(tour.len(), points.len());
        assert!(tour.is_complete());

        let mut labels = tour.labels().to_vec();
        labels.sort();
        let mut expected: Vec<String> = points.iter().map(|p| p.label().to_owned()).collect();
        expected.sort();
        assert_eq!(labels, expected);

        assert_eq!(tour.labels(), ["Mumbai", "Bangalore", "Kolkata", "Delhi"]);
    }

    fn create_point_grid(count: usize) -> Vec<Point> {
        // spread over the globe, visiting the grid out of row order
        (0..count)
            .map(|i| {
                let j = (i * 7) % count.max(1);
                let latitude = -80.0 + (j % 9) as f64 * 20.0;
                let longitude = -175.0 + (j / 9) as f64 * 35.0 + (i % 3) as f64 * 0.5;
                point(&format!("p{i}"), latitude, longitude)
            })
            .collect()
    }

    #[test]
    fn test_tour_is_permutation_for_many_sizes() {
        for count in 0..60 {
            let points = create_point_grid(count);
            let tour = build_tour(&points);

            assert_eq!(tour.len(), count, "size {count}");
            assert!(tour.is_complete(), "size {count}");
            if count > 0 {
                assert_eq!(tour.indices()[0], 0, "size {count}");
            }

            let mut indices = tour.indices().to_vec();
            indices.sort_unstable();
            assert_eq!(indices, (0..count).collect::<Vec<_>>(), "size {count}");

            let mut labels = tour.labels().to_vec();
            labels.sort();
            let mut expected: Vec<String> = points.iter().map(|p| p.label().to_owned()).collect();
            expected.sort();
            assert_eq!(labels, expected, "size {count}");
        }
    }

    #[test]
    fn test_is_deterministic() {
        let points = indian_cities();
        let first = build_tour(&points);
        for _ in 0..10 {
            assert_eq!(build_tour(&points), first);
        }
    }

    #[test]
    fn test_duplicate_points_are_removed_by_index() {
        let points = vec![
            point("A", 10.0, 10.0),
            point("A", 10.0, 10.0),
            point("B", 11.0, 10.0),
        ];
        let tour = build_tour(&points);

        assert_eq!(tour.indices(), [0, 1, 2]);
        assert_eq!(tour.labels(), ["A", "A", "B"]);
    }

    #[test]
    fn test_nan_metric_returns_partial_tour() {
        let builder = NearestNeighborTourBuilder::new(|_: &Point, _: &Point| f64::NAN);
        let tour = builder.build_tour(&indian_cities());

        assert_eq!(tour.labels(), ["Mumbai"]);
        assert!(!tour.is_complete());
    }

    #[test]
    fn test_unchecked_nan_coordinates_stop_early() {
        let points = vec![
            point("A", 0.0, 0.0),
            Point::new_unchecked("broken", f64::NAN, 0.0),
            point("B", 0.0, 1.0),
        ];
        let tour = build_tour(&points);

        assert_eq!(tour.labels(), ["A", "B"]);
        assert!(!tour.is_complete());
    }

    #[test]
    fn test_tour_lengths() {
        let points = vec![point("A", 0.0, 0.0), point("C", 0.0, 2.0), point("B", 0.0, 1.0)];
        let tour = build_tour(&points);

        let open = tour_length(&points, &tour, &Haversine);
        assert!((open.value() - 2.0 * 111.1949).abs() < 1e-2);

        let round_trip = round_trip_length(&points, &tour, &Haversine);
        assert!((round_trip.value() - 4.0 * 111.1949).abs() < 1e-2);

        let single = build_tour(&points[..1]);
        assert_eq!(round_trip_length(&points, &single, &Haversine), Kilometers::ZERO);
    }

    #[test]
    fn test_serializes_labels() {
        let tour = build_tour(&[point("A", 0.0, 0.0), point("B", 0.0, 1.0)]);
        let json = serde_json::to_string(&tour).unwrap();
        assert_eq!(json, r#"{"labels":["A","B"]}"#);
    }
}
