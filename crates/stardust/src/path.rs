//! Bounded history of sampled body positions

use std::collections::VecDeque;

use nalgebra::Point2;

/// Recent positions of a body, oldest first
///
/// When full, recording a new point drops the oldest one.
///
/// # Examples
///
/// ```
/// use stardust::path::BodyPath;
/// use nalgebra::Point2;
///
/// let mut path = BodyPath::with_capacity(2);
/// path.record(Point2::new(0.0, 0.0));
/// path.record(Point2::new(1.0, 0.0));
/// path.record(Point2::new(2.0, 0.0));
///
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.points().next(), Some(&Point2::new(1.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPath {
    points: VecDeque<Point2<f64>>,
    capacity: usize,
}

impl BodyPath {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, point: Point2<f64>) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn points(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }
}
