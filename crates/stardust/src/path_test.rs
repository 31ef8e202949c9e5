use nalgebra::Point2;

use crate::path::BodyPath;

#[test]
fn test_record_keeps_order() {
    let mut path = BodyPath::with_capacity(4);
    path.record(Point2::new(1.0, 0.0));
    path.record(Point2::new(2.0, 0.0));

    let xs: Vec<f64> = path.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![1.0, 2.0]);
}

#[test]
fn test_oldest_point_is_dropped_at_capacity() {
    let mut path = BodyPath::with_capacity(3);
    for i in 0..5 {
        path.record(Point2::new(i as f64, 0.0));
    }

    assert_eq!(path.len(), 3);
    let xs: Vec<f64> = path.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_zero_capacity_records_nothing() {
    let mut path = BodyPath::with_capacity(0);
    path.record(Point2::origin());

    assert!(path.is_empty());
}

#[test]
fn test_reset() {
    let mut path = BodyPath::with_capacity(3);
    path.record(Point2::origin());
    path.reset();

    assert!(path.is_empty());
    assert_eq!(path.capacity(), 3);
}
