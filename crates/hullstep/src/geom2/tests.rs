use super::rand::{general_position, PointsCfg};
use super::validate::{is_sample_subset, same_cycle, same_vertex_set};
use super::*;
use crate::error::DegenerateInputError;
use nalgebra::vector;

#[test]
fn normal_is_quarter_turn() {
    let v = vector![3.0, 1.0];
    assert_eq!(normal(v), vector![-1.0, 3.0]);
    assert_eq!(normal(v).dot(&v), 0.0);
}

#[test]
fn determinant_sign_tracks_turn() {
    let x = vector![1.0, 0.0];
    let y = vector![0.0, 1.0];
    assert_eq!(determinant(x, y), 1.0);
    assert_eq!(determinant(y, x), -1.0);
    assert_eq!(determinant(x, x * 2.0), 0.0);
}

#[test]
fn side_of_is_exact_on_line() {
    let a = vector![0.0, 0.0];
    let b = vector![2.0, 2.0];
    assert!(side_of(a, b, vector![0.0, 1.0]) > 0.0);
    assert!(side_of(a, b, vector![1.0, 0.0]) < 0.0);
    assert_eq!(side_of(a, b, vector![1.0, 1.0]), 0.0);
}

#[test]
fn clockwise_on_raw_coordinates() {
    // Left, top, right in y-up terms.
    let cw = [vector![0.0, 0.0], vector![1.0, 2.0], vector![2.0, 0.0]];
    assert!(is_clockwise(&cw));
    let mut ccw = cw.to_vec();
    ccw.reverse();
    assert!(!is_clockwise(&ccw));
    assert!(is_clockwise(&cw[..2]));
}

#[test]
fn intercept_reads_line_at_abscissa() {
    let y = intercept_y(3.5, vector![1.0, 3.0], vector![6.0, 4.0]).unwrap();
    assert!((y - 3.5).abs() < 1e-12);
    let err = intercept_y(0.0, vector![2.0, 0.0], vector![2.0, 5.0]).unwrap_err();
    assert!(matches!(err, DegenerateInputError::VerticalLine { .. }));
}

#[test]
fn cyclic_neighbours_wrap() {
    assert_eq!(next_cw(3, 4), 0);
    assert_eq!(next_ccw(0, 4), 3);
    assert_eq!(next_ccw(next_cw(2, 5), 5), 2);
}

#[test]
fn edge_reversal() {
    let e = Edge::new(vector![0.0, 0.0], vector![1.0, 2.0]);
    assert_eq!(e.reversed().from, e.to);
    assert_eq!(e.reversed().reversed(), e);
}

#[test]
fn cycle_comparison_handles_rotation_and_reflection() {
    let truth = vec![vector![0.0, 0.0], vector![0.0, 1.0], vector![1.0, 1.0], vector![1.0, 0.0]];
    let rotated = vec![truth[2], truth[3], truth[0], truth[1]];
    let reflected = vec![truth[0], truth[3], truth[2], truth[1]];
    assert!(same_cycle(&truth, &rotated, false));
    assert!(!same_cycle(&truth, &reflected, false));
    assert!(same_cycle(&truth, &reflected, true));
    assert!(!same_cycle(&truth, &truth[..3], true));
    assert!(same_vertex_set(&truth, &reflected));
}

#[test]
fn sample_subset_check() {
    let pts = vec![vector![0.0, 0.0], vector![4.0, 1.0], vector![1.0, 4.0], vector![2.0, 2.0]];
    let sample = vec![pts[0], pts[1], pts[2]];
    assert!(is_sample_subset(&pts, &sample, &sample));
    assert!(!is_sample_subset(&pts, &sample, &[pts[3]]));
    assert!(!is_sample_subset(&pts[..2], &sample, &[]));
}

#[test]
fn generated_points_are_in_general_position() {
    let cfg = PointsCfg::with_count(25);
    let pts = general_position(cfg, 7).unwrap();
    assert_eq!(pts.len(), 25);
    let side = cfg.extent_per_point * 25.0;
    for (i, p) in pts.iter().enumerate() {
        assert!(p.x >= 0.0 && p.x < side && p.y >= 0.0 && p.y < side);
        for q in &pts[i + 1..] {
            assert!((p.x - q.x).abs() >= cfg.spacing);
            assert!((p.y - q.y).abs() >= cfg.spacing);
        }
    }
    for (i, j, k) in [(0, 1, 2), (3, 7, 11), (4, 20, 24)] {
        assert!(determinant(pts[j] - pts[i], pts[k] - pts[i]).abs() >= cfg.collinear_threshold);
    }
}

#[test]
fn generation_is_reproducible() {
    let cfg = PointsCfg::with_count(12);
    assert_eq!(general_position(cfg, 42), general_position(cfg, 42));
    assert_ne!(general_position(cfg, 42), general_position(cfg, 43));
}

#[test]
fn impossible_density_gives_up() {
    let cfg = PointsCfg {
        count: 5,
        spacing: 100.0,
        attempts_per_point: 50,
        ..PointsCfg::default()
    };
    assert!(general_position(cfg, 1).is_none());
}
