//! 3D grid behavior on a table with room for the others to absorb weight

use crate::config::TableBuilder;
use crate::model::DimensionTable;
use crate::scoring::weighted_total;
use crate::sensitivity::{GRID_EXCLUSION_THRESHOLD, linspace, sweep_3d};

fn five_dims() -> DimensionTable {
    TableBuilder::new()
        .dimension("A", 0.2, 7.0, 5.0)
        .dimension("B", 0.1, 4.0, 8.0)
        .dimension("C", 0.3, 6.0, 6.0)
        .dimension("D", 0.25, 9.0, 3.0)
        .dimension("E", 0.15, 2.0, 7.0)
        .build()
        .unwrap()
}

#[test]
fn test_grid_count_matches_exclusion_rule() {
    let (low, high, steps) = (0.05, 0.40, 16);
    let grid = sweep_3d(&five_dims(), ["A", "B", "C"], low, high, steps).unwrap();

    let samples = linspace(low, high, steps);
    let mut expected = 0;
    for &w0 in &samples {
        for &w1 in &samples {
            for &w2 in &samples {
                if w0 + w1 + w2 < GRID_EXCLUSION_THRESHOLD {
                    expected += 1;
                }
            }
        }
    }

    assert_eq!(grid.len(), expected);
    assert!(grid.len() < steps.pow(3));
    assert!(
        grid.records
            .iter()
            .all(|r| r.weights[0] + r.weights[1] + r.weights[2] < GRID_EXCLUSION_THRESHOLD)
    );
}

#[test]
fn test_grid_is_reproducible() {
    let first = sweep_3d(&five_dims(), ["C", "A", "E"], 0.0, 0.3, 7).unwrap();
    let second = sweep_3d(&five_dims(), ["C", "A", "E"], 0.0, 0.3, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_grid_point_at_base_weights_matches_baseline() {
    let table = five_dims();
    let baseline = weighted_total(&table);

    // 0.0..=0.3 in 4 steps hits 0.1, 0.2 and 0.3
    let grid = sweep_3d(&table, ["A", "B", "C"], 0.0, 0.3, 4).unwrap();
    let at_base = grid
        .records
        .iter()
        .find(|r| {
            (r.weights[0] - 0.2).abs() < 1e-12
                && (r.weights[1] - 0.1).abs() < 1e-12
                && (r.weights[2] - 0.3).abs() < 1e-12
        })
        .unwrap();

    assert!((at_base.ex_total - baseline.ex).abs() < 1e-9);
    assert!((at_base.cur_total - baseline.cur).abs() < 1e-9);
}

#[test]
fn test_grid_dimension_labels_keep_caller_order() {
    let grid = sweep_3d(&five_dims(), ["E", "C", "A"], 0.1, 0.2, 2).unwrap();
    assert_eq!(grid.dimensions, ["E".to_string(), "C".into(), "A".into()]);
    assert_eq!(grid.records[0].weights, [0.1, 0.1, 0.1]);
    assert_eq!(grid.records[1].weights, [0.1, 0.1, 0.2]);
}

#[test]
fn test_grid_drops_points_at_exclusion_threshold() {
    let table = TableBuilder::new()
        .dimension("A", 0.25, 7.0, 5.0)
        .dimension("B", 0.25, 4.0, 8.0)
        .dimension("C", 0.25, 6.0, 6.0)
        .dimension("D", 0.25, 9.0, 3.0)
        .build()
        .unwrap();

    // Samples {0, 0.95}: every point but the origin sums to 0.95 or more
    let grid = sweep_3d(&table, ["A", "B", "C"], 0.0, GRID_EXCLUSION_THRESHOLD, 2).unwrap();

    assert_eq!(grid.len(), 1);
    assert_eq!(grid.records[0].weights, [0.0, 0.0, 0.0]);
}
