//! The weight vector behind every emitted record sums to 1
//!
//! Records only carry the driven weights, so these tests rebuild the full
//! vector with `renormalize` and check it.

use crate::config::TableBuilder;
use crate::model::DimensionTable;
use crate::scoring::{weighted_total, weighted_totals_for};
use crate::sensitivity::{renormalize, sweep_1d, sweep_3d};

fn relationship_table() -> DimensionTable {
    TableBuilder::new()
        .dimension("Emotional connection", 0.20, 8.0, 6.5)
        .dimension("Shared values & life goals", 0.18, 6.0, 8.5)
        .dimension("Aesthetics & taste", 0.07, 9.0, 7.0)
        .dimension("Communication", 0.15, 5.5, 8.0)
        .dimension("Trust", 0.15, 6.0, 8.0)
        .dimension("Fun", 0.10, 9.0, 7.5)
        .dimension("Family fit", 0.08, 7.0, 7.0)
        .dimension("Logistics", 0.07, 4.0, 9.0)
        .build()
        .unwrap()
}

#[test]
fn test_sweep_1d_weights_sum_to_one() {
    let table = relationship_table();
    let base = table.weights();
    let index = table.index_of("Trust").unwrap();

    let sweep = sweep_1d(&table, "Trust", 0.0, 0.6, 61).unwrap();
    assert_eq!(sweep.len(), 61);

    for record in &sweep.records {
        let weights = renormalize(&base, &[(index, record.weight)]).unwrap();
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum {sum} at w={}", record.weight);

        // and the record's totals come from exactly that vector
        let totals = weighted_totals_for(&weights, &table.ex_scores(), &table.cur_scores());
        assert!((totals.ex - record.ex_total).abs() < 1e-12);
        assert!((totals.cur - record.cur_total).abs() < 1e-12);
    }
}

#[test]
fn test_sweep_1d_strictly_ascending_with_exact_ends() {
    let sweep = sweep_1d(&relationship_table(), "Fun", 0.05, 0.45, 17).unwrap();
    let weights: Vec<f64> = sweep.weights().collect();

    assert_eq!(weights.first(), Some(&0.05));
    assert_eq!(weights.last(), Some(&0.45));
    assert!(weights.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sweep_3d_weights_sum_to_one() {
    let table = relationship_table();
    let base = table.weights();
    let names = [
        "Emotional connection",
        "Shared values & life goals",
        "Aesthetics & taste",
    ];
    let indices = names.map(|n| table.index_of(n).unwrap());

    let grid = sweep_3d(&table, names, 0.05, 0.40, 8).unwrap();
    assert!(!grid.is_empty());

    for record in &grid.records {
        let driven: Vec<(usize, f64)> = indices
            .iter()
            .copied()
            .zip(record.weights.iter().copied())
            .collect();
        let weights = renormalize(&base, &driven).unwrap();
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(weights.iter().all(|&w| w >= 0.0));
    }
}

#[test]
fn test_sweep_does_not_mutate_table() {
    let table = relationship_table();
    let before = table.clone();

    let _ = sweep_1d(&table, "Logistics", 0.0, 1.0, 21).unwrap();
    let _ = sweep_3d(&table, ["Trust", "Fun", "Logistics"], 0.0, 0.3, 5).unwrap();

    assert_eq!(table, before);
}

#[test]
fn test_sweep_at_base_weight_matches_baseline_near_unit_sum() {
    // Accepted as-is by the tolerance check, sums to 1 + 4e-7
    let table = TableBuilder::new()
        .dimension("Love", 0.5000004, 8.0, 7.0)
        .dimension("Trust", 0.3, 9.0, 6.0)
        .dimension("Fun", 0.2, 6.0, 9.0)
        .build()
        .unwrap();
    let baseline = weighted_total(&table);
    let love = table.get("Love").unwrap().weight;

    let sweep = sweep_1d(&table, "Love", love, love, 1).unwrap();
    let record = sweep.records[0];

    assert!((record.ex_total - baseline.ex).abs() < 1e-9);
    assert!((record.cur_total - baseline.cur).abs() < 1e-9);
}
