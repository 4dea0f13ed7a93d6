//! Scenario tests for the sensitivity engine
//!
//! Tests are organized by topic:
//! - `worked_example` - The three-dimension Love/Trust/Fun table end to end
//! - `weight_invariants` - Weight vectors behind every record sum to 1
//! - `grid` - 3D grid exclusion, ordering and baseline agreement

mod grid;
mod weight_invariants;
