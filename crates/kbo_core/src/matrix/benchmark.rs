//! Competitor benchmark precomputation
//!
//! 팀별 경쟁팀 최대/최소 최종 승률 벤치마크 (정렬 리스트)
//!
//! For team i, collect every other team's best-possible and
//! worst-possible final win percentage and keep both lists sorted
//! descending, so the k-th largest is a direct index. This is the
//! O(N²) step; it runs once per snapshot and is shared by all N×9
//! derivation calls (recomputing it per rank would be O(N³)).

use crate::models::StandingsSnapshot;
use std::collections::HashMap;

/// Sorted competitor benchmarks for one team.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSet {
    /// Every other team's best-case final win pct, descending.
    pub max_sorted: Vec<f64>,
    /// Every other team's worst-case final win pct, descending.
    pub min_sorted: Vec<f64>,
}

impl BenchmarkSet {
    /// k-th largest (1-based) best-case and worst-case benchmarks.
    /// Out-of-range k yields (0.0, 0.0).
    pub fn kth(&self, k: usize) -> (f64, f64) {
        if k == 0 {
            return (0.0, 0.0);
        }
        let k_max = self.max_sorted.get(k - 1).copied().unwrap_or(0.0);
        let k_min = self.min_sorted.get(k - 1).copied().unwrap_or(0.0);
        (k_max, k_min)
    }
}

/// Precompute the benchmark sets for every team in the snapshot.
pub fn precompute_benchmarks(snapshot: &StandingsSnapshot) -> HashMap<String, BenchmarkSet> {
    let mut map = HashMap::with_capacity(snapshot.teams.len());
    for me in &snapshot.teams {
        let mut max_list = Vec::with_capacity(snapshot.teams.len().saturating_sub(1));
        let mut min_list = Vec::with_capacity(snapshot.teams.len().saturating_sub(1));
        for other in &snapshot.teams {
            if other.team == me.team {
                continue;
            }
            let remaining = snapshot.remaining_for(other);
            max_list.push(other.p_max(remaining));
            min_list.push(other.p_min(remaining));
        }
        sort_descending(&mut max_list);
        sort_descending(&mut min_list);
        map.insert(
            me.team.clone(),
            BenchmarkSet {
                max_sorted: max_list,
                min_sorted: min_list,
            },
        );
    }
    map
}

fn sort_descending(values: &mut [f64]) {
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
}
