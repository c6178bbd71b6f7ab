//! Magic/tragic number derivation
//!
//! 순위별 매직넘버(확보까지 필요한 승수) / 트래직넘버(탈락까지 허용 패수)
//!
//! For rank k the team must finish strictly above (or, tie-tolerant,
//! at) the k-th best competitor benchmark. With `w = W + 0.5T`,
//! `D = W + L + T + R`:
//!
//!   magic:  x such that (w + x) / D > Kk_max        (strict)
//!   tragic: y such that (w + R - y) / D < Kk_min    (strict)
//!
//! giving `x_strict = floor(Kk_max*D - w) + 1` and
//! `y_strict = ceil(w + R - Kk_min*D)`, each floored at 0 and clamped
//! to the remaining games. The unclamped raw values survive so the
//! caller can detect "needs more wins than games remain" (self-limited).

use crate::matrix::benchmark::precompute_benchmarks;
use crate::models::{standings::round3, StandingsSnapshot, TeamStanding};
use serde::{Deserialize, Serialize};

/// Ranks 1..=9 are tracked; rank 10 (last place) is implied by
/// elimination from rank 9.
pub const TRACKED_RANKS: usize = 9;

/// KBO postseason cutoff: rank 5 is the last playoff berth.
pub const PLAYOFF_CUTOFF: u8 = 5;

/// The derived numbers for one (team, rank) pair.
///
/// `x_*` are magic numbers (additional wins), `y_*` tragic numbers
/// (additional losses); `_raw` variants are before clamping to the
/// team's remaining games.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RankNumbers {
    /// k-th best competitor final win pct, rounded to 3 decimals.
    pub k_max: f64,
    /// k-th worst competitor final win pct, rounded to 3 decimals.
    pub k_min: f64,
    pub x_strict: u32,
    pub x_tie_ok: u32,
    pub y_strict: u32,
    pub y_tie_ok: u32,
    pub x_strict_raw: u32,
    pub x_tie_ok_raw: u32,
    pub y_strict_raw: u32,
    pub y_tie_ok_raw: u32,
}

/// One team's full matrix row: identity fields plus the nine
/// per-rank number sets, indexed by rank (no stringly-typed access).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRow {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub remaining: u32,
    /// Current win pct (W / (W+L)), rounded to 3 decimals.
    pub win_pct: f64,
    /// ranks[k-1] holds the numbers for final rank k.
    pub ranks: [RankNumbers; TRACKED_RANKS],
}

impl MatrixRow {
    /// Numbers for rank `k` (1..=9). Out-of-range ranks return the
    /// rank-9 entry rather than panicking.
    pub fn rank(&self, k: u8) -> &RankNumbers {
        let idx = (k.clamp(1, TRACKED_RANKS as u8) - 1) as usize;
        &self.ranks[idx]
    }
}

/// Derive the magic/tragic numbers for one team at one rank, given
/// the k-th competitor benchmarks.
pub fn magic_tragic_for_rank(
    standing: &TeamStanding,
    remaining: u32,
    k_max: f64,
    k_min: f64,
) -> RankNumbers {
    let d = (standing.played() + remaining) as f64;
    let w = standing.half_wins();
    let r = remaining;

    // Magic: wins needed to pass (strict) or reach (tie ok) the
    // k-th best competitor.
    let rhs_magic = k_max * d - w;
    let x_strict_raw = non_negative(rhs_magic.floor() + 1.0);
    let x_tie_ok_raw = non_negative(rhs_magic.ceil());

    // Tragic: losses that drop the best reachable pct below (strict)
    // or to (tie ok) the k-th worst competitor.
    let rhs_tragic = w + r as f64 - k_min * d;
    let y_strict_raw = non_negative(rhs_tragic.ceil());
    let y_tie_ok_raw = non_negative(rhs_tragic.floor() + 1.0);

    RankNumbers {
        k_max: round3(k_max),
        k_min: round3(k_min),
        x_strict: x_strict_raw.min(r),
        x_tie_ok: x_tie_ok_raw.min(r),
        y_strict: y_strict_raw.min(r),
        y_tie_ok: y_tie_ok_raw.min(r),
        x_strict_raw,
        x_tie_ok_raw,
        y_strict_raw,
        y_tie_ok_raw,
    }
}

fn non_negative(value: f64) -> u32 {
    if value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// Compute the full matrix: one row per team, nine rank entries per
/// row. Pure function of the snapshot; the O(N²) benchmark pass runs
/// exactly once and is shared across all rank derivations.
pub fn compute_matrix(snapshot: &StandingsSnapshot) -> Vec<MatrixRow> {
    let benchmarks = precompute_benchmarks(snapshot);

    snapshot
        .teams
        .iter()
        .map(|standing| {
            let remaining = snapshot.remaining_for(standing);
            let set = benchmarks.get(&standing.team);

            let mut ranks = [RankNumbers::default(); TRACKED_RANKS];
            for k in 1..=TRACKED_RANKS {
                let (k_max, k_min) = match set {
                    Some(set) => set.kth(k),
                    None => (0.0, 0.0),
                };
                ranks[k - 1] = magic_tragic_for_rank(standing, remaining, k_max, k_min);
            }

            MatrixRow {
                team: standing.team.clone(),
                wins: standing.wins,
                losses: standing.losses,
                draws: standing.draws,
                remaining,
                win_pct: round3(standing.win_pct()),
                ranks,
            }
        })
        .collect()
}
