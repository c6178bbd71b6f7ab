//! Outcome classification
//!
//! 순위 셀의 의미 분류: 불가 / 잔여경기 한계 / 확보 / 매직넘버
//!
//! The classification is locale-agnostic; label text is looked up
//! separately (localization module) so the numeric core stays
//! testable without display strings.

use crate::matrix::derivation::{RankNumbers, PLAYOFF_CUTOFF};
use serde::{Deserialize, Serialize};

/// Closed set of per-cell outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellTag {
    /// The rank is mathematically unreachable (tragic number 0).
    Impossible,
    /// Reachable in principle, but not through the team's own
    /// remaining games alone (raw magic exceeds remaining).
    SelfLimited,
    /// The rank (or better) is already clinched (magic number 0).
    Confirmed,
    /// Ordinary countdown: display the magic number.
    Safe,
}

/// Tragic-side comparison mode for a given rank column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieMode {
    Strict,
    TieOk,
}

impl TieMode {
    /// Rank 1 and the playoff cutoff (rank 5) tolerate ties, because
    /// a season-ending tie there is settled by a tiebreaker game, not
    /// by strict percentage inequality. Every other rank is strict.
    pub fn for_rank(rank: u8) -> Self {
        if rank == 1 || rank == PLAYOFF_CUTOFF {
            TieMode::TieOk
        } else {
            TieMode::Strict
        }
    }
}

/// A classified cell: the tag plus the number shown for the numeric
/// tags (`Safe` → magic number, `SelfLimited` → remaining games).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOutcome {
    pub tag: CellTag,
    pub value: u32,
}

/// Classify one rank cell from its derived numbers.
///
/// The tragic side uses the rank's tie mode on the raw value; the
/// magic side uses the clamped strict number, with the raw strict
/// value deciding self-limitation at the team's own current rank.
pub fn classify_cell(
    rank: u8,
    current_rank: u32,
    numbers: &RankNumbers,
    remaining: u32,
) -> CellOutcome {
    let tragic = match TieMode::for_rank(rank) {
        TieMode::TieOk => numbers.y_tie_ok_raw,
        TieMode::Strict => numbers.y_strict_raw,
    };

    if tragic == 0 {
        return CellOutcome {
            tag: CellTag::Impossible,
            value: 0,
        };
    }

    if rank as u32 == current_rank && numbers.x_strict_raw > remaining {
        return CellOutcome {
            tag: CellTag::SelfLimited,
            value: remaining,
        };
    }

    if numbers.x_strict == 0 {
        return CellOutcome {
            tag: CellTag::Confirmed,
            value: 0,
        };
    }

    CellOutcome {
        tag: CellTag::Safe,
        value: numbers.x_strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> RankNumbers {
        RankNumbers {
            x_strict: 3,
            x_tie_ok: 2,
            y_strict: 5,
            y_tie_ok: 6,
            x_strict_raw: 3,
            x_tie_ok_raw: 2,
            y_strict_raw: 5,
            y_tie_ok_raw: 6,
            ..Default::default()
        }
    }

    #[test]
    fn test_tie_mode_boundaries() {
        assert_eq!(TieMode::for_rank(1), TieMode::TieOk);
        assert_eq!(TieMode::for_rank(5), TieMode::TieOk);
        for rank in [2, 3, 4, 6, 7, 8, 9] {
            assert_eq!(TieMode::for_rank(rank), TieMode::Strict);
        }
    }

    #[test]
    fn test_impossible_takes_priority() {
        let mut n = numbers();
        n.y_strict_raw = 0;
        n.x_strict = 0; // even a clinched magic side cannot override
        let outcome = classify_cell(3, 1, &n, 10);
        assert_eq!(outcome.tag, CellTag::Impossible);
    }

    #[test]
    fn test_impossible_uses_tie_ok_on_cutoff_rank() {
        let mut n = numbers();
        n.y_strict_raw = 0; // strict says gone...
        n.y_tie_ok_raw = 1; // ...but a tiebreaker is still alive
        let outcome = classify_cell(5, 8, &n, 10);
        assert_ne!(outcome.tag, CellTag::Impossible);

        // Same numbers on a strict rank column: impossible.
        let outcome = classify_cell(6, 8, &n, 10);
        assert_eq!(outcome.tag, CellTag::Impossible);
    }

    #[test]
    fn test_self_limited_only_at_current_rank() {
        let mut n = numbers();
        n.x_strict_raw = 15;
        n.x_strict = 10;
        let at_current = classify_cell(4, 4, &n, 10);
        assert_eq!(at_current.tag, CellTag::SelfLimited);
        assert_eq!(at_current.value, 10);

        let elsewhere = classify_cell(4, 2, &n, 10);
        assert_eq!(elsewhere.tag, CellTag::Safe);
    }

    #[test]
    fn test_confirmed_and_safe() {
        let mut n = numbers();
        n.x_strict = 0;
        n.x_strict_raw = 0;
        assert_eq!(classify_cell(2, 1, &n, 10).tag, CellTag::Confirmed);

        let n = numbers();
        let outcome = classify_cell(2, 1, &n, 10);
        assert_eq!(outcome.tag, CellTag::Safe);
        assert_eq!(outcome.value, 3);
    }
}
