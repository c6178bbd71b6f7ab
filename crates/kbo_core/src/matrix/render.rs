//! Banner and segment merge
//!
//! 팀별 매트릭스 행의 배너/병합 셀 결정 (9위 → 1위 순서)
//!
//! A team's row renders either as one banner spanning a contiguous
//! run of rank columns from rank 9 (the leftmost, worst column)
//! toward rank 1, plus individual cells for the remainder, or as nine
//! individual cells. Contiguous runs of equal confirmed/impossible
//! cells collapse into a single merged cell.
//!
//! Banners carry explicit start/end ranks from construction; the rank
//! range is never re-derived from label text.

use crate::matrix::classify::{classify_cell, CellOutcome, CellTag};
use crate::matrix::derivation::{MatrixRow, PLAYOFF_CUTOFF, TRACKED_RANKS};
use crate::localization::MatrixLocalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visual tier of a banner row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerKind {
    Top,
    Mid,
    Low,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Top => "banner-top",
            BannerKind::Mid => "banner-mid",
            BannerKind::Low => "banner-low",
        }
    }
}

/// Which postseason tier the banner announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerStage {
    /// Rank 1: straight to the Korean Series.
    KoreanSeries,
    /// Rank 2: direct playoff berth.
    PlayoffDirect,
    /// Rank 3: semi-playoff berth.
    SemiPlayoff,
    /// Ranks 4-5: wildcard decision game.
    Wildcard,
    /// Ranks 6-10: out of the postseason.
    PostseasonFail,
}

/// Sub-line under the stage text: hard confirmation vs. "this rank or
/// better" when the tragic bound above is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BannerSub {
    RankConfirmed(u8),
    RankOrBetterSecured(u8),
}

/// One merged banner covering rank columns `start_rank` (always 9,
/// the leftmost) through `end_rank`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "type")]
    pub kind: BannerKind,
    pub stage: BannerStage,
    pub sub: BannerSub,
    pub start_rank: u8,
    pub end_rank: u8,
    pub colspan: u8,
    pub stage_label: String,
    pub sub_label: String,
}

/// One rendered cell. Merged cells carry the representative rank of
/// their run and a colspan > 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCell {
    pub rank: u8,
    pub tag: CellTag,
    pub label: String,
    pub class_name: String,
    pub colspan: u8,
    pub playoff_divider: bool,
}

/// The final renderable row for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow {
    pub team: String,
    pub current_rank: u32,
    pub remaining_games: u32,
    pub win_pct: f64,
    pub banner: Option<Banner>,
    /// Cells for the rank columns not covered by the banner, ordered
    /// rank 9 down to rank 1.
    pub cells: Vec<RenderedCell>,
}

impl CellTag {
    pub fn css_class(&self) -> &'static str {
        match self {
            CellTag::Impossible => "magic-impossible",
            CellTag::SelfLimited => "magic-selflimit",
            CellTag::Confirmed => "magic-confirmed",
            CellTag::Safe => "magic-safe",
        }
    }
}

/// Banner decision without display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BannerSpec {
    kind: BannerKind,
    stage: BannerStage,
    sub: BannerSub,
    end_rank: u8,
}

/// Priority-ordered banner walk. First match wins.
fn analyze_banner(row: &MatrixRow) -> Option<BannerSpec> {
    // Eliminated even from rank 9: last place is sealed.
    if row.rank(9).y_tie_ok_raw == 0 {
        return Some(BannerSpec {
            kind: BannerKind::Low,
            stage: BannerStage::PostseasonFail,
            sub: BannerSub::RankConfirmed(10),
            end_rank: 1,
        });
    }

    // Rank 1 clinched: the pennant race is over for this team.
    if row.rank(1).x_strict_raw == 0 {
        return Some(BannerSpec {
            kind: BannerKind::Top,
            stage: BannerStage::KoreanSeries,
            sub: BannerSub::RankConfirmed(1),
            end_rank: 1,
        });
    }

    // Ranks 2..=4: clinched rank k or better, but not k-1 or better.
    for k in 2..=4u8 {
        if row.rank(k).x_strict_raw == 0 && row.rank(k - 1).x_strict_raw > 0 {
            let (kind, stage) = match k {
                2 => (BannerKind::Top, BannerStage::PlayoffDirect),
                3 => (BannerKind::Top, BannerStage::SemiPlayoff),
                _ => (BannerKind::Mid, BannerStage::Wildcard),
            };
            return Some(BannerSpec {
                kind,
                stage,
                sub: secured_or_confirmed(row, k),
                end_rank: 1,
            });
        }
    }

    // Rank 5 (the playoff cutoff) only merges columns 9..5, leaving
    // 4..1 as individual cells. Reaching this arm implies x4 > 0.
    if row.rank(PLAYOFF_CUTOFF).x_strict_raw == 0 {
        return Some(BannerSpec {
            kind: BannerKind::Top,
            stage: BannerStage::Wildcard,
            sub: secured_or_confirmed(row, PLAYOFF_CUTOFF),
            end_rank: PLAYOFF_CUTOFF,
        });
    }

    // Ranks 6..=9: final rank k sealed from both sides means the
    // postseason is out of reach.
    for k in 6..=TRACKED_RANKS as u8 {
        if row.rank(k).x_strict_raw == 0 && row.rank(k - 1).y_tie_ok_raw == 0 {
            return Some(BannerSpec {
                kind: BannerKind::Low,
                stage: BannerStage::PostseasonFail,
                sub: BannerSub::RankConfirmed(k),
                end_rank: 1,
            });
        }
    }

    None
}

/// "k위 확정" when the rank above is also unreachable, otherwise
/// "k위 이상 확보".
fn secured_or_confirmed(row: &MatrixRow, k: u8) -> BannerSub {
    if row.rank(k - 1).y_tie_ok_raw == 0 {
        BannerSub::RankConfirmed(k)
    } else {
        BannerSub::RankOrBetterSecured(k)
    }
}

/// Render one team's row: banner plus the remaining cells with
/// confirmed/impossible run merging.
pub fn render_row(row: &MatrixRow, current_rank: u32, localizer: &MatrixLocalizer) -> RenderedRow {
    let spec = analyze_banner(row);

    let banner = spec.map(|s| Banner {
        kind: s.kind,
        stage: s.stage,
        sub: s.sub,
        start_rank: TRACKED_RANKS as u8,
        end_rank: s.end_rank,
        colspan: TRACKED_RANKS as u8 - s.end_rank + 1,
        stage_label: localizer.banner_stage(s.stage),
        sub_label: localizer.banner_sub(s.sub),
    });

    // Columns left of the banner, rank 9 downward; all nine when
    // there is no banner.
    let first_cell_rank = match &banner {
        Some(b) => b.end_rank.saturating_sub(1),
        None => TRACKED_RANKS as u8,
    };

    let outcomes: Vec<(u8, CellOutcome)> = (1..=first_cell_rank)
        .rev()
        .map(|rank| {
            (
                rank,
                classify_cell(rank, current_rank, row.rank(rank), row.remaining),
            )
        })
        .collect();

    RenderedRow {
        team: row.team.clone(),
        current_rank,
        remaining_games: row.remaining,
        win_pct: row.win_pct,
        banner,
        cells: merge_cells(&outcomes, localizer),
    }
}

/// Collapse contiguous equal-tag confirmed/impossible runs. A
/// confirmed run keeps its best (lowest-numbered) rank — the run
/// means "at least this good" — while an impossible run keeps its
/// worst (highest-numbered) rank.
fn merge_cells(outcomes: &[(u8, CellOutcome)], localizer: &MatrixLocalizer) -> Vec<RenderedCell> {
    let mut cells = Vec::with_capacity(outcomes.len());
    let mut i = 0;
    while i < outcomes.len() {
        let (rank, outcome) = outcomes[i];

        if !matches!(outcome.tag, CellTag::Confirmed | CellTag::Impossible) {
            cells.push(RenderedCell {
                rank,
                tag: outcome.tag,
                label: localizer.cell_label(&outcome, rank),
                class_name: outcome.tag.css_class().to_string(),
                colspan: 1,
                playoff_divider: rank == PLAYOFF_CUTOFF,
            });
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < outcomes.len() && outcomes[j].1.tag == outcome.tag {
            j += 1;
        }

        // outcomes are ordered rank 9 → 1, so the first entry of a run
        // is its worst rank and the last its best.
        let run = &outcomes[i..j];
        let representative = match outcome.tag {
            CellTag::Confirmed => run[run.len() - 1].0,
            _ => run[0].0,
        };

        cells.push(RenderedCell {
            rank: representative,
            tag: outcome.tag,
            label: localizer.cell_label(&outcome, representative),
            class_name: outcome.tag.css_class().to_string(),
            colspan: run.len() as u8,
            playoff_divider: run[0].0 == PLAYOFF_CUTOFF,
        });
        i = j;
    }
    cells
}

/// Render every team's row against the resolved current-rank map.
/// Teams missing from the map render with a sentinel rank that sorts
/// below everyone.
pub fn render_rows(
    rows: &[MatrixRow],
    current_ranks: &HashMap<String, u32>,
    localizer: &MatrixLocalizer,
) -> Vec<RenderedRow> {
    rows.iter()
        .map(|row| {
            let current_rank = current_ranks.get(&row.team).copied().unwrap_or(999);
            render_row(row, current_rank, localizer)
        })
        .collect()
}
