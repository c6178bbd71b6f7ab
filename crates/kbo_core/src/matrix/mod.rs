//! Magic/tragic number matrix engine
//!
//! 매직넘버 매트릭스: 벤치마크 → 산출 → 분류 → 배너/병합
//!
//! Pure, synchronous pipeline over one standings snapshot:
//!
//! ```text
//! StandingsSnapshot → benchmark → derivation → classify → render
//! ```

pub mod benchmark;
pub mod classify;
pub mod derivation;
pub mod render;

pub use benchmark::{precompute_benchmarks, BenchmarkSet};
pub use classify::{classify_cell, CellOutcome, CellTag, TieMode};
pub use derivation::{
    compute_matrix, magic_tragic_for_rank, MatrixRow, RankNumbers, PLAYOFF_CUTOFF, TRACKED_RANKS,
};
pub use render::{
    render_row, render_rows, Banner, BannerKind, BannerStage, BannerSub, RenderedCell, RenderedRow,
};
