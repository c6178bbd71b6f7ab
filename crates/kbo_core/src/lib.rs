//! # kbo_core - KBO Standings Magic/Tragic Matrix Engine
//!
//! Computes, for every team and every final rank 1..9, the minimum
//! additional wins that clinch the rank (magic number) and the
//! additional losses that seal falling out of it (tragic number),
//! over a finite remaining schedule, plus the classification and
//! banner/merge layer the standings dashboard renders from.
//!
//! The engine is a pure function of one standings snapshot: no I/O,
//! no shared state, bit-identical output for identical input.

pub mod api;
pub mod error;
pub mod localization;
pub mod matrix;
pub mod models;

pub use api::{compute_matrix_json, MatrixRequest, MatrixResponse};
pub use error::{MatrixError, Result};
pub use localization::{MatrixLocalizer, SUPPORTED_LOCALES};
pub use matrix::{
    compute_matrix, precompute_benchmarks, render_rows, Banner, BannerKind, BannerStage,
    BannerSub, BenchmarkSet, CellOutcome, CellTag, MatrixRow, RankNumbers, RenderedCell,
    RenderedRow, TieMode, PLAYOFF_CUTOFF, TRACKED_RANKS,
};
pub use models::{StandingsSnapshot, TeamStanding, DEFAULT_SEASON};
