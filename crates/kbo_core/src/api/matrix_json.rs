//! JSON API for the matrix engine
//!
//! 외부 연동용 JSON 진입점 (대시보드 / 사전계산 빌더)
//!
//! Structural violations (unparseable request, wrong schema version)
//! are the only errors; purely numeric edge cases always produce a
//! response. Degraded input rows deserialize to zeros and still render.

use crate::localization::MatrixLocalizer;
use crate::matrix::{compute_matrix, render_rows, MatrixRow, RenderedRow};
use crate::models::{StandingsSnapshot, TeamStanding, DEFAULT_SEASON};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRequest {
    pub schema_version: u8,
    pub teams: Vec<TeamStanding>,
    #[serde(default = "default_season")]
    pub season: u32,
    /// Authoritative remaining games per team (schedule source).
    #[serde(default)]
    pub remaining_override: HashMap<String, u32>,
    /// Authoritative current ranks (official tiebreak rules applied
    /// upstream).
    #[serde(default)]
    pub rank_override: HashMap<String, u32>,
    /// Requested label locale; negotiated against the supported set.
    #[serde(default)]
    pub locale: Option<String>,
}

fn default_season() -> u32 {
    DEFAULT_SEASON
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixResponse {
    pub schema_version: u8,
    pub locale: String,
    pub season: u32,
    /// Full numeric rows, one per team, nine rank entries each.
    pub rows: Vec<MatrixRow>,
    /// Presentation-ready rows: banner + merged cells.
    pub rendered: Vec<RenderedRow>,
    pub current_ranks: HashMap<String, u32>,
}

/// Compute the full matrix from a JSON request, returning the
/// response as JSON. Errors are strings, matching the convention of
/// the other JSON entry points in this workspace.
pub fn compute_matrix_json(request_json: &str) -> Result<String, String> {
    let request: MatrixRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "Unsupported schema version: {}",
            request.schema_version
        ));
    }

    let mut localizer = MatrixLocalizer::new();
    let locale = match request.locale.as_deref() {
        Some(requested) => localizer.negotiate(requested),
        None => localizer.current_locale().to_string(),
    };

    let snapshot = StandingsSnapshot {
        teams: request.teams,
        season: request.season,
        remaining_override: request.remaining_override,
        rank_override: request.rank_override,
    };

    let rows = compute_matrix(&snapshot);
    let current_ranks = snapshot.current_ranks();
    let rendered = render_rows(&rows, &current_ranks, &localizer);

    let response = MatrixResponse {
        schema_version: SCHEMA_VERSION,
        locale,
        season: snapshot.season,
        rows,
        rendered,
        current_ranks,
    };

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}
