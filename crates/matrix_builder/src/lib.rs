//! Matrix Builder Library
//!
//! 스탠딩 스냅샷 JSON → 매트릭스 계산 → 사전계산 아티팩트 + SHA256 체크섬
//!
//! The precomputed artifact the dashboard loads is nothing but a
//! serialization of one engine run; there is no second calculator and
//! no reconciliation pass. The builder reads the standings snapshot
//! file, computes the matrix once through `kbo_core`, and writes the
//! artifact plus an integrity checksum.

use anyhow::{bail, Context, Result};
use kbo_core::{
    compute_matrix, render_rows, MatrixLocalizer, MatrixRow, RenderedRow, StandingsSnapshot,
    TeamStanding, DEFAULT_SEASON, PLAYOFF_CUTOFF,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Input snapshot file, in the dashboard data layout: `playoffResults`
/// carries the records and remaining games, `results` the official
/// current ranks (tiebreaks already applied upstream).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    #[serde(default)]
    pub results: Vec<RankedResult>,
    #[serde(default)]
    pub playoff_results: Vec<TeamStanding>,
    #[serde(default)]
    pub season: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub team: String,
    pub rank: u32,
}

/// Presentation config for one club (dashboard colors/logos).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfig {
    pub color: String,
    pub logo_name: String,
}

/// The ten KBO clubs' presentation config.
pub fn team_configurations() -> BTreeMap<String, TeamConfig> {
    let clubs = [
        ("LG", "#C30452", "lg"),
        ("한화", "#FF6600", "hanwha"),
        ("SSG", "#CE0E2D", "ssg"),
        ("삼성", "#074CA1", "samsung"),
        ("KT", "#000000", "kt"),
        ("롯데", "#002955", "lotte"),
        ("NC", "#1D467A", "nc"),
        ("KIA", "#EA0029", "kia"),
        ("두산", "#131230", "doosan"),
        ("키움", "#820024", "kiwoom"),
    ];
    clubs
        .into_iter()
        .map(|(team, color, logo)| {
            (
                team.to_string(),
                TeamConfig {
                    color: color.to_string(),
                    logo_name: logo.to_string(),
                },
            )
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub last_updated: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecomputedResults {
    pub matrix_data: Vec<RenderedRow>,
    pub raw_calculation_data: Vec<MatrixRow>,
    pub current_rank_map: HashMap<String, u32>,
    pub last_calculated: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub description: String,
    pub priority: u8,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStructure {
    /// Column order: rank 9 (leftmost) down to rank 1.
    pub ranks: Vec<u8>,
    pub cell_types: BTreeMap<String, TypeInfo>,
    pub banner_types: BTreeMap<String, TypeInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationConstants {
    pub season: u32,
    pub ranks: Vec<u8>,
    pub playoff_cutoff: u8,
}

/// The full precomputed artifact the dashboard consumes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixArtifact {
    pub metadata: ArtifactInfo,
    pub team_configurations: BTreeMap<String, TeamConfig>,
    pub precomputed_matrix_results: PrecomputedResults,
    pub matrix_table_structure: TableStructure,
    pub calculation_constants: CalculationConstants,
}

/// Build metadata, written to the optional sidecar file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    /// SHA256 of the artifact bytes (hex).
    pub checksum: String,
    /// RFC3339 build time.
    pub created_at: String,
    pub team_count: usize,
    pub artifact_size: u64,
    pub locale: String,
}

fn cell_type_catalog() -> BTreeMap<String, TypeInfo> {
    let entries = [
        ("magic-confirmed", "확보", 1),
        ("magic-safe", "매직넘버", 2),
        ("magic-impossible", "불가능", 3),
        ("magic-selflimit", "잔여경기 제한", 4),
    ];
    entries
        .into_iter()
        .map(|(k, d, p)| {
            (
                k.to_string(),
                TypeInfo {
                    description: d.to_string(),
                    priority: p,
                },
            )
        })
        .collect()
}

fn banner_type_catalog() -> BTreeMap<String, TypeInfo> {
    let entries = [
        ("banner-top", "상위권 확정", 1),
        ("banner-mid", "중위권 확정", 2),
        ("banner-low", "하위권 확정", 3),
    ];
    entries
        .into_iter()
        .map(|(k, d, p)| {
            (
                k.to_string(),
                TypeInfo {
                    description: d.to_string(),
                    priority: p,
                },
            )
        })
        .collect()
}

/// Convert the snapshot file into the engine's input form.
pub fn snapshot_from_file(file: &SnapshotFile, season: u32) -> StandingsSnapshot {
    let remaining_override: HashMap<String, u32> = file
        .playoff_results
        .iter()
        .filter_map(|t| t.remaining_games.map(|r| (t.team.clone(), r)))
        .collect();
    let rank_override: HashMap<String, u32> = file
        .results
        .iter()
        .map(|r| (r.team.clone(), r.rank))
        .collect();

    StandingsSnapshot {
        teams: file.playoff_results.clone(),
        season: file.season.unwrap_or(season),
        remaining_override,
        rank_override,
    }
}

/// Compute the artifact from a parsed snapshot.
pub fn build_artifact(file: &SnapshotFile, season: u32, locale: &str) -> Result<MatrixArtifact> {
    if file.playoff_results.is_empty() {
        bail!("snapshot contains no team records (playoffResults is empty)");
    }

    let snapshot = snapshot_from_file(file, season);
    let mut localizer = MatrixLocalizer::new();
    localizer.negotiate(locale);

    let rows = compute_matrix(&snapshot);
    let current_ranks = snapshot.current_ranks();
    let rendered = render_rows(&rows, &current_ranks, &localizer);

    let now = chrono::Utc::now().to_rfc3339();
    Ok(MatrixArtifact {
        metadata: ArtifactInfo {
            last_updated: now.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Precomputed magic-number matrix dashboard data".to_string(),
        },
        team_configurations: team_configurations(),
        precomputed_matrix_results: PrecomputedResults {
            matrix_data: rendered,
            raw_calculation_data: rows,
            current_rank_map: current_ranks,
            last_calculated: now,
        },
        matrix_table_structure: TableStructure {
            ranks: (1..=9u8).rev().collect(),
            cell_types: cell_type_catalog(),
            banner_types: banner_type_catalog(),
        },
        calculation_constants: CalculationConstants {
            season: snapshot.season,
            ranks: (1..=9u8).collect(),
            playoff_cutoff: PLAYOFF_CUTOFF,
        },
    })
}

/// Read the snapshot file, compute the matrix, write the artifact.
pub fn build_matrix(
    input_json: &Path,
    output_json: &Path,
    season: u32,
    locale: &str,
) -> Result<BuildMetadata> {
    let json_str = fs::read_to_string(input_json)
        .with_context(|| format!("Failed to read snapshot file: {}", input_json.display()))?;

    let file: SnapshotFile =
        serde_json::from_str(&json_str).context("Failed to parse snapshot JSON")?;

    let artifact = build_artifact(&file, season, locale)?;
    let team_count = artifact.precomputed_matrix_results.matrix_data.len();

    let bytes =
        serde_json::to_vec_pretty(&artifact).context("Failed to serialize artifact")?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let checksum = format!("{:x}", hasher.finalize());

    if let Some(parent) = output_json.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output_json, &bytes)
        .with_context(|| format!("Failed to write artifact: {}", output_json.display()))?;

    Ok(BuildMetadata {
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        team_count,
        artifact_size: bytes.len() as u64,
        locale: locale.to_string(),
    })
}

/// Verify an artifact file against its recorded checksum.
pub fn verify_artifact(artifact_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(artifact_file)
        .with_context(|| format!("Failed to read artifact: {}", artifact_file.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = format!("{:x}", hasher.finalize());

    Ok(actual == expected_checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbo_core::BannerStage;

    fn sample_snapshot_json() -> String {
        serde_json::json!({
            "results": [
                { "team": "LG", "rank": 1 },
                { "team": "한화", "rank": 2 },
                { "team": "SSG", "rank": 3 }
            ],
            "playoffResults": [
                { "team": "LG", "wins": 80, "losses": 50, "draws": 2, "remainingGames": 12 },
                { "team": "한화", "wins": 75, "losses": 55, "draws": 1, "remainingGames": 13 },
                { "team": "SSG", "wins": 60, "losses": 70, "draws": 0, "remainingGames": 14 }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_build_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("calc-magic-numbers.json");
        let output = dir.path().join("ui-magic-matrix-precomputed.json");
        fs::write(&input, sample_snapshot_json()).unwrap();

        let meta = build_matrix(&input, &output, DEFAULT_SEASON, "ko-KR").unwrap();
        assert_eq!(meta.team_count, 3);
        assert!(verify_artifact(&output, &meta.checksum).unwrap());

        let artifact: MatrixArtifact =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(artifact.precomputed_matrix_results.raw_calculation_data.len(), 3);
        assert_eq!(artifact.calculation_constants.playoff_cutoff, 5);
        assert_eq!(artifact.matrix_table_structure.ranks[0], 9);
        assert_eq!(artifact.precomputed_matrix_results.current_rank_map["LG"], 1);
        assert_eq!(artifact.team_configurations["두산"].logo_name, "doosan");
    }

    #[test]
    fn test_rank_override_feeds_render() {
        let file: SnapshotFile = serde_json::from_str(&sample_snapshot_json()).unwrap();
        let artifact = build_artifact(&file, DEFAULT_SEASON, "ko-KR").unwrap();
        let lg = artifact
            .precomputed_matrix_results
            .matrix_data
            .iter()
            .find(|r| r.team == "LG")
            .unwrap();
        assert_eq!(lg.current_rank, 1);
    }

    #[test]
    fn test_empty_snapshot_is_an_error() {
        let file: SnapshotFile = serde_json::from_str("{}").unwrap();
        assert!(build_artifact(&file, DEFAULT_SEASON, "ko-KR").is_err());
    }

    #[test]
    fn test_sealed_last_place_banner_survives_serialization() {
        // Season over for all ten clubs; the tail team is locked into
        // tenth place.
        let wins = [98u32, 80, 78, 76, 74, 65, 60, 50, 45, 20];
        let rows: Vec<serde_json::Value> = wins
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                serde_json::json!({
                    "team": format!("T{}", i + 1),
                    "wins": w,
                    "losses": 134 - w,
                    "remainingGames": 0
                })
            })
            .collect();
        let json = serde_json::json!({ "playoffResults": rows });
        let file: SnapshotFile = serde_json::from_value(json).unwrap();
        let artifact = build_artifact(&file, DEFAULT_SEASON, "ko-KR").unwrap();
        let tail = artifact
            .precomputed_matrix_results
            .matrix_data
            .iter()
            .find(|r| r.team == "T10")
            .unwrap();
        let banner = tail.banner.as_ref().expect("T10 is sealed in last place");
        assert_eq!(banner.stage, BannerStage::PostseasonFail);
        assert_eq!(banner.colspan, 9);
    }
}
