//! Matrix Builder CLI
//!
//! 스탠딩 스냅샷 JSON → 사전계산 매트릭스 아티팩트 빌드 도구

#[cfg(feature = "cli")]
use anyhow::{bail, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "matrix_builder")]
#[command(about = "Build the precomputed magic-number matrix artifact", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build the artifact from a standings snapshot JSON
    Build {
        /// Input snapshot JSON path (calc-magic-numbers.json layout)
        #[arg(long)]
        r#in: PathBuf,

        /// Output artifact JSON path
        #[arg(long)]
        out: PathBuf,

        /// Total scheduled games per team
        #[arg(long, default_value_t = kbo_core::DEFAULT_SEASON)]
        season: u32,

        /// Label locale (negotiated against the supported set)
        #[arg(long, default_value = "ko-KR")]
        locale: String,

        /// Verify artifact checksum after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            r#in,
            out,
            season,
            locale,
            verify,
            metadata,
        } => {
            println!("🔨 Building matrix artifact...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            println!("   Season: {} games", season);

            let meta = matrix_builder::build_matrix(&r#in, &out, season, &locale)?;

            println!("✅ Artifact built");
            println!("   Teams:    {}", meta.team_count);
            println!("   Size:     {} bytes", meta.artifact_size);
            println!("   Checksum: {}", meta.checksum);
            println!("   Created:  {}", meta.created_at);

            if verify {
                if matrix_builder::verify_artifact(&out, &meta.checksum)? {
                    println!("✅ Checksum verified");
                } else {
                    bail!("checksum mismatch after build: {}", out.display());
                }
            }

            if let Some(metadata_path) = metadata {
                let json = serde_json::to_string_pretty(&meta)?;
                std::fs::write(&metadata_path, json)?;
                println!("📁 Metadata: {}", metadata_path.display());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("matrix_builder was built without the `cli` feature");
}
