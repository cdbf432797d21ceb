//! scenepub: export layer trees and publish scenes from a JSON fixture.
//!
//! Usage:
//!   scenepub export --fixture world.json --layer <id> --format kml
//!   scenepub publish --fixture world.json --scene <id>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scenepub_cli::{Config, Fixture, Format, commands};
use scenepub_types::{LayerId, SceneId};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "scenepub")]
#[command(about = "Export scene layers and publish scenes")]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "scenepub.toml", global = true)]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a layer (or group subtree) to a geodata format
    Export {
        /// JSON fixture with layers, properties, datasets and scenes
        #[arg(long)]
        fixture: PathBuf,

        /// Layer to export
        #[arg(long)]
        layer: LayerId,

        /// Output format (defaults to the config's default_format)
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Output path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build the published document of a scene
    Publish {
        /// JSON fixture with layers, properties, datasets and scenes
        #[arg(long)]
        fixture: PathBuf,

        /// Scene to publish
        #[arg(long)]
        scene: SceneId,

        /// Output path
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = Config::load_from(&args.config);

    match args.command {
        Command::Export {
            fixture,
            layer,
            format,
            out,
        } => {
            let stores = Fixture::from_path(&fixture)?.into_stores();
            let path = commands::export(&stores, &config, layer, format, out)
                .await
                .context("Export failed")?;
            info!("Wrote {}", path.display());
        }
        Command::Publish {
            fixture,
            scene,
            out,
        } => {
            let stores = Fixture::from_path(&fixture)?.into_stores();
            let path = commands::publish(&stores, &config, scene, out, chrono::Utc::now())
                .await
                .context("Publish failed")?;
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
