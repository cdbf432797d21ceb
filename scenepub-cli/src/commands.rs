//! The export and publish commands.

use crate::{Config, Format, Stores};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use scenepub_dataset::GraphWalker;
use scenepub_encoding::{CzmlEncoder, Encoder, Exporter, GeoJsonEncoder, KmlEncoder, ShpEncoder};
use scenepub_scene::SceneBuilder;
use scenepub_types::{LayerId, SceneId};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exports one layer (or group subtree) to `out`, defaulting to
/// `<output_dir>/<layer id>.<format>`. Returns the path written.
pub async fn export(
    stores: &Stores,
    config: &Config,
    layer: LayerId,
    format: Option<Format>,
    out: Option<PathBuf>,
) -> Result<PathBuf> {
    let format = format.unwrap_or(config.default_format);
    let path = out.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("{layer}.{}", format.extension()))
    });
    let file = create(&path)?;

    let graph = GraphWalker::new(&stores.datasets);
    let exporter = Exporter::new(&stores.layers, &stores.properties, &graph);
    let mut encoder: Box<dyn Encoder> = match format {
        Format::GeoJson => Box::new(GeoJsonEncoder::new(BufWriter::new(file))),
        Format::Czml => Box::new(CzmlEncoder::new(BufWriter::new(file))),
        Format::Kml => Box::new(KmlEncoder::new(BufWriter::new(file))),
        Format::Shp => Box::new(ShpEncoder::new(BufWriter::new(file))?),
    };
    exporter
        .export_layer_by_id(layer, &mut encoder)
        .await
        .with_context(|| format!("Failed to export layer {layer}"))?;

    info!("Exported layer {} as {:?} to {:?}", layer, format, path);
    Ok(path)
}

/// Publishes a scene to `out`, defaulting to `<output_dir>/<scene id>.json`.
pub async fn publish(
    stores: &Stores,
    config: &Config,
    scene: SceneId,
    out: Option<PathBuf>,
    published_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let scene = stores
        .scenes
        .get(&scene)
        .ok_or_else(|| anyhow!("Scene {scene} not found in fixture"))?;
    let path = out.unwrap_or_else(|| config.output_dir.join(format!("{}.json", scene.id)));
    let file = create(&path)?;

    let graph = GraphWalker::new(&stores.datasets);
    SceneBuilder::new(&stores.layers, &stores.properties, &graph)
        .pretty(config.publish.pretty)
        .build_scene(BufWriter::new(file), scene, published_at)
        .await
        .with_context(|| format!("Failed to publish scene {}", scene.id))?;

    info!("Published scene {} to {:?}", scene.id, path);
    Ok(path)
}

fn create(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
