// ./src/main.rs
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use voronoi_regions::debug::visualization::create_voronoi_svg;
use voronoi_regions::export::to_feature_collection;
use voronoi_regions::math::point_distribution::voronoi::{
    Landmark, VoronoiMapBuilder, VoronoiMapConfig, clipping::DEFAULT_FALLBACK_SEGMENTS,
    kyoto_landmarks,
};

/// Voronoi-Zerlegung geografischer Punkte, beschnitten auf eine Box um die Punkte
#[derive(Parser, Debug)]
#[command(name = "voronoi_regions", version, about)]
struct Cli {
    /// JSON-Datei mit einem Array aus {"lat", "lon", "label"?}. Ohne Angabe: fünf Orte in Kyoto
    #[arg(long, value_name = "FILE")]
    points: Option<PathBuf>,

    /// EPSG-Code der metrischen UTM-Projektion
    #[arg(long, default_value_t = 32653)]
    epsg: u32,

    /// Rand der Clip-Box um die Punkte (Meter)
    #[arg(long, default_value_t = 2000.0)]
    clip_margin: f64,

    /// Abstand der Fernpunkte (Meter). Standard: doppelte Spannweite der Punkte
    #[arg(long)]
    radius: Option<f64>,

    /// Radius der Ersatzscheibe für leere Zellen (Meter)
    #[arg(long, default_value_t = 10.0)]
    fallback_radius: f64,

    /// GeoJSON-Ausgabe
    #[arg(long, value_name = "FILE")]
    geojson: Option<PathBuf>,

    /// SVG-Ausgabe
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Längere Seite der SVG in Pixeln
    #[arg(long, default_value_t = 1000.0)]
    svg_size: f64,
}

fn load_landmarks(path: &Path) -> Result<Vec<Landmark>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let landmarks: Vec<Landmark> = serde_json::from_str(&content)?;
    info!("Loaded {} points from '{}'", landmarks.len(), path.display());
    Ok(landmarks)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let landmarks = match &cli.points {
        Some(path) => load_landmarks(path)?,
        None => kyoto_landmarks(),
    };

    let mut config = VoronoiMapConfig::new()
        .with_projection_epsg(cli.epsg)
        .with_clip_margin(cli.clip_margin)
        .with_fallback(cli.fallback_radius, DEFAULT_FALLBACK_SEGMENTS);
    if let Some(radius) = cli.radius {
        config = config.with_far_point_radius(radius);
    }

    let map = VoronoiMapBuilder::new(config)?.generate(&landmarks)?;

    println!(
        "{} cells, EPSG:{}, clip box {}, far point radius {:.1} m",
        map.len(),
        map.projection.epsg(),
        map.bounds,
        map.far_point_radius
    );
    for cell in &map.cells {
        println!(
            "  {:<20} {:>14.1} m²{}",
            map.label(cell.site).unwrap_or_default(),
            cell.area(),
            if cell.used_fallback { "  (fallback disk)" } else { "" }
        );
    }

    if let Some(path) = &cli.geojson {
        to_feature_collection(&map)?.write_to_path(path)?;
        println!("GeoJSON: {}", path.display());
    }
    if let Some(path) = &cli.svg {
        create_voronoi_svg(path, &map, cli.svg_size)?;
        println!("SVG: {}", path.display());
    }
    Ok(())
}
