// src/debug/visualization/svg.rs
use crate::export::{ExportError, ExportResult};
use crate::math::{
    point_distribution::voronoi::VoronoiMap,
    types::{Bounds2D, Point2D, from_geo_ring},
};
use geo::Polygon;
use log::info;
use std::path::Path;
use svg::{Document, Node};
use svg::node::element::{Circle, Group, Polygon as SvgPolygon, Rectangle, Style, Text};

/// Füllfarben der Zellen, zyklisch vergeben.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

// ===================================================================================
// HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Baut ein SVG-Dokument in Kartenkoordinaten auf. Die y-Achse wird gespiegelt,
/// damit Norden oben liegt.
struct SvgBuilder {
    document: Document,
    bounds: Bounds2D,
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Stil und Hintergrund.
    fn new(display_bounds: &Bounds2D, svg_pixel_size: f64) -> Self {
        let width = display_bounds.width();
        let height = display_bounds.height();
        let extent = (width + height) / 2.0;

        let stroke_w_normal = extent * 0.002;
        let stroke_w_thin = extent * 0.001;
        let point_radius = extent * 0.004;
        let font_size = extent * 0.018;

        // Längere Seite = svg_pixel_size
        let scale = svg_pixel_size / width.max(height);

        let style = Style::new(format!(
            r#"
    .background {{ fill: #f0f0f0; }}
    .clip-bounds {{ fill: none; stroke: #888888; stroke-width: {stroke_w_thin}; stroke-dasharray: {dash},{dash}; }}
    .cell {{ fill-opacity: 0.45; stroke: #333333; stroke-width: {stroke_w_normal}; }}
    .cell.fallback {{ stroke-dasharray: {dash},{dash}; }}
    .site {{ fill: #000000; }}
    .label {{
        font-family: sans-serif;
        font-size: {font_size:.1}px;
        fill: #000000;
        stroke: white;
        stroke-width: {stroke_w_thin:.1};
        paint-order: stroke fill;
        text-anchor: middle;
    }}
"#,
            dash = extent * 0.01,
        ));

        let document = Document::new()
            .set("width", width * scale)
            .set("height", height * scale)
            .set("viewBox", (0.0, 0.0, width, height))
            .add(style)
            .add(
                Rectangle::new()
                    .set("x", 0.0)
                    .set("y", 0.0)
                    .set("width", width)
                    .set("height", height)
                    .set("class", "background"),
            );

        Self {
            document,
            bounds: *display_bounds,
            point_radius,
        }
    }

    /// Kartenkoordinate -> SVG-Koordinate
    fn to_svg(&self, p: Point2D) -> (f64, f64) {
        (p.x - self.bounds.min.x, self.bounds.max.y - p.y)
    }

    /// Zeichnet den Außenring eines geo-Polygons.
    fn draw_polygon(&mut self, polygon: &Polygon<f64>, fill: &str, class: &str) {
        let points = from_geo_ring(polygon.exterior())
            .into_iter()
            .map(|p| {
                let (x, y) = self.to_svg(p);
                format!("{:.3},{:.3}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        if points.is_empty() {
            return;
        }
        let node = SvgPolygon::new()
            .set("points", points)
            .set("fill", fill)
            .set("class", class);
        self.add(node);
    }

    fn draw_site(&mut self, site: Point2D, label: &str) {
        let (x, y) = self.to_svg(site);
        let group = Group::new()
            .add(
                Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", self.point_radius)
                    .set("class", "site"),
            )
            .add(
                Text::new(label)
                    .set("x", x)
                    .set("y", y - self.point_radius * 2.0)
                    .set("class", "label"),
            );
        self.add(group);
    }

    fn draw_rect(&mut self, bounds: &Bounds2D, class: &str) {
        let (x, y) = self.to_svg(Point2D::new(bounds.min.x, bounds.max.y));
        let node = Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", class);
        self.add(node);
    }

    fn add<T>(&mut self, node: T)
    where
        T: Into<Box<dyn Node>>,
    {
        self.document.append(node);
    }

    fn finish(self) -> Document {
        self.document
    }
}

/// Baut das SVG-Dokument einer Voronoi-Karte: Zellen, Sites mit Beschriftung und Clip-Box.
pub fn voronoi_map_document(map: &VoronoiMap, svg_pixel_size: f64) -> ExportResult<Document> {
    if map.is_empty() {
        return Err(ExportError::EmptyMap);
    }
    let mut svg = SvgBuilder::new(&map.bounds, svg_pixel_size);

    for cell in &map.cells {
        let fill = PALETTE[cell.site % PALETTE.len()];
        let class = if cell.used_fallback {
            "cell fallback"
        } else {
            "cell"
        };
        for polygon in &cell.geometry.0 {
            svg.draw_polygon(polygon, fill, class);
        }
    }

    svg.draw_rect(&map.bounds, "clip-bounds");

    for (i, &site) in map.sites.iter().enumerate() {
        let label = map.label(i).unwrap_or_default();
        svg.draw_site(site, label);
    }

    Ok(svg.finish())
}

/// Schreibt eine SVG-Datei der Karte.
pub fn create_voronoi_svg(
    path: impl AsRef<Path>,
    map: &VoronoiMap,
    svg_pixel_size: f64,
) -> ExportResult<()> {
    let path = path.as_ref();
    let document = voronoi_map_document(map, svg_pixel_size)?;
    svg::save(path, &document).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("SVG '{}' wurde erstellt.", path.display());
    Ok(())
}
