use async_trait::async_trait;
use hunt_core::error::{HuntError, Result};
use hunt_core::imaging::{self, JPEG_QUALITY};
use hunt_core::ports::{MapRenderer, SnapshotRequest};
use hunt_geo::mercator::{TileCoord, Viewport};
use hunt_geo::Region;
use image::{imageops, DynamicImage, Rgba, RgbaImage};

use crate::http::{build_client, get_checked};

const SERVICE: &str = "map tiles";

/// Canvas colour shown where no tile exists (beyond the poles)
const BACKGROUND: Rgba<u8> = Rgba([229, 227, 223, 255]);
const MARKER_FILL: Rgba<u8> = Rgba([220, 38, 38, 255]);
const MARKER_OUTLINE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MARKER_RADIUS: f64 = 9.0;
const MARKER_OUTLINE_WIDTH: f64 = 2.5;

/// Static map renderer stitching slippy-map raster tiles
pub struct OsmTileRenderer {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders
    tile_url: String,

    client: reqwest::Client,
}

impl OsmTileRenderer {
    pub fn new(tile_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let tile_url = tile_url.into();
        if !["{z}", "{x}", "{y}"].iter().all(|p| tile_url.contains(p)) {
            return Err(HuntError::ConfigInvalid {
                key: "tile_url".to_string(),
                reason: format!(
                    "Template '{}' must contain {{z}}, {{x}} and {{y}}",
                    tile_url
                ),
            });
        }
        Ok(Self {
            tile_url,
            client: build_client(user_agent)?,
        })
    }

    /// URL of a single tile
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        self.tile_url
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    async fn fetch_tile(&self, tile: &TileCoord) -> Result<DynamicImage> {
        let raw = self.tile_url(tile);
        let url = reqwest::Url::parse(&raw).map_err(|e| HuntError::ConfigInvalid {
            key: "tile_url".to_string(),
            reason: format!("Invalid tile URL '{}': {}", raw, e),
        })?;
        let response = get_checked(&self.client, SERVICE, url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HuntError::network(SERVICE, e))?;
        imaging::decode(&bytes)
    }
}

#[async_trait]
impl MapRenderer for OsmTileRenderer {
    async fn render(&self, request: &SnapshotRequest) -> Result<Vec<u8>> {
        let region = Region::around(request.center, request.span_meters);
        let viewport = Viewport::for_region(&region, request.width, request.height);

        tracing::debug!(
            "Rendering {}x{} map at zoom {} around {}",
            request.width,
            request.height,
            viewport.zoom,
            request.center
        );

        let mut canvas = RgbaImage::from_pixel(request.width, request.height, BACKGROUND);
        for tile in viewport.tiles() {
            let tile_image = self.fetch_tile(&tile).await?.to_rgba8();
            imageops::overlay(&mut canvas, &tile_image, tile.offset_x, tile.offset_y);
        }

        let (marker_x, marker_y) = viewport.project(request.center);
        draw_marker(&mut canvas, marker_x, marker_y);

        imaging::encode_jpeg(&DynamicImage::ImageRgba8(canvas), JPEG_QUALITY)
    }
}

/// Draw a round pin with a white outline centred on (cx, cy)
pub fn draw_marker(canvas: &mut RgbaImage, cx: f64, cy: f64) {
    let outer = MARKER_RADIUS + MARKER_OUTLINE_WIDTH;
    let min_x = (cx - outer).floor().max(0.0) as u32;
    let min_y = (cy - outer).floor().max(0.0) as u32;
    let max_x = ((cx + outer).ceil() as u32).min(canvas.width().saturating_sub(1));
    let max_y = ((cy + outer).ceil() as u32).min(canvas.height().saturating_sub(1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= MARKER_RADIUS {
                canvas.put_pixel(x, y, MARKER_FILL);
            } else if distance <= outer {
                canvas.put_pixel(x, y, MARKER_OUTLINE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_validation() {
        assert!(OsmTileRenderer::new("https://tiles.example.org/{z}/{x}/{y}.png", "ua").is_ok());
        assert!(OsmTileRenderer::new("https://tiles.example.org/{z}/{x}.png", "ua").is_err());
    }

    #[test]
    fn test_tile_url_substitution() {
        let renderer = OsmTileRenderer::new("https://t.example.org/{z}/{x}/{y}.png", "ua").unwrap();
        let tile = TileCoord {
            z: 13,
            x: 2290,
            y: 2990,
            offset_x: 0,
            offset_y: 0,
        };
        assert_eq!(
            renderer.tile_url(&tile),
            "https://t.example.org/13/2290/2990.png"
        );
    }

    #[test]
    fn test_marker_centre_and_outline() {
        let mut canvas = RgbaImage::from_pixel(40, 40, BACKGROUND);
        draw_marker(&mut canvas, 20.0, 20.0);

        assert_eq!(canvas.get_pixel(20, 20), &MARKER_FILL);
        assert_eq!(canvas.get_pixel(20, 30), &MARKER_OUTLINE);
        assert_eq!(canvas.get_pixel(0, 0), &BACKGROUND);
    }

    #[test]
    fn test_marker_clipped_at_edge() {
        let mut canvas = RgbaImage::from_pixel(10, 10, BACKGROUND);
        draw_marker(&mut canvas, 0.0, 0.0);
        assert_eq!(canvas.get_pixel(0, 0), &MARKER_FILL);
    }
}
