//! Web Mercator (EPSG:3857) pixel and slippy-map tile arithmetic

use hunt_core::models::Coordinates;
use std::f64::consts::PI;

use crate::region::Region;

/// Edge length of a raster tile in pixels
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level served by standard OSM tile servers
pub const MAX_ZOOM: u8 = 19;

/// Latitude limit of the Web Mercator projection
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Size of the whole world in pixels at a zoom level
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE as f64 * 2f64.powi(zoom as i32)
}

/// Global pixel position of a coordinate at a zoom level
pub fn world_pixel(coordinates: Coordinates, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coordinates
        .latitude
        .clamp(-MAX_LATITUDE, MAX_LATITUDE)
        .to_radians();

    let x = (coordinates.longitude + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Highest zoom at which the region fits into `width` x `height` pixels
pub fn fit_zoom(region: &Region, width: u32, height: u32) -> u8 {
    for zoom in (0..=MAX_ZOOM).rev() {
        let (west_x, north_y) = world_pixel(region.north_west(), zoom);
        let (east_x, south_y) = world_pixel(region.south_east(), zoom);

        let mut dx = east_x - west_x;
        if dx < 0.0 {
            // Region straddles the antimeridian
            dx += world_size(zoom);
        }
        let dy = south_y - north_y;

        if dx <= width as f64 && dy <= height as f64 {
            return zoom;
        }
    }
    0
}

/// A tile to fetch and where it lands in the output image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,

    /// Top-left corner of the tile relative to the viewport
    pub offset_x: i64,
    pub offset_y: i64,
}

/// A pixel window onto the world map at a fixed zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    left: f64,
    top: f64,
}

impl Viewport {
    /// Viewport of the given size centred on a coordinate
    pub fn centered(center: Coordinates, zoom: u8, width: u32, height: u32) -> Self {
        let (cx, cy) = world_pixel(center, zoom);
        Self {
            zoom,
            width,
            height,
            left: (cx - width as f64 / 2.0).floor(),
            top: (cy - height as f64 / 2.0).floor(),
        }
    }

    /// Viewport that fits the whole region, centred on the region centre
    pub fn for_region(region: &Region, width: u32, height: u32) -> Self {
        let zoom = fit_zoom(region, width, height);
        Self::centered(region.center, zoom, width, height)
    }

    /// Position of a coordinate inside the viewport
    pub fn project(&self, coordinates: Coordinates) -> (f64, f64) {
        let (x, y) = world_pixel(coordinates, self.zoom);
        (x - self.left, y - self.top)
    }

    /// Every tile overlapping the viewport, row by row
    pub fn tiles(&self) -> Vec<TileCoord> {
        let tile = TILE_SIZE as f64;
        let tiles_per_axis = 1i64 << self.zoom;

        let first_x = (self.left / tile).floor() as i64;
        let first_y = (self.top / tile).floor() as i64;
        let last_x = ((self.left + self.width as f64 - 1.0) / tile).floor() as i64;
        let last_y = ((self.top + self.height as f64 - 1.0) / tile).floor() as i64;

        let mut tiles = Vec::new();
        for ty in first_y..=last_y {
            if ty < 0 || ty >= tiles_per_axis {
                continue;
            }
            for tx in first_x..=last_x {
                tiles.push(TileCoord {
                    z: self.zoom,
                    x: tx.rem_euclid(tiles_per_axis) as u32,
                    y: ty as u32,
                    offset_x: tx * TILE_SIZE as i64 - self.left as i64,
                    offset_y: ty * TILE_SIZE as i64 - self.top as i64,
                });
            }
        }
        tiles
    }
}
