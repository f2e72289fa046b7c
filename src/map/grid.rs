//! Read-only tile grid adapter over the loaded map document.
use bevy::prelude::*;

use super::document::MapDocument;

/// Global tile id with flip/rotation flags stripped; `0` never appears (empty cells are `None`).
pub type TileIndex = u32;

/// Tiled stores horizontal/vertical/diagonal/hex-rotation flags in the top four bits.
const GID_MASK: u32 = 0x0FFF_FFFF;

/// Grid coordinate of a cell. May lie outside the grid; lookups then return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone)]
struct GridLayer {
    name: String,
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl GridLayer {
    fn index_of(&self, coord: TileCoord) -> Option<usize> {
        if coord.col < 0 || coord.row < 0 {
            return None;
        }
        let (col, row) = (coord.col as u32, coord.row as u32);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    fn tile(&self, coord: TileCoord) -> Option<TileIndex> {
        let index = self.index_of(coord)?;
        let gid = self.cells.get(index)? & GID_MASK;
        (gid != 0).then_some(gid)
    }
}

/// Per-layer tile indices plus the world↔tile conversions.
///
/// World space here is map pixel space: origin at the top-left corner, y grows downward.
#[derive(Resource, Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: Vec2,
    layers: Vec<GridLayer>,
}

impl TileGrid {
    /// Creates an empty grid of `width × height` tiles. Zero tile sizes are bumped to one pixel.
    pub fn new(width: u32, height: u32, tile_size: UVec2) -> Self {
        Self {
            width,
            height,
            tile_size: tile_size.max(UVec2::ONE).as_vec2(),
            layers: Vec::new(),
        }
    }

    /// Adds a layer of raw cell data in row-major order.
    pub fn with_layer(
        mut self,
        name: impl Into<String>,
        width: u32,
        height: u32,
        cells: Vec<u32>,
    ) -> Self {
        self.layers.push(GridLayer {
            name: name.into(),
            width,
            height,
            cells,
        });
        self
    }

    pub fn from_document(document: &MapDocument) -> Self {
        document.tile_layers().fold(
            Self::new(
                document.width,
                document.height,
                UVec2::new(document.tile_width, document.tile_height),
            ),
            |grid, layer| {
                grid.with_layer(
                    layer.name.clone(),
                    layer.width,
                    layer.height,
                    layer.data.clone(),
                )
            },
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Map extent in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    /// Geometric center of the map, floored to whole pixels.
    pub fn center(&self) -> Vec2 {
        (self.pixel_size() / 2.0).floor()
    }

    /// Tile index at a cell; `None` for empty cells, unknown layers and out-of-range coordinates.
    pub fn tile_at(&self, layer: &str, coord: TileCoord) -> Option<TileIndex> {
        self.layer(layer)?.tile(coord)
    }

    pub fn world_to_tile(&self, point: Vec2) -> TileCoord {
        let cell = (point / self.tile_size).floor();
        TileCoord::new(cell.x as i32, cell.y as i32)
    }

    pub fn tile_to_world_center(&self, coord: TileCoord) -> Vec2 {
        (Vec2::new(coord.col as f32, coord.row as f32) + Vec2::splat(0.5)) * self.tile_size
    }

    /// Tile index under a world point.
    pub fn tile_at_point(&self, layer: &str, point: Vec2) -> Option<TileIndex> {
        self.tile_at(layer, self.world_to_tile(point))
    }

    /// Non-empty cells of a layer in row-major order (lowest row first, then lowest column).
    pub fn cells<'a>(
        &'a self,
        layer: &str,
    ) -> impl Iterator<Item = (TileCoord, TileIndex)> + 'a {
        let layer = self.layer(layer);
        let (width, height) = layer.map_or((0, 0), |layer| (layer.width, layer.height));
        (0..height as i32)
            .flat_map(move |row| (0..width as i32).map(move |col| TileCoord::new(col, row)))
            .filter_map(move |coord| {
                layer
                    .and_then(|layer| layer.tile(coord))
                    .map(|index| (coord, index))
            })
    }

    /// Clamps a point into the map's pixel bounds. A zero-sized map leaves points untouched.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        let extent = self.pixel_size();
        if extent.x <= 0.0 || extent.y <= 0.0 {
            return point;
        }
        point.clamp(Vec2::ZERO, extent)
    }

    fn layer(&self, name: &str) -> Option<&GridLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(0, 0, UVec2::ONE)
    }
}

/// Converts a y-down map pixel point into a y-up render translation.
pub fn map_to_render(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, -point.y, z)
}
