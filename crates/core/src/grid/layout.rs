//! Grid geometry for an acre-subdivided terrain surface
//!
//! Pure index-conversion math over a 2D surface divided into acres, each
//! acre itself a grid of tiles. Both acre-based index functions funnel
//! through [`MapLayout::tile_index`], so the three addressing schemes agree
//! by construction.

use serde::{Deserialize, Serialize};

/// Immutable coordinate-system configuration shared by all addressing schemes
///
/// The surface is `acre_width` x `acre_height` acres, each acre
/// `grid_width` x `grid_height` tiles. Flat storage is column-major
/// (`index = x * map_height + y`). Acres are numbered row-major
/// (`acre = acre_y * acre_width + acre_x`) and tiles within an acre raster
/// row-major (`tile = grid_y * grid_width + grid_x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    grid_width: usize,
    grid_height: usize,
    acre_width: usize,
    acre_height: usize,
}

impl MapLayout {
    /// Create a layout for a surface of `acre_width` x `acre_height` acres,
    /// each `grid_width` x `grid_height` tiles
    ///
    /// # Panics
    /// Panics if any dimension is zero.
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        acre_width: usize,
        acre_height: usize,
    ) -> Self {
        assert!(
            grid_width > 0 && grid_height > 0 && acre_width > 0 && acre_height > 0,
            "layout dimensions must be nonzero"
        );
        MapLayout {
            grid_width,
            grid_height,
            acre_width,
            acre_height,
        }
    }

    /// Tiles per acre edge in X
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Tiles per acre edge in Y
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Acres per surface edge in X
    pub fn acre_width(&self) -> usize {
        self.acre_width
    }

    /// Acres per surface edge in Y
    pub fn acre_height(&self) -> usize {
        self.acre_height
    }

    /// Surface width in tiles
    pub fn map_width(&self) -> usize {
        self.acre_width * self.grid_width
    }

    /// Surface height in tiles
    pub fn map_height(&self) -> usize {
        self.acre_height * self.grid_height
    }

    /// Number of acres on the surface
    pub fn acre_count(&self) -> usize {
        self.acre_width * self.acre_height
    }

    /// Number of tiles in one acre
    pub fn acre_tile_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Number of tiles on the whole surface
    pub fn map_tile_count(&self) -> usize {
        self.map_width() * self.map_height()
    }

    /// Whether absolute coordinates fall on the surface
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.map_width() && y < self.map_height()
    }

    /// Flat index of the tile at absolute surface coordinates
    ///
    /// # Panics
    /// Panics if `(x, y)` is off the surface. Column-major arithmetic would
    /// otherwise map an oversized `y` onto a tile in a neighboring column
    /// instead of past the end of the array, so the bounds are checked here
    /// rather than left to the backing storage.
    #[inline]
    pub fn tile_index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "tile ({x}, {y}) outside {}x{} surface",
            self.map_width(),
            self.map_height()
        );
        x * self.map_height() + y
    }

    /// Flat index of a tile addressed by acre coordinates plus in-acre offset
    ///
    /// # Panics
    /// Panics if the resolved absolute coordinates are off the surface.
    #[inline]
    pub fn tile_index_in_acre(
        &self,
        acre_x: usize,
        acre_y: usize,
        grid_x: usize,
        grid_y: usize,
    ) -> usize {
        self.tile_index(
            acre_x * self.grid_width + grid_x,
            acre_y * self.grid_height + grid_y,
        )
    }

    /// Flat index of a tile addressed by acre number and in-acre raster index
    ///
    /// # Panics
    /// Panics if the resolved absolute coordinates are off the surface.
    #[inline]
    pub fn acre_tile_index(&self, acre: usize, tile: usize) -> usize {
        let (acre_x, acre_y) = self.acre_coordinate(acre);
        self.tile_index_in_acre(acre_x, acre_y, tile % self.grid_width, tile / self.grid_width)
    }

    /// Acre coordinates of a row-major acre number
    pub fn acre_coordinate(&self, acre: usize) -> (usize, usize) {
        (acre % self.acre_width, acre / self.acre_width)
    }
}
