//! Terrain tile store over an acre-subdivided surface
//!
//! Owns the flat tile array and exposes indexed access through all three
//! addressing schemes, byte-exact bulk export/import of the surface or a
//! single acre, masked bulk-set, and the building-coordinate mapping used
//! for placed objects.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::tile::{TerrainError, TerrainTile};
use crate::grid::layout::MapLayout;

/// Terrain surface store: one fixed-size record per tile
///
/// The tile array length is fixed at construction and always equals
/// [`MapLayout::map_tile_count`]; every mutation replaces tile content in
/// place, never inserts or removes records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainMap {
    layout: MapLayout,
    tiles: Vec<TerrainTile>,
}

impl TerrainMap {
    /// Create a store from a caller-supplied tile array
    ///
    /// # Panics
    /// Panics if `tiles.len()` differs from `layout.map_tile_count()`. A
    /// mismatched array cannot describe this surface at all, so the check
    /// is fatal rather than a recoverable error.
    pub fn new(layout: MapLayout, tiles: Vec<TerrainTile>) -> Self {
        assert_eq!(
            layout.map_tile_count(),
            tiles.len(),
            "tile array length does not match the surface"
        );
        debug!(tiles = tiles.len(), "created terrain store");
        TerrainMap { layout, tiles }
    }

    /// Layout shared by all addressing schemes
    pub fn layout(&self) -> MapLayout {
        self.layout
    }

    /// All tiles in flat index order
    pub fn tiles(&self) -> &[TerrainTile] {
        &self.tiles
    }

    /// Tile at absolute surface coordinates
    ///
    /// # Panics
    /// Panics if `(x, y)` is off the surface.
    pub fn tile(&self, x: usize, y: usize) -> &TerrainTile {
        &self.tiles[self.layout.tile_index(x, y)]
    }

    /// Mutable tile at absolute surface coordinates
    ///
    /// # Panics
    /// Panics if `(x, y)` is off the surface.
    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut TerrainTile {
        let index = self.layout.tile_index(x, y);
        &mut self.tiles[index]
    }

    /// Tile addressed by acre coordinates plus in-acre offset
    ///
    /// # Panics
    /// Panics if the resolved coordinates are off the surface.
    pub fn tile_in_acre(
        &self,
        acre_x: usize,
        acre_y: usize,
        grid_x: usize,
        grid_y: usize,
    ) -> &TerrainTile {
        &self.tiles[self.layout.tile_index_in_acre(acre_x, acre_y, grid_x, grid_y)]
    }

    /// Mutable tile addressed by acre coordinates plus in-acre offset
    ///
    /// # Panics
    /// Panics if the resolved coordinates are off the surface.
    pub fn tile_in_acre_mut(
        &mut self,
        acre_x: usize,
        acre_y: usize,
        grid_x: usize,
        grid_y: usize,
    ) -> &mut TerrainTile {
        let index = self.layout.tile_index_in_acre(acre_x, acre_y, grid_x, grid_y);
        &mut self.tiles[index]
    }

    /// Tile addressed by acre number and in-acre raster index
    ///
    /// # Panics
    /// Panics if the resolved coordinates are off the surface.
    pub fn acre_tile(&self, acre: usize, tile: usize) -> &TerrainTile {
        &self.tiles[self.layout.acre_tile_index(acre, tile)]
    }

    /// Mutable tile addressed by acre number and in-acre raster index
    ///
    /// # Panics
    /// Panics if the resolved coordinates are off the surface.
    pub fn acre_tile_mut(&mut self, acre: usize, tile: usize) -> &mut TerrainTile {
        let index = self.layout.acre_tile_index(acre, tile);
        &mut self.tiles[index]
    }

    /// Tile content at a flat index
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> TerrainTile {
        self.tiles[index]
    }

    /// Replace the tile content at a flat index with a copy of `tile`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, tile: TerrainTile) {
        self.tiles[index].copy_from(&tile);
    }

    /// Serialize every tile in flat index order
    ///
    /// Output is `map_tile_count * TerrainTile::SIZE` bytes; tile `i`
    /// occupies bytes `[i * SIZE, (i + 1) * SIZE)`.
    pub fn dump_all(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tiles.len() * TerrainTile::SIZE);
        for tile in &self.tiles {
            out.extend_from_slice(tile.as_bytes());
        }
        out
    }

    /// Serialize one acre's tiles in acre raster order
    ///
    /// Output is `acre_tile_count * TerrainTile::SIZE` bytes.
    ///
    /// # Panics
    /// Panics if `acre` is outside the surface.
    pub fn dump_acre(&self, acre: usize) -> Vec<u8> {
        assert!(
            acre < self.layout.acre_count(),
            "acre {acre} outside surface of {} acres",
            self.layout.acre_count()
        );
        let count = self.layout.acre_tile_count();
        let mut out = Vec::with_capacity(count * TerrainTile::SIZE);
        for tile in 0..count {
            out.extend_from_slice(self.acre_tile(acre, tile).as_bytes());
        }
        out
    }

    /// Copy a full-surface byte dump into the store, tile by tile
    ///
    /// Existing records are overwritten in place, so any index already held
    /// by the caller observes the imported content.
    ///
    /// # Errors
    /// Returns [`TerrainError::BufferSize`] if `data` is not exactly
    /// `map_tile_count * TerrainTile::SIZE` bytes. No tile is modified on
    /// failure.
    pub fn import_all(&mut self, data: &[u8]) -> Result<(), TerrainError> {
        let expected = self.tiles.len() * TerrainTile::SIZE;
        if data.len() != expected {
            return Err(TerrainError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let decoded = TerrainTile::decode_array(data)?;
        for (slot, record) in self.tiles.iter_mut().zip(&decoded) {
            slot.copy_from(record);
        }
        debug!(bytes = data.len(), "imported full surface");
        Ok(())
    }

    /// Copy a single-acre byte dump into that acre's tiles
    ///
    /// # Errors
    /// Returns [`TerrainError::AcreOutOfRange`] if `acre` does not exist,
    /// or [`TerrainError::BufferSize`] if `data` is not exactly
    /// `acre_tile_count * TerrainTile::SIZE` bytes. No tile is modified on
    /// failure.
    pub fn import_acre(&mut self, acre: usize, data: &[u8]) -> Result<(), TerrainError> {
        let acre_count = self.layout.acre_count();
        if acre >= acre_count {
            return Err(TerrainError::AcreOutOfRange { acre, acre_count });
        }

        let expected = self.layout.acre_tile_count() * TerrainTile::SIZE;
        if data.len() != expected {
            return Err(TerrainError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let decoded = TerrainTile::decode_array(data)?;
        for (tile, record) in decoded.iter().enumerate() {
            self.acre_tile_mut(acre, tile).copy_from(record);
        }
        debug!(acre, bytes = data.len(), "imported acre");
        Ok(())
    }

    /// Overwrite every tile's content with a copy of `tile`
    ///
    /// With `interior_only`, the outermost one-acre-wide ring is left
    /// untouched: only `x` in `[grid_width, map_width - grid_width)` and
    /// `y` in `[grid_height, map_height - grid_height)` are written. No
    /// placeable content exists in that border region.
    pub fn set_all(&mut self, tile: &TerrainTile, interior_only: bool) {
        if interior_only {
            // skip the outermost ring of acres
            let x_min = self.layout.grid_width();
            let y_min = self.layout.grid_height();
            let x_max = self.layout.map_width() - self.layout.grid_width();
            let y_max = self.layout.map_height() - self.layout.grid_height();
            for x in x_min..x_max {
                for y in y_min..y_max {
                    self.tile_mut(x, y).copy_from(tile);
                }
            }
        } else {
            for slot in &mut self.tiles {
                slot.copy_from(tile);
            }
        }
    }

    /// Map a placed object's fine-grained (half-tile) coordinates into the
    /// rendering space at `scale` units per tile
    ///
    /// Terrain exists in the top row and left column of acres, but nothing
    /// placeable does, so both axes shift up-left by one full acre before
    /// scaling. Truncation toward zero matches the integer-coordinate
    /// contract of the rendering space.
    pub fn building_coordinate(&self, bx: u16, by: u16, scale: i32) -> (i32, i32) {
        let x = ((f32::from(bx) / 2.0 - self.layout.grid_width() as f32) * scale as f32) as i32;
        let y = ((f32::from(by) / 2.0 - self.layout.grid_height() as f32) * scale as f32) as i32;
        (x, y)
    }

    /// Building coordinates relative to the acre whose origin sits at tile
    /// column `top_x`, row `top_y`, plus whether they land inside that acre
    pub fn building_relative_coordinate(
        &self,
        top_x: i32,
        top_y: i32,
        acre_scale: i32,
        bx: u16,
        by: u16,
    ) -> (i32, i32, bool) {
        let (x, y) = self.building_coordinate(bx, by, acre_scale);
        let rel_x = x - top_x * acre_scale;
        let rel_y = y - top_y * acre_scale;
        (rel_x, rel_y, self.is_within_acre(acre_scale, rel_x, rel_y))
    }

    // Negative relatives wrap past the bound when cast, so one unsigned
    // compare per axis covers both ends of the range.
    fn is_within_acre(&self, acre_scale: i32, rel_x: i32, rel_y: i32) -> bool {
        let extent_x = self.layout.grid_width() as i32 * acre_scale;
        let extent_y = self.layout.grid_height() as i32 * acre_scale;
        (rel_x as u32) < (extent_x as u32) && (rel_y as u32) < (extent_y as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn layout_6x6() -> MapLayout {
        MapLayout::new(16, 16, 6, 6)
    }

    fn zeroed_map(layout: MapLayout) -> TerrainMap {
        TerrainMap::new(layout, vec![TerrainTile::default(); layout.map_tile_count()])
    }

    fn random_map(layout: MapLayout) -> TerrainMap {
        let mut rng = rand::rng();
        let tiles = (0..layout.map_tile_count())
            .map(|_| {
                let mut bytes = [0u8; TerrainTile::SIZE];
                rng.fill(&mut bytes[..]);
                TerrainTile::from_bytes(bytes)
            })
            .collect();
        TerrainMap::new(layout, tiles)
    }

    fn marker_tile(value: u8) -> TerrainTile {
        TerrainTile::from_bytes([value; TerrainTile::SIZE])
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_construction_rejects_wrong_length() {
        let layout = layout_6x6();
        let _ = TerrainMap::new(layout, vec![TerrainTile::default(); 100]);
    }

    #[test]
    fn test_accessors_resolve_to_the_same_record() {
        let mut map = zeroed_map(layout_6x6());

        map.tile_mut(16, 16).copy_from(&marker_tile(0x5A));

        assert_eq!(map.tile(16, 16), &marker_tile(0x5A));
        assert_eq!(map.tile_in_acre(1, 1, 0, 0), &marker_tile(0x5A));
        assert_eq!(map.acre_tile(7, 0), &marker_tile(0x5A));
        assert_eq!(map.get(map.layout().tile_index(16, 16)), marker_tile(0x5A));
    }

    #[test]
    fn test_set_copies_content_by_value() {
        let mut map = zeroed_map(layout_6x6());
        let tile = marker_tile(0x42);

        map.set(3, tile);
        assert_eq!(map.get(3), tile);

        // The store keeps its own copy of the content
        map.set(3, marker_tile(0x01));
        assert_eq!(tile, marker_tile(0x42));
    }

    #[test]
    fn test_dump_all_length_and_order() {
        let map = random_map(layout_6x6());
        let dump = map.dump_all();

        assert_eq!(dump.len(), map.layout().map_tile_count() * TerrainTile::SIZE);
        for (i, tile) in map.tiles().iter().enumerate() {
            assert_eq!(
                &dump[i * TerrainTile::SIZE..(i + 1) * TerrainTile::SIZE],
                tile.as_bytes()
            );
        }
    }

    #[test]
    fn test_dump_acre_length_and_order() {
        let map = random_map(layout_6x6());

        for acre in 0..map.layout().acre_count() {
            let dump = map.dump_acre(acre);
            assert_eq!(
                dump.len(),
                map.layout().acre_tile_count() * TerrainTile::SIZE
            );
            for tile in 0..map.layout().acre_tile_count() {
                assert_eq!(
                    &dump[tile * TerrainTile::SIZE..(tile + 1) * TerrainTile::SIZE],
                    map.acre_tile(acre, tile).as_bytes()
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside surface")]
    fn test_dump_acre_out_of_range_panics() {
        let map = zeroed_map(layout_6x6());
        let _ = map.dump_acre(36);
    }

    #[test]
    fn test_import_all_roundtrip() {
        let mut map = random_map(layout_6x6());
        let before = map.clone();

        // Dump followed by import is the identity transform
        let dump = map.dump_all();
        map.import_all(&dump).unwrap();
        assert_eq!(map, before);

        // And the dump restores a store holding different content
        let mut other = zeroed_map(layout_6x6());
        other.import_all(&dump).unwrap();
        assert_eq!(other.tiles(), before.tiles());
    }

    #[test]
    fn test_import_acre_touches_only_that_acre() {
        let source = random_map(layout_6x6());
        let dump = source.dump_acre(7);

        let mut map = zeroed_map(layout_6x6());
        map.import_acre(7, &dump).unwrap();

        for tile in 0..map.layout().acre_tile_count() {
            assert_eq!(map.acre_tile(7, tile), source.acre_tile(7, tile));
        }
        for acre in (0..map.layout().acre_count()).filter(|&a| a != 7) {
            for tile in 0..map.layout().acre_tile_count() {
                assert_eq!(map.acre_tile(acre, tile), &TerrainTile::default());
            }
        }
    }

    #[test]
    fn test_import_all_rejects_wrong_length() {
        let mut map = random_map(layout_6x6());
        let before = map.clone();
        let expected = map.layout().map_tile_count() * TerrainTile::SIZE;

        let err = map.import_all(&vec![0u8; expected - 1]).unwrap_err();
        assert_eq!(
            err,
            TerrainError::BufferSize {
                expected,
                actual: expected - 1
            }
        );
        // Failed imports never partially apply
        assert_eq!(map, before);
    }

    #[test]
    fn test_import_acre_rejects_wrong_length() {
        let mut map = random_map(layout_6x6());
        let before = map.clone();
        let expected = map.layout().acre_tile_count() * TerrainTile::SIZE;

        let err = map.import_acre(0, &vec![0u8; expected + 7]).unwrap_err();
        assert_eq!(
            err,
            TerrainError::BufferSize {
                expected,
                actual: expected + 7
            }
        );
        assert_eq!(map, before);
    }

    #[test]
    fn test_import_acre_rejects_missing_acre() {
        let mut map = zeroed_map(layout_6x6());
        let expected = map.layout().acre_tile_count() * TerrainTile::SIZE;

        let err = map.import_acre(40, &vec![0u8; expected]).unwrap_err();
        assert_eq!(
            err,
            TerrainError::AcreOutOfRange {
                acre: 40,
                acre_count: 36
            }
        );
    }

    #[test]
    fn test_set_all_overwrites_everything() {
        let mut map = random_map(layout_6x6());
        let marker = marker_tile(0x7F);

        map.set_all(&marker, false);
        assert!(map.tiles().iter().all(|t| t == &marker));
    }

    #[test]
    fn test_set_all_interior_preserves_border_ring() {
        let mut map = zeroed_map(layout_6x6());
        let marker = marker_tile(0x7F);
        let layout = map.layout();

        map.set_all(&marker, true);

        for x in 0..layout.map_width() {
            for y in 0..layout.map_height() {
                let interior = x >= layout.grid_width()
                    && x < layout.map_width() - layout.grid_width()
                    && y >= layout.grid_height()
                    && y < layout.map_height() - layout.grid_height();
                if interior {
                    assert_eq!(map.tile(x, y), &marker, "interior tile ({x}, {y})");
                } else {
                    assert_eq!(
                        map.tile(x, y),
                        &TerrainTile::default(),
                        "border tile ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_building_coordinate_shift_and_scale() {
        let map = zeroed_map(layout_6x6());

        // (64 / 2 - 16) * 8 on both axes
        assert_eq!(map.building_coordinate(64, 64, 8), (128, 128));
        // The acre shift pushes the surface origin negative
        assert_eq!(map.building_coordinate(0, 0, 8), (-128, -128));
    }

    #[test]
    fn test_building_coordinate_truncates_toward_zero() {
        let map = zeroed_map(layout_6x6());

        // 31 / 2 - 16 = -0.5 and 33 / 2 - 16 = 0.5 both truncate to 0
        assert_eq!(map.building_coordinate(31, 33, 1), (0, 0));
    }

    #[test]
    fn test_building_relative_coordinate_within_acre() {
        let map = zeroed_map(layout_6x6());

        // (40 / 2 - 16) * 4 = 16, relative to an origin at tile (0, 0)
        let (rel_x, rel_y, within) = map.building_relative_coordinate(0, 0, 4, 40, 40);
        assert_eq!((rel_x, rel_y), (16, 16));
        assert!(within);

        // One acre spans grid_width * acre_scale = 64 scaled units
        let (_, _, within) = map.building_relative_coordinate(0, 0, 4, 160, 40);
        assert!(!within);

        // Negative relatives report out-of-range through the unsigned check
        let (rel_x, _, within) = map.building_relative_coordinate(16, 0, 4, 40, 40);
        assert_eq!(rel_x, -48);
        assert!(!within);
    }

    #[test]
    fn test_serde_roundtrip() {
        let map = random_map(MapLayout::new(4, 4, 2, 2));
        let json = serde_json::to_string(&map).unwrap();
        let back: TerrainMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
