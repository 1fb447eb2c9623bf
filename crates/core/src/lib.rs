//! Acre-based terrain surface management
//!
//! Stores a rectangular surface of fixed-size terrain tile records organized
//! into square sub-regions ("acres"), with three interchangeable addressing
//! schemes (flat index, absolute coordinates, acre-relative coordinates) and
//! byte-exact bulk export/import of the whole surface or a single acre.
//!
//! The tile payload is opaque at this layer: the crate guarantees structural
//! correctness of indices and byte layout, never the meaning of the bytes
//! inside a tile.

// Core types and utilities
pub mod core_types;

// Grid geometry and the terrain store
pub mod grid;

// Re-export core types
pub use core_types::{TerrainError, TerrainTile};

// Re-export grid types
pub use grid::{MapLayout, TerrainMap};
