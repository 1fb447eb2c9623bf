//! Fixed-size terrain tile records
//!
//! A tile is the smallest addressable unit of terrain, stored as an opaque
//! fixed-size binary payload. Interpreting the fields inside a tile is the
//! job of a higher-level codec; this module only guarantees the byte layout.

use serde::{Deserialize, Serialize};

/// One terrain cell, stored as an opaque fixed-size binary payload
///
/// Tiles are plain values: copying one never aliases the original, and a
/// store hands out content copies or borrows scoped to its own lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TerrainTile {
    bytes: [u8; Self::SIZE],
}

impl TerrainTile {
    /// Encoded size of one tile record in bytes
    pub const SIZE: usize = 14;

    /// Create a tile from its exact binary encoding
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        TerrainTile { bytes }
    }

    /// Borrow the tile's binary encoding
    #[inline]
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.bytes
    }

    /// Encode the tile into an owned byte array
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.bytes
    }

    /// Overwrite this tile's content with another tile's content
    pub fn copy_from(&mut self, other: &TerrainTile) {
        self.bytes = other.bytes;
    }

    /// Decode a byte sequence into an ordered run of tile records
    ///
    /// # Errors
    /// Returns [`TerrainError::UnalignedBuffer`] if `data` is not a whole
    /// number of records. A short or oversized buffer is never truncated or
    /// zero-padded.
    pub fn decode_array(data: &[u8]) -> Result<Vec<TerrainTile>, TerrainError> {
        if data.len() % Self::SIZE != 0 {
            return Err(TerrainError::UnalignedBuffer { len: data.len() });
        }

        Ok(data
            .chunks_exact(Self::SIZE)
            .map(|chunk| {
                let mut bytes = [0u8; Self::SIZE];
                bytes.copy_from_slice(chunk);
                TerrainTile { bytes }
            })
            .collect())
    }
}

/// Errors that can occur with bulk tile buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainError {
    /// Byte length is not a whole number of tile records
    UnalignedBuffer {
        /// Length of the offending buffer
        len: usize,
    },
    /// Byte length does not match the exact size of the target region
    BufferSize {
        /// Required length for the target region
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
    /// Acre index outside the surface
    AcreOutOfRange {
        /// The requested acre
        acre: usize,
        /// Number of acres on the surface
        acre_count: usize,
    },
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::UnalignedBuffer { len } => write!(
                f,
                "buffer of {len} bytes is not a whole number of {}-byte tile records",
                TerrainTile::SIZE
            ),
            TerrainError::BufferSize { expected, actual } => {
                write!(f, "expected a {expected}-byte buffer, got {actual} bytes")
            }
            TerrainError::AcreOutOfRange { acre, acre_count } => {
                write!(f, "acre {acre} outside surface of {acre_count} acres")
            }
        }
    }
}

impl std::error::Error for TerrainError {}
