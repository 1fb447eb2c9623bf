//! Grid geometry and the terrain tile store

pub mod layout;
pub mod terrain;

// Re-export main types
pub use layout::*;
pub use terrain::*;
