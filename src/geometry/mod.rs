// Geometry module: pixel-space rectangles plus the pure layout helpers
// used by windows, popups and the screen re-layout pass

pub mod layout;
pub mod types;

pub use types::*;
