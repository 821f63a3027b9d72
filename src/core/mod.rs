mod brush;
mod placement;

pub use brush::BrushStroke;
pub use placement::{PlacementError, check_placement, footprint};
