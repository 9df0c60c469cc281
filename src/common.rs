mod normalized_box;
mod pixel_rect;
mod detection_result;
mod confidence_summary;

pub use normalized_box::*;
pub use pixel_rect::*;
pub use detection_result::*;
pub use confidence_summary::*;
