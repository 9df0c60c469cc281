use crate::common::DetectionResult;

/// What duplicate suppression needs to know about an item.
pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
}

impl Nms for DetectionResult {
    /// Computes the intersection over union (IoU) between this detection's box and another.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.intersection_over_union(&other.bbox)
    }

    /// Returns the confidence score of the detection.
    fn confidence(&self) -> f32 {
        self.confidence
    }
}
