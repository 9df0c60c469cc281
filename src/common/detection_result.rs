use std::fmt;
use serde::{Deserialize, Serialize};
use crate::common::NormalizedBox;

/// A single detector output: a class label, its score and where it was found.
///
/// The confidence is stored as given. Detectors are expected to emit values
/// in `[0, 1]`, see [`DetectionResult::has_valid_confidence`].
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub class_name: String,
    pub confidence: f32,
    pub bbox: NormalizedBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl DetectionResult {
    pub fn new(class_name: &str, confidence: f32, bbox: NormalizedBox) -> Self {
        Self {
            class_name: class_name.to_string(),
            confidence,
            bbox,
            identifier: None,
        }
    }

    /// Sets the box from `(x, y, w, h)`, clamped like [`NormalizedBox::new`].
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = NormalizedBox::new(x, y, w, h);
        self
    }

    /// Sets the box from `(cx, cy, w, h)`.
    pub fn with_cxcy_wh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = NormalizedBox::from_center(cx, cy, w, h);
        self
    }

    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    pub fn get_label(&self) -> &str {
        if self.class_name.is_empty() {
            "Unknown"
        } else {
            self.class_name.as_str()
        }
    }

    pub fn has_valid_confidence(&self) -> bool {
        (0. ..=1.).contains(&self.confidence)
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Detection: Class: {}, BBox: {}, Confidence: {:.2}",
               self.get_label(), self.bbox, self.confidence)?;
        if let Some(id) = &self.identifier {
            write!(f, ", ID: {}", id)?;
        }
        Ok(())
    }
}
