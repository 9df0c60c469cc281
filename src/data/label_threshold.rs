use serde::{Deserialize, Serialize};

/// Minimum confidence a detection of class `label` needs to be kept.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelThreshold {
    pub label: String,
    pub threshold: f32,
}

impl LabelThreshold {
    pub fn new(label: &str, threshold: f32) -> Self {
        Self {
            label: label.to_string(),
            threshold,
        }
    }

    pub fn passes(&self, conf: f32) -> bool {
        conf >= self.threshold
    }

    pub fn matches(&self, class_name: &str) -> bool {
        self.label == class_name
    }
}
