use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::data::LabelThreshold;

pub const DEFAULT_MIN_AREA: f32 = 0.001;
pub const DEFAULT_MAX_AREA: f32 = 1.0;
pub const DEFAULT_MIN_ASPECT_RATIO: f32 = 0.1;
pub const DEFAULT_MAX_ASPECT_RATIO: f32 = 10.0;
pub const DEFAULT_DUPLICATE_IOU_THRESHOLD: f32 = 0.5;

const APP_DIR: &str = "lab_detect";
const CONFIG_FILE_NAME: &str = "filter_config.json";

/// `<config_dir>/lab_detect/filter_config.json`, e.g. `~/.config/lab_detect/filter_config.json`.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!("Unsupported operating system. Supported OS: Linux, MacOS, Windows.")
    })?;
    path.push(APP_DIR);
    path.push(CONFIG_FILE_NAME);
    Ok(path)
}

/// Settings for [`crate::detection_processing::process_detections`].
///
/// Every field is optional in the JSON form; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_area: f32,
    pub max_area: f32,
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    pub duplicate_iou_threshold: f32,
    /// Sort by descending confidence before suppression, so the strongest
    /// detection of an overlapping group survives.
    pub sort_by_confidence: bool,
    /// Keep at most this many detections (after sorting, before the pairwise pass).
    pub max_detections: Option<usize>,
    pub label_thresholds: Vec<LabelThreshold>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_AREA,
            max_area: DEFAULT_MAX_AREA,
            min_aspect_ratio: DEFAULT_MIN_ASPECT_RATIO,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            duplicate_iou_threshold: DEFAULT_DUPLICATE_IOU_THRESHOLD,
            sort_by_confidence: false,
            max_detections: None,
            label_thresholds: Vec::new(),
        }
    }
}

impl FilterConfig {
    pub fn with_area_range(mut self, min_area: f32, max_area: f32) -> Self {
        self.min_area = min_area;
        self.max_area = max_area;
        self
    }

    pub fn with_aspect_ratio_range(mut self, min_ratio: f32, max_ratio: f32) -> Self {
        self.min_aspect_ratio = min_ratio;
        self.max_aspect_ratio = max_ratio;
        self
    }

    pub fn with_duplicate_iou_threshold(mut self, threshold: f32) -> Self {
        self.duplicate_iou_threshold = threshold;
        self
    }

    pub fn with_sort_by_confidence(mut self, sort: bool) -> Self {
        self.sort_by_confidence = sort;
        self
    }

    pub fn with_max_detections(mut self, max: usize) -> Self {
        self.max_detections = Some(max);
        self
    }

    pub fn with_label_threshold(mut self, threshold: LabelThreshold) -> Self {
        self.label_thresholds.push(threshold);
        self
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse filter config")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config {}", path.display()))?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded filter config from {}:\n{}", path.display(), config);
        Ok(config)
    }

    /// Loads [`default_config_path`], or the defaults when that file does not exist.
    pub fn load_default() -> anyhow::Result<Self> {
        Self::load_or_default(default_config_path()?)
    }

    /// Loads `path`, or returns the defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No filter config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write filter config {}", path.display()))?;
        Ok(())
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area Range: [{}, {}]\n\
        Aspect Ratio Range: [{}, {}]\n\
        Duplicate IoU Threshold: {}\n\
        Sort By Confidence: {}\n\
        Max Detections: {:?}\n\
        Label Thresholds: {}",
               self.min_area, self.max_area,
               self.min_aspect_ratio, self.max_aspect_ratio,
               self.duplicate_iou_threshold, self.sort_by_confidence,
               self.max_detections, self.label_thresholds.len())
    }
}
