mod filter_config;
mod label_threshold;

pub use filter_config::{
    default_config_path, FilterConfig, DEFAULT_DUPLICATE_IOU_THRESHOLD, DEFAULT_MAX_AREA,
    DEFAULT_MAX_ASPECT_RATIO, DEFAULT_MIN_AREA, DEFAULT_MIN_ASPECT_RATIO,
};
pub use label_threshold::LabelThreshold;
