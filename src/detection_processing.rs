//! Batch clean-up of detector output.
//!
//! Every pass takes the detections by value and returns the survivors in
//! their original relative order, unless the pass is a sort.
pub mod nms;

use std::time::Instant;
use crate::common::DetectionResult;
use crate::data::{FilterConfig, LabelThreshold};
use crate::detection_processing::nms::Nms;
use crate::utils::trace;

pub use crate::data::{
    DEFAULT_DUPLICATE_IOU_THRESHOLD, DEFAULT_MAX_AREA, DEFAULT_MAX_ASPECT_RATIO,
    DEFAULT_MIN_AREA, DEFAULT_MIN_ASPECT_RATIO,
};

/// Keeps detections whose box area lies in `[min_area, max_area]`.
///
/// The usual bounds are [`DEFAULT_MIN_AREA`] and [`DEFAULT_MAX_AREA`].
pub fn filter_by_area(results: Vec<DetectionResult>, min_area: f32, max_area: f32) -> Vec<DetectionResult> {
    let before = results.len();
    let kept: Vec<DetectionResult> = results
        .into_iter()
        .filter(|r| {
            let area = r.bbox.area();
            area >= min_area && area <= max_area
        })
        .collect();
    log::debug!("filter_by_area [{}, {}]: {} -> {}", min_area, max_area, before, kept.len());
    kept
}

/// Keeps detections whose box aspect ratio lies in `[min_ratio, max_ratio]`.
///
/// Boxes with no height have an aspect ratio of `0` and only pass when
/// `min_ratio <= 0`. The usual bounds are [`DEFAULT_MIN_ASPECT_RATIO`] and
/// [`DEFAULT_MAX_ASPECT_RATIO`].
pub fn filter_by_aspect_ratio(results: Vec<DetectionResult>, min_ratio: f32, max_ratio: f32) -> Vec<DetectionResult> {
    let before = results.len();
    let kept: Vec<DetectionResult> = results
        .into_iter()
        .filter(|r| {
            let ratio = r.bbox.aspect_ratio();
            ratio >= min_ratio && ratio <= max_ratio
        })
        .collect();
    log::debug!("filter_by_aspect_ratio [{}, {}]: {} -> {}", min_ratio, max_ratio, before, kept.len());
    kept
}

pub fn filter_by_confidence(results: Vec<DetectionResult>, min_confidence: f32) -> Vec<DetectionResult> {
    let before = results.len();
    let kept: Vec<DetectionResult> = results
        .into_iter()
        .filter(|r| r.confidence >= min_confidence)
        .collect();
    log::debug!("filter_by_confidence >= {}: {} -> {}", min_confidence, before, kept.len());
    kept
}

/// Applies per-class confidence thresholds.
///
/// A detection is dropped when a threshold exists for its class and its
/// confidence is below it. Classes without a threshold pass through.
pub fn filter_by_labels(results: Vec<DetectionResult>, thresholds: &[LabelThreshold]) -> Vec<DetectionResult> {
    if thresholds.is_empty() {
        return results;
    }
    let before = results.len();
    let kept: Vec<DetectionResult> = results
        .into_iter()
        .filter(|r| {
            thresholds
                .iter()
                .filter(|t| t.matches(&r.class_name))
                .all(|t| t.passes(r.confidence))
        })
        .collect();
    log::debug!("filter_by_labels ({} thresholds): {} -> {}", thresholds.len(), before, kept.len());
    kept
}

/// Greedy, order-dependent duplicate suppression.
///
/// Walks `results` in order and accepts a candidate unless an already
/// accepted item overlaps it with `IoU > threshold`. Earlier items win
/// regardless of confidence; sort first (or use [`non_max_suppression`]) for
/// highest-confidence-wins behaviour. O(n²) in the input size.
pub fn remove_duplicates<T: Nms>(results: Vec<T>, threshold: f32) -> Vec<T> {
    let before = results.len();
    let mut kept: Vec<T> = Vec::with_capacity(before);
    for candidate in results {
        if kept.iter().any(|accepted| accepted.iou(&candidate) > threshold) {
            continue;
        }
        kept.push(candidate);
    }
    log::debug!("remove_duplicates (iou > {}): {} -> {}", threshold, before, kept.len());
    kept
}

/// Stable sort by descending confidence. Ties keep their input order.
pub fn sort_by_confidence<T: Nms>(mut results: Vec<T>) -> Vec<T> {
    results.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
    results
}

/// Confidence-aware suppression: the strongest item of each overlapping
/// group survives.
pub fn non_max_suppression<T: Nms>(results: Vec<T>, threshold: f32) -> Vec<T> {
    remove_duplicates(sort_by_confidence(results), threshold)
}

/// Keeps the first `k` items. Combine with [`sort_by_confidence`] for a top-K.
pub fn top_k<T>(mut results: Vec<T>, k: usize) -> Vec<T> {
    results.truncate(k);
    results
}

/// Runs the full clean-up described by `config`.
///
/// Order: label thresholds, optional confidence sort, optional top-K cap,
/// area filter, aspect-ratio filter, duplicate removal.
pub fn process_detections(results: Vec<DetectionResult>, config: &FilterConfig) -> Vec<DetectionResult> {
    let now = Instant::now();
    let mut elapsed = now.elapsed();

    let out_of_range = results.iter().filter(|r| !r.has_valid_confidence()).count();
    if out_of_range > 0 {
        log::warn!("{} detection(s) have a confidence outside [0, 1]", out_of_range);
    }

    let mut results = filter_by_labels(results, &config.label_thresholds);
    elapsed = trace("FILTER", "labels", now, elapsed);

    if config.sort_by_confidence {
        results = sort_by_confidence(results);
        elapsed = trace("FILTER", "sort", now, elapsed);
    }

    if let Some(max) = config.max_detections {
        results = top_k(results, max);
    }

    results = filter_by_area(results, config.min_area, config.max_area);
    results = filter_by_aspect_ratio(results, config.min_aspect_ratio, config.max_aspect_ratio);
    elapsed = trace("FILTER", "geometry", now, elapsed);

    results = remove_duplicates(results, config.duplicate_iou_threshold);
    trace("FILTER", "duplicates", now, elapsed);

    results
}
