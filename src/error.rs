use thiserror::Error;

/// Errors raised by the strict (non-repairing) geometry entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("non-finite value for `{field}`: {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("`{field}` = {value} is outside the unit frame (limit {limit})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        limit: f32,
    },

    #[error("unsupported rotation of {0} degrees, only multiples of 90 are supported")]
    UnsupportedRotation(i32),
}
