use std::fmt;
use serde::{Deserialize, Serialize};
use crate::GeometryError;

/// Per-field tolerance used by `PartialEq`. Coordinates that went through a
/// pixel round-trip rarely come back bit-identical.
pub const EQUALITY_TOLERANCE: f32 = 1e-3;

/// Slack accepted by [`NormalizedBox::try_new`] on the unit frame edges.
const STRICT_SLACK: f32 = 1e-6;

/// An axis-aligned rectangle in normalized image coordinates.
///
/// All four fields live in `[0, 1]` and the box never extends past the unit
/// frame (`x + width <= 1`, `y + height <= 1`). Every constructor and
/// transform enforces this by clamping, so a `NormalizedBox` is always valid.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "RawNormalizedBox")]
pub struct NormalizedBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawNormalizedBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<RawNormalizedBox> for NormalizedBox {
    fn from(raw: RawNormalizedBox) -> Self {
        NormalizedBox::new(raw.x, raw.y, raw.width, raw.height)
    }
}

fn clamp_to(value: f32, upper: f32) -> f32 {
    if value.is_nan() {
        0.
    } else {
        value.clamp(0., upper)
    }
}

fn check_finite(field: &'static str, value: f32) -> crate::Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { field, value })
    }
}

fn check_range(field: &'static str, value: f32, limit: f32) -> crate::Result<()> {
    if value < -STRICT_SLACK || value > limit + STRICT_SLACK {
        return Err(GeometryError::OutOfRange { field, value, limit });
    }
    Ok(())
}

impl NormalizedBox {
    /// Builds a box, repairing out-of-range input by clamping.
    ///
    /// The origin is clamped first and the size is then limited by the
    /// *clamped* origin, so `x = 1.5` yields `x = 1, width = 0` whatever
    /// width was requested. NaN components become `0`.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let x = clamp_to(x, 1.);
        let y = clamp_to(y, 1.);
        Self {
            x,
            y,
            width: clamp_to(width, 1. - x),
            height: clamp_to(height, 1. - y),
        }
    }

    /// Fail-fast counterpart of [`NormalizedBox::new`].
    ///
    /// Returns an error instead of clamping when any component is not finite
    /// or the box does not fit inside the unit frame.
    pub fn try_new(x: f32, y: f32, width: f32, height: f32) -> crate::Result<Self> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        check_finite("width", width)?;
        check_finite("height", height)?;

        check_range("x", x, 1.)?;
        check_range("y", y, 1.)?;
        check_range("width", width, 1. - x)?;
        check_range("height", height, 1. - y)?;

        // absorb the slack
        Ok(Self::new(x, y, width, height))
    }

    /// Builds a box from its `(x1, y1)` and `(x2, y2)` corners.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Builds a box from its center and size.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2., cy - height / 2., width, height)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Right edge, `x + width`.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge, `y + height`.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// `width / height`, or exactly `0` for a box with no height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0. {
            0.
        } else {
            self.width / self.height
        }
    }

    /// Returns the box as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.right(), self.bottom())
    }

    /// Returns the box as `(x, y, w, h)`.
    pub fn xy1_wh(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Returns the box as `(cx, cy, w, h)`.
    pub fn cxy_wh(&self) -> (f32, f32, f32, f32) {
        (self.center_x(), self.center_y(), self.width, self.height)
    }

    /// Area shared by both boxes, `0` when they do not overlap.
    ///
    /// Never larger than either box's [`area`](Self::area): the overlap size
    /// is capped by both stored sizes, as `right - x` can round above `width`.
    pub fn intersection_area(&self, other: &NormalizedBox) -> f32 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return 0.;
        }
        let width = (right - left).min(self.width).min(other.width);
        let height = (bottom - top).min(self.height).min(other.height);
        width * height
    }

    pub fn union_area(&self, other: &NormalizedBox) -> f32 {
        self.area() + other.area() - self.intersection_area(other)
    }

    /// Intersection over union, in `[0, 1]`.
    ///
    /// Disjoint or edge-touching boxes give `0`, as do two coincident
    /// zero-area boxes (no division by a zero union).
    pub fn intersection_over_union(&self, other: &NormalizedBox) -> f32 {
        let intersection = self.intersection_area(other);
        if intersection <= 0. {
            return 0.;
        }
        let union = self.area() + other.area() - intersection;
        if union <= 0. {
            return 0.;
        }
        intersection / union
    }

    /// Whether `inner` lies entirely within this box. Shared edges count.
    pub fn contains(&self, inner: &NormalizedBox) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }

    /// Whether the boxes overlap or touch.
    pub fn intersects(&self, other: &NormalizedBox) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }

    /// Euclidean distance between the two box centers.
    pub fn distance_to_center(&self, other: &NormalizedBox) -> f32 {
        let dx = self.center_x() - other.center_x();
        let dy = self.center_y() - other.center_y();
        (dx * dx + dy * dy).sqrt()
    }

    /// Scales the box by `factor` around its own center.
    ///
    /// A factor below `1.0` shrinks the box. The shifted origin is held at
    /// `>= 0` before the usual clamp, so growth near the top-left corner
    /// extends towards the bottom-right instead.
    pub fn expanded(&self, factor: f32) -> Self {
        let width = self.width * factor;
        let height = self.height * factor;
        let x = (self.x - (width - self.width) / 2.).max(0.);
        let y = (self.y - (height - self.height) / 2.).max(0.);
        Self::new(x, y, width, height)
    }

    /// Scales the box by `factor` (expected in `(0, 1]`) keeping it centered.
    ///
    /// `factor = 0` collapses the box to a point at its center.
    pub fn shrunk(&self, factor: f32) -> Self {
        let width = self.width * factor;
        let height = self.height * factor;
        Self::new(
            self.x + (self.width - width) / 2.,
            self.y + (self.height - height) / 2.,
            width,
            height,
        )
    }

    /// Moves the origin by `(dx, dy)`. Parts pushed off-frame are clipped.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Re-applies the constructor clamp. Idempotent.
    pub fn clipped(&self) -> Self {
        Self::new(self.x, self.y, self.width, self.height)
    }

    /// Rotates the unit frame (not the box in place) clockwise by `degrees`.
    ///
    /// `degrees` is a whole number of degrees, so fractional angles such as
    /// `90.5` cannot be passed.
    ///
    /// The angle is normalized into `[0, 360)`. Only multiples of 90 move the
    /// box; any other angle returns it unchanged. Use
    /// [`NormalizedBox::try_rotated`] to reject those angles instead.
    pub fn rotated(&self, degrees: i32) -> Self {
        let (x, y, w, h) = self.xy1_wh();
        match degrees.rem_euclid(360) {
            90 => Self::new(1. - y - h, x, h, w),
            180 => Self::new(1. - x - w, 1. - y - h, w, h),
            270 => Self::new(y, 1. - x - w, h, w),
            _ => *self,
        }
    }

    pub fn try_rotated(&self, degrees: i32) -> crate::Result<Self> {
        if degrees.rem_euclid(90) != 0 {
            return Err(GeometryError::UnsupportedRotation(degrees));
        }
        Ok(self.rotated(degrees))
    }
}

impl PartialEq for NormalizedBox {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EQUALITY_TOLERANCE
            && (self.y - other.y).abs() < EQUALITY_TOLERANCE
            && (self.width - other.width).abs() < EQUALITY_TOLERANCE
            && (self.height - other.height).abs() < EQUALITY_TOLERANCE
    }
}

impl fmt::Display for NormalizedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {:.3}, y: {:.3}, w: {:.3}, h: {:.3})",
            self.x, self.y, self.width, self.height
        )
    }
}
