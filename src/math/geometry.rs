//! Polar ellipse geometry used to clip region corners

use num_traits::Float;

/// Angle of the offset `(dx, dy)` folded into the first quadrant
///
/// Equivalent to `atan(|dy| / |dx|)`, including `π/2` on the vertical axis.
pub fn polar_angle<T: Float>(dx: T, dy: T) -> T {
    dy.abs().atan2(dx.abs())
}

/// Distance from the center to an ellipse with semi-axes `a` and `b` along angle `theta`
///
/// `r(θ) = a·b / sqrt(a²·sin²θ + b²·cos²θ)`. Degenerate ellipses with both
/// semi-axes zero yield NaN.
pub fn ellipse_radius<T: Float>(a: T, b: T, theta: T) -> T {
    let (sin, cos) = theta.sin_cos();
    (a * b) / (a * a * sin * sin + b * b * cos * cos).sqrt()
}

/// Straight-line length of the offset `(dx, dy)`
pub fn euclidean_distance<T: Float>(dx: T, dy: T) -> T {
    dx.hypot(dy)
}

/// Whether the offset `(dx, dy)` lies on or beyond the ellipse boundary
///
/// The center itself is never outside, and neither is any point of a
/// degenerate ellipse whose radius is undefined.
pub fn outside_ellipse<T: Float>(dx: T, dy: T, a: T, b: T) -> bool {
    if dx.is_zero() && dy.is_zero() {
        return false;
    }
    let radius = ellipse_radius(a, b, polar_angle(dx, dy));
    !radius.is_nan() && euclidean_distance(dx, dy) >= radius
}
