use bevy::prelude::*;

use super::JourneyError;

/// Shape tension of the route; `0.5` is the classic Catmull-Rom curve.
pub const CURVE_TENSION: f32 = 0.5;

/// Immutable smooth route through a fixed set of control points.
///
/// Non-looping cardinal (Catmull-Rom) spline: control point `i` sits at the
/// parametric fraction `i / (n - 1)`. The first and last segments use
/// mirrored phantom points so the curve starts and ends on its endpoints
/// without extrapolating past them.
#[derive(Clone, Debug, Reflect)]
pub struct PathCurve {
    points: Vec<Vec3>,
    tension: f32,
}

impl PathCurve {
    /// Builds a route through `points`. Fails with fewer than two points.
    pub fn new(points: Vec<Vec3>) -> Result<Self, JourneyError> {
        if points.len() < 2 {
            return Err(JourneyError::TooFewControlPoints {
                count: points.len(),
            });
        }
        Ok(Self {
            points,
            tension: CURVE_TENSION,
        })
    }

    /// Control points in route order.
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Final control point.
    pub fn end(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Position on the curve; `t` is clamped to `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (segment, local) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_points(segment);
        let (v0, v1) = self.velocities(p0, p1, p2, p3);

        let t2 = local * local;
        let t3 = t2 * local;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + local;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        p1 * h00 + v0 * h10 + p2 * h01 + v1 * h11
    }

    /// Unit direction of travel at `t`; `t` is clamped to `[0, 1]`.
    ///
    /// Falls back to the chord of the containing segment when the derivative
    /// vanishes (coincident control points).
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (segment, local) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_points(segment);
        let (v0, v1) = self.velocities(p0, p1, p2, p3);

        let t2 = local * local;
        let d00 = 6.0 * t2 - 6.0 * local;
        let d10 = 3.0 * t2 - 4.0 * local + 1.0;
        let d01 = -6.0 * t2 + 6.0 * local;
        let d11 = 3.0 * t2 - 2.0 * local;

        let derivative = p1 * d00 + v0 * d10 + p2 * d01 + v1 * d11;
        derivative
            .try_normalize()
            .or_else(|| (p2 - p1).try_normalize())
            .unwrap_or(Vec3::NEG_Z)
    }

    /// `count + 1` evenly spaced (in `t`) positions from start to end.
    ///
    /// Used by the trail mesh, which extrudes a cross-section through them.
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        let count = count.max(1);
        (0..=count)
            .map(|i| self.point_at(i as f32 / count as f32))
            .collect()
    }

    /// Splits a clamped `t` into `(segment index, local parameter)`.
    fn locate(&self, t: f32) -> (usize, f32) {
        let last_segment = self.points.len() - 2;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (self.points.len() - 1) as f32;
        let segment = (scaled.floor() as usize).min(last_segment);
        (segment, scaled - segment as f32)
    }

    fn segment_points(&self, segment: usize) -> [Vec3; 4] {
        let n = self.points.len();
        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            p2 * 2.0 - p1
        };
        [p0, p1, p2, p3]
    }

    fn velocities(&self, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> (Vec3, Vec3) {
        ((p2 - p0) * self.tension, (p3 - p1) * self.tension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_point_route() -> PathCurve {
        PathCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -250.0),
            Vec3::new(100.0, 0.0, -500.0),
        ])
        .unwrap()
    }

    fn winding_route() -> PathCurve {
        PathCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -250.0),
            Vec3::new(100.0, 0.0, -500.0),
            Vec3::new(-100.0, 0.0, -750.0),
            Vec3::new(100.0, 0.0, -1000.0),
            Vec3::new(0.0, 0.0, -1250.0),
        ])
        .unwrap()
    }

    // ── construction ────────────────────────────────────────────────

    #[test]
    fn rejects_fewer_than_two_points() {
        assert_eq!(
            PathCurve::new(vec![]).unwrap_err(),
            JourneyError::TooFewControlPoints { count: 0 }
        );
        assert_eq!(
            PathCurve::new(vec![Vec3::ONE]).unwrap_err(),
            JourneyError::TooFewControlPoints { count: 1 }
        );
    }

    #[test]
    fn two_points_form_a_straight_line() {
        let curve = PathCurve::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)]).unwrap();
        let mid = curve.point_at(0.5);
        assert!((mid - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
        assert!((curve.tangent_at(0.3) - Vec3::NEG_Z).length() < 1e-5);
    }

    // ── interpolation ───────────────────────────────────────────────

    #[test]
    fn passes_through_every_control_point() {
        let curve = winding_route();
        let n = curve.control_points().len();
        for (i, &p) in curve.control_points().iter().enumerate() {
            let t = i as f32 / (n - 1) as f32;
            let on_curve = curve.point_at(t);
            assert!(
                (on_curve - p).length() < 1e-3,
                "control point {i}: expected {p}, got {on_curve}"
            );
        }
    }

    #[test]
    fn position_is_continuous() {
        let curve = winding_route();
        let steps = 5000;
        let mut prev = curve.point_at(0.0);
        for i in 1..=steps {
            let p = curve.point_at(i as f32 / steps as f32);
            // Segments are ~270 units long; a 1/5000 step along 5 segments
            // moves roughly 0.3 units.
            assert!((p - prev).length() < 2.0, "jump at step {i}");
            prev = p;
        }
    }

    #[test]
    fn tangent_is_continuous_across_control_points() {
        let curve = winding_route();
        let n = curve.control_points().len();
        for i in 1..n - 1 {
            let t = i as f32 / (n - 1) as f32;
            let before = curve.tangent_at(t - 1e-4);
            let after = curve.tangent_at(t + 1e-4);
            assert!(before.dot(after) > 0.999, "tangent kink at point {i}");
        }
    }

    #[test]
    fn tangent_is_unit_length() {
        let curve = winding_route();
        for i in 0..=50 {
            let tangent = curve.tangent_at(i as f32 / 50.0);
            assert!((tangent.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn tangent_follows_first_leg() {
        let curve = three_point_route();
        assert!(curve.tangent_at(0.0).z < -0.9);
    }

    // ── clamping ────────────────────────────────────────────────────

    #[test]
    fn parameter_is_clamped_silently() {
        let curve = three_point_route();
        assert_eq!(curve.point_at(-0.5), curve.point_at(0.0));
        assert_eq!(curve.point_at(1.5), curve.point_at(1.0));
        assert_eq!(curve.tangent_at(-3.0), curve.tangent_at(0.0));
        assert_eq!(curve.tangent_at(7.0), curve.tangent_at(1.0));
    }

    #[test]
    fn never_extrapolates_past_endpoints() {
        let curve = three_point_route();
        assert!((curve.point_at(1.0) - curve.end()).length() < 1e-3);
        assert!(curve.point_at(0.0).length() < 1e-3);
    }

    #[test]
    fn nan_parameter_maps_to_start() {
        let curve = three_point_route();
        assert_eq!(curve.point_at(f32::NAN), curve.point_at(0.0));
    }

    // ── sampling ────────────────────────────────────────────────────

    #[test]
    fn sample_covers_both_ends() {
        let curve = three_point_route();
        let samples = curve.sample(1000);
        assert_eq!(samples.len(), 1001);
        assert!(samples[0].length() < 1e-3);
        assert!((samples[1000] - curve.end()).length() < 1e-3);
    }

    #[test]
    fn degenerate_tangent_falls_back_to_chord() {
        let curve = PathCurve::new(vec![Vec3::ZERO, Vec3::ZERO]).unwrap();
        assert_eq!(curve.tangent_at(0.5), Vec3::NEG_Z);
    }
}
