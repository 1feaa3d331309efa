//! Smooth 3D curves through migration waypoints.
//!
//! A [`GlobeCurve`] is a cardinal (Catmull-Rom) spline through the
//! lifted waypoints, paired with an arc-length table so callers can ask
//! for a point either by normalized parameter or by distance along the
//! path. The cardinal tension of 0.5 keeps the curve through sharp
//! turns without overshoot.

use core::cmp::Ordering;

use bevy_math::cubic_splines::{
    CubicCardinalSpline, CubicCurve, CubicGenerator,
};
use bevy_math::Vec3;
use log::warn;
use nonempty::NonEmpty;

/// Arc-length samples taken per spline segment.
const SAMPLES_PER_SEGMENT: usize = 24;

#[derive(Debug, Clone)]
pub struct GlobeCurve {
    curve: CubicCurve<Vec3>,
    /// Distance table in ascending `distance` order.
    samples: NonEmpty<CurveSample>,
    length: f32,
}

#[derive(Debug, Clone, Copy)]
struct CurveSample {
    point: Vec3,
    distance: f32,
}

impl GlobeCurve {
    /// Build a smooth curve through the given 3D points.
    ///
    /// Fewer than 2 points is malformed input: logged, `None`, never a
    /// panic out of a render tick.
    pub fn through_points(points: &[Vec3]) -> Option<Self> {
        if points.len() < 2 {
            warn!(
                "a curve needs at least 2 waypoints, got {}",
                points.len()
            );
            return None;
        }

        let curve = match CubicCardinalSpline::new(0.5, points.to_vec())
            .to_curve()
        {
            Ok(curve) => curve,
            Err(err) => {
                warn!("failed to build path curve: {err}");
                return None;
            }
        };

        let segment_count = curve.segments().len();
        let sample_count = segment_count * SAMPLES_PER_SEGMENT;

        let mut samples = NonEmpty::new(CurveSample {
            point: curve.position(0.0),
            distance: 0.0,
        });
        let mut length = 0.0;

        for i in 1..=sample_count {
            let t = i as f32 / sample_count as f32
                * segment_count as f32;
            let point = curve.position(t);

            length += samples.last().point.distance(point);
            samples.push(CurveSample {
                point,
                distance: length,
            });
        }

        Some(Self {
            curve,
            samples,
            length,
        })
    }

    /// Total arc length of the curve.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Sample the curve at a normalized parameter in `[0, 1]`.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0) * self.segment_count() as f32;
        self.curve.position(t)
    }

    /// Unit tangent at a normalized parameter in `[0, 1]`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0) * self.segment_count() as f32;
        self.curve.velocity(t).normalize_or_zero()
    }

    /// The point at a given distance along the curve, clamped into
    /// `[0, length]`.
    pub fn point_at_distance(&self, distance: f32) -> Vec3 {
        let distance = distance.clamp(0.0, self.length);

        let index = self
            .samples
            .binary_search_by(|sample| {
                if sample.distance > distance {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            // Ordering::Equal is never returned.
            .unwrap_err();

        if index == 0 {
            self.samples.first().point
        } else if index >= self.samples.len() {
            self.samples.last().point
        } else {
            let start = self.samples[index - 1];
            let end = self.samples[index];
            let span = end.distance - start.distance;

            if span <= f32::EPSILON {
                start.point
            } else {
                let t = (distance - start.distance) / span;
                start.point.lerp(end.point, t)
            }
        }
    }

    /// Evenly arc-length-spaced points along the whole curve, for
    /// building render geometry.
    pub fn even_points(&self, count: usize) -> Vec<Vec3> {
        match count {
            0 => Vec::new(),
            1 => vec![self.samples.first().point],
            _ => (0..count)
                .map(|i| {
                    let d = self.length * i as f32
                        / (count - 1) as f32;
                    self.point_at_distance(d)
                })
                .collect(),
        }
    }

    #[inline]
    fn segment_count(&self) -> usize {
        self.curve.segments().len()
    }
}
