//! Geographic coordinate utilities.
//!
//! Everything that turns a latitude/longitude pair into a 3D point goes
//! through [`to_cartesian`] so that paths, markers and the camera all
//! agree on the same sphere mapping.

use core::f32::consts::PI;

use bevy_math::Vec3;
use log::warn;

/// A geographic location on (or above) the reference sphere.
///
/// Stored in degrees; `alt` is the height above the sphere surface in
/// world units. Locations are always kept geographic and converted to
/// 3D on demand, so a change of globe radius never leaves stale points
/// behind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt: f32,
}

impl GeoPoint {
    pub fn new(lat: f32, lon: f32) -> Self {
        Self {
            lat,
            lon,
            alt: 0.0,
        }
    }

    #[inline]
    pub fn with_alt(mut self, alt: f32) -> Self {
        self.alt = alt;
        self
    }

    /// Convert to a 3D point, honoring the altitude above the sphere.
    #[inline]
    pub fn to_cartesian(self, radius: f32) -> Vec3 {
        to_cartesian(self.lat, self.lon, radius + self.alt)
    }
}

/// Map a latitude/longitude pair onto a sphere of the given radius.
///
/// The axis convention (y up, longitude winding through negative x)
/// must match everywhere a geographic point becomes a 3D point, or
/// paths and cameras will visibly misalign.
pub fn to_cartesian(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat) * PI / 180.0;
    let theta = (lon + 180.0) * PI / 180.0;

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Clamp a latitude into the poles-safe range.
#[inline]
pub fn clamp_lat(lat: f32) -> f32 {
    lat.clamp(-90.0, 90.0)
}

/// Wrap a longitude into (-180, 180].
pub fn wrap_lon(mut lon: f32) -> f32 {
    while lon <= -180.0 {
        lon += 360.0;
    }
    while lon > 180.0 {
        lon -= 360.0;
    }
    lon
}

/// Total length of a polyline as the sum of consecutive segment
/// lengths.
pub fn path_length(points: &[Vec3]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}

/// Walk the polyline and return the point at the given distance from
/// its start.
///
/// Distances past the end clamp to the last point. Fewer than 2 points
/// is malformed input and yields `None` with a warning; it never
/// panics out of a render tick.
pub fn point_at_distance(points: &[Vec3], distance: f32) -> Option<Vec3> {
    if points.len() < 2 {
        warn!(
            "point_at_distance needs at least 2 points, got {}",
            points.len()
        );
        return None;
    }

    if distance <= 0.0 {
        return Some(points[0]);
    }

    let mut travelled = 0.0;

    for pair in points.windows(2) {
        let segment = pair[0].distance(pair[1]);

        if segment > 0.0 && travelled + segment >= distance {
            let t = (distance - travelled) / segment;
            return Some(pair[0].lerp(pair[1], t));
        }

        travelled += segment;
    }

    // Past the end of the path.
    Some(points[points.len() - 1])
}

/// Resample a polyline into `count` evenly arc-length-spaced points.
///
/// Returns an empty vector (with a warning) for malformed input.
pub fn resample(points: &[Vec3], count: usize) -> Vec<Vec3> {
    if points.len() < 2 {
        warn!(
            "resample needs at least 2 points, got {}",
            points.len()
        );
        return Vec::new();
    }

    match count {
        0 => Vec::new(),
        1 => vec![points[0]],
        _ => {
            let total = path_length(points);

            (0..count)
                .filter_map(|i| {
                    let d =
                        total * i as f32 / (count - 1) as f32;
                    point_at_distance(points, d)
                })
                .collect()
        }
    }
}
