//! Interactive hotspot markers anchored along a migration path.
//!
//! Markers keep independent `hovered`/`active` flags; mutating one
//! marker never touches another. The idle pulse runs unconditionally
//! unless disabled in configuration.

use bevy_math::Vec3;

use crate::geo::GeoPoint;

/// Pulse angular rate in radians per second.
const PULSE_RATE: f32 = 2.4;

/// Scale swing of the pulse around 1.0.
const PULSE_SCALE_AMOUNT: f32 = 0.15;

/// Opacity dip of the pulse below 1.0.
const PULSE_OPACITY_AMOUNT: f32 = 0.25;

/// What a hotspot shows when its label opens.
///
/// A closed record: every field is typed and always present, so
/// consumers never dig through optional bags.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct HotspotContent {
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facts: Vec<String>,
}

/// The pulse animation's drawable state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseState {
    pub scale: f32,
    pub opacity: f32,
}

/// One interactive marker pinned to a geographic anchor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct HotspotMarker {
    pub id: String,
    pub anchor: GeoPoint,
    pub content: HotspotContent,
    #[cfg_attr(feature = "serde", serde(skip))]
    hovered: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    active: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    elapsed: f32,
    #[cfg_attr(
        feature = "serde",
        serde(skip, default = "pulse_enabled_default")
    )]
    pulse_enabled: bool,
}

#[cfg(feature = "serde")]
fn pulse_enabled_default() -> bool {
    true
}

impl HotspotMarker {
    pub fn new(
        id: impl Into<String>,
        anchor: GeoPoint,
        content: HotspotContent,
    ) -> Self {
        Self {
            id: id.into(),
            anchor,
            content,
            hovered: false,
            active: false,
            elapsed: 0.0,
            pulse_enabled: true,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_pulse_enabled(&mut self, enabled: bool) {
        self.pulse_enabled = enabled;
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The label opens while the marker is hovered or active.
    #[inline]
    pub fn is_label_visible(&self) -> bool {
        self.hovered || self.active
    }

    /// Advance the pulse clock.
    pub fn update(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// The current pulse state; a disabled pulse holds steady.
    pub fn pulse(&self) -> PulseState {
        if self.pulse_enabled == false {
            return PulseState {
                scale: 1.0,
                opacity: 1.0,
            };
        }

        let wave = (self.elapsed * PULSE_RATE).sin();

        PulseState {
            scale: 1.0 + PULSE_SCALE_AMOUNT * wave,
            opacity: 1.0
                - PULSE_OPACITY_AMOUNT * (0.5 + 0.5 * wave),
        }
    }

    /// Visual emphasis derived from the interaction flags.
    pub fn emphasis(&self) -> f32 {
        if self.active {
            1.4
        } else if self.hovered {
            1.2
        } else {
            1.0
        }
    }

    /// World-space anchor point on the globe.
    #[inline]
    pub fn position(&self, radius: f32) -> Vec3 {
        self.anchor.to_cartesian(radius)
    }
}

/// Find the closest marker whose pick sphere the ray intersects.
///
/// The ray is expected in world space; projecting a screen coordinate
/// into one is the host camera's job.
pub fn hotspot_at_ray<'m>(
    markers: impl IntoIterator<Item = &'m HotspotMarker>,
    origin: Vec3,
    direction: Vec3,
    globe_radius: f32,
    hit_radius: f32,
) -> Option<&'m HotspotMarker> {
    let direction = direction.normalize_or_zero();

    if direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(f32, &HotspotMarker)> = None;

    for marker in markers {
        let center = marker.position(globe_radius);

        let Some(t) =
            ray_sphere(origin, direction, center, hit_radius)
        else {
            continue;
        };

        if best.map(|(best_t, _)| t < best_t).unwrap_or(true) {
            best = Some((t, marker));
        }
    }

    best.map(|(_, marker)| marker)
}

/// Nearest positive ray/sphere intersection distance.
fn ray_sphere(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;

    if near >= 0.0 {
        return Some(near);
    }

    let far = -b + sqrt_d;
    (far >= 0.0).then_some(far)
}

#[cfg(test)]
mod test {
    use super::*;

    fn marker(id: &str, lat: f32, lon: f32) -> HotspotMarker {
        HotspotMarker::new(
            id,
            GeoPoint::new(lat, lon),
            HotspotContent {
                title: id.to_owned(),
                description: String::new(),
                facts: Vec::new(),
            },
        )
    }

    #[test]
    fn label_follows_either_flag() {
        let mut m = marker("stopover", 10.0, 20.0);
        assert!(m.is_label_visible() == false);

        m.set_hovered(true);
        assert!(m.is_label_visible());

        m.set_hovered(false);
        m.set_active(true);
        assert!(m.is_label_visible());

        m.set_active(false);
        assert!(m.is_label_visible() == false);
    }

    #[test]
    fn markers_do_not_share_state() {
        let mut a = marker("a", 0.0, 0.0);
        let b = marker("b", 10.0, 10.0);

        a.set_hovered(true);
        a.set_active(true);

        assert!(b.is_hovered() == false);
        assert!(b.is_active() == false);
    }

    #[test]
    fn pulse_stays_in_range() {
        let mut m = marker("a", 0.0, 0.0);

        for _ in 0..200 {
            m.update(0.05);
            let pulse = m.pulse();

            assert!(pulse.scale >= 1.0 - PULSE_SCALE_AMOUNT - 1e-4);
            assert!(pulse.scale <= 1.0 + PULSE_SCALE_AMOUNT + 1e-4);
            assert!(
                pulse.opacity >= 1.0 - PULSE_OPACITY_AMOUNT - 1e-4
            );
            assert!(pulse.opacity <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn disabled_pulse_holds_steady() {
        let mut m = marker("a", 0.0, 0.0);
        m.set_pulse_enabled(false);
        m.update(1.2345);

        assert_eq!(
            m.pulse(),
            PulseState {
                scale: 1.0,
                opacity: 1.0
            }
        );
    }

    #[test]
    fn ray_hits_the_nearest_marker() {
        // "behind" sits on the same ray, farther from the origin.
        let near = marker("near", 0.0, 0.0);
        let behind =
            HotspotMarker::new(
                "behind",
                GeoPoint::new(0.0, 0.0).with_alt(-20.0),
                HotspotContent::default(),
            );
        let markers = [near, behind];

        // Shoot from outside the globe straight at lat/lon (0, 0).
        let target = markers[0].position(100.0);
        let origin = target * 3.0;
        let direction = target - origin;

        let hit = hotspot_at_ray(
            markers.iter(),
            origin,
            direction,
            100.0,
            2.5,
        )
        .unwrap();
        assert_eq!(hit.id, "near");
    }

    #[test]
    fn ray_missing_everything_is_none() {
        let markers = [marker("a", 0.0, 0.0)];
        let hit = hotspot_at_ray(
            markers.iter(),
            Vec3::new(300.0, 0.0, 0.0),
            Vec3::Y,
            100.0,
            2.5,
        );
        assert!(hit.is_none());
    }
}
