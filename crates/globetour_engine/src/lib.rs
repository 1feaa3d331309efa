//! [`TourPlayback`]: tour::TourPlayback
//! [`CameraAnimator`]: camera::CameraAnimator
//! [`GlobeCurve`]: spline::GlobeCurve
//!
//! The core animation engine behind guided globe tours. Everything in
//! this crate is framework-free: plain objects advanced by an explicit
//! `tick`/`update` call, fed with a frame delta by whoever owns the
//! render loop.
//!
//! The entry point is [`TourPlayback`], the orchestrator that owns the
//! [`CameraAnimator`], the path renderer, the particle choreographer
//! and the bird/hotspot markers of the currently loaded tour, and
//! drives them all from a single clock.

pub mod camera;
pub mod catalog;
pub mod ease;
pub mod geo;
pub mod glide;
pub mod hotspot;
pub mod particle;
pub mod path;
pub mod spline;
pub mod sprite;
pub mod tour;

pub mod prelude {
    pub use crate::camera::{
        CameraAnimator, CameraKeyframe, CameraPhase, CameraPose,
        CameraSequence, CameraSettings, CameraTransition,
        OrbitalPosition, SequenceError,
    };
    pub use crate::catalog::MigrationCatalog;
    pub use crate::ease::{self, EaseFn, EaseKind};
    pub use crate::geo::GeoPoint;
    pub use crate::glide::{CameraGlide, GlideState};
    pub use crate::hotspot::{
        hotspot_at_ray, HotspotContent, HotspotMarker, PulseState,
    };
    pub use crate::particle::{
        ParticleChoreographer, ParticleInstance,
    };
    pub use crate::path::{
        ActivePath, MigrationPath, PathRenderer, PathStyle,
        RenderedPath,
    };
    pub use crate::spline::GlobeCurve;
    pub use crate::sprite::{BirdFrame, BirdSprite};
    pub use crate::tour::{
        SpeciesInfo, TourChapter, TourDefinition, TourError,
        TourEvent, TourPhase, TourPlayback, TourPlaybackState,
    };
    pub use crate::TourConfig;
}

/// Tuning knobs shared across the tour subsystems.
///
/// Explicitly constructed and passed in; there is no global instance.
#[derive(Debug, Clone, Copy)]
pub struct TourConfig {
    /// Radius of the reference sphere in world units.
    pub globe_radius: f32,
    /// Height of migration path curves above the reference sphere.
    pub path_height_offset: f32,
    /// Number of particles flowing along each active path.
    pub particles_per_path: usize,
    /// Time for one particle to travel the full path, in seconds.
    pub particle_travel_time: f32,
    /// Time for a bird sprite to traverse the full path at 1x speed,
    /// in seconds.
    pub sprite_duration: f32,
    /// Number of bird sprites spawned per tour.
    pub flock_size: usize,
    /// Rate at which a path draws itself in, in full lengths per second.
    pub draw_in_rate: f32,
    /// Whether hotspot markers run their idle pulse animation.
    pub pulse_enabled: bool,
    /// Pick radius around a hotspot marker for ray hit-testing,
    /// in world units.
    pub marker_hit_radius: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            globe_radius: 100.0,
            path_height_offset: 2.0,
            particles_per_path: 24,
            particle_travel_time: 8.0,
            sprite_duration: 20.0,
            flock_size: 5,
            draw_in_rate: 0.5,
            pulse_enabled: true,
            marker_hit_radius: 2.5,
        }
    }
}
