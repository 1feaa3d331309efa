//! [Bevy]: https://bevyengine.org/
//! [`TourPlayback`]: globetour_engine::tour::TourPlayback
//! [`CameraAnimator`]: globetour_engine::camera::CameraAnimator
//! [`GlobeCurve`]: globetour_engine::spline::GlobeCurve
//!
//! GlobeTour is a guided-tour playback engine for interactive 3D
//! globes: camera keyframe flights, smooth migration-path curves,
//! particle flows, bird sprites and hotspot markers, all advanced by
//! one clock.
//!
//! The core technologies:
//! - `globetour_engine`: the framework-free core — every piece of
//!   interpolation and state-machine logic lives here and is driven by
//!   explicit `tick`/`update` calls.
//! - `bevy_globetour` (behind the default `bevy` feature): a [Bevy]
//!   integration wiring the engine into chained `PostUpdate` system
//!   sets.
//!
//! The heart of the engine is [`TourPlayback`], which owns the
//! [`CameraAnimator`], path renderer, particle choreographer and
//! markers of the currently loaded tour. Feed it a tour definition and
//! a migration path, then `play`/`pause`/`seek` it from your UI.

pub use globetour_engine;

#[cfg(feature = "bevy")]
pub use bevy_globetour as bevy;

#[cfg(feature = "bevy")]
pub use bevy_globetour::GlobeTourPlugin;

pub mod prelude {
    pub use globetour_engine::prelude::*;

    #[cfg(feature = "bevy")]
    pub use bevy_globetour::prelude::*;
}
