//! [Bevy]: https://bevyengine.org/
//!
//! A [Bevy] integration of the globetour engine.
//!
//! The engine itself never touches the scene graph; this crate wires a
//! [`TourPlayer`](player::TourPlayer) component into chained
//! `PostUpdate` sets so that within every frame the clock ticks first,
//! the camera pose lands on a `Transform` second, and path/marker
//! entities are repositioned last, all before transform propagation.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_transform::TransformSystem;
use globetour_engine::TourConfig;

pub mod player;
pub mod sync;

pub mod prelude {
    pub use crate::player::{TourPlaybackEvent, TourPlayer};
    pub use crate::sync::{BirdMarker, HotspotBillboard, TourCamera};
    pub use crate::{GlobeTourPlugin, GlobeTourSet, TourSettings};
}

/// The [`TourConfig`] handed to newly spawned players by hosts that
/// want a single shared setup. Insert a customized value before adding
/// [`GlobeTourPlugin`] to override the defaults.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct TourSettings(pub TourConfig);

pub struct GlobeTourPlugin;

impl Plugin for GlobeTourPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            PostUpdate,
            (
                GlobeTourSet::Clock,
                GlobeTourSet::Camera,
                GlobeTourSet::Paths,
                GlobeTourSet::Markers
                    .before(TransformSystem::TransformPropagate),
            )
                .chain(),
        );

        app.init_resource::<TourSettings>();
        app.add_event::<player::TourPlaybackEvent>();

        app.add_systems(
            PostUpdate,
            (
                player::drive_players.in_set(GlobeTourSet::Clock),
                sync::apply_camera_pose.in_set(GlobeTourSet::Camera),
                (
                    sync::sync_bird_markers,
                    sync::sync_hotspot_billboards,
                )
                    .in_set(GlobeTourSet::Markers),
            ),
        );
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GlobeTourSet {
    /// Advance every tour player's clock by the frame delta.
    Clock,
    /// Apply the interpolated camera pose to [`TourCamera`] entities.
    Camera,
    /// Reserved for host systems that rebuild path meshes from the
    /// renderer's data. Runs after the clock and camera, before
    /// markers.
    Paths,
    /// Reposition bird and hotspot marker entities.
    /// This happens before [`TransformSystem::TransformPropagate`].
    Markers,
}

impl TourSettings {
    pub fn new(config: TourConfig) -> Self {
        Self(config)
    }

    #[inline]
    pub fn config(&self) -> &TourConfig {
        &self.0
    }
}
