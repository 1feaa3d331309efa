//! Systems copying engine state onto scene-graph transforms.

use bevy_ecs::prelude::*;
use bevy_log::warn;
use bevy_math::Vec3;
use bevy_transform::prelude::Transform;
use globetour_engine::tour::TourPhase;

use crate::player::TourPlayer;

/// Marks the entity whose `Transform` follows the tour's interpolated
/// camera.
///
/// Position and look-at are written to the transform; the projection
/// parameters are only published on the component, since the camera
/// object itself belongs to the host renderer.
#[derive(Component, Debug)]
pub struct TourCamera {
    pub player: Entity,
    /// Field of view from the current pose, when the bracketing
    /// keyframes pin one.
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
}

impl TourCamera {
    pub fn new(player: Entity) -> Self {
        Self {
            player,
            fov: None,
            near: None,
            far: None,
        }
    }
}

/// One bird of a player's flock, by index.
#[derive(Component, Debug, Clone, Copy)]
pub struct BirdMarker {
    pub player: Entity,
    pub index: usize,
}

/// One hotspot of a player's tour, by index.
#[derive(Component, Debug, Clone, Copy)]
pub struct HotspotBillboard {
    pub player: Entity,
    pub index: usize,
}

pub(crate) fn apply_camera_pose(
    q_players: Query<&TourPlayer>,
    mut q_cameras: Query<(&mut TourCamera, &mut Transform)>,
) {
    for (mut camera, mut transform) in q_cameras.iter_mut() {
        let Ok(player) = q_players.get(camera.player) else {
            warn!("TourCamera references a despawned player");
            continue;
        };

        if player.phase() == TourPhase::NoTour {
            continue;
        }

        let pose = player.camera_pose();

        transform.translation = pose.eye;
        transform.look_at(pose.target, Vec3::Y);

        camera.fov = pose.fov;
        camera.near = pose.near;
        camera.far = pose.far;
    }
}

pub(crate) fn sync_bird_markers(
    q_players: Query<&TourPlayer>,
    mut q_birds: Query<(&BirdMarker, &mut Transform)>,
) {
    for (marker, mut transform) in q_birds.iter_mut() {
        let Ok(player) = q_players.get(marker.player) else {
            continue;
        };

        let frames = player.bird_frames();
        let Some(frame) = frames.get(marker.index) else {
            continue;
        };

        transform.translation = frame.position;
        transform.scale = Vec3::splat(frame.flap_scale);

        if frame.facing != Vec3::ZERO {
            // Up is radial on a globe.
            let up = frame.position.normalize_or_zero();
            transform.look_to(frame.facing, up);
        }
    }
}

pub(crate) fn sync_hotspot_billboards(
    q_players: Query<&TourPlayer>,
    mut q_billboards: Query<(&HotspotBillboard, &mut Transform)>,
) {
    for (billboard, mut transform) in q_billboards.iter_mut() {
        let Ok(player) = q_players.get(billboard.player) else {
            continue;
        };

        let Some(marker) =
            player.hotspots().get(billboard.index)
        else {
            continue;
        };

        let radius = player.config().globe_radius;
        let pulse = marker.pulse();

        transform.translation = marker.position(radius);
        transform.scale =
            Vec3::splat(pulse.scale * marker.emphasis());
    }
}

#[cfg(test)]
mod test {
    use bevy_app::prelude::*;
    use bevy_ecs::prelude::*;
    use bevy_time::prelude::*;
    use globetour_engine::camera::{
        CameraKeyframe, CameraTransition, OrbitalPosition,
    };
    use globetour_engine::geo::GeoPoint;
    use globetour_engine::path::MigrationPath;
    use globetour_engine::tour::{
        SpeciesInfo, TourDefinition, TourEvent,
    };
    use globetour_engine::TourConfig;

    use crate::player::TourPlaybackEvent;
    use crate::prelude::*;

    fn tour_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_plugins(GlobeTourPlugin);
        app
    }

    fn loaded_player() -> TourPlayer {
        let definition = TourDefinition {
            id: "tern".to_owned(),
            species: SpeciesInfo::default(),
            keyframes: vec![
                CameraKeyframe::new(
                    "a",
                    0.0,
                    OrbitalPosition::new(60.0, 0.0, 300.0),
                    GeoPoint::new(60.0, 0.0),
                ),
                CameraKeyframe::new(
                    "b",
                    2.0,
                    OrbitalPosition::new(-40.0, 10.0, 300.0),
                    GeoPoint::new(-40.0, 10.0),
                ),
            ],
            transitions: vec![CameraTransition::new("a", "b", 2.0)],
            hotspots: Vec::new(),
            chapters: Vec::new(),
            style: Default::default(),
            duration: 2.0,
        };
        let path = MigrationPath::new(
            "m1",
            "Sterna paradisaea",
            vec![
                GeoPoint::new(60.0, 0.0),
                GeoPoint::new(-40.0, 10.0),
            ],
        );

        let mut player = TourPlayer::new(TourConfig::default());
        player.load_tour(&definition, &path);
        player
    }

    #[test]
    fn plugin_builds_and_updates() {
        let mut app = tour_app();
        app.update();
    }

    #[test]
    fn events_are_forwarded_into_bevy() {
        let mut app = tour_app();

        let mut player = loaded_player();
        player.play();
        let entity = app.world_mut().spawn(player).id();

        app.update();

        let events = app
            .world()
            .resource::<Events<TourPlaybackEvent>>();
        let forwarded: Vec<_> =
            events.iter_current_update_events().collect();

        assert!(forwarded.iter().any(|e| {
            e.player == entity
                && matches!(e.event, TourEvent::Started)
        }));
        assert!(forwarded.iter().any(|e| {
            matches!(e.event, TourEvent::Loaded { .. })
        }));
    }

    #[test]
    fn camera_transform_follows_the_pose() {
        use bevy_transform::prelude::Transform;

        let mut app = tour_app();

        let mut player = loaded_player();
        player.play();
        let expected = player.camera_pose().eye;

        let player_id = app.world_mut().spawn(player).id();
        let camera_id = app
            .world_mut()
            .spawn((
                Transform::default(),
                TourCamera::new(player_id),
            ))
            .id();

        // Zero frame delta: the pose stays at keyframe 0.
        app.update();

        let transform = app
            .world()
            .entity(camera_id)
            .get::<Transform>()
            .unwrap();
        assert!(transform.translation.distance(expected) < 1e-3);
    }

    #[test]
    fn bird_markers_land_on_the_curve() {
        use bevy_transform::prelude::Transform;

        let mut app = tour_app();

        let mut player = loaded_player();
        player.play();
        let frame = player.bird_frames()[0];

        let player_id = app.world_mut().spawn(player).id();
        let bird_id = app
            .world_mut()
            .spawn((
                Transform::default(),
                BirdMarker {
                    player: player_id,
                    index: 0,
                },
            ))
            .id();

        app.update();

        let transform = app
            .world()
            .entity(bird_id)
            .get::<Transform>()
            .unwrap();
        assert!(
            transform.translation.distance(frame.position) < 1e-3
        );
    }
}
