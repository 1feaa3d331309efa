//! The ECS-side owner of a tour playback session.

use core::ops::{Deref, DerefMut};

use bevy_ecs::prelude::*;
use bevy_time::prelude::*;
use globetour_engine::tour::{TourEvent, TourPlayback};
use globetour_engine::TourConfig;

/// A playback orchestrator attached to an entity.
///
/// Dereferences to [`TourPlayback`], so hosts call the engine's
/// control surface (`load_tour`, `play`, `seek`, ...) directly on the
/// component. Spawn one per simultaneous tour; nothing here is a
/// singleton.
#[derive(Component, Debug)]
pub struct TourPlayer(TourPlayback);

impl TourPlayer {
    pub fn new(config: TourConfig) -> Self {
        Self(TourPlayback::new(config))
    }
}

impl Deref for TourPlayer {
    type Target = TourPlayback;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TourPlayer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// An engine [`TourEvent`] forwarded into Bevy's event stream,
/// stamped with the player entity it came from.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TourPlaybackEvent {
    pub player: Entity,
    pub event: TourEvent,
}

/// Feed every player the wall-clock frame delta and forward the
/// events its tick produced.
pub(crate) fn drive_players(
    mut q_players: Query<(Entity, &mut TourPlayer)>,
    time: Res<Time>,
    mut events: EventWriter<TourPlaybackEvent>,
) {
    for (entity, mut player) in q_players.iter_mut() {
        player.tick(time.delta_secs());

        for event in player.drain_events() {
            events.write(TourPlaybackEvent {
                player: entity,
                event,
            });
        }
    }
}
