//! The tour playback orchestrator.
//!
//! [`TourPlayback`] owns every animated resource of the currently
//! loaded tour — camera animator, path renderer, particle
//! choreographer, bird flock and hotspot markers — and drives them all
//! from one clock. Within a tick the camera always updates first, then
//! paths and particles, then markers, then birds; render layering
//! depends on that order.
//!
//! State changes surface as [`TourEvent`]s accumulated internally and
//! drained by the caller, so hosts integrate via a plain
//! state-snapshot/event-queue pair instead of a reactivity framework.

use core::fmt;

use bevy_math::Vec3;
use log::warn;
use smallvec::SmallVec;

use crate::camera::{
    CameraAnimator, CameraKeyframe, CameraPhase, CameraPose,
    CameraSequence, CameraTransition, SequenceError,
};
use crate::hotspot::{self, HotspotMarker};
use crate::particle::ParticleChoreographer;
use crate::path::{ActivePath, MigrationPath, PathRenderer, PathStyle};
use crate::sprite::{BirdFrame, BirdSprite};
use crate::TourConfig;

/// Takeoff stagger between consecutive birds in the flock, seconds.
const FLOCK_STAGGER: f32 = 0.75;

/// Species metadata shown alongside a tour.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SpeciesInfo {
    pub common_name: String,
    pub scientific_name: String,
}

/// A named section of the tour, entered when playback time crosses
/// its start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TourChapter {
    pub name: String,
    /// Offset from tour start in seconds.
    pub start_time: f32,
}

/// An authored tour, consumed read-only by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TourDefinition {
    pub id: String,
    pub species: SpeciesInfo,
    pub keyframes: Vec<CameraKeyframe>,
    pub transitions: Vec<CameraTransition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hotspots: Vec<HotspotMarker>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chapters: Vec<TourChapter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: PathStyle,
    /// Declared playback duration in seconds.
    pub duration: f32,
}

impl TourDefinition {
    /// Check the structural invariants a data layer should enforce
    /// after deserializing a tour.
    ///
    /// Playback itself never needs this to hold — a failing tour
    /// degrades at load — but a host that wants to reject bad data
    /// early can.
    pub fn validate(&self) -> Result<(), TourError> {
        CameraSequence::new(
            self.keyframes.clone(),
            &self.transitions,
        )?;

        if self.duration <= 0.0 {
            return Err(TourError::NonPositiveDuration);
        }

        for i in 1..self.chapters.len() {
            if self.chapters[i].start_time
                < self.chapters[i - 1].start_time
            {
                return Err(TourError::UnsortedChapters {
                    chapter: i,
                });
            }
        }

        Ok(())
    }
}

/// Structural problems in an authored tour.
#[derive(Debug, Clone, PartialEq)]
pub enum TourError {
    Camera(SequenceError),
    NonPositiveDuration,
    UnsortedChapters { chapter: usize },
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera(err) => {
                write!(f, "camera sequence: {err}")
            }
            Self::NonPositiveDuration => {
                write!(f, "declared duration must be positive")
            }
            Self::UnsortedChapters { chapter } => write!(
                f,
                "chapter {chapter} starts before its predecessor"
            ),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Camera(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SequenceError> for TourError {
    fn from(err: SequenceError) -> Self {
        Self::Camera(err)
    }
}

/// Orchestrator state machine.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    #[default]
    NoTour,
    Loaded,
    Playing,
    Paused,
}

/// Notifications drained from the orchestrator after each control
/// call or tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    Loaded { tour_id: String },
    Started,
    Paused,
    Resumed,
    Stopped,
    Completed,
    ChapterChanged { index: usize },
    Cleared,
}

/// A point-in-time snapshot of playback state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourPlaybackState {
    pub is_playing: bool,
    pub current_time: f32,
    pub duration: f32,
    pub speed: f32,
    pub chapter: Option<usize>,
}

/// Owns and drives every animated resource of the loaded tour.
#[derive(Debug)]
pub struct TourPlayback {
    config: TourConfig,
    phase: TourPhase,
    tour_id: Option<String>,
    current_time: f32,
    duration: f32,
    speed: f32,
    chapter: Option<usize>,
    chapters: Vec<TourChapter>,
    camera: CameraAnimator,
    renderer: PathRenderer,
    particles: ParticleChoreographer,
    flock: Vec<BirdSprite>,
    hotspots: Vec<HotspotMarker>,
    path: Option<MigrationPath>,
    active_paths: Vec<ActivePath>,
    events: SmallVec<[TourEvent; 4]>,
}

impl TourPlayback {
    pub fn new(config: TourConfig) -> Self {
        Self {
            camera: CameraAnimator::new(config.globe_radius),
            renderer: PathRenderer::new(&config),
            particles: ParticleChoreographer::new(&config),
            config,
            phase: TourPhase::NoTour,
            tour_id: None,
            current_time: 0.0,
            duration: 0.0,
            speed: 1.0,
            chapter: None,
            chapters: Vec::new(),
            flock: Vec::new(),
            hotspots: Vec::new(),
            path: None,
            active_paths: Vec::new(),
            events: SmallVec::new(),
        }
    }

    /// Load a tour, disposing every resource of the previous one
    /// first. No two tours' resources ever coexist.
    pub fn load_tour(
        &mut self,
        definition: &TourDefinition,
        path: &MigrationPath,
    ) {
        self.teardown();

        self.camera.load_sequence(
            definition.keyframes.clone(),
            &definition.transitions,
        );

        let mut path = path.clone();
        path.rebuild_curve(
            self.config.globe_radius,
            self.config.path_height_offset,
        );

        self.active_paths =
            vec![ActivePath::new(path.id.clone(), 0)];
        self.renderer.render_path(&mut path, definition.style);
        self.renderer.reconcile(&self.active_paths);
        self.particles.reconcile(&self.active_paths, |id| {
            (id == path.id).then(|| path.curve()).flatten()
        });

        self.flock = (0..self.config.flock_size)
            .map(|i| {
                BirdSprite::new(self.config.sprite_duration)
                    .with_start_delay(i as f32 * FLOCK_STAGGER)
            })
            .collect();

        self.hotspots = definition.hotspots.clone();
        for marker in self.hotspots.iter_mut() {
            marker.set_pulse_enabled(self.config.pulse_enabled);
        }

        self.chapters = definition.chapters.clone();
        self.chapter = None;

        self.duration = if definition.duration > 0.0 {
            definition.duration
        } else {
            warn!(
                "tour {:?} declares no duration, using the camera sequence's",
                definition.id
            );
            self.camera.duration()
        };

        self.path = Some(path);
        self.tour_id = Some(definition.id.clone());
        self.current_time = 0.0;
        self.phase = TourPhase::Loaded;

        self.events.push(TourEvent::Loaded {
            tour_id: definition.id.clone(),
        });
    }

    /// Unload the current tour and reset playback state to initial
    /// values.
    pub fn clear_tour(&mut self) {
        self.teardown();

        self.phase = TourPhase::NoTour;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.speed = 1.0;
        self.chapter = None;
        self.tour_id = None;

        self.events.push(TourEvent::Cleared);
    }

    fn teardown(&mut self) {
        self.camera.unload();
        self.renderer.dispose();
        self.particles.dispose();
        self.flock.clear();
        self.hotspots.clear();
        self.chapters.clear();
        self.path = None;
        self.active_paths.clear();
    }

    /// Begin (or restart) playback from the top of the tour.
    pub fn play(&mut self) {
        match self.phase {
            TourPhase::NoTour => {
                warn!("play with no tour loaded");
            }
            TourPhase::Playing => {}
            TourPhase::Paused => self.resume(),
            TourPhase::Loaded => {
                self.current_time = 0.0;
                self.camera.start();
                for bird in self.flock.iter_mut() {
                    bird.restart();
                }

                self.phase = TourPhase::Playing;
                self.recompute_chapter();
                self.events.push(TourEvent::Started);
            }
        }
    }

    /// Suspend the clock, preserving the current time.
    pub fn pause(&mut self) {
        if self.phase != TourPhase::Playing {
            warn!("pause while not playing");
            return;
        }

        self.camera.pause();
        self.phase = TourPhase::Paused;
        self.events.push(TourEvent::Paused);
    }

    pub fn resume(&mut self) {
        if self.phase != TourPhase::Paused {
            warn!("resume while not paused");
            return;
        }

        self.camera.resume();
        self.phase = TourPhase::Playing;
        self.events.push(TourEvent::Resumed);
    }

    /// Cancel playback and rewind the clock without unloading the
    /// tour.
    pub fn stop(&mut self) {
        match self.phase {
            TourPhase::Playing | TourPhase::Paused => {
                self.camera.stop();
                for bird in self.flock.iter_mut() {
                    bird.seek(0.0);
                    bird.pause();
                }

                self.current_time = 0.0;
                self.chapter = None;
                self.phase = TourPhase::Loaded;
                self.events.push(TourEvent::Stopped);
            }
            _ => warn!("stop while not playing"),
        }
    }

    pub fn restart(&mut self) {
        self.stop();
        self.play();
    }

    /// Advance one frame using the wall-clock delta since the last
    /// tick. Does nothing unless playing.
    pub fn tick(&mut self, delta: f32) {
        if self.phase != TourPhase::Playing {
            return;
        }

        let scaled = delta * self.speed;

        // Camera first; everything else positions itself against it.
        self.camera.update(scaled);

        if self.camera.has_sequence()
            && self.camera.phase() == CameraPhase::Complete
        {
            self.finish();
            return;
        }

        self.current_time =
            (self.current_time + scaled).min(self.duration);

        // Paths and particles.
        self.renderer.update_animation(scaled);
        self.particles.animate(scaled);

        // Markers, then birds.
        for marker in self.hotspots.iter_mut() {
            marker.update(scaled);
        }
        for bird in self.flock.iter_mut() {
            bird.update(delta, self.speed);
        }

        self.recompute_chapter();

        // A tour without a usable camera sequence still ends when its
        // declared duration runs out.
        if self.camera.has_sequence() == false
            && self.current_time >= self.duration
        {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.current_time = self.duration;
        self.phase = TourPhase::Loaded;
        self.events.push(TourEvent::Completed);
    }

    /// Jump to a position given as a percentage of the tour, keeping
    /// camera and birds in lockstep. Bypasses the frame loop for this
    /// one update.
    pub fn seek(&mut self, percent: f32) {
        if self.phase == TourPhase::NoTour {
            warn!("seek with no tour loaded");
            return;
        }

        let percent = percent.clamp(0.0, 100.0);
        let time = self.duration * percent / 100.0;

        self.camera.seek_to(time);

        let normalized = if self.duration > 0.0 {
            time / self.duration
        } else {
            0.0
        };
        for bird in self.flock.iter_mut() {
            bird.seek(normalized);
        }

        self.current_time = time;
        self.recompute_chapter();
    }

    /// Scale how fast playback time advances per wall-clock second.
    pub fn set_speed(&mut self, multiplier: f32) {
        if multiplier <= 0.0 {
            warn!("ignoring non-positive speed {multiplier}");
            return;
        }

        self.speed = multiplier;
    }

    fn recompute_chapter(&mut self) {
        let current = self
            .chapters
            .iter()
            .rposition(|c| c.start_time <= self.current_time);

        if current != self.chapter {
            self.chapter = current;

            if let Some(index) = current {
                self.events
                    .push(TourEvent::ChapterChanged { index });
            }
        }
    }

    /// First hotspot whose pick sphere the world-space ray hits, or
    /// `None`.
    pub fn hotspot_at_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
    ) -> Option<&HotspotMarker> {
        hotspot::hotspot_at_ray(
            self.hotspots.iter(),
            origin,
            direction,
            self.config.globe_radius,
            self.config.marker_hit_radius,
        )
    }

    /// Take every event accumulated since the last drain.
    pub fn drain_events(&mut self) -> SmallVec<[TourEvent; 4]> {
        core::mem::take(&mut self.events)
    }
}

// Getter methods.
impl TourPlayback {
    #[inline]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == TourPhase::Playing
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn chapter(&self) -> Option<usize> {
        self.chapter
    }

    pub fn tour_id(&self) -> Option<&str> {
        self.tour_id.as_deref()
    }

    pub fn progress_percent(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            self.current_time / self.duration * 100.0
        }
    }

    /// Snapshot of the playback state.
    pub fn state(&self) -> TourPlaybackState {
        TourPlaybackState {
            is_playing: self.is_playing(),
            current_time: self.current_time,
            duration: self.duration,
            speed: self.speed,
            chapter: self.chapter,
        }
    }

    #[inline]
    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    #[inline]
    pub fn camera(&self) -> &CameraAnimator {
        &self.camera
    }

    #[inline]
    pub fn renderer(&self) -> &PathRenderer {
        &self.renderer
    }

    #[inline]
    pub fn particles(&self) -> &ParticleChoreographer {
        &self.particles
    }

    #[inline]
    pub fn hotspots(&self) -> &[HotspotMarker] {
        &self.hotspots
    }

    pub fn hotspot_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut HotspotMarker> {
        self.hotspots.iter_mut().find(|m| m.id == id)
    }

    #[inline]
    pub fn flock(&self) -> &[BirdSprite] {
        &self.flock
    }

    /// Drawable state of the flock, empty when the tour's path has no
    /// usable curve.
    pub fn bird_frames(&self) -> Vec<BirdFrame> {
        let Some(curve) =
            self.path.as_ref().and_then(MigrationPath::curve)
        else {
            return Vec::new();
        };

        self.flock.iter().map(|bird| bird.frame(curve)).collect()
    }
}

#[cfg(test)]
mod test {
    use crate::camera::OrbitalPosition;
    use crate::geo::GeoPoint;

    use super::*;

    fn keyframe(id: &str, time: f32, lat: f32) -> CameraKeyframe {
        CameraKeyframe::new(
            id,
            time,
            OrbitalPosition::new(lat, 0.0, 300.0),
            GeoPoint::new(lat, 0.0),
        )
    }

    fn definition(id: &str) -> TourDefinition {
        TourDefinition {
            id: id.to_owned(),
            species: SpeciesInfo {
                common_name: "Arctic Tern".to_owned(),
                scientific_name: "Sterna paradisaea".to_owned(),
            },
            keyframes: vec![
                keyframe("a", 0.0, 70.0),
                keyframe("b", 1.0, 20.0),
                keyframe("c", 3.0, -40.0),
            ],
            transitions: vec![
                CameraTransition::new("a", "b", 1.0),
                CameraTransition::new("b", "c", 2.0),
            ],
            hotspots: vec![HotspotMarker::new(
                "stopover",
                GeoPoint::new(20.0, -20.0),
                Default::default(),
            )],
            chapters: vec![
                TourChapter {
                    name: "Departure".to_owned(),
                    start_time: 0.0,
                },
                TourChapter {
                    name: "Crossing".to_owned(),
                    start_time: 1.5,
                },
            ],
            style: PathStyle::default(),
            duration: 3.0,
        }
    }

    fn migration(id: &str) -> MigrationPath {
        MigrationPath::new(
            id,
            "Sterna paradisaea",
            vec![
                GeoPoint::new(70.0, -20.0),
                GeoPoint::new(20.0, -25.0),
                GeoPoint::new(-40.0, -10.0),
            ],
        )
    }

    fn loaded_playback() -> TourPlayback {
        let mut playback = TourPlayback::new(TourConfig::default());
        playback.load_tour(&definition("tern"), &migration("m1"));
        playback
    }

    #[test]
    fn validate_accepts_the_fixture() {
        assert!(definition("tern").validate().is_ok());
    }

    #[test]
    fn validate_rejects_structural_problems() {
        let mut bad = definition("tern");
        bad.transitions.pop();
        assert!(matches!(
            bad.validate(),
            Err(TourError::Camera(_))
        ));

        let mut bad = definition("tern");
        bad.duration = 0.0;
        assert_eq!(
            bad.validate(),
            Err(TourError::NonPositiveDuration)
        );

        let mut bad = definition("tern");
        bad.chapters.swap(0, 1);
        assert_eq!(
            bad.validate(),
            Err(TourError::UnsortedChapters { chapter: 1 })
        );
    }

    #[test]
    fn load_builds_every_resource() {
        let mut playback = loaded_playback();

        assert_eq!(playback.phase(), TourPhase::Loaded);
        assert_eq!(playback.duration(), 3.0);
        assert_eq!(playback.renderer().path_count(), 1);
        assert_eq!(playback.particles().system_count(), 1);
        assert_eq!(playback.flock().len(), 5);
        assert_eq!(playback.hotspots().len(), 1);

        let events = playback.drain_events();
        assert_eq!(
            events.as_slice(),
            &[TourEvent::Loaded {
                tour_id: "tern".to_owned()
            }]
        );
    }

    #[test]
    fn reloading_disposes_the_previous_tour() {
        let mut playback = loaded_playback();
        playback.load_tour(&definition("godwit"), &migration("m2"));

        // Exactly one set of resources, all belonging to the new tour.
        assert_eq!(playback.renderer().path_count(), 1);
        assert!(playback.renderer().path("m1").is_none());
        assert!(playback.renderer().path("m2").is_some());

        assert_eq!(playback.particles().system_count(), 1);
        assert!(playback.particles().system("m1").is_none());
        assert!(playback.particles().system("m2").is_some());

        assert_eq!(playback.tour_id(), Some("godwit"));
    }

    #[test]
    fn controls_without_a_tour_are_noops() {
        let mut playback = TourPlayback::new(TourConfig::default());

        playback.play();
        playback.pause();
        playback.stop();
        playback.seek(50.0);
        playback.tick(1.0);

        assert_eq!(playback.phase(), TourPhase::NoTour);
        assert!(playback.drain_events().is_empty());
    }

    #[test]
    fn tick_advances_camera_and_clock_together() {
        let mut playback = loaded_playback();
        playback.play();

        playback.tick(1.5);

        assert_eq!(playback.current_time(), 1.5);
        assert_eq!(playback.camera().elapsed(), 1.5);
        assert_eq!(playback.progress_percent(), 50.0);
        assert!(playback.is_playing());
    }

    #[test]
    fn pause_freezes_the_clock() {
        let mut playback = loaded_playback();
        playback.play();
        playback.tick(1.0);

        playback.pause();
        // Wall-clock time passes while paused; nothing advances.
        playback.tick(5.0);
        assert_eq!(playback.current_time(), 1.0);

        playback.resume();
        playback.tick(0.5);
        assert_eq!(playback.current_time(), 1.5);
    }

    #[test]
    fn completion_ends_playback_automatically() {
        let mut playback = loaded_playback();
        playback.play();
        playback.drain_events();

        playback.tick(5.0);

        assert_eq!(playback.phase(), TourPhase::Loaded);
        assert_eq!(playback.current_time(), 3.0);

        let events = playback.drain_events();
        assert!(events.contains(&TourEvent::Completed));
    }

    #[test]
    fn stop_rewinds_but_keeps_the_tour() {
        let mut playback = loaded_playback();
        playback.play();
        playback.tick(1.0);

        playback.stop();

        assert_eq!(playback.phase(), TourPhase::Loaded);
        assert_eq!(playback.current_time(), 0.0);
        assert_eq!(playback.renderer().path_count(), 1);
    }

    #[test]
    fn seek_jumps_everything_in_lockstep() {
        let mut playback = loaded_playback();
        playback.play();

        playback.seek(50.0);

        assert_eq!(playback.current_time(), 1.5);
        assert_eq!(playback.camera().elapsed(), 1.5);
        for bird in playback.flock() {
            assert_eq!(bird.progress(), 0.5);
        }

        // Seeking twice lands in the same place.
        let pose = playback.camera_pose();
        playback.seek(50.0);
        assert_eq!(playback.camera_pose(), pose);
    }

    #[test]
    fn speed_scales_the_clock() {
        let mut playback = loaded_playback();
        playback.set_speed(2.0);
        playback.play();

        playback.tick(0.5);
        assert_eq!(playback.current_time(), 1.0);

        // Bad multipliers are ignored.
        playback.set_speed(0.0);
        assert_eq!(playback.speed(), 2.0);
    }

    #[test]
    fn chapters_emit_once_per_crossing() {
        let mut playback = loaded_playback();
        playback.play();
        playback.drain_events();

        playback.tick(1.0);
        assert!(
            playback.drain_events().iter().all(|e| !matches!(
                e,
                TourEvent::ChapterChanged { index: 1 }
            ))
        );
        assert_eq!(playback.chapter(), Some(0));

        playback.tick(0.6);
        let events = playback.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(
                    e,
                    TourEvent::ChapterChanged { index: 1 }
                ))
                .count(),
            1
        );

        // No re-fire while inside the chapter.
        playback.tick(0.1);
        assert!(playback.drain_events().iter().all(|e| {
            !matches!(e, TourEvent::ChapterChanged { .. })
        }));
    }

    #[test]
    fn clear_resets_playback_state() {
        let mut playback = loaded_playback();
        playback.set_speed(2.0);
        playback.play();
        playback.tick(1.0);

        playback.clear_tour();

        assert_eq!(
            playback.state(),
            TourPlaybackState {
                is_playing: false,
                current_time: 0.0,
                duration: 0.0,
                speed: 1.0,
                chapter: None,
            }
        );
        assert_eq!(playback.renderer().path_count(), 0);
        assert_eq!(playback.particles().system_count(), 0);
        assert!(playback.bird_frames().is_empty());
    }

    #[test]
    fn hotspot_interaction_and_picking() {
        let mut playback = loaded_playback();

        playback
            .hotspot_mut("stopover")
            .unwrap()
            .set_hovered(true);
        assert!(playback.hotspots()[0].is_label_visible());

        let target = playback.hotspots()[0].position(100.0);
        let origin = target * 3.0;
        let hit = playback
            .hotspot_at_ray(origin, target - origin)
            .unwrap();
        assert_eq!(hit.id, "stopover");

        let miss =
            playback.hotspot_at_ray(origin, Vec3::Y);
        assert!(miss.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn definition_round_trips_through_json() {
        let original = definition("tern");

        let json = serde_json::to_string(&original).unwrap();
        let back: TourDefinition =
            serde_json::from_str(&json).unwrap();

        assert_eq!(back, original);
    }

    #[test]
    fn degraded_camera_still_plays_to_duration() {
        let mut bad = definition("broken");
        bad.keyframes.truncate(1);
        bad.transitions.clear();

        let mut playback = TourPlayback::new(TourConfig::default());
        playback.load_tour(&bad, &migration("m1"));
        playback.play();
        playback.drain_events();

        playback.tick(1.0);
        assert!(playback.is_playing());

        playback.tick(2.5);
        assert_eq!(playback.phase(), TourPhase::Loaded);
        assert!(playback
            .drain_events()
            .contains(&TourEvent::Completed));
    }
}
