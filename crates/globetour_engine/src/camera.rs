//! Camera keyframe sequences and the animator that plays them.
//!
//! A tour's camera work is a list of [`CameraKeyframe`]s joined by
//! [`CameraTransition`]s. Transitions partition the sequence's playback
//! time into contiguous, non-overlapping intervals; the sum of their
//! durations *is* the sequence duration. [`CameraAnimator`] holds the
//! playback state machine and interpolates the current pose from the
//! bracketing keyframe pair.

use core::fmt;

use bevy_math::{FloatExt, Vec3};
use log::warn;
use smallvec::SmallVec;

use crate::ease::EaseKind;
use crate::geo::{self, GeoPoint};

/// A camera position described relative to the globe: anchored at a
/// latitude/longitude, `distance` world units from the globe center,
/// with angular offsets applied on top.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct OrbitalPosition {
    pub lat: f32,
    pub lon: f32,
    pub distance: f32,
    /// Angular offset added to the latitude, in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation: f32,
    /// Angular offset added to the longitude, in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub azimuth: f32,
}

impl OrbitalPosition {
    pub fn new(lat: f32, lon: f32, distance: f32) -> Self {
        Self {
            lat,
            lon,
            distance,
            elevation: 0.0,
            azimuth: 0.0,
        }
    }

    #[inline]
    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    #[inline]
    pub fn with_azimuth(mut self, azimuth: f32) -> Self {
        self.azimuth = azimuth;
        self
    }

    /// The eye point in world space.
    pub fn to_cartesian(self) -> Vec3 {
        geo::to_cartesian(
            geo::clamp_lat(self.lat + self.elevation),
            geo::wrap_lon(self.lon + self.azimuth),
            self.distance,
        )
    }
}

/// Partial camera parameters a keyframe may pin.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
}

/// One authored camera state, pinned to a time offset from the start
/// of the sequence. Read-only during playback.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CameraKeyframe {
    pub id: String,
    /// Offset from sequence start in seconds; non-decreasing across
    /// the sequence.
    pub time: f32,
    pub position: OrbitalPosition,
    pub target: GeoPoint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: CameraSettings,
    #[cfg_attr(feature = "serde", serde(default))]
    pub easing: EaseKind,
}

impl CameraKeyframe {
    pub fn new(
        id: impl Into<String>,
        time: f32,
        position: OrbitalPosition,
        target: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            time,
            position,
            target,
            settings: CameraSettings::default(),
            easing: EaseKind::default(),
        }
    }

    #[inline]
    pub fn with_settings(mut self, settings: CameraSettings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    pub fn with_easing(mut self, easing: EaseKind) -> Self {
        self.easing = easing;
        self
    }
}

/// The interpolation interval between two keyframes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CameraTransition {
    pub from: String,
    pub to: String,
    /// Duration in seconds.
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub easing: EaseKind,
}

impl CameraTransition {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        duration: f32,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            easing: EaseKind::default(),
        }
    }

    #[inline]
    pub fn with_easing(mut self, easing: EaseKind) -> Self {
        self.easing = easing;
        self
    }
}

/// The interpolated camera state for one frame.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    /// Present when both bracketing keyframes pin a field of view.
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
}

/// Structural problems a keyframe/transition pair can have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A sequence needs at least 2 keyframes to animate anything.
    TooFewKeyframes(usize),
    /// Keyframe times must be non-decreasing.
    NonMonotonicTime { keyframe: usize },
    /// A transition referenced an id that is not in the sequence.
    UnknownKeyframe { transition: usize, id: String },
    /// Transitions must chain keyframe `i` to keyframe `i + 1` with
    /// no gaps or overlaps.
    BrokenChain { transition: usize },
    /// Transition durations must be positive.
    NonPositiveDuration { transition: usize },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewKeyframes(count) => write!(
                f,
                "need at least 2 keyframes, got {count}"
            ),
            Self::NonMonotonicTime { keyframe } => write!(
                f,
                "keyframe {keyframe} goes backwards in time"
            ),
            Self::UnknownKeyframe { transition, id } => write!(
                f,
                "transition {transition} references unknown keyframe {id:?}"
            ),
            Self::BrokenChain { transition } => write!(
                f,
                "transition {transition} breaks the keyframe chain"
            ),
            Self::NonPositiveDuration { transition } => write!(
                f,
                "transition {transition} has a non-positive duration"
            ),
        }
    }
}

impl std::error::Error for SequenceError {}

#[derive(Debug, Clone, Copy)]
struct TransitionSpan {
    start: f32,
    duration: f32,
    from: usize,
    to: usize,
    easing: EaseKind,
}

impl TransitionSpan {
    #[inline]
    fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// A validated keyframe/transition pair ready for playback.
#[derive(Debug, Clone)]
pub struct CameraSequence {
    keyframes: Vec<CameraKeyframe>,
    spans: SmallVec<[TransitionSpan; 4]>,
    duration: f32,
}

impl CameraSequence {
    pub fn new(
        keyframes: Vec<CameraKeyframe>,
        transitions: &[CameraTransition],
    ) -> Result<Self, SequenceError> {
        if keyframes.len() < 2 {
            return Err(SequenceError::TooFewKeyframes(
                keyframes.len(),
            ));
        }

        for i in 1..keyframes.len() {
            if keyframes[i].time < keyframes[i - 1].time {
                return Err(SequenceError::NonMonotonicTime {
                    keyframe: i,
                });
            }
        }

        if transitions.len() != keyframes.len() - 1 {
            return Err(SequenceError::BrokenChain {
                transition: transitions.len(),
            });
        }

        let index_of = |id: &str| {
            keyframes.iter().position(|kf| kf.id == id)
        };

        let mut spans = SmallVec::new();
        let mut start = 0.0;

        for (i, transition) in transitions.iter().enumerate() {
            let from = index_of(&transition.from).ok_or_else(|| {
                SequenceError::UnknownKeyframe {
                    transition: i,
                    id: transition.from.clone(),
                }
            })?;
            let to = index_of(&transition.to).ok_or_else(|| {
                SequenceError::UnknownKeyframe {
                    transition: i,
                    id: transition.to.clone(),
                }
            })?;

            // Contiguity: transition i joins keyframe i to i + 1.
            if from != i || to != i + 1 {
                return Err(SequenceError::BrokenChain {
                    transition: i,
                });
            }

            if transition.duration <= 0.0 {
                return Err(SequenceError::NonPositiveDuration {
                    transition: i,
                });
            }

            spans.push(TransitionSpan {
                start,
                duration: transition.duration,
                from,
                to,
                easing: transition.easing,
            });
            start += transition.duration;
        }

        Ok(Self {
            keyframes,
            spans,
            duration: start,
        })
    }

    /// Sum of transition durations.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// The exact pose a keyframe pins.
    pub fn keyframe_pose(&self, index: usize, radius: f32) -> CameraPose {
        let kf = &self.keyframes[index];

        CameraPose {
            eye: kf.position.to_cartesian(),
            target: kf.target.to_cartesian(radius),
            fov: kf.settings.fov,
            near: kf.settings.near,
            far: kf.settings.far,
        }
    }

    /// Interpolate the pose at an elapsed time.
    ///
    /// A time landing exactly on a transition boundary belongs to the
    /// *later* transition (progress 0 of the next interval), so the
    /// intervals cover playback time without double-counting.
    pub fn sample(&self, elapsed: f32, radius: f32) -> CameraPose {
        if elapsed >= self.duration {
            return self
                .keyframe_pose(self.keyframes.len() - 1, radius);
        }
        if elapsed <= 0.0 {
            return self.keyframe_pose(0, radius);
        }

        // Small spans per tour; a linear scan beats bookkeeping.
        for span in self.spans.iter() {
            if elapsed >= span.end() {
                continue;
            }

            let progress = (elapsed - span.start) / span.duration;
            let eased = span.easing.apply(progress);

            let from = self.keyframe_pose(span.from, radius);
            let to = self.keyframe_pose(span.to, radius);

            return CameraPose {
                eye: from.eye.lerp(to.eye, eased),
                target: from.target.lerp(to.target, eased),
                fov: match (from.fov, to.fov) {
                    (Some(a), Some(b)) => Some(a.lerp(b, eased)),
                    _ => None,
                },
                // Clip planes snap per keyframe instead of gliding.
                near: from.near,
                far: from.far,
            };
        }

        self.keyframe_pose(self.keyframes.len() - 1, radius)
    }
}

/// Playback state of the [`CameraAnimator`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    #[default]
    Idle,
    Playing,
    Paused,
    /// Elapsed time reached the sequence duration.
    Complete,
}

/// Plays a [`CameraSequence`], producing one [`CameraPose`] per frame.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    radius: f32,
    sequence: Option<CameraSequence>,
    phase: CameraPhase,
    elapsed: f32,
    pose: CameraPose,
}

impl CameraAnimator {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Validate and install a sequence, resetting playback to idle at
    /// time 0.
    ///
    /// A malformed sequence is a warning and a no-op, not an error: a
    /// broken tour should degrade, never crash the surrounding app.
    pub fn load_sequence(
        &mut self,
        keyframes: Vec<CameraKeyframe>,
        transitions: &[CameraTransition],
    ) {
        match CameraSequence::new(keyframes, transitions) {
            Ok(sequence) => {
                self.sequence = Some(sequence);
                self.phase = CameraPhase::Idle;
                self.elapsed = 0.0;
            }
            Err(err) => {
                warn!("camera sequence rejected: {err}");
            }
        }
    }

    /// Drop the installed sequence and reset playback state.
    pub fn unload(&mut self) {
        self.sequence = None;
        self.phase = CameraPhase::Idle;
        self.elapsed = 0.0;
    }

    /// Snap to keyframe 0 and begin playing from time 0.
    pub fn start(&mut self) {
        let Some(sequence) = &self.sequence else {
            warn!("camera start with no sequence loaded");
            return;
        };

        self.pose = sequence.keyframe_pose(0, self.radius);
        self.elapsed = 0.0;
        self.phase = CameraPhase::Playing;
    }

    /// Advance playback. Returns whether the animation is still
    /// running after this update.
    pub fn update(&mut self, delta: f32) -> bool {
        let Some(sequence) = &self.sequence else {
            return false;
        };

        match self.phase {
            CameraPhase::Idle | CameraPhase::Complete => {
                return false
            }
            CameraPhase::Paused => return true,
            CameraPhase::Playing => {}
        }

        self.elapsed += delta;

        if self.elapsed >= sequence.duration() {
            self.elapsed = sequence.duration();
            self.pose = sequence.keyframe_pose(
                sequence.keyframe_count() - 1,
                self.radius,
            );
            self.phase = CameraPhase::Complete;
            return false;
        }

        self.pose = sequence.sample(self.elapsed, self.radius);
        true
    }

    /// Jump to an absolute time and recompute the pose immediately.
    ///
    /// Seeking is idempotent and instantaneous; it does not start or
    /// stop playback.
    pub fn seek_to(&mut self, time: f32) {
        let Some(sequence) = &self.sequence else {
            warn!("camera seek with no sequence loaded");
            return;
        };

        self.elapsed = time.clamp(0.0, sequence.duration());
        self.pose = sequence.sample(self.elapsed, self.radius);
    }

    pub fn pause(&mut self) {
        if self.phase == CameraPhase::Playing {
            self.phase = CameraPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == CameraPhase::Paused {
            self.phase = CameraPhase::Playing;
        }
    }

    /// Rewind the clock and go idle. The pose is left where it is;
    /// the caller decides whether to re-snap.
    pub fn stop(&mut self) {
        self.phase = CameraPhase::Idle;
        self.elapsed = 0.0;
    }
}

// Getter methods.
impl CameraAnimator {
    #[inline]
    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total sequence duration, or 0 when nothing is loaded.
    pub fn duration(&self) -> f32 {
        self.sequence
            .as_ref()
            .map(CameraSequence::duration)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn has_sequence(&self) -> bool {
        self.sequence.is_some()
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let duration = self.duration();

        if duration <= 0.0 {
            0.0
        } else {
            self.elapsed / duration
        }
    }
}
