//! One-shot camera glides outside the keyframe sequence.
//!
//! A [`CameraGlide`] is an explicit, cancellable task: start it, feed
//! it frame deltas, and either let it complete or call
//! [`cancel`](CameraGlide::cancel) to freeze it mid-flight. Nothing
//! here schedules its own timers; the owner drives it from the same
//! frame clock as everything else.

use bevy_math::FloatExt;

use crate::camera::CameraPose;
use crate::ease::EaseKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlideState {
    Running,
    Complete,
    Cancelled,
}

/// An ad-hoc interpolated camera move from one pose to another.
#[derive(Debug, Clone)]
pub struct CameraGlide {
    from: CameraPose,
    to: CameraPose,
    duration: f32,
    easing: EaseKind,
    elapsed: f32,
    state: GlideState,
    pose: CameraPose,
}

impl CameraGlide {
    pub fn new(
        from: CameraPose,
        to: CameraPose,
        duration: f32,
        easing: EaseKind,
    ) -> Self {
        Self {
            from,
            to,
            // A zero-length glide completes on the first update.
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
            state: GlideState::Running,
            pose: from,
        }
    }

    /// Advance the glide and return the pose for this frame.
    ///
    /// Once complete or cancelled the pose is frozen and further
    /// updates return it unchanged.
    pub fn update(&mut self, delta: f32) -> CameraPose {
        if self.state != GlideState::Running {
            return self.pose;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.pose = self.to;
            self.state = GlideState::Complete;
            return self.pose;
        }

        let eased =
            self.easing.apply(self.elapsed / self.duration);

        self.pose = CameraPose {
            eye: self.from.eye.lerp(self.to.eye, eased),
            target: self.from.target.lerp(self.to.target, eased),
            fov: match (self.from.fov, self.to.fov) {
                (Some(a), Some(b)) => Some(a.lerp(b, eased)),
                _ => None,
            },
            near: self.from.near,
            far: self.from.far,
        };

        self.pose
    }

    /// Freeze the glide where it is. Idempotent; a completed glide
    /// stays complete.
    pub fn cancel(&mut self) {
        if self.state == GlideState::Running {
            self.state = GlideState::Cancelled;
        }
    }

    #[inline]
    pub fn state(&self) -> GlideState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state != GlideState::Running
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }
}
