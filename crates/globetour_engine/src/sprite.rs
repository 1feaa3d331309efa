//! Bird sprites flying along a migration curve.

use bevy_math::Vec3;

use crate::spline::GlobeCurve;

/// Parametric offset for the forward-difference facing estimate.
///
/// This is a deliberate approximation rather than an analytic
/// tangent; the curve is smooth and densely sampled, so the cheap
/// estimate is indistinguishable on screen.
const TANGENT_SAMPLE_OFFSET: f32 = 0.01;

/// Wing-beat angular rate in radians per second.
const FLAP_RATE: f32 = 9.0;

/// Scale swing of the flap cycle around 1.0.
const FLAP_AMOUNT: f32 = 0.25;

/// A sprite's drawable state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdFrame {
    pub position: Vec3,
    /// Unit facing direction along the flight path.
    pub facing: Vec3,
    /// Scale factor animating the wing beat.
    pub flap_scale: f32,
}

/// One bird advancing along the tour's migration curve.
#[derive(Debug, Clone)]
pub struct BirdSprite {
    /// Normalized position along the curve in `[0, 1]`.
    progress: f32,
    /// Seconds for a full traversal at 1x speed.
    nominal_duration: f32,
    /// Countdown before this bird takes off, staggering the flock.
    start_delay: f32,
    /// The authored delay, restored on restart.
    initial_delay: f32,
    elapsed: f32,
    playing: bool,
}

impl BirdSprite {
    pub fn new(nominal_duration: f32) -> Self {
        Self {
            progress: 0.0,
            nominal_duration: nominal_duration.max(f32::EPSILON),
            start_delay: 0.0,
            initial_delay: 0.0,
            elapsed: 0.0,
            playing: false,
        }
    }

    #[inline]
    pub fn with_start_delay(mut self, delay: f32) -> Self {
        self.start_delay = delay;
        self.initial_delay = delay;
        self
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance along the curve. Returns whether the bird is still
    /// flying after this update.
    ///
    /// Progress clamps at 1; from then on the sprite reports done
    /// until it is re-seeked or restarted.
    pub fn update(&mut self, delta: f32, speed: f32) -> bool {
        if self.playing == false {
            return false;
        }

        self.elapsed += delta;

        if self.start_delay > 0.0 {
            self.start_delay -= delta * speed;
            return true;
        }

        self.progress = (self.progress
            + delta * speed / self.nominal_duration)
            .min(1.0);

        if self.progress >= 1.0 {
            self.playing = false;
            return false;
        }

        true
    }

    /// Reposition without altering play/pause state.
    pub fn seek(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Rewind to the start, ready for another traversal with the
    /// original takeoff stagger.
    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.start_delay = self.initial_delay;
        self.playing = true;
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Sample the drawable state off the curve.
    pub fn frame(&self, curve: &GlobeCurve) -> BirdFrame {
        let position = curve.position_at(self.progress);

        // Forward-difference tangent; near the end the sample flips
        // behind so the bird keeps its heading across the finish.
        let ahead = curve.position_at(
            (self.progress + TANGENT_SAMPLE_OFFSET).min(1.0),
        );
        let facing = if self.progress + TANGENT_SAMPLE_OFFSET <= 1.0 {
            (ahead - position).normalize_or_zero()
        } else {
            let behind = curve.position_at(
                (self.progress - TANGENT_SAMPLE_OFFSET).max(0.0),
            );
            (position - behind).normalize_or_zero()
        };

        BirdFrame {
            position,
            facing,
            flap_scale: 1.0
                + FLAP_AMOUNT * (self.elapsed * FLAP_RATE).sin(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn curve() -> GlobeCurve {
        GlobeCurve::through_points(&[
            Vec3::ZERO,
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn traversal_takes_the_nominal_duration() {
        let mut bird = BirdSprite::new(10.0);
        bird.play();

        for _ in 0..9 {
            assert!(bird.update(1.0, 1.0));
        }
        assert!(bird.update(1.0, 1.0) == false);
        assert_eq!(bird.progress(), 1.0);
        assert!(bird.is_playing() == false);
    }

    #[test]
    fn speed_multiplier_scales_advancement() {
        let mut bird = BirdSprite::new(10.0);
        bird.play();

        bird.update(1.0, 2.0);
        assert!((bird.progress() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn paused_bird_does_not_advance() {
        let mut bird = BirdSprite::new(10.0);
        assert!(bird.update(1.0, 1.0) == false);
        assert_eq!(bird.progress(), 0.0);
    }

    #[test]
    fn start_delay_staggers_takeoff() {
        let mut bird = BirdSprite::new(10.0).with_start_delay(2.0);
        bird.play();

        assert!(bird.update(1.0, 1.0));
        assert_eq!(bird.progress(), 0.0);

        bird.update(1.0, 1.0);
        bird.update(1.0, 1.0);
        assert!(bird.progress() > 0.0);
    }

    #[test]
    fn seek_keeps_play_state() {
        let mut bird = BirdSprite::new(10.0);
        bird.seek(0.5);

        assert_eq!(bird.progress(), 0.5);
        assert!(bird.is_playing() == false);

        bird.play();
        bird.seek(2.0);
        assert_eq!(bird.progress(), 1.0);
        assert!(bird.is_playing());
    }

    #[test]
    fn facing_follows_the_curve() {
        let curve = curve();
        let mut bird = BirdSprite::new(10.0);
        bird.seek(0.5);

        let frame = bird.frame(&curve);
        assert!(frame.facing.dot(Vec3::X) > 0.99);

        // At the very end the backward sample keeps a heading.
        bird.seek(1.0);
        let frame = bird.frame(&curve);
        assert!(frame.facing.dot(Vec3::X) > 0.99);
    }

    #[test]
    fn flap_scale_swings_around_one() {
        let curve = curve();
        let mut bird = BirdSprite::new(10.0);
        bird.play();

        let mut min: f32 = 10.0;
        let mut max: f32 = -10.0;
        for _ in 0..100 {
            bird.update(0.05, 1.0);
            let frame = bird.frame(&curve);
            min = min.min(frame.flap_scale);
            max = max.max(frame.flap_scale);
        }

        assert!(min < 1.0 && max > 1.0);
        assert!(min >= 1.0 - FLAP_AMOUNT - 1e-4);
        assert!(max <= 1.0 + FLAP_AMOUNT + 1e-4);
    }
}
