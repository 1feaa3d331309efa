//! Particle flows along active migration paths.
//!
//! Each active path owns a fixed-size pool of particles with staggered
//! start distances and delays, so the flow looks continuous from the
//! first frame instead of marching out in a clump. Particles are
//! rebuilt whenever their owning system is; they are never persisted.

use bevy_math::Vec3;
use bevy_platform::collections::HashMap;
use log::warn;

use crate::path::ActivePath;
use crate::spline::GlobeCurve;
use crate::TourConfig;

/// Fraction of normalized path position over which particles fade in
/// and out, softening the wrap-around seam.
const FADE_SPAN: f32 = 0.1;

/// One marker flowing along a path.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Distance along the path; wraps modulo the path length.
    distance: f32,
    /// World units per second.
    speed: f32,
    /// Countdown before the particle becomes visible.
    start_delay: f32,
    visible: bool,
}

impl Particle {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A particle's drawable state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleInstance {
    pub position: Vec3,
    pub opacity: f32,
}

/// The particle pool owned by one active path.
#[derive(Debug)]
pub struct ParticleSystem {
    migration_id: String,
    curve: GlobeCurve,
    particles: Vec<Particle>,
    path_opacity: f32,
}

impl ParticleSystem {
    fn new(
        migration_id: String,
        curve: GlobeCurve,
        count: usize,
        travel_time: f32,
    ) -> Self {
        let length = curve.length();
        let speed = length / travel_time.max(f32::EPSILON);
        // Spreading delays over half a cycle keeps early frames from
        // looking empty while still staggering the flow.
        let delay_step = travel_time * 0.5 / count.max(1) as f32;

        let particles = (0..count)
            .map(|i| Particle {
                distance: length * i as f32 / count.max(1) as f32,
                speed,
                start_delay: i as f32 * delay_step,
                visible: false,
            })
            .collect();

        Self {
            migration_id,
            curve,
            particles,
            path_opacity: 1.0,
        }
    }

    fn animate(&mut self, delta: f32) {
        let length = self.curve.length();

        if length <= 0.0 {
            return;
        }

        for particle in self.particles.iter_mut() {
            if particle.visible == false {
                particle.start_delay -= delta;
                if particle.start_delay > 0.0 {
                    continue;
                }
                particle.visible = true;
            }

            particle.distance =
                (particle.distance + particle.speed * delta) % length;
        }
    }

    #[inline]
    pub fn migration_id(&self) -> &str {
        &self.migration_id
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn path_length(&self) -> f32 {
        self.curve.length()
    }

    /// Drawable state of every visible particle, with the endpoint
    /// fade applied.
    pub fn instances(
        &self,
    ) -> impl Iterator<Item = ParticleInstance> + '_ {
        let length = self.curve.length().max(f32::EPSILON);

        self.particles
            .iter()
            .filter(|p| p.visible)
            .map(move |p| {
                let t = p.distance / length;
                let edge_fade = (t / FADE_SPAN)
                    .min((1.0 - t) / FADE_SPAN)
                    .clamp(0.0, 1.0);

                ParticleInstance {
                    position: self.curve.point_at_distance(p.distance),
                    opacity: edge_fade * self.path_opacity,
                }
            })
    }
}

/// Manages one [`ParticleSystem`] per active path, keyed by migration
/// id.
#[derive(Debug)]
pub struct ParticleChoreographer {
    particles_per_path: usize,
    travel_time: f32,
    systems: HashMap<String, ParticleSystem>,
}

impl ParticleChoreographer {
    pub fn new(config: &TourConfig) -> Self {
        Self {
            particles_per_path: config.particles_per_path,
            travel_time: config.particle_travel_time,
            systems: HashMap::new(),
        }
    }

    /// Reconcile the managed systems against the given selection.
    ///
    /// Paths absent from `active` are torn down; newly present paths
    /// get a fresh staggered pool. `curve_for` resolves a migration id
    /// to its derived curve; paths without one are skipped with a
    /// warning.
    pub fn reconcile<'c>(
        &mut self,
        active: &[ActivePath],
        mut curve_for: impl FnMut(&str) -> Option<&'c GlobeCurve>,
    ) {
        self.systems.retain(|id, _| {
            active.iter().any(|a| &a.migration_id == id)
        });

        for state in active {
            match self.systems.get_mut(&state.migration_id) {
                Some(system) => {
                    system.path_opacity = state.opacity;
                }
                None => {
                    let Some(curve) =
                        curve_for(&state.migration_id)
                    else {
                        warn!(
                            "no curve for migration {:?}, skipping particles",
                            state.migration_id
                        );
                        continue;
                    };

                    let mut system = ParticleSystem::new(
                        state.migration_id.clone(),
                        curve.clone(),
                        self.particles_per_path,
                        self.travel_time,
                    );
                    system.path_opacity = state.opacity;

                    self.systems
                        .insert(state.migration_id.clone(), system);
                }
            }
        }
    }

    /// Advance every managed pool.
    pub fn animate(&mut self, delta: f32) {
        for system in self.systems.values_mut() {
            system.animate(delta);
        }
    }

    /// Release every pool. Safe no-op when nothing is managed.
    pub fn dispose(&mut self) {
        self.systems.clear();
    }
}

// Getter methods.
impl ParticleChoreographer {
    #[inline]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn system(
        &self,
        migration_id: &str,
    ) -> Option<&ParticleSystem> {
        self.systems.get(migration_id)
    }

    pub fn systems(&self) -> impl Iterator<Item = &ParticleSystem> {
        self.systems.values()
    }

    /// All drawable particles across every system.
    pub fn instances(
        &self,
    ) -> impl Iterator<Item = ParticleInstance> + '_ {
        self.systems.values().flat_map(ParticleSystem::instances)
    }
}

#[cfg(test)]
mod test {
    use bevy_math::Vec3;

    use super::*;

    fn straight_curve() -> GlobeCurve {
        GlobeCurve::through_points(&[
            Vec3::ZERO,
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    fn choreographer() -> ParticleChoreographer {
        ParticleChoreographer::new(&TourConfig {
            particles_per_path: 8,
            particle_travel_time: 4.0,
            ..Default::default()
        })
    }

    #[test]
    fn reconcile_builds_staggered_pools() {
        let curve = straight_curve();
        let mut choreographer = choreographer();

        choreographer.reconcile(
            &[ActivePath::new("m1", 0)],
            |_| Some(&curve),
        );

        let system = choreographer.system("m1").unwrap();
        assert_eq!(system.particles().len(), 8);

        // Distances are spread over the path, delays increase.
        let particles = system.particles();
        assert_eq!(particles[0].distance(), 0.0);
        for pair in particles.windows(2) {
            assert!(pair[0].distance() < pair[1].distance());
            assert!(pair[0].start_delay <= pair[1].start_delay);
        }
    }

    #[test]
    fn reconcile_is_idempotent_and_tears_down() {
        let curve = straight_curve();
        let mut choreographer = choreographer();
        let active = [
            ActivePath::new("m1", 0),
            ActivePath::new("m2", 1),
        ];

        choreographer.reconcile(&active, |_| Some(&curve));
        choreographer.reconcile(&active, |_| Some(&curve));
        assert_eq!(choreographer.system_count(), 2);

        // Everything deselected: zero systems remain.
        choreographer.reconcile(&[], |_| Some(&curve));
        assert_eq!(choreographer.system_count(), 0);
    }

    #[test]
    fn missing_curve_skips_the_path() {
        let mut choreographer = choreographer();
        choreographer
            .reconcile(&[ActivePath::new("m1", 0)], |_| None);
        assert_eq!(choreographer.system_count(), 0);
    }

    #[test]
    fn distances_always_wrap_into_path_length() {
        let curve = straight_curve();
        let mut choreographer = choreographer();
        choreographer.reconcile(
            &[ActivePath::new("m1", 0)],
            |_| Some(&curve),
        );

        for _ in 0..1000 {
            choreographer.animate(0.37);

            let system = choreographer.system("m1").unwrap();
            let length = system.path_length();
            for particle in system.particles() {
                assert!(particle.distance() >= 0.0);
                assert!(particle.distance() < length);
            }
        }
    }

    #[test]
    fn delay_gates_visibility() {
        let curve = straight_curve();
        let mut choreographer = choreographer();
        choreographer.reconcile(
            &[ActivePath::new("m1", 0)],
            |_| Some(&curve),
        );

        choreographer.animate(0.01);
        let system = choreographer.system("m1").unwrap();
        assert!(system.particles()[0].is_visible());
        assert!(
            system.particles()[7].is_visible() == false
        );

        // After a whole travel time everyone is out.
        choreographer.animate(4.0);
        let system = choreographer.system("m1").unwrap();
        assert!(
            system.particles().iter().all(Particle::is_visible)
        );
    }

    #[test]
    fn instances_fade_near_path_ends() {
        let curve = straight_curve();
        let mut choreographer = choreographer();
        choreographer.reconcile(
            &[ActivePath::new("m1", 0)],
            |_| Some(&curve),
        );

        // Make every particle visible, then inspect opacities.
        choreographer.animate(4.0);
        let system = choreographer.system("m1").unwrap();

        for (particle, instance) in
            system.particles().iter().zip(system.instances())
        {
            let t = particle.distance() / system.path_length();
            if t < FADE_SPAN || t > 1.0 - FADE_SPAN {
                assert!(instance.opacity < 1.0);
            } else {
                assert!((instance.opacity - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn path_opacity_scales_instances() {
        let curve = straight_curve();
        let mut choreographer = choreographer();

        let mut faded = ActivePath::new("m1", 0);
        faded.opacity = 0.5;

        choreographer.reconcile(&[faded], |_| Some(&curve));
        choreographer.animate(4.0);

        let system = choreographer.system("m1").unwrap();
        for instance in system.instances() {
            assert!(instance.opacity <= 0.5 + 1e-5);
        }
    }
}
