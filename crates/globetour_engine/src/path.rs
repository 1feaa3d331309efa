//! Migration paths and their renderable form.
//!
//! A [`MigrationPath`] is the immutable waypoint record; the
//! [`PathRenderer`] owns one renderable per *active* path, keyed by
//! migration id, and reconciles that set against the caller's
//! selection every frame. Creating the same id twice is an update, not
//! a duplicate.

use bevy_math::Vec3;
use bevy_platform::collections::HashMap;
use log::warn;

use crate::geo::GeoPoint;
use crate::spline::GlobeCurve;
use crate::TourConfig;

/// Vertices emitted per rendered path.
const PATH_VERTEX_COUNT: usize = 128;

/// The glow shader clock ping-pongs inside `[0, SHADER_TIME_SPAN]`
/// instead of resetting, which would visibly pop.
const SHADER_TIME_SPAN: f32 = 4.0;

/// How a rendered path is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum PathStyle {
    Line { width: f32 },
    Tube { radius: f32 },
    /// Per-vertex color ramp from start to end, RGBA.
    Gradient { start: [f32; 4], end: [f32; 4] },
    Glow { color: [f32; 4], intensity: f32 },
    /// Geometry-less; the particle choreographer carries the visual.
    ParticleTrail,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::Line { width: 1.0 }
    }
}

/// One migration route: an ordered waypoint list (start, stops, end)
/// and the smooth curve derived from it.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MigrationPath {
    pub id: String,
    pub species: String,
    /// Major migratory route grouping, used for filtering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flyway: Option<String>,
    waypoints: Vec<GeoPoint>,
    #[cfg_attr(feature = "serde", serde(skip))]
    curve: Option<GlobeCurve>,
}

impl MigrationPath {
    pub fn new(
        id: impl Into<String>,
        species: impl Into<String>,
        waypoints: Vec<GeoPoint>,
    ) -> Self {
        Self {
            id: id.into(),
            species: species.into(),
            flyway: None,
            waypoints,
            curve: None,
        }
    }

    #[inline]
    pub fn with_flyway(mut self, flyway: impl Into<String>) -> Self {
        self.flyway = Some(flyway.into());
        self
    }

    #[inline]
    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    /// Replace the waypoints, invalidating the derived curve.
    pub fn set_waypoints(&mut self, waypoints: Vec<GeoPoint>) {
        self.waypoints = waypoints;
        self.curve = None;
    }

    /// Recompute the derived curve, lifting each waypoint by the
    /// height offset above the reference sphere.
    pub fn rebuild_curve(&mut self, radius: f32, height_offset: f32) {
        let points: Vec<Vec3> = self
            .waypoints
            .iter()
            .map(|wp| wp.to_cartesian(radius + height_offset))
            .collect();

        self.curve = GlobeCurve::through_points(&points);
    }

    /// The derived curve, if the waypoints were sufficient to build
    /// one and [`rebuild_curve`](Self::rebuild_curve) has run.
    #[inline]
    pub fn curve(&self) -> Option<&GlobeCurve> {
        self.curve.as_ref()
    }
}

/// Mutable per-selection state of a visible migration.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePath {
    pub migration_id: String,
    pub opacity: f32,
    pub is_animating: bool,
    /// Fraction of the path currently drawn in, in `[0, 1]`.
    pub draw_progress: f32,
    /// Selection order, for stacking/coloring decisions downstream.
    pub order: usize,
}

impl ActivePath {
    pub fn new(migration_id: impl Into<String>, order: usize) -> Self {
        Self {
            migration_id: migration_id.into(),
            opacity: 1.0,
            is_animating: true,
            draw_progress: 0.0,
            order,
        }
    }
}

/// Renderable data for one active path, ready for the host scene
/// graph to turn into a mesh.
#[derive(Debug, Clone)]
pub struct RenderedPath {
    pub migration_id: String,
    pub style: PathStyle,
    pub vertices: Vec<Vec3>,
    /// Per-vertex RGBA, populated for [`PathStyle::Gradient`].
    pub colors: Vec<[f32; 4]>,
    pub opacity: f32,
    pub draw_progress: f32,
    pub is_animating: bool,
    pub order: usize,
}

impl RenderedPath {
    /// The vertex prefix visible at the current draw-in progress.
    pub fn visible_vertices(&self) -> &[Vec3] {
        let count = (self.vertices.len() as f32
            * self.draw_progress.clamp(0.0, 1.0))
        .round() as usize;

        &self.vertices[..count.min(self.vertices.len())]
    }
}

/// Owns the renderable form of every active path plus the shared
/// glow-shader clock.
#[derive(Debug)]
pub struct PathRenderer {
    radius: f32,
    height_offset: f32,
    draw_in_rate: f32,
    paths: HashMap<String, RenderedPath>,
    shader_time: f32,
    shader_direction: f32,
}

impl PathRenderer {
    pub fn new(config: &TourConfig) -> Self {
        Self {
            radius: config.globe_radius,
            height_offset: config.path_height_offset,
            draw_in_rate: config.draw_in_rate,
            paths: HashMap::new(),
            shader_time: 0.0,
            shader_direction: 1.0,
        }
    }

    /// Create or refresh the renderable for a migration path.
    ///
    /// Returns whether a renderable now exists. Paths whose waypoints
    /// cannot form a curve degrade to a logged no-op.
    pub fn render_path(
        &mut self,
        path: &mut MigrationPath,
        style: PathStyle,
    ) -> bool {
        if path.curve().is_none() {
            path.rebuild_curve(self.radius, self.height_offset);
        }

        let Some(curve) = path.curve() else {
            warn!(
                "not rendering path {:?}: needs at least 2 waypoints",
                path.id
            );
            return false;
        };

        let vertices = curve.even_points(PATH_VERTEX_COUNT);
        let colors = gradient_colors(style, vertices.len());

        match self.paths.get_mut(&path.id) {
            // Idempotent: a second render of the same id refreshes
            // geometry and style in place.
            Some(rendered) => {
                rendered.style = style;
                rendered.vertices = vertices;
                rendered.colors = colors;
            }
            None => {
                let order = self.paths.len();
                self.paths.insert(
                    path.id.clone(),
                    RenderedPath {
                        migration_id: path.id.clone(),
                        style,
                        vertices,
                        colors,
                        opacity: 1.0,
                        draw_progress: 0.0,
                        is_animating: true,
                        order,
                    },
                );
            }
        }

        true
    }

    /// Drop renderables whose migration is no longer active and copy
    /// the per-selection state onto those that remain.
    pub fn reconcile(&mut self, active: &[ActivePath]) {
        self.paths.retain(|id, _| {
            active.iter().any(|a| &a.migration_id == id)
        });

        for state in active {
            if let Some(rendered) =
                self.paths.get_mut(&state.migration_id)
            {
                rendered.opacity = state.opacity;
                rendered.is_animating = state.is_animating;
                rendered.order = state.order;
            }
        }
    }

    /// Advance the shared shader clock and any running draw-in
    /// animations.
    pub fn update_animation(&mut self, delta: f32) {
        self.shader_time += self.shader_direction * delta;

        if self.shader_time >= SHADER_TIME_SPAN {
            self.shader_time = SHADER_TIME_SPAN;
            self.shader_direction = -1.0;
        } else if self.shader_time <= 0.0 {
            self.shader_time = 0.0;
            self.shader_direction = 1.0;
        }

        for rendered in self.paths.values_mut() {
            if rendered.is_animating == false {
                continue;
            }

            rendered.draw_progress = (rendered.draw_progress
                + self.draw_in_rate * delta)
                .min(1.0);

            if rendered.draw_progress >= 1.0 {
                rendered.is_animating = false;
            }
        }
    }

    /// Remove one path's renderable. Unknown ids are a safe no-op.
    pub fn clear_path(&mut self, migration_id: &str) -> bool {
        self.paths.remove(migration_id).is_some()
    }

    /// Release every owned renderable. Safe to call when nothing is
    /// loaded.
    pub fn dispose(&mut self) {
        self.paths.clear();
    }
}

// Getter methods.
impl PathRenderer {
    #[inline]
    pub fn shader_time(&self) -> f32 {
        self.shader_time
    }

    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, migration_id: &str) -> Option<&RenderedPath> {
        self.paths.get(migration_id)
    }

    pub fn paths(&self) -> impl Iterator<Item = &RenderedPath> {
        self.paths.values()
    }
}

fn gradient_colors(style: PathStyle, count: usize) -> Vec<[f32; 4]> {
    let PathStyle::Gradient { start, end } = style else {
        return Vec::new();
    };

    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| {
                let t = i as f32 / (count - 1) as f32;
                [
                    start[0] + (end[0] - start[0]) * t,
                    start[1] + (end[1] - start[1]) * t,
                    start[2] + (end[2] - start[2]) * t,
                    start[3] + (end[3] - start[3]) * t,
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn atlantic_path() -> MigrationPath {
        MigrationPath::new(
            "arctic-tern",
            "Sterna paradisaea",
            vec![
                GeoPoint::new(70.0, -20.0),
                GeoPoint::new(40.0, -30.0),
                GeoPoint::new(0.0, -25.0),
                GeoPoint::new(-40.0, -10.0),
            ],
        )
        .with_flyway("East Atlantic")
    }

    #[test]
    fn render_path_rejects_single_waypoint() {
        let mut renderer = PathRenderer::new(&TourConfig::default());
        let mut path = MigrationPath::new(
            "stub",
            "none",
            vec![GeoPoint::new(0.0, 0.0)],
        );

        assert!(renderer.render_path(&mut path, PathStyle::default()) == false);
        assert_eq!(renderer.path_count(), 0);
    }

    #[test]
    fn render_path_is_idempotent_per_id() {
        let mut renderer = PathRenderer::new(&TourConfig::default());
        let mut path = atlantic_path();

        assert!(renderer.render_path(&mut path, PathStyle::default()));
        assert!(renderer.render_path(
            &mut path,
            PathStyle::Glow {
                color: [0.2, 0.6, 1.0, 1.0],
                intensity: 2.0,
            },
        ));

        assert_eq!(renderer.path_count(), 1);
        assert!(matches!(
            renderer.path("arctic-tern").unwrap().style,
            PathStyle::Glow { .. }
        ));
    }

    #[test]
    fn gradient_styles_emit_vertex_colors() {
        let mut renderer = PathRenderer::new(&TourConfig::default());
        let mut path = atlantic_path();

        renderer.render_path(
            &mut path,
            PathStyle::Gradient {
                start: [1.0, 0.0, 0.0, 1.0],
                end: [0.0, 0.0, 1.0, 1.0],
            },
        );

        let rendered = renderer.path("arctic-tern").unwrap();
        assert_eq!(rendered.colors.len(), rendered.vertices.len());
        assert_eq!(rendered.colors[0], [1.0, 0.0, 0.0, 1.0]);

        let last = rendered.colors[rendered.colors.len() - 1];
        assert!((last[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn reconcile_tears_down_deselected_paths() {
        let mut renderer = PathRenderer::new(&TourConfig::default());
        let mut path = atlantic_path();
        renderer.render_path(&mut path, PathStyle::default());

        renderer.reconcile(&[]);
        assert_eq!(renderer.path_count(), 0);

        // Disposing an already-empty renderer is a safe no-op.
        renderer.dispose();
    }

    #[test]
    fn draw_in_advances_and_settles() {
        let config = TourConfig {
            draw_in_rate: 0.5,
            ..Default::default()
        };
        let mut renderer = PathRenderer::new(&config);
        let mut path = atlantic_path();
        renderer.render_path(&mut path, PathStyle::default());

        renderer.update_animation(1.0);
        let rendered = renderer.path("arctic-tern").unwrap();
        assert!((rendered.draw_progress - 0.5).abs() < 1e-5);
        assert!(rendered.is_animating);
        assert!(
            rendered.visible_vertices().len()
                < rendered.vertices.len()
        );

        renderer.update_animation(10.0);
        let rendered = renderer.path("arctic-tern").unwrap();
        assert_eq!(rendered.draw_progress, 1.0);
        assert!(rendered.is_animating == false);
        assert_eq!(
            rendered.visible_vertices().len(),
            rendered.vertices.len()
        );
    }

    #[test]
    fn shader_clock_ping_pongs() {
        let mut renderer = PathRenderer::new(&TourConfig::default());

        renderer.update_animation(SHADER_TIME_SPAN + 1.0);
        assert_eq!(renderer.shader_time(), SHADER_TIME_SPAN);

        // Direction flipped; the clock comes back down.
        renderer.update_animation(1.0);
        assert!(
            (renderer.shader_time() - (SHADER_TIME_SPAN - 1.0))
                .abs()
                < 1e-5
        );
    }

    #[test]
    fn rebuilding_after_waypoint_change() {
        let mut path = atlantic_path();
        path.rebuild_curve(100.0, 2.0);
        assert!(path.curve().is_some());

        path.set_waypoints(vec![GeoPoint::new(0.0, 0.0)]);
        assert!(path.curve().is_none());

        path.rebuild_curve(100.0, 2.0);
        assert!(path.curve().is_none());
    }
}
