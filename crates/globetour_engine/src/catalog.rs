//! In-process lookup of loaded migration paths.
//!
//! The catalog stands in for the surrounding data layer: whoever
//! fetches raw occurrence records turns them into [`MigrationPath`]s
//! and parks them here; the orchestrator pulls them out by id when a
//! tour loads.

use bevy_platform::collections::HashMap;

use crate::path::MigrationPath;
use crate::TourConfig;

#[derive(Debug)]
pub struct MigrationCatalog {
    radius: f32,
    height_offset: f32,
    paths: HashMap<String, MigrationPath>,
}

impl MigrationCatalog {
    pub fn new(config: &TourConfig) -> Self {
        Self {
            radius: config.globe_radius,
            height_offset: config.path_height_offset,
            paths: HashMap::new(),
        }
    }

    /// Add a path, deriving its curve. Re-inserting an id replaces
    /// the previous record.
    pub fn insert(&mut self, mut path: MigrationPath) {
        path.rebuild_curve(self.radius, self.height_offset);
        self.paths.insert(path.id.clone(), path);
    }

    pub fn get(&self, id: &str) -> Option<&MigrationPath> {
        self.paths.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<MigrationPath> {
        self.paths.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MigrationPath> {
        self.paths.values()
    }

    /// All migrations of one species.
    pub fn by_species<'c>(
        &'c self,
        species: &'c str,
    ) -> impl Iterator<Item = &'c MigrationPath> {
        self.paths
            .values()
            .filter(move |p| p.species.eq_ignore_ascii_case(species))
    }

    /// All migrations grouped under one flyway.
    pub fn by_flyway<'c>(
        &'c self,
        flyway: &'c str,
    ) -> impl Iterator<Item = &'c MigrationPath> {
        self.paths.values().filter(move |p| {
            p.flyway
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(flyway))
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
