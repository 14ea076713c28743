//! Explicit binding between regions and meshes of the anatomical model.
//!
//! Renderers look regions up by mesh name instead of relying on the order
//! in which meshes happen to be traversed.

use crate::core::{round3, RegionKey, RegionalStressVector, REGION_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Name of a mesh in the anatomical model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(pub String);

impl MeshId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mesh binding errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("expected at least 6 meshes, found {0}")]
    TooFewMeshes(usize),
    #[error("mesh {0} is bound to more than one region")]
    DuplicateMesh(MeshId),
}

/// Base color for each region in the viewer palette.
pub fn base_color(region: RegionKey) -> &'static str {
    match region {
        RegionKey::Temporal => "#ff6b6b",
        RegionKey::Cerebellum => "#feca57",
        RegionKey::Frontal => "#1dd1a1",
        RegionKey::Parietal => "#54a0ff",
        RegionKey::Occipital => "#5f27cd",
        RegionKey::Spinal => "#ff9ff3",
    }
}

/// Render instruction for one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshPaint {
    pub mesh: MeshId,
    pub region: RegionKey,
    pub base_color: &'static str,
    /// Region stress rounded for display, in `[0, 1]`
    pub intensity: f64,
}

/// Region to mesh bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMap {
    bindings: BTreeMap<RegionKey, MeshId>,
}

impl MeshMap {
    /// Bind the k-th traversed mesh to the k-th region in canonical order.
    ///
    /// Extra meshes are ignored.
    pub fn from_traversal<S: AsRef<str>>(names: &[S]) -> Result<Self, MeshError> {
        if names.len() < REGION_COUNT {
            return Err(MeshError::TooFewMeshes(names.len()));
        }
        let bindings = RegionKey::ALL
            .into_iter()
            .zip(names)
            .map(|(region, name)| (region, MeshId::new(name.as_ref())))
            .collect();
        Self::checked(bindings)
    }

    /// Replace some bindings, keeping the rest.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<RegionKey, String>,
    ) -> Result<Self, MeshError> {
        for (region, mesh) in overrides {
            self.bindings.insert(*region, MeshId::new(mesh.as_str()));
        }
        Self::checked(self.bindings)
    }

    fn checked(bindings: BTreeMap<RegionKey, MeshId>) -> Result<Self, MeshError> {
        {
            let mut seen = HashSet::new();
            for mesh in bindings.values() {
                if !seen.insert(mesh) {
                    return Err(MeshError::DuplicateMesh(mesh.clone()));
                }
            }
        }
        Ok(Self { bindings })
    }

    /// Mesh bound to a region.
    pub fn mesh_for(&self, region: RegionKey) -> &MeshId {
        // Every constructor binds all six regions.
        &self.bindings[&region]
    }

    /// Region bound to a mesh, if any.
    pub fn region_for(&self, mesh: &str) -> Option<RegionKey> {
        self.bindings
            .iter()
            .find(|(_, id)| id.as_str() == mesh)
            .map(|(region, _)| *region)
    }

    /// Render instructions for every bound mesh, in canonical region order.
    pub fn paint(&self, vector: &RegionalStressVector) -> Vec<MeshPaint> {
        vector
            .iter()
            .map(|(region, value)| MeshPaint {
                mesh: self.mesh_for(region).clone(),
                region,
                base_color: base_color(region),
                intensity: round3(value),
            })
            .collect()
    }
}

impl Default for MeshMap {
    /// Meshes named after their region in lower case.
    fn default() -> Self {
        Self {
            bindings: RegionKey::ALL
                .into_iter()
                .map(|r| (r, MeshId::new(r.as_str().to_lowercase())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = MeshMap::default();
        assert_eq!(map.mesh_for(RegionKey::Spinal).as_str(), "spinal");
        assert_eq!(map.region_for("frontal"), Some(RegionKey::Frontal));
        assert_eq!(map.region_for("brainstem"), None);
    }

    #[test]
    fn test_from_traversal() {
        let names = ["Mesh_0", "Mesh_1", "Mesh_2", "Mesh_3", "Mesh_4", "Mesh_5", "Mesh_6"];
        let map = MeshMap::from_traversal(&names).unwrap();
        assert_eq!(map.mesh_for(RegionKey::Temporal).as_str(), "Mesh_0");
        assert_eq!(map.mesh_for(RegionKey::Spinal).as_str(), "Mesh_5");
        assert_eq!(map.region_for("Mesh_6"), None);

        let short = ["a", "b", "c"];
        assert_eq!(
            MeshMap::from_traversal(&short),
            Err(MeshError::TooFewMeshes(3))
        );
    }

    #[test]
    fn test_overrides_reject_duplicates() {
        let mut overrides = BTreeMap::new();
        overrides.insert(RegionKey::Occipital, "visual_cortex".to_string());
        let map = MeshMap::default().with_overrides(&overrides).unwrap();
        assert_eq!(map.region_for("visual_cortex"), Some(RegionKey::Occipital));

        overrides.insert(RegionKey::Parietal, "visual_cortex".to_string());
        assert!(matches!(
            MeshMap::default().with_overrides(&overrides),
            Err(MeshError::DuplicateMesh(_))
        ));
    }

    #[test]
    fn test_paint_follows_bindings_not_order() {
        let mut overrides = BTreeMap::new();
        overrides.insert(RegionKey::Temporal, "z_last_in_file".to_string());
        let map = MeshMap::default().with_overrides(&overrides).unwrap();

        let vector =
            RegionalStressVector::from_values([0.9876, 0.6, 0.0, 0.0, 0.0, 0.2]).unwrap();
        let paint = map.paint(&vector);
        assert_eq!(paint.len(), 6);
        assert_eq!(paint[0].mesh.as_str(), "z_last_in_file");
        assert_eq!(paint[0].intensity, 0.988);
        assert_eq!(paint[0].base_color, "#ff6b6b");
        assert_eq!(paint[5].region, RegionKey::Spinal);
    }
}
