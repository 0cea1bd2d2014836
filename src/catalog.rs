use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::parameters::Dimensions;

/// One placement point, expressed as a linear combination of the table
/// dimensions so the same rule follows every resize.
///
/// `position = width * w + depth * d + height * h + thickness * t`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    pub width: Vec3,
    pub depth: Vec3,
    pub height: Vec3,
    pub thickness: Vec3,
}

impl Anchor {
    pub fn resolve(&self, dims: &Dimensions, thickness: f32) -> Vec3 {
        self.width * dims.width
            + self.depth * dims.depth
            + self.height * dims.height
            + self.thickness * thickness
    }
}

/// Declared placement rule for an accessory: one instance per anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub anchors: Vec<Anchor>,
}

impl PlacementRule {
    /// Four instances under the top, inset by the thickness on x and at
    /// quarter depth on z, hanging half a thickness below the floor line.
    pub fn underside_quarter_depth() -> Self {
        let anchor = |x_sign: f32, z_sign: f32| Anchor {
            width: Vec3::new(0.5 * x_sign, 0.0, 0.0),
            depth: Vec3::new(0.0, 0.0, 0.25 * z_sign),
            height: Vec3::ZERO,
            thickness: Vec3::new(-x_sign, -0.5, 0.0),
        };

        Self {
            anchors: vec![
                anchor(1.0, -1.0),
                anchor(1.0, 1.0),
                anchor(-1.0, -1.0),
                anchor(-1.0, 1.0),
            ],
        }
    }

    pub fn instance_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn resolve(&self, dims: &Dimensions, thickness: f32) -> Vec<Vec3> {
        self.anchors.iter().map(|a| a.resolve(dims, thickness)).collect()
    }
}

impl Default for PlacementRule {
    fn default() -> Self {
        Self::underside_quarter_depth()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub label: String,
    pub asset_ref: String,
    #[serde(default)]
    pub placement: PlacementRule,
}

impl CatalogEntry {
    pub fn new(label: impl Into<String>, asset_ref: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            asset_ref: asset_ref.into(),
            placement: PlacementRule::default(),
        }
    }
}

/// Read-only list of selectable accessories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    /// Looks an entry up by asset ref first, then by display label
    pub fn find(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.asset_ref == key)
            .or_else(|| self.entries.iter().find(|e| e.label == key))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry::new("Type 1", "prop_01.glb"),
            CatalogEntry::new("Type 2", "prop_02.glb"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions { height: 700.0, width: 1500.0, depth: 800.0 }
    }

    #[test]
    fn test_underside_rule_positions() {
        let positions = PlacementRule::underside_quarter_depth().resolve(&dims(), 40.0);
        assert_eq!(
            positions,
            vec![
                Vec3::new(710.0, -20.0, -200.0),
                Vec3::new(710.0, -20.0, 200.0),
                Vec3::new(-710.0, -20.0, -200.0),
                Vec3::new(-710.0, -20.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_find_by_label_or_ref() {
        let catalog = Catalog::default();
        assert_eq!(catalog.find("Type 2").unwrap().asset_ref, "prop_02.glb");
        assert_eq!(catalog.find("prop_01.glb").unwrap().label, "Type 1");
        assert!(catalog.find("Type 3").is_none());
    }

    #[test]
    fn test_placement_defaults_when_missing() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"label": "Wheels", "asset_ref": "wheel.glb"}"#).unwrap();
        assert_eq!(entry.placement.instance_count(), 4);
    }

    #[test]
    fn test_custom_placement_from_json() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{
                "label": "Center foot",
                "asset_ref": "foot.glb",
                "placement": { "anchors": [ { "thickness": [0.0, -0.5, 0.0] } ] }
            }"#,
        )
        .unwrap();
        let positions = entry.placement.resolve(&dims(), 40.0);
        assert_eq!(positions, vec![Vec3::new(0.0, -20.0, 0.0)]);
    }
}
