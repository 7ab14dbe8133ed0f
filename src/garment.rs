//! Garment model: meshes, their materials, and how the shirt's appearance
//! (plain color or logo texture) is applied to them.

use anyhow::{Context, Result};
use glam::Vec3;

use crate::math::{parse_hex_color, srgb_to_linear, Rgb, AABB};
use crate::presets::ModelPreset;
use crate::store::ShirtState;
use crate::traits::Bounded;

pub const APPLIED_METALNESS: f32 = 0.1;
pub const APPLIED_ROUGHNESS: f32 = 0.9;
const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Logo image referenced by a data URL; decoding is left to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct LogoTexture {
    pub source: String,
    pub flip_y: bool,
    pub srgb: bool,
}

impl LogoTexture {
    pub fn from_data_url(url: &str) -> Self {
        Self {
            source: url.to_string(),
            flip_y: false,
            srgb: true,
        }
    }

    /// `image/png` for `data:image/png;base64,...`
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.source.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end]).filter(|media| !media.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    /// Base color in linear light, as glTF stores it
    pub color: Rgb,
    pub map: Option<LogoTexture>,
    /// Index of the model's own base color texture, if any
    pub base_texture: Option<usize>,
    pub metalness: f32,
    pub roughness: f32,
    pub needs_update: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            color: WHITE,
            map: None,
            base_texture: None,
            metalness: 0.0,
            roughness: 1.0,
            needs_update: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GarmentMesh {
    pub name: Option<String>,
    /// World-space vertex positions (node transforms already applied)
    pub positions: Vec<Vec3>,
    /// Material as loaded; appearance changes always start from this
    pub base_material: Material,
    /// Material currently shown
    pub material: Material,
}

impl GarmentMesh {
    pub fn new(name: Option<String>, positions: Vec<Vec3>, material: Material) -> Self {
        Self {
            name,
            positions,
            base_material: material.clone(),
            material,
        }
    }
}

/// A loaded garment
#[derive(Debug, Clone, Default)]
pub struct Garment {
    pub meshes: Vec<GarmentMesh>,
}

impl Garment {
    pub fn new(meshes: Vec<GarmentMesh>) -> Self {
        Self { meshes }
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    /// Bounds of all vertices, `None` when there is no geometry
    pub fn local_bounds(&self) -> Option<AABB> {
        AABB::from_points(self.meshes.iter().flat_map(|m| m.positions.iter().copied()))
    }

    /// The garment as placed in the scene by `preset`
    pub fn placed<'g>(&'g self, preset: &ModelPreset) -> PlacedGarment<'g> {
        PlacedGarment {
            garment: self,
            scale: preset.scale,
            offset: preset.offset(),
        }
    }

    /// Show `state` on every mesh
    ///
    /// Each mesh restarts from its base material. A logo replaces the color
    /// with a white base under the logo texture; otherwise the store color is
    /// used and any texture map is cleared.
    pub fn apply_appearance(&mut self, state: &ShirtState) -> Result<()> {
        let logo = state.logo_data_url.as_deref().map(LogoTexture::from_data_url);
        let color = match logo {
            Some(_) => WHITE,
            None => parse_hex_color(&state.color)
                .map(srgb_to_linear)
                .with_context(|| format!("Cannot apply shirt color {:?}", state.color))?,
        };

        for mesh in &mut self.meshes {
            let mut material = mesh.base_material.clone();
            material.map = logo.clone();
            material.color = color;
            material.metalness = APPLIED_METALNESS;
            material.roughness = APPLIED_ROUGHNESS;
            material.needs_update = true;
            mesh.material = material;
        }

        log::debug!(
            "Applied {} to {} meshes",
            if logo.is_some() { "logo" } else { "color" },
            self.meshes.len()
        );
        Ok(())
    }
}

impl Bounded for Garment {
    fn bounds(&self) -> AABB {
        self.local_bounds()
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO))
    }
}

/// Garment with a preset's scale and offset applied
#[derive(Debug, Clone, Copy)]
pub struct PlacedGarment<'g> {
    pub garment: &'g Garment,
    pub scale: f32,
    pub offset: Vec3,
}

impl Bounded for PlacedGarment<'_> {
    fn bounds(&self) -> AABB {
        self.garment.bounds().scaled_and_offset(self.scale, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Garment {
        let material = Material {
            name: Some("fabric".to_string()),
            color: [0.2, 0.3, 0.4],
            base_texture: Some(0),
            ..Material::default()
        };
        Garment::new(vec![GarmentMesh::new(
            Some("body".to_string()),
            vec![
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 2.0, 0.5),
                Vec3::new(-1.0, 2.0, -0.5),
            ],
            material,
        )])
    }

    #[test]
    fn test_apply_color() {
        let mut garment = quad();
        let state = ShirtState {
            color: "#000000".to_string(),
            logo_data_url: None,
        };

        garment.apply_appearance(&state).unwrap();

        let material = &garment.meshes[0].material;
        assert_eq!(material.color, [0.0, 0.0, 0.0]);
        assert!(material.map.is_none());
        assert_eq!(material.metalness, 0.1);
        assert_eq!(material.roughness, 0.9);
        assert!(material.needs_update);
        // Base stays untouched
        assert_eq!(garment.meshes[0].base_material.color, [0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_apply_color_is_linearized() {
        let mut garment = quad();
        let state = ShirtState {
            color: "#808080".to_string(),
            logo_data_url: None,
        };

        garment.apply_appearance(&state).unwrap();

        let [r, g, b] = garment.meshes[0].material.color;
        assert!((r - 0.21586).abs() < 1e-4);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_apply_logo_whitens_base() {
        let mut garment = quad();
        let state = ShirtState {
            color: "#8B0000".to_string(),
            logo_data_url: Some("data:image/png;base64,AAAA".to_string()),
        };

        garment.apply_appearance(&state).unwrap();

        let material = &garment.meshes[0].material;
        assert_eq!(material.color, [1.0, 1.0, 1.0]);
        let map = material.map.as_ref().unwrap();
        assert!(!map.flip_y);
        assert!(map.srgb);
        assert_eq!(map.media_type(), Some("image/png"));
    }

    #[test]
    fn test_removing_logo_clears_map() {
        let mut garment = quad();
        let mut state = ShirtState {
            color: "#ffffff".to_string(),
            logo_data_url: Some("data:image/png;base64,AAAA".to_string()),
        };
        garment.apply_appearance(&state).unwrap();

        state.logo_data_url = None;
        garment.apply_appearance(&state).unwrap();
        assert!(garment.meshes[0].material.map.is_none());
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let mut garment = quad();
        let state = ShirtState {
            color: "teal-ish".to_string(),
            logo_data_url: None,
        };
        assert!(garment.apply_appearance(&state).is_err());
    }

    #[test]
    fn test_bounds_and_placement() {
        let garment = quad();
        let bounds = garment.bounds();
        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, -0.5));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 0.5));

        let preset = crate::presets::PresetTable::builtin().get("shirt").unwrap();
        let placed = garment.placed(preset).bounds();
        assert_eq!(placed.min, Vec3::new(-2.0, -3.5, -1.0));
        assert_eq!(placed.max, Vec3::new(2.0, 0.5, 1.0));
    }

    #[test]
    fn test_empty_garment_bounds() {
        let garment = Garment::default();
        assert!(garment.is_empty());
        assert!(garment.local_bounds().is_none());
        assert_eq!(garment.bounds().max_dimension(), 0.0);
    }

    #[test]
    fn test_media_type_rejects_plain_urls() {
        let logo = LogoTexture::from_data_url("https://example.com/logo.png");
        assert_eq!(logo.media_type(), None);
    }
}
