//! Unbaked model data: declarative model files, weighted variant lists and
//! the intern arena that preserves parsed-object identity across a load.

pub mod baked;
pub mod multipart;

pub use baked::{BakedModel, BakedQuad, Sprite, SpriteResolver};
pub use multipart::{MultipartCase, MultipartComponent, MultipartModel};

use crate::types::{BlockTransform, Direction, ElementRotation, ResourceLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum length of a `#name -> #other -> texture` reference chain.
const MAX_TEXTURE_CHAIN: usize = 10;

/// A declarative model file (`models/*.json`), possibly still carrying a
/// parent reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonModel {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<ResourceLocation>,

    /// Whether to use ambient occlusion.
    #[serde(default = "default_ao", rename = "ambientocclusion")]
    pub ambient_occlusion: bool,

    /// Texture variable definitions. Values are either `#references` into
    /// this map or concrete texture identifiers.
    #[serde(default)]
    pub textures: HashMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,

    /// Display transforms, passed through to the renderer untouched.
    #[serde(default)]
    pub display: Option<serde_json::Value>,
}

fn default_ao() -> bool {
    true
}

impl JsonModel {
    /// Model files this one references (its parent, if any).
    pub fn dependencies(&self) -> impl Iterator<Item = &ResourceLocation> {
        self.parent.iter()
    }

    /// Follow a texture reference chain (`#side -> #all -> block/stone`) to
    /// a concrete texture identifier. Returns None for unresolved or
    /// too-deep chains.
    pub fn resolve_texture(&self, reference: &str) -> Option<ResourceLocation> {
        let mut current = reference;
        for _ in 0..MAX_TEXTURE_CHAIN {
            match current.strip_prefix('#') {
                Some(key) => current = self.textures.get(key)?,
                None => return Some(ResourceLocation::parse(current)),
            }
        }
        None
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

fn default_shade() -> bool {
    true
}

impl ModelElement {
    /// Minimum corner in centered unit coordinates (-0.5 to 0.5).
    pub fn normalized_from(&self) -> [f32; 3] {
        crate::types::normalize_point(self.from)
    }

    /// Maximum corner in centered unit coordinates (-0.5 to 0.5).
    pub fn normalized_to(&self) -> [f32; 3] {
        crate::types::normalize_point(self.to)
    }
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., `#side` or `block/stone`).
    pub texture: String,
    /// Face direction for culling.
    #[serde(default)]
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
    /// Tint index for color providers (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

impl ModelFace {
    /// Get normalized UV coordinates (0-1 range), defaulting to the full
    /// texture if not specified.
    pub fn normalized_uv(&self) -> [f32; 4] {
        let uv = self.uv.unwrap_or([0.0, 0.0, 16.0, 16.0]);
        [uv[0] / 16.0, uv[1] / 16.0, uv[2] / 16.0, uv[3] / 16.0]
    }
}

/// A weighted reference to a model file with a blockstate-level rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Model resource location (e.g., "block/stone" or "core:block/stone").
    pub model: ResourceLocation,
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
    /// If true, UV coordinates don't rotate with the block.
    #[serde(default)]
    pub uvlock: bool,
    /// Weight for selection (default 1).
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Variant {
    /// An unrotated, weight-1 reference to `model`.
    pub fn plain(model: ResourceLocation) -> Self {
        Self {
            model,
            x: 0,
            y: 0,
            uvlock: false,
            weight: 1,
        }
    }

    pub fn transform(&self) -> BlockTransform {
        BlockTransform::new(self.x, self.y, self.uvlock)
    }
}

/// Deterministic weighted selection: highest weight wins, earliest entry
/// breaks ties.
pub fn choose_weighted(variants: &[Variant]) -> Option<&Variant> {
    variants.iter().fold(None, |best, candidate| match best {
        Some(current) if current.weight >= candidate.weight => Some(current),
        _ => Some(candidate),
    })
}

/// Handle into a [`ModelArena`]. Two equal handles refer to the same parsed
/// model object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceHandle(usize);

/// Per-load arena of parsed variant lists. Render-equivalence bucketing
/// compares handles, so identity of parsed objects is what is deduplicated,
/// never structural copies.
#[derive(Debug, Default)]
pub struct ModelArena {
    pieces: Vec<Vec<Variant>>,
}

impl ModelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern one parsed variant list, returning its identity handle.
    pub fn intern(&mut self, models: Vec<Variant>) -> PieceHandle {
        self.pieces.push(models);
        PieceHandle(self.pieces.len() - 1)
    }

    pub fn models(&self, handle: PieceHandle) -> &[Variant] {
        &self.pieces[handle.0]
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_model() {
        let json = r#"{
            "parent": "block/cube_all",
            "textures": {
                "all": "block/stone"
            }
        }"#;

        let model: JsonModel = serde_json::from_str(json).unwrap();
        assert_eq!(
            model.parent,
            Some(ResourceLocation::parse("block/cube_all"))
        );
        assert_eq!(model.textures.get("all"), Some(&"block/stone".to_string()));
        assert!(model.elements.is_empty());
        assert!(model.ambient_occlusion);
    }

    #[test]
    fn test_parse_model_with_elements() {
        let json = r##"{
            "textures": {
                "texture": "block/stone"
            },
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "down":  { "texture": "#texture", "cullface": "down" },
                        "up":    { "texture": "#texture", "cullface": "up" }
                    }
                }
            ]
        }"##;

        let model: JsonModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.elements.len(), 1);

        let element = &model.elements[0];
        assert_eq!(element.from, [0.0, 0.0, 0.0]);
        assert_eq!(
            element.faces.get(&Direction::Down).unwrap().cullface,
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_resolve_texture_chain() {
        let model = JsonModel {
            textures: [
                ("all".to_string(), "block/stone".to_string()),
                ("side".to_string(), "#all".to_string()),
                ("particle".to_string(), "#side".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        assert_eq!(
            model.resolve_texture("#particle"),
            Some(ResourceLocation::parse("block/stone"))
        );
        assert_eq!(
            model.resolve_texture("block/dirt"),
            Some(ResourceLocation::parse("block/dirt"))
        );
        assert_eq!(model.resolve_texture("#missing"), None);
    }

    #[test]
    fn test_resolve_texture_cycle_terminates() {
        let model = JsonModel {
            textures: [
                ("a".to_string(), "#b".to_string()),
                ("b".to_string(), "#a".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        assert_eq!(model.resolve_texture("#a"), None);
    }

    #[test]
    fn test_choose_weighted() {
        let variants = vec![
            Variant {
                weight: 3,
                ..Variant::plain(ResourceLocation::parse("block/a"))
            },
            Variant {
                weight: 5,
                ..Variant::plain(ResourceLocation::parse("block/b"))
            },
            Variant {
                weight: 5,
                ..Variant::plain(ResourceLocation::parse("block/c"))
            },
        ];

        // highest weight, first wins
        assert_eq!(
            choose_weighted(&variants).unwrap().model,
            ResourceLocation::parse("block/b")
        );
        assert!(choose_weighted(&[]).is_none());
    }

    #[test]
    fn test_arena_identity() {
        let mut arena = ModelArena::new();
        let models = vec![Variant::plain(ResourceLocation::parse("block/stone"))];
        let first = arena.intern(models.clone());
        let second = arena.intern(models);

        // structural equality of contents, but distinct identities
        assert_eq!(arena.models(first), arena.models(second));
        assert_ne!(first, second);
    }
}
