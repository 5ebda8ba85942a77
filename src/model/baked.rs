//! Baked model types and the sprite resolution seam.

use crate::types::{Direction, ResourceLocation};
use std::collections::HashMap;

/// A region of the texture atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub location: ResourceLocation,
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl Sprite {
    pub fn new(location: ResourceLocation, u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self {
            location,
            u0,
            v0,
            u1,
            v1,
        }
    }

    /// The checkerboard placeholder sprite for unresolved references.
    pub fn missing() -> Self {
        Self::new(ResourceLocation::new("builtin", "missing"), 0.0, 0.0, 1.0, 1.0)
    }

    pub fn is_missing(&self) -> bool {
        self.location == ResourceLocation::new("builtin", "missing")
    }

    /// Map a 0-1 face coordinate into this sprite's atlas region.
    pub fn map_uv(&self, u: f32, v: f32) -> [f32; 2] {
        [
            self.u0 + (self.u1 - self.u0) * u,
            self.v0 + (self.v1 - self.v0) * v,
        ]
    }
}

/// Maps a texture identifier, in the context of the model that referenced
/// it, to a concrete atlas sprite. Implemented by the atlas stitcher.
pub trait SpriteResolver {
    fn resolve(&self, model: &ResourceLocation, texture: &ResourceLocation) -> Option<Sprite>;
}

/// A flat sprite table ignoring model context, mostly for tests.
impl SpriteResolver for HashMap<ResourceLocation, Sprite> {
    fn resolve(&self, _model: &ResourceLocation, texture: &ResourceLocation) -> Option<Sprite> {
        self.get(texture).cloned()
    }
}

/// A single baked quad: four vertices in CCW order.
#[derive(Debug, Clone)]
pub struct BakedQuad {
    pub positions: [[f32; 3]; 4],
    pub uvs: [[f32; 2]; 4],
    pub normal: [f32; 3],
    pub sprite: Sprite,
    /// If the neighbor in this direction is opaque, the quad is hidden.
    pub cull_face: Option<Direction>,
    /// Tint index for color providers (-1 = no tint).
    pub tint_index: i32,
    pub shade: bool,
}

/// The renderer-consumable compiled form of a model.
#[derive(Debug, Clone)]
pub struct BakedModel {
    pub quads: Vec<BakedQuad>,
    pub particle: Sprite,
    pub ambient_occlusion: bool,
}

impl BakedModel {
    /// An empty model: valid, renders nothing.
    pub fn empty() -> Self {
        Self {
            quads: Vec::new(),
            particle: Sprite::missing(),
            ambient_occlusion: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Quads to render against a given neighbor face; `None` selects quads
    /// that are never culled.
    pub fn quads_for(&self, face: Option<Direction>) -> impl Iterator<Item = &BakedQuad> {
        self.quads.iter().filter(move |q| q.cull_face == face)
    }
}
