//! Model file loading, parent-chain flattening and baking into geometry.
//!
//! Loading never fails for ordinary models: a missing file, malformed JSON
//! or a parent cycle substitutes the builtin missing model and logs the
//! substitution. Only a broken builtin missing model aborts construction,
//! since nothing can stand in for the fallback itself.

use crate::error::{BakeryError, Result};
use crate::model::{BakedModel, BakedQuad, JsonModel, ModelElement, ModelFace, Sprite, SpriteResolver};
use crate::types::{Axis, BlockTransform, Direction, ElementRotation, ResourceLocation};
use glam::{Mat3, Vec3};
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Path of the builtin fallback model.
pub const MISSING_MODEL_PATH: &str = "builtin/missing";
/// Parent marker for flat item models with generated geometry.
pub const GENERATED_MARKER_PATH: &str = "builtin/generated";
/// Parent marker for models rendered by special-case code. Bakes empty.
pub const ENTITY_MARKER_PATH: &str = "builtin/entity";

pub fn missing_model_id() -> ResourceLocation {
    ResourceLocation::parse(MISSING_MODEL_PATH)
}

pub fn generated_marker_id() -> ResourceLocation {
    ResourceLocation::parse(GENERATED_MARKER_PATH)
}

pub fn entity_marker_id() -> ResourceLocation {
    ResourceLocation::parse(ENTITY_MARKER_PATH)
}

/// True for `builtin/*` paths, which never correspond to model files.
pub fn is_builtin(location: &ResourceLocation) -> bool {
    location.path().starts_with("builtin/")
}

/// The checkerboard fallback cube, compiled into the binary so it exists
/// even with no model sources at all.
const MISSING_MODEL_JSON: &str = r##"{
    "textures": {
        "particle": "builtin:missing",
        "missing": "builtin:missing"
    },
    "elements": [
        {
            "from": [0, 0, 0],
            "to": [16, 16, 16],
            "faces": {
                "down":  { "texture": "#missing", "cullface": "down" },
                "up":    { "texture": "#missing", "cullface": "up" },
                "north": { "texture": "#missing", "cullface": "north" },
                "south": { "texture": "#missing", "cullface": "south" },
                "west":  { "texture": "#missing", "cullface": "west" },
                "east":  { "texture": "#missing", "cullface": "east" }
            }
        }
    ]
}"##;

/// Loads model files and flattens parent chains.
pub struct ModelLoader<'a> {
    sources: &'a HashMap<ResourceLocation, serde_json::Value>,
    raw: HashMap<ResourceLocation, JsonModel>,
    resolved: HashMap<ResourceLocation, Arc<JsonModel>>,
}

impl<'a> ModelLoader<'a> {
    /// Fails only when the builtin missing model does not parse, which
    /// leaves the pipeline without a fallback.
    pub fn new(sources: &'a HashMap<ResourceLocation, serde_json::Value>) -> Result<Self> {
        let missing: JsonModel = serde_json::from_str(MISSING_MODEL_JSON)
            .map_err(|e| BakeryError::BuiltinModel(e.to_string()))?;
        let mut raw = HashMap::new();
        raw.insert(missing_model_id(), missing);
        Ok(Self {
            sources,
            raw,
            resolved: HashMap::new(),
        })
    }

    /// Resolve a model with its full parent chain merged in. Never fails:
    /// unresolvable models come back as the missing model.
    pub fn resolve(&mut self, location: &ResourceLocation) -> Arc<JsonModel> {
        if let Some(hit) = self.resolved.get(location) {
            return hit.clone();
        }
        let merged = match self.flatten(location) {
            Ok(model) => Arc::new(model),
            Err(err) => {
                warn!("substituting missing model for {location}: {err}");
                self.missing()
            }
        };
        self.resolved.insert(location.clone(), merged.clone());
        merged
    }

    /// The resolved builtin missing model.
    pub fn missing(&mut self) -> Arc<JsonModel> {
        let id = missing_model_id();
        if let Some(hit) = self.resolved.get(&id) {
            return hit.clone();
        }
        // pre-parsed in new(), cannot be absent
        let model = Arc::new(self.raw.get(&id).cloned().unwrap_or_default());
        self.resolved.insert(id, model.clone());
        model
    }

    /// Walk the parent chain child-to-root and merge root-to-child. A
    /// `builtin/*` parent stops the walk and survives the merge as a marker
    /// for the baker.
    fn flatten(&mut self, location: &ResourceLocation) -> Result<JsonModel> {
        let mut chain: Vec<ResourceLocation> = Vec::new();
        let mut models: Vec<JsonModel> = Vec::new();
        let mut current = location.clone();

        loop {
            if chain.contains(&current) {
                return Err(BakeryError::CircularModelReference(current.to_string()));
            }
            let model = self.load_raw(&current, chain.last())?;
            chain.push(current);
            let parent = model.parent.clone();
            models.push(model);
            match parent {
                Some(p) if !is_builtin(&p) => current = p,
                _ => break,
            }
        }

        let mut iter = models.into_iter().rev();
        let mut merged = iter.next().unwrap_or_default();
        for child in iter {
            merged = merge_models(merged, child);
        }
        Ok(merged)
    }

    fn load_raw(
        &mut self,
        location: &ResourceLocation,
        referrer: Option<&ResourceLocation>,
    ) -> Result<JsonModel> {
        if let Some(hit) = self.raw.get(location) {
            return Ok(hit.clone());
        }
        let json = self.sources.get(location).ok_or_else(|| {
            BakeryError::ModelResolution(match referrer {
                Some(referrer) => format!("model file not found: {location} (wanted by {referrer})"),
                None => format!("model file not found: {location}"),
            })
        })?;
        let model: JsonModel = serde_json::from_value(json.clone())?;
        self.raw.insert(location.clone(), model.clone());
        Ok(model)
    }
}

/// Merge a parent model into a child. Child textures and elements override;
/// display contexts merge key-by-key so parent views the child does not
/// redefine survive. The parent reference is replaced by the parent's own,
/// which carries builtin markers through to the flattened model.
fn merge_models(parent: JsonModel, child: JsonModel) -> JsonModel {
    let mut merged = parent;

    merged.textures.extend(child.textures);
    if !child.elements.is_empty() {
        merged.elements = child.elements;
    }
    merged.ambient_occlusion = child.ambient_occlusion;

    merged.display = match (merged.display.take(), child.display) {
        (Some(parent_display), Some(child_display)) => {
            match (parent_display.as_object(), child_display.as_object()) {
                (Some(parent_obj), Some(child_obj)) => {
                    let mut combined = parent_obj.clone();
                    for (key, value) in child_obj {
                        combined.insert(key.clone(), value.clone());
                    }
                    Some(serde_json::Value::Object(combined))
                }
                _ => Some(child_display),
            }
        }
        (parent_display, None) => parent_display,
        (None, child_display) => child_display,
    };

    merged
}

/// Bakes flattened models into renderer geometry, cached per model and
/// block transform.
pub struct Baker<'a> {
    loader: ModelLoader<'a>,
    sprites: &'a dyn SpriteResolver,
    cache: HashMap<(ResourceLocation, BlockTransform), Arc<BakedModel>>,
}

impl<'a> Baker<'a> {
    pub fn new(
        sources: &'a HashMap<ResourceLocation, serde_json::Value>,
        sprites: &'a dyn SpriteResolver,
    ) -> Result<Self> {
        Ok(Self {
            loader: ModelLoader::new(sources)?,
            sprites,
            cache: HashMap::new(),
        })
    }

    /// Bake one model under a block transform. Cached: equal keys share one
    /// baked instance. Fails on invalid element geometry; the caller decides
    /// whether that is fatal.
    pub fn bake(
        &mut self,
        location: &ResourceLocation,
        transform: BlockTransform,
    ) -> Result<Arc<BakedModel>> {
        let key = (location.clone(), transform);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        let model = self.loader.resolve(location);
        let baked = match model.parent.as_ref() {
            Some(marker) if *marker == entity_marker_id() => {
                // rendered by special-case code; only the particle survives
                Arc::new(BakedModel {
                    quads: Vec::new(),
                    particle: self.particle_sprite(location, &model),
                    ambient_occlusion: model.ambient_occlusion,
                })
            }
            Some(marker) if *marker == generated_marker_id() => {
                let generated = generate_item_model(&model);
                Arc::new(self.bake_model(location, &generated, transform)?)
            }
            _ => Arc::new(self.bake_model(location, &model, transform)?),
        };

        self.cache.insert(key, baked.clone());
        Ok(baked)
    }

    fn bake_model(
        &self,
        location: &ResourceLocation,
        model: &JsonModel,
        transform: BlockTransform,
    ) -> Result<BakedModel> {
        let mut quads = Vec::new();
        for element in &model.elements {
            validate_element(location, element)?;
            // fixed direction order keeps output deterministic
            for direction in Direction::ALL {
                if let Some(face) = element.faces.get(&direction) {
                    quads.push(self.bake_face(location, model, element, direction, face, transform));
                }
            }
        }
        Ok(BakedModel {
            quads,
            particle: self.particle_sprite(location, model),
            ambient_occlusion: model.ambient_occlusion,
        })
    }

    fn bake_face(
        &self,
        location: &ResourceLocation,
        model: &JsonModel,
        element: &ModelElement,
        direction: Direction,
        face: &ModelFace,
        transform: BlockTransform,
    ) -> BakedQuad {
        let sprite = self.face_sprite(location, model, &face.texture);
        let from = element.normalized_from();
        let to = element.normalized_to();
        let (positions, mut uvs) = face_geometry(direction, from, to, face.normalized_uv(), face.rotation);

        if transform.uvlock {
            uvs = rotate_uvs(uvs, uvlock_rotation(direction, transform));
        }

        let positions = match &element.rotation {
            Some(rotation) => apply_element_rotation(positions, rotation),
            None => positions,
        };
        let positions = apply_block_transform(positions, transform);
        let normal = rotate_normal(direction.normal(), transform);

        let mapped = [
            sprite.map_uv(uvs[0][0], uvs[0][1]),
            sprite.map_uv(uvs[1][0], uvs[1][1]),
            sprite.map_uv(uvs[2][0], uvs[2][1]),
            sprite.map_uv(uvs[3][0], uvs[3][1]),
        ];

        BakedQuad {
            positions,
            uvs: mapped,
            normal,
            sprite,
            cull_face: face
                .cullface
                .map(|c| c.rotate_by_transform(transform.x, transform.y)),
            tint_index: face.tintindex,
            shade: element.shade,
        }
    }

    fn face_sprite(&self, location: &ResourceLocation, model: &JsonModel, reference: &str) -> Sprite {
        let Some(texture) = model.resolve_texture(reference) else {
            warn!("unresolved texture reference '{reference}' in {location}");
            return Sprite::missing();
        };
        if texture == ResourceLocation::new("builtin", "missing") {
            return Sprite::missing();
        }
        match self.sprites.resolve(location, &texture) {
            Some(sprite) => sprite,
            None => {
                warn!("no sprite for texture {texture} referenced by {location}");
                Sprite::missing()
            }
        }
    }

    /// The particle texture defaults to missing without a warning; most
    /// simple models never declare one.
    fn particle_sprite(&self, location: &ResourceLocation, model: &JsonModel) -> Sprite {
        if !model.textures.contains_key("particle") {
            return Sprite::missing();
        }
        self.face_sprite(location, model, "#particle")
    }
}

/// Elements may overhang one block but not by more than a full block, and
/// must not be inverted.
fn validate_element(location: &ResourceLocation, element: &ModelElement) -> Result<()> {
    for axis in 0..3 {
        let (lo, hi) = (element.from[axis], element.to[axis]);
        if !(-16.0..=32.0).contains(&lo) || !(-16.0..=32.0).contains(&hi) {
            return Err(BakeryError::Bake(format!(
                "element coordinates out of range [-16, 32] in {location}: from {:?} to {:?}",
                element.from, element.to
            )));
        }
        if lo > hi {
            return Err(BakeryError::Bake(format!(
                "inverted element in {location}: from {:?} to {:?}",
                element.from, element.to
            )));
        }
    }
    Ok(())
}

/// Synthesize flat item geometry for a `builtin/generated` model: one
/// front/back quad pair per `layerN` texture, tinted by layer index.
fn generate_item_model(model: &JsonModel) -> JsonModel {
    let mut generated = model.clone();
    generated.elements = Vec::new();

    for layer in 0.. {
        let key = format!("layer{layer}");
        if !generated.textures.contains_key(&key) {
            break;
        }
        let texture = format!("#{key}");
        let faces = [Direction::South, Direction::North]
            .into_iter()
            .map(|d| {
                (
                    d,
                    ModelFace {
                        uv: Some([0.0, 0.0, 16.0, 16.0]),
                        texture: texture.clone(),
                        cullface: None,
                        rotation: 0,
                        tintindex: layer as i32,
                    },
                )
            })
            .collect();
        generated.elements.push(ModelElement {
            from: [0.0, 0.0, 7.5],
            to: [16.0, 16.0, 8.5],
            rotation: None,
            shade: false,
            faces,
        });
    }

    if !generated.textures.contains_key("particle") && generated.textures.contains_key("layer0") {
        generated
            .textures
            .insert("particle".to_string(), "#layer0".to_string());
    }

    generated
}

/// Generate the 4 vertices for a face, in CCW order, in normalized
/// coordinates (-0.5 to 0.5). UV order: top-left, top-right, bottom-right,
/// bottom-left.
fn face_geometry(
    direction: Direction,
    from: [f32; 3],
    to: [f32; 3],
    uv: [f32; 4],
    rotation: i32,
) -> ([[f32; 3]; 4], [[f32; 2]; 4]) {
    let (u1, v1, u2, v2) = (uv[0], uv[1], uv[2], uv[3]);
    let uvs = rotate_uvs([[u1, v1], [u2, v1], [u2, v2], [u1, v2]], rotation);

    let positions = match direction {
        Direction::Down => [
            [from[0], from[1], to[2]],
            [to[0], from[1], to[2]],
            [to[0], from[1], from[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::Up => [
            [from[0], to[1], from[2]],
            [to[0], to[1], from[2]],
            [to[0], to[1], to[2]],
            [from[0], to[1], to[2]],
        ],
        Direction::North => [
            [to[0], to[1], from[2]],
            [from[0], to[1], from[2]],
            [from[0], from[1], from[2]],
            [to[0], from[1], from[2]],
        ],
        Direction::South => [
            [from[0], to[1], to[2]],
            [to[0], to[1], to[2]],
            [to[0], from[1], to[2]],
            [from[0], from[1], to[2]],
        ],
        Direction::West => [
            [from[0], to[1], from[2]],
            [from[0], to[1], to[2]],
            [from[0], from[1], to[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::East => [
            [to[0], to[1], to[2]],
            [to[0], to[1], from[2]],
            [to[0], from[1], from[2]],
            [to[0], from[1], to[2]],
        ],
    };

    (positions, uvs)
}

/// Rotate UV corner assignment in 90-degree steps.
fn rotate_uvs(uvs: [[f32; 2]; 4], rotation: i32) -> [[f32; 2]; 4] {
    let steps = ((rotation / 90) % 4 + 4) % 4;
    let mut result = uvs;
    for _ in 0..steps {
        result = [result[3], result[0], result[1], result[2]];
    }
    result
}

/// Counter-rotation that pins a face's texture in place when the block
/// rotates under uvlock. Only the rotation about the face's own axis shows
/// up in its UVs.
fn uvlock_rotation(direction: Direction, transform: BlockTransform) -> i32 {
    match direction.axis() {
        Axis::Y => -transform.y,
        Axis::X => -transform.x,
        Axis::Z => 0,
    }
}

/// Rotate positions about the element rotation origin, rescaling the two
/// off-axis components when requested.
fn apply_element_rotation(positions: [[f32; 3]; 4], rotation: &ElementRotation) -> [[f32; 3]; 4] {
    let origin = rotation.normalized_origin();
    let angle = rotation.angle_radians();
    let rescale = rotation.rescale_factor();

    let matrix = match rotation.axis {
        Axis::X => Mat3::from_rotation_x(angle),
        Axis::Y => Mat3::from_rotation_y(angle),
        Axis::Z => Mat3::from_rotation_z(angle),
    };

    let mut result = [[0.0; 3]; 4];
    for (i, pos) in positions.iter().enumerate() {
        let p = Vec3::new(pos[0] - origin[0], pos[1] - origin[1], pos[2] - origin[2]);
        let rotated = matrix * p;
        let scaled = if rescale != 1.0 {
            match rotation.axis {
                Axis::X => Vec3::new(rotated.x, rotated.y * rescale, rotated.z * rescale),
                Axis::Y => Vec3::new(rotated.x * rescale, rotated.y, rotated.z * rescale),
                Axis::Z => Vec3::new(rotated.x * rescale, rotated.y * rescale, rotated.z),
            }
        } else {
            rotated
        };
        result[i] = [scaled.x + origin[0], scaled.y + origin[1], scaled.z + origin[2]];
    }
    result
}

fn block_rotation_matrix(transform: BlockTransform) -> Mat3 {
    // Negate angles: blockstate rotations are clockwise from above (Y) and
    // from +X looking toward origin (X), but glam uses the right-hand rule.
    let x_rot = Mat3::from_rotation_x((-transform.x as f32).to_radians());
    let y_rot = Mat3::from_rotation_y((-transform.y as f32).to_radians());
    y_rot * x_rot
}

/// Apply a blockstate rotation around the block center.
fn apply_block_transform(positions: [[f32; 3]; 4], transform: BlockTransform) -> [[f32; 3]; 4] {
    if transform.is_identity() {
        return positions;
    }
    let matrix = block_rotation_matrix(transform);
    let mut result = [[0.0; 3]; 4];
    for (i, pos) in positions.iter().enumerate() {
        let rotated = matrix * Vec3::new(pos[0], pos[1], pos[2]);
        result[i] = [rotated.x, rotated.y, rotated.z];
    }
    result
}

fn rotate_normal(normal: [f32; 3], transform: BlockTransform) -> [f32; 3] {
    if transform.is_identity() {
        return normal;
    }
    let rotated = block_rotation_matrix(transform) * Vec3::new(normal[0], normal[1], normal[2]);
    [rotated.x, rotated.y, rotated.z]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Makes the substitution warnings visible under
    /// `RUST_LOG=model_bakery=warn cargo test -- --nocapture`.
    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sources(entries: &[(&str, &str)]) -> HashMap<ResourceLocation, serde_json::Value> {
        entries
            .iter()
            .map(|(path, json)| {
                (
                    ResourceLocation::parse(path),
                    serde_json::from_str(json).unwrap(),
                )
            })
            .collect()
    }

    fn sprite_table(paths: &[&str]) -> HashMap<ResourceLocation, Sprite> {
        paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let loc = ResourceLocation::parse(path);
                (loc.clone(), Sprite::new(loc, i as f32, 0.0, i as f32 + 1.0, 1.0))
            })
            .collect()
    }

    #[test]
    fn test_parent_chain_merge() {
        let sources = sources(&[
            (
                "block/cube_all",
                r##"{
                    "textures": { "particle": "#all" },
                    "elements": [{
                        "from": [0, 0, 0], "to": [16, 16, 16],
                        "faces": { "up": { "texture": "#all", "cullface": "up" } }
                    }]
                }"##,
            ),
            (
                "block/stone",
                r#"{ "parent": "block/cube_all", "textures": { "all": "block/stone" } }"#,
            ),
        ]);
        let mut loader = ModelLoader::new(&sources).unwrap();
        let model = loader.resolve(&ResourceLocation::parse("block/stone"));

        assert_eq!(model.elements.len(), 1);
        assert_eq!(
            model.resolve_texture("#particle"),
            Some(ResourceLocation::parse("block/stone"))
        );
    }

    #[test]
    fn test_absent_file_substitutes_missing() {
        init_logs();
        let sources = sources(&[]);
        let mut loader = ModelLoader::new(&sources).unwrap();
        let model = loader.resolve(&ResourceLocation::parse("block/nonexistent"));

        assert_eq!(
            model.resolve_texture("#particle"),
            Some(ResourceLocation::new("builtin", "missing"))
        );
    }

    #[test]
    fn test_parent_cycle_substitutes_missing() {
        init_logs();
        let sources = sources(&[
            ("block/a", r#"{ "parent": "block/b" }"#),
            ("block/b", r#"{ "parent": "block/a" }"#),
        ]);
        let mut loader = ModelLoader::new(&sources).unwrap();
        let model = loader.resolve(&ResourceLocation::parse("block/a"));

        assert_eq!(
            model.resolve_texture("#particle"),
            Some(ResourceLocation::new("builtin", "missing"))
        );
    }

    #[test]
    fn test_builtin_marker_survives_merge() {
        let sources = sources(&[(
            "item/stick",
            r#"{ "parent": "builtin/generated", "textures": { "layer0": "item/stick" } }"#,
        )]);
        let mut loader = ModelLoader::new(&sources).unwrap();
        let model = loader.resolve(&ResourceLocation::parse("item/stick"));

        assert_eq!(model.parent, Some(generated_marker_id()));
    }

    #[test]
    fn test_bake_cache_shares_instances() {
        let sources = sources(&[(
            "block/stone",
            r##"{
                "textures": { "all": "block/stone" },
                "elements": [{
                    "from": [0, 0, 0], "to": [16, 16, 16],
                    "faces": { "up": { "texture": "#all" } }
                }]
            }"##,
        )]);
        let sprites = sprite_table(&["block/stone"]);
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let location = ResourceLocation::parse("block/stone");
        let first = baker.bake(&location, BlockTransform::default()).unwrap();
        let second = baker.bake(&location, BlockTransform::default()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let rotated = baker
            .bake(&location, BlockTransform::new(0, 90, false))
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &rotated));
    }

    #[test]
    fn test_generated_item_geometry() {
        let sources = sources(&[(
            "item/stick",
            r#"{ "parent": "builtin/generated", "textures": { "layer0": "item/stick" } }"#,
        )]);
        let sprites = sprite_table(&["item/stick"]);
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let baked = baker
            .bake(&ResourceLocation::parse("item/stick"), BlockTransform::default())
            .unwrap();
        // one layer: front and back quads
        assert_eq!(baked.quads.len(), 2);
        assert!(baked.quads.iter().all(|q| q.tint_index == 0));
        assert_eq!(baked.particle.location, ResourceLocation::parse("item/stick"));
    }

    #[test]
    fn test_entity_marker_bakes_empty() {
        let sources = sources(&[(
            "block/chest",
            r#"{ "parent": "builtin/entity", "textures": { "particle": "block/oak_planks" } }"#,
        )]);
        let sprites = sprite_table(&["block/oak_planks"]);
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let baked = baker
            .bake(&ResourceLocation::parse("block/chest"), BlockTransform::default())
            .unwrap();
        assert!(baked.is_empty());
        assert_eq!(
            baked.particle.location,
            ResourceLocation::parse("block/oak_planks")
        );
    }

    #[test]
    fn test_inverted_element_fails_bake() {
        let sources = sources(&[(
            "block/broken",
            r##"{
                "elements": [{
                    "from": [8, 0, 0], "to": [4, 16, 16],
                    "faces": { "up": { "texture": "#all" } }
                }]
            }"##,
        )]);
        let sprites: HashMap<ResourceLocation, Sprite> = HashMap::new();
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let result = baker.bake(&ResourceLocation::parse("block/broken"), BlockTransform::default());
        assert!(matches!(result, Err(BakeryError::Bake(_))));
    }

    #[test]
    fn test_unknown_sprite_falls_back() {
        init_logs();
        let sources = sources(&[(
            "block/stone",
            r##"{
                "textures": { "all": "block/stone" },
                "elements": [{
                    "from": [0, 0, 0], "to": [16, 16, 16],
                    "faces": { "up": { "texture": "#all" } }
                }]
            }"##,
        )]);
        let sprites: HashMap<ResourceLocation, Sprite> = HashMap::new();
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let baked = baker
            .bake(&ResourceLocation::parse("block/stone"), BlockTransform::default())
            .unwrap();
        assert!(baked.quads[0].sprite.is_missing());
    }

    #[test]
    fn test_block_rotation_moves_cullface() {
        let sources = sources(&[(
            "block/stone",
            r##"{
                "textures": { "all": "block/stone" },
                "elements": [{
                    "from": [0, 0, 0], "to": [16, 16, 16],
                    "faces": { "north": { "texture": "#all", "cullface": "north" } }
                }]
            }"##,
        )]);
        let sprites = sprite_table(&["block/stone"]);
        let mut baker = Baker::new(&sources, &sprites).unwrap();

        let baked = baker
            .bake(&ResourceLocation::parse("block/stone"), BlockTransform::new(0, 90, false))
            .unwrap();
        assert_eq!(baked.quads[0].cull_face, Some(Direction::East));
    }

    #[test]
    fn test_rotate_uvs_steps() {
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert_eq!(rotate_uvs(uvs, 0), uvs);
        assert_eq!(
            rotate_uvs(uvs, 90),
            [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
        );
        assert_eq!(rotate_uvs(uvs, 360), uvs);
        assert_eq!(rotate_uvs(rotate_uvs(uvs, 90), -90), uvs);
    }
}
