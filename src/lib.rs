//! # Model Bakery
//!
//! A Rust library for resolving and baking block and item models from
//! layered resource packs into renderer-ready lookup tables.
//!
//! ## Overview
//!
//! This library takes a block registry, blockstate definitions and model
//! files as input, and produces immutable tables mapping every block state
//! to a baked model, a particle sprite and a render-equivalence bucket id.
//! States whose definitions resolve to the same models share a single baked
//! instance. Broken data degrades to the builtin missing model instead of
//! failing the reload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use model_bakery::{
//!     BlockModels, BlockRegistry, Property, ReloadInput, RenderType,
//!     ResourceLocation, StateManager,
//! };
//!
//! // Register block types with their state properties
//! let mut registry = BlockRegistry::new();
//! let lamp = registry.register(
//!     ResourceLocation::parse("core:lamp"),
//!     StateManager::new(vec![Property::bool("lit")])?,
//!     RenderType::Model,
//! );
//!
//! // Run the reload pipeline over the pack's definitions and models
//! let models = BlockModels::bake(&ReloadInput {
//!     registry: &registry,
//!     definitions: &definitions,
//!     model_sources: &model_sources,
//!     items: &items,
//!     render_properties: &(),
//!     sprites: &atlas,
//! })?;
//!
//! // Look up baked geometry per state
//! for state in registry.states_of(lamp) {
//!     let baked = models.model(&registry, state);
//! }
//! ```

pub mod block_models;
pub mod error;
pub mod loader;
pub mod model;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use block_models::BlockModels;
pub use error::{BakeryError, Result};
pub use loader::{
    BakedTables, Baker, BlockStatesLoader, ModelLoader, ReloadInput, RenderPropertySource,
    SourcedDefinition, NO_MODEL_BUCKET,
};
pub use model::{BakedModel, BakedQuad, JsonModel, MultipartModel, Sprite, SpriteResolver, Variant};
pub use state::{
    BlockId, BlockRegistry, Property, PropertyValue, RenderType, StateId, StateManager,
};
pub use types::{Axis, BlockTransform, Direction, ModelId, ResourceLocation};
