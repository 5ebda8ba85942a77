//! Block state properties, state enumeration and the block registry.
//!
//! A block type is parameterized by a set of properties with closed value
//! domains; its states are the cartesian product of those domains. State
//! handles are stable for the registry's lifetime.

pub mod predicate;

pub use predicate::{PropertyMatch, StateCondition, StatePredicate};

use crate::error::{BakeryError, Result};
use crate::types::ResourceLocation;
use std::collections::HashMap;
use std::fmt;

/// The closed value domain of a block state property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Bool,
    Int { min: i32, max: i32 },
    Enum { values: Vec<String> },
}

/// A named property with a closed, ordered value domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    kind: PropertyKind,
}

impl Property {
    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Bool,
        }
    }

    pub fn int(name: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Int { min, max },
        }
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: PropertyKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// All values of the domain, in canonical order.
    pub fn values(&self) -> Vec<PropertyValue> {
        match &self.kind {
            PropertyKind::Bool => vec![PropertyValue::Bool(false), PropertyValue::Bool(true)],
            PropertyKind::Int { min, max } => (*min..=*max).map(PropertyValue::Int).collect(),
            PropertyKind::Enum { values } => values
                .iter()
                .cloned()
                .map(PropertyValue::Enum)
                .collect(),
        }
    }

    /// Parse a serialized value against the domain.
    /// Returns None when the string is not a legal value.
    pub fn parse_value(&self, raw: &str) -> Option<PropertyValue> {
        match &self.kind {
            PropertyKind::Bool => match raw {
                "true" => Some(PropertyValue::Bool(true)),
                "false" => Some(PropertyValue::Bool(false)),
                _ => None,
            },
            PropertyKind::Int { min, max } => raw
                .parse::<i32>()
                .ok()
                .filter(|v| (*min..=*max).contains(v))
                .map(PropertyValue::Int),
            PropertyKind::Enum { values } => values
                .iter()
                .find(|v| v.as_str() == raw)
                .cloned()
                .map(PropertyValue::Enum),
        }
    }

    /// Comma-joined legal values, for error messages.
    pub fn allowed_values(&self) -> String {
        self.values()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One concrete value of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Enum(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Enum(v) => write!(f, "{v}"),
        }
    }
}

/// The property set of one block type and the enumeration of all states it
/// induces (cartesian product of the domains, in declaration order).
#[derive(Debug, Clone)]
pub struct StateManager {
    properties: Vec<Property>,
    states: Vec<Vec<PropertyValue>>,
}

impl StateManager {
    pub fn new(properties: Vec<Property>) -> Result<Self> {
        for (i, property) in properties.iter().enumerate() {
            if properties[..i].iter().any(|p| p.name() == property.name()) {
                return Err(BakeryError::DuplicateProperty(property.name().to_string()));
            }
        }
        let states = Self::enumerate(&properties);
        Ok(Self { properties, states })
    }

    /// A manager with no properties: exactly one state.
    pub fn stateless() -> Self {
        Self {
            properties: Vec::new(),
            states: vec![Vec::new()],
        }
    }

    fn enumerate(properties: &[Property]) -> Vec<Vec<PropertyValue>> {
        let mut states: Vec<Vec<PropertyValue>> = vec![Vec::new()];
        for property in properties {
            let values = property.values();
            let mut next = Vec::with_capacity(states.len() * values.len());
            for state in &states {
                for value in &values {
                    let mut extended = state.clone();
                    extended.push(value.clone());
                    next.push(extended);
                }
            }
            states = next;
        }
        states
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Index of a property by serialized name, in declaration order.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Values of one state, parallel to `properties()`.
    pub fn values(&self, state: usize) -> &[PropertyValue] {
        &self.states[state]
    }

    /// `"a=true,b=low"` in declaration order; empty for stateless blocks.
    pub fn variant_string(&self, state: usize) -> String {
        self.properties
            .iter()
            .zip(self.states[state].iter())
            .map(|(p, v)| format!("{}={}", p.name(), v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// How a block's states are rendered. Only `Model` states participate in
/// model resolution and bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderType {
    Model,
    BlockEntity,
    Invisible,
}

/// Index of a block type in its registry.
pub type BlockId = usize;

/// Handle to one concrete block state. Stable for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    pub block: BlockId,
    pub state: usize,
}

/// An identity-stable registry entry owning its state manager.
#[derive(Debug)]
pub struct BlockType {
    id: ResourceLocation,
    states: StateManager,
    render_type: RenderType,
    synthetic: bool,
}

impl BlockType {
    pub fn id(&self) -> &ResourceLocation {
        &self.id
    }

    pub fn states(&self) -> &StateManager {
        &self.states
    }

    pub fn render_type(&self) -> RenderType {
        self.render_type
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

/// The registry of block types. Block ids are stable indices.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: Vec<BlockType>,
    by_id: HashMap<ResourceLocation, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        id: ResourceLocation,
        states: StateManager,
        render_type: RenderType,
    ) -> BlockId {
        self.insert(id, states, render_type, false)
    }

    /// Register a synthetic (non-registry) block type, e.g. a frame-like
    /// entity that still needs model resolution. Synthetic entries are
    /// resolved before regular blocks during load.
    pub fn register_synthetic(
        &mut self,
        id: ResourceLocation,
        states: StateManager,
        render_type: RenderType,
    ) -> BlockId {
        self.insert(id, states, render_type, true)
    }

    fn insert(
        &mut self,
        id: ResourceLocation,
        states: StateManager,
        render_type: RenderType,
        synthetic: bool,
    ) -> BlockId {
        let block = self.blocks.len();
        self.by_id.insert(id.clone(), block);
        self.blocks.push(BlockType {
            id,
            states,
            render_type,
            synthetic,
        });
        block
    }

    pub fn get(&self, block: BlockId) -> &BlockType {
        &self.blocks[block]
    }

    pub fn lookup(&self, id: &ResourceLocation) -> Option<BlockId> {
        self.by_id.get(id).copied()
    }

    /// True when `state` refers to a registered block and a valid state
    /// index. `StateId` fields are public, so handles from elsewhere can be
    /// out of range.
    pub fn contains(&self, state: StateId) -> bool {
        self.blocks
            .get(state.block)
            .is_some_and(|b| state.state < b.states.state_count())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block ids in resource-load order: synthetic entries first, so later
    /// real blocks cannot collide with their identifiers.
    pub fn load_order(&self) -> Vec<BlockId> {
        let mut order: Vec<BlockId> = Vec::with_capacity(self.blocks.len());
        order.extend((0..self.blocks.len()).filter(|&b| self.blocks[b].synthetic));
        order.extend((0..self.blocks.len()).filter(|&b| !self.blocks[b].synthetic));
        order
    }

    /// All states of one block type, in enumeration order.
    pub fn states_of(&self, block: BlockId) -> impl Iterator<Item = StateId> + '_ {
        (0..self.blocks[block].states.state_count()).map(move |state| StateId { block, state })
    }

    /// Values of a state, parallel to the block's property declaration order.
    pub fn state_values(&self, state: StateId) -> &[PropertyValue] {
        self.blocks[state.block].states.values(state.state)
    }

    /// Serialized property-value string of a state, declaration order.
    pub fn variant_string(&self, state: StateId) -> String {
        self.blocks[state.block].states.variant_string(state.state)
    }
}
