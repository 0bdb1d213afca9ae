use crate::geometry::{Point, Size};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use std::fmt;
use uuid::Uuid;

/// Engine-owned node storage; insertion order is iteration order.
pub(crate) type NodeMap = IndexMap<NodeId, Node, FxBuildHasher>;

/// Stable node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a [`crate::LayoutEngine`], used as the node back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(Uuid);

impl EngineId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A fixed-size box on the diagram with directed connections to other nodes.
///
/// Connections are stored by id, so a node can reference nodes that have not been added to the
/// same engine yet; the simulator ignores those until they are.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    location: Point,
    size: Size,
    connections: IndexSet<NodeId>,
    engine: Option<EngineId>,
}

impl Node {
    pub fn new(size: Size) -> Self {
        Self::with_id(NodeId::new(), size)
    }

    pub fn with_id(id: NodeId, size: Size) -> Self {
        Self {
            id,
            location: Point::ORIGIN,
            size,
            connections: IndexSet::new(),
            engine: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    pub fn x(&self) -> i64 {
        self.location.x
    }

    pub fn y(&self) -> i64 {
        self.location.y
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Outgoing connections in the order they were made.
    pub fn connections(&self) -> &IndexSet<NodeId> {
        &self.connections
    }

    /// Adds a directed connection to `other`. Returns `false` if it already existed.
    pub fn connect(&mut self, other: NodeId) -> bool {
        self.connections.insert(other)
    }

    pub fn disconnect(&mut self, other: NodeId) -> bool {
        self.connections.shift_remove(&other)
    }

    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }

    /// The engine currently owning this node.
    pub fn engine(&self) -> Option<EngineId> {
        self.engine
    }

    pub(crate) fn set_engine(&mut self, engine: Option<EngineId>) {
        self.engine = engine;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
