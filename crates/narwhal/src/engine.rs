use crate::algo::{self, DETERMINISTIC_SEED, XorShift64Star};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::geometry::Rectangle;
use crate::graph::{EngineId, Node, NodeId, NodeMap};
use crate::status::{CallbackError, LayoutStatus, StatusCallback};

/// A diagram of nodes and directed connections, arranged with a force-directed algorithm.
///
/// The repulsion force is exerted by every node on every other node. The attraction force is
/// exerted along connections only, in both directions, so isolated nodes are only repelled.
///
/// Engines compare equal by identity, never by content.
#[derive(Debug)]
pub struct LayoutEngine {
    id: EngineId,
    configuration: Configuration,
    nodes: NodeMap,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LayoutEngine {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LayoutEngine {}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            id: EngineId::new(),
            configuration: Configuration::default(),
            nodes: NodeMap::default(),
        }
    }

    pub fn with_configuration(configuration: Configuration) -> Result<Self> {
        configuration.validate()?;
        Ok(Self {
            configuration,
            ..Self::new()
        })
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn set_configuration(&mut self, configuration: Configuration) -> Result<()> {
        configuration.validate()?;
        self.configuration = configuration;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read-only view of the nodes, in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Takes ownership of `node`.
    ///
    /// Returns `Ok(false)` if a node with the same id is already on this diagram. A node still
    /// owned by a different engine is rejected.
    pub fn add_node(&mut self, mut node: Node) -> Result<bool> {
        if self.nodes.contains_key(&node.id()) {
            return Ok(false);
        }
        if let Some(owner) = node.engine().filter(|owner| *owner != self.id) {
            return Err(Error::NodeOwnedByOtherEngine {
                node: node.id(),
                owner,
            });
        }
        node.set_engine(Some(self.id));
        self.nodes.insert(node.id(), node);
        Ok(true)
    }

    /// Removes a node and every connection pointing at it. Connected nodes stay on the diagram.
    ///
    /// Returns `false` if the node was not on this diagram.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        self.take_node(id).is_some()
    }

    /// Like [`LayoutEngine::remove_node`], but hands the node back with its owner cleared.
    pub fn take_node(&mut self, id: NodeId) -> Option<Node> {
        let Some(mut node) = self.nodes.shift_remove(&id) else {
            tracing::warn!(node = %id, engine = %self.id, "node not in this diagram");
            return None;
        };
        for other in self.nodes.values_mut() {
            other.disconnect(id);
        }
        node.set_engine(None);
        Some(node)
    }

    /// Adds a directed connection between two nodes on this diagram.
    ///
    /// Returns `false` if either node is missing or the connection already existed.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.nodes.contains_key(&to) {
            return false;
        }
        self.nodes
            .get_mut(&from)
            .is_some_and(|node| node.connect(to))
    }

    /// Removes all nodes and hands them back in insertion order with their owner cleared.
    /// The engine keeps its identity.
    ///
    /// Connections between the returned nodes are left as they were.
    pub fn clear(&mut self) -> Vec<Node> {
        self.nodes
            .drain(..)
            .map(|(_, mut node)| {
                node.set_engine(None);
                node
            })
            .collect()
    }

    /// Rectangle that fits exactly around every node location.
    pub fn bounds(&self) -> Option<Rectangle> {
        algo::diagram_bounds(&self.nodes)
    }

    /// Runs the force-directed layout, calling `on_status` after every iteration.
    ///
    /// With `deterministic` set, starting positions come from a fixed seed, so the same graph and
    /// configuration always produce the same layout. Returns the final status, or `None` when the
    /// diagram is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Callback`] if `on_status` fails. Node locations are then those of the
    /// last committed iteration, without the final centering.
    pub fn arrange<F>(
        &mut self,
        mut on_status: F,
        deterministic: bool,
    ) -> Result<Option<LayoutStatus>>
    where
        F: FnMut(LayoutStatus) -> std::result::Result<(), CallbackError>,
    {
        self.arrange_with(&mut on_status, deterministic)
    }

    /// [`LayoutEngine::arrange`] for any [`StatusCallback`] implementation.
    pub fn arrange_with<C>(
        &mut self,
        callback: &mut C,
        deterministic: bool,
    ) -> Result<Option<LayoutStatus>>
    where
        C: StatusCallback + ?Sized,
    {
        let seed = if deterministic {
            DETERMINISTIC_SEED
        } else {
            XorShift64Star::entropy_seed()
        };
        tracing::debug!(
            engine = %self.id,
            nodes = self.nodes.len(),
            deterministic,
            seed,
            "arranging diagram"
        );
        algo::arrange(&mut self.nodes, &self.configuration, callback, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn nodes_view_follows_insertion_order() {
        let mut engine = LayoutEngine::new();
        let ids: Vec<NodeId> = (0..4)
            .map(|_| {
                let node = Node::new(Size::new(1, 1));
                let id = node.id();
                engine.add_node(node).unwrap();
                id
            })
            .collect();
        assert!(engine.remove_node(ids[1]));
        let seen: Vec<NodeId> = engine.nodes().map(Node::id).collect();
        assert_eq!(seen, vec![ids[0], ids[2], ids[3]]);
        assert_eq!(engine.nodes().len(), 3);
    }

    #[test]
    fn connect_requires_both_ends() {
        let mut engine = LayoutEngine::new();
        let a = Node::new(Size::default());
        let b = Node::new(Size::default());
        let (a_id, b_id) = (a.id(), b.id());
        engine.add_node(a).unwrap();

        assert!(!engine.connect(a_id, b_id));
        engine.add_node(b).unwrap();
        assert!(engine.connect(a_id, b_id));
        assert!(!engine.connect(a_id, b_id));
        assert!(engine.node(a_id).unwrap().is_connected_to(b_id));
    }
}
