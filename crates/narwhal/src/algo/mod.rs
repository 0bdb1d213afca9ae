//! The force simulator behind [`crate::LayoutEngine::arrange`].
//!
//! Every node repels every other node with an inverse-square force, and each connection acts as
//! a spring that only pulls once it is stretched past the rest length. Forces for one iteration
//! are all computed against the previously committed positions, then committed together.

use crate::config::{Configuration, StopCounting};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rectangle, Vector, bearing_angle, calculate_distance};
use crate::graph::{Node, NodeMap};
use crate::status::{LayoutStatus, StatusCallback};

mod rng;

pub(crate) use rng::XorShift64Star;

/// Seed used for deterministic runs.
pub const DETERMINISTIC_SEED: u64 = 1;

/// Coulomb-style repulsion exerted on the node at `at` by the node at `other`.
///
/// The magnitude is negative (`-Q / d²`) and the direction points toward `other`, so the
/// resulting force pushes away from it. Distances below one pixel are clamped to one.
pub fn repulsion_force(config: &Configuration, at: Point, other: Point) -> Vector {
    let proximity = calculate_distance(at, other).max(1) as f64;
    let force = -(config.repulsion_force / (proximity * proximity));
    Vector::new(force, bearing_angle(at, other))
}

/// Hooke-style attraction exerted on the node at `at` by a node it is connected to.
///
/// Zero while the two nodes are closer than the spring length.
pub fn attraction_force(config: &Configuration, at: Point, other: Point) -> Vector {
    let proximity = calculate_distance(at, other).max(1) as f64;
    let force = config.attraction_force * (proximity - config.spring_length).max(0.0);
    Vector::new(force, bearing_angle(at, other))
}

/// Logical bounds of every node location.
pub(crate) fn diagram_bounds(nodes: &NodeMap) -> Option<Rectangle> {
    let bounds = Rectangle::enclosing(nodes.values().map(Node::location));
    if let Some(r) = bounds {
        tracing::debug!(
            x = r.x,
            y = r.y,
            width = r.width,
            height = r.height,
            "diagram bounds"
        );
    }
    bounds
}

/// Runs one full layout: seeded placement, iteration, then centering.
///
/// Returns the last status, or `None` for an empty graph (no callbacks are made).
pub(crate) fn arrange<C>(
    nodes: &mut NodeMap,
    config: &Configuration,
    callback: &mut C,
    seed: u64,
) -> Result<Option<LayoutStatus>>
where
    C: StatusCallback + ?Sized,
{
    if nodes.is_empty() {
        return Ok(None);
    }

    let mut rng = XorShift64Star::new(seed);
    let mut sim = Simulation::new(nodes, config);
    sim.randomize_initial_coordinates(&mut rng);
    let last = sim.run(callback)?;
    sim.center();
    Ok(Some(last))
}

/// Per-node scratch state for one layout run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeLayoutInformation {
    /// Index into the engine's node map.
    pub(crate) node: usize,
    pub(crate) velocity: Vector,
    pub(crate) next_position: Point,
}

/// Connections resolved to node indexes, with self-loops and unknown targets dropped.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    outgoing: Vec<Vec<usize>>,
    /// Sources listing each node, in engine order.
    incoming: Vec<Vec<usize>>,
}

impl Adjacency {
    fn build(nodes: &NodeMap) -> Self {
        let n = nodes.len();
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (source, node) in nodes.values().enumerate() {
            for target_id in node.connections() {
                let Some(target) = nodes.get_index_of(target_id) else {
                    tracing::debug!(
                        node = %node.id(),
                        target = %target_id,
                        "ignoring connection to a node outside the engine"
                    );
                    continue;
                };
                if target == source {
                    continue;
                }
                outgoing[source].push(target);
                incoming[target].push(source);
            }
        }

        Self { outgoing, incoming }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Converged,
    MaxIterations,
}

pub(crate) struct Simulation<'a> {
    nodes: &'a mut NodeMap,
    config: &'a Configuration,
    adjacency: Adjacency,
    layout: Vec<NodeLayoutInformation>,
}

impl<'a> Simulation<'a> {
    pub(crate) fn new(nodes: &'a mut NodeMap, config: &'a Configuration) -> Self {
        let adjacency = Adjacency::build(nodes);
        let layout = (0..nodes.len())
            .map(|node| NodeLayoutInformation {
                node,
                velocity: Vector::ZERO,
                next_position: Point::ORIGIN,
            })
            .collect();
        Self {
            nodes,
            config,
            adjacency,
            layout,
        }
    }

    /// Places every node uniformly inside `[min_point, max_point]` and resets its scratch state.
    pub(crate) fn randomize_initial_coordinates(&mut self, rng: &mut XorShift64Star) {
        let (min, max) = (self.config.min_point, self.config.max_point);
        for info in &mut self.layout {
            let x = rng.next_in_range(min.x, max.x);
            let y = rng.next_in_range(min.y, max.y);
            self.nodes[info.node].set_location(Point::new(x, y));
            info.velocity = Vector::ZERO;
            info.next_position = Point::ORIGIN;
        }
    }

    /// Net force on node `index` from the committed positions.
    pub(crate) fn net_force(&self, index: usize) -> Vector {
        let at = self.nodes[index].location();
        let mut net = Vector::ZERO;

        for (other, node) in self.nodes.values().enumerate() {
            if other != index {
                net += repulsion_force(self.config, at, node.location());
            }
        }
        for &child in &self.adjacency.outgoing[index] {
            net += attraction_force(self.config, at, self.nodes[child].location());
        }
        for &parent in &self.adjacency.incoming[index] {
            net += attraction_force(self.config, at, self.nodes[parent].location());
        }

        net
    }

    /// Stages every node's next position, then commits them all. Returns the total displacement.
    pub(crate) fn step(&mut self) -> f64 {
        let damping = self.config.damping;
        let mode = self.config.damping_mode;

        for i in 0..self.layout.len() {
            let node = self.layout[i].node;
            let current = Vector::from_origin(self.nodes[node].location());
            let net = self.net_force(node);

            let info = &mut self.layout[i];
            info.velocity = mode.apply(info.velocity + net, damping);
            info.next_position = (current + info.velocity).to_point();
        }

        let mut total_displacement = 0.0f64;
        for info in &self.layout {
            let node = &mut self.nodes[info.node];
            total_displacement += calculate_distance(node.location(), info.next_position) as f64;
            node.set_location(info.next_position);
        }
        total_displacement
    }

    /// Iterates until convergence or the iteration cap, reporting after every commit.
    pub(crate) fn run<C>(&mut self, callback: &mut C) -> Result<LayoutStatus>
    where
        C: StatusCallback + ?Sized,
    {
        let max_iterations = self.config.max_iterations;
        let mut stop_count = 0usize;
        let mut iterations = 0usize;

        loop {
            let total_displacement = self.step();
            iterations += 1;

            if total_displacement < self.config.minimum_total_displacement {
                stop_count += 1;
            } else if self.config.stop_counting == StopCounting::Consecutive {
                stop_count = 0;
            }

            let status = LayoutStatus {
                total_displacement,
                stop_count,
                iterations,
                max_iterations,
            };
            tracing::trace!(iterations, total_displacement, stop_count, "layout iteration");
            callback
                .on_status(status)
                .map_err(|source| Error::Callback { iterations, source })?;

            let reason = if stop_count > self.config.stop_count {
                Some(StopReason::Converged)
            } else if iterations >= max_iterations {
                Some(StopReason::MaxIterations)
            } else {
                None
            };
            if let Some(reason) = reason {
                tracing::debug!(iterations, total_displacement, ?reason, "layout finished");
                return Ok(status);
            }
        }
    }

    /// Moves the bounding-box center to the origin, then offsets each node by its own size.
    pub(crate) fn center(&mut self) {
        let Some(bounds) = diagram_bounds(self.nodes) else {
            return;
        };
        let mid = bounds.center();
        for node in self.nodes.values_mut() {
            let location = node.location() - mid + node.size().as_offset();
            node.set_location(location);
        }
    }
}
