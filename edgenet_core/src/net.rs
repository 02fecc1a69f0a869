//! Nets: chains of nodes that crawl together and track one band boundary.

use crate::node::{Node, NodeState};
use crate::random::Heading;
use crate::ranges::{Limits, OccupiedRanges};
use edgenet_env::{Coordinate, PixelSource};
use serde::{Deserialize, Serialize};

/// Fitness of a net whose every node has been pruned.
///
/// Lower than any score a live net can reach from its limits, so an
/// empty net never survives selection.
pub const EMPTY_NET_FITNESS: i32 = -255;

/// Identifier of a net, unique within one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetId(pub u64);

impl std::fmt::Display for NetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "net-{}", self.0)
    }
}

/// Construction parameters of a net.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetParams {
    /// Row every node starts on
    pub row: i32,

    /// Node count N; the chain gets N + 1 nodes
    pub node_count: usize,

    /// Horizontal distance between neighbouring nodes
    pub horizontal_step: i32,

    /// Crawling direction shared by all nodes
    pub heading: Heading,

    /// Intensity difference a node must see to stop on an edge
    pub resistance: i32,

    /// Vertical spread tolerated without penalty
    pub dispersion_allowed: u32,
}

/// One band candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    id: NetId,

    /// Live nodes, left to right
    nodes: Vec<Node>,

    heading: Heading,

    resistance: i32,

    dispersion_allowed: u32,

    /// Extent of the live nodes; `None` once the chain is empty
    limits: Option<Limits>,
}

impl Net {
    /// Builds a chain of `node_count + 1` nodes on `row`, spaced
    /// `horizontal_step` pixels apart starting at column 0.
    pub fn new(id: NetId, params: NetParams) -> Self {
        let direction = params.heading.degrees();
        let nodes = (0..=params.node_count)
            .map(|i| {
                let x = (i as i64 * params.horizontal_step as i64).min(i32::MAX as i64) as i32;
                Node::new(Coordinate::new(x, params.row), direction)
            })
            .collect();
        Self::from_nodes(id, nodes, params.heading, params.resistance, params.dispersion_allowed)
    }

    /// Builds a net from explicit nodes.
    pub fn from_nodes(
        id: NetId,
        nodes: Vec<Node>,
        heading: Heading,
        resistance: i32,
        dispersion_allowed: u32,
    ) -> Self {
        let mut net = Self {
            id,
            nodes,
            heading,
            resistance,
            dispersion_allowed,
            limits: None,
        };
        net.calculate_limits();
        net
    }

    pub fn id(&self) -> NetId {
        self.id
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn resistance(&self) -> i32 {
        self.resistance
    }

    pub fn dispersion_allowed(&self) -> u32 {
        self.dispersion_allowed
    }

    /// Live nodes in chain order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Vertical extent of the live nodes, `None` for an empty chain.
    pub fn limits(&self) -> Option<Limits> {
        self.limits
    }

    /// Positions of the live nodes in chain order.
    pub fn chain(&self) -> Vec<Coordinate> {
        self.nodes.iter().map(Node::position).collect()
    }

    /// Number of nodes sitting on an edge.
    pub fn ready_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.state() == NodeState::Ready)
            .count()
    }

    /// Sum of node state values plus the thickness score.
    pub fn fitness(&self) -> i32 {
        let Some(limits) = self.limits else {
            return EMPTY_NET_FITNESS;
        };
        let states: i32 = self.nodes.iter().map(|node| node.state().value()).sum();
        states + self.thickness_score(limits.thickness())
    }

    /// Rewards chains tighter than the allowance, penalizes sprawl twice
    /// as hard as its size.
    pub fn thickness_score(&self, thickness: i32) -> i32 {
        let allowed = self.dispersion_allowed.min(i32::MAX as u32) as i32;
        if thickness <= allowed {
            allowed - thickness
        } else {
            thickness * -2
        }
    }

    /// Runs one tick: steps every node that is not on an edge, prunes the
    /// nodes that became waste, then recomputes the limits.
    pub fn run<S: PixelSource + ?Sized>(&mut self, source: &S, occupied: &OccupiedRanges) {
        let (id, resistance) = (self.id, self.resistance);
        for node in self.nodes.iter_mut() {
            if node.state() == NodeState::Ready {
                continue;
            }
            node.step(source, occupied, id, resistance);
        }
        self.nodes.retain(|node| node.state() != NodeState::Waste);
        self.calculate_limits();
    }

    fn calculate_limits(&mut self) {
        let mut rows = self.nodes.iter().map(|node| node.position().y);
        self.limits = rows.next().map(|first| {
            let mut limits = Limits::new(first, first);
            for row in rows {
                limits.include(row);
            }
            limits
        });
    }
}
