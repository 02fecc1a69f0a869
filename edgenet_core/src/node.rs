//! Single point agent of a net.
//!
//! A node crawls one pixel per tick along its direction and stops when the
//! intensity difference to the next pixel exceeds its net's resistance.
//!
//! # States
//!
//! | state     | value | meaning                                               |
//! |-----------|-------|-------------------------------------------------------|
//! | `Free`    | 0     | can still advance                                     |
//! | `Ready`   | 1     | sits on an edge; stays alive, never moves again       |
//! | `Blocked` | -1    | next step leaves the image or enters another net      |
//! | `Waste`   | -2    | blocked twice in a row or off the image; pruned       |

use crate::net::NetId;
use crate::ranges::OccupiedRanges;
use edgenet_env::{Coordinate, PixelSource};
use serde::{Deserialize, Serialize};

/// Mobility/vitality status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Free,
    Ready,
    Blocked,
    Waste,
}

impl NodeState {
    /// Contribution of this state to its net's fitness.
    pub fn value(&self) -> i32 {
        match self {
            NodeState::Free => 0,
            NodeState::Ready => 1,
            NodeState::Blocked => -1,
            NodeState::Waste => -2,
        }
    }
}

/// Normalizes an angle in degrees to `[0, 360)`.
pub fn standard_angle(degrees: f64) -> f64 {
    let angle = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// A point agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Current pixel
    position: Coordinate,

    /// Direction in degrees, `[0, 360)`
    direction: f64,

    /// Current state
    state: NodeState,
}

impl Node {
    /// Creates a free node at `position` facing `direction` degrees.
    pub fn new(position: Coordinate, direction: f64) -> Self {
        Self {
            position,
            direction: standard_angle(direction),
            state: NodeState::Free,
        }
    }

    /// Creates a node in an explicit state.
    pub fn with_state(position: Coordinate, direction: f64, state: NodeState) -> Self {
        Self {
            state,
            ..Self::new(position, direction)
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Pixel reached by moving `distance` pixels from the current position.
    ///
    /// The movement vector is subtracted, so 90 degrees moves towards row 0.
    pub fn candidate(&self, distance: i32) -> Coordinate {
        let radians = self.direction.to_radians();
        let dx = (radians.cos() * distance as f64).round() as i32;
        let dy = (radians.sin() * distance as f64).round() as i32;
        Coordinate::new(self.position.x - dx, self.position.y - dy)
    }

    /// Evaluates one move of `distance` pixels and returns the resulting
    /// state. The position changes only when the result is `Free`; the
    /// stored state is left for the caller to update.
    ///
    /// `owner` is the net this node belongs to: its own territory never
    /// blocks it.
    pub fn advance<S: PixelSource + ?Sized>(
        &mut self,
        distance: i32,
        source: &S,
        occupied: &OccupiedRanges,
        owner: NetId,
        resistance: i32,
    ) -> NodeState {
        if !source.contains(self.position.x, self.position.y) {
            return NodeState::Waste;
        }

        let next = self.candidate(distance);
        if !source.contains(next.x, next.y) || occupied.contains_foreign(next.y, owner) {
            return if self.state == NodeState::Blocked {
                NodeState::Waste
            } else {
                NodeState::Blocked
            };
        }

        if self.pixel_difference(source, next).abs() > resistance {
            return NodeState::Ready;
        }

        self.position = next;
        NodeState::Free
    }

    /// Signed intensity difference between the current pixel and `next`.
    ///
    /// Both coordinates must be inside the source.
    pub fn pixel_difference<S: PixelSource + ?Sized>(&self, source: &S, next: Coordinate) -> i32 {
        let here = source.intensity_at(self.position.x as u32, self.position.y as u32) as i32;
        let there = source.intensity_at(next.x as u32, next.y as u32) as i32;
        here - there
    }

    /// Runs one tick: a single-pixel advance whose result becomes the
    /// node's state.
    pub fn step<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        occupied: &OccupiedRanges,
        owner: NetId,
        resistance: i32,
    ) -> NodeState {
        self.state = self.advance(1, source, occupied, owner, resistance);
        self.state
    }
}
