// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Configuration errors.
//!
//! Everything that can be wrong with a network is detected by
//! `RevenueNetworkBuilder::build` before any search starts. The search itself
//! has no error conditions; an unreachable request simply yields zero revenue.

use crate::index::{BonusIndex, EdgeIndex, TrainIndex, VertexIndex, VisitSetIndex};
use thiserror::Error;

/// The error type for an inconsistent revenue network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A train descriptor carries a negative run-length limit or distance budget.
    #[error("{train} has a negative run-length limit")]
    NegativeTrainLimit { train: TrainIndex },

    /// A per-train value table does not have one entry per configured train.
    #[error("{vertex} has {found} per-train values but {expected} trains are configured")]
    ValueTableLength {
        vertex: VertexIndex,
        expected: usize,
        found: usize,
    },

    /// An edge references a vertex that does not exist.
    #[error("{edge} references {vertex}, but the network only has {num_vertices} vertices")]
    EdgeEndpointOutOfBounds {
        edge: EdgeIndex,
        vertex: VertexIndex,
        num_vertices: usize,
    },

    /// An edge connects a vertex to itself.
    #[error("{edge} connects {vertex} to itself")]
    SelfLoop { edge: EdgeIndex, vertex: VertexIndex },

    /// An edge has a negative distance.
    #[error("{edge} has negative distance {distance}")]
    NegativeDistance { edge: EdgeIndex, distance: i32 },

    /// Two edges connect the same pair of vertices in a simple network.
    #[error("{first} and {second} connect the same vertices, which a simple network does not allow")]
    ParallelEdge { first: EdgeIndex, second: EdgeIndex },

    /// A travel set references an edge that does not exist.
    #[error("travel set of {edge} references {member}, but the network only has {num_edges} edges")]
    TravelSetOutOfBounds {
        edge: EdgeIndex,
        member: EdgeIndex,
        num_edges: usize,
    },

    /// A start vertex does not exist.
    #[error("start vertex {vertex} does not exist (the network has {num_vertices} vertices)")]
    StartVertexOutOfBounds {
        vertex: VertexIndex,
        num_vertices: usize,
    },

    /// A visit-set has no members.
    #[error("{set} is empty")]
    EmptyVisitSet { set: VisitSetIndex },

    /// A visit-set references a vertex that does not exist.
    #[error("{set} references {vertex}, but the network only has {num_vertices} vertices")]
    VisitSetVertexOutOfBounds {
        set: VisitSetIndex,
        vertex: VertexIndex,
        num_vertices: usize,
    },

    /// A visit-set lists the same vertex twice.
    #[error("{set} lists {vertex} more than once")]
    DuplicateVisitSetMember {
        set: VisitSetIndex,
        vertex: VertexIndex,
    },

    /// A bonus does not require any vertex.
    #[error("bonus '{name}' ({bonus}) does not require any vertex")]
    EmptyBonus { bonus: BonusIndex, name: String },

    /// A bonus references a vertex that does not exist.
    #[error("bonus {bonus} references {vertex}, but the network only has {num_vertices} vertices")]
    BonusVertexOutOfBounds {
        bonus: BonusIndex,
        vertex: VertexIndex,
        num_vertices: usize,
    },

    /// A bonus lists the same required vertex twice.
    #[error("bonus {bonus} lists {vertex} more than once")]
    DuplicateBonusVertex { bonus: BonusIndex, vertex: VertexIndex },

    /// A bonus train mask does not have one entry per configured train.
    #[error("bonus {bonus} has a train mask of length {found} but {expected} trains are configured")]
    BonusTrainMaskLength {
        bonus: BonusIndex,
        expected: usize,
        found: usize,
    },
}
