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

//! # Revenue Network
//!
//! `RevenueNetwork` is the validated, immutable input of one revenue
//! calculation: the prepared graph, the train fleet, the start vertices, the
//! visit-sets and the bonuses. It is produced by `RevenueNetworkBuilder::build`,
//! which checks every index and derives the lookup tables the search needs:
//!
//! - symmetric adjacency lists sorted by `(neighbor, edge)`,
//! - travel sets closed under symmetry,
//! - the visit-sets every vertex belongs to,
//! - the complex bonuses every vertex takes part in,
//! - `effective_values[vertex * num_trains + train]`: the value a vertex adds
//!   to a train's route, with simple bonuses folded in and minor stations
//!   zeroed for trains that ignore them.
//!
//! Nothing in the network changes during a search. A new fleet or a changed
//! board means building a new network.

use crate::{
    bonus::Bonus,
    edge::Edge,
    error::ConfigurationError,
    index::{
        BonusIndex, BonusIndexTag, EdgeIndex, EdgeIndexTag, TrainIndex, TrainIndexTag,
        VertexIndex, VertexIndexTag, VisitSetIndex, VisitSetIndexTag,
    },
    train::TrainDescriptor,
    vertex::{Adjacency, Vertex, VertexKind, VertexValues},
};
use num_traits::{PrimInt, Signed};
use railhead_core::utils::index::IndexedVec;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// How the prepared graph represents the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphRepresentation {
    /// At most one edge between any two vertices. Routes are reported from
    /// the visited vertices.
    #[default]
    Simple,
    /// Collapsed form where several edges may join the same two vertices.
    /// Routes are reported from the travelled edges.
    Multigraph,
}

impl std::fmt::Display for GraphRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphRepresentation::Simple => write!(f, "Simple"),
            GraphRepresentation::Multigraph => write!(f, "Multigraph"),
        }
    }
}

/// Adjacency list of one vertex.
pub type AdjacencyList = SmallVec<[Adjacency; 6]>;

/// The validated revenue network.
#[derive(Clone)]
pub struct RevenueNetwork<T> {
    representation: GraphRepresentation,
    vertices: IndexedVec<VertexIndexTag, Vertex<T>>,
    edges: IndexedVec<EdgeIndexTag, Edge>,
    trains: IndexedVec<TrainIndexTag, TrainDescriptor>,
    start_vertices: Vec<VertexIndex>,
    visit_sets: IndexedVec<VisitSetIndexTag, Vec<VertexIndex>>,
    bonuses: IndexedVec<BonusIndexTag, Bonus<T>>,
    adjacency: IndexedVec<VertexIndexTag, AdjacencyList>, // len = num_vertices
    vertex_visit_sets: IndexedVec<VertexIndexTag, SmallVec<[VisitSetIndex; 2]>>, // len = num_vertices
    vertex_complex_bonuses: IndexedVec<VertexIndexTag, SmallVec<[BonusIndex; 2]>>, // len = num_vertices
    complex_bonuses: Vec<BonusIndex>,
    effective_values: Vec<T>, // len = num_vertices * num_trains
}

impl<T> RevenueNetwork<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn representation(&self) -> GraphRepresentation {
        self.representation
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_trains(&self) -> usize {
        self.trains.len()
    }

    #[inline]
    pub fn num_visit_sets(&self) -> usize {
        self.visit_sets.len()
    }

    #[inline]
    pub fn num_bonuses(&self) -> usize {
        self.bonuses.len()
    }

    /// Returns the vertex at `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..num_vertices()`.
    #[inline]
    pub fn vertex(&self, vertex: VertexIndex) -> &Vertex<T> {
        debug_assert!(
            vertex.get() < self.num_vertices(),
            "called `RevenueNetwork::vertex` with vertex index out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            vertex.get()
        );

        &self.vertices[vertex]
    }

    #[inline]
    pub fn vertices(&self) -> &IndexedVec<VertexIndexTag, Vertex<T>> {
        &self.vertices
    }

    /// Returns the edge at `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not in `0..num_edges()`.
    #[inline]
    pub fn edge(&self, edge: EdgeIndex) -> &Edge {
        debug_assert!(
            edge.get() < self.num_edges(),
            "called `RevenueNetwork::edge` with edge index out of bounds: the len is {} but the index is {}",
            self.num_edges(),
            edge.get()
        );

        &self.edges[edge]
    }

    #[inline]
    pub fn edges(&self) -> &IndexedVec<EdgeIndexTag, Edge> {
        &self.edges
    }

    /// Returns the descriptor of `train`.
    ///
    /// # Panics
    ///
    /// Panics if `train` is not in `0..num_trains()`.
    #[inline]
    pub fn train(&self, train: TrainIndex) -> &TrainDescriptor {
        debug_assert!(
            train.get() < self.num_trains(),
            "called `RevenueNetwork::train` with train index out of bounds: the len is {} but the index is {}",
            self.num_trains(),
            train.get()
        );

        &self.trains[train]
    }

    #[inline]
    pub fn trains(&self) -> &IndexedVec<TrainIndexTag, TrainDescriptor> {
        &self.trains
    }

    /// Returns the start vertices shared by every train, without duplicates.
    #[inline]
    pub fn start_vertices(&self) -> &[VertexIndex] {
        &self.start_vertices
    }

    /// Returns the members of `set`.
    #[inline]
    pub fn visit_set(&self, set: VisitSetIndex) -> &[VertexIndex] {
        &self.visit_sets[set]
    }

    /// Returns the visit-sets `vertex` belongs to.
    #[inline]
    pub fn visit_sets_of(&self, vertex: VertexIndex) -> &[VisitSetIndex] {
        &self.vertex_visit_sets[vertex]
    }

    #[inline]
    pub fn bonus(&self, bonus: BonusIndex) -> &Bonus<T> {
        &self.bonuses[bonus]
    }

    #[inline]
    pub fn bonuses(&self) -> &IndexedVec<BonusIndexTag, Bonus<T>> {
        &self.bonuses
    }

    /// Returns all bonuses that require more than one vertex.
    #[inline]
    pub fn complex_bonuses(&self) -> &[BonusIndex] {
        &self.complex_bonuses
    }

    /// Returns the complex bonuses that list `vertex` as a requirement.
    #[inline]
    pub fn complex_bonuses_at(&self, vertex: VertexIndex) -> &[BonusIndex] {
        &self.vertex_complex_bonuses[vertex]
    }

    /// Returns the adjacency of `vertex`, sorted by `(neighbor, edge)`.
    #[inline]
    pub fn neighbors(&self, vertex: VertexIndex) -> &[Adjacency] {
        &self.adjacency[vertex]
    }

    #[inline]
    pub fn degree(&self, vertex: VertexIndex) -> usize {
        self.adjacency[vertex].len()
    }

    /// Returns `true` if trains may end at `vertex` but not pass through it.
    /// Start vertices are never sinks.
    #[inline]
    pub fn is_sink(&self, vertex: VertexIndex) -> bool {
        self.vertices[vertex].is_sink()
    }

    #[inline]
    pub fn is_major(&self, vertex: VertexIndex) -> bool {
        self.vertices[vertex].is_major()
    }

    #[inline]
    pub fn is_minor(&self, vertex: VertexIndex) -> bool {
        self.vertices[vertex].is_minor()
    }

    #[inline]
    pub fn is_station(&self, vertex: VertexIndex) -> bool {
        self.vertices[vertex].is_station()
    }

    /// Returns `true` if `vertex` is a station from the point of view of
    /// `train`: a major station, or a minor one the train does not ignore.
    #[inline]
    pub fn is_station_for(&self, vertex: VertexIndex, train: TrainIndex) -> bool {
        match self.vertices[vertex].kind() {
            VertexKind::Major => true,
            VertexKind::Minor => !self.trains[train].ignore_minors(),
            VertexKind::Side | VertexKind::Hub => false,
        }
    }

    /// Returns the value `vertex` adds to the route of `train`, simple
    /// bonuses included.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn value_for(&self, vertex: VertexIndex, train: TrainIndex) -> T {
        let index = vertex.get() * self.num_trains() + train.get();
        debug_assert!(
            index < self.effective_values.len(),
            "called `RevenueNetwork::value_for` with index out of bounds: the len is {} but the index is {}",
            self.effective_values.len(),
            index
        );

        self.effective_values[index]
    }
}

impl<T> std::fmt::Debug for RevenueNetwork<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevenueNetwork")
            .field("representation", &self.representation)
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("trains", &self.trains)
            .field("start_vertices", &self.start_vertices)
            .field("visit_sets", &self.visit_sets)
            .field("bonuses", &self.bonuses)
            .finish()
    }
}

impl<T> std::fmt::Display for RevenueNetwork<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RevenueNetwork({}, vertices: {}, edges: {}, trains: {}, starts: {}, visit-sets: {}, bonuses: {})",
            self.representation,
            self.num_vertices(),
            self.num_edges(),
            self.num_trains(),
            self.start_vertices.len(),
            self.num_visit_sets(),
            self.num_bonuses()
        )
    }
}

/// Collects the configuration of a revenue network.
///
/// Indices handed out by the `add_*` methods are dense and in insertion
/// order. Nothing is checked until `build`, so items may reference each other
/// in any order (an edge may name a travel-set partner added later).
///
/// # Examples
///
/// ```rust
/// # use railhead_model::network::RevenueNetworkBuilder;
/// # use railhead_model::train::TrainDescriptor;
/// # use railhead_model::vertex::Vertex;
/// # use railhead_model::edge::Edge;
///
/// let mut builder = RevenueNetworkBuilder::<i32>::new();
/// builder.add_train(TrainDescriptor::standard("2", 2, 0));
/// let a = builder.add_vertex(Vertex::major(20));
/// let b = builder.add_vertex(Vertex::major(30));
/// builder.add_edge(Edge::new(a, b));
/// builder.add_start_vertex(a);
///
/// let network = builder.build().unwrap();
/// assert_eq!(network.num_vertices(), 2);
/// assert_eq!(network.degree(a), 1);
/// ```
#[derive(Clone)]
pub struct RevenueNetworkBuilder<T> {
    representation: GraphRepresentation,
    vertices: Vec<Vertex<T>>,
    edges: Vec<Edge>,
    trains: Vec<TrainDescriptor>,
    start_vertices: Vec<VertexIndex>,
    visit_sets: Vec<Vec<VertexIndex>>,
    bonuses: Vec<Bonus<T>>,
}

impl<T> Default for RevenueNetworkBuilder<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RevenueNetworkBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates an empty builder for a simple graph.
    pub fn new() -> Self {
        Self {
            representation: GraphRepresentation::Simple,
            vertices: Vec::new(),
            edges: Vec::new(),
            trains: Vec::new(),
            start_vertices: Vec::new(),
            visit_sets: Vec::new(),
            bonuses: Vec::new(),
        }
    }

    /// Sets the graph representation.
    #[inline]
    pub fn with_representation(mut self, representation: GraphRepresentation) -> Self {
        self.representation = representation;
        self
    }

    #[inline]
    pub fn set_representation(&mut self, representation: GraphRepresentation) -> &mut Self {
        self.representation = representation;
        self
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_trains(&self) -> usize {
        self.trains.len()
    }

    pub fn add_vertex(&mut self, vertex: Vertex<T>) -> VertexIndex {
        self.vertices.push(vertex);
        VertexIndex::new(self.vertices.len() - 1)
    }

    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        self.edges.push(edge);
        EdgeIndex::new(self.edges.len() - 1)
    }

    /// Adds a greedy edge of distance one between `a` and `b`.
    pub fn connect(&mut self, a: VertexIndex, b: VertexIndex) -> EdgeIndex {
        self.add_edge(Edge::new(a, b))
    }

    pub fn add_train(&mut self, train: TrainDescriptor) -> TrainIndex {
        self.trains.push(train);
        TrainIndex::new(self.trains.len() - 1)
    }

    /// Adds a start vertex. Repeated start vertices are kept once.
    pub fn add_start_vertex(&mut self, vertex: VertexIndex) -> &mut Self {
        self.start_vertices.push(vertex);
        self
    }

    pub fn add_start_vertices<I>(&mut self, vertices: I) -> &mut Self
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        self.start_vertices.extend(vertices);
        self
    }

    /// Adds a group of vertices that represent one physical location.
    pub fn add_visit_set<I>(&mut self, vertices: I) -> VisitSetIndex
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        self.visit_sets.push(vertices.into_iter().collect());
        VisitSetIndex::new(self.visit_sets.len() - 1)
    }

    pub fn add_bonus(&mut self, bonus: Bonus<T>) -> BonusIndex {
        self.bonuses.push(bonus);
        BonusIndex::new(self.bonuses.len() - 1)
    }

    /// Validates the configuration and builds the network.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found, checking trains,
    /// vertices, edges, start vertices, visit-sets and bonuses in that order.
    pub fn build(self) -> Result<RevenueNetwork<T>, ConfigurationError> {
        self.validate()?;

        let num_vertices = self.vertices.len();
        let num_trains = self.trains.len();

        let mut edges = self.edges;
        close_travel_sets(&mut edges);

        let mut adjacency: IndexedVec<VertexIndexTag, AdjacencyList> =
            IndexedVec::filled(AdjacencyList::new(), num_vertices);
        for (index, edge) in edges.iter().enumerate() {
            let edge_index = EdgeIndex::new(index);
            let (a, b) = edge.endpoints();
            adjacency[a].push(Adjacency::new(b, edge_index));
            adjacency[b].push(Adjacency::new(a, edge_index));
        }
        for list in adjacency.iter_mut() {
            list.sort_unstable();
        }

        let mut vertex_visit_sets: IndexedVec<VertexIndexTag, SmallVec<[VisitSetIndex; 2]>> =
            IndexedVec::filled(SmallVec::new(), num_vertices);
        for (index, members) in self.visit_sets.iter().enumerate() {
            for &member in members {
                vertex_visit_sets[member].push(VisitSetIndex::new(index));
            }
        }

        let mut vertex_complex_bonuses: IndexedVec<VertexIndexTag, SmallVec<[BonusIndex; 2]>> =
            IndexedVec::filled(SmallVec::new(), num_vertices);
        let mut complex_bonuses = Vec::new();
        for (index, bonus) in self.bonuses.iter().enumerate() {
            if bonus.is_simple() {
                continue;
            }
            let bonus_index = BonusIndex::new(index);
            complex_bonuses.push(bonus_index);
            for &vertex in bonus.vertices() {
                vertex_complex_bonuses[vertex].push(bonus_index);
            }
        }

        let mut effective_values = vec![T::zero(); num_vertices * num_trains];
        for (v, vertex) in self.vertices.iter().enumerate() {
            for (t, train) in self.trains.iter().enumerate() {
                let ignored = vertex.kind() == VertexKind::Minor && train.ignore_minors();
                let base = if ignored {
                    T::zero()
                } else {
                    vertex.values().get(TrainIndex::new(t)).unwrap_or_else(T::zero)
                };
                effective_values[v * num_trains + t] = base;
            }
        }
        for bonus in self.bonuses.iter().filter(|bonus| bonus.is_simple()) {
            let vertex = bonus.vertices()[0];
            for t in 0..num_trains {
                if bonus.applies_to(TrainIndex::new(t)) {
                    let slot = &mut effective_values[vertex.get() * num_trains + t];
                    *slot = slot.saturating_add(bonus.value());
                }
            }
        }

        let mut seen = FxHashSet::default();
        let start_vertices: Vec<VertexIndex> = self
            .start_vertices
            .into_iter()
            .filter(|vertex| seen.insert(*vertex))
            .collect();

        // Trains may always pass through a start vertex.
        let mut vertices = self.vertices;
        for &vertex in &start_vertices {
            vertices[vertex.get()].set_sink(false);
        }

        Ok(RevenueNetwork {
            representation: self.representation,
            vertices: IndexedVec::from(vertices),
            edges: IndexedVec::from(edges),
            trains: IndexedVec::from(self.trains),
            start_vertices,
            visit_sets: IndexedVec::from(self.visit_sets),
            bonuses: IndexedVec::from(self.bonuses),
            adjacency,
            vertex_visit_sets,
            vertex_complex_bonuses,
            complex_bonuses,
            effective_values,
        })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let num_vertices = self.vertices.len();
        let num_edges = self.edges.len();
        let num_trains = self.trains.len();

        for (index, train) in self.trains.iter().enumerate() {
            if train.has_negative_limit() {
                return Err(ConfigurationError::NegativeTrainLimit {
                    train: TrainIndex::new(index),
                });
            }
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if let VertexValues::PerTrain(values) = vertex.values()
                && values.len() != num_trains
            {
                return Err(ConfigurationError::ValueTableLength {
                    vertex: VertexIndex::new(index),
                    expected: num_trains,
                    found: values.len(),
                });
            }
        }

        let mut endpoints: FxHashMap<(VertexIndex, VertexIndex), EdgeIndex> = FxHashMap::default();
        for (index, edge) in self.edges.iter().enumerate() {
            let edge_index = EdgeIndex::new(index);
            let (a, b) = edge.endpoints();
            for vertex in [a, b] {
                if vertex.get() >= num_vertices {
                    return Err(ConfigurationError::EdgeEndpointOutOfBounds {
                        edge: edge_index,
                        vertex,
                        num_vertices,
                    });
                }
            }
            if a == b {
                return Err(ConfigurationError::SelfLoop {
                    edge: edge_index,
                    vertex: a,
                });
            }
            if edge.distance() < 0 {
                return Err(ConfigurationError::NegativeDistance {
                    edge: edge_index,
                    distance: edge.distance(),
                });
            }
            if let Some(&member) = edge.travel_set().iter().find(|m| m.get() >= num_edges) {
                return Err(ConfigurationError::TravelSetOutOfBounds {
                    edge: edge_index,
                    member,
                    num_edges,
                });
            }
            if self.representation == GraphRepresentation::Simple {
                let key = (a.min(b), a.max(b));
                if let Some(&first) = endpoints.get(&key) {
                    return Err(ConfigurationError::ParallelEdge {
                        first,
                        second: edge_index,
                    });
                }
                endpoints.insert(key, edge_index);
            }
        }

        if let Some(&vertex) = self.start_vertices.iter().find(|v| v.get() >= num_vertices) {
            return Err(ConfigurationError::StartVertexOutOfBounds {
                vertex,
                num_vertices,
            });
        }

        for (index, members) in self.visit_sets.iter().enumerate() {
            let set = VisitSetIndex::new(index);
            if members.is_empty() {
                return Err(ConfigurationError::EmptyVisitSet { set });
            }
            let mut seen = FxHashSet::default();
            for &vertex in members {
                if vertex.get() >= num_vertices {
                    return Err(ConfigurationError::VisitSetVertexOutOfBounds {
                        set,
                        vertex,
                        num_vertices,
                    });
                }
                if !seen.insert(vertex) {
                    return Err(ConfigurationError::DuplicateVisitSetMember { set, vertex });
                }
            }
        }

        for (index, bonus) in self.bonuses.iter().enumerate() {
            let bonus_index = BonusIndex::new(index);
            if bonus.vertices().is_empty() {
                return Err(ConfigurationError::EmptyBonus {
                    bonus: bonus_index,
                    name: bonus.name().to_string(),
                });
            }
            let mut seen = FxHashSet::default();
            for &vertex in bonus.vertices() {
                if vertex.get() >= num_vertices {
                    return Err(ConfigurationError::BonusVertexOutOfBounds {
                        bonus: bonus_index,
                        vertex,
                        num_vertices,
                    });
                }
                if !seen.insert(vertex) {
                    return Err(ConfigurationError::DuplicateBonusVertex {
                        bonus: bonus_index,
                        vertex,
                    });
                }
            }
            if let Some(mask) = bonus.train_mask()
                && mask.len() != num_trains
            {
                return Err(ConfigurationError::BonusTrainMaskLength {
                    bonus: bonus_index,
                    expected: num_trains,
                    found: mask.len(),
                });
            }
        }

        Ok(())
    }
}

impl<T> std::fmt::Debug for RevenueNetworkBuilder<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevenueNetworkBuilder")
            .field("representation", &self.representation)
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("trains", &self.trains)
            .field("start_vertices", &self.start_vertices)
            .field("visit_sets", &self.visit_sets)
            .field("bonuses", &self.bonuses)
            .finish()
    }
}

impl<T> std::fmt::Display for RevenueNetworkBuilder<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RevenueNetworkBuilder(vertices: {}, edges: {}, trains: {})",
            self.vertices.len(),
            self.edges.len(),
            self.trains.len()
        )
    }
}

/// Makes the travel-set relation symmetric and drops self references and
/// duplicates. Indices must already be validated.
fn close_travel_sets(edges: &mut [Edge]) {
    let mut pairs = Vec::new();
    for (index, edge) in edges.iter().enumerate() {
        for &member in edge.travel_set() {
            if member.get() != index {
                pairs.push((member, EdgeIndex::new(index)));
            }
        }
    }
    for (target, member) in pairs {
        edges[target.get()].travel_set_mut().push(member);
    }
    for (index, edge) in edges.iter_mut().enumerate() {
        let set = edge.travel_set_mut();
        set.retain(|member| member.get() != index);
        set.sort_unstable();
        set.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::TrainDescriptor;
    use rstest::rstest;

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn e(i: usize) -> EdgeIndex {
        EdgeIndex::new(i)
    }

    fn t(i: usize) -> TrainIndex {
        TrainIndex::new(i)
    }

    /// Triangle of three majors with one train.
    fn triangle() -> RevenueNetworkBuilder<i32> {
        let mut builder = RevenueNetworkBuilder::new();
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_vertex(Vertex::major(10));
        builder.add_vertex(Vertex::major(20));
        builder.add_vertex(Vertex::major(30));
        builder.connect(v(0), v(1));
        builder.connect(v(1), v(2));
        builder.connect(v(2), v(0));
        builder.add_start_vertex(v(0));
        builder
    }

    #[test]
    fn test_adjacency_is_symmetric_and_sorted() {
        let network = triangle().build().unwrap();
        let n0: Vec<_> = network.neighbors(v(0)).iter().map(|a| a.neighbor).collect();
        assert_eq!(n0, vec![v(1), v(2)]);
        for vertex in network.vertices().indices() {
            for adjacency in network.neighbors(vertex) {
                assert!(
                    network
                        .neighbors(adjacency.neighbor)
                        .iter()
                        .any(|back| back.neighbor == vertex && back.edge == adjacency.edge)
                );
            }
        }
        assert_eq!(network.degree(v(2)), 2);
    }

    #[test]
    fn test_effective_values_fold_simple_bonuses() {
        let mut builder = triangle();
        builder.add_train(TrainDescriptor::express("2E", 2));
        builder.add_bonus(Bonus::new("port", 15, [v(1)]));
        builder.add_bonus(Bonus::new("mail", 5, [v(1)]).with_trains(vec![false, true]));
        let network = builder.build().unwrap();

        assert_eq!(network.value_for(v(1), t(0)), 35);
        assert_eq!(network.value_for(v(1), t(1)), 40);
        assert_eq!(network.value_for(v(2), t(1)), 30);
        assert!(network.complex_bonuses().is_empty());
    }

    #[test]
    fn test_minor_values_zeroed_for_express() {
        let mut builder = RevenueNetworkBuilder::<i32>::new();
        builder.add_train(TrainDescriptor::standard("2+2", 2, 2));
        builder.add_train(TrainDescriptor::express("3E", 3));
        let town = builder.add_vertex(Vertex::minor(10));
        let network = builder.build().unwrap();

        assert_eq!(network.value_for(town, t(0)), 10);
        assert_eq!(network.value_for(town, t(1)), 0);
        assert!(network.is_station_for(town, t(0)));
        assert!(!network.is_station_for(town, t(1)));
    }

    #[test]
    fn test_per_train_values() {
        let mut builder = RevenueNetworkBuilder::<i32>::new();
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_train(TrainDescriptor::standard("5", 5, 0));
        let city = builder.add_vertex(Vertex::major(0).with_train_values(vec![20, 40]));
        let network = builder.build().unwrap();

        assert_eq!(network.value_for(city, t(0)), 20);
        assert_eq!(network.value_for(city, t(1)), 40);
    }

    #[test]
    fn test_complex_bonus_lookup() {
        let mut builder = triangle();
        let bonus = builder.add_bonus(Bonus::new("east-west", 50, [v(0), v(2)]));
        let network = builder.build().unwrap();

        assert_eq!(network.complex_bonuses(), &[bonus]);
        assert_eq!(network.complex_bonuses_at(v(0)), &[bonus]);
        assert!(network.complex_bonuses_at(v(1)).is_empty());
    }

    #[test]
    fn test_visit_set_membership() {
        let mut builder = triangle();
        let set = builder.add_visit_set([v(1), v(2)]);
        let network = builder.build().unwrap();

        assert_eq!(network.visit_set(set), &[v(1), v(2)]);
        assert_eq!(network.visit_sets_of(v(2)), &[set]);
        assert!(network.visit_sets_of(v(0)).is_empty());
    }

    #[test]
    fn test_travel_sets_are_closed_under_symmetry() {
        let mut builder = RevenueNetworkBuilder::<i32>::new()
            .with_representation(GraphRepresentation::Multigraph);
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_vertex(Vertex::major(10));
        builder.add_vertex(Vertex::major(20));
        builder.add_edge(Edge::new(v(0), v(1)).with_travel_set([e(1), e(0)]));
        builder.add_edge(Edge::new(v(0), v(1)));
        let network = builder.build().unwrap();

        assert_eq!(network.edge(e(0)).travel_set(), &[e(1)]);
        assert_eq!(network.edge(e(1)).travel_set(), &[e(0)]);
        assert_eq!(network.neighbors(v(0)).len(), 2);
    }

    #[test]
    fn test_duplicate_start_vertices_are_kept_once() {
        let mut builder = triangle();
        builder.add_start_vertices([v(2), v(0)]);
        let network = builder.build().unwrap();
        assert_eq!(network.start_vertices(), &[v(0), v(2)]);
    }

    #[test]
    fn test_start_vertices_are_never_sinks() {
        let mut builder = triangle();
        let depot = builder.add_vertex(Vertex::side().with_sink(true));
        let offboard = builder.add_vertex(Vertex::major(40).with_sink(true));
        builder.connect(v(2), depot);
        builder.connect(depot, offboard);
        builder.add_start_vertex(depot);
        let network = builder.build().unwrap();

        assert!(!network.is_sink(depot));
        assert!(!network.vertex(depot).is_sink());
        assert!(network.is_sink(offboard));
    }

    #[test]
    fn test_display() {
        let network = triangle().build().unwrap();
        assert_eq!(
            format!("{}", network),
            "RevenueNetwork(Simple, vertices: 3, edges: 3, trains: 1, starts: 1, visit-sets: 0, bonuses: 0)"
        );
    }

    #[rstest]
    #[case::negative_train(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_train(TrainDescriptor::standard("x", -1, 0)); },
        ConfigurationError::NegativeTrainLimit { train: t(1) }
    )]
    #[case::value_table(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_vertex(Vertex::major(0).with_train_values(vec![1, 2])); },
        ConfigurationError::ValueTableLength { vertex: v(3), expected: 1, found: 2 }
    )]
    #[case::endpoint(
        |b: &mut RevenueNetworkBuilder<i32>| { b.connect(v(0), v(9)); },
        ConfigurationError::EdgeEndpointOutOfBounds { edge: e(3), vertex: v(9), num_vertices: 3 }
    )]
    #[case::self_loop(
        |b: &mut RevenueNetworkBuilder<i32>| { b.connect(v(1), v(1)); },
        ConfigurationError::SelfLoop { edge: e(3), vertex: v(1) }
    )]
    #[case::negative_distance(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_edge(Edge::new(v(0), v(1)).with_distance(-2)); },
        ConfigurationError::NegativeDistance { edge: e(3), distance: -2 }
    )]
    #[case::parallel(
        |b: &mut RevenueNetworkBuilder<i32>| { b.connect(v(1), v(0)); },
        ConfigurationError::ParallelEdge { first: e(0), second: e(3) }
    )]
    #[case::travel_set(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_edge(Edge::new(v(0), v(1)).with_travel_set([e(7)])); },
        ConfigurationError::TravelSetOutOfBounds { edge: e(3), member: e(7), num_edges: 4 }
    )]
    #[case::start_vertex(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_start_vertex(v(5)); },
        ConfigurationError::StartVertexOutOfBounds { vertex: v(5), num_vertices: 3 }
    )]
    #[case::empty_visit_set(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_visit_set(Vec::<VertexIndex>::new()); },
        ConfigurationError::EmptyVisitSet { set: VisitSetIndex::new(0) }
    )]
    #[case::visit_set_vertex(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_visit_set([v(0), v(4)]); },
        ConfigurationError::VisitSetVertexOutOfBounds { set: VisitSetIndex::new(0), vertex: v(4), num_vertices: 3 }
    )]
    #[case::visit_set_duplicate(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_visit_set([v(1), v(1)]); },
        ConfigurationError::DuplicateVisitSetMember { set: VisitSetIndex::new(0), vertex: v(1) }
    )]
    #[case::empty_bonus(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_bonus(Bonus::new("none", 5, Vec::<VertexIndex>::new())); },
        ConfigurationError::EmptyBonus { bonus: BonusIndex::new(0), name: "none".to_string() }
    )]
    #[case::bonus_vertex(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_bonus(Bonus::new("far", 5, [v(8)])); },
        ConfigurationError::BonusVertexOutOfBounds { bonus: BonusIndex::new(0), vertex: v(8), num_vertices: 3 }
    )]
    #[case::bonus_duplicate(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_bonus(Bonus::new("twice", 5, [v(2), v(2)])); },
        ConfigurationError::DuplicateBonusVertex { bonus: BonusIndex::new(0), vertex: v(2) }
    )]
    #[case::bonus_mask(
        |b: &mut RevenueNetworkBuilder<i32>| { b.add_bonus(Bonus::new("mask", 5, [v(2)]).with_trains(vec![true, false])); },
        ConfigurationError::BonusTrainMaskLength { bonus: BonusIndex::new(0), expected: 1, found: 2 }
    )]
    fn test_build_rejects_invalid_configuration(
        #[case] configure: fn(&mut RevenueNetworkBuilder<i32>),
        #[case] expected: ConfigurationError,
    ) {
        let mut builder = triangle();
        configure(&mut builder);
        assert_eq!(builder.build().unwrap_err(), expected);
    }

    #[test]
    fn test_multigraph_allows_parallel_edges() {
        let mut builder = triangle().with_representation(GraphRepresentation::Multigraph);
        builder.connect(v(1), v(0));
        let network = builder.build().unwrap();
        assert_eq!(network.num_edges(), 4);
        assert_eq!(network.neighbors(v(0))[0], Adjacency::new(v(1), e(0)));
        assert_eq!(network.neighbors(v(0))[1], Adjacency::new(v(1), e(3)));
    }
}
