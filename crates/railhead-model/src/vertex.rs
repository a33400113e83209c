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

//! Vertices of the revenue network.
//!
//! A vertex is a stop or junction of the prepared network. It carries its
//! station classification, whether trains may pass through it, and the value
//! it contributes when a given train visits it.

use crate::index::{EdgeIndex, TrainIndex, VertexIndex};
use num_traits::{PrimInt, Signed};

/// Station classification of a vertex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexKind {
    /// A major station (city); counts against the major budget.
    Major,
    /// A minor station (town); counts against the minor budget unless the
    /// train ignores minors.
    Minor,
    /// A side or edge point of a tile; never a station.
    Side,
    /// A virtual hub introduced by graph preparation; never a station.
    Hub,
}

impl VertexKind {
    /// Returns `true` for major and minor stations.
    #[inline]
    pub const fn is_station(&self) -> bool {
        matches!(self, VertexKind::Major | VertexKind::Minor)
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexKind::Major => write!(f, "Major"),
            VertexKind::Minor => write!(f, "Minor"),
            VertexKind::Side => write!(f, "Side"),
            VertexKind::Hub => write!(f, "Hub"),
        }
    }
}

/// The value table of a vertex.
///
/// Most stations are worth the same to every train; phase- or train-dependent
/// values are given per train, in train index order.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexValues<T> {
    Uniform(T),
    PerTrain(Vec<T>),
}

impl<T> VertexValues<T>
where
    T: Copy,
{
    /// Returns the value for `train`, or `None` if a per-train table is too short.
    #[inline]
    pub fn get(&self, train: TrainIndex) -> Option<T> {
        match self {
            VertexValues::Uniform(value) => Some(*value),
            VertexValues::PerTrain(values) => values.get(train.get()).copied(),
        }
    }
}

/// A vertex of the revenue network.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex<T> {
    kind: VertexKind,
    values: VertexValues<T>,
    sink: bool,
}

impl<T> Vertex<T>
where
    T: PrimInt + Signed,
{
    /// Creates a vertex of the given kind and value table.
    #[inline]
    pub fn new(kind: VertexKind, values: VertexValues<T>) -> Self {
        Self {
            kind,
            values,
            sink: false,
        }
    }

    /// Creates a major station worth `value` to every train.
    #[inline]
    pub fn major(value: T) -> Self {
        Self::new(VertexKind::Major, VertexValues::Uniform(value))
    }

    /// Creates a minor station worth `value` to every train.
    #[inline]
    pub fn minor(value: T) -> Self {
        Self::new(VertexKind::Minor, VertexValues::Uniform(value))
    }

    /// Creates a side (edge point) vertex without value.
    #[inline]
    pub fn side() -> Self {
        Self::new(VertexKind::Side, VertexValues::Uniform(T::zero()))
    }

    /// Creates a virtual hub vertex without value.
    #[inline]
    pub fn hub() -> Self {
        Self::new(VertexKind::Hub, VertexValues::Uniform(T::zero()))
    }

    /// Replaces the value table with one value per train.
    #[inline]
    pub fn with_train_values(mut self, values: Vec<T>) -> Self {
        self.values = VertexValues::PerTrain(values);
        self
    }

    /// Marks the vertex as a sink: trains may end here but not pass through.
    #[inline]
    pub fn with_sink(mut self, sink: bool) -> Self {
        self.sink = sink;
        self
    }

    #[inline]
    pub(crate) fn set_sink(&mut self, sink: bool) {
        self.sink = sink;
    }

    /// Returns the station classification.
    #[inline]
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    /// Returns the raw value table.
    #[inline]
    pub fn values(&self) -> &VertexValues<T> {
        &self.values
    }

    /// Returns `true` if trains may not continue past this vertex.
    #[inline]
    pub fn is_sink(&self) -> bool {
        self.sink
    }

    #[inline]
    pub fn is_major(&self) -> bool {
        self.kind == VertexKind::Major
    }

    #[inline]
    pub fn is_minor(&self) -> bool {
        self.kind == VertexKind::Minor
    }

    #[inline]
    pub fn is_station(&self) -> bool {
        self.kind.is_station()
    }
}

impl<T> std::fmt::Display for Vertex<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.values {
            VertexValues::Uniform(value) => write!(f, "Vertex({}, value: {}", self.kind, value)?,
            VertexValues::PerTrain(values) => {
                write!(f, "Vertex({}, values: [", self.kind)?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")?;
            }
        }
        if self.sink {
            write!(f, ", sink")?;
        }
        write!(f, ")")
    }
}

/// One adjacency slot: the neighbor reached and the edge used to reach it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Adjacency {
    pub neighbor: VertexIndex,
    pub edge: EdgeIndex,
}

impl Adjacency {
    #[inline]
    pub const fn new(neighbor: VertexIndex, edge: EdgeIndex) -> Self {
        Self { neighbor, edge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert!(Vertex::<i32>::major(10).is_major());
        assert!(Vertex::<i32>::minor(10).is_minor());
        assert!(!Vertex::<i32>::side().is_station());
        assert!(!Vertex::<i32>::hub().is_station());
        assert!(Vertex::<i32>::minor(10).is_station());
    }

    #[test]
    fn test_uniform_and_per_train_values() {
        let uniform = Vertex::<i32>::major(20);
        assert_eq!(uniform.values().get(TrainIndex::new(5)), Some(20));

        let per_train = Vertex::<i32>::major(0).with_train_values(vec![10, 40]);
        assert_eq!(per_train.values().get(TrainIndex::new(1)), Some(40));
        assert_eq!(per_train.values().get(TrainIndex::new(2)), None);
    }

    #[test]
    fn test_display() {
        let v = Vertex::<i32>::minor(10).with_sink(true);
        assert_eq!(format!("{}", v), "Vertex(Minor, value: 10, sink)");
        let w = Vertex::<i32>::major(0).with_train_values(vec![1, 2]);
        assert_eq!(format!("{}", w), "Vertex(Major, values: [1, 2])");
    }

    #[test]
    fn test_adjacency_orders_by_neighbor_then_edge() {
        let mut slots = vec![
            Adjacency::new(VertexIndex::new(3), EdgeIndex::new(0)),
            Adjacency::new(VertexIndex::new(1), EdgeIndex::new(4)),
            Adjacency::new(VertexIndex::new(1), EdgeIndex::new(2)),
        ];
        slots.sort();
        assert_eq!(slots[0].edge.get(), 2);
        assert_eq!(slots[1].edge.get(), 4);
        assert_eq!(slots[2].neighbor.get(), 3);
    }
}
