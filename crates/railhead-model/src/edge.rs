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

//! Edges (track segments) of the revenue network.

use crate::index::{EdgeIndex, VertexIndex};
use smallvec::SmallVec;

/// A track segment between two vertices.
///
/// - `greedy`: a non-greedy edge may only be entered directly after a greedy
///   edge (or as the first edge out of a start vertex). Graph preparation sets
///   this flag; the engine only consumes it.
/// - `distance`: the cost charged to distance-limited trains.
/// - `travel_set`: further edges that become unusable while this one is in
///   use, which models collapsed multigraph routes sharing physical track.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    a: VertexIndex,
    b: VertexIndex,
    greedy: bool,
    distance: i32,
    travel_set: SmallVec<[EdgeIndex; 4]>,
}

impl Edge {
    /// Creates a greedy edge of distance one between `a` and `b`.
    #[inline]
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        Self {
            a,
            b,
            greedy: true,
            distance: 1,
            travel_set: SmallVec::new(),
        }
    }

    #[inline]
    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    #[inline]
    pub fn with_distance(mut self, distance: i32) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the edges that are blocked together with this one.
    #[inline]
    pub fn with_travel_set<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = EdgeIndex>,
    {
        self.travel_set = edges.into_iter().collect();
        self
    }

    /// Returns both endpoints in the order they were given.
    #[inline]
    pub fn endpoints(&self) -> (VertexIndex, VertexIndex) {
        (self.a, self.b)
    }

    /// Returns the endpoint opposite to `vertex`.
    ///
    /// If `vertex` is not an endpoint, `a` is returned.
    #[inline]
    pub fn other_end(&self, vertex: VertexIndex) -> VertexIndex {
        if vertex == self.a { self.b } else { self.a }
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[inline]
    pub fn touches(&self, vertex: VertexIndex) -> bool {
        self.a == vertex || self.b == vertex
    }

    #[inline]
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Returns the edges blocked together with this one.
    #[inline]
    pub fn travel_set(&self) -> &[EdgeIndex] {
        &self.travel_set
    }

    #[inline]
    pub(crate) fn travel_set_mut(&mut self) -> &mut SmallVec<[EdgeIndex; 4]> {
        &mut self.travel_set
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge({} - {}, distance: {}{})",
            self.a.get(),
            self.b.get(),
            self.distance,
            if self.greedy { "" } else { ", non-greedy" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_defaults() {
        let e = Edge::new(v(0), v(1));
        assert!(e.is_greedy());
        assert_eq!(e.distance(), 1);
        assert!(e.travel_set().is_empty());
    }

    #[test]
    fn test_other_end_and_touches() {
        let e = Edge::new(v(2), v(5));
        assert_eq!(e.other_end(v(2)), v(5));
        assert_eq!(e.other_end(v(5)), v(2));
        assert!(e.touches(v(5)));
        assert!(!e.touches(v(3)));
    }

    #[test]
    fn test_builder_methods_and_display() {
        let e = Edge::new(v(0), v(1))
            .with_greedy(false)
            .with_distance(3)
            .with_travel_set([EdgeIndex::new(4)]);
        assert_eq!(e.travel_set(), &[EdgeIndex::new(4)]);
        assert_eq!(format!("{}", e), "Edge(0 - 1, distance: 3, non-greedy)");
    }
}
