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

//! Read-only view of an in-progress search.
//!
//! Monitors and dynamic modifiers see the search through a `RouteView`: the
//! network, the range of trains being optimized and each train's current
//! partial route. It can be taken at any recursion depth.

use crate::{extraction::extract_run, result::TrainRun, state::SearchState};
use railhead_core::num::RevenueNumeric;
use railhead_model::{
    index::{EdgeIndex, TrainIndex, VertexIndex},
    network::RevenueNetwork,
};

#[derive(Clone, Copy)]
pub struct RouteView<'a, T> {
    network: &'a RevenueNetwork<T>,
    state: &'a SearchState<T>,
    start_train: TrainIndex,
    final_train: TrainIndex,
}

impl<'a, T> RouteView<'a, T>
where
    T: RevenueNumeric,
{
    #[inline]
    pub fn new(
        network: &'a RevenueNetwork<T>,
        state: &'a SearchState<T>,
        start_train: TrainIndex,
        final_train: TrainIndex,
    ) -> Self {
        Self {
            network,
            state,
            start_train,
            final_train,
        }
    }

    #[inline]
    pub fn network(&self) -> &'a RevenueNetwork<T> {
        self.network
    }

    #[inline]
    pub fn start_train(&self) -> TrainIndex {
        self.start_train
    }

    #[inline]
    pub fn final_train(&self) -> TrainIndex {
        self.final_train
    }

    /// The trains being optimized, in search order.
    #[inline]
    pub fn trains(&self) -> impl DoubleEndedIterator<Item = TrainIndex> {
        TrainIndex::range_inclusive(self.start_train, self.final_train)
    }

    /// Current value of the train's partial route.
    #[inline]
    pub fn value(&self, train: TrainIndex) -> T {
        self.state.value(train)
    }

    /// Sum of the current values of all trains in the range.
    pub fn total_value(&self) -> T {
        self.trains()
            .fold(T::zero(), |acc, train| acc + self.state.value(train))
    }

    /// The train's vertices in visiting order (start vertex first).
    #[inline]
    pub fn vertices(&self, train: TrainIndex) -> &'a [VertexIndex] {
        self.state.vertex_stack(train)
    }

    /// The train's edges in travelling order.
    #[inline]
    pub fn edges(&self, train: TrainIndex) -> &'a [EdgeIndex] {
        self.state.edge_stack(train)
    }

    #[inline]
    pub fn is_visited(&self, train: TrainIndex, vertex: VertexIndex) -> bool {
        self.state.is_visited(train, vertex)
    }

    #[inline]
    pub fn remaining_majors(&self, train: TrainIndex) -> i32 {
        self.state.remaining_majors(train)
    }

    #[inline]
    pub fn remaining_minors(&self, train: TrainIndex) -> i32 {
        self.state.remaining_minors(train)
    }

    #[inline]
    pub fn remaining_distance(&self, train: TrainIndex) -> i32 {
        self.state.remaining_distance(train)
    }

    /// The current route of `train` as an ordered path.
    pub fn current_run(&self, train: TrainIndex) -> TrainRun<T> {
        extract_run(self.network, self.state, train)
    }

    /// The current routes of all trains in the range.
    pub fn current_runs(&self) -> Vec<TrainRun<T>> {
        self.trains().map(|train| self.current_run(train)).collect()
    }
}

impl<'a, T> std::fmt::Debug for RouteView<'a, T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteView")
            .field("start_train", &self.start_train)
            .field("final_train", &self.final_train)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railhead_model::{
        network::RevenueNetworkBuilder, train::TrainDescriptor, vertex::Vertex,
    };

    #[test]
    fn test_view_reflects_state() {
        let mut builder = RevenueNetworkBuilder::<i32>::new();
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_train(TrainDescriptor::standard("3", 3, 0));
        let a = builder.add_vertex(Vertex::major(10));
        let b = builder.add_vertex(Vertex::major(20));
        let edge = builder.connect(a, b);
        let network = builder.build().unwrap();

        let t0 = TrainIndex::new(0);
        let t1 = TrainIndex::new(1);
        let mut state = SearchState::new(&network);
        state.arrive(&network, t1, a);
        state.travel_edge(&network, t1, edge);
        state.arrive(&network, t1, b);

        let view = RouteView::new(&network, &state, t0, t1);
        assert_eq!(view.trains().collect::<Vec<_>>(), vec![t0, t1]);
        assert_eq!(view.total_value(), 30);
        assert_eq!(view.vertices(t1), &[a, b]);
        assert_eq!(view.edges(t1), &[edge]);
        assert!(view.is_visited(t1, b));
        assert!(!view.is_visited(t0, b));
        assert_eq!(view.remaining_majors(t1), 1);
        assert!(view.current_run(t0).is_empty());
        assert_eq!(view.current_runs()[1].vertices(), &[a, b]);
    }
}
