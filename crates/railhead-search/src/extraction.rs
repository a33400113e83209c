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

//! Run extraction.
//!
//! Turns the stacks of a train in the search state into an ordered path.
//! While a bottom branch is active the stacks hold two branches out of the
//! start vertex; the reported path is the bottom branch reversed, followed
//! by the main branch, so it runs from one end of the route to the other.
//!
//! Simple graphs are reported from the vertex trace. Multigraphs are
//! reported by walking the edge trace from the start vertex, since there the
//! travelled edge carries the identity of the route segment.

use crate::{result::TrainRun, state::SearchState};
use railhead_core::num::RevenueNumeric;
use railhead_model::{
    index::{EdgeIndex, TrainIndex, VertexIndex},
    network::{GraphRepresentation, RevenueNetwork},
};

/// Extracts the current route of `train` from `state`.
pub fn extract_run<T>(network: &RevenueNetwork<T>, state: &SearchState<T>, train: TrainIndex) -> TrainRun<T>
where
    T: RevenueNumeric,
{
    let vertex_stack = state.vertex_stack(train);
    let edge_stack = state.edge_stack(train);
    let Some(&start) = vertex_stack.first() else {
        return TrainRun::empty(train);
    };

    let (vertex_split, edge_split) = match state.bottom_mark(train) {
        Some(mark) => (mark.vertices, mark.edges),
        None => (vertex_stack.len(), edge_stack.len()),
    };
    let (main_edges, bottom_edges) = edge_stack.split_at(edge_split);

    let (main_vertices, bottom_vertices) = match network.representation() {
        GraphRepresentation::Simple => {
            let (main, bottom) = vertex_stack.split_at(vertex_split);
            (main.to_vec(), bottom.to_vec())
        }
        GraphRepresentation::Multigraph => {
            let main = walk_edges(network, start, main_edges);
            let mut bottom = walk_edges(network, start, bottom_edges);
            bottom.remove(0);
            (main, bottom)
        }
    };

    let mut vertices: Vec<VertexIndex> = bottom_vertices
        .into_iter()
        .rev()
        .chain(main_vertices)
        .collect();
    vertices.dedup();

    let edges: Vec<EdgeIndex> = bottom_edges
        .iter()
        .rev()
        .chain(main_edges.iter())
        .copied()
        .collect();

    TrainRun::new(train, vertices, edges, state.value(train))
}

/// Follows `edges` from `start` and returns every vertex passed, `start`
/// included.
fn walk_edges<T>(network: &RevenueNetwork<T>, start: VertexIndex, edges: &[EdgeIndex]) -> Vec<VertexIndex>
where
    T: RevenueNumeric,
{
    let mut vertices = Vec::with_capacity(edges.len() + 1);
    let mut current = start;
    vertices.push(current);
    for &edge in edges {
        current = network.edge(edge).other_end(current);
        vertices.push(current);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use railhead_model::{
        network::RevenueNetworkBuilder, train::TrainDescriptor, vertex::Vertex,
    };

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn e(i: usize) -> EdgeIndex {
        EdgeIndex::new(i)
    }

    const T0: TrainIndex = TrainIndex::new(0);

    /// Star around vertex 0 with arms to 1, 2 and 3.
    fn star(representation: GraphRepresentation) -> RevenueNetwork<i32> {
        let mut builder = RevenueNetworkBuilder::new().with_representation(representation);
        builder.add_train(TrainDescriptor::standard("4", 4, 0));
        builder.add_vertex(Vertex::major(10));
        builder.add_vertex(Vertex::major(20));
        builder.add_vertex(Vertex::major(30));
        builder.add_vertex(Vertex::major(40));
        builder.connect(v(0), v(1));
        builder.connect(v(0), v(2));
        builder.connect(v(0), v(3));
        builder.add_start_vertex(v(0));
        builder.build().unwrap()
    }

    fn walk(network: &RevenueNetwork<i32>, state: &mut SearchState<i32>, edge: EdgeIndex, to: VertexIndex) {
        state.travel_edge(network, T0, edge);
        state.arrive(network, T0, to);
    }

    #[test]
    fn test_empty_stack_is_empty_run() {
        let network = star(GraphRepresentation::Simple);
        let state = SearchState::new(&network);
        let run = extract_run(&network, &state, T0);
        assert!(run.is_empty());
        assert_eq!(run.value(), 0);
    }

    #[test]
    fn test_single_branch() {
        let network = star(GraphRepresentation::Simple);
        let mut state = SearchState::new(&network);
        state.arrive(&network, T0, v(0));
        walk(&network, &mut state, e(1), v(2));

        let run = extract_run(&network, &state, T0);
        assert_eq!(run.vertices(), &[v(0), v(2)]);
        assert_eq!(run.edges(), &[e(1)]);
        assert_eq!(run.value(), 40);
    }

    #[test]
    fn test_bottom_branch_is_reversed_in_front() {
        for representation in [GraphRepresentation::Simple, GraphRepresentation::Multigraph] {
            let network = star(representation);
            let mut state = SearchState::new(&network);
            state.arrive(&network, T0, v(0));
            walk(&network, &mut state, e(0), v(1));
            state.begin_bottom(T0);
            walk(&network, &mut state, e(2), v(3));

            let run = extract_run(&network, &state, T0);
            assert_eq!(run.vertices(), &[v(3), v(0), v(1)], "{}", representation);
            assert_eq!(run.edges(), &[e(2), e(0)], "{}", representation);
            assert_eq!(run.value(), 70);
        }
    }

    #[test]
    fn test_bottom_without_second_branch() {
        let network = star(GraphRepresentation::Multigraph);
        let mut state = SearchState::new(&network);
        state.arrive(&network, T0, v(0));
        walk(&network, &mut state, e(0), v(1));
        state.begin_bottom(T0);

        let run = extract_run(&network, &state, T0);
        assert_eq!(run.vertices(), &[v(0), v(1)]);
    }
}
