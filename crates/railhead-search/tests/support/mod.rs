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

//! Exhaustive reference solver and generators for small networks.
//!
//! The reference solver enumerates every simple path of every train and
//! combines them without any pruning, so it is only usable on networks of
//! a handful of vertices.

#![allow(dead_code)]

use proptest::prelude::*;
use railhead_model::{
    bonus::Bonus,
    edge::Edge,
    index::{EdgeIndex, TrainIndex, VertexIndex},
    network::{GraphRepresentation, RevenueNetwork, RevenueNetworkBuilder},
    train::{TrainDescriptor, VehicleKind},
    vertex::{Vertex, VertexKind, VertexValues},
};
use railhead_search::result::TrainRun;

pub fn v(i: usize) -> VertexIndex {
    VertexIndex::new(i)
}

pub fn e(i: usize) -> EdgeIndex {
    EdgeIndex::new(i)
}

pub fn t(i: usize) -> TrainIndex {
    TrainIndex::new(i)
}

/// A route found by the reference solver.
#[derive(Clone, Debug)]
pub struct Route {
    pub vertices: Vec<VertexIndex>,
    pub edges: Vec<EdgeIndex>,
    pub value: i32,
}

/// Value of a route: effective vertex values plus every complex bonus of the
/// train whose vertices are all on the route.
pub fn route_value(network: &RevenueNetwork<i32>, train: TrainIndex, vertices: &[VertexIndex]) -> i32 {
    let base: i32 = vertices.iter().map(|&vertex| network.value_for(vertex, train)).sum();
    let bonuses: i32 = network
        .complex_bonuses()
        .iter()
        .map(|&bonus| network.bonus(bonus))
        .filter(|bonus| bonus.applies_to(train))
        .filter(|bonus| bonus.vertices().iter().all(|vertex| vertices.contains(vertex)))
        .map(|bonus| bonus.value())
        .sum();
    base + bonuses
}

/// Returns `true` if `edges` is a path through `vertices` in order.
pub fn is_connected_path(network: &RevenueNetwork<i32>, vertices: &[VertexIndex], edges: &[EdgeIndex]) -> bool {
    if vertices.len() != edges.len() + 1 {
        return false;
    }
    edges.iter().enumerate().all(|(i, &edge)| {
        let (a, b) = network.edge(edge).endpoints();
        (a == vertices[i] && b == vertices[i + 1]) || (b == vertices[i] && a == vertices[i + 1])
    })
}

/// Checks every rule a single route must satisfy.
pub fn is_valid_route(
    network: &RevenueNetwork<i32>,
    train: TrainIndex,
    vertices: &[VertexIndex],
    edges: &[EdgeIndex],
) -> bool {
    if vertices.len() < 2 || !is_connected_path(network, vertices, edges) {
        return false;
    }

    // Simple path.
    for (i, vertex) in vertices.iter().enumerate() {
        if vertices[i + 1..].contains(vertex) {
            return false;
        }
    }

    if !vertices.iter().any(|vertex| network.start_vertices().contains(vertex)) {
        return false;
    }

    let first = vertices[0];
    let last = vertices[vertices.len() - 1];
    if !network.is_station_for(first, train) || !network.is_station_for(last, train) {
        return false;
    }

    let interior = &vertices[1..vertices.len() - 1];
    if interior
        .iter()
        .any(|&vertex| network.is_sink(vertex) && !network.start_vertices().contains(&vertex))
    {
        return false;
    }

    let majors = vertices.iter().filter(|&&vertex| network.is_major(vertex)).count() as i32;
    let stations = vertices
        .iter()
        .filter(|&&vertex| network.is_station_for(vertex, train))
        .count() as i32;
    let within_limits = match network.train(train).kind() {
        VehicleKind::Standard { majors: max_majors, minors: max_minors } => {
            majors <= max_majors && stations <= max_majors + max_minors
        }
        VehicleKind::Express { majors: max_majors } => majors <= max_majors,
        VehicleKind::Distance { budget } => {
            edges.iter().map(|&edge| network.edge(edge).distance()).sum::<i32>() <= budget
        }
    };
    if !within_limits {
        return false;
    }

    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            if network
                .visit_sets_of(a)
                .iter()
                .any(|set| network.visit_sets_of(b).contains(set))
            {
                return false;
            }
        }
    }

    for (i, &a) in edges.iter().enumerate() {
        for &b in &edges[i + 1..] {
            if a == b || network.edge(a).travel_set().contains(&b) {
                return false;
            }
        }
    }

    // No two consecutive non-greedy edges.
    edges
        .windows(2)
        .all(|pair| network.edge(pair[0]).is_greedy() || network.edge(pair[1]).is_greedy())
}

/// Every valid route of `train`, one direction per path.
pub fn enumerate_routes(network: &RevenueNetwork<i32>, train: TrainIndex) -> Vec<Route> {
    let mut routes = Vec::new();
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    for vertex in network.vertices().indices() {
        vertices.push(vertex);
        extend(network, train, &mut vertices, &mut edges, &mut routes);
        vertices.pop();
    }
    routes
}

fn extend(
    network: &RevenueNetwork<i32>,
    train: TrainIndex,
    vertices: &mut Vec<VertexIndex>,
    edges: &mut Vec<EdgeIndex>,
    routes: &mut Vec<Route>,
) {
    let last = vertices[vertices.len() - 1];
    if vertices.len() >= 2 && vertices[0] < last && is_valid_route(network, train, vertices, edges) {
        routes.push(Route {
            vertices: vertices.clone(),
            edges: edges.clone(),
            value: route_value(network, train, vertices),
        });
    }

    for adjacency in network.neighbors(last) {
        if vertices.contains(&adjacency.neighbor) {
            continue;
        }
        vertices.push(adjacency.neighbor);
        edges.push(adjacency.edge);
        extend(network, train, vertices, edges, routes);
        edges.pop();
        vertices.pop();
    }
}

/// Best value `train` can earn on its own; zero if it cannot run.
pub fn single_train_optimum(network: &RevenueNetwork<i32>, train: TrainIndex) -> i32 {
    enumerate_routes(network, train)
        .iter()
        .map(|route| route.value)
        .fold(0, i32::max)
}

/// Best joint total of the trains `start..=end`.
pub fn joint_optimum(network: &RevenueNetwork<i32>, start: TrainIndex, end: TrainIndex) -> i32 {
    let routes: Vec<Vec<Route>> = TrainIndex::range_inclusive(start, end)
        .map(|train| {
            enumerate_routes(network, train)
                .into_iter()
                .filter(|route| route.value > 0)
                .collect()
        })
        .collect();
    let mut usage = vec![0u32; network.num_edges()];
    combine(network, &routes, 0, &mut usage)
}

fn combine(network: &RevenueNetwork<i32>, routes: &[Vec<Route>], k: usize, usage: &mut [u32]) -> i32 {
    if k == routes.len() {
        return 0;
    }

    let mut best = combine(network, routes, k + 1, usage);
    for route in &routes[k] {
        if route.edges.iter().any(|edge| usage[edge.get()] > 0) {
            continue;
        }
        occupy(network, &route.edges, usage, true);
        best = best.max(route.value + combine(network, routes, k + 1, usage));
        occupy(network, &route.edges, usage, false);
    }
    best
}

fn occupy(network: &RevenueNetwork<i32>, edges: &[EdgeIndex], usage: &mut [u32], take: bool) {
    for &edge in edges {
        for member in std::iter::once(edge).chain(network.edge(edge).travel_set().iter().copied()) {
            if take {
                usage[member.get()] += 1;
            } else {
                usage[member.get()] -= 1;
            }
        }
    }
}

/// Returns `true` if no track is used by two runs or twice by one run.
pub fn runs_share_no_track(network: &RevenueNetwork<i32>, runs: &[TrainRun<i32>]) -> bool {
    let mut usage = vec![0u32; network.num_edges()];
    for run in runs {
        if run.edges().iter().any(|edge| usage[edge.get()] > 0) {
            return false;
        }
        for (i, &edge) in run.edges().iter().enumerate() {
            if run.edges()[i + 1..]
                .iter()
                .any(|&other| other == edge || network.edge(edge).travel_set().contains(&other))
            {
                return false;
            }
        }
        occupy(network, run.edges(), &mut usage, true);
    }
    true
}

/// Description of a small generated network.
#[derive(Clone, Debug)]
pub struct Case {
    /// Kind, value, sink flag and start flag per vertex.
    pub vertices: Vec<(VertexKind, i32, bool, bool)>,
    pub edges: Vec<(usize, usize)>,
    pub distances: Vec<i32>,
    pub greedy: Vec<bool>,
    /// Duplicates the edge at this position (modulo the edge count) and
    /// turns the network into a multigraph.
    pub parallel: Option<usize>,
    /// Two edge positions (modulo the edge count) whose tracks overlap.
    pub travel_set: Option<(usize, usize)>,
    pub trains: Vec<TrainDescriptor>,
    pub visit_set: Option<Vec<usize>>,
    pub complex_bonus: Option<(Vec<usize>, i32)>,
    pub simple_bonus: Option<(usize, i32)>,
}

impl Case {
    pub fn network(&self) -> RevenueNetwork<i32> {
        let mut builder = RevenueNetworkBuilder::new();
        if self.parallel.is_some() {
            builder.set_representation(GraphRepresentation::Multigraph);
        }
        for train in &self.trains {
            builder.add_train(train.clone());
        }
        for &(kind, value, sink, start) in &self.vertices {
            let index = builder.add_vertex(Vertex::new(kind, VertexValues::Uniform(value)).with_sink(sink));
            if start {
                builder.add_start_vertex(index);
            }
        }

        let mut edges: Vec<Edge> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                Edge::new(v(a), v(b))
                    .with_distance(self.distances[i])
                    .with_greedy(self.greedy[i])
            })
            .collect();
        if let Some(position) = self.parallel {
            let original = edges[position % edges.len()].clone();
            edges.push(original);
        }
        if let Some((first, second)) = self.travel_set {
            let (first, second) = (first % edges.len(), second % edges.len());
            if first != second {
                edges[first] = edges[first].clone().with_travel_set([e(second)]);
            }
        }
        for edge in edges {
            builder.add_edge(edge);
        }

        if let Some(members) = &self.visit_set
            && members.len() >= 2
        {
            builder.add_visit_set(members.iter().map(|&member| v(member)));
        }
        if let Some((members, value)) = &self.complex_bonus
            && members.len() >= 2
        {
            builder.add_bonus(Bonus::new("group", *value, members.iter().map(|&member| v(member))));
        }
        if let Some((a, value)) = self.simple_bonus {
            builder.add_bonus(Bonus::new("solo", value, [v(a)]));
        }
        builder.build().expect("generated networks are valid")
    }

    pub fn final_train(&self) -> TrainIndex {
        t(self.trains.len() - 1)
    }
}

fn vertex_strategy() -> impl Strategy<Value = (VertexKind, i32, bool, bool)> {
    (
        prop_oneof![
            3 => Just(VertexKind::Major),
            2 => Just(VertexKind::Minor),
            1 => Just(VertexKind::Side),
        ],
        -5i32..=40,
        prop::bool::weighted(0.15),
        prop::bool::weighted(0.4),
    )
}

/// Trains of every kind, limits of zero included.
fn train_strategy() -> impl Strategy<Value = TrainDescriptor> {
    prop_oneof![
        4 => (0i32..=3, 0i32..=1)
            .prop_map(|(majors, minors)| TrainDescriptor::standard(format!("{}+{}", majors, minors), majors, minors)),
        2 => (0i32..=3).prop_map(|majors| TrainDescriptor::express(format!("{}E", majors), majors)),
        2 => (0i32..=4).prop_map(|budget| TrainDescriptor::distance(format!("{}H", budget), budget)),
    ]
}

/// Distinct vertices of a group of two or three.
fn group_strategy(n: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..n, 2..=3).prop_map(|mut members| {
        members.sort_unstable();
        members.dedup();
        members
    })
}

/// Networks of two to seven vertices with one to three trains.
pub fn case_strategy() -> impl Strategy<Value = Case> {
    (2usize..=7).prop_flat_map(|n| {
        let pairs: Vec<(usize, usize)> = (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))).collect();
        let max_edges = pairs.len().min(9);
        (
            prop::collection::vec(vertex_strategy(), n),
            prop::sample::subsequence(pairs, 1..=max_edges),
            prop::collection::vec(1i32..=2, max_edges),
            prop::collection::vec(prop::bool::weighted(0.75), max_edges),
            prop::option::weighted(0.2, 0usize..max_edges),
            prop::option::weighted(0.3, (0usize..=max_edges, 0usize..=max_edges)),
            prop::collection::vec(train_strategy(), 1..=3),
            prop::option::of(group_strategy(n)),
            prop::option::of((group_strategy(n), -10i32..=30)),
            prop::option::of((0..n, 1i32..=20)),
        )
            .prop_map(
                |(
                    vertices,
                    edges,
                    distances,
                    greedy,
                    parallel,
                    travel_set,
                    trains,
                    visit_set,
                    complex_bonus,
                    simple_bonus,
                )| Case {
                    vertices,
                    edges,
                    distances,
                    greedy,
                    parallel,
                    travel_set,
                    trains,
                    visit_set,
                    complex_bonus,
                    simple_bonus,
                },
            )
    })
}
