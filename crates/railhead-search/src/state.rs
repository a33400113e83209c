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

//! Mutable search state of a revenue calculation.
//!
//! `SearchState` holds everything the recursive search changes while it
//! walks routes, and every change has an exact inverse:
//!
//! - `arrive` / `leave`: vertex visits, counters, value, visit-set blocks
//!   and complex-bonus progress of one train.
//! - `travel_edge` / `return_edge`: shared edge usage (travel sets included),
//!   the train's edge stack and its distance budget.
//!
//! Vertex state is per train: two trains may call at the same station. Edge
//! usage is shared by all trains, so no track is used twice in an
//! assignment.
//!
//! Invariants (debug-checked):
//! - `arrive` is only called for vertices that are available to the train,
//!   and `leave` only for the vertex on top of its stack.
//! - `return_edge` is only called for the edge on top of the train's stack.

use fixedbitset::FixedBitSet;
use railhead_core::num::{RevenueNumeric, positive_part};
use railhead_model::{
    index::{EdgeIndex, TrainIndex, VertexIndex},
    network::RevenueNetwork,
    train::VehicleKind,
};

/// Outcome of the run-length rule for a train that just called at a station.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// The train may stop here and may also continue.
    Continue,
    /// The train has used its whole budget; the route ends here.
    StopValid,
    /// The train has exceeded its budget; the route is invalid.
    StopInvalid,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Continue => write!(f, "Continue"),
            Termination::StopValid => write!(f, "StopValid"),
            Termination::StopInvalid => write!(f, "StopInvalid"),
        }
    }
}

/// Stack positions at which the second branch of a route begins.
///
/// A route passing through its start vertex is searched as two branches out
/// of the start: the main branch first, then (from the start again) the
/// bottom branch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BottomMark {
    pub vertices: usize,
    pub edges: usize,
}

#[derive(Debug, Clone)]
pub struct SearchState<T> {
    num_vertices: usize,
    num_bonuses: usize,

    // Per train.
    majors: Vec<i32>,
    minors: Vec<i32>,
    distance: Vec<i32>,
    values: Vec<T>,
    earned_bonus: Vec<T>,
    visited: Vec<FixedBitSet>,
    vertex_stacks: Vec<Vec<VertexIndex>>,
    edge_stacks: Vec<Vec<EdgeIndex>>,
    start_slots: Vec<usize>,
    bottom_marks: Vec<Option<BottomMark>>,

    blocked: Vec<u32>,         // len = num_trains * num_vertices
    bonus_remaining: Vec<i32>, // len = num_trains * num_bonuses

    // Shared.
    edge_usage: Vec<u32>, // len = num_edges
}

impl<T> SearchState<T>
where
    T: RevenueNumeric,
{
    /// Creates a clean state for `network` with every train reset.
    pub fn new(network: &RevenueNetwork<T>) -> Self {
        let num_vertices = network.num_vertices();
        let num_trains = network.num_trains();
        let num_bonuses = network.num_bonuses();

        let mut state = Self {
            num_vertices,
            num_bonuses,
            majors: vec![0; num_trains],
            minors: vec![0; num_trains],
            distance: vec![0; num_trains],
            values: vec![T::zero(); num_trains],
            earned_bonus: vec![T::zero(); num_trains],
            visited: vec![FixedBitSet::with_capacity(num_vertices); num_trains],
            vertex_stacks: vec![Vec::with_capacity(num_vertices); num_trains],
            edge_stacks: vec![Vec::with_capacity(num_vertices); num_trains],
            start_slots: vec![0; num_trains],
            bottom_marks: vec![None; num_trains],
            blocked: vec![0; num_trains * num_vertices],
            bonus_remaining: vec![0; num_trains * num_bonuses],
            edge_usage: vec![0; network.num_edges()],
        };
        for train in network.trains().indices() {
            state.reset_train(network, train);
        }
        state
    }

    #[inline]
    pub fn num_trains(&self) -> usize {
        self.values.len()
    }

    /// Resets the counters of `train` to its descriptor maxima and clears its
    /// route. Shared edge usage is left alone.
    pub fn reset_train(&mut self, network: &RevenueNetwork<T>, train: TrainIndex) {
        let t = train.get();
        debug_assert!(
            self.vertex_stacks[t].is_empty(),
            "called `SearchState::reset_train` while {} still has an unfinished route",
            train
        );

        let descriptor = network.train(train);
        self.majors[t] = descriptor.max_majors();
        self.minors[t] = descriptor.max_minors();
        self.distance[t] = descriptor.distance_budget();
        self.values[t] = T::zero();
        self.earned_bonus[t] = T::zero();
        self.visited[t].clear();
        self.vertex_stacks[t].clear();
        self.edge_stacks[t].clear();
        self.start_slots[t] = 0;
        self.bottom_marks[t] = None;

        let vertices = t * self.num_vertices;
        self.blocked[vertices..vertices + self.num_vertices].fill(0);

        let bonuses = t * self.num_bonuses;
        for (b, bonus) in network.bonuses().iter().enumerate() {
            self.bonus_remaining[bonuses + b] = bonus.vertices().len() as i32;
        }
    }

    #[inline]
    pub fn remaining_majors(&self, train: TrainIndex) -> i32 {
        self.majors[train.get()]
    }

    #[inline]
    pub fn remaining_minors(&self, train: TrainIndex) -> i32 {
        self.minors[train.get()]
    }

    #[inline]
    pub fn remaining_distance(&self, train: TrainIndex) -> i32 {
        self.distance[train.get()]
    }

    /// The value of the train's current route.
    #[inline]
    pub fn value(&self, train: TrainIndex) -> T {
        self.values[train.get()]
    }

    /// Positive complex-bonus value the current route has already earned.
    #[inline]
    pub fn earned_bonus(&self, train: TrainIndex) -> T {
        self.earned_bonus[train.get()]
    }

    /// Vertices of the current route in visiting order. The start vertex is
    /// first; after a bottom mark the bottom branch follows.
    #[inline]
    pub fn vertex_stack(&self, train: TrainIndex) -> &[VertexIndex] {
        &self.vertex_stacks[train.get()]
    }

    #[inline]
    pub fn edge_stack(&self, train: TrainIndex) -> &[EdgeIndex] {
        &self.edge_stacks[train.get()]
    }

    #[inline]
    pub fn bottom_mark(&self, train: TrainIndex) -> Option<BottomMark> {
        self.bottom_marks[train.get()]
    }

    #[inline]
    pub fn is_bottom_active(&self, train: TrainIndex) -> bool {
        self.bottom_marks[train.get()].is_some()
    }

    /// Adjacency slot of the first edge the main branch took out of the start.
    #[inline]
    pub fn start_slot(&self, train: TrainIndex) -> usize {
        self.start_slots[train.get()]
    }

    #[inline]
    pub fn set_start_slot(&mut self, train: TrainIndex, slot: usize) {
        self.start_slots[train.get()] = slot;
    }

    /// Returns `true` if `vertex` is on the train's route.
    #[inline]
    pub fn is_visited(&self, train: TrainIndex, vertex: VertexIndex) -> bool {
        self.visited[train.get()].contains(vertex.get())
    }

    /// Returns `true` if the train may still enter `vertex`: it is neither on
    /// the route nor blocked through a visit-set.
    #[inline]
    pub fn is_vertex_available(&self, train: TrainIndex, vertex: VertexIndex) -> bool {
        !self.is_visited(train, vertex)
            && self.blocked[train.get() * self.num_vertices + vertex.get()] == 0
    }

    /// Returns `true` if no train uses `edge` or an edge sharing its track.
    #[inline]
    pub fn is_edge_available(&self, edge: EdgeIndex) -> bool {
        self.edge_usage[edge.get()] == 0
    }

    /// Sum of the stack depths of all trains.
    #[inline]
    pub fn depth(&self) -> usize {
        self.vertex_stacks.iter().map(Vec::len).sum()
    }

    /// Enters `vertex` with `train` and returns `true` if the vertex is a
    /// station for that train.
    pub fn arrive(&mut self, network: &RevenueNetwork<T>, train: TrainIndex, vertex: VertexIndex) -> bool {
        debug_assert!(
            self.is_vertex_available(train, vertex),
            "called `SearchState::arrive` with {} that is not available to {}",
            vertex,
            train
        );

        let t = train.get();
        self.visited[t].insert(vertex.get());
        self.vertex_stacks[t].push(vertex);
        self.values[t] = self.values[t] + network.value_for(vertex, train);

        for &set in network.visit_sets_of(vertex) {
            for &member in network.visit_set(set) {
                if member != vertex {
                    self.blocked[t * self.num_vertices + member.get()] += 1;
                }
            }
        }

        for &bonus in network.complex_bonuses_at(vertex) {
            let definition = network.bonus(bonus);
            if !definition.applies_to(train) {
                continue;
            }
            let slot = &mut self.bonus_remaining[t * self.num_bonuses + bonus.get()];
            *slot -= 1;
            if *slot == 0 {
                self.values[t] = self.values[t] + definition.value();
                self.earned_bonus[t] = self.earned_bonus[t] + positive_part(definition.value());
            }
        }

        let station = network.is_station_for(vertex, train);
        match network.train(train).kind() {
            VehicleKind::Distance { .. } => {}
            VehicleKind::Standard { .. } | VehicleKind::Express { .. } => {
                if network.is_major(vertex) {
                    self.majors[t] -= 1;
                } else if station {
                    self.minors[t] -= 1;
                }
            }
        }
        station
    }

    /// Undoes `arrive` for the vertex on top of the train's stack.
    pub fn leave(&mut self, network: &RevenueNetwork<T>, train: TrainIndex, vertex: VertexIndex) {
        let t = train.get();
        debug_assert_eq!(
            self.vertex_stacks[t].last(),
            Some(&vertex),
            "called `SearchState::leave` with a vertex that is not on top of the stack"
        );

        let station = network.is_station_for(vertex, train);
        match network.train(train).kind() {
            VehicleKind::Distance { .. } => {}
            VehicleKind::Standard { .. } | VehicleKind::Express { .. } => {
                if network.is_major(vertex) {
                    self.majors[t] += 1;
                } else if station {
                    self.minors[t] += 1;
                }
            }
        }

        for &bonus in network.complex_bonuses_at(vertex) {
            let definition = network.bonus(bonus);
            if !definition.applies_to(train) {
                continue;
            }
            let slot = &mut self.bonus_remaining[t * self.num_bonuses + bonus.get()];
            if *slot == 0 {
                self.values[t] = self.values[t] - definition.value();
                self.earned_bonus[t] = self.earned_bonus[t] - positive_part(definition.value());
            }
            *slot += 1;
        }

        for &set in network.visit_sets_of(vertex) {
            for &member in network.visit_set(set) {
                if member != vertex {
                    self.blocked[t * self.num_vertices + member.get()] -= 1;
                }
            }
        }

        self.values[t] = self.values[t] - network.value_for(vertex, train);
        self.vertex_stacks[t].pop();
        self.visited[t].set(vertex.get(), false);
    }

    /// Returns `true` if `train` may travel `edge` next: the track is free and
    /// a distance-limited train can still pay for it.
    #[inline]
    pub fn can_travel(&self, network: &RevenueNetwork<T>, train: TrainIndex, edge: EdgeIndex) -> bool {
        if !self.is_edge_available(edge) {
            return false;
        }
        !network.train(train).is_distance_limited()
            || self.distance[train.get()] >= network.edge(edge).distance()
    }

    /// Marks `edge` and its travel set as used by `train`.
    pub fn travel_edge(&mut self, network: &RevenueNetwork<T>, train: TrainIndex, edge: EdgeIndex) {
        let t = train.get();
        let definition = network.edge(edge);
        self.edge_usage[edge.get()] += 1;
        for &member in definition.travel_set() {
            self.edge_usage[member.get()] += 1;
        }
        if network.train(train).is_distance_limited() {
            self.distance[t] -= definition.distance();
        }
        self.edge_stacks[t].push(edge);
    }

    /// Undoes `travel_edge` for the edge on top of the train's stack.
    pub fn return_edge(&mut self, network: &RevenueNetwork<T>, train: TrainIndex, edge: EdgeIndex) {
        let t = train.get();
        debug_assert_eq!(
            self.edge_stacks[t].last(),
            Some(&edge),
            "called `SearchState::return_edge` with an edge that is not on top of the stack"
        );

        let definition = network.edge(edge);
        self.edge_stacks[t].pop();
        if network.train(train).is_distance_limited() {
            self.distance[t] += definition.distance();
        }
        for &member in definition.travel_set() {
            self.edge_usage[member.get()] -= 1;
        }
        self.edge_usage[edge.get()] -= 1;
    }

    /// Applies the run-length rule of `train` to its current counters.
    ///
    /// Only meaningful right after the train called at a station.
    pub fn termination(&self, network: &RevenueNetwork<T>, train: TrainIndex) -> Termination {
        let t = train.get();
        match network.train(train).kind() {
            VehicleKind::Distance { .. } => Termination::Continue,
            VehicleKind::Express { .. } => {
                if self.majors[t] < 0 {
                    Termination::StopInvalid
                } else if self.majors[t] == 0 {
                    Termination::StopValid
                } else {
                    Termination::Continue
                }
            }
            VehicleKind::Standard { .. } => {
                let stops = self.majors[t] + self.minors[t];
                if self.majors[t] < 0 || stops < 0 {
                    Termination::StopInvalid
                } else if stops == 0 {
                    Termination::StopValid
                } else {
                    Termination::Continue
                }
            }
        }
    }

    /// Records the current stack sizes as the start of the bottom branch.
    #[inline]
    pub fn begin_bottom(&mut self, train: TrainIndex) {
        let t = train.get();
        debug_assert!(
            self.bottom_marks[t].is_none(),
            "called `SearchState::begin_bottom` while a bottom branch is already active"
        );
        self.bottom_marks[t] = Some(BottomMark {
            vertices: self.vertex_stacks[t].len(),
            edges: self.edge_stacks[t].len(),
        });
    }

    #[inline]
    pub fn end_bottom(&mut self, train: TrainIndex) {
        self.bottom_marks[train.get()] = None;
    }
}
