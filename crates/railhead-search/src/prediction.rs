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

//! # Revenue Prediction
//!
//! Optimistic estimates of what a train can still add to its route, used to
//! cut off branches that cannot beat the best total.
//!
//! For every train the tables hold, computed once per network:
//!
//! - `major_revenues[k]` / `minor_revenues[k]`: the best sum of at most `k`
//!   positive effective values among the vertices that count as major /
//!   minor stops for the train,
//! - `free_revenue`: the sum of positive effective values on vertices that do
//!   not count against any limit of the train (non-stations, minors of an
//!   express train, everything for a distance-limited train),
//! - `bonus_revenues[k]`: the best sum of at most `k` positive complex bonuses
//!   the train may earn.
//!
//! The remainder of a partial route combines these with its remaining
//! counters. Every table overestimates, so the remainder never drops below
//! what the route can actually still gain.

use crate::state::SearchState;
use railhead_core::num::{RevenueNumeric, best_prefix_sums, positive_part, prefix_lookup};
use railhead_model::{
    index::TrainIndex,
    network::RevenueNetwork,
    train::VehicleKind,
    vertex::VertexKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TrainPrediction<T> {
    major_revenues: Vec<T>,
    minor_revenues: Vec<T>,
    free_revenue: T,
    bonus_revenues: Vec<T>,
}

/// Per-train prediction tables of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTables<T> {
    trains: Vec<TrainPrediction<T>>,
}

impl<T> PredictionTables<T>
where
    T: RevenueNumeric,
{
    /// Builds the tables for every train of `network`.
    pub fn new(network: &RevenueNetwork<T>) -> Self {
        let trains = network
            .trains()
            .indices()
            .map(|train| Self::train_prediction(network, train))
            .collect();
        Self { trains }
    }

    fn train_prediction(network: &RevenueNetwork<T>, train: TrainIndex) -> TrainPrediction<T> {
        let kind = network.train(train).kind();
        let mut majors = Vec::new();
        let mut minors = Vec::new();
        let mut free_revenue = T::zero();

        for vertex in network.vertices().indices() {
            let value = network.value_for(vertex, train);
            let counted = match kind {
                VehicleKind::Distance { .. } => None,
                VehicleKind::Express { .. } => match network.vertex(vertex).kind() {
                    VertexKind::Major => Some(&mut majors),
                    _ => None,
                },
                VehicleKind::Standard { .. } => match network.vertex(vertex).kind() {
                    VertexKind::Major => Some(&mut majors),
                    VertexKind::Minor => Some(&mut minors),
                    VertexKind::Side | VertexKind::Hub => None,
                },
            };
            match counted {
                Some(list) => list.push(value),
                None => free_revenue = free_revenue.saturating_add(positive_part(value)),
            }
        }

        let bonuses = network
            .complex_bonuses()
            .iter()
            .map(|&bonus| network.bonus(bonus))
            .filter(|bonus| bonus.applies_to(train))
            .map(|bonus| bonus.value());

        TrainPrediction {
            major_revenues: best_prefix_sums(majors),
            minor_revenues: best_prefix_sums(minors),
            free_revenue,
            bonus_revenues: best_prefix_sums(bonuses),
        }
    }

    /// The best sum of at most `count` major-station values for `train`.
    #[inline]
    pub fn major_revenue(&self, train: TrainIndex, count: i32) -> T {
        prefix_lookup(&self.trains[train.get()].major_revenues, count as i64)
    }

    /// The best sum of at most `count` minor-station values for `train`.
    #[inline]
    pub fn minor_revenue(&self, train: TrainIndex, count: i32) -> T {
        prefix_lookup(&self.trains[train.get()].minor_revenues, count as i64)
    }

    #[inline]
    pub fn free_revenue(&self, train: TrainIndex) -> T {
        self.trains[train.get()].free_revenue
    }

    /// Sum of all positive complex bonuses `train` may earn.
    #[inline]
    pub fn bonus_revenue(&self, train: TrainIndex) -> T {
        let table = &self.trains[train.get()].bonus_revenues;
        table.last().copied().unwrap_or_else(T::zero)
    }

    /// Upper bound of the station value a train can collect with the given
    /// remaining counters.
    pub fn station_remainder(&self, kind: VehicleKind, train: TrainIndex, majors: i32, minors: i32) -> T {
        match kind {
            VehicleKind::Distance { .. } => T::zero(),
            VehicleKind::Express { .. } => self.major_revenue(train, majors),
            VehicleKind::Standard { .. } => {
                let stops = majors + minors;
                if stops <= 0 || majors < 0 {
                    return T::zero();
                }
                (0..=majors.min(stops))
                    .map(|k| {
                        self.major_revenue(train, k)
                            .saturating_add(self.minor_revenue(train, stops - k))
                    })
                    .max()
                    .unwrap_or_else(T::zero)
            }
        }
    }

    /// Upper bound of the value the current route of `train` can still gain.
    pub fn remainder(&self, network: &RevenueNetwork<T>, state: &SearchState<T>, train: TrainIndex) -> T {
        let stations = self.station_remainder(
            network.train(train).kind(),
            train,
            state.remaining_majors(train),
            state.remaining_minors(train),
        );
        let unearned = self.bonus_revenue(train) - state.earned_bonus(train);
        stations
            .saturating_add(self.free_revenue(train))
            .saturating_add(unearned)
    }

    /// Upper bound of the value of `train` on its own, from an empty route.
    pub fn standalone_bound(&self, network: &RevenueNetwork<T>, train: TrainIndex) -> T {
        let descriptor = network.train(train);
        self.station_remainder(descriptor.kind(), train, descriptor.max_majors(), descriptor.max_minors())
            .saturating_add(self.free_revenue(train))
            .saturating_add(self.bonus_revenue(train))
    }
}
