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

//! Search monitoring interface
//!
//! Declares the `SearchMonitor` trait for observing and controlling a
//! revenue calculation. Callbacks follow the calculation lifecycle, and a
//! monitor can stop the search through `search_command`.
//!
//! Lifecycle
//! - enter → {vertex | prune | improved}* → improved (final) → exit
//! - `search_command` is polled at the top of every recursion step (every
//!   `poll_interval` steps, see `CalculatorOptions`).
//!
//! Design notes
//! - Methods take `&mut self`; monitors are single-threaded.
//! - Keep `on_vertex` and `search_command` cheap, they run in the hot loop.
//! - Only the main search reports; the single-train prediction runs are
//!   polled for termination but do not emit events.

use crate::{stats::RevenueStatistics, view::RouteView};
use railhead_core::num::RevenueNumeric;
use railhead_model::{
    index::{TrainIndex, VertexIndex},
    network::RevenueNetwork,
};

/// Command returned by a monitor to control the search.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search and report the best result found so far.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for cutting off a partial route.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The upper bound cannot beat the best total.
    BoundDominated,
    /// The train exceeded its run-length limits.
    InvalidRoute,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::InvalidRoute => write!(f, "InvalidRoute"),
        }
    }
}

/// Trait for monitoring and controlling a revenue calculation.
pub trait SearchMonitor<T>
where
    T: RevenueNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before any search, prediction runs included.
    fn on_enter_search(&mut self, network: &RevenueNetwork<T>, statistics: &RevenueStatistics);
    /// Called once after the final improvement notification.
    fn on_exit_search(&mut self, statistics: &RevenueStatistics);
    /// Called to decide whether the search goes on.
    fn search_command(&mut self, _route: &RouteView<'_, T>, _statistics: &RevenueStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called after `train` entered `vertex`.
    fn on_vertex(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        vertex: VertexIndex,
        statistics: &RevenueStatistics,
    );
    /// Called when the partial route of `train` is cut off.
    fn on_prune(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        reason: PruneReason,
        statistics: &RevenueStatistics,
    );
    /// Called for every strict improvement of the best total, in discovery
    /// order, and once more with `is_final` set when the calculation ends.
    /// `aux` is the share of `total` contributed by dynamic modifiers.
    ///
    /// Only the calls with `is_final == false` strictly increase. The final
    /// call repeats the best total, which equals the last improvement (or
    /// zero if nothing beat the empty assignment).
    fn on_improved(&mut self, total: T, aux: T, is_final: bool, statistics: &RevenueStatistics);
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: RevenueNumeric,
    M: SearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, network: &RevenueNetwork<T>, statistics: &RevenueStatistics) {
        (**self).on_enter_search(network, statistics)
    }

    fn on_exit_search(&mut self, statistics: &RevenueStatistics) {
        (**self).on_exit_search(statistics)
    }

    fn search_command(&mut self, route: &RouteView<'_, T>, statistics: &RevenueStatistics) -> SearchCommand {
        (**self).search_command(route, statistics)
    }

    fn on_vertex(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        vertex: VertexIndex,
        statistics: &RevenueStatistics,
    ) {
        (**self).on_vertex(route, train, vertex, statistics)
    }

    fn on_prune(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        reason: PruneReason,
        statistics: &RevenueStatistics,
    ) {
        (**self).on_prune(route, train, reason, statistics)
    }

    fn on_improved(&mut self, total: T, aux: T, is_final: bool, statistics: &RevenueStatistics) {
        (**self).on_improved(total, aux, is_final, statistics)
    }
}
