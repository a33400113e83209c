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

use crate::{
    monitor::search_monitor::{PruneReason, SearchMonitor},
    stats::RevenueStatistics,
    view::RouteView,
};
use railhead_core::num::RevenueNumeric;
use railhead_model::{
    index::{TrainIndex, VertexIndex},
    network::RevenueNetwork,
};

/// A monitor that ignores every event and never stops the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl std::fmt::Display for NoOperationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOperationMonitor")
    }
}

impl<T> SearchMonitor<T> for NoOperationMonitor
where
    T: RevenueNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _network: &RevenueNetwork<T>, _statistics: &RevenueStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &RevenueStatistics) {}

    #[inline(always)]
    fn on_vertex(
        &mut self,
        _route: &RouteView<'_, T>,
        _train: TrainIndex,
        _vertex: VertexIndex,
        _statistics: &RevenueStatistics,
    ) {
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        _route: &RouteView<'_, T>,
        _train: TrainIndex,
        _reason: PruneReason,
        _statistics: &RevenueStatistics,
    ) {
    }

    #[inline(always)]
    fn on_improved(&mut self, _total: T, _aux: T, _is_final: bool, _statistics: &RevenueStatistics) {}
}
