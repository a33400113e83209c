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

//! Callback adapter for revenue improvements.
//!
//! `ImprovementMonitor` wraps a closure so callers can stream intermediate
//! results (for example to update a UI) without writing a full monitor.

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
use std::marker::PhantomData;

/// Forwards `(total, aux, is_final)` of every improvement to a closure.
pub struct ImprovementMonitor<T, F> {
    callback: F,
    _marker: PhantomData<T>,
}

impl<T, F> ImprovementMonitor<T, F>
where
    F: FnMut(T, T, bool),
{
    #[inline]
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _marker: PhantomData,
        }
    }
}

impl<T, F> std::fmt::Debug for ImprovementMonitor<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImprovementMonitor").finish_non_exhaustive()
    }
}

impl<T, F> SearchMonitor<T> for ImprovementMonitor<T, F>
where
    T: RevenueNumeric,
    F: FnMut(T, T, bool),
{
    fn name(&self) -> &str {
        "ImprovementMonitor"
    }

    fn on_enter_search(&mut self, _network: &RevenueNetwork<T>, _statistics: &RevenueStatistics) {}
    fn on_exit_search(&mut self, _statistics: &RevenueStatistics) {}

    fn on_vertex(
        &mut self,
        _route: &RouteView<'_, T>,
        _train: TrainIndex,
        _vertex: VertexIndex,
        _statistics: &RevenueStatistics,
    ) {
    }

    fn on_prune(
        &mut self,
        _route: &RouteView<'_, T>,
        _train: TrainIndex,
        _reason: PruneReason,
        _statistics: &RevenueStatistics,
    ) {
    }

    #[inline]
    fn on_improved(&mut self, total: T, aux: T, is_final: bool, _statistics: &RevenueStatistics) {
        (self.callback)(total, aux, is_final);
    }
}
