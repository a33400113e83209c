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
use std::time::{Duration, Instant};

/// Writes a progress table through the `log` facade.
///
/// The clock is only consulted when `vertices_visited & clock_check_mask == 0`,
/// so the mask should be one less than a power of two.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: RevenueNumeric,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_total: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: RevenueNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_total: None,
        }
    }

    #[inline]
    pub fn best_total(&self) -> Option<T> {
        self.best_total
    }

    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<13} | {:<11} | {:<12}",
            "Elapsed",
            "Vertices",
            "Depth",
            "Best",
            "Current",
            "Evaluations",
            "Pruned"
        );
        log::info!("{}", "-".repeat(92));
    }

    fn log_line(&mut self, route: &RouteView<'_, T>, stats: &RevenueStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let best = match self.best_total {
            Some(total) => total.to_string(),
            None => "-".to_string(),
        };

        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<13} | {:<11} | {:<12}",
            format!("{:.1}s", elapsed),
            stats.vertices_visited,
            stats.max_depth,
            best,
            route.total_value(),
            stats.evaluations,
            stats.prunings()
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: RevenueNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: RevenueNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, network: &RevenueNetwork<T>, _statistics: &RevenueStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_total = None;
        log::info!("Revenue calculation on {}", network);
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &RevenueStatistics) {
        log::info!("{}", "-".repeat(92));
        log::info!(
            "Calculation finished after {} vertices and {} evaluations.",
            statistics.vertices_visited,
            statistics.evaluations
        );
    }

    fn on_vertex(
        &mut self,
        route: &RouteView<'_, T>,
        _train: TrainIndex,
        _vertex: VertexIndex,
        statistics: &RevenueStatistics,
    ) {
        if (statistics.vertices_visited & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(route, statistics);
        }
    }

    fn on_prune(
        &mut self,
        _route: &RouteView<'_, T>,
        _train: TrainIndex,
        _reason: PruneReason,
        _statistics: &RevenueStatistics,
    ) {
    }

    fn on_improved(&mut self, total: T, aux: T, is_final: bool, _statistics: &RevenueStatistics) {
        self.best_total = Some(total);
        if is_final {
            log::info!("Final revenue: {} (dynamic share: {})", total, aux);
        } else {
            log::debug!("Improved revenue: {} (dynamic share: {})", total, aux);
        }
    }
}
