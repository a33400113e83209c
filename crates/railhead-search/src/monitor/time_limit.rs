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
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    stats::RevenueStatistics,
    view::RouteView,
};
use railhead_core::num::RevenueNumeric;
use railhead_model::{
    index::{TrainIndex, VertexIndex},
    network::RevenueNetwork,
};
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// A monitor that terminates the calculation after a specified duration.
///
/// Checks the clock only every `check_interval` polls to minimize overhead.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    ops_since_last_check: u64,
    _marker: PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Creates a new `TimeLimitMonitor` with the specified duration and check interval.
    /// A higher `check_interval` reduces overhead but may overshoot the limit slightly.
    pub fn new(duration: Duration, check_interval: u64) -> Self {
        Self {
            time_limit: duration,
            start_time: None,
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a new `TimeLimitMonitor` checking the clock every 10,000 polls.
    pub fn with_default_check_interval(duration: Duration) -> Self {
        Self::new(duration, 10_000)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    fn poll(&mut self) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add(1);

        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() > self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "Time limit of {} ms exceeded",
                    self.time_limit.as_millis()
                ));
            }
        }

        SearchCommand::Continue
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: RevenueNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _network: &RevenueNetwork<T>, _statistics: &RevenueStatistics) {
        self.start_time = Some(Instant::now());
        self.ops_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &RevenueStatistics) {
        self.start_time = None;
    }

    fn search_command(&mut self, _route: &RouteView<'_, T>, _statistics: &RevenueStatistics) -> SearchCommand {
        self.poll()
    }

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

    fn on_improved(&mut self, _total: T, _aux: T, _is_final: bool, _statistics: &RevenueStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continues_before_search_starts() {
        let mut monitor = TimeLimitMonitor::<i32>::new(Duration::ZERO, 1);
        assert_eq!(monitor.poll(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_after_limit() {
        let mut monitor = TimeLimitMonitor::<i32>::new(Duration::ZERO, 2);
        monitor.start_time = Some(Instant::now() - Duration::from_millis(5));

        // The clock is only read on every second poll.
        assert_eq!(monitor.poll(), SearchCommand::Continue);
        assert_eq!(
            monitor.poll(),
            SearchCommand::Terminate("Time limit of 0 ms exceeded".to_string())
        );
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::<i32>::with_default_check_interval(Duration::from_secs(3600));
        monitor.start_time = Some(Instant::now());
        monitor.ops_since_last_check = 9_999;
        assert_eq!(monitor.poll(), SearchCommand::Continue);
        assert_eq!(monitor.ops_since_last_check, 0);
    }
}
