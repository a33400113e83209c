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

//! Monitoring combinators
//!
//! Provides `CompositeMonitor`, a fan-out monitor that forwards every event
//! to its children. Logging, time limits, interrupts and improvement
//! callbacks can be mixed without coupling them to the calculator.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

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

/// A monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn SearchMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SearchMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl<'a, T> SearchMonitor<T> for CompositeMonitor<'a, T>
where
    T: RevenueNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, network: &RevenueNetwork<T>, statistics: &RevenueStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(network, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &RevenueStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, route: &RouteView<'_, T>, statistics: &RevenueStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            match monitor.search_command(route, statistics) {
                SearchCommand::Continue => continue,
                command => return command,
            }
        }
        SearchCommand::Continue
    }

    fn on_vertex(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        vertex: VertexIndex,
        statistics: &RevenueStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_vertex(route, train, vertex, statistics);
        }
    }

    fn on_prune(
        &mut self,
        route: &RouteView<'_, T>,
        train: TrainIndex,
        reason: PruneReason,
        statistics: &RevenueStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(route, train, reason, statistics);
        }
    }

    fn on_improved(&mut self, total: T, aux: T, is_final: bool, statistics: &RevenueStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_improved(total, aux, is_final, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{monitor::no_op::NoOperationMonitor, state::SearchState};
    use railhead_model::{network::RevenueNetworkBuilder, train::TrainDescriptor, vertex::Vertex};
    use std::{cell::RefCell, rc::Rc};

    struct Recording {
        label: &'static str,
        command: SearchCommand,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl SearchMonitor<i32> for Recording {
        fn name(&self) -> &str {
            self.label
        }

        fn on_enter_search(&mut self, _network: &RevenueNetwork<i32>, _statistics: &RevenueStatistics) {
            self.events.borrow_mut().push(format!("{}:enter", self.label));
        }

        fn on_exit_search(&mut self, _statistics: &RevenueStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.label));
        }

        fn search_command(&mut self, _route: &RouteView<'_, i32>, _statistics: &RevenueStatistics) -> SearchCommand {
            self.events.borrow_mut().push(format!("{}:command", self.label));
            self.command.clone()
        }

        fn on_vertex(
            &mut self,
            _route: &RouteView<'_, i32>,
            _train: TrainIndex,
            _vertex: VertexIndex,
            _statistics: &RevenueStatistics,
        ) {
        }

        fn on_prune(
            &mut self,
            _route: &RouteView<'_, i32>,
            _train: TrainIndex,
            _reason: PruneReason,
            _statistics: &RevenueStatistics,
        ) {
        }

        fn on_improved(&mut self, total: i32, _aux: i32, _is_final: bool, _statistics: &RevenueStatistics) {
            self.events
                .borrow_mut()
                .push(format!("{}:improved:{}", self.label, total));
        }
    }

    fn network() -> RevenueNetwork<i32> {
        let mut builder = RevenueNetworkBuilder::new();
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_vertex(Vertex::major(10));
        builder.build().unwrap()
    }

    #[test]
    fn test_events_fan_out_in_insertion_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(Recording {
            label: "a",
            command: SearchCommand::Continue,
            events: events.clone(),
        });
        composite.add_monitor(Recording {
            label: "b",
            command: SearchCommand::Continue,
            events: events.clone(),
        });
        assert_eq!(composite.len(), 2);

        let network = network();
        let stats = RevenueStatistics::default();
        composite.on_enter_search(&network, &stats);
        composite.on_improved(40, 0, false, &stats);
        composite.on_exit_search(&stats);

        assert_eq!(
            *events.borrow(),
            vec!["a:enter", "b:enter", "a:improved:40", "b:improved:40", "a:exit", "b:exit"]
        );
    }

    #[test]
    fn test_search_command_short_circuits() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(Recording {
            label: "stop",
            command: SearchCommand::Terminate("stop".to_string()),
            events: events.clone(),
        });
        composite.add_monitor(Recording {
            label: "late",
            command: SearchCommand::Continue,
            events: events.clone(),
        });

        let network = network();
        let state = SearchState::new(&network);
        let t0 = TrainIndex::new(0);
        let view = RouteView::new(&network, &state, t0, t0);
        let stats = RevenueStatistics::default();

        assert_eq!(
            composite.search_command(&view, &stats),
            SearchCommand::Terminate("stop".to_string())
        );
        assert_eq!(*events.borrow(), vec!["stop:command"]);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeMonitor::<i32>::default();
        assert!(composite.is_empty());

        let network = network();
        let state = SearchState::new(&network);
        let t0 = TrainIndex::new(0);
        let view = RouteView::new(&network, &state, t0, t0);
        assert_eq!(
            composite.search_command(&view, &RevenueStatistics::default()),
            SearchCommand::Continue
        );
    }
}
